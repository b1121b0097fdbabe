use std::fmt;

use serde::{Deserialize, Serialize};

use synthkit_core::{Stage, normalize_business_type};

/// Role used when a caller does not name one.
pub const DEFAULT_ROLE: &str = "developer";

/// Parameters that identify a stored scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioKey {
    pub business_type: String,
    pub role: String,
    pub stage: Stage,
    pub seed: i64,
}

impl ScenarioKey {
    pub fn new(
        business_type: impl Into<String>,
        role: impl Into<String>,
        stage: Stage,
        seed: i64,
    ) -> Self {
        Self {
            business_type: business_type.into(),
            role: role.into(),
            stage,
            seed,
        }
    }

    pub fn id(&self) -> String {
        scenario_id(self)
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Storage id `{business_type}--{role}--{stage}--{seed}`.
///
/// Every part is restricted to `[a-z0-9-_]`; negative seeds render as
/// `n<abs>` so the id never contains a sign.
pub fn scenario_id(key: &ScenarioKey) -> String {
    let seed = if key.seed < 0 {
        format!("n{}", key.seed.unsigned_abs())
    } else {
        key.seed.to_string()
    };
    format!(
        "{}--{}--{}--{}",
        sanitize(&normalize_business_type(&key.business_type)),
        sanitize(&normalize_business_type(&key.role)),
        key.stage.as_str(),
        seed
    )
}

fn sanitize(part: &str) -> String {
    let cleaned: String = part
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-' || *ch == '_')
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}
