use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Company maturity class. Scales default record counts and monetary amounts.
///
/// Every multiplier is strictly increasing from `Early` to `Enterprise`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Early,
    #[default]
    Growth,
    Enterprise,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Early, Stage::Growth, Stage::Enterprise];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Early => "early",
            Stage::Growth => "growth",
            Stage::Enterprise => "enterprise",
        }
    }

    /// Factor applied to every generated monetary amount.
    pub fn amount_multiplier(self) -> f64 {
        match self {
            Stage::Early => 1.0,
            Stage::Growth => 2.5,
            Stage::Enterprise => 6.0,
        }
    }

    /// Factor applied to default record counts when the caller leaves them unset.
    pub fn count_multiplier(self) -> u32 {
        match self {
            Stage::Early => 1,
            Stage::Growth => 2,
            Stage::Enterprise => 4,
        }
    }

    /// Expected customer lifetime used by the lifetime value heuristic.
    pub fn customer_lifetime_months(self) -> f64 {
        match self {
            Stage::Early => 12.0,
            Stage::Growth => 24.0,
            Stage::Enterprise => 36.0,
        }
    }

    pub fn conversion_factor(self) -> f64 {
        match self {
            Stage::Early => 0.8,
            Stage::Growth => 1.0,
            Stage::Enterprise => 1.2,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "early" => Ok(Stage::Early),
            "growth" => Ok(Stage::Growth),
            "enterprise" => Ok(Stage::Enterprise),
            other => Err(Error::InvalidArgument(format!(
                "unknown stage '{other}' (expected early, growth or enterprise)"
            ))),
        }
    }
}
