use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use synthkit_core::{MetricAvailability, Stage};

use crate::errors::GenerationError;

/// Per-stage-unit pool sizes used when a count is not requested.
const BASE_CUSTOMERS: usize = 20;
const BASE_PLANS: usize = 5;
const BASE_SUBSCRIPTIONS: usize = 15;
const BASE_INVOICES: usize = 20;
const BASE_CHARGES: usize = 40;

/// Largest record count accepted for any single pool.
pub const MAX_POOL_SIZE: usize = 1_000_000;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Fixed "now" every generated timestamp is anchored to.
    pub reference_time: DateTime<Utc>,
}

impl GenerateOptions {
    pub fn default_reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            reference_time: Self::default_reference_time(),
        }
    }
}

/// Record counts as supplied by a caller. Missing values fall back to the
/// stage-scaled defaults; negative values and values above
/// [`MAX_POOL_SIZE`] are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedCounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customers: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plans: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriptions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoices: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<i64>,
}

impl RequestedCounts {
    pub fn resolve(
        &self,
        stage: Stage,
        availability: &MetricAvailability,
    ) -> Result<DatasetCounts, GenerationError> {
        let scale = stage.count_multiplier() as usize;
        let recurring = |base: usize| {
            if availability.subscriptions {
                base * scale
            } else {
                0
            }
        };

        Ok(DatasetCounts {
            customers: resolve_count("customers", self.customers, BASE_CUSTOMERS * scale)?,
            plans: resolve_count("plans", self.plans, recurring(BASE_PLANS))?,
            subscriptions: resolve_count(
                "subscriptions",
                self.subscriptions,
                recurring(BASE_SUBSCRIPTIONS),
            )?,
            invoices: resolve_count("invoices", self.invoices, recurring(BASE_INVOICES))?,
            charges: resolve_count("charges", self.charges, BASE_CHARGES * scale)?,
        })
    }
}

fn resolve_count(
    field: &str,
    requested: Option<i64>,
    default: usize,
) -> Result<usize, GenerationError> {
    let Some(value) = requested else {
        return Ok(default);
    };
    let count = usize::try_from(value).map_err(|_| {
        GenerationError::InvalidArgument(format!("{field} count must be non-negative, got {value}"))
    })?;
    if count > MAX_POOL_SIZE {
        return Err(GenerationError::InvalidArgument(format!(
            "{field} count {count} exceeds the maximum of {MAX_POOL_SIZE}"
        )));
    }
    Ok(count)
}

/// Resolved, non-negative pool sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetCounts {
    pub customers: usize,
    pub plans: usize,
    pub subscriptions: usize,
    pub invoices: usize,
    pub charges: usize,
}

/// One generation request, threaded explicitly through the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub business_type: String,
    pub stage: Stage,
    pub seed: i64,
    #[serde(default)]
    pub counts: RequestedCounts,
}

impl GenerationRequest {
    pub fn new(business_type: impl Into<String>, stage: Stage, seed: i64) -> Self {
        Self {
            business_type: business_type.into(),
            stage,
            seed,
            counts: RequestedCounts::default(),
        }
    }

    pub fn with_counts(mut self, counts: RequestedCounts) -> Self {
        self.counts = counts;
        self
    }

    /// Every input that shapes the generated dataset for a fixed registry:
    /// the request itself plus the reference time.
    pub fn fingerprint(&self, options: &GenerateOptions) -> Result<Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut value {
            fields.insert(
                "reference_time".to_string(),
                serde_json::to_value(options.reference_time)?,
            );
        }
        Ok(value)
    }
}
