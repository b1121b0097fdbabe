//! Business type registry.
//!
//! A single lookup structure mapping a business type key to every table the
//! generators and the metrics engine consult: amount ranges, name pools,
//! phrase tables, entity property specs, rates and metric availability.
//! The registry is built once and shared by reference; it is never mutated
//! during generation. It serializes to JSON so the tables can be edited and
//! loaded back without code changes.

mod builtin;

use std::collections::BTreeMap;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dataset::Capability;
use crate::entities::PlanInterval;
use crate::error::{Error, Result};

/// Key reported for datasets produced from the fallback profile.
pub const DEFAULT_BUSINESS_TYPE: &str = "default";

/// Whether customers are companies or individuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    B2b,
    B2c,
}

/// Closed range of major currency units, before stage scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AmountRange {
    pub min: f64,
    pub max: f64,
}

impl AmountRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AmountRanges {
    /// Recurring price range used for the plan pool.
    pub plan: AmountRange,
    /// Range for charges that are not tied to an invoice.
    pub one_time: AmountRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlanTemplate {
    pub nickname: String,
    pub interval: PlanInterval,
}

/// Business-type specific customer attribute and its value pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PropertySpec {
    pub name: String,
    pub values: Vec<String>,
}

/// Which product surfaces apply to a business type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MetricAvailability {
    pub subscriptions: bool,
    pub radar: bool,
    pub disputes: bool,
    pub refunds: bool,
    pub authentication: bool,
}

impl MetricAvailability {
    pub const ALL: MetricAvailability = MetricAvailability {
        subscriptions: true,
        radar: true,
        disputes: true,
        refunds: true,
        authentication: true,
    };

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Subscriptions => self.subscriptions,
            Capability::Radar => self.radar,
            Capability::Disputes => self.disputes,
            Capability::Refunds => self.refunds,
            Capability::Authentication => self.authentication,
        }
    }
}

/// Probabilities used by the entity generators and metric heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProfileRates {
    /// Share of charges reclassified as one-time payments.
    pub one_time_charge_rate: f64,
    /// Success probability of a one-time charge.
    pub success_rate: f64,
    pub refund_rate: f64,
    pub dispute_rate: f64,
    /// Visitor-to-customer conversion before stage scaling.
    pub base_conversion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BusinessProfile {
    pub label: String,
    pub audience: Audience,
    pub currency: String,
    pub amounts: AmountRanges,
    pub plans: Vec<PlanTemplate>,
    /// Stems used for company names; empty pools fall back to the shared table.
    #[serde(default)]
    pub company_stems: Vec<String>,
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertySpec>,
    pub availability: MetricAvailability,
    pub rates: ProfileRates,
}

/// Outcome of resolving a business type key.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedProfile<'a> {
    /// Registry key of the profile actually used.
    pub key: &'a str,
    pub profile: &'a BusinessProfile,
    /// True when the requested key was unknown.
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BusinessTypeRegistry {
    default_profile: BusinessProfile,
    profiles: BTreeMap<String, BusinessProfile>,
}

impl BusinessTypeRegistry {
    /// Build a registry, validating every profile.
    pub fn new(
        default_profile: BusinessProfile,
        profiles: BTreeMap<String, BusinessProfile>,
    ) -> Result<Self> {
        let registry = Self {
            default_profile,
            profiles: profiles
                .into_iter()
                .map(|(key, profile)| (normalize_business_type(&key), profile))
                .collect(),
        };
        registry.validate()?;
        Ok(registry)
    }

    /// Registry shipped with the crate.
    pub fn builtin() -> Self {
        builtin::registry()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let registry: BusinessTypeRegistry = serde_json::from_str(json)?;
        let registry = Self::new(registry.default_profile, registry.profiles)?;
        Ok(registry)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve a business type, falling back to the default profile for
    /// unknown keys. Never fails.
    pub fn resolve(&self, business_type: &str) -> ResolvedProfile<'_> {
        let key = normalize_business_type(business_type);
        match self.profiles.get_key_value(&key) {
            Some((key, profile)) => ResolvedProfile {
                key: key.as_str(),
                profile,
                fallback: false,
            },
            None => ResolvedProfile {
                key: DEFAULT_BUSINESS_TYPE,
                profile: &self.default_profile,
                fallback: true,
            },
        }
    }

    pub fn contains(&self, business_type: &str) -> bool {
        self.profiles
            .contains_key(&normalize_business_type(business_type))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn default_profile(&self) -> &BusinessProfile {
        &self.default_profile
    }

    pub fn availability(&self, business_type: &str) -> MetricAvailability {
        self.resolve(business_type).profile.availability
    }

    fn validate(&self) -> Result<()> {
        validate_profile(DEFAULT_BUSINESS_TYPE, &self.default_profile)?;
        for (key, profile) in &self.profiles {
            if key.is_empty() {
                return Err(Error::Registry("empty business type key".to_string()));
            }
            if key == DEFAULT_BUSINESS_TYPE {
                return Err(Error::Registry(format!(
                    "'{DEFAULT_BUSINESS_TYPE}' is reserved for the fallback profile"
                )));
            }
            validate_profile(key, profile)?;
        }
        Ok(())
    }
}

impl Default for BusinessTypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Canonical form of a business type key: trimmed, lowercase, with spaces
/// and underscores replaced by dashes.
pub fn normalize_business_type(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|ch| match ch {
            '_' | ' ' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

fn validate_profile(key: &str, profile: &BusinessProfile) -> Result<()> {
    for (label, range) in [
        ("plan", profile.amounts.plan),
        ("one_time", profile.amounts.one_time),
    ] {
        if !range.min.is_finite() || !range.max.is_finite() {
            return Err(Error::Registry(format!(
                "{key}: {label} amount range must be finite"
            )));
        }
        if range.min < 0.0 || range.min > range.max {
            return Err(Error::Registry(format!(
                "{key}: {label} amount range requires 0 <= min <= max"
            )));
        }
    }

    let rates = profile.rates;
    for (label, rate) in [
        ("one_time_charge_rate", rates.one_time_charge_rate),
        ("success_rate", rates.success_rate),
        ("refund_rate", rates.refund_rate),
        ("dispute_rate", rates.dispute_rate),
        ("base_conversion_rate", rates.base_conversion_rate),
    ] {
        if !(0.0..=1.0).contains(&rate) {
            return Err(Error::Registry(format!(
                "{key}: {label} must be within [0, 1]"
            )));
        }
    }

    if profile.currency.trim().is_empty() {
        return Err(Error::Registry(format!("{key}: currency is required")));
    }

    for spec in &profile.properties {
        if spec.values.is_empty() {
            return Err(Error::Registry(format!(
                "{key}: property '{}' has no values",
                spec.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_case() {
        assert_eq!(
            normalize_business_type("  B2B_SaaS Subscriptions "),
            "b2b-saas-subscriptions"
        );
    }
}
