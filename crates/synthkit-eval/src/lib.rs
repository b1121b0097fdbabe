//! Evaluation helpers for generated datasets: business metrics, referential
//! integrity and JSON contract validation.

pub mod business_metrics;
pub mod errors;
pub mod integrity;
pub mod schema;

pub use business_metrics::{compute_business_metrics, present_metrics};
pub use errors::EvalError;
pub use integrity::{IntegrityReport, Violation, check_integrity};
pub use schema::{dataset_json_schema, validate_dataset_json};
