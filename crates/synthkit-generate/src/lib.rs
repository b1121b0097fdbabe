//! Deterministic dataset generation engine for Synthkit.
//!
//! A seeded, stateless PRNG feeds realistic value generators, which feed the
//! Stripe-shaped entity generators. The engine assembles the entity pools in
//! dependency order so every foreign reference is valid by construction, then
//! attaches the business metrics computed by `synthkit-eval`.

pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;
pub mod scenario;

pub use synthkit_core::prng;

pub use engine::{GeneratedRecords, GenerationEngine, generate_dataset, generate_dataset_with};
pub use errors::GenerationError;
pub use model::{
    DatasetCounts, GenerateOptions, GenerationRequest, MAX_POOL_SIZE, RequestedCounts,
};
pub use scenario::{ScenarioKey, scenario_id};
