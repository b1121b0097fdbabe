//! Value and entity generators.
//!
//! Field offsets below 90 are used inside entity generators; the engine uses
//! offsets 90..100 of a record seed for pool selection.

use chrono::{DateTime, Datelike, Utc};

use synthkit_core::{BusinessProfile, Stage};

pub mod billing;
pub mod customers;
pub mod payments;
pub mod primitives;
pub mod semantic;

pub use billing::{generate_invoice, generate_plan, generate_subscription};
pub use customers::generate_customer;
pub use payments::{ChargeSource, generate_charge};

/// Parameters shared by every entity generator of one request.
#[derive(Debug, Clone, Copy)]
pub struct EntityContext<'a> {
    pub profile: &'a BusinessProfile,
    pub stage: Stage,
    /// Fixed "now" of the dataset; no generated timestamp lies after it.
    pub reference: DateTime<Utc>,
}

impl<'a> EntityContext<'a> {
    pub fn new(profile: &'a BusinessProfile, stage: Stage, reference: DateTime<Utc>) -> Self {
        Self {
            profile,
            stage,
            reference,
        }
    }

    pub fn currency(&self) -> &str {
        &self.profile.currency
    }

    pub fn reference_ts(&self) -> i64 {
        self.reference.timestamp()
    }

    pub fn reference_year(&self) -> i32 {
        self.reference.year()
    }
}
