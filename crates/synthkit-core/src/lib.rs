//! Core contracts and helpers for Synthkit.
//!
//! This crate defines the stateless seeded PRNG, the Stripe-shaped entity
//! types, the assembled dataset contract, the business type registry and the
//! free-text business classifier shared by the generator, the evaluator and
//! the CLI.

pub mod classify;
pub mod dataset;
pub mod entities;
pub mod error;
pub mod prng;
pub mod registry;
pub mod stage;

pub use classify::{Classification, classify_description};
pub use dataset::{
    BusinessMetrics, Capability, Dataset, DatasetView, MetricCard, MetricCategory,
};
pub use entities::{
    Address, CardDetails, Charge, ChargeOutcome, ChargeStatus, Customer, Invoice, InvoiceStatus,
    OutcomeType, PaymentMethodDetails, Plan, PlanInterval, RiskLevel, Subscription,
    SubscriptionStatus, ThreeDSecure, ThreeDSecureResult,
};
pub use error::{Error, Result};
pub use registry::{
    AmountRange, AmountRanges, Audience, BusinessProfile, BusinessTypeRegistry,
    DEFAULT_BUSINESS_TYPE, MetricAvailability, PlanTemplate, ProfileRates, PropertySpec,
    ResolvedProfile, normalize_business_type,
};
pub use stage::Stage;
