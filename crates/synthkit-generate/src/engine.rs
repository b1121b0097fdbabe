use std::time::Instant;

use tracing::{debug, info};

use synthkit_core::{
    BusinessTypeRegistry, Charge, Customer, Dataset, DatasetView, Invoice, Plan, Stage,
    Subscription,
};
use synthkit_eval::{compute_business_metrics, present_metrics};

use crate::errors::GenerationError;
use crate::generators::{
    ChargeSource, EntityContext, generate_charge, generate_customer, generate_invoice,
    generate_plan, generate_subscription,
};
use crate::model::{DatasetCounts, GenerateOptions, GenerationRequest, RequestedCounts};
use crate::prng::{chance, field_seed, pick, record_seed};

const CUSTOMER_STRIDE: i64 = 1000;
const PLAN_STRIDE: i64 = 2000;
const SUBSCRIPTION_STRIDE: i64 = 3000;
const INVOICE_STRIDE: i64 = 4000;
const CHARGE_STRIDE: i64 = 5000;

// Per-kind salts keep record 0 of different kinds from sharing a seed.
const CUSTOMER_SALT: i64 = 0;
const PLAN_SALT: i64 = 100;
const SUBSCRIPTION_SALT: i64 = 200;
const INVOICE_SALT: i64 = 300;
const CHARGE_SALT: i64 = 400;

// Selection offsets, outside the range entity generators use.
const PICK_CUSTOMER: i64 = 90;
const PICK_PLAN: i64 = 91;
const ONE_TIME_DECISION: i64 = 92;
const PICK_INVOICE: i64 = 93;
const PICK_ONE_TIME_CUSTOMER: i64 = 94;
const PICK_SUBSCRIPTION: i64 = 95;

/// Entity pools of one request, before metrics are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRecords {
    /// Registry key of the profile that was used.
    pub business_type: String,
    /// True when the requested business type was unknown.
    pub fallback: bool,
    pub counts: DatasetCounts,
    pub customers: Vec<Customer>,
    pub plans: Vec<Plan>,
    pub subscriptions: Vec<Subscription>,
    pub invoices: Vec<Invoice>,
    pub charges: Vec<Charge>,
}

impl GeneratedRecords {
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView {
            customers: &self.customers,
            plans: &self.plans,
            subscriptions: &self.subscriptions,
            invoices: &self.invoices,
            charges: &self.charges,
        }
    }
}

/// Entry point for generating datasets from a business type, stage and seed.
#[derive(Debug, Clone)]
pub struct GenerationEngine<'r> {
    registry: &'r BusinessTypeRegistry,
    options: GenerateOptions,
}

impl<'r> GenerationEngine<'r> {
    pub fn new(registry: &'r BusinessTypeRegistry, options: GenerateOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Build the entity pools in dependency order. Every foreign key points
    /// at a record generated earlier in the same call.
    pub fn assemble(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedRecords, GenerationError> {
        let resolved = self.registry.resolve(&request.business_type);
        if resolved.fallback {
            debug!(
                event = "business_type_fallback",
                requested = %request.business_type,
                resolved = resolved.key,
                "unknown business type, using default profile"
            );
        }
        let profile = resolved.profile;
        let counts = request
            .counts
            .resolve(request.stage, &profile.availability)?;
        check_pools(&counts)?;

        let ctx = EntityContext::new(profile, request.stage, self.options.reference_time);
        let seed = request.seed;

        let customers: Vec<Customer> = (0..counts.customers)
            .map(|i| {
                let record = record_seed(seed.wrapping_add(CUSTOMER_SALT), i, CUSTOMER_STRIDE);
                generate_customer(record, i, &ctx)
            })
            .collect();

        let plans: Vec<Plan> = (0..counts.plans)
            .map(|i| {
                let record = record_seed(seed.wrapping_add(PLAN_SALT), i, PLAN_STRIDE);
                generate_plan(record, i, counts.plans, &ctx)
            })
            .collect();

        let mut subscriptions = Vec::with_capacity(counts.subscriptions);
        for i in 0..counts.subscriptions {
            let record = record_seed(seed.wrapping_add(SUBSCRIPTION_SALT), i, SUBSCRIPTION_STRIDE);
            let customer = pick(field_seed(record, PICK_CUSTOMER), &customers)
                .ok_or_else(|| empty_pool("subscriptions", "customers"))?;
            let plan = pick(field_seed(record, PICK_PLAN), &plans)
                .ok_or_else(|| empty_pool("subscriptions", "plans"))?;
            subscriptions.push(generate_subscription(record, i, customer, plan, &ctx));
        }

        let mut invoices = Vec::with_capacity(counts.invoices);
        for i in 0..counts.invoices {
            let record = record_seed(seed.wrapping_add(INVOICE_SALT), i, INVOICE_STRIDE);
            let subscription = pick(field_seed(record, PICK_SUBSCRIPTION), &subscriptions)
                .ok_or_else(|| empty_pool("invoices", "subscriptions"))?;
            invoices.push(generate_invoice(record, i, subscription, &ctx));
        }

        let one_time_rate = profile.rates.one_time_charge_rate;
        let mut charges = Vec::with_capacity(counts.charges);
        for i in 0..counts.charges {
            let record = record_seed(seed.wrapping_add(CHARGE_SALT), i, CHARGE_STRIDE);
            let invoice = if chance(field_seed(record, ONE_TIME_DECISION), one_time_rate) {
                None
            } else {
                pick(field_seed(record, PICK_INVOICE), &invoices)
            };
            let source = match invoice {
                Some(invoice) => ChargeSource::Invoice(invoice),
                None => ChargeSource::OneTime(
                    pick(field_seed(record, PICK_ONE_TIME_CUSTOMER), &customers)
                        .ok_or_else(|| empty_pool("charges", "customers"))?,
                ),
            };
            charges.push(generate_charge(record, i, source, &ctx));
        }

        Ok(GeneratedRecords {
            business_type: resolved.key.to_string(),
            fallback: resolved.fallback,
            counts,
            customers,
            plans,
            subscriptions,
            invoices,
            charges,
        })
    }

    /// Assemble the pools and attach business metrics.
    pub fn generate(&self, request: &GenerationRequest) -> Result<Dataset, GenerationError> {
        let start = Instant::now();
        info!(
            event = "generation_started",
            business_type = %request.business_type,
            stage = %request.stage,
            seed = request.seed,
            "generation started"
        );

        let records = self.assemble(request)?;
        let profile = self.registry.resolve(&records.business_type).profile;
        let business_metrics =
            compute_business_metrics(records.view(), profile, request.stage, request.seed);
        let metrics =
            present_metrics(&business_metrics, &profile.availability, &profile.currency);

        info!(
            event = "generation_completed",
            business_type = %records.business_type,
            customers = records.customers.len(),
            plans = records.plans.len(),
            subscriptions = records.subscriptions.len(),
            invoices = records.invoices.len(),
            charges = records.charges.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "generation completed"
        );

        Ok(Dataset {
            business_type: records.business_type,
            stage: request.stage,
            seed: request.seed,
            currency: profile.currency.clone(),
            customers: records.customers,
            plans: records.plans,
            subscriptions: records.subscriptions,
            invoices: records.invoices,
            charges: records.charges,
            business_metrics,
            metrics,
        })
    }
}

/// Generate a dataset anchored at the default reference time.
pub fn generate_dataset(
    registry: &BusinessTypeRegistry,
    business_type: &str,
    stage: Stage,
    seed: i64,
    counts: Option<RequestedCounts>,
) -> Result<Dataset, GenerationError> {
    generate_dataset_with(
        GenerateOptions::default(),
        registry,
        business_type,
        stage,
        seed,
        counts,
    )
}

pub fn generate_dataset_with(
    options: GenerateOptions,
    registry: &BusinessTypeRegistry,
    business_type: &str,
    stage: Stage,
    seed: i64,
    counts: Option<RequestedCounts>,
) -> Result<Dataset, GenerationError> {
    let request = GenerationRequest::new(business_type, stage, seed)
        .with_counts(counts.unwrap_or_default());
    GenerationEngine::new(registry, options).generate(&request)
}

fn check_pools(counts: &DatasetCounts) -> Result<(), GenerationError> {
    if counts.subscriptions > 0 && counts.customers == 0 {
        return Err(empty_pool("subscriptions", "customers"));
    }
    if counts.subscriptions > 0 && counts.plans == 0 {
        return Err(empty_pool("subscriptions", "plans"));
    }
    if counts.invoices > 0 && counts.subscriptions == 0 {
        return Err(empty_pool("invoices", "subscriptions"));
    }
    if counts.charges > 0 && counts.customers == 0 {
        return Err(empty_pool("charges", "customers"));
    }
    Ok(())
}

fn empty_pool(child: &str, parent: &str) -> GenerationError {
    GenerationError::InconsistentState(format!(
        "cannot generate {child} without any {parent}"
    ))
}
