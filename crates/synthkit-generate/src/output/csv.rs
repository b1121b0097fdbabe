use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use synthkit_core::Dataset;

use crate::errors::GenerationError;

/// One CSV file written by [`write_dataset_csv`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedTable {
    pub file: String,
    pub rows: u64,
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub tables: Vec<ExportedTable>,
}

impl ExportSummary {
    pub fn bytes_written(&self) -> u64 {
        self.tables.iter().map(|table| table.bytes).sum()
    }
}

/// Write every entity pool of `dataset` as `<kind>.csv` under `dir`.
///
/// Nested objects are flattened into dotted columns; column order is fixed.
pub fn write_dataset_csv(dir: &Path, dataset: &Dataset) -> Result<ExportSummary, GenerationError> {
    std::fs::create_dir_all(dir)?;
    let mut summary = ExportSummary::default();

    let customers = dataset.customers.iter().map(|customer| {
        vec![
            customer.id.clone(),
            customer.name.clone(),
            customer.email.clone(),
            customer.phone.clone(),
            customer.address.line1.clone(),
            customer.address.city.clone(),
            customer.address.state.clone(),
            customer.address.postal_code.clone(),
            customer.address.country.clone(),
            customer.created.to_string(),
            customer.currency.clone(),
            customer.delinquent.to_string(),
            json_cell(&customer.metadata),
        ]
    });
    summary.tables.push(write_table(
        dir,
        "customers.csv",
        &[
            "id",
            "name",
            "email",
            "phone",
            "address.line1",
            "address.city",
            "address.state",
            "address.postal_code",
            "address.country",
            "created",
            "currency",
            "delinquent",
            "metadata",
        ],
        customers,
    )?);

    let plans = dataset.plans.iter().map(|plan| {
        vec![
            plan.id.clone(),
            plan.nickname.clone(),
            plan.product.clone(),
            plan.amount.to_string(),
            plan.currency.clone(),
            label(&plan.interval),
            plan.interval_count.to_string(),
            plan.active.to_string(),
            plan.created.to_string(),
        ]
    });
    summary.tables.push(write_table(
        dir,
        "plans.csv",
        &[
            "id",
            "nickname",
            "product",
            "amount",
            "currency",
            "interval",
            "interval_count",
            "active",
            "created",
        ],
        plans,
    )?);

    let subscriptions = dataset.subscriptions.iter().map(|subscription| {
        vec![
            subscription.id.clone(),
            subscription.customer.clone(),
            subscription.plan.clone(),
            label(&subscription.status),
            subscription.quantity.to_string(),
            subscription.amount.to_string(),
            subscription.currency.clone(),
            subscription.created.to_string(),
            subscription.current_period_start.to_string(),
            subscription.current_period_end.to_string(),
            subscription.cancel_at_period_end.to_string(),
            optional(subscription.canceled_at),
        ]
    });
    summary.tables.push(write_table(
        dir,
        "subscriptions.csv",
        &[
            "id",
            "customer",
            "plan",
            "status",
            "quantity",
            "amount",
            "currency",
            "created",
            "current_period_start",
            "current_period_end",
            "cancel_at_period_end",
            "canceled_at",
        ],
        subscriptions,
    )?);

    let invoices = dataset.invoices.iter().map(|invoice| {
        vec![
            invoice.id.clone(),
            invoice.number.clone(),
            invoice.customer.clone(),
            invoice.subscription.clone(),
            label(&invoice.status),
            invoice.amount_due.to_string(),
            invoice.amount_paid.to_string(),
            invoice.amount_remaining.to_string(),
            invoice.currency.clone(),
            invoice.period_start.to_string(),
            invoice.period_end.to_string(),
            invoice.created.to_string(),
        ]
    });
    summary.tables.push(write_table(
        dir,
        "invoices.csv",
        &[
            "id",
            "number",
            "customer",
            "subscription",
            "status",
            "amount_due",
            "amount_paid",
            "amount_remaining",
            "currency",
            "period_start",
            "period_end",
            "created",
        ],
        invoices,
    )?);

    let charges = dataset.charges.iter().map(|charge| {
        let card = &charge.payment_method_details.card;
        vec![
            charge.id.clone(),
            charge.customer.clone(),
            charge.invoice.clone().unwrap_or_default(),
            charge.amount.to_string(),
            charge.amount_refunded.to_string(),
            charge.refunded.to_string(),
            charge.disputed.to_string(),
            charge.currency.clone(),
            label(&charge.status),
            charge.paid.to_string(),
            charge.created.to_string(),
            label(&charge.outcome.outcome_type),
            label(&charge.outcome.risk_level),
            optional(charge.outcome.risk_score),
            card.brand.clone(),
            card.last4.clone(),
            card.three_d_secure
                .as_ref()
                .map(|secure| label(&secure.result))
                .unwrap_or_default(),
        ]
    });
    summary.tables.push(write_table(
        dir,
        "charges.csv",
        &[
            "id",
            "customer",
            "invoice",
            "amount",
            "amount_refunded",
            "refunded",
            "disputed",
            "currency",
            "status",
            "paid",
            "created",
            "outcome.type",
            "outcome.risk_level",
            "outcome.risk_score",
            "card.brand",
            "card.last4",
            "card.three_d_secure",
        ],
        charges,
    )?);

    Ok(summary)
}

fn write_table(
    dir: &Path,
    file: &str,
    header: &[&str],
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<ExportedTable, GenerationError> {
    let writer = BufWriter::new(File::create(dir.join(file))?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(header)?;
    let mut count = 0_u64;
    for row in rows {
        writer.write_record(&row)?;
        count += 1;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(ExportedTable {
        file: file.to_string(),
        rows: count,
        bytes: counting.bytes_written(),
    })
}

/// Serde name of a unit enum variant, e.g. `past_due`.
fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(text)) => text,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

fn json_cell<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|inner| inner.to_string()).unwrap_or_default()
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
