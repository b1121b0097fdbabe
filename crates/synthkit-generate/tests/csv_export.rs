use std::path::PathBuf;

use synthkit_core::{BusinessTypeRegistry, Stage};
use synthkit_generate::RequestedCounts;
use synthkit_generate::generate_dataset;
use synthkit_generate::output::write_dataset_csv;

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("synthkit_csv_{}", uuid::Uuid::new_v4()))
}

#[test]
fn writes_one_csv_per_pool_with_headers() {
    let registry = BusinessTypeRegistry::builtin();
    let dataset = generate_dataset(
        &registry,
        "b2c-subscription-app",
        Stage::Early,
        21,
        Some(RequestedCounts {
            customers: Some(6),
            plans: Some(2),
            subscriptions: Some(4),
            invoices: Some(5),
            charges: Some(8),
        }),
    )
    .expect("generate dataset");

    let dir = temp_dir();
    let summary = write_dataset_csv(&dir, &dataset).expect("write csv");

    let files: Vec<&str> = summary.tables.iter().map(|table| table.file.as_str()).collect();
    assert_eq!(
        files,
        vec![
            "customers.csv",
            "plans.csv",
            "subscriptions.csv",
            "invoices.csv",
            "charges.csv"
        ]
    );
    assert_eq!(summary.tables[0].rows, 6);
    assert_eq!(summary.tables[4].rows, 8);

    let customers = std::fs::read_to_string(dir.join("customers.csv")).expect("read customers");
    let mut lines = customers.lines();
    assert_eq!(
        lines.next(),
        Some(
            "id,name,email,phone,address.line1,address.city,address.state,address.postal_code,address.country,created,currency,delinquent,metadata"
        )
    );
    assert!(customers.contains(&dataset.customers[0].id));

    let charges = std::fs::read_to_string(dir.join("charges.csv")).expect("read charges");
    assert_eq!(charges.lines().count(), 9);

    let on_disk: u64 = summary
        .tables
        .iter()
        .map(|table| {
            std::fs::metadata(dir.join(&table.file))
                .expect("metadata")
                .len()
        })
        .sum();
    assert_eq!(summary.bytes_written(), on_disk);

    std::fs::remove_dir_all(&dir).ok();
}
