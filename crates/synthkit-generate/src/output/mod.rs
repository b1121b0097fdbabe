pub mod csv;

pub use self::csv::{ExportSummary, ExportedTable, write_dataset_csv};
