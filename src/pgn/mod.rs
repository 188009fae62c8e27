pub mod exporter;

pub use exporter::{ExportError, PgnExporter};
