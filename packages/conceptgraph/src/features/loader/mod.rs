// Row Loader
//
// Reads the concepts and connections CSV files into ordered sequences of
// records. No transformation happens here beyond lifting raw rows into typed
// views; attribute parsing and graph validation belong to the graph builder.
//
// ## Architecture
// - Domain: RawRecord (column → raw value), ConceptRecord, ConnectionRecord
// - Infrastructure: csv-backed reader with header and field-count checks

pub mod domain;
pub mod infrastructure;

pub use domain::{ConceptRecord, ConnectionRecord, RawRecord};
pub use infrastructure::{load_concepts, load_connections, load_records};
