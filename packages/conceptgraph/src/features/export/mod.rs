// Graph Exporter
//
// - document: `{nodes, edges}` interchange document (and its reverse)
// - summary:  concept-centric view for readers who want one entry per concept
// - prompt:   task prompt, optionally carrying the summary as context
// - writer:   atomic JSON file output, document reader

pub mod document;
pub mod prompt;
pub mod summary;
pub mod writer;

pub use document::{ExportEdge, GraphDocument};
pub use prompt::render_prompt;
pub use summary::{ConceptSummary, SummaryDocument};
pub use writer::{read_document, write_json};
