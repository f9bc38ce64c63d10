// Row Loader Infrastructure

pub mod csv_reader;

pub use csv_reader::{load_concepts, load_connections, load_records};
