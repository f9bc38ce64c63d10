//! Feature modules, leaves first: loader → graph_builder → export

pub mod export;
pub mod graph_builder;
pub mod loader;
