// Graph Builder Infrastructure

pub mod builder;

pub use builder::GraphBuilder;
