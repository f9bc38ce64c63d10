//! Configuration I/O (YAML schema)
//!
//! Defines the on-disk schema only. Loading and merging live in `mod.rs`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ExportFormat;

/// YAML Schema v1
///
/// Every setting is optional; absent settings keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub concepts_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ExportFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub containment_type: Option<String>,
}
