//! Configuration system
//!
//! Settings are layered, later layers winning:
//!
//! 1. `GraphConfig::default()`
//! 2. YAML file (`GraphConfig::from_yaml`, schema v1)
//! 3. Environment (`GraphConfig::apply_env`)
//! 4. CLI flags (`ConfigOverrides`)
//!
//! `GraphConfig::resolve` applies all four.
//!
//! ```yaml
//! version: 1
//! data_dir: data
//! output_dir: output
//! format: graph
//! ```

pub mod error;
pub mod io;

pub use error::{ConfigError, ConfigResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::shared::constants;
use io::ConfigFileV1;

const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// Output document layout
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `{nodes, edges}` interchange document
    #[default]
    Graph,
    /// Concept-centric summary (links, related concepts)
    Summary,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Graph => "graph",
            ExportFormat::Summary => "summary",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("graph") {
            Ok(ExportFormat::Graph)
        } else if s.eq_ignore_ascii_case("summary") {
            Ok(ExportFormat::Summary)
        } else {
            Err(ConfigError::UnknownFormat(s.to_string()))
        }
    }
}

/// Command-line layer; `None` leaves the lower layers alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<ExportFormat>,
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// Directory holding the two input CSV files
    pub data_dir: PathBuf,
    /// Directory the export is written to (created on demand)
    pub output_dir: PathBuf,
    pub concepts_file: String,
    pub connections_file: String,
    pub output_file: String,
    pub format: ExportFormat,
    /// Indent the JSON output
    pub pretty: bool,
    /// Edge type followed by `trace_ancestry` in node reports
    pub containment_type: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(constants::dirs::DATA_DIR),
            output_dir: PathBuf::from(constants::dirs::OUTPUT_DIR),
            concepts_file: constants::concepts::FILE_NAME.to_string(),
            connections_file: constants::connections::FILE_NAME.to_string(),
            output_file: constants::output::FILE_NAME.to_string(),
            format: ExportFormat::Graph,
            pretty: true,
            containment_type: constants::CONTAINMENT_EDGE_TYPE.to_string(),
        }
    }
}

impl GraphConfig {
    /// Load from YAML file (v1 schema) on top of the defaults
    pub fn from_yaml(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse YAML content (v1 schema) on top of the defaults
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        match file.version {
            None => return Err(ConfigError::MissingVersion),
            Some(v) if !SUPPORTED_VERSIONS.contains(&v) => {
                return Err(ConfigError::UnsupportedVersion {
                    found: v,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => {}
        }

        let mut config = Self::default();
        if let Some(dir) = file.data_dir {
            config.data_dir = dir;
        }
        if let Some(dir) = file.output_dir {
            config.output_dir = dir;
        }
        if let Some(name) = file.concepts_file {
            config.concepts_file = name;
        }
        if let Some(name) = file.connections_file {
            config.connections_file = name;
        }
        if let Some(name) = file.output_file {
            config.output_file = name;
        }
        if let Some(format) = file.format {
            config.format = format;
        }
        if let Some(pretty) = file.pretty {
            config.pretty = pretty;
        }
        if let Some(edge_type) = file.containment_type {
            config.containment_type = edge_type;
        }

        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the YAML file (if any), then the environment, then
    /// `overrides`
    pub fn resolve<F>(
        file: Option<&Path>,
        lookup: F,
        overrides: &ConfigOverrides,
    ) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match file {
            Some(path) => Self::from_yaml(path)?,
            None => Self::default(),
        };
        Ok(config.apply_env(lookup)?.apply_overrides(overrides))
    }

    /// Apply `CONCEPTGRAPH_DATA_DIR`, `CONCEPTGRAPH_OUTPUT_DIR` and
    /// `CONCEPTGRAPH_FORMAT` from `lookup`; empty values are ignored
    pub fn apply_env<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(dir) = get(constants::env::DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get(constants::env::OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(format) = get(constants::env::FORMAT) {
            self.format = format.parse()?;
        }
        Ok(self)
    }

    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(dir) = &overrides.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let names = [
            ("concepts_file", &self.concepts_file),
            ("connections_file", &self.connections_file),
            ("output_file", &self.output_file),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyFileName { field });
            }
        }
        Ok(())
    }

    pub fn concepts_path(&self) -> PathBuf {
        self.data_dir.join(&self.concepts_file)
    }

    pub fn connections_path(&self) -> PathBuf {
        self.data_dir.join(&self.connections_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    /// Export to YAML (v1 schema, every field written)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            data_dir: Some(self.data_dir.clone()),
            output_dir: Some(self.output_dir.clone()),
            concepts_file: Some(self.concepts_file.clone()),
            connections_file: Some(self.connections_file.clone()),
            output_file: Some(self.output_file.clone()),
            format: Some(self.format),
            pretty: Some(self.pretty),
            containment_type: Some(self.containment_type.clone()),
        };

        Ok(serde_yaml::to_string(&file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_paths() {
        let config = GraphConfig::default();
        assert_eq!(config.concepts_path(), PathBuf::from("data/concepts.csv"));
        assert_eq!(
            config.connections_path(),
            PathBuf::from("data/connections.csv")
        );
        assert_eq!(
            config.output_path(),
            PathBuf::from("output/knowledge_graph.json")
        );
        assert_eq!(config.format, ExportFormat::Graph);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("CONCEPTGRAPH_DATA_DIR", "/srv/sheets"),
            ("CONCEPTGRAPH_OUTPUT_DIR", ""),
        ]
        .into_iter()
        .collect();

        let config = GraphConfig::default()
            .apply_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/sheets"));
        // empty values are ignored
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.format, ExportFormat::Graph);
    }

    #[test]
    fn test_env_format() {
        let config = GraphConfig::default()
            .apply_env(|k| (k == "CONCEPTGRAPH_FORMAT").then(|| "Summary".to_string()))
            .unwrap();
        assert_eq!(config.format, ExportFormat::Summary);

        let err = GraphConfig::default()
            .apply_env(|k| (k == "CONCEPTGRAPH_FORMAT").then(|| "xml".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFormat(ref name) if name == "xml"));
    }

    #[test]
    fn test_resolve_layers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"version: 1\ndata_dir: from_yaml\noutput_dir: from_yaml_out\nformat: summary\npretty: false\n",
        )
        .unwrap();
        let env: HashMap<&str, &str> = [("CONCEPTGRAPH_OUTPUT_DIR", "from_env")].into_iter().collect();
        let lookup = |k: &str| env.get(k).map(|v| v.to_string());

        // file + env, no flags
        let config = GraphConfig::resolve(Some(file.path()), lookup, &ConfigOverrides::default())
            .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("from_yaml"));
        assert_eq!(config.output_dir, PathBuf::from("from_env"));
        assert_eq!(config.format, ExportFormat::Summary);
        assert!(!config.pretty);

        // flags win over both
        let overrides = ConfigOverrides {
            data_dir: Some(PathBuf::from("from_flag")),
            output_dir: Some(PathBuf::from("from_flag_out")),
            format: Some(ExportFormat::Graph),
        };
        let config = GraphConfig::resolve(Some(file.path()), lookup, &overrides).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("from_flag"));
        assert_eq!(config.output_dir, PathBuf::from("from_flag_out"));
        assert_eq!(config.format, ExportFormat::Graph);
        assert!(!config.pretty);
    }

    #[test]
    fn test_resolve_without_file() {
        let config = GraphConfig::resolve(None, |_| None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, GraphConfig::default());
    }

    #[test]
    fn test_validate_rejects_blank_file_name() {
        let mut config = GraphConfig::default();
        config.connections_file = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyFileName {
                field: "connections_file"
            })
        ));
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("graph".parse::<ExportFormat>().unwrap(), ExportFormat::Graph);
        assert_eq!(
            "Summary".parse::<ExportFormat>().unwrap(),
            ExportFormat::Summary
        );
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ConfigError::UnknownFormat(_))
        ));
    }
}
