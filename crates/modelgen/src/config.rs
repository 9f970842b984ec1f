//! Configuration types for modelgen runs.
//!
//! This module provides the configuration structures that name the input
//! files of a run and where its outputs go. All types implement
//! [`serde::Deserialize`] for loading from external sources; every field
//! has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining input and output settings.
//! - [`InputConfig`] - The class model and the two flat configuration documents.
//! - [`OutputConfig`] - The output directory and the file name of every output.
//!
//! # Example
//!
//! ```
//! # use std::path::Path;
//! # use modelgen::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.output().delta_path(), Path::new("out/delta.json"));
//! assert_eq!(
//!     config.output().generator_path("xml-config").as_deref(),
//!     Some(Path::new("out/config.xml"))
//! );
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::export::{MetaJsonGenerator, XmlConfigGenerator};

/// Top-level configuration combining input and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Input file section.
    #[serde(default)]
    input: InputConfig,

    /// Output file section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(input: InputConfig, output: OutputConfig) -> Self {
        Self { input, output }
    }

    /// Returns the input configuration.
    pub fn input(&self) -> &InputConfig {
        &self.input
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Replaces the class model path.
    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.input.model = path.into();
        self
    }

    /// Replaces the original configuration document path.
    pub fn with_original_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.input.original_config = path.into();
        self
    }

    /// Replaces the patched configuration document path.
    pub fn with_patched_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.input.patched_config = path.into();
        self
    }

    /// Replaces the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.dir = dir.into();
        self
    }
}

/// Paths of the files a run reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Class model, read with the reader matching its extension.
    model: PathBuf,

    /// Flat JSON document the delta is computed from.
    original_config: PathBuf,

    /// Flat JSON document the delta is computed to.
    patched_config: PathBuf,
}

impl InputConfig {
    pub fn model(&self) -> &Path {
        &self.model
    }

    pub fn original_config(&self) -> &Path {
        &self.original_config
    }

    pub fn patched_config(&self) -> &Path {
        &self.patched_config
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("input/impulse_test_input.xml"),
            original_config: PathBuf::from("input/config.json"),
            patched_config: PathBuf::from("input/patched_config.json"),
        }
    }
}

/// Where a run writes its outputs.
///
/// File names are resolved relative to [`OutputConfig::dir`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    dir: PathBuf,
    delta: PathBuf,
    patched_config: PathBuf,

    /// Output file name per generator key.
    generators: IndexMap<String, PathBuf>,
}

impl OutputConfig {
    /// Returns the output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the delta document.
    pub fn delta_path(&self) -> PathBuf {
        self.dir.join(&self.delta)
    }

    /// Returns the path of the patched configuration rebuilt from the delta.
    pub fn patched_config_path(&self) -> PathBuf {
        self.dir.join(&self.patched_config)
    }

    /// Returns the output path of a generator, or `None` if its key is not
    /// configured.
    pub fn generator_path(&self, key: &str) -> Option<PathBuf> {
        self.generators.get(key).map(|name| self.dir.join(name))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("out"),
            delta: PathBuf::from("delta.json"),
            patched_config: PathBuf::from("res_patched_config.json"),
            generators: IndexMap::from([
                (XmlConfigGenerator::KEY.to_string(), PathBuf::from("config.xml")),
                (MetaJsonGenerator::KEY.to_string(), PathBuf::from("meta.json")),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(
            config.input().model(),
            Path::new("input/impulse_test_input.xml")
        );
        assert_eq!(
            config.input().original_config(),
            Path::new("input/config.json")
        );
        assert_eq!(
            config.input().patched_config(),
            Path::new("input/patched_config.json")
        );
        assert_eq!(config.output().dir(), Path::new("out"));
        assert_eq!(
            config.output().patched_config_path(),
            Path::new("out/res_patched_config.json")
        );
        assert_eq!(
            config.output().generator_path("meta-json"),
            Some(PathBuf::from("out/meta.json"))
        );
        assert_eq!(config.output().generator_path("svg"), None);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_value(json!({
            "input": {"model": "models/university.json"},
            "output": {"dir": "build"}
        }))
        .unwrap();

        assert_eq!(config.input().model(), Path::new("models/university.json"));
        assert_eq!(
            config.input().original_config(),
            Path::new("input/config.json")
        );
        assert_eq!(config.output().delta_path(), Path::new("build/delta.json"));
        assert_eq!(
            config.output().generator_path("xml-config"),
            Some(PathBuf::from("build/config.xml"))
        );
    }

    #[test]
    fn test_generators_table_replaces_defaults() {
        let config: AppConfig = serde_json::from_value(json!({
            "output": {"generators": {"xml-config": "model.xml"}}
        }))
        .unwrap();

        assert_eq!(
            config.output().generator_path("xml-config"),
            Some(PathBuf::from("out/model.xml"))
        );
        assert_eq!(config.output().generator_path("meta-json"), None);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_model("m.xml")
            .with_original_config("a.json")
            .with_patched_config("b.json")
            .with_output_dir("target/out");

        assert_eq!(config.input().model(), Path::new("m.xml"));
        assert_eq!(config.input().original_config(), Path::new("a.json"));
        assert_eq!(config.input().patched_config(), Path::new("b.json"));
        assert_eq!(
            config.output().delta_path(),
            Path::new("target/out/delta.json")
        );
    }
}
