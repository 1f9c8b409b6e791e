//! Configuration for reference generation
//!
//! Defaults match a Sphinx `docs/` folder where Doxygen writes XML to
//! `_doxyxml/` and the generated fragments go to `_mybuild/`. A JSON file
//! can override any field:
//!
//! ```json
//! {
//!     "xml_dir": "build/xml",
//!     "exclude": "^_"
//! }
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DocsError, Result};

/// Reference generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    /// Doxygen XML output directory (contains index.xml)
    pub xml_dir: PathBuf,
    /// Linked function index table
    pub function_index: PathBuf,
    /// Full function reference document
    pub function_reference: PathBuf,
    /// Variable/constant index table
    pub variable_index: PathBuf,
    /// Optional JSON dump of every extracted record
    pub json_output: Option<PathBuf>,
    /// Functions whose name matches this pattern are skipped
    pub exclude: Option<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            xml_dir: PathBuf::from("_doxyxml"),
            function_index: PathBuf::from("_mybuild/function_index.csv"),
            function_reference: PathBuf::from("_mybuild/function_references.rst"),
            variable_index: PathBuf::from("_mybuild/variable_index.csv"),
            json_output: None,
            exclude: None,
        }
    }
}

impl DocsConfig {
    /// Load a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| DocsError::from_read(path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| DocsError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Make every relative path relative to `base`
    pub fn resolve(mut self, base: &Path) -> Self {
        self.xml_dir = base.join(&self.xml_dir);
        self.function_index = base.join(&self.function_index);
        self.function_reference = base.join(&self.function_reference);
        self.variable_index = base.join(&self.variable_index);
        self.json_output = self.json_output.map(|p| base.join(p));
        self
    }

    /// Compile the exclude pattern, if any
    pub fn exclude_regex(&self) -> Result<Option<Regex>> {
        self.exclude
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern)
                    .map_err(|e| DocsError::Config(format!("invalid exclude pattern: {}", e)))
            })
            .transpose()
    }
}
