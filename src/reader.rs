//! Reader for a Doxygen XML output directory

use log::debug;
use roxmltree::Document;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DocsError, Result};

/// Name of the top-level document listing every compound
pub const INDEX_FILE: &str = "index.xml";

/// An opened Doxygen XML directory.
///
/// Opening parses `index.xml` and resolves every `kind="file"` compound to
/// its sibling document. Compound contents are read by [`load_compounds`].
///
/// [`load_compounds`]: SymbolReader::load_compounds
#[derive(Debug, Clone)]
pub struct SymbolReader {
    dir: PathBuf,
    compounds: Vec<PathBuf>,
}

impl SymbolReader {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let index_path = dir.join(INDEX_FILE);
        let source = read_document(&index_path)?;
        let index = parse_document(&index_path, &source)?;

        let mut compounds = Vec::new();
        for node in index
            .descendants()
            .filter(|n| n.is_element() && n.attribute("kind") == Some("file"))
        {
            let refid = node.attribute("refid").ok_or_else(|| {
                DocsError::malformed(&index_path, "file compound without refid")
            })?;

            let path = dir.join(format!("{}.xml", refid));
            if !path.is_file() {
                return Err(DocsError::DocumentNotFound { path });
            }
            compounds.push(path);
        }

        debug!(
            "{} lists {} file compounds",
            index_path.display(),
            compounds.len()
        );

        Ok(Self { dir, compounds })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Compound document paths, in index order
    pub fn compound_paths(&self) -> &[PathBuf] {
        &self.compounds
    }

    /// Read every compound document listed in the index
    pub fn load_compounds(&self) -> Result<Vec<CompoundDocument>> {
        self.compounds
            .iter()
            .map(|path| {
                debug!("Loading {}", path.display());
                let source = read_document(path)?;
                Ok(CompoundDocument::from_source(path.clone(), source))
            })
            .collect()
    }
}

/// The text of one compound document
#[derive(Debug, Clone)]
pub struct CompoundDocument {
    path: PathBuf,
    source: String,
}

impl CompoundDocument {
    pub fn from_source(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the document into a tree borrowing its text
    pub fn parse(&self) -> Result<Document<'_>> {
        parse_document(&self.path, &self.source)
    }
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| DocsError::from_read(path, e))
}

fn parse_document<'a>(path: &Path, source: &'a str) -> Result<Document<'a>> {
    Document::parse(source).map_err(|e| DocsError::malformed(path, format!("XML parse error: {}", e)))
}
