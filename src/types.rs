//! Core types for doxyref

use serde::{Deserialize, Serialize};

use crate::normalize::NOT_AVAILABLE;

/// Everything extracted from one Doxygen XML tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceSet {
    /// Documented functions, in compound then document order
    pub functions: Vec<FunctionRecord>,
    /// File-scope variables and constants
    pub constants: Vec<SymbolRecord>,
}

impl ReferenceSet {
    pub fn new(functions: Vec<FunctionRecord>, constants: Vec<SymbolRecord>) -> Self {
        Self {
            functions,
            constants,
        }
    }
}

/// Documentation for a single function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Unqualified function name
    pub name: String,
    /// Doxygen id, used as the link anchor
    pub refid: String,
    /// Brief description (empty when undocumented)
    pub brief: String,
    /// Parameter list as written in the declaration
    pub argsstring: String,
    /// Return type and qualified name
    pub definition: String,
    /// Declared parameters, in declaration order
    pub parameters: Vec<ParamRecord>,
    /// Return value description
    pub returns: Option<String>,
    /// "See also" notes
    pub see_also: Vec<String>,
}

impl FunctionRecord {
    pub fn new(name: impl Into<String>, refid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            refid: refid.into(),
            brief: String::new(),
            argsstring: String::new(),
            definition: String::new(),
            parameters: Vec::new(),
            returns: None,
            see_also: Vec::new(),
        }
    }

    pub fn with_brief(mut self, brief: impl Into<String>) -> Self {
        self.brief = brief.into();
        self
    }

    pub fn with_signature(
        mut self,
        definition: impl Into<String>,
        argsstring: impl Into<String>,
    ) -> Self {
        self.definition = definition.into();
        self.argsstring = argsstring.into();
        self
    }

    /// Full declaration as displayed in the reference
    pub fn signature(&self) -> String {
        format!("{}{}", self.definition, self.argsstring)
    }

    /// Return description, or the "not available" sentinel
    pub fn returns_text(&self) -> &str {
        self.returns.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// A declared parameter paired with its documentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRecord {
    /// Normalized type text
    pub type_text: String,
    /// Declared name, absent for unnamed parameters
    pub name: Option<String>,
    /// Description from the `\param` block, if any
    pub description: Option<String>,
}

impl ParamRecord {
    pub fn new(type_text: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            type_text: type_text.into(),
            name: name.map(|s| s.to_string()),
            description: None,
        }
    }

    pub fn is_documented(&self) -> bool {
        self.description.is_some()
    }
}

/// Documentation for a variable or constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Full definition text (type and identifier)
    pub name: String,
    /// First paragraph of the detailed description
    pub brief: String,
}

impl SymbolRecord {
    pub fn new(name: impl Into<String>, brief: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brief: brief.into(),
        }
    }
}
