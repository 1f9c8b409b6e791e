//! Extraction of function and constant records from compound documents

use log::{debug, warn};
use regex::Regex;
use roxmltree::{Document, Node};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{DocsError, Result};
use crate::normalize::{flatten_text, normalize, normalize_opt};
use crate::reader::CompoundDocument;
use crate::types::*;

/// Extractor for Doxygen compound documents
pub struct Extractor {
    exclude: Option<Regex>,
}

impl Extractor {
    pub fn new() -> Self {
        Self { exclude: None }
    }

    /// Skip functions whose name matches `exclude`
    pub fn with_exclude(mut self, exclude: Option<Regex>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Extract every function from every compound, in order
    pub fn functions(&self, compounds: &[CompoundDocument]) -> Result<Vec<FunctionRecord>> {
        let mut functions = Vec::new();
        let mut seen = HashSet::new();

        for compound in compounds {
            let doc = compound.parse()?;
            for function in self.functions_in(&doc, compound.path())? {
                if !seen.insert(function.refid.clone()) {
                    warn!(
                        "Duplicate function id {} ({}) in {}",
                        function.refid,
                        function.name,
                        compound.path().display()
                    );
                }
                functions.push(function);
            }
        }

        Ok(functions)
    }

    /// Extract every file-scope variable from every compound, in order
    pub fn constants(&self, compounds: &[CompoundDocument]) -> Result<Vec<SymbolRecord>> {
        let mut constants = Vec::new();
        for compound in compounds {
            let doc = compound.parse()?;
            constants.extend(self.constants_in(&doc, compound.path())?);
        }
        Ok(constants)
    }

    /// Functions of a single parsed document
    pub fn functions_in(&self, doc: &Document, path: &Path) -> Result<Vec<FunctionRecord>> {
        let mut functions = Vec::new();

        for node in doc
            .descendants()
            .filter(|n| n.is_element() && n.attribute("kind") == Some("function"))
        {
            let function = function_record(node, path)?;

            if let Some(exclude) = &self.exclude {
                if exclude.is_match(&function.name) {
                    debug!("Excluding {}", function.name);
                    continue;
                }
            }

            functions.push(function);
        }

        Ok(functions)
    }

    /// Variables declared in `sectiondef kind="var"` of a single parsed document
    pub fn constants_in(&self, doc: &Document, path: &Path) -> Result<Vec<SymbolRecord>> {
        let mut constants = Vec::new();

        let sections = doc
            .root_element()
            .children()
            .filter(|n| n.has_tag_name("compounddef"))
            .flat_map(|compound| compound.children())
            .filter(|n| n.has_tag_name("sectiondef") && n.attribute("kind") == Some("var"));

        for section in sections {
            for member in section.children().filter(|n| n.is_element()) {
                let definition = child(member, "definition").map(flatten_text).ok_or_else(|| {
                    DocsError::malformed(
                        path,
                        format!(
                            "variable {} is missing <definition>",
                            member.attribute("id").unwrap_or("(no id)")
                        ),
                    )
                })?;

                let brief = first_para(member, "detaileddescription")
                    .map(|p| flatten_text(p).trim().to_string())
                    .unwrap_or_default();

                constants.push(SymbolRecord::new(definition, brief));
            }
        }

        Ok(constants)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the record for one `kind="function"` node
fn function_record(node: Node, path: &Path) -> Result<FunctionRecord> {
    let refid = node
        .attribute("id")
        .ok_or_else(|| DocsError::malformed(path, "function without id"))?;
    let required = |tag: &str| {
        child(node, tag).map(flatten_text).ok_or_else(|| {
            DocsError::malformed(path, format!("function {} is missing <{}>", refid, tag))
        })
    };

    let name = required("name")?;
    let argsstring = required("argsstring")?;
    let definition = required("definition")?;

    let brief = first_para(node, "briefdescription")
        .map(|p| flatten_text(p).trim().to_string())
        .unwrap_or_default();

    let docs = parameter_docs(node);
    let parameters = correlate(declared_parameters(node), &docs);

    let returns = normalize_opt(
        simplesects(node, "return")
            .find_map(|sect| child(sect, "para")),
    );

    let see_also = simplesects(node, "see")
        .flat_map(|sect| sect.children().filter(|n| n.has_tag_name("para")))
        .map(|p| normalize(Some(p)))
        .collect();

    Ok(FunctionRecord {
        name,
        refid: refid.to_string(),
        brief,
        argsstring,
        definition,
        parameters,
        returns,
        see_also,
    })
}

/// Name-keyed parameter descriptions from `detaileddescription//parameteritem`.
///
/// Every name in an item's name list maps to the item's first paragraph.
/// When a name is documented twice, the first occurrence wins.
pub fn parameter_docs(node: Node) -> HashMap<String, String> {
    let mut docs = HashMap::new();

    let Some(detailed) = child(node, "detaileddescription") else {
        return docs;
    };

    for item in detailed
        .descendants()
        .filter(|n| n.has_tag_name("parameteritem"))
    {
        let description_node = child(item, "parameterdescription");
        let description =
            normalize(description_node.and_then(|d| child(d, "para")).or(description_node));

        let names = item
            .children()
            .filter(|n| n.has_tag_name("parameternamelist"))
            .flat_map(|list| list.children())
            .filter(|n| n.has_tag_name("parametername"));

        for name in names {
            docs.entry(flatten_text(name).trim().to_string())
                .or_insert_with(|| description.clone());
        }
    }

    docs
}

/// Declared `param` children as (type, name) pairs, in declaration order
pub fn declared_parameters(node: Node) -> Vec<(String, Option<String>)> {
    node.children()
        .filter(|n| n.has_tag_name("param"))
        .map(|param| {
            let type_text = normalize(child(param, "type"));
            let name = child(param, "declname").map(|n| flatten_text(n).trim().to_string());
            (type_text, name)
        })
        .collect()
}

/// Attach descriptions to declared parameters by looking up each name.
///
/// The output has one entry per declared parameter, whatever the order or
/// completeness of `docs`. Unnamed parameters are never documented.
pub fn correlate(
    declared: Vec<(String, Option<String>)>,
    docs: &HashMap<String, String>,
) -> Vec<ParamRecord> {
    declared
        .into_iter()
        .map(|(type_text, name)| {
            let description = name.as_ref().and_then(|n| docs.get(n)).cloned();
            ParamRecord {
                type_text,
                name,
                description,
            }
        })
        .collect()
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn first_para<'a, 'input>(node: Node<'a, 'input>, container: &str) -> Option<Node<'a, 'input>> {
    child(node, container).and_then(|c| child(c, "para"))
}

fn simplesects<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    kind: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants()
        .filter(move |n| n.is_element() && n.attribute("kind") == Some(kind))
}
