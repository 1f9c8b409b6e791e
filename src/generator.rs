//! Reference output generators
//!
//! Index tables are the CSV body of a Sphinx `csv-table` directive:
//!
//! ```rst
//! .. csv-table::
//!    :file: _mybuild/function_index.csv
//!    :header-rows: 1
//! ```
//!
//! The function reference is an RST fragment meant for `.. include::`.

use log::info;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::config::DocsConfig;
use crate::error::{DocsError, Result};
use crate::normalize::escape_cell;
use crate::types::*;

/// Header row shared by every index table
pub const INDEX_HEADER: &str = "\"symbol\", \"description\"\n";

/// Writes reference artifacts to the paths in a [`DocsConfig`]
pub struct DocsGenerator {
    config: DocsConfig,
}

impl DocsGenerator {
    pub fn new(config: DocsConfig) -> Self {
        Self { config }
    }

    /// Write the linked function index and the function reference
    pub fn write_functions(&self, functions: &[FunctionRecord]) -> Result<()> {
        write_output(
            &self.config.function_index,
            &render_function_index(functions, true),
        )?;
        write_output(
            &self.config.function_reference,
            &render_function_reference(functions),
        )
    }

    /// Write the variable/constant index
    pub fn write_constants(&self, constants: &[SymbolRecord]) -> Result<()> {
        write_output(&self.config.variable_index, &render_symbol_index(constants))
    }

    /// Write the JSON dump, when configured
    pub fn write_json(&self, set: &ReferenceSet) -> Result<()> {
        let Some(path) = &self.config.json_output else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(set).map_err(|e| DocsError::OutputWriteFailure {
            path: path.clone(),
            source: e.into(),
        })?;
        write_output(path, &content)
    }
}

/// Render a function index table.
///
/// With `links`, the symbol cell is an RST hyperlink to `#<refid>`.
pub fn render_function_index(functions: &[FunctionRecord], links: bool) -> String {
    let mut out = String::from(INDEX_HEADER);
    for function in functions {
        let symbol = if links {
            format!("`{} <#{}>`_", function.name, function.refid)
        } else {
            function.name.clone()
        };
        out.push_str(&index_row(&symbol, &function.brief));
    }
    out
}

/// Render a constant index table; constants are never linked
pub fn render_symbol_index(symbols: &[SymbolRecord]) -> String {
    let mut out = String::from(INDEX_HEADER);
    for symbol in symbols {
        out.push_str(&index_row(&symbol.name, &symbol.brief));
    }
    out
}

fn index_row(symbol: &str, description: &str) -> String {
    format!(
        "\"{}\", \"{}\"\n",
        escape_cell(symbol),
        single_line(&escape_cell(description))
    )
}

// A line break inside an indented csv-table body ends the directive.
fn single_line(text: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    text.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

/// Render one section per function, in input order
pub fn render_function_reference(functions: &[FunctionRecord]) -> String {
    let mut out = String::new();

    for function in functions {
        out.push_str(&format!("{}\n", function.name));
        out.push_str(&format!("{}\n", "-".repeat(function.name.chars().count())));
        out.push_str(&format!("{}\n\n", function.brief));
        out.push_str(&format!("``{}``\n\n", function.signature()));

        out.push_str("**Parameters:**\n\n");
        out.push_str(".. csv-table::\n");
        out.push_str("    :header: \"type\", \"name\", \"description\"\n");
        out.push_str("    :widths: auto\n\n");
        for param in &function.parameters {
            out.push_str(&format!(
                "    \"{}\", \"{}\", \"{}\"\n",
                single_line(&param.type_text),
                param.name.as_deref().map(escape_cell).unwrap_or_default(),
                single_line(param.description.as_deref().unwrap_or(""))
            ));
        }

        out.push_str("\n**Returns:**\n\n");
        out.push_str(&format!("{}\n\n", function.returns_text()));

        if !function.see_also.is_empty() {
            out.push_str("**See Also:**\n\n");
            for note in &function.see_also {
                out.push_str(&format!("* {}\n", note));
            }
            out.push('\n');
        }
    }

    out
}

/// Create `path` (and its parent directories) and write `content` to it
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    let failure = |source| DocsError::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(failure)?;
    }

    let mut file = File::create(path).map_err(failure)?;
    file.write_all(content.as_bytes()).map_err(failure)?;
    file.flush().map_err(failure)?;

    info!("Wrote {}", path.display());
    Ok(())
}
