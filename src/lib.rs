//! Doxygen XML Reference Generator
//!
//! Turns the XML output of Doxygen into reStructuredText fragments for a
//! Sphinx site.
//!
//! # Features
//!
//! - Reads `index.xml` and every file compound it lists
//! - Extracts functions with their parameters, return value and "see also" notes
//! - Matches `\param` documentation to declared parameters by name
//! - Extracts file-scope variables and constants
//! - Writes CSV index tables and a full function reference
//!
//! # Example
//!
//! ```no_run
//! use doxyref::{generate_references, DocsConfig};
//! use std::path::Path;
//!
//! let config = DocsConfig::default().resolve(Path::new("docs"));
//! let refs = generate_references(&config).unwrap();
//! println!("{} functions", refs.functions.len());
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod normalize;
pub mod reader;
pub mod types;

pub use config::DocsConfig;
pub use error::{DocsError, Result};
pub use extractor::Extractor;
pub use generator::DocsGenerator;
pub use reader::{CompoundDocument, SymbolReader};
pub use types::*;

use log::info;

/// Generate every reference artifact described by `config`.
///
/// Functions are extracted and written first (linked index, then reference
/// document), then constants. Any failure aborts the run; files written
/// before the failure are left in place.
pub fn generate_references(config: &DocsConfig) -> Result<ReferenceSet> {
    let reader = SymbolReader::open(&config.xml_dir)?;
    let compounds = reader.load_compounds()?;
    let extractor = Extractor::new().with_exclude(config.exclude_regex()?);
    let generator = DocsGenerator::new(config.clone());

    let functions = extractor.functions(&compounds)?;
    info!("Extracted {} functions", functions.len());
    generator.write_functions(&functions)?;

    let constants = extractor.constants(&compounds)?;
    info!("Extracted {} constants", constants.len());
    generator.write_constants(&constants)?;

    let set = ReferenceSet::new(functions, constants);
    generator.write_json(&set)?;

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const INDEX: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygenindex version="1.9.1">
  <compound refid="a" kind="file"><name>a.h</name>
    <member refid="add_1" kind="function"><name>add</name></member>
  </compound>
</doxygenindex>"#;

    const COMPOUND: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.1">
  <compounddef id="a" kind="file" language="C++">
    <compoundname>a.h</compoundname>
    <sectiondef kind="var">
      <memberdef kind="variable" id="a_1limit">
        <type>const int</type>
        <definition>const int LIMIT</definition>
        <name>LIMIT</name>
        <detaileddescription><para>Upper bound.</para></detaileddescription>
      </memberdef>
    </sectiondef>
    <sectiondef kind="func">
      <memberdef kind="function" id="add_1">
        <type>int</type>
        <definition>int add</definition>
        <argsstring>(int a, int b)</argsstring>
        <name>add</name>
        <param><type>int</type><declname>a</declname></param>
        <param><type>int</type><declname>b</declname></param>
        <briefdescription><para>Adds two numbers.</para></briefdescription>
        <detaileddescription>
          <para><parameterlist kind="param">
            <parameteritem>
              <parameternamelist><parametername>a</parametername></parameternamelist>
              <parameterdescription><para>first addend</para></parameterdescription>
            </parameteritem>
          </parameterlist></para>
        </detaileddescription>
      </memberdef>
      <memberdef kind="function" id="_helper_1">
        <definition>void _helper</definition>
        <argsstring>(void)</argsstring>
        <name>_helper</name>
      </memberdef>
    </sectiondef>
  </compounddef>
</doxygen>"#;

    fn setup(dir: &Path) -> DocsConfig {
        let xml = dir.join("_doxyxml");
        fs::create_dir_all(&xml).unwrap();
        fs::write(xml.join("index.xml"), INDEX).unwrap();
        fs::write(xml.join("a.xml"), COMPOUND).unwrap();
        DocsConfig::default().resolve(dir)
    }

    #[test]
    fn test_generate_references() {
        let temp = TempDir::new().unwrap();
        let config = setup(temp.path());

        let set = generate_references(&config).unwrap();

        assert_eq!(set.functions.len(), 2);
        assert_eq!(set.constants, vec![SymbolRecord::new("const int LIMIT", "Upper bound.")]);

        let index = fs::read_to_string(&config.function_index).unwrap();
        assert!(index.contains("\"`add <#add_1>`_\", \"Adds two numbers.\""));

        let reference = fs::read_to_string(&config.function_reference).unwrap();
        assert!(reference.starts_with("add\n---\nAdds two numbers.\n"));
        assert!(reference.contains("    \"int\", \"a\", \"first addend\"\n"));
        assert!(reference.contains("    \"int\", \"b\", \"\"\n"));

        let variables = fs::read_to_string(&config.variable_index).unwrap();
        assert!(variables.contains("\"const int LIMIT\", \"Upper bound.\""));
        assert!(!variables.contains("<#"));
    }

    #[test]
    fn test_generate_references_exclude() {
        let temp = TempDir::new().unwrap();
        let config = DocsConfig {
            exclude: Some("^_".to_string()),
            ..setup(temp.path())
        };

        let set = generate_references(&config).unwrap();

        assert_eq!(set.functions.len(), 1);
        assert!(!fs::read_to_string(&config.function_reference)
            .unwrap()
            .contains("_helper"));
    }

    #[test]
    fn test_generate_references_json() {
        let temp = TempDir::new().unwrap();
        let config = DocsConfig {
            json_output: Some(temp.path().join("refs.json")),
            ..setup(temp.path())
        };

        generate_references(&config).unwrap();

        let parsed: ReferenceSet =
            serde_json::from_str(&fs::read_to_string(temp.path().join("refs.json")).unwrap())
                .unwrap();
        assert_eq!(parsed.functions[0].refid, "add_1");
    }

    #[test]
    fn test_generate_references_missing_xml() {
        let temp = TempDir::new().unwrap();
        let config = DocsConfig::default().resolve(temp.path());

        let err = generate_references(&config).unwrap_err();

        assert!(matches!(err, DocsError::DocumentNotFound { .. }));
        assert!(!config.function_index.exists());
    }

    #[test]
    fn test_generate_references_bad_exclude() {
        let temp = TempDir::new().unwrap();
        let config = DocsConfig {
            exclude: Some("[".to_string()),
            ..setup(temp.path())
        };

        assert!(matches!(
            generate_references(&config).unwrap_err(),
            DocsError::Config(_)
        ));
    }

    #[test]
    fn test_generate_references_output_failure() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let config = DocsConfig {
            function_index: PathBuf::from(&blocker).join("function_index.csv"),
            ..setup(temp.path())
        };

        assert!(matches!(
            generate_references(&config).unwrap_err(),
            DocsError::OutputWriteFailure { .. }
        ));
    }
}
