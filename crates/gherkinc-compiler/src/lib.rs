//! gherkinc compiler: C++ header introspection, the Gherkin maths dialect,
//! and the C++ test-harness generator.
//!
//! Pipeline: headers → [`HeaderParser`] → [`ClassTable`] (with [`Config`]
//! fix-ups); features → [`GherkinParser`] (reads the table) → typed AST →
//! [`CodeGen`] → one self-contained C++ test file.

pub mod config;
pub mod emit;
pub mod lexer;
pub mod parser;
pub mod table;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{Config, ConfigError};
pub use emit::CodeGen;
pub use parser::{GherkinParser, HeaderParser, ParseError};
pub use table::{ClassTable, TableError};

use gherkinc_core::ast::Feature;

/// The compiler context: the prototype table plus everything derived from
/// configuration. Tests can instantiate it against a synthetic table.
pub struct Compiler {
    table: ClassTable,
}

impl Compiler {
    pub fn new(table: ClassTable) -> Self {
        Self { table }
    }

    /// Introspect a set of headers (`(filename, source)` pairs, filenames
    /// relative to the source root) and build the prototype table.
    pub fn from_headers(
        headers: impl IntoIterator<Item = (String, String)>,
        config: &Config,
    ) -> Result<Self, TableError> {
        let mut classes = Vec::new();
        for (filename, source) in headers {
            classes.extend(HeaderParser::new(filename, &source).parse());
        }
        Ok(Self {
            table: ClassTable::build(classes, config)?,
        })
    }

    pub fn table(&self) -> &ClassTable {
        &self.table
    }

    /// Parse one feature file. Scenario-level errors are contained as
    /// `ReportErr` entries; a file without a `Feature:` header is fatal.
    pub fn parse_feature(
        &self,
        path: impl Into<String>,
        source: &str,
    ) -> Result<Feature, ParseError> {
        GherkinParser::new(&self.table, path, source).build()
    }

    /// Lower parsed features into the generated test file.
    pub fn generate(&self, features: &[Feature], includes: &[String]) -> String {
        CodeGen::new(features, includes).build()
    }
}
