//! Core data structures for the gherkinc transpiler.
//!
//! Two layers:
//! - **Prototypes**: the introspected shape of the C++ library under test,
//!   reconstructed from its headers and used for name resolution.
//! - **AST**: the typed expression/statement tree a feature file lowers to,
//!   plus the pointer-indirection utilities the parser coerces with.
//!
//! This crate is pure data: no I/O, no parsing.

pub mod ast;
pub mod prototype;

#[cfg(test)]
mod ast_tests;

pub use ast::{Expression, Feature, ReportErr, Scenario, ScenarioItem, Statement};
pub use prototype::{ClassPrototype, FieldPrototype, FunctionPrototype};
