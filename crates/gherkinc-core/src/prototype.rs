//! Introspected prototypes of the C++ library under test.
//!
//! The header parser reconstructs these from `.h` files; the Gherkin parser
//! resolves feature-level names against them. Type names are opaque strings
//! in which each trailing `*` is one level of pointer indirection.

use std::fmt;

use serde::Deserialize;

use crate::ast::Expression;

/// A C++ callable: method, constructor, or standalone function.
///
/// Constructors are modelled as static functions whose `return_type` is the
/// owning class. Static methods carry the class name in `namespace` so the
/// emitter can qualify the call; constructors and standalone functions carry
/// no namespace.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionPrototype {
    pub name: String,
    pub is_static: bool,
    pub return_type: String,
    #[serde(default)]
    pub argument_types: Vec<String>,
    #[serde(default)]
    pub namespace: Option<String>,
}

impl FunctionPrototype {
    /// Overload check: argument count and pairwise type-name equality.
    /// There is no subtype-aware matching; coercions happen at the call
    /// site before this runs.
    pub fn matches(&self, args: &[Expression]) -> bool {
        if self.argument_types.len() != args.len() {
            return false;
        }
        self.argument_types
            .iter()
            .zip(args)
            .all(|(ty, arg)| arg.type_name() == Some(ty.as_str()))
    }
}

impl fmt::Display for FunctionPrototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            write!(f, "static ")?;
        }
        write!(f, "{} ", self.return_type)?;
        if let Some(ns) = &self.namespace {
            write!(f, "{ns}::")?;
        }
        write!(f, "{}({})", self.name, self.argument_types.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldPrototype {
    pub name: String,
    pub ty: String,
    pub is_static: bool,
    pub namespace: Option<String>,
}

impl fmt::Display for FieldPrototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            write!(f, "static ")?;
        }
        write!(f, "{} {}", self.ty, self.name)
    }
}

/// One reconstructed class: everything overload resolution and emission
/// need, nothing more.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassPrototype {
    pub name: String,
    /// Header the class was found in, relative to the source root.
    pub filename: String,
    pub is_abstract: bool,
    pub fields: Vec<FieldPrototype>,
    pub constructors: Vec<FunctionPrototype>,
    pub methods: Vec<FunctionPrototype>,
    pub extends: Option<String>,
}

impl ClassPrototype {
    pub fn new(name: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            is_abstract: false,
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            extends: None,
        }
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldPrototype> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The overload set for one method name. C++ allows several methods per
    /// name with different signatures, so callers match against all of them.
    pub fn get_methods<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FunctionPrototype> {
        self.methods.iter().filter(move |method| method.name == name)
    }
}

impl fmt::Display for ClassPrototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_abstract {
            write!(f, "Abstract Class: ")?;
        } else {
            write!(f, "Class: ")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(parent) = &self.extends {
            write!(f, " extends {parent}")?;
        }
        write!(f, "\n  - Location: {}", self.filename)?;
        write!(f, "\n  - Fields:")?;
        for field in &self.fields {
            write!(f, "\n    - {field}")?;
        }
        write!(f, "\n  - Constructors:")?;
        for ctor in &self.constructors {
            write!(f, "\n    - {ctor}")?;
        }
        write!(f, "\n  - Methods:")?;
        for method in &self.methods {
            write!(f, "\n    - {method}")?;
        }
        Ok(())
    }
}
