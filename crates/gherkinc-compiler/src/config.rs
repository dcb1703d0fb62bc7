//! Fix-up configuration: the knowledge the header introspector cannot
//! derive, supplied as data rather than code.
//!
//! The defaults carry the raytracer set the transpiler grew up against; a
//! JSON file with the same shape can replace any part of it.

use serde::Deserialize;
use thiserror::Error;

use gherkinc_core::prototype::FunctionPrototype;

#[derive(Debug, Error)]
#[error("invalid fix-up configuration: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

/// A synonymous class name pointing at the canonical prototype.
#[derive(Debug, Clone, Deserialize)]
pub struct Alias {
    pub alias: String,
    pub target: String,
}

/// A constructor whose C++ class names a subtype of the type it builds.
#[derive(Debug, Clone, Deserialize)]
pub struct ConstructorReturn {
    pub class: String,
    pub return_type: String,
}

/// A feature-level name that expands to a fixed C++ expression.
#[derive(Debug, Clone, Deserialize)]
pub struct BuiltinVariable {
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub aliases: Vec<Alias>,
    pub constructor_returns: Vec<ConstructorReturn>,
    /// Classes given a zero-argument constructor the introspector cannot
    /// distinguish from an empty declaration.
    pub default_constructors: Vec<String>,
    pub variables: Vec<BuiltinVariable>,
    /// Standalone functions that are not members of any class.
    pub free_functions: Vec<FunctionPrototype>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aliases: vec![Alias {
                alias: "Color".to_string(),
                target: "Colour".to_string(),
            }],
            constructor_returns: vec![
                ConstructorReturn {
                    class: "Vector".to_string(),
                    return_type: "Tuple".to_string(),
                },
                ConstructorReturn {
                    class: "Point".to_string(),
                    return_type: "Tuple".to_string(),
                },
            ],
            default_constructors: vec!["Plane".to_string(), "Sphere".to_string()],
            variables: vec![BuiltinVariable {
                name: "identity_matrix".to_string(),
                code: "Transformation::identity()".to_string(),
                ty: "Matrix".to_string(),
            }],
            free_functions: vec![
                FunctionPrototype {
                    name: "almostEqual".to_string(),
                    is_static: true,
                    return_type: "bool".to_string(),
                    argument_types: vec!["double".to_string(), "double".to_string()],
                    namespace: None,
                },
                FunctionPrototype {
                    name: "sqrt".to_string(),
                    is_static: true,
                    return_type: "double".to_string(),
                    argument_types: vec!["double".to_string()],
                    namespace: None,
                },
            ],
        }
    }
}

impl Config {
    /// Parse a configuration file; omitted fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
