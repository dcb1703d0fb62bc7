//! The prototype table: every class the Gherkin parser can resolve a name
//! against, with inherited members flattened in and fix-ups installed.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use gherkinc_core::prototype::{ClassPrototype, FunctionPrototype};

use crate::config::{BuiltinVariable, Config};

#[derive(Debug, Clone, Error)]
pub enum TableError {
    #[error("class '{class}' extends unknown class '{parent}'")]
    UnknownParent { class: String, parent: String },
    #[error("inheritance cycle through class '{class}'")]
    InheritanceCycle { class: String },
}

/// Built once from the header set, then read-only for every feature parse.
#[derive(Debug)]
pub struct ClassTable {
    classes: IndexMap<String, ClassPrototype>,
    free_functions: Vec<FunctionPrototype>,
    variables: IndexMap<String, BuiltinVariable>,
}

impl ClassTable {
    pub fn build(classes: Vec<ClassPrototype>, config: &Config) -> Result<Self, TableError> {
        let mut by_name: IndexMap<String, ClassPrototype> = IndexMap::new();
        for class in classes {
            by_name.insert(class.name.clone(), class);
        }

        flatten_inheritance(&mut by_name)?;

        for fix in &config.constructor_returns {
            if let Some(class) = by_name.get_mut(&fix.class) {
                for ctor in &mut class.constructors {
                    ctor.return_type = fix.return_type.clone();
                }
            }
        }
        for name in &config.default_constructors {
            if let Some(class) = by_name.get_mut(name) {
                class.constructors.push(FunctionPrototype {
                    name: name.clone(),
                    is_static: true,
                    return_type: name.clone(),
                    argument_types: Vec::new(),
                    namespace: None,
                });
            }
        }
        for alias in &config.aliases {
            if let Some(target) = by_name.get(&alias.target) {
                let target = target.clone();
                by_name.insert(alias.alias.clone(), target);
            }
        }

        let variables = config
            .variables
            .iter()
            .map(|var| (var.name.clone(), var.clone()))
            .collect();

        Ok(Self {
            classes: by_name,
            free_functions: config.free_functions.clone(),
            variables,
        })
    }

    pub fn get(&self, name: &str) -> Option<&ClassPrototype> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassPrototype> {
        self.classes.values()
    }

    pub fn free_function(&self, name: &str) -> Option<&FunctionPrototype> {
        self.free_functions.iter().find(|func| func.name == name)
    }

    pub fn free_functions(&self) -> &[FunctionPrototype] {
        &self.free_functions
    }

    pub fn variable(&self, name: &str) -> Option<&BuiltinVariable> {
        self.variables.get(name)
    }

    /// Unique header filenames in first-seen order: the default `#include`
    /// set for the generated file.
    pub fn default_includes(&self) -> Vec<String> {
        let files: IndexSet<&str> = self
            .classes
            .values()
            .map(|class| class.filename.as_str())
            .collect();
        files.into_iter().map(str::to_string).collect()
    }
}

/// Append every ancestor's fields and methods to each class, parents first,
/// so overload lookups never have to walk the `extends` chain. The parent
/// class itself stays in the table untouched.
fn flatten_inheritance(classes: &mut IndexMap<String, ClassPrototype>) -> Result<(), TableError> {
    let names: Vec<String> = classes.keys().cloned().collect();
    let mut done: HashSet<String> = HashSet::new();
    for name in names {
        flatten_one(&name, classes, &mut done, &mut Vec::new())?;
    }
    Ok(())
}

fn flatten_one(
    name: &str,
    classes: &mut IndexMap<String, ClassPrototype>,
    done: &mut HashSet<String>,
    chain: &mut Vec<String>,
) -> Result<(), TableError> {
    if done.contains(name) {
        return Ok(());
    }
    if chain.iter().any(|seen| seen == name) {
        return Err(TableError::InheritanceCycle {
            class: name.to_string(),
        });
    }

    let parent = classes.get(name).and_then(|class| class.extends.clone());
    if let Some(parent) = parent {
        if !classes.contains_key(&parent) {
            return Err(TableError::UnknownParent {
                class: name.to_string(),
                parent,
            });
        }
        chain.push(name.to_string());
        flatten_one(&parent, classes, done, chain)?;
        chain.pop();

        let (parent_fields, parent_methods) = {
            let parent = &classes[&parent];
            (parent.fields.clone(), parent.methods.clone())
        };
        if let Some(class) = classes.get_mut(name) {
            class.fields.extend(parent_fields);
            class.methods.extend(parent_methods);
        }
    }

    done.insert(name.to_string());
    Ok(())
}
