//! Feature-file parsing: grammar, scopes, and scenario-level recovery.
//!
//! This module owns the feature / background / scenario structure; the
//! type-directed expression grammar lives in [`expr`]. Line breaks are
//! insignificant — statements are delimited by the step keywords.

mod expr;


use std::collections::HashMap;

use gherkinc_core::ast::{Feature, ReportErr, Scenario, ScenarioItem, Statement};

use crate::lexer::{GHERKIN_KEYWORDS, TokenKind, scan};
use crate::table::ClassTable;

use super::{Cursor, ParseError};

use expr::Parsed;

pub struct GherkinParser<'t> {
    cursor: Cursor,
    table: &'t ClassTable,
    /// Stack of name → type bindings. One outer scope per file (background
    /// bindings live there), two per scenario so scenario names can shadow
    /// background names without leaking into siblings.
    scopes: Vec<HashMap<String, String>>,
    background: Vec<Statement>,
    scenarios: Vec<ScenarioItem>,
}

impl<'t> GherkinParser<'t> {
    pub fn new(table: &'t ClassTable, path: impl Into<String>, source: &str) -> Self {
        Self {
            cursor: Cursor::new(scan(source, GHERKIN_KEYWORDS), path),
            table,
            scopes: Vec::new(),
            background: Vec::new(),
            scenarios: Vec::new(),
        }
    }

    /// Parse the whole file. Scenario-level errors are contained as
    /// `ReportErr` entries; a missing `Feature:` header or a broken
    /// background is fatal.
    pub fn build(mut self) -> Result<Feature, ParseError> {
        self.push_scope();
        self.cursor
            .expect(TokenKind::Feature, "Expect 'Feature' at beginning of file.")?;
        let name = self.cursor.read_name()?;
        self.setup_background()?;

        while !self.cursor.eat(TokenKind::Eof) {
            self.parse_scenario();
        }

        self.pop_scope();
        Ok(Feature {
            name,
            scenarios: self.scenarios,
        })
    }

    fn setup_background(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat(TokenKind::Background) {
            // No scenario scope here: background bindings land in the
            // outermost scope, visible to every scenario.
            self.cursor
                .expect(TokenKind::Given, "Expect 'Given' as first statement.")?;
            self.parse_statement(true)?;
        }
        Ok(())
    }

    fn parse_scenario(&mut self) {
        let placeholder = format!("Untitled on Line {}", self.cursor.peek().line);
        self.cursor.set_context(placeholder.clone());
        self.scenarios.push(ScenarioItem::Scenario(Scenario {
            name: placeholder,
            statements: Vec::new(),
            background: self.background.clone(),
        }));

        if self.scenario_body().is_err() {
            while !self.cursor.at(TokenKind::Scenario) && !self.cursor.at(TokenKind::Eof) {
                self.cursor.bump();
            }
            self.scopes.truncate(1);
            let msg = self.cursor.context().to_string();
            if let Some(last) = self.scenarios.last_mut() {
                *last = ScenarioItem::ReportErr(ReportErr { msg });
            }
        }
    }

    fn scenario_body(&mut self) -> Result<(), ParseError> {
        self.cursor.expect(TokenKind::Scenario, "Expect 'Scenario'.")?;
        let name = self.cursor.read_name()?;
        self.cursor.set_context(name.clone());
        if let Some(ScenarioItem::Scenario(scenario)) = self.scenarios.last_mut() {
            scenario.name = name;
        }

        self.push_scope();
        // Second scope so `When`/`Then` names can shadow background names
        // without polluting sibling scenarios.
        self.push_scope();

        self.cursor
            .expect(TokenKind::Given, "Expect 'Given' as first statement.")?;
        self.parse_statement(false)?;

        while self.cursor.eat(TokenKind::When) {
            self.parse_statement(false)?;
            self.cursor
                .expect(TokenKind::Then, "Expect 'Then' following 'When'.")?;
            self.parse_statement(false)?;
        }
        if self.cursor.eat(TokenKind::Then) {
            self.parse_statement(false)?;
        }

        self.pop_scope();
        self.pop_scope();
        Ok(())
    }

    fn parse_statement(&mut self, to_background: bool) -> Result<(), ParseError> {
        let mut stmts = vec![self.statement()?];
        while self.cursor.eat(TokenKind::And) {
            stmts.push(self.statement()?);
        }

        if to_background {
            self.background.extend(stmts);
        } else if let Some(ScenarioItem::Scenario(scenario)) = self.scenarios.last_mut() {
            scenario.statements.extend(stmts);
        }
        Ok(())
    }

    fn statement(&mut self) -> Result<Statement, ParseError> {
        match self.parse_expression(0, None)? {
            Parsed::Stmt(stmt) => Ok(stmt),
            Parsed::Expr(expr) => Err(self
                .cursor
                .error(format!("Statement has no effect: {expr:?}"))),
        }
    }

    fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn var_type(&self, name: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .map(String::as_str)
    }

    fn bind(&mut self, name: String, ty: String) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, ty);
        }
    }
}
