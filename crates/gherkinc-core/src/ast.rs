//! Typed AST for the Gherkin dialect, plus pointer-indirection utilities.
//!
//! Every expression carries the type name it evaluates to (possibly
//! `"void"`). The indirection helpers are purely structural: they wrap the
//! expression in `Dereference`/`AddressOf` nodes and adjust the type string,
//! never rewriting the wrapped tree.

use crate::prototype::{FieldPrototype, FunctionPrototype};

/// Number of trailing `*` in a type name: 0 is a value, 1 a pointer, etc.
pub fn count_indirection(ty: &str) -> usize {
    ty.chars().rev().take_while(|&c| c == '*').count()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Variable reference. `ty` is unresolved only while the name is an
    /// assignment target that has not been bound yet; any other use of an
    /// unbound name fails during resolution.
    Var {
        name: String,
        ty: Option<String>,
    },
    Literal {
        symbol: String,
        ty: String,
    },
    FieldAccess {
        field: FieldPrototype,
        obj: Box<Expression>,
        ty: String,
    },
    Unary {
        op: &'static str,
        value: Box<Expression>,
        ty: String,
    },
    Binary {
        op: &'static str,
        left: Box<Expression>,
        right: Box<Expression>,
        ty: String,
    },
    Dereference {
        value: Box<Expression>,
        ty: String,
    },
    AddressOf {
        value: Box<Expression>,
        ty: String,
    },
    Call {
        func: FunctionPrototype,
        args: Vec<Expression>,
        ty: String,
    },
}

impl Expression {
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Expression::Var { ty, .. } => ty.as_deref(),
            Expression::Literal { ty, .. }
            | Expression::FieldAccess { ty, .. }
            | Expression::Unary { ty, .. }
            | Expression::Binary { ty, .. }
            | Expression::Dereference { ty, .. }
            | Expression::AddressOf { ty, .. }
            | Expression::Call { ty, .. } => Some(ty),
        }
    }

    /// Pointer depth of this expression's type; an unresolved type counts
    /// as depth 0.
    pub fn indirection(&self) -> usize {
        self.type_name().map_or(0, count_indirection)
    }

    /// Strip one pointer level. The type must end in `*`.
    pub fn dereference(self) -> Expression {
        debug_assert!(self.indirection() > 0, "dereference of non-pointer type");
        let ty = self
            .type_name()
            .and_then(|ty| ty.strip_suffix('*'))
            .unwrap_or_default()
            .to_string();
        Expression::Dereference {
            value: Box::new(self),
            ty,
        }
    }

    /// Dereference down to a value type.
    pub fn dereference_all(self) -> Expression {
        let mut expr = self;
        while expr.indirection() > 0 {
            expr = expr.dereference();
        }
        expr
    }

    /// Add one pointer level.
    pub fn address_of(self) -> Expression {
        let ty = format!("{}*", self.type_name().unwrap_or_default());
        Expression::AddressOf {
            value: Box::new(self),
            ty,
        }
    }

    /// Dereference or address-of until this expression's pointer depth
    /// matches `target`'s. Terminates because every step changes the depth
    /// by exactly one.
    pub fn match_indirection(self, target: &Expression) -> Expression {
        let want = target.indirection();
        let mut expr = self;
        while expr.indirection() > want {
            expr = expr.dereference();
        }
        while expr.indirection() < want {
            expr = expr.address_of();
        }
        expr
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Boolean check folded into the scenario's pass flag.
    Assertion { value: Expression },
    /// Assignment to an already-bound variable or a field.
    Setter {
        target: Expression,
        value: Expression,
    },
    /// First assignment to a name: declares it with the value's type.
    VarDeclare {
        name: String,
        value: Option<Expression>,
        ty: String,
    },
    /// An expression evaluated for its side effect.
    Expr { value: Expression },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub statements: Vec<Statement>,
    /// Snapshot of the feature's background statements at the time this
    /// scenario was constructed; re-emitted into every scenario block.
    pub background: Vec<Statement>,
}

/// A scenario that failed to parse; lowers to an ERROR line at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportErr {
    pub msg: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioItem {
    Scenario(Scenario),
    ReportErr(ReportErr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub scenarios: Vec<ScenarioItem>,
}
