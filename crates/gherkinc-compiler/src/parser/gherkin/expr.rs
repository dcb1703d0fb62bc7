//! Type-directed expression parsing for the Gherkin maths dialect.
//!
//! A Pratt-style loop: primary/unary parsing with postfix field access and
//! indexing, then operator dispatch against the class table. Assignment and
//! equality terminate the expression and produce statements; arithmetic on
//! a class type lowers to the matching method call.

use gherkinc_core::ast::{Expression, Statement};
use gherkinc_core::prototype::FunctionPrototype;

use crate::lexer::{TokenKind, format_double};

use super::super::ParseError;
use super::GherkinParser;

/// What one `parse_expression` call produced: statements only ever surface
/// at precedence 0 (or for void calls, which end the expression wherever
/// they appear).
pub(super) enum Parsed {
    Expr(Expression),
    Stmt(Statement),
}

/// Tokens that end an expression.
const TERMINATORS: &[TokenKind] = &[
    TokenKind::Eof,
    TokenKind::And,
    TokenKind::Given,
    TokenKind::Then,
    TokenKind::When,
    TokenKind::Scenario,
    TokenKind::Comma,
    TokenKind::RightParen,
    TokenKind::RightBracket,
    TokenKind::ScenarioOutline,
];

impl GherkinParser<'_> {
    pub(super) fn parse_expression(
        &mut self,
        precedence: u32,
        left: Option<Expression>,
    ) -> Result<Parsed, ParseError> {
        let left = match left {
            Some(expr) => expr,
            None => self.parse_unary()?,
        };

        let operator = self.cursor.peek().kind;

        if TERMINATORS.contains(&operator) {
            if left.type_name() == Some("void") {
                return Ok(Parsed::Stmt(Statement::Expr { value: left }));
            }
            if left.type_name() == Some("bool") && precedence == 0 {
                return Ok(Parsed::Stmt(Statement::Assertion { value: left }));
            }
            return Ok(Parsed::Expr(left));
        }

        // Equality and assignment bind loosest: inside a subexpression they
        // hand `left` back so the statement level consumes them.
        if matches!(operator, TokenKind::Equality | TokenKind::Assign) && precedence > 0 {
            return Ok(Parsed::Expr(left));
        }

        self.cursor.bump();
        let right = match self.parse_expression(precedence + 1, None)? {
            Parsed::Expr(expr) => expr,
            Parsed::Stmt(_) => return Err(self.cursor.error("Expect expression")),
        };

        match operator {
            TokenKind::Assign => self.finish_assignment(left, right).map(Parsed::Stmt),
            TokenKind::Equality => self.finish_equality(left, right).map(Parsed::Stmt),
            _ => {
                let expr = self.binary_dispatch(operator, left, right)?;
                self.parse_expression(precedence, Some(expr))
            }
        }
    }

    fn finish_assignment(
        &mut self,
        left: Expression,
        right: Expression,
    ) -> Result<Statement, ParseError> {
        if !matches!(
            left,
            Expression::Var { .. } | Expression::FieldAccess { .. }
        ) {
            return Err(self.cursor.error(format!(
                "Can only assign to a variable or field: {left:?} = {right:?}"
            )));
        }

        // An unbound target counts as indirection 0, so a pointer-valued
        // right side is flattened before it binds.
        let right = right.match_indirection(&left);

        if let Expression::Var { name, .. } = &left {
            if self.var_type(name).is_none() {
                let Some(ty) = right.type_name().map(str::to_string) else {
                    return Err(self
                        .cursor
                        .error(format!("Cannot assign value of unknown type: {right:?}")));
                };
                let name = name.clone();
                self.bind(name.clone(), ty.clone());
                return Ok(Statement::VarDeclare {
                    name,
                    value: Some(right),
                    ty,
                });
            }
        }

        Ok(Statement::Setter {
            target: left,
            value: right,
        })
    }

    fn finish_equality(
        &mut self,
        left: Expression,
        right: Expression,
    ) -> Result<Statement, ParseError> {
        let left = left.dereference_all();
        let right = right.dereference_all();

        if left
            .type_name()
            .is_some_and(|ty| self.table.contains(ty))
        {
            let value = self.create_function_call("equals", vec![left, right])?;
            return Ok(Statement::Assertion { value });
        }
        if left.type_name() == Some("double") && right.type_name() == Some("double") {
            let func = self.registry_function("almostEqual")?;
            let ty = func.return_type.clone();
            // almostEqual(expected, actual)
            return Ok(Statement::Assertion {
                value: Expression::Call {
                    func,
                    args: vec![right, left],
                    ty,
                },
            });
        }
        if left.type_name() == Some("bool") && right.type_name() == Some("bool") {
            return Ok(Statement::Assertion {
                value: Expression::Binary {
                    op: "==",
                    left: Box::new(left),
                    right: Box::new(right),
                    ty: "bool".to_string(),
                },
            });
        }

        Err(self.cursor.error(format!(
            "Cannot assert equality of unknown type: {left:?} == {right:?}"
        )))
    }

    fn binary_dispatch(
        &mut self,
        operator: TokenKind,
        left: Expression,
        right: Expression,
    ) -> Result<Expression, ParseError> {
        if left.type_name() == Some("double") && right.type_name() == Some("double") {
            let op = match operator {
                TokenKind::Plus => "+",
                TokenKind::Minus => "-",
                TokenKind::Star => "*",
                TokenKind::Slash => "/",
                _ => {
                    return Err(self.cursor.error(format!(
                        "Invalid binary operator on doubles: ({left:?}) {operator} ({right:?})"
                    )));
                }
            };
            return Ok(Expression::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                ty: "double".to_string(),
            });
        }

        if left
            .type_name()
            .is_some_and(|ty| self.table.contains(ty))
        {
            let method = match operator {
                TokenKind::Plus => "add",
                TokenKind::Minus => "subtract",
                TokenKind::Star if right.type_name() == Some("double") => "scale",
                TokenKind::Star => "multiply",
                TokenKind::Slash => "divide",
                _ => {
                    return Err(self.cursor.error(format!(
                        "Invalid binary operator: ({left:?}) {operator} ({right:?})"
                    )));
                }
            };
            return self.create_function_call(method, vec![left, right]);
        }

        Err(self.cursor.error(format!(
            "Invalid binary operator: ({left:?}) {operator} ({right:?})"
        )))
    }

    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        if let Some(expr) = self.parse_primary()? {
            return Ok(expr);
        }

        let operator = self.cursor.peek().kind;
        if operator == TokenKind::Eof {
            return Err(self.cursor.error("Expect expression"));
        }
        self.cursor.bump();
        let value = self.parse_unary()?;

        match operator {
            TokenKind::Minus if value.type_name() == Some("double") => Ok(Expression::Unary {
                op: "-",
                value: Box::new(value),
                ty: "double".to_string(),
            }),
            TokenKind::Root if value.type_name() == Some("double") => {
                let func = self.registry_function("sqrt")?;
                let ty = func.return_type.clone();
                Ok(Expression::Call {
                    func,
                    args: vec![value],
                    ty,
                })
            }
            TokenKind::Bang if value.type_name() == Some("bool") => Ok(Expression::Unary {
                op: "!",
                value: Box::new(value),
                ty: "bool".to_string(),
            }),
            TokenKind::Minus
                if value
                    .type_name()
                    .is_some_and(|ty| self.table.contains(ty)) =>
            {
                self.create_function_call("negate", vec![value])
            }
            _ => {
                let ty = value.type_name().unwrap_or("<unresolved>").to_string();
                Err(self
                    .cursor
                    .error(format!("Invalid unary operator {operator} on type {ty}")))
            }
        }
    }

    /// Primary expression plus its postfixes. Returns `None` when the
    /// current token cannot start a primary, which hands control to the
    /// unary-operator path.
    fn parse_primary(&mut self) -> Result<Option<Expression>, ParseError> {
        let mut left = if self.cursor.eat(TokenKind::Pi) {
            Some(Expression::Literal {
                symbol: "M_PI".to_string(),
                ty: "double".to_string(),
            })
        } else if self.cursor.at(TokenKind::Identifier) {
            let name = self.cursor.bump().ident().unwrap_or_default().to_string();
            if self.cursor.eat(TokenKind::LeftParen) {
                let args = self.parse_arg_list(TokenKind::RightParen)?;
                Some(self.create_function_call(&name, args)?)
            } else if name == "true" || name == "false" {
                Some(Expression::Literal {
                    symbol: name,
                    ty: "bool".to_string(),
                })
            } else if let Some(var) = self.table.variable(&name) {
                Some(Expression::Literal {
                    symbol: var.code.clone(),
                    ty: var.ty.clone(),
                })
            } else {
                let ty = self.var_type(&name).map(str::to_string);
                Some(Expression::Var { name, ty })
            }
        } else if self.cursor.at(TokenKind::Number) {
            let value = self.cursor.bump().number().unwrap_or_default();
            Some(Expression::Literal {
                symbol: format_double(value),
                ty: "double".to_string(),
            })
        } else {
            None
        };

        loop {
            if self.cursor.eat(TokenKind::Dot) {
                let field = self
                    .cursor
                    .expect(TokenKind::Identifier, "Expect identifier after '.'")?
                    .ident()
                    .unwrap_or_default()
                    .to_string();
                let object = match left.take() {
                    Some(expr) => expr,
                    None => return Err(self.cursor.error("Expect expression before '.'")),
                };
                left = Some(self.create_field_access(&field, object)?);
            } else if self.cursor.eat(TokenKind::LeftBracket) {
                let object = match left.take() {
                    Some(expr) => expr,
                    None => return Err(self.cursor.error("Get index on empty expression")),
                };
                let mut args = vec![object];
                args.extend(self.parse_arg_list(TokenKind::RightBracket)?);
                left = Some(self.create_function_call("get", args)?);
            } else {
                break;
            }
        }

        Ok(left)
    }

    fn parse_arg_list(&mut self, terminator: TokenKind) -> Result<Vec<Expression>, ParseError> {
        let mut args = Vec::new();
        while !self.cursor.eat(terminator) {
            match self.parse_expression(1, None)? {
                Parsed::Expr(expr) => args.push(expr),
                Parsed::Stmt(stmt) => {
                    return Err(self
                        .cursor
                        .error(format!("Function argument must be an expression: {stmt:?}")));
                }
            }
            self.cursor.eat(TokenKind::Comma);
        }
        Ok(args)
    }

    /// Resolve a feature-level call, in order: constructor, method on the
    /// first argument, static method of any class, standalone registry.
    pub(super) fn create_function_call(
        &mut self,
        name: &str,
        args: Vec<Expression>,
    ) -> Result<Expression, ParseError> {
        let class_name = to_class_case(name);
        if let Some(class) = self.table.get(&class_name) {
            if let Some(func) = class.constructors.iter().find(|f| f.matches(&args)) {
                let func = func.clone();
                let ty = func.return_type.clone();
                return Ok(Expression::Call { func, args, ty });
            }
        }

        if let Some(receiver_ty) = args.first().and_then(Expression::type_name) {
            let receiver_ty = receiver_ty.to_string();
            if let Some(class) = self.table.get(&receiver_ty) {
                if let Some(func) = class
                    .get_methods(name)
                    .find(|f| !f.is_static && f.matches(&args[1..]))
                {
                    let func = func.clone();
                    let ty = func.return_type.clone();
                    return Ok(Expression::Call { func, args, ty });
                }
            }
        }

        for class in self.table.classes() {
            if let Some(func) = class
                .get_methods(name)
                .find(|f| f.is_static && f.matches(&args))
            {
                let func = func.clone();
                let ty = func.return_type.clone();
                return Ok(Expression::Call { func, args, ty });
            }
        }

        if let Some(func) = self
            .table
            .free_functions()
            .iter()
            .find(|f| f.name == name && f.is_static && f.matches(&args))
        {
            let func = func.clone();
            let ty = func.return_type.clone();
            return Ok(Expression::Call { func, args, ty });
        }

        let arg_types: Vec<&str> = args
            .iter()
            .map(|arg| arg.type_name().unwrap_or("<unresolved>"))
            .collect();
        Err(self
            .cursor
            .error(format!("Undefined function: {name} with args {arg_types:?}")))
    }

    /// Resolve `object.name`: a field, or a zero-argument non-static method
    /// used as a getter. The object is dereferenced down to a value first.
    pub(super) fn create_field_access(
        &mut self,
        name: &str,
        object: Expression,
    ) -> Result<Expression, ParseError> {
        let object = object.dereference_all();
        let Some(class) = object.type_name().and_then(|ty| self.table.get(ty)) else {
            return Err(self
                .cursor
                .error(format!("Unrecognised type in: {object:?}")));
        };

        if let Some(field) = class.get_field(name) {
            let field = field.clone();
            let ty = field.ty.clone();
            return Ok(Expression::FieldAccess {
                field,
                obj: Box::new(object),
                ty,
            });
        }
        if let Some(func) = class
            .get_methods(name)
            .find(|f| !f.is_static && f.argument_types.is_empty())
        {
            let func = func.clone();
            let ty = func.return_type.clone();
            return Ok(Expression::Call {
                func,
                args: vec![object],
                ty,
            });
        }

        let ty = object.type_name().unwrap_or_default().to_string();
        Err(self
            .cursor
            .error(format!("Undefined field: {name} on {ty}")))
    }

    fn registry_function(&self, name: &str) -> Result<FunctionPrototype, ParseError> {
        match self.table.free_function(name) {
            Some(func) => Ok(func.clone()),
            None => Err(self.cursor.error(format!("Undefined function: {name}"))),
        }
    }
}

/// `point_light` → `PointLight`: underscores are word breaks, words are
/// title-cased.
fn to_class_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("")
}
