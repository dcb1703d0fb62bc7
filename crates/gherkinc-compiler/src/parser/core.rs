//! The shared token cursor: lookahead, consumption, and error reporting.

use crate::lexer::{Token, TokenKind};

use super::ParseError;

/// Cursor over a scanned token stream. The stream always ends with an EOF
/// token; lookahead past the end clamps to it.
pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
    /// Shown in diagnostics: the file path, or the class / scenario being
    /// parsed.
    context: String,
}

impl Cursor {
    pub fn new(tokens: Vec<Token>, context: impl Into<String>) -> Self {
        assert!(
            matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof),
            "scan always emits a trailing EOF"
        );
        Self {
            tokens,
            pos: 0,
            context: context.into(),
        }
    }

    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = context.into();
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn peek(&self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Most recently consumed token; the offending one on error paths.
    pub fn prev(&self) -> &Token {
        let idx = self.pos.saturating_sub(1).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Consume and return the current token.
    pub fn bump(&mut self) -> &Token {
        self.advance();
        self.prev()
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or report `message`. On failure
    /// the offending token is stepped over so the diagnostic brackets it.
    pub fn expect(&mut self, kind: TokenKind, message: &str) -> Result<&Token, ParseError> {
        if self.eat(kind) {
            Ok(self.prev())
        } else {
            self.advance();
            Err(self.error(message))
        }
    }

    /// Expect the title string captured after `Feature:` / `Scenario:`.
    pub fn read_name(&mut self) -> Result<String, ParseError> {
        let token = self.expect(TokenKind::Str, "Expect string.")?;
        Ok(token.title().unwrap_or_default().to_string())
    }

    pub fn identifier(&mut self) -> Result<String, ParseError> {
        let token = self.expect(TokenKind::Identifier, "Expect identifier.")?;
        Ok(token.ident().unwrap_or_default().to_string())
    }

    /// Skip tokens until one of the given kind is consumed. Returns false
    /// if EOF was reached first.
    pub fn advance_until(&mut self, kind: TokenKind) -> bool {
        loop {
            if self.eat(TokenKind::Eof) {
                return false;
            }
            if self.eat(kind) {
                return true;
            }
            self.advance();
        }
    }

    /// Print the diagnostic for the most recently consumed token and return
    /// the error value. Recovery is the caller's policy.
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        let message = message.into();
        let line = self.prev().line;
        eprintln!(
            "Error on line {} ({}).\n    - {}",
            line, self.context, message
        );
        eprintln!("{}", self.render_offending_line());
        ParseError { line, message }
    }

    /// Every token sharing the offending token's line, with the offender
    /// bracketed. Linear in the stream, but only runs on the error path.
    fn render_offending_line(&self) -> String {
        let offending = self.pos.saturating_sub(1).min(self.tokens.len() - 1);
        let line = self.tokens[offending].line;
        let mut rendered = String::from("    - ");
        let mut first = true;
        for (i, token) in self.tokens.iter().enumerate() {
            if token.line != line {
                continue;
            }
            if !first {
                rendered.push_str(", ");
            }
            if i == offending {
                rendered.push_str(&format!("[{token}]"));
            } else {
                rendered.push_str(&format!("({token})"));
            }
            first = false;
        }
        rendered
    }
}
