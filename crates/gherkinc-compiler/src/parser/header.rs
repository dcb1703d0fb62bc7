//! C++ header introspection: reconstructs class prototypes from `.h` files.
//!
//! Not a C++ front end. Templates, enums, friend declarations, operator
//! overloads and preprocessor output appear as unrecognised tokens and are
//! discarded by the skip-to-next-`class` recovery; only the declarations
//! the Gherkin dialect can reach are kept.

use gherkinc_core::prototype::{ClassPrototype, FieldPrototype, FunctionPrototype};

use crate::lexer::{HEADER_KEYWORDS, TokenKind, scan};

use super::{Cursor, ParseError};

pub struct HeaderParser {
    cursor: Cursor,
    filename: String,
    classes: Vec<ClassPrototype>,
}

impl HeaderParser {
    pub fn new(filename: impl Into<String>, source: &str) -> Self {
        let filename = filename.into();
        let cursor = Cursor::new(scan(source, HEADER_KEYWORDS), filename.clone());
        Self {
            cursor,
            filename,
            classes: Vec::new(),
        }
    }

    /// Parse every class in the file. An error inside one class abandons it
    /// (possibly half-filled) and resumes searching for the next `class`.
    pub fn parse(mut self) -> Vec<ClassPrototype> {
        while !self.cursor.eat(TokenKind::Eof) {
            if self.parse_class().is_err() {
                self.cursor.set_context(self.filename.clone());
            }
        }
        self.classes
    }

    fn parse_class(&mut self) -> Result<(), ParseError> {
        if !self.start_class()? {
            return Ok(());
        }
        self.parse_class_body()?;
        self.cursor.set_context(self.filename.clone());
        Ok(())
    }

    /// Skip to the next class definition; returns false at EOF. Forward
    /// declarations (`class Name;`) are passed over.
    fn start_class(&mut self) -> Result<bool, ParseError> {
        let name = loop {
            if self.cursor.eat(TokenKind::Class) {
                let name = self.cursor.identifier()?;
                if self.cursor.eat(TokenKind::Semicolon) {
                    continue;
                }
                break name;
            }
            if self.cursor.eat(TokenKind::Eof) {
                return Ok(false);
            }
            self.cursor.bump();
        };

        let mut class = ClassPrototype::new(name, self.filename.clone());
        if self.cursor.eat(TokenKind::Colon) {
            self.cursor.eat(TokenKind::Private);
            self.cursor.eat(TokenKind::Public);
            class.extends = Some(self.cursor.identifier()?);
        }
        self.cursor
            .expect(TokenKind::LeftBrace, "Expect '{' before class body.")?;

        self.cursor.set_context(class.name.clone());
        self.classes.push(class);
        Ok(true)
    }

    fn class_mut(&mut self) -> &mut ClassPrototype {
        self.classes.last_mut().expect("inside a class body")
    }

    fn parse_class_body(&mut self) -> Result<(), ParseError> {
        while !self.cursor.eat(TokenKind::Eof) && !self.cursor.eat(TokenKind::RightBrace) {
            self.parse_property()?;
        }
        self.cursor
            .expect(TokenKind::Semicolon, "Expect ';' after class body.")?;
        Ok(())
    }

    fn parse_property(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat(TokenKind::Public) {
            self.cursor
                .expect(TokenKind::Colon, "Expect ':' after 'public'.")?;
        }
        if self.cursor.eat(TokenKind::Private) {
            self.cursor
                .expect(TokenKind::Colon, "Expect ':' after 'private'.")?;
        }

        self.cursor.eat(TokenKind::Inline);
        let mut is_static = self.cursor.eat(TokenKind::Static);
        self.cursor.eat(TokenKind::Virtual);

        let return_type = self.parse_type()?;
        is_static = is_static || self.cursor.eat(TokenKind::Static);

        if return_type.starts_with('~') {
            // Destructor: consume and discard.
            self.cursor.eat(TokenKind::LeftParen);
            self.parse_arg_list()?;
        } else if self.cursor.eat(TokenKind::LeftParen) {
            // Constructor: a static function returning the class itself.
            let name = self.class_mut().name.clone();
            let argument_types = self.parse_arg_list()?;
            self.class_mut().constructors.push(FunctionPrototype {
                name: name.clone(),
                is_static: true,
                return_type: name,
                argument_types,
                namespace: None,
            });
        } else {
            let name = self.cursor.identifier()?;
            if self.cursor.eat(TokenKind::LeftParen) {
                let namespace = is_static.then(|| self.class_mut().name.clone());
                let argument_types = self.parse_arg_list()?;
                self.class_mut().methods.push(FunctionPrototype {
                    name,
                    is_static,
                    return_type,
                    argument_types,
                    namespace,
                });
            } else {
                let namespace = is_static.then(|| self.class_mut().name.clone());
                self.class_mut().fields.push(FieldPrototype {
                    name,
                    ty: return_type,
                    is_static,
                    namespace,
                });
                self.cursor
                    .expect(TokenKind::Semicolon, "Expect ';' after field definition.")?;
            }
        }
        Ok(())
    }

    /// Parameter types up to `)`, then everything that may trail a function
    /// declaration: `const`/`override`, a constructor initialiser list, an
    /// inline body, `= default`, or the `= 0` pure-virtual marker.
    fn parse_arg_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut args = Vec::new();
        if !self.cursor.eat(TokenKind::RightParen) {
            while !self.cursor.eat(TokenKind::Eof) {
                args.push(self.parse_type()?);
                self.cursor.eat(TokenKind::Identifier);

                if self.cursor.eat(TokenKind::Equality) {
                    // Default value: skip to the next parameter boundary.
                    while !matches!(
                        self.cursor.peek().kind,
                        TokenKind::Eof | TokenKind::RightParen | TokenKind::Comma
                    ) {
                        self.cursor.bump();
                    }
                }

                if self.cursor.eat(TokenKind::RightParen) {
                    break;
                }
                self.cursor
                    .expect(TokenKind::Comma, "Expect ',' between parameters.")?;
            }
        }

        self.cursor.eat(TokenKind::Const);
        self.cursor.eat(TokenKind::Override);

        if self.cursor.eat(TokenKind::Colon) {
            // Constructor initialiser list: consume through to the body,
            // accepting `member{value}` runs.
            while !matches!(
                self.cursor.peek().kind,
                TokenKind::Eof | TokenKind::LeftBrace | TokenKind::Equality | TokenKind::Semicolon
            ) {
                if self.cursor.eat(TokenKind::Identifier)
                    && self.cursor.eat(TokenKind::LeftBrace)
                    && self.cursor.eat(TokenKind::Identifier)
                    && self.cursor.eat(TokenKind::RightBrace)
                {
                    continue;
                }
                self.cursor.bump();
            }
        }

        if self.cursor.eat(TokenKind::LeftBrace) {
            // Inline body: balanced-brace scan.
            let mut depth = 1;
            while depth > 0 {
                if self.cursor.eat(TokenKind::Eof) {
                    return Err(self.cursor.error("Expect '}' after inline function body."));
                }
                if self.cursor.at(TokenKind::RightBrace) {
                    depth -= 1;
                }
                if self.cursor.at(TokenKind::LeftBrace) {
                    depth += 1;
                }
                self.cursor.bump();
            }
            self.cursor.eat(TokenKind::Semicolon);
        } else {
            if self.cursor.eat(TokenKind::Equality) {
                self.cursor.eat(TokenKind::Identifier); // = default, = delete
                if self.cursor.eat(TokenKind::Number) {
                    // `= 0` pure virtual
                    self.class_mut().is_abstract = true;
                }
            }
            self.cursor
                .expect(TokenKind::Semicolon, "Expect ';' after function definition.")?;
        }

        Ok(args)
    }

    /// `const`? identifier `*`* `&`? — references collapse to the referent.
    fn parse_type(&mut self) -> Result<String, ParseError> {
        self.cursor.eat(TokenKind::Const);
        let mut ty = self.cursor.identifier()?;
        while self.cursor.eat(TokenKind::Star) {
            ty.push('*');
        }
        self.cursor.eat(TokenKind::Amp);
        Ok(ty)
    }
}
