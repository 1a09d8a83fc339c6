use crate::{
    ast::{FunctionDeclaration, Parameter, Statement},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a single statement.
    ///
    /// A statement may be one of:
    /// - a variable declaration (`declare`),
    /// - a conditional (`if`),
    /// - a print statement (`print`),
    /// - a return statement (`return`),
    /// - an assignment (starts with an identifier).
    ///
    /// The choice is made on the current token alone.
    ///
    /// # Errors
    /// Returns `ExpectedStatement` if no statement starts with the current
    /// token, or any error of the chosen rule.
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        let current = self.current();
        if current.is_keyword("declare") {
            return self.parse_declaration();
        }
        if current.is_keyword("if") {
            return self.parse_if();
        }
        if current.is_keyword("print") {
            return self.parse_print();
        }
        if current.is_keyword("return") {
            return self.parse_return();
        }
        if current.kind == TokenKind::Identifier {
            return self.parse_assignment();
        }

        Err(ParseError::ExpectedStatement { found: current.to_string(),
                                            line:  self.line(), })
    }

    /// Parses `declare <identifier> : <type> ;`.
    fn parse_declaration(&mut self) -> ParseResult<Statement> {
        self.expect_keyword("declare")?;
        let name = self.parse_identifier()?;
        self.expect_punct(":")?;
        let ty = self.parse_type()?;
        self.expect_punct(";")?;

        Ok(Statement::Declaration { name, ty })
    }

    /// Parses `<identifier> = <expression> ;`.
    fn parse_assignment(&mut self) -> ParseResult<Statement> {
        let name = self.parse_identifier()?;
        self.expect_punct("=")?;
        let value = self.parse_expression()?;
        self.expect_punct(";")?;

        Ok(Statement::Assignment { name, value })
    }

    /// Parses `print ( <expression> ) ;`.
    fn parse_print(&mut self) -> ParseResult<Statement> {
        self.expect_keyword("print")?;
        self.expect_punct("(")?;
        let expr = self.parse_expression()?;
        self.expect_punct(")")?;
        self.expect_punct(";")?;

        Ok(Statement::Print { expr })
    }

    /// Parses `return <expression> ;`.
    fn parse_return(&mut self) -> ParseResult<Statement> {
        self.expect_keyword("return")?;
        let expr = self.parse_expression()?;
        self.expect_punct(";")?;

        Ok(Statement::Return { expr })
    }

    /// Parses an `if` statement with an optional `else` branch.
    ///
    /// Syntax:
    /// ```text
    ///     if ( <condition> ) { <statement>* }
    ///     else { <statement>* }
    /// ```
    fn parse_if(&mut self) -> ParseResult<Statement> {
        self.expect_keyword("if")?;
        self.expect_punct("(")?;
        let condition = self.parse_expression()?;
        self.expect_punct(")")?;

        let then_branch = self.parse_braced_list()?;

        let else_branch = if self.current().is_keyword("else") {
            self.advance();
            Some(self.parse_braced_list()?)
        } else {
            None
        };

        Ok(Statement::If { condition,
                           then_branch,
                           else_branch })
    }

    /// Parses a function declaration.
    ///
    /// Grammar:
    /// `func <identifier> ( (param ("," param)*)? ) : <type> { <statement>* }`
    ///
    /// # Errors
    /// Returns a `ParseError` if any part of the header or body is malformed.
    pub fn parse_function_declaration(&mut self) -> ParseResult<FunctionDeclaration> {
        self.expect_keyword("func")?;
        let name = self.parse_identifier()?;

        self.expect_punct("(")?;
        let params = self.parse_comma_separated(Self::parse_parameter, ")")?;

        self.expect_punct(":")?;
        let return_type = self.parse_type()?;

        let body = self.parse_braced_list()?;

        Ok(FunctionDeclaration { name,
                                 params,
                                 body,
                                 return_type })
    }

    /// Parses `<identifier> : <type>`.
    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let name = self.parse_identifier()?;
        self.expect_punct(":")?;
        let ty = self.parse_type()?;

        Ok(Parameter { name, ty })
    }
}
