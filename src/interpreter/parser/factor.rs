use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a primary expression.
    ///
    /// Grammar: `factor := NUMBER | IDENT ("(" args ")")? | "(" expression ")"`
    ///
    /// An identifier is a call only when the very next token is `(`. The
    /// decision is made by peeking, so nothing is consumed on the variable
    /// path.
    ///
    /// # Errors
    /// Returns `ExpectedExpression` if no expression starts here,
    /// `LiteralTooLarge` for numbers outside the `i64` range, or any error of
    /// a nested expression.
    pub(in crate::interpreter::parser) fn parse_factor(&mut self) -> ParseResult<Expr> {
        match self.current().kind {
            TokenKind::Number => {
                let line = self.line();
                let literal = self.advance().lexeme;
                let value = literal.parse::<i64>()
                                   .map_err(|_| ParseError::LiteralTooLarge { literal, line })?;
                Ok(Expr::Number { value })
            },
            TokenKind::Identifier => {
                if self.peek().is_punct("(") {
                    self.parse_call()
                } else {
                    let name = self.advance().lexeme;
                    Ok(Expr::Variable { name })
                }
            },
            _ if self.current().is_punct("(") => {
                self.advance();
                let expr = self.nested(Self::parse_expression)?;
                self.expect_punct(")")?;
                Ok(expr)
            },
            _ => Err(ParseError::ExpectedExpression { found: self.current().to_string(),
                                                      line:  self.line(), }),
        }
    }

    /// Parses `IDENT ( (expression ("," expression)*)? )`.
    fn parse_call(&mut self) -> ParseResult<Expr> {
        let name = self.parse_identifier()?;
        self.expect_punct("(")?;
        let arguments =
            self.nested(|parser| parser.parse_comma_separated(Self::parse_expression, ")"))?;

        Ok(Expr::FunctionCall { name, arguments })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::ParseError,
        interpreter::parser::{MAX_NESTING_DEPTH, Parser},
    };

    fn parenthesized(depth: usize) -> String {
        format!("print({}1{});", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn oversized_literal_reports_its_own_line() {
        let error = Parser::new("print(\n99999999999999999999\n);").parse().unwrap_err();
        assert_eq!(error,
                   ParseError::LiteralTooLarge { literal: "99999999999999999999".to_string(),
                                                 line:    2, });
    }

    #[test]
    fn nesting_up_to_the_limit_is_accepted() {
        // `print(` itself is not a nesting level; the call parentheses are.
        assert!(Parser::new(&parenthesized(MAX_NESTING_DEPTH - 1)).parse().is_ok());
    }

    #[test]
    fn nesting_beyond_the_limit_is_a_syntax_error() {
        let error = Parser::new(&parenthesized(MAX_NESTING_DEPTH + 1)).parse().unwrap_err();
        assert_eq!(error,
                   ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                line:  1, });

        let source = format!("{}{}", "if (1) { ".repeat(MAX_NESTING_DEPTH + 1), "}".repeat(MAX_NESTING_DEPTH + 1));
        assert!(matches!(Parser::new(&source).parse(),
                         Err(ParseError::NestingTooDeep { .. })));
    }
}
