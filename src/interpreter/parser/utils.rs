use crate::{
    ast::Type,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a comma-separated list of items until a closing token.
    ///
    /// Shared by parameter lists and call arguments. An immediately
    /// encountered closing token produces an empty list. The closing token is
    /// consumed.
    ///
    /// Grammar (simplified): `list := (item ("," item)*)? closing`
    ///
    /// # Errors
    /// Returns a `ParseError` if an item fails to parse or if anything other
    /// than `,` or `closing` follows an item.
    pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
        &mut self,
        parse_item: impl Fn(&mut Self) -> ParseResult<T>,
        closing: &str)
        -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        if self.current().is_punct(closing) {
            self.advance();
            return Ok(items);
        }

        loop {
            items.push(parse_item(self)?);

            if self.current().is_punct(",") {
                self.advance();
            } else if self.current().is_punct(closing) {
                self.advance();
                break;
            } else {
                return Err(self.expected(format!("',' or '{closing}'")));
            }
        }

        Ok(items)
    }

    /// Parses a plain identifier and returns its name.
    ///
    /// Keywords are not identifiers.
    pub(in crate::interpreter::parser) fn parse_identifier(&mut self) -> ParseResult<String> {
        if self.current().kind == TokenKind::Identifier {
            Ok(self.advance().lexeme)
        } else {
            Err(self.expected("identifier"))
        }
    }

    /// Parses a type name. Only `int` can be written.
    pub(in crate::interpreter::parser) fn parse_type(&mut self) -> ParseResult<Type> {
        if self.current().is_keyword("int") {
            self.advance();
            return Ok(Type::Int);
        }

        Err(ParseError::UnknownType { found: self.current().to_string(),
                                      line:  self.line(), })
    }
}
