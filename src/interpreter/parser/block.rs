use crate::{
    ast::StatementList,
    interpreter::parser::core::{ParseResult, Parser},
};

impl Parser<'_> {
    /// Parses statements until a closing `}` or the end of input.
    ///
    /// The closing token is not consumed.
    ///
    /// Grammar: `statement_list := statement*`
    ///
    /// # Errors
    /// Propagates the first error of any contained statement.
    pub fn parse_statement_list(&mut self) -> ParseResult<StatementList> {
        let mut statements = Vec::new();

        while !self.at_list_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(StatementList::new(statements))
    }

    /// Parses a statement list delimited by braces.
    ///
    /// Grammar: `block := "{" statement* "}"`
    pub(in crate::interpreter::parser) fn parse_braced_list(&mut self) -> ParseResult<StatementList> {
        self.expect_punct("{")?;
        let list = self.nested(Self::parse_statement_list)?;
        self.expect_punct("}")?;

        Ok(list)
    }
}
