use crate::{
    ast::{BinaryOperator, ComparisonOperator, Expr},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing and the lowest
    /// precedence level. Comparisons fold to the left, so `a < b == c` is
    /// `(a < b) == c`.
    ///
    /// Grammar: `expression := additive (("==" | "!=" | "<" | "<=" | ">" |
    /// ">=") additive)*`
    ///
    /// # Errors
    /// Propagates any error from the operand rules.
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_additive()?;

        while let Some(op) = self.current_operator(ComparisonOperator::from_lexeme) {
            self.advance();
            let right = self.parse_additive()?;
            left = Expr::comparison(left, op, right);
        }

        Ok(left)
    }

    /// Parses addition and subtraction expressions.
    ///
    /// Grammar: `additive := term (("+" | "-") term)*`
    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.current_operator(BinaryOperator::from_lexeme)
                                 .filter(|op| matches!(op, BinaryOperator::Add | BinaryOperator::Sub))
        {
            self.advance();
            let right = self.parse_term()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    /// Parses multiplication and division expressions.
    ///
    /// Grammar: `term := factor (("*" | "/") factor)*`
    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_factor()?;

        while let Some(op) = self.current_operator(BinaryOperator::from_lexeme)
                                 .filter(|op| matches!(op, BinaryOperator::Mul | BinaryOperator::Div))
        {
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    /// Maps the current token through `classify` if it is an operator.
    fn current_operator<T>(&self, classify: impl Fn(&str) -> Option<T>) -> Option<T> {
        let current = self.current();
        if current.kind == TokenKind::Operator {
            classify(&current.lexeme)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{BinaryOperator, ComparisonOperator, Expr},
        interpreter::parser::Parser,
    };

    fn num(value: i64) -> Expr {
        Expr::Number { value }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = Parser::new("2 + 3 * 4").parse_expression().unwrap();
        assert_eq!(expr,
                   Expr::binary(num(2),
                                BinaryOperator::Add,
                                Expr::binary(num(3), BinaryOperator::Mul, num(4))));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = Parser::new("10 - 4 - 3").parse_expression().unwrap();
        assert_eq!(expr,
                   Expr::binary(Expr::binary(num(10), BinaryOperator::Sub, num(4)),
                                BinaryOperator::Sub,
                                num(3)));
    }

    #[test]
    fn comparisons_chain_to_the_left() {
        let expr = Parser::new("1 < 2 == 1").parse_expression().unwrap();
        assert_eq!(expr,
                   Expr::comparison(Expr::comparison(num(1), ComparisonOperator::Less, num(2)),
                                    ComparisonOperator::Equal,
                                    num(1)));
    }

    #[test]
    fn parentheses_override_precedence() {
        let expr = Parser::new("(2 + 3) * 4").parse_expression().unwrap();
        assert_eq!(expr,
                   Expr::binary(Expr::binary(num(2), BinaryOperator::Add, num(3)),
                                BinaryOperator::Mul,
                                num(4)));
    }
}
