use snafu::Snafu;

/// Represents all errors that can occur during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ParseError {
    /// A specific token was required but another one was found.
    #[snafu(display("Error on line {line}: Expected {expected}, found {found}."))]
    Expected {
        /// Description of the expected token.
        expected: String,
        /// The token encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// No statement starts with the current token.
    #[snafu(display("Error on line {line}: Expected a statement, found {found}."))]
    ExpectedStatement {
        /// The token encountered.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// No expression starts with the current token.
    #[snafu(display("Error on line {line}: Expected an expression, found {found}."))]
    ExpectedExpression {
        /// The token encountered.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A type was required but the token names no supported type.
    #[snafu(display("Error on line {line}: Unknown type {found}."))]
    UnknownType {
        /// The token encountered.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A numeric literal does not fit a 64-bit integer.
    #[snafu(display("Error on line {line}: Literal {literal} is too large."))]
    LiteralTooLarge {
        /// The literal text.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Found tokens after the program should have ended.
    #[snafu(display("Error on line {line}: Unexpected token {token} after end of program."))]
    UnexpectedTrailingToken {
        /// The extra token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Parentheses, call arguments or braces are nested too deeply.
    #[snafu(display("Error on line {line}: Nesting deeper than {limit} levels."))]
    NestingTooDeep {
        /// The maximum nesting depth.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
}
