use snafu::Snafu;

/// Represents errors found while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum LexError {
    /// A character that starts no token.
    #[snafu(display("Warning on line {line}: Unknown character '{character}' skipped."))]
    UnknownCharacter {
        /// The offending text.
        character: String,
        /// The source line where the character occurred.
        line:      usize,
    },
}
