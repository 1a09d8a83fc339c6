/// Lexical errors.
///
/// The only recoverable failure of the pipeline: an unknown character is
/// reported and skipped while tokenization continues.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the AST. Parsing is
/// fail-fast, so a single `ParseError` aborts the whole parse.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing a checked
/// program, such as division by zero, overflow or unknown names.
pub mod runtime_error;
/// Semantic errors.
///
/// Diagnostics produced by the scope and type checker. They are collected in
/// traversal order and reported as one batch.
pub mod semantic_error;

use snafu::Snafu;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use semantic_error::{Diagnostics, SemanticError};

/// Any failure of the full parse, check and run pipeline.
#[derive(Debug, Snafu)]
pub enum Error {
    /// The source text is not a valid program.
    #[snafu(context(false), display("{source}"))]
    Syntax {
        /// The syntax error.
        source: ParseError,
    },
    /// The program was rejected by the checker.
    #[snafu(context(false), display("{source}"))]
    Semantic {
        /// Every diagnostic found, in traversal order.
        source: Diagnostics,
    },
    /// Execution failed.
    #[snafu(context(false), display("{source}"))]
    Runtime {
        /// The runtime error.
        source: RuntimeError,
    },
}
