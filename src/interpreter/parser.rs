/// Parser state and the entry point.
///
/// Holds the tokenizer and the single token of lookahead, and provides the
/// primitive `advance`/`expect` operations every grammar rule is built from.
pub mod core;

/// Statement-level grammar.
///
/// Declarations, assignments, `print`, `return`, `if` and function
/// declarations.
pub mod statement;

/// Brace-delimited statement lists.
pub mod block;

/// Operator-precedence layers.
///
/// Comparison, additive and multiplicative expressions, each folded
/// left-associatively.
pub mod binary;

/// Primary expressions.
///
/// Literals, parenthesized expressions, variable references and calls.
pub mod factor;

/// Shared helpers for identifiers, types and comma-separated lists.
pub mod utils;

pub use self::core::{MAX_NESTING_DEPTH, ParseResult, Parser};
