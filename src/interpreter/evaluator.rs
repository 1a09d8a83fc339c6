/// Core evaluation state and the traversal entry points.
///
/// Contains the interpreter, its environments and call frames, and the
/// control-flow value threaded through statement execution.
pub mod core;

/// Statement execution.
///
/// Implements declarations, assignments, printing, `return` and `if`.
pub mod statement;

/// Arithmetic and comparison operators.
///
/// Checked integer arithmetic with truncating division.
pub mod binary;

/// Function registration and calls.
///
/// Handles call frames, argument binding, the call depth limit and the entry
/// point.
pub mod function;
