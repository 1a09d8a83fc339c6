use std::fmt;

use snafu::Snafu;

use crate::ast::{BinaryOperator, ComparisonOperator, Type};

/// A single rule violation found by the checker.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum SemanticError {
    /// The name is already declared in the current scope.
    #[snafu(display("Duplicate declaration of '{name}'."))]
    DuplicateDeclaration {
        /// The redeclared name.
        name: String,
    },
    /// The name is not visible from the current scope.
    #[snafu(display("Undefined symbol '{name}'."))]
    UndefinedSymbol {
        /// The unresolved name.
        name: String,
    },
    /// A function name is used where a variable is required.
    #[snafu(display("'{name}' is a function, not a variable."))]
    NotAVariable {
        /// The misused name.
        name: String,
    },
    /// A call targets a name that is not a function.
    #[snafu(display("'{name}' is not a function."))]
    NotAFunction {
        /// The called name.
        name: String,
    },
    /// The assigned value's type differs from the variable's type.
    #[snafu(display("Type mismatch in assignment to '{name}': expected {expected}, found {found}."))]
    AssignmentTypeMismatch {
        /// The assigned variable.
        name:     String,
        /// The declared type of the variable.
        expected: Type,
        /// The type of the assigned expression.
        found:    Type,
    },
    /// The operands of an operator have different types.
    #[snafu(display("Type mismatch in operation '{operator}': {left} and {right}."))]
    OperandTypeMismatch {
        /// The operator text.
        operator: String,
        /// Type of the left operand.
        left:     Type,
        /// Type of the right operand.
        right:    Type,
    },
    /// An `if` condition is not an `int`.
    #[snafu(display("Condition of 'if' must be int, found {found}."))]
    ConditionNotInt {
        /// The type of the condition.
        found: Type,
    },
    /// A call passes the wrong number of arguments.
    #[snafu(display("Argument count mismatch for '{name}': expected {expected}, found {found}."))]
    ArityMismatch {
        /// The called function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
    },
    /// A call argument has the wrong type.
    #[snafu(display("Argument {position} of '{name}' has type {found}, expected {expected}."))]
    ArgumentTypeMismatch {
        /// The called function.
        name:     String,
        /// One-based argument position.
        position: usize,
        /// The declared parameter type.
        expected: Type,
        /// The type of the argument.
        found:    Type,
    },
    /// A `return` value disagrees with the function's return type.
    #[snafu(display("Type mismatch in 'return' of '{function}': expected {expected}, found {found}."))]
    ReturnTypeMismatch {
        /// The enclosing function.
        function: String,
        /// The declared return type.
        expected: Type,
        /// The type of the returned expression.
        found:    Type,
    },
    /// A `return` appears outside of any function.
    #[snafu(display("'return' outside of a function."))]
    ReturnOutsideFunction,
}

impl SemanticError {
    /// Builds an operand mismatch for an arithmetic operator.
    #[must_use]
    pub fn binary_mismatch(op: BinaryOperator, left: Type, right: Type) -> Self {
        Self::OperandTypeMismatch { operator: op.to_string(),
                                    left,
                                    right }
    }

    /// Builds an operand mismatch for a comparison operator.
    #[must_use]
    pub fn comparison_mismatch(op: ComparisonOperator, left: Type, right: Type) -> Self {
        Self::OperandTypeMismatch { operator: op.to_string(),
                                    left,
                                    right }
    }
}

/// The non-empty batch of diagnostics reported for a rejected program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics(pub Vec<SemanticError>);

impl Diagnostics {
    /// The diagnostics in traversal order.
    #[must_use]
    pub fn errors(&self) -> &[SemanticError] {
        &self.0
    }

    /// Number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a batch produced by the checker.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "Semantic error: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}
