use snafu::Snafu;

/// Represents all errors that can occur while executing a program.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RuntimeError {
    /// Tried to read or assign a variable that does not exist.
    #[snafu(display("Runtime error: Unknown variable '{name}'."))]
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// Called a function that was never declared.
    #[snafu(display("Runtime error: Unknown function '{name}'."))]
    UnknownFunction {
        /// The name of the function.
        name: String,
    },
    /// Declared a variable twice in the same environment.
    #[snafu(display("Runtime error: Variable '{name}' is already declared."))]
    VariableRedeclared {
        /// The name of the variable.
        name: String,
    },
    /// The wrong number of arguments was supplied to a function.
    #[snafu(display("Runtime error: '{name}' expects {expected} arguments, found {found}."))]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
    },
    /// A called function finished without executing `return`.
    #[snafu(display("Runtime error: Function '{name}' finished without returning a value."))]
    MissingReturn {
        /// The name of the function.
        name: String,
    },
    /// Attempted division by zero.
    #[snafu(display("Runtime error: Division by zero."))]
    DivisionByZero,
    /// Arithmetic operation overflowed.
    #[snafu(display("Runtime error: Integer overflow in '{operator}'."))]
    Overflow {
        /// The operator that overflowed.
        operator: String,
    },
    /// Nested calls went deeper than the configured limit.
    #[snafu(display("Runtime error: Call depth exceeded {limit} while calling '{name}'."))]
    CallDepthExceeded {
        /// The function being called.
        name:  String,
        /// The configured limit.
        limit: usize,
    },
    /// Writing program output failed.
    #[snafu(display("Runtime error: Failed to write output: {source}"))]
    Output {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
