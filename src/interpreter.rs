/// The checker module builds lexical scopes and validates the AST.
///
/// It walks the program once, mirrors function and branch nesting in a tree
/// of scopes, and checks declarations, references, calls and types.
///
/// # Responsibilities
/// - Builds and retains the scope tree.
/// - Collects every semantic error instead of stopping at the first.
pub mod checker;
/// The evaluator module executes a checked AST.
///
/// The evaluator walks the AST through the visitor interface, keeps one frame
/// per active call, and writes `print` output to a caller-supplied sink.
///
/// # Responsibilities
/// - Evaluates expressions with checked integer arithmetic.
/// - Propagates `return` as a value through nested statements.
/// - Reports runtime errors such as division by zero or unknown names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces tokens one at a time:
/// identifiers, numbers, keywords, operators and symbols. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Classifies input into tokens and promotes reserved words to keywords.
/// - Fuses two-character comparison operators.
/// - Skips and records unknown characters.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser pulls tokens from the lexer and constructs a [`Program`]
/// following the grammar's precedence levels.
///
/// # Responsibilities
/// - Converts tokens into AST nodes.
/// - Stops at the first syntax error, naming what was expected.
///
/// [`Program`]: crate::ast::Program
pub mod parser;
/// Turns an AST back into source text.
pub mod printer;
