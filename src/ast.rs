use std::fmt;

/// A parsed source file.
///
/// The program is an ordered sequence of top-level blocks. Each block is either
/// a function declaration or a statement executed in program order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// Top-level blocks in source order.
    pub blocks: Vec<Block>,
}

/// A single top-level item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A `func` declaration.
    Function(FunctionDeclaration),
    /// Any statement written at the top level.
    Statement(Statement),
}

/// A user-defined function such as `func add(a: int, b: int): int { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration {
    /// The name of the function.
    pub name:        String,
    /// Parameters in declaration order.
    pub params:      Vec<Parameter>,
    /// The statements making up the function body.
    pub body:        StatementList,
    /// The declared return type.
    pub return_type: Type,
}

/// A typed function parameter, `name: type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// The name of the parameter.
    pub name: String,
    /// The declared type of the parameter.
    pub ty:   Type,
}

/// The data types known to the language.
///
/// Only `Int` can be written in source; `Float` and `Char` are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// 64-bit signed integer, also used for truth values.
    Int,
    /// Reserved.
    Float,
    /// Reserved.
    Char,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Char => "char",
        };
        write!(f, "{name}")
    }
}

/// An ordered sequence of statements, as found in function bodies and `if`
/// branches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatementList {
    /// Statements in source order.
    pub statements: Vec<Statement>,
}

impl StatementList {
    /// Wraps a vector of statements.
    #[must_use]
    pub const fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `declare name: type;`
    Declaration {
        /// The name of the variable.
        name: String,
        /// The declared type.
        ty:   Type,
    },
    /// `name = expr;`
    Assignment {
        /// The name of the assigned variable.
        name:  String,
        /// The value being assigned.
        value: Expr,
    },
    /// `print(expr);`
    Print {
        /// The printed expression.
        expr: Expr,
    },
    /// `return expr;`
    Return {
        /// The returned expression.
        expr: Expr,
    },
    /// `if (cond) { ... } else { ... }`
    If {
        /// The condition; nonzero selects the `then` branch.
        condition:   Expr,
        /// Statements run when the condition holds.
        then_branch: StatementList,
        /// Statements run otherwise, if present.
        else_branch: Option<StatementList>,
    },
    /// A nested statement list executed in the enclosing scope.
    List(StatementList),
}

/// An expression. Every expression evaluates to an `int`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// An integer literal.
    Number {
        /// The literal value.
        value: i64,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
    },
    /// An arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// A comparison yielding `1` or `0`.
    Comparison {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    ComparisonOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// Function call expression (e.g. `add(1, 2)`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
    },
}

impl Expr {
    /// Builds a `BinaryOp` node.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOperator, right: Self) -> Self {
        Self::BinaryOp { left: Box::new(left),
                         op,
                         right: Box::new(right) }
    }

    /// Builds a `Comparison` node.
    #[must_use]
    pub fn comparison(left: Self, op: ComparisonOperator, right: Self) -> Self {
        Self::Comparison { left: Box::new(left),
                           op,
                           right: Box::new(right) }
    }
}

/// Arithmetic operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Truncating division (`/`)
    Div,
}

/// Comparison operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

impl BinaryOperator {
    /// Maps operator text to the operator, if it is arithmetic.
    #[must_use]
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            _ => None,
        }
    }
}

impl ComparisonOperator {
    /// Maps operator text to the operator, if it is a comparison.
    #[must_use]
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            "<" => Some(Self::Less),
            "<=" => Some(Self::LessEqual),
            ">" => Some(Self::Greater),
            ">=" => Some(Self::GreaterEqual),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        };
        write!(f, "{operator}")
    }
}
