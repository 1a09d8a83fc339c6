use crate::ast::{
    BinaryOperator, Block, ComparisonOperator, Expr, FunctionDeclaration, Program, Statement,
    StatementList, Type,
};

/// A backend that consumes the AST one node kind at a time.
///
/// Each node's `accept` matches on its own variant and calls the method for
/// that kind, so a backend only ever sees concrete nodes. Node types never
/// depend on any backend; adding a backend means implementing this trait.
///
/// `Value` is what visiting an expression produces and `Flow` is what visiting
/// anything else produces.
pub trait Visitor {
    /// Result of visiting an expression.
    type Value;
    /// Result of visiting a statement, statement list, function or program.
    type Flow;

    /// Visits the whole program.
    fn visit_program(&mut self, program: &Program) -> Self::Flow;

    /// Visits a function declaration.
    fn visit_function(&mut self, function: &FunctionDeclaration) -> Self::Flow;

    /// Visits a statement list.
    fn visit_statement_list(&mut self, list: &StatementList) -> Self::Flow;

    /// Visits `declare name: ty;`.
    fn visit_declaration(&mut self, name: &str, ty: Type) -> Self::Flow;

    /// Visits `name = value;`.
    fn visit_assignment(&mut self, name: &str, value: &Expr) -> Self::Flow;

    /// Visits `print(expr);`.
    fn visit_print(&mut self, expr: &Expr) -> Self::Flow;

    /// Visits `return expr;`.
    fn visit_return(&mut self, expr: &Expr) -> Self::Flow;

    /// Visits an `if` statement.
    fn visit_if(&mut self,
                condition: &Expr,
                then_branch: &StatementList,
                else_branch: Option<&StatementList>)
                -> Self::Flow;

    /// Visits an integer literal.
    fn visit_number(&mut self, value: i64) -> Self::Value;

    /// Visits a variable reference.
    fn visit_variable(&mut self, name: &str) -> Self::Value;

    /// Visits an arithmetic operation.
    fn visit_binary(&mut self, left: &Expr, op: BinaryOperator, right: &Expr) -> Self::Value;

    /// Visits a comparison.
    fn visit_comparison(&mut self,
                        left: &Expr,
                        op: ComparisonOperator,
                        right: &Expr)
                        -> Self::Value;

    /// Visits a function call.
    fn visit_call(&mut self, name: &str, arguments: &[Expr]) -> Self::Value;
}

impl Program {
    /// Hands the program to `visitor`.
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Flow {
        visitor.visit_program(self)
    }
}

impl Block {
    /// Dispatches to the function or statement handler.
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Flow {
        match self {
            Self::Function(function) => function.accept(visitor),
            Self::Statement(statement) => statement.accept(visitor),
        }
    }
}

impl FunctionDeclaration {
    /// Hands the declaration to `visitor`.
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Flow {
        visitor.visit_function(self)
    }
}

impl StatementList {
    /// Hands the list to `visitor`.
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Flow {
        visitor.visit_statement_list(self)
    }
}

impl Statement {
    /// Dispatches to the handler for this statement kind.
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Flow {
        match self {
            Self::Declaration { name, ty } => visitor.visit_declaration(name, *ty),
            Self::Assignment { name, value } => visitor.visit_assignment(name, value),
            Self::Print { expr } => visitor.visit_print(expr),
            Self::Return { expr } => visitor.visit_return(expr),
            Self::If { condition,
                       then_branch,
                       else_branch, } => {
                visitor.visit_if(condition, then_branch, else_branch.as_ref())
            },
            Self::List(list) => visitor.visit_statement_list(list),
        }
    }
}

impl Expr {
    /// Dispatches to the handler for this expression kind.
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Value {
        match self {
            Self::Number { value } => visitor.visit_number(*value),
            Self::Variable { name } => visitor.visit_variable(name),
            Self::BinaryOp { left, op, right } => visitor.visit_binary(left, *op, right),
            Self::Comparison { left, op, right } => visitor.visit_comparison(left, *op, right),
            Self::FunctionCall { name, arguments } => visitor.visit_call(name, arguments),
        }
    }
}

/// Visits every top-level block in order.
///
/// Backends whose `Flow` carries no information use this as their
/// `visit_program` body.
pub fn walk_program<V: Visitor<Flow = ()>>(visitor: &mut V, program: &Program) {
    for block in &program.blocks {
        block.accept(visitor);
    }
}

/// Visits every statement of `list` in order.
pub fn walk_statement_list<V: Visitor<Flow = ()>>(visitor: &mut V, list: &StatementList) {
    for statement in &list.statements {
        statement.accept(visitor);
    }
}
