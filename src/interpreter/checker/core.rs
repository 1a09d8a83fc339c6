use log::{debug, trace};

use crate::{
    ast::{
        BinaryOperator, ComparisonOperator, Expr, FunctionDeclaration, Program, StatementList, Type,
    },
    error::{Diagnostics, SemanticError},
    interpreter::checker::scope::{ScopeId, ScopeTree, Symbol, SymbolKind},
    visit::{Visitor, walk_program, walk_statement_list},
};

/// The function whose body is being checked.
struct EnclosingFunction {
    name:        String,
    return_type: Type,
}

/// Builds the scope tree and validates declarations, references, calls and
/// types.
///
/// The checker never stops early: each violation is recorded and analysis
/// goes on. An expression whose type cannot be determined yields `None`,
/// which silences mismatch reports that would only repeat the first
/// error.
pub struct Checker {
    tree:        ScopeTree,
    current:     ScopeId,
    function:    Option<EnclosingFunction>,
    diagnostics: Vec<SemanticError>,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker {
    /// Creates a checker positioned in a fresh global scope.
    #[must_use]
    pub fn new() -> Self {
        let tree = ScopeTree::new();
        let current = tree.global();
        Self { tree,
               current,
               function: None,
               diagnostics: Vec::new() }
    }

    /// Finishes checking and hands out the results.
    ///
    /// # Errors
    /// Returns every diagnostic, in traversal order, if there was at least
    /// one.
    pub fn finish(self) -> Result<ScopeTree, Diagnostics> {
        debug!("checker built {} scopes and found {} diagnostics",
               self.tree.len(),
               self.diagnostics.len());

        if self.diagnostics.is_empty() {
            Ok(self.tree)
        } else {
            Err(Diagnostics(self.diagnostics))
        }
    }

    fn report(&mut self, error: SemanticError) {
        debug!("semantic error: {error}");
        self.diagnostics.push(error);
    }

    fn declare(&mut self, symbol: Symbol) {
        if let Err(error) = self.tree.declare(self.current, symbol) {
            self.report(error);
        }
    }

    fn enter_scope(&mut self) -> ScopeId {
        let parent = self.current;
        self.current = self.tree.add_child(parent);
        trace!("entered scope #{}", self.current.index());
        parent
    }

    fn exit_scope(&mut self, parent: ScopeId) {
        trace!("left scope #{}", self.current.index());
        self.current = parent;
    }

    /// Checks `list` inside a new child scope.
    fn check_nested(&mut self, list: &StatementList) {
        let parent = self.enter_scope();
        list.accept(self);
        self.exit_scope(parent);
    }

    /// Resolves `name` for use as a value and returns its type.
    fn variable_type(&mut self, name: &str) -> Option<Type> {
        match self.tree.lookup(self.current, name) {
            Some(symbol) if symbol.kind == SymbolKind::Variable => Some(symbol.data_type),
            Some(_) => {
                self.report(SemanticError::NotAVariable { name: name.to_string() });
                None
            },
            None => {
                self.report(SemanticError::UndefinedSymbol { name: name.to_string() });
                None
            },
        }
    }

    /// Visits both operands and reports when their types differ.
    fn operand_types(&mut self,
                     left: &Expr,
                     right: &Expr,
                     mismatch: impl FnOnce(Type, Type) -> SemanticError)
                     -> Option<Type> {
        let left = left.accept(self);
        let right = right.accept(self);
        match (left, right) {
            (Some(l), Some(r)) if l != r => {
                self.report(mismatch(l, r));
                None
            },
            (Some(l), Some(_)) => Some(l),
            _ => None,
        }
    }
}

impl Visitor for Checker {
    type Value = Option<Type>;
    type Flow = ();

    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_function(&mut self, function: &FunctionDeclaration) {
        let params = function.params
                             .iter()
                             .map(|p| Symbol::variable(&p.name, p.ty))
                             .collect::<Vec<_>>();

        // Declared before the body so that the body may call itself.
        self.declare(Symbol::function(&function.name, function.return_type, params.clone()));

        let parent = self.enter_scope();
        for param in params {
            self.declare(param);
        }

        let enclosing = self.function.replace(EnclosingFunction { name:        function.name
                                                                                    .clone(),
                                                                  return_type: function.return_type, });
        function.body.accept(self);
        self.function = enclosing;

        self.exit_scope(parent);
    }

    fn visit_statement_list(&mut self, list: &StatementList) {
        walk_statement_list(self, list);
    }

    fn visit_declaration(&mut self, name: &str, ty: Type) {
        self.declare(Symbol::variable(name, ty));
    }

    fn visit_assignment(&mut self, name: &str, value: &Expr) {
        let expected = self.variable_type(name);
        let found = value.accept(self);

        if let (Some(expected), Some(found)) = (expected, found) {
            if expected != found {
                self.report(SemanticError::AssignmentTypeMismatch { name: name.to_string(),
                                                                    expected,
                                                                    found });
            }
        }
    }

    fn visit_print(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn visit_return(&mut self, expr: &Expr) {
        let found = expr.accept(self);

        let Some(function) = &self.function else {
            self.report(SemanticError::ReturnOutsideFunction);
            return;
        };

        if let Some(found) = found {
            if found != function.return_type {
                let error = SemanticError::ReturnTypeMismatch { function: function.name.clone(),
                                                                expected: function.return_type,
                                                                found };
                self.report(error);
            }
        }
    }

    fn visit_if(&mut self,
                condition: &Expr,
                then_branch: &StatementList,
                else_branch: Option<&StatementList>) {
        if let Some(found) = condition.accept(self) {
            if found != Type::Int {
                self.report(SemanticError::ConditionNotInt { found });
            }
        }

        self.check_nested(then_branch);
        if let Some(else_branch) = else_branch {
            self.check_nested(else_branch);
        }
    }

    fn visit_number(&mut self, _value: i64) -> Option<Type> {
        Some(Type::Int)
    }

    fn visit_variable(&mut self, name: &str) -> Option<Type> {
        self.variable_type(name)
    }

    fn visit_binary(&mut self, left: &Expr, op: BinaryOperator, right: &Expr) -> Option<Type> {
        self.operand_types(left, right, |l, r| SemanticError::binary_mismatch(op, l, r))
    }

    fn visit_comparison(&mut self,
                        left: &Expr,
                        op: ComparisonOperator,
                        right: &Expr)
                        -> Option<Type> {
        self.operand_types(left, right, |l, r| SemanticError::comparison_mismatch(op, l, r));
        Some(Type::Int)
    }

    fn visit_call(&mut self, name: &str, arguments: &[Expr]) -> Option<Type> {
        let callee = match self.tree.lookup(self.current, name) {
            Some(symbol) if symbol.kind == SymbolKind::Function => symbol.clone(),
            found => {
                let error = if found.is_some() {
                    SemanticError::NotAFunction { name: name.to_string() }
                } else {
                    SemanticError::UndefinedSymbol { name: name.to_string() }
                };
                self.report(error);
                for argument in arguments {
                    argument.accept(self);
                }
                return None;
            },
        };

        if arguments.len() != callee.params.len() {
            self.report(SemanticError::ArityMismatch { name:     name.to_string(),
                                                       expected: callee.params.len(),
                                                       found:    arguments.len(), });
            for argument in arguments {
                argument.accept(self);
            }
            return Some(callee.data_type);
        }

        for (position, (argument, param)) in arguments.iter().zip(&callee.params).enumerate() {
            if let Some(found) = argument.accept(self) {
                if found != param.data_type {
                    self.report(SemanticError::ArgumentTypeMismatch { name: name.to_string(),
                                                                      position: position + 1,
                                                                      expected: param.data_type,
                                                                      found });
                }
            }
        }

        Some(callee.data_type)
    }
}

/// Runs the checker over `program`.
///
/// # Errors
/// Returns the full batch of diagnostics if any rule is violated.
///
/// # Example
/// ```
/// use declang::{error::SemanticError, interpreter::checker::check, parse};
///
/// let program = parse("declare x: int; declare x: int;").unwrap();
/// let diagnostics = check(&program).unwrap_err();
///
/// assert_eq!(diagnostics.errors(),
///            [SemanticError::DuplicateDeclaration { name: "x".to_string() }]);
/// ```
pub fn check(program: &Program) -> Result<ScopeTree, Diagnostics> {
    let mut checker = Checker::new();
    program.accept(&mut checker);
    checker.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{Block, Statement},
        parse,
    };

    fn diagnostics(source: &str) -> Vec<SemanticError> {
        let program = parse(source).unwrap();
        check(&program).err().map(|d| d.0).unwrap_or_default()
    }

    #[test]
    fn well_typed_program_has_no_diagnostics() {
        let source = "func add(a: int, b: int): int { return a + b; }
                      declare x: int;
                      x = add(1, 2);
                      if (x > 2) { declare y: int; y = x; print(y); } else { print(0); }";
        assert!(diagnostics(source).is_empty());
    }

    #[test]
    fn undefined_assignment_target_is_reported() {
        assert_eq!(diagnostics("x = 5;"),
                   [SemanticError::UndefinedSymbol { name: "x".to_string() }]);
    }

    #[test]
    fn errors_are_accumulated_in_traversal_order() {
        assert_eq!(diagnostics("y = 1; declare x: int; declare x: int; print(z);"),
                   [SemanticError::UndefinedSymbol { name: "y".to_string() },
                    SemanticError::DuplicateDeclaration { name: "x".to_string() },
                    SemanticError::UndefinedSymbol { name: "z".to_string() }]);
    }

    #[test]
    fn branch_scopes_do_not_leak() {
        assert_eq!(diagnostics("if (1) { declare t: int; } print(t);"),
                   [SemanticError::UndefinedSymbol { name: "t".to_string() }]);
    }

    #[test]
    fn shadowing_in_a_nested_scope_is_allowed() {
        assert!(diagnostics("declare x: int; if (1) { declare x: int; x = 2; }").is_empty());
    }

    #[test]
    fn parameters_live_in_the_function_scope() {
        assert_eq!(diagnostics("func f(a: int): int { return a; } print(a);"),
                   [SemanticError::UndefinedSymbol { name: "a".to_string() }]);
        assert_eq!(diagnostics("func f(a: int, a: int): int { return a; }"),
                   [SemanticError::DuplicateDeclaration { name: "a".to_string() }]);
    }

    #[test]
    fn call_rules_are_enforced() {
        let source = "declare v: int; func f(a: int): int { return a; } print(f(1, 2)); print(v(1));";
        assert_eq!(diagnostics(source),
                   [SemanticError::ArityMismatch { name:     "f".to_string(),
                                                   expected: 1,
                                                   found:    2, },
                    SemanticError::NotAFunction { name: "v".to_string() }]);
    }

    #[test]
    fn recursion_is_statically_valid() {
        let source = "func f(n: int): int { if (n < 1) { return 0; } return f(n - 1); }";
        assert!(diagnostics(source).is_empty());
    }

    #[test]
    fn function_names_are_not_variables() {
        assert_eq!(diagnostics("func f(): int { return 1; } f = 2;"),
                   [SemanticError::NotAVariable { name: "f".to_string() }]);
    }

    #[test]
    fn top_level_return_is_rejected() {
        assert_eq!(diagnostics("return 1;"), [SemanticError::ReturnOutsideFunction]);
    }

    /// Parses `source` and retypes the named top-level declarations as
    /// `float`, which the grammar cannot express.
    fn with_floats(source: &str, names: &[&str]) -> Program {
        let mut program = parse(source).unwrap();
        for block in &mut program.blocks {
            if let Block::Statement(Statement::Declaration { name, ty }) = block {
                if names.contains(&name.as_str()) {
                    *ty = Type::Float;
                }
            }
        }
        program
    }

    fn diagnostics_of(program: &Program) -> Vec<SemanticError> {
        check(program).err().map(|d| d.0).unwrap_or_default()
    }

    #[test]
    fn assignment_type_mismatch_names_the_variable() {
        let program = with_floats("declare x: int; declare y: int; x = y;", &["y"]);
        assert_eq!(diagnostics_of(&program),
                   [SemanticError::AssignmentTypeMismatch { name:     "x".to_string(),
                                                            expected: Type::Int,
                                                            found:    Type::Float, }]);
    }

    #[test]
    fn operand_type_mismatch_names_the_operator() {
        let program = with_floats("declare x: int; declare y: int; print(x + y);", &["y"]);
        assert_eq!(diagnostics_of(&program),
                   [SemanticError::OperandTypeMismatch { operator: "+".to_string(),
                                                         left:     Type::Int,
                                                         right:    Type::Float, }]);
    }

    #[test]
    fn mismatched_operand_hides_the_assignment_check() {
        let program = with_floats("declare x: int; declare y: int; x = x * y;", &["y"]);
        assert_eq!(diagnostics_of(&program).len(), 1);
    }

    #[test]
    fn condition_must_be_int() {
        let program = with_floats("declare y: int; if (y) { print(1); }", &["y"]);
        assert_eq!(diagnostics_of(&program),
                   [SemanticError::ConditionNotInt { found: Type::Float }]);
    }

    #[test]
    fn argument_type_mismatch_names_function_and_position() {
        let program = with_floats("declare y: int; func f(a: int, b: int): int { return a; } print(f(1, y));",
                                  &["y"]);
        assert_eq!(diagnostics_of(&program),
                   [SemanticError::ArgumentTypeMismatch { name:     "f".to_string(),
                                                          position: 2,
                                                          expected: Type::Int,
                                                          found:    Type::Float, }]);
    }

    #[test]
    fn return_type_mismatch_names_the_function() {
        let program = with_floats("declare y: int; func f(): int { return y; }", &["y"]);
        assert_eq!(diagnostics_of(&program),
                   [SemanticError::ReturnTypeMismatch { function: "f".to_string(),
                                                        expected: Type::Int,
                                                        found:    Type::Float, }]);
    }

    #[test]
    fn mismatched_comparison_is_still_int() {
        let program = with_floats("declare y: int; declare z: int; z = y < 1;", &["y", "z"]);
        assert_eq!(diagnostics_of(&program),
                   [SemanticError::OperandTypeMismatch { operator: "<".to_string(),
                                                         left:     Type::Float,
                                                         right:    Type::Int, },
                    SemanticError::AssignmentTypeMismatch { name:     "z".to_string(),
                                                            expected: Type::Float,
                                                            found:    Type::Int, }]);

        let mut checker = Checker::new();
        let comparison = Expr::comparison(Expr::Number { value: 1 },
                                          ComparisonOperator::Less,
                                          Expr::Number { value: 2 });
        assert_eq!(comparison.accept(&mut checker), Some(Type::Int));
    }

    #[test]
    fn nested_statement_list_shares_the_enclosing_scope() {
        let declare = |name: &str| Statement::Declaration { name: name.to_string(),
                                                            ty:   Type::Int, };
        let program =
            Program { blocks: vec![Block::Statement(Statement::List(StatementList::new(vec![declare("x")]))),
                                   Block::Statement(Statement::Assignment { name:  "x".to_string(),
                                                                            value: Expr::Number { value: 1 }, }),
                                   Block::Statement(declare("x"))], };

        assert_eq!(diagnostics_of(&program),
                   [SemanticError::DuplicateDeclaration { name: "x".to_string() }]);
    }

    #[test]
    fn scope_tree_is_retained() {
        let program = parse("func f(a: int): int { if (a) { declare b: int; } return a; }").unwrap();
        let tree = check(&program).unwrap();

        let global = tree.scope(tree.global());
        assert_eq!(global.children().len(), 1);
        let body = tree.scope(global.children()[0]);
        assert!(body.get("a").is_some());
        assert_eq!(body.children().len(), 1);
        assert!(tree.scope(body.children()[0]).get("b").is_some());
    }
}
