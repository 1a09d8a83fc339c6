use std::{collections::HashMap, io::Write, rc::Rc};

use log::debug;
use snafu::ResultExt;

use crate::{
    ast::{BinaryOperator, ComparisonOperator, Expr, FunctionDeclaration, Program, StatementList,
          Type},
    config::Config,
    error::{RuntimeError, runtime_error::OutputSnafu},
    interpreter::evaluator::binary::{arithmetic, compare},
    visit::Visitor,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` ran; remaining statements are skipped up to the call.
    Return(i64),
}

/// Variable bindings of one lexical block.
pub(crate) type Environment = HashMap<String, i64>;

/// The bindings owned by one function invocation.
///
/// `blocks[0]` holds the parameters; every entered `if` branch pushes another
/// environment on top and pops it when the branch is left.
#[derive(Debug)]
pub(crate) struct Frame {
    pub(crate) function: String,
    pub(crate) blocks:   Vec<Environment>,
}

impl Frame {
    pub(crate) fn new(function: impl Into<String>, parameters: Environment) -> Self {
        Self { function: function.into(),
               blocks:   vec![parameters], }
    }
}

/// Executes a checked program, writing `print` output to `out`.
///
/// ## Usage
///
/// The interpreter is created once per run. Frame `0` is the top level and
/// its first environment holds the globals. A variable is resolved in the
/// current frame's environments, innermost first, then in the globals, which
/// matches the nesting the checker validated.
///
/// # Example
/// ```
/// use declang::{config::Config, interpreter::evaluator::core::Interpreter, parse};
///
/// let program = parse("declare x: int; x = 6 * 7; print(x);").unwrap();
/// let mut interpreter = Interpreter::new(&Config::default(), Vec::new());
/// interpreter.run(&program).unwrap();
///
/// assert_eq!(interpreter.into_output(), b"42\n");
/// ```
pub struct Interpreter<W: Write> {
    pub(crate) frames:    Vec<Frame>,
    pub(crate) functions: HashMap<String, Rc<FunctionDeclaration>>,
    pub(crate) config:    Config,
    pub(crate) out:       W,
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter with empty globals and no functions.
    pub fn new(config: &Config, out: W) -> Self {
        Self { frames: vec![Frame::new("<top level>", Environment::new())],
               functions: HashMap::new(),
               config: config.clone(),
               out }
    }

    /// Executes every top-level block in order.
    ///
    /// A `return` at the top level stops execution.
    ///
    /// # Errors
    /// Returns the first runtime error; nothing after it is executed.
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        let flow = program.accept(self)?;
        debug!("execution finished with {flow:?}");
        self.out.flush().context(OutputSnafu)
    }

    /// Consumes the interpreter and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Value of `name` as seen from the current block.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<i64> {
        let frame = self.frames.last()?;
        frame.blocks
             .iter()
             .rev()
             .find_map(|block| block.get(name))
             .or_else(|| self.globals().and_then(|globals| globals.get(name)))
             .copied()
    }

    /// Number of user function invocations currently active.
    #[must_use]
    pub fn call_depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    fn globals(&self) -> Option<&Environment> {
        self.frames.first().and_then(|frame| frame.blocks.first())
    }
}

impl<W: Write> Visitor for Interpreter<W> {
    type Value = EvalResult<i64>;
    type Flow = EvalResult<Flow>;

    fn visit_program(&mut self, program: &Program) -> EvalResult<Flow> {
        for block in &program.blocks {
            if let Flow::Return(value) = block.accept(self)? {
                debug!("top-level return with {value}");
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn visit_function(&mut self, function: &FunctionDeclaration) -> EvalResult<Flow> {
        self.register_function(function)
    }

    fn visit_statement_list(&mut self, list: &StatementList) -> EvalResult<Flow> {
        for statement in &list.statements {
            if let Flow::Return(value) = statement.accept(self)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn visit_declaration(&mut self, name: &str, _ty: Type) -> EvalResult<Flow> {
        self.declare_variable(name)
    }

    fn visit_assignment(&mut self, name: &str, value: &Expr) -> EvalResult<Flow> {
        let value = value.accept(self)?;
        self.assign_nearest(name, value)
    }

    fn visit_print(&mut self, expr: &Expr) -> EvalResult<Flow> {
        let value = expr.accept(self)?;
        self.print(value)
    }

    fn visit_return(&mut self, expr: &Expr) -> EvalResult<Flow> {
        Ok(Flow::Return(expr.accept(self)?))
    }

    fn visit_if(&mut self,
                condition: &Expr,
                then_branch: &StatementList,
                else_branch: Option<&StatementList>)
                -> EvalResult<Flow> {
        let branch = if condition.accept(self)? != 0 {
            Some(then_branch)
        } else {
            else_branch
        };

        branch.map_or(Ok(Flow::Normal), |branch| self.run_branch(branch))
    }

    fn visit_number(&mut self, value: i64) -> EvalResult<i64> {
        Ok(value)
    }

    fn visit_variable(&mut self, name: &str) -> EvalResult<i64> {
        self.get_variable(name)
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string() })
    }

    fn visit_binary(&mut self, left: &Expr, op: BinaryOperator, right: &Expr) -> EvalResult<i64> {
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        arithmetic(op, left, right)
    }

    fn visit_comparison(&mut self,
                        left: &Expr,
                        op: ComparisonOperator,
                        right: &Expr)
                        -> EvalResult<i64> {
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        Ok(compare(op, left, right))
    }

    fn visit_call(&mut self, name: &str, arguments: &[Expr]) -> EvalResult<i64> {
        let values = arguments.iter()
                              .map(|argument| argument.accept(self))
                              .collect::<EvalResult<Vec<_>>>()?;
        self.call_function(name, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn execute(source: &str) -> EvalResult<String> {
        execute_with(source, &Config::default())
    }

    fn execute_with(source: &str, config: &Config) -> EvalResult<String> {
        let program = parse(source).unwrap();
        let mut interpreter = Interpreter::new(config, Vec::new());
        interpreter.run(&program)?;
        Ok(String::from_utf8(interpreter.into_output()).unwrap())
    }

    #[test]
    fn statements_run_in_program_order() {
        let output = execute("declare x: int; print(x); x = 2 + 3 * 4; print(x);").unwrap();
        assert_eq!(output, "0\n14\n");
    }

    #[test]
    fn if_selects_a_branch() {
        let source = "if (1 < 2) { print(1); } else { print(2); }
                      if (0) { print(3); }
                      if (2 - 2) { print(4); } else { print(5); }";
        assert_eq!(execute(source).unwrap(), "1\n5\n");
    }

    #[test]
    fn branch_locals_shadow_and_disappear() {
        let source = "declare x: int; x = 1;
                      if (1) { declare x: int; x = 2; print(x); }
                      print(x);";
        assert_eq!(execute(source).unwrap(), "2\n1\n");
    }

    #[test]
    fn top_level_return_stops_execution() {
        assert_eq!(execute("print(1); return 0; print(2);").unwrap(), "1\n");
    }

    #[test]
    fn unknown_variable_is_an_error() {
        assert!(matches!(execute("print(y);"),
                         Err(RuntimeError::UnknownVariable { name }) if name == "y"));
        assert!(matches!(execute("y = 1;"),
                         Err(RuntimeError::UnknownVariable { name }) if name == "y"));
    }

    #[test]
    fn output_before_an_error_is_kept() {
        let program = parse("print(7); print(1 / 0);").unwrap();
        let mut interpreter = Interpreter::new(&Config::default(), Vec::new());
        assert!(matches!(interpreter.run(&program), Err(RuntimeError::DivisionByZero)));
        assert_eq!(interpreter.into_output(), b"7\n");
    }

    #[test]
    fn nested_statement_list_runs_in_the_enclosing_environment() {
        use crate::ast::{Block, Statement};

        let list = StatementList::new(vec![Statement::Declaration { name: "x".to_string(),
                                                                    ty:   Type::Int, },
                                           Statement::Assignment { name:  "x".to_string(),
                                                                   value: Expr::Number { value: 1 }, }]);
        let print_x = Statement::Print { expr: Expr::Variable { name: "x".to_string() } };
        let program = Program { blocks: vec![Block::Statement(Statement::List(list)),
                                             Block::Statement(print_x)], };

        let mut interpreter = Interpreter::new(&Config::default(), Vec::new());
        interpreter.run(&program).unwrap();
        assert_eq!(interpreter.into_output(), b"1\n");
    }

    #[test]
    fn call_depth_is_limited() {
        let config = Config { max_call_depth: 8,
                              ..Config::default() };
        let source = "func down(n: int): int { return down(n + 1); } print(down(0));";
        assert!(matches!(execute_with(source, &config),
                         Err(RuntimeError::CallDepthExceeded { limit: 8, .. })));
    }
}
