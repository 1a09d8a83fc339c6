use std::{io::Write, rc::Rc};

use log::{debug, trace};

use crate::{
    ast::FunctionDeclaration,
    error::RuntimeError,
    interpreter::evaluator::core::{Environment, EvalResult, Flow, Frame, Interpreter},
};

impl<W: Write> Interpreter<W> {
    /// Registers a top-level function declaration.
    ///
    /// When the declaration is the configured entry point it is invoked right
    /// away with no arguments and its return value is discarded.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` if the entry point declares parameters, or any
    /// error raised while running it.
    pub fn register_function(&mut self, function: &FunctionDeclaration) -> EvalResult<Flow> {
        trace!("registered function '{}'", function.name);
        self.functions
            .insert(function.name.clone(), Rc::new(function.clone()));

        if function.name == self.config.entry_point {
            debug!("running entry point '{}'", function.name);
            let value = self.call_function(&function.name, Vec::new())?;
            debug!("entry point returned {value}");
        }

        Ok(Flow::Normal)
    }

    /// Calls a user-defined function with already evaluated arguments.
    ///
    /// A fresh frame binds each parameter to its argument. The frame is
    /// released when the call finishes, successfully or not.
    ///
    /// # Errors
    /// - `UnknownFunction` if no function named `name` has been registered.
    /// - `ArgumentCountMismatch` if the number of arguments is wrong.
    /// - `CallDepthExceeded` if the call would exceed the configured depth.
    /// - `MissingReturn` if the body finishes without `return`.
    pub fn call_function(&mut self, name: &str, arguments: Vec<i64>) -> EvalResult<i64> {
        let function =
            self.functions
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string() })?;

        if arguments.len() != function.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                             expected: function.params.len(),
                                                             found:    arguments.len(), });
        }

        if self.call_depth() >= self.config.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded { name:  name.to_string(),
                                                         limit: self.config.max_call_depth, });
        }

        let parameters = function.params
                                 .iter()
                                 .map(|param| param.name.clone())
                                 .zip(arguments)
                                 .collect::<Environment>();

        trace!("calling '{name}' at depth {}", self.call_depth() + 1);
        self.frames.push(Frame::new(name, parameters));
        let flow = function.body.accept(self);
        self.frames.pop();

        match flow? {
            Flow::Return(value) => {
                trace!("'{name}' returned {value}");
                Ok(value)
            },
            Flow::Normal => Err(RuntimeError::MissingReturn { name: name.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config, error::RuntimeError, interpreter::evaluator::core::Interpreter, parse,
    };

    fn execute(source: &str, config: &Config) -> Result<String, RuntimeError> {
        let program = parse(source).unwrap();
        let mut interpreter = Interpreter::new(config, Vec::new());
        interpreter.run(&program)?;
        Ok(String::from_utf8(interpreter.into_output()).unwrap())
    }

    #[test]
    fn functions_return_values() {
        let source = "func add(a: int, b: int): int { return a + b; } print(add(2, 3));";
        assert_eq!(execute(source, &Config::default()).unwrap(), "5\n");
    }

    #[test]
    fn return_short_circuits_the_body() {
        let source = "func f(n: int): int { if (n > 0) { return 1; } print(99); return 0; }
                      print(f(5));";
        assert_eq!(execute(source, &Config::default()).unwrap(), "1\n");
    }

    #[test]
    fn recursion_uses_separate_frames() {
        let source = "func fact(n: int): int {
                          if (n < 2) { return 1; }
                          declare r: int;
                          r = n * fact(n - 1);
                          return r;
                      }
                      print(fact(10));";
        assert_eq!(execute(source, &Config::default()).unwrap(), "3628800\n");
    }

    #[test]
    fn callees_do_not_see_caller_locals() {
        let source = "func peek(): int { return hidden; }
                      func outer(): int { declare hidden: int; return peek(); }
                      print(outer());";
        assert!(matches!(execute(source, &Config::default()),
                         Err(RuntimeError::UnknownVariable { name }) if name == "hidden"));
    }

    #[test]
    fn globals_are_visible_and_assignable_from_calls() {
        let source = "declare counter: int;
                      func bump(): int { counter = counter + 1; return counter; }
                      print(bump()); print(bump()); print(counter);";
        assert_eq!(execute(source, &Config::default()).unwrap(), "1\n2\n2\n");
    }

    #[test]
    fn falling_off_the_end_is_an_error() {
        let source = "func f(): int { print(1); } print(f());";
        assert!(matches!(execute(source, &Config::default()),
                         Err(RuntimeError::MissingReturn { name }) if name == "f"));
    }

    #[test]
    fn entry_point_runs_when_declared() {
        let source = "print(1); func main(): int { print(2); return 0; } print(3);";
        assert_eq!(execute(source, &Config::default()).unwrap(), "1\n2\n3\n");
    }

    #[test]
    fn entry_point_name_is_configurable() {
        let config = Config { entry_point: "start".to_string(),
                              ..Config::default() };
        let source = "func main(): int { print(1); return 0; }
                      func start(): int { print(2); return 0; }";
        assert_eq!(execute(source, &config).unwrap(), "2\n");
    }

    #[test]
    fn entry_point_with_parameters_is_rejected() {
        let source = "func main(a: int): int { return a; }";
        assert!(matches!(execute(source, &Config::default()),
                         Err(RuntimeError::ArgumentCountMismatch { expected: 1,
                                                                   found: 0,
                                                                   .. })));
    }

    #[test]
    fn unknown_function_is_an_error() {
        assert!(matches!(execute("print(nothing());", &Config::default()),
                         Err(RuntimeError::UnknownFunction { name }) if name == "nothing"));
    }
}
