use std::io::Write;

use log::trace;
use snafu::ResultExt;

use crate::{
    ast::StatementList,
    error::runtime_error::OutputSnafu,
    error::RuntimeError,
    interpreter::evaluator::core::{EvalResult, Flow, Interpreter},
};

impl<W: Write> Interpreter<W> {
    /// Declares `name` in the innermost environment, initialized to `0`.
    ///
    /// # Errors
    /// `VariableRedeclared` if that environment already binds `name`.
    pub fn declare_variable(&mut self, name: &str) -> EvalResult<Flow> {
        let block = self.frames
                        .last_mut()
                        .and_then(|frame| frame.blocks.last_mut())
                        .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string() })?;

        if block.contains_key(name) {
            return Err(RuntimeError::VariableRedeclared { name: name.to_string() });
        }
        block.insert(name.to_string(), 0);
        Ok(Flow::Normal)
    }

    /// Stores `value` in the nearest visible binding of `name`.
    ///
    /// Search goes through the current frame innermost-out, then the globals.
    /// Assignment never creates a binding.
    ///
    /// # Errors
    /// `UnknownVariable` if `name` is not visible.
    pub fn assign_nearest(&mut self, name: &str, value: i64) -> EvalResult<Flow> {
        let depth = self.frames.len();
        let slot = match self.frames.split_first_mut() {
            Some((top, calls)) => {
                let local = match calls.last_mut() {
                    Some(frame) => frame.blocks.iter_mut().rev().find_map(|b| b.get_mut(name)),
                    None => None,
                };
                match local {
                    Some(slot) => Some(slot),
                    // At depth 1 the top-level frame is the current frame, so
                    // every block of it is visible.
                    None if depth == 1 => top.blocks.iter_mut().rev().find_map(|b| b.get_mut(name)),
                    None => top.blocks.first_mut().and_then(|globals| globals.get_mut(name)),
                }
            },
            None => None,
        };

        let slot = slot.ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string() })?;
        *slot = value;
        Ok(Flow::Normal)
    }

    /// Writes `value` and a newline to the output.
    ///
    /// # Errors
    /// `Output` if the sink fails.
    pub fn print(&mut self, value: i64) -> EvalResult<Flow> {
        writeln!(self.out, "{value}").context(OutputSnafu)?;
        Ok(Flow::Normal)
    }

    /// Runs an `if` branch inside its own environment.
    ///
    /// The environment is popped whether or not the branch succeeds.
    pub(crate) fn run_branch(&mut self, branch: &StatementList) -> EvalResult<Flow> {
        self.push_block();
        let flow = branch.accept(self);
        self.pop_block();
        flow
    }

    fn push_block(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.blocks.push(Default::default());
            trace!("entered block {} of '{}'", frame.blocks.len() - 1, frame.function);
        }
    }

    fn pop_block(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            trace!("left block {} of '{}'", frame.blocks.len() - 1, frame.function);
            frame.blocks.pop();
        }
    }
}
