//! # declang
//!
//! declang is the front end and interpreter of a small imperative language
//! written in Rust. It tokenizes and parses source text, checks scopes and
//! types, and executes the validated program with a tree-walking
//! interpreter.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use log::debug;

use crate::{
    ast::Program,
    config::Config,
    error::Error,
    interpreter::{
        checker::{self, ScopeTree},
        evaluator::core::Interpreter,
        parser::Parser,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Program`, `Statement` and `Expr` types that
/// represent source code as a tree. The AST is built by the parser and only
/// read afterwards.
///
/// # Responsibilities
/// - Defines a node type for every language construct.
/// - Owns children exclusively; the tree is never shared or cyclic.
pub mod ast;
/// Run settings such as the entry point name and the call depth limit.
pub mod config;
/// Provides unified error types for every stage.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// checking or executing code.
///
/// # Responsibilities
/// - Defines one error enum per stage.
/// - Attaches line numbers to lexical and syntax errors.
/// - Combines the stages into a single top-level [`Error`].
pub mod error;
/// Orchestrates the stages of code execution.
///
/// This module ties together lexing, parsing, checking, evaluation and source
/// printing.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, checker and evaluator.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The visitor interface shared by all AST backends.
pub mod visit;

/// Parses `source` into a program.
///
/// Unknown characters are skipped with a warning; any other problem stops
/// parsing.
///
/// # Errors
/// Returns [`Error::Syntax`] for the first grammar violation.
///
/// # Examples
/// ```
/// use declang::parse;
///
/// assert!(parse("declare x: int; x = 1;").is_ok());
/// assert!(parse("declare x int;").is_err());
/// ```
pub fn parse(source: &str) -> Result<Program, Error> {
    let mut parser = Parser::new(source);
    let program = parser.parse()?;
    if !parser.lex_errors().is_empty() {
        debug!("{} unknown characters skipped", parser.lex_errors().len());
    }
    Ok(program)
}

/// Checks scopes and types of a parsed program.
///
/// # Errors
/// Returns [`Error::Semantic`] with every diagnostic found.
pub fn check(program: &Program) -> Result<ScopeTree, Error> {
    Ok(checker::check(program)?)
}

/// Parses, checks and runs `source`, writing program output to `out`.
///
/// A program that fails checking is never executed.
///
/// # Errors
/// Returns the error of the first stage that fails.
///
/// # Examples
/// ```
/// use declang::{config::Config, run};
///
/// let mut out = Vec::new();
/// run("func main(): int { print(6 * 7); return 0; }", &Config::default(), &mut out).unwrap();
/// assert_eq!(out, b"42\n");
///
/// // 'x' is never declared.
/// assert!(run("x = 1;", &Config::default(), &mut Vec::new()).is_err());
/// ```
pub fn run<W: Write>(source: &str, config: &Config, out: W) -> Result<(), Error> {
    let program = parse(source)?;
    check(&program)?;

    let mut interpreter = Interpreter::new(config, out);
    interpreter.run(&program)?;
    Ok(())
}

/// Runs `source` and returns everything it printed.
///
/// # Errors
/// Same as [`run`].
pub fn run_to_string(source: &str, config: &Config) -> Result<String, Error> {
    let mut out = Vec::new();
    run(source, config, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
