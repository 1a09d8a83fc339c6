use log::debug;

use crate::{
    ast::{Block, Program},
    error::{LexError, ParseError},
    interpreter::lexer::{Token, TokenKind, Tokenizer},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest allowed nesting of parentheses, call arguments and braced lists.
pub const MAX_NESTING_DEPTH: usize = 128;

/// A recursive-descent parser with one token of lookahead.
///
/// The parser pulls tokens from its [`Tokenizer`] one at a time. Apart from
/// the tokenizer itself its only state is the current token. Parsing is
/// fail-fast: the first grammar violation is returned and nothing after it is
/// examined.
///
/// # Example
/// ```
/// use declang::{ast::Block, interpreter::parser::Parser};
///
/// let program = Parser::new("declare x: int; x = 1 + 2;").parse().unwrap();
/// assert_eq!(program.blocks.len(), 2);
/// assert!(matches!(program.blocks[0], Block::Statement(_)));
/// ```
pub struct Parser<'src> {
    tokenizer: Tokenizer<'src>,
    current:   Token,
    line:      usize,
    depth:     usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser positioned at the first token of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut tokenizer = Tokenizer::new(source);
        let current = tokenizer.next_token();
        let line = tokenizer.line();
        Self { tokenizer,
               current,
               line,
               depth: 0 }
    }

    /// Parses the whole input into a [`Program`].
    ///
    /// Grammar: `program := block*` up to the end of input.
    ///
    /// # Errors
    /// Returns the first syntax error encountered. A `}` with no matching `{`
    /// is reported as a trailing token.
    pub fn parse(&mut self) -> ParseResult<Program> {
        let mut blocks = Vec::new();

        while !self.at_list_end() {
            blocks.push(self.parse_block()?);
        }

        if self.current.kind != TokenKind::EndOfFile {
            return Err(ParseError::UnexpectedTrailingToken { token: self.current.to_string(),
                                                             line:  self.line, });
        }

        debug!("parsed {} top-level blocks", blocks.len());
        Ok(Program { blocks })
    }

    /// Characters the tokenizer skipped so far.
    #[must_use]
    pub fn lex_errors(&self) -> &[LexError] {
        self.tokenizer.lex_errors()
    }

    /// Parses one top-level block.
    ///
    /// Grammar: `block := function_decl | statement`
    fn parse_block(&mut self) -> ParseResult<Block> {
        if self.current.is_keyword("func") {
            Ok(Block::Function(self.parse_function_declaration()?))
        } else {
            Ok(Block::Statement(self.parse_statement()?))
        }
    }

    /// The current token.
    pub(in crate::interpreter::parser) const fn current(&self) -> &Token {
        &self.current
    }

    /// The token after the current one, without consuming anything.
    pub(in crate::interpreter::parser) fn peek(&self) -> Token {
        self.tokenizer.peek_token()
    }

    /// Discards the current token, fetches the next one and returns the
    /// discarded token.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> Token {
        let next = self.tokenizer.next_token();
        self.line = self.tokenizer.line();
        std::mem::replace(&mut self.current, next)
    }

    /// Whether a statement list ends here: at `}` or at end of input.
    pub(in crate::interpreter::parser) fn at_list_end(&self) -> bool {
        self.current.is_punct("}") || self.current.kind == TokenKind::EndOfFile
    }

    /// Consumes the operator or symbol `text`, or fails naming it.
    pub(in crate::interpreter::parser) fn expect_punct(&mut self, text: &str) -> ParseResult<()> {
        if self.current.is_punct(text) {
            self.advance();
            Ok(())
        } else {
            Err(self.expected(format!("'{text}'")))
        }
    }

    /// Consumes the keyword `text`, or fails naming it.
    pub(in crate::interpreter::parser) fn expect_keyword(&mut self, text: &str) -> ParseResult<()> {
        if self.current.is_keyword(text) {
            self.advance();
            Ok(())
        } else {
            Err(self.expected(format!("'{text}'")))
        }
    }

    /// Builds an "expected X, found <current>" error.
    pub(in crate::interpreter::parser) fn expected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::Expected { expected: expected.into(),
                               found:    self.current.to_string(),
                               line:     self.line, }
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// # Errors
    /// `NestingTooDeep` once [`MAX_NESTING_DEPTH`] levels are open.
    pub(in crate::interpreter::parser) fn nested<T>(&mut self,
                                                    parse: impl FnOnce(&mut Self) -> ParseResult<T>)
                                                    -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                    line:  self.line, });
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Line of the current token.
    pub(in crate::interpreter::parser) const fn line(&self) -> usize {
        self.line
    }
}
