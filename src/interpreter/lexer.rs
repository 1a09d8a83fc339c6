use std::fmt;

use log::warn;
use logos::{Lexer, Logos, Skip};

use crate::error::LexError;

/// The closed set of reserved words.
pub const KEYWORDS: &[&str] = &["if", "else", "declare", "print", "return", "int", "func"];

/// The category of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A name such as `x` or `add`.
    Identifier,
    /// A run of decimal digits.
    Number,
    /// One of [`KEYWORDS`].
    Keyword,
    /// `= ! < > + - * /` and the fused `== != <= >=`.
    Operator,
    /// `; : { } ( ) ,`
    Symbol,
    /// Input is exhausted.
    EndOfFile,
}

/// A lexical token: its category and the exact source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The category of the token.
    pub kind:   TokenKind,
    /// The source text; empty for `EndOfFile`.
    pub lexeme: String,
}

impl Token {
    /// Creates a token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self { kind,
               lexeme: lexeme.into() }
    }

    /// The end-of-input marker.
    #[must_use]
    pub fn eof() -> Self {
        Self::new(TokenKind::EndOfFile, "")
    }

    /// Whether this is an operator or symbol spelled `text`.
    #[must_use]
    pub fn is_punct(&self, text: &str) -> bool {
        matches!(self.kind, TokenKind::Operator | TokenKind::Symbol) && self.lexeme == text
    }

    /// Whether this is the keyword `text`.
    #[must_use]
    pub fn is_keyword(&self, text: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfFile => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// Raw classification performed by logos. Keywords win over identifiers of
/// equal length; longer operators win over their one-character prefixes.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LexerExtras)]
enum RawToken {
    #[regex(r"[0-9]+")]
    Number,
    #[token("if")]
    #[token("else")]
    #[token("declare")]
    #[token("print")]
    #[token("return")]
    #[token("int")]
    #[token("func")]
    Keyword,
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Identifier,
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("=")]
    #[token("!")]
    #[token("<")]
    #[token(">")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    Operator,
    #[token(";")]
    #[token(":")]
    #[token("{")]
    #[token("}")]
    #[token("(")]
    #[token(")")]
    #[token(",")]
    Symbol,
    #[token("\n", newline)]
    NewLine,
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Number => Self::Number,
            RawToken::Keyword => Self::Keyword,
            RawToken::Identifier => Self::Identifier,
            RawToken::Operator => Self::Operator,
            RawToken::Symbol => Self::Symbol,
            // Both are skipped by their callbacks and never reach here.
            RawToken::NewLine | RawToken::Ignored => Self::EndOfFile,
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for diagnostics. Tokens themselves carry
/// no position.
#[derive(Debug, Clone)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

fn newline(lex: &mut Lexer<RawToken>) -> Skip {
    lex.extras.line += 1;
    Skip
}

/// Turns source text into tokens, one per request.
///
/// Unknown characters are the one recoverable error of the pipeline: each is
/// logged, remembered in [`Tokenizer::lex_errors`] and skipped.
///
/// # Example
/// ```
/// use declang::interpreter::lexer::{TokenKind, Tokenizer};
///
/// let kinds: Vec<_> = Tokenizer::new("x <= 10;").map(|token| token.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::Identifier, TokenKind::Operator, TokenKind::Number, TokenKind::Symbol]);
/// ```
#[derive(Clone)]
pub struct Tokenizer<'src> {
    lexer:      Lexer<'src, RawToken>,
    lex_errors: Vec<LexError>,
}

impl<'src> Tokenizer<'src> {
    /// Creates a tokenizer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { lexer:      RawToken::lexer_with_extras(source, LexerExtras::default()),
               lex_errors: Vec::new(), }
    }

    /// Consumes input and returns exactly one token.
    ///
    /// Returns `EndOfFile` once the input is exhausted, and keeps returning it
    /// on every later call.
    pub fn next_token(&mut self) -> Token {
        loop {
            match self.lexer.next() {
                Some(Ok(raw)) => return Token::new(raw.into(), self.lexer.slice()),
                Some(Err(())) => {
                    let error = LexError::UnknownCharacter { character: self.lexer
                                                                            .slice()
                                                                            .to_string(),
                                                             line:      self.lexer.extras.line, };
                    warn!("{error}");
                    self.lex_errors.push(error);
                },
                None => return Token::eof(),
            }
        }
    }

    /// Returns the token `next_token` would produce, without consuming it.
    ///
    /// Unknown characters are skipped silently here; they are reported when
    /// the input is actually consumed.
    #[must_use]
    pub fn peek_token(&self) -> Token {
        let mut lookahead = self.lexer.clone();
        loop {
            match lookahead.next() {
                Some(Ok(raw)) => return Token::new(raw.into(), lookahead.slice()),
                Some(Err(())) => {},
                None => return Token::eof(),
            }
        }
    }

    /// The line the tokenizer is currently on.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.lexer.extras.line
    }

    /// Characters skipped so far.
    #[must_use]
    pub fn lex_errors(&self) -> &[LexError] {
        &self.lex_errors
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::EndOfFile).then_some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(TokenKind, String)> {
        Tokenizer::new(source).map(|t| (t.kind, t.lexeme)).collect()
    }

    #[test]
    fn keywords_are_promoted_from_identifiers() {
        let tokens = lex("declare iff int func_1 print");
        let kinds: Vec<_> = tokens.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds,
                   [TokenKind::Keyword,
                    TokenKind::Identifier,
                    TokenKind::Keyword,
                    TokenKind::Identifier,
                    TokenKind::Keyword]);
    }

    #[test]
    fn every_reserved_word_is_a_keyword() {
        for word in KEYWORDS {
            assert_eq!(lex(word), [(TokenKind::Keyword, (*word).to_string())], "{word}");

            let longer = format!("{word}x");
            assert_eq!(lex(&longer), [(TokenKind::Identifier, longer.clone())]);
        }
    }

    #[test]
    fn two_character_operators_are_fused() {
        let lexemes: Vec<_> = lex("a==b != c<=d>=e<f>g=h").into_iter()
                                                            .filter(|(k, _)| {
                                                                *k == TokenKind::Operator
                                                            })
                                                            .map(|(_, l)| l)
                                                            .collect();
        assert_eq!(lexemes, ["==", "!=", "<=", ">=", "<", ">", "="]);
    }

    #[test]
    fn minus_is_never_part_of_a_number() {
        assert_eq!(lex("-12"),
                   [(TokenKind::Operator, "-".to_string()), (TokenKind::Number, "12".to_string())]);
    }

    #[test]
    fn symbols_are_single_characters() {
        let tokens = lex(";:{}(),");
        assert_eq!(tokens.len(), 7);
        assert!(tokens.iter().all(|(k, _)| *k == TokenKind::Symbol));
    }

    #[test]
    fn unknown_characters_are_skipped_and_recorded() {
        let mut tokenizer = Tokenizer::new("x @ 1\n#");
        assert_eq!(tokenizer.next_token(), Token::new(TokenKind::Identifier, "x"));
        assert_eq!(tokenizer.next_token(), Token::new(TokenKind::Number, "1"));
        assert_eq!(tokenizer.next_token(), Token::eof());
        assert_eq!(tokenizer.next_token(), Token::eof());
        assert_eq!(tokenizer.lex_errors(),
                   [LexError::UnknownCharacter { character: "@".to_string(),
                                                 line:      1, },
                    LexError::UnknownCharacter { character: "#".to_string(),
                                                 line:      2, }]);
    }

    #[test]
    fn peeking_does_not_consume() {
        let mut tokenizer = Tokenizer::new("f (");
        assert_eq!(tokenizer.peek_token(), Token::new(TokenKind::Identifier, "f"));
        assert_eq!(tokenizer.next_token(), Token::new(TokenKind::Identifier, "f"));
        assert_eq!(tokenizer.peek_token(), Token::new(TokenKind::Symbol, "("));
        assert_eq!(tokenizer.next_token(), Token::new(TokenKind::Symbol, "("));
    }
}
