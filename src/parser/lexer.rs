//! Logos-based lexer for Go source.
//!
//! Nothing is skipped at the logos level; a post-pass folds trivia into
//! per-token flags: whether a newline separates a token from its predecessor
//! (Go's implicit statement termination) and the span of the doc-comment
//! group sitting directly above it.

use logos::Logos;
use text_size::{TextRange, TextSize};

/// A significant token with trivia-derived context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
    /// A line break (or start of file) separates this token from the
    /// previous significant token.
    pub newline_before: bool,
    /// Comment group immediately above this token, with no blank line
    /// in between. Used for doc-comment preservation.
    pub doc: Option<TextRange>,
}

impl Token<'_> {
    /// Keyword check by text. Go keywords can never be identifiers, so a
    /// plain text comparison is sound.
    pub fn is_kw(&self, kw: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == kw
    }
}

/// Parser-facing token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Str,
    RawStr,
    Rune,
    Number,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semi,
    Dot,
    Star,
    Eq,
    /// `<-`
    Arrow,
    /// `...`
    Ellipsis,
    Pipe,
    Tilde,
    /// Any other operator cluster; only seen inside skipped code.
    Op,
    Error,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[regex(r"\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,

    #[regex(r"`[^`]*`")]
    RawStr,

    #[regex(r"'([^'\\\n]|\\.)*'")]
    Rune,

    #[regex(r"0[xXbBoO][0-9a-fA-F_]+|[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?|\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(".")]
    Dot,
    #[token("*")]
    Star,
    #[token("=")]
    Eq,
    #[token("<-")]
    Arrow,
    #[token("...")]
    Ellipsis,
    #[token("|")]
    Pipe,
    #[token("~")]
    Tilde,

    // Operator clusters from skipped code (expressions, bodies). Low
    // priority so the dedicated tokens above win ties.
    #[regex(r"[!%&+\-/:<>^?@=|]+", priority = 1)]
    Op,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Ident => TokenKind::Ident,
            RawToken::Str => TokenKind::Str,
            RawToken::RawStr => TokenKind::RawStr,
            RawToken::Rune => TokenKind::Rune,
            RawToken::Number => TokenKind::Number,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semi => TokenKind::Semi,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Star => TokenKind::Star,
            RawToken::Eq => TokenKind::Eq,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::Ellipsis => TokenKind::Ellipsis,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::Op => TokenKind::Op,
            RawToken::Whitespace
            | RawToken::Newline
            | RawToken::LineComment
            | RawToken::BlockComment => TokenKind::Error,
        }
    }
}

/// Tokenize a whole file into significant tokens with trivia context.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut lexer = RawToken::lexer(input);
    let mut tokens = Vec::new();

    // Trivia state between significant tokens.
    let mut newline_since_sig = true; // start of file behaves like a newline
    let mut comments: Vec<TextRange> = Vec::new();
    let mut newlines_since_comment: u32 = 0;

    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        let range = TextRange::new(
            TextSize::new(span.start as u32),
            TextSize::new(span.end as u32),
        );
        let text = lexer.slice();

        let raw = match raw {
            Ok(t) => t,
            Err(()) => {
                tokens.push(Token {
                    kind: TokenKind::Error,
                    text,
                    range,
                    newline_before: newline_since_sig,
                    doc: None,
                });
                newline_since_sig = false;
                comments.clear();
                continue;
            }
        };

        match raw {
            RawToken::Whitespace => {}
            RawToken::Newline => {
                newline_since_sig = true;
                if !comments.is_empty() {
                    newlines_since_comment += 1;
                    // A blank line detaches the comment group.
                    if newlines_since_comment >= 2 {
                        comments.clear();
                    }
                }
            }
            RawToken::LineComment | RawToken::BlockComment => {
                // A comment trailing another token on the same line does not
                // document the next declaration.
                if newline_since_sig {
                    comments.push(range);
                    newlines_since_comment = 0;
                    if text.contains('\n') {
                        // Multi-line block comment still counts as adjacent.
                        newline_since_sig = true;
                    }
                }
            }
            _ => {
                let doc = if !comments.is_empty() && newlines_since_comment <= 1 {
                    let first = comments[0];
                    let last = comments[comments.len() - 1];
                    Some(TextRange::new(first.start(), last.end()))
                } else {
                    None
                };
                tokens.push(Token {
                    kind: raw.into(),
                    text,
                    range,
                    newline_before: newline_since_sig,
                    doc,
                });
                newline_since_sig = false;
                comments.clear();
                newlines_since_comment = 0;
            }
        }
    }

    tokens
}
