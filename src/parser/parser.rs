//! Recursive-descent parser for Go declarations.
//!
//! Recovers the package clause, imports, and type declarations from a token
//! stream; every other top-level declaration is skipped with balanced
//! delimiter tracking. Errors are recorded and parsing continues, so a file
//! with broken code can still yield usable type declarations.

use super::lexer::{Token, TokenKind, lex};
use crate::syntax::{
    Field, Ident, ImportSpec, InterfaceElem, Signature, SourceFile, TypeDecl, TypeExpr,
};
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

/// Parse result: the recovered file plus any errors encountered.
#[derive(Debug, Clone)]
pub struct Parse {
    pub file: SourceFile,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Whether parsing succeeded without errors.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse Go source into the declaration subset.
pub fn parse(input: &str) -> Parse {
    let tokens = lex(input);
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    file: SourceFile,
    errors: Vec<SyntaxError>,
    /// End offset of the last consumed token; spans close here.
    prev_end: TextSize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            file: SourceFile::default(),
            errors: Vec::new(),
            prev_end: TextSize::new(0),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            file: self.file,
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    fn at_kw(&self, kw: &str) -> bool {
        self.current().is_some_and(|t| t.is_kw(kw))
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn nth(&self, n: usize) -> Option<&Token<'a>> {
        self.tokens.get(self.pos + n)
    }

    /// Newline (or file start) in front of the current token.
    fn newline_before(&self) -> bool {
        self.current().map(|t| t.newline_before).unwrap_or(true)
    }

    fn current_range(&self) -> TextRange {
        self.current()
            .map(|t| t.range)
            .unwrap_or_else(|| TextRange::empty(self.prev_end))
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.prev_end = token.range.end();
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {what}"));
            false
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        let range = self.current_range();
        self.errors.push(SyntaxError::new(message, range));
    }

    // =========================================================================
    // File structure
    // =========================================================================

    fn parse_source_file(&mut self) {
        while !self.at_eof() {
            if self.at_kw("package") {
                self.bump();
                if let Some(tok) = self.current().filter(|t| t.kind == TokenKind::Ident) {
                    self.file.package_name = SmolStr::new(tok.text);
                    self.bump();
                }
            } else if self.at_kw("import") {
                self.parse_import_decl();
            } else if self.at_kw("type") {
                self.parse_type_decl();
            } else {
                self.skip_decl();
            }
        }
    }

    /// Skip a declaration the extractor does not care about (func, var,
    /// const, stray tokens). Consumes balanced delimiters, stopping at the
    /// first token that begins a new logical line at depth zero.
    fn skip_decl(&mut self) {
        let start = self.pos;
        let mut depth: u32 = 0;
        while let Some(tok) = self.current() {
            if depth == 0 && self.pos > start && tok.newline_before {
                break;
            }
            match tok.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::Semi if depth == 0 => {
                    self.bump();
                    break;
                }
                _ => {}
            }
            self.bump();
        }
    }

    // =========================================================================
    // Imports
    // =========================================================================

    fn parse_import_decl(&mut self) {
        self.bump(); // `import`
        if self.eat(TokenKind::LParen) {
            loop {
                while self.eat(TokenKind::Semi) {}
                if self.eat(TokenKind::RParen) || self.at_eof() {
                    break;
                }
                self.parse_import_spec();
            }
        } else {
            self.parse_import_spec();
        }
    }

    fn parse_import_spec(&mut self) {
        let alias = match self.current_kind() {
            Some(TokenKind::Ident) => {
                let alias = SmolStr::new(self.current().map(|t| t.text).unwrap_or_default());
                self.bump();
                Some(alias)
            }
            Some(TokenKind::Dot) => {
                self.bump();
                Some(SmolStr::new("."))
            }
            _ => None,
        };

        match self.current_kind() {
            Some(TokenKind::Str) | Some(TokenKind::RawStr) => {
                let text = self.current().map(|t| t.text).unwrap_or_default();
                let path = text[1..text.len() - 1].to_string();
                self.bump();
                self.file.imports.push(ImportSpec { alias, path });
            }
            _ => {
                self.error("expected import path string");
                // Resynchronize on the next logical line.
                self.skip_decl();
            }
        }
    }

    // =========================================================================
    // Type declarations
    // =========================================================================

    fn parse_type_decl(&mut self) {
        let decl_doc = self.current().and_then(|t| t.doc);
        self.bump(); // `type`
        if self.eat(TokenKind::LParen) {
            loop {
                while self.eat(TokenKind::Semi) {}
                if self.eat(TokenKind::RParen) || self.at_eof() {
                    break;
                }
                // Inside a group each spec carries its own doc comment.
                let spec_doc = self.current().and_then(|t| t.doc);
                if !self.parse_type_spec(spec_doc) {
                    self.skip_decl();
                }
            }
        } else if !self.parse_type_spec(decl_doc) {
            self.skip_decl();
        }
    }

    /// `Name [typeparams] [=] Type`. Returns false if no name was found.
    fn parse_type_spec(&mut self, doc: Option<TextRange>) -> bool {
        let Some(name_tok) = self.current().filter(|t| t.kind == TokenKind::Ident) else {
            self.error("expected type name");
            return false;
        };
        let name = SmolStr::new(name_tok.text);
        let start = name_tok.range.start();
        self.bump();

        // Generic type parameters: `type X[T any] ...`. Distinguished from an
        // array type `type X [N]int` by what follows the single identifier.
        if self.at(TokenKind::LBracket)
            && !self.newline_before()
            && self.bracket_opens_type_params()
        {
            self.skip_balanced_brackets();
        }

        // Alias declarations: `type A = B`.
        self.eat(TokenKind::Eq);

        let expr = self.parse_type();
        let span = TextRange::new(start, self.prev_end);
        self.file.types.push(TypeDecl {
            name,
            expr,
            span,
            doc,
        });
        true
    }

    /// Heuristic: `[` Ident (not followed by `]`) starts a type-parameter
    /// list; `[` Number / `]` / `...` starts an array or slice type.
    fn bracket_opens_type_params(&self) -> bool {
        match self.nth(1).map(|t| t.kind) {
            Some(TokenKind::Ident) => !matches!(self.nth(2).map(|t| t.kind), Some(TokenKind::RBracket)),
            _ => false,
        }
    }

    /// Consume from an opening `[` through its matching `]`.
    fn skip_balanced_brackets(&mut self) {
        debug_assert!(self.at(TokenKind::LBracket));
        self.bump();
        let mut depth: u32 = 1;
        while let Some(tok) = self.current() {
            match tok.kind {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => {
                    depth -= 1;
                    if depth == 0 {
                        self.bump();
                        return;
                    }
                }
                _ => {}
            }
            self.bump();
        }
    }

    // =========================================================================
    // Type expressions
    // =========================================================================

    /// Whether a token can begin a type expression.
    fn starts_type(tok: &Token<'_>) -> bool {
        matches!(
            tok.kind,
            TokenKind::Ident
                | TokenKind::Star
                | TokenKind::LBracket
                | TokenKind::Arrow
                | TokenKind::LParen
                | TokenKind::Ellipsis
                | TokenKind::Tilde
        )
    }

    fn parse_type(&mut self) -> TypeExpr {
        match self.current_kind() {
            Some(TokenKind::Star) => {
                self.bump();
                TypeExpr::Pointer(Box::new(self.parse_type()))
            }
            Some(TokenKind::LBracket) => {
                self.bump();
                if self.eat(TokenKind::RBracket) {
                    // Slice.
                    TypeExpr::Array {
                        elem: Box::new(self.parse_type()),
                    }
                } else {
                    // Array: the length expression holds no type references.
                    self.skip_to_matching_rbracket();
                    if self.current().is_some_and(Self::starts_type) && !self.newline_before() {
                        TypeExpr::Array {
                            elem: Box::new(self.parse_type()),
                        }
                    } else {
                        // No element type follows: this was a generic
                        // instantiation misread as an array. Terminal.
                        TypeExpr::Opaque
                    }
                }
            }
            Some(TokenKind::Arrow) => {
                self.bump();
                if self.at_kw("chan") {
                    self.bump();
                }
                TypeExpr::Chan {
                    elem: Box::new(self.parse_type()),
                }
            }
            Some(TokenKind::Ellipsis) => {
                self.bump();
                TypeExpr::Variadic(Box::new(self.parse_type()))
            }
            Some(TokenKind::Tilde) => {
                // Constraint element `~T`: recognized, dependency-free.
                self.bump();
                let _ = self.parse_type();
                TypeExpr::Opaque
            }
            Some(TokenKind::LParen) => {
                self.bump();
                let inner = self.parse_type();
                self.expect(TokenKind::RParen, "`)`");
                inner
            }
            Some(TokenKind::Ident) if self.at_kw("map") => {
                self.bump();
                self.expect(TokenKind::LBracket, "`[`");
                let key = self.parse_type();
                self.expect(TokenKind::RBracket, "`]`");
                let value = self.parse_type();
                TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                }
            }
            Some(TokenKind::Ident) if self.at_kw("chan") => {
                self.bump();
                self.eat(TokenKind::Arrow);
                TypeExpr::Chan {
                    elem: Box::new(self.parse_type()),
                }
            }
            Some(TokenKind::Ident) if self.at_kw("func") => {
                self.bump();
                TypeExpr::Func(self.parse_signature())
            }
            Some(TokenKind::Ident) if self.at_kw("struct") => {
                self.bump();
                self.expect(TokenKind::LBrace, "`{`");
                let fields = self.parse_struct_fields();
                TypeExpr::Struct { fields }
            }
            Some(TokenKind::Ident) if self.at_kw("interface") => {
                self.bump();
                self.expect(TokenKind::LBrace, "`{`");
                let elems = self.parse_interface_elems();
                TypeExpr::Interface { elems }
            }
            Some(TokenKind::Ident) => self.parse_named_type(),
            _ => {
                self.error("expected type");
                if !self.at_eof() && !self.newline_before() {
                    self.bump();
                }
                TypeExpr::Opaque
            }
        }
    }

    /// `Ident`, `alias.Name`, or a generic instantiation (terminal).
    fn parse_named_type(&mut self) -> TypeExpr {
        let first = self.ident();

        if self.at(TokenKind::Dot) && matches!(self.nth(1).map(|t| t.kind), Some(TokenKind::Ident))
        {
            self.bump(); // `.`
            let name = self.ident();
            if self.at(TokenKind::LBracket) && !self.newline_before() {
                // Generic instantiation `pkg.Name[...]`: terminal.
                self.skip_balanced_brackets();
                return TypeExpr::Opaque;
            }
            return TypeExpr::Selector {
                qualifier: first,
                name,
            };
        }

        if self.at(TokenKind::LBracket) && !self.newline_before() {
            // Generic instantiation `Name[...]`: terminal.
            self.skip_balanced_brackets();
            return TypeExpr::Opaque;
        }

        TypeExpr::Ident(first)
    }

    fn ident(&mut self) -> Ident {
        let (name, span) = self
            .current()
            .map(|t| (SmolStr::new(t.text), t.range))
            .unwrap_or_else(|| (SmolStr::default(), TextRange::empty(self.prev_end)));
        self.bump();
        Ident { name, span }
    }

    /// Consume tokens up to and including the `]` matching an already
    /// consumed `[`.
    fn skip_to_matching_rbracket(&mut self) {
        let mut depth: u32 = 1;
        while let Some(tok) = self.current() {
            match tok.kind {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => {
                    depth -= 1;
                    if depth == 0 {
                        self.bump();
                        return;
                    }
                }
                _ => {}
            }
            self.bump();
        }
    }

    // =========================================================================
    // Struct fields
    // =========================================================================

    fn parse_struct_fields(&mut self) -> Vec<Field> {
        let mut fields = Vec::new();
        loop {
            while self.eat(TokenKind::Semi) {}
            if self.eat(TokenKind::RBrace) || self.at_eof() {
                break;
            }
            if let Some(field) = self.parse_field() {
                fields.push(field);
            }
        }
        fields
    }

    fn parse_field(&mut self) -> Option<Field> {
        // Embedded pointer field: `*pkg.Type` / `*Type`.
        if self.at(TokenKind::Star) {
            let ty = self.parse_type();
            self.eat_tag();
            return Some(Field {
                names: Vec::new(),
                ty,
                embedded: true,
            });
        }

        if !self.at(TokenKind::Ident) {
            self.error("expected field name or embedded type");
            self.skip_decl();
            return None;
        }

        let first = self.ident();
        let mut names = vec![first.clone()];
        while self.at(TokenKind::Comma) {
            self.bump();
            if self.at(TokenKind::Ident) {
                names.push(self.ident());
            } else {
                self.error("expected field name after `,`");
                break;
            }
        }

        if names.len() == 1 {
            // Qualified embedded field: `pkg.Type`.
            if self.at(TokenKind::Dot)
                && matches!(self.nth(1).map(|t| t.kind), Some(TokenKind::Ident))
            {
                self.bump();
                let name = self.ident();
                let ty = if self.at(TokenKind::LBracket) && !self.newline_before() {
                    self.skip_balanced_brackets();
                    TypeExpr::Opaque
                } else {
                    TypeExpr::Selector {
                        qualifier: first,
                        name,
                    }
                };
                self.eat_tag();
                return Some(Field {
                    names: Vec::new(),
                    ty,
                    embedded: true,
                });
            }

            // Named field when a type follows on the same line.
            if self.current().is_some_and(Self::starts_type) && !self.newline_before() {
                let ty = self.parse_type();
                self.eat_tag();
                return Some(Field {
                    names: vec![first.name],
                    ty,
                    embedded: false,
                });
            }

            // Plain embedded identifier.
            self.eat_tag();
            return Some(Field {
                names: Vec::new(),
                ty: TypeExpr::Ident(first),
                embedded: true,
            });
        }

        // Multiple names share one type: `a, b T`.
        let ty = self.parse_type();
        self.eat_tag();
        Some(Field {
            names: names.into_iter().map(|i| i.name).collect(),
            ty,
            embedded: false,
        })
    }

    fn eat_tag(&mut self) {
        if (self.at(TokenKind::Str) || self.at(TokenKind::RawStr)) && !self.newline_before() {
            self.bump();
        }
    }

    // =========================================================================
    // Interfaces
    // =========================================================================

    fn parse_interface_elems(&mut self) -> Vec<InterfaceElem> {
        let mut elems = Vec::new();
        loop {
            while self.eat(TokenKind::Semi) {}
            if self.eat(TokenKind::RBrace) || self.at_eof() {
                break;
            }

            // Method: `Name(params) results`.
            if self.at(TokenKind::Ident)
                && self
                    .nth(1)
                    .is_some_and(|t| t.kind == TokenKind::LParen && !t.newline_before)
                && !self.at_kw("func")
                && !self.at_kw("map")
                && !self.at_kw("chan")
            {
                let name = self.ident().name;
                let sig = self.parse_signature();
                elems.push(InterfaceElem::Method { name, sig });
                continue;
            }

            // Embedded interface or constraint element.
            if self.current().is_some_and(Self::starts_type) {
                let ty = self.parse_type();
                if self.at(TokenKind::Pipe) {
                    // Union element: recognized, dependency-free.
                    while self.eat(TokenKind::Pipe) {
                        let _ = self.parse_type();
                    }
                    elems.push(InterfaceElem::Embedded(TypeExpr::Opaque));
                } else {
                    elems.push(InterfaceElem::Embedded(ty));
                }
                continue;
            }

            self.error("expected interface element");
            self.skip_decl();
        }
        elems
    }

    // =========================================================================
    // Function signatures
    // =========================================================================

    fn parse_signature(&mut self) -> Signature {
        let mut sig = Signature::default();
        if !self.expect(TokenKind::LParen, "`(`") {
            return sig;
        }
        sig.params = self.parse_param_list();

        // Results: a parenthesized list or a single type on the same line.
        if self.at(TokenKind::LParen) && !self.newline_before() {
            self.bump();
            sig.results = self.parse_param_list();
        } else if self.current().is_some_and(Self::starts_type) && !self.newline_before() {
            sig.results = vec![self.parse_type()];
        }
        sig
    }

    /// Parses a parameter list after its `(`, consuming the closing `)`.
    /// Only types are kept. In a named list (`a, b int`), bare identifiers
    /// are parameter names, not types, and are dropped.
    fn parse_param_list(&mut self) -> Vec<TypeExpr> {
        // (was_bare_ident, type)
        let mut elems: Vec<(bool, TypeExpr)> = Vec::new();
        let mut saw_named = false;

        if self.eat(TokenKind::RParen) {
            return Vec::new();
        }

        loop {
            if self.at_eof() {
                break;
            }

            if self.at(TokenKind::Ident) && self.ident_begins_named_param() {
                self.bump(); // parameter name, dropped
                let ty = self.parse_param_type();
                saw_named = true;
                elems.push((false, ty));
            } else {
                let bare = self.at(TokenKind::Ident)
                    && matches!(
                        self.nth(1).map(|t| t.kind),
                        Some(TokenKind::Comma) | Some(TokenKind::RParen)
                    )
                    && !self.at_kw("map")
                    && !self.at_kw("chan")
                    && !self.at_kw("func")
                    && !self.at_kw("struct")
                    && !self.at_kw("interface");
                let ty = self.parse_param_type();
                elems.push((bare, ty));
            }

            if self.eat(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen, "`)`");
            break;
        }

        elems
            .into_iter()
            .filter(|(bare, _)| !(saw_named && *bare))
            .map(|(_, ty)| ty)
            .collect()
    }

    /// An identifier begins `name Type` when the next token can start a type
    /// but is not part of a type built from this identifier. A following `[`
    /// means `name []T` / `name [3]T` only when the bracket clearly opens a
    /// slice or fixed-length array; otherwise it is a generic instantiation
    /// of this identifier.
    fn ident_begins_named_param(&self) -> bool {
        if self.at_kw("map")
            || self.at_kw("chan")
            || self.at_kw("func")
            || self.at_kw("struct")
            || self.at_kw("interface")
        {
            return false;
        }
        let Some(next) = self.nth(1) else {
            return false;
        };
        match next.kind {
            TokenKind::LBracket => matches!(
                self.nth(2).map(|t| t.kind),
                Some(TokenKind::RBracket) | Some(TokenKind::Number)
            ),
            _ => Self::starts_type(next),
        }
    }

    fn parse_param_type(&mut self) -> TypeExpr {
        if self.eat(TokenKind::Ellipsis) {
            TypeExpr::Variadic(Box::new(self.parse_type()))
        } else {
            self.parse_type()
        }
    }
}
