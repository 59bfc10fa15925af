use smol_str::SmolStr;
use text_size::TextRange;

/// A parsed Go source file, reduced to what extraction needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceFile {
    /// Name from the `package` clause.
    pub package_name: SmolStr,
    pub imports: Vec<ImportSpec>,
    pub types: Vec<TypeDecl>,
}

/// One import line: `alias "path"` or `"path"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    /// Explicit alias as written, including `.` and `_` forms.
    pub alias: Option<SmolStr>,
    pub path: String,
}

/// One type declaration (`type Name ...` or one spec of a `type (...)` group).
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: SmolStr,
    pub expr: TypeExpr,
    /// Span of the spec text, from the name through the end of the type
    /// (struct tags included). Emission prints `type ` followed by this slice.
    pub span: TextRange,
    /// Span of the doc-comment group immediately preceding the declaration.
    pub doc: Option<TextRange>,
}

/// An identifier with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: SmolStr,
    pub span: TextRange,
}

/// The closed set of type-expression shapes the walker dispatches over.
///
/// Anything outside this set (generic instantiations, constraint unions,
/// `~T` elements) parses to [`TypeExpr::Opaque`], a terminal that yields no
/// type references.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// Bare identifier: builtin or same-package type name.
    Ident(Ident),
    /// Qualified identifier `alias.Name`: cross-package reference.
    Selector { qualifier: Ident, name: Ident },
    Pointer(Box<TypeExpr>),
    /// Arrays and slices; the length expression carries no type references.
    Array { elem: Box<TypeExpr> },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Struct { fields: Vec<Field> },
    Interface { elems: Vec<InterfaceElem> },
    Func(Signature),
    Chan { elem: Box<TypeExpr> },
    /// Variadic parameter element type (`...T`).
    Variadic(Box<TypeExpr>),
    /// Recognized but dependency-free syntax. Terminal.
    Opaque,
}

/// A struct field group: `a, b T`, or an embedded field when `names` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub names: Vec<SmolStr>,
    pub ty: TypeExpr,
    /// Embedded (anonymous) fields are walked identically to named ones.
    pub embedded: bool,
}

/// One element of an interface body.
#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceElem {
    /// Embedded interface (`io.Reader`, `Validator`).
    Embedded(TypeExpr),
    /// Method with its signature.
    Method { name: SmolStr, sig: Signature },
}

/// A function type's parameter and result types. Parameter names are not
/// retained; only the types matter for dependency discovery.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub params: Vec<TypeExpr>,
    pub results: Vec<TypeExpr>,
}
