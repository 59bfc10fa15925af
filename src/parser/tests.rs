use super::parse;
use crate::syntax::{InterfaceElem, SourceFile, TypeDecl, TypeExpr};
use std::ops::Range;

fn parse_ok(source: &str) -> SourceFile {
    let parsed = parse(source);
    assert!(parsed.ok(), "parse errors: {:?}", parsed.errors);
    parsed.file
}

fn decl<'a>(file: &'a SourceFile, name: &str) -> &'a TypeDecl {
    file.types
        .iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| panic!("no type {name} in {:?}", file.types))
}

fn slice<'a>(source: &'a str, decl: &TypeDecl) -> &'a str {
    &source[Range::<usize>::from(decl.span)]
}

#[test]
fn package_clause_and_imports() {
    let file = parse_ok(
        "package api\n\nimport (\n\t\"fmt\"\n\tmetav1 \"k8s.io/apimachinery/pkg/apis/meta/v1\"\n)\n\nimport \"time\"\n",
    );
    assert_eq!(file.package_name, "api");
    assert_eq!(file.imports.len(), 3);
    assert_eq!(file.imports[0].path, "fmt");
    assert_eq!(file.imports[0].alias, None);
    assert_eq!(file.imports[1].path, "k8s.io/apimachinery/pkg/apis/meta/v1");
    assert_eq!(file.imports[1].alias.as_deref(), Some("metav1"));
    assert_eq!(file.imports[2].path, "time");
}

#[test]
fn struct_with_named_embedded_and_qualified_fields() {
    let source = "package api\n\ntype Application struct {\n\tName string `json:\"name\"`\n\tSpec ApplicationSpec\n\tStatus health.Status\n\t*Base\n\tmetav1.ObjectMeta\n}\n";
    let file = parse_ok(source);
    let app = decl(&file, "Application");
    let TypeExpr::Struct { fields } = &app.expr else {
        panic!("expected struct, got {:?}", app.expr);
    };
    assert_eq!(fields.len(), 5);

    assert_eq!(fields[0].names, vec!["Name"]);
    assert!(matches!(&fields[0].ty, TypeExpr::Ident(i) if i.name == "string"));

    assert_eq!(fields[1].names, vec!["Spec"]);
    assert!(matches!(&fields[1].ty, TypeExpr::Ident(i) if i.name == "ApplicationSpec"));

    assert_eq!(fields[2].names, vec!["Status"]);
    assert!(matches!(
        &fields[2].ty,
        TypeExpr::Selector { qualifier, name } if qualifier.name == "health" && name.name == "Status"
    ));

    assert!(fields[3].embedded);
    assert!(matches!(
        &fields[3].ty,
        TypeExpr::Pointer(inner) if matches!(&**inner, TypeExpr::Ident(i) if i.name == "Base")
    ));

    assert!(fields[4].embedded);
    assert!(matches!(
        &fields[4].ty,
        TypeExpr::Selector { qualifier, .. } if qualifier.name == "metav1"
    ));
}

#[test]
fn multiple_names_share_one_type() {
    let file = parse_ok("package p\n\ntype T struct {\n\tA, B, C int\n}\n");
    let TypeExpr::Struct { fields } = &decl(&file, "T").expr else {
        panic!()
    };
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].names, vec!["A", "B", "C"]);
}

#[test]
fn slices_arrays_maps_pointers_channels() {
    let source = "package p\n\ntype T struct {\n\tItems []Item\n\tGrid [16]Cell\n\tIndex map[string]*Entry\n\tEvents chan Event\n\tInbox <-chan Message\n}\n";
    let file = parse_ok(source);
    let TypeExpr::Struct { fields } = &decl(&file, "T").expr else {
        panic!()
    };
    assert!(matches!(
        &fields[0].ty,
        TypeExpr::Array { elem } if matches!(&**elem, TypeExpr::Ident(i) if i.name == "Item")
    ));
    assert!(matches!(
        &fields[1].ty,
        TypeExpr::Array { elem } if matches!(&**elem, TypeExpr::Ident(i) if i.name == "Cell")
    ));
    let TypeExpr::Map { key, value } = &fields[2].ty else {
        panic!()
    };
    assert!(matches!(&**key, TypeExpr::Ident(i) if i.name == "string"));
    assert!(matches!(
        &**value,
        TypeExpr::Pointer(inner) if matches!(&**inner, TypeExpr::Ident(i) if i.name == "Entry")
    ));
    assert!(matches!(&fields[3].ty, TypeExpr::Chan { .. }));
    assert!(matches!(&fields[4].ty, TypeExpr::Chan { .. }));
}

#[test]
fn interface_methods_and_embedding() {
    let source = "package p\n\ntype Doer interface {\n\tDo(ctx context.Context, opts ...Option) (Result, error)\n\tio.Reader\n\tValidator\n}\n";
    let file = parse_ok(source);
    let TypeExpr::Interface { elems } = &decl(&file, "Doer").expr else {
        panic!()
    };
    assert_eq!(elems.len(), 3);

    let InterfaceElem::Method { name, sig } = &elems[0] else {
        panic!("expected method, got {:?}", elems[0]);
    };
    assert_eq!(name, "Do");
    assert_eq!(sig.params.len(), 2);
    assert!(matches!(
        &sig.params[0],
        TypeExpr::Selector { qualifier, .. } if qualifier.name == "context"
    ));
    assert!(matches!(
        &sig.params[1],
        TypeExpr::Variadic(inner) if matches!(&**inner, TypeExpr::Ident(i) if i.name == "Option")
    ));
    assert_eq!(sig.results.len(), 2);

    assert!(matches!(
        &elems[1],
        InterfaceElem::Embedded(TypeExpr::Selector { qualifier, .. }) if qualifier.name == "io"
    ));
    assert!(matches!(
        &elems[2],
        InterfaceElem::Embedded(TypeExpr::Ident(i)) if i.name == "Validator"
    ));
}

#[test]
fn func_type_with_unnamed_and_named_params() {
    let file = parse_ok("package p\n\ntype Handler func(w ResponseWriter, r *Request) error\n");
    let TypeExpr::Func(sig) = &decl(&file, "Handler").expr else {
        panic!()
    };
    // Parameter names are dropped; only the types survive.
    assert_eq!(sig.params.len(), 2);
    assert!(matches!(&sig.params[0], TypeExpr::Ident(i) if i.name == "ResponseWriter"));
    assert!(matches!(&sig.params[1], TypeExpr::Pointer(_)));
    assert_eq!(sig.results.len(), 1);

    let file = parse_ok("package p\n\ntype Cmp func(Status, Status) int\n");
    let TypeExpr::Func(sig) = &decl(&file, "Cmp").expr else {
        panic!()
    };
    assert_eq!(sig.params.len(), 2);
    assert!(matches!(&sig.params[0], TypeExpr::Ident(i) if i.name == "Status"));
}

#[test]
fn named_param_list_drops_bare_name_idents() {
    // `a, b` are names here, not types.
    let file = parse_ok("package p\n\ntype F func(a, b int) bool\n");
    let TypeExpr::Func(sig) = &decl(&file, "F").expr else {
        panic!()
    };
    assert_eq!(sig.params.len(), 1);
    assert!(matches!(&sig.params[0], TypeExpr::Ident(i) if i.name == "int"));
}

#[test]
fn type_alias_declaration() {
    let source = "package p\n\ntype Alias = health.Status\n";
    let file = parse_ok(source);
    let alias = decl(&file, "Alias");
    assert!(matches!(
        &alias.expr,
        TypeExpr::Selector { qualifier, .. } if qualifier.name == "health"
    ));
    assert_eq!(slice(source, alias), "Alias = health.Status");
}

#[test]
fn grouped_type_declarations_with_docs() {
    let source = "package p\n\ntype (\n\t// Phase of the operation.\n\tPhase string\n\n\tRetry struct {\n\t\tLimit int\n\t}\n)\n";
    let file = parse_ok(source);
    assert_eq!(file.types.len(), 2);

    let phase = decl(&file, "Phase");
    assert_eq!(slice(source, phase), "Phase string");
    let doc = phase.doc.expect("doc comment attached");
    assert_eq!(&source[Range::<usize>::from(doc)], "// Phase of the operation.");

    assert!(decl(&file, "Retry").doc.is_none());
}

#[test]
fn doc_comment_and_span_cover_declaration_verbatim() {
    let source = "package p\n\n// Application models a deployed app.\n// Second line.\ntype Application struct {\n\tName string\n}\n\n// Detached because of the blank line below.\n\ntype Other int\n";
    let file = parse_ok(source);

    let app = decl(&file, "Application");
    let doc = app.doc.expect("doc attached");
    assert_eq!(
        &source[Range::<usize>::from(doc)],
        "// Application models a deployed app.\n// Second line."
    );
    assert_eq!(slice(source, app), "Application struct {\n\tName string\n}");

    assert!(decl(&file, "Other").doc.is_none());
}

#[test]
fn non_type_declarations_are_skipped() {
    let source = "package p\n\nconst DefaultLimit = 10\n\nvar registry = map[string]int{\n\t\"a\": 1,\n}\n\nfunc (t *T) Reset() {\n\tt.n = 0\n}\n\nfunc New() *T { return &T{} }\n\ntype T struct {\n\tn int\n}\n";
    let file = parse_ok(source);
    assert_eq!(file.types.len(), 1);
    assert_eq!(file.types[0].name, "T");
}

#[test]
fn generic_declarations_parse_and_instantiations_are_terminal() {
    let source = "package p\n\ntype List[T any] struct {\n\titems []T\n}\n\ntype Registry struct {\n\tentries List[string]\n}\n";
    let file = parse_ok(source);

    let TypeExpr::Struct { fields } = &decl(&file, "List").expr else {
        panic!()
    };
    assert_eq!(fields[0].names, vec!["items"]);

    let TypeExpr::Struct { fields } = &decl(&file, "Registry").expr else {
        panic!()
    };
    // A generic instantiation yields no type references.
    assert_eq!(fields[0].ty, TypeExpr::Opaque);
}

#[test]
fn constraint_unions_are_terminal() {
    let file = parse_ok("package p\n\ntype Number interface {\n\t~int | ~float64\n}\n");
    let TypeExpr::Interface { elems } = &decl(&file, "Number").expr else {
        panic!()
    };
    assert_eq!(elems.len(), 1);
    assert!(matches!(&elems[0], InterfaceElem::Embedded(TypeExpr::Opaque)));
}

#[test]
fn broken_code_still_yields_recovered_types() {
    // The stray tokens produce errors but the declaration that follows
    // still parses.
    let source = "package p\n\ntype Bad struct {\n\t123\n}\n\ntype Good struct {\n\tName string\n}\n";
    let parsed = parse(source);
    assert!(!parsed.ok());
    assert!(parsed.file.types.iter().any(|d| d.name == "Good"));
}
