use eyre::eyre;
use stele_ast::decl::{Declaration, Import, Let};
use stele_ast::expr::Literal;
use stele_ast::scope::Scope;
use stele_parsing::parse;
use stele_parsing::parser::{ParseErrorKind, Parser};
use stele_tokens::position::{Position, Positioned};
use stele_types::Type;
use test_log::test;

fn import_of(decl: Option<&Declaration>) -> eyre::Result<&Import> {
    match decl {
        Some(Declaration::Import(import)) => Ok(import),
        other => Err(eyre!("expected an import, found {other:?}")),
    }
}

#[test]
fn imports_must_come_first() -> eyre::Result<()> {
    let error = parse("let v = 3; import \"x\";".as_bytes()).unwrap_err();
    assert!(matches!(error.kind(), ParseErrorKind::ImportAfterDeclaration));
    assert_eq!(error.position(), Some(Position::new(1, 12)));

    let script = parse("import \"x\"; let v = 3;".as_bytes())?;
    assert!(script.get("x").is_some());
    assert!(script.get("v").is_some());
    Ok(())
}

#[test]
fn import_alias_defaults_to_basename() -> eyre::Result<()> {
    let script = parse("import \"something/else\";".as_bytes())?;
    let import = import_of(script.get("else"))?;
    assert_eq!(import.path(), "something/else");
    assert!(script.get("something/else").is_none());

    let script = parse("import \"something/else\" as foo;".as_bytes())?;
    let import = import_of(script.get("foo"))?;
    assert_eq!(import.name(), "foo");
    assert!(script.get("else").is_none());
    Ok(())
}

#[test]
fn new_lines_end_statements() -> eyre::Result<()> {
    let src = r#"
# imports
import "std/fmt"
import "std/io" as io2

let v = 3
let name! = "stele"
"#;
    let script = parse(src.as_bytes())?;
    let ids = script
        .declarations()
        .map(Declaration::id)
        .collect::<Vec<_>>();
    assert_eq!(ids, ["fmt", "io2", "v", "name!"]);
    assert_eq!(script.get("v").map(Positioned::position), Some(Position::new(6, 1)));
    Ok(())
}

#[test]
fn naming_conventions() -> eyre::Result<()> {
    let script = parse("let x! = 1; let _y = 2; let _z! = 3; let w = 4;".as_bytes())?;
    let flags = |id: &str| {
        script
            .get(id)
            .map(|decl| (decl.is_mutable(), decl.is_exported()))
    };
    assert_eq!(flags("x!"), Some((false, true)));
    assert_eq!(flags("_y"), Some((true, false)));
    assert_eq!(flags("_z!"), Some((false, false)));
    assert_eq!(flags("w"), Some((true, true)));
    Ok(())
}

#[test]
fn imports_have_no_type() -> eyre::Result<()> {
    let script = parse("import \"a/b\"\nlet c = 1.5\n".as_bytes())?;
    let import = script.get("b").ok_or_else(|| eyre!("b not declared"))?;
    assert!(!import.has_type());
    assert!(!import.is_mutable());
    assert!(!import.is_exported());
    let binding = script.get("c").ok_or_else(|| eyre!("c not declared"))?;
    assert!(binding.has_type());
    assert_eq!(binding.ty(), &Type::named("float"));
    Ok(())
}

#[test]
fn declarations_go_into_enclosing_scope() -> eyre::Result<()> {
    let prelude = Scope::root().add(Let::new(
        Position::default(),
        "answer",
        Type::named("int"),
        Literal::Int(42).into(),
    ));
    let script = Parser::builder()
        .enclosing_scope(prelude.clone())
        .build("let answer = 7;".as_bytes())
        .parse()?;

    let parent = script
        .scope()
        .parent()
        .ok_or_else(|| eyre!("script scope has no parent"))?;
    assert!(parent.ptr_eq(&prelude));
    assert_eq!(
        script.get("answer").map(Positioned::position),
        Some(Position::new(1, 1))
    );
    assert!(prelude.get("answer").is_some());
    Ok(())
}

#[test]
fn default_scope_is_child_of_root() -> eyre::Result<()> {
    let script = parse("let a = 1;".as_bytes())?;
    let enclosing = script
        .scope()
        .parent()
        .ok_or_else(|| eyre!("script scope has no parent"))?;
    assert_eq!(enclosing.local_ids().count(), 0);
    assert!(enclosing.parent().is_some_and(Scope::is_root));
    Ok(())
}

#[test]
fn later_declarations_shadow_earlier() -> eyre::Result<()> {
    let script = parse("let a = 1\nlet a = \"two\"\n".as_bytes())?;
    let decl = script.get("a").ok_or_else(|| eyre!("a not declared"))?;
    assert_eq!(decl.ty(), &Type::named("string"));
    assert_eq!(script.declarations().count(), 1);
    Ok(())
}

#[test]
fn lenient_end_of_input() -> eyre::Result<()> {
    let src = "import \"x\"\nlet v = 3";
    let error = parse(src.as_bytes()).unwrap_err();
    assert!(matches!(
        error.kind(),
        ParseErrorKind::UnexpectedEof { .. }
    ));

    let script = Parser::builder()
        .lenient_eof(true)
        .build(src.as_bytes())
        .parse()?;
    assert!(script.get("v").is_some());
    Ok(())
}

#[test]
fn parse_errors_are_reported_with_position() {
    let error = parse("let v = 3\nlet = 4\n".as_bytes()).unwrap_err();
    assert_eq!(error.position(), Some(Position::new(2, 5)));
    assert!(matches!(error.kind(), ParseErrorKind::ExpectedToken { .. }));
    assert_eq!(error.to_string(), "2:5: expected ident, got =");
}
