//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - The language header and extensions
//! - Function declarations, nested and unsupported declarations
//! - Expressions and operator precedence
//! - Types and patterns
//! - Syntax errors

use std::rc::Rc;

use super::parser::parse;
use crate::{
    ast::{
        ast::{DeclKind, FunDecl, Program},
        expressions::{BinaryOperator, Expr, ExprKind},
        patterns::PatternKind,
        types::TypeExprKind,
    },
    errors::errors::Error,
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.st".to_string()))?;
    parse(tokens, Rc::new("test.st".to_string()))
}

fn first_fun(program: &Program) -> &FunDecl {
    match &program.decls[0].kind {
        DeclKind::Fun(fun) => fun,
        other => panic!("expected a function, got {:?}", other),
    }
}

fn main_body(body: &str) -> Expr {
    let source = format!("language core;\nfn main(x : Nat) -> Nat {{ return {} }}", body);
    let program = parse_source(&source).unwrap();
    *first_fun(&program).body.clone()
}

#[test]
fn test_parse_header_and_extensions() {
    let program = parse_source(
        "language core;\nextend with #natural-literals, #unit-type;\nextend with #sum-types;\n",
    )
    .unwrap();

    assert_eq!(program.language, "core");
    assert_eq!(
        program.extensions,
        vec!["#natural-literals", "#unit-type", "#sum-types"]
    );
    assert!(program.decls.is_empty());
}

#[test]
fn test_parse_missing_header() {
    let error = parse_source("fn main(x : Nat) -> Nat { return x }").unwrap_err();
    assert_eq!(error.get_error_name(), "ERROR_UNEXPECTED_TOKEN");
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_source(
        "language core;\nfn add(a : Nat, b : Nat) -> Nat { return a }\nfn main(n : Nat) -> Nat { return add(n, 1) }",
    )
    .unwrap();

    assert_eq!(program.decls.len(), 2);
    let add = first_fun(&program);
    assert_eq!(add.name, "add");
    assert_eq!(add.params.len(), 2);
    assert_eq!(add.params[1].name, "b");
    assert!(matches!(
        add.return_type.as_ref().map(|t| &t.kind),
        Some(TypeExprKind::Nat)
    ));
}

#[test]
fn test_parse_nested_and_inline_declarations() {
    let program = parse_source(
        "language core;\ninline fn main(n : Nat) -> Nat {\n  fn helper(x : Nat) -> Nat { return x }\n  return helper(n)\n}",
    )
    .unwrap();

    let main = first_fun(&program);
    assert!(main.is_inline);
    assert_eq!(main.nested_decls.len(), 1);
}

#[test]
fn test_parse_unsupported_declarations() {
    let program = parse_source(
        "language core;\ntype Pair = {Nat, Nat}\nexception type = Nat\ngeneric fn id[X](x : X) -> X { return x }",
    )
    .unwrap();

    assert_eq!(program.decls.len(), 3);
    for decl in &program.decls {
        assert!(matches!(decl.kind, DeclKind::Unsupported { .. }));
    }
}

#[test]
fn test_parse_operator_precedence() {
    let body = main_body("1 + 2 * 3 < 4");

    match body.kind {
        ExprKind::Binary {
            operator: BinaryOperator::LessThan,
            left,
            ..
        } => match left.kind {
            ExprKind::Binary {
                operator: BinaryOperator::Add,
                right,
                ..
            } => assert!(matches!(
                right.kind,
                ExprKind::Binary {
                    operator: BinaryOperator::Multiply,
                    ..
                }
            )),
            other => panic!("expected addition, got {:?}", other),
        },
        other => panic!("expected comparison, got {:?}", other),
    }
}

#[test]
fn test_parse_application_and_projection() {
    let body = main_body("f(x, 2).1.label");

    match body.kind {
        ExprKind::DotRecord { expr, label } => {
            assert_eq!(label, "label");
            match expr.kind {
                ExprKind::DotTuple { expr, index } => {
                    assert_eq!(index, 1);
                    match expr.kind {
                        ExprKind::Application { arguments, .. } => {
                            assert_eq!(arguments.len(), 2)
                        }
                        other => panic!("expected application, got {:?}", other),
                    }
                }
                other => panic!("expected tuple projection, got {:?}", other),
            }
        }
        other => panic!("expected record projection, got {:?}", other),
    }
}

#[test]
fn test_parse_tuple_record_and_empty_braces() {
    assert!(matches!(main_body("{1, true}").kind, ExprKind::Tuple(items) if items.len() == 2));
    assert!(matches!(main_body("{a = 1, b = x}").kind, ExprKind::Record(fields) if fields.len() == 2));
    assert!(matches!(main_body("{}").kind, ExprKind::Tuple(items) if items.is_empty()));
}

#[test]
fn test_parse_variants_and_lists() {
    assert!(matches!(
        main_body("<| some = 5 |>").kind,
        ExprKind::Variant { payload: Some(_), .. }
    ));
    assert!(matches!(
        main_body("<| none |>").kind,
        ExprKind::Variant { payload: None, .. }
    ));
    assert!(matches!(main_body("[]").kind, ExprKind::List(items) if items.is_empty()));
    assert!(matches!(main_body("cons(1, [2, 3])").kind, ExprKind::ConsList { .. }));
}

#[test]
fn test_parse_lambda_and_builtins() {
    assert!(matches!(
        main_body("fn(y : Nat, z : Bool) { return y }").kind,
        ExprKind::Abstraction { params, .. } if params.len() == 2
    ));
    assert!(matches!(main_body("Nat::rec(x, 0, f)").kind, ExprKind::NatRec { .. }));
    assert!(matches!(main_body("succ(Nat::pred(x))").kind, ExprKind::Succ(_)));
    assert!(matches!(main_body("List::head([x])").kind, ExprKind::ListHead(_)));
    assert!(matches!(main_body("fix(f)").kind, ExprKind::Fix(_)));
}

#[test]
fn test_parse_if_let_and_ascription() {
    assert!(matches!(
        main_body("if Nat::iszero(x) then 0 else succ(x)").kind,
        ExprKind::If { .. }
    ));
    assert!(matches!(
        main_body("let a = 1, b = 2 in a").kind,
        ExprKind::Let { bindings, .. } if bindings.len() == 2
    ));
    assert!(matches!(
        main_body("letrec f as fn(Nat) -> Nat = fn(n : Nat) { return n } in f(x)").kind,
        ExprKind::LetRec { .. }
    ));
    assert!(matches!(
        main_body("x as Nat").kind,
        ExprKind::TypeAscription { .. }
    ));
}

#[test]
fn test_parse_match_cases_and_patterns() {
    let body = main_body(
        "match x { 0 => 1 | succ(n) => n | <| a = {p, q} |> => p | cons(h, t) as [Nat] => h | {l = y} => y | (inl(z)) => z }",
    );

    match body.kind {
        ExprKind::Match { cases, .. } => {
            assert_eq!(cases.len(), 6);
            assert!(matches!(cases[0].pattern.kind, PatternKind::Int(0)));
            assert!(matches!(cases[1].pattern.kind, PatternKind::Succ(_)));
            assert!(matches!(cases[2].pattern.kind, PatternKind::Variant { .. }));
            assert!(matches!(cases[3].pattern.kind, PatternKind::Ascription { .. }));
            assert!(matches!(cases[4].pattern.kind, PatternKind::Record(_)));
            assert!(matches!(
                cases[5].pattern.strip_parens().kind,
                PatternKind::Inl(_)
            ));
        }
        other => panic!("expected match, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_match() {
    assert!(matches!(
        main_body("match x { }").kind,
        ExprKind::Match { cases, .. } if cases.is_empty()
    ));
}

#[test]
fn test_parse_types() {
    let program = parse_source(
        "language core;\nfn main(f : fn(Nat, Bool) -> {a : Nat, b : [Bool]}) -> <| l : Nat + Unit, r |> { return f }",
    )
    .unwrap();
    let main = first_fun(&program);

    match &main.params[0].param_type.kind {
        TypeExprKind::Fun { params, ret } => {
            assert_eq!(params.len(), 2);
            assert!(matches!(&ret.kind, TypeExprKind::Record(fields) if fields.len() == 2));
        }
        other => panic!("expected function type, got {:?}", other),
    }
    match &main.return_type.as_ref().unwrap().kind {
        TypeExprKind::Variant(fields) => {
            assert!(matches!(
                fields[0].payload.as_ref().map(|t| &t.kind),
                Some(TypeExprKind::Sum(_, _))
            ));
            assert!(fields[1].payload.is_none());
        }
        other => panic!("expected variant type, got {:?}", other),
    }
}

#[test]
fn test_parse_unsupported_expressions() {
    assert!(matches!(main_body("*x").kind, ExprKind::Unsupported { .. }));
    assert!(matches!(main_body("new(x)").kind, ExprKind::Unsupported { .. }));
    assert!(matches!(main_body("x := 1").kind, ExprKind::Unsupported { .. }));
    assert!(matches!(main_body("x; x").kind, ExprKind::Unsupported { .. }));
    assert!(matches!(main_body("panic!").kind, ExprKind::Unsupported { .. }));
}

#[test]
fn test_parse_terminating_semicolon() {
    assert!(matches!(main_body("x;").kind, ExprKind::Var(_)));
}

#[test]
fn test_parse_spans_cover_expression() {
    let body = main_body("succ(x)");
    let source_prefix = "language core;\nfn main(x : Nat) -> Nat { return ";

    assert_eq!(body.span.start.0 as usize, source_prefix.len());
    assert_eq!(body.span.end.0 as usize, source_prefix.len() + "succ(x)".len());
}

#[test]
fn test_parse_error_position() {
    let error = parse_source("language core;\nfn main(x : Nat) -> Nat { return }").unwrap_err();

    assert_eq!(error.get_error_name(), "ERROR_UNEXPECTED_TOKEN");
    assert_eq!(error.get_position().0 as usize, "language core;\nfn main(x : Nat) -> Nat { return ".len());
}
