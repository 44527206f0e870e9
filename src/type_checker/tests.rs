//! Unit tests for the type checker module.
//!
//! This module contains tests for:
//! - Structural type equality and printing
//! - Inference and checking of every expression form
//! - Pattern checking
//! - Exhaustiveness of match cases
//! - Declarations and the requirements on `main`

use crate::check_source;

use super::types::Type;

fn check(source: &str) -> Result<(), String> {
    check_source(source, Some("test.st".to_string()))
        .map(|_| ())
        .map_err(|error| error.get_error_name().to_string())
}

/// Wraps `body` as the body of `main(n : Nat) -> ret`.
fn check_main(ret: &str, body: &str) -> Result<(), String> {
    check(&format!(
        "language core;\nfn main(n : Nat) -> {} {{\n  return {}\n}}\n",
        ret, body
    ))
}

fn assert_tag(result: Result<(), String>, tag: &str) {
    assert_eq!(result, Err(tag.to_string()));
}

#[test]
fn test_record_equality_ignores_field_order() {
    let ab = Type::Record(vec![("a".to_string(), Type::Nat), ("b".to_string(), Type::Bool)]);
    let ba = Type::Record(vec![("b".to_string(), Type::Bool), ("a".to_string(), Type::Nat)]);
    let ac = Type::Record(vec![("a".to_string(), Type::Nat), ("c".to_string(), Type::Bool)]);

    assert_eq!(ab, ba);
    assert_ne!(ab, ac);
}

#[test]
fn test_variant_equality_ignores_label_order() {
    let some_none = Type::Variant(vec![("some".to_string(), Some(Type::Nat)), ("none".to_string(), None)]);
    let none_some = Type::Variant(vec![("none".to_string(), None), ("some".to_string(), Some(Type::Nat))]);
    let payload_differs = Type::Variant(vec![("none".to_string(), Some(Type::Unit)), ("some".to_string(), Some(Type::Nat))]);

    assert_eq!(some_none, none_some);
    assert_ne!(some_none, payload_differs);
}

#[test]
fn test_type_display() {
    let ty = Type::fun(
        vec![Type::list(Type::Nat), Type::sum(Type::Bool, Type::Unit)],
        Type::Tuple(vec![Type::Nat, Type::Bool]),
    );

    assert_eq!(ty.to_string(), "fn([Nat], (Bool + Unit)) -> {Nat, Bool}");
}

#[test]
fn test_tuple_length_helper() {
    let pair = Type::Tuple(vec![Type::Nat, Type::Nat]);

    assert!(pair.tuple_items(2, &crate::Span::null()).is_ok());
    let error = pair.tuple_items(3, &crate::Span::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "ERROR_UNEXPECTED_TUPLE_LENGTH");
    let error = Type::Nat.tuple_items(2, &crate::Span::null()).unwrap_err();
    assert_eq!(error.get_error_name(), "ERROR_UNEXPECTED_TUPLE");
}

#[test]
fn test_well_typed_identity_main() {
    assert_eq!(check_main("Nat", "n"), Ok(()));
}

#[test]
fn test_return_type_mismatch() {
    assert_tag(check_main("Bool", "0"), "ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION");
}

#[test]
fn test_missing_main() {
    assert_tag(
        check("language core;\nfn helper(n : Nat) -> Nat { return n }"),
        "ERROR_MISSING_MAIN",
    );
}

#[test]
fn test_incorrect_arity_of_main() {
    assert_tag(
        check("language core;\nfn main(a : Nat, b : Nat) -> Nat { return a }"),
        "ERROR_INCORRECT_ARITY_OF_MAIN",
    );
}

#[test]
fn test_undefined_variable() {
    assert_tag(check_main("Nat", "m"), "ERROR_UNDEFINED_VARIABLE");
}

#[test]
fn test_functions_see_earlier_siblings_and_themselves() {
    let source = "language core;
fn double(n : Nat) -> Nat { return Nat::rec(n, 0, fn(i : Nat) { return fn(acc : Nat) { return succ(succ(acc)) } }) }
fn count(n : Nat) -> Nat { return if Nat::iszero(n) then 0 else succ(count(Nat::pred(n))) }
fn main(n : Nat) -> Nat { return double(count(n)) }";

    assert_eq!(check(source), Ok(()));
}

#[test]
fn test_nested_declarations() {
    let source = "language core;
fn main(n : Nat) -> Bool {
  fn is_zero(m : Nat) -> Bool { return Nat::iszero(m) }
  return is_zero(n)
}";

    assert_eq!(check(source), Ok(()));
}

#[test]
fn test_duplicate_function_parameter() {
    assert_tag(
        check("language core;\nfn main(n : Nat, n : Nat) -> Nat { return n }"),
        "ERROR_DUPLICATE_FUNCTION_PARAMETER",
    );
}

#[test]
fn test_application_errors() {
    assert_tag(check_main("Nat", "n(0)"), "ERROR_NOT_A_FUNCTION");
    assert_tag(
        check_main("Nat", "(fn(x : Nat) { return x })(1, 2)"),
        "ERROR_INCORRECT_NUMBER_OF_ARGUMENTS",
    );
    assert_tag(
        check_main("Nat", "(fn(x : Nat) { return x })(true)"),
        "ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION",
    );
}

#[test]
fn test_lambda_against_expected_type() {
    assert_eq!(
        check_main("fn(Nat) -> Nat", "fn(x : Nat) { return succ(x) }"),
        Ok(())
    );
    assert_tag(
        check_main("Nat", "fn(x : Nat) { return x }"),
        "ERROR_UNEXPECTED_LAMBDA",
    );
    assert_tag(
        check_main("fn(Nat) -> Nat", "fn(x : Nat, y : Nat) { return x }"),
        "ERROR_UNEXPECTED_NUMBER_OF_PARAMETERS_IN_LAMBDA",
    );
    assert_tag(
        check_main("fn(Nat) -> Nat", "fn(x : Bool) { return n }"),
        "ERROR_UNEXPECTED_TYPE_FOR_PARAMETER",
    );
}

#[test]
fn test_fix() {
    assert_eq!(
        check_main("Nat", "fix(fn(f : fn(Nat) -> Nat) { return f })(n)"),
        Ok(())
    );
    assert_tag(
        check_main("Nat", "let f = fix(fn(x : Nat) { return true }) in n"),
        "ERROR_NOT_A_FUNCTION",
    );
    assert_tag(check_main("Nat", "let f = fix(n) in n"), "ERROR_NOT_A_FUNCTION");
    assert_tag(
        check_main("Nat", "fix(fn(x : Nat) { return true })"),
        "ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION",
    );
}

#[test]
fn test_tuples() {
    assert_eq!(check_main("Bool", "{n, true}.2"), Ok(()));
    assert_eq!(check_main("{Nat, Bool}", "{n, true}"), Ok(()));
    assert_tag(
        check_main("{Nat, Bool}", "{n, true, unit}"),
        "ERROR_UNEXPECTED_TUPLE_LENGTH",
    );
    assert_tag(check_main("Nat", "{n, true}"), "ERROR_UNEXPECTED_TUPLE");
    assert_tag(check_main("Nat", "{n, true}.3"), "ERROR_TUPLE_INDEX_OUT_OF_BOUNDS");
    assert_tag(check_main("Nat", "{n, true}.0"), "ERROR_TUPLE_INDEX_OUT_OF_BOUNDS");
    assert_tag(check_main("Nat", "n.1"), "ERROR_NOT_A_TUPLE");
}

#[test]
fn test_records() {
    assert_eq!(check_main("Nat", "{a = n, b = true}.a"), Ok(()));
    assert_eq!(check_main("{b : Bool, a : Nat}", "{a = n, b = true}"), Ok(()));
    assert_tag(
        check_main("Nat", "{a = n, a = true}.a"),
        "ERROR_DUPLICATE_RECORD_FIELDS",
    );
    assert_tag(
        check_main("{a : Nat}", "{a = n, b = true}"),
        "ERROR_UNEXPECTED_RECORD_FIELDS",
    );
    assert_tag(
        check_main("{a : Nat, b : Bool}", "{a = n}"),
        "ERROR_MISSING_RECORD_FIELDS",
    );
    assert_tag(check_main("Nat", "{a = n}"), "ERROR_UNEXPECTED_RECORD");
    assert_tag(check_main("Nat", "{a = n}.b"), "ERROR_UNEXPECTED_FIELD_ACCESS");
    assert_tag(check_main("Nat", "n.a"), "ERROR_NOT_A_RECORD");
}

#[test]
fn test_duplicate_type_labels() {
    assert_tag(
        check_main("{a : Nat, a : Nat}", "{a = n}"),
        "ERROR_DUPLICATE_RECORD_TYPE_FIELDS",
    );
    assert_tag(
        check_main("<| a : Nat, a |>", "<| a = n |>"),
        "ERROR_DUPLICATE_VARIANT_TYPE_FIELDS",
    );
}

#[test]
fn test_sums() {
    assert_eq!(check_main("Nat + Bool", "inl(n)"), Ok(()));
    assert_eq!(check_main("Nat + Bool", "inr(true)"), Ok(()));
    assert_tag(check_main("Nat + Bool", "inr(n)"), "ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION");
    assert_tag(check_main("Nat", "inl(n)"), "ERROR_UNEXPECTED_INJECTION");
    assert_tag(
        check_main("Nat", "match inl(n) { inl(x) => x | inr(y) => y }"),
        "ERROR_AMBIGUOUS_SUM_TYPE",
    );
}

#[test]
fn test_variants() {
    let ty = "<| some : Nat, none |>";

    assert_eq!(check_main(ty, "<| some = n |>"), Ok(()));
    assert_eq!(check_main(ty, "<| none |>"), Ok(()));
    assert_tag(check_main(ty, "<| other = n |>"), "ERROR_UNEXPECTED_VARIANT_LABEL");
    assert_tag(check_main(ty, "<| none = n |>"), "ERROR_UNEXPECTED_DATA_FOR_NULLARY_LABEL");
    assert_tag(check_main(ty, "<| some |>"), "ERROR_MISSING_DATA_FOR_LABEL");
    assert_tag(check_main("Nat", "<| some = n |>"), "ERROR_UNEXPECTED_VARIANT");
    assert_tag(
        check_main("Nat", "match <| some = n |> { <| some = x |> => x }"),
        "ERROR_AMBIGUOUS_VARIANT_TYPE",
    );
}

#[test]
fn test_lists() {
    assert_eq!(check_main("[Nat]", "[]"), Ok(()));
    assert_eq!(check_main("[Nat]", "[n, 0, succ(n)]"), Ok(()));
    assert_eq!(check_main("[Nat]", "cons(n, [])"), Ok(()));
    assert_eq!(check_main("Nat", "List::head([n, 1])"), Ok(()));
    assert_eq!(check_main("[Nat]", "List::tail(cons(n, [n]))"), Ok(()));
    assert_eq!(check_main("Bool", "List::isempty([n])"), Ok(()));
    assert_tag(check_main("Nat", "List::head([])"), "ERROR_AMBIGUOUS_LIST");
    assert_tag(check_main("Nat", "[n]"), "ERROR_UNEXPECTED_LIST");
    assert_tag(check_main("Nat", "cons(n, [])"), "ERROR_UNEXPECTED_LIST");
    assert_tag(check_main("Nat", "List::head(n)"), "ERROR_NOT_A_LIST");
    assert_tag(
        check_main("[Nat]", "[n, true]"),
        "ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION",
    );
}

#[test]
fn test_operators_and_if() {
    assert_eq!(check_main("Bool", "(n + 1 * 2 < n) and not(n == 0)"), Ok(()));
    assert_eq!(check_main("Nat", "if n <= 1 then n else n - 1"), Ok(()));
    assert_tag(check_main("Nat", "if n then 0 else 1"), "ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION");
    assert_tag(
        check_main("Nat", "if true then 0 else false"),
        "ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION",
    );
}

#[test]
fn test_let_and_ascription() {
    assert_eq!(check_main("Nat", "let x = succ(n), {a, b} = {x, true} in a"), Ok(()));
    assert_eq!(check_main("Nat", "let xs = [] as [Nat] in n"), Ok(()));
    assert_tag(check_main("Nat", "n as Bool"), "ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION");
    assert_tag(
        check_main("Nat", "let {a, b} = n in a"),
        "ERROR_UNEXPECTED_PATTERN_FOR_TYPE",
    );
}

#[test]
fn test_letrec() {
    assert_eq!(
        check_main(
            "Nat",
            "letrec f as fn(Nat) -> Nat = fn(m : Nat) { return if Nat::iszero(m) then 0 else f(Nat::pred(m)) } in f(n)",
        ),
        Ok(())
    );
    assert_tag(
        check_main("Nat", "letrec f = fn(m : Nat) { return m } in f(n)"),
        "ERROR_AMBIGUOUS_PATTERN_TYPE",
    );
}

#[test]
fn test_match_patterns() {
    assert_tag(check_main("Nat", "match n { }"), "ERROR_ILLEGAL_EMPTY_MATCHING");
    assert_tag(
        check_main("Nat", "match n { true => 0 | x => x }"),
        "ERROR_UNEXPECTED_PATTERN_FOR_TYPE",
    );
    assert_tag(
        check_main("Nat", "match n { 0 => true | x => x }"),
        "ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION",
    );

    let ty = "<| some : Nat, none |>";
    let scrutinee = format!("(<| none |> as {})", ty);
    assert_tag(
        check_main("Nat", &format!("match {} {{ <| some |> => 0 | <| none |> => 1 }}", scrutinee)),
        "ERROR_UNEXPECTED_NULLARY_VARIANT_PATTERN",
    );
    assert_tag(
        check_main("Nat", &format!("match {} {{ <| some = x |> => x | <| none = y |> => 1 }}", scrutinee)),
        "ERROR_UNEXPECTED_NON_NULLARY_VARIANT_PATTERN",
    );
}

#[test]
fn test_record_patterns() {
    let scrutinee = "{a = n, b = true}";

    assert_eq!(check_main("Nat", &format!("match {} {{ {{a = x}} => x }}", scrutinee)), Ok(()));
    assert_tag(
        check_main("Nat", &format!("match {} {{ {{a = x, a = y}} => x }}", scrutinee)),
        "ERROR_DUPLICATE_RECORD_PATTERN_FIELDS",
    );
    assert_tag(
        check_main("Nat", &format!("match {} {{ {{c = x}} => x }}", scrutinee)),
        "ERROR_UNEXPECTED_RECORD_FIELDS",
    );
}

#[test]
fn test_exhaustiveness_bool() {
    assert_tag(
        check_main("Nat", "match true { true => 0 }"),
        "ERROR_NONEXHAUSTIVE_MATCH_PATTERNS",
    );
    assert_eq!(check_main("Nat", "match true { true => 0 | false => 1 }"), Ok(()));
    assert_eq!(check_main("Nat", "match true { x => 0 }"), Ok(()));
}

#[test]
fn test_exhaustiveness_nat() {
    assert_eq!(check_main("Nat", "match n { 0 => 0 | 1 => 1 | m => m }"), Ok(()));
    assert_eq!(check_main("Nat", "match n { 0 => 0 | succ(m) => m }"), Ok(()));
    assert_eq!(
        check_main("Nat", "match n { 0 => 0 | 1 => 0 | succ(succ(m)) => m }"),
        Ok(())
    );
    assert_tag(
        check_main("Nat", "match n { 0 => 0 | 2 => 1 }"),
        "ERROR_NONEXHAUSTIVE_MATCH_PATTERNS",
    );
    assert_tag(
        check_main("Nat", "match n { 0 => 0 | succ(succ(m)) => m }"),
        "ERROR_NONEXHAUSTIVE_MATCH_PATTERNS",
    );
}

#[test]
fn test_exhaustiveness_variant() {
    let scrutinee = "(<| a = n |> as <| a : Nat, b : Bool |>)";

    assert_tag(
        check_main("Nat", &format!("match {} {{ <| a = x |> => x }}", scrutinee)),
        "ERROR_NONEXHAUSTIVE_MATCH_PATTERNS",
    );
    assert_eq!(
        check_main("Nat", &format!("match {} {{ <| a = x |> => x | <| b = y |> => 0 }}", scrutinee)),
        Ok(())
    );
    assert_eq!(
        check_main(
            "Nat",
            &format!("match {} {{ <| a = x |> => x | <| b = y |> => 0 | <| a = z |> => z }}", scrutinee),
        ),
        Ok(())
    );
    assert_tag(
        check_main("Nat", &format!("match {} {{ <| a = x |> => x | <| b = true |> => 0 }}", scrutinee)),
        "ERROR_NONEXHAUSTIVE_MATCH_PATTERNS",
    );
}

#[test]
fn test_exhaustiveness_sum_tuple_record_unit() {
    let sum = "(inl(n) as Nat + Bool)";
    assert_eq!(
        check_main("Nat", &format!("match {} {{ inl(x) => x | inr(b) => 0 }}", sum)),
        Ok(())
    );
    assert_tag(
        check_main("Nat", &format!("match {} {{ inl(x) => x }}", sum)),
        "ERROR_NONEXHAUSTIVE_MATCH_PATTERNS",
    );

    assert_eq!(
        check_main("Nat", "match {true, n} { {true, x} => x | {false, y} => y }"),
        Ok(())
    );
    assert_tag(
        check_main("Nat", "match {true, n} { {true, x} => x | {true, 0} => 0 }"),
        "ERROR_NONEXHAUSTIVE_MATCH_PATTERNS",
    );

    assert_eq!(
        check_main("Nat", "match {a = true} { {a = true} => 0 | {a = false} => 1 }"),
        Ok(())
    );
    assert_eq!(check_main("Nat", "match unit { unit => n }"), Ok(()));
}

#[test]
fn test_exhaustiveness_list() {
    assert_eq!(
        check_main("Nat", "match [n] { [] => 0 | cons(x, xs) => x }"),
        Ok(())
    );
    assert_eq!(
        check_main("Nat", "match [n] { [] => 0 | [x] => x | cons(x, cons(y, rest)) => y }"),
        Ok(())
    );
    assert_tag(
        check_main("Nat", "match [n] { cons(x, xs) => x }"),
        "ERROR_NONEXHAUSTIVE_MATCH_PATTERNS",
    );
    assert_tag(
        check_main("Nat", "match [n] { [] => 0 | cons(0, xs) => 1 }"),
        "ERROR_NONEXHAUSTIVE_MATCH_PATTERNS",
    );
    assert_tag(
        check_main("Nat", "match [n] { [] => 0 | [x] => x }"),
        "ERROR_NONEXHAUSTIVE_MATCH_PATTERNS",
    );
}

#[test]
fn test_exhaustiveness_functions_need_a_variable() {
    assert_tag(
        check_main("Nat", "match fn(x : Nat) { return x } { f as fn(Nat) -> Bool => 0 }"),
        "ERROR_UNEXPECTED_PATTERN_FOR_TYPE",
    );
    assert_eq!(
        check_main("Nat", "match fn(x : Nat) { return x } { f => f(n) }"),
        Ok(())
    );
}

#[test]
fn test_unsupported_constructs() {
    assert_tag(check_main("Nat", "*n"), "ERROR_UNSUPPORTED_CONSTRUCT");
    assert_tag(check_main("Nat", "panic!"), "ERROR_UNSUPPORTED_CONSTRUCT");
    assert_tag(
        check("language core;\ntype N = Nat\nfn main(n : Nat) -> Nat { return n }"),
        "ERROR_UNSUPPORTED_CONSTRUCT",
    );
    assert_tag(check_main("Pair", "n"), "ERROR_UNSUPPORTED_CONSTRUCT");
}

#[test]
fn test_checking_is_deterministic() {
    let source = "language core;\nfn main(n : Nat) -> Nat { return match n { 0 => 0 | 2 => 1 } }";

    let first = check(source);
    for _ in 0..5 {
        assert_eq!(check(source), first);
    }
}
