use std::collections::HashSet;

use crate::{
    ast::{
        ast::{Decl, DeclKind, FunDecl, ParamDecl, Program},
        expressions::{BinaryOperator, Binding, Expr, ExprKind, MatchCase, PatternBinding},
        types::{TypeExpr, TypeExprKind},
    },
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{
    environment::Environment,
    exhaustiveness::is_exhaustive,
    patterns::{ascribed_pattern_type, check_pattern},
    types::Type,
};

/// Checks a whole program.
///
/// Declarations are checked in source order into one top-level scope, then
/// `main` must be bound there and take exactly one parameter. The first
/// violation found is returned.
pub fn type_check(program: &Program) -> Result<(), Error> {
    let mut env = Environment::new();

    for decl in &program.decls {
        check_decl(&mut env, decl)?;
    }

    let main_type = env
        .get_variable("main")
        .ok_or_else(|| Error::new(ErrorImpl::MissingMain, program.span.clone()))?;

    if let Type::Fun(params, _) = main_type {
        if params.len() != 1 {
            let span = program
                .decls
                .iter()
                .find(|decl| matches!(&decl.kind, DeclKind::Fun(fun) if fun.name == "main"))
                .map(|decl| decl.span.clone())
                .unwrap_or_else(|| program.span.clone());

            return Err(Error::new(
                ErrorImpl::IncorrectArityOfMain {
                    arity: params.len(),
                },
                span,
            ));
        }
    }

    log::debug!("program is well-typed, main : {}", main_type);
    Ok(())
}

fn check_decl(env: &mut Environment, decl: &Decl) -> Result<(), Error> {
    match &decl.kind {
        DeclKind::Fun(fun) => check_fun_decl(env, fun),
        DeclKind::Unsupported { construct } => Err(Error::new(
            ErrorImpl::UnsupportedConstruct {
                construct: construct.clone(),
            },
            decl.span.clone(),
        )),
    }
}

/// Binds the function's name into `env` before its body is checked, so the
/// body and every later sibling can refer to it.
fn check_fun_decl(env: &mut Environment, fun: &FunDecl) -> Result<(), Error> {
    let param_types = resolve_params(&fun.params)?;

    let fun_type = match &fun.return_type {
        Some(return_type) => {
            let ret = resolve_type(return_type)?;
            env.declare_variable(&fun.name, Type::fun(param_types.clone(), ret.clone()));

            let body_env = fun_body_env(env, fun, &param_types)?;
            check_expr(&body_env, &fun.body, Some(&ret))?;
            Type::fun(param_types, ret)
        }
        None => {
            let body_env = fun_body_env(env, fun, &param_types)?;
            let ret = check_expr(&body_env, &fun.body, None)?;
            let fun_type = Type::fun(param_types, ret);
            env.declare_variable(&fun.name, fun_type.clone());
            fun_type
        }
    };

    log::debug!("checked function {} : {}", fun.name, fun_type);
    Ok(())
}

/// Scope of a function body: parameters first, then nested declarations.
fn fun_body_env(env: &Environment, fun: &FunDecl, param_types: &[Type]) -> Result<Environment, Error> {
    let mut body_env = env.child();
    for (param, param_type) in fun.params.iter().zip(param_types) {
        body_env.declare_variable(&param.name, param_type.clone());
    }
    for nested in &fun.nested_decls {
        check_decl(&mut body_env, nested)?;
    }

    Ok(body_env)
}

/// Resolves parameter types, rejecting a name declared twice.
fn resolve_params(params: &[ParamDecl]) -> Result<Vec<Type>, Error> {
    let mut seen = HashSet::new();

    params
        .iter()
        .map(|param| {
            if !seen.insert(param.name.as_str()) {
                return Err(Error::new(
                    ErrorImpl::DuplicateFunctionParameter {
                        name: param.name.clone(),
                    },
                    param.span.clone(),
                ));
            }
            resolve_type(&param.param_type)
        })
        .collect()
}

/// Turns a written type into a semantic one.
pub fn resolve_type(type_expr: &TypeExpr) -> Result<Type, Error> {
    let resolved = match &type_expr.kind {
        TypeExprKind::Bool => Type::Bool,
        TypeExprKind::Nat => Type::Nat,
        TypeExprKind::Unit => Type::Unit,
        TypeExprKind::Top => Type::Top,
        TypeExprKind::Bottom => Type::Bottom,
        TypeExprKind::Fun { params, ret } => Type::fun(
            params.iter().map(resolve_type).collect::<Result<_, _>>()?,
            resolve_type(ret)?,
        ),
        TypeExprKind::Tuple(items) => {
            Type::Tuple(items.iter().map(resolve_type).collect::<Result<_, _>>()?)
        }
        TypeExprKind::Record(fields) => {
            let mut seen = HashSet::new();
            let mut resolved = Vec::with_capacity(fields.len());
            for field in fields {
                if !seen.insert(field.label.as_str()) {
                    return Err(Error::new(
                        ErrorImpl::DuplicateRecordTypeFields {
                            label: field.label.clone(),
                        },
                        field.span.clone(),
                    ));
                }
                resolved.push((field.label.clone(), resolve_type(&field.field_type)?));
            }
            Type::Record(resolved)
        }
        TypeExprKind::List(item) => Type::list(resolve_type(item)?),
        TypeExprKind::Sum(left, right) => Type::sum(resolve_type(left)?, resolve_type(right)?),
        TypeExprKind::Variant(fields) => {
            let mut seen = HashSet::new();
            let mut resolved = Vec::with_capacity(fields.len());
            for field in fields {
                if !seen.insert(field.label.as_str()) {
                    return Err(Error::new(
                        ErrorImpl::DuplicateVariantTypeFields {
                            label: field.label.clone(),
                        },
                        field.span.clone(),
                    ));
                }
                let payload = field.payload.as_ref().map(resolve_type).transpose()?;
                resolved.push((field.label.clone(), payload));
            }
            Type::Variant(resolved)
        }
        TypeExprKind::Ref(inner) => Type::Ref(Box::new(resolve_type(inner)?)),
        TypeExprKind::Named(name) => {
            return Err(Error::new(
                ErrorImpl::UnsupportedConstruct {
                    construct: format!("type name {}", name),
                },
                type_expr.span.clone(),
            ))
        }
    };

    Ok(resolved)
}

/// Compares an independently inferred type with the caller's expectation.
fn expect_type(actual: Type, expected: Option<&Type>, span: &Span) -> Result<Type, Error> {
    match expected {
        Some(expected) if *expected != actual => Err(Error::new(
            ErrorImpl::UnexpectedTypeForExpression {
                expected: expected.clone(),
                actual,
            },
            span.clone(),
        )),
        _ => Ok(actual),
    }
}

pub fn infer_expr(env: &Environment, expr: &Expr) -> Result<Type, Error> {
    check_expr(env, expr, None)
}

/// Checks `expr` against `expected`, or infers its type when `expected` is `None`.
///
/// Returns the type of the expression, which equals `expected` whenever one
/// is given.
pub fn check_expr(env: &Environment, expr: &Expr, expected: Option<&Type>) -> Result<Type, Error> {
    let span = &expr.span;

    match &expr.kind {
        ExprKind::ConstTrue | ExprKind::ConstFalse => expect_type(Type::Bool, expected, span),
        ExprKind::ConstUnit => expect_type(Type::Unit, expected, span),
        ExprKind::ConstInt(_) => expect_type(Type::Nat, expected, span),
        ExprKind::Var(name) => expect_type(env.fetch_variable_type(name, span)?, expected, span),

        ExprKind::Succ(inner) | ExprKind::Pred(inner) => {
            check_expr(env, inner, Some(&Type::Nat))?;
            expect_type(Type::Nat, expected, span)
        }
        ExprKind::IsZero(inner) => {
            check_expr(env, inner, Some(&Type::Nat))?;
            expect_type(Type::Bool, expected, span)
        }
        ExprKind::NatRec { n, initial, step } => {
            check_expr(env, n, Some(&Type::Nat))?;
            let ret = check_expr(env, initial, expected)?;
            let step_type = Type::fun(vec![Type::Nat], Type::fun(vec![ret.clone()], ret.clone()));
            check_expr(env, step, Some(&step_type))?;
            Ok(ret)
        }
        ExprKind::Not(inner) => {
            check_expr(env, inner, Some(&Type::Bool))?;
            expect_type(Type::Bool, expected, span)
        }
        ExprKind::Binary {
            operator,
            left,
            right,
        } => {
            let actual = check_binary(env, *operator, left, right)?;
            expect_type(actual, expected, span)
        }
        ExprKind::If {
            condition,
            then_expr,
            else_expr,
        } => {
            check_expr(env, condition, Some(&Type::Bool))?;
            let then_type = check_expr(env, then_expr, expected)?;
            check_expr(env, else_expr, Some(&then_type))?;
            Ok(then_type)
        }

        ExprKind::Abstraction { params, body } => check_abstraction(env, expr, params, body, expected),
        ExprKind::Application {
            function,
            arguments,
        } => {
            let function_type = infer_expr(env, function)?;
            let (params, ret) = match function_type {
                Type::Fun(params, ret) => (params, ret),
                actual => {
                    return Err(Error::new(
                        ErrorImpl::NotAFunction { actual },
                        function.span.clone(),
                    ))
                }
            };

            if params.len() != arguments.len() {
                return Err(Error::new(
                    ErrorImpl::IncorrectNumberOfArguments {
                        expected: params.len(),
                        received: arguments.len(),
                    },
                    span.clone(),
                ));
            }
            for (argument, param) in arguments.iter().zip(&params) {
                check_expr(env, argument, Some(param))?;
            }

            expect_type(*ret, expected, span)
        }
        ExprKind::Fix(inner) => match expected {
            Some(expected) => {
                check_expr(env, inner, Some(&Type::fun(vec![expected.clone()], expected.clone())))?;
                Ok(expected.clone())
            }
            None => match infer_expr(env, inner)? {
                Type::Fun(params, ret) if params.len() == 1 && params[0] == *ret => Ok(*ret),
                actual => Err(Error::new(ErrorImpl::NotAFunction { actual }, inner.span.clone())),
            },
        },

        ExprKind::Tuple(items) => match expected {
            Some(expected) => {
                let item_types = expected.tuple_items(items.len(), span)?;
                for (item, item_type) in items.iter().zip(item_types) {
                    check_expr(env, item, Some(item_type))?;
                }
                Ok(expected.clone())
            }
            None => Ok(Type::Tuple(
                items
                    .iter()
                    .map(|item| infer_expr(env, item))
                    .collect::<Result<_, _>>()?,
            )),
        },
        ExprKind::DotTuple { expr: inner, index } => {
            let actual = infer_expr(env, inner)?;
            let items = match &actual {
                Type::Tuple(items) => items,
                _ => {
                    return Err(Error::new(
                        ErrorImpl::NotATuple {
                            actual: actual.clone(),
                        },
                        inner.span.clone(),
                    ))
                }
            };

            if *index == 0 || *index > items.len() {
                return Err(Error::new(
                    ErrorImpl::TupleIndexOutOfBounds {
                        index: *index,
                        actual: actual.clone(),
                    },
                    span.clone(),
                ));
            }

            expect_type(items[*index - 1].clone(), expected, span)
        }
        ExprKind::Record(bindings) => check_record(env, expr, bindings, expected),
        ExprKind::DotRecord { expr: inner, label } => {
            let actual = infer_expr(env, inner)?;
            if !matches!(actual, Type::Record(_)) {
                return Err(Error::new(ErrorImpl::NotARecord { actual }, inner.span.clone()));
            }

            match actual.record_field(label) {
                Some(field) => expect_type(field.clone(), expected, span),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedFieldAccess {
                        label: label.clone(),
                        actual: actual.clone(),
                    },
                    span.clone(),
                )),
            }
        }

        ExprKind::Inl(inner) | ExprKind::Inr(inner) => match expected {
            Some(expected @ Type::Sum(left, right)) => {
                let side: &Type = if matches!(expr.kind, ExprKind::Inl(_)) {
                    left.as_ref()
                } else {
                    right.as_ref()
                };
                check_expr(env, inner, Some(side))?;
                Ok(expected.clone())
            }
            Some(expected) => Err(Error::new(
                ErrorImpl::UnexpectedInjection {
                    expected: expected.clone(),
                },
                span.clone(),
            )),
            None => Err(Error::new(ErrorImpl::AmbiguousSumType, span.clone())),
        },
        ExprKind::Variant { label, payload } => match expected {
            Some(expected @ Type::Variant(_)) => {
                let payload_type = expected.variant_label(label, span)?;
                match (payload, payload_type) {
                    (Some(payload), Some(payload_type)) => {
                        check_expr(env, payload, Some(payload_type))?;
                    }
                    (Some(_), None) => {
                        return Err(Error::new(
                            ErrorImpl::UnexpectedDataForNullaryLabel {
                                label: label.clone(),
                            },
                            span.clone(),
                        ))
                    }
                    (None, Some(_)) => {
                        return Err(Error::new(
                            ErrorImpl::MissingDataForLabel {
                                label: label.clone(),
                            },
                            span.clone(),
                        ))
                    }
                    (None, None) => {}
                }
                Ok(expected.clone())
            }
            Some(expected) => Err(Error::new(
                ErrorImpl::UnexpectedVariant {
                    expected: expected.clone(),
                },
                span.clone(),
            )),
            None => Err(Error::new(ErrorImpl::AmbiguousVariantType, span.clone())),
        },

        ExprKind::List(items) => match expected {
            Some(expected @ Type::List(item_type)) => {
                for item in items {
                    check_expr(env, item, Some(item_type.as_ref()))?;
                }
                Ok(expected.clone())
            }
            Some(expected) => Err(Error::new(
                ErrorImpl::UnexpectedList {
                    expected: expected.clone(),
                },
                span.clone(),
            )),
            None => {
                let (first, rest) = items
                    .split_first()
                    .ok_or_else(|| Error::new(ErrorImpl::AmbiguousList, span.clone()))?;
                let item_type = infer_expr(env, first)?;
                for item in rest {
                    check_expr(env, item, Some(&item_type))?;
                }
                Ok(Type::list(item_type))
            }
        },
        ExprKind::ConsList { head, tail } => match expected {
            Some(expected @ Type::List(item_type)) => {
                check_expr(env, head, Some(item_type.as_ref()))?;
                check_expr(env, tail, Some(expected))?;
                Ok(expected.clone())
            }
            Some(expected) => Err(Error::new(
                ErrorImpl::UnexpectedList {
                    expected: expected.clone(),
                },
                span.clone(),
            )),
            None => {
                let list_type = Type::list(infer_expr(env, head)?);
                check_expr(env, tail, Some(&list_type))?;
                Ok(list_type)
            }
        },
        ExprKind::ListHead(inner) => match infer_expr(env, inner)? {
            Type::List(item_type) => expect_type(*item_type, expected, span),
            actual => Err(Error::new(ErrorImpl::NotAList { actual }, inner.span.clone())),
        },
        ExprKind::ListTail(inner) => match infer_expr(env, inner)? {
            list_type @ Type::List(_) => expect_type(list_type, expected, span),
            actual => Err(Error::new(ErrorImpl::NotAList { actual }, inner.span.clone())),
        },
        ExprKind::ListIsEmpty(inner) => match infer_expr(env, inner)? {
            Type::List(_) => expect_type(Type::Bool, expected, span),
            actual => Err(Error::new(ErrorImpl::NotAList { actual }, inner.span.clone())),
        },

        ExprKind::Let { bindings, body } => {
            let mut body_env = env.child();
            for PatternBinding { pattern, rhs, .. } in bindings {
                let rhs_type = infer_expr(&body_env, rhs)?;
                check_pattern(&mut body_env, pattern, &rhs_type)?;
            }
            check_expr(&body_env, body, expected)
        }
        ExprKind::LetRec { bindings, body } => {
            let mut body_env = env.child();
            for PatternBinding { pattern, rhs, .. } in bindings {
                let pattern_type = ascribed_pattern_type(pattern)?;
                check_pattern(&mut body_env, pattern, &pattern_type)?;
                check_expr(&body_env, rhs, Some(&pattern_type))?;
            }
            check_expr(&body_env, body, expected)
        }
        ExprKind::TypeAscription {
            expr: inner,
            ascribed,
        } => {
            let ascribed = resolve_type(ascribed)?;
            check_expr(env, inner, Some(&ascribed))?;
            expect_type(ascribed, expected, span)
        }
        ExprKind::Match { scrutinee, cases } => check_match(env, expr, scrutinee, cases, expected),

        ExprKind::Unsupported { construct } => Err(Error::new(
            ErrorImpl::UnsupportedConstruct {
                construct: construct.clone(),
            },
            span.clone(),
        )),
    }
}

fn check_binary(
    env: &Environment,
    operator: BinaryOperator,
    left: &Expr,
    right: &Expr,
) -> Result<Type, Error> {
    match operator {
        BinaryOperator::Add
        | BinaryOperator::Subtract
        | BinaryOperator::Multiply
        | BinaryOperator::Divide => {
            check_expr(env, left, Some(&Type::Nat))?;
            check_expr(env, right, Some(&Type::Nat))?;
            Ok(Type::Nat)
        }
        BinaryOperator::LessThan
        | BinaryOperator::LessThanOrEqual
        | BinaryOperator::GreaterThan
        | BinaryOperator::GreaterThanOrEqual => {
            check_expr(env, left, Some(&Type::Nat))?;
            check_expr(env, right, Some(&Type::Nat))?;
            Ok(Type::Bool)
        }
        BinaryOperator::Equal | BinaryOperator::NotEqual => {
            let left_type = infer_expr(env, left)?;
            check_expr(env, right, Some(&left_type))?;
            Ok(Type::Bool)
        }
        BinaryOperator::And | BinaryOperator::Or => {
            check_expr(env, left, Some(&Type::Bool))?;
            check_expr(env, right, Some(&Type::Bool))?;
            Ok(Type::Bool)
        }
    }
}

fn check_abstraction(
    env: &Environment,
    expr: &Expr,
    params: &[ParamDecl],
    body: &Expr,
    expected: Option<&Type>,
) -> Result<Type, Error> {
    let param_types = resolve_params(params)?;
    let mut body_env = env.child();
    for (param, param_type) in params.iter().zip(&param_types) {
        body_env.declare_variable(&param.name, param_type.clone());
    }

    match expected {
        Some(expected @ Type::Fun(expected_params, expected_ret)) => {
            if expected_params.len() != params.len() {
                return Err(Error::new(
                    ErrorImpl::UnexpectedNumberOfParametersInLambda {
                        expected: expected_params.len(),
                        received: params.len(),
                    },
                    expr.span.clone(),
                ));
            }

            for ((param, actual), expected_param) in
                params.iter().zip(param_types).zip(expected_params)
            {
                if actual != *expected_param {
                    return Err(Error::new(
                        ErrorImpl::UnexpectedTypeForParameter {
                            name: param.name.clone(),
                            expected: expected_param.clone(),
                            actual,
                        },
                        param.span.clone(),
                    ));
                }
            }

            check_expr(&body_env, body, Some(expected_ret.as_ref()))?;
            Ok(expected.clone())
        }
        Some(expected) => Err(Error::new(
            ErrorImpl::UnexpectedLambda {
                expected: expected.clone(),
            },
            expr.span.clone(),
        )),
        None => {
            let ret = infer_expr(&body_env, body)?;
            Ok(Type::fun(param_types, ret))
        }
    }
}

/// Record literals: duplicate labels are rejected first, then the label set
/// must match an expected record type exactly.
fn check_record(
    env: &Environment,
    expr: &Expr,
    bindings: &[Binding],
    expected: Option<&Type>,
) -> Result<Type, Error> {
    let mut seen = HashSet::new();
    for binding in bindings {
        if !seen.insert(binding.label.as_str()) {
            return Err(Error::new(
                ErrorImpl::DuplicateRecordFields {
                    label: binding.label.clone(),
                },
                binding.span.clone(),
            ));
        }
    }

    match expected {
        Some(expected @ Type::Record(fields)) => {
            for binding in bindings {
                if expected.record_field(&binding.label).is_none() {
                    return Err(Error::new(
                        ErrorImpl::UnexpectedRecordFields {
                            label: binding.label.clone(),
                            expected: expected.clone(),
                        },
                        binding.span.clone(),
                    ));
                }
            }
            if let Some((missing, _)) = fields.iter().find(|(label, _)| !seen.contains(label.as_str())) {
                return Err(Error::new(
                    ErrorImpl::MissingRecordFields {
                        label: missing.clone(),
                        expected: expected.clone(),
                    },
                    expr.span.clone(),
                ));
            }

            for binding in bindings {
                check_expr(env, &binding.value, expected.record_field(&binding.label))?;
            }
            Ok(expected.clone())
        }
        Some(expected) => Err(Error::new(
            ErrorImpl::UnexpectedRecord {
                expected: expected.clone(),
            },
            expr.span.clone(),
        )),
        None => Ok(Type::Record(
            bindings
                .iter()
                .map(|binding| {
                    infer_expr(env, &binding.value).map(|field| (binding.label.clone(), field))
                })
                .collect::<Result<_, _>>()?,
        )),
    }
}

/// Every case is checked in its own scope. Without an ambient expectation the
/// first case's type is expected of the rest. Exhaustiveness is decided once
/// all cases are well-typed.
fn check_match(
    env: &Environment,
    expr: &Expr,
    scrutinee: &Expr,
    cases: &[MatchCase],
    expected: Option<&Type>,
) -> Result<Type, Error> {
    if cases.is_empty() {
        return Err(Error::new(ErrorImpl::IllegalEmptyMatching, expr.span.clone()));
    }

    let scrutinee_type = infer_expr(env, scrutinee)?;
    let mut result = expected.cloned();

    for case in cases {
        let mut case_env = env.child();
        check_pattern(&mut case_env, &case.pattern, &scrutinee_type)?;
        let case_type = check_expr(&case_env, &case.body, result.as_ref())?;
        result.get_or_insert(case_type);
    }

    let patterns: Vec<_> = cases.iter().map(|case| &case.pattern).collect();
    if !is_exhaustive(&patterns, &scrutinee_type) {
        return Err(Error::new(
            ErrorImpl::NonexhaustiveMatchPatterns {
                scrutinee: scrutinee_type,
            },
            expr.span.clone(),
        ));
    }

    result.ok_or_else(|| Error::new(ErrorImpl::IllegalEmptyMatching, expr.span.clone()))
}
