use std::fmt::Display;

use thiserror::Error;

use crate::{type_checker::types::Type, Position, Span};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The conformance tag of the diagnostic, e.g. `ERROR_MISSING_MAIN`.
    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "ERROR_UNRECOGNISED_TOKEN",
            ErrorImpl::UnexpectedToken { .. } => "ERROR_UNEXPECTED_TOKEN",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "ERROR_UNEXPECTED_TOKEN",
            ErrorImpl::NumberParseError { .. } => "ERROR_NUMBER_PARSE",
            ErrorImpl::MissingMain => "ERROR_MISSING_MAIN",
            ErrorImpl::UndefinedVariable { .. } => "ERROR_UNDEFINED_VARIABLE",
            ErrorImpl::UnexpectedTypeForExpression { .. } => "ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION",
            ErrorImpl::NotAFunction { .. } => "ERROR_NOT_A_FUNCTION",
            ErrorImpl::NotATuple { .. } => "ERROR_NOT_A_TUPLE",
            ErrorImpl::NotARecord { .. } => "ERROR_NOT_A_RECORD",
            ErrorImpl::NotAList { .. } => "ERROR_NOT_A_LIST",
            ErrorImpl::UnexpectedLambda { .. } => "ERROR_UNEXPECTED_LAMBDA",
            ErrorImpl::UnexpectedTypeForParameter { .. } => "ERROR_UNEXPECTED_TYPE_FOR_PARAMETER",
            ErrorImpl::UnexpectedTuple { .. } => "ERROR_UNEXPECTED_TUPLE",
            ErrorImpl::UnexpectedRecord { .. } => "ERROR_UNEXPECTED_RECORD",
            ErrorImpl::UnexpectedVariant { .. } => "ERROR_UNEXPECTED_VARIANT",
            ErrorImpl::UnexpectedList { .. } => "ERROR_UNEXPECTED_LIST",
            ErrorImpl::UnexpectedInjection { .. } => "ERROR_UNEXPECTED_INJECTION",
            ErrorImpl::MissingRecordFields { .. } => "ERROR_MISSING_RECORD_FIELDS",
            ErrorImpl::UnexpectedRecordFields { .. } => "ERROR_UNEXPECTED_RECORD_FIELDS",
            ErrorImpl::UnexpectedFieldAccess { .. } => "ERROR_UNEXPECTED_FIELD_ACCESS",
            ErrorImpl::UnexpectedVariantLabel { .. } => "ERROR_UNEXPECTED_VARIANT_LABEL",
            ErrorImpl::TupleIndexOutOfBounds { .. } => "ERROR_TUPLE_INDEX_OUT_OF_BOUNDS",
            ErrorImpl::UnexpectedTupleLength { .. } => "ERROR_UNEXPECTED_TUPLE_LENGTH",
            ErrorImpl::AmbiguousSumType => "ERROR_AMBIGUOUS_SUM_TYPE",
            ErrorImpl::AmbiguousVariantType => "ERROR_AMBIGUOUS_VARIANT_TYPE",
            ErrorImpl::AmbiguousList => "ERROR_AMBIGUOUS_LIST",
            ErrorImpl::AmbiguousPatternType => "ERROR_AMBIGUOUS_PATTERN_TYPE",
            ErrorImpl::IllegalEmptyMatching => "ERROR_ILLEGAL_EMPTY_MATCHING",
            ErrorImpl::NonexhaustiveMatchPatterns { .. } => "ERROR_NONEXHAUSTIVE_MATCH_PATTERNS",
            ErrorImpl::UnexpectedPatternForType { .. } => "ERROR_UNEXPECTED_PATTERN_FOR_TYPE",
            ErrorImpl::DuplicateRecordFields { .. } => "ERROR_DUPLICATE_RECORD_FIELDS",
            ErrorImpl::DuplicateRecordTypeFields { .. } => "ERROR_DUPLICATE_RECORD_TYPE_FIELDS",
            ErrorImpl::DuplicateVariantTypeFields { .. } => "ERROR_DUPLICATE_VARIANT_TYPE_FIELDS",
            ErrorImpl::DuplicateRecordPatternFields { .. } => {
                "ERROR_DUPLICATE_RECORD_PATTERN_FIELDS"
            }
            ErrorImpl::DuplicateFunctionParameter { .. } => "ERROR_DUPLICATE_FUNCTION_PARAMETER",
            ErrorImpl::IncorrectArityOfMain { .. } => "ERROR_INCORRECT_ARITY_OF_MAIN",
            ErrorImpl::IncorrectNumberOfArguments { .. } => "ERROR_INCORRECT_NUMBER_OF_ARGUMENTS",
            ErrorImpl::UnexpectedNumberOfParametersInLambda { .. } => {
                "ERROR_UNEXPECTED_NUMBER_OF_PARAMETERS_IN_LAMBDA"
            }
            ErrorImpl::UnexpectedDataForNullaryLabel { .. } => {
                "ERROR_UNEXPECTED_DATA_FOR_NULLARY_LABEL"
            }
            ErrorImpl::MissingDataForLabel { .. } => "ERROR_MISSING_DATA_FOR_LABEL",
            ErrorImpl::UnexpectedNonNullaryVariantPattern { .. } => {
                "ERROR_UNEXPECTED_NON_NULLARY_VARIANT_PATTERN"
            }
            ErrorImpl::UnexpectedNullaryVariantPattern { .. } => {
                "ERROR_UNEXPECTED_NULLARY_VARIANT_PATTERN"
            }
            ErrorImpl::UnsupportedConstruct { .. } => "ERROR_UNSUPPORTED_CONSTRUCT",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => {
                ErrorTip::Suggestion(String::from("is the program well-formed Stella?"))
            }
            ErrorImpl::MissingMain => ErrorTip::Suggestion(String::from(
                "declare a function `fn main(n : Nat) -> Nat { ... }`",
            )),
            ErrorImpl::AmbiguousList => ErrorTip::Suggestion(String::from(
                "annotate the list with `as [T]` to fix its element type",
            )),
            ErrorImpl::AmbiguousSumType | ErrorImpl::AmbiguousVariantType => ErrorTip::Suggestion(
                String::from("annotate the expression with `as T` to fix its type"),
            ),
            ErrorImpl::AmbiguousPatternType => ErrorTip::Suggestion(String::from(
                "annotate the pattern with `as T` to fix its type",
            )),
            ErrorImpl::UnsupportedConstruct { .. } => ErrorTip::Suggestion(String::from(
                "this construct belongs to a language extension that is not checked",
            )),
            _ => ErrorTip::None,
        }
    }

    /// Formats the diagnostic the way the conformance driver prints it, quoting
    /// the offending source text when the span covers any.
    pub fn render(&self, source: &str) -> String {
        let mut output = format!(
            "Type Error Tag: [{}]\n{}",
            self.get_error_name(),
            self.internal_error
        );

        if let ErrorImpl::MissingMain = self.internal_error {
            return output;
        }

        let start = self.span.start.0 as usize;
        let end = self.span.end.0 as usize;
        if let Some(snippet) = source.get(start..end).filter(|s| !s.trim().is_empty()) {
            output.push_str("\nfor expression\n  ");
            output.push_str(snippet.trim());
        }

        output
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.get_error_name(), self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    #[error("missing main function")]
    MissingMain,
    #[error("undefined variable {name}")]
    UndefinedVariable { name: String },
    #[error("expected type\n  {expected}\nbut got\n  {actual}")]
    UnexpectedTypeForExpression { expected: Type, actual: Type },
    #[error("expected a function type but got\n  {actual}")]
    NotAFunction { actual: Type },
    #[error("expected a tuple type but got\n  {actual}")]
    NotATuple { actual: Type },
    #[error("expected a record type but got\n  {actual}")]
    NotARecord { actual: Type },
    #[error("expected a list type but got\n  {actual}")]
    NotAList { actual: Type },
    #[error("expected an expression of a non-function type\n  {expected}\nbut got an anonymous function")]
    UnexpectedLambda { expected: Type },
    #[error("expected type\n  {expected}\nbut got\n  {actual}\nfor parameter {name}")]
    UnexpectedTypeForParameter {
        name: String,
        expected: Type,
        actual: Type,
    },
    #[error("expected an expression of a non-tuple type\n  {expected}\nbut got a tuple")]
    UnexpectedTuple { expected: Type },
    #[error("expected an expression of a non-record type\n  {expected}\nbut got a record")]
    UnexpectedRecord { expected: Type },
    #[error("expected an expression of a non-variant type\n  {expected}\nbut got a variant")]
    UnexpectedVariant { expected: Type },
    #[error("expected an expression of a non-list type\n  {expected}\nbut got a list")]
    UnexpectedList { expected: Type },
    #[error("expected an expression of a non-sum type\n  {expected}\nbut got an injection")]
    UnexpectedInjection { expected: Type },
    #[error("missing field {label} for an expression of type\n  {expected}")]
    MissingRecordFields { label: String, expected: Type },
    #[error("unexpected field {label} for an expression of type\n  {expected}")]
    UnexpectedRecordFields { label: String, expected: Type },
    #[error("unexpected access to field {label} in a record of type\n  {actual}")]
    UnexpectedFieldAccess { label: String, actual: Type },
    #[error("unexpected label {label} for a variant type\n  {expected}")]
    UnexpectedVariantLabel { label: String, expected: Type },
    #[error("index {index} is out of bounds for a tuple of type\n  {actual}")]
    TupleIndexOutOfBounds { index: usize, actual: Type },
    #[error("expected a tuple of length {expected_length} of type\n  {expected}\nbut got a tuple of length {actual_length}")]
    UnexpectedTupleLength {
        expected_length: usize,
        actual_length: usize,
        expected: Type,
    },
    #[error("type inference for sum types is not supported")]
    AmbiguousSumType,
    #[error("type inference for variant types is not supported")]
    AmbiguousVariantType,
    #[error("type inference for empty lists is not supported")]
    AmbiguousList,
    #[error("cannot infer the type of a pattern without an ascription")]
    AmbiguousPatternType,
    #[error("match expression must have at least one case")]
    IllegalEmptyMatching,
    #[error("non-exhaustive patterns for an expression of type\n  {scrutinee}")]
    NonexhaustiveMatchPatterns { scrutinee: Type },
    #[error("unexpected pattern for an expression of type\n  {expected}")]
    UnexpectedPatternForType { expected: Type },
    #[error("duplicate field {label} in a record")]
    DuplicateRecordFields { label: String },
    #[error("duplicate field {label} in a record type")]
    DuplicateRecordTypeFields { label: String },
    #[error("duplicate label {label} in a variant type")]
    DuplicateVariantTypeFields { label: String },
    #[error("duplicate field {label} in a record pattern")]
    DuplicateRecordPatternFields { label: String },
    #[error("duplicate parameter {name}")]
    DuplicateFunctionParameter { name: String },
    #[error("main must take exactly one parameter, but takes {arity}")]
    IncorrectArityOfMain { arity: usize },
    #[error("expected {expected} arguments, received {received}")]
    IncorrectNumberOfArguments { expected: usize, received: usize },
    #[error("expected an anonymous function with {expected} parameters, but it has {received}")]
    UnexpectedNumberOfParametersInLambda { expected: usize, received: usize },
    #[error("unexpected data for nullary label {label}")]
    UnexpectedDataForNullaryLabel { label: String },
    #[error("missing data for label {label}")]
    MissingDataForLabel { label: String },
    #[error("unexpected non-nullary pattern for nullary label {label}")]
    UnexpectedNonNullaryVariantPattern { label: String },
    #[error("unexpected nullary pattern for label {label} that carries data")]
    UnexpectedNullaryVariantPattern { label: String },
    #[error("unsupported construct: {construct}")]
    UnsupportedConstruct { construct: String },
}
