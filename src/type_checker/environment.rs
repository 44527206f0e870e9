use std::collections::HashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::types::Type;

/// Lexical scope: maps variable names to their types.
///
/// Nested scopes use the `child()` clone pattern. A function body, a lambda,
/// a `let` and every match case work on their own child, so bindings they
/// introduce are visible to later siblings inside that construct only.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variable_lookup: HashMap<String, Type>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variable_lookup: HashMap::new(),
        }
    }

    /// Binds `name`, shadowing any earlier binding of the same name.
    pub fn declare_variable(&mut self, name: &str, variable_type: Type) {
        self.variable_lookup.insert(name.to_string(), variable_type);
    }

    pub fn get_variable(&self, name: &str) -> Option<&Type> {
        self.variable_lookup.get(name)
    }

    pub fn fetch_variable_type(&self, name: &str, span: &Span) -> Result<Type, Error> {
        self.get_variable(name).cloned().ok_or_else(|| {
            Error::new(
                ErrorImpl::UndefinedVariable {
                    name: name.to_string(),
                },
                span.clone(),
            )
        })
    }

    pub fn child(&self) -> Environment {
        self.clone()
    }
}
