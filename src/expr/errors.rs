//! Error types for the expression module.
//!
//! These mirror the shape of the Kalix `functions::errors` module: plain
//! enums with hand-written `Display` impls, no derive-macro error crate.
//! Parsing and evaluation are kept as two distinct error families because
//! they are raised at two distinct points in a `ParsedFunction`'s
//! lifecycle and a caller handles them differently (a `ParseError` means
//! "fix the expression text"; an `EvalError` means "fix the inputs", with
//! the single exception of `ContractViolation`, which means "fix the
//! calling code").

use std::fmt;

/// Errors raised while normalizing or parsing an expression string.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Parentheses are not balanced, detected during normalization.
    Unbalanced { position: usize },

    /// A token appeared where the grammar did not expect one.
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
    },

    /// `()` or a comma-separated argument list contained an empty slot,
    /// e.g. `sin()` or `max(1, , 2)`.
    EmptySubexpression { position: usize },

    /// A name token did not resolve to a variable, a parameter, a
    /// catalogue function, or a reserved constant (`PI`, `E`).
    UnknownIdentifier { name: String, position: usize },

    /// A call-form name (`name(...)`) is not in the function catalogue.
    UnknownFunction { name: String, position: usize },

    /// A catalogue function or the `IF` conditional was called with the
    /// wrong number of arguments.
    ArityError {
        function: String,
        expected: String,
        got: usize,
        position: usize,
    },

    /// The parsed tree nests deeper than the configured maximum (default
    /// 256), guarding against pathological/adversarial input.
    MaxDepthExceeded { limit: usize, position: usize },

    /// `set_parameter_values` was called with a vector whose length does
    /// not match the parameter-names list.
    ParameterMismatch { expected: usize, got: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Unbalanced { position } => {
                write!(f, "unbalanced parentheses at position {position}")
            }
            ParseError::UnexpectedToken { expected, found, position } => {
                write!(f, "expected {expected} but found {found} at position {position}")
            }
            ParseError::EmptySubexpression { position } => {
                write!(f, "empty subexpression at position {position}")
            }
            ParseError::UnknownIdentifier { name, position } => {
                write!(f, "unknown identifier '{name}' at position {position}")
            }
            ParseError::UnknownFunction { name, position } => {
                write!(f, "unknown function '{name}' at position {position}")
            }
            ParseError::ArityError { function, expected, got, position } => {
                write!(
                    f,
                    "function '{function}' expects {expected} argument(s), found {got}, at position {position}"
                )
            }
            ParseError::MaxDepthExceeded { limit, position } => {
                write!(f, "expression nests deeper than the maximum of {limit}, near position {position}")
            }
            ParseError::ParameterMismatch { expected, got } => {
                write!(f, "parameter values length {got} does not match parameter names length {expected}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while evaluating an already-parsed tree.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A mathematical function or operator was evaluated outside its
    /// domain (negative `sqrt`, non-positive `ln`, division by zero, a
    /// non-boolean-like operand to a logical operator, …).
    DomainError { function: String, args: Vec<f64> },

    /// `evaluate` was called before a successful `parse`, or the `args`
    /// vector's length did not match the variable-names list. Not
    /// expected to be recoverable at runtime — it indicates the caller
    /// violated the API contract.
    ContractViolation { message: String },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DomainError { function, args } => {
                write!(f, "domain error in {function}({args:?})")
            }
            EvalError::ContractViolation { message } => {
                write!(f, "contract violation: {message}")
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Convenience union for the one-shot `expr::evaluate` free function,
/// which can fail at either parse time or evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    Parse(ParseError),
    Eval(EvalError),
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::Parse(e) => write!(f, "{e}"),
            ExprError::Eval(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ExprError {}

impl From<ParseError> for ExprError {
    fn from(e: ParseError) -> Self {
        ExprError::Parse(e)
    }
}

impl From<EvalError> for ExprError {
    fn from(e: EvalError) -> Self {
        ExprError::Eval(e)
    }
}
