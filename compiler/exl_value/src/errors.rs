//! Error types for evaluation, compilation, and printing.
//!
//! # Structured Error Categories
//!
//! `ExprErrorKind` carries the structured data of each failure. Factory
//! functions (e.g. [`division_by_zero`]) are the public API: they populate
//! both `kind` and the rendered `message`. [`ExprError::category`] folds the
//! kinds into the coarse categories callers usually branch on.

use std::fmt;

use exl_stack::DepthExceeded;

use crate::value::Value;

/// Result of evaluation.
pub type ExprResult<T = Value> = Result<T, ExprError>;

/// Typed error category for structured diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprErrorKind {
    // Lookup
    UnboundName {
        name: String,
    },
    UnknownFunction {
        name: String,
    },

    // Access
    PropertyOfNonObject {
        property: String,
        receiver: String,
    },
    MethodOfNonObject {
        method: String,
        receiver: String,
    },
    MethodNotCallable {
        method: String,
        class: String,
    },
    ItemOfNonArray {
        receiver: String,
    },

    // Arithmetic
    DivisionByZero,
    ModuloByZero,
    NegativeShift,

    // Syntax
    InvalidPattern {
        pattern: String,
        message: String,
    },
    /// A computed `matches` pattern that cannot be a string.
    PatternNotString,

    // Type
    UnsupportedOperands {
        op: String,
        left: String,
        right: String,
    },
    UnsupportedOperand {
        op: String,
        type_name: String,
    },
    IllegalOffset {
        type_name: String,
    },
    NotStringable {
        type_name: String,
    },

    // Call
    NotCallable {
        name: String,
        type_name: String,
    },
    ArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },

    // Limit
    NestingTooDeep {
        limit: usize,
    },
    RangeTooLarge {
        len: u64,
    },

    // Printer / compiler
    Unprintable {
        type_name: String,
    },

    /// Failure raised by host code (registry functions, host objects).
    Custom {
        message: String,
    },
}

impl fmt::Display for ExprErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundName { name } => write!(f, "Variable \"{name}\" is not defined."),
            Self::UnknownFunction { name } => {
                write!(f, "The function \"{name}\" does not exist.")
            }

            Self::PropertyOfNonObject { property, receiver } => write!(
                f,
                "Unable to get property \"{property}\" of non-object \"{receiver}\"."
            ),
            Self::MethodOfNonObject { method, receiver } => write!(
                f,
                "Unable to call method \"{method}\" of non-object \"{receiver}\"."
            ),
            Self::MethodNotCallable { method, class } => {
                write!(f, "Unable to call method \"{method}\" of object \"{class}\".")
            }
            Self::ItemOfNonArray { receiver } => {
                write!(f, "Unable to get an item of non-array \"{receiver}\".")
            }

            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::ModuloByZero => write!(f, "Modulo by zero."),
            Self::NegativeShift => write!(f, "Bit shift by negative number."),

            Self::InvalidPattern { pattern, message } => write!(
                f,
                "Regexp \"{pattern}\" passed to \"matches\" is not valid: {message}"
            ),

            Self::PatternNotString => {
                write!(f, "The regex passed to \"matches\" must be a string.")
            }

            Self::UnsupportedOperands { op, left, right } => {
                write!(f, "Unsupported operand types: {left} {op} {right}")
            }
            Self::UnsupportedOperand { op, type_name } => {
                write!(f, "Unsupported operand type: {op}{type_name}")
            }
            Self::IllegalOffset { type_name } => write!(f, "Illegal offset type: {type_name}"),
            Self::NotStringable { type_name } => {
                write!(f, "Object of type {type_name} could not be converted to string")
            }

            Self::NotCallable { name, type_name } => {
                write!(f, "Variable \"{name}\" of type {type_name} is not callable.")
            }
            Self::ArgumentCount {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }

            Self::NestingTooDeep { limit } => write!(
                f,
                "Expression nesting exceeds the maximum depth of {limit}."
            ),
            Self::RangeTooLarge { len } => {
                write!(f, "Range of {len} elements exceeds the maximum range size.")
            }

            Self::Unprintable { type_name } => {
                write!(f, "A constant of type {type_name} cannot be rendered as source.")
            }

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Coarse failure categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    UnboundName,
    UnknownFunction,
    Access,
    Arithmetic,
    Syntax,
    Type,
    Call,
    Limit,
    Host,
}

/// Evaluation, compilation, or printing error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExprError {
    /// Structured error category.
    pub kind: ExprErrorKind,
    /// Human-readable error message; equals `kind.to_string()`.
    pub message: String,
}

impl ExprError {
    /// Create a host error with just a message.
    ///
    /// Uses `Custom` kind. Prefer the factory functions when a structured
    /// kind exists.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: ExprErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: ExprErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    /// The coarse category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self.kind {
            ExprErrorKind::UnboundName { .. } => ErrorCategory::UnboundName,
            ExprErrorKind::UnknownFunction { .. } => ErrorCategory::UnknownFunction,
            ExprErrorKind::PropertyOfNonObject { .. }
            | ExprErrorKind::MethodOfNonObject { .. }
            | ExprErrorKind::MethodNotCallable { .. }
            | ExprErrorKind::ItemOfNonArray { .. } => ErrorCategory::Access,
            ExprErrorKind::DivisionByZero
            | ExprErrorKind::ModuloByZero
            | ExprErrorKind::NegativeShift => ErrorCategory::Arithmetic,
            ExprErrorKind::InvalidPattern { .. } | ExprErrorKind::PatternNotString => {
                ErrorCategory::Syntax
            }
            ExprErrorKind::UnsupportedOperands { .. }
            | ExprErrorKind::UnsupportedOperand { .. }
            | ExprErrorKind::IllegalOffset { .. }
            | ExprErrorKind::NotStringable { .. }
            | ExprErrorKind::Unprintable { .. } => ErrorCategory::Type,
            ExprErrorKind::NotCallable { .. } | ExprErrorKind::ArgumentCount { .. } => {
                ErrorCategory::Call
            }
            ExprErrorKind::NestingTooDeep { .. } | ExprErrorKind::RangeTooLarge { .. } => {
                ErrorCategory::Limit
            }
            ExprErrorKind::Custom { .. } => ErrorCategory::Host,
        }
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExprError {}

impl From<DepthExceeded> for ExprError {
    fn from(err: DepthExceeded) -> Self {
        nesting_too_deep(err.limit)
    }
}

// Lookup Errors

pub fn unbound_name(name: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::UnboundName {
        name: name.to_string(),
    })
}

pub fn unknown_function(name: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::UnknownFunction {
        name: name.to_string(),
    })
}

// Access Errors

/// `receiver` is the printed form of the receiver expression.
pub fn property_of_non_object(property: &str, receiver: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::PropertyOfNonObject {
        property: property.to_string(),
        receiver: receiver.to_string(),
    })
}

pub fn method_of_non_object(method: &str, receiver: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::MethodOfNonObject {
        method: method.to_string(),
        receiver: receiver.to_string(),
    })
}

pub fn method_not_callable(method: &str, class: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::MethodNotCallable {
        method: method.to_string(),
        class: class.to_string(),
    })
}

pub fn item_of_non_array(receiver: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::ItemOfNonArray {
        receiver: receiver.to_string(),
    })
}

// Arithmetic Errors

pub fn division_by_zero() -> ExprError {
    ExprError::from_kind(ExprErrorKind::DivisionByZero)
}

pub fn modulo_by_zero() -> ExprError {
    ExprError::from_kind(ExprErrorKind::ModuloByZero)
}

pub fn negative_shift() -> ExprError {
    ExprError::from_kind(ExprErrorKind::NegativeShift)
}

// Syntax Errors

/// `message` is the engine message with its generic prefix already removed.
pub fn invalid_pattern(pattern: &str, message: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::InvalidPattern {
        pattern: pattern.to_string(),
        message: message.to_string(),
    })
}

pub fn pattern_not_string() -> ExprError {
    ExprError::from_kind(ExprErrorKind::PatternNotString)
}

// Type Errors

pub fn unsupported_operands(op: &str, left: &str, right: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::UnsupportedOperands {
        op: op.to_string(),
        left: left.to_string(),
        right: right.to_string(),
    })
}

pub fn unsupported_operand(op: &str, type_name: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::UnsupportedOperand {
        op: op.to_string(),
        type_name: type_name.to_string(),
    })
}

pub fn illegal_offset(type_name: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::IllegalOffset {
        type_name: type_name.to_string(),
    })
}

pub fn not_stringable(type_name: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::NotStringable {
        type_name: type_name.to_string(),
    })
}

pub fn unprintable(type_name: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::Unprintable {
        type_name: type_name.to_string(),
    })
}

// Call Errors

pub fn not_callable(name: &str, type_name: &str) -> ExprError {
    ExprError::from_kind(ExprErrorKind::NotCallable {
        name: name.to_string(),
        type_name: type_name.to_string(),
    })
}

pub fn argument_count(name: &str, expected: usize, got: usize) -> ExprError {
    ExprError::from_kind(ExprErrorKind::ArgumentCount {
        name: name.to_string(),
        expected,
        got,
    })
}

// Limit Errors

pub fn nesting_too_deep(limit: usize) -> ExprError {
    ExprError::from_kind(ExprErrorKind::NestingTooDeep { limit })
}

pub fn range_too_large(len: u64) -> ExprError {
    ExprError::from_kind(ExprErrorKind::RangeTooLarge { len })
}
