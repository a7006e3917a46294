//! Binary and Unary Operators
//!
//! Operators keep their source spelling: `and` and `&&` are the same
//! operator, but the printer must give back what was written, so the
//! word/symbol choice rides along as a [`Spelling`].

use std::fmt;

/// How a logical operator was written.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Spelling {
    /// `and`, `or`, `not`
    Word,
    /// `&&`, `||`, `!`
    Symbol,
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Logical
    Or(Spelling),
    And(Spelling),

    // Bitwise
    BitOr,
    BitXor,
    BitAnd,

    // Comparison
    Equal,
    Identical,
    NotEqual,
    NotIdentical,
    Less,
    Greater,
    GreaterEqual,
    LessEqual,

    // Membership and text
    NotIn,
    In,
    Contains,
    StartsWith,
    EndsWith,
    Matches,

    // Other
    Range,

    // Arithmetic
    Add,
    Sub,
    Concat,
    Mul,
    Div,
    Mod,
    Pow,
    Shl,
    Shr,
}

impl BinaryOp {
    /// Every operator and spelling.
    pub const ALL: [BinaryOp; 31] = [
        Self::Or(Spelling::Word),
        Self::Or(Spelling::Symbol),
        Self::And(Spelling::Word),
        Self::And(Spelling::Symbol),
        Self::BitOr,
        Self::BitXor,
        Self::BitAnd,
        Self::Equal,
        Self::Identical,
        Self::NotEqual,
        Self::NotIdentical,
        Self::Less,
        Self::Greater,
        Self::GreaterEqual,
        Self::LessEqual,
        Self::NotIn,
        Self::In,
        Self::Contains,
        Self::StartsWith,
        Self::EndsWith,
        Self::Matches,
        Self::Range,
        Self::Add,
        Self::Sub,
        Self::Concat,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Pow,
        Self::Shl,
        Self::Shr,
    ];

    /// Source-level symbol, exactly as written.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Or(Spelling::Word) => "or",
            Self::Or(Spelling::Symbol) => "||",
            Self::And(Spelling::Word) => "and",
            Self::And(Spelling::Symbol) => "&&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Equal => "==",
            Self::Identical => "===",
            Self::NotEqual => "!=",
            Self::NotIdentical => "!==",
            Self::Less => "<",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::NotIn => "not in",
            Self::In => "in",
            Self::Contains => "contains",
            Self::StartsWith => "starts with",
            Self::EndsWith => "ends with",
            Self::Matches => "matches",
            Self::Range => "..",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Concat => "~",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::Shl => "<<",
            Self::Shr => ">>",
        }
    }

    /// Parse a source-level symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "or" => Self::Or(Spelling::Word),
            "||" => Self::Or(Spelling::Symbol),
            "and" => Self::And(Spelling::Word),
            "&&" => Self::And(Spelling::Symbol),
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "&" => Self::BitAnd,
            "==" => Self::Equal,
            "===" => Self::Identical,
            "!=" => Self::NotEqual,
            "!==" => Self::NotIdentical,
            "<" => Self::Less,
            ">" => Self::Greater,
            ">=" => Self::GreaterEqual,
            "<=" => Self::LessEqual,
            "not in" => Self::NotIn,
            "in" => Self::In,
            "contains" => Self::Contains,
            "starts with" => Self::StartsWith,
            "ends with" => Self::EndsWith,
            "matches" => Self::Matches,
            ".." => Self::Range,
            "+" => Self::Add,
            "-" => Self::Sub,
            "~" => Self::Concat,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            "**" => Self::Pow,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            _ => return None,
        };
        Some(op)
    }

    /// `and`/`or` in either spelling: the right operand may be skipped.
    pub const fn is_short_circuit(self) -> bool {
        matches!(self, Self::Or(_) | Self::And(_))
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `!` or `not`; fully synonymous.
    Not(Spelling),
    /// `+`, numeric identity.
    Pos,
    /// `-`
    Neg,
    /// `~`, bitwise complement.
    BitNot,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not(Spelling::Word) => "not",
            Self::Not(Spelling::Symbol) => "!",
            Self::Pos => "+",
            Self::Neg => "-",
            Self::BitNot => "~",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "not" => Some(Self::Not(Spelling::Word)),
            "!" => Some(Self::Not(Spelling::Symbol)),
            "+" => Some(Self::Pos),
            "-" => Some(Self::Neg),
            "~" => Some(Self::BitNot),
            _ => None,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[cfg(test)]
mod tests;
