#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_symbols_round_trip() {
    for op in BinaryOp::ALL {
        assert_eq!(BinaryOp::from_symbol(op.as_symbol()), Some(op));
    }
    for symbol in ["not", "!", "+", "-", "~"] {
        let op = UnaryOp::from_symbol(symbol).unwrap();
        assert_eq!(op.as_symbol(), symbol);
    }
}

#[test]
fn test_spelling_is_preserved() {
    assert_eq!(BinaryOp::from_symbol("and"), Some(BinaryOp::And(Spelling::Word)));
    assert_eq!(BinaryOp::from_symbol("&&"), Some(BinaryOp::And(Spelling::Symbol)));
    assert_eq!(UnaryOp::Not(Spelling::Word).to_string(), "not");
    assert_eq!(UnaryOp::Not(Spelling::Symbol).to_string(), "!");
}

#[test]
fn test_unknown_symbols() {
    assert_eq!(BinaryOp::from_symbol("<>"), None);
    assert_eq!(BinaryOp::from_symbol("?:"), None);
    assert_eq!(UnaryOp::from_symbol("!!"), None);
}

#[test]
fn test_short_circuit_operators() {
    let short: Vec<&str> = BinaryOp::ALL
        .iter()
        .filter(|op| op.is_short_circuit())
        .map(|op| op.as_symbol())
        .collect();
    assert_eq!(short, vec!["or", "||", "and", "&&"]);
}
