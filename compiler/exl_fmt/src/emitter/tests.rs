use super::*;

#[test]
fn string_emitter_basic() {
    let mut emitter = StringEmitter::with_capacity(16);
    emitter.emit("(1");
    emitter.emit(" + ");
    assert_eq!(emitter.as_str(), "(1 + ");
    emitter.emit("2)");
    assert_eq!(emitter.output(), "(1 + 2)");
}

#[test]
fn string_is_an_emitter() {
    let mut out = String::from("a");
    out.emit(".b");
    assert_eq!(out, "a.b");
}
