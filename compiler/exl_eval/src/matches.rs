//! The `matches` primitive.
//!
//! Patterns use the host dialect: a delimiter, the regex body, the closing
//! delimiter, then modifier letters (`/^ab+c$/i`, `{\d+}`, `#a/b#`). The
//! body is handed to the `regex` crate, so constructs it does not support
//! (backreferences, lookaround) surface as compile failures.
//!
//! A malformed pattern is an `InvalidPattern` error returned through
//! `Result`; nothing is installed or torn down around the match, so a
//! failure leaves no state behind for the next evaluation.

use std::sync::OnceLock;

use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashMap;

use exl_value::errors::invalid_pattern;
use exl_value::ExprResult;

/// Compiled patterns kept before the cache is flushed.
const CACHE_CAPACITY: usize = 256;

static CACHE: OnceLock<RwLock<FxHashMap<String, Regex>>> = OnceLock::new();

fn cache() -> &'static RwLock<FxHashMap<String, Regex>> {
    CACHE.get_or_init(|| RwLock::new(FxHashMap::default()))
}

/// Whether `subject` matches the delimited `pattern`.
pub fn match_pattern(pattern: &str, subject: &str) -> ExprResult<bool> {
    Ok(compiled(pattern)?.is_match(subject))
}

/// Check that `pattern` compiles, without matching anything.
pub fn validate_pattern(pattern: &str) -> ExprResult<()> {
    compiled(pattern).map(drop)
}

fn compiled(pattern: &str) -> ExprResult<Regex> {
    if let Some(regex) = cache().read().get(pattern) {
        return Ok(regex.clone());
    }
    tracing::trace!(pattern, "compiling pattern");
    let regex = compile(pattern).map_err(|message| invalid_pattern(pattern, &message))?;
    let mut cache = cache().write();
    if cache.len() >= CACHE_CAPACITY {
        cache.clear();
    }
    cache.insert(pattern.to_string(), regex.clone());
    Ok(regex)
}

fn compile(pattern: &str) -> Result<Regex, String> {
    let parts = split(pattern)?;
    let mut source = parts.body;
    let mut anchored = false;
    let mut options = Options::default();
    for flag in parts.flags.chars() {
        match flag {
            'i' => options.case_insensitive = true,
            'm' => options.multi_line = true,
            's' => options.dot_all = true,
            'x' => options.extended = true,
            'U' => options.ungreedy = true,
            'A' => anchored = true,
            'u' | 'D' | 'n' | ' ' | '\n' | '\r' => {}
            other => return Err(format!("Unknown modifier '{other}'")),
        }
    }
    if anchored {
        source = format!("\\A(?:{source})");
    }
    RegexBuilder::new(&source)
        .case_insensitive(options.case_insensitive)
        .multi_line(options.multi_line)
        .dot_matches_new_line(options.dot_all)
        .ignore_whitespace(options.extended)
        .swap_greed(options.ungreedy)
        .build()
        .map_err(|err| format!("Compilation failed: {}", last_line(&err.to_string())))
}

#[derive(Default)]
struct Options {
    case_insensitive: bool,
    multi_line: bool,
    dot_all: bool,
    extended: bool,
    ungreedy: bool,
}

struct Parts<'a> {
    body: String,
    flags: &'a str,
}

/// Split `pattern` into its body and trailing modifiers.
fn split(pattern: &str) -> Result<Parts<'_>, String> {
    let trimmed = pattern.trim_start();
    let mut chars = trimmed.char_indices();
    let Some((_, open)) = chars.next() else {
        return Err("Empty regular expression".to_string());
    };
    if open.is_alphanumeric() || open == '\\' || open.is_whitespace() {
        return Err("Delimiter must not be alphanumeric or backslash".to_string());
    }
    let close = closing_delimiter(open);
    let start = open.len_utf8();

    let mut nesting = 0_usize;
    let mut escaped = false;
    let mut end = None;
    for (i, c) in chars {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == close && nesting == 0 {
            end = Some(i);
            break;
        } else if c == close {
            nesting = nesting.saturating_sub(1);
        } else if c == open && close != open {
            nesting = nesting.saturating_add(1);
        }
    }

    let Some(end) = end else {
        return Err(if close == open {
            format!("No ending delimiter '{close}' found")
        } else {
            format!("No ending matching delimiter '{close}' found")
        });
    };
    let (body, rest) = trimmed.split_at(end);
    let body = &body[start..];
    let flags = rest.strip_prefix(close).unwrap_or_default();
    Ok(Parts {
        body: unescape_delimiter(body, open, close),
        flags,
    })
}

fn closing_delimiter(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    }
}

/// Drop the escape on delimiter characters that mean nothing to the
/// regex engine, so `/a\/b/` matches `a/b`.
fn unescape_delimiter(body: &str, open: char, close: char) -> String {
    let plain = |c: char| (c == open || c == close) && !is_meta(c);
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) if plain(next) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn is_meta(c: char) -> bool {
    matches!(
        c,
        '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$' | '#' | '&'
            | '-' | '~'
    )
}

fn last_line(message: &str) -> &str {
    let line = message
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .unwrap_or(message);
    line.strip_prefix("error: ").unwrap_or(line)
}
