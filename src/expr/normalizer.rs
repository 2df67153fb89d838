//! Lexical normalization pass (§4.2).
//!
//! Kalix's parser tokenizes word-operators and multi-character comparison
//! operators token-by-token as part of its scanning loop
//! (`functions::parser::Parser::tokenize`). spec.md's splitting parser
//! (§4.3) instead scans the *raw character stream* for operator
//! occurrences at bracket depth 0, which only works cleanly when every
//! operator is exactly one character wide — a two-character token like
//! `<=` would otherwise be indistinguishable from a lone `<` followed by
//! `=` during a depth-0 scan, and a word token like `AND` would collide
//! with identifier characters inside words like `STRAND`.
//!
//! This module runs once, before parsing, and rewrites the expression
//! into a working copy where every word-operator and comparison digraph
//! has been replaced by a single private-use-area character. The parser
//! never sees the words `AND`/`OR`/`NOT`/`IF`/`MOD`/`MIN`/`MAX` or the
//! digraphs `<=`/`>=`/`<>` — only these surrogates.

use crate::expr::errors::ParseError;

/// Surrogate for the `AND` keyword.
pub const AND: char = '\u{E000}';
/// Surrogate for the `OR` keyword.
pub const OR: char = '\u{E001}';
/// Surrogate for the `NOT` keyword.
pub const NOT: char = '\u{E002}';
/// Surrogate for the `IF` keyword (only when followed by `(`, possibly
/// across whitespace).
pub const IF: char = '\u{E003}';
/// Surrogate for the `MOD` keyword (only when followed by `(`, possibly
/// across whitespace).
pub const MOD: char = '\u{E004}';
/// Surrogate for the `MIN` keyword (only when followed by `(`, possibly
/// across whitespace).
pub const MIN: char = '\u{E005}';
/// Surrogate for the `MAX` keyword (only when followed by `(`, possibly
/// across whitespace).
pub const MAX: char = '\u{E006}';
/// Surrogate for `<=`.
pub const LE: char = '\u{E007}';
/// Surrogate for `>=`.
pub const GE: char = '\u{E008}';
/// Surrogate for `<>`.
pub const NE: char = '\u{E009}';

const WORD_KEYWORDS: &[(&str, char)] = &[
    ("AND", AND),
    ("OR", OR),
    ("NOT", NOT),
    ("IF", IF),
    ("MOD", MOD),
    ("MIN", MIN),
    ("MAX", MAX),
];

/// Render a surrogate back to its source spelling, for error messages.
pub fn describe_char(c: char) -> String {
    match c {
        AND => "AND".to_string(),
        OR => "OR".to_string(),
        NOT => "NOT".to_string(),
        IF => "IF".to_string(),
        MOD => "MOD".to_string(),
        MIN => "MIN".to_string(),
        MAX => "MAX".to_string(),
        LE => "<=".to_string(),
        GE => ">=".to_string(),
        NE => "<>".to_string(),
        other => other.to_string(),
    }
}

fn is_boundary_before(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || c == '(' || c == ',',
    }
}

/// `IF`/`MOD`/`MIN`/`MAX` are call-form keywords: they only count as the
/// keyword when followed by `(`, skipping over any whitespace in between
/// (`IF (x > 0, 1, 0)` is still call-form), never as a bare infix token.
/// `AND`/`OR`/`NOT` have no such restriction — for those, whitespace
/// immediately after the word is itself a sufficient boundary.
fn is_boundary_after(chars: &[char], j: usize, requires_paren: bool) -> bool {
    if requires_paren {
        let mut k = j;
        while k < chars.len() && chars[k].is_whitespace() {
            k += 1;
        }
        return chars.get(k) == Some(&'(');
    }
    match chars.get(j) {
        None => true,
        Some(c) => c.is_whitespace() || *c == '(' || *c == ')' || *c == ',',
    }
}

/// Validate that parentheses are balanced, returning the byte position of
/// the first offending paren: an unmatched `)` is reported where it
/// occurs, but a still-open `(` at end of input is reported at the
/// position just past the last character — where the missing `)` was
/// expected and the input ran out — rather than at the `(` itself.
fn check_balanced(input: &str) -> Result<(), ParseError> {
    let mut stack: Vec<usize> = Vec::new();
    for (pos, ch) in input.char_indices() {
        match ch {
            '(' => stack.push(pos),
            ')' => {
                if stack.pop().is_none() {
                    return Err(ParseError::Unbalanced { position: pos });
                }
            }
            _ => {}
        }
    }
    if stack.pop().is_some() {
        return Err(ParseError::Unbalanced { position: input.chars().count() });
    }
    Ok(())
}

/// Normalize `input` into a working copy ready for parsing.
///
/// When `case_sensitive` is `false` the entire string is first upper-cased
/// (ASCII only — identifiers in this grammar are ASCII), so that later
/// catalogue/variable/parameter lookups can compare names directly without
/// re-folding case at every site. Word-operator and digraph recognition
/// itself is always case-insensitive: these are syntax, not identifiers.
pub fn normalize(input: &str, case_sensitive: bool) -> Result<String, ParseError> {
    check_balanced(input)?;

    let working: String = if case_sensitive {
        input.to_string()
    } else {
        input.to_ascii_uppercase()
    };

    let chars: Vec<char> = working.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            // Collapse runs of whitespace to a single space; boundary
            // checks above treat any whitespace as equivalent.
            if !matches!(out.chars().last(), Some(' ') | None) {
                out.push(' ');
            }
            i += 1;
            continue;
        }

        if c == '<' && chars.get(i + 1) == Some(&'=') {
            out.push(LE);
            i += 2;
            continue;
        }
        if c == '>' && chars.get(i + 1) == Some(&'=') {
            out.push(GE);
            i += 2;
            continue;
        }
        if c == '<' && chars.get(i + 1) == Some(&'>') {
            out.push(NE);
            i += 2;
            continue;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            let mut j = i;
            while j < chars.len() && (chars[j].is_ascii_alphanumeric() || chars[j] == '_') {
                j += 1;
            }
            let word: String = chars[start..j].iter().collect();
            let word_upper = word.to_ascii_uppercase();

            let matched = WORD_KEYWORDS.iter().find(|(kw, _)| *kw == word_upper);
            if let Some((_, surrogate)) = matched {
                let requires_paren = matches!(word_upper.as_str(), "IF" | "MOD" | "MIN" | "MAX");
                let prev = out.chars().last();
                if is_boundary_before(prev) && is_boundary_after(&chars, j, requires_paren) {
                    out.push(*surrogate);
                    i = j;
                    continue;
                }
            }

            // Not a keyword occurrence (or boundary failed, e.g. `ORANGE`,
            // `STRAND`, `MODE`): copy the identifier through untouched.
            out.push_str(&word);
            i = j;
            continue;
        }

        out.push(c);
        i += 1;
    }

    Ok(out)
}
