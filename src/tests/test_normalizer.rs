use exprcalc::expr::normalizer::{self, AND, GE, IF, LE, MAX, MIN, MOD, NE, NOT, OR};

#[test]
fn folds_digraphs_to_surrogates() {
    let out = normalizer::normalize("a <= b >= c <> d", true).unwrap();
    assert_eq!(out, format!("a {LE} b {GE} c {NE} d"));
}

#[test]
fn folds_word_operators_with_boundaries() {
    let out = normalizer::normalize("a AND b OR NOT c", true).unwrap();
    assert_eq!(out, format!("a {AND} b {OR} {NOT} c"));
}

#[test]
fn does_not_fold_word_operators_inside_identifiers() {
    // ORANGE, STRAND, MODE must survive untouched.
    let out = normalizer::normalize("ORANGE + STRAND - MODE", true).unwrap();
    assert_eq!(out, "ORANGE + STRAND - MODE");
}

#[test]
fn call_form_keywords_fold_when_immediately_followed_by_paren() {
    let out = normalizer::normalize("IF(a, b, c) + MOD(x, y) + MIN(1, 2) + MAX(1, 2)", true).unwrap();
    assert_eq!(
        out,
        format!("{IF}(a, b, c) + {MOD}(x, y) + {MIN}(1, 2) + {MAX}(1, 2)")
    );
}

#[test]
fn call_form_keywords_fold_across_whitespace_before_the_paren() {
    // §4.2 step 3: word-tokens are replaced when followed by whitespace
    // *or* `(` — a space between the keyword and its argument list must
    // not prevent folding.
    let out = normalizer::normalize("IF (a, b, c)", true).unwrap();
    assert_eq!(out, format!("{IF} (a, b, c)"));

    let out = normalizer::normalize("MOD  (x, y)", true).unwrap();
    assert_eq!(out, format!("{MOD} (x, y)"));
}

#[test]
fn call_form_keyword_without_paren_is_left_as_identifier() {
    // "IF" used as a bare variable name (no trailing paren anywhere) is
    // not a keyword.
    let out = normalizer::normalize("IF + 1", true).unwrap();
    assert_eq!(out, "IF + 1");
}

#[test]
fn case_insensitive_mode_uppercases_the_whole_string() {
    let out = normalizer::normalize("sin(x) and y", false).unwrap();
    assert_eq!(out, format!("SIN(X) {AND} Y"));
}

#[test]
fn unbalanced_parens_detected() {
    assert!(normalizer::normalize("(a + b", true).is_err());
    assert!(normalizer::normalize("a + b)", true).is_err());
}

#[test]
fn unclosed_paren_reports_position_at_end_of_input() {
    use exprcalc::expr::errors::ParseError;
    match normalizer::normalize("sin(x", true) {
        Err(ParseError::Unbalanced { position }) => assert_eq!(position, 5),
        other => panic!("expected Unbalanced, got {other:?}"),
    }
}

#[test]
fn whitespace_runs_collapse_to_one_space() {
    let out = normalizer::normalize("a    +     b", true).unwrap();
    assert_eq!(out, "a + b");
}
