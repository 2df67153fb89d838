use exprcalc::expr;
use exprcalc::expr::ParsedFunction;

fn make(variables: &[&str], parameters: &[&str], expression: &str) -> ParsedFunction {
    let mut pf = ParsedFunction::new();
    pf.set_variable_names(variables.iter().map(|s| s.to_string()).collect());
    pf.set_parameter_names(parameters.iter().map(|s| s.to_string()).collect());
    if !parameters.is_empty() {
        pf.set_parameter_values(vec![0.0; parameters.len()]).unwrap();
    }
    pf.parse(expression).unwrap();
    pf
}

#[test]
fn test_basic_arithmetic() {
    assert_eq!(expr::evaluate("2 + 3", &[]).unwrap(), 5.0);
    assert_eq!(expr::evaluate("10 - 4", &[]).unwrap(), 6.0);
    assert_eq!(expr::evaluate("3 * 7", &[]).unwrap(), 21.0);
    assert_eq!(expr::evaluate("15 / 3", &[]).unwrap(), 5.0);
    assert_eq!(expr::evaluate("2 ^ 3", &[]).unwrap(), 8.0);
}

#[test]
fn test_operator_precedence() {
    assert_eq!(expr::evaluate("2 + 3 * 4", &[]).unwrap(), 14.0);
    assert_eq!(expr::evaluate("2 * 3 ^ 2", &[]).unwrap(), 18.0);
    assert_eq!(expr::evaluate("(2 + 3) * 4", &[]).unwrap(), 20.0);
}

#[test]
fn test_variables_bound_by_position() {
    let pf = make(&["x", "y"], &[], "x + y");
    assert_eq!(pf.evaluate(&[5.0, 3.0]).unwrap(), 8.0);

    let pf = make(&["x", "y"], &[], "x * y");
    assert_eq!(pf.evaluate(&[5.0, 3.0]).unwrap(), 15.0);

    let pf = make(&["x", "y"], &[], "x ^ y");
    assert_eq!(pf.evaluate(&[5.0, 3.0]).unwrap(), 125.0);
}

#[test]
fn test_mathematical_functions() {
    assert_eq!(expr::evaluate("ABS(-5)", &[]).unwrap(), 5.0);
    assert_eq!(expr::evaluate("SQRT(16)", &[]).unwrap(), 4.0);
    assert_eq!(expr::evaluate("MIN(3, 7, 2)", &[]).unwrap(), 2.0);
    assert_eq!(expr::evaluate("MAX(3, 7, 2)", &[]).unwrap(), 7.0);
    assert_eq!(expr::evaluate("IF(1, 100, 200)", &[]).unwrap(), 100.0);
    assert_eq!(expr::evaluate("IF(0, 100, 200)", &[]).unwrap(), 200.0);
}

#[test]
fn test_comparison_operators() {
    assert_eq!(expr::evaluate("5 > 3", &[]).unwrap(), 1.0);
    assert_eq!(expr::evaluate("3 > 5", &[]).unwrap(), 0.0);
    assert_eq!(expr::evaluate("5 = 5", &[]).unwrap(), 1.0);
    assert_eq!(expr::evaluate("5 <> 3", &[]).unwrap(), 1.0);
}

#[test]
fn test_logical_operators() {
    assert_eq!(expr::evaluate("1 AND 1", &[]).unwrap(), 1.0);
    assert_eq!(expr::evaluate("1 AND 0", &[]).unwrap(), 0.0);
    assert_eq!(expr::evaluate("1 OR 0", &[]).unwrap(), 1.0);
    assert_eq!(expr::evaluate("NOT 0", &[]).unwrap(), 1.0);
    assert_eq!(expr::evaluate("NOT 1", &[]).unwrap(), 0.0);
}

#[test]
fn test_complex_expressions() {
    let pf = make(&["x", "y", "z"], &[], "(x + y) * z");
    assert_eq!(pf.evaluate(&[10.0, 5.0, 2.0]).unwrap(), 30.0);

    let pf = make(&["x", "y"], &[], "IF(x > y, x * 2, y * 2)");
    assert_eq!(pf.evaluate(&[10.0, 5.0]).unwrap(), 20.0);

    let pf = make(&["x", "y", "z"], &[], "SQRT(x) + ABS(y - z * 5)");
    let result = pf.evaluate(&[10.0, 5.0, 2.0]).unwrap();
    assert!((result - (10.0_f64.sqrt() + (5.0_f64 - 10.0_f64).abs())).abs() < 1e-10);
}

#[test]
fn test_trigonometric_functions() {
    let result = expr::evaluate("SIN(0)", &[]).unwrap();
    assert!((result - 0.0).abs() < 1e-10);

    let result = expr::evaluate("COS(0)", &[]).unwrap();
    assert!((result - 1.0).abs() < 1e-10);

    let pi_half = std::f64::consts::PI / 2.0;
    let expression = format!("SIN({pi_half})");
    let result = expr::evaluate(&expression, &[]).unwrap();
    assert!((result - 1.0).abs() < 1e-10);
}

#[test]
fn test_error_handling() {
    // Unbound identifier errors.
    assert!(expr::evaluate("x + 5", &[]).is_err());

    // Division by zero errors.
    assert!(expr::evaluate("5 / 0", &[]).is_err());

    // Square root of a negative number errors.
    assert!(expr::evaluate("SQRT(-1)", &[]).is_err());

    // Invalid syntax errors.
    assert!(expr::parse("2 + * 3").is_err());
}

#[test]
fn test_variable_extraction() {
    let pf = make(&["x", "y", "z"], &[], "x + y * SIN(z)");
    let variables = pf.variable_names();
    assert_eq!(variables.len(), 3);
    assert!(variables.contains(&"x".to_string()));
    assert!(variables.contains(&"y".to_string()));
    assert!(variables.contains(&"z".to_string()));
}

#[test]
fn test_edge_cases() {
    // SUM accepts zero or more arguments; MIN requires at least two.
    assert!(expr::evaluate("SUM()", &[]).is_ok());
    assert!(expr::evaluate("MIN()", &[]).is_err());

    // Single number.
    assert_eq!(expr::evaluate("42", &[]).unwrap(), 42.0);

    // Unary operators.
    assert_eq!(expr::evaluate("-5", &[]).unwrap(), -5.0);
    assert_eq!(expr::evaluate("+7", &[]).unwrap(), 7.0);

    // Nested function calls.
    assert_eq!(expr::evaluate("ABS(SIN(0))", &[]).unwrap(), 0.0);
}

#[test]
fn test_parameters_alongside_variables() {
    let mut pf = make(&["x"], &["rate"], "x * rate");
    pf.set_parameter_values(vec![1.5]).unwrap();
    pf.refresh_simplified();
    assert_eq!(pf.evaluate(&[4.0]).unwrap(), 6.0);
}
