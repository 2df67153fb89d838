use exprcalc::expr;
use exprcalc::expr::ParsedFunction;

fn main() {
    println!("Expression Engine Demo");
    println!("======================");

    println!("\n1. Basic arithmetic:");
    println!("2 + 3 * 4 = {}", expr::evaluate("2 + 3 * 4", &[]).unwrap());
    println!("(2 + 3) * 4 = {}", expr::evaluate("(2 + 3) * 4", &[]).unwrap());
    println!("2 ^ 3 ^ 2 = {}", expr::evaluate("2 ^ 3 ^ 2", &[]).unwrap());

    println!("\n2. Mathematical functions:");
    println!("sqrt(16) = {}", expr::evaluate("sqrt(16)", &[]).unwrap());
    println!("sin(0) = {}", expr::evaluate("sin(0)", &[]).unwrap());
    println!("abs(-5) = {}", expr::evaluate("abs(-5)", &[]).unwrap());
    println!("min(3, 7, 2) = {}", expr::evaluate("min(3, 7, 2)", &[]).unwrap());

    println!("\n3. Variables bound by position:");
    let mut temperature = ParsedFunction::new();
    temperature.set_variable_names(vec!["x".to_string(), "y".to_string()]);
    temperature.parse("x + y").unwrap();
    println!("x = 10, y = 5 -> x + y = {}", temperature.evaluate(&[10.0, 5.0]).unwrap());

    println!("\n4. Conditional expressions:");
    let mut warm_check = ParsedFunction::new();
    warm_check.set_variable_names(vec!["temperature".to_string()]);
    warm_check.parse("IF(temperature > 20, 100, 0)").unwrap();
    println!(
        "temperature = 25 -> IF(temperature > 20, 100, 0) = {}",
        warm_check.evaluate(&[25.0]).unwrap()
    );

    println!("\n5. Reaction-rate-style expression with parameters:");
    let mut dosing = ParsedFunction::new();
    dosing.set_variable_names(vec!["rainfall".to_string(), "evaporation".to_string()]);
    dosing.set_parameter_names(vec!["efficiency".to_string()]);
    dosing.set_parameter_values(vec![0.8]).unwrap();
    let expression = "IF(rainfall > evaporation, (rainfall - evaporation) * efficiency, 0)";
    dosing.parse(expression).unwrap();
    println!("Expression: {expression}");
    println!("rainfall = 15, evaporation = 8 -> {}", dosing.evaluate(&[15.0, 8.0]).unwrap());

    println!("\n6. Parse once, evaluate many times:");
    let mut sweep = ParsedFunction::new();
    sweep.set_variable_names(vec!["degrees".to_string()]);
    sweep.parse("SIN(degrees * PI / 180)").unwrap();
    for angle_degrees in [0.0, 30.0, 45.0, 60.0, 90.0] {
        let result = sweep.evaluate(&[angle_degrees]).unwrap();
        println!("sin({angle_degrees} deg) = {result:.4}");
    }

    println!("\n7. Constant folding:");
    let mut folded = ParsedFunction::new();
    folded.set_variable_names(vec!["x".to_string()]);
    folded.set_parameter_names(vec!["scale".to_string()]);
    folded.set_parameter_values(vec![2.0]).unwrap();
    folded.parse("x * (scale + 1)").unwrap();
    println!("dump (unsimplified tree still kept): {:?}", folded.dump());

    println!("\nDemo completed successfully!");
}
