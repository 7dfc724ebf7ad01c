use lmath::{
    evaluate_document,
    interpreter::{Interpreter, value::core::Value},
    literate::{
        engine::{Engine, EngineNode},
        scope::Scope,
    },
};
use pretty_assertions::assert_eq;

/// Evaluates the bodies in order and returns what the last one renders.
fn render(bodies: &[&str]) -> String {
    let chain = evaluate_document(bodies);
    chain.blocks()
         .last()
         .map(|block| block.rendered().to_string())
         .unwrap_or_default()
}

fn eval(formula: &str) -> Value {
    let node = Interpreter.parse(formula).unwrap();
    node.evaluate(&mut Scope::new()).unwrap()
}

#[test]
fn units_combine_and_pick_a_prefix() {
    assert_eq!(render(&["= 3 m + 20 cm"]), "3.2 m");
    assert_eq!(render(&["= 2 km * 3"]), "6 km");
    assert_eq!(render(&["= 1500 m"]), "1.5 km");
    assert_eq!(render(&["= 10 / 2 s"]), "5 Hz");
}

#[test]
fn implicit_multiplication_binds_tighter_than_division() {
    assert_eq!(eval("2 km / 500 m"), Value::Number(4.0));
    assert_eq!(eval("6 / 2 (1 + 2)"), Value::Number(1.0));
}

#[test]
fn conversion_with_to_and_in() {
    assert_eq!(render(&["= 36 km / h to m / s"]), "10 m / s");
    assert_eq!(render(&["={.2f} 1 inch in cm"]), "2.54 cm");
}

#[test]
fn trailing_in_is_the_inch() {
    assert_eq!(render(&["$@={.3g;cm} q = 2.5 in"]), "q = 2.5 in = 6.35e+0 cm");
    assert_eq!(render(&["={.3f; in} 3 cm"]), "1.181 in");
    assert_eq!(render(&["={.2f} (1 in) to cm"]), "2.54 cm");
    assert_eq!(render(&["!w = 2 in; h = 3 in", "={.1f; cm} w + h"]), "12.7 cm");
}

#[test]
fn deep_nesting_is_reported() {
    let depth = 100;
    let shallow = format!("= {}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(render(&[shallow.as_str()]), "1");

    let deep = format!("= {}1{}", "(".repeat(5000), ")".repeat(5000));
    assert!(render(&[deep.as_str()]).starts_with("Expression nested too deeply"));
}

#[test]
fn conversion_between_dimensions_fails() {
    assert_eq!(render(&["= 3 m to s"]), "Units do not match ('s' != '3 m')");
}

#[test]
fn builtins_accept_quantities() {
    assert_eq!(render(&["= sqrt(16 m^2)"]), "4 m");
    assert_eq!(render(&["={.3f} sin(90 deg)"]), "1.000");
    assert_eq!(render(&["= max(1 km, 900 m)"]), "1 km");
    assert_eq!(render(&["= abs(-3 m)"]), "3 m");
}

#[test]
fn builtins_on_plain_numbers() {
    assert_eq!(render(&["={.2f} log(8, 2)"]), "3.00");
    assert_eq!(render(&["= round(2.567, 2)"]), "2.57");
    assert_eq!(render(&["= 5!"]), "120");
    assert_eq!(render(&["= min(4, -2, 7)"]), "-2");
    assert_eq!(render(&["= 7 % 3"]), "1");
}

#[test]
fn builtin_errors() {
    assert_eq!(render(&["= sqrt(1, 2)"]),
               "Wrong number of arguments in function sqrt (2 provided, 1 expected)");
    assert_eq!(render(&["= sin(3 m)"]), "Invalid argument: Unit in function sin is no angle");
    assert_eq!(render(&["= unknown(3)"]), "Undefined function unknown");
}

#[test]
fn mismatched_units_cannot_be_added() {
    assert_eq!(render(&["= 3 m + 2 s"]), "Units do not match");
}

#[test]
fn user_functions_work_with_units() {
    assert_eq!(render(&["!f(x) = x ^ 2", "= f(3 m)"]), "9 m^2");
    assert_eq!(render(&["!area(w, h) = w * h", "={.1f; cm^2} area(2 cm, 3 cm)"]), "6.0 cm^2");
}

#[test]
fn variables_shadow_units_and_constants() {
    assert_eq!(render(&["!m = 4", "= 2 m"]), "8");
    assert_eq!(render(&["!pi = 3", "= pi"]), "3");
}

#[test]
fn constants_are_available() {
    assert_eq!(render(&["={.4f} pi"]), "3.1416");
    assert_eq!(render(&["={.3f} e"]), "2.718");
}

#[test]
fn undefined_symbols_are_reported() {
    assert_eq!(render(&["= y + 1"]), "Undefined symbol y");
}

#[test]
fn calling_a_variable_fails() {
    assert_eq!(render(&["!g = 3", "= g(2)"]), "g is not a function");
}

#[test]
fn formulas_are_rendered_in_canonical_form() {
    assert_eq!(render(&["@ 3m/6+pi^2"]), "3 m / 6 + pi ^ 2");
    assert_eq!(render(&["@= 2*(3+4)"]), "2 * (3 + 4) = 14");
}
