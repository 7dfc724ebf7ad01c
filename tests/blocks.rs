use lmath::{
    evaluate_block, evaluate_document,
    interpreter::value::core::Value,
    literate::{block::Outcome, grammar::ParsedFormat, scope::Scope},
};
use pretty_assertions::assert_eq;

fn assert_display(bodies: &[&str], expected: &str) {
    let chain = evaluate_document(bodies);
    let last = chain.blocks().last().expect("at least one body");
    assert_eq!(last.display_result(),
               Some(expected),
               "bodies {bodies:?} ended in {:?}",
               last.outcome());
}

fn assert_error(bodies: &[&str], expected: &str) {
    let chain = evaluate_document(bodies);
    let last = chain.blocks().last().expect("at least one body");
    assert_eq!(last.error_message(),
               Some(expected),
               "bodies {bodies:?} ended in {:?}",
               last.outcome());
}

fn scope_of(bodies: &[&str]) -> Scope<Value> {
    evaluate_document(bodies).into_parts().1
}

#[test]
fn results_carry_their_units() {
    assert_display(&["x = 3 m / 6", "= x ^ 2 + 5 cm^2"], "0.2505 m^2");
}

#[test]
fn explicit_format_and_unit() {
    assert_display(&["x = 3 m / 6", "@={.10f; dm2} x ^ 2 + 5 cm^2"],
                   "x ^ 2 + 5 cm ^ 2 = 25.0500000000 dm2");
}

#[test]
fn assignment_expression_and_result() {
    assert_display(&["$@= d = 4 km / 2"], "d = 4 km / 2 = 2 km");
    assert_display(&["$= d = 4 km / 2"], "d = 2 km");
    assert_display(&["$ d = 4 km / 2"], "d");
    assert_display(&["@ 1 + 2"], "1 + 2");
}

#[test]
fn bare_bodies_show_the_formula() {
    assert_display(&["1+2"], "1 + 2");
    assert_display(&["x = 3 m / 6"], "3 m / 6");
}

#[test]
fn results_are_auto_formatted() {
    assert_display(&["= 1 + 2"], "3");
    assert_display(&["= 0.1 + 0.2"], "0.3");
    assert_display(&["= 2 ^ 30"], "1.074e+9");
    assert_display(&["= 1234.5678"], "1235");
    assert_display(&["= 1 / 3"], "0.333");
}

#[test]
fn numeric_formats() {
    assert_display(&["={.2f} pi"], "3.14");
    assert_display(&["={.3g} 12345"], "1.23e+4");
    assert_display(&["={.0g} 25.06"], "2.506e+1");
    assert_display(&["={.1f} 2.26 km"], "2.3 km");
}

#[test]
fn unknown_unit_in_format() {
    assert_error(&["={;unknown_unit} 3 m"], "Unit \"unknown\" not found.");
}

#[test]
fn incompatible_unit_in_format() {
    assert_error(&["={;s} 3 m"], "Units do not match ('s' != '3 m')");
}

#[test]
fn assignment_display_requires_an_assignment() {
    assert_error(&["$@ 3 m"], "Cannot show assignment ($) when formula has no assignment");
}

#[test]
fn function_assignments_cannot_be_displayed() {
    assert_error(&["f(x) = 3"], "Function assignments not allowed inline with output");
}

#[test]
fn statement_sequences_cannot_be_displayed() {
    assert_error(&["x=3;y=5"], "Multiple statements not allowed inline with output");
}

#[test]
fn silent_sequences_update_the_scope() {
    assert_display(&["!x=3;y=5", "= x + y"], "8");
}

#[test]
fn silent_function_assignments_are_callable_later() {
    assert_display(&["!f(x) = x ^ 2 + 1", "@= f(3)"], "f(3) = 10");
}

#[test]
fn unitless_policy_rejects_units() {
    assert_error(&["={;-} 3m"], "Failed to convert \"3 m\" into a unitless number");
}

#[test]
fn unit_policy_rejects_plain_numbers() {
    assert_error(&["={;m} 3 + 4"], "Failed to apply unit \"m\" to the unitless number 7");
}

#[test]
fn unitless_policy_accepts_cancelled_units() {
    assert_display(&["={;-} 2 km / 500 m"], "4");
}

#[test]
fn malformed_formats_are_reported() {
    let chain = evaluate_document(["={x} 3"]);

    assert!(chain.blocks()[0].is_error());
    assert!(chain.scope().is_empty());
}

#[test]
fn parse_errors_are_reported() {
    assert_error(&["3 +"], "Unexpected end of expression (char 4)");
    assert_error(&["= nothing + 1"], "Undefined symbol nothing");
}

#[test]
fn failed_blocks_leave_the_scope_untouched() {
    let before = scope_of(&["!x = 1"]);
    let failed = evaluate_block("$@ y = 2; z = 3", &before);

    assert!(failed.block.is_error());
    assert_eq!(failed.scope, before);
    assert!(!failed.scope.contains("y"));
}

#[test]
fn evaluation_failure_after_a_binding_rolls_back() {
    let before = scope_of(&["!x = 1"]);
    let failed = evaluate_block("!y = 2; z = nothing", &before);

    assert_eq!(failed.block.error_message(), Some("Undefined symbol nothing"));
    assert_eq!(failed.scope, before);
    assert!(!failed.scope.contains("y"));
}

#[test]
fn oversized_digit_counts_are_format_errors() {
    assert_error(&["={.70000f} 1"], "Number of digits in \".70000f\" must be at most 100");
    assert_error(&["={.70000g} 1"], "Number of digits in \".70000g\" must be at most 100");
    assert_display(&["={.100f} 1"], &format!("1.{}", "0".repeat(100)));
}

#[test]
fn rejected_display_rolls_back_the_assignment() {
    let before = scope_of(&["!x = 1"]);
    let failed = evaluate_block("={;m} x = 5", &before);

    assert_eq!(failed.block.error_message(),
               Some("Failed to apply unit \"m\" to the unitless number 5"));
    assert_eq!(failed.scope.get("x"), Some(&Value::Number(1.0)));
}

#[test]
fn a_failing_block_does_not_stop_the_chain() {
    let chain = evaluate_document(["!a = 2", "= a + nothing", "$= a = a * 3", "= a"]);
    let rendered: Vec<&str> = chain.blocks().iter().map(|b| b.rendered()).collect();

    assert_eq!(rendered, vec!["", "Undefined symbol nothing", "a = 6", "6"]);
    assert!(chain.has_errors());
}

#[test]
fn evaluation_is_idempotent() {
    let scope = scope_of(&["!x = 3 m"]);

    let first = evaluate_block("$@={.2f; cm} y = x * 2", &scope);
    let second = evaluate_block("$@={.2f; cm} y = x * 2", &scope);

    assert_eq!(first, second);
    assert_eq!(first.block.display_result(), Some("y = x * 2 = 600.00 cm"));
}

#[test]
fn silent_blocks_record_their_format() {
    let chain = evaluate_document(["!x = 3"]);
    let block = &chain.blocks()[0];

    match block.outcome() {
        Outcome::Ok { formula,
                      format,
                      display_result, } => {
            assert_eq!(formula, "x = 3");
            assert_eq!(format, &ParsedFormat::silent());
            assert_eq!(display_result, &None);
        },
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn blocks_serialize_to_json() {
    let chain = evaluate_document(["$= x = 3", "= nothing"]);

    let ok = serde_json::to_value(&chain.blocks()[0]).expect("serializable");
    assert_eq!(ok["body"], "$= x = 3");
    assert_eq!(ok["type"], "ok");
    assert_eq!(ok["display_result"], "x = 3");
    assert_eq!(ok["format"]["raw_format"], "$=");

    let error = serde_json::to_value(&chain.blocks()[1]).expect("serializable");
    assert_eq!(error["type"], "error");
    assert_eq!(error["message"], "Undefined symbol nothing");
}
