//! Runs the evaluation test file against the recording backend.

use cubescript_testutil::eval_file::{parse_eval_tests, run_eval_tests};

const STATEMENTS_TEST: &str = include_str!("../../../tests/eval/statements.test");

#[test]
fn statements_file_parses() {
    let cases = parse_eval_tests(STATEMENTS_TEST);
    assert!(cases.len() > 30, "only {} cases parsed", cases.len());
    assert!(cases.iter().all(|c| !c.name.is_empty()));
}

#[test]
fn run_statements_test_file() {
    let summary = run_eval_tests(STATEMENTS_TEST);
    println!("{}", summary);
    assert!(summary.all_passed(), "{summary}");
}
