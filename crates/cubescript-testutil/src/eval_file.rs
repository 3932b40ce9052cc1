//! Evaluation test file parser and runner.
//!
//! A test file is a sequence of cases:
//!
//! ```text
//! # test: nested call
//! # expect: ok
//! ---
//! echo (add 1 2)
//! ---
//! (echo (add 1 2))
//! ===
//! ```
//!
//! `ok` cases compare the final result's string form; `error` cases compare
//! the error's display text. The input is evaluated against a
//! [`RecordingStack`] on which the command `fail` always fails.

use cubescript_kernel::{eval_str, CommandStack};

use crate::recording::RecordingStack;
use crate::{TestResult, TestSummary};

/// Command name that fails in every test case.
pub const FAILING_COMMAND: &str = "fail";

/// One case from a test file.
#[derive(Debug, Clone)]
pub struct EvalTestCase {
    pub name: String,
    /// Line of the `# test:` header (1-indexed).
    pub line_number: usize,
    pub input: String,
    pub expected: Expectation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// The last statement's result, stringified.
    Ok(String),
    /// The error's display text.
    Error(String),
}

/// Parse the `*.test` format into cases.
pub fn parse_eval_tests(content: &str) -> Vec<EvalTestCase> {
    let lines: Vec<&str> = content.lines().collect();
    let mut cases = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(name) = lines[i].trim().strip_prefix("# test:") else {
            i += 1;
            continue;
        };
        let name = name.trim().to_string();
        let line_number = i + 1;
        i += 1;

        let mut expect_ok = true;
        if let Some(expect) = lines.get(i).and_then(|l| l.trim().strip_prefix("# expect:")) {
            expect_ok = expect.trim() == "ok";
            i += 1;
        }

        while i < lines.len() && lines[i].trim() != "---" {
            i += 1;
        }
        i += 1;

        let mut input = Vec::new();
        while i < lines.len() && lines[i].trim() != "---" {
            input.push(lines[i]);
            i += 1;
        }
        i += 1;

        let mut expected = Vec::new();
        while i < lines.len() && lines[i].trim() != "===" {
            expected.push(lines[i]);
            i += 1;
        }
        i += 1;

        let expected = expected.join("\n").trim().to_string();
        cases.push(EvalTestCase {
            name,
            line_number,
            input: input.join("\n"),
            expected: if expect_ok {
                Expectation::Ok(expected)
            } else {
                Expectation::Error(expected)
            },
        });
    }

    cases
}

impl EvalTestCase {
    pub fn run(&self) -> TestResult {
        let mut stack = RecordingStack::new().failing(FAILING_COMMAND);
        let outcome = eval_str(&self.input, &mut stack);

        match (&self.expected, outcome) {
            (Expectation::Ok(expected), Ok(())) => {
                if !stack.frames_balanced() {
                    return TestResult::Error {
                        message: "frames left open".to_string(),
                    };
                }
                let actual = stack.pop_string();
                if &actual == expected {
                    TestResult::Pass
                } else {
                    TestResult::Fail {
                        expected: expected.clone(),
                        actual,
                    }
                }
            }
            (Expectation::Ok(expected), Err(err)) => TestResult::Fail {
                expected: expected.clone(),
                actual: format!("error: {err}"),
            },
            (Expectation::Error(expected), Err(err)) => {
                let actual = err.to_string();
                if !stack.entries().is_empty() {
                    TestResult::Fail {
                        expected: "empty stack after error".to_string(),
                        actual: format!("{:?}", stack.entries()),
                    }
                } else if &actual == expected {
                    TestResult::Pass
                } else {
                    TestResult::Fail {
                        expected: expected.clone(),
                        actual,
                    }
                }
            }
            (Expectation::Error(expected), Ok(())) => TestResult::Fail {
                expected: format!("error: {expected}"),
                actual: stack.pop_string(),
            },
        }
    }
}

/// Parse and run every case in `content`.
pub fn run_eval_tests(content: &str) -> TestSummary {
    let mut summary = TestSummary::new();
    for case in parse_eval_tests(content) {
        let result = case.run();
        summary.record(&case.name, case.line_number, result);
    }
    summary
}
