//! Line-by-line evaluation through `Session`.

use cubescript_kernel::memory::{MemoryStack, Value};
use cubescript_kernel::{EvalConfig, EvalError, ParseErrorKind, Session};

fn session() -> Session<MemoryStack> {
    let mut stack = MemoryStack::new();
    stack.define("join", |args| {
        Ok(Value::String(args.iter().map(Value::to_string).collect()))
    });
    stack.set_global("who", Value::String("you".into()));
    Session::new(stack)
}

#[test]
fn complete_line_is_evaluated_at_once() {
    let mut session = session();
    assert_eq!(session.prompt(), "> ");
    let result = session.feed_line("join hi $who").unwrap();
    assert_eq!(result.unwrap(), "hiyou");
    assert!(!session.is_pending());
    assert_eq!(session.stack().depth(), 0);
}

#[test]
fn open_constructs_wait_for_more_lines() {
    let mut session = session();
    assert!(session.feed_line("join [first").is_none());
    assert!(session.is_pending());
    assert_eq!(session.prompt(), ">> ");
    assert!(session.feed_line("second (").is_none());

    let result = session.feed_line("third]").unwrap();
    assert_eq!(result.unwrap(), "first\nsecond (\nthird");
    assert_eq!(session.prompt(), "> ");
}

#[test]
fn empty_lines_are_ignored() {
    let mut session = session();
    assert!(session.feed_line("").is_none());
    assert!(!session.is_pending());

    assert!(session.feed_line("join (join a").is_none());
    assert!(session.feed_line("").is_none());
    let result = session.feed_line("b)").unwrap();
    assert_eq!(result.unwrap(), "ab");
}

#[test]
fn comment_lines_do_not_evaluate() {
    let mut session = session();
    assert!(session.feed_line("// just a note").is_none());
    let result = session.feed_line("join x").unwrap();
    assert_eq!(result.unwrap(), "x");
}

#[test]
fn errors_clear_the_buffer() {
    let mut session = session();
    let err = session.feed_line("join )").unwrap().unwrap_err();
    assert_eq!(
        err.as_parse().map(|e| e.kind),
        Some(ParseErrorKind::UnexpectedCloseParen)
    );
    assert!(!session.is_pending());

    let err = session.feed_line("nope").unwrap().unwrap_err();
    assert_eq!(err, EvalError::Runtime("unknown command: nope".into()));
    assert_eq!(session.stack().depth(), 0);

    assert_eq!(session.feed_line("join ok").unwrap().unwrap(), "ok");
}

#[test]
fn finish_reports_what_was_left_open() {
    let mut session = session();
    assert!(session.feed_line("join (a").is_none());
    let err = session.finish().unwrap().unwrap_err();
    let parse = err.as_parse().copied().unwrap();
    assert!(parse.kind.is_unterminated());
    assert!(!session.is_pending());
}

#[test]
fn finish_without_input_does_nothing() {
    let mut session = session();
    assert!(session.finish().is_none());
}

#[test]
fn configured_limits_apply() {
    let mut session = Session::with_config(
        MemoryStack::new(),
        EvalConfig::default().with_max_depth(1),
    );
    let err = session.feed_line("a (b)").unwrap().unwrap_err();
    assert_eq!(
        err.as_parse().map(|e| e.kind),
        Some(ParseErrorKind::NestingTooDeep { limit: 1 })
    );
}

#[test]
fn stack_is_returned_to_host() {
    let mut session = session();
    session.stack_mut().set_global("who", Value::String("me".into()));
    assert_eq!(session.feed_line("join $who").unwrap().unwrap(), "me");
    let stack = session.into_inner();
    assert_eq!(stack.global("who"), Some(&Value::String("me".into())));
}
