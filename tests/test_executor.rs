//! Integration tests for the session's fault boundary and top-level forms

#[path = "common/mod.rs"]
mod common;
use common::{lit, Fault, Outcome, Session, Value};
use kern::{Effect, EffectBridge};
use std::cell::RefCell;
use std::rc::Rc;

fn values(outcomes: Vec<Outcome>) -> Vec<Result<Value, &'static str>> {
    outcomes
        .into_iter()
        .map(|o| o.into_result().map_err(|f| f.kind()))
        .collect()
}

#[test]
fn test_fault_is_contained_and_session_continues() {
    let mut session = Session::new();
    let first = session.run("(slurp \"does_not_exist.tmp\")");
    assert_eq!(values(first), vec![Err("IOFailure")]);

    let next = session.run("(concat \"still \" \"alive\")");
    assert_eq!(values(next), vec![Ok(Value::string("still alive"))]);
}

#[test]
fn test_every_form_gets_an_outcome() {
    let mut session = Session::new();
    let outcomes = session.run("(+ 1 2) (put 42 \"x\") (undefined-thing) (* 2 3)");
    assert_eq!(
        values(outcomes),
        vec![
            Ok(Value::Number(3.0)),
            Err("TypeMismatch"),
            Err("Unbound"),
            Ok(Value::Number(6.0)),
        ]
    );
}

#[test]
fn test_fault_inside_nested_call_unwinds_the_whole_step() {
    let mut session = Session::new();
    let outcomes = session.run("(list 1 (head (list)) 3)");
    assert!(outcomes[0].is_fault());
}

#[test]
fn test_definitions_survive_later_faults() {
    let mut session = Session::new();
    session.run("(define greeting \"hello\")");
    session.run("(slurp 99)");
    assert_eq!(
        values(session.run("greeting")),
        vec![Ok(Value::string("hello"))]
    );
}

#[test]
fn test_recursion_limit_is_a_fault() {
    let config = kern::Config {
        max_depth: 40,
        ..Default::default()
    };
    let mut session = Session::with_config(&config);
    let outcomes = session.run("(define (loop n) (loop (+ n 1))) (loop 0)");
    assert_eq!(values(outcomes)[1], Err("RecursionLimit"));
    assert_eq!(values(session.run("(+ 1 1)")), vec![Ok(Value::Number(2.0))]);
}

#[test]
fn test_recursive_function() {
    let mut session = Session::new();
    let outcomes = session.run(
        "(define (fact n) (if (< n 2) 1 (* n (fact (- n 1))))) (fact 10)",
    );
    assert_eq!(outcomes[1], Outcome::Value(Value::Number(3628800.0)));
}

#[test]
fn test_load_runs_file_at_top_level() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("lib.kern");
    std::fs::write(
        &lib,
        "; helpers\n(define (square x) (* x x))\n(define answer 42)\n",
    )
    .unwrap();

    let mut session = Session::new();
    let outcomes = session.run(&format!("(load {}) (square answer)", lit(&lib)));
    assert_eq!(outcomes[1], Outcome::Value(Value::Number(1764.0)));
}

#[test]
fn test_load_missing_file() {
    let mut session = Session::new();
    let outcomes = session.run("(load \"no_such_library.kern\")");
    match &outcomes[0] {
        Outcome::Fault(f) => {
            assert_eq!(f.kind(), "IOFailure");
            assert!(f.to_string().contains("no_such_library.kern"));
        }
        other => panic!("expected fault, got {:?}", other),
    }
}

#[test]
fn test_define_is_top_level_only() {
    let mut session = Session::new();
    let outcomes = session.run("(begin (define x 1) x)");
    assert_eq!(values(outcomes), vec![Err("BadForm")]);
}

/// Serves canned responses and records every effect it is asked for
struct ScriptedBridge {
    log: RefCell<Vec<String>>,
}

impl EffectBridge for ScriptedBridge {
    fn perform(&self, effect: Effect<'_>) -> Result<Value, Fault> {
        self.log.borrow_mut().push(effect.resource().to_string());
        match effect {
            Effect::Probe { .. } => Ok(Value::Bool(true)),
            Effect::Read { .. } => Ok(Value::string("(+ 20 22)")),
            Effect::Write { content, .. } => Ok(Value::string(content)),
            Effect::Fetch { url } => Err(Fault::io(format!("offline: {}", url), url)),
        }
    }
}

#[test]
fn test_custom_bridge_sees_effects_in_order() {
    let bridge = Rc::new(ScriptedBridge {
        log: RefCell::new(Vec::new()),
    });
    let mut session = Session::with_bridge(bridge.clone());

    let outcomes = session.run(
        "(eval (parse (slurp \"prog\"))) (put \"out\" \"x\") (wslurp \"http://example.invalid/\")",
    );
    assert_eq!(outcomes[0], Outcome::Value(Value::Number(42.0)));
    assert_eq!(outcomes[1], Outcome::Value(Value::string("x")));
    match &outcomes[2] {
        Outcome::Fault(f) => assert_eq!(f.resource(), Some("http://example.invalid/")),
        other => panic!("expected fault, got {:?}", other),
    }

    assert_eq!(
        *bridge.log.borrow(),
        vec!["prog", "prog", "out", "http://example.invalid/"]
    );
}

fn session_with_depth(max_depth: usize) -> Session {
    Session::with_config(&kern::Config {
        max_depth,
        ..Default::default()
    })
}

#[test]
fn test_self_evaluating_data_is_contained() {
    let mut session = session_with_depth(100);
    let outcomes = session.run("(define x '(eval x)) (eval x) (+ 1 1)");
    assert_eq!(
        values(outcomes),
        vec![
            Ok(Value::symbol("x")),
            Err("RecursionLimit"),
            Ok(Value::Number(2.0)),
        ]
    );
}

#[test]
fn test_file_that_loads_itself_is_contained() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("again.kern");
    std::fs::write(&file, format!("(define visits 1)\n(load {})\n", lit(&file))).unwrap();

    let mut session = session_with_depth(50);
    let outcomes = session.run(&format!("(load {}) visits", lit(&file)));
    assert_eq!(
        values(outcomes),
        vec![Err("RecursionLimit"), Ok(Value::Number(1.0))]
    );

    // The nesting count starts over with every top-level form
    let lib = dir.path().join("lib.kern");
    std::fs::write(&lib, "(define y 2)").unwrap();
    assert_eq!(
        values(session.run(&format!("(load {}) y", lit(&lib)))),
        vec![Ok(Value::symbol("y")), Ok(Value::Number(2.0))]
    );
}

#[test]
fn test_deeply_nested_text_is_a_parse_failure() {
    let mut session = Session::new();
    let source = format!("(parse \"{}\") (+ 1 1)", "(".repeat(300_000));
    assert_eq!(
        values(session.run(&source)),
        vec![Err("ParseFailure"), Ok(Value::Number(2.0))]
    );
}
