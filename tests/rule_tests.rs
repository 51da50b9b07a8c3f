// tests/rule_tests.rs
//
// End-to-end behaviour: reference scenarios, render/parse equivalence,
// identity semantics, short-circuiting, idempotence and thread safety.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use jsonlogic::value::strict_equal;
use jsonlogic::{
    Argument, Builder, CompileError, CompiledOp, Registry, Value, apply, build_arg, compile, parse,
    parse_str, render,
};
use serde_json::json;

fn eval(rule: &str, data: serde_json::Value) -> Value {
    let clause = parse_str(rule).unwrap();
    compile(&clause).unwrap().eval(&Value::from(data))
}

fn v(json: serde_json::Value) -> Value {
    json.into()
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_scenario_equality() {
    for data in [json!(null), json!({"a": 1}), json!([1, 2]), json!("x")] {
        assert_eq!(eval(r#"{"==": [1, 1]}"#, data), v(json!(true)));
    }
}

#[test]
fn test_scenario_and_of_comparisons() {
    assert_eq!(
        eval(r#"{"and": [{">": [3, 1]}, {"<": [1, 3]}]}"#, json!(null)),
        v(json!(true))
    );
}

#[test]
fn test_scenario_var() {
    assert_eq!(eval(r#"{"var": "a"}"#, json!({"a": 1})), v(json!(1)));
}

#[test]
fn test_scenario_var_index() {
    assert_eq!(
        eval(r#"{"var": [1]}"#, json!(["apple", "banana", "carrot"])),
        v(json!("banana"))
    );
}

#[test]
fn test_scenario_fizzbuzz() {
    let rule = r#"{"if": [
        {"==": [{"%": [{"var": "i"}, 15]}, 0]}, "fizzbuzz",
        {"==": [{"%": [{"var": "i"}, 3]}, 0]}, "fizz",
        {"==": [{"%": [{"var": "i"}, 5]}, 0]}, "buzz",
        {"var": "i"}
    ]}"#;
    let program = compile(&parse_str(rule).unwrap()).unwrap();
    let run = |i: i64| program.eval(&v(json!({"i": i})));

    assert_eq!(run(20), v(json!("buzz")));
    assert_eq!(run(30), v(json!("fizzbuzz")));
    assert_eq!(run(9), v(json!("fizz")));
    assert_eq!(run(7), v(json!(7)));
}

#[test]
fn test_scenario_missing_some() {
    assert_eq!(
        eval(r#"{"missing_some": [1, ["a", "b", "c"]]}"#, json!({"a": "apple"})),
        v(json!([]))
    );
}

#[test]
fn test_scenario_substr() {
    assert_eq!(
        eval(r#"{"substr": ["jsonlogic", -5]}"#, json!(null)),
        v(json!("logic"))
    );
}

// ============================================================================
// Render/parse equivalence
// ============================================================================

#[test]
fn test_rendered_rules_evaluate_identically() {
    let rules = [
        r#"{"var": "a.b"}"#,
        r#"{"if": [{"<": [{"var": "n"}, 0]}, "neg", {"==": [{"var": "n"}, 0]}, "zero", "pos"]}"#,
        r#"{"cat": ["n=", {"var": "n"}, [1, {"var": "n"}]]}"#,
        r#"{"map": [{"var": "list"}, {"+": [{"var": ""}, 1]}]}"#,
        r#"{"reduce": [{"var": "list"}, {"+": [{"var": "current"}, {"var": "accumulator"}]}, 0]}"#,
        r#"{"missing": ["a", "n", "list"]}"#,
        r#"{"in": [2, {"var": "list"}]}"#,
        r#"{"!": {"var": "n"}}"#,
        r#"[{"var": "n"}, "x", {"a": 1, "b": 2}]"#,
        r#"{"a": 1, "b": 2}"#,
    ];
    let data = [
        json!(null),
        json!({"n": -3, "list": [1, 2, 3], "a": {"b": "deep"}}),
        json!({"n": 0, "list": []}),
        json!({"n": "5"}),
    ];

    for rule in rules {
        let original = compile(&parse_str(rule).unwrap()).unwrap();
        let rendered = render(&parse_str(rule).unwrap());
        let reparsed = compile(&parse(&rendered).unwrap()).unwrap();

        for d in &data {
            let d = v(d.clone());
            assert_eq!(original.eval(&d), reparsed.eval(&d), "rule {}", rule);
        }
    }
}

// ============================================================================
// Identity semantics
// ============================================================================

#[test]
fn test_distinct_literals_are_not_identical() {
    let clause = parse_str(r#"[[1, 2], [1, 2]]"#).unwrap();
    let both = clause.into_literal().unwrap();
    let items = both.as_list().unwrap();
    assert_eq!(items[0], items[1]);
    assert!(!strict_equal(&items[0], &items[1]));
    assert!(strict_equal(&items[0], &items[0]));
}

#[test]
fn test_naked_list_is_fresh_each_evaluation() {
    let program = compile(&parse_str(r#"[{"var": ""}]"#).unwrap()).unwrap();
    let first = program.eval(&Value::Null);
    let second = program.eval(&Value::Null);
    assert_eq!(first, second);
    assert!(!strict_equal(&first, &second));
}

#[test]
fn test_var_returns_the_same_instance() {
    let data = v(json!({"a": {"b": [1]}}));
    let program = compile(&parse_str(r#"{"var": "a.b"}"#).unwrap()).unwrap();
    assert!(strict_equal(&program.eval(&data), &program.eval(&data)));
}

// ============================================================================
// Short-circuit
// ============================================================================

/// A registry with a `tick` operator that counts its evaluations and returns
/// its first argument.
fn counting_registry() -> (Registry, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let registry = Registry::standard().with("tick", move |args, ops| {
        let value = match args.first() {
            Some(arg) => build_arg(arg, ops)?,
            None => CompiledOp::constant(Value::Null),
        };
        let counter = Arc::clone(&counter);
        Ok(CompiledOp::new(move |data| {
            counter.fetch_add(1, Ordering::SeqCst);
            value.eval(data)
        }))
    });
    (registry, hits)
}

fn count_ticks(rule: &str) -> (Value, usize) {
    let (registry, hits) = counting_registry();
    let program = registry.compile(&parse_str(rule).unwrap()).unwrap();
    let result = program.eval(&Value::Null);
    (result, hits.load(Ordering::SeqCst))
}

#[test]
fn test_and_short_circuits() {
    let (result, ticks) = count_ticks(r#"{"and": [{"tick": false}, {"tick": true}, {"tick": 1}]}"#);
    assert_eq!(result, Value::Bool(false));
    assert_eq!(ticks, 1);

    let (result, ticks) = count_ticks(r#"{"and": [{"tick": true}, {"tick": 1}]}"#);
    assert_eq!(result, Value::from(1.0));
    assert_eq!(ticks, 2);
}

#[test]
fn test_or_short_circuits() {
    let (result, ticks) = count_ticks(r#"{"or": [{"tick": 0}, {"tick": "a"}, {"tick": "b"}]}"#);
    assert_eq!(result, Value::from("a"));
    assert_eq!(ticks, 2);
}

#[test]
fn test_if_evaluates_only_the_chosen_branch() {
    let (result, ticks) = count_ticks(r#"{"if": [{"tick": true}, {"tick": "a"}, {"tick": "b"}]}"#);
    assert_eq!(result, Value::from("a"));
    assert_eq!(ticks, 2);

    let (result, ticks) = count_ticks(
        r#"{"if": [{"tick": false}, {"tick": 1}, {"tick": true}, {"tick": 2}, {"tick": 3}]}"#,
    );
    assert_eq!(result, Value::from(2.0));
    assert_eq!(ticks, 3);
}

#[test]
fn test_quantifiers_short_circuit() {
    let (result, ticks) = count_ticks(r#"{"some": [[1, 2, 3], {"tick": {"var": ""}}]}"#);
    assert_eq!(result, Value::Bool(true));
    assert_eq!(ticks, 1);

    let (result, ticks) = count_ticks(r#"{"all": [[1, 0, 3], {"tick": {"var": ""}}]}"#);
    assert_eq!(result, Value::Bool(false));
    assert_eq!(ticks, 2);
}

#[test]
fn test_var_default_is_lazy() {
    let (result, ticks) = count_ticks(r#"{"var": ["", {"tick": 1}]}"#);
    assert_eq!(result, Value::Null);
    assert_eq!(ticks, 0);
}

// ============================================================================
// Idempotence and reuse
// ============================================================================

#[test]
fn test_compiling_twice_gives_same_results() {
    let clause = parse_str(
        r#"{"if": [{"in": [{"var": "role"}, ["admin", "owner"]]}, {"cat": ["hi ", {"var": "name"}]}, false]}"#,
    )
    .unwrap();
    let first = compile(&clause).unwrap();
    let second = compile(&clause).unwrap();

    for data in [
        json!({"role": "admin", "name": "Ann"}),
        json!({"role": "guest", "name": "Bo"}),
        json!({}),
        json!(null),
    ] {
        let data = v(data);
        assert_eq!(first.eval(&data), second.eval(&data));
    }
}

#[test]
fn test_evaluation_does_not_change_results() {
    let program = compile(&parse_str(r#"{"merge": [{"var": "a"}, [1]]}"#).unwrap()).unwrap();
    let data = v(json!({"a": [0]}));
    let first = program.eval(&data);
    let second = program.eval(&data);
    assert_eq!(first, v(json!([0, 1])));
    assert_eq!(first, second);
    assert_eq!(data, v(json!({"a": [0]})));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_compiled_program_is_shared_across_threads() {
    let program = compile(
        &parse_str(r#"{"*": [{"var": "n"}, {"reduce": [{"var": "xs"}, {"+": [{"var": "current"}, {"var": "accumulator"}]}, 0]}]}"#)
            .unwrap(),
    )
    .unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let program = &program;
                scope.spawn(move || {
                    let data = v(json!({"n": n, "xs": [1, 2, 3]}));
                    (0..100).map(|_| program.eval(&data)).collect::<Vec<_>>()
                })
            })
            .collect();

        for (n, handle) in handles.into_iter().enumerate() {
            for result in handle.join().unwrap() {
                assert_eq!(result, Value::from(n as f64 * 6.0));
            }
        }
    });
}

#[test]
fn test_registry_clone_extends_independently() {
    let base = Registry::standard();
    let extended = base.clone().with("answer", |_, _| {
        Ok(CompiledOp::constant(Value::from(42.0)))
    });

    let clause = parse_str(r#"{"answer": []}"#).unwrap();
    assert!(base.compile(&clause).is_err());
    assert_eq!(extended.compile(&clause).unwrap().eval(&Value::Null), Value::from(42.0));
    assert!(!base.contains("answer"));
    assert!(extended.contains("answer"));
}

// ============================================================================
// Custom builders
// ============================================================================

struct Arity {
    max: usize,
}

impl Builder for Arity {
    fn build(&self, args: &[Argument], _registry: &Registry) -> Result<CompiledOp, CompileError> {
        if args.len() > self.max {
            return Err(CompileError::Custom(format!(
                "at most {} arguments, got {}",
                self.max,
                args.len()
            )));
        }
        Ok(CompiledOp::constant(Value::from(args.len() as f64)))
    }
}

#[test]
fn test_struct_builder_can_reject_arguments() {
    let mut registry = Registry::standard();
    registry.register_builder("arity", Arity { max: 2 });

    let ok = registry.compile(&parse_str(r#"{"arity": [1, 2]}"#).unwrap()).unwrap();
    assert_eq!(ok.eval(&Value::Null), Value::from(2.0));

    let err = registry
        .compile(&parse_str(r#"{"and": [{"arity": [1, 2, 3]}]}"#).unwrap())
        .unwrap_err();
    assert_eq!(err, CompileError::Custom("at most 2 arguments, got 3".to_string()));
}

#[test]
fn test_operators_are_sorted() {
    let registry = Registry::standard();
    let names = registry.operators();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    for name in ["var", "missing_some", "?:", "===", "substr", "merge"] {
        assert!(registry.contains(name), "missing {}", name);
    }
}

// ============================================================================
// One-shot apply
// ============================================================================

#[test]
fn test_apply() {
    let data = v(json!({"temp": 100}));
    assert_eq!(
        apply(br#"{"<": [{"var": "temp"}, 110]}"#, &data).unwrap(),
        Value::Bool(true)
    );
    assert!(matches!(apply(b"{oops", &data), Err(jsonlogic::Error::Parse(_))));
    assert!(matches!(
        apply(br#"{"nope": 1}"#, &data),
        Err(jsonlogic::Error::Compile(CompileError::UnrecognizedOperation(_)))
    ));
}

// ============================================================================
// Extensions
// ============================================================================

#[test]
fn test_match_extension() {
    let registry = jsonlogic::extensions::extended();
    let program = registry
        .compile(&parse_str(r#"{"match": [{"var": "email"}, "^[^@]+@example\\.com$"]}"#).unwrap())
        .unwrap();

    assert_eq!(program.eval(&v(json!({"email": "ann@example.com"}))), Value::Bool(true));
    assert_eq!(program.eval(&v(json!({"email": "ann@example.org"}))), Value::Bool(false));
    assert_eq!(program.eval(&v(json!({"email": 5}))), Value::Bool(false));
    assert_eq!(program.eval(&v(json!({}))), Value::Bool(false));
}

#[test]
fn test_match_dynamic_and_invalid_patterns() {
    let registry = jsonlogic::extensions::extended();
    let compile_with = |rule: &str| registry.compile(&parse_str(rule).unwrap()).unwrap();

    let dynamic = compile_with(r#"{"match": [{"var": "s"}, {"var": "p"}]}"#);
    assert_eq!(dynamic.eval(&v(json!({"s": "abc", "p": "b+"}))), Value::Bool(true));
    assert_eq!(dynamic.eval(&v(json!({"s": "abc", "p": "("}))), Value::Bool(false));

    let invalid = compile_with(r#"{"match": ["abc", "("]}"#);
    assert_eq!(invalid.eval(&Value::Null), Value::Bool(false));

    let missing = compile_with(r#"{"match": ["abc"]}"#);
    assert_eq!(missing.eval(&Value::Null), Value::Bool(false));
}
