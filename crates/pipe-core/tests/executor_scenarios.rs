use pipe_core::{execute, ExecutionError, FilterConfig, Step, StepErrorReason, StepKind, Value, Workflow};
use serde_json::json;

fn run(wf: Workflow) -> Result<Value, ExecutionError> {
    execute(wf.steps())
}

#[test]
fn filter_greater_than_then_sum() {
    // [1,2,3,4] -> filtro > 2 -> suma = 3 + 4
    let wf = Workflow::builder().source(json!([1, 2, 3, 4]))
                                .filter("", "greater", 2)
                                .sum("")
                                .build()
                                .unwrap();
    assert_eq!(run(wf).unwrap(), json!(7));
}

#[test]
fn max_and_min_over_records() {
    let data = json!([{"v": 1}, {"v": 9}, {"v": 4}]);
    let max = Workflow::builder().source(data.clone()).max("v").build().unwrap();
    let min = Workflow::builder().source(data).min("v").build().unwrap();
    assert_eq!(run(max).unwrap(), json!({"v": 9}));
    assert_eq!(run(min).unwrap(), json!({"v": 1}));
}

#[test]
fn max_tie_returns_first_record() {
    let wf = Workflow::builder().source(json!([{"f": 5, "id": "a"}, {"f": 5, "id": "b"}]))
                                .max("f")
                                .build()
                                .unwrap();
    assert_eq!(run(wf).unwrap(), json!({"f": 5, "id": "a"}));
}

#[test]
fn count_equals_payload_length() {
    for payload in [json!([1]), json!([1, "a", {"x": 2}]), json!([])] {
        let expected = payload.as_array().map(Vec::len).unwrap();
        let wf = Workflow::builder().source(payload).count().build().unwrap();
        assert_eq!(run(wf).unwrap(), json!(expected));
    }
}

#[test]
fn count_of_scalar_payload_is_one() {
    let wf = Workflow::builder().source(json!(42)).count().build().unwrap();
    assert_eq!(run(wf).unwrap(), json!(1));
}

#[test]
fn only_placeholders_is_empty_workflow() {
    let steps = vec![Step::placeholder("empty-1"), Step::placeholder("empty-2")];
    assert_eq!(execute(&steps), Err(ExecutionError::EmptyWorkflow));
    assert_eq!(execute(&[]), Err(ExecutionError::EmptyWorkflow));
}

#[test]
fn filter_before_source_fails_with_missing_data_at_zero() {
    let steps = vec![Step::placeholder("empty-1"),
                     Step::filter("f", FilterConfig::new("", "greater", 1)),
                     Step::source("s", json!([1, 2]))];
    let err = execute(&steps).unwrap_err();
    assert_eq!(err,
               ExecutionError::StepError { index: 0,
                                           reason: StepErrorReason::MissingData });
}

#[test]
fn missing_configuration_halts_at_that_step() {
    let steps = vec![Step::source("s", json!([1, 2, 3])),
                     Step::new("sum", StepKind::Sum),
                     Step::count("c")];
    assert_eq!(execute(&steps), Err(ExecutionError::missing_configuration(1)));
}

#[test]
fn sum_of_empty_or_scalar_is_zero() {
    let empty = Workflow::builder().source(json!([])).sum("v").build().unwrap();
    assert_eq!(run(empty).unwrap(), json!(0));
    let scalar = Workflow::builder().source(json!("12")).sum("").build().unwrap();
    assert_eq!(run(scalar).unwrap(), json!(0));
}

#[test]
fn sum_is_order_independent() {
    let a = Workflow::builder().source(json!([{"p": 1.5}, {"p": 2}, {"p": 3}])).sum("p").build().unwrap();
    let b = Workflow::builder().source(json!([{"p": 3}, {"p": 1.5}, {"p": 2}])).sum("p").build().unwrap();
    assert_eq!(run(a).unwrap(), json!(6.5));
    assert_eq!(run(b).unwrap(), json!(6.5));
}

#[test]
fn max_of_empty_is_null_and_pipeline_continues() {
    // null es un valor presente: Count posterior no falla
    let wf = Workflow::builder().source(json!([])).max("v").count().build().unwrap();
    assert_eq!(run(wf).unwrap(), json!(1));
}

#[test]
fn later_source_replaces_current_value() {
    let wf = Workflow::builder().source(json!([1, 2, 3]))
                                .count()
                                .source(json!([10, 20]))
                                .sum("")
                                .build()
                                .unwrap();
    assert_eq!(run(wf).unwrap(), json!(30));
}

#[test]
fn filter_then_count_on_records() {
    let wf = Workflow::builder().source(json!([
                                    {"name": "a", "age": 30},
                                    {"name": "b", "age": 17},
                                    {"name": "c", "age": "42"},
                                    {"name": "d"}
                                ]))
                                .filter("age", "greater", "18")
                                .count()
                                .build()
                                .unwrap();
    assert_eq!(run(wf).unwrap(), json!(2));
}

#[test]
fn steps_are_not_mutated_by_execution() {
    let steps = vec![Step::source("s", json!([3, 1, 2])),
                     Step::filter("f", FilterConfig::new("", "less", 3))];
    let before = steps.clone();
    assert_eq!(execute(&steps).unwrap(), json!([1, 2]));
    assert_eq!(steps, before);
}
