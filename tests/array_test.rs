//! Integration tests for array.

use perfecto::{array, check, nest, path, rules, validate, validators, Context, ValidationError, Validator};
use serde_json::{json, Value};

fn is_jedi(person: Option<&Value>) -> bool {
    person.and_then(|p| p.get("isJedi")).and_then(Value::as_bool) == Some(true)
}

#[tokio::test]
async fn test_array_adds_index_to_errors() {
    let object = json!({ "bar": [{ "yo": "fo" }] });
    let errors = nest(
        path!["bar"],
        validators![array(validators![rules::present("error", path!["foo"])])],
    )
    .run(&Context::new(object))
    .await
    .unwrap();

    assert_eq!(errors, vec![ValidationError::new(path!["bar", 0, "foo"], "error")]);
}

#[tokio::test]
async fn test_array_without_errors() {
    let object = json!({ "bar": [{ "foo": true }, { "foo": true }] });
    let errors = nest(
        path!["bar"],
        validators![array(validators![rules::present("error", path!["foo"])])],
    )
    .run(&Context::new(object))
    .await
    .unwrap();

    assert!(errors.is_empty());
}

#[tokio::test]
async fn test_empty_array() {
    let form = validators![array(validators![check(is_jedi, "Jedi he is not")])];
    let errors = validate(&form, &Context::new(json!([]))).await.unwrap();
    assert!(errors.is_empty());
}

#[tokio::test]
async fn test_null_array() {
    let form = validators![array(validators![check(is_jedi, "Jedi he is not")])];
    let errors = validate(&form, &Context::new(Value::Null)).await.unwrap();
    assert!(errors.is_empty());
}

#[tokio::test]
async fn test_missing_array() {
    let form = validators![nest(
        path!["crew"],
        validators![array(validators![check(is_jedi, "Jedi he is not")])]
    )];
    let errors = validate(&form, &Context::new(json!({}))).await.unwrap();
    assert!(errors.is_empty());
}

#[tokio::test]
async fn test_non_array_has_no_elements() {
    let form = validators![array(validators![check(is_jedi, "Jedi he is not")])];
    for object in [json!({ "0": {} }), json!("people"), json!(3)] {
        let errors = validate(&form, &Context::new(object)).await.unwrap();
        assert!(errors.is_empty());
    }
}

#[tokio::test]
async fn test_errors_ordered_by_index() {
    let object = json!([{ "name": "Bob" }, { "name": "Joe" }]);
    let form = validators![array(validators![check(is_jedi, "Jedi he is not")])];

    let errors = validate(&form, &Context::new(object)).await.unwrap();

    assert_eq!(
        errors,
        vec![
            ValidationError::new(path![0], "Jedi he is not"),
            ValidationError::new(path![1], "Jedi he is not"),
        ]
    );
}

#[tokio::test]
async fn test_only_failing_elements_reported() {
    let object = json!([{ "isJedi": true }, { "name": "Han" }, { "isJedi": true }, {}]);
    let errors = array(validators![check(is_jedi, "Jedi he is not")])
        .run(&Context::new(object))
        .await
        .unwrap();

    let paths: Vec<_> = errors.iter().map(|e| e.path.clone()).collect();
    assert_eq!(paths, vec![path![1], path![3]]);
}

#[tokio::test]
async fn test_element_errors_keep_validator_order() {
    let object = json!([{}, {}]);
    let errors = array(validators![
        rules::present("no name", path!["name"]),
        rules::present("no rank", path!["rank"]),
    ])
    .run(&Context::new(object))
    .await
    .unwrap();

    let rendered: Vec<_> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "[0].name: no name",
            "[0].rank: no rank",
            "[1].name: no name",
            "[1].rank: no rank",
        ]
    );
}

#[tokio::test]
async fn test_nested_arrays() {
    let object = json!({
        "fleets": [
            { "ships": [{ "name": "Falcon" }, {}] },
            { "ships": [{}] }
        ]
    });
    let form = validators![nest(
        path!["fleets"],
        validators![array(validators![nest(
            path!["ships"],
            validators![array(validators![rules::present("unnamed", path!["name"])])]
        )])]
    )];

    let errors = validate(&form, &Context::new(object)).await.unwrap();

    assert_eq!(
        errors,
        vec![
            ValidationError::new(path!["fleets", 0, "ships", 1, "name"], "unnamed"),
            ValidationError::new(path!["fleets", 1, "ships", 0, "name"], "unnamed"),
        ]
    );
}
