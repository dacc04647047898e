//! Integration tests for query translation through the public API.
//!
//! Requests are parsed from their JSON wire form, compiled, and the
//! resulting query documents compared against the expected Elasticsearch
//! JSON.

use reporting_search::ValidationError;
use reporting_search::query::build_search_query;
use reporting_search::types::SearchParams;
use serde_json::{Value, json};

fn compile(request: Value) -> Value {
    let params: SearchParams = serde_json::from_value(request).expect("valid request");
    let query = build_search_query(&params).expect("query compiles");
    serde_json::to_value(&query).expect("query serializes")
}

fn name_clause(namespace: &str, attribute: &str) -> Value {
    json!({"match": {format!("{}.name", namespace): attribute}})
}

// =============================================================================
// Filters
// =============================================================================

#[test]
fn test_status_eq_accepted() {
    let body = compile(json!({
        "page": 1,
        "per_page": 20,
        "filters": [
            {"scope": "inventory", "attribute": "status", "type": "$eq", "value": "accepted"}
        ]
    }));

    assert_eq!(
        body,
        json!({
            "query": {"bool": {"must": [{
                "nested": {
                    "path": "inventoryAttributes",
                    "query": {"bool": {"must": [
                        {"match": {"inventoryAttributes.name": "status"}},
                        {"match": {"inventoryAttributes.string": "accepted"}}
                    ]}}
                }
            }]}},
            "sort": [],
            "from": 0,
            "size": 20
        })
    );
}

#[test]
fn test_mixed_branches() {
    let body = compile(json!({
        "page": 2,
        "per_page": 5,
        "filters": [
            {"scope": "identity", "attribute": "mac", "type": "$nin", "value": ["aa", "bb"]},
            {"scope": "inventory", "attribute": "cpu_count", "type": "$gte", "value": 2},
            {"scope": "custom", "attribute": "tag", "type": "$exists", "value": false}
        ]
    }));

    let must = body["query"]["bool"]["must"].as_array().unwrap();
    let must_not = body["query"]["bool"]["must_not"].as_array().unwrap();

    assert_eq!(must.len(), 1);
    assert_eq!(
        must[0]["nested"]["query"]["bool"]["must"],
        json!([
            name_clause("inventoryAttributes", "cpu_count"),
            {"range": {"inventoryAttributes.numeric": {"gte": 2}}}
        ])
    );

    assert_eq!(must_not.len(), 2);
    assert_eq!(
        must_not[0]["nested"]["query"]["bool"]["must"][1],
        json!({"terms": {"identityAttributes.string": ["aa", "bb"]}})
    );
    assert_eq!(must_not[1]["nested"]["path"], "customAttributes");
    assert_eq!(
        must_not[1]["nested"]["query"]["bool"]["minimum_should_match"],
        1
    );

    assert_eq!(body["from"], 5);
    assert_eq!(body["size"], 5);
}

#[test]
fn test_float_literal_is_kept() {
    let body = compile(json!({
        "page": 1,
        "per_page": 1,
        "filters": [
            {"scope": "inventory", "attribute": "load", "type": "$lt", "value": 0.5}
        ]
    }));

    assert_eq!(
        body["query"]["bool"]["must"][0]["nested"]["query"]["bool"]["must"][1],
        json!({"range": {"inventoryAttributes.numeric": {"lt": 0.5}}})
    );
}

#[test]
fn test_regex() {
    let body = compile(json!({
        "page": 1,
        "per_page": 1,
        "filters": [
            {"scope": "inventory", "attribute": "hostname", "type": "$regex", "value": "^gw-.*"}
        ]
    }));

    assert_eq!(
        body["query"]["bool"]["must"][0]["nested"]["query"]["bool"]["must"][1],
        json!({"regexp": {"inventoryAttributes.string": "^gw-.*"}})
    );
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn test_sort_by_cpu_count() {
    let body = compile(json!({
        "page": 1,
        "per_page": 10,
        "sort": [{"scope": "inventory", "attribute": "cpu_count", "order": "desc"}]
    }));

    let sort = body["sort"].as_array().unwrap();
    assert_eq!(sort.len(), 2);
    for (clause, field) in sort
        .iter()
        .zip(["inventoryAttributes.string", "inventoryAttributes.numeric"])
    {
        assert_eq!(
            clause[field],
            json!({
                "mode": "max",
                "order": "desc",
                "nested": {
                    "path": "inventoryAttributes",
                    "filter": {"term": {"inventoryAttributes.name": "cpu_count"}}
                }
            })
        );
    }
}

// =============================================================================
// Rejected requests
// =============================================================================

#[test]
fn test_unknown_operator_is_rejected_while_parsing() {
    let result = serde_json::from_value::<SearchParams>(json!({
        "filters": [{"scope": "inventory", "attribute": "a", "type": "$like", "value": "x"}]
    }));
    assert!(result.unwrap_err().to_string().contains("$like"));
}

#[test]
fn test_unknown_scope_is_rejected_while_parsing() {
    let result = serde_json::from_value::<SearchParams>(json!({
        "filters": [{"scope": "system", "attribute": "a", "type": "$eq", "value": "x"}]
    }));
    assert!(result.is_err());
}

#[test]
fn test_mixed_array_is_rejected_while_parsing() {
    let result = serde_json::from_value::<SearchParams>(json!({
        "filters": [{"scope": "inventory", "attribute": "a", "type": "$in", "value": ["x", 1]}]
    }));
    assert!(result.is_err());
}

#[test]
fn test_shape_errors() {
    let cases = [
        ("$eq", json!(["a", "b"])),
        ("$ne", json!([1, 2])),
        ("$in", json!("x")),
        ("$nin", json!(1)),
        ("$gt", json!([1, 2])),
        ("$regex", json!(["a"])),
        ("$exists", json!("yes")),
    ];

    for (operator, value) in cases {
        let params: SearchParams = serde_json::from_value(json!({
            "page": 1,
            "per_page": 10,
            "filters": [{"scope": "inventory", "attribute": "a", "type": operator, "value": value}]
        }))
        .unwrap();

        assert!(
            matches!(
                build_search_query(&params),
                Err(ValidationError::InvalidValueShape { .. })
            ),
            "{} should be rejected",
            operator
        );
    }
}

#[test]
fn test_unnormalized_paging_is_rejected() {
    let params: SearchParams = serde_json::from_value(json!({})).unwrap();
    assert!(matches!(
        build_search_query(&params),
        Err(ValidationError::InvalidPaging { .. })
    ));
}
