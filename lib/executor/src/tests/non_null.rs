use hive_tree_executor_config::execution::ExecutionConfig;

use crate::{
    resolvers::{common::ResolveParams, function::FnResolver, map::ResolverMap},
    response::{graphql_error::FieldError, value::Value},
    schema::SdlSchema,
    tests::testkit::{init_logger, pretty, run, run_library, source_id},
};

fn shape(a_type: &str) -> SdlSchema {
    SdlSchema::parse(&format!(
        r#"
        type Query {{ a: {}, b: C }}
        type B {{ x: String!, y: String }}
        type C {{ z: String }}
        "#,
        a_type
    ))
    .expect("valid schema")
}

fn root() -> Value {
    serde_json::json!({
        "a": { "x": "unused", "y": "y" },
        "b": { "z": "z" }
    })
    .into()
}

fn failing_x() -> ResolverMap {
    let mut resolvers = ResolverMap::new();
    resolvers.insert(
        "B",
        "x",
        FnResolver::new(|_params: ResolveParams<'_>| Err(FieldError::new("x is gone"))),
    );
    resolvers
}

#[tokio::test]
/**
 * `B.x` is non-null and fails. `Query.a` is nullable, so `a` becomes null
 * and its sibling `b` is untouched.
 */
async fn null_stops_at_a_nullable_field() {
    init_logger();

    let response = run(
        &shape("B"),
        &failing_x(),
        &ExecutionConfig::default(),
        "{ a { x y } b { z } }",
        root(),
    )
    .await
    .expect("execution succeeds");

    insta::assert_snapshot!(pretty(&response.data), @r#"
    {
      "a": null,
      "b": {
        "z": "z"
      }
    }
    "#);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "x is gone");
    assert_eq!(
        response.errors[0].path.as_ref().map(|p| p.to_string()),
        Some("a.x".to_string())
    );
}

#[tokio::test]
/**
 * With `Query.a` non-null the null reaches the root, `data` is null and
 * the error that caused it is still reported.
 */
async fn null_reaching_the_root_nulls_data() {
    init_logger();

    let response = run(
        &shape("B!"),
        &failing_x(),
        &ExecutionConfig::default(),
        "{ a { x y } b { z } }",
        root(),
    )
    .await
    .expect("execution succeeds");

    assert_eq!(response.data, Value::Null);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "x is gone");
}

fn title_missing_for_second_book() -> ResolverMap {
    let mut resolvers = ResolverMap::new();
    resolvers.insert(
        "Book",
        "title",
        FnResolver::new(|params: ResolveParams<'_>| {
            if source_id(params.source) == "2" {
                return Ok(Value::Null.into());
            }
            Ok(params.source.get("title").cloned().unwrap_or_default().into())
        }),
    );
    resolvers.insert(
        "Query",
        "optionalLibrary",
        FnResolver::new(|params: ResolveParams<'_>| {
            Ok(params.source.get("library").cloned().unwrap_or_default().into())
        }),
    );
    resolvers
}

#[tokio::test]
/**
 * `Book.title: String!` in `[Book!]!` under `Library!`: nothing on the way up is nullable.
 * No error is made up for the missing title.
 */
async fn null_bubbles_through_non_null_lists() {
    init_logger();

    let response = run_library(
        "{ library { books { title } } }",
        &title_missing_for_second_book(),
    )
    .await;

    assert_eq!(response.data, Value::Null);
    assert!(response.errors.is_empty());
}

#[tokio::test]
async fn null_is_absorbed_by_a_nullable_parent_of_the_list() {
    init_logger();

    let response = run_library(
        "{ optionalLibrary { books { title } } library { name } }",
        &title_missing_for_second_book(),
    )
    .await;

    insta::assert_snapshot!(pretty(&response.data), @r#"
    {
      "optionalLibrary": null,
      "library": {
        "name": "Central"
      }
    }
    "#);
}

#[tokio::test]
async fn nullable_fields_stay_null_in_place() {
    init_logger();

    let response = run_library(
        "{ library { books { isbn author { rating } } } }",
        &ResolverMap::new(),
    )
    .await;

    insta::assert_snapshot!(pretty(&response.data), @r#"
    {
      "library": {
        "books": [
          {
            "isbn": "111",
            "author": {
              "rating": 4.5
            }
          },
          {
            "isbn": "222",
            "author": {
              "rating": 4.0
            }
          },
          {
            "isbn": null,
            "author": {
              "rating": null
            }
          }
        ]
      }
    }
    "#);
}
