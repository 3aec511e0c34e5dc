use async_trait::async_trait;
use hive_tree_executor_config::execution::ExecutionConfig;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::{
    ast::document::{OperationDocument, OperationKind},
    execution::{
        error::ExecutionError,
        plan::{execute_operation, OperationRequest},
    },
    resolvers::{
        common::{FetchResult, FieldResolver, FieldResolverBoxedArc, ResolveParams},
        function::FnResolver,
        map::ResolverMap,
    },
    response::{
        graphql_error::{FieldError, GraphQLErrorKind},
        response::ExecutionResponse,
        value::Value,
    },
    tests::testkit::{init_logger, library_root, library_schema, pretty, run, run_library},
};

async fn run_request(
    query: &str,
    operation_name: Option<&str>,
    variables: Option<Value>,
    resolvers: &ResolverMap,
) -> Result<ExecutionResponse, ExecutionError> {
    let document = OperationDocument::parse(query).expect("valid query");

    execute_operation(
        &library_schema(),
        resolvers,
        &ExecutionConfig::default(),
        OperationRequest {
            document: &document,
            operation_name,
            root_value: library_root(),
            variables,
        },
    )
    .await
}

/// Appends its `value` argument to a shared log and answers the log.
/// Earlier values take longer, so concurrent calls would finish in reverse.
#[derive(Clone, Default)]
struct AppendResolver {
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl FieldResolver for AppendResolver {
    async fn resolve<'a>(&self, params: ResolveParams<'a>) -> Result<FetchResult, FieldError> {
        let value = params
            .arguments
            .get("value")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let delay = if value == "a" { 30 } else { 0 };
        tokio::time::sleep(Duration::from_millis(delay)).await;

        let mut log = self.log.lock().expect("not poisoned");
        log.push(value);
        Ok(Value::Array(log.iter().map(|v| Value::from(v.as_str())).collect()).into())
    }
}

fn echo_resolvers() -> ResolverMap {
    let mut resolvers = ResolverMap::new();
    resolvers.insert(
        "Query",
        "echo",
        FnResolver::new(|params: ResolveParams<'_>| {
            let value = params
                .arguments
                .get("value")
                .and_then(Value::as_str)
                .unwrap_or("none");
            let count = params
                .arguments
                .get("count")
                .and_then(Value::as_i64)
                .unwrap_or_default();
            Ok(Value::String(format!("{}x{}", value, count)).into())
        }),
    );
    resolvers
}

#[tokio::test]
/**
 * Top-level mutation fields run one after another, in selection order.
 */
async fn mutation_fields_run_serially() {
    init_logger();

    let mut resolvers = ResolverMap::new();
    resolvers.insert("Mutation", "append", AppendResolver::default());

    let response = run_request(
        r#"mutation { first: append(value: "a") second: append(value: "b") }"#,
        None,
        None,
        &resolvers,
    )
    .await
    .expect("execution succeeds");

    insta::assert_snapshot!(pretty(&response.data), @r#"
    {
      "first": [
        "a"
      ],
      "second": [
        "a",
        "b"
      ]
    }
    "#);
}

#[tokio::test]
async fn missing_root_type_is_an_error() {
    init_logger();

    let result = run_request(
        "subscription { library { name } }",
        None,
        None,
        &ResolverMap::new(),
    )
    .await;

    assert_eq!(
        result.err(),
        Some(ExecutionError::MissingRootType(OperationKind::Subscription))
    );
}

#[tokio::test]
async fn operation_is_picked_by_name() {
    init_logger();

    let query = "query A { library { name } } query B { __typename }";

    let response = run_request(query, Some("B"), None, &ResolverMap::new())
        .await
        .expect("execution succeeds");
    assert_eq!(
        response.data,
        Value::object([("__typename", Value::from("Query"))])
    );

    let unknown = run_request(query, Some("C"), None, &ResolverMap::new()).await;
    assert_eq!(
        unknown.err(),
        Some(ExecutionError::Document(
            "Operation 'C' is not defined in the document".to_string()
        ))
    );

    let ambiguous = run_request(query, None, None, &ResolverMap::new()).await;
    assert!(matches!(ambiguous, Err(ExecutionError::Document(_))));
}

#[tokio::test]
/**
 * Arguments take provided variables first, then variable defaults, then
 * argument defaults from the schema.
 */
async fn arguments_are_coerced_with_defaults() {
    init_logger();

    let query = r#"
        query Echo($value: String = "dflt", $count: Int) {
          plain: echo(value: "z")
          defaulted: echo(value: $value, count: $count)
          counted: echo(value: $value, count: 3)
        }
    "#;

    let response = run_request(query, None, None, &echo_resolvers())
        .await
        .expect("execution succeeds");
    insta::assert_snapshot!(pretty(&response.data), @r#"
    {
      "plain": "zx1",
      "defaulted": "dfltx1",
      "counted": "dfltx3"
    }
    "#);

    let response = run_request(
        query,
        None,
        Some(Value::object([
            ("value", Value::from("hi")),
            ("count", Value::I64(2)),
        ])),
        &echo_resolvers(),
    )
    .await
    .expect("execution succeeds");
    insta::assert_snapshot!(pretty(&response.data), @r#"
    {
      "plain": "zx1",
      "defaulted": "hix2",
      "counted": "hix3"
    }
    "#);
}

#[tokio::test]
async fn skip_and_include_directives() {
    init_logger();

    let query = r#"
        query Shelf($show: Boolean!) {
          library {
            name @skip(if: true)
            featured @include(if: true) { id }
            books @include(if: $show) { id }
          }
        }
    "#;

    let hidden = run_request(
        query,
        None,
        Some(Value::object([("show", Value::Bool(false))])),
        &ResolverMap::new(),
    )
    .await
    .expect("execution succeeds");
    insta::assert_snapshot!(pretty(&hidden.data), @r#"
    {
      "library": {
        "featured": {
          "id": "2"
        }
      }
    }
    "#);

    let shown = run_request(
        query,
        None,
        Some(Value::object([("show", Value::Bool(true))])),
        &ResolverMap::new(),
    )
    .await
    .expect("execution succeeds");
    assert_eq!(
        shown
            .data
            .get("library")
            .and_then(|library| library.get("books"))
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(3)
    );
}

fn search_resolvers() -> ResolverMap {
    let mut resolvers = ResolverMap::new();
    resolvers.insert(
        "Query",
        "search",
        FnResolver::new(|_params: ResolveParams<'_>| {
            Ok(Value::from(serde_json::json!([
                { "__typename": "Book", "id": "1", "title": "Dune" },
                { "__typename": "Author", "id": "a2", "name": "Jane" }
            ]))
            .into())
        }),
    );
    resolvers
}

#[tokio::test]
/**
 * Union members are completed as their concrete type, fragments apply per member.
 */
async fn union_members_use_their_concrete_type() {
    init_logger();

    let response = run_library(
        r#"
        {
          search(term: "e") {
            __typename
            ... on Node { id }
            ... on Book { title }
            ... on Author { name }
          }
        }
        "#,
        &search_resolvers(),
    )
    .await;

    assert!(response.errors.is_empty());
    insta::assert_snapshot!(pretty(&response.data), @r#"
    {
      "search": [
        {
          "__typename": "Book",
          "id": "1",
          "title": "Dune"
        },
        {
          "__typename": "Author",
          "id": "a2",
          "name": "Jane"
        }
      ]
    }
    "#);
}

#[tokio::test]
async fn unresolvable_concrete_type_is_a_field_error() {
    init_logger();

    let mut resolvers = ResolverMap::new();
    resolvers.insert(
        "Query",
        "search",
        FnResolver::new(|_params: ResolveParams<'_>| {
            Ok(Value::from(serde_json::json!([{ "id": "1" }])).into())
        }),
    );

    let response = run_library(r#"{ search(term: "e") { __typename } }"#, &resolvers).await;

    assert_eq!(response.data, Value::Null);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].kind, GraphQLErrorKind::UnresolvedType);
    assert_eq!(
        response.errors[0].path.as_ref().map(|p| p.to_string()).as_deref(),
        Some("search.0")
    );
}

#[tokio::test]
async fn enum_values_are_checked() {
    init_logger();

    let response = run_library("{ library { books { genre } } }", &ResolverMap::new()).await;
    insta::assert_snapshot!(pretty(&response.data), @r#"
    {
      "library": {
        "books": [
          {
            "genre": "NOVEL"
          },
          {
            "genre": "NOVEL"
          },
          {
            "genre": "POETRY"
          }
        ]
      }
    }
    "#);

    let mut resolvers = ResolverMap::new();
    resolvers.insert(
        "Book",
        "genre",
        FnResolver::new(|_params: ResolveParams<'_>| Ok(Value::from("EPIC").into())),
    );
    let response = run(
        &library_schema(),
        &resolvers,
        &ExecutionConfig::default(),
        "{ library { featured { genre } } }",
        library_root(),
    )
    .await
    .expect("execution succeeds");

    assert_eq!(
        response.data,
        Value::object([(
            "library",
            Value::object([("featured", Value::object([("genre", Value::Null)]))])
        )])
    );
    assert_eq!(response.errors[0].kind, GraphQLErrorKind::Serialization);
}

#[tokio::test]
async fn response_serializes_without_empty_errors() {
    init_logger();

    let response = run_library("{ library { name } }", &ResolverMap::new()).await;

    assert_eq!(
        serde_json::to_string(&response).expect("serializable"),
        r#"{"data":{"library":{"name":"Central"}}}"#
    );
}

fn coordinate_fallback() -> FieldResolverBoxedArc {
    FnResolver::new(|params: ResolveParams<'_>| {
        Ok(Value::String(format!("fallback for {}", params.step_info.coordinate())).into())
    })
    .to_boxed_arc()
}

#[tokio::test]
/**
 * Fields without a registered resolver go to the fallback, registered ones do not.
 */
async fn unregistered_fields_use_the_fallback() {
    init_logger();

    let registered = echo_resolvers().with_fallback(coordinate_fallback());
    assert!(registered.contains("Query", "echo"));
    assert!(!registered.contains("Query", "optionalLibrary"));
    assert!(!registered.contains("Mutation", "echo"));

    let response = run_library(r#"{ echo(value: "e") a: __typename }"#, &registered).await;
    assert_eq!(
        response.data,
        Value::object([("echo", Value::from("ex1")), ("a", Value::from("Query"))])
    );

    let unregistered = ResolverMap::new().with_fallback(coordinate_fallback());
    assert!(!unregistered.contains("Query", "echo"));

    let response = run_library(r#"{ echo(value: "e") }"#, &unregistered).await;
    assert_eq!(
        response.data,
        Value::object([("echo", Value::from("fallback for Query.echo"))])
    );
}
