use hive_tree_executor_config::execution::ExecutionStrategyKind;

use crate::{
    resolvers::{common::ResolveParams, function::FnResolver, map::ResolverMap},
    response::value::Value,
    tests::testkit::{
        config, init_logger, library_root, library_schema, pretty, run, run_library,
        RecordingBatchResolver,
    },
};

fn with_author_names(batch: &RecordingBatchResolver) -> ResolverMap {
    let mut resolvers = ResolverMap::new();
    resolvers.insert("Author", "name", batch.clone());
    resolvers
}

#[tokio::test]
/**
 * All elements of a list share one field map, so `Author.name` is fetched
 * with a single call for the three authors.
 */
async fn list_elements_are_batched_into_one_call() {
    init_logger();

    let batch = RecordingBatchResolver::new("name-of-");
    let response = run_library("{ authors { id name } }", &with_author_names(&batch)).await;

    insta::assert_snapshot!(pretty(&response.data), @r#"
    {
      "authors": [
        {
          "id": "a1",
          "name": "name-of-a1"
        },
        {
          "id": "a2",
          "name": "name-of-a2"
        },
        {
          "id": "a3",
          "name": "name-of-a3"
        }
      ]
    }
    "#);
    assert!(response.errors.is_empty());
    assert_eq!(
        batch.calls(),
        vec![vec!["a1".to_string(), "a2".to_string(), "a3".to_string()]]
    );
    assert_eq!(
        batch.paths(),
        vec!["authors.0.name", "authors.1.name", "authors.2.name"]
    );
}

#[tokio::test]
async fn per_object_strategy_calls_once_per_object() {
    init_logger();

    let batched = run_library(
        "{ authors { id name } }",
        &with_author_names(&RecordingBatchResolver::new("name-of-")),
    )
    .await;

    let batch = RecordingBatchResolver::new("name-of-");
    let response = run(
        &library_schema(),
        &with_author_names(&batch),
        &config(ExecutionStrategyKind::PerObject),
        "{ authors { id name } }",
        library_root(),
    )
    .await
    .expect("execution succeeds");

    assert_eq!(response.data, batched.data);

    let mut calls = batch.calls();
    calls.sort();
    assert_eq!(
        calls,
        vec![
            vec!["a1".to_string()],
            vec!["a2".to_string()],
            vec!["a3".to_string()],
        ]
    );
}

#[tokio::test]
/**
 * The authors of `featured` and of `books` sit at different depths of the selection
 * but reach the same level of the tree. Selected through the same fragment they
 * share their field map and are fetched together, in tree order.
 */
async fn objects_sharing_a_fragment_are_batched_across_paths() {
    init_logger();

    let batch = RecordingBatchResolver::new("");
    let response = run_library(
        r#"
        query {
          library {
            featured { author { ...AuthorName } }
            books { author { ...AuthorName } }
          }
        }
        fragment AuthorName on Author { name }
        "#,
        &with_author_names(&batch),
    )
    .await;

    assert!(response.errors.is_empty());
    assert_eq!(
        batch.calls(),
        vec![vec![
            "a2".to_string(),
            "a1".to_string(),
            "a2".to_string(),
            "a3".to_string(),
        ]]
    );
    assert_eq!(
        batch.paths(),
        vec![
            "library.featured.author.name",
            "library.books.0.author.name",
            "library.books.1.author.name",
            "library.books.2.author.name",
        ]
    );
}

#[tokio::test]
async fn separate_selections_are_separate_batches() {
    init_logger();

    let batch = RecordingBatchResolver::new("");
    let response = run_library(
        "{ library { featured { author { name } } books { author { name } } } }",
        &with_author_names(&batch),
    )
    .await;

    assert!(response.errors.is_empty());
    assert_eq!(
        batch.calls(),
        vec![
            vec!["a2".to_string()],
            vec!["a1".to_string(), "a2".to_string(), "a3".to_string()],
        ]
    );
}

#[tokio::test]
/**
 * Members of a union list are grouped by their concrete type.
 */
async fn abstract_positions_are_grouped_by_concrete_type() {
    init_logger();

    let batch = RecordingBatchResolver::new("name-of-");
    let mut resolvers = with_author_names(&batch);
    resolvers.insert(
        "Query",
        "search",
        FnResolver::new(|_params: ResolveParams<'_>| {
            Ok(Value::from(serde_json::json!([
                { "__typename": "Author", "id": "a1" },
                { "__typename": "Book", "id": "1", "title": "Dune" },
                { "__typename": "Author", "id": "a2" }
            ]))
            .into())
        }),
    );

    let response = run_library(
        r#"{ search(term: "x") { ... on Author { name } ... on Book { title } } }"#,
        &resolvers,
    )
    .await;

    assert!(response.errors.is_empty());
    assert_eq!(
        batch.calls(),
        vec![vec!["a1".to_string(), "a2".to_string()]]
    );
    insta::assert_snapshot!(pretty(&response.data), @r#"
    {
      "search": [
        {
          "name": "name-of-a1"
        },
        {
          "title": "Dune"
        },
        {
          "name": "name-of-a2"
        }
      ]
    }
    "#);
}
