use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use hive_tree_executor::{
    execute_operation, OperationDocument, OperationRequest, ResolverMap, SdlSchema, Value,
};
use hive_tree_executor_config::execution::{ExecutionConfig, ExecutionStrategyKind};
use std::hint::black_box;

const LIBRARY_SDL: &str = include_str!("../src/tests/fixtures/library.graphql");

const QUERY: &str = r#"
query Shelves {
  libraries {
    name
    featured { id title }
    books {
      id
      title
      isbn
      genre
      author { id name rating }
    }
  }
}
"#;

fn library(index: usize, books: usize) -> serde_json::Value {
    let books: Vec<serde_json::Value> = (0..books)
        .map(|book| {
            serde_json::json!({
                "id": format!("{}-{}", index, book),
                "title": format!("Book {}", book),
                "isbn": (book % 3 != 0).then(|| book.to_string()),
                "genre": if book % 2 == 0 { "NOVEL" } else { "POETRY" },
                "author": {
                    "id": format!("a{}", book % 17),
                    "name": format!("Author {}", book % 17),
                    "rating": (book % 5) as f64
                }
            })
        })
        .collect();

    serde_json::json!({
        "name": format!("Library {}", index),
        "featured": books.first().cloned(),
        "books": books
    })
}

fn root_value(libraries: usize, books: usize) -> Value {
    let libraries: Vec<serde_json::Value> =
        (0..libraries).map(|index| library(index, books)).collect();
    serde_json::json!({ "libraries": libraries }).into()
}

fn execute_library(c: &mut Criterion, name: &str, strategy: ExecutionStrategyKind) {
    let schema = SdlSchema::parse(LIBRARY_SDL).expect("valid schema");
    let document = OperationDocument::parse(QUERY).expect("valid query");
    let resolvers = ResolverMap::new();
    let config = ExecutionConfig {
        strategy,
        ..ExecutionConfig::default()
    };
    let root = root_value(20, 50);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");

    let (schema, document, resolvers, config) = (&schema, &document, &resolvers, &config);

    c.bench_function(name, |b| {
        b.to_async(&runtime).iter_batched(
            || root.clone(),
            |root_value| async move {
                let response = execute_operation(
                    black_box(schema),
                    resolvers,
                    config,
                    OperationRequest {
                        document,
                        operation_name: None,
                        root_value,
                        variables: None,
                    },
                )
                .await;
                black_box(response)
            },
            BatchSize::SmallInput,
        );
    });
}

fn execute_batched(c: &mut Criterion) {
    execute_library(c, "execute_operation_batched", ExecutionStrategyKind::Batched);
}

fn execute_per_object(c: &mut Criterion) {
    execute_library(c, "execute_operation_per_object", ExecutionStrategyKind::PerObject);
}

criterion_group!(benches, execute_batched, execute_per_object);
criterion_main!(benches);
