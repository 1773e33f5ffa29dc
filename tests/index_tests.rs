// Copyright (c) 2026 content-index contributors
// SPDX-License-Identifier: Apache-2.0
//! End-to-end index service tests using in-memory sources.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use content_index::{
    Criteria, IndexConfig, IndexDocument, IndexError, IndexService, IndexSource, Record,
    StaticIndexSource,
};

/// Source that counts loads and delays, for observing single-flight behavior.
struct CountingSource {
    loads: AtomicUsize,
    records: Vec<Record>,
}

#[async_trait]
impl IndexSource for CountingSource {
    async fn load(&self, _path: &str) -> Result<Vec<Record>, IndexError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        Ok(self.records.clone())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn blog_records() -> Vec<Record> {
    vec![
        Record::new()
            .with("title", "Getting Started")
            .with("category", "Tutorial")
            .with("path", "2021/getting-started.html"),
        Record::new()
            .with("title", "Spark Tips")
            .with("category", "Blog")
            .with("path", "2021/spark-tips.html"),
        Record::new()
            .with("title", "Launch Recap")
            .with("category", "company-news")
            .with("path", "2021/launch-recap.html"),
    ]
}

fn service_with(records: Vec<Record>) -> IndexService {
    init_tracing();
    let source = StaticIndexSource::new().with_index("/blog-index.json", records);
    IndexService::with_source(IndexConfig::default(), Arc::new(source))
}

/// Route service logs through the test writer so `--nocapture` shows them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn query_matches_single_category() {
    let service = service_with(blog_records());

    let response = service
        .blog_posts(&Criteria::new().field("category", "blog"))
        .await
        .unwrap();

    assert_eq!(response.total, 3);
    assert_eq!(response.records.len(), 1);
    assert_eq!(response.records[0].field("title"), Some("Spark Tips"));
}

#[tokio::test]
async fn query_or_fragments_and_multi_field() {
    let service = service_with(blog_records());

    // "news" fragment catches "company-news" even though "blog" does not.
    let response = service
        .blog_posts(&Criteria::new().field_any("category", ["blog", "news"]))
        .await
        .unwrap();
    assert_eq!(response.records.len(), 2);

    // AND across fields excludes records matching only one.
    let response = service
        .blog_posts(
            &Criteria::new()
                .field("category", "blog")
                .field("title", "recap"),
        )
        .await
        .unwrap();
    assert!(response.records.is_empty());
}

#[tokio::test]
async fn empty_criteria_returns_full_index_in_order() {
    let service = service_with(blog_records());

    let response = service.blog_posts(&Criteria::new()).await.unwrap();
    let titles: Vec<_> = response
        .records
        .iter()
        .map(|r| r.field("title").unwrap())
        .collect();
    assert_eq!(titles, vec!["Getting Started", "Spark Tips", "Launch Recap"]);
}

#[tokio::test]
async fn filtering_already_filtered_result_is_idempotent() {
    let service = service_with(blog_records());
    let criteria = Criteria::new().field("category", "blog");

    let once = service.blog_posts(&criteria).await.unwrap().records;
    let twice = criteria.filter(&once);
    assert_eq!(once, twice);
}

#[tokio::test]
async fn concurrent_queries_trigger_one_load() {
    init_tracing();
    let source = Arc::new(CountingSource {
        loads: AtomicUsize::new(0),
        records: blog_records(),
    });
    let service = Arc::new(IndexService::with_source(
        IndexConfig::default(),
        Arc::clone(&source) as Arc<dyn IndexSource>,
    ));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.blog_posts(&Criteria::new()).await })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap().total, 3);
    }
    assert_eq!(source.loads.load(Ordering::SeqCst), 1);

    // Later queries keep hitting the cache.
    let response = service.blog_posts(&Criteria::new()).await.unwrap();
    assert!(response.cached);
    assert_eq!(source.loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn clear_cache_reloads_on_next_query() {
    init_tracing();
    let source = Arc::new(CountingSource {
        loads: AtomicUsize::new(0),
        records: blog_records(),
    });
    let service = IndexService::with_source(
        IndexConfig::default(),
        Arc::clone(&source) as Arc<dyn IndexSource>,
    );

    service.blog_posts(&Criteria::new()).await.unwrap();
    service.clear_cache();
    service.blog_posts(&Criteria::new()).await.unwrap();

    assert_eq!(source.loads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn wire_document_parses_into_filterable_records() {
    let body = r#"{
        "data": [
            {"title": "adobe spark", "category": "Blog", "path": "2021/spark.html"},
            {"title": "other", "category": "Tutorial", "path": "2021/other.html"}
        ]
    }"#;
    let document: IndexDocument = serde_json::from_str(body).unwrap();

    let matched = Criteria::new().field("title", "ADOBE").filter(&document.data);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].path(), Some("2021/spark.html"));
}

#[tokio::test]
async fn missing_index_surfaces_typed_status_error() {
    init_tracing();
    let service = IndexService::with_source(
        IndexConfig::default(),
        Arc::new(StaticIndexSource::new()),
    );

    let err = service.blog_posts(&Criteria::new()).await.unwrap_err();
    match err {
        IndexError::Status { status, .. } => assert_eq!(status, 404),
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn merged_shards_and_page_filter() {
    init_tracing();
    let source = StaticIndexSource::new()
        .with_index(
            "/index-a.json",
            vec![
                Record::new()
                    .with("title", "Zebra")
                    .with("path", "make/zebra.html"),
                Record::new()
                    .with("title", "Apple")
                    .with("path", "make/apple.html"),
            ],
        )
        .with_index(
            "/index-b.json",
            vec![Record::new()
                .with("title", "Pricing")
                .with("path", "pricing.html")],
        );
    let service = IndexService::with_source(IndexConfig::default(), Arc::new(source));
    let shards = vec!["/index-a.json".to_string(), "/index-b.json".to_string()];

    let merged = service.load_merged(&shards).await.unwrap();
    let paths: Vec<_> = merged.iter().map(|r| r.path().unwrap()).collect();
    assert_eq!(paths, vec!["make/apple.html", "make/zebra.html", "pricing.html"]);

    let matches = service.find_pages(&shards, "make").await.unwrap();
    assert_eq!(matches.total, 2);
    assert_eq!(matches.hits[0].path, "/make/apple");
    assert_eq!(matches.hits[1].path, "/make/zebra");
}
