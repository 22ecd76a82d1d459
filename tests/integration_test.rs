//! End-to-end tests for `Pipeline::process_message` through the public API.

mod helpers;

use greencheck_ingest::config::{DEFAULT_NAMESPACE, DEFAULT_RESULT_KEY};
use greencheck_ingest::{
    CacheWrite, ClassifyError, DomainClassifier, FieldSchema, Outcome, Pipeline, ProcessError,
    PublicSuffixClassifier,
};
use helpers::{count_rows, create_test_pool, insert_provider, SitecheckMessage};
use sqlx::Row;

async fn pipeline_with_provider() -> Pipeline<PublicSuffixClassifier> {
    let pool = create_test_pool().await;
    insert_provider(&pool, 42, "Green Host", "greenhost.example").await;
    Pipeline::new(
        pool,
        PublicSuffixClassifier,
        FieldSchema::new(DEFAULT_NAMESPACE).unwrap(),
        DEFAULT_RESULT_KEY,
    )
}

#[tokio::test]
async fn test_hosted_then_grey_check_of_same_url() {
    let pipeline = pipeline_with_provider().await;
    let pool = pipeline.reconciler().pool().clone();

    let hosted = pipeline
        .process_message(&SitecheckMessage::green("www.example.com", 42).encode())
        .await;
    assert_eq!(hosted.outcome, Outcome::LoggedHosted);
    assert_eq!(hosted.cache_write, Some(CacheWrite::Created));

    let grey = pipeline
        .process_message(
            &SitecheckMessage::grey("www.example.com")
                .checked_at("2019-12-24 18:00:00.000000")
                .encode(),
        )
        .await;
    assert_eq!(grey.outcome, Outcome::LoggedUnhosted);
    assert_eq!(grey.cache_write, None);

    let rows = sqlx::query("SELECT green, id_hp, type, tld FROM greencheck ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get::<String, _>("green"), "yes");
    assert_eq!(rows[0].get::<Option<i64>, _>("id_hp"), Some(42));
    assert_eq!(rows[0].get::<Option<String>, _>("type").as_deref(), Some("ip"));
    assert_eq!(rows[0].get::<String, _>("tld"), "com");
    assert_eq!(rows[1].get::<String, _>("green"), "no");
    assert_eq!(rows[1].get::<Option<i64>, _>("id_hp"), None);

    let (green, modified): (bool, String) =
        sqlx::query_as("SELECT green, modified FROM greendomain WHERE url = ?")
            .bind("www.example.com")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(green);
    assert_eq!(modified, "2019-11-14 10:00:00");
}

#[tokio::test]
async fn test_rejected_and_dropped_messages_write_no_log_rows() {
    let pipeline = pipeline_with_provider().await;
    let pool = pipeline.reconciler().pool().clone();

    let rejected = pipeline
        .process_message(&SitecheckMessage::grey("no such host!").encode())
        .await;
    assert_eq!(rejected.outcome, Outcome::Rejected);
    assert!(matches!(
        rejected.error,
        Some(ProcessError::Classify(ClassifyError::NotADomain(_)))
    ));

    let mut missing_date = SitecheckMessage::grey("example.net");
    missing_date.checked_at = None;
    let dropped = pipeline.process_message(&missing_date.encode()).await;
    assert_eq!(dropped.outcome, Outcome::Dropped);

    let garbage = pipeline.process_message(b"a:1:{s:6:\"result\";").await;
    assert_eq!(garbage.outcome, Outcome::Dropped);

    assert_eq!(count_rows(&pool, "greencheck").await, 0);
    assert_eq!(count_rows(&pool, "greendomain").await, 0);
    assert_eq!(pipeline.stats().total_messages(), 3);
}

#[tokio::test]
async fn test_ipv6_literal_url_is_logged() {
    let pipeline = pipeline_with_provider().await;
    let pool = pipeline.reconciler().pool().clone();

    let report = pipeline
        .process_message(&SitecheckMessage::grey("http://[2001:db8::1]/").encode())
        .await;
    assert!(report.is_ok());

    let tld: String = sqlx::query_scalar("SELECT tld FROM greencheck")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(tld, "");
}

#[tokio::test]
async fn test_custom_classifier_is_used() {
    struct FixedTld;
    impl DomainClassifier for FixedTld {
        fn classify(&self, _url: &str) -> Result<String, ClassifyError> {
            Ok("test".to_string())
        }
    }

    let pool = create_test_pool().await;
    let pipeline = Pipeline::new(
        pool.clone(),
        FixedTld,
        FieldSchema::new(DEFAULT_NAMESPACE).unwrap(),
        DEFAULT_RESULT_KEY,
    );
    let report = pipeline
        .process_message(&SitecheckMessage::grey("anything").encode())
        .await;
    assert!(report.is_ok());

    let tld: String = sqlx::query_scalar("SELECT tld FROM greencheck")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(tld, "test");
}

#[tokio::test]
async fn test_other_namespace_does_not_match_fields() {
    let pool = create_test_pool().await;
    let pipeline = Pipeline::new(
        pool,
        PublicSuffixClassifier,
        FieldSchema::new("Other\\Namespace\\Result").unwrap(),
        DEFAULT_RESULT_KEY,
    );
    let report = pipeline
        .process_message(&SitecheckMessage::grey("example.org").encode())
        .await;

    // No field resolves, so the url is missing
    assert_eq!(report.outcome, Outcome::Dropped);
    assert!(matches!(report.error, Some(ProcessError::MissingField(_))));
}
