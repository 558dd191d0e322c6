//! Integration tests for the scan job lifecycle and store

mod common;

use common::fixtures;
use sentinel::application::normalizer::normalize;
use sentinel::application::query::JobFilter;
use sentinel::domain::report::Report;
use sentinel::domain::value_objects::{JobStatus, ScanMode, ScanType};
use sentinel::infrastructure::job_store::{
    InMemoryJobStore, JobStore, JobStoreError, StatusChange,
};

fn sample_report() -> Report {
    normalize(
        &fixtures::audit_document(),
        ScanType::JavaCode,
        ScanMode::Audit,
    )
    .unwrap()
}

#[tokio::test]
async fn test_create_returns_pending_job() {
    let store = InMemoryJobStore::new();
    let job = store
        .create("payroll-api".into(), ScanType::OpenApi, ScanMode::Audit)
        .await
        .unwrap();

    assert_eq!(job.status, JobStatus::Pending);
    let fetched = store.get(job.id).await.unwrap();
    assert_eq!(fetched.id, job.id);
    assert_eq!(fetched.target_name, "payroll-api");
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let store = InMemoryJobStore::new();
    let err = store.get(uuid::Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, JobStoreError::NotFound(_)));
}

#[tokio::test]
async fn test_completion_sets_report_and_failure_sets_error() {
    let store = InMemoryJobStore::new();

    let job = store
        .create("a".into(), ScanType::JavaCode, ScanMode::Audit)
        .await
        .unwrap();
    store.transition(job.id, StatusChange::Started).await.unwrap();
    let completed = store
        .transition(job.id, StatusChange::Completed(sample_report()))
        .await
        .unwrap();
    assert_eq!(completed.status, JobStatus::Completed);
    assert!(completed.report.is_some());
    assert!(completed.error.is_none());

    let job = store
        .create("b".into(), ScanType::JavaCode, ScanMode::Audit)
        .await
        .unwrap();
    store.transition(job.id, StatusChange::Started).await.unwrap();
    let failed = store
        .transition(job.id, StatusChange::Failed("backend timeout".into()))
        .await
        .unwrap();
    assert_eq!(failed.status, JobStatus::Failed);
    assert!(failed.report.is_none());
    assert_eq!(failed.error.as_deref(), Some("backend timeout"));
}

#[tokio::test]
async fn test_terminal_jobs_are_immutable() {
    let store = InMemoryJobStore::new();
    let job = store
        .create("a".into(), ScanType::JavaCode, ScanMode::Audit)
        .await
        .unwrap();
    store.transition(job.id, StatusChange::Started).await.unwrap();
    store
        .transition(job.id, StatusChange::Failed("boom".into()))
        .await
        .unwrap();

    let err = store
        .transition(job.id, StatusChange::Completed(sample_report()))
        .await
        .unwrap_err();
    assert!(matches!(err, JobStoreError::InvalidTransition(_)));

    // The losing transition did not corrupt the job
    let fetched = store.get(job.id).await.unwrap();
    assert_eq!(fetched.status, JobStatus::Failed);
    assert!(fetched.report.is_none());
}

#[tokio::test]
async fn test_pending_cannot_jump_to_terminal() {
    let store = InMemoryJobStore::new();
    let job = store
        .create("a".into(), ScanType::JavaCode, ScanMode::Audit)
        .await
        .unwrap();
    let err = store
        .transition(job.id, StatusChange::Completed(sample_report()))
        .await
        .unwrap_err();
    assert!(matches!(err, JobStoreError::InvalidTransition(_)));
}

#[tokio::test]
async fn test_racing_transitions_have_exactly_one_winner() {
    let store = std::sync::Arc::new(InMemoryJobStore::new());
    let job = store
        .create("raced".into(), ScanType::JavaCode, ScanMode::Audit)
        .await
        .unwrap();
    store.transition(job.id, StatusChange::Started).await.unwrap();

    let left = {
        let store = store.clone();
        let id = job.id;
        tokio::spawn(async move {
            store
                .transition(id, StatusChange::Completed(sample_report()))
                .await
        })
    };
    let right = {
        let store = store.clone();
        let id = job.id;
        tokio::spawn(async move {
            store
                .transition(id, StatusChange::Completed(sample_report()))
                .await
        })
    };

    let (left, right) = (left.await.unwrap(), right.await.unwrap());
    let winners = [&left, &right].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one racing transition may win");

    let loser = if left.is_err() { left } else { right };
    assert!(matches!(
        loser.unwrap_err(),
        JobStoreError::InvalidTransition(_)
    ));

    let fetched = store.get(job.id).await.unwrap();
    assert_eq!(fetched.status, JobStatus::Completed);
}

#[tokio::test]
async fn test_list_is_most_recent_first() {
    let store = InMemoryJobStore::new();
    let first = store
        .create("first".into(), ScanType::JavaCode, ScanMode::Audit)
        .await
        .unwrap();
    let second = store
        .create("second".into(), ScanType::OpenApi, ScanMode::Forge)
        .await
        .unwrap();

    let listed = store.list(&JobFilter::default()).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}
