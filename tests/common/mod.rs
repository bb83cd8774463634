#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use coursebook::error::{FailureKind, Operation, StoreError};
use coursebook::models::{Course, CourseFields};
use coursebook::store::{CourseStore, InMemoryCourseStore, Listing, SqliteCourseStore};
use sqlx::sqlite::SqlitePoolOptions;

/// Store whose every call fails with the same kind. Counts how often it was called.
pub struct FailingStore {
    kind: FailureKind,
    message: &'static str,
    calls: AtomicUsize,
}

impl FailingStore {
    pub fn new(kind: FailureKind, message: &'static str) -> Self {
        Self {
            kind,
            message,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self::new(FailureKind::Network, "connection refused")
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self, operation: Operation) -> StoreError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StoreError::new(operation, self.kind, self.message)
    }
}

#[async_trait]
impl CourseStore for FailingStore {
    async fn create(&self, _fields: &CourseFields) -> Result<Course, StoreError> {
        Err(self.fail(Operation::Create))
    }

    async fn list(&self) -> Result<Listing, StoreError> {
        Err(self.fail(Operation::List))
    }

    async fn update(&self, _id: &str, _fields: &CourseFields) -> Result<Course, StoreError> {
        Err(self.fail(Operation::Update))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(self.fail(Operation::Delete))
    }
}

pub fn algorithms() -> CourseFields {
    CourseFields::new("Algorithms", "6 weeks", "Intro to DS&A")
}

pub fn memory_store() -> Arc<dyn CourseStore> {
    Arc::new(InMemoryCourseStore::new())
}

/// A single-connection pool so every query sees the same in-memory database.
pub async fn sqlite_store() -> Arc<dyn CourseStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    let store = SqliteCourseStore::new(pool);
    store.migrate().await.expect("Failed to run migrations");
    Arc::new(store)
}
