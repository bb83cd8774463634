pub mod firestore;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::{FailureKind, Operation, StoreError};
use crate::models::{Course, CourseFields};

pub use firestore::{FirestoreConfig, FirestoreHttpClient};
pub use memory::InMemoryCourseStore;
pub use sqlite::SqliteCourseStore;

/// Result of listing the collection. An empty collection is not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Empty,
    Courses(Vec<Course>),
}

impl Listing {
    pub fn from_courses(courses: Vec<Course>) -> Self {
        if courses.is_empty() {
            Listing::Empty
        } else {
            Listing::Courses(courses)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }

    pub fn len(&self) -> usize {
        match self {
            Listing::Empty => 0,
            Listing::Courses(courses) => courses.len(),
        }
    }

    pub fn into_courses(self) -> Vec<Course> {
        match self {
            Listing::Empty => Vec::new(),
            Listing::Courses(courses) => courses,
        }
    }
}

/// Client for a remote `Courses` collection.
///
/// Every call is an independent round trip: nothing is cached and nothing is
/// retried. Ids are assigned by the store on create; `create` never receives one.
/// Dropping a returned future abandons the call.
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn create(&self, fields: &CourseFields) -> Result<Course, StoreError>;

    async fn list(&self) -> Result<Listing, StoreError>;

    /// Full replace of the named document; creates it when absent.
    async fn update(&self, id: &str, fields: &CourseFields) -> Result<Course, StoreError>;

    /// Removing a document that does not exist succeeds.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

pub(crate) fn require_id(operation: Operation, id: &str) -> Result<(), StoreError> {
    if id.is_empty() {
        return Err(StoreError::new(
            operation,
            FailureKind::InvalidArgument,
            "document id must not be empty",
        ));
    }
    Ok(())
}
