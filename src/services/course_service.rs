use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::{Operation, StoreError};
use crate::models::{Course, CourseFields, ValidationError, validate_id};
use crate::store::{CourseStore, Listing};

/// Caller side of the course store: validates input before any round trip and
/// turns every result into something a user can be shown.
#[derive(Clone)]
pub struct CourseService {
    store: Arc<dyn CourseStore>,
}

/// A request from the presentation layer.
#[derive(Debug, Clone)]
pub enum Command {
    Create(CourseFields),
    List,
    Update { id: String, fields: CourseFields },
    Delete { id: String },
}

/// Completed request, handed back to the presentation layer.
#[derive(Debug, Clone)]
pub enum Outcome {
    Created(Course),
    Listed(Listing),
    Updated(Course),
    Deleted(String),
    Invalid(ValidationError),
    Failed(StoreError),
}

/// Why a service call did not reach, or did not survive, the store.
#[derive(Debug, Clone, Error)]
pub enum CourseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Invalid(_) | Outcome::Failed(_))
    }

    /// Text for the user-facing notification.
    pub fn notice(&self) -> String {
        match self {
            Outcome::Created(_) => "Your course has been added".to_string(),
            Outcome::Listed(Listing::Empty) => "No data found in Database".to_string(),
            Outcome::Listed(listing) => format!("Loaded {} courses", listing.len()),
            Outcome::Updated(_) => "Course Updated successfully..".to_string(),
            Outcome::Deleted(_) => "Course Deleted successfully..".to_string(),
            Outcome::Invalid(e) => e.to_string(),
            Outcome::Failed(e) => match e.operation() {
                Operation::Create => format!("Fail to add course: {}", e.message()),
                Operation::List => "Fail to get the data.".to_string(),
                Operation::Update => format!("Fail to update course : {}", e.message()),
                Operation::Delete => "Fail to delete course..".to_string(),
            },
        }
    }

    /// Courses to render. A failed listing renders as an empty list.
    pub fn courses(&self) -> Vec<Course> {
        match self {
            Outcome::Listed(listing) => listing.clone().into_courses(),
            _ => Vec::new(),
        }
    }
}

impl CourseService {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    pub async fn add_course(&self, fields: CourseFields) -> Result<Course, CourseError> {
        fields.validate()?;
        let course = self
            .store
            .create(&fields)
            .await
            .inspect_err(|e| warn!("Failed to add course {}: {}", fields.name, e))?;
        info!("Added course {} ({})", course.name, course.id);
        Ok(course)
    }

    pub async fn list_courses(&self) -> Result<Listing, CourseError> {
        let listing = self
            .store
            .list()
            .await
            .inspect_err(|e| warn!("Failed to list courses: {}", e))?;
        info!("Listed {} courses", listing.len());
        Ok(listing)
    }

    pub async fn update_course(&self, id: &str, fields: CourseFields) -> Result<Course, CourseError> {
        validate_id(id)?;
        fields.validate()?;
        let course = self
            .store
            .update(id, &fields)
            .await
            .inspect_err(|e| warn!("Failed to update course {}: {}", id, e))?;
        info!("Updated course {}", id);
        Ok(course)
    }

    pub async fn delete_course(&self, id: &str) -> Result<(), CourseError> {
        validate_id(id)?;
        self.store
            .delete(id)
            .await
            .inspect_err(|e| warn!("Failed to delete course {}: {}", id, e))?;
        info!("Deleted course {}", id);
        Ok(())
    }

    /// Runs a command to completion.
    pub async fn run(&self, command: Command) -> Outcome {
        let result = match command {
            Command::Create(fields) => self.add_course(fields).await.map(Outcome::Created),
            Command::List => self.list_courses().await.map(Outcome::Listed),
            Command::Update { id, fields } => {
                self.update_course(&id, fields).await.map(Outcome::Updated)
            }
            Command::Delete { id } => {
                self.delete_course(&id).await.map(|_| Outcome::Deleted(id.clone()))
            }
        };

        result.unwrap_or_else(|err| match err {
            CourseError::Validation(e) => Outcome::Invalid(e),
            CourseError::Store(e) => Outcome::Failed(e),
        })
    }

    /// Starts a command on the runtime and returns at once; the outcome arrives
    /// through the handle. Failed calls are not retried.
    pub fn dispatch(&self, command: Command) -> JoinHandle<Outcome> {
        let service = self.clone();
        tokio::spawn(async move { service.run(command).await })
    }
}
