use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// A course record as stored in the `Courses` collection.
///
/// `id` is empty until the store has persisted the record and assigned one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub duration: String,
    pub description: String,
}

/// The stored document body of a course. Used for create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFields {
    pub name: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter course name")]
    MissingName,

    #[error("Please enter course Duration")]
    MissingDuration,

    #[error("Please enter course description")]
    MissingDescription,

    #[error("Course id must not be empty")]
    MissingId,
}

impl Course {
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn fields(&self) -> CourseFields {
        CourseFields {
            name: self.name.clone(),
            duration: self.duration.clone(),
            description: self.description.clone(),
        }
    }
}

impl CourseFields {
    pub fn new(
        name: impl Into<String>,
        duration: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            duration: duration.into(),
            description: description.into(),
        }
    }

    /// Checks the required fields in form order and reports the first empty one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.duration.is_empty() {
            return Err(ValidationError::MissingDuration);
        }
        if self.description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        Ok(())
    }

    pub fn into_course(self, id: impl Into<String>) -> Course {
        Course {
            id: id.into(),
            name: self.name,
            duration: self.duration,
            description: self.description,
        }
    }
}

pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        Err(ValidationError::MissingId)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_first_missing_field() {
        let fields = CourseFields::new("", "", "");
        assert_eq!(fields.validate(), Err(ValidationError::MissingName));

        let fields = CourseFields::new("Algorithms", "", "");
        assert_eq!(fields.validate(), Err(ValidationError::MissingDuration));

        let fields = CourseFields::new("Algorithms", "6 weeks", "");
        assert_eq!(fields.validate(), Err(ValidationError::MissingDescription));

        let fields = CourseFields::new("Algorithms", "6 weeks", "Intro to DS&A");
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn messages_match_the_form_prompts() {
        assert_eq!(ValidationError::MissingName.to_string(), "Please enter course name");
        assert_eq!(ValidationError::MissingDuration.to_string(), "Please enter course Duration");
        assert_eq!(
            ValidationError::MissingDescription.to_string(),
            "Please enter course description"
        );
    }

    #[test]
    fn whitespace_counts_as_a_value() {
        let fields = CourseFields::new(" ", " ", " ");
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn draft_course_is_not_persisted() {
        let draft = CourseFields::new("Algorithms", "6 weeks", "Intro to DS&A").into_course("");
        assert!(!draft.is_persisted());

        let stored = draft.fields().into_course("abc123");
        assert!(stored.is_persisted());
        assert_eq!(stored.name, "Algorithms");
    }

    #[test]
    fn empty_id_is_rejected() {
        assert_eq!(validate_id(""), Err(ValidationError::MissingId));
        assert!(validate_id("abc123").is_ok());
    }
}
