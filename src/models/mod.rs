pub mod course;

pub use course::{Course, CourseFields, ValidationError, validate_id};
