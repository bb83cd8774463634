pub mod course_service;

pub use course_service::{Command, CourseError, CourseService, Outcome};
