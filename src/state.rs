use std::sync::Arc;

use crate::services::CourseService;
use crate::store::CourseStore;

#[derive(Clone)]
pub struct AppState {
    pub courses: CourseService,
}

impl AppState {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self {
            courses: CourseService::new(store),
        }
    }
}
