use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Operation, StoreError};
use crate::models::{Course, CourseFields};
use crate::store::{CourseStore, Listing, require_id};

/// Process-local store. Ids are random UUIDs assigned on create.
#[derive(Default)]
pub struct InMemoryCourseStore {
    documents: RwLock<HashMap<String, CourseFields>>,
}

impl InMemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn create(&self, fields: &CourseFields) -> Result<Course, StoreError> {
        let mut documents = self.documents.write().await;
        let mut id = Uuid::new_v4().to_string();
        while documents.contains_key(&id) {
            id = Uuid::new_v4().to_string();
        }
        documents.insert(id.clone(), fields.clone());
        Ok(fields.clone().into_course(id))
    }

    async fn list(&self) -> Result<Listing, StoreError> {
        let documents = self.documents.read().await;
        let courses = documents
            .iter()
            .map(|(id, fields)| fields.clone().into_course(id.clone()))
            .collect();
        Ok(Listing::from_courses(courses))
    }

    async fn update(&self, id: &str, fields: &CourseFields) -> Result<Course, StoreError> {
        require_id(Operation::Update, id)?;
        self.documents
            .write()
            .await
            .insert(id.to_string(), fields.clone());
        Ok(fields.clone().into_course(id))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        require_id(Operation::Delete, id)?;
        self.documents.write().await.remove(id);
        Ok(())
    }
}
