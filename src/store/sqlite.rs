use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Operation, StoreError};
use crate::models::{Course, CourseFields};
use crate::store::{CourseStore, Listing, require_id};

/// Embedded store backed by a single `courses` table.
#[derive(Clone)]
pub struct SqliteCourseStore {
    db: SqlitePool,
}

impl SqliteCourseStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Opens a pool for `database_url` and applies the embedded migrations.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let db = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        let store = Self::new(db);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl CourseStore for SqliteCourseStore {
    async fn create(&self, fields: &CourseFields) -> Result<Course, StoreError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO courses (id, name, duration, description)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&id)
        .bind(&fields.name)
        .bind(&fields.duration)
        .bind(&fields.description)
        .execute(&self.db)
        .await
        .map_err(|e| StoreError::backend(Operation::Create, e))?;

        debug!("inserted course {}", id);
        Ok(fields.clone().into_course(id))
    }

    async fn list(&self) -> Result<Listing, StoreError> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, name, duration, description
            FROM courses
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| StoreError::backend(Operation::List, e))?;

        debug!("fetched {} courses", courses.len());
        Ok(Listing::from_courses(courses))
    }

    async fn update(&self, id: &str, fields: &CourseFields) -> Result<Course, StoreError> {
        require_id(Operation::Update, id)?;

        sqlx::query(
            r#"
            INSERT INTO courses (id, name, duration, description)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE
            SET name = excluded.name,
                duration = excluded.duration,
                description = excluded.description
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.duration)
        .bind(&fields.description)
        .execute(&self.db)
        .await
        .map_err(|e| StoreError::backend(Operation::Update, e))?;

        debug!("replaced course {}", id);
        Ok(fields.clone().into_course(id))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        require_id(Operation::Delete, id)?;

        let result = sqlx::query("DELETE FROM courses WHERE id = ?1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| StoreError::backend(Operation::Delete, e))?;

        debug!("deleted course {} ({} rows)", id, result.rows_affected());
        Ok(())
    }
}
