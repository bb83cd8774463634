pub mod dto;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use tracing::{debug, warn};

use crate::error::{AppError, FailureKind, Operation, StoreError};
use crate::models::{Course, CourseFields};
use crate::store::{CourseStore, Listing, require_id};

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_DATABASE: &str = "(default)";
pub const DEFAULT_COLLECTION: &str = "Courses";

const PAGE_SIZE: &str = "300";

#[derive(Clone, Debug)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database: String,
    pub collection: String,
    pub base_url: String,
    pub token: Option<String>,
    pub api_key: Option<String>,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            api_key: None,
        }
    }
}

/// Course store backed by the Firestore REST API. Document ids are assigned by the server.
pub struct FirestoreHttpClient {
    client: Client,
    config: FirestoreConfig,
}

impl FirestoreHttpClient {
    pub fn new(config: FirestoreConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn collection_url(&self, operation: Operation) -> Result<Url, StoreError> {
        let raw = format!(
            "{}/projects/{}/databases/{}/documents/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id,
            self.config.database,
            self.config.collection,
        );
        let mut url = Url::parse(&raw).map_err(|e| {
            StoreError::new(
                operation,
                FailureKind::InvalidArgument,
                format!("Invalid collection url {}: {}", raw, e),
            )
        })?;
        if let Some(key) = &self.config.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    fn document_url(&self, operation: Operation, id: &str) -> Result<Url, StoreError> {
        let mut url = self.collection_url(operation)?;
        url.path_segments_mut()
            .map_err(|_| {
                StoreError::new(
                    operation,
                    FailureKind::InvalidArgument,
                    "collection url cannot take a document id",
                )
            })?
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, operation: Operation, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::new(operation, FailureKind::Network, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<dto::ErrorEnvelope>(&body)
            .map(|envelope| match envelope.error.status {
                Some(code) => format!("{} {}: {}", status, code, envelope.error.message),
                None => format!("{}: {}", status, envelope.error.message),
            })
            .unwrap_or_else(|_| format!("Firestore API error {}: {}", status, body));

        Err(StoreError::new(operation, failure_kind(status), message))
    }
}

fn failure_kind(status: StatusCode) -> FailureKind {
    match status {
        StatusCode::NOT_FOUND => FailureKind::NotFound,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FailureKind::PermissionDenied,
        StatusCode::BAD_REQUEST => FailureKind::InvalidArgument,
        _ => FailureKind::Backend,
    }
}

fn decode_error(operation: Operation, err: reqwest::Error) -> StoreError {
    StoreError::new(
        operation,
        FailureKind::Decode,
        format!("Failed to parse Firestore response: {}", err),
    )
}

#[async_trait]
impl CourseStore for FirestoreHttpClient {
    async fn create(&self, fields: &CourseFields) -> Result<Course, StoreError> {
        let url = self.collection_url(Operation::Create)?;
        let body = dto::WriteDocumentRequest::from_fields(fields);

        let response = self
            .send(Operation::Create, self.client.post(url).json(&body))
            .await?;
        let document: dto::Document = response
            .json()
            .await
            .map_err(|e| decode_error(Operation::Create, e))?;

        let id = dto::document_id(&document.name);
        if id.is_empty() {
            return Err(StoreError::new(
                Operation::Create,
                FailureKind::Decode,
                format!("Malformed document name: {}", document.name),
            ));
        }
        debug!("Firestore assigned id {} to new course", id);
        Ok(fields.clone().into_course(id))
    }

    async fn list(&self) -> Result<Listing, StoreError> {
        let mut courses = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.collection_url(Operation::List)?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("pageSize", PAGE_SIZE);
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            let response = self.send(Operation::List, self.client.get(url)).await?;
            let page: dto::ListDocumentsResponse = response
                .json()
                .await
                .map_err(|e| decode_error(Operation::List, e))?;

            for document in page.documents {
                match dto::course_from_document(&document) {
                    Ok(course) => courses.push(course),
                    Err(e) => {
                        warn!("Failed to parse course from document {}: {}", document.name, e);
                    }
                }
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("fetched {} courses from Firestore", courses.len());
        Ok(Listing::from_courses(courses))
    }

    async fn update(&self, id: &str, fields: &CourseFields) -> Result<Course, StoreError> {
        require_id(Operation::Update, id)?;
        let url = self.document_url(Operation::Update, id)?;
        let body = dto::WriteDocumentRequest::from_fields(fields);

        let response = self
            .send(Operation::Update, self.client.patch(url).json(&body))
            .await?;
        let document: dto::Document = response
            .json()
            .await
            .map_err(|e| decode_error(Operation::Update, e))?;

        debug!(
            "replaced course {} (updated at {})",
            id,
            document.update_time.as_deref().unwrap_or("unknown")
        );
        Ok(fields.clone().into_course(id))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        require_id(Operation::Delete, id)?;
        let url = self.document_url(Operation::Delete, id)?;

        self.send(Operation::Delete, self.client.delete(url)).await?;
        debug!("deleted course {}", id);
        Ok(())
    }
}
