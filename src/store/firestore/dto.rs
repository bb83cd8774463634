use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{FailureKind, Operation, StoreError};
use crate::models::{Course, CourseFields};

pub const NAME_FIELD: &str = "name";
pub const DURATION_FIELD: &str = "duration";
pub const DESCRIPTION_FIELD: &str = "description";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub update_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StringValue<'a> {
    #[serde(rename = "stringValue")]
    pub string_value: &'a str,
}

/// Request body for create and full-replace writes.
#[derive(Debug, Serialize)]
pub struct WriteDocumentRequest<'a> {
    pub fields: BTreeMap<&'static str, StringValue<'a>>,
}

impl<'a> WriteDocumentRequest<'a> {
    pub fn from_fields(fields: &'a CourseFields) -> Self {
        let mut map = BTreeMap::new();
        map.insert(NAME_FIELD, StringValue { string_value: &fields.name });
        map.insert(DURATION_FIELD, StringValue { string_value: &fields.duration });
        map.insert(DESCRIPTION_FIELD, StringValue { string_value: &fields.description });
        Self { fields: map }
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Last segment of a resource name such as
/// `projects/p/databases/(default)/documents/Courses/abc`.
pub fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn string_field(document: &Document, key: &str) -> Result<String, StoreError> {
    document
        .fields
        .get(key)
        .and_then(|value| value.get("stringValue"))
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            StoreError::new(
                Operation::List,
                FailureKind::Decode,
                format!("Missing string field: {}", key),
            )
        })
}

pub fn course_from_document(document: &Document) -> Result<Course, StoreError> {
    let id = document_id(&document.name);
    if id.is_empty() {
        return Err(StoreError::new(
            Operation::List,
            FailureKind::Decode,
            format!("Malformed document name: {}", document.name),
        ));
    }

    Ok(Course {
        id: id.to_string(),
        name: string_field(document, NAME_FIELD)?,
        duration: string_field(document, DURATION_FIELD)?,
        description: string_field(document, DESCRIPTION_FIELD)?,
    })
}
