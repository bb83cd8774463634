use axum::Json;
use axum::extract::Path;
use axum::routing::put;
use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{id}", put(update_course).delete(delete_course))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let listing = state.courses.list_courses().await?;
    Ok(Json(listing.into_courses()))
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CourseFields>
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = state.courses.add_course(req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CourseFields>
) -> Result<Json<Course>, AppError> {
    let course = state.courses.update_course(&id, req).await?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>
) -> Result<StatusCode, AppError> {
    state.courses.delete_course(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
