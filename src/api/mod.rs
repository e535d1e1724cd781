use axum::Json;
use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::extract::{DefaultBodyLimit, Path};
use axum::routing::patch;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;
use uuid::Uuid;

use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

/// Uploaded images are buffered in memory before encoding; the cap bounds
/// that buffer per request.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", patch(toggle_todo).delete(delete_todo))
        .route("/diary", get(list_entries).post(create_entry))
        .route("/diary/{id}", patch(update_entry).delete(delete_entry))
        .route(
            "/vision-board",
            get(list_vision_items).post(create_vision_item),
        )
        .route(
            "/vision-board/{id}",
            patch(update_vision_item).delete(delete_vision_item),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 64 * 1024))
        .with_state(state)
}

/// Ids are issued as UUIDs, so anything that does not parse as one can be
/// rejected before touching the store.
fn parse_id(raw: &str) -> Result<String, AppError> {
    Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|_| AppError::MalformedId(raw.to_string()))
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = repository::fetch_todos(&state.db).await?;
    Ok(Json(todos))
}

async fn create_todo(
    State(state): State<AppState>,
    Json(req): Json<NewTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let new = req.validate()?;
    let todo = repository::insert_todo(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, AppError> {
    let id = parse_id(&id)?;
    let found = repository::toggle_todo(&state.db, &id).await?;
    if found {
        Ok(Json(Ack { ok: true }))
    } else {
        Err(AppError::NotFound)
    }
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, AppError> {
    let id = parse_id(&id)?;
    let found = repository::delete_todo(&state.db, &id).await?;
    if found {
        Ok(Json(Ack { ok: true }))
    } else {
        Err(AppError::NotFound)
    }
}

async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<DiaryEntry>>, AppError> {
    let entries = repository::fetch_entries(&state.db).await?;
    Ok(Json(entries))
}

async fn create_entry(
    State(state): State<AppState>,
    Json(req): Json<NewDiaryEntryRequest>,
) -> Result<(StatusCode, Json<DiaryEntry>), AppError> {
    let new = req.validate()?;
    let entry = repository::insert_entry(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDiaryEntryRequest>,
) -> Result<Json<Ack>, AppError> {
    let id = parse_id(&id)?;
    repository::update_entry(&state.db, &id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(Ack { ok: true }))
}

async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, AppError> {
    let id = parse_id(&id)?;
    let found = repository::delete_entry(&state.db, &id).await?;
    if found {
        Ok(Json(Ack { ok: true }))
    } else {
        Err(AppError::NotFound)
    }
}

async fn list_vision_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<VisionItem>>, AppError> {
    let items = repository::fetch_vision_items(&state.db).await?;
    Ok(Json(items))
}

async fn create_vision_item(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<VisionItem>), AppError> {
    let mut caption = String::new();
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("caption") => {
                caption = field
                    .text()
                    .await
                    .map_err(bad_multipart)?
                    .trim()
                    .to_string();
            }
            Some("image") => {
                let mime_type = field
                    .content_type()
                    .filter(|ct| !ct.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
                let data = read_image_capped(field).await?;
                image = Some((mime_type, data));
            }
            _ => {}
        }
    }

    let (mime_type, data) =
        image.ok_or_else(|| AppError::Validation("Image is required".to_string()))?;

    let new = NewVisionItem {
        caption,
        mime_type,
        image_base64: STANDARD.encode(&data),
    };
    let item = repository::insert_vision_item(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn read_image_capped(mut field: Field<'_>) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(bad_multipart)? {
        if data.len() + chunk.len() > MAX_IMAGE_BYTES {
            return Err(AppError::PayloadTooLarge);
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

fn bad_multipart(err: MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart payload: {}", err))
}

async fn update_vision_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateVisionItemRequest>,
) -> Result<Json<Ack>, AppError> {
    let id = parse_id(&id)?;
    repository::update_vision_item(&state.db, &id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(Ack { ok: true }))
}

async fn delete_vision_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, AppError> {
    let id = parse_id(&id)?;
    let found = repository::delete_vision_item(&state.db, &id).await?;
    if found {
        Ok(Json(Ack { ok: true }))
    } else {
        Err(AppError::NotFound)
    }
}
