use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{
    DiaryEntry, NewDiaryEntry, NewTodo, NewVisionItem, Todo, UpdateDiaryEntryRequest,
    UpdateVisionItemRequest, VisionItem,
};

pub async fn fetch_todos(db: &SqlitePool) -> Result<Vec<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>(
        "SELECT id, title, completed, created_at FROM todos ORDER BY created_at DESC",
    )
    .fetch_all(db)
    .await
}

pub async fn insert_todo(db: &SqlitePool, new: NewTodo) -> Result<Todo, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query("INSERT INTO todos (id, title, completed, created_at) VALUES (?, ?, 0, ?)")
        .bind(&id)
        .bind(&new.title)
        .bind(&now)
        .execute(db)
        .await?;

    Ok(Todo {
        id,
        title: new.title,
        completed: false,
        created_at: now,
    })
}

/// Flips `completed` in a single statement; two concurrent toggles each
/// invert the stored value rather than racing on a read-then-write.
pub async fn toggle_todo(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE todos SET completed = NOT completed WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn delete_todo(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM todos WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn fetch_entries(db: &SqlitePool) -> Result<Vec<DiaryEntry>, sqlx::Error> {
    sqlx::query_as::<_, DiaryEntry>(
        "SELECT id, content, mood, created_at FROM diary_entries ORDER BY created_at DESC",
    )
    .fetch_all(db)
    .await
}

pub async fn insert_entry(db: &SqlitePool, new: NewDiaryEntry) -> Result<DiaryEntry, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query("INSERT INTO diary_entries (id, content, mood, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&new.content)
        .bind(&new.mood)
        .bind(&now)
        .execute(db)
        .await?;

    Ok(DiaryEntry {
        id,
        content: new.content,
        mood: new.mood,
        created_at: now,
    })
}

pub async fn update_entry(
    db: &SqlitePool,
    id: &str,
    req: UpdateDiaryEntryRequest,
) -> Result<Option<DiaryEntry>, sqlx::Error> {
    let mut current = match sqlx::query_as::<_, DiaryEntry>(
        "SELECT id, content, mood, created_at FROM diary_entries WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?
    {
        Some(entry) => entry,
        None => return Ok(None),
    };

    if let Some(content) = req.content {
        current.content = content.trim().to_string();
    }
    if let Some(mood) = req.mood {
        current.mood = mood;
    }

    sqlx::query("UPDATE diary_entries SET content = ?, mood = ? WHERE id = ?")
        .bind(&current.content)
        .bind(&current.mood)
        .bind(id)
        .execute(db)
        .await?;

    Ok(Some(current))
}

pub async fn delete_entry(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM diary_entries WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn fetch_vision_items(db: &SqlitePool) -> Result<Vec<VisionItem>, sqlx::Error> {
    sqlx::query_as::<_, VisionItem>(
        "SELECT id, caption, mime_type, image_base64, created_at FROM vision_items ORDER BY created_at DESC",
    )
    .fetch_all(db)
    .await
}

pub async fn insert_vision_item(
    db: &SqlitePool,
    new: NewVisionItem,
) -> Result<VisionItem, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO vision_items (id, caption, mime_type, image_base64, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&new.caption)
    .bind(&new.mime_type)
    .bind(&new.image_base64)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(VisionItem {
        id,
        caption: new.caption,
        mime_type: new.mime_type,
        image_base64: new.image_base64,
        created_at: now,
    })
}

pub async fn update_vision_item(
    db: &SqlitePool,
    id: &str,
    req: UpdateVisionItemRequest,
) -> Result<Option<VisionItem>, sqlx::Error> {
    let mut current = match sqlx::query_as::<_, VisionItem>(
        "SELECT id, caption, mime_type, image_base64, created_at FROM vision_items WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?
    {
        Some(item) => item,
        None => return Ok(None),
    };

    if let Some(caption) = req.caption {
        current.caption = caption.trim().to_string();
    }

    sqlx::query("UPDATE vision_items SET caption = ? WHERE id = ?")
        .bind(&current.caption)
        .bind(id)
        .execute(db)
        .await?;

    Ok(Some(current))
}

pub async fn delete_vision_item(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM vision_items WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
