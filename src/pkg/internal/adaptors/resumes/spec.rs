use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeEntry {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub tags: Vec<String>,
    pub filename: String,
    pub original_filename: String,
    pub file_type: String,
    pub uploaded_at: DateTime<Utc>,
}
