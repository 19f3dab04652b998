use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Database model for an active parking session
#[derive(Debug, Clone, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub plate: String,
    pub entered_at: NaiveDateTime,
}
