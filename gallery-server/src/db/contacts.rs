use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub source: String,
    pub status: String,
    pub created_at: i64,
}

pub async fn create(
    pool: &PgPool,
    name: &str,
    email: &str,
    phone: Option<&str>,
    message: &str,
    source: &str,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO contact_messages (name, email, phone, message, source, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(message)
    .bind(source)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<ContactMessage>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM contact_messages ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn update_status(pool: &PgPool, id: i64, status: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE contact_messages SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
