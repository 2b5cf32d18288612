use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    #[serde(serialize_with = "super::id_as_string")]
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub ticket_price: Option<Decimal>,
    pub image_url: Option<String>,
    pub total_slots: Option<i32>,
    pub available_slots: Option<i32>,
    pub status: String,
    #[serde(skip_serializing)]
    pub created_at: i64,
}

/// Field set shared by create and update
pub struct ExhibitionInput<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub location: Option<&'a str>,
    pub start_date: Option<&'a str>,
    pub end_date: Option<&'a str>,
    pub ticket_price: Option<Decimal>,
    pub image_url: Option<&'a str>,
    pub total_slots: Option<i32>,
    pub available_slots: Option<i32>,
    pub status: Option<&'a str>,
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Exhibition>, sqlx::Error> {
    // Soonest exhibition first
    sqlx::query_as("SELECT * FROM exhibitions ORDER BY start_date ASC")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Exhibition>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM exhibitions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    input: &ExhibitionInput<'_>,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO exhibitions
             (title, description, location, start_date, end_date, ticket_price,
              image_url, total_slots, available_slots, status, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, 'upcoming'), $11)
         RETURNING id",
    )
    .bind(input.title)
    .bind(input.description)
    .bind(input.location)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(input.ticket_price)
    .bind(input.image_url)
    .bind(input.total_slots)
    .bind(input.available_slots)
    .bind(input.status)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    input: &ExhibitionInput<'_>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE exhibitions
         SET title = $1, description = $2, location = $3, start_date = $4, end_date = $5,
             ticket_price = $6, image_url = $7, total_slots = $8, available_slots = $9,
             status = COALESCE($10, status)
         WHERE id = $11",
    )
    .bind(input.title)
    .bind(input.description)
    .bind(input.location)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(input.ticket_price)
    .bind(input.image_url)
    .bind(input.total_slots)
    .bind(input.available_slots)
    .bind(input.status)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM exhibitions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhibition_serializes_camelcase_with_string_id() {
        let exhibition = Exhibition {
            id: 3,
            title: "Light Forms".into(),
            description: None,
            location: Some("Main Hall".into()),
            start_date: Some("2026-09-01".into()),
            end_date: None,
            ticket_price: None,
            image_url: Some("/static/uploads/e.png".into()),
            total_slots: Some(50),
            available_slots: Some(50),
            status: "upcoming".into(),
            created_at: 0,
        };

        let json = serde_json::to_value(&exhibition).unwrap();
        assert_eq!(json["id"], "3");
        assert_eq!(json["imageUrl"], "/static/uploads/e.png");
        assert_eq!(json["availableSlots"], 50);
        assert!(json.get("created_at").is_none());
    }
}
