use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Artwork {
    #[serde(serialize_with = "super::id_as_string")]
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub dimensions: Option<String>,
    pub medium: Option<String>,
    pub year: Option<i32>,
    pub status: String,
    #[serde(skip_serializing)]
    pub created_at: i64,
}

/// Field set shared by create and update
pub struct ArtworkInput<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub description: Option<&'a str>,
    pub price: Option<Decimal>,
    pub image_url: Option<&'a str>,
    pub dimensions: Option<&'a str>,
    pub medium: Option<&'a str>,
    pub year: Option<i32>,
    pub status: Option<&'a str>,
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Artwork>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM artworks ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Artwork>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM artworks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    input: &ArtworkInput<'_>,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO artworks
             (title, artist, description, price, image_url, dimensions, medium, year, status, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 'available'), $10)
         RETURNING id",
    )
    .bind(input.title)
    .bind(input.artist)
    .bind(input.description)
    .bind(input.price)
    .bind(input.image_url)
    .bind(input.dimensions)
    .bind(input.medium)
    .bind(input.year)
    .bind(input.status)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    input: &ArtworkInput<'_>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE artworks
         SET title = $1, artist = $2, description = $3, price = $4, image_url = $5,
             dimensions = $6, medium = $7, year = $8, status = COALESCE($9, status)
         WHERE id = $10",
    )
    .bind(input.title)
    .bind(input.artist)
    .bind(input.description)
    .bind(input.price)
    .bind(input.image_url)
    .bind(input.dimensions)
    .bind(input.medium)
    .bind(input.year)
    .bind(input.status)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM artworks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artwork_serializes_id_as_string() {
        let artwork = Artwork {
            id: 7,
            title: "Dusk".into(),
            artist: "J. Moraa".into(),
            description: None,
            price: None,
            image_url: Some("/static/uploads/a.png".into()),
            dimensions: None,
            medium: None,
            year: Some(2024),
            status: "available".into(),
            created_at: 0,
        };

        let json = serde_json::to_value(&artwork).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["image_url"], "/static/uploads/a.png");
        assert!(json.get("created_at").is_none());
    }
}
