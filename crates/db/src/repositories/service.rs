use chrono::Utc;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbService;

pub async fn list_services(pool: &Pool<Postgres>) -> Result<Vec<DbService>> {
    tracing::debug!("Listing services");

    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, category, description, price, duration_hours, image_url, created_at, updated_at
        FROM services
        ORDER BY created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    tracing::debug!("Getting service by id: {}", id);

    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, category, description, price, duration_hours, image_url, created_at, updated_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

#[allow(clippy::too_many_arguments)]
pub async fn create_service(
    pool: &Pool<Postgres>,
    name: &str,
    category: &str,
    description: Option<&str>,
    price: f64,
    duration_hours: i32,
    image_url: Option<&str>,
) -> Result<DbService> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating service: id={}, name={}, category={}", id, name, category);

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, name, category, description, price, duration_hours, image_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING id, name, category, description, price, duration_hours, image_url, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(category)
    .bind(description)
    .bind(price)
    .bind(duration_hours)
    .bind(image_url)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

#[allow(clippy::too_many_arguments)]
pub async fn update_service(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: Option<&str>,
    category: Option<&str>,
    description: Option<&str>,
    price: Option<f64>,
    duration_hours: Option<i32>,
    image_url: Option<&str>,
) -> Result<DbService> {
    let service = get_service_by_id(pool, id)
        .await?
        .ok_or_else(|| eyre!("Service not found"))?;

    let name = name.unwrap_or(&service.name);
    let category = category.unwrap_or(&service.category);
    let description = description.or(service.description.as_deref());
    let price = price.unwrap_or(service.price);
    let duration_hours = duration_hours.unwrap_or(service.duration_hours);
    let image_url = image_url.or(service.image_url.as_deref());

    let updated_service = sqlx::query_as::<_, DbService>(
        r#"
        UPDATE services
        SET name = $2, category = $3, description = $4, price = $5, duration_hours = $6,
            image_url = $7, updated_at = $8
        WHERE id = $1
        RETURNING id, name, category, description, price, duration_hours, image_url, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(category)
    .bind(description)
    .bind(price)
    .bind(duration_hours)
    .bind(image_url)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(updated_service)
}

pub async fn delete_service(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    tracing::debug!("Deleting service: {}", id);

    sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
