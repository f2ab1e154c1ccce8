use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbProviderListing, DbProviderProfile};

pub async fn list_providers(pool: &Pool<Postgres>) -> Result<Vec<DbProviderListing>> {
    tracing::debug!("Listing providers");

    let providers = sqlx::query_as::<_, DbProviderListing>(
        r#"
        SELECT p.id, u.name, p.bio, p.hourly_rate, p.rating, p.completed_jobs
        FROM provider_profiles p
        JOIN users u ON u.id = p.id
        ORDER BY p.rating DESC, u.name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(providers)
}

pub async fn get_provider_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbProviderListing>> {
    tracing::debug!("Getting provider by id: {}", id);

    let provider = sqlx::query_as::<_, DbProviderListing>(
        r#"
        SELECT p.id, u.name, p.bio, p.hourly_rate, p.rating, p.completed_jobs
        FROM provider_profiles p
        JOIN users u ON u.id = p.id
        WHERE p.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(provider)
}

/// Creates the profile row for a provider, or updates the provider-editable
/// fields if one already exists. Rating and completed job counts are never
/// written here.
pub async fn upsert_profile(
    pool: &Pool<Postgres>,
    id: Uuid,
    bio: Option<&str>,
    hourly_rate: Option<f64>,
) -> Result<DbProviderProfile> {
    tracing::debug!("Upserting provider profile: {}", id);

    let profile = sqlx::query_as::<_, DbProviderProfile>(
        r#"
        INSERT INTO provider_profiles (id, bio, hourly_rate, created_at, updated_at)
        VALUES ($1, $2, COALESCE($3, 0), $4, $4)
        ON CONFLICT (id) DO UPDATE
        SET bio = COALESCE($2, provider_profiles.bio),
            hourly_rate = COALESCE($3, provider_profiles.hourly_rate),
            updated_at = $4
        RETURNING id, bio, hourly_rate, rating, completed_jobs, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(bio)
    .bind(hourly_rate)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

pub async fn get_categories(pool: &Pool<Postgres>, provider_id: Uuid) -> Result<Vec<String>> {
    let categories = sqlx::query_scalar::<_, String>(
        r#"
        SELECT category FROM provider_categories
        WHERE provider_id = $1
        ORDER BY category
        "#,
    )
    .bind(provider_id)
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

pub async fn set_categories(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
    categories: &[String],
) -> Result<()> {
    tracing::debug!("Setting categories for provider {}: {:?}", provider_id, categories);

    sqlx::query("DELETE FROM provider_categories WHERE provider_id = $1")
        .bind(provider_id)
        .execute(pool)
        .await?;

    for category in categories {
        sqlx::query(
            r#"
            INSERT INTO provider_categories (provider_id, category)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(provider_id)
        .bind(category)
        .execute(pool)
        .await?;
    }

    Ok(())
}
