use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            role VARCHAR(16) NOT NULL,
            phone VARCHAR(32) NULL,
            address VARCHAR(255) NULL,
            avatar_url VARCHAR(512) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_role CHECK (role IN ('admin', 'provider', 'client'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create sessions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token VARCHAR(255) PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            category VARCHAR(32) NOT NULL,
            description TEXT NULL,
            price DOUBLE PRECISION NOT NULL,
            duration_hours INTEGER NOT NULL,
            image_url VARCHAR(512) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_category CHECK (
                category IN ('plumbing', 'electrical', 'cleaning', 'carpentry', 'painting', 'gardening')
            ),
            CONSTRAINT positive_price CHECK (price > 0),
            CONSTRAINT positive_duration CHECK (duration_hours > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create provider_profiles table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS provider_profiles (
            id UUID PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            bio TEXT NULL,
            hourly_rate DOUBLE PRECISION NOT NULL DEFAULT 0,
            rating DOUBLE PRECISION NOT NULL DEFAULT 0,
            completed_jobs INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_rating CHECK (rating >= 0 AND rating <= 5)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create provider_categories table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS provider_categories (
            provider_id UUID NOT NULL REFERENCES provider_profiles(id) ON DELETE CASCADE,
            category VARCHAR(32) NOT NULL,
            PRIMARY KEY (provider_id, category)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create provider_availability table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS provider_availability (
            provider_id UUID NOT NULL REFERENCES provider_profiles(id) ON DELETE CASCADE,
            day_of_week VARCHAR(16) NOT NULL,
            open_hour INTEGER NOT NULL,
            close_hour INTEGER NOT NULL,
            PRIMARY KEY (provider_id, day_of_week),
            CONSTRAINT valid_hours CHECK (open_hour >= 0 AND close_hour <= 24 AND open_hour < close_hour)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            client_id UUID NOT NULL REFERENCES users(id),
            provider_id UUID NOT NULL REFERENCES users(id),
            service_id UUID NOT NULL REFERENCES services(id),
            date DATE NOT NULL,
            time_slot VARCHAR(16) NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            total DOUBLE PRECISION NOT NULL,
            address VARCHAR(255) NOT NULL,
            phone VARCHAR(32) NOT NULL,
            email VARCHAR(255) NOT NULL,
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'completed', 'cancelled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions(user_id);
        CREATE INDEX IF NOT EXISTS idx_services_category ON services(category);
        CREATE INDEX IF NOT EXISTS idx_provider_categories_provider_id ON provider_categories(provider_id);
        CREATE INDEX IF NOT EXISTS idx_bookings_client_id ON bookings(client_id);
        CREATE INDEX IF NOT EXISTS idx_bookings_provider_id ON bookings(provider_id);
        CREATE INDEX IF NOT EXISTS idx_bookings_date ON bookings(date);
        CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
