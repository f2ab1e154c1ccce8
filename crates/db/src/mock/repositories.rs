use chrono::NaiveDate;
use mockall::mock;
use uuid::Uuid;

use crate::models::{
    DbAvailabilityDay, DbBooking, DbBookingSummary, DbProviderListing, DbService, DbSession,
    DbUser,
};
use crate::repositories::booking::BookingScope;

// Mock repositories for testing
mock! {
    pub UserRepo {
        pub async fn create_user(
            &self,
            name: &'static str,
            email: &'static str,
            password_hash: &'static str,
            role: &'static str,
        ) -> eyre::Result<DbUser>;

        pub async fn get_user_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn get_user_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn create_session(
            &self,
            token: &'static str,
            user_id: Uuid,
        ) -> eyre::Result<DbSession>;

        pub async fn get_session_user(
            &self,
            token: &'static str,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn delete_session(
            &self,
            token: &'static str,
        ) -> eyre::Result<()>;
    }
}

mock! {
    pub ServiceRepo {
        pub async fn list_services(&self) -> eyre::Result<Vec<DbService>>;

        pub async fn get_service_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbService>>;

        pub async fn create_service(
            &self,
            name: &'static str,
            category: &'static str,
            price: f64,
            duration_hours: i32,
        ) -> eyre::Result<DbService>;

        pub async fn delete_service(
            &self,
            id: Uuid,
        ) -> eyre::Result<()>;
    }
}

mock! {
    pub ProviderRepo {
        pub async fn list_providers(&self) -> eyre::Result<Vec<DbProviderListing>>;

        pub async fn get_provider_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbProviderListing>>;

        pub async fn get_categories(
            &self,
            provider_id: Uuid,
        ) -> eyre::Result<Vec<String>>;
    }
}

mock! {
    pub AvailabilityRepo {
        pub async fn get_availability(
            &self,
            provider_id: Uuid,
        ) -> eyre::Result<Vec<DbAvailabilityDay>>;

        pub async fn upsert_day(
            &self,
            provider_id: Uuid,
            day_of_week: &'static str,
            open_hour: i32,
            close_hour: i32,
        ) -> eyre::Result<DbAvailabilityDay>;

        pub async fn delete_day(
            &self,
            provider_id: Uuid,
            day_of_week: &'static str,
        ) -> eyre::Result<()>;
    }
}

mock! {
    pub BookingRepo {
        pub async fn slot_is_booked(
            &self,
            provider_id: Uuid,
            date: NaiveDate,
            time_slot: &'static str,
        ) -> eyre::Result<bool>;

        pub async fn create_booking(
            &self,
            client_id: Uuid,
            provider_id: Uuid,
            service_id: Uuid,
            date: NaiveDate,
            time_slot: &'static str,
            total: f64,
        ) -> eyre::Result<DbBooking>;

        pub async fn get_booking_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbBooking>>;

        pub async fn list_booking_summaries(
            &self,
            scope: BookingScope,
        ) -> eyre::Result<Vec<DbBookingSummary>>;

        pub async fn update_booking_status(
            &self,
            id: Uuid,
            expected_status: &'static str,
            next_status: &'static str,
        ) -> eyre::Result<DbBooking>;
    }
}
