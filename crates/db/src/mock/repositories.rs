use chrono::NaiveDateTime;
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbAppt, DbApptType, DbService, DbUser, NewService};

// Mock repositories for testing
mock! {
    pub UserRepo {
        pub async fn create_user(
            &self,
            email: String,
            password_hash: String,
        ) -> eyre::Result<DbUser>;

        pub async fn get_user_by_email(
            &self,
            email: String,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn get_user_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbUser>>;
    }
}

mock! {
    pub ServiceRepo {
        pub async fn create_service(
            &self,
            host_id: Uuid,
            service: NewService,
        ) -> eyre::Result<DbService>;

        pub async fn get_service_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbService>>;

        pub async fn get_services_by_host_id(
            &self,
            host_id: Uuid,
        ) -> eyre::Result<Vec<DbService>>;
    }
}

mock! {
    pub ApptTypeRepo {
        pub async fn create_appt_type(
            &self,
            service_id: Uuid,
            appt_type_name: String,
            appt_duration_minutes: i32,
        ) -> eyre::Result<DbApptType>;

        pub async fn get_appt_type_by_service_id_and_name(
            &self,
            service_id: Uuid,
            appt_type_name: String,
        ) -> eyre::Result<Option<DbApptType>>;
    }
}

mock! {
    pub ApptRepo {
        pub async fn find_conflicting_appt(
            &self,
            service_id: Uuid,
            appt_type_name: String,
            starts_at: NaiveDateTime,
            ends_at: NaiveDateTime,
        ) -> eyre::Result<Option<DbAppt>>;

        pub async fn insert_appt(
            &self,
            user_id: Uuid,
            service_id: Uuid,
            appt_type_name: String,
            starts_at: NaiveDateTime,
            ends_at: NaiveDateTime,
        ) -> eyre::Result<DbAppt>;
    }
}
