//! Database models for profiles.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use goalwise_core::identity::UserId;
use goalwise_core::profiles::Profile;

/// Database model for profiles
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProfileDB {
    pub user_id: String,
    pub full_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ProfileDB> for Profile {
    fn from(db: ProfileDB) -> Self {
        Self {
            user_id: UserId::from_stored(db.user_id),
            full_name: db.full_name,
            created_at: Some(db.created_at),
            updated_at: Some(db.updated_at),
        }
    }
}
