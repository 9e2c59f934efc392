use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use goalwise_core::identity::UserId;
use goalwise_core::profiles::{Profile, ProfileRepositoryTrait, ProfileUpdate};
use goalwise_core::utils::time_utils::now_utc;
use goalwise_core::Result;

use super::model::ProfileDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::profiles;

pub struct ProfileRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProfileRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProfileRepository { pool, writer }
    }
}

#[async_trait]
impl ProfileRepositoryTrait for ProfileRepository {
    fn get_profile(&self, user: &UserId) -> Result<Option<Profile>> {
        let mut conn = get_connection(&self.pool)?;
        let profile = profiles::table
            .find(user.as_str())
            .select(ProfileDB::as_select())
            .first::<ProfileDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(profile.map(Profile::from))
    }

    async fn upsert_profile(&self, user: &UserId, update: ProfileUpdate) -> Result<Profile> {
        let now = now_utc();
        let row = ProfileDB {
            user_id: user.as_str().to_string(),
            full_name: update.full_name,
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Profile> {
                let result_db = diesel::insert_into(profiles::table)
                    .values(&row)
                    .on_conflict(profiles::user_id)
                    .do_update()
                    .set((
                        profiles::full_name.eq(row.full_name.clone()),
                        profiles::updated_at.eq(row.updated_at),
                    ))
                    .returning(ProfileDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Profile::from(result_db))
            })
            .await
    }
}
