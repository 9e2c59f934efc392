use async_trait::async_trait;

use super::profiles_model::{Profile, ProfileUpdate};
use crate::errors::Result;
use crate::identity::UserId;

/// Trait for profile repository operations
#[async_trait]
pub trait ProfileRepositoryTrait: Send + Sync {
    fn get_profile(&self, user: &UserId) -> Result<Option<Profile>>;
    async fn upsert_profile(&self, user: &UserId, update: ProfileUpdate) -> Result<Profile>;
}

/// Trait for profile service operations
#[async_trait]
pub trait ProfileServiceTrait: Send + Sync {
    fn get_profile(&self, user: &UserId) -> Result<Profile>;
    async fn update_profile(&self, user: &UserId, update: ProfileUpdate) -> Result<Profile>;
}
