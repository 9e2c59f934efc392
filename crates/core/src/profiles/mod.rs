//! Profiles module - per-user display name.

mod profiles_model;
mod profiles_service;
mod profiles_traits;

pub use profiles_model::{Profile, ProfileUpdate};
pub use profiles_service::ProfileService;
pub use profiles_traits::{ProfileRepositoryTrait, ProfileServiceTrait};
