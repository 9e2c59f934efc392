//! SQLite storage implementation for profiles.

mod model;
mod repository;

pub use model::ProfileDB;
pub use repository::ProfileRepository;
