use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// Display information for a user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: UserId,
    pub full_name: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Profile {
    /// Profile returned for users that never saved one.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            full_name: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Up to two uppercase initials, `"U"` when no name is set.
    pub fn initials(&self) -> String {
        let initials: String = self
            .full_name
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }
}

/// Input model for editing a profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: Option<&str>) -> Profile {
        Profile {
            full_name: name.map(str::to_string),
            ..Profile::empty(UserId::parse("u1").unwrap())
        }
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(profile(Some("ada king lovelace")).initials(), "AK");
        assert_eq!(profile(Some("grace")).initials(), "G");
    }

    #[test]
    fn initials_fall_back_to_u() {
        assert_eq!(profile(None).initials(), "U");
        assert_eq!(profile(Some("   ")).initials(), "U");
    }
}
