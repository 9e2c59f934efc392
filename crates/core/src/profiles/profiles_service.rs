use std::sync::Arc;

use async_trait::async_trait;

use super::profiles_model::{Profile, ProfileUpdate};
use super::profiles_traits::{ProfileRepositoryTrait, ProfileServiceTrait};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::identity::UserId;

pub struct ProfileService {
    profile_repo: Arc<dyn ProfileRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl ProfileService {
    pub fn new(
        profile_repo: Arc<dyn ProfileRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            profile_repo,
            event_sink,
        }
    }
}

#[async_trait]
impl ProfileServiceTrait for ProfileService {
    fn get_profile(&self, user: &UserId) -> Result<Profile> {
        Ok(self
            .profile_repo
            .get_profile(user)?
            .unwrap_or_else(|| Profile::empty(user.clone())))
    }

    async fn update_profile(&self, user: &UserId, update: ProfileUpdate) -> Result<Profile> {
        let update = ProfileUpdate {
            full_name: update
                .full_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        };
        let profile = self.profile_repo.upsert_profile(user, update).await?;
        self.event_sink
            .emit(DomainEvent::profile_changed(user.clone()));
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MockDomainEventSink;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockProfileRepository {
        profiles: Mutex<HashMap<UserId, Profile>>,
    }

    #[async_trait]
    impl ProfileRepositoryTrait for MockProfileRepository {
        fn get_profile(&self, user: &UserId) -> Result<Option<Profile>> {
            Ok(self.profiles.lock().unwrap().get(user).cloned())
        }

        async fn upsert_profile(&self, user: &UserId, update: ProfileUpdate) -> Result<Profile> {
            let profile = Profile {
                full_name: update.full_name,
                ..Profile::empty(user.clone())
            };
            self.profiles
                .lock()
                .unwrap()
                .insert(user.clone(), profile.clone());
            Ok(profile)
        }
    }

    fn service() -> (ProfileService, MockDomainEventSink) {
        let sink = MockDomainEventSink::new();
        let service = ProfileService::new(
            Arc::new(MockProfileRepository::default()),
            Arc::new(sink.clone()),
        );
        (service, sink)
    }

    #[test]
    fn missing_profile_is_empty() {
        let (service, _) = service();
        let user = UserId::parse("u1").unwrap();
        let profile = service.get_profile(&user).unwrap();
        assert_eq!(profile, Profile::empty(user));
    }

    #[tokio::test]
    async fn update_trims_and_clears_blank_names() {
        let (service, sink) = service();
        let user = UserId::parse("u1").unwrap();

        let saved = service
            .update_profile(
                &user,
                ProfileUpdate {
                    full_name: Some("  Asha Rao ".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(saved.full_name.as_deref(), Some("Asha Rao"));

        let cleared = service
            .update_profile(
                &user,
                ProfileUpdate {
                    full_name: Some("   ".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.full_name, None);
        assert_eq!(sink.events().len(), 2);
    }
}
