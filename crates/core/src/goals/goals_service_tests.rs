#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result, ValidationError};
    use crate::events::{DomainEvent, GoalChangeKind, MockDomainEventSink};
    use crate::goals::{
        Goal, GoalCategory, GoalParserTrait, GoalRecord, GoalRepositoryTrait, GoalService,
        GoalServiceTrait, GoalStatus, NewGoal, ParsedGoal,
    };
    use crate::identity::UserId;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    // --- Mock GoalRepository ---
    #[derive(Default)]
    struct MockGoalRepository {
        goals: Mutex<Vec<Goal>>,
    }

    impl MockGoalRepository {
        fn count(&self) -> usize {
            self.goals.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GoalRepositoryTrait for MockGoalRepository {
        fn list_goals(&self, user: &UserId) -> Result<Vec<Goal>> {
            let goals = self.goals.lock().unwrap();
            Ok(goals
                .iter()
                .rev()
                .filter(|g| &g.user_id == user)
                .cloned()
                .collect())
        }

        fn get_goal(&self, user: &UserId, goal_id: &str) -> Result<Goal> {
            self.goals
                .lock()
                .unwrap()
                .iter()
                .find(|g| g.id == goal_id && &g.user_id == user)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))
        }

        async fn insert_goal(&self, user: &UserId, record: GoalRecord) -> Result<Goal> {
            let mut goals = self.goals.lock().unwrap();
            let created_at = NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            let goal = Goal {
                id: format!("goal-{}", goals.len() + 1),
                user_id: user.clone(),
                title: record.title,
                target_amount: record.target_amount,
                current_amount: Decimal::ZERO,
                deadline: record.deadline,
                monthly_target: record.monthly_target,
                category: record.category,
                status: GoalStatus::Active,
                created_at,
                updated_at: created_at,
            };
            goals.push(goal.clone());
            Ok(goal)
        }

        async fn delete_goal(&self, user: &UserId, goal_id: &str) -> Result<usize> {
            let mut goals = self.goals.lock().unwrap();
            let before = goals.len();
            goals.retain(|g| !(g.id == goal_id && &g.user_id == user));
            Ok(before - goals.len())
        }
    }

    // --- Mock GoalParser ---
    struct MockGoalParser {
        reply: Result<ParsedGoal>,
        seen: Mutex<Vec<(String, NaiveDate)>>,
    }

    impl MockGoalParser {
        fn replying(reply: Result<ParsedGoal>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GoalParserTrait for MockGoalParser {
        async fn parse_goal(&self, input: &str, today: NaiveDate) -> Result<ParsedGoal> {
            self.seen.lock().unwrap().push((input.to_string(), today));
            match &self.reply {
                Ok(parsed) => Ok(parsed.clone()),
                Err(e) => Err(Error::Unexpected(e.to_string())),
            }
        }
    }

    struct Fixture {
        repo: Arc<MockGoalRepository>,
        parser: Arc<MockGoalParser>,
        sink: MockDomainEventSink,
        service: GoalService,
    }

    fn fixture(parser_reply: Result<ParsedGoal>) -> Fixture {
        let repo = Arc::new(MockGoalRepository::default());
        let parser = Arc::new(MockGoalParser::replying(parser_reply));
        let sink = MockDomainEventSink::new();
        let service = GoalService::new(repo.clone(), parser.clone(), Arc::new(sink.clone()));
        Fixture {
            repo,
            parser,
            sink,
            service,
        }
    }

    fn user() -> UserId {
        UserId::parse("user-1").unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn new_goal(title: &str, target: Decimal, deadline: NaiveDate) -> NewGoal {
        NewGoal {
            title: title.to_string(),
            target_amount: target,
            deadline,
            category: GoalCategory::Travel,
        }
    }

    fn laptop() -> ParsedGoal {
        ParsedGoal {
            title: "Laptop".to_string(),
            amount: dec!(80000),
            deadline: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            category: GoalCategory::Purchase,
        }
    }

    #[tokio::test]
    async fn create_goal_derives_monthly_target_and_starts_active() {
        let f = fixture(Ok(laptop()));
        let deadline = today() + chrono::Duration::days(180);

        let goal = f
            .service
            .create_goal(&user(), new_goal("  Trip to Goa ", dec!(10000), deadline), today())
            .await
            .unwrap();

        assert_eq!(goal.title, "Trip to Goa");
        assert_eq!(goal.current_amount, Decimal::ZERO);
        assert_eq!(goal.status, GoalStatus::Active);
        assert_eq!(goal.monthly_target.round_dp(2), dec!(1666.67));
        assert_eq!(
            f.sink.events(),
            vec![DomainEvent::goals_changed(
                user(),
                vec![goal.id.clone()],
                GoalChangeKind::Created
            )]
        );
    }

    #[tokio::test]
    async fn past_deadline_puts_whole_amount_in_one_month() {
        let f = fixture(Ok(laptop()));
        let deadline = today() - chrono::Duration::days(5);

        let goal = f
            .service
            .create_goal(&user(), new_goal("Late", dec!(500), deadline), today())
            .await
            .unwrap();

        assert_eq!(goal.monthly_target, dec!(500));
    }

    #[tokio::test]
    async fn create_goal_rejects_blank_title_and_non_positive_target() {
        let f = fixture(Ok(laptop()));
        let deadline = today() + chrono::Duration::days(30);

        let blank = f
            .service
            .create_goal(&user(), new_goal("   ", dec!(100), deadline), today())
            .await;
        assert!(matches!(blank, Err(Error::Validation(_))));

        for target in [dec!(0), dec!(-10)] {
            let result = f
                .service
                .create_goal(&user(), new_goal("Bike", target, deadline), today())
                .await;
            assert!(matches!(result, Err(Error::Validation(_))));
        }

        assert_eq!(f.repo.count(), 0);
        assert!(f.sink.events().is_empty());
    }

    #[tokio::test]
    async fn create_goal_from_text_passes_today_to_parser() {
        let f = fixture(Ok(laptop()));

        let goal = f
            .service
            .create_goal_from_text(&user(), "  Save 80k for a laptop by June  ", today())
            .await
            .unwrap();

        assert_eq!(goal.title, "Laptop");
        assert_eq!(goal.target_amount, dec!(80000));
        assert_eq!(goal.category, GoalCategory::Purchase);
        // 180 days from 2025-01-01 -> 6 months
        assert_eq!(goal.monthly_target.round_dp(2), dec!(13333.33));

        let seen = f.parser.seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![("Save 80k for a laptop by June".to_string(), today())]
        );
    }

    #[tokio::test]
    async fn empty_text_is_rejected_without_calling_parser() {
        let f = fixture(Ok(laptop()));

        let result = f
            .service
            .create_goal_from_text(&user(), "   ", today())
            .await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
        assert!(f.parser.seen.lock().unwrap().is_empty());
        assert_eq!(f.repo.count(), 0);
    }

    #[tokio::test]
    async fn parser_failure_is_upstream_and_writes_nothing() {
        let f = fixture(Err(Error::Unexpected("model timed out".to_string())));

        let result = f
            .service
            .create_goal_from_text(&user(), "save for a bike", today())
            .await;

        assert!(matches!(result, Err(Error::Upstream(_))));
        assert_eq!(f.repo.count(), 0);
        assert!(f.sink.events().is_empty());
    }

    #[tokio::test]
    async fn parsed_goal_with_zero_amount_is_rejected() {
        let mut parsed = laptop();
        parsed.amount = Decimal::ZERO;
        let f = fixture(Ok(parsed));

        let result = f
            .service
            .create_goal_from_text(&user(), "save for something", today())
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(f.repo.count(), 0);
    }

    #[tokio::test]
    async fn goals_are_scoped_to_their_owner() {
        let f = fixture(Ok(laptop()));
        let other = UserId::parse("user-2").unwrap();
        let deadline = today() + chrono::Duration::days(60);

        let mine = f
            .service
            .create_goal(&user(), new_goal("Mine", dec!(100), deadline), today())
            .await
            .unwrap();
        f.service
            .create_goal(&other, new_goal("Theirs", dec!(100), deadline), today())
            .await
            .unwrap();

        let listed = f.service.get_goals(&user()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, mine.id);
        assert!(matches!(
            f.service.get_goal(&other, &mine.id),
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_goal_emits_event_and_missing_goal_is_not_found() {
        let f = fixture(Ok(laptop()));
        let deadline = today() + chrono::Duration::days(60);
        let goal = f
            .service
            .create_goal(&user(), new_goal("Bike", dec!(100), deadline), today())
            .await
            .unwrap();
        f.sink.clear();

        assert_eq!(f.service.delete_goal(&user(), &goal.id).await.unwrap(), 1);
        assert_eq!(
            f.sink.events(),
            vec![DomainEvent::goals_changed(
                user(),
                vec![goal.id.clone()],
                GoalChangeKind::Deleted
            )]
        );

        let again = f.service.delete_goal(&user(), &goal.id).await;
        assert!(matches!(again, Err(Error::NotFound(_))));
        assert_eq!(f.sink.events().len(), 1);
    }
}
