//! Tests for cards module
//!
//! These tests verify card CRUD behavior including:
//! - Field-presence validation
//! - Create-then-fetch round trip
//! - Not-found handling on reads and updates

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::{migrations, ApiError, Validator};
    use models::CardPayload;
    use services::CardsService;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        migrations::run_migrations(&pool).await.expect("migrations");
        pool
    }

    fn dragon_payload() -> CardPayload {
        CardPayload {
            name: Some("Dragon".to_string()),
            description: Some("Fire breather".to_string()),
            stroke: Some(10),
            defense: Some(5),
        }
    }

    #[test]
    fn test_card_payload_validation_success() {
        let payload = dragon_payload();
        let result = payload.validate(&payload);
        assert!(result.is_valid);
    }

    #[test]
    fn test_card_payload_missing_fields() {
        let payload = CardPayload {
            name: None,
            description: Some("".to_string()),
            stroke: Some(10),
            defense: None,
        };

        let result = payload.validate(&payload);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "name"));
        assert!(result.errors.iter().any(|e| e.field == "description"));
        assert!(result.errors.iter().any(|e| e.field == "defense"));
        assert!(!result.errors.iter().any(|e| e.field == "stroke"));
    }

    #[tokio::test]
    async fn test_create_then_show_returns_equal_fields() {
        let pool = test_pool().await;
        let service = CardsService::new(pool);

        let created = service.create_card(dragon_payload()).await.expect("create");
        let fetched = service
            .get_card_by_id(created.id)
            .await
            .expect("fetch created card");

        assert_eq!(fetched.name, "Dragon");
        assert_eq!(fetched.description, "Fire breather");
        assert_eq!(fetched.stroke, 10);
        assert_eq!(fetched.defense, 5);
    }

    #[tokio::test]
    async fn test_get_all_cards_ordered_by_id() {
        let pool = test_pool().await;
        let service = CardsService::new(pool);

        service.create_card(dragon_payload()).await.expect("create");
        let mut second = dragon_payload();
        second.name = Some("Golem".to_string());
        service.create_card(second).await.expect("create");

        let cards = service.get_all_cards().await.expect("list");
        assert_eq!(cards.len(), 2);
        assert!(cards[0].id < cards[1].id);
        assert_eq!(cards[1].name, "Golem");
    }

    #[tokio::test]
    async fn test_show_unknown_card_not_found() {
        let pool = test_pool().await;
        let service = CardsService::new(pool);

        let err = service.get_card_by_id(42).await.expect_err("no cards yet");
        match err {
            ApiError::NotFound(message) => assert_eq!(message, "Card not found"),
            other => panic!("expected NotFound, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_update_unknown_card_not_found() {
        let pool = test_pool().await;
        let service = CardsService::new(pool);

        let err = service
            .update_card(42, dragon_payload())
            .await
            .expect_err("update of a missing card must fail");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let pool = test_pool().await;
        let service = CardsService::new(pool);

        let created = service.create_card(dragon_payload()).await.expect("create");
        let updated = service
            .update_card(
                created.id,
                CardPayload {
                    name: Some("Elder Dragon".to_string()),
                    description: Some("Still breathes fire".to_string()),
                    stroke: Some(12),
                    defense: Some(7),
                },
            )
            .await
            .expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Elder Dragon");
        assert_eq!(updated.stroke, 12);
        assert_eq!(updated.defense, 7);
    }

    #[tokio::test]
    async fn test_create_with_missing_field_writes_nothing() {
        let pool = test_pool().await;
        let service = CardsService::new(pool.clone());

        let err = service
            .create_card(CardPayload {
                name: Some("Dragon".to_string()),
                description: None,
                stroke: Some(10),
                defense: Some(5),
            })
            .await
            .expect_err("invalid payload must be rejected");
        assert!(matches!(err, ApiError::Validation { .. }));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cards")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 0);
    }
}
