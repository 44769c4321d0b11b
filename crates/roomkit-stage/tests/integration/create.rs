//! Integration tests for stage creation.

use roomkit_core::{CreateStageInput, EscapeRoomId, ErrorCode};
use roomkit_stage::{ESCAPE_ROOM_NOT_FOUND, NOT_ALLOWED_TO_ADD_STAGE, create_stage};

use crate::common::{OWNER, backends, intruder, owner};

#[tokio::test]
async fn test_owner_creates_stage_with_forced_fields() {
    for harness in backends().await {
        let room = harness.seed_room("Haunted Manor", OWNER).await;
        let input = CreateStageInput::new(room.id.clone(), "Puzzle 1").with_time_limit(600);

        let stage = harness
            .service
            .create_stage(input, &owner())
            .await
            .expect("owner should be able to create a stage");

        assert_eq!(stage.label, "Puzzle 1", "{}", harness.name);
        assert_eq!(stage.order, 0, "{}", harness.name);
        assert_eq!(stage.time_limit, Some(600), "{}", harness.name);
        assert_eq!(stage.created_by_id, owner(), "{}", harness.name);
        assert_eq!(stage.escape_room_id, room.id, "{}", harness.name);
        assert!(!stage.id.as_str().is_empty(), "{}", harness.name);
        assert!(stage.description.is_none(), "{}", harness.name);
        assert!(stage.background.is_none(), "{}", harness.name);
    }
}

#[tokio::test]
async fn test_optional_fields_are_stored() {
    for harness in backends().await {
        let room = harness.seed_room("Vault", OWNER).await;
        let input = CreateStageInput::new(room.id.clone(), "Lockbox")
            .with_description("Find the four-digit code")
            .with_background("https://cdn.example.com/lockbox.png");

        let stage = harness
            .service
            .create_stage(input, &owner())
            .await
            .unwrap();

        assert_eq!(
            stage.description.as_deref(),
            Some("Find the four-digit code"),
            "{}",
            harness.name
        );
        assert_eq!(
            stage.background.as_deref(),
            Some("https://cdn.example.com/lockbox.png"),
            "{}",
            harness.name
        );
        assert!(stage.time_limit.is_none(), "{}", harness.name);
    }
}

#[tokio::test]
async fn test_missing_room_is_not_found_and_creates_nothing() {
    for harness in backends().await {
        let missing = EscapeRoomId::from("room-does-not-exist");
        let input = CreateStageInput::new(missing.clone(), "Puzzle 1");

        let err = harness
            .service
            .create_stage(input, &owner())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotFound, "{}", harness.name);
        assert_eq!(err.to_string(), ESCAPE_ROOM_NOT_FOUND);
        let stages = harness
            .service
            .find_all_escape_room_stages(&missing, &owner())
            .await
            .unwrap();
        assert!(stages.is_empty(), "{}", harness.name);
    }
}

#[tokio::test]
async fn test_foreign_room_is_forbidden_and_creates_nothing() {
    for harness in backends().await {
        let room = harness.seed_room("Vault", OWNER).await;
        let input = CreateStageInput::new(room.id.clone(), "Sneaky stage");

        let err = harness
            .service
            .create_stage(input, &intruder())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Forbidden, "{}", harness.name);
        assert_eq!(err.to_string(), NOT_ALLOWED_TO_ADD_STAGE);

        for user in [owner(), intruder()] {
            let stages = harness
                .service
                .find_all_escape_room_stages(&room.id, &user)
                .await
                .unwrap();
            assert!(stages.is_empty(), "{}: {user} sees stages", harness.name);
        }
    }
}

#[tokio::test]
async fn test_free_function_matches_service() {
    for harness in backends().await {
        let room = harness.seed_room("Vault", OWNER).await;
        let input = CreateStageInput::new(room.id.clone(), "Direct");

        let stage = create_stage(input, &owner(), harness.store.as_ref())
            .await
            .unwrap();

        let fetched = harness
            .service
            .find_stage_by_id(&stage.id, &owner())
            .await
            .unwrap();
        assert_eq!(fetched.stage, stage, "{}", harness.name);
    }
}

#[tokio::test]
async fn test_every_new_stage_starts_at_order_zero() {
    for harness in backends().await {
        let room = harness.seed_room("Vault", OWNER).await;
        for i in 0..3 {
            let input = CreateStageInput::new(room.id.clone(), format!("Puzzle {i}"));
            harness.service.create_stage(input, &owner()).await.unwrap();
        }

        let stages = harness
            .service
            .find_all_escape_room_stages(&room.id, &owner())
            .await
            .unwrap();
        assert_eq!(stages.len(), 3, "{}", harness.name);
        assert!(stages.iter().all(|s| s.order == 0), "{}", harness.name);
    }
}
