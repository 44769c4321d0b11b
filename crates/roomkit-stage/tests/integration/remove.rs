//! Integration tests for stage removal under both strategies.

use roomkit_core::{CreateStageInput, ErrorCode, StageId};
use roomkit_stage::{RemovalStrategy, STAGE_DOES_NOT_EXIST};

use crate::common::{OWNER, TestHarness, backends, intruder, owner};

const STRATEGIES: [RemovalStrategy; 2] =
    [RemovalStrategy::LookupThenDelete, RemovalStrategy::Conditional];

async fn harnesses() -> Vec<(TestHarness, RemovalStrategy)> {
    let mut out = Vec::new();
    for strategy in STRATEGIES {
        for mut harness in backends().await {
            harness.service = harness.service.with_removal(strategy);
            out.push((harness, strategy));
        }
    }
    out
}

#[tokio::test]
async fn test_owner_removes_stage() {
    for (harness, strategy) in harnesses().await {
        let room = harness.seed_room("Vault", OWNER).await;
        let stage = harness
            .service
            .create_stage(CreateStageInput::new(room.id.clone(), "Safe"), &owner())
            .await
            .unwrap();

        let removed = harness
            .service
            .remove_stage(&stage.id, &owner())
            .await
            .unwrap();

        assert_eq!(removed.id, stage.id, "{} / {strategy}", harness.name);
        assert_eq!(removed.escape_room_id, room.id, "{} / {strategy}", harness.name);

        let err = harness
            .service
            .find_stage_by_id(&stage.id, &owner())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound, "{} / {strategy}", harness.name);
    }
}

#[tokio::test]
async fn test_second_removal_is_not_found() {
    for (harness, strategy) in harnesses().await {
        let room = harness.seed_room("Vault", OWNER).await;
        let stage = harness
            .service
            .create_stage(CreateStageInput::new(room.id.clone(), "Safe"), &owner())
            .await
            .unwrap();

        harness
            .service
            .remove_stage(&stage.id, &owner())
            .await
            .unwrap();
        let err = harness
            .service
            .remove_stage(&stage.id, &owner())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotFound, "{} / {strategy}", harness.name);
        assert_eq!(err.to_string(), STAGE_DOES_NOT_EXIST);
    }
}

#[tokio::test]
async fn test_foreign_removal_is_not_found_and_keeps_stage() {
    for (harness, strategy) in harnesses().await {
        let room = harness.seed_room("Vault", OWNER).await;
        let stage = harness
            .service
            .create_stage(CreateStageInput::new(room.id.clone(), "Safe"), &owner())
            .await
            .unwrap();

        let err = harness
            .service
            .remove_stage(&stage.id, &intruder())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound, "{} / {strategy}", harness.name);
        assert_eq!(err.to_string(), STAGE_DOES_NOT_EXIST);

        let still_there = harness
            .service
            .find_stage_by_id(&stage.id, &owner())
            .await
            .unwrap();
        assert_eq!(still_there.stage, stage, "{} / {strategy}", harness.name);
    }
}

#[tokio::test]
async fn test_missing_stage_removal_is_not_found() {
    for (harness, strategy) in harnesses().await {
        let err = harness
            .service
            .remove_stage(&StageId::from("no-such-stage"), &owner())
            .await
            .unwrap_err();
        assert!(err.is_not_found(), "{} / {strategy}", harness.name);
    }
}

#[tokio::test]
async fn test_removal_leaves_siblings() {
    for (harness, strategy) in harnesses().await {
        let room = harness.seed_room("Vault", OWNER).await;
        let mut ids = Vec::new();
        for label in ["Safe", "Painting", "Clock"] {
            let stage = harness
                .service
                .create_stage(CreateStageInput::new(room.id.clone(), label), &owner())
                .await
                .unwrap();
            ids.push(stage.id);
        }

        harness
            .service
            .remove_stage(&ids[1], &owner())
            .await
            .unwrap();

        let remaining: Vec<StageId> = harness
            .service
            .find_all_escape_room_stages(&room.id, &owner())
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(
            remaining,
            vec![ids[0].clone(), ids[2].clone()],
            "{} / {strategy}",
            harness.name
        );
    }
}
