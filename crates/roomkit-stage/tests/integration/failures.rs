//! Store failures and races surface unchanged through the service.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use roomkit_core::{CreateStageInput, EscapeRoomId, ErrorCode, StageId};
use roomkit_stage::{
    RemovalStrategy, STAGE_DOES_NOT_EXIST, StageService, remove_stage, remove_stage_conditional,
};
use roomkit_store::MemoryStore;

use crate::common::{FailingStore, OWNER, RacingStore, TestHarness, owner};

fn failing_service() -> StageService {
    StageService::new(Arc::new(FailingStore))
}

fn assert_offline(err: roomkit_core::Error) {
    assert_eq!(err.code(), ErrorCode::InternalServerError);
    assert_eq!(err.to_string(), "store offline");
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_create_propagates_store_failure() {
    let input = CreateStageInput::new(EscapeRoomId::from("room-1"), "Puzzle 1");
    let err = failing_service()
        .create_stage(input, &owner())
        .await
        .unwrap_err();
    assert_offline(err);
}

#[tokio::test]
async fn test_list_propagates_store_failure() {
    let err = failing_service()
        .find_all_escape_room_stages(&EscapeRoomId::from("room-1"), &owner())
        .await
        .unwrap_err();
    assert_offline(err);
}

#[tokio::test]
async fn test_find_propagates_store_failure() {
    let err = failing_service()
        .find_stage_by_id(&StageId::from("stage-1"), &owner())
        .await
        .unwrap_err();
    assert_offline(err);
}

#[tokio::test]
async fn test_remove_propagates_store_failure() {
    for strategy in [RemovalStrategy::LookupThenDelete, RemovalStrategy::Conditional] {
        let err = failing_service()
            .with_removal(strategy)
            .remove_stage(&StageId::from("stage-1"), &owner())
            .await
            .unwrap_err();
        assert_offline(err);
    }
}

#[tokio::test]
async fn test_store_failure_body_is_internal_error() {
    let err = failing_service()
        .find_stage_by_id(&StageId::from("stage-1"), &owner())
        .await
        .unwrap_err();
    let body = serde_json::to_value(err.to_body()).unwrap();
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(body["message"], "store offline");
}

#[tokio::test]
async fn test_concurrent_delete_between_lookup_and_delete_is_not_found() {
    let memory = MemoryStore::new();
    let harness = TestHarness::new("memory", Arc::new(memory.clone()));
    let room = harness.seed_room("Vault", OWNER).await;
    let stage = harness
        .service
        .create_stage(CreateStageInput::new(room.id.clone(), "Safe"), &owner())
        .await
        .unwrap();

    let racing = RacingStore::new(memory.clone());
    let err = remove_stage(&stage.id, &owner(), &racing)
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.to_string(), STAGE_DOES_NOT_EXIST);
    assert_eq!(racing.deletes.load(Ordering::SeqCst), 1);
    assert_eq!(memory.stage_count().await, 0);
}

#[tokio::test]
async fn test_conditional_removal_skips_lookup() {
    let memory = MemoryStore::new();
    let harness = TestHarness::new("memory", Arc::new(memory.clone()));
    let room = harness.seed_room("Vault", OWNER).await;
    let stage = harness
        .service
        .create_stage(CreateStageInput::new(room.id.clone(), "Safe"), &owner())
        .await
        .unwrap();

    // The racing lookup is never consulted, so the stage is removed normally.
    let racing = RacingStore::new(memory.clone());
    let removed = remove_stage_conditional(&stage.id, &owner(), &racing)
        .await
        .unwrap();

    assert_eq!(removed.id, stage.id);
    assert_eq!(racing.deletes.load(Ordering::SeqCst), 1);
    assert_eq!(memory.stage_count().await, 0);
}
