//! Property tests over the in-memory backend.

use proptest::prelude::*;
use roomkit_core::{
    CreateStageInput, EscapeRoom, NewEscapeRoom, NewStage, StageId, StageStore, UserId,
};
use roomkit_stage::{create_stage, find_all_escape_room_stages, find_stage_by_id};
use roomkit_store::MemoryStore;

const USERS: [&str; 3] = ["owner-1", "owner-2", "owner-3"];

/// (room index, creator index) for each seeded stage.
fn placements() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..3usize, 0..USERS.len()), 0..24)
}

async fn seed_rooms(store: &MemoryStore) -> Vec<EscapeRoom> {
    let mut rooms = Vec::new();
    for (i, owner) in USERS.iter().enumerate() {
        let room = store
            .create_escape_room(NewEscapeRoom::new(format!("Room {i}"), UserId::from(*owner)))
            .await
            .unwrap();
        rooms.push(room);
    }
    rooms
}

proptest! {
    #[test]
    fn prop_listing_is_exactly_room_and_owner_filter(
        placed in placements(),
        room_pick in 0..3usize,
        user_pick in 0..USERS.len(),
    ) {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            let rooms = seed_rooms(&store).await;

            let mut expected: Vec<StageId> = Vec::new();
            for (n, (room_idx, user_idx)) in placed.iter().enumerate() {
                let input = CreateStageInput::new(rooms[*room_idx].id.clone(), format!("Stage {n}"));
                let stage = store
                    .create_stage(NewStage::from_input(input, &UserId::from(USERS[*user_idx])))
                    .await
                    .unwrap();
                if *room_idx == room_pick && *user_idx == user_pick {
                    expected.push(stage.id);
                }
            }

            let listed: Vec<StageId> = find_all_escape_room_stages(
                &rooms[room_pick].id,
                &UserId::from(USERS[user_pick]),
                &store,
            )
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();

            assert_eq!(listed, expected);
        });
    }

    #[test]
    fn prop_create_succeeds_only_for_room_owner(
        room_pick in 0..3usize,
        user_pick in 0..USERS.len(),
        label in "[A-Za-z0-9 ]{1,40}",
    ) {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            let rooms = seed_rooms(&store).await;
            let user = UserId::from(USERS[user_pick]);
            let input = CreateStageInput::new(rooms[room_pick].id.clone(), label.clone());

            let result = create_stage(input, &user, &store).await;

            if rooms[room_pick].created_by_id == user {
                let stage = result.unwrap();
                assert_eq!(stage.order, 0);
                assert_eq!(stage.created_by_id, user);
                assert_eq!(stage.label, label);
                let found = find_stage_by_id(&stage.id, &user, &store).await.unwrap();
                assert_eq!(found.stage, stage);
            } else {
                assert!(result.unwrap_err().is_forbidden());
                assert_eq!(store.stage_count().await, 0);
            }
        });
    }

    #[test]
    fn prop_non_owner_never_reads_stage(
        owner_pick in 0..USERS.len(),
        reader_pick in 0..USERS.len(),
    ) {
        prop_assume!(owner_pick != reader_pick);
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            let rooms = seed_rooms(&store).await;
            let owner = UserId::from(USERS[owner_pick]);
            let input = CreateStageInput::new(rooms[owner_pick].id.clone(), "Secret");
            let stage = create_stage(input, &owner, &store).await.unwrap();

            let err = find_stage_by_id(&stage.id, &UserId::from(USERS[reader_pick]), &store)
                .await
                .unwrap_err();
            assert!(err.is_not_found());
        });
    }
}
