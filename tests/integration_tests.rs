//! Integration tests for the community duel service
//!
//! These tests exercise the full voting flow against both the in-memory
//! and the file-backed store: seeding, pair selection, vote recording,
//! admin overwrites and resets.

use community_duel::config::AppConfig;
use community_duel::rating::INITIAL_ELO;
use community_duel::service::AppState;
use community_duel::store::{default_communities, CommunityStore, FileKvStore};
use community_duel::types::Community;
use std::sync::Arc;

fn seeded_store() -> CommunityStore {
    CommunityStore::ephemeral(default_communities())
}

#[tokio::test]
async fn full_voting_round_trip() {
    let store = seeded_store();

    // Fetch a pair, vote for the first entry, and observe the swing.
    let (first, second) = store.pick_random_pair().await.unwrap().unwrap();
    assert_ne!(first.id, second.id);

    store.record_vote(&first.id, &second.id).await.unwrap();

    let winner = store.get_by_id(&first.id).await.unwrap().unwrap();
    let loser = store.get_by_id(&second.id).await.unwrap().unwrap();

    assert!(winner.elo > first.elo);
    assert!(loser.elo < second.elo);
    assert_eq!(winner.games_played, winner.wins + winner.losses);
    assert_eq!(loser.games_played, loser.wins + loser.losses);
}

#[tokio::test]
async fn leaderboard_reflects_accumulated_votes() {
    let store = seeded_store();
    let seed = default_communities();
    let (top, bottom) = (&seed[0].id, &seed[1].id);

    for _ in 0..5 {
        store.record_vote(top, bottom).await.unwrap();
    }

    let mut communities = store.list_all().await.unwrap();
    communities.sort_by(|a, b| b.elo.cmp(&a.elo));

    assert_eq!(&communities.first().unwrap().id, top);
    assert_eq!(&communities.last().unwrap().id, bottom);
}

#[tokio::test]
async fn returned_copies_do_not_alias_store_state() {
    let store = seeded_store();

    let mut copy = store.get_by_id("centar").await.unwrap().unwrap();
    copy.elo = 9999;
    copy.wins = 42;

    // Mutating the returned value must not leak into the store.
    let fresh = store.get_by_id("centar").await.unwrap().unwrap();
    assert_eq!(fresh.elo, INITIAL_ELO);
    assert_eq!(fresh.wins, 0);
}

#[tokio::test]
async fn admin_overwrite_then_reset_restores_the_seed() {
    let store = seeded_store();

    store
        .overwrite_stats("centar", 1200, 5, 2, 7)
        .await
        .unwrap();
    let centar = store.get_by_id("centar").await.unwrap().unwrap();
    assert_eq!(
        (centar.elo, centar.wins, centar.losses, centar.games_played),
        (1200, 5, 2, 7)
    );

    store.reset_all().await.unwrap();
    assert_eq!(store.list_all().await.unwrap(), default_communities());
}

#[tokio::test]
async fn votes_survive_a_restart_with_the_file_store() {
    let dir = tempfile::tempdir().unwrap();

    {
        let kv = Arc::new(FileKvStore::new(dir.path()));
        let store = CommunityStore::durable(kv, default_communities());
        store.record_vote("centar", "soko").await.unwrap();
    }

    // A brand-new coordinator over the same directory sees the vote.
    let kv = Arc::new(FileKvStore::new(dir.path()));
    let store = CommunityStore::durable(kv, default_communities());

    let centar = store.get_by_id("centar").await.unwrap().unwrap();
    let soko = store.get_by_id("soko").await.unwrap().unwrap();
    assert_eq!(centar.elo, 1016);
    assert_eq!(soko.elo, 984);
    assert_eq!(centar.wins, 1);
    assert_eq!(soko.losses, 1);
}

#[tokio::test]
async fn persisted_blob_uses_the_original_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let kv = Arc::new(FileKvStore::new(dir.path()));
    let store = CommunityStore::durable(kv, default_communities());
    store.list_all().await.unwrap();

    let blob =
        std::fs::read_to_string(dir.path().join("community_duel_communities_v2.json")).unwrap();
    assert!(blob.contains("\"imageUrl\""));
    assert!(blob.contains("\"gamesPlayed\""));

    // And it round-trips back into the domain type.
    let parsed: Vec<Community> = serde_json::from_str(&blob).unwrap();
    assert_eq!(parsed, default_communities());
}

#[tokio::test]
async fn app_state_wires_a_working_ephemeral_service() {
    let state = AppState::new(AppConfig::default()).unwrap();

    let (first, second) = state.store().pick_random_pair().await.unwrap().unwrap();
    state
        .store()
        .record_vote(&first.id, &second.id)
        .await
        .unwrap();

    let winner = state.store().get_by_id(&first.id).await.unwrap().unwrap();
    assert_eq!(winner.wins, 1);
}

#[tokio::test]
async fn concurrent_votes_on_disjoint_pairs_all_land_or_lose_cleanly() {
    let store = Arc::new(seeded_store());
    let seed = default_communities();

    // Votes race on the whole-collection write; last write wins is the
    // documented model. Every surviving entry must still be internally
    // consistent.
    let mut handles = Vec::new();
    for pair in seed.chunks(2).take(4) {
        let store = store.clone();
        let (winner, loser) = (pair[0].id.clone(), pair[1].id.clone());
        handles.push(tokio::spawn(async move {
            store.record_vote(&winner, &loser).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    for community in store.list_all().await.unwrap() {
        assert_eq!(community.games_played, community.wins + community.losses);
    }
}
