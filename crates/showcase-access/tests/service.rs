//! Service integration tests
//!
//! Exercise the showcase service against in-memory repositories:
//! default tiers, feed construction, confirmed-write tier changes, and
//! reads racing those writes.

mod common;

use std::sync::Arc;

use common::{event, MockEventRepository, MockUserRepository};
use showcase_access::{
    AccessConfig, AccessError, Direction, ShowcaseService, TierChange, TierChangeAuthority,
};
use showcase_db::seed::{seed_if_empty, SeedOutcome};
use showcase_db::{EventRepository, UserRepository};
use showcase_types::{Tier, UserId};

type TestService = ShowcaseService<MockUserRepository, MockEventRepository>;

fn service_with(
    users: MockUserRepository,
    events: MockEventRepository,
    self_service: bool,
) -> TestService {
    let config = AccessConfig::new("0123456789abcdef0123456789abcdef", "iss", "aud")
        .with_self_service_tier_changes(self_service);
    ShowcaseService::new(config, Arc::new(users), Arc::new(events))
}

fn sample_events() -> MockEventRepository {
    MockEventRepository::with_events(vec![
        event(3, Tier::Silver),
        event(1, Tier::Free),
        event(2, Tier::Gold),
        event(4, Tier::Platinum),
    ])
}

// ============================================================================
// Current Tier
// ============================================================================

#[tokio::test]
async fn test_unknown_user_defaults_to_free() {
    let service = service_with(MockUserRepository::new(), sample_events(), false);
    let tier = service.current_tier(&UserId::from("nobody")).await.unwrap();
    assert_eq!(tier, Tier::Free);
}

#[tokio::test]
async fn test_unset_tier_defaults_to_free() {
    let users = MockUserRepository::new();
    users.insert_user("alice", None);
    let service = service_with(users, sample_events(), false);

    assert_eq!(service.current_tier(&UserId::from("alice")).await.unwrap(), Tier::Free);
}

#[tokio::test]
async fn test_stored_tier_is_read() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("gold"));
    let service = service_with(users, sample_events(), false);

    assert_eq!(service.current_tier(&UserId::from("alice")).await.unwrap(), Tier::Gold);
}

#[tokio::test]
async fn test_corrupt_stored_tier_is_an_error() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("diamond"));
    let service = service_with(users, sample_events(), false);

    let err = service.current_tier(&UserId::from("alice")).await.unwrap_err();
    assert!(matches!(err, AccessError::Database(_)));
}

#[tokio::test]
async fn test_every_lookup_reads_the_store() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("silver"));
    let service = service_with(users.clone(), sample_events(), false);
    let alice = UserId::from("alice");

    service.current_tier(&alice).await.unwrap();
    service.current_tier(&alice).await.unwrap();

    assert_eq!(users.reads(), 2);
}

// ============================================================================
// Event Feed
// ============================================================================

#[tokio::test]
async fn test_feed_partitions_in_date_order() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("silver"));
    let service = service_with(users, sample_events(), false);

    let feed = service.event_feed(&UserId::from("alice")).await.unwrap();

    let accessible: Vec<Tier> = feed.accessible.iter().map(|e| e.tier).collect();
    let locked: Vec<Tier> = feed.locked.iter().map(|e| e.tier).collect();
    assert_eq!(accessible, vec![Tier::Free, Tier::Silver]);
    assert_eq!(locked, vec![Tier::Gold, Tier::Platinum]);
    assert_eq!(feed.tier, Tier::Silver);
    assert_eq!(feed.next_tier, Some(Tier::Gold));
    assert_eq!(feed.previous_tier, Some(Tier::Free));
}

#[tokio::test]
async fn test_accessible_events_use_tier_filter() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("gold"));
    let service = service_with(users, sample_events(), false);

    let accessible = service.accessible_events(&UserId::from("alice")).await.unwrap();
    let tiers: Vec<Tier> = accessible.events.iter().map(|e| e.tier).collect();
    assert_eq!(accessible.tier, Tier::Gold);
    assert_eq!(tiers, vec![Tier::Free, Tier::Gold, Tier::Silver]);
}

#[tokio::test]
async fn test_single_event_access() {
    let gold = event(5, Tier::Gold);
    let free = event(6, Tier::Free);
    let events = MockEventRepository::with_events(vec![gold.clone(), free.clone()]);
    let service = service_with(MockUserRepository::new(), events, false);
    let user = UserId::from("bob");

    assert_eq!(service.event(&user, free.id).await.unwrap().id, free.id);
    assert!(matches!(
        service.event(&user, gold.id).await,
        Err(AccessError::EventLocked { required: Tier::Gold })
    ));
    assert!(matches!(
        service.event(&user, showcase_types::EventId::new()).await,
        Err(AccessError::EventNotFound)
    ));
}

#[tokio::test]
async fn test_seeded_store_feed_for_free_user() {
    let events = MockEventRepository::new();
    assert_eq!(seed_if_empty(&events).await.unwrap(), SeedOutcome::Seeded { inserted: 8 });
    assert_eq!(
        seed_if_empty(&events).await.unwrap(),
        SeedOutcome::AlreadySeeded { existing: 8 }
    );

    let service = service_with(MockUserRepository::new(), events, false);
    let feed = service.event_feed(&UserId::from("new-user")).await.unwrap();

    assert_eq!(feed.accessible.len(), 2);
    assert_eq!(feed.locked.len(), 6);
}

#[tokio::test]
async fn test_concurrent_seeds_insert_once() {
    let events = Arc::new(MockEventRepository::new());

    let seeders: Vec<_> = (0..8)
        .map(|_| {
            let events = Arc::clone(&events);
            tokio::spawn(async move { seed_if_empty(events.as_ref()).await })
        })
        .collect();

    let mut seeded = 0;
    for seeder in seeders {
        match seeder.await.unwrap().unwrap() {
            SeedOutcome::Seeded { inserted } => {
                assert_eq!(inserted, 8);
                seeded += 1;
            }
            SeedOutcome::AlreadySeeded { existing } => assert_eq!(existing, 8),
        }
    }

    assert_eq!(seeded, 1);
    assert_eq!(events.count().await.unwrap(), 8);
}

// ============================================================================
// Tier Changes
// ============================================================================

#[tokio::test]
async fn test_self_service_upgrade_persists_and_refreshes() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("silver"));
    let service = service_with(users.clone(), sample_events(), true);
    let alice = UserId::from("alice");

    assert_eq!(service.current_tier(&alice).await.unwrap(), Tier::Silver);

    let change = service.upgrade(&alice, TierChangeAuthority::SelfService).await.unwrap();

    assert_eq!(change, TierChange { previous: Tier::Silver, current: Tier::Gold });
    assert_eq!(users.stored_tier("alice").as_deref(), Some("gold"));
    assert_eq!(service.current_tier(&alice).await.unwrap(), Tier::Gold);

    let feed = service.event_feed(&alice).await.unwrap();
    assert_eq!(feed.locked.len(), 1);
}

#[tokio::test]
async fn test_upgrade_creates_missing_user() {
    let users = MockUserRepository::new();
    let service = service_with(users.clone(), sample_events(), true);

    let change = service
        .upgrade(&UserId::from("fresh"), TierChangeAuthority::SelfService)
        .await
        .unwrap();

    assert_eq!(change.previous, Tier::Free);
    assert_eq!(change.current, Tier::Silver);
    assert_eq!(users.stored_tier("fresh").as_deref(), Some("silver"));
}

#[tokio::test]
async fn test_downgrade() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("platinum"));
    let service = service_with(users, sample_events(), true);

    let change = service
        .downgrade(&UserId::from("alice"), TierChangeAuthority::SelfService)
        .await
        .unwrap();
    assert_eq!(change.current, Tier::Gold);
}

#[tokio::test]
async fn test_no_upgrade_past_platinum() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("platinum"));
    let service = service_with(users, sample_events(), true);

    let err = service
        .upgrade(&UserId::from("alice"), TierChangeAuthority::Admin)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AccessError::NoTransition { from: Tier::Platinum, direction: Direction::Upgrade }
    ));
}

#[tokio::test]
async fn test_no_downgrade_below_free() {
    let service = service_with(MockUserRepository::new(), sample_events(), true);

    let err = service
        .downgrade(&UserId::from("alice"), TierChangeAuthority::SelfService)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AccessError::NoTransition { from: Tier::Free, direction: Direction::Downgrade }
    ));
}

#[tokio::test]
async fn test_failed_write_leaves_tier_unchanged() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("silver"));
    let service = service_with(users.clone(), sample_events(), true);
    let alice = UserId::from("alice");

    assert_eq!(service.current_tier(&alice).await.unwrap(), Tier::Silver);

    users.fail_writes(true);
    let err = service
        .upgrade(&alice, TierChangeAuthority::SelfService)
        .await
        .unwrap_err();

    assert!(matches!(err, AccessError::Database(_)));
    assert_eq!(service.current_tier(&alice).await.unwrap(), Tier::Silver);
    assert_eq!(users.stored_tier("alice").as_deref(), Some("silver"));
}

#[tokio::test]
async fn test_self_service_disabled_by_default() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("free"));
    let service = service_with(users.clone(), sample_events(), false);

    let err = service
        .upgrade(&UserId::from("alice"), TierChangeAuthority::SelfService)
        .await
        .unwrap_err();

    assert!(matches!(err, AccessError::TierChangeForbidden(_)));
    assert_eq!(users.stored_tier("alice").as_deref(), Some("free"));
}

#[tokio::test]
async fn test_self_service_cannot_skip_tiers() {
    let service = service_with(MockUserRepository::new(), sample_events(), true);

    let err = service
        .request_tier_change(&UserId::from("alice"), Tier::Platinum, TierChangeAuthority::SelfService)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::TierChangeForbidden(_)));
}

#[tokio::test]
async fn test_admin_sets_any_tier() {
    let users = MockUserRepository::new();
    let service = service_with(users.clone(), sample_events(), false);
    let alice = UserId::from("alice");

    let change = service
        .request_tier_change(&alice, Tier::Platinum, TierChangeAuthority::Admin)
        .await
        .unwrap();
    assert_eq!(change, TierChange { previous: Tier::Free, current: Tier::Platinum });

    let change = service
        .request_tier_change(&alice, Tier::Free, TierChangeAuthority::Admin)
        .await
        .unwrap();
    assert_eq!(change, TierChange { previous: Tier::Platinum, current: Tier::Free });
    assert_eq!(users.stored_tier("alice").as_deref(), Some("free"));
}

#[tokio::test]
async fn test_tier_change_observed_after_external_write() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("free"));
    let service = service_with(users.clone(), sample_events(), false);
    let alice = UserId::from("alice");

    assert_eq!(service.current_tier(&alice).await.unwrap(), Tier::Free);

    users.set_tier(&alice, Tier::Gold).await.unwrap();

    assert_eq!(service.current_tier(&alice).await.unwrap(), Tier::Gold);
}

// ============================================================================
// Reads Racing Writes
// ============================================================================

#[tokio::test]
async fn test_read_in_flight_during_downgrade_does_not_outlive_it() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("platinum"));
    let service = Arc::new(service_with(users.clone(), sample_events(), false));
    let alice = UserId::from("alice");

    // Pause a lookup after it has seen "platinum"
    let (snapshot_taken, release) = users.hold_next_read();
    let slow_read = {
        let service = Arc::clone(&service);
        let alice = alice.clone();
        tokio::spawn(async move { service.current_tier(&alice).await })
    };
    snapshot_taken.await.unwrap();

    let change = service
        .request_tier_change(&alice, Tier::Free, TierChangeAuthority::Admin)
        .await
        .unwrap();
    assert_eq!(change, TierChange { previous: Tier::Platinum, current: Tier::Free });
    assert_eq!(users.stored_tier("alice").as_deref(), Some("free"));

    // The paused lookup started before the write and may report the old tier
    release.send(()).unwrap();
    assert_eq!(slow_read.await.unwrap().unwrap(), Tier::Platinum);

    // Nothing it saw survives the confirmed write
    assert_eq!(service.current_tier(&alice).await.unwrap(), Tier::Free);
    let feed = service.event_feed(&alice).await.unwrap();
    assert_eq!(feed.tier, Tier::Free);
    assert_eq!(feed.accessible.len(), 1);
    assert!(matches!(
        service.accessible_events(&alice).await,
        Ok(accessible) if accessible.tier == Tier::Free && accessible.events.len() == 1
    ));
}

#[tokio::test]
async fn test_concurrent_reads_see_confirmed_upgrade() {
    let users = MockUserRepository::new();
    users.insert_user("alice", Some("silver"));
    let service = Arc::new(service_with(users, sample_events(), true));
    let alice = UserId::from("alice");

    let readers: Vec<_> = (0..16)
        .map(|_| {
            let service = Arc::clone(&service);
            let alice = alice.clone();
            tokio::spawn(async move { service.current_tier(&alice).await })
        })
        .collect();

    let change = service
        .upgrade(&alice, TierChangeAuthority::SelfService)
        .await
        .unwrap();
    assert_eq!(change.current, Tier::Gold);

    for reader in readers {
        let tier = reader.await.unwrap().unwrap();
        assert!(tier == Tier::Silver || tier == Tier::Gold);
    }

    // Every lookup issued after the confirmation sees the new tier
    for _ in 0..4 {
        assert_eq!(service.current_tier(&alice).await.unwrap(), Tier::Gold);
    }
}
