//! Validity state machine and publication behavior of the catalog refresher.

mod common;

use common::{Outcome, ScriptedCatalog, scenario_snapshot};
use larder_oracle::{CatalogRefresher, Refresher, SnapshotHolder};
use std::sync::Arc;

fn bound_refresher(catalog: ScriptedCatalog) -> (CatalogRefresher, Arc<SnapshotHolder>) {
    let refresher = CatalogRefresher::new(Arc::new(catalog));
    let holder = Arc::new(SnapshotHolder::new());
    refresher.bind(holder.clone());
    (refresher, holder)
}

#[tokio::test]
async fn invalid_until_first_success() {
    let (refresher, holder) =
        bound_refresher(ScriptedCatalog::new([Outcome::Ok(scenario_snapshot())]));

    assert!(!refresher.is_valid());
    assert!(holder.current().is_empty());

    refresher.tick().await;

    assert!(refresher.is_valid());
    assert_eq!(holder.current().len(), 3);
}

#[tokio::test]
async fn three_failures_keep_validity_fourth_clears_it() {
    let (refresher, _holder) = bound_refresher(ScriptedCatalog::new([
        Outcome::Ok(scenario_snapshot()),
        Outcome::Fail,
        Outcome::Fail,
        Outcome::Fail,
        Outcome::Fail,
    ]));

    refresher.tick().await;
    assert!(refresher.is_valid());

    for _ in 0..3 {
        refresher.tick().await;
        assert!(refresher.is_valid(), "still valid through three failures");
    }

    refresher.tick().await;
    assert!(!refresher.is_valid(), "fourth consecutive failure clears validity");
}

#[tokio::test]
async fn success_resets_failure_run_and_restores_validity() {
    let (refresher, _holder) = bound_refresher(ScriptedCatalog::new([
        Outcome::Fail,
        Outcome::Fail,
        Outcome::Fail,
        Outcome::Fail,
        Outcome::Ok(scenario_snapshot()),
        Outcome::Fail,
        Outcome::Fail,
        Outcome::Fail,
    ]));

    for _ in 0..4 {
        refresher.tick().await;
    }
    assert!(!refresher.is_valid());

    refresher.tick().await;
    assert!(refresher.is_valid(), "success restores validity");

    // The counter was reset by the success: three more failures are still
    // within tolerance.
    for _ in 0..3 {
        refresher.tick().await;
    }
    assert!(refresher.is_valid());
}

#[tokio::test]
async fn failures_from_start_never_turn_valid() {
    let (refresher, holder) = bound_refresher(ScriptedCatalog::always_failing());

    for _ in 0..6 {
        refresher.tick().await;
        assert!(!refresher.is_valid());
    }
    assert!(holder.current().is_empty());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_snapshot() {
    let (refresher, holder) = bound_refresher(ScriptedCatalog::new([
        Outcome::Ok(scenario_snapshot()),
        Outcome::Fail,
    ]));

    refresher.tick().await;
    let published = holder.current();

    refresher.tick().await;
    assert_eq!(holder.current(), published);
}

#[tokio::test]
async fn tick_before_bind_is_a_noop() {
    let refresher = CatalogRefresher::new(Arc::new(ScriptedCatalog::new([Outcome::Ok(
        scenario_snapshot(),
    )])));

    // No holder bound: must not panic, must not consume the script.
    refresher.tick().await;
    assert!(!refresher.is_valid());

    let holder = Arc::new(SnapshotHolder::new());
    refresher.bind(holder.clone());
    refresher.tick().await;
    assert!(refresher.is_valid());
    assert_eq!(holder.current().len(), 3);
}
