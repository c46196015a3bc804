// Scout session-state behavior: derived view recomputation and the
// clear-on-failure policy.
#![cfg(feature = "tui")]
use scoutdesk::config::Config;
use scoutdesk::context::TestContext;
use scoutdesk::model::RawListing;
use scoutdesk::pipeline::SortKey;
use scoutdesk::tui::action::AppEvent;
use scoutdesk::tui::scout::handlers::handle_app_event;
use scoutdesk::tui::scout::state::ScoutState;
use std::sync::Arc;

fn raw(undervalue: f64) -> RawListing {
    serde_json::from_value(serde_json::json!({
        "source": "rightmove",
        "title": "t",
        "undervaluePct": undervalue,
        "price": 100000
    }))
    .unwrap()
}

fn fresh_state() -> ScoutState {
    let ctx = Arc::new(TestContext::new());
    ScoutState::new(ctx, &Config::default())
}

#[test]
fn test_loaded_listings_are_normalized_and_visible() {
    let mut state = fresh_state();
    handle_app_event(
        &mut state,
        AppEvent::ListingsLoaded(vec![raw(35.0), raw(10.0), raw(22.0)]),
    );

    assert_eq!(state.listings.len(), 3);
    // Default threshold 20: two listings pass, sorted descending.
    let visible: Vec<Option<f64>> = state
        .visible()
        .iter()
        .map(|l| l.undervalue_pct.get())
        .collect();
    assert_eq!(visible, vec![Some(35.0), Some(22.0)]);
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn test_view_recomputes_on_control_change() {
    let mut state = fresh_state();
    handle_app_event(
        &mut state,
        AppEvent::ListingsLoaded(vec![raw(35.0), raw(10.0)]),
    );

    assert_eq!(state.visible_len(), 1);
    state.opts.min_undervalue_pct = 5.0;
    assert_eq!(state.visible_len(), 2);
    state.sort = SortKey::Price;
    assert_eq!(state.visible_len(), 2);
}

#[test]
fn test_fetch_failure_clears_collection() {
    let mut state = fresh_state();
    handle_app_event(&mut state, AppEvent::ListingsLoaded(vec![raw(35.0)]));
    assert_eq!(state.listings.len(), 1);

    state.loading = true;
    handle_app_event(
        &mut state,
        AppEvent::Error("unexpected response (500): <html>…".to_string()),
    );

    // No partial results survive a failed exchange.
    assert!(state.listings.is_empty());
    assert_eq!(state.visible_len(), 0);
    assert!(!state.loading);
    assert!(state.error.as_deref().unwrap_or("").contains("500"));
}

#[test]
fn test_recovery_after_error_on_next_success() {
    let mut state = fresh_state();
    handle_app_event(&mut state, AppEvent::Error("boom".to_string()));
    assert!(state.error.is_some());

    handle_app_event(&mut state, AppEvent::ListingsLoaded(vec![raw(40.0)]));
    assert!(state.error.is_none());
    assert_eq!(state.visible_len(), 1);
}
