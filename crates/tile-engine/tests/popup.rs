//! Paired actions and the selection popup, against the in-memory host.

use std::time::Duration;

use config::Settings;
use tile_engine::{Engine, Hosts, POPUP_NO_MODS_TIMEOUT, PopupState, STEP_DELAY};
use tile_geom::Rect;
use tile_host::{
    MaxFlags, ModalChooser, WindowHost, WindowId, WindowState,
    mock::{DEFAULT_NO_MODS_TIMEOUT, HostCall, MockHost},
};
use tokio::time;

const AREA: Rect = Rect::new(0, 0, 1920, 1040);
const W0_FREE: Rect = Rect::new(100, 100, 800, 600);
const W1_FREE: Rect = Rect::new(200, 200, 700, 500);
const W2_FLOAT: Rect = Rect::new(300, 300, 600, 400);

struct Scene {
    host: MockHost,
    engine: Engine,
    w0: WindowId,
    w1: WindowId,
    w2: WindowId,
}

/// Trigger `w0` (free, focused), candidate `w1` (free) and candidate `w2`
/// (fully maximized).
fn scene(wayland: bool) -> Scene {
    let host = MockHost::new(AREA);
    host.set_settle_delay(wayland);
    let w0 = host.add_window(WindowState::normal(W0_FREE));
    let w1 = host.add_window(WindowState::normal(W1_FREE));
    let mut max = WindowState::normal(W2_FLOAT);
    max.maximized = MaxFlags::BOTH;
    let w2 = host.add_window(max);
    let engine = Engine::enable(Hosts::single(host.clone()), Settings::default());
    Scene {
        host,
        engine,
        w0,
        w1,
        w2,
    }
}

fn maximized(host: &MockHost, id: WindowId) -> MaxFlags {
    host.window_state(id).unwrap().maximized
}

fn assert_untouched_session_state(host: &MockHost) {
    assert_eq!(host.no_mods_timeout(), DEFAULT_NO_MODS_TIMEOUT);
    assert_eq!(host.animation_pref(), (true, false));
    assert!(host.chooser_destroyed());
}

#[test]
fn opening_places_trigger_and_candidates() {
    let mut s = scene(false);
    s.engine.dispatch("popup-kp7").unwrap();

    assert_eq!(s.engine.popup_state(), Some(PopupState::Selecting));
    assert_eq!(s.host.chooser_items(), Some(vec![s.w1, s.w2]));
    assert_eq!(s.host.no_mods_timeout(), POPUP_NO_MODS_TIMEOUT);
    assert_eq!(s.host.animation_pref(), (false, true));

    assert_eq!(s.host.frame(s.w0), Some(Rect::new(0, 0, 960, 520)));
    assert_eq!(s.host.frame(s.w1), Some(Rect::new(0, 520, 960, 520)));
    assert_eq!(s.host.frame(s.w2), Some(Rect::new(0, 520, 960, 520)));
    assert!(maximized(&s.host, s.w2).is_empty());
    // The first item is highlighted and raised.
    assert_eq!(s.host.focus_window(), Some(s.w1));
}

#[test]
fn cancel_restores_every_window() {
    let mut s = scene(false);
    s.engine.dispatch("popup-kp7").unwrap();
    s.engine.popup_select(1).unwrap();
    assert_eq!(s.host.focus_window(), Some(s.w2));
    s.engine.popup_modifiers_released().unwrap();

    assert_eq!(s.engine.popup_state(), None);
    assert_eq!(s.host.frame(s.w0), Some(W0_FREE));
    assert_eq!(s.host.frame(s.w1), Some(W1_FREE));
    assert_eq!(s.host.frame(s.w2), Some(AREA));
    assert!(maximized(&s.host, s.w0).is_empty());
    assert!(maximized(&s.host, s.w1).is_empty());
    assert_eq!(maximized(&s.host, s.w2), MaxFlags::BOTH);
    assert_eq!(s.host.focus_window(), Some(s.w0));
    assert_untouched_session_state(&s.host);
    assert!(s.engine.is_idle());
}

#[test]
fn confirm_keeps_highlighted_placement() {
    let mut s = scene(false);
    s.engine.dispatch("popup-kp7").unwrap();
    s.engine.popup_select(1).unwrap();
    s.engine.popup_select(0).unwrap();
    assert!(s.engine.popup_key_press(0xff0d));

    assert_eq!(s.engine.popup_state(), None);
    // Trigger keeps the first placement, w1 the second, w2 is put back.
    assert_eq!(s.host.frame(s.w0), Some(Rect::new(0, 0, 960, 520)));
    assert_eq!(s.host.frame(s.w1), Some(Rect::new(0, 520, 960, 520)));
    assert_eq!(s.host.frame(s.w2), Some(AREA));
    assert_eq!(maximized(&s.host, s.w2), MaxFlags::BOTH);
    assert_eq!(s.host.focus_window(), Some(s.w0));
    assert_untouched_session_state(&s.host);
}

#[test]
fn no_mods_timeout_confirms() {
    let mut s = scene(false);
    s.engine.dispatch("popup-kp4").unwrap();
    s.engine.popup_select(1).unwrap();
    s.engine.popup_no_mods_timeout().unwrap();
    // popup-kp4 pairs left with right; w2 keeps the right half.
    assert_eq!(s.host.frame(s.w2), Some(Rect::new(960, 0, 960, 1040)));
    assert_eq!(maximized(&s.host, s.w2), MaxFlags::VERTICAL);
    assert_eq!(s.host.frame(s.w1), Some(W1_FREE));
    assert_eq!(s.host.frame(s.w0), Some(Rect::new(0, 0, 960, 1040)));
}

#[test]
fn item_activation_confirms_that_item() {
    let mut s = scene(false);
    s.engine.dispatch("popup-kp9").unwrap();
    s.engine.popup_item_activated(1).unwrap();
    assert_eq!(s.host.frame(s.w2), Some(Rect::new(960, 520, 960, 520)));
    assert_eq!(s.host.frame(s.w1), Some(W1_FREE));
}

#[test]
fn other_keys_do_not_confirm() {
    let mut s = scene(false);
    s.engine.dispatch("popup-kp1").unwrap();
    assert!(!s.engine.popup_key_press(0xff1b));
    assert_eq!(s.engine.popup_state(), Some(PopupState::Selecting));
    assert!(s.engine.popup_key_press(0xff8d));
    assert_eq!(s.engine.popup_state(), None);
}

#[test]
fn close_is_idempotent() {
    let mut s = scene(false);
    s.engine.dispatch("popup-kp7").unwrap();
    s.engine.popup_destroyed().unwrap();
    s.host.clear_calls();
    assert!(s.engine.popup_destroyed().is_err());
    assert!(s.host.calls().is_empty());
}

#[test]
fn paired_key_while_open_is_ignored() {
    let mut s = scene(false);
    s.engine.dispatch("popup-kp7").unwrap();
    s.host.clear_calls();
    s.engine.dispatch("popup-kp4").unwrap();
    assert!(s.host.calls().is_empty());
    assert_eq!(s.engine.popup_state(), Some(PopupState::Selecting));
    assert_eq!(s.host.no_mods_timeout(), POPUP_NO_MODS_TIMEOUT);

    s.engine.popup_modifiers_released().unwrap();
    assert_eq!(s.host.frame(s.w0), Some(W0_FREE));
    assert_eq!(s.host.frame(s.w1), Some(W1_FREE));
    assert_eq!(s.host.frame(s.w2), Some(AREA));
    assert_untouched_session_state(&s.host);
    assert!(s.engine.is_idle());
}

#[test]
fn cancel_keeps_user_set_animation_pref() {
    let mut s = scene(false);
    s.host.set_animation_pref(true, true);
    s.engine.dispatch("popup-kp7").unwrap();
    assert_eq!(s.host.animation_pref(), (false, true));
    s.engine.popup_modifiers_released().unwrap();
    assert_eq!(s.host.animation_pref(), (true, true));
}

#[test]
fn refused_chooser_cancels_immediately() {
    let mut s = scene(false);
    s.host.set_chooser_refuses(true);
    s.engine.dispatch("popup-kp7").unwrap();
    assert_eq!(s.engine.popup_state(), None);
    assert_eq!(s.host.frame(s.w0), Some(W0_FREE));
    assert_eq!(s.host.frame(s.w1), Some(W1_FREE));
    assert_eq!(s.host.frame(s.w2), Some(AREA));
    assert_eq!(s.host.no_mods_timeout(), DEFAULT_NO_MODS_TIMEOUT);
    assert_eq!(s.host.animation_pref(), (true, false));
}

#[test]
fn lone_window_gets_first_placement_only() {
    let host = MockHost::new(AREA);
    let w = host.add_window(WindowState::normal(W0_FREE));
    let mut fixed = WindowState::normal(W1_FREE);
    fixed.resizeable = false;
    let _other = host.add_window(fixed);
    let mut e = Engine::enable(Hosts::single(host.clone()), Settings::default());
    e.dispatch("popup-kp3").unwrap();
    assert_eq!(e.popup_state(), None);
    assert_eq!(host.chooser_items(), None);
    assert_eq!(host.frame(w), Some(Rect::new(960, 520, 960, 520)));
    assert_eq!(host.animation_pref(), (true, false));
}

#[test]
fn window_closed_mid_session_is_skipped() {
    let mut s = scene(false);
    s.engine.dispatch("popup-kp7").unwrap();
    s.host.close_window(s.w1);
    s.engine.window_closed(s.w1);
    s.host.clear_calls();
    s.engine.popup_modifiers_released().unwrap();
    assert_eq!(s.host.frame(s.w0), Some(W0_FREE));
    assert_eq!(s.host.frame(s.w2), Some(AREA));
    assert!(s.host.calls_for(s.w1).is_empty());
}

#[test]
fn disable_with_open_popup_restores() {
    let mut s = scene(false);
    s.engine.dispatch("popup-kp7").unwrap();
    let host = s.host.clone();
    s.engine.disable();
    assert_eq!(host.frame(s.w0), Some(W0_FREE));
    assert_eq!(host.frame(s.w1), Some(W1_FREE));
    assert_eq!(host.frame(s.w2), Some(AREA));
    assert_untouched_session_state(&host);
    assert!(host.bindings().is_empty());
}

#[tokio::test(start_paused = true)]
async fn wayland_open_interleaves_by_absolute_offset() {
    let mut s = scene(true);
    s.engine.dispatch("popup-kp7").unwrap();
    // Trigger is placed at once; candidates wait for their slots.
    assert_eq!(s.host.frame(s.w0), Some(Rect::new(0, 0, 960, 520)));
    assert_eq!(s.host.frame(s.w1), Some(W1_FREE));

    time::advance(STEP_DELAY * 2).await;
    assert_eq!(s.engine.run_due(), 1);
    time::advance(STEP_DELAY).await;
    s.engine.run_due();
    assert_eq!(s.host.frame(s.w1), Some(Rect::new(0, 520, 960, 520)));
    assert_eq!(s.host.frame(s.w2), Some(AREA));

    time::advance(STEP_DELAY * 2).await;
    s.engine.run_due();
    assert_eq!(s.host.frame(s.w2), Some(Rect::new(0, 520, 960, 520)));
    assert!(s.engine.next_deadline().is_none());
}

#[tokio::test(start_paused = true)]
async fn wayland_early_cancel_drops_pending_steps() {
    let mut s = scene(true);
    s.engine.dispatch("popup-kp7").unwrap();
    s.engine.popup_modifiers_released().unwrap();

    time::advance(Duration::from_millis(500)).await;
    s.engine.run_due();
    assert!(s.engine.is_idle());
    assert_eq!(s.host.frame(s.w0), Some(W0_FREE));
    // Candidates were never snapshotted, so nothing touched their geometry.
    assert_eq!(s.host.calls_for(s.w1), vec![HostCall::Activate(s.w1)]);
    assert!(s.host.calls_for(s.w2).is_empty());
    assert_eq!(maximized(&s.host, s.w2), MaxFlags::BOTH);
    assert_untouched_session_state(&s.host);
}

#[tokio::test(start_paused = true)]
async fn wayland_restore_steps_are_spaced() {
    let mut s = scene(true);
    s.engine.dispatch("popup-kp7").unwrap();
    time::advance(Duration::from_millis(300)).await;
    s.engine.run_due();
    s.engine.popup_modifiers_released().unwrap();

    // Step 0 (unmaximize) ran; the move back waits one step.
    assert_eq!(s.host.frame(s.w1), Some(Rect::new(0, 520, 960, 520)));
    time::advance(STEP_DELAY).await;
    s.engine.run_due();
    assert_eq!(s.host.frame(s.w1), Some(W1_FREE));
    assert!(maximized(&s.host, s.w2).is_empty());
    time::advance(STEP_DELAY).await;
    s.engine.run_due();
    assert_eq!(maximized(&s.host, s.w2), MaxFlags::BOTH);
    time::advance(STEP_DELAY).await;
    s.engine.run_due();
    assert_untouched_session_state(&s.host);
    assert!(s.engine.is_idle());
}

#[tokio::test(start_paused = true)]
async fn wayland_cancel_remaximizes_trigger_last() {
    let host = MockHost::new(AREA);
    host.set_settle_delay(true);
    let mut max = WindowState::normal(W0_FREE);
    max.maximized = MaxFlags::BOTH;
    let w0 = host.add_window(max);
    let w1 = host.add_window(WindowState::normal(W1_FREE));
    let mut e = Engine::enable(Hosts::single(host.clone()), Settings::default());

    e.dispatch("popup-kp7").unwrap();
    // The snapshot unmaximizes the trigger before anything else.
    assert!(maximized(&host, w0).is_empty());
    time::advance(Duration::from_millis(300)).await;
    e.run_due();
    assert_eq!(host.frame(w0), Some(Rect::new(0, 0, 960, 520)));
    assert_eq!(host.frame(w1), Some(Rect::new(0, 520, 960, 520)));

    e.popup_modifiers_released().unwrap();
    assert_eq!(host.frame(w0), Some(Rect::new(0, 0, 960, 520)));
    time::advance(STEP_DELAY).await;
    e.run_due();
    assert_eq!(host.frame(w0), Some(W0_FREE));
    assert!(maximized(&host, w0).is_empty());
    time::advance(STEP_DELAY).await;
    e.run_due();
    assert_eq!(maximized(&host, w0), MaxFlags::BOTH);
    assert_eq!(host.frame(w0), Some(AREA));
    assert_eq!(host.frame(w1), Some(W1_FREE));

    time::advance(STEP_DELAY).await;
    e.run_due();
    assert_eq!(host.animation_pref(), (true, false));
    assert_eq!(host.no_mods_timeout(), DEFAULT_NO_MODS_TIMEOUT);
    assert!(e.is_idle());
}
