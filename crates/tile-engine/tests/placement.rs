//! Direct keypad actions: round trips, idempotence, guards and step timing.

use std::time::Duration;

use config::Settings;
use tile_engine::{ANIMATION_RESTORE_STEP, Engine, Hosts, STEP_DELAY};
use tile_geom::{Rect, is_tiled};
use tile_host::{
    MaxFlags, WindowHost, WindowId, WindowState,
    mock::{HostCall, MockHost},
};
use tokio::time::{self, Instant};

const AREA: Rect = Rect::new(0, 27, 1920, 1053);
const FREE: Rect = Rect::new(133, 170, 811, 577);

fn setup(state: WindowState, settings: Settings) -> (MockHost, WindowId, Engine) {
    let host = MockHost::new(AREA);
    let id = host.add_window(state);
    let engine = Engine::enable(Hosts::single(host.clone()), settings);
    (host, id, engine)
}

#[test]
fn quarter_twice_is_idempotent() {
    let (host, id, mut e) = setup(WindowState::normal(FREE), Settings::default());
    e.dispatch("kp7").unwrap();
    let once = host.frame(id).unwrap();
    assert!(is_tiled(&once, &AREA));
    e.dispatch("kp7").unwrap();
    assert_eq!(host.frame(id), Some(once));
    assert_eq!(e.remembered(id), Some(FREE));
}

#[test]
fn maximize_then_toggle_round_trips() {
    let (host, id, mut e) = setup(WindowState::normal(FREE), Settings::default());
    e.dispatch("kpdivide").unwrap();
    assert_eq!(host.frame(id), Some(AREA));
    e.dispatch("kp5").unwrap();
    assert_eq!(host.frame(id), Some(FREE));
    assert!(host.window_state(id).unwrap().maximized.is_empty());
    assert_eq!(e.remembered(id), None);
}

#[test]
fn tiling_chain_then_toggle_returns_to_first_free_rect() {
    let (host, id, mut e) = setup(WindowState::normal(FREE), Settings::default());
    for name in ["kp7", "kp6", "kp3", "kp2", "kpdivide"] {
        e.dispatch(name).unwrap();
    }
    e.dispatch("kp5").unwrap();
    assert_eq!(host.frame(id), Some(FREE));
}

#[test]
fn toggle_on_free_window_maximizes() {
    let (host, id, mut e) = setup(WindowState::normal(FREE), Settings::default());
    e.dispatch("kp5").unwrap();
    assert_eq!(host.window_state(id).unwrap().maximized, MaxFlags::BOTH);
    assert_eq!(e.remembered(id), Some(FREE));
}

#[test]
fn toggle_centers_when_enabled() {
    let settings = Settings {
        center_when_unmaximizing: true,
        ..Settings::default()
    };
    let (host, id, mut e) = setup(WindowState::normal(FREE), settings);
    e.dispatch("kp1").unwrap();
    e.dispatch("kp5").unwrap();
    assert_eq!(host.frame(id), Some(FREE.centered_in(&AREA)));
    assert_eq!(host.frame(id), Some(Rect::new(554, 265, 811, 577)));
}

#[test]
fn toggle_on_tiled_window_without_memory_only_unmaximizes() {
    let mut s = WindowState::normal(Rect::new(0, 27, 960, 1053));
    s.maximized = MaxFlags::VERTICAL;
    let (host, id, mut e) = setup(s, Settings::default());
    host.clear_calls();
    e.dispatch("kp5").unwrap();
    assert_eq!(host.calls(), vec![HostCall::Unmaximize(id, MaxFlags::VERTICAL)]);
}

#[test]
fn edge_action_reaches_true_half() {
    let (host, id, mut e) = setup(WindowState::normal(FREE), Settings::default());
    e.dispatch("kp8").unwrap();
    assert_eq!(host.frame(id), Some(Rect::new(0, 27, 1920, 527)));
    assert_eq!(host.window_state(id).unwrap().maximized, MaxFlags::HORIZONTAL);
    e.dispatch("kp2").unwrap();
    assert_eq!(host.frame(id), Some(Rect::new(0, 554, 1920, 526)));
    assert_eq!(e.remembered(id), Some(FREE));
}

#[test]
fn minimize_guards() {
    let mut s = WindowState::normal(FREE);
    s.minimized = true;
    let (host, _id, mut e) = setup(s, Settings::default());
    e.dispatch("kp0").unwrap();
    assert!(host.calls().is_empty());

    let (host, id, mut e) = setup(WindowState::normal(FREE), Settings::default());
    e.dispatch("kp0").unwrap();
    assert_eq!(host.calls(), vec![HostCall::Minimize(id)]);
    e.dispatch("kp0").unwrap();
    assert_eq!(host.calls().len(), 1);
}

#[test]
fn not_resizeable_focus_is_ignored_entirely() {
    let mut s = WindowState::normal(FREE);
    s.resizeable = false;
    let (host, _id, mut e) = setup(s, Settings::default());
    for name in config::TILING_KEYBINDINGS {
        e.dispatch(name).unwrap();
    }
    assert!(host.calls().is_empty());
    assert_eq!(host.animation_pref(), (true, false));
}

#[test]
fn animations_left_alone_when_setting_off() {
    let settings = Settings {
        disable_animations: false,
        ..Settings::default()
    };
    let (host, _id, mut e) = setup(WindowState::normal(FREE), settings);
    host.set_animation_pref(true, true);
    e.dispatch("kp4").unwrap();
    assert_eq!(host.animation_pref(), (true, true));
}

#[tokio::test(start_paused = true)]
async fn wayland_steps_are_spaced_by_fixed_delay() {
    let (host, id, mut e) = setup(WindowState::normal(FREE), Settings::default());
    host.set_settle_delay(true);
    let start = Instant::now();
    e.dispatch("kp4").unwrap();

    // Step 0 runs at once; the leading move is part of the decomposition.
    let strip = Rect::new(0, 170, 960, 577);
    assert_eq!(
        host.calls(),
        vec![
            HostCall::MoveFrame(id, 0, 170),
            HostCall::MoveResize(id, strip),
            HostCall::MoveFrame(id, 0, 170),
        ]
    );
    assert_eq!(host.animation_pref(), (false, true));
    assert_eq!(e.next_deadline(), Some(start + STEP_DELAY));

    time::advance(STEP_DELAY - Duration::from_millis(1)).await;
    assert_eq!(e.run_due(), 0);
    time::advance(Duration::from_millis(1)).await;
    assert_eq!(e.run_due(), 1);
    assert_eq!(host.window_state(id).unwrap().maximized, MaxFlags::VERTICAL);
    assert_eq!(host.frame(id), Some(Rect::new(0, 27, 960, 1053)));

    assert_eq!(e.next_deadline(), Some(start + STEP_DELAY * ANIMATION_RESTORE_STEP));
    time::advance(STEP_DELAY * 2).await;
    e.run_due();
    assert_eq!(host.animation_pref(), (true, false));
    assert!(e.is_idle());
}

#[tokio::test(start_paused = true)]
async fn wayland_restore_reads_memory_when_step_fires() {
    let (host, id, mut e) = setup(WindowState::normal(FREE), Settings::default());
    host.set_settle_delay(true);
    e.dispatch("kpdivide").unwrap();
    time::advance(STEP_DELAY * 4).await;
    e.run_due();

    e.dispatch("kp5").unwrap();
    // Unmaximize ran at step 0; the remembered rect is applied at step 1.
    assert_eq!(e.remembered(id), Some(FREE));
    time::advance(STEP_DELAY).await;
    e.run_due();
    assert_eq!(host.frame(id), Some(FREE));
    assert_eq!(e.remembered(id), None);
}
