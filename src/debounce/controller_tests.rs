//! Tests for the debounce-with-throttle controller

use super::*;
use crate::clock::VirtualClock;
use crate::test_utils::test_helpers::{Recorder, ms};

fn setup(
    debounce_ms: u64,
    window_ms: u64,
) -> (VirtualClock, DebounceThrottle<VirtualClock>, Recorder) {
    let clock = VirtualClock::new();
    let controller = DebounceThrottle::new(clock.clone(), ms(debounce_ms), ms(window_ms));
    let recorder = Recorder::new(&clock);
    (clock, controller, recorder)
}

#[test]
fn test_first_call_runs_immediately() {
    let (clock, controller, recorder) = setup(200, 1_000);

    assert_eq!(controller.call(recorder.callback("a")), Ok(Dispatch::Immediate));
    assert_eq!(recorder.runs(), vec![("a", ms(0))]);
    assert!(!controller.is_pending());
    assert_eq!(clock.pending_timers(), 0);
}

#[test]
fn test_call_inside_window_is_deferred_to_trailing_run() {
    let (clock, controller, recorder) = setup(200, 1_000);

    controller.call(recorder.callback("a")).unwrap();
    clock.advance_to(ms(100));
    assert_eq!(controller.call(recorder.callback("b")), Ok(Dispatch::Deferred));
    assert!(controller.is_pending());

    clock.advance_to(ms(299));
    assert_eq!(recorder.labels(), vec!["a"]);
    clock.advance_to(ms(300));
    assert_eq!(recorder.runs(), vec![("a", ms(0)), ("b", ms(300))]);
}

#[test]
fn test_trailing_run_uses_latest_callback() {
    let (clock, controller, recorder) = setup(200, 1_000);

    controller.call(recorder.callback("a")).unwrap();
    clock.advance_to(ms(100));
    controller.call(recorder.callback("b")).unwrap();
    clock.advance_to(ms(150));
    controller.call(recorder.callback("c")).unwrap();
    clock.advance_to(ms(250));
    controller.call(recorder.callback("d")).unwrap();

    clock.run_until_idle();
    assert_eq!(recorder.runs(), vec![("a", ms(0)), ("d", ms(450))]);
}

#[test]
fn test_immediate_run_cancels_stale_trailing_timer() {
    // Trailing delay longer than the window so the window reopens while the
    // timer for "a" is still armed
    let (clock, controller, recorder) = setup(500, 100);

    controller.call(recorder.callback("opener")).unwrap();
    clock.advance_to(ms(50));
    assert_eq!(controller.call(recorder.callback("a")), Ok(Dispatch::Deferred));

    clock.advance_to(ms(150));
    assert_eq!(controller.call(recorder.callback("b")), Ok(Dispatch::Immediate));
    assert!(!controller.is_pending());

    clock.run_until_idle();
    assert_eq!(recorder.runs(), vec![("opener", ms(0)), ("b", ms(150))]);
}

#[test]
fn test_trailing_run_restarts_throttle_window() {
    let (clock, controller, recorder) = setup(100, 300);

    controller.call(recorder.callback("a")).unwrap();
    clock.advance_to(ms(50));
    controller.call(recorder.callback("b")).unwrap();
    clock.advance_to(ms(150));
    assert_eq!(recorder.labels(), vec!["a", "b"]);

    // 200ms after the trailing run, still inside its window
    clock.advance_to(ms(350));
    assert_eq!(controller.call(recorder.callback("c")), Ok(Dispatch::Deferred));
}

#[test]
fn test_cancel_keeps_throttle_window() {
    let (clock, controller, recorder) = setup(100, 1_000);

    controller.call(recorder.callback("a")).unwrap();
    controller.call(recorder.callback("b")).unwrap();
    controller.cancel();
    clock.advance(ms(500));
    assert_eq!(recorder.labels(), vec!["a"]);

    assert_eq!(controller.call(recorder.callback("c")), Ok(Dispatch::Deferred));
}

#[test]
fn test_reset_reopens_window_and_drops_trailing_run() {
    let (clock, controller, recorder) = setup(100, 1_000);

    controller.call(recorder.callback("a")).unwrap();
    controller.call(recorder.callback("b")).unwrap();
    controller.reset();
    assert!(!controller.is_pending());

    clock.advance(ms(10));
    assert_eq!(controller.call(recorder.callback("c")), Ok(Dispatch::Immediate));
    clock.run_until_idle();
    assert_eq!(recorder.runs(), vec![("a", ms(0)), ("c", ms(10))]);
}

#[test]
fn test_dispose_is_idempotent_and_terminal() {
    let (clock, controller, recorder) = setup(100, 1_000);

    controller.call(recorder.callback("a")).unwrap();
    controller.call(recorder.callback("b")).unwrap();
    controller.dispose();
    controller.dispose();
    controller.cancel();

    clock.run_until_idle();
    assert_eq!(recorder.labels(), vec!["a"]);
    assert_eq!(
        controller.call(recorder.callback("c")),
        Err(TimingError::Disposed("debounce-throttle controller"))
    );
}

#[test]
fn test_setters_update_policy() {
    let (clock, controller, recorder) = setup(100, 1_000);
    controller.set_debounce_delay(ms(20));
    controller.set_throttle_window(ms(10));
    assert_eq!(controller.debounce_delay(), ms(20));
    assert_eq!(controller.throttle_window(), ms(10));

    controller.call(recorder.callback("a")).unwrap();
    clock.advance_to(ms(10));
    assert_eq!(controller.call(recorder.callback("b")), Ok(Dispatch::Immediate));
}
