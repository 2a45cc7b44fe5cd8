//! Tests for the virtual clock

use super::*;
use std::cell::RefCell;
use std::rc::Rc;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn log_task(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> Task {
    let log = log.clone();
    Box::new(move || log.borrow_mut().push(label))
}

#[test]
fn test_new_clock_starts_at_zero() {
    let clock = VirtualClock::new();
    assert_eq!(clock.elapsed(), Duration::ZERO);
    assert_eq!(clock.pending_timers(), 0);
}

#[test]
fn test_now_tracks_elapsed() {
    let clock = VirtualClock::new();
    let start = clock.now();
    clock.advance(ms(250));
    assert_eq!(clock.now() - start, ms(250));
}

#[test]
fn test_task_fires_at_deadline_not_before() {
    let clock = VirtualClock::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    clock.schedule(ms(100), log_task(&log, "a"));

    assert_eq!(clock.advance(ms(99)), 0);
    assert!(log.borrow().is_empty());

    assert_eq!(clock.advance(ms(1)), 1);
    assert_eq!(*log.borrow(), vec!["a"]);
    assert_eq!(clock.pending_timers(), 0);
}

#[test]
fn test_tasks_fire_in_deadline_order() {
    let clock = VirtualClock::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    clock.schedule(ms(300), log_task(&log, "late"));
    clock.schedule(ms(100), log_task(&log, "early"));
    clock.schedule(ms(100), log_task(&log, "early-second"));

    clock.advance(ms(500));
    assert_eq!(*log.borrow(), vec!["early", "early-second", "late"]);
}

#[test]
fn test_cancelled_task_never_fires() {
    let clock = VirtualClock::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let id = clock.schedule(ms(100), log_task(&log, "a"));
    clock.cancel(id);

    assert_eq!(clock.advance(ms(1000)), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_cancel_unknown_id_is_noop() {
    let clock = VirtualClock::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let id = clock.schedule(ms(10), log_task(&log, "a"));
    clock.advance(ms(10));

    clock.cancel(id);
    clock.cancel(id);
    assert_eq!(*log.borrow(), vec!["a"]);
}

#[test]
fn test_clock_reads_deadline_while_task_runs() {
    let clock = VirtualClock::new();
    let seen = Rc::new(RefCell::new(None));
    let seen_in_task = seen.clone();
    let clock_in_task = clock.clone();
    clock.schedule(
        ms(40),
        Box::new(move || *seen_in_task.borrow_mut() = Some(clock_in_task.elapsed())),
    );

    clock.advance(ms(100));
    assert_eq!(*seen.borrow(), Some(ms(40)));
    assert_eq!(clock.elapsed(), ms(100));
}

#[test]
fn test_task_can_reschedule_during_advance() {
    let clock = VirtualClock::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let inner_log = log.clone();
    let inner_clock = clock.clone();
    clock.schedule(
        ms(10),
        Box::new(move || {
            inner_log.borrow_mut().push("first");
            let again = inner_log.clone();
            inner_clock.schedule(ms(10), Box::new(move || again.borrow_mut().push("second")));
        }),
    );

    assert_eq!(clock.advance(ms(25)), 2);
    assert_eq!(*log.borrow(), vec!["first", "second"]);
}

#[test]
fn test_advance_to_past_keeps_time() {
    let clock = VirtualClock::new();
    clock.advance(ms(100));
    clock.advance_to(ms(50));
    assert_eq!(clock.elapsed(), ms(100));
}

#[test]
fn test_run_until_idle_drains_queue() {
    let clock = VirtualClock::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    clock.schedule(ms(5_000), log_task(&log, "a"));
    clock.schedule(ms(50), log_task(&log, "b"));

    assert_eq!(clock.run_until_idle(), 2);
    assert_eq!(*log.borrow(), vec!["b", "a"]);
    assert_eq!(clock.elapsed(), ms(5_000));
}

#[test]
fn test_zero_delay_task_waits_for_advance() {
    let clock = VirtualClock::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    clock.schedule(Duration::ZERO, log_task(&log, "now"));

    assert!(log.borrow().is_empty());
    assert_eq!(clock.pending_timers(), 1);

    assert_eq!(clock.advance(Duration::ZERO), 1);
    assert_eq!(*log.borrow(), vec!["now"]);
    assert_eq!(clock.elapsed(), Duration::ZERO);
}
