//! Simulation mode acceptance tests
//!
//! Without a device, the eight trigger keys stand in for the instrument.

use crate::model::Trigger;
use crate::test_harness::AcceptanceTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};

fn harness() -> AcceptanceTestHarness {
    AcceptanceTestHarness::simulated().expect("Should build simulated harness")
}

#[test]
fn starts_idle_in_simulation_mode() {
    let mut harness = harness();
    let screen = harness.render_to_string();
    assert!(screen.contains("gesture: IDLE"), "screen:\n{}", screen);
    assert!(screen.contains("velocity → 0"), "screen:\n{}", screen);
    assert!(screen.contains("[SIM]"), "screen:\n{}", screen);
}

#[test]
fn each_trigger_key_registers_its_gesture_in_range() {
    let mut harness = harness();
    for trigger in Trigger::ALL {
        harness.send_key(KeyCode::Char(trigger.key()));
        let store = harness.state().store();
        assert_eq!(store.gesture(), trigger.gesture_name().to_uppercase());
        assert!(
            trigger.velocity_range().contains(store.velocity()),
            "{:?} fired with {}",
            trigger,
            store.velocity()
        );
    }
    assert!(harness.is_running());
}

#[test]
fn uppercase_trigger_keys_work() {
    let mut harness = harness();
    harness.send_key_with_mods(KeyCode::Char('S'), KeyModifiers::SHIFT);
    assert_eq!(harness.state().store().gesture(), "SCRAPE");
}

#[test]
fn history_strip_shows_newest_first() {
    let mut harness = harness();
    harness.type_text("pbm");

    let history: Vec<&str> = harness
        .state()
        .store()
        .history()
        .iter()
        .map(|e| e.gesture())
        .collect();
    assert_eq!(history, vec!["MUTE", "BOW", "PLUCK"]);

    // Only the history strip mentions PLUCK now; newest cell is leftmost
    let screen = harness.render_to_string();
    let row = screen
        .lines()
        .find(|line| line.contains("PLUCK"))
        .expect("history row rendered");
    let mute = row.find("MUTE").expect("MUTE cell");
    let bow = row.find("BOW").expect("BOW cell");
    let pluck = row.find("PLUCK").expect("PLUCK cell");
    assert!(mute < bow && bow < pluck, "row: {}", row);
}

#[test]
fn seven_triggers_keep_six_history_cells() {
    let mut harness = harness();
    harness.type_text("psbrhmt");
    let history = harness.state().store().history();
    assert_eq!(history.len(), 6);
    assert_eq!(history[0].gesture(), "TREMOLO");
    assert_eq!(history[5].gesture(), "SCRAPE");
}

#[test]
fn velocity_decays_between_frames() {
    let mut harness = harness();
    harness.send_key(KeyCode::Char('p'));
    let fired = harness.state().store().velocity();

    harness.tick(10);

    let expected = fired * 0.92_f64.powi(10);
    assert!((harness.state().store().velocity() - expected).abs() < 1e-12);
    // Decay never touches the label or history
    assert_eq!(harness.state().store().gesture(), "PLUCK");
    assert_eq!(harness.state().store().history().len(), 1);
}

#[test]
fn long_idle_decays_to_zero_display() {
    let mut harness = harness();
    harness.send_key(KeyCode::Char('p'));
    harness.tick(200);

    let screen = harness.render_to_string();
    assert!(screen.contains("velocity → 0"), "screen:\n{}", screen);
    assert!(screen.contains("gesture: PLUCK"), "screen:\n{}", screen);
}

#[test]
fn release_sets_velocity_zero() {
    let mut harness = harness();
    harness.type_text("pr");
    assert_eq!(harness.state().store().velocity(), 0.0);
}

#[test]
fn question_mark_toggles_trigger_legend() {
    let mut harness = harness();

    harness.send_key(KeyCode::Char('?'));
    assert!(harness.state().help_visible);
    let screen = harness.render_to_string();
    assert!(screen.contains("Triggers"), "screen:\n{}", screen);
    assert!(screen.contains("VIBRATO"), "screen:\n{}", screen);

    harness.send_key(KeyCode::Char('?'));
    assert!(!harness.state().help_visible);
    let screen = harness.render_to_string();
    assert!(!screen.contains("Triggers"), "screen:\n{}", screen);
}

#[test]
fn quit_keys_stop_the_app() {
    for (code, mods) in [
        (KeyCode::Char('q'), KeyModifiers::NONE),
        (KeyCode::Esc, KeyModifiers::NONE),
        (KeyCode::Char('c'), KeyModifiers::CONTROL),
    ] {
        let mut harness = harness();
        assert!(harness.send_key_with_mods(code, mods));
        assert!(!harness.is_running());
    }
}

#[test]
fn keys_after_quit_are_ignored() {
    let mut harness = harness();
    harness.send_key(KeyCode::Char('q'));
    harness.send_key(KeyCode::Char('p'));
    assert_eq!(harness.state().store().gesture(), "idle");
}

#[test]
fn small_terminal_renders_without_panic() {
    let mut harness = AcceptanceTestHarness::linked_with(20, 6, 0.92).expect("harness");
    harness.connect();
    harness.push("{\"gesture\":\"vibrato\",\"value\":90}\n");
    harness.tick(3);
    harness.send_key(KeyCode::Char('?'));
    let _ = harness.render_to_string();
    assert!(harness.is_running());
}
