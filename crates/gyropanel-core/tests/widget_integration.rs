//! End-to-end behaviour of the widget with recording collaborators.
//!
//! Virtual time starts at 0 and only moves through `advance`, so cooldowns
//! and engine ticks are exact.

mod common;

use common::{harness, harness_with, hm, HERE};
use gyropanel_core::{
    Config, CurrentWeather, Event, Mode, MotionSample, OrientationSample, Panel, SoundKind,
    TaskOwner, TextSlot, Theme, TimeUnit, TimerState, WeatherError,
};

fn flat(alpha: f64) -> OrientationSample {
    OrientationSample::new(alpha, 0.0, 0.0)
}

fn portrait_up() -> OrientationSample {
    OrientationSample::new(0.0, 90.0, 0.0)
}

fn portrait_down() -> OrientationSample {
    OrientationSample::new(0.0, -90.0, 0.0)
}

fn landscape_left() -> OrientationSample {
    OrientationSample::new(0.0, 0.0, -70.0)
}

fn mode_changes(events: &[Event]) -> Vec<Mode> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::ModeChanged { mode, .. } => Some(*mode),
            _ => None,
        })
        .collect()
}

fn type_timer(h: &mut common::Harness, unit: TimeUnit, digits: &str) {
    h.widget.timer_select_unit(unit);
    for d in digits.chars() {
        assert!(h.widget.timer_press_digit(d).is_empty());
    }
}

// ============================================================================
// Mode selection
// ============================================================================

#[test]
fn flat_device_shows_compass_and_heading() {
    let mut h = harness();
    let events = h.widget.on_orientation(&flat(123.6));

    assert_eq!(mode_changes(&events), vec![Mode::Compass]);
    let log = h.log.borrow();
    assert_eq!(log.visible_panel(), Some(Panel::Compass));
    assert_eq!(log.labels.last().map(String::as_str), Some("🧭 Compass"));
    assert_eq!(log.spoken, vec!["🧭 Compass".to_string()]);
    assert_eq!(log.text(TextSlot::CompassHeading), "Heading: 124°");
}

#[test]
fn heading_refreshes_without_new_transition() {
    let mut h = harness();
    h.widget.on_orientation(&flat(10.0));
    h.widget.advance(5);
    let events = h.widget.on_orientation(&flat(275.2));

    assert!(mode_changes(&events).is_empty());
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::HeadingUpdated { heading_deg: 275, .. })));
    assert_eq!(h.log.borrow().spoken.len(), 1);
}

#[test]
fn transitions_respect_cooldown() {
    let mut h = harness();
    assert_eq!(
        mode_changes(&h.widget.on_orientation(&portrait_up())),
        vec![Mode::Alarm]
    );

    h.widget.advance(450);
    assert!(mode_changes(&h.widget.on_orientation(&flat(0.0))).is_empty());
    assert_eq!(h.widget.mode(), Mode::Alarm);

    h.widget.advance(1);
    assert_eq!(
        mode_changes(&h.widget.on_orientation(&flat(0.0))),
        vec![Mode::Compass]
    );
}

#[test]
fn timer_mode_rotates_surface() {
    let mut h = harness();
    h.widget.on_orientation(&portrait_down());
    assert_eq!(h.widget.mode(), Mode::Timer);
    assert_eq!(h.log.borrow().rotations.last(), Some(&180));
}

#[test]
fn missing_angles_change_nothing() {
    let mut h = harness();
    let sample = OrientationSample {
        alpha: Some(0.0),
        beta: None,
        gamma: Some(0.0),
    };
    assert!(h.widget.on_orientation(&sample).is_empty());
    assert_eq!(h.widget.mode(), Mode::None);
    assert!(h.log.borrow().spoken.is_empty());
}

#[test]
fn voice_can_be_disabled() {
    let mut config = Config::default();
    config.ui.voice = false;
    let mut h = harness_with(&config, Some(HERE), true);
    h.widget.on_orientation(&portrait_up());
    assert!(h.log.borrow().spoken.is_empty());
    assert_eq!(h.log.borrow().visible_panel(), Some(Panel::Alarm));
}

// ============================================================================
// Shake
// ============================================================================

#[test]
fn shake_forces_surprise_during_cooldown() {
    let mut h = harness();
    h.widget.on_orientation(&portrait_down());
    h.widget.on_motion(MotionSample::new(0.0, 0.0, 0.0));
    let events = h.widget.on_motion(MotionSample::new(20.0, 10.0, 0.0));

    assert_eq!(mode_changes(&events), vec![Mode::Surprise]);
    let surprises = events
        .iter()
        .filter(|e| matches!(e, Event::SurpriseTriggered { .. }))
        .count();
    assert_eq!(surprises, 1);

    let log = h.log.borrow();
    assert_eq!(log.visible_panel(), Some(Panel::Surprise));
    assert_eq!(log.celebrations.len(), 1);
    let (a, b) = log.celebrations[0];
    assert!(a <= 360 && b <= 360);
    assert_eq!(log.rotations.last(), Some(&0));
}

#[test]
fn gentle_motion_is_not_a_shake() {
    let mut h = harness();
    h.widget.on_motion(MotionSample::new(0.0, 9.8, 0.0));
    assert!(h
        .widget
        .on_motion(MotionSample::new(5.0, 9.0, 3.0))
        .is_empty());
    assert_eq!(h.widget.mode(), Mode::None);
}

#[test]
fn orientation_reclassifies_out_of_surprise() {
    let mut h = harness();
    h.widget.on_motion(MotionSample::new(0.0, 0.0, 0.0));
    h.widget.on_motion(MotionSample::new(30.0, 0.0, 0.0));
    assert_eq!(h.widget.mode(), Mode::Surprise);

    h.widget.advance(500);
    h.widget.on_orientation(&portrait_up());
    assert_eq!(h.widget.mode(), Mode::Alarm);
}

#[test]
fn surprise_stays_while_orientation_unchanged() {
    let mut h = harness();
    h.widget.on_orientation(&flat(0.0));
    h.widget.advance(1_000);
    h.widget.on_motion(MotionSample::new(0.0, 0.0, 0.0));
    h.widget.on_motion(MotionSample::new(30.0, 0.0, 0.0));

    h.widget.advance(500);
    let events = h.widget.on_orientation(&flat(0.0));
    assert!(mode_changes(&events).is_empty());
    assert_eq!(h.widget.mode(), Mode::Surprise);
    assert_eq!(h.widget.snapshot().mode, Mode::Surprise);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::HeadingUpdated { .. })));
    assert_eq!(h.log.borrow().visible_panel(), Some(Panel::Surprise));
}

#[test]
fn tilt_right_after_shake_switches_mode() {
    let mut h = harness();
    h.widget.on_orientation(&flat(0.0));
    h.widget.advance(1_000);
    h.widget.on_motion(MotionSample::new(0.0, 0.0, 0.0));
    h.widget.on_motion(MotionSample::new(30.0, 0.0, 0.0));

    h.widget.advance(100);
    let events = h.widget.on_orientation(&portrait_up());
    assert_eq!(mode_changes(&events), vec![Mode::Alarm]);
    assert_eq!(h.widget.mode(), Mode::Alarm);
    assert_eq!(h.log.borrow().visible_panel(), Some(Panel::Alarm));
}

// ============================================================================
// Timer
// ============================================================================

#[test]
fn timer_counts_down_from_keypad_entry() {
    let mut h = harness();
    type_timer(&mut h, TimeUnit::Hours, "1");
    type_timer(&mut h, TimeUnit::Seconds, "30");

    let events = h.widget.timer_start();
    assert!(matches!(events[0], Event::TimerStarted { total_secs: 3630, .. }));
    assert_eq!(h.log.borrow().text(TextSlot::TimerDisplay), "01:00:30");

    h.widget.advance(1_000);
    assert_eq!(h.log.borrow().text(TextSlot::TimerDisplay), "01:00:29");
}

#[test]
fn empty_timer_reports_invalid_time() {
    let mut h = harness();
    let events = h.widget.timer_start();

    assert!(matches!(events[0], Event::InputRejected { .. }));
    assert_eq!(h.widget.timer().state(), TimerState::Idle);
    assert_eq!(h.widget.scheduler().live_tasks(TaskOwner::Timer), 0);
    let log = h.log.borrow();
    assert_eq!(log.text(TextSlot::TimerStatus), "⚠️ Please enter a valid time");
    assert_eq!(
        log.spoken.last().map(String::as_str),
        Some("⚠️ Please enter a valid time")
    );
}

#[test]
fn timer_expiry_alerts_once() {
    let mut h = harness();
    type_timer(&mut h, TimeUnit::Seconds, "3");
    h.widget.timer_start();
    let events = h.widget.advance(10_000);

    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Event::TimerExpired { .. }));
    assert_eq!(h.widget.timer().state(), TimerState::Expired);
    let log = h.log.borrow();
    assert_eq!(log.sounds, vec![SoundKind::TimerDone]);
    assert_eq!(log.prompts.len(), 1);
    assert_eq!(log.text(TextSlot::TimerDisplay), "00:00:00");
}

#[test]
fn restarting_timer_never_ticks_twice() {
    let mut h = harness();
    type_timer(&mut h, TimeUnit::Minutes, "1");
    h.widget.timer_start();
    h.widget.advance(500);
    h.widget.timer_start();
    h.widget.timer_toggle_pause();
    h.widget.timer_toggle_pause();
    h.widget.advance(3_000);

    assert_eq!(h.widget.scheduler().live_tasks(TaskOwner::Timer), 1);
    assert_eq!(h.widget.timer().remaining_secs(), 57);
}

#[test]
fn pause_toggle_label_reflects_next_action() {
    let mut h = harness();
    type_timer(&mut h, TimeUnit::Seconds, "20");
    h.widget.timer_start();
    h.widget.timer_toggle_pause();
    assert_eq!(h.log.borrow().text(TextSlot::TimerToggleLabel), "Resume");
    h.widget.advance(5_000);
    assert_eq!(h.widget.timer().remaining_secs(), 20);

    h.widget.timer_toggle_pause();
    assert_eq!(h.log.borrow().text(TextSlot::TimerToggleLabel), "Pause");
    h.widget.advance(2_000);
    assert_eq!(h.widget.timer().remaining_secs(), 18);

    h.widget.timer_reset();
    assert_eq!(h.log.borrow().text(TextSlot::TimerDisplay), "00:00:20");
}

#[test]
fn keypad_entry_is_rendered() {
    let mut h = harness();
    type_timer(&mut h, TimeUnit::Minutes, "457");
    assert_eq!(
        h.log.borrow().text(TextSlot::TimerEntry),
        "00:45:00 (editing minutes)"
    );
    h.widget.timer_clear_digits();
    assert_eq!(
        h.log.borrow().text(TextSlot::TimerEntry),
        "00:00:00 (editing minutes)"
    );
}

// ============================================================================
// Stopwatch
// ============================================================================

#[test]
fn stopwatch_counts_and_records_laps() {
    let mut h = harness();
    h.widget.stopwatch_start();
    h.widget.advance(1_230);
    assert_eq!(h.log.borrow().text(TextSlot::StopwatchDisplay), "00:01.23");

    let events = h.widget.stopwatch_lap();
    assert!(matches!(
        events[0],
        Event::LapRecorded {
            lap: 1,
            elapsed_cs: 123,
            ..
        }
    ));
    assert_eq!(h.widget.stopwatch().laps(), &[123]);
    assert_eq!(h.log.borrow().laps, vec!["Lap 1: 00:01.23".to_string()]);

    h.widget.stopwatch_reset();
    let log = h.log.borrow();
    assert_eq!(log.text(TextSlot::StopwatchDisplay), "00:00.00");
    assert!(log.laps.is_empty());
}

#[test]
fn second_stopwatch_start_is_ignored() {
    let mut h = harness();
    assert_eq!(h.widget.stopwatch_start().len(), 1);
    assert!(h.widget.stopwatch_start().is_empty());
    h.widget.advance(1_000);
    assert_eq!(h.widget.stopwatch().elapsed_cs(), 100);
}

// ============================================================================
// Alarm
// ============================================================================

#[test]
fn alarm_fires_within_one_check_and_disarms() {
    let mut h = harness();
    h.clock.set(hm(0, 0));
    h.widget.alarm_set("00:00");
    assert!(h.widget.alarm().is_armed());

    let events = h.widget.advance(1_000);
    assert!(matches!(
        events[0],
        Event::AlarmFired {
            hour: 0,
            minute: 0,
            ..
        }
    ));
    assert!(!h.widget.alarm().is_armed());
    {
        let log = h.log.borrow();
        assert_eq!(log.sounds, vec![SoundKind::Alarm]);
        assert_ne!(log.text(TextSlot::AlarmStatus), "No alarm set");
    }

    assert!(h.widget.advance(5_000).is_empty());
    h.widget.alarm_clear();
    assert_eq!(h.log.borrow().text(TextSlot::AlarmStatus), "No alarm set");
}

#[test]
fn cleared_alarm_leaves_no_target_in_snapshot() {
    let mut h = harness();
    h.clock.set(hm(6, 0));
    h.widget.alarm_set("07:00");
    assert_eq!(h.widget.snapshot().alarm.as_deref(), Some("07:00"));

    h.widget.alarm_clear();
    let snapshot = h.widget.snapshot();
    assert_eq!(snapshot.alarm, None);
    assert!(!snapshot.alarm_armed);
    assert_eq!(h.widget.alarm().target(), None);
}

#[test]
fn alarm_waits_for_its_minute() {
    let mut h = harness();
    h.clock.set(hm(6, 59));
    h.widget.alarm_set("07:00");
    assert!(h.widget.advance(3_000).is_empty());
    h.clock.set(hm(7, 0));
    assert_eq!(h.widget.advance(1_000).len(), 1);
}

#[test]
fn empty_alarm_input_is_rejected() {
    let mut h = harness();
    let events = h.widget.alarm_set("");
    assert!(matches!(events[0], Event::InputRejected { .. }));
    assert!(!h.widget.alarm().is_armed());
    assert_eq!(
        h.log.borrow().text(TextSlot::AlarmStatus),
        "⚠️ Please select a time first"
    );
}

// ============================================================================
// Weather
// ============================================================================

#[test]
fn entering_weather_mode_requests_forecast() {
    let mut h = harness();
    let events = h.widget.on_orientation(&landscape_left());
    assert_eq!(mode_changes(&events), vec![Mode::Weather]);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::WeatherRequested { .. })));
    assert_eq!(h.log.borrow().text(TextSlot::WeatherInfo), "Fetching weather...");

    let request = h.widget.take_weather_request().unwrap();
    assert_eq!(request.coordinates, HERE);
    h.widget.complete_weather(
        &request,
        Ok(CurrentWeather {
            temperature: 17.5,
            windspeed: 4.0,
        }),
    );
    assert_eq!(
        h.log.borrow().text(TextSlot::WeatherInfo),
        "🌍 Lat: 40.42, Lon: -3.70 | 🌡 Temp: 17.5°C, 💨 Wind: 4 km/h"
    );
    assert!(h.widget.weather().fetched());
}

#[test]
fn missing_current_weather_allows_retry() {
    let mut h = harness();
    h.widget.trigger_weather(false);
    let request = h.widget.take_weather_request().unwrap();
    let events = h
        .widget
        .complete_weather(&request, Err(WeatherError::MissingCurrentWeather));

    assert!(matches!(events[0], Event::WeatherFailed { .. }));
    assert!(!h.widget.weather().fetched());
    assert_eq!(h.log.borrow().text(TextSlot::WeatherInfo), "Weather unavailable");

    h.widget.trigger_weather(false);
    assert!(h.widget.take_weather_request().is_some());
}

#[test]
fn reentering_weather_mode_forces_refresh() {
    let mut h = harness();
    h.widget.on_orientation(&landscape_left());
    let first = h.widget.take_weather_request().unwrap();
    h.widget.complete_weather(
        &first,
        Ok(CurrentWeather {
            temperature: 1.0,
            windspeed: 1.0,
        }),
    );

    h.widget.advance(500);
    h.widget.on_orientation(&flat(0.0));
    h.widget.advance(500);
    h.widget.on_orientation(&landscape_left());
    assert!(h.widget.take_weather_request().is_some());

    // A plain trigger after success is skipped.
    assert!(h.widget.trigger_weather(false).is_empty());
}

#[test]
fn no_location_source_is_reported_distinctly() {
    let mut h = harness_with(&Config::default(), None, true);
    let events = h.widget.on_orientation(&landscape_left());
    assert!(events.iter().any(|e| matches!(
        e,
        Event::WeatherFailed { message, .. } if message == "Geolocation not supported."
    )));
    assert!(h.widget.take_weather_request().is_none());
}

// ============================================================================
// Chrome
// ============================================================================

#[test]
fn refused_sensor_permission_is_reported_and_overlay_closes() {
    let mut h = harness_with(&Config::default(), Some(HERE), false);
    h.widget.show_help();
    assert_eq!(h.log.borrow().help_visible, Some(true));

    let events = h.widget.enable_sensors();
    assert!(matches!(
        events[0],
        Event::SensorPermission { granted: false, .. }
    ));
    let log = h.log.borrow();
    assert_eq!(log.help_visible, Some(false));
    assert_eq!(log.text(TextSlot::SensorStatus), "Motion sensors unavailable");
}

#[test]
fn theme_toggle_flips_surface_theme() {
    let mut h = harness();
    assert_eq!(h.log.borrow().theme, Some(Theme::Dark));
    h.widget.toggle_theme();
    assert_eq!(h.widget.theme(), Theme::Light);
    assert_eq!(h.log.borrow().theme, Some(Theme::Light));
}

#[test]
fn engines_run_independently_of_mode() {
    let mut h = harness();
    h.widget.stopwatch_start();
    type_timer(&mut h, TimeUnit::Seconds, "10");
    h.widget.timer_start();

    h.widget.on_orientation(&portrait_up());
    h.widget.advance(600);
    h.widget.on_orientation(&landscape_left());
    h.widget.advance(1_400);

    let snap = h.widget.snapshot();
    assert_eq!(snap.mode, Mode::Weather);
    assert_eq!(snap.stopwatch_display, "00:02.00");
    assert_eq!(snap.timer_display, "00:00:08");
}
