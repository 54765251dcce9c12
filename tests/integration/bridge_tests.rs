//! Integration tests for the transport → codec → filter → stabilizer →
//! actuator pipeline.
//!
//! These drive [`BridgeService`] with scripted datagrams and verify the
//! full chain down to actuator calls, without any real socket or
//! subprocess.

use std::time::{Duration, Instant};

use vrcmute::app::events::BridgeEvent;
use vrcmute::app::ports::ActuatorError;
use vrcmute::app::service::BridgeService;
use vrcmute::config::Config;

use crate::mocks::{MockMute, MuteCall, RecordingSink, ScriptedTransport, bool_message, bundle};

const TARGET: &str = "/avatar/parameters/muteself";

fn make_bridge(config: Config) -> (BridgeService, ScriptedTransport, MockMute, RecordingSink) {
    (
        BridgeService::new(config),
        ScriptedTransport::new(),
        MockMute::new(),
        RecordingSink::new(),
    )
}

fn window(config: &Config) -> Duration {
    config.debounce()
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn datagram_to_actuator_happy_path() {
    let config = Config::default();
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    let t0 = Instant::now();
    net.push(bool_message(TARGET, true));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0, &mut hw, &mut sink);
    assert!(hw.calls.is_empty(), "debounce must delay the commit");

    bridge.tick(t0 + win, &mut hw, &mut sink);
    assert_eq!(
        hw.calls,
        vec![MuteCall {
            muted: true,
            forced: false
        }]
    );
    assert_eq!(bridge.last_committed(), Some(true));
}

#[test]
fn events_are_emitted_in_pipeline_order() {
    let config = Config::default();
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    bridge.start(&mut sink);
    let t0 = Instant::now();
    net.push(bool_message(TARGET, true));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0 + win, &mut hw, &mut sink);

    assert!(matches!(
        sink.events.as_slice(),
        [
            BridgeEvent::Started { .. },
            BridgeEvent::Observation { value: true },
            BridgeEvent::MuteApplied {
                muted: true,
                forced: false
            },
        ]
    ));
}

#[test]
fn burst_of_flips_collapses_to_final_value() {
    let config = Config::default();
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    let t0 = Instant::now();
    // Three datagrams in one drain: duplicated/jittery input.
    net.push(bool_message(TARGET, true));
    net.push(bool_message(TARGET, false));
    net.push(bool_message(TARGET, true));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0 + win, &mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![MuteCall {
            muted: true,
            forced: false
        }]
    );
}

// ── Address filtering ─────────────────────────────────────────

#[test]
fn non_matching_address_is_ignored() {
    let config = Config::default();
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    let t0 = Instant::now();
    net.push(bool_message("/avatar/parameters/other", true));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0 + win, &mut hw, &mut sink);

    assert!(hw.calls.is_empty());
}

#[test]
fn address_matching_is_case_insensitive_end_to_end() {
    let config = Config::default();
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    let t0 = Instant::now();
    net.push(bool_message("/Avatar/Parameters/MuteSelf", true));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0 + win, &mut hw, &mut sink);

    assert_eq!(hw.calls.len(), 1);
}

#[test]
fn bundled_messages_reach_the_stabilizer() {
    let config = Config::default();
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    let t0 = Instant::now();
    let inner = bundle(&[bool_message(TARGET, true)]);
    net.push(bundle(&[
        bool_message("/avatar/parameters/other", false),
        inner,
    ]));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0 + win, &mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![MuteCall {
            muted: true,
            forced: false
        }]
    );
}

// ── Inversion ─────────────────────────────────────────────────

#[test]
fn inversion_flips_the_observed_value() {
    let mut config = Config::default();
    config.invert = true;
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    let t0 = Instant::now();
    net.push(bool_message(TARGET, true));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0 + win, &mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![MuteCall {
            muted: false,
            forced: false
        }]
    );
}

// ── Correction path ───────────────────────────────────────────

#[test]
fn correction_reasserts_after_commit() {
    let config = Config::default();
    let win = window(&config);
    let interval = config.correction();
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    let t0 = Instant::now();
    net.push(bool_message(TARGET, true));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0, &mut hw, &mut sink); // arms the correction timer
    bridge.tick(t0 + win, &mut hw, &mut sink); // debounce commit
    hw.calls.clear();

    for i in 1..=3u32 {
        bridge.tick(t0 + interval * i, &mut hw, &mut sink);
    }

    assert_eq!(hw.calls.len(), 3);
    assert!(hw.calls.iter().all(|c| c.muted && c.forced));
}

// ── Failure handling ──────────────────────────────────────────

#[test]
fn actuator_failure_is_reported_not_propagated() {
    let config = Config::default();
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);
    hw.fail_with = Some(ActuatorError::TargetNotFound);

    let t0 = Instant::now();
    net.push(bool_message(TARGET, true));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0 + win, &mut hw, &mut sink);

    assert!(sink.events.iter().any(|e| matches!(
        e,
        BridgeEvent::ActuatorFailed(ActuatorError::TargetNotFound)
    )));
    // Belief still advances.
    assert_eq!(bridge.last_committed(), Some(true));
}

#[test]
fn transport_error_ends_drain_without_losing_later_ticks() {
    let config = Config::default();
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    let t0 = Instant::now();
    net.fail_next = true;
    net.push(bool_message(TARGET, true));
    bridge.pump(&mut net, t0, &mut sink); // error consumed, queue intact

    let t1 = t0 + Duration::from_millis(50);
    bridge.pump(&mut net, t1, &mut sink); // next drain succeeds
    bridge.tick(t1 + win, &mut hw, &mut sink);

    assert_eq!(hw.calls.len(), 1);
}

#[test]
fn garbage_datagrams_are_ignored() {
    let config = Config::default();
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    let t0 = Instant::now();
    net.push(vec![0xFF; 32]);
    net.push(b"#bundle\0trunc".to_vec());
    net.push(bool_message(TARGET, true));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0 + win, &mut hw, &mut sink);

    assert_eq!(hw.calls.len(), 1);
}

// ── Configuration ─────────────────────────────────────────────

#[test]
fn disabled_bridge_ignores_input_and_ticks() {
    let mut config = Config::default();
    config.enabled = false;
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    let t0 = Instant::now();
    net.push(bool_message(TARGET, true));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0 + win, &mut hw, &mut sink);

    assert!(hw.calls.is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn config_reload_retargets_the_filter() {
    let config = Config::default();
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    let mut new_config = Config::default();
    new_config.parameter = "deafen".into();
    bridge.replace_config(new_config, &mut sink);
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, BridgeEvent::ConfigReloaded)));

    let t0 = Instant::now();
    net.push(bool_message(TARGET, true));
    net.push(bool_message("/avatar/parameters/deafen", true));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0 + win, &mut hw, &mut sink);

    // Only the new target is observed now.
    let observed: Vec<_> = sink
        .events
        .iter()
        .filter(|e| matches!(e, BridgeEvent::Observation { .. }))
        .collect();
    assert_eq!(observed.len(), 1);
    assert_eq!(hw.calls.len(), 1);
}

#[test]
fn config_reload_preserves_committed_state() {
    let config = Config::default();
    let win = window(&config);
    let (mut bridge, mut net, mut hw, mut sink) = make_bridge(config);

    let t0 = Instant::now();
    net.push(bool_message(TARGET, true));
    bridge.pump(&mut net, t0, &mut sink);
    bridge.tick(t0 + win, &mut hw, &mut sink);
    assert_eq!(bridge.last_committed(), Some(true));

    bridge.replace_config(Config::default(), &mut sink);
    assert_eq!(bridge.last_committed(), Some(true));

    // No spurious re-commit after the swap.
    hw.calls.clear();
    bridge.tick(t0 + win * 2, &mut hw, &mut sink);
    assert!(hw.calls.is_empty());
}
