//! Connection supervisor scenarios: notification sequences → connect
//! requests and final LED level.

use std::net::Ipv4Addr;

use eduroam_station::app::events::{LedState, StationEvent};
use eduroam_station::app::ports::StationEventHandler;

use crate::mock_hw::supervisor;

const IP: Ipv4Addr = Ipv4Addr::new(172, 16, 4, 20);

fn run(events: &[StationEvent]) -> (u32, LedState) {
    let (mut s, radio, led) = supervisor();
    for e in events {
        s.on_event(*e);
    }
    assert_eq!(s.led_state(), led.level(), "projection and pin disagree");
    (radio.requests(), led.level())
}

#[test]
fn no_events_led_off() {
    assert_eq!(run(&[]), (0, LedState::Off));
}

#[test]
fn start_only() {
    assert_eq!(run(&[StationEvent::Started]), (1, LedState::Off));
}

#[test]
fn start_then_disconnect() {
    assert_eq!(
        run(&[StationEvent::Started, StationEvent::Disconnected]),
        (2, LedState::Off)
    );
}

#[test]
fn start_then_address() {
    assert_eq!(
        run(&[StationEvent::Started, StationEvent::AddressAcquired(IP)]),
        (1, LedState::On)
    );
}

#[test]
fn reconnect_cycle_ends_lit() {
    assert_eq!(
        run(&[
            StationEvent::Started,
            StationEvent::AddressAcquired(IP),
            StationEvent::Disconnected,
            StationEvent::AddressAcquired(IP),
        ]),
        (2, LedState::On)
    );
}

#[test]
fn start_leaves_led_untouched() {
    let (mut s, _radio, led) = supervisor();
    s.on_event(StationEvent::Started);
    assert!(led.writes().is_empty());
}

#[test]
fn disconnect_turns_led_off_from_any_state() {
    let (mut s, radio, led) = supervisor();
    s.on_event(StationEvent::Disconnected);
    assert_eq!(led.writes(), vec![LedState::Off]);
    assert_eq!(radio.requests(), 1);

    s.on_event(StationEvent::AddressAcquired(IP));
    s.on_event(StationEvent::Disconnected);
    assert_eq!(led.writes(), vec![LedState::Off, LedState::On, LedState::Off]);
    assert_eq!(radio.requests(), 2);
}

#[test]
fn flapping_link_reconnects_every_time() {
    let (mut s, radio, _led) = supervisor();
    s.on_event(StationEvent::Started);
    for _ in 0..50 {
        s.on_event(StationEvent::Disconnected);
    }
    assert_eq!(radio.requests(), 51);
    assert_eq!(s.consecutive_drops(), 50);
}

#[test]
fn repeated_address_events_are_not_deduplicated() {
    let (mut s, radio, led) = supervisor();
    s.on_event(StationEvent::AddressAcquired(IP));
    s.on_event(StationEvent::AddressAcquired(Ipv4Addr::new(172, 16, 4, 21)));
    assert_eq!(led.writes(), vec![LedState::On, LedState::On]);
    assert_eq!(radio.requests(), 0);
}

#[test]
fn start_after_address_keeps_led_lit() {
    assert_eq!(
        run(&[StationEvent::AddressAcquired(IP), StationEvent::Started]),
        (1, LedState::On)
    );
}
