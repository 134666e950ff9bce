//! Connection supervisor: the only runtime decision logic in the firmware.
//!
//! ```text
//!  StationEvent ──▶ ┌──────────────────────┐ ──▶ RadioPort (connect)
//!                   │ ConnectionSupervisor │
//!                   └──────────────────────┘ ──▶ StatusLedPort
//! ```
//!
//! | Event             | Connect request | LED  |
//! |-------------------|-----------------|------|
//! | `Started`         | one             | -    |
//! | `Disconnected`    | one             | Off  |
//! | `AddressAcquired` | none            | On   |
//!
//! Reconnects are immediate and unbounded: a flapping link produces one
//! connect request per drop with no backoff.

use log::info;

use crate::config::{NetworkName, StationConfig};

use super::events::{LedState, StationEvent};
use super::ports::{RadioPort, StationEventHandler, StatusLedPort};

pub struct ConnectionSupervisor<R, L> {
    radio: R,
    led: L,
    network: NetworkName,
    led_state: LedState,
    connect_requests: u32,
    /// Drops since the last acquired address.
    consecutive_drops: u32,
}

impl<R: RadioPort, L: StatusLedPort> ConnectionSupervisor<R, L> {
    /// The LED is assumed already driven low by bring-up; nothing is
    /// written here.
    pub fn new(radio: R, led: L, station: &StationConfig) -> Self {
        Self {
            radio,
            led,
            network: station.network_name().clone(),
            led_state: LedState::Off,
            connect_requests: 0,
            consecutive_drops: 0,
        }
    }

    /// Network named in the connection log lines.
    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn led_state(&self) -> LedState {
        self.led_state
    }

    pub fn connect_requests(&self) -> u32 {
        self.connect_requests
    }

    pub fn consecutive_drops(&self) -> u32 {
        self.consecutive_drops
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn led(&self) -> &L {
        &self.led
    }

    fn connect(&mut self) {
        self.connect_requests = self.connect_requests.wrapping_add(1);
        self.radio.request_connect();
    }

    fn set_led(&mut self, state: LedState) {
        self.led_state = state;
        self.led.set(state);
    }
}

impl<R: RadioPort, L: StatusLedPort> StationEventHandler for ConnectionSupervisor<R, L> {
    fn on_event(&mut self, event: StationEvent) {
        match event {
            StationEvent::Started => {
                info!("Station started, connecting to '{}'", self.network);
                self.connect();
            }
            StationEvent::Disconnected => {
                self.consecutive_drops = self.consecutive_drops.saturating_add(1);
                info!(
                    "Disconnected from '{}', reconnecting (attempt {})",
                    self.network, self.consecutive_drops
                );
                self.connect();
                self.set_led(LedState::Off);
            }
            StationEvent::AddressAcquired(ip) => {
                self.consecutive_drops = 0;
                info!("Connected to '{}', IP address: {}", self.network, ip);
                self.set_led(LedState::On);
            }
        }
    }
}
