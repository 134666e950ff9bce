//! Inbound station lifecycle notifications.
//!
//! The networking stack emits many events; only these three reach the
//! [`ConnectionSupervisor`](super::supervisor::ConnectionSupervisor).
//! Adapters translate raw stack events into this closed set.

use core::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationEvent {
    /// The radio finished starting in station mode.
    Started,

    /// An attempted or established association dropped, for any reason.
    Disconnected,

    /// Association, EAP negotiation and DHCP all completed.
    AddressAcquired(Ipv4Addr),
}

/// Status LED projection of the connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedState {
    #[default]
    Off,
    On,
}

impl LedState {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}
