//! Port traits: the boundary between bring-up/supervisor logic and ESP-IDF.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ app (bootstrap · settings store · supervisor)
//! ```
//!
//! Adapters in [`crate::adapters`] and [`crate::drivers`] implement these
//! traits against ESP-IDF on target and against in-memory simulations on
//! the host. The app layer only ever sees the traits.

use super::events::{LedState, StationEvent};

// ───────────────────────────────────────────────────────────────
// Radio port (supervisor → network stack)
// ───────────────────────────────────────────────────────────────

/// Issue association requests to the Wi-Fi driver.
pub trait RadioPort {
    /// Fire-and-forget connect request. The outcome arrives later as a
    /// [`StationEvent`]; implementations must not block.
    fn request_connect(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Status LED port (supervisor → GPIO)
// ───────────────────────────────────────────────────────────────

pub trait StatusLedPort {
    /// Drive the indicator. Must not block.
    fn set(&mut self, state: LedState);
}

// ───────────────────────────────────────────────────────────────
// Event handler (network stack → supervisor)
// ───────────────────────────────────────────────────────────────

/// Receiver of station lifecycle notifications.
///
/// The networking stack invokes this from its own event-dispatch task,
/// strictly in emission order. Implementations never fail and never block.
pub trait StationEventHandler {
    fn on_event(&mut self, event: StationEvent);
}

// ───────────────────────────────────────────────────────────────
// Flash store port (NVS partition)
// ───────────────────────────────────────────────────────────────

/// Result classification of an NVS init attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashInitError {
    /// The partition has no free pages left.
    NoFreePages,
    /// The partition was written by a newer NVS format.
    NewVersionFound,
    /// Any other ESP-IDF error code.
    Other(i32),
}

impl FlashInitError {
    /// Whether erasing the partition may cure this error.
    pub const fn is_recoverable_by_erase(self) -> bool {
        matches!(self, Self::NoFreePages | Self::NewVersionFound)
    }

    pub const fn code(self) -> i32 {
        match self {
            Self::NoFreePages => ESP_ERR_NVS_NO_FREE_PAGES,
            Self::NewVersionFound => ESP_ERR_NVS_NEW_VERSION_FOUND,
            Self::Other(rc) => rc,
        }
    }

    /// Classify a raw `esp_err_t`. `ESP_OK` is not an error and maps to `None`.
    pub const fn from_code(rc: i32) -> Option<Self> {
        match rc {
            0 => None,
            ESP_ERR_NVS_NO_FREE_PAGES => Some(Self::NoFreePages),
            ESP_ERR_NVS_NEW_VERSION_FOUND => Some(Self::NewVersionFound),
            other => Some(Self::Other(other)),
        }
    }
}

// nvs.h: ESP_ERR_NVS_BASE + 0x0d / + 0x10
const ESP_ERR_NVS_NO_FREE_PAGES: i32 = 0x110d;
const ESP_ERR_NVS_NEW_VERSION_FOUND: i32 = 0x1110;

/// Non-volatile key-value partition used by the Wi-Fi driver.
pub trait FlashStorePort {
    fn init(&mut self) -> Result<(), FlashInitError>;

    /// Erase the whole partition. Error carries the ESP-IDF code.
    fn erase(&mut self) -> Result<(), i32>;
}

// ───────────────────────────────────────────────────────────────
// Station stack port (bootstrap → network stack)
// ───────────────────────────────────────────────────────────────

/// The eight bring-up operations of the station network stack.
///
/// Each method maps to one [`BootStep`](crate::error::BootStep) and
/// returns the ESP-IDF error code on failure.
pub trait StationStack {
    /// IP runtime plus the default event loop.
    fn init_network_runtime(&mut self) -> Result<(), i32>;

    /// Default station-mode network interface.
    fn create_station_interface(&mut self) -> Result<(), i32>;

    /// Wi-Fi driver with default tuning.
    fn init_radio(&mut self) -> Result<(), i32>;

    /// Route every Wi-Fi lifecycle event and the got-IP event to `handler`.
    fn subscribe(&mut self, handler: Box<dyn StationEventHandler + Send>) -> Result<(), i32>;

    /// Station mode with the target network name and no pre-shared key.
    fn configure_station(&mut self, ssid: &str) -> Result<(), i32>;

    /// Install PEAP identity, username and password as length-delimited bytes.
    fn set_enterprise_credentials(
        &mut self,
        identity: &[u8],
        username: &[u8],
        password: &[u8],
    ) -> Result<(), i32>;

    fn enable_enterprise(&mut self) -> Result<(), i32>;

    fn start_radio(&mut self) -> Result<(), i32>;
}
