//! Unified error types for the station firmware.
//!
//! Every bring-up phase returns its own error type; all of them convert
//! into [`Error`] so `main` can treat startup failures uniformly.
//! Runtime disconnects are not errors and never appear here.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Compiled-in configuration is invalid.
    Config(ConfigError),
    /// NVS flash could not be brought up.
    Store(StoreError),
    /// UART or GPIO initialisation failed.
    Peripheral(HwInitError),
    /// A network bootstrap step failed.
    Bootstrap(BootstrapError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Store(e) => write!(f, "settings store: {e}"),
            Self::Peripheral(e) => write!(f, "peripheral: {e}"),
            Self::Bootstrap(e) => write!(f, "bootstrap: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Peripheral(e)
    }
}

impl From<BootstrapError> for Error {
    fn from(e: BootstrapError) -> Self {
        Self::Bootstrap(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Network name empty or longer than 32 bytes.
    InvalidSsid,
    /// An EAP credential is empty or longer than 128 bytes.
    InvalidCredential(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID must be 1-32 bytes"),
            Self::InvalidCredential(field) => write!(f, "EAP {field} must be 1-128 bytes"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Settings store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// First init failed with an error that does not warrant an erase.
    InitFailed(i32),
    /// Erasing the partition failed.
    EraseFailed(i32),
    /// Init after the erase failed; no further attempt is made.
    RetryFailed(i32),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed(rc) => write!(f, "NVS init failed (rc=0x{rc:x})"),
            Self::EraseFailed(rc) => write!(f, "NVS erase failed (rc=0x{rc:x})"),
            Self::RetryFailed(rc) => write!(f, "NVS init after erase failed (rc=0x{rc:x})"),
        }
    }
}

impl std::error::Error for StoreError {}

// ---------------------------------------------------------------------------
// Bootstrap errors
// ---------------------------------------------------------------------------

/// The eight station bring-up steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BootStep {
    NetworkRuntime = 1,
    StationInterface = 2,
    RadioInit = 3,
    EventSubscription = 4,
    StationConfig = 5,
    EnterpriseCredentials = 6,
    EnterpriseEnable = 7,
    RadioStart = 8,
}

impl BootStep {
    pub const ALL: [Self; 8] = [
        Self::NetworkRuntime,
        Self::StationInterface,
        Self::RadioInit,
        Self::EventSubscription,
        Self::StationConfig,
        Self::EnterpriseCredentials,
        Self::EnterpriseEnable,
        Self::RadioStart,
    ];

    /// 1-based position in the bring-up sequence.
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NetworkRuntime => "network runtime",
            Self::StationInterface => "station interface",
            Self::RadioInit => "radio init",
            Self::EventSubscription => "event subscription",
            Self::StationConfig => "station config",
            Self::EnterpriseCredentials => "enterprise credentials",
            Self::EnterpriseEnable => "enterprise enable",
            Self::RadioStart => "radio start",
        }
    }
}

impl fmt::Display for BootStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.name())
    }
}

/// A bootstrap step failed with an ESP-IDF error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapError {
    pub step: BootStep,
    pub code: i32,
}

impl BootstrapError {
    pub const fn new(step: BootStep, code: i32) -> Self {
        Self { step, code }
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: esp_err 0x{:x}", self.step, self.code)
    }
}

impl std::error::Error for BootstrapError {}
