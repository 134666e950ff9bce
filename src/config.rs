//! Device configuration.
//!
//! Everything is fixed at build time. The network name and EAP
//! credentials default to the values below and can be overridden with
//! `EDUROAM_SSID`, `EDUROAM_IDENTITY`, `EDUROAM_USERNAME` and
//! `EDUROAM_PASSWORD` in the build environment.
//!
//! [`DeviceConfig::compiled_in`] validates the constants once at startup;
//! the resulting value is passed by reference to every bring-up phase.

use core::fmt;

use crate::error::ConfigError;
use crate::pins;

const fn env_or(value: Option<&'static str>, default: &'static str) -> &'static str {
    match value {
        Some(v) => v,
        None => default,
    }
}

pub const NETWORK_NAME: &str = env_or(option_env!("EDUROAM_SSID"), "eduroam");
pub const EAP_IDENTITY: &str = env_or(option_env!("EDUROAM_IDENTITY"), "user@example.org");
pub const EAP_USERNAME: &str = env_or(option_env!("EDUROAM_USERNAME"), "user@example.org");
pub const EAP_PASSWORD: &str = env_or(option_env!("EDUROAM_PASSWORD"), PLACEHOLDER_PASSWORD);

const PLACEHOLDER_PASSWORD: &str = "changeme";

/// 802.11 SSID limit.
pub const MAX_SSID_LEN: usize = 32;
/// Upper bound accepted for identity, username and password.
pub const MAX_CREDENTIAL_LEN: usize = 128;

pub type NetworkName = heapless::String<MAX_SSID_LEN>;
pub type Credential = heapless::String<MAX_CREDENTIAL_LEN>;

// ───────────────────────────────────────────────────────────────
// Station (network + PEAP credentials)
// ───────────────────────────────────────────────────────────────

/// Target network and enterprise credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct StationConfig {
    ssid: NetworkName,
    identity: Credential,
    username: Credential,
    password: Credential,
}

impl StationConfig {
    pub fn new(
        ssid: &str,
        identity: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, ConfigError> {
        if ssid.is_empty() {
            return Err(ConfigError::InvalidSsid);
        }
        let mut name = NetworkName::new();
        name.push_str(ssid).map_err(|_| ConfigError::InvalidSsid)?;

        Ok(Self {
            ssid: name,
            identity: credential("identity", identity)?,
            username: credential("username", username)?,
            password: credential("password", password)?,
        })
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn network_name(&self) -> &NetworkName {
        &self.ssid
    }

    pub fn identity(&self) -> &[u8] {
        self.identity.as_bytes()
    }

    pub fn username(&self) -> &[u8] {
        self.username.as_bytes()
    }

    pub fn password(&self) -> &[u8] {
        self.password.as_bytes()
    }

    /// True while the build still carries the default password.
    pub fn uses_placeholder_password(&self) -> bool {
        self.password.as_str() == PLACEHOLDER_PASSWORD
    }
}

fn credential(field: &'static str, value: &str) -> Result<Credential, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidCredential(field));
    }
    let mut out = Credential::new();
    out.push_str(value)
        .map_err(|_| ConfigError::InvalidCredential(field))?;
    Ok(out)
}

impl fmt::Debug for StationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StationConfig")
            .field("ssid", &self.ssid)
            .field("identity", &self.identity)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ───────────────────────────────────────────────────────────────
// Serial console
// ───────────────────────────────────────────────────────────────

/// UART console parameters. Framing is always 8N1 without hardware
/// flow control; only the fields below vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    pub port: i32,
    pub baud_rate: u32,
    pub rx_buffer_len: usize,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: pins::CONSOLE_UART_PORT,
            baud_rate: pins::CONSOLE_BAUD_RATE,
            rx_buffer_len: pins::CONSOLE_RX_BUFFER_LEN,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Whole device
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub station: StationConfig,
    pub serial: SerialConfig,
    pub status_led_gpio: i32,
}

impl DeviceConfig {
    /// Build the configuration from the compiled-in constants.
    pub fn compiled_in() -> Result<Self, ConfigError> {
        Ok(Self {
            station: StationConfig::new(NETWORK_NAME, EAP_IDENTITY, EAP_USERNAME, EAP_PASSWORD)?,
            serial: SerialConfig::default(),
            status_led_gpio: pins::STATUS_LED_GPIO,
        })
    }
}
