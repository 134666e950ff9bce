//! WiFi station adapter.
//!
//! Implements [`StationStack`] (the eight bootstrap operations) and
//! [`RadioPort`] (connect requests from the supervisor), and translates raw
//! ESP-IDF events into [`StationEvent`]s.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_netif`, `esp_wifi`, `esp_eap_client`
//!   and the default event loop, via `esp-idf-sys`. The Wi-Fi driver itself
//!   is created through `esp_idf_svc::wifi::WifiDriver`, which builds the
//!   default init config from sdkconfig.
//! - **all other targets**: simulation that records the bootstrap steps and
//!   lets the caller inject events into the subscribed handler.
//!
//! ## Event routing
//!
//! The subscribed handler is boxed, leaked, and handed to ESP-IDF as the
//! registration argument of [`station_event_trampoline`]. It lives for the
//! rest of the process and is only touched from the event-loop task.

use core::net::Ipv4Addr;

use log::{info, warn};

use crate::app::events::StationEvent;
use crate::app::ports::{RadioPort, StationEventHandler, StationStack};

#[cfg(not(target_os = "espidf"))]
use crate::error::BootStep;

#[cfg(target_os = "espidf")]
use esp_idf_hal::modem::Modem;
#[cfg(target_os = "espidf")]
use esp_idf_svc::eventloop::EspSystemEventLoop;
#[cfg(target_os = "espidf")]
use esp_idf_svc::nvs::EspDefaultNvsPartition;
#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::WifiDriver;
#[cfg(target_os = "espidf")]
use esp_idf_sys::*;

// ───────────────────────────────────────────────────────────────
// Raw event decoding
// ───────────────────────────────────────────────────────────────

/// Event base a raw notification was posted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    Wifi,
    Ip,
    Other,
}

// esp_wifi_types.h / esp_netif_types.h
pub const WIFI_EVENT_STA_START: i32 = 2;
pub const WIFI_EVENT_STA_DISCONNECTED: i32 = 5;
pub const IP_EVENT_STA_GOT_IP: i32 = 0;

#[cfg(target_os = "espidf")]
const _: () = {
    assert!(wifi_event_t_WIFI_EVENT_STA_START as i32 == WIFI_EVENT_STA_START);
    assert!(wifi_event_t_WIFI_EVENT_STA_DISCONNECTED as i32 == WIFI_EVENT_STA_DISCONNECTED);
    assert!(ip_event_t_IP_EVENT_STA_GOT_IP as i32 == IP_EVENT_STA_GOT_IP);
};

/// Map a raw event to the closed [`StationEvent`] set.
///
/// `ipv4` is the lwIP address word from `ip_event_got_ip_t` (first octet
/// in the low byte). Unknown ids, and a got-IP event without an address,
/// yield `None`.
pub fn decode_station_event(
    source: EventSource,
    id: i32,
    ipv4: Option<u32>,
) -> Option<StationEvent> {
    match (source, id) {
        (EventSource::Wifi, WIFI_EVENT_STA_START) => Some(StationEvent::Started),
        (EventSource::Wifi, WIFI_EVENT_STA_DISCONNECTED) => Some(StationEvent::Disconnected),
        (EventSource::Ip, IP_EVENT_STA_GOT_IP) => {
            ipv4.map(|addr| StationEvent::AddressAcquired(Ipv4Addr::from(addr.to_le_bytes())))
        }
        _ => None,
    }
}

/// C entry point registered with the default event loop.
///
/// # Safety
///
/// `arg` must be the pointer produced in [`WifiStationAdapter::subscribe`]
/// and `data` must match the event id as documented by ESP-IDF.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn station_event_trampoline(
    arg: *mut core::ffi::c_void,
    base: esp_event_base_t,
    id: i32,
    data: *mut core::ffi::c_void,
) {
    // SAFETY: WIFI_EVENT / IP_EVENT are immutable statics set at link time.
    let source = if base == unsafe { WIFI_EVENT } {
        EventSource::Wifi
    } else if base == unsafe { IP_EVENT } {
        EventSource::Ip
    } else {
        EventSource::Other
    };

    let ipv4 = if source == EventSource::Ip && id == IP_EVENT_STA_GOT_IP && !data.is_null() {
        // SAFETY: IP_EVENT_STA_GOT_IP always carries an ip_event_got_ip_t.
        Some(unsafe { (*data.cast::<ip_event_got_ip_t>()).ip_info.ip.addr })
    } else {
        None
    };

    if let Some(event) = decode_station_event(source, id, ipv4) {
        // SAFETY: arg is the leaked handler box; the event loop task is the
        // only caller, so no aliasing &mut exists.
        let handler = unsafe { &mut *arg.cast::<Box<dyn StationEventHandler + Send>>() };
        handler.on_event(event);
    }
}

#[cfg(target_os = "espidf")]
fn esp_code(ret: esp_err_t) -> Result<(), i32> {
    if ret == ESP_OK as esp_err_t { Ok(()) } else { Err(ret) }
}

// ───────────────────────────────────────────────────────────────
// Radio port
// ───────────────────────────────────────────────────────────────

/// Connect-request side of the Wi-Fi driver, owned by the supervisor.
#[derive(Debug, Default)]
pub struct StationRadio {
    #[cfg(not(target_os = "espidf"))]
    requests: u32,
}

impl StationRadio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulation: connect requests issued so far.
    #[cfg(not(target_os = "espidf"))]
    pub fn requests(&self) -> u32 {
        self.requests
    }
}

impl RadioPort for StationRadio {
    #[cfg(target_os = "espidf")]
    fn request_connect(&mut self) {
        // SAFETY: the driver is started before STA_START is delivered, and
        // esp_wifi_connect only posts a request to the Wi-Fi task.
        let ret = unsafe { esp_wifi_connect() };
        if ret != ESP_OK as esp_err_t {
            warn!("WiFi: esp_wifi_connect returned 0x{:x}", ret);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn request_connect(&mut self) {
        self.requests += 1;
        info!("WiFi(sim): connect request #{}", self.requests);
    }
}

// ───────────────────────────────────────────────────────────────
// Station stack adapter
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct WifiStationAdapter {
    modem: Option<Modem>,
    nvs: Option<EspDefaultNvsPartition>,
    sysloop: Option<EspSystemEventLoop>,
    /// Kept alive for the life of the process; dropping it deinits Wi-Fi.
    driver: Option<WifiDriver<'static>>,
    sta_netif: *mut esp_netif_t,
}

#[cfg(target_os = "espidf")]
impl WifiStationAdapter {
    pub fn new(modem: Modem, nvs: EspDefaultNvsPartition) -> Self {
        Self {
            modem: Some(modem),
            nvs: Some(nvs),
            sysloop: None,
            driver: None,
            sta_netif: core::ptr::null_mut(),
        }
    }
}

#[cfg(target_os = "espidf")]
impl StationStack for WifiStationAdapter {
    fn init_network_runtime(&mut self) -> Result<(), i32> {
        // SAFETY: esp_netif_init is idempotent and called from the main task.
        esp_code(unsafe { esp_netif_init() })?;
        let sysloop = EspSystemEventLoop::take().map_err(|e| e.code())?;
        self.sysloop = Some(sysloop);
        Ok(())
    }

    fn create_station_interface(&mut self) -> Result<(), i32> {
        // SAFETY: requires esp_netif_init and the default loop (step 1).
        let netif = unsafe { esp_netif_create_default_wifi_sta() };
        if netif.is_null() {
            return Err(ESP_FAIL);
        }
        self.sta_netif = netif;
        Ok(())
    }

    fn init_radio(&mut self) -> Result<(), i32> {
        let modem = self.modem.take().ok_or(ESP_ERR_INVALID_STATE as i32)?;
        let sysloop = self.sysloop.clone().ok_or(ESP_ERR_INVALID_STATE as i32)?;
        let driver = WifiDriver::new(modem, sysloop, self.nvs.take()).map_err(|e| e.code())?;
        self.driver = Some(driver);
        Ok(())
    }

    fn subscribe(&mut self, handler: Box<dyn StationEventHandler + Send>) -> Result<(), i32> {
        // Leaked: the handler must outlive every future event.
        let arg = Box::into_raw(Box::new(handler)).cast::<core::ffi::c_void>();
        // SAFETY: the default loop exists (step 1); the trampoline and arg
        // are valid for 'static.
        unsafe {
            esp_code(esp_event_handler_register(
                WIFI_EVENT,
                ESP_EVENT_ANY_ID,
                Some(station_event_trampoline),
                arg,
            ))?;
            esp_code(esp_event_handler_register(
                IP_EVENT,
                IP_EVENT_STA_GOT_IP,
                Some(station_event_trampoline),
                arg,
            ))?;
        }
        Ok(())
    }

    fn configure_station(&mut self, ssid: &str) -> Result<(), i32> {
        let ssid = ssid.as_bytes();
        // SAFETY: wifi_config_t is a plain C union; all-zero is its
        // documented empty value (no password, open threshold).
        let mut cfg: wifi_config_t = unsafe { core::mem::zeroed() };
        unsafe {
            if ssid.len() > cfg.sta.ssid.len() {
                return Err(ESP_ERR_INVALID_ARG as i32);
            }
            cfg.sta.ssid[..ssid.len()].copy_from_slice(ssid);
            esp_code(esp_wifi_set_mode(wifi_mode_t_WIFI_MODE_STA))?;
            esp_code(esp_wifi_set_config(wifi_interface_t_WIFI_IF_STA, &mut cfg))?;
        }
        Ok(())
    }

    fn set_enterprise_credentials(
        &mut self,
        identity: &[u8],
        username: &[u8],
        password: &[u8],
    ) -> Result<(), i32> {
        // SAFETY: the supplicant copies each buffer; lengths are explicit so
        // no NUL terminator is required.
        unsafe {
            esp_code(esp_eap_client_set_identity(identity.as_ptr(), identity.len() as i32))?;
            esp_code(esp_eap_client_set_username(username.as_ptr(), username.len() as i32))?;
            esp_code(esp_eap_client_set_password(password.as_ptr(), password.len() as i32))?;
        }
        Ok(())
    }

    fn enable_enterprise(&mut self) -> Result<(), i32> {
        // SAFETY: Wi-Fi driver initialised in step 3.
        esp_code(unsafe { esp_wifi_sta_enterprise_enable() })
    }

    fn start_radio(&mut self) -> Result<(), i32> {
        // SAFETY: as above. STA_START follows asynchronously.
        esp_code(unsafe { esp_wifi_start() })?;
        info!("WiFi: radio started");
        Ok(())
    }
}

/// Simulation backend: records each bootstrap step and holds the
/// subscribed handler so events can be injected with [`deliver`](Self::deliver).
#[cfg(not(target_os = "espidf"))]
#[derive(Default)]
pub struct WifiStationAdapter {
    steps: Vec<BootStep>,
    handler: Option<Box<dyn StationEventHandler + Send>>,
    ssid: String,
    credential_lens: Option<(usize, usize, usize)>,
}

#[cfg(not(target_os = "espidf"))]
impl WifiStationAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps completed so far, in call order.
    pub fn completed_steps(&self) -> &[BootStep] {
        &self.steps
    }

    pub fn configured_ssid(&self) -> &str {
        &self.ssid
    }

    /// Byte lengths of identity, username and password as installed.
    pub fn credential_lens(&self) -> Option<(usize, usize, usize)> {
        self.credential_lens
    }

    /// Feed a raw event through the same decoding path as the target.
    /// Returns `false` when nothing was delivered.
    pub fn deliver_raw(&mut self, source: EventSource, id: i32, ipv4: Option<u32>) -> bool {
        match decode_station_event(source, id, ipv4) {
            Some(event) => self.deliver(event),
            None => false,
        }
    }

    /// Hand `event` to the subscribed handler. Returns `false` before
    /// subscription.
    pub fn deliver(&mut self, event: StationEvent) -> bool {
        match self.handler.as_mut() {
            Some(h) => {
                h.on_event(event);
                true
            }
            None => {
                warn!("WiFi(sim): {:?} dropped, no subscriber", event);
                false
            }
        }
    }

    fn record(&mut self, step: BootStep) -> Result<(), i32> {
        info!("WiFi(sim): {}", step);
        self.steps.push(step);
        Ok(())
    }
}

#[cfg(not(target_os = "espidf"))]
impl StationStack for WifiStationAdapter {
    fn init_network_runtime(&mut self) -> Result<(), i32> {
        self.record(BootStep::NetworkRuntime)
    }

    fn create_station_interface(&mut self) -> Result<(), i32> {
        self.record(BootStep::StationInterface)
    }

    fn init_radio(&mut self) -> Result<(), i32> {
        self.record(BootStep::RadioInit)
    }

    fn subscribe(&mut self, handler: Box<dyn StationEventHandler + Send>) -> Result<(), i32> {
        self.handler = Some(handler);
        self.record(BootStep::EventSubscription)
    }

    fn configure_station(&mut self, ssid: &str) -> Result<(), i32> {
        self.ssid = ssid.to_owned();
        self.record(BootStep::StationConfig)
    }

    fn set_enterprise_credentials(
        &mut self,
        identity: &[u8],
        username: &[u8],
        password: &[u8],
    ) -> Result<(), i32> {
        self.credential_lens = Some((identity.len(), username.len(), password.len()));
        self.record(BootStep::EnterpriseCredentials)
    }

    fn enable_enterprise(&mut self) -> Result<(), i32> {
        self.record(BootStep::EnterpriseEnable)
    }

    fn start_radio(&mut self) -> Result<(), i32> {
        self.record(BootStep::RadioStart)
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
