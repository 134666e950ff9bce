//! eduroam-station: main entry point
//!
//! One-shot bring-up followed by event-driven supervision.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  main task (once)                                            │
//! │    config → NVS → UART → status LED → station bootstrap      │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  event-loop task (forever)                                   │
//! │    WIFI_EVENT / IP_EVENT ─▶ trampoline ─▶ ConnectionSupervisor│
//! │                               ├─▶ esp_wifi_connect           │
//! │                               └─▶ status LED                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! On the host the same sequence runs against simulation backends, then a
//! short notification script is replayed through the supervisor.
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use eduroam_station::adapters::nvs::NvsFlash;
use eduroam_station::adapters::wifi::{StationRadio, WifiStationAdapter};
use eduroam_station::app::bootstrap::bootstrap_station;
use eduroam_station::app::settings_store::bring_up_settings_store;
use eduroam_station::app::supervisor::ConnectionSupervisor;
use eduroam_station::config::DeviceConfig;
use eduroam_station::drivers::hw_init;
use eduroam_station::drivers::status_led::StatusLed;
use eduroam_station::error::Error;

fn main() -> Result<()> {
    // ── 1. Runtime + logging ──────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("eduroam-station v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = DeviceConfig::compiled_in().map_err(Error::from)?;
    info!("Target network: {:?}", config.station);
    if config.station.uses_placeholder_password() {
        warn!("Built with the placeholder EAP password; set EDUROAM_PASSWORD at build time");
    }

    // ── 3. Settings store (NVS) ───────────────────────────────
    let mut flash = NvsFlash::new();
    bring_up_settings_store(&mut flash).map_err(Error::from)?;

    // ── 4. Peripherals ────────────────────────────────────────
    info!("Initialising UART");
    hw_init::init_serial_console(&config.serial).map_err(Error::from)?;

    info!("Initialising status LED");
    let pin = hw_init::init_status_output(config.status_led_gpio).map_err(Error::from)?;
    let led = StatusLed::new(pin);

    // ── 5. Station bootstrap ──────────────────────────────────
    info!("Initialising Wi-Fi station");
    let supervisor = ConnectionSupervisor::new(StationRadio::new(), led, &config.station);
    let mut wifi = station_adapter()?;
    bootstrap_station(&mut wifi, &config.station, Box::new(supervisor)).map_err(Error::from)?;

    run(wifi)
}

#[cfg(target_os = "espidf")]
fn station_adapter() -> Result<WifiStationAdapter> {
    let peripherals = esp_idf_hal::peripherals::Peripherals::take()?;
    let nvs = esp_idf_svc::nvs::EspDefaultNvsPartition::take()?;
    Ok(WifiStationAdapter::new(peripherals.modem, nvs))
}

#[cfg(not(target_os = "espidf"))]
fn station_adapter() -> Result<WifiStationAdapter> {
    Ok(WifiStationAdapter::new())
}

/// Everything from here on happens in event-loop callbacks; the main task
/// only keeps the Wi-Fi driver alive.
#[cfg(target_os = "espidf")]
fn run(wifi: WifiStationAdapter) -> Result<()> {
    info!("Bring-up complete, supervisor running on the event loop");
    let _wifi = wifi;
    loop {
        std::thread::park();
    }
}

#[cfg(not(target_os = "espidf"))]
fn run(mut wifi: WifiStationAdapter) -> Result<()> {
    use eduroam_station::adapters::wifi::{
        EventSource, IP_EVENT_STA_GOT_IP, WIFI_EVENT_STA_DISCONNECTED, WIFI_EVENT_STA_START,
    };

    let lease = u32::from_le_bytes([192, 168, 1, 42]);
    let script = [
        (EventSource::Wifi, WIFI_EVENT_STA_START, None),
        (EventSource::Ip, IP_EVENT_STA_GOT_IP, Some(lease)),
        (EventSource::Wifi, WIFI_EVENT_STA_DISCONNECTED, None),
        (EventSource::Ip, IP_EVENT_STA_GOT_IP, Some(lease)),
    ];
    for (source, id, ipv4) in script {
        wifi.deliver_raw(source, id, ipv4);
    }

    info!("Simulation finished after {} bootstrap steps", wifi.completed_steps().len());
    Ok(())
}
