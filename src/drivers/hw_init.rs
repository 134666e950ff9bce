//! One-shot peripheral initialisation: UART console and status output pin.
//!
//! Uses raw ESP-IDF sys calls. Called once from `main()` before the
//! network stack comes up. Any failure here aborts startup.

#[cfg(target_os = "espidf")]
use esp_idf_sys::*;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use log::info;

use crate::config::SerialConfig;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    UartConfigFailed(i32),
    UartInstallFailed(i32),
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UartConfigFailed(rc) => write!(f, "UART param config failed (rc={})", rc),
            Self::UartInstallFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

// ── UART console ──────────────────────────────────────────────

/// Configure the console UART as 8N1, no hardware flow control, and
/// install the driver with an RX ring buffer only.
#[cfg(target_os = "espidf")]
pub fn init_serial_console(cfg: &SerialConfig) -> Result<(), HwInitError> {
    let uart_cfg = uart_config_t {
        baud_rate: cfg.baud_rate as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };

    // SAFETY: called once from the main task before any other UART user
    // is created; `uart_cfg` outlives the call.
    let ret = unsafe { uart_param_config(cfg.port, &uart_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::UartConfigFailed(ret));
    }

    // No TX buffer (writes block on the FIFO), no event queue.
    let ret = unsafe {
        uart_driver_install(
            cfg.port,
            cfg.rx_buffer_len as i32,
            0,
            0,
            core::ptr::null_mut(),
            0,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::UartInstallFailed(ret));
    }

    info!("hw_init: UART{} at {} baud, 8N1", cfg.port, cfg.baud_rate);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_serial_console(cfg: &SerialConfig) -> Result<(), HwInitError> {
    info!("hw_init(sim): UART{} at {} baud, 8N1", cfg.port, cfg.baud_rate);
    Ok(())
}

// ── Status output pin ─────────────────────────────────────────

/// Reset `gpio`, make it a push-pull output and drive it low.
#[cfg(target_os = "espidf")]
pub fn init_status_output(gpio: i32) -> Result<GpioOutput, HwInitError> {
    // SAFETY: single-threaded init path; the pin is not shared with any
    // other driver.
    unsafe {
        let ret = gpio_reset_pin(gpio);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        let ret = gpio_set_direction(gpio, gpio_mode_t_GPIO_MODE_OUTPUT);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        let ret = gpio_set_level(gpio, 0);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }
    info!("hw_init: GPIO{} output, low", gpio);
    Ok(GpioOutput { pin: gpio, high: false })
}

#[cfg(not(target_os = "espidf"))]
pub fn init_status_output(gpio: i32) -> Result<GpioOutput, HwInitError> {
    info!("hw_init(sim): GPIO{} output, low", gpio);
    Ok(GpioOutput { pin: gpio, high: false })
}

/// A configured digital output.
///
/// Implements [`OutputPin`] so drivers stay generic over the pin type.
/// On the host the level is only tracked in memory.
#[derive(Debug)]
pub struct GpioOutput {
    pin: i32,
    high: bool,
}

impl GpioOutput {
    pub fn pin(&self) -> i32 {
        self.pin
    }

    /// Last level successfully written.
    pub fn is_high(&self) -> bool {
        self.high
    }

    #[cfg(target_os = "espidf")]
    fn write(&mut self, high: bool) -> Result<(), GpioError> {
        // SAFETY: the pin was configured as an output in
        // init_status_output(); only its owner writes it.
        let ret = unsafe { gpio_set_level(self.pin, u32::from(high)) };
        if ret != ESP_OK as i32 {
            return Err(GpioError(ret));
        }
        self.high = high;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn write(&mut self, high: bool) -> Result<(), GpioError> {
        self.high = high;
        Ok(())
    }
}

/// `gpio_set_level` returned a non-OK code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError(pub i32);

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for GpioOutput {
    type Error = GpioError;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}
