//! Single-colour status LED.
//!
//! Generic over any [`OutputPin`]: on target this is the raw
//! [`GpioOutput`](super::hw_init::GpioOutput), in tests a recording pin.
//! Write failures are logged and otherwise ignored.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::events::LedState;
use crate::app::ports::StatusLedPort;

pub struct StatusLed<P> {
    pin: P,
    state: LedState,
}

impl<P: OutputPin> StatusLed<P> {
    /// Wrap a pin that bring-up already drove low.
    pub fn new(pin: P) -> Self {
        Self { pin, state: LedState::Off }
    }

    pub fn state(&self) -> LedState {
        self.state
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> StatusLedPort for StatusLed<P> {
    fn set(&mut self, state: LedState) {
        let result = match state {
            LedState::On => self.pin.set_high(),
            LedState::Off => self.pin.set_low(),
        };
        if let Err(e) = result {
            warn!("StatusLed: pin write failed ({:?})", e);
        }
        self.state = state;
    }
}
