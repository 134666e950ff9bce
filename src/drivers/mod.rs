//! Peripheral bring-up and the status LED driver.

pub mod hw_init;
pub mod status_led;
