//! NVS (Non-Volatile Storage) flash adapter.
//!
//! Implements [`FlashStorePort`] over the default NVS partition. The
//! firmware never reads or writes keys itself; the partition exists for
//! the Wi-Fi driver's calibration and association cache.
//!
//! - **`target_os = "espidf"`**: `nvs_flash_init` / `nvs_flash_erase`.
//! - **all other targets**: in-memory simulation whose init results can be
//!   scripted to exercise the erase-and-retry path.

use crate::app::ports::{FlashInitError, FlashStorePort};

#[cfg(target_os = "espidf")]
use esp_idf_sys::{ESP_OK, esp_err_t, nvs_flash_erase, nvs_flash_init};

#[cfg(not(target_os = "espidf"))]
use std::collections::VecDeque;

pub struct NvsFlash {
    #[cfg(not(target_os = "espidf"))]
    scripted_inits: VecDeque<Result<(), FlashInitError>>,
    #[cfg(not(target_os = "espidf"))]
    erase_count: u32,
}

impl NvsFlash {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            scripted_inits: VecDeque::new(),
            #[cfg(not(target_os = "espidf"))]
            erase_count: 0,
        }
    }

    /// Simulation: queue results for upcoming `init()` calls. Once the
    /// queue is empty, init succeeds.
    #[cfg(not(target_os = "espidf"))]
    pub fn with_init_results(
        results: impl IntoIterator<Item = Result<(), FlashInitError>>,
    ) -> Self {
        Self {
            scripted_inits: results.into_iter().collect(),
            erase_count: 0,
        }
    }

    /// Simulation: number of times the partition was erased.
    #[cfg(not(target_os = "espidf"))]
    pub fn erase_count(&self) -> u32 {
        self.erase_count
    }
}

impl Default for NvsFlash {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "espidf")]
impl FlashStorePort for NvsFlash {
    fn init(&mut self) -> Result<(), FlashInitError> {
        // SAFETY: called from the main task before the Wi-Fi driver (the
        // only other NVS user) is initialised.
        let ret: esp_err_t = unsafe { nvs_flash_init() };
        match FlashInitError::from_code(ret) {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }

    fn erase(&mut self) -> Result<(), i32> {
        // SAFETY: as above; the partition is not mounted by anyone else.
        let ret: esp_err_t = unsafe { nvs_flash_erase() };
        if ret != ESP_OK as esp_err_t {
            return Err(ret);
        }
        Ok(())
    }
}

#[cfg(not(target_os = "espidf"))]
impl FlashStorePort for NvsFlash {
    fn init(&mut self) -> Result<(), FlashInitError> {
        let result = self.scripted_inits.pop_front().unwrap_or(Ok(()));
        log::info!("NvsFlash(sim): init -> {:?}", result);
        result
    }

    fn erase(&mut self) -> Result<(), i32> {
        self.erase_count += 1;
        log::info!("NvsFlash(sim): erased");
        Ok(())
    }
}
