//! NVS bring-up with a single erase-and-retry.
//!
//! The Wi-Fi driver caches calibration and association data in NVS, so
//! the partition must be usable before the radio is initialised. A
//! partition that is full or written by a newer NVS format is erased
//! once and re-initialised once; every other outcome is fatal.

use log::{info, warn};

use crate::error::StoreError;

use super::ports::FlashStorePort;

pub fn bring_up_settings_store(flash: &mut impl FlashStorePort) -> Result<(), StoreError> {
    match flash.init() {
        Ok(()) => {
            info!("NVS: initialised");
            Ok(())
        }
        Err(e) if e.is_recoverable_by_erase() => {
            warn!("NVS: {:?} (rc=0x{:x}), erasing partition", e, e.code());
            flash.erase().map_err(StoreError::EraseFailed)?;
            flash
                .init()
                .map_err(|e| StoreError::RetryFailed(e.code()))?;
            info!("NVS: initialised after erase");
            Ok(())
        }
        Err(e) => Err(StoreError::InitFailed(e.code())),
    }
}
