//! Station bootstrap: the eight ordered bring-up steps.
//!
//! Each step is fatal on error: the first failure is returned as a
//! [`BootstrapError`] naming the step, and nothing after it runs. There is
//! no rollback of earlier steps.

use log::info;

use crate::config::StationConfig;
use crate::error::{BootStep, BootstrapError};

use super::ports::{StationEventHandler, StationStack};

pub fn bootstrap_station(
    stack: &mut impl StationStack,
    station: &StationConfig,
    handler: Box<dyn StationEventHandler + Send>,
) -> Result<(), BootstrapError> {
    step(BootStep::NetworkRuntime, stack.init_network_runtime())?;
    step(BootStep::StationInterface, stack.create_station_interface())?;
    step(BootStep::RadioInit, stack.init_radio())?;
    step(BootStep::EventSubscription, stack.subscribe(handler))?;
    step(BootStep::StationConfig, stack.configure_station(station.ssid()))?;
    step(
        BootStep::EnterpriseCredentials,
        stack.set_enterprise_credentials(
            station.identity(),
            station.username(),
            station.password(),
        ),
    )?;
    step(BootStep::EnterpriseEnable, stack.enable_enterprise())?;
    step(BootStep::RadioStart, stack.start_radio())?;

    info!("Station bootstrap complete, waiting for '{}'", station.ssid());
    Ok(())
}

fn step(step: BootStep, result: Result<(), i32>) -> Result<(), BootstrapError> {
    match result {
        Ok(()) => {
            info!("bootstrap: {} ok", step);
            Ok(())
        }
        Err(code) => {
            log::error!("bootstrap: {} failed (rc=0x{:x})", step, code);
            Err(BootstrapError::new(step, code))
        }
    }
}
