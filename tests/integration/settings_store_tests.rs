//! NVS bring-up: single erase-and-retry, everything else fatal.

use eduroam_station::app::ports::FlashInitError;
use eduroam_station::app::settings_store::bring_up_settings_store;
use eduroam_station::error::{Error, StoreError};

use crate::mock_hw::{FlashCall, ScriptedFlash};

#[test]
fn healthy_partition_initialises_once() {
    let mut flash = ScriptedFlash::new([Ok(())]);
    assert_eq!(bring_up_settings_store(&mut flash), Ok(()));
    assert_eq!(flash.calls, vec![FlashCall::Init]);
}

#[test]
fn no_free_pages_erases_then_reinitialises() {
    let mut flash = ScriptedFlash::new([Err(FlashInitError::NoFreePages), Ok(())]);
    assert_eq!(bring_up_settings_store(&mut flash), Ok(()));
    assert_eq!(
        flash.calls,
        vec![FlashCall::Init, FlashCall::Erase, FlashCall::Init]
    );
}

#[test]
fn second_failure_after_erase_is_fatal() {
    let mut flash = ScriptedFlash::new([
        Err(FlashInitError::NoFreePages),
        Err(FlashInitError::NoFreePages),
    ]);
    assert_eq!(
        bring_up_settings_store(&mut flash),
        Err(StoreError::RetryFailed(0x110d))
    );
    // Exactly one erase, exactly one re-init, no third attempt.
    assert_eq!(flash.count(FlashCall::Erase), 1);
    assert_eq!(flash.count(FlashCall::Init), 2);
}

#[test]
fn new_version_is_recovered_like_full_partition() {
    let mut flash = ScriptedFlash::new([Err(FlashInitError::NewVersionFound), Ok(())]);
    assert_eq!(bring_up_settings_store(&mut flash), Ok(()));
    assert_eq!(flash.count(FlashCall::Erase), 1);
}

#[test]
fn unrelated_error_is_fatal_immediately() {
    let mut flash = ScriptedFlash::new([Err(FlashInitError::Other(0x105))]);
    let err = bring_up_settings_store(&mut flash).unwrap_err();
    assert_eq!(err, StoreError::InitFailed(0x105));
    assert_eq!(flash.calls, vec![FlashCall::Init]);
    assert!(Error::from(err).to_string().contains("0x105"));
}

#[test]
fn erase_failure_is_fatal() {
    let mut flash = ScriptedFlash::new([Err(FlashInitError::NewVersionFound)]).failing_erase(0x3);
    assert_eq!(
        bring_up_settings_store(&mut flash),
        Err(StoreError::EraseFailed(0x3))
    );
    assert_eq!(flash.calls, vec![FlashCall::Init, FlashCall::Erase]);
}
