//! Recording mocks for integration tests.
//!
//! Every port call is recorded so tests can assert on the full history
//! without touching real GPIO, NVS or radio registers. Radio and LED
//! mocks share their records through `Arc` so a test can still inspect
//! them after the supervisor has been boxed and handed to a stack.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use eduroam_station::app::events::{LedState, StationEvent};
use eduroam_station::app::ports::{
    FlashInitError, FlashStorePort, RadioPort, StationEventHandler, StationStack, StatusLedPort,
};
use eduroam_station::app::supervisor::ConnectionSupervisor;
use eduroam_station::config::StationConfig;
use eduroam_station::error::BootStep;

// ── Radio ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockRadio {
    requests: Arc<AtomicU32>,
}

impl MockRadio {
    pub fn requests(&self) -> u32 {
        self.requests.load(Ordering::SeqCst)
    }
}

impl RadioPort for MockRadio {
    fn request_connect(&mut self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

// ── Status LED ────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockLed {
    writes: Arc<Mutex<Vec<LedState>>>,
}

#[allow(dead_code)]
impl MockLed {
    pub fn writes(&self) -> Vec<LedState> {
        self.writes.lock().unwrap().clone()
    }

    /// Physical level: last write, or the bring-up level (off).
    pub fn level(&self) -> LedState {
        self.writes.lock().unwrap().last().copied().unwrap_or(LedState::Off)
    }
}

impl StatusLedPort for MockLed {
    fn set(&mut self, state: LedState) {
        self.writes.lock().unwrap().push(state);
    }
}

pub fn station() -> StationConfig {
    StationConfig::new("eduroam", "alice@uni.example", "alice@uni.example", "contraseña").unwrap()
}

/// Supervisor wired to fresh mocks, plus handles onto those mocks.
pub fn supervisor() -> (ConnectionSupervisor<MockRadio, MockLed>, MockRadio, MockLed) {
    let radio = MockRadio::default();
    let led = MockLed::default();
    let s = ConnectionSupervisor::new(radio.clone(), led.clone(), &station());
    (s, radio, led)
}

// ── Flash ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashCall {
    Init,
    Erase,
}

pub struct ScriptedFlash {
    inits: VecDeque<Result<(), FlashInitError>>,
    erase: Result<(), i32>,
    pub calls: Vec<FlashCall>,
}

impl ScriptedFlash {
    pub fn new(inits: impl IntoIterator<Item = Result<(), FlashInitError>>) -> Self {
        Self {
            inits: inits.into_iter().collect(),
            erase: Ok(()),
            calls: Vec::new(),
        }
    }

    pub fn failing_erase(mut self, rc: i32) -> Self {
        self.erase = Err(rc);
        self
    }

    pub fn count(&self, call: FlashCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl FlashStorePort for ScriptedFlash {
    fn init(&mut self) -> Result<(), FlashInitError> {
        self.calls.push(FlashCall::Init);
        self.inits
            .pop_front()
            .expect("init called more often than scripted")
    }

    fn erase(&mut self) -> Result<(), i32> {
        self.calls.push(FlashCall::Erase);
        self.erase
    }
}

// ── Station stack ─────────────────────────────────────────────

#[derive(Default)]
pub struct MockStack {
    pub calls: Vec<BootStep>,
    pub ssid: Option<String>,
    pub credentials: Option<(Vec<u8>, Vec<u8>, Vec<u8>)>,
    fail: Option<(BootStep, i32)>,
    handler: Option<Box<dyn StationEventHandler + Send>>,
}

#[allow(dead_code)]
impl MockStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(step: BootStep, code: i32) -> Self {
        Self {
            fail: Some((step, code)),
            ..Self::default()
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.handler.is_some()
    }

    pub fn deliver(&mut self, event: StationEvent) {
        self.handler
            .as_mut()
            .expect("no handler subscribed")
            .on_event(event);
    }

    fn call(&mut self, step: BootStep) -> Result<(), i32> {
        self.calls.push(step);
        match self.fail {
            Some((s, code)) if s == step => Err(code),
            _ => Ok(()),
        }
    }
}

impl StationStack for MockStack {
    fn init_network_runtime(&mut self) -> Result<(), i32> {
        self.call(BootStep::NetworkRuntime)
    }

    fn create_station_interface(&mut self) -> Result<(), i32> {
        self.call(BootStep::StationInterface)
    }

    fn init_radio(&mut self) -> Result<(), i32> {
        self.call(BootStep::RadioInit)
    }

    fn subscribe(&mut self, handler: Box<dyn StationEventHandler + Send>) -> Result<(), i32> {
        self.call(BootStep::EventSubscription)?;
        self.handler = Some(handler);
        Ok(())
    }

    fn configure_station(&mut self, ssid: &str) -> Result<(), i32> {
        self.ssid = Some(ssid.to_owned());
        self.call(BootStep::StationConfig)
    }

    fn set_enterprise_credentials(
        &mut self,
        identity: &[u8],
        username: &[u8],
        password: &[u8],
    ) -> Result<(), i32> {
        self.credentials = Some((identity.to_vec(), username.to_vec(), password.to_vec()));
        self.call(BootStep::EnterpriseCredentials)
    }

    fn enable_enterprise(&mut self) -> Result<(), i32> {
        self.call(BootStep::EnterpriseEnable)
    }

    fn start_radio(&mut self) -> Result<(), i32> {
        self.call(BootStep::RadioStart)
    }
}
