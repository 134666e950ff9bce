//! Application core: bring-up orchestration and the connection
//! supervisor, with no direct I/O.
//!
//! All interaction with ESP-IDF happens through the **port traits** in
//! [`ports`], so every module here runs unchanged in host tests.

pub mod bootstrap;
pub mod events;
pub mod ports;
pub mod settings_store;
pub mod supervisor;
