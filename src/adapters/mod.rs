//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter | Implements                | Connects to                     |
//! |---------|---------------------------|---------------------------------|
//! | `nvs`   | FlashStorePort            | NVS flash / scripted simulation |
//! | `wifi`  | StationStack              | esp_netif + esp_wifi + EAP      |
//! |         | RadioPort (StationRadio)  | `esp_wifi_connect`              |

pub mod nvs;
pub mod wifi;
