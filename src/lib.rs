//! Compile-time WiFi, MQTT and identity configuration for a classroom
//! telemetry device.
//!
//! Values come from `cfg.toml`. Credential fields are `{{NAME}}` placeholders
//! that the build script fills from environment variables of the same name,
//! e.g. `SSID_WIFI=lab SENHA_WIFI=... cargo build --features strict`.

#![cfg_attr(not(test), no_std)]
// the generated config.rs holds credentials, keep it out of rendered docs
#![doc(html_no_source)]

pub mod config;
pub mod constants;
pub mod cstr;
pub mod identity;
pub mod redact;
pub mod template;
pub mod validate;

pub use config::{Config, CONFIG};
