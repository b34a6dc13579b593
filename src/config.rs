use core::fmt;

use crate::constants::MQTT_TLS_PORT;
use crate::cstr::{self, ServerName};
use crate::identity::Identity;
use crate::redact::Redacted;
use crate::validate::{self, Field};

pub struct Config {
    // Wi-Fi SSID to connect to
    pub wifi_ssid: &'static str,

    // Wi-Fi pre-shared key (password)
    pub wifi_psk: &'static str,

    // MQTT broker hostname or IP address
    pub mqtt_hostname: &'static str,

    // MQTT port, always 8883 (TLS)
    pub mqtt_port: u16,

    // MQTT username for authentication
    pub mqtt_username: &'static str,

    // MQTT password for authentication
    pub mqtt_password: &'static str,

    // Campus the device is deployed at
    pub campus: &'static str,

    // Course label
    pub course: &'static str,

    // Class label
    pub class: &'static str,

    // Cell (workbench) the device belongs to
    pub cell_id: u8,

    // Device ID, `c<cell_id>-<name>-<name>` (used as MQTT client ID and DHCP hostname)
    pub device_id: &'static str,

    // Fields whose placeholders were left unfilled at build time
    pub unresolved: &'static [Field],
}

impl Config {
    pub const fn identity(&self) -> Identity<'static> {
        Identity {
            campus: self.campus,
            course: self.course,
            class: self.class,
            cell_id: self.cell_id,
            device_id: self.device_id,
        }
    }

    /// Check that the configuration is fit for deployment, logging every problem.
    pub fn validate(&self) -> Result<(), validate::Error> {
        validate::validate(self)
    }

    /// Log the configuration with credentials masked.
    pub fn log_summary(&self) {
        log::info!(
            "Device {} (cell {:02}) at {}/{}/{}",
            self.device_id,
            self.cell_id,
            self.campus,
            self.course,
            self.class
        );
        log::info!("WiFi SSID: {:?}", self.wifi_ssid);
        log::info!(
            "MQTT broker: {}:{} as {}",
            self.mqtt_hostname,
            self.mqtt_port,
            Redacted(self.mqtt_username)
        );
    }

    /// NUL-terminated broker hostname, as TLS stacks want it for SNI.
    pub fn mqtt_server_name(&self) -> Result<ServerName, cstr::Error> {
        ServerName::new(self.mqtt_hostname)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("wifi_ssid", &self.wifi_ssid)
            .field("wifi_psk", &Redacted(self.wifi_psk))
            .field("mqtt_hostname", &self.mqtt_hostname)
            .field("mqtt_port", &self.mqtt_port)
            .field("mqtt_username", &Redacted(self.mqtt_username))
            .field("mqtt_password", &Redacted(self.mqtt_password))
            .field("campus", &self.campus)
            .field("course", &self.course)
            .field("class", &self.class)
            .field("cell_id", &self.cell_id)
            .field("device_id", &self.device_id)
            .field("unresolved", &self.unresolved)
            .finish()
    }
}

// config values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/config.rs"));

const _: () = assert!(
    CONFIG.mqtt_port == MQTT_TLS_PORT,
    "mqtt_port in cfg.toml must be 8883 (MQTT over TLS)"
);
