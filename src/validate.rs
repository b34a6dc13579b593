//! Deployment checks for a [`Config`].
//!
//! Errors only ever name the offending field. Values never appear in
//! `Debug`/`Display` output because most of them are credentials.

use core::fmt;

use crate::config::Config;
use crate::constants::{
    MQTT_HOSTNAME_MAX_LEN, MQTT_STRING_MAX_LEN, MQTT_TLS_PORT, WIFI_PSK_MAX_LEN, WIFI_PSK_MIN_LEN,
    WIFI_SSID_MAX_LEN,
};
use crate::identity;

/// Text fields of the configuration, named as they are provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    WifiSsid,
    WifiPsk,
    MqttHost,
    MqttUser,
    MqttPass,
    Campus,
    Course,
    Class,
    DeviceId,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::WifiSsid,
        Field::WifiPsk,
        Field::MqttHost,
        Field::MqttUser,
        Field::MqttPass,
        Field::Campus,
        Field::Course,
        Field::Class,
        Field::DeviceId,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::WifiSsid => "WIFI_SSID",
            Field::WifiPsk => "WIFI_PASS",
            Field::MqttHost => "MQTT_HOST",
            Field::MqttUser => "MQTT_USER",
            Field::MqttPass => "MQTT_PASS",
            Field::Campus => "CAMPUS",
            Field::Course => "CURSO",
            Field::Class => "TURMA",
            Field::DeviceId => "DEV_ID",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Field::WifiPsk | Field::MqttUser | Field::MqttPass)
    }

    pub fn value(self, config: &Config) -> &'static str {
        match self {
            Field::WifiSsid => config.wifi_ssid,
            Field::WifiPsk => config.wifi_psk,
            Field::MqttHost => config.mqtt_hostname,
            Field::MqttUser => config.mqtt_username,
            Field::MqttPass => config.mqtt_password,
            Field::Campus => config.campus,
            Field::Course => config.course,
            Field::Class => config.class,
            Field::DeviceId => config.device_id,
        }
    }

    // (min, max) length in bytes
    fn length_bounds(self) -> Option<(usize, usize)> {
        match self {
            Field::WifiSsid => Some((1, WIFI_SSID_MAX_LEN)),
            Field::WifiPsk => Some((WIFI_PSK_MIN_LEN, WIFI_PSK_MAX_LEN)),
            Field::MqttHost => Some((1, MQTT_HOSTNAME_MAX_LEN)),
            Field::MqttUser | Field::MqttPass => Some((1, MQTT_STRING_MAX_LEN)),
            // identity fields are bounded by the hostname and topic buffers
            Field::Campus | Field::Course | Field::Class | Field::DeviceId => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Empty(Field),
    UnresolvedPlaceholder(Field),
    InvalidLength { field: Field, min: usize, max: usize },
    InvalidPort(u16),
    Identity(identity::Error),
}

impl From<identity::Error> for Error {
    fn from(e: identity::Error) -> Self {
        Error::Identity(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty(field) => write!(f, "{} is empty", field),
            Error::UnresolvedPlaceholder(field) => {
                write!(f, "{} still contains a {{{{...}}}} placeholder", field)
            }
            Error::InvalidLength { field, min, max } => {
                write!(f, "{} must be between {} and {} bytes long", field, min, max)
            }
            Error::InvalidPort(port) => {
                write!(f, "MQTT_PORT is {}, expected {}", port, MQTT_TLS_PORT)
            }
            Error::Identity(e) => write!(f, "DEV_ID: {}", e),
        }
    }
}

/// Runs every check and hands each problem to `report`. Returns how many
/// problems were found.
pub fn check<F>(config: &Config, mut report: F) -> usize
where
    F: FnMut(Error),
{
    let mut problems = 0;
    let mut emit = |e: Error| {
        problems += 1;
        report(e);
    };

    let mut identity_fields_ok = true;
    for field in Field::ALL {
        let value = field.value(config);

        let problem = if value.is_empty() {
            Some(Error::Empty(field))
        } else if config.unresolved.contains(&field) {
            Some(Error::UnresolvedPlaceholder(field))
        } else {
            match field.length_bounds() {
                Some((min, max)) if value.len() < min || value.len() > max => {
                    Some(Error::InvalidLength { field, min, max })
                }
                _ => None,
            }
        };

        if let Some(e) = problem {
            if field.length_bounds().is_none() {
                identity_fields_ok = false;
            }
            emit(e);
        }
    }

    if config.mqtt_port != MQTT_TLS_PORT {
        emit(Error::InvalidPort(config.mqtt_port));
    }

    // an empty or templated label already has its own report
    if identity_fields_ok {
        let identity = config.identity();
        if let Err(e) = identity.device() {
            emit(e.into());
        } else if let Err(e) = identity.hostname() {
            emit(e.into());
        } else if let Err(e) = identity.topic_prefix() {
            emit(e.into());
        }
    }

    problems
}

/// Logs every problem and returns the first one.
pub fn validate(config: &Config) -> Result<(), Error> {
    let mut first = None;
    let problems = check(config, |e| {
        log::error!("Invalid configuration: {}", e);
        if first.is_none() {
            first = Some(e);
        }
    });

    match first {
        Some(e) => {
            log::error!("{} configuration problem(s) found", problems);
            Err(e)
        }
        None => Ok(()),
    }
}
