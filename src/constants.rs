/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// MQTT over TLS port, the only port the broker connection is allowed to use
pub const MQTT_TLS_PORT: u16 = 8883;

/// Maximum SSID length in bytes (802.11)
pub const WIFI_SSID_MAX_LEN: usize = 32;
/// WPA2 passphrase bounds (64 means a raw hex PSK)
pub const WIFI_PSK_MIN_LEN: usize = 8;
pub const WIFI_PSK_MAX_LEN: usize = 64;

/// Maximum length of a DNS name
pub const MQTT_HOSTNAME_MAX_LEN: usize = 253;
/// MQTT strings are prefixed with a u16 length
pub const MQTT_STRING_MAX_LEN: usize = u16::MAX as usize;

/// DHCP hostname capacity used by the network stack
pub const HOSTNAME_MAX_LEN: usize = 32;

/// Capacity of a topic built from the device identity
pub const TOPIC_MAX_LEN: usize = 128;

/// Buffer size for the NUL-terminated broker name handed to the TLS stack
pub const SERVER_NAME_BUFFER_SIZE: usize = MQTT_HOSTNAME_MAX_LEN + 1;
