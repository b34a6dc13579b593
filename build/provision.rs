//! Build-time provisioning: fills the `{{NAME}}` placeholders of `cfg.toml`
//! and renders the generated `CONFIG` constant.
//!
//! Included by `build.rs` and `tests/provision.rs` with `#[path]`, next to
//! `src/template.rs`.

use serde::Deserialize;

use super::template;

/// Overrides the path of the config template
pub const CFG_ENV: &str = "DEVICE_SECRETS_CFG";
pub const DEFAULT_CFG: &str = "cfg.toml";

#[derive(Deserialize)]
pub struct RawConfig {
    wifi_ssid: String,
    wifi_psk: String,
    mqtt_hostname: String,
    mqtt_port: u16,
    mqtt_username: String,
    mqtt_password: String,
    campus: String,
    course: String,
    class: String,
    cell_id: u8,
    device_id: String,
}

/// A text field after placeholder substitution.
pub struct Resolved {
    /// Key in `cfg.toml` and field name of `Config`
    pub key: &'static str,
    /// Matching `validate::Field` variant
    pub variant: &'static str,
    pub secret: bool,
    pub template: String,
    pub value: String,
    /// Placeholders of the template that had no value
    pub unresolved: Vec<String>,
}

pub struct Provisioned {
    pub fields: Vec<Resolved>,
    pub mqtt_port: u16,
    pub cell_id: u8,
}

pub fn config_path(env_value: Option<String>) -> String {
    env_value
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_CFG.to_string())
}

pub fn parse(toml_str: &str) -> Result<RawConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

// Unresolved names are recorded while rendering, so a value that itself
// contains `{{...}}` is never mistaken for a leftover placeholder.
pub fn resolve<F>(
    key: &'static str,
    variant: &'static str,
    secret: bool,
    template_value: &str,
    mut lookup: F,
) -> Resolved
where
    F: FnMut(&str) -> Option<String>,
{
    let mut unresolved = Vec::new();
    let mut value = String::with_capacity(template_value.len());

    // writing into a String never fails
    let _ = template::render(
        template_value,
        |name| {
            let found = lookup(name).filter(|v| !v.is_empty());
            if found.is_none() {
                unresolved.push(name.to_string());
            }
            found
        },
        &mut value,
    );

    Resolved {
        key,
        variant,
        secret,
        template: template_value.to_string(),
        value,
        unresolved,
    }
}

pub fn provision<F>(raw: &RawConfig, mut lookup: F) -> Provisioned
where
    F: FnMut(&str) -> Option<String>,
{
    let text = [
        ("wifi_ssid", "WifiSsid", false, &raw.wifi_ssid),
        ("wifi_psk", "WifiPsk", true, &raw.wifi_psk),
        ("mqtt_hostname", "MqttHost", false, &raw.mqtt_hostname),
        ("mqtt_username", "MqttUser", true, &raw.mqtt_username),
        ("mqtt_password", "MqttPass", true, &raw.mqtt_password),
        ("campus", "Campus", false, &raw.campus),
        ("course", "Course", false, &raw.course),
        ("class", "Class", false, &raw.class),
        ("device_id", "DeviceId", false, &raw.device_id),
    ];

    let fields = text
        .into_iter()
        .map(|(key, variant, secret, template_value)| {
            resolve(key, variant, secret, template_value, &mut lookup)
        })
        .collect();

    Provisioned {
        fields,
        mqtt_port: raw.mqtt_port,
        cell_id: raw.cell_id,
    }
}

impl Provisioned {
    pub fn field(&self, key: &str) -> Option<&Resolved> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Environment variables the generated config depends on.
    pub fn env_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .flat_map(|f| template::placeholders(&f.template).map(|p| p.name))
            .collect()
    }

    /// Build log lines. They name fields and template placeholders only.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for field in &self.fields {
            for name in &field.unresolved {
                warnings.push(format!(
                    "{} is unresolved: set {} in the environment",
                    field.key, name
                ));
            }
            if field.unresolved.is_empty() && field.value.is_empty() {
                warnings.push(format!("{} is empty", field.key));
            }
        }
        warnings
    }

    /// Fails when any field is left unresolved or empty.
    pub fn strict_check(&self) -> Result<(), String> {
        let unresolved: Vec<&str> = self
            .fields
            .iter()
            .flat_map(|f| f.unresolved.iter().map(String::as_str))
            .collect();
        let empty: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.unresolved.is_empty() && f.value.is_empty())
            .map(|f| f.key)
            .collect();

        let mut problems = Vec::new();
        if !unresolved.is_empty() {
            problems.push(format!("unresolved placeholder(s): {}", unresolved.join(", ")));
        }
        if !empty.is_empty() {
            problems.push(format!("empty field(s): {}", empty.join(", ")));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }

    /// Source of `$OUT_DIR/config.rs`. Documentation builds get a variant
    /// that carries the template text instead of any substituted value.
    pub fn to_rust(&self) -> String {
        format!(
            "#[cfg(not(doc))]\npub const CONFIG: Config = {};\n\n#[cfg(doc)]\npub const CONFIG: Config = {};\n",
            self.literal(false),
            self.literal(true)
        )
    }

    fn literal(&self, for_doc: bool) -> String {
        let mut code = String::from("Config {\n");

        for field in &self.fields {
            let value = if !for_doc {
                field.value.as_str()
            } else if !template::is_resolved(&field.template) {
                field.template.as_str()
            } else if field.secret {
                ""
            } else {
                field.value.as_str()
            };
            code.push_str(&format!("    {}: {:?},\n", field.key, value));
        }

        code.push_str(&format!("    mqtt_port: {},\n", self.mqtt_port));
        code.push_str(&format!("    cell_id: {},\n", self.cell_id));

        let unresolved: Vec<String> = self
            .fields
            .iter()
            .filter(|f| !for_doc && !f.unresolved.is_empty())
            .map(|f| format!("crate::validate::Field::{}", f.variant))
            .collect();
        code.push_str(&format!("    unresolved: &[{}],\n}}", unresolved.join(", ")));

        code
    }
}
