#[allow(dead_code)]
#[path = "../src/template.rs"]
mod template;

#[allow(dead_code)]
#[path = "../build/provision.rs"]
mod provision;

use provision::{config_path, parse, provision, Provisioned, DEFAULT_CFG};

const SHIPPED_CFG: &str = include_str!("../cfg.toml");

fn env_of<'a>(vars: &'a [(&'a str, &'a str)]) -> impl FnMut(&str) -> Option<String> + 'a {
    move |name| {
        vars.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }
}

fn provision_shipped(vars: &[(&str, &str)]) -> Provisioned {
    let raw = parse(SHIPPED_CFG).unwrap();
    provision(&raw, env_of(vars))
}

const FULL_ENV: [(&str, &str); 5] = [
    ("SSID_WIFI", "IFC-Alunos"),
    ("SENHA_WIFI", "senha-forte-123"),
    ("MQTT_HOST", "broker.example.edu.br"),
    ("MQTT_USER", "aluno07"),
    ("MQTT_PASS", "s3cr3t-mqtt"),
];

#[test]
fn fills_placeholders_from_environment() {
    let provisioned = provision_shipped(&FULL_ENV);

    assert_eq!(provisioned.field("wifi_ssid").unwrap().value, "IFC-Alunos");
    assert_eq!(provisioned.field("mqtt_password").unwrap().value, "s3cr3t-mqtt");
    assert_eq!(provisioned.field("campus").unwrap().value, "riodosul");
    assert_eq!(provisioned.mqtt_port, 8883);
    assert_eq!(provisioned.cell_id, 7);
    assert!(provisioned.warnings().is_empty());
    assert_eq!(provisioned.strict_check(), Ok(()));
    assert_eq!(
        provisioned.env_names(),
        ["SSID_WIFI", "SENHA_WIFI", "MQTT_HOST", "MQTT_USER", "MQTT_PASS"]
    );
}

#[test]
fn empty_environment_value_counts_as_unset() {
    let provisioned = provision_shipped(&[("SSID_WIFI", "")]);

    let ssid = provisioned.field("wifi_ssid").unwrap();
    assert_eq!(ssid.value, "{{SSID_WIFI}}");
    assert_eq!(ssid.unresolved, ["SSID_WIFI"]);
}

#[test]
fn braces_inside_a_value_are_not_placeholders() {
    let mut vars = FULL_ENV.to_vec();
    vars.retain(|(key, _)| *key != "MQTT_PASS");
    vars.push(("MQTT_PASS", "p{{x}}q"));

    let provisioned = provision_shipped(&vars);

    let pass = provisioned.field("mqtt_password").unwrap();
    assert_eq!(pass.value, "p{{x}}q");
    assert!(pass.unresolved.is_empty());
    assert!(provisioned.warnings().is_empty());
    assert_eq!(provisioned.strict_check(), Ok(()));
    assert!(provisioned.to_rust().contains("unresolved: &[],"));
}

#[test]
fn warnings_name_fields_and_placeholders_only() {
    let provisioned = provision_shipped(&[("MQTT_PASS", "hunter2-pw"), ("MQTT_USER", "aluno07")]);
    let warnings = provisioned.warnings();

    assert_eq!(
        warnings,
        [
            "wifi_ssid is unresolved: set SSID_WIFI in the environment",
            "wifi_psk is unresolved: set SENHA_WIFI in the environment",
            "mqtt_hostname is unresolved: set MQTT_HOST in the environment",
        ]
    );
    for warning in &warnings {
        assert!(!warning.contains("hunter2-pw"));
        assert!(!warning.contains("aluno07"));
    }
}

#[test]
fn strict_rejects_unresolved_placeholders() {
    let err = provision_shipped(&[]).strict_check().unwrap_err();
    assert_eq!(
        err,
        "unresolved placeholder(s): SSID_WIFI, SENHA_WIFI, MQTT_HOST, MQTT_USER, MQTT_PASS"
    );
}

#[test]
fn strict_rejects_empty_literals() {
    let cfg = SHIPPED_CFG.replace("\"{{SENHA_WIFI}}\"", "\"\"");
    let provisioned = provision(&parse(&cfg).unwrap(), env_of(&FULL_ENV));

    assert_eq!(provisioned.warnings(), ["wifi_psk is empty"]);
    assert_eq!(provisioned.strict_check(), Err("empty field(s): wifi_psk".to_string()));
}

#[test]
fn config_path_can_be_overridden() {
    assert_eq!(config_path(None), DEFAULT_CFG);
    assert_eq!(config_path(Some(String::new())), DEFAULT_CFG);
    assert_eq!(config_path(Some("lab/cfg.toml".to_string())), "lab/cfg.toml");
}

#[test]
fn generated_code_lists_unresolved_fields() {
    let code = provision_shipped(&[("MQTT_HOST", "broker.example.edu.br")]).to_rust();
    let (build, _) = code.split_once("#[cfg(doc)]").unwrap();

    assert!(build.contains("mqtt_hostname: \"broker.example.edu.br\","));
    assert!(build.contains(
        "unresolved: &[crate::validate::Field::WifiSsid, crate::validate::Field::WifiPsk, \
         crate::validate::Field::MqttUser, crate::validate::Field::MqttPass],"
    ));
}

#[test]
fn documentation_build_sees_no_credentials() {
    let provisioned = provision_shipped(&FULL_ENV);
    let code = provisioned.to_rust();
    let (build, doc) = code.split_once("#[cfg(doc)]").unwrap();

    assert!(build.starts_with("#[cfg(not(doc))]"));
    for (_, value) in FULL_ENV {
        assert!(build.contains(value));
        assert!(!doc.contains(value), "{} in documentation variant", value);
    }
    assert!(doc.contains("wifi_psk: \"{{SENHA_WIFI}}\","));
    assert!(doc.contains("campus: \"riodosul\","));

    // source pages would show the non-doc variant
    assert!(include_str!("../src/lib.rs").contains("#![doc(html_no_source)]"));
}

#[test]
fn documentation_build_blanks_literal_secrets() {
    let cfg = SHIPPED_CFG.replace("{{MQTT_PASS}}", "literal-pass");
    let provisioned = provision(&parse(&cfg).unwrap(), env_of(&FULL_ENV));
    let code = provisioned.to_rust();
    let (_, doc) = code.split_once("#[cfg(doc)]").unwrap();

    assert!(!doc.contains("literal-pass"));
    assert!(doc.contains("mqtt_password: \"\","));
}
