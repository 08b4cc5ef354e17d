use super::*;

#[test]
fn from_vars_defaults() {
    let config = ServerConfig::from_vars(None, None, None).expect("config");
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.site_root, None);
    assert_eq!(config.bind_addr(), "0.0.0.0:3000");
}

#[test]
fn from_vars_reads_values() {
    let config = ServerConfig::from_vars(Some("127.0.0.1"), Some(" 8080 "), Some("/srv/site")).expect("config");
    assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    assert_eq!(config.site_root, Some(PathBuf::from("/srv/site")));
}

#[test]
fn from_vars_blank_values_use_defaults() {
    let config = ServerConfig::from_vars(Some(""), Some("  "), Some("")).expect("config");
    assert_eq!(config, ServerConfig::from_vars(None, None, None).expect("config"));
}

#[test]
fn from_vars_rejects_bad_port() {
    let err = ServerConfig::from_vars(None, Some("http"), None).expect_err("bad port");
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "http".to_owned() });
    assert!(ServerConfig::from_vars(None, Some("70000"), None).is_err());
}

#[test]
fn from_env_reads_port_variable() {
    // PORT is process-global; this is the only test that touches it.
    unsafe { std::env::set_var("PORT", "4123") };
    let config = ServerConfig::from_env().expect("config");
    unsafe { std::env::remove_var("PORT") };
    assert_eq!(config.port, 4123);
}
