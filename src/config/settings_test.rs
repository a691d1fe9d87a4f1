use super::*;

fn with_secret() -> config::ConfigBuilder<config::builder::DefaultState> {
    Settings::defaults()
        .unwrap()
        .set_override("auth.jwt_secret", "test-signing-key")
        .unwrap()
}

#[test]
fn test_defaults_deserialize() {
    let settings = Settings::from_builder(with_secret()).unwrap();

    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.auth.jwt_ttl_secs, 3600);
    assert!(settings.auth.api_key.is_none());
    assert!(!settings.scraper.enabled);
    assert_eq!(settings.scraper.interval_secs, 3600);
    assert!(settings.scraper.squad_url_overrides.is_empty());
    assert_eq!(settings.pagination.default_page_size, 10);
}

#[test]
fn test_overrides_take_precedence() {
    let builder = with_secret()
        .set_override("auth.api_key", "secret")
        .unwrap()
        .set_override("scraper.squad_url_overrides.16", "https://www.vif-fotball.no/lag/a-laget/spillere")
        .unwrap();
    let settings = Settings::from_builder(builder).unwrap();

    assert_eq!(settings.auth.api_key.as_deref(), Some("secret"));
    assert_eq!(settings.auth.jwt_secret, "test-signing-key");
    assert_eq!(
        settings.scraper.squad_url_overrides.get("16").map(String::as_str),
        Some("https://www.vif-fotball.no/lag/a-laget/spillere")
    );
}

#[test]
fn test_missing_jwt_secret_is_rejected() {
    let result = Settings::from_builder(Settings::defaults().unwrap());
    assert!(result.is_err());
}

#[test]
fn test_blank_jwt_secret_is_rejected() {
    let builder = Settings::defaults()
        .unwrap()
        .set_override("auth.jwt_secret", "   ")
        .unwrap();

    let err = Settings::from_builder(builder).unwrap_err();
    assert!(err.to_string().contains("auth.jwt_secret"));
}
