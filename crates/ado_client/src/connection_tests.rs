use super::*;

fn test_settings() -> ConnectionSettings {
    ConnectionSettings::new(
        "https://dev.azure.com/contoso/",
        "Data Platform",
        "db-migrations",
        "main",
        SecretString::from("test-token".to_string()),
    )
}

#[test]
fn test_new_applies_defaults() {
    let settings = test_settings();

    assert_eq!(settings.organization_url, "https://dev.azure.com/contoso");
    assert_eq!(settings.api_version, DEFAULT_API_VERSION);
    assert_eq!(settings.list_timeout, Duration::from_secs(30));
    assert_eq!(settings.history_timeout, Duration::from_secs(20));
    assert_eq!(settings.commit_page_size, 100);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_authorization_header_uses_empty_user_name() {
    let settings = test_settings();
    let expected = format!("Basic {}", STANDARD.encode(":test-token"));

    assert_eq!(settings.authorization_header(), expected);
    assert_eq!(settings.authorization_header(), "Basic OnRlc3QtdG9rZW4=");
}

#[test]
fn test_debug_output_redacts_token() {
    let settings = test_settings();
    let debug_output = format!("{settings:?}");

    assert!(!debug_output.contains("test-token"));
    assert!(debug_output.contains("db-migrations"));
}

#[test]
fn test_endpoint_urls_encode_project() {
    let settings = test_settings();

    assert_eq!(
        settings.items_url(),
        "https://dev.azure.com/contoso/Data%20Platform/_apis/git/repositories/db-migrations/items"
    );
    assert_eq!(
        settings.commits_url(),
        "https://dev.azure.com/contoso/Data%20Platform/_apis/git/repositories/db-migrations/commits"
    );
}

#[test]
fn test_web_url_keeps_path_separators() {
    let settings = test_settings();

    assert_eq!(
        settings.web_url_for("/db/scripts/V1.0.0.1.sql"),
        "https://dev.azure.com/contoso/Data%20Platform/_git/db-migrations?path=/db/scripts/V1.0.0.1.sql&version=GBmain"
    );
}

#[test]
fn test_web_url_encodes_branch_and_special_characters() {
    let mut settings = test_settings();
    settings.branch = "release/1.0".to_string();

    let url = settings.web_url_for("/db/scripts/V1.0.0.1 fix#2.sql");

    assert!(url.ends_with("?path=/db/scripts/V1.0.0.1%20fix%232.sql&version=GBrelease%2F1.0"));
}

#[test]
fn test_validate_rejects_empty_values() {
    let mut settings = test_settings();
    settings.project = "  ".to_string();

    match settings.validate() {
        Err(Error::InvalidConfiguration(msg)) => assert!(msg.contains("project")),
        other => panic!("Expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_empty_token() {
    let mut settings = test_settings();
    settings.token = SecretString::from(String::new());

    match settings.validate() {
        Err(Error::InvalidConfiguration(msg)) => assert!(msg.contains("token")),
        other => panic!("Expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_invalid_url() {
    let mut settings = test_settings();
    settings.organization_url = "not a url".to_string();

    assert!(matches!(
        settings.validate(),
        Err(Error::InvalidConfiguration(_))
    ));
}

#[test]
fn test_validate_rejects_non_http_scheme() {
    let mut settings = test_settings();
    settings.organization_url = "ftp://dev.azure.com/contoso".to_string();

    match settings.validate() {
        Err(Error::InvalidConfiguration(msg)) => assert!(msg.contains("ftp")),
        other => panic!("Expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_zero_page_size() {
    let mut settings = test_settings();
    settings.commit_page_size = 0;

    assert!(matches!(
        settings.validate(),
        Err(Error::InvalidConfiguration(_))
    ));
}
