use super::*;

#[test]
fn test_remote_api_conversion_keeps_status_and_body() {
    let error = FetchError::from(ado_client::Error::remote_api(404, "not found"));

    match &error {
        FetchError::RemoteApi { status, body } => {
            assert_eq!(*status, 404);
            assert_eq!(body, "not found");
        }
        other => panic!("Expected RemoteApi, got {other:?}"),
    }
    assert_eq!(error.to_string(), "Azure DevOps API error: 404 - not found");
}

#[test]
fn test_connection_conversion_is_connectivity() {
    let error = FetchError::from(ado_client::Error::Connection("timed out".to_string()));

    assert!(matches!(error, FetchError::Connectivity(ref msg) if msg == "timed out"));
    assert_eq!(error.to_string(), "Could not connect to Azure DevOps: timed out");
}

#[test]
fn test_other_client_errors_are_unexpected() {
    let error = FetchError::from(ado_client::Error::InvalidConfiguration(
        "project must not be empty".to_string(),
    ));

    match error {
        FetchError::Unexpected(msg) => assert!(msg.contains("project must not be empty")),
        other => panic!("Expected Unexpected, got {other:?}"),
    }
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FetchError>();
}
