//! Tests for the Secret Store HTTP session facade

use std::sync::Arc;

use http::{Method, StatusCode};
use serde_json::json;

use secretstore_client::{
    error::{ClientError, TransportError},
    models::secretstore::{
        GenerateServerKeyRequest, ServersSetChangeRequest, SessionKey, SignMessageRequest,
        StoreDocumentKeyRequest,
    },
    transport::HttpResponse,
    SecretStoreSessions,
};

use crate::helpers::{init_logger, MockHttp, RecordingDiagnostics};

const BASE: &str = "http://127.0.0.1:8082";

fn key() -> SessionKey {
    SessionKey::new("0xaa", "0xbb")
}

fn answer(status: StatusCode, body: &'static str) -> impl Fn(&secretstore_client::transport::HttpRequest) -> Result<HttpResponse, TransportError> {
    move |_| Ok(HttpResponse::new(status, body))
}

#[tokio::test]
async fn generate_server_key_posts_to_shadow_path() {
    init_logger();

    let mut http = MockHttp::new();
    http.expect_execute()
        .withf(|req| req.method == Method::POST && req.url == "http://127.0.0.1:8082/shadow/aa/bb/1" && req.body.is_none())
        .times(1)
        .returning(answer(StatusCode::OK, "\"0xdeadbeef\""));

    let server_key = SecretStoreSessions::new(http, BASE)
        .generate_server_key(&GenerateServerKeyRequest { key: key(), threshold: 1 })
        .await
        .unwrap();

    assert_eq!(server_key, "0xdeadbeef");
}

#[tokio::test]
async fn generate_server_and_document_key_has_no_prefix_segment() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .withf(|req| req.method == Method::POST && req.url == "http://127.0.0.1:8082/aa/bb/2")
        .times(1)
        .returning(answer(StatusCode::OK, "\"0xdockey\""));

    // trailing slash on the base URL must not double up
    let document_key = SecretStoreSessions::new(http, "http://127.0.0.1:8082/")
        .generate_server_and_document_key(&GenerateServerKeyRequest { key: key(), threshold: 2 })
        .await
        .unwrap();

    assert_eq!(document_key, "0xdockey");
}

#[tokio::test]
async fn store_document_key_returns_raw_body() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .withf(|req| req.method == Method::POST && req.url == "http://127.0.0.1:8082/shadow/aa/bb/cc/dd")
        .times(1)
        .returning(answer(StatusCode::OK, "\"\""));

    let body = SecretStoreSessions::new(http, BASE)
        .store_document_key(&StoreDocumentKeyRequest {
            key: key(),
            common_point: "0xcc".to_string(),
            encrypted_point: "dd".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(body, "\"\"");
}

#[tokio::test]
async fn shadow_retrieval_parses_the_shadow() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .withf(|req| req.method == Method::GET && req.url == "http://127.0.0.1:8082/shadow/aa/bb")
        .times(1)
        .returning(answer(
            StatusCode::OK,
            r#"{"decrypted_secret":"0x1","common_point":"0x2","decrypt_shadows":["0x3"]}"#,
        ));

    let shadow = SecretStoreSessions::new(http, BASE)
        .shadow_retrieve_document_key(&key())
        .await
        .unwrap();

    assert_eq!(shadow.decrypted_secret, "0x1");
    assert_eq!(shadow.common_point, "0x2");
    assert_eq!(shadow.decrypt_shadows, vec!["0x3".to_string()]);
    assert_eq!(
        serde_json::to_value(&shadow).unwrap(),
        json!({"decrypted_secret": "0x1", "common_point": "0x2", "decrypt_shadows": ["0x3"]})
    );
}

#[tokio::test]
async fn malformed_shadow_is_a_protocol_violation() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .times(1)
        .returning(answer(StatusCode::OK, "\"0xnot-a-shadow\""));

    let err = SecretStoreSessions::new(http, BASE)
        .shadow_retrieve_document_key(&key())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Protocol { .. }), "got {err:?}");
}

#[tokio::test]
async fn retrieve_document_key_unwraps_quotes() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .withf(|req| req.method == Method::GET && req.url == "http://127.0.0.1:8082/aa/bb")
        .times(1)
        .returning(answer(StatusCode::OK, "\"0xencrypteddockey\""));

    let document_key = SecretStoreSessions::new(http, BASE)
        .retrieve_document_key(&key())
        .await
        .unwrap();

    assert_eq!(document_key, "0xencrypteddockey");
}

#[tokio::test]
async fn unquoted_body_is_a_protocol_violation() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .times(1)
        .returning(answer(StatusCode::OK, "0xencrypteddockey"));

    let err = SecretStoreSessions::new(http, BASE)
        .retrieve_document_key(&key())
        .await
        .unwrap_err();

    match err {
        ClientError::Protocol { endpoint, .. } => assert_eq!(endpoint, "retrieve document key"),
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn signing_sessions_use_scheme_prefix() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .withf(|req| req.method == Method::GET && req.url == "http://127.0.0.1:8082/schnorr/aa/bb/ee")
        .times(1)
        .returning(answer(StatusCode::OK, "\"0xschnorrsig\""));
    http.expect_execute()
        .withf(|req| req.method == Method::GET && req.url == "http://127.0.0.1:8082/ecdsa/aa/bb/ee")
        .times(1)
        .returning(answer(StatusCode::OK, "\"0xecdsasig\""));

    let sessions = SecretStoreSessions::new(http, BASE);
    let request = SignMessageRequest {
        key: key(),
        message_hash: "0xee".to_string(),
    };

    assert_eq!(sessions.schnorr_sign(&request).await.unwrap(), "0xschnorrsig");
    assert_eq!(sessions.ecdsa_sign(&request).await.unwrap(), "0xecdsasig");
}

#[tokio::test]
async fn servers_set_change_posts_new_set_as_json() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .withf(|req| {
            req.method == Method::POST
                && req.url == "http://127.0.0.1:8082/admin/servers_set_change/01/02"
                && req.body == Some(json!(["0xaa01", "0xbb02"]))
        })
        .times(1)
        .returning(answer(StatusCode::OK, "\"done\""));

    let result = SecretStoreSessions::new(http, BASE)
        .servers_set_change(&ServersSetChangeRequest {
            signature_old_set: "0x01".to_string(),
            signature_new_set: "0x02".to_string(),
            new_set: vec!["aa01".to_string(), "0xbb02".to_string()],
        })
        .await
        .unwrap();

    assert_eq!(result, "done");
}

#[tokio::test]
async fn servers_set_change_accepts_unquoted_bodies() {
    let mut http = MockHttp::new();
    http.expect_execute().times(1).returning(answer(StatusCode::OK, ""));

    let result = SecretStoreSessions::new(http, BASE)
        .servers_set_change(&ServersSetChangeRequest {
            signature_old_set: "0x01".to_string(),
            signature_new_set: "0x02".to_string(),
            new_set: vec![],
        })
        .await
        .unwrap();

    assert_eq!(result, "");
}

#[tokio::test]
async fn non_200_status_carries_response_and_request() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .times(1)
        .returning(answer(StatusCode::INTERNAL_SERVER_ERROR, "\"internal error: threshold not reached\""));

    let err = SecretStoreSessions::new(http, BASE)
        .generate_server_key(&GenerateServerKeyRequest { key: key(), threshold: 1 })
        .await
        .unwrap_err();

    let session = err.as_session().expect("session error");
    assert_eq!(session.response.status, 500);
    assert_eq!(session.response.status_message(), "Internal Server Error");
    assert_eq!(session.response.body, "\"internal error: threshold not reached\"");
    assert_eq!(session.request.method, Method::POST);
    assert_eq!(session.request.url, "http://127.0.0.1:8082/shadow/aa/bb/1");
}

#[tokio::test]
async fn non_standard_status_reports_unknown_reason() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .times(1)
        .returning(answer(StatusCode::from_u16(599).unwrap(), "\"node overloaded\""));

    let err = SecretStoreSessions::new(http, BASE)
        .retrieve_document_key(&key())
        .await
        .unwrap_err();

    let session = err.as_session().expect("session error");
    assert_eq!(session.response.status_message(), "Unknown");
    assert_eq!(session.response.body, "\"node overloaded\"");
    assert_eq!(
        err.to_string(),
        "secret store session GET http://127.0.0.1:8082/aa/bb failed: 599 Unknown"
    );
}

#[tokio::test]
async fn transport_errors_are_returned_unchanged() {
    let mut http = MockHttp::new();
    http.expect_execute()
        .times(1)
        .returning(|_| Err(TransportError::new("dns error")));

    let err = SecretStoreSessions::new(http, BASE)
        .ecdsa_sign(&SignMessageRequest {
            key: key(),
            message_hash: "0xee".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport(ref e) if *e == TransportError::new("dns error")));
}

#[tokio::test]
async fn invalid_segments_are_rejected_before_sending() {
    let mut http = MockHttp::new();
    http.expect_execute().times(0);

    let err = SecretStoreSessions::new(http, BASE)
        .retrieve_document_key(&SessionKey::new("0xaa/../admin", "0xbb"))
        .await
        .unwrap_err();

    match err {
        ClientError::InvalidInput(msg) => assert!(msg.contains("server_key_id")),
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[tokio::test]
async fn diagnostics_only_observe_session_failures() {
    let recorder = Arc::new(RecordingDiagnostics::default());

    let mut http = MockHttp::new();
    http.expect_execute()
        .times(2)
        .returning(answer(StatusCode::FORBIDDEN, "\"access denied\""));
    let http = Arc::new(http);

    let silent = SecretStoreSessions::new(http.clone(), BASE);
    let verbose = SecretStoreSessions::new(http, BASE).with_diagnostics(recorder.clone());

    let quiet_err = silent.retrieve_document_key(&key()).await.unwrap_err();
    let loud_err = verbose.retrieve_document_key(&key()).await.unwrap_err();

    assert_eq!(quiet_err.as_session().unwrap().response, loud_err.as_session().unwrap().response);
    assert_eq!(
        recorder.events(),
        vec![
            "http 403 GET http://127.0.0.1:8082/aa/bb".to_string(),
            "error session http://127.0.0.1:8082/aa/bb".to_string(),
        ]
    );
}
