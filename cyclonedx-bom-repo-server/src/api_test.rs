use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use cyclonedx_bom_repo::models::bom::{Bom, SpecVersion};
use cyclonedx_bom_repo_storage::test_utils::get_test_repository;
use cyclonedx_bom_repo_storage::{MetadataService, RetentionPolicy};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::api::{app, AppState};
use crate::config::AllowedMethods;

const SERIAL_NUMBER: &str = "urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79";

const ALL_METHODS: AllowedMethods = AllowedMethods {
    get: true,
    post: true,
    delete: true,
};

fn xml_document() -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.4" serialNumber="{}">
  <components>
    <component type="library">
      <name>name</name>
      <version>version</version>
    </component>
  </components>
</bom>"#,
        SERIAL_NUMBER
    )
}

fn json_document() -> String {
    format!(
        r#"{{
  "bomFormat": "CycloneDX",
  "specVersion": "1.4",
  "serialNumber": "{}",
  "components": [
    {{
      "type": "library",
      "name": "name",
      "version": "version"
    }}
  ],
  "vulnerabilities": [
    {{
      "id": "CVE-2024-0001"
    }}
  ]
}}"#,
        SERIAL_NUMBER
    )
}

fn test_app(allowed_methods: AllowedMethods) -> (Router, TempDir) {
    let (repository, dir) = get_test_repository();
    let metadata = Arc::new(MetadataService::start(
        repository.clone(),
        RetentionPolicy::default(),
        Duration::from_secs(60 * 60),
    ));
    let router = app(AppState {
        repository,
        metadata,
        allowed_methods,
    });
    (router, dir)
}

fn post_request(content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/bom")
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap()
}

fn get_request(uri: &str, accept: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(accept) = accept {
        builder = builder.header(header::ACCEPT, accept);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    hyper::body::to_bytes(response.into_body())
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn a_stored_xml_document_can_be_fetched_back() {
    let (router, _dir) = test_app(ALL_METHODS);

    let response = router
        .clone()
        .oneshot(post_request(
            "application/vnd.cyclonedx+xml; version=1.4",
            xml_document(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some(format!("/bom?serialNumber={}&version=1", SERIAL_NUMBER).as_str())
    );

    let response = router
        .oneshot(get_request(
            &format!("/bom?serialNumber={}&version=1", SERIAL_NUMBER),
            Some("application/vnd.cyclonedx+xml; version=1.4"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/vnd.cyclonedx+xml; version=1.4")
    );

    let body = body_bytes(response).await;
    let bom = Bom::parse_from_xml(&body, SpecVersion::V1_4).unwrap();
    assert_eq!(
        bom.serial_number.map(|serial| serial.to_string()),
        Some(SERIAL_NUMBER.to_string())
    );
}

#[tokio::test]
async fn stored_documents_convert_between_formats_and_versions() {
    let (router, _dir) = test_app(ALL_METHODS);

    let response = router
        .clone()
        .oneshot(post_request(
            "application/vnd.cyclonedx+json; version=1.4",
            json_document(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(get_request(
            &format!("/bom?serialNumber={}", SERIAL_NUMBER),
            Some("application/vnd.cyclonedx+xml; version=1.3"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/vnd.cyclonedx+xml; version=1.3")
    );

    let body = body_bytes(response).await;
    let bom = Bom::parse_from_xml(&body, SpecVersion::V1_3).unwrap();
    // The 1.4-only fields are gone, the components survive.
    assert!(bom.vulnerabilities.is_none());
    assert_eq!(bom.components.map(|components| components.0.len()), Some(1));
}

#[tokio::test]
async fn original_bytes_are_preserved_verbatim() {
    let (router, _dir) = test_app(ALL_METHODS);

    // Deliberately odd whitespace that any re-encoder would normalize.
    let document = format!(
        "<bom    xmlns=\"http://cyclonedx.org/schema/bom/1.4\"\n\n  serialNumber=\"{}\"></bom>",
        SERIAL_NUMBER
    );
    let response = router
        .clone()
        .oneshot(post_request(
            "application/vnd.cyclonedx+xml; version=1.4",
            document.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(get_request(
            &format!("/bom?serialNumber={}&version=1&original=true", SERIAL_NUMBER),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;
    assert_eq!(body, document.as_bytes());
}

#[tokio::test]
async fn truncated_serial_numbers_are_rejected() {
    let (router, _dir) = test_app(ALL_METHODS);

    let document = r#"<?xml version="1.0" encoding="utf-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.4" serialNumber="urn:uuid:3e671687-395b-41f5-a30f-a58921a69b7" />"#;
    let response = router
        .oneshot(post_request(
            "application/vnd.cyclonedx+xml; version=1.4",
            document,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn gated_methods_answer_with_the_allow_header() {
    let (router, _dir) = test_app(AllowedMethods {
        get: true,
        post: false,
        delete: false,
    });

    let response = router
        .oneshot(post_request(
            "application/vnd.cyclonedx+xml; version=1.4",
            xml_document(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response
            .headers()
            .get(header::ALLOW)
            .and_then(|value| value.to_str().ok()),
        Some("GET")
    );
}

#[tokio::test]
async fn storing_the_same_version_twice_conflicts() {
    let (router, _dir) = test_app(ALL_METHODS);

    let document = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.4" serialNumber="{}" version="1" />"#,
        SERIAL_NUMBER
    );

    let response = router
        .clone()
        .oneshot(post_request(
            "application/vnd.cyclonedx+xml; version=1.4",
            document.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(post_request(
            "application/vnd.cyclonedx+xml; version=1.4",
            document,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn repeated_submissions_without_a_version_are_auto_versioned() {
    let (router, _dir) = test_app(ALL_METHODS);

    for expected in 1..=3 {
        let response = router
            .clone()
            .oneshot(post_request(
                "application/vnd.cyclonedx+xml; version=1.4",
                xml_document(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some(format!("/bom?serialNumber={}&version={}", SERIAL_NUMBER, expected).as_str())
        );
    }
}

#[tokio::test]
async fn fetching_without_a_version_serves_the_latest() {
    let (router, _dir) = test_app(ALL_METHODS);

    for _ in 0..2 {
        router
            .clone()
            .oneshot(post_request(
                "application/vnd.cyclonedx+xml; version=1.4",
                xml_document(),
            ))
            .await
            .unwrap();
    }

    let response = router
        .oneshot(get_request(
            &format!("/bom?serialNumber={}", SERIAL_NUMBER),
            Some("application/vnd.cyclonedx+json"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response).await;
    let bom = Bom::parse_from_json(&body, SpecVersion::V1_4).unwrap();
    assert_eq!(bom.version, Some(2));
}

#[tokio::test]
async fn fetching_an_unknown_serial_is_not_found() {
    let (router, _dir) = test_app(ALL_METHODS);

    let response = router
        .oneshot(get_request(
            &format!("/bom?serialNumber={}", SERIAL_NUMBER),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn an_unacceptable_accept_header_is_rejected() {
    let (router, _dir) = test_app(ALL_METHODS);

    router
        .clone()
        .oneshot(post_request(
            "application/vnd.cyclonedx+xml; version=1.4",
            xml_document(),
        ))
        .await
        .unwrap();

    let response = router
        .oneshot(get_request(
            &format!("/bom?serialNumber={}", SERIAL_NUMBER),
            Some("text/plain"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn deleting_without_a_version_removes_every_version() {
    let (router, _dir) = test_app(ALL_METHODS);

    for _ in 0..2 {
        router
            .clone()
            .oneshot(post_request(
                "application/vnd.cyclonedx+xml; version=1.4",
                xml_document(),
            ))
            .await
            .unwrap();
    }

    let delete = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/bom?serialNumber={}", SERIAL_NUMBER))
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deletion is idempotent: a second pass over the now-unknown serial
    // still answers 204.
    let delete = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/bom?serialNumber={}", SERIAL_NUMBER))
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(get_request(
            &format!("/bom?serialNumber={}", SERIAL_NUMBER),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_specific_missing_version_is_not_found() {
    let (router, _dir) = test_app(ALL_METHODS);

    let delete = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/bom?serialNumber={}&version=4", SERIAL_NUMBER))
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_versions_in_the_query_are_rejected() {
    let (router, _dir) = test_app(ALL_METHODS);

    for version in ["0", "-1", "abc"] {
        let response = router
            .clone()
            .oneshot(get_request(
                &format!("/bom?serialNumber={}&version={}", SERIAL_NUMBER, version),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "for version {}",
            version
        );
    }
}

#[tokio::test]
async fn bodies_that_do_not_decode_are_rejected() {
    let (router, _dir) = test_app(ALL_METHODS);

    let response = router
        .oneshot(post_request(
            "application/vnd.cyclonedx+json; version=1.4",
            "this is not json",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_content_types_are_unsupported() {
    let (router, _dir) = test_app(ALL_METHODS);

    let response = router
        .oneshot(post_request("text/plain", xml_document()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn submissions_without_a_serial_number_get_one_assigned() {
    let (router, _dir) = test_app(ALL_METHODS);

    let document = r#"<?xml version="1.0" encoding="utf-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.4" />"#;
    let response = router
        .oneshot(post_request(
            "application/vnd.cyclonedx+xml; version=1.4",
            document,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap();
    assert!(location.starts_with("/bom?serialNumber=urn:uuid:"));
    assert!(location.ends_with("&version=1"));
}

#[tokio::test]
async fn the_health_endpoint_reports_repository_metadata() {
    let (router, _dir) = test_app(ALL_METHODS);

    router
        .clone()
        .oneshot(post_request(
            "application/vnd.cyclonedx+xml; version=1.4",
            xml_document(),
        ))
        .await
        .unwrap();

    let response = router
        .oneshot(get_request("/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response).await;
    let snapshot: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(snapshot["serialCount"], 1);
    assert_eq!(snapshot["entryCount"], 1);
    assert_eq!(snapshot["lastSeenSpecVersions"]["xml"], "1.4");
}
