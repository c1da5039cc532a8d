//! Dashboard integration tests
//!
//! Requests go through the full actix application; the batch API and S3 are
//! wiremock servers.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::MockRemotes;
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use batch_manager::server::{AppState, create_app};
    use serde_json::{Value, json};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    fn batch_payload() -> Value {
        json!({
            "batch_id": "nightly-001",
            "input_file_id": "https://test-bucket.s3.amazonaws.com/in.tar.gz?sig",
            "output_file_id": "https://test-bucket.s3.amazonaws.com/out.tar.gz?sig",
            "endpoint": "/v1/chat/completions",
            "completion_window": "24h",
            "metadata": {"model": "OpenGVLab/InternVL3-38B-Instruct"}
        })
    }

    async fn post_batch(state: web::Data<AppState>, payload: Value) -> (StatusCode, Vec<u8>) {
        let app = test::init_service(create_app(state)).await;
        let req = test::TestRequest::post()
            .uri("/api/batches")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body(resp).await.to_vec())
    }

    #[actix_web::test]
    async fn test_create_batch_is_forwarded() {
        let remotes = MockRemotes::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/batches"))
            .and(body_json(batch_payload()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "nightly-001", "status": "validating"})),
            )
            .expect(1)
            .mount(&remotes.batch_api)
            .await;

        let (status, body) = post_batch(remotes.state(), batch_payload()).await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "validating");
    }

    #[actix_web::test]
    async fn test_missing_completion_window_never_reaches_remote() {
        let remotes = MockRemotes::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/batches"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&remotes.batch_api)
            .await;

        let mut payload = batch_payload();
        payload.as_object_mut().unwrap().remove("completion_window");

        let (status, body) = post_batch(remotes.state(), payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("completion_window")
        );
    }

    #[actix_web::test]
    async fn test_invalid_payloads_are_rejected() {
        let remotes = MockRemotes::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/batches"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&remotes.batch_api)
            .await;

        let mut short_id = batch_payload();
        short_id["batch_id"] = json!("ab");
        let mut bad_window = batch_payload();
        bad_window["completion_window"] = json!("1h");

        for payload in [short_id, bad_window] {
            let (status, _) = post_batch(remotes.state(), payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let remotes = MockRemotes::start().await;
        let app = test::init_service(create_app(remotes.state())).await;

        let req = test::TestRequest::post()
            .uri("/api/batches")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_remote_503_is_passed_through() {
        let remotes = MockRemotes::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/batches/nightly-001"))
            .respond_with(ResponseTemplate::new(503).set_body_string("batch service overloaded"))
            .mount(&remotes.batch_api)
            .await;

        let app = test::init_service(create_app(remotes.state())).await;
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/batches/nightly-001")
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = test::read_body(resp).await;
        assert_eq!(body.as_ref(), b"batch service overloaded");
    }

    #[actix_web::test]
    async fn test_remote_json_error_body_is_unchanged() {
        let remotes = MockRemotes::start().await;
        let remote_body = r#"{"detail":"Batch nightly-001 is already completed"}"#;
        Mock::given(method("POST"))
            .and(path("/v1/batches/nightly-001/cancel"))
            .respond_with(ResponseTemplate::new(409).set_body_string(remote_body))
            .mount(&remotes.batch_api)
            .await;

        let app = test::init_service(create_app(remotes.state())).await;
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/batches/nightly-001/cancel")
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );
        let body = test::read_body(resp).await;
        assert_eq!(body.as_ref(), remote_body.as_bytes());
    }

    #[actix_web::test]
    async fn test_list_retry_and_get() {
        let remotes = MockRemotes::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/batches"))
            .and(query_param("limit", "10"))
            .and(query_param("after", "b-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [], "has_more": false})))
            .expect(1)
            .mount(&remotes.batch_api)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/batches/b-1/retry"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "b-1", "status": "queued"})))
            .expect(1)
            .mount(&remotes.batch_api)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/batches/b-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "b-1", "status": "queued"})))
            .expect(1)
            .mount(&remotes.batch_api)
            .await;

        let app = test::init_service(create_app(remotes.state())).await;

        let list: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/batches?limit=10&after=b-9")
                .to_request(),
        )
        .await;
        assert_eq!(list["has_more"], false);

        let retried: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/batches/b-1/retry")
                .to_request(),
        )
        .await;
        assert_eq!(retried["status"], "queued");

        let batch: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/batches/b-1").to_request(),
        )
        .await;
        assert_eq!(batch["id"], "b-1");
    }

    #[actix_web::test]
    async fn test_health_reports_both_dependencies() {
        let remotes = MockRemotes::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&remotes.batch_api)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/test-bucket/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&remotes.s3)
            .await;

        let app = test::init_service(create_app(remotes.state())).await;
        let health: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/health").to_request(),
        )
        .await;

        assert_eq!(health["batch_api_status"], "healthy");
        assert_eq!(health["batch_api_url"], remotes.batch_api.uri());
        assert_eq!(health["s3_access"], true);
        assert_eq!(health["aws_region"], "us-west-2");
        assert!(health["timestamp"].as_str().unwrap().contains('T'));
    }

    #[actix_web::test]
    async fn test_health_degraded() {
        let remotes = MockRemotes::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&remotes.batch_api)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/test-bucket/"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&remotes.s3)
            .await;

        let app = test::init_service(create_app(remotes.state())).await;
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/health").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let health: Value = test::read_body_json(resp).await;
        assert_eq!(health["batch_api_status"], "unhealthy");
        assert_eq!(health["s3_access"], false);
        assert_eq!(health["aws_region"], "unknown");
    }

    #[actix_web::test]
    async fn test_presign_with_explicit_credentials_in_body() {
        let remotes = MockRemotes::start().await;
        let app = test::init_service(create_app(remotes.state())).await;

        let req = test::TestRequest::post()
            .uri("/api/generate-presigned-urls")
            .set_json(json!({
                "bucket": "other-bucket",
                "input_key": "inputs/batch-00003.tar.gz",
                "output_key": "",
                "expires_in": 900,
                "credentials": {
                    "aws_access_key_id": "AKIDBODY",
                    "aws_secret_access_key": "body-secret",
                    "aws_session_token": ""
                }
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["bucket"], "other-bucket");
        assert_eq!(body["expires_in"], 900);
        let input_url = body["input_url"].as_str().unwrap();
        assert!(input_url.starts_with(&format!("{}/other-bucket/", remotes.s3.uri())));
        assert!(input_url.contains("AKIDBODY"));
        assert!(input_url.contains("X-Amz-Expires=900"));
        assert!(!input_url.contains("X-Amz-Security-Token"));
        assert!(
            body["output_key"]
                .as_str()
                .unwrap()
                .starts_with("outputs/batch-00003.tar.gz/")
        );
    }

    #[actix_web::test]
    async fn test_presign_rejects_out_of_range_expiry() {
        let remotes = MockRemotes::start().await;
        let app = test::init_service(create_app(remotes.state())).await;

        let req = test::TestRequest::post()
            .uri("/api/generate-presigned-urls")
            .set_json(json!({"input_key": "in.tar.gz", "expires_in": 604801}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
