pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    response::Html,
    routing::{get, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::session::handlers as sessions;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET /
/// The cover letter form.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_resume_bytes;

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health::health_handler))
        // Session API
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_end_session),
        )
        .route(
            "/api/v1/sessions/:id/credential",
            put(sessions::handle_set_credential),
        )
        .route(
            "/api/v1/sessions/:id/format",
            put(sessions::handle_select_format),
        )
        .route(
            "/api/v1/sessions/:id/download",
            get(sessions::handle_download),
        )
        // Generation API
        .route(
            "/api/v1/sessions/:id/generate",
            post(generation::handle_generate),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::StubBackend;
    use crate::session::SessionStore;

    const BOUNDARY: &str = "cover-letter-test-boundary";
    const LETTER: &str = "Dear Hiring Manager,\n\nI build APIs.\n\nSincerely,\nJane";
    const PDF_FIXTURE: &[u8] = b"%PDF-1.4\n%fixture resume\n%%EOF";

    fn app(backend: Arc<StubBackend>) -> Router {
        app_with_config(backend, Config::default())
    }

    fn app_with_config(backend: Arc<StubBackend>, config: Config) -> Router {
        build_router(AppState {
            config,
            backend,
            sessions: SessionStore::new(Duration::from_secs(3600)),
        })
    }

    struct Form {
        fields: Vec<(&'static str, String)>,
        resume: Option<(&'static str, &'static str, &'static [u8])>,
    }

    impl Form {
        fn scenario() -> Self {
            Self {
                fields: vec![
                    ("job_title", "Backend Engineer".to_string()),
                    ("company_name", "Acme Corp".to_string()),
                    ("recipient_name", String::new()),
                    ("job_description", "Build APIs".to_string()),
                    ("platform", "LinkedIn".to_string()),
                    ("api_key", "test-key".to_string()),
                ],
                resume: Some(("cv.pdf", "application/pdf", PDF_FIXTURE)),
            }
        }

        fn without(mut self, name: &str) -> Self {
            self.fields.retain(|(field, _)| *field != name);
            self
        }

        fn body(&self) -> Vec<u8> {
            let mut body = Vec::new();
            for (name, value) in &self.fields {
                body.extend_from_slice(
                    format!(
                        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                    )
                    .as_bytes(),
                );
            }
            if let Some((file_name, content_type, bytes)) = self.resume {
                body.extend_from_slice(
                    format!(
                        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
            body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
            body
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, request).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_session(app: &Router) -> String {
        let request = Request::post("/api/v1/sessions").body(Body::empty()).unwrap();
        let (status, json) = send_json(app, request).await;
        assert_eq!(status, StatusCode::CREATED);
        json["session_id"].as_str().unwrap().to_string()
    }

    async fn generate(app: &Router, session_id: &str, form: &Form) -> (StatusCode, Value) {
        let request = Request::post(format!("/api/v1/sessions/{session_id}/generate"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(form.body()))
            .unwrap();
        send_json(app, request).await
    }

    async fn get_session(app: &Router, session_id: &str) -> Value {
        let request = Request::get(format!("/api/v1/sessions/{session_id}"))
            .body(Body::empty())
            .unwrap();
        let (status, json) = send_json(app, request).await;
        assert_eq!(status, StatusCode::OK);
        json
    }

    async fn download(app: &Router, session_id: &str, query: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::get(format!("/api/v1/sessions/{session_id}/download{query}"))
            .body(Body::empty())
            .unwrap();
        send(app, request).await
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let app = app(Arc::new(StubBackend::replying(LETTER)));
        let (status, json) =
            send_json(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let app = app(Arc::new(StubBackend::replying(LETTER)));
        let (status, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Generate Cover Letter"));
        for label in ["Job title *", "Company name *", "Job description *", "Resume (PDF) *", "Gemini API key *"] {
            assert!(html.contains(label), "missing required marker: {label}");
        }
    }

    #[tokio::test]
    async fn test_scenario_generate_stores_letter_and_offers_downloads() {
        let backend = Arc::new(StubBackend::replying(LETTER));
        let app = app(backend.clone());
        let id = create_session(&app).await;

        let (status, json) = generate(&app, &id, &Form::scenario()).await;
        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["letter"], LETTER);
        assert_eq!(json["downloads"].as_array().unwrap().len(), 2);

        assert_eq!(backend.generation_count(), 1);
        let prompt = backend.last_prompt.lock().clone().unwrap();
        for needle in ["Backend Engineer", "Acme Corp", "Build APIs", "LinkedIn", "Hiring Manager"] {
            assert!(prompt.contains(needle), "prompt missing {needle}");
        }

        let session = get_session(&app, &id).await;
        assert_eq!(session["letter"], LETTER);
        assert_eq!(session["has_credential"], true);
    }

    #[tokio::test]
    async fn test_missing_required_field_warns_without_generation() {
        for field in ["job_title", "company_name", "job_description", "api_key"] {
            let backend = Arc::new(StubBackend::replying(LETTER));
            let app = app(backend.clone());
            let id = create_session(&app).await;

            let (status, json) = generate(&app, &id, &Form::scenario().without(field)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "field {field}");
            assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
            assert_eq!(backend.upload_count(), 0);
            assert_eq!(backend.generation_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_missing_resume_warns_without_generation() {
        let backend = Arc::new(StubBackend::replying(LETTER));
        let app = app(backend.clone());
        let id = create_session(&app).await;

        let mut form = Form::scenario();
        form.resume = None;
        let (status, _) = generate(&app, &id, &form).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(backend.generation_count(), 0);
        assert_eq!(get_session(&app, &id).await["has_credential"], false);
    }

    #[tokio::test]
    async fn test_non_pdf_resume_is_rejected() {
        let backend = Arc::new(StubBackend::replying(LETTER));
        let app = app(backend.clone());
        let id = create_session(&app).await;

        let mut form = Form::scenario();
        form.resume = Some(("cv.txt", "text/plain", &b"just text"[..]));
        let (status, json) = generate(&app, &id, &form).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(backend.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_generation_error_keeps_letter_empty_and_hides_downloads() {
        let backend = Arc::new(StubBackend::failing("quota exceeded"));
        let app = app(backend.clone());
        let id = create_session(&app).await;

        let (status, json) = generate(&app, &id, &Form::scenario()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "GENERATION_ERROR");
        let message = json["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("Error generating cover letter:"));
        assert!(message.contains("quota exceeded"));
        assert_eq!(backend.delete_count(), 1);

        let session = get_session(&app, &id).await;
        assert_eq!(session["letter"], "");
        assert_eq!(session["downloads"].as_array().unwrap().len(), 0);
        assert_eq!(session["generating"], false);

        let (status, _) = download(&app, &id, "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stored_credential_is_reused() {
        let backend = Arc::new(StubBackend::replying(LETTER));
        let app = app(backend.clone());
        let id = create_session(&app).await;

        let request = Request::put(format!("/api/v1/sessions/{id}/credential"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"api_key": "stored-key"}"#))
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = generate(&app, &id, &Form::scenario().without("api_key")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(backend.generation_count(), 1);
    }

    #[tokio::test]
    async fn test_format_switch_rerenders_without_regenerating() {
        let backend = Arc::new(StubBackend::replying(LETTER));
        let app = app(backend.clone());
        let id = create_session(&app).await;
        generate(&app, &id, &Form::scenario()).await;

        let (status, pdf) = download(&app, &id, "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(pdf.starts_with(b"%PDF-"));

        let request = Request::put(format!("/api/v1/sessions/{id}/format"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"format": "docx"}"#))
            .unwrap();
        let (status, json) = send_json(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["format"], "docx");
        assert_eq!(json["letter"], LETTER);

        let (status, docx) = download(&app, &id, "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(docx.starts_with(b"PK"));
        assert_ne!(pdf, docx);

        assert_eq!(backend.generation_count(), 1);
    }

    #[tokio::test]
    async fn test_download_headers_name_the_file() {
        let app = app(Arc::new(StubBackend::replying(LETTER)));
        let id = create_session(&app).await;
        generate(&app, &id, &Form::scenario()).await;

        let request = Request::get(format!("/api/v1/sessions/{id}/download?format=docx"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Firstname_Lastname_CoverLetter.docx\""
        );
        assert_eq!(get_session(&app, &id).await["format"], "docx");
    }

    #[tokio::test]
    async fn test_pdf_download_is_stable_across_requests() {
        let app = app(Arc::new(StubBackend::replying(LETTER)));
        let id = create_session(&app).await;
        generate(&app, &id, &Form::scenario()).await;

        let (_, first) = download(&app, &id, "?format=pdf").await;
        let (_, second) = download(&app, &id, "?format=pdf").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_ended_session_is_gone() {
        let app = app(Arc::new(StubBackend::replying(LETTER)));
        let id = create_session(&app).await;

        let request = Request::delete(format!("/api/v1/sessions/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let request = Request::get(format!("/api/v1/sessions/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, json) = send_json(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_session_generate_is_not_found() {
        let backend = Arc::new(StubBackend::replying(LETTER));
        let app = app(backend.clone());
        let (status, _) = generate(&app, &uuid::Uuid::new_v4().to_string(), &Form::scenario()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(backend.generation_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_regeneration_keeps_previous_letter_and_downloads() {
        let backend = Arc::new(StubBackend::replying(LETTER));
        let app = app(backend.clone());
        let id = create_session(&app).await;

        let (status, _) = generate(&app, &id, &Form::scenario()).await;
        assert_eq!(status, StatusCode::OK);

        backend.set_generation_failing(true);
        let (status, json) = generate(&app, &id, &Form::scenario()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("model overloaded"));
        assert_eq!(backend.generation_count(), 2);
        assert_eq!(backend.delete_count(), 2);

        let session = get_session(&app, &id).await;
        assert_eq!(session["letter"], LETTER);
        assert_eq!(session["downloads"].as_array().unwrap().len(), 2);
        assert_eq!(session["generating"], false);

        let (status, bytes) = download(&app, &id, "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_oversized_resume_is_payload_too_large() {
        const OVERSIZED_RESUME: &[u8] = &[b'%'; 4096];

        let backend = Arc::new(StubBackend::replying(LETTER));
        let config = Config {
            max_resume_bytes: 1024,
            ..Config::default()
        };
        let app = app_with_config(backend.clone(), config);
        let id = create_session(&app).await;

        let form = Form {
            resume: Some(("cv.pdf", "application/pdf", OVERSIZED_RESUME)),
            ..Form::scenario()
        };
        let (status, json) = generate(&app, &id, &form).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Resume too large"));
        assert_eq!(backend.upload_count(), 0);

        let session = get_session(&app, &id).await;
        assert_eq!(session["generating"], false);
    }
}
