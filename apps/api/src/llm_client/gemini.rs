//! REST backend for the Gemini API: Files upload/delete plus `generateContent`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::application::{Credential, ResumeFile};
use crate::llm_client::{
    GenerationBackend, LlmError, UploadedFile, MAX_OUTPUT_TOKENS, MODEL, TEMPERATURE, TOP_P,
};

const API_KEY_HEADER: &str = "x-goog-api-key";
const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";
const REQUEST_TIMEOUT_SECS: u64 = 120;

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct UploadStartRequest<'a> {
    file: UploadStartFile<'a>,
}

#[derive(Debug, Serialize)]
struct UploadStartFile<'a> {
    display_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadFinalizeResponse {
    file: FileResource,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileResource {
    name: String,
    uri: String,
    #[serde(default)]
    mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    File {
        #[serde(rename = "fileData")]
        file_data: FileData<'a>,
    },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileData<'a> {
    mime_type: &'a str,
    file_uri: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Result<String, LlmError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Ok(text);
        }

        match self.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(LlmError::Blocked(reason)),
            None => Err(LlmError::EmptyContent),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini REST client. Holds no credential: the key travels with each call.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_base: &str) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    /// Resumable upload: one `start` request for the session URL, then a
    /// single `upload, finalize` request carrying the whole PDF.
    async fn upload(
        &self,
        credential: &Credential,
        resume: &ResumeFile,
    ) -> Result<UploadedFile, LlmError> {
        let start = self
            .client
            .post(self.url("upload/v1beta/files"))
            .header(API_KEY_HEADER, credential.expose())
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", resume.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", ResumeFile::MEDIA_TYPE)
            .json(&UploadStartRequest {
                file: UploadStartFile {
                    display_name: &resume.file_name,
                },
            })
            .send()
            .await?;
        let start = ensure_success(start).await?;

        let upload_url = start
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(LlmError::MissingUploadUrl)?
            .to_string();

        let finalize = self
            .client
            .post(upload_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(resume.bytes.clone())
            .send()
            .await?;
        let finalize = ensure_success(finalize).await?;

        let body = finalize.text().await?;
        let uploaded: UploadFinalizeResponse = serde_json::from_str(&body)?;

        info!(
            "Uploaded resume as {} ({} bytes)",
            uploaded.file.name,
            resume.len()
        );

        Ok(UploadedFile {
            name: uploaded.file.name,
            uri: uploaded.file.uri,
            mime_type: uploaded
                .file
                .mime_type
                .unwrap_or_else(|| ResumeFile::MEDIA_TYPE.to_string()),
        })
    }

    async fn generate(
        &self,
        credential: &Credential,
        file: &UploadedFile,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let request_body = build_generate_request(file, prompt);

        let response = self
            .client
            .post(self.url(&format!("v1beta/{MODEL}:generateContent")))
            .header(API_KEY_HEADER, credential.expose())
            .json(&request_body)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = parsed.into_text()?;

        debug!("Generation succeeded: {} characters", text.len());
        Ok(text)
    }

    async fn delete(&self, credential: &Credential, file: &UploadedFile) -> Result<(), LlmError> {
        let response = self
            .client
            .delete(self.url(&format!("v1beta/{}", file.name)))
            .header(API_KEY_HEADER, credential.expose())
            .send()
            .await?;
        ensure_success(response).await?;

        debug!("Deleted uploaded file {}", file.name);
        Ok(())
    }
}

fn build_generate_request<'a>(file: &'a UploadedFile, prompt: &'a str) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![
                RequestPart::File {
                    file_data: FileData {
                        mime_type: &file.mime_type,
                        file_uri: &file.uri,
                    },
                },
                RequestPart::Text { text: prompt },
            ],
        }],
        generation_config: GenerationConfig::default(),
    }
}

/// Passes 2xx responses through; turns anything else into `LlmError::Api`.
async fn ensure_success(response: Response) -> Result<Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("Gemini API returned {status}");
    Err(api_error(status.as_u16(), body))
}

fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}
