//! In-memory `GenerationBackend` for tests. Counts every call it receives.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::application::{Credential, ResumeFile};
use crate::llm_client::{GenerationBackend, LlmError, UploadedFile};

pub struct StubBackend {
    reply: Result<String, String>,
    fail_upload: bool,
    fail_delete: bool,
    fail_generation: AtomicBool,
    pub uploads: AtomicUsize,
    pub generations: AtomicUsize,
    pub deletes: AtomicUsize,
    pub last_prompt: Mutex<Option<String>>,
}

impl StubBackend {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Ok(text.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_reply(Err(message.to_string()))
    }

    pub fn with_failing_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    pub fn with_failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    /// Makes later `generate` calls fail (or succeed again) without rebuilding the router.
    pub fn set_generation_failing(&self, failing: bool) {
        self.fail_generation.store(failing, Ordering::SeqCst);
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn generation_count(&self) -> usize {
        self.generations.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    fn with_reply(reply: Result<String, String>) -> Self {
        Self {
            reply,
            fail_upload: false,
            fail_delete: false,
            fail_generation: AtomicBool::new(false),
            uploads: AtomicUsize::new(0),
            generations: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }
}

fn api_error(message: &str) -> LlmError {
    LlmError::Api {
        status: 500,
        message: message.to_string(),
    }
}

#[async_trait]
impl GenerationBackend for StubBackend {
    async fn upload(
        &self,
        _credential: &Credential,
        resume: &ResumeFile,
    ) -> Result<UploadedFile, LlmError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_upload {
            return Err(api_error("upload rejected"));
        }
        Ok(UploadedFile {
            name: "files/stub-resume".to_string(),
            uri: format!("stub://files/{}", resume.file_name),
            mime_type: ResumeFile::MEDIA_TYPE.to_string(),
        })
    }

    async fn generate(
        &self,
        _credential: &Credential,
        _file: &UploadedFile,
        prompt: &str,
    ) -> Result<String, LlmError> {
        self.generations.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock() = Some(prompt.to_string());
        if self.fail_generation.load(Ordering::SeqCst) {
            return Err(api_error("model overloaded"));
        }
        self.reply.clone().map_err(|message| api_error(&message))
    }

    async fn delete(&self, _credential: &Credential, _file: &UploadedFile) -> Result<(), LlmError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete {
            return Err(api_error("delete rejected"));
        }
        Ok(())
    }
}
