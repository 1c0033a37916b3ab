//! In-memory session store.
//!
//! Letter, format and credential change only through `store_letter` (after a
//! successful generation), `select_format` and `store_credential`.
//! The lock is never held across an `.await`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::Credential;
use crate::errors::AppError;
use crate::render::OutputFormat;

/// State for one user session.
#[derive(Debug, Clone)]
pub struct Session {
    pub letter: String,
    pub format: OutputFormat,
    pub credential: Option<Credential>,
    generating: bool,
    last_seen: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            letter: String::new(),
            format: OutputFormat::default(),
            credential: None,
            generating: false,
            last_seen: Instant::now(),
        }
    }

    pub fn has_letter(&self) -> bool {
        !self.letter.is_empty()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Opens a new session. Sessions idle longer than the timeout are dropped first.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write();

        let before = sessions.len();
        let timeout = self.idle_timeout;
        sessions.retain(|_, s| s.generating || s.last_seen.elapsed() < timeout);
        let expired = before - sessions.len();
        if expired > 0 {
            info!("Expired {expired} idle session(s)");
        }

        sessions.insert(id, Session::new());
        debug!("Created session {id}");
        id
    }

    /// Snapshot of a session. Counts as activity.
    pub fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.with_session(id, |s| s.clone())
    }

    pub fn end(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .remove(&id)
            .map(|_| debug!("Ended session {id}"))
            .ok_or_else(|| not_found(id))
    }

    pub fn store_credential(&self, id: Uuid, credential: Credential) -> Result<(), AppError> {
        self.with_session(id, |s| s.credential = Some(credential))
    }

    pub fn select_format(&self, id: Uuid, format: OutputFormat) -> Result<Session, AppError> {
        self.with_session(id, |s| {
            s.format = format;
            s.clone()
        })
    }

    pub fn store_letter(&self, id: Uuid, letter: String) -> Result<(), AppError> {
        self.with_session(id, |s| s.letter = letter)
    }

    /// Marks the session busy for the duration of one generation call.
    ///
    /// Fails with `Conflict` if a generation is already running for this session.
    pub fn begin_generation(&self, id: Uuid) -> Result<GenerationGuard, AppError> {
        self.with_session(id, |s| {
            if s.generating {
                return Err(AppError::Conflict(
                    "A cover letter is already being generated for this session".to_string(),
                ));
            }
            s.generating = true;
            Ok(())
        })??;

        Ok(GenerationGuard {
            store: self.clone(),
            id,
        })
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    fn with_session<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> Result<T, AppError> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.last_seen = Instant::now();
        Ok(f(session))
    }
}

/// Clears the busy flag when dropped, whether generation succeeded or not.
pub struct GenerationGuard {
    store: SessionStore,
    id: Uuid,
}

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        if let Some(session) = self.store.sessions.write().get_mut(&self.id) {
            session.generating = false;
        }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
