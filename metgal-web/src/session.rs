//! Browsing sessions
//!
//! A session remembers the identifier list of the last filter submission so
//! that later page requests reuse it instead of searching again. The store is
//! an injected interface; [`InMemorySessionStore`] keeps entries in process
//! and drops sessions idle longer than the configured timeout.
//!
//! The session id travels in a cookie. Requests without a valid one get a
//! fresh id, returned to the browser via `Set-Cookie`.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue},
    response::Response,
};
use chrono::{DateTime, Utc};
use metgal_common::ObjectId;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::AppState;

/// Shared, immutable identifier list
pub type IdList = Arc<[ObjectId]>;

/// Opaque session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim()).ok().map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-session storage of the last resolved identifier list
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session: &SessionId) -> Option<IdList>;
    async fn put(&self, session: SessionId, ids: Vec<ObjectId>);
    /// Forget the session's list, if any
    async fn remove(&self, session: &SessionId);
}

struct SessionEntry {
    ids: IdList,
    last_seen: DateTime<Utc>,
}

/// In-process [`SessionStore`]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<SessionId, SessionEntry>>,
    idle_timeout: chrono::Duration,
}

impl InMemorySessionStore {
    pub fn new(idle_timeout: std::time::Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            idle_timeout: chrono::Duration::from_std(idle_timeout)
                .unwrap_or_else(|_| chrono::Duration::days(36_500)),
        }
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn is_expired(&self, entry: &SessionEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.last_seen) > self.idle_timeout
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session: &SessionId) -> Option<IdList> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;

        let expired = entries
            .get(session)
            .map(|entry| self.is_expired(entry, now))?;
        if expired {
            entries.remove(session);
            tracing::debug!(session = %session, "Session expired");
            return None;
        }

        let entry = entries.get_mut(session)?;
        entry.last_seen = now;
        Some(entry.ids.clone())
    }

    async fn put(&self, session: SessionId, ids: Vec<ObjectId>) {
        let now = Utc::now();
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        let purged = before - entries.len();
        if purged > 0 {
            tracing::debug!(purged, "Purged idle sessions");
        }

        tracing::debug!(session = %session, ids = ids.len(), "Storing session identifier list");
        entries.insert(
            session,
            SessionEntry {
                ids: ids.into(),
                last_seen: now,
            },
        );
    }

    async fn remove(&self, session: &SessionId) {
        if self.entries.write().await.remove(session).is_some() {
            tracing::debug!(session = %session, "Cleared session identifier list");
        }
    }
}

/// Session of the current request
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    /// True when the id was issued for this request
    pub is_new: bool,
    cookie_name: String,
}

impl Session {
    /// Add `Set-Cookie` to `response` when the session was issued for this request
    pub fn attach_cookie(&self, response: &mut Response) {
        if !self.is_new {
            return;
        }

        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_name, self.id
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "Invalid session cookie header"),
        }
    }
}

/// Find the value of cookie `name` in the request's `Cookie` headers
fn find_cookie<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find_map(|(key, value)| (key == name).then_some(value))
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie_name = state.settings.session_cookie.clone();

        let existing = find_cookie(parts, &cookie_name).and_then(SessionId::parse);
        let session = match existing {
            Some(id) => Session {
                id,
                is_new: false,
                cookie_name,
            },
            None => Session {
                id: SessionId::generate(),
                is_new: true,
                cookie_name,
            },
        };

        Ok(session)
    }
}
