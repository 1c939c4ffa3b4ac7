//! Login sessions. They live in memory only, so a restart logs everyone out.

use crate::auth::Auth;
use crate::blog::{get_random_hex_string, SessionID, Username, SESSION_ID_BYTES};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct Session {
    pub username: Username,
    pub expires_at: Instant,
}

impl Session {
    fn has_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

impl super::State {
    /// Opens a session that lasts for the configured TTL. Taking an [`Auth`]
    /// means only checked credentials get one.
    pub async fn start_session(&self, username: Username, _auth: Auth) -> SessionID {
        let now = Instant::now();
        let session_id: SessionID = get_random_hex_string::<SESSION_ID_BYTES>();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| !session.has_expired(now));
        tracing::debug!(%username, live = sessions.len(), "starting session");
        sessions.insert(
            session_id.clone(),
            Session {
                username,
                expires_at: now + self.config.session_ttl,
            },
        );

        session_id
    }

    /// The live session behind `session_id`. An expired one is dropped as soon
    /// as it is presented.
    pub async fn resolve_session(&self, session_id: &str) -> Option<Session> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            let session = sessions.get(session_id)?;
            if !session.has_expired(now) {
                return Some(session.clone());
            }
        }

        if let Some(session) = self.sessions.write().await.remove(session_id) {
            tracing::debug!(username = %session.username, "session expired");
        }
        None
    }
}
