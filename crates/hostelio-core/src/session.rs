// ── Session contract ──
//
// Every role (seeker, owner, admin) ends up with the same session shape:
// who the user is plus a bearer token. Stores decide where it lives.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use hostelio_api::Role;
use hostelio_api::models::LoginResponse;

use crate::error::CoreError;
use crate::model::EntityId;

#[derive(Clone)]
pub struct Session {
    pub role: Role,
    /// Backend primary key used in `…/user/{id}` routes.
    pub user_id: EntityId,
    /// External auth UID, when distinct from `user_id`.
    pub uid: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub access: SecretString,
    pub refresh: Option<SecretString>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Build a session from a login response.
    ///
    /// Admin logins report `admin_id`; user logins report `id` and/or the
    /// auth `user_id`. The most specific primary key wins.
    pub fn from_login(role: Role, resp: LoginResponse) -> Result<Self, CoreError> {
        let uid = resp.user_id.map(|id| id.0);
        let primary = match role {
            Role::Admin => resp.admin_id.or(resp.id),
            Role::Seeker | Role::Owner => resp.id,
        };
        let user_id = primary
            .map(EntityId::from)
            .or_else(|| uid.clone().map(EntityId::from))
            .ok_or_else(|| CoreError::AuthenticationFailed {
                message: "login response did not identify the user".into(),
            })?;
        Ok(Self {
            role,
            user_id,
            uid,
            email: resp.email,
            name: resp.name,
            access: resp.access.into(),
            refresh: resp.refresh.map(SecretString::from),
        })
    }
}

// ── Persisted form ───────────────────────────────────────────────────

/// Plain serializable mirror of [`Session`], for stores that write bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub role: Role,
    pub user_id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl From<&Session> for StoredSession {
    fn from(s: &Session) -> Self {
        Self {
            role: s.role,
            user_id: s.user_id.to_string(),
            uid: s.uid.clone(),
            email: s.email.clone(),
            name: s.name.clone(),
            access: s.access.expose_secret().to_owned(),
            refresh: s.refresh.as_ref().map(|r| r.expose_secret().to_owned()),
        }
    }
}

impl From<StoredSession> for Session {
    fn from(s: StoredSession) -> Self {
        Self {
            role: s.role,
            user_id: EntityId::from(s.user_id),
            uid: s.uid,
            email: s.email,
            name: s.name,
            access: s.access.into(),
            refresh: s.refresh.map(SecretString::from),
        }
    }
}

// ── Stores ───────────────────────────────────────────────────────────

/// Where a session survives between runs. `hostelio-config` backs this
/// with the system keyring.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, CoreError>;
    fn save(&self, session: &Session) -> Result<(), CoreError>;
    fn clear(&self) -> Result<(), CoreError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn login(body: serde_json::Value) -> LoginResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn admin_session_prefers_admin_id() {
        let s = Session::from_login(
            Role::Admin,
            login(json!({"access": "tok", "admin_id": 3, "id": 9})),
        )
        .unwrap();
        assert_eq!(s.user_id.to_string(), "3");
    }

    #[test]
    fn seeker_session_falls_back_to_uid() {
        let s = Session::from_login(
            Role::Seeker,
            login(json!({"access": "tok", "user_id": "fb-uid-1", "email": "asha@example.com"})),
        )
        .unwrap();
        assert_eq!(s.user_id.to_string(), "fb-uid-1");
        assert_eq!(s.uid.as_deref(), Some("fb-uid-1"));
    }

    #[test]
    fn unidentified_login_is_rejected() {
        let err = Session::from_login(Role::Owner, login(json!({"access": "tok"}))).unwrap_err();
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }

    #[test]
    fn stored_form_round_trips_tokens() {
        let session = Session::from(StoredSession {
            role: Role::Owner,
            user_id: "12".into(),
            uid: None,
            email: None,
            name: None,
            access: "tok".into(),
            refresh: Some("ref".into()),
        });
        let stored = StoredSession::from(&session);
        assert_eq!(stored.user_id, "12");
        assert_eq!(stored.access, "tok");
        assert_eq!(stored.refresh.as_deref(), Some("ref"));
        assert_eq!(session.access.expose_secret(), "tok");
    }
}
