//! Signed-in state shared by the storefront and back-office views.
//!
//! A [`Session`] is created at startup (anonymous or restored from a
//! snapshot), filled in at sign-in and emptied at sign-out. Views receive it
//! explicitly instead of reading storage keys on their own.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("not signed in")]
    Unauthenticated,
    #[error("malformed session data: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Order placed on the storefront, handed to the order page exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderHandoff {
    pub order: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr: Option<String>,
}

/// Persisted form of a [`Session`]. Fields are kept loose so that one bad
/// entry does not discard the rest.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub initial: Option<String>,
    #[serde(default)]
    pub current_order: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    initial: Option<String>,
    current_order: Option<OrderHandoff>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, token: impl Into<String>, user: User) {
        self.token = Some(token.into());
        self.user = Some(user);
        self.initial = None;
    }

    /// Forget everything, including any order still waiting to be shown.
    pub fn sign_out(&mut self) {
        *self = Self::anonymous();
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// `Authorization` header value for API calls.
    pub fn bearer(&self) -> Result<String, SessionError> {
        self.token
            .as_deref()
            .map(|token| format!("Bearer {token}"))
            .ok_or(SessionError::Unauthenticated)
    }

    pub fn set_initial(&mut self, initial: impl Into<String>) {
        self.initial = Some(initial.into());
    }

    /// Avatar initial: the cached value, else the first letter of the
    /// user's display name.
    pub fn initial(&self) -> Option<String> {
        if let Some(initial) = &self.initial {
            return Some(initial.clone());
        }
        let user = self.user.as_ref()?;
        let name = user.name.as_deref().unwrap_or(&user.username);
        name.chars()
            .find(|c| !c.is_whitespace())
            .map(|c| c.to_uppercase().collect())
    }

    pub fn stash_order(&mut self, handoff: OrderHandoff) {
        self.current_order = Some(handoff);
    }

    pub fn take_order(&mut self) -> Option<OrderHandoff> {
        self.current_order.take()
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        Ok(SessionSnapshot {
            token: self.token.clone(),
            user: self.user.as_ref().map(serde_json::to_value).transpose()?,
            initial: self.initial.clone(),
            current_order: self
                .current_order
                .as_ref()
                .map(serde_json::to_value)
                .transpose()?,
        })
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(&self.snapshot()?)?)
    }

    pub fn restore(json: &str) -> Result<Self, SessionError> {
        let snapshot: SessionSnapshot = serde_json::from_str(json)?;
        Ok(Self::from(snapshot))
    }
}

impl From<SessionSnapshot> for Session {
    fn from(snapshot: SessionSnapshot) -> Self {
        let user = snapshot.user.and_then(|user| {
            serde_json::from_value::<User>(user)
                .map_err(|e| warn!("Dropping invalid stored user: {}", e))
                .ok()
        });
        let current_order = snapshot.current_order.and_then(|order| {
            serde_json::from_value::<OrderHandoff>(order)
                .map_err(|e| warn!("Dropping invalid stored order: {}", e))
                .ok()
        });

        Self {
            token: snapshot.token,
            user,
            initial: snapshot.initial,
            current_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user() -> User {
        User {
            id: 7,
            username: "admin".to_string(),
            name: Some("siti rahma".to_string()),
            role: Some("admin".to_string()),
        }
    }

    #[test]
    fn anonymous_session_has_no_bearer() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(matches!(session.bearer(), Err(SessionError::Unauthenticated)));
        assert_eq!(session.initial(), None);
    }

    #[test]
    fn sign_in_then_sign_out() {
        let mut session = Session::anonymous();
        session.sign_in("abc123", user());
        assert_eq!(session.bearer().unwrap(), "Bearer abc123");
        assert_eq!(session.initial().as_deref(), Some("S"));

        session.set_initial("SR");
        assert_eq!(session.initial().as_deref(), Some("SR"));

        session.stash_order(OrderHandoff {
            order: json!({ "oid": "ORD-1" }),
            qr: None,
        });
        session.sign_out();
        assert_eq!(session, Session::anonymous());
    }

    #[test]
    fn order_handoff_is_consumed_once() {
        let mut session = Session::anonymous();
        session.stash_order(OrderHandoff {
            order: json!({ "oid": "ORD-9", "status_pay": "unpaid" }),
            qr: Some("data:image/png;base64,AAAA".to_string()),
        });
        let order = session.take_order().unwrap();
        assert_eq!(order.order["oid"], "ORD-9");
        assert!(session.take_order().is_none());
    }

    #[test]
    fn snapshot_round_trip_keeps_state() {
        let mut session = Session::anonymous();
        session.sign_in("tok", user());
        session.stash_order(OrderHandoff {
            order: json!({ "oid": "ORD-2" }),
            qr: None,
        });

        let restored = Session::restore(&session.to_json().unwrap()).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn invalid_user_is_dropped_but_token_kept() {
        let restored = Session::restore(r#"{"token":"tok","user":"not a user"}"#).unwrap();
        assert_eq!(restored.token(), Some("tok"));
        assert!(restored.user().is_none());
    }

    #[test]
    fn garbage_snapshot_is_malformed() {
        assert!(matches!(
            Session::restore("{not json"),
            Err(SessionError::Malformed(_))
        ));
    }
}
