use crate::entitys::user_entity::UserRole;
use common::config::AuthConfig;
use common::util::common_utils::build_uuid;
use log::debug;
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Authenticated caller, passed explicitly into services.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub role: UserRole,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Bearer token table. Sessions expire after `session_ttl_secs` of inactivity.
pub struct SessionManager {
    sessions: Cache<String, Principal>,
}

impl SessionManager {
    pub fn new(auth: &AuthConfig) -> Self {
        let sessions = Cache::builder()
            .max_capacity(auth.max_sessions)
            .time_to_idle(Duration::from_secs(auth.session_ttl_secs))
            .build();
        Self { sessions }
    }

    pub fn open(&self, principal: Principal) -> String {
        let token = build_uuid();
        self.sessions.insert(token.clone(), principal);
        debug!("session opened for user {}", principal.user_id);
        token
    }

    pub fn resolve(&self, token: &str) -> Option<Principal> {
        self.sessions.get(token)
    }

    pub fn close(&self, token: &str) {
        self.sessions.invalidate(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_resolve_close() {
        let sessions = SessionManager::new(&AuthConfig::default());
        let principal = Principal { user_id: 7, role: UserRole::Member };
        let token = sessions.open(principal);
        assert_eq!(sessions.resolve(&token), Some(principal));
        sessions.close(&token);
        assert_eq!(sessions.resolve(&token), None);
    }
}
