// SPDX-License-Identifier: Apache-2.0
//! Service configuration and its startup contract.

use baret_model::Role;
use serde::Serialize;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

/// One static bearer credential: the presented token and the identity it
/// resolves to.
#[derive(Debug, Clone, Serialize)]
pub struct AuthToken {
    pub token: String,
    pub user: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub stats_cache_ttl: Duration,
    pub slow_query_threshold: Duration,
    pub require_auth: bool,
    pub auth_tokens: Vec<AuthToken>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024,
            stats_cache_ttl: Duration::from_secs(30),
            slow_query_threshold: Duration::from_millis(200),
            require_auth: true,
            auth_tokens: Vec::new(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn resolve_token(&self, token: &str) -> Option<&AuthToken> {
        self.auth_tokens.iter().find(|entry| entry.token == token)
    }
}

/// Parses the `token:user:role` table (comma separated). Entries that do not
/// parse are dropped; the startup contract rejects an empty table when auth
/// is required.
#[must_use]
pub fn parse_auth_tokens(raw: &str) -> Vec<AuthToken> {
    raw.split(',')
        .filter_map(|entry| {
            let mut parts = entry.trim().splitn(3, ':');
            let token = parts.next()?.trim();
            let user = parts.next()?.trim();
            let role = Role::parse(parts.next()?.trim()).ok()?;
            if token.is_empty() || user.is_empty() {
                return None;
            }
            Some(AuthToken {
                token: token.to_string(),
                user: user.to_string(),
                role,
            })
        })
        .collect()
}

pub fn validate_startup_config_contract(api: &ApiConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("max_body_bytes must be > 0".to_string());
    }
    if api.stats_cache_ttl.is_zero() || api.slow_query_threshold.is_zero() {
        return Err("timeouts must be > 0".to_string());
    }
    if api.require_auth && api.auth_tokens.is_empty() {
        return Err("require_auth=true requires at least one auth token".to_string());
    }
    let mut seen = std::collections::HashSet::new();
    for entry in &api.auth_tokens {
        if !seen.insert(entry.token.as_str()) {
            return Err(format!("duplicate auth token for user {}", entry.user));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_table_parses_and_drops_malformed_entries() {
        let tokens =
            parse_auth_tokens("abc:ayse:admin, def:mehmet:employee, ghi:nur:superuser, short");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].user, "ayse");
        assert_eq!(tokens[0].role, Role::Admin);
        assert_eq!(tokens[1].role, Role::Employee);
    }

    #[test]
    fn startup_config_validation_enforces_auth_contracts() {
        let mut api = ApiConfig::default();
        let err = validate_startup_config_contract(&api).expect_err("missing tokens");
        assert!(err.contains("auth token"));

        api.auth_tokens = parse_auth_tokens("abc:ayse:admin,abc:veli:manager");
        let err = validate_startup_config_contract(&api).expect_err("duplicate token");
        assert!(err.contains("duplicate"));

        api.auth_tokens = parse_auth_tokens("abc:ayse:admin");
        validate_startup_config_contract(&api).expect("valid config");
    }

    #[test]
    fn startup_config_validation_rejects_zero_limits() {
        let api = ApiConfig {
            max_body_bytes: 0,
            require_auth: false,
            ..ApiConfig::default()
        };
        let err = validate_startup_config_contract(&api).expect_err("zero body cap");
        assert!(err.contains("max_body_bytes"));
    }
}
