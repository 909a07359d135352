//! The acting principal of a request.
//!
//! Gantry does not authenticate users itself; a fronting auth layer injects
//! the identity and granted permission tokens as request headers. Every
//! operation takes the principal as an explicit parameter — there is no
//! ambient current-user state.

use std::collections::{HashMap, HashSet};

use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the authenticated user name.
pub static AUTH_USER_HEADER: &str = "x-auth-user";
/// Header carrying the comma-separated permission tokens.
pub static AUTH_PERMISSIONS_HEADER: &str = "x-auth-permissions";

/// An authenticated (or anonymous) subject and its granted capabilities.
///
/// Permission tokens follow the `{app}.{action}_{type}` form, e.g.
/// `virtualization.view_cluster`. The wildcard token `*` grants every
/// permission. Object-level constraints narrow a granted permission to an
/// explicit set of record keys per qualified type.
#[derive(Debug, Clone, Default)]
pub struct Principal {
    pub username: String,
    pub permissions: HashSet<String>,
    pub constraints: HashMap<String, Vec<i32>>,
}

impl Principal {
    /// The unauthenticated principal: no name, no permissions.
    pub fn anonymous() -> Self {
        Self {
            username: String::new(),
            ..Default::default()
        }
    }

    /// Builds a principal holding the given permission tokens.
    pub fn with_permissions(username: impl Into<String>, permissions: &[&str]) -> Self {
        Self {
            username: username.into(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            constraints: HashMap::new(),
        }
    }

    /// Restricts a granted permission to an explicit set of record keys.
    pub fn constrain(mut self, object_type: impl Into<String>, ids: Vec<i32>) -> Self {
        self.constraints.insert(object_type.into(), ids);
        self
    }

    pub fn has_permission(&self, token: &str) -> bool {
        self.permissions.contains("*") || self.permissions.contains(token)
    }

    /// Record keys this principal may see for a qualified type, when
    /// object-level constraints apply. `None` means unconstrained.
    pub fn constraint(&self, object_type: &str) -> Option<&[i32]> {
        self.constraints.get(object_type).map(|ids| ids.as_slice())
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(AUTH_USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if username.is_empty() {
            return Ok(Principal::anonymous());
        }

        let permissions = parts
            .headers
            .get(AUTH_PERMISSIONS_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Principal {
            username,
            permissions,
            constraints: HashMap::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Principal;

    #[test]
    fn wildcard_grants_everything() {
        let principal = Principal::with_permissions("admin", &["*"]);

        assert!(principal.has_permission("virtualization.view_cluster"));
        assert!(principal.has_permission("dcim.delete_rack"));
    }

    #[test]
    fn anonymous_has_no_permissions() {
        assert!(!Principal::anonymous().has_permission("virtualization.view_cluster"));
    }

    #[test]
    fn constraint_narrows_to_listed_ids() {
        let principal = Principal::with_permissions("reader", &["virtualization.view_cluster"])
            .constrain("virtualization.cluster", vec![1, 3]);

        assert_eq!(principal.constraint("virtualization.cluster"), Some(&[1, 3][..]));
        assert_eq!(principal.constraint("dcim.rack"), None);
    }
}
