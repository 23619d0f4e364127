/*
 * Responsibility
 * - The "authenticated identity" type handlers see
 * - Built only by the token decoder, stored in request extensions by the access middleware
 * - Lives for one request, never persisted
 */

/// Identity attached to an authenticated request.
///
/// - `user_id` is never empty
/// - `roles` keeps the order of the credential and may be empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub roles: Vec<String>,
}

impl Identity {
    pub fn new(user_id: String, roles: Vec<String>) -> Self {
        Self { user_id, roles }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
