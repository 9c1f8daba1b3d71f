//! Shared types for the admin API layer.

use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::core_state::CoreState;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the admin router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
    pub admin: Arc<AdminCredential>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>, admin_token: &str) -> Self {
        Self {
            core,
            admin: Arc::new(AdminCredential::from_token(admin_token)),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Admin context: injected by auth middleware
// ═══════════════════════════════════════════════════════════

/// Authenticated admin, injected into request extensions
/// by the auth middleware after successful token validation.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub fingerprint: String,
}

// ═══════════════════════════════════════════════════════════
// Admin credential
// ═══════════════════════════════════════════════════════════

/// The configured admin bearer token. Only its SHA-256 hash is kept.
#[derive(Debug)]
pub struct AdminCredential {
    hash: [u8; 32],
}

impl AdminCredential {
    pub fn from_token(token: &str) -> Self {
        Self {
            hash: hash_token(token),
        }
    }

    /// Constant-time comparison of a presented token against the admin hash.
    pub fn validate(&self, presented: &str) -> bool {
        let candidate = hash_token(presented);
        self.hash.ct_eq(&candidate).into()
    }

    /// Short hex prefix of the hash, safe to write to logs.
    pub fn fingerprint(&self) -> String {
        self.hash[..4].iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
