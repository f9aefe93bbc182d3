//! Authentication service for admin Bearer token validation.

use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Service for authenticating admin requests via Bearer tokens.
///
/// The configured token is stored as an HMAC-SHA256 digest keyed by itself,
/// and presented tokens are digested the same way before comparison. The
/// fixed-length digests make the comparison independent of where the raw
/// strings first differ.
pub struct AuthService {
    expected_digest: String,
    admin_token: String,
}

impl AuthService {
    pub fn new(admin_token: String) -> Self {
        let expected_digest = digest(&admin_token, &admin_token);
        Self {
            expected_digest,
            admin_token,
        }
    }

    /// Authenticates a presented Bearer token against the configured one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the token does not match.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        if digest(&self.admin_token, token) != self.expected_digest {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid admin token"}),
            ));
        }
        Ok(())
    }
}

/// HMAC-SHA256 of `message` keyed by `key`, as lowercase hex.
fn digest(key: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
