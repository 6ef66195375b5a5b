//! Credential provider trait.
//!
//! Defines the interface the HTTP layer uses to obtain the bearer token.

use crate::error::Result;

/// Holder of the access token attached to outgoing requests.
///
/// The HTTP client receives an implementation at construction time and calls
/// `get()` once per request; there is no ambient global lookup.
///
/// # Security Note
///
/// Implementations must never log the token or include it in error messages.
#[async_trait::async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the current token, if any.
    async fn get(&self) -> Option<String>;

    /// Stores a new token, replacing the previous one.
    async fn set(&self, token: String) -> Result<()>;

    /// Forgets the stored token.
    async fn clear(&self) -> Result<()>;
}
