//! Value objects shared across the scanner domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Identifier the engine assigns to one `validate()` call.
pub type SubmissionId = u64;

/// Tokens at least this long are treated as wallet-pass tokens.
pub const WALLET_TOKEN_MIN_LEN: usize = 64;

/// Server-issued identifier for one validated scan.
///
/// Opaque to the client; only ever echoed back for session-scoped queries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanLogId(String);

impl ScanLogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScanLogId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ScanLogId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ScanLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape of a decoded token.
///
/// Metadata only: it is forwarded to the server and never used to decide
/// the outcome locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenFormat {
    /// Long token issued inside a mobile wallet pass.
    WalletPass,
    /// Plain QR token printed on a ticket.
    QrCode,
}

impl TokenFormat {
    /// Classify a decoded token.
    ///
    /// Wallet tokens are either long or JWT-shaped (three dot-separated segments).
    pub fn classify(token: &str) -> Self {
        let token = token.trim();
        let segments = token.split('.').filter(|s| !s.is_empty()).count();
        if token.len() >= WALLET_TOKEN_MIN_LEN || segments == 3 {
            Self::WalletPass
        } else {
            Self::QrCode
        }
    }

    /// Value sent as `wallet_source`.
    pub fn wallet_source(&self) -> Option<&'static str> {
        match self {
            Self::WalletPass => Some("wallet_pass"),
            Self::QrCode => None,
        }
    }

    /// Value sent as `qr_access_method`.
    pub fn access_method(&self) -> &'static str {
        match self {
            Self::WalletPass => "wallet",
            Self::QrCode => "qr_code",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_token_is_qr() {
        assert_eq!(TokenFormat::classify("TKT-00042-ABCD"), TokenFormat::QrCode);
        assert_eq!(TokenFormat::QrCode.wallet_source(), None);
        assert_eq!(TokenFormat::QrCode.access_method(), "qr_code");
    }

    #[test]
    fn test_long_token_is_wallet() {
        let token = "x".repeat(WALLET_TOKEN_MIN_LEN);
        assert_eq!(TokenFormat::classify(&token), TokenFormat::WalletPass);
    }

    #[test]
    fn test_jwt_shaped_token_is_wallet() {
        assert_eq!(TokenFormat::classify("aaa.bbb.ccc"), TokenFormat::WalletPass);
        assert_eq!(TokenFormat::classify("aaa..ccc"), TokenFormat::QrCode);
        assert_eq!(TokenFormat::WalletPass.wallet_source(), Some("wallet_pass"));
    }

    #[test]
    fn test_scan_log_id_is_transparent_json() {
        let id = ScanLogId::from("L1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"L1\"");
        assert_eq!(id.to_string(), "L1");
    }
}
