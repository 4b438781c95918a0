//! Request and response shapes of the check-in REST contract.
//!
//! The backend mixes naming styles (`validatedBy` next to `wallet_source`),
//! so renames are per field rather than container-wide.

use serde::{Deserialize, Serialize};

use super::config::ScannerConfig;
use super::stats::Baselines;
use super::tickets::TicketCategory;
use super::value_objects::{ScanLogId, TokenFormat};

/// Body of `POST /tickets/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateRequest {
    pub token: String,
    #[serde(rename = "validatedBy")]
    pub validated_by: String,
    pub location: String,
    pub wallet_source: Option<String>,
    pub qr_access_method: String,
}

impl ValidateRequest {
    pub fn new(token: &str, config: &ScannerConfig) -> Self {
        let format = TokenFormat::classify(token);
        Self {
            token: token.to_string(),
            validated_by: config.validated_by.clone(),
            location: config.location.clone(),
            wallet_source: format.wallet_source().map(str::to_string),
            qr_access_method: format.access_method().to_string(),
        }
    }
}

/// Ticket details returned by validation and lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketInfo {
    #[serde(alias = "ticketId")]
    pub ticket_id: Option<String>,
    #[serde(alias = "attendeeName", alias = "customer_name")]
    pub attendee_name: Option<String>,
    #[serde(alias = "ticketType")]
    pub ticket_type: Option<String>,
    #[serde(alias = "isTestTicket")]
    pub is_test_ticket: bool,
    /// Scannable token, present on manual-entry lookups.
    #[serde(alias = "qr_token")]
    pub token: Option<String>,
    pub scan_count: Option<u32>,
    pub max_scan_count: Option<u32>,
}

/// Per-scan validation metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationInfo {
    pub scan_count: Option<u32>,
    pub max_scan_count: Option<u32>,
    pub message: Option<String>,
}

/// Parsed body of a validate response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateBody {
    pub valid: bool,
    pub ticket: Option<TicketInfo>,
    pub validation: Option<ValidationInfo>,
    pub error: Option<String>,
    #[serde(rename = "scanLogId", alias = "scan_log_id")]
    pub scan_log_id: Option<ScanLogId>,
}

/// Any HTTP response to a validate call.
///
/// `body` is `None` when the response carried no parseable JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateReply {
    pub status: u16,
    pub body: Option<ValidateBody>,
}

impl ValidateReply {
    pub fn ok(body: ValidateBody) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    pub fn status(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// Body of `GET /admin/scanner-stats`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsResponse {
    pub stats: Baselines,
}

/// One row of the checked-in tickets overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckedInTicket {
    #[serde(alias = "ticketId")]
    pub ticket_id: String,
    #[serde(alias = "attendeeName", alias = "customer_name")]
    pub attendee_name: Option<String>,
    #[serde(alias = "ticketType")]
    pub ticket_type: Option<String>,
    #[serde(alias = "scannedAt", alias = "validated_at")]
    pub scanned_at: Option<String>,
    #[serde(alias = "isTestTicket")]
    pub is_test_ticket: bool,
}

/// Server pagination block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationInfo {
    pub page: u32,
    #[serde(alias = "total_pages")]
    pub total_pages: u32,
    #[serde(alias = "has_next")]
    pub has_next: bool,
    #[serde(alias = "has_prev")]
    pub has_prev: bool,
    pub total: u64,
}

impl Default for PaginationInfo {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            has_next: false,
            has_prev: false,
            total: 0,
        }
    }
}

/// Body of the checked-in tickets endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketsPage {
    pub tickets: Vec<CheckedInTicket>,
    pub pagination: PaginationInfo,
}

/// A checked-in tickets query.
///
/// `scan_log_ids` is set only for the session category, which must travel
/// as a POST body instead of query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketsQuery {
    pub filter: TicketCategory,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "scanLogIds", skip_serializing_if = "Option::is_none")]
    pub scan_log_ids: Option<Vec<ScanLogId>>,
}

impl TicketsQuery {
    pub fn uses_body(&self) -> bool {
        self.scan_log_ids.is_some()
    }
}
