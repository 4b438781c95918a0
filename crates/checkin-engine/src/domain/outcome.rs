//! Classification of validate responses into terminal outcomes.
//!
//! ```text
//! [Idle] ──validate──→ [Submitting] ──429──→ [RateLimited]
//!                           │ ──410──→ [LimitExceeded]
//!                           │ ──valid=true──→ [Valid]
//!                           │ ──valid=false / unparseable──→ [Invalid]
//!                           └── no response ──→ [NetworkFailure]
//! ```

use super::api_types::{TicketInfo, ValidateReply, ValidationInfo};
use super::presenter::{ResultKind, ScanResult};
use super::stats::CountedOutcome;
use super::value_objects::ScanLogId;

pub const RATE_LIMITED_TITLE: &str = "Rate Limit Exceeded";
pub const RATE_LIMITED_MESSAGE: &str =
    "Too many scans. Please wait a moment before scanning again.";
pub const LIMIT_EXCEEDED_TITLE: &str = "Scan Limit Reached";
pub const LIMIT_EXCEEDED_MESSAGE: &str = "This ticket has exhausted its scan allowance.";
pub const INVALID_TITLE: &str = "Invalid Ticket";
pub const INVALID_FALLBACK_MESSAGE: &str = "Ticket could not be validated.";
pub const QUEUED_TITLE: &str = "Scan Queued";

const HTTP_TOO_MANY_REQUESTS: u16 = 429;
const HTTP_GONE: u16 = 410;

/// Terminal state of one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid {
        ticket: Option<TicketInfo>,
        validation: Option<ValidationInfo>,
        scan_log_id: Option<ScanLogId>,
    },
    Invalid {
        reason: String,
        ticket: Option<TicketInfo>,
    },
    RateLimited,
    LimitExceeded,
    NetworkFailure {
        reason: String,
    },
}

/// Discriminant of [`ValidationOutcome`], for logs and assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Valid,
    Invalid,
    RateLimited,
    LimitExceeded,
    NetworkFailure,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::RateLimited => "rate_limited",
            Self::LimitExceeded => "limit_exceeded",
            Self::NetworkFailure => "network_failure",
        }
    }
}

impl ValidationOutcome {
    /// Classify any HTTP response. Status codes win over the body.
    pub fn from_reply(reply: ValidateReply) -> Self {
        match reply.status {
            HTTP_TOO_MANY_REQUESTS => return Self::RateLimited,
            HTTP_GONE => return Self::LimitExceeded,
            _ => {}
        }
        match reply.body {
            Some(body) if body.valid => Self::Valid {
                ticket: body.ticket,
                validation: body.validation,
                scan_log_id: body.scan_log_id,
            },
            Some(body) => {
                let reason = body
                    .error
                    .or_else(|| body.validation.and_then(|v| v.message))
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| INVALID_FALLBACK_MESSAGE.to_string());
                Self::Invalid {
                    reason,
                    ticket: body.ticket,
                }
            }
            None => Self::Invalid {
                reason: INVALID_FALLBACK_MESSAGE.to_string(),
                ticket: None,
            },
        }
    }

    pub fn network_failure(reason: impl Into<String>) -> Self {
        Self::NetworkFailure {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Valid { .. } => OutcomeKind::Valid,
            Self::Invalid { .. } => OutcomeKind::Invalid,
            Self::RateLimited => OutcomeKind::RateLimited,
            Self::LimitExceeded => OutcomeKind::LimitExceeded,
            Self::NetworkFailure { .. } => OutcomeKind::NetworkFailure,
        }
    }

    /// How this outcome moves the stat counters.
    pub fn counted(&self) -> CountedOutcome {
        match self {
            Self::Valid { .. } => CountedOutcome::Valid,
            Self::Invalid { .. } | Self::RateLimited | Self::LimitExceeded => {
                CountedOutcome::Failed
            }
            Self::NetworkFailure { .. } => CountedOutcome::Queued,
        }
    }

    fn ticket(&self) -> Option<&TicketInfo> {
        match self {
            Self::Valid { ticket, .. } | Self::Invalid { ticket, .. } => ticket.as_ref(),
            _ => None,
        }
    }

    pub fn ticket_id(&self) -> Option<String> {
        self.ticket().and_then(|t| t.ticket_id.clone())
    }

    pub fn is_test_ticket(&self) -> bool {
        self.ticket().map(|t| t.is_test_ticket).unwrap_or(false)
    }

    pub fn scan_log_id(&self) -> Option<&ScanLogId> {
        match self {
            Self::Valid { scan_log_id, .. } => scan_log_id.as_ref(),
            _ => None,
        }
    }

    /// Dialog and feed content for this outcome.
    pub fn presentation(&self) -> ScanResult {
        match self {
            Self::Valid {
                ticket, validation, ..
            } => {
                let title = if self.is_test_ticket() {
                    "Test Ticket Valid"
                } else {
                    "Valid Ticket"
                };
                ScanResult {
                    kind: ResultKind::Success,
                    title: title.to_string(),
                    details: valid_details(ticket.as_ref(), validation.as_ref()),
                }
            }
            Self::Invalid { reason, .. } => ScanResult {
                kind: ResultKind::Error,
                title: INVALID_TITLE.to_string(),
                details: reason.clone(),
            },
            Self::RateLimited => ScanResult {
                kind: ResultKind::Error,
                title: RATE_LIMITED_TITLE.to_string(),
                details: RATE_LIMITED_MESSAGE.to_string(),
            },
            Self::LimitExceeded => ScanResult {
                kind: ResultKind::Error,
                title: LIMIT_EXCEEDED_TITLE.to_string(),
                details: LIMIT_EXCEEDED_MESSAGE.to_string(),
            },
            Self::NetworkFailure { reason } => ScanResult {
                kind: ResultKind::Queued,
                title: QUEUED_TITLE.to_string(),
                details: format!(
                    "Server unreachable ({}). The scan was recorded as queued.",
                    reason
                ),
            },
        }
    }
}

fn valid_details(ticket: Option<&TicketInfo>, validation: Option<&ValidationInfo>) -> String {
    let mut lines = Vec::new();
    if let Some(ticket) = ticket {
        if let Some(name) = &ticket.attendee_name {
            lines.push(format!("Attendee: {}", name));
        }
        if let Some(kind) = &ticket.ticket_type {
            lines.push(format!("Type: {}", kind));
        }
    }
    let counts = validation
        .and_then(|v| v.scan_count.zip(v.max_scan_count))
        .or_else(|| ticket.and_then(|t| t.scan_count.zip(t.max_scan_count)));
    if let Some((count, max)) = counts {
        lines.push(format!("Scans: {}/{}", count, max));
    }
    lines.join("\n")
}
