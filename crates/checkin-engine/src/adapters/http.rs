//! reqwest client for the check-in REST API.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    ApiError, Baselines, ScannerConfig, StatsResponse, TicketInfo, TicketsPage, TicketsQuery,
    ValidateBody, ValidateReply, ValidateRequest,
};
use crate::ports::ScannerApi;

const VALIDATE_PATH: &str = "/tickets/validate";
const STATS_PATH: &str = "/admin/scanner-stats";
const CHECKED_IN_PATH: &str = "/admin/checked-in-tickets";
const TICKETS_PATH: &str = "/tickets";

/// `GET /tickets?ticket_id=` answers with either a single ticket or a list.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LookupBody {
    ticket: Option<TicketInfo>,
    tickets: Vec<TicketInfo>,
}

/// HTTP implementation of [`ScannerApi`].
pub struct HttpScannerApi {
    client: Client,
    base_url: String,
}

impl HttpScannerApi {
    pub fn new(config: &ScannerConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ApiError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_root().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Connection(format!("Cannot connect to {}", self.base_url))
        } else {
            ApiError::Http(e.to_string())
        }
    }

    /// Reject non-2xx responses on endpoints where only success has a body.
    async fn expect_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ScannerApi for HttpScannerApi {
    async fn validate(&self, request: &ValidateRequest) -> Result<ValidateReply, ApiError> {
        let response = self
            .client
            .post(self.endpoint(VALIDATE_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        // A response arrived; a truncated or non-JSON body is still a reply.
        let body = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<ValidateBody>(&bytes).ok(),
            Err(e) => {
                debug!(error = %e, status, "validate body unreadable");
                None
            }
        };

        Ok(ValidateReply { status, body })
    }

    async fn fetch_stats(&self) -> Result<Baselines, ApiError> {
        let response = self
            .client
            .get(self.endpoint(STATS_PATH))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let stats: StatsResponse = Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(stats.stats)
    }

    async fn checked_in_tickets(&self, query: &TicketsQuery) -> Result<TicketsPage, ApiError> {
        let url = self.endpoint(CHECKED_IN_PATH);
        let request = if query.uses_body() {
            self.client.post(url).json(query)
        } else {
            self.client.get(url).query(&[
                ("filter", query.filter.as_str().to_string()),
                ("page", query.page.to_string()),
                ("limit", query.limit.to_string()),
            ])
        };

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn lookup_ticket(&self, ticket_id: &str) -> Result<Option<TicketInfo>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(TICKETS_PATH))
            .query(&[("ticket_id", ticket_id)])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: LookupBody = Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(body.ticket.or_else(|| body.tickets.into_iter().next()))
    }
}
