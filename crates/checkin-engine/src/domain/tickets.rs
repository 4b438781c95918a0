//! Checked-in tickets overlay: category filter plus pagination.
//!
//! Each fetch is tagged with a generation. A response is only applied if it
//! answers the most recent fetch, so switching category or page while a
//! request is in flight cannot paint stale rows.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::api_types::{CheckedInTicket, TicketsPage, TicketsQuery};
use super::value_objects::ScanLogId;

/// Which tile's tickets the overlay lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    Today,
    Session,
    Total,
    Valid,
    Failed,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 5] = [
        TicketCategory::Today,
        TicketCategory::Session,
        TicketCategory::Total,
        TicketCategory::Valid,
        TicketCategory::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Session => "session",
            Self::Total => "total",
            Self::Valid => "valid",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page navigation direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageDirection {
    Prev,
    Next,
}

/// Client-side pagination state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            has_prev: false,
            has_next: false,
            total_pages: 1,
        }
    }
}

/// A fetch the overlay wants performed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketFetch {
    pub generation: u64,
    pub query: TicketsQuery,
}

/// Overlay state.
#[derive(Clone, Debug)]
pub struct TicketsOverlay {
    category: Option<TicketCategory>,
    pagination: Pagination,
    tickets: Vec<CheckedInTicket>,
    total: u64,
    loading: bool,
    error: Option<String>,
    limit: u32,
    generation: u64,
}

impl TicketsOverlay {
    pub fn new(limit: u32) -> Self {
        Self {
            category: None,
            pagination: Pagination::default(),
            tickets: Vec::new(),
            total: 0,
            loading: false,
            error: None,
            limit: limit.max(1),
            generation: 0,
        }
    }

    /// Open (or switch) the overlay on a category, starting at page one.
    pub fn open(&mut self, category: TicketCategory, session_ids: &[ScanLogId]) -> TicketFetch {
        self.category = Some(category);
        self.pagination = Pagination::default();
        self.tickets.clear();
        self.total = 0;
        self.begin_fetch(category, 1, session_ids)
    }

    /// Move one page. Returns `None` when already at the boundary.
    pub fn navigate(
        &mut self,
        direction: PageDirection,
        session_ids: &[ScanLogId],
    ) -> Option<TicketFetch> {
        let category = self.category?;
        if self.loading {
            return None;
        }
        let page = match direction {
            PageDirection::Next if self.pagination.has_next => self.pagination.page + 1,
            PageDirection::Prev if self.pagination.has_prev && self.pagination.page > 1 => {
                self.pagination.page - 1
            }
            _ => return None,
        };
        Some(self.begin_fetch(category, page, session_ids))
    }

    fn begin_fetch(
        &mut self,
        category: TicketCategory,
        page: u32,
        session_ids: &[ScanLogId],
    ) -> TicketFetch {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        let scan_log_ids = match category {
            TicketCategory::Session => Some(session_ids.to_vec()),
            _ => None,
        };
        TicketFetch {
            generation: self.generation,
            query: TicketsQuery {
                filter: category,
                page,
                limit: self.limit,
                scan_log_ids,
            },
        }
    }

    /// Apply a fetch result. Returns `false` if the result was stale.
    pub fn apply(&mut self, generation: u64, result: Result<TicketsPage, String>) -> bool {
        if self.category.is_none() || generation != self.generation {
            return false;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                let info = page.pagination;
                self.pagination = Pagination {
                    page: info.page.max(1),
                    has_prev: info.has_prev,
                    has_next: info.has_next,
                    total_pages: info.total_pages.max(1),
                };
                self.total = info.total;
                self.tickets = page.tickets;
            }
            Err(message) => self.error = Some(message),
        }
        true
    }

    pub fn close(&mut self) {
        self.generation += 1;
        self.category = None;
        self.loading = false;
        self.error = None;
        self.tickets.clear();
        self.pagination = Pagination::default();
    }

    pub fn category(&self) -> Option<TicketCategory> {
        self.category
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn tickets(&self) -> &[CheckedInTicket] {
        &self.tickets
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_types::PaginationInfo;

    fn page(n: u32, total_pages: u32) -> TicketsPage {
        TicketsPage {
            tickets: vec![CheckedInTicket {
                ticket_id: format!("T-{}", n),
                ..Default::default()
            }],
            pagination: PaginationInfo {
                page: n,
                total_pages,
                has_next: n < total_pages,
                has_prev: n > 1,
                total: total_pages as u64,
            },
        }
    }

    #[test]
    fn test_session_category_carries_ids() {
        let mut overlay = TicketsOverlay::new(20);
        let ids = vec![ScanLogId::from("L1"), ScanLogId::from("L2")];
        let fetch = overlay.open(TicketCategory::Session, &ids);
        assert_eq!(fetch.query.scan_log_ids, Some(ids));
        assert!(fetch.query.uses_body());
    }

    #[test]
    fn test_other_categories_use_plain_query() {
        let mut overlay = TicketsOverlay::new(20);
        for category in [
            TicketCategory::Today,
            TicketCategory::Total,
            TicketCategory::Valid,
            TicketCategory::Failed,
        ] {
            let fetch = overlay.open(category, &[ScanLogId::from("L1")]);
            assert_eq!(fetch.query.scan_log_ids, None);
            assert_eq!(fetch.query.page, 1);
        }
    }

    #[test]
    fn test_navigation_bounds_are_noops() {
        let mut overlay = TicketsOverlay::new(20);
        let fetch = overlay.open(TicketCategory::Valid, &[]);
        assert!(overlay.apply(fetch.generation, Ok(page(1, 2))));

        assert!(overlay.navigate(PageDirection::Prev, &[]).is_none());

        let next = overlay.navigate(PageDirection::Next, &[]).unwrap();
        assert_eq!(next.query.page, 2);
        assert!(overlay.apply(next.generation, Ok(page(2, 2))));
        assert!(overlay.navigate(PageDirection::Next, &[]).is_none());
        assert_eq!(overlay.pagination().page, 2);
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut overlay = TicketsOverlay::new(20);
        let first = overlay.open(TicketCategory::Today, &[]);
        let second = overlay.open(TicketCategory::Failed, &[]);
        assert!(!overlay.apply(first.generation, Ok(page(1, 5))));
        assert!(overlay.is_loading());
        assert!(overlay.apply(second.generation, Ok(page(1, 1))));
        assert_eq!(overlay.category(), Some(TicketCategory::Failed));
    }

    #[test]
    fn test_fetch_error_is_recorded() {
        let mut overlay = TicketsOverlay::new(20);
        let fetch = overlay.open(TicketCategory::Total, &[]);
        assert!(overlay.apply(fetch.generation, Err("offline".into())));
        assert_eq!(overlay.error(), Some("offline"));
        assert!(!overlay.is_loading());
    }

    #[test]
    fn test_closed_overlay_ignores_results() {
        let mut overlay = TicketsOverlay::new(20);
        let fetch = overlay.open(TicketCategory::Total, &[]);
        overlay.close();
        assert!(!overlay.apply(fetch.generation, Ok(page(1, 1))));
        assert!(overlay.navigate(PageDirection::Next, &[]).is_none());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(TicketCategory::parse("Session"), Some(TicketCategory::Session));
        assert_eq!(TicketCategory::parse("bogus"), None);
    }
}
