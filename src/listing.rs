//! Service listing pipeline: a filtered, joined query over open requests,
//! reshaped into display-ready view models.
//!
//! Every fetch draws a monotonically increasing ticket; a completion whose
//! ticket has been superseded is discarded, so a slow response can never
//! overwrite the results of a newer query.

use tracing::{debug, warn};

use crate::config::ListingOptions;
use crate::error::Error;
use crate::models::{AssignmentJoin, ListingRow};
use crate::Sarvam;

/// Embedded-resource column list for the listing query
const LISTING_COLUMNS: &str = "request_id,title,description,budget_min,budget_max,\
customers!inner(address),skills!inner(name),\
assignments!inner(providers!inner(profiles!inner(first_name,last_name),average_rating))";

const CURRENCY: &str = "₹";
const FALLBACK_TITLE: &str = "Service Request";
const FALLBACK_DESCRIPTION: &str = "No description available";
const FALLBACK_PROVIDER: &str = "Provider";
const FALLBACK_RATING: f64 = 4.5;
const FALLBACK_LOCATION: &str = "Location not specified";
const FALLBACK_SKILL: &str = "General Service";
const PRICE_ON_REQUEST: &str = "Price on request";
const AVAILABILITY: &str = "Available";

/// Display-ready projection of a joined listing row. Derived per fetch,
/// never persisted; every field is fully resolved, no nulls reach the
/// display layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceViewModel {
    pub id: String,
    pub title: String,
    pub description: String,
    pub provider_name: String,
    pub price_range: String,
    pub rating: f64,
    pub location: String,
    pub availability: String,
    pub skill_name: String,
}

impl From<ListingRow> for ServiceViewModel {
    fn from(row: ListingRow) -> Self {
        Self {
            id: row.request_id,
            title: non_empty(row.title).unwrap_or_else(|| FALLBACK_TITLE.to_string()),
            description: non_empty(row.description)
                .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
            provider_name: provider_name(row.assignments.as_deref()),
            price_range: price_range(row.budget_min, row.budget_max),
            rating: rating(row.assignments.as_deref()),
            location: row
                .customers
                .and_then(|c| non_empty(c.address))
                .unwrap_or_else(|| FALLBACK_LOCATION.to_string()),
            availability: AVAILABILITY.to_string(),
            skill_name: row
                .skills
                .and_then(|s| non_empty(s.name))
                .unwrap_or_else(|| FALLBACK_SKILL.to_string()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Resolve the provider's display name from the first assignment, falling
/// back to a placeholder when any link of the chain is missing
fn provider_name(assignments: Option<&[AssignmentJoin]>) -> String {
    let profile = assignments
        .and_then(|list| list.first())
        .and_then(|a| a.providers.as_ref())
        .and_then(|p| p.profiles.as_ref());

    let first = profile
        .and_then(|p| p.first_name.as_deref())
        .filter(|name| !name.trim().is_empty());

    match first {
        Some(first) => {
            let last = profile.and_then(|p| p.last_name.as_deref()).unwrap_or("");
            format!("{} {}", first, last).trim().to_string()
        }
        None => FALLBACK_PROVIDER.to_string(),
    }
}

/// The first assignment's provider rating, or the fixed fallback when the
/// chain is missing. A stored rating of zero is kept as-is.
fn rating(assignments: Option<&[AssignmentJoin]>) -> f64 {
    assignments
        .and_then(|list| list.first())
        .and_then(|a| a.providers.as_ref())
        .and_then(|p| p.average_rating)
        .unwrap_or(FALLBACK_RATING)
}

/// Format a budget range; either budget missing means the price is not
/// advertised
fn price_range(budget_min: Option<f64>, budget_max: Option<f64>) -> String {
    match (budget_min, budget_max) {
        (Some(min), Some(max)) => format!("{c}{} - {c}{}", min, max, c = CURRENCY),
        _ => PRICE_ON_REQUEST.to_string(),
    }
}

/// Result state presented to the display layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingState {
    /// A fetch is in flight
    Loading,
    /// The last fetch returned no rows
    Empty,
    /// Results are available through [`ListingPipeline::results`]
    Populated,
}

/// Handle for one listing fetch; carries the query it was issued for
#[derive(Debug)]
pub struct FetchTicket {
    token: u64,
    query: String,
}

impl FetchTicket {
    /// The query string this fetch was issued for
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// The listing pipeline and its view state.
///
/// Drive it either with [`refresh`] for the whole cycle, or with
/// [`begin`] / [`fetch`] / [`apply`] when fetches may overlap.
///
/// [`refresh`]: ListingPipeline::refresh
/// [`begin`]: ListingPipeline::begin
/// [`fetch`]: ListingPipeline::fetch
/// [`apply`]: ListingPipeline::apply
pub struct ListingPipeline {
    options: ListingOptions,
    results: Vec<ServiceViewModel>,
    /// The query string the current results were produced for
    results_query: String,
    loading: bool,
    last_error: Option<String>,
    /// Monotonic ticket counter; only the latest issued ticket may apply
    issued: u64,
}

impl ListingPipeline {
    /// Create a pipeline; the initial state is `Loading` until the first
    /// fetch completes
    pub fn new(options: ListingOptions) -> Self {
        Self {
            options,
            results: Vec::new(),
            results_query: String::new(),
            loading: true,
            last_error: None,
            issued: 0,
        }
    }

    /// The current result state
    pub fn state(&self) -> ListingState {
        if self.loading {
            ListingState::Loading
        } else if self.results.is_empty() {
            ListingState::Empty
        } else {
            ListingState::Populated
        }
    }

    /// The current view models, in fetch order
    pub fn results(&self) -> &[ServiceViewModel] {
        &self.results
    }

    /// The user-facing message of the last failed fetch, cleared by the
    /// next successful one
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a fetch for the given query, superseding any fetch still in
    /// flight
    pub fn begin(&mut self, query: &str) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        debug!(query, token = self.issued, "listing fetch started");
        FetchTicket {
            token: self.issued,
            query: query.to_string(),
        }
    }

    /// Execute the joined listing query for a ticket and transform the
    /// rows. A non-empty query filters on title or description,
    /// case-insensitive substring, OR semantics.
    pub async fn fetch(
        &self,
        client: &Sarvam,
        ticket: &FetchTicket,
    ) -> Result<Vec<ServiceViewModel>, Error> {
        let mut select = client.from("requests").select(LISTING_COLUMNS);

        if !ticket.query.is_empty() {
            select = select.or(&format!(
                "title.ilike.%{q}%,description.ilike.%{q}%",
                q = ticket.query
            ));
        }

        if self.options.newest_first {
            select = select.order("created_at", false);
        }

        let rows = select
            .limit(self.options.page_size)
            .execute::<ListingRow>()
            .await?;

        Ok(rows.into_iter().map(ServiceViewModel::from).collect())
    }

    /// Apply a completed fetch. Superseded tickets are discarded without
    /// touching state. A failed fetch keeps the previous results only when
    /// they belong to the same query string; results from a different term
    /// are cleared rather than displayed against the new one.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<ServiceViewModel>, Error>,
    ) {
        if ticket.token != self.issued {
            debug!(
                token = ticket.token,
                latest = self.issued,
                "discarding superseded listing fetch"
            );
            return;
        }

        match outcome {
            Ok(views) => {
                debug!(count = views.len(), query = %ticket.query, "listing fetch completed");
                self.results = views;
                self.results_query = ticket.query;
                self.last_error = None;
            }
            Err(err) => {
                warn!(error = %err, query = %ticket.query, "listing fetch failed");
                self.last_error = Some(err.to_string());
                if self.results_query != ticket.query {
                    self.results.clear();
                    self.results_query = ticket.query;
                }
            }
        }
        self.loading = false;
    }

    /// Run one full fetch cycle for a query. Errors are absorbed into
    /// [`last_error`]; the pipeline stays retryable.
    ///
    /// [`last_error`]: ListingPipeline::last_error
    pub async fn refresh(&mut self, client: &Sarvam, query: &str) {
        let ticket = self.begin(query);
        let outcome = self.fetch(client, &ticket).await;
        self.apply(ticket, outcome);
    }
}

impl Default for ListingPipeline {
    fn default() -> Self {
        Self::new(ListingOptions::default())
    }
}
