//! Row types for the marketplace tables.
//!
//! These are transient, request-scoped copies; the hosted data store owns
//! the records. Joined listing rows keep every level optional so that a
//! broken join chain never panics the transform.

use serde::{Deserialize, Serialize};

/// Status of a freshly posted request
pub const STATUS_OPEN: &str = "open";

/// A service category from the fixed taxonomy
#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub skill_id: String,
    pub name: String,
    pub description: Option<String>,
}

/// A customer record, created lazily on first submission
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub profile_id: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Projection used when only the id is needed
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerId {
    pub customer_id: String,
}

/// Payload for the lazy customer insert
#[derive(Debug, Clone, Serialize)]
pub struct NewCustomer {
    pub profile_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A posted service request
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub request_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub skill_id: String,
    pub customer_id: String,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub status: String,
    pub created_at: Option<String>,
}

/// Payload for posting a new service request
#[derive(Debug, Clone, Serialize)]
pub struct NewRequest {
    pub title: String,
    pub description: String,
    pub skill_id: String,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<f64>,
    pub status: String,
}

/// A request row with its embedded join resources, as returned by the
/// listing query
#[derive(Debug, Clone, Deserialize)]
pub struct ListingRow {
    pub request_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub customers: Option<CustomerJoin>,
    pub skills: Option<SkillJoin>,
    pub assignments: Option<Vec<AssignmentJoin>>,
}

/// Embedded customer columns
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerJoin {
    pub address: Option<String>,
}

/// Embedded skill columns
#[derive(Debug, Clone, Deserialize)]
pub struct SkillJoin {
    pub name: Option<String>,
}

/// Embedded assignment, carrying the provider serving the request
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentJoin {
    pub providers: Option<ProviderJoin>,
}

/// Embedded provider columns
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderJoin {
    pub profiles: Option<ProfileJoin>,
    pub average_rating: Option<f64>,
}

/// Embedded provider profile columns
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileJoin {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
