//! Service submission flow: validate the form, resolve or create the
//! customer record, then post the request.

use tracing::{debug, info};

use crate::error::Error;
use crate::models::{Customer, CustomerId, NewCustomer, NewRequest, Request, Skill, STATUS_OPEN};
use crate::session::SessionProvider;
use crate::Sarvam;

/// Form state for posting a new service request. Budget fields hold the
/// raw text input; parsing happens at submission.
#[derive(Debug, Clone, Default)]
pub struct ServiceForm {
    pub title: String,
    pub description: String,
    pub skill_id: String,
    pub budget_min: String,
    pub budget_max: String,
}

impl ServiceForm {
    /// Required-field validation, run before any network call
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::validation("Service title is required"));
        }
        if self.description.trim().is_empty() {
            return Err(Error::validation("Description is required"));
        }
        if self.skill_id.trim().is_empty() {
            return Err(Error::validation("Service category is required"));
        }
        Ok(())
    }

    /// Clear all fields back to empty
    pub fn reset(&mut self) {
        *self = ServiceForm::default();
    }
}

/// Parse a raw budget input: empty means no budget, anything else must be
/// a number
fn parse_budget(field: &str, raw: &str) -> Result<Option<f64>, Error> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| Error::validation(format!("{} must be a number", field)))
}

/// Fetch the service categories for the form's picker, ordered by name
pub async fn fetch_skills(client: &Sarvam) -> Result<Vec<Skill>, Error> {
    client
        .from("skills")
        .select("*")
        .order("name", true)
        .execute::<Skill>()
        .await
}

/// Submit a new service request for the signed-in user.
///
/// Looks up the user's customer record and creates one when absent, then
/// inserts the request with status "open". Any failure aborts with the
/// error; a customer row without a request is valid residue, so no
/// rollback is attempted. On success the form is reset and `on_added` is
/// invoked.
pub async fn submit<F: FnOnce()>(
    client: &Sarvam,
    session: &SessionProvider,
    form: &mut ServiceForm,
    on_added: F,
) -> Result<Request, Error> {
    let user = session
        .current_user()
        .ok_or_else(|| Error::auth("Please log in to add a service"))?;

    form.validate()?;
    let budget_min = parse_budget("Min budget", &form.budget_min)?;
    let budget_max = parse_budget("Max budget", &form.budget_max)?;

    debug!(user = %user.id, title = %form.title, "submitting service request");

    let existing = client
        .from("customers")
        .select("customer_id")
        .eq("profile_id", &user.id)
        .execute_one::<CustomerId>()
        .await?;

    // Get-or-create; not race-safe against a second concurrent submission
    // from the same user, which at worst leaves a spare customer row.
    let customer_id = match existing {
        Some(customer) => customer.customer_id,
        None => {
            let created: Customer = client
                .from("customers")
                .insert(NewCustomer {
                    profile_id: user.id.clone(),
                    email: user.email.clone(),
                })
                .execute_one()
                .await?;
            debug!(customer = %created.customer_id, "created customer record");
            created.customer_id
        }
    };

    let request: Request = client
        .from("requests")
        .insert(NewRequest {
            title: form.title.clone(),
            description: form.description.clone(),
            skill_id: form.skill_id.clone(),
            customer_id,
            budget_min,
            budget_max,
            status: STATUS_OPEN.to_string(),
        })
        .execute_one()
        .await?;

    info!(request = %request.request_id, "service request posted");

    form.reset();
    on_added();
    Ok(request)
}
