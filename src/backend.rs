use std::time::Duration;

use reqwest::{header, multipart, Client};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{BackendChoice, FormEntries};
use crate::error::SubmitError;
use crate::models::RsvpSubmission;
use crate::schema::{fields, EXTERNAL_FORM, PLAIN};

pub const SIMULATION_DELAY: Duration = Duration::from_secs(2);

/// What a backend did with an accepted RSVP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receipt {
    Recorded,
    Simulated,
    /// The guest still has to press submit on the external form, in a tab we
    /// cannot see. Reported as success regardless.
    OpenExternal(Url),
}

impl Receipt {
    pub fn message(&self) -> &'static str {
        match self {
            Receipt::Recorded => "Thank you! Your RSVP has been submitted successfully.",
            Receipt::Simulated => {
                "Thank you! Your RSVP has been submitted successfully. (Test Mode)"
            }
            Receipt::OpenExternal(_) => {
                "A prefilled form has opened. Please click \"Submit\" to complete your RSVP."
            }
        }
    }
}

/// One outbound hand-off per call. No retries.
#[rocket::async_trait]
pub trait Backend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn submit(&self, rsvp: &RsvpSubmission) -> Result<Receipt, SubmitError>;
}

pub fn from_choice(choice: BackendChoice) -> Result<Box<dyn Backend>, SubmitError> {
    let backend: Box<dyn Backend> = match choice {
        BackendChoice::Spreadsheet { url } => Box::new(Spreadsheet::new(Client::new(), url)),
        BackendChoice::FormsService { url } => Box::new(FormsService::new(Client::new(), url)),
        BackendChoice::PrefilledForm { url, entries } => {
            Box::new(PrefilledForm::new(Url::parse(&url)?, entries))
        }
        BackendChoice::FormHosting => Box::new(FormHosting),
        BackendChoice::Simulation => Box::new(Simulation::default()),
    };
    Ok(backend)
}

pub fn json_payload(rsvp: &RsvpSubmission) -> serde_json::Map<String, serde_json::Value> {
    fields(rsvp, &PLAIN)
        .into_iter()
        .map(|(key, value)| (key.to_string(), serde_json::Value::String(value)))
        .collect()
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
}

/// Script that appends each RSVP as a spreadsheet row.
pub struct Spreadsheet {
    client: Client,
    url: String,
}

impl Spreadsheet {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[rocket::async_trait]
impl Backend for Spreadsheet {
    fn name(&self) -> &'static str {
        "spreadsheet"
    }

    async fn submit(&self, rsvp: &RsvpSubmission) -> Result<Receipt, SubmitError> {
        let envelope: Envelope = self
            .client
            .post(&self.url)
            .json(&json_payload(rsvp))
            .send()
            .await?
            .json()
            .await?;

        if envelope.status == "success" {
            Ok(Receipt::Recorded)
        } else {
            Err(SubmitError::Rejected {
                message: envelope.message,
            })
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: Option<String>,
}

/// Hosted form endpoint taking multipart posts.
pub struct FormsService {
    client: Client,
    url: String,
}

impl FormsService {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[rocket::async_trait]
impl Backend for FormsService {
    fn name(&self) -> &'static str {
        "forms service"
    }

    async fn submit(&self, rsvp: &RsvpSubmission) -> Result<Receipt, SubmitError> {
        let form = fields(rsvp, &PLAIN)
            .into_iter()
            .fold(multipart::Form::new(), |form, (key, value)| form.text(key, value));

        let response = self
            .client
            .post(&self.url)
            .header(header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(Receipt::Recorded);
        }

        let detail = response
            .json::<ServiceError>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| "Submission failed".to_string());
        Err(SubmitError::Status { status, detail })
    }
}

/// External form opened in a new tab with every answer filled in.
pub struct PrefilledForm {
    base: Url,
    entries: FormEntries,
}

impl PrefilledForm {
    pub fn new(base: Url, entries: FormEntries) -> Self {
        Self { base, entries }
    }

    pub fn prefilled_url(&self, rsvp: &RsvpSubmission) -> Url {
        let mut url = self.base.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in fields(rsvp, &EXTERNAL_FORM) {
                if let Some(entry) = self.entries.entry(key) {
                    query.append_pair(entry, &value);
                }
            }
        }
        url
    }
}

#[rocket::async_trait]
impl Backend for PrefilledForm {
    fn name(&self) -> &'static str {
        "prefilled form"
    }

    async fn submit(&self, rsvp: &RsvpSubmission) -> Result<Receipt, SubmitError> {
        let url = self.prefilled_url(rsvp);
        debug!(%url, "prefilled form url");
        Ok(Receipt::OpenExternal(url))
    }
}

/// The hosting provider captures the form post on its own.
pub struct FormHosting;

#[rocket::async_trait]
impl Backend for FormHosting {
    fn name(&self) -> &'static str {
        "form hosting"
    }

    async fn submit(&self, _rsvp: &RsvpSubmission) -> Result<Receipt, SubmitError> {
        Ok(Receipt::Recorded)
    }
}

pub struct Simulation {
    delay: Duration,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            delay: SIMULATION_DELAY,
        }
    }
}

#[rocket::async_trait]
impl Backend for Simulation {
    fn name(&self) -> &'static str {
        "simulation"
    }

    async fn submit(&self, rsvp: &RsvpSubmission) -> Result<Receipt, SubmitError> {
        rocket::tokio::time::sleep(self.delay).await;
        info!(payload = ?json_payload(rsvp), "RSVP submission (test mode)");
        Ok(Receipt::Simulated)
    }
}

/// Runs one submission and logs the outcome.
pub async fn dispatch(
    backend: &dyn Backend,
    rsvp: &RsvpSubmission,
) -> Result<Receipt, SubmitError> {
    info!(backend = backend.name(), guest = rsvp.name(), "submitting RSVP");
    let result = backend.submit(rsvp).await;
    match &result {
        Ok(receipt) => info!(backend = backend.name(), ?receipt, "RSVP accepted"),
        Err(e) => warn!(backend = backend.name(), error = %e, "RSVP submission failed"),
    }
    result
}
