use thiserror::Error;

/// A rejected form. The `Display` text is shown to the guest as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingRequired,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please fill in your partner's details.")]
    MissingPartner,

    #[error("Please enter a valid email address for your partner.")]
    InvalidPartnerEmail,

    #[error("Please select at least one event to attend.")]
    NoEventSelected,
}

const NETWORK_FAILURE: &str =
    "There was an error submitting your RSVP. Please check your internet connection and try again.";
const REJECTED: &str = "There was an error submitting your RSVP. Please try again.";

/// A failed hand-off to the configured backend. The detail is for the logs;
/// guests only ever see `user_message`.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend rejected the submission: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    #[error("backend answered {status}: {detail}")]
    Status {
        status: reqwest::StatusCode,
        detail: String,
    },

    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            // the spreadsheet script only ever answers with its own generic text
            SubmitError::Rejected { message: Some(message) } if !message.is_empty() => {
                message.clone()
            }
            SubmitError::Rejected { .. } => REJECTED.to_string(),
            _ => NETWORK_FAILURE.to_string(),
        }
    }
}
