use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;
use crate::models::{Choice, Day, Partner, RsvpForm, RsvpSubmission};

lazy_static! {
    // something@something.something, no whitespace, exactly one @
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Checks the rules in order and stops at the first one that fails.
pub fn validate(form: &RsvpForm) -> Result<RsvpSubmission, ValidationError> {
    let name = text(&form.name);
    let email = text(&form.email);
    if name.is_empty() || email.is_empty() {
        return Err(ValidationError::MissingRequired);
    }
    if !is_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    let partner = if form.partner_choice().is_yes() {
        let partner_name = text(&form.partner_name);
        let partner_email = text(&form.partner_email);
        if partner_name.is_empty() || partner_email.is_empty() {
            return Err(ValidationError::MissingPartner);
        }
        if !is_email(partner_email) {
            return Err(ValidationError::InvalidPartnerEmail);
        }
        Some(Partner {
            name: partner_name.to_string(),
            email: partner_email.to_string(),
        })
    } else {
        None
    };

    if !Day::ALL.iter().any(|day| form.day(*day).is_yes()) {
        return Err(ValidationError::NoEventSelected);
    }

    let kids = match text(&form.kids) {
        "" => "0".to_string(),
        kids => kids.to_string(),
    };

    Ok(RsvpSubmission {
        name: name.to_string(),
        email: email.to_string(),
        partner,
        friday: form.day(Day::Friday),
        saturday: form.day(Day::Saturday),
        sunday: form.day(Day::Sunday),
        dietary: text(&form.dietary).to_string(),
        kids,
        nannies: Choice::parse(form.nannies.as_deref()),
        comments: text(&form.comments).to_string(),
    })
}
