use rocket::FromForm;
use serde::Serialize;

/// A tri-state form answer: affirmative, negative, or not chosen yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Yes,
    No,
    #[default]
    Unset,
}

impl Choice {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("yes") => Choice::Yes,
            Some("no") => Choice::No,
            _ => Choice::Unset,
        }
    }

    pub fn is_yes(self) -> bool {
        self == Choice::Yes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Day {
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 3] = [Day::Friday, Day::Saturday, Day::Sunday];

    pub fn key(self) -> &'static str {
        match self {
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn event(self) -> &'static str {
        match self {
            Day::Friday => "Welcome Drinks",
            Day::Saturday => "Wedding Ceremony",
            Day::Sunday => "Farewell Party",
        }
    }
}

/// The RSVP form exactly as posted by the browser. Radio groups the guest
/// never touched are simply absent.
#[derive(FromForm, Debug, Clone, Default, Serialize)]
pub struct RsvpForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub partner: Option<String>,
    #[field(name = "partnerName")]
    #[serde(rename = "partnerName")]
    pub partner_name: Option<String>,
    #[field(name = "partnerEmail")]
    #[serde(rename = "partnerEmail")]
    pub partner_email: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
    pub sunday: Option<String>,
    pub dietary: Option<String>,
    pub kids: Option<String>,
    pub nannies: Option<String>,
    pub comments: Option<String>,
}

impl RsvpForm {
    pub fn partner_choice(&self) -> Choice {
        Choice::parse(self.partner.as_deref())
    }

    pub fn day(&self, day: Day) -> Choice {
        let value = match day {
            Day::Friday => &self.friday,
            Day::Saturday => &self.saturday,
            Day::Sunday => &self.sunday,
        };
        Choice::parse(value.as_deref())
    }

    /// Partner details only survive while the partner choice is "yes".
    pub fn apply_partner_choice(&mut self) {
        if !self.partner_choice().is_yes() {
            self.partner_name = None;
            self.partner_email = None;
        }
    }
}

/// A validated RSVP. Only `validate::validate` builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpSubmission {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) partner: Option<Partner>,
    pub(crate) friday: Choice,
    pub(crate) saturday: Choice,
    pub(crate) sunday: Choice,
    pub(crate) dietary: String,
    pub(crate) kids: String,
    pub(crate) nannies: Choice,
    pub(crate) comments: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partner {
    pub name: String,
    pub email: String,
}

impl RsvpSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn has_partner(&self) -> bool {
        self.partner.is_some()
    }

    pub fn partner(&self) -> Option<&Partner> {
        self.partner.as_ref()
    }

    pub fn attendance(&self, day: Day) -> Choice {
        match day {
            Day::Friday => self.friday,
            Day::Saturday => self.saturday,
            Day::Sunday => self.sunday,
        }
    }

    pub fn dietary(&self) -> &str {
        &self.dietary
    }

    pub fn kids(&self) -> &str {
        &self.kids
    }

    pub fn nannies(&self) -> Choice {
        self.nannies
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_parses_only_yes_and_no() {
        assert_eq!(Choice::parse(Some("yes")), Choice::Yes);
        assert_eq!(Choice::parse(Some("no")), Choice::No);
        assert_eq!(Choice::parse(Some("")), Choice::Unset);
        assert_eq!(Choice::parse(Some("maybe")), Choice::Unset);
        assert_eq!(Choice::parse(None), Choice::Unset);
    }

    #[test]
    fn partner_details_cleared_unless_partner_is_yes() {
        let mut form = RsvpForm {
            partner: Some("no".into()),
            partner_name: Some("Sam".into()),
            partner_email: Some("sam@x.com".into()),
            ..Default::default()
        };
        form.apply_partner_choice();
        assert_eq!(form.partner_name, None);
        assert_eq!(form.partner_email, None);

        let mut form = RsvpForm {
            partner: Some("yes".into()),
            partner_name: Some("Sam".into()),
            ..Default::default()
        };
        form.apply_partner_choice();
        assert_eq!(form.partner_name.as_deref(), Some("Sam"));
    }
}
