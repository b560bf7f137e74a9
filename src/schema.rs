//! Wire layout of a submission: the twelve field keys every backend shares
//! and how each backend spells tri-state answers.

use crate::models::{Choice, Day, RsvpSubmission};

pub const FIELD_KEYS: [&str; 12] = [
    "name",
    "email",
    "partner",
    "partnerName",
    "partnerEmail",
    "friday",
    "saturday",
    "sunday",
    "dietary",
    "kids",
    "nannies",
    "comments",
];

/// Header row the spreadsheet script writes on first use, timestamp first.
pub const SHEET_HEADERS: [&str; 13] = [
    "Timestamp",
    "Name",
    "Email",
    "Has Partner",
    "Partner Name",
    "Partner Email",
    "Friday Attendance",
    "Saturday Attendance",
    "Sunday Attendance",
    "Dietary Requirements",
    "Number of Children",
    "Nanny Services",
    "Additional Comments",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spelling {
    pub yes: &'static str,
    pub no: &'static str,
    pub unset: &'static str,
}

impl Spelling {
    pub fn spell(&self, choice: Choice) -> &'static str {
        match choice {
            Choice::Yes => self.yes,
            Choice::No => self.no,
            Choice::Unset => self.unset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    pub partner: Spelling,
    pub attendance: Spelling,
    pub nannies: Spelling,
}

/// Spreadsheet script and forms service.
pub const PLAIN: Vocabulary = Vocabulary {
    partner: Spelling {
        yes: "yes",
        no: "no",
        unset: "no",
    },
    attendance: Spelling {
        yes: "yes",
        no: "no",
        unset: "not selected",
    },
    nannies: Spelling {
        yes: "yes",
        no: "no",
        unset: "not selected",
    },
};

/// Option labels of the prefilled external form.
pub const EXTERNAL_FORM: Vocabulary = Vocabulary {
    partner: Spelling {
        yes: "Yes",
        no: "No",
        unset: "No",
    },
    attendance: Spelling {
        yes: "Attending",
        no: "Not Attending",
        unset: "Not Attending",
    },
    nannies: Spelling {
        yes: "Yes",
        no: "No",
        unset: "No",
    },
};

/// All twelve fields in `FIELD_KEYS` order, spelled for one backend.
pub fn fields(rsvp: &RsvpSubmission, vocabulary: &Vocabulary) -> Vec<(&'static str, String)> {
    let partner = if rsvp.has_partner() {
        Choice::Yes
    } else {
        Choice::No
    };
    let (partner_name, partner_email) = match rsvp.partner() {
        Some(p) => (p.name.clone(), p.email.clone()),
        None => (String::new(), String::new()),
    };
    let day = |d: Day| vocabulary.attendance.spell(rsvp.attendance(d)).to_string();

    let values = [
        rsvp.name().to_string(),
        rsvp.email().to_string(),
        vocabulary.partner.spell(partner).to_string(),
        partner_name,
        partner_email,
        day(Day::Friday),
        day(Day::Saturday),
        day(Day::Sunday),
        rsvp.dietary().to_string(),
        rsvp.kids().to_string(),
        vocabulary.nannies.spell(rsvp.nannies()).to_string(),
        rsvp.comments().to_string(),
    ];
    FIELD_KEYS.into_iter().zip(values).collect()
}
