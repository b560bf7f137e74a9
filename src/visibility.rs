use serde::Serialize;

use crate::models::Choice;

/// Display state of the partner-details block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartnerSection {
    pub visible: bool,
    pub required: bool,
}

impl PartnerSection {
    pub fn for_choice(choice: Choice) -> Self {
        let shown = choice.is_yes();
        PartnerSection {
            visible: shown,
            required: shown,
        }
    }
}
