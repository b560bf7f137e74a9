use serde::Deserialize;

/// Backend settings read from the `rsvp` table of `Rocket.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RsvpConfig {
    pub spreadsheet_url: String,
    pub use_spreadsheet: bool,
    pub forms_service_url: String,
    pub use_forms_service: bool,
    pub prefilled_form_url: String,
    pub use_prefilled_form: bool,
    pub prefilled_form_entries: FormEntries,
    pub use_form_hosting: bool,
}

/// Field ids of the external form, one per submission field.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FormEntries {
    pub name: String,
    pub email: String,
    pub partner: String,
    pub partner_name: String,
    pub partner_email: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
    pub dietary: String,
    pub kids: String,
    pub nannies: String,
    pub comments: String,
}

impl Default for FormEntries {
    fn default() -> Self {
        FormEntries {
            name: "entry.2046365531".into(),
            email: "entry.1603106130".into(),
            partner: "entry.2075552217".into(),
            partner_name: "entry.725726397".into(),
            partner_email: "entry.1231688777".into(),
            friday: "entry.463410502".into(),
            saturday: "entry.1022025180".into(),
            sunday: "entry.1175204969".into(),
            dietary: "entry.1483420764".into(),
            kids: "entry.75756871".into(),
            nannies: "entry.741249082".into(),
            comments: "entry.2114450058".into(),
        }
    }
}

impl FormEntries {
    /// Maps a key from `schema::FIELD_KEYS` to the external form's id.
    pub fn entry(&self, key: &str) -> Option<&str> {
        let id = match key {
            "name" => &self.name,
            "email" => &self.email,
            "partner" => &self.partner,
            "partnerName" => &self.partner_name,
            "partnerEmail" => &self.partner_email,
            "friday" => &self.friday,
            "saturday" => &self.saturday,
            "sunday" => &self.sunday,
            "dietary" => &self.dietary,
            "kids" => &self.kids,
            "nannies" => &self.nannies,
            "comments" => &self.comments,
            _ => return None,
        };
        Some(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendChoice {
    Spreadsheet { url: String },
    FormsService { url: String },
    PrefilledForm { url: String, entries: FormEntries },
    FormHosting,
    Simulation,
}

fn configured(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && !(url.starts_with("YOUR_") && url.ends_with("_HERE"))
}

impl RsvpConfig {
    /// First enabled backend wins, in a fixed order. With nothing enabled the
    /// form runs against the local simulation.
    pub fn backend(&self) -> BackendChoice {
        if self.use_spreadsheet && configured(&self.spreadsheet_url) {
            BackendChoice::Spreadsheet {
                url: self.spreadsheet_url.clone(),
            }
        } else if self.use_forms_service && configured(&self.forms_service_url) {
            BackendChoice::FormsService {
                url: self.forms_service_url.clone(),
            }
        } else if self.use_prefilled_form && configured(&self.prefilled_form_url) {
            BackendChoice::PrefilledForm {
                url: self.prefilled_form_url.clone(),
                entries: self.prefilled_form_entries.clone(),
            }
        } else if self.use_form_hosting {
            BackendChoice::FormHosting
        } else {
            BackendChoice::Simulation
        }
    }
}
