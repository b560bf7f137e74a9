#[macro_use] extern crate rocket;
use rocket::fairing::AdHoc;
use rocket::form::Form;
use rocket::response::Redirect;
use rocket::{Build, Rocket, State};
use rocket_dyn_templates::{Template, context};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use wedding_rsvp_intake::backend::{self, Backend, Receipt};
use wedding_rsvp_intake::config::RsvpConfig;
use wedding_rsvp_intake::models::{Choice, Day, RsvpForm};
use wedding_rsvp_intake::notice::{Notice, NoticeSlot};
use wedding_rsvp_intake::validate::validate;
use wedding_rsvp_intake::visibility::PartnerSection;

struct Intake {
    backend: Box<dyn Backend>,
}

fn render_page(form: &RsvpForm, notice: Option<Notice>, external_url: Option<String>) -> Template {
    let days: Vec<_> = Day::ALL.iter().map(|day| context! {
        key: day.key(),
        event: day.event(),
        choice: form.day(*day),
    }).collect();

    Template::render("rsvp", context! {
        form: form,
        partner: form.partner_choice(),
        partner_section: PartnerSection::for_choice(form.partner_choice()),
        days: days,
        nannies: Choice::parse(form.nannies.as_deref()),
        notice: notice,
        external_url: external_url,
    })
}

#[get("/")]
fn home() -> Redirect {
    Redirect::to(uri!(rsvp_page))
}

#[get("/rsvp")]
fn rsvp_page() -> Template {
    render_page(&RsvpForm::default(), None, None)
}

#[post("/rsvp", data = "<form>")]
async fn rsvp_submit(form: Form<RsvpForm>, intake: &State<Intake>) -> Template {
    let mut form = form.into_inner();
    form.apply_partner_choice();
    let mut notice = NoticeSlot::default();

    let rsvp = match validate(&form) {
        Ok(rsvp) => rsvp,
        Err(e) => {
            debug!(reason = ?e, "RSVP rejected by validation");
            notice.error(e.to_string());
            return render_page(&form, notice.into_current(), None);
        }
    };

    match backend::dispatch(intake.backend.as_ref(), &rsvp).await {
        Ok(receipt) => {
            notice.success(receipt.message());
            let external_url = match receipt {
                Receipt::OpenExternal(url) => Some(url.to_string()),
                _ => None,
            };
            render_page(&RsvpForm::default(), notice.into_current(), external_url)
        },
        Err(e) => {
            notice.error(e.user_message());
            render_page(&form, notice.into_current(), None)
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    // rocket may already have a logger installed when run under tests
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/", routes![home, rsvp_page, rsvp_submit])
        .attach(Template::fairing())
}

#[launch]
fn rocket() -> _ {
    init_tracing();
    mount(rocket::build())
        .attach(AdHoc::try_on_ignite("RSVP backend", |rocket| async move {
            let config: RsvpConfig = match rocket.figment().focus("rsvp").extract() {
                Ok(config) => config,
                Err(e) => {
                    error!(error = %e, "invalid rsvp configuration");
                    return Err(rocket);
                },
            };

            match backend::from_choice(config.backend()) {
                Ok(backend) => {
                    info!(backend = backend.name(), "RSVP backend selected");
                    Ok(rocket.manage(Intake { backend }))
                },
                Err(e) => {
                    error!(error = %e, "could not build RSVP backend");
                    Err(rocket)
                },
            }
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::Client;
    use std::sync::{Arc, Mutex};
    use url::Url;
    use wedding_rsvp_intake::backend::Simulation;
    use wedding_rsvp_intake::error::SubmitError;
    use wedding_rsvp_intake::models::RsvpSubmission;

    #[derive(Clone, Default)]
    struct Recorder {
        seen: Arc<Mutex<Vec<RsvpSubmission>>>,
        outcome: Option<Receipt>,
    }

    #[rocket::async_trait]
    impl Backend for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        async fn submit(&self, rsvp: &RsvpSubmission) -> Result<Receipt, SubmitError> {
            self.seen.lock().unwrap().push(rsvp.clone());
            self.outcome.clone().ok_or(SubmitError::Rejected { message: None })
        }
    }

    async fn client(backend: impl Backend + 'static) -> Client {
        let rocket = mount(rocket::build()).manage(Intake { backend: Box::new(backend) });
        Client::tracked(rocket).await.unwrap()
    }

    async fn post(client: &Client, body: &str) -> String {
        let response = client.post(uri!(rsvp_submit))
            .header(ContentType::Form)
            .body(body)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        response.into_string().await.unwrap()
    }

    fn notice_count(page: &str) -> usize {
        page.matches("class=\"notification notification-").count()
    }

    #[rocket::async_test]
    async fn home_redirects_to_form() {
        let client = client(Recorder::default()).await;
        let response = client.get("/").dispatch().await;
        assert_eq!(response.status(), Status::SeeOther);
        assert_eq!(response.headers().get_one("Location"), Some("/rsvp"));

        let page = client.get("/rsvp").dispatch().await.into_string().await.unwrap();
        assert!(page.contains("id=\"rsvpForm\""));
        assert_eq!(notice_count(&page), 0);
    }

    #[rocket::async_test]
    async fn missing_name_never_reaches_backend() {
        let recorder = Recorder::default();
        let client = client(recorder.clone()).await;

        let page = post(&client, "name=&email=ana%40x.com&friday=yes").await;
        assert!(page.contains("Please fill in all required fields."));
        assert!(page.contains("value=\"ana@x.com\""));
        assert_eq!(notice_count(&page), 1);
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[rocket::async_test]
    async fn simulated_submission_clears_form() {
        let client = client(Simulation::default()).await;

        let page = post(&client, "name=Ana&email=ana%40x.com&partner=no&friday=yes").await;
        assert!(page.contains("Thank you! Your RSVP has been submitted successfully. (Test Mode)"));
        assert!(page.contains("notification-success"));
        assert!(!page.contains("value=\"Ana\""));
        assert!(!page.contains("value=\"ana@x.com\""));
        assert_eq!(notice_count(&page), 1);
    }

    #[rocket::async_test]
    async fn partner_details_dropped_when_not_bringing_partner() {
        let recorder = Recorder { outcome: Some(Receipt::Recorded), ..Default::default() };
        let client = client(recorder.clone()).await;

        let page = post(&client, "name=Ana&email=ana%40x.com&partner=no\
            &partnerName=Sam&partnerEmail=bogus&saturday=yes").await;
        assert!(page.contains("Thank you! Your RSVP has been submitted successfully."));

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(!seen[0].has_partner());
    }

    #[rocket::async_test]
    async fn partner_email_checked_when_bringing_partner() {
        let recorder = Recorder::default();
        let client = client(recorder.clone()).await;

        let page = post(&client, "name=Ana&email=ana%40x.com&partner=yes\
            &partnerName=Sam&partnerEmail=not-an-email&friday=yes").await;
        assert!(page.contains("Please enter a valid email address for your partner."));
        // partner block stays open with the entered values
        assert!(page.contains("value=\"Sam\""));
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[rocket::async_test]
    async fn backend_failure_keeps_values() {
        let recorder = Recorder::default();
        let client = client(recorder.clone()).await;

        let page = post(&client, "name=Ana&email=ana%40x.com&sunday=yes").await;
        assert!(page.contains("There was an error submitting your RSVP. Please try again."));
        assert!(page.contains("notification-error"));
        assert!(page.contains("value=\"Ana\""));
        assert_eq!(recorder.seen.lock().unwrap().len(), 1);
    }

    #[rocket::async_test]
    async fn prefilled_form_opens_external_url() {
        let url = Url::parse("https://forms.example/viewform?entry.1=Ana").unwrap();
        let recorder = Recorder { outcome: Some(Receipt::OpenExternal(url)), ..Default::default() };
        let client = client(recorder).await;

        let page = post(&client, "name=Ana&email=ana%40x.com&friday=yes").await;
        assert!(page.contains("A prefilled form has opened."));
        assert!(page.contains("data-external-url=\"https://forms.example/viewform?entry.1=Ana\""));
        assert!(!page.contains("value=\"Ana\""));
    }
}
