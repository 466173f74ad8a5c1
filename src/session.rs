// src/session.rs
//
// One authenticated conversation with the portal. Each step fetches a page,
// hands it to the matching spec, and records where the browser now is.
// Nothing here is global: the runner owns the session and threads it
// through the steps.

use scraper::Html;
use url::Url;

use crate::config::consts::{ISP, LATEST_QUERY, LOGIN_PATH, LOGOUT_PATH, SESSION_COOKIE};
use crate::config::options::Credentials;
use crate::core::html::{Form, Method};
use crate::core::net::{Page, Transport, encode_form};
use crate::error::{PortalError, Result};
use crate::model::{Offers, PlanOption, ServiceRecord, ShaperSettings};
use crate::shaper::{self, ShaperCommit};
use crate::status::{self, StatusOutcome};
use crate::{plan, specs};

/// Everything scraped from the service pages.
#[derive(Clone, Debug)]
pub struct Discovery {
    pub record: ServiceRecord,
    /// Active offer set: latest pricing when requested, else the standard one.
    pub offers: Offers,
    /// The current plan as listed on the standard page.
    pub current_plan: Option<PlanOption>,
    pub advanced_info: Url,
    pub modify_service: Url,
}

pub struct Session<T: Transport> {
    transport: T,
    base: Url,
    current: Url,
    established: bool,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, base: Url) -> Self {
        Self { current: base.clone(), transport, base, established: false }
    }

    /// True between a successful login and sign-out.
    pub fn is_established(&self) -> bool {
        self.established
    }

    async fn get(&mut self, url: Url) -> Result<Page> {
        let page = self.transport.get(url).await?;
        self.current = page.url.clone();
        Ok(page)
    }

    async fn post(&mut self, url: Url, fields: &[(String, String)]) -> Result<Page> {
        let page = self.transport.post_form(url, encode_form(fields)).await?;
        self.current = page.url.clone();
        Ok(page)
    }

    /// Submit a scraped form the way a browser would: relative to the page
    /// it came from, by its own method.
    async fn submit(&mut self, form: &Form) -> Result<Page> {
        let url = match form.action.as_deref().filter(|a| !a.trim().is_empty()) {
            Some(action) => self.current.join(action)?,
            None => self.current.clone(),
        };
        match form.method {
            Method::Post => self.post(url, &form.fields).await,
            Method::Get => {
                let mut url = url;
                url.query_pairs_mut()
                    .clear()
                    .extend_pairs(form.fields.iter().map(|(k, v)| (k.as_str(), v.as_str())));
                self.get(url).await
            }
        }
    }

    /// Log in and return the landing page. A rejection is final: the
    /// portal locks accounts after repeated failures, so nothing retries.
    pub async fn login(&mut self, creds: &Credentials) -> Result<Page> {
        let login_url = self.base.join(LOGIN_PATH)?;
        let page = self.get(login_url).await?;
        let form = specs::login::filled_form(&Html::parse_document(&page.body), creds)?;

        let landing = self.submit(&form).await?;
        let banner = status::banner_text(&Html::parse_document(&landing.body))?;
        if status::classify(&banner) == StatusOutcome::LoginFailed {
            logf!("Login Failure.");
            logd!("{ISP} alert content : {banner}");
            return Err(PortalError::LoginRejected(banner));
        }

        self.established = true;
        logf!("Login Successful.");
        if let Some(id) = self.transport.cookie(&self.current, SESSION_COOKIE) {
            logd!("{SESSION_COOKIE}={id}");
        }
        Ok(landing)
    }

    /// Landing → Services → advanced info link → modify-service page.
    pub async fn discover(&mut self, landing: &Page, latest: bool) -> Result<Discovery> {
        let services = specs::services::services_href(&Html::parse_document(&landing.body))?;
        let services_url = self.current.join(&services)?;
        let page = self.get(services_url).await?;

        let details = specs::services::advanced_info_href(&Html::parse_document(&page.body))?;
        let advanced_info = self.current.join(&details)?;
        let modify_service = self.current.join(&specs::services::modify_service_href(&details))?;

        let page = self.get(modify_service.clone()).await?;
        let (record, standard) = {
            let doc = Html::parse_document(&page.body);
            (specs::service::parse_record(&doc)?, specs::service::parse_offers(&doc)?)
        };
        logf!("Current psid:{}", record.current_psid);
        let current_plan = standard.get(&record.current_psid).cloned();

        let offers = if latest {
            let mut url = modify_service.clone();
            url.query_pairs_mut().append_pair(LATEST_QUERY.0, LATEST_QUERY.1);
            let page = self.get(url).await?;
            logf!("Using latest pricing offers.");
            specs::service::parse_offers(&Html::parse_document(&page.body))?
        } else {
            standard
        };

        Ok(Discovery { record, offers, current_plan, advanced_info, modify_service })
    }

    pub async fn shaper_settings(&mut self, advanced_info: &Url) -> Result<ShaperSettings> {
        let page = self.get(advanced_info.clone()).await?;
        specs::shaper::parse(&Html::parse_document(&page.body))
    }

    /// POST new caps to the form's action and check the banner.
    pub async fn submit_shaper(&mut self, settings: &ShaperSettings, commit: ShaperCommit) -> Result<()> {
        let url = self.current.join(&settings.action)?;
        let page = self.post(url, &shaper::payload(settings, commit)).await?;
        let banner = status::banner_text(&Html::parse_document(&page.body))?;
        if status::classify(&banner) != StatusOutcome::ShaperUpdated {
            loge!("Shaper change not confirmed by {ISP}: `{banner}`");
            return Err(PortalError::StatusMismatch { action: "shaper update", status: banner });
        }
        logf!("{banner}");
        Ok(())
    }

    /// Fetch the confirmation page for `psid`; with `commit`, submit it.
    /// Returns whether the change was submitted.
    pub async fn confirm(&mut self, record: &ServiceRecord, psid: &str, commit: bool) -> Result<bool> {
        let url = plan::confirm_url(&self.current, record, psid)?;
        logd!("confirm url:{url}");
        let page = self.get(url).await?;
        if !commit {
            logf!("Commit is False; not submitting psid {psid}.");
            return Ok(false);
        }

        let form = specs::confirm::form(&Html::parse_document(&page.body))?;
        let page = self.submit(&form).await?;
        let banner = status::banner_text(&Html::parse_document(&page.body))?;
        if status::classify(&banner) != StatusOutcome::ChangeInProgress {
            loge!("Plan change not confirmed by {ISP}: `{banner}`");
            return Err(PortalError::StatusMismatch { action: "plan change", status: banner });
        }
        logf!("{banner}");
        Ok(true)
    }

    /// Release the remote session. No-op when never logged in.
    pub async fn sign_out(&mut self) -> Result<()> {
        if !self.established {
            return Ok(());
        }
        let url = self.base.join(LOGOUT_PATH)?;
        self.established = false;
        self.get(url).await?;
        logf!("Signed out.");
        Ok(())
    }
}
