// src/status.rs
//
// Outcome detection from the portal's alert banner. The portal has no
// machine-readable status, so these phrases are an external contract: a
// wording change upstream silently breaks detection.

use scraper::Html;

use crate::core::html;
use crate::error::Result;

/// Where the portal renders its flash messages.
pub const BANNER_SELECTOR: &str = "div.alert-content";

pub const LOGIN_FAILED: &str = "Sorry incorrect login details";
pub const CHANGE_IN_PROGRESS: &str = "Change in progress";
pub const SHAPER_UPDATED: &str = "Shaping settings updated";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusOutcome {
    LoginFailed,
    ChangeInProgress,
    ShaperUpdated,
    Unrecognised,
}

/// Classify banner text. Case-sensitive substring match.
pub fn classify(banner: &str) -> StatusOutcome {
    if banner.contains(LOGIN_FAILED) {
        StatusOutcome::LoginFailed
    } else if banner.contains(CHANGE_IN_PROGRESS) {
        StatusOutcome::ChangeInProgress
    } else if banner.contains(SHAPER_UPDATED) {
        StatusOutcome::ShaperUpdated
    } else {
        StatusOutcome::Unrecognised
    }
}

/// Text of every banner on the page, joined; empty when there are none.
pub fn banner_text(doc: &Html) -> Result<String> {
    let sel = html::selector(BANNER_SELECTOR)?;
    let parts: Vec<String> = doc.select(&sel).map(html::text).filter(|t| !t.is_empty()).collect();
    Ok(parts.join(" | "))
}
