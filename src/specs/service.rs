// src/specs/service.rs
//! Modify-service page (`form[name=manage_service]`).
//!
//! Ground truth:
//! - Hidden inputs `userid`, `psid` (current plan), `unpause`, `service_id`,
//!   `upgrade_options`, `avcid`, `locid`, `coat`, `churn`.
//! - One `<span data-value="PSID">` per offered tier. Inside it the first
//!   `div.col-sm-4` holds the plan name, e.g. `Home Fast (100/40)`.
//!   Price comes from `data-price` when present, else the first `$` amount
//!   in the span's text. `data-ntd-upgrade` is optional.
//!
//! With `show_latest=1` the same page lists the latest-pricing offers
//! instead of the standard ones.

use scraper::{ElementRef, Html};

use crate::core::html;
use crate::core::sanitize::parse_cents;
use crate::error::{PortalError, Result};
use crate::model::{Offers, PlanOption, ServiceRecord};

pub const OFFER_SELECTOR: &str = "span[data-value]";
pub const NAME_SELECTOR: &str = "div.col-sm-4";

pub fn parse_record(doc: &Html) -> Result<ServiceRecord> {
    let required = |name: &str| -> Result<String> {
        html::input_value(doc, name)?
            .ok_or_else(|| PortalError::missing(join!("input '", name, "'")))
    };
    let optional = |name: &str| -> Result<String> {
        Ok(html::input_value(doc, name)?.unwrap_or_default())
    };

    let churn = html::input_value(doc, "churn")?;
    if churn.is_none() {
        logd!("No churn input on the modify-service page; sending it empty.");
    }

    Ok(ServiceRecord {
        avcid: required("avcid")?,
        user_id: required("userid")?,
        current_psid: required("psid")?,
        unpause: html::input_value(doc, "unpause")?.unwrap_or_else(|| s!("0")),
        service_id: required("service_id")?,
        upgrade_options: optional("upgrade_options")?,
        // Applied on the portal via a separate check_discount call; never on the form.
        discount_code: s!(),
        location_id: optional("locid")?,
        coat: optional("coat")?,
        churn: churn.unwrap_or_default(),
    })
}

pub fn parse_offers(doc: &Html) -> Result<Offers> {
    let sel = html::selector(OFFER_SELECTOR)?;
    let mut offers = Offers::new();
    for span in doc.select(&sel) {
        let psid = span.value().attr("data-value").map(str::trim).unwrap_or_default();
        if psid.is_empty() {
            logd!("Skipping offer without a psid: '{}'", html::text(span));
            continue;
        }
        offers.insert(parse_offer(span, s!(psid))?);
    }
    if offers.is_empty() {
        return Err(PortalError::missing(OFFER_SELECTOR));
    }
    logd!("Parsed {} offers.", offers.len());
    Ok(offers)
}

fn parse_offer(span: ElementRef, psid: String) -> Result<PlanOption> {
    let display_name = match html::first_in(span, NAME_SELECTOR)? {
        Some(div) => html::text(div),
        None => html::text(span),
    };

    let daily_spend_cents = span
        .value()
        .attr("data-price")
        .and_then(parse_cents)
        .or_else(|| {
            let text = html::text(span);
            text.find('$').and_then(|i| parse_cents(&text[i..]))
        })
        .unwrap_or_else(|| {
            logd!("No price for psid {psid}; listing it at $0.00.");
            0
        });

    Ok(PlanOption {
        ntd_upgrade_required: span.value().attr("data-ntd-upgrade").and_then(parse_flag),
        psid,
        display_name,
        daily_spend_cents,
    })
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
