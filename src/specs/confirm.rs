// src/specs/confirm.rs
//! Confirmation page reached via `/confirm_service?...`. Holds
//! `form[name=confirm_service]`, which commits the change when submitted.

use scraper::Html;

use crate::core::html::{self, Form};
use crate::error::Result;

pub const FORM_SELECTOR: &str = r#"form[name="confirm_service"]"#;

pub fn form(doc: &Html) -> Result<Form> {
    html::form(doc, FORM_SELECTOR)
}
