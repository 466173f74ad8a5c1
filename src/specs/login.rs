// src/specs/login.rs
//! Login page: `form#login-form` with `username` / `password` inputs.

use scraper::Html;

use crate::config::options::Credentials;
use crate::core::html::{self, Form};
use crate::error::Result;

pub const FORM_SELECTOR: &str = "form#login-form";

/// The login form with the credentials filled in.
pub fn filled_form(doc: &Html, creds: &Credentials) -> Result<Form> {
    let mut form = html::form(doc, FORM_SELECTOR)?;
    form.set("username", creds.username.as_str());
    form.set("password", creds.password.as_str());
    Ok(form)
}
