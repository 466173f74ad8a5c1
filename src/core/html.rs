// src/core/html.rs
//
// Thin helpers over `scraper` for the handful of things the page models
// need: first match, attribute, normalized text, links by text, forms.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;
use crate::error::{PortalError, Result};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| PortalError::BadSelector(s!(css)))
}

pub fn first<'a>(doc: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(doc.select(&sel).next())
}

pub fn first_in<'a>(el: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(el.select(&sel).next())
}

/// Element text with whitespace collapsed.
pub fn text(el: ElementRef) -> String {
    normalize_ws(&el.text().collect::<String>())
}

pub fn attr(el: ElementRef, name: &str) -> Option<String> {
    el.value().attr(name).map(String::from)
}

/// Integer attribute such as `min="0"`; blank or non-numeric → None.
pub fn attr_u32(el: ElementRef, name: &str) -> Option<u32> {
    el.value().attr(name)?.trim().parse().ok()
}

/// `value` of `<input name="...">`, or None when the input is absent.
pub fn input_value(doc: &Html, name: &str) -> Result<Option<String>> {
    let css = format!(r#"input[name="{name}"]"#);
    Ok(first(doc, &css)?.map(|el| attr(el, "value").unwrap_or_default()))
}

/// `href` of the first `<a>` whose text is exactly `label`.
pub fn link_by_text(doc: &Html, label: &str) -> Result<Option<String>> {
    let sel = selector("a[href]")?;
    Ok(doc
        .select(&sel)
        .find(|a| text(*a) == label)
        .and_then(|a| attr(a, "href")))
}

/// Value of the selected `<option>` in a `<select>`, else its first option.
pub fn selected_option(select: ElementRef) -> Result<Option<String>> {
    let chosen = match first_in(select, "option[selected]")? {
        Some(o) => Some(o),
        None => first_in(select, "option")?,
    };
    Ok(chosen.map(|o| attr(o, "value").unwrap_or_else(|| text(o))))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A scraped `<form>` ready to resubmit as a browser would.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Form {
    pub action: Option<String>,
    pub method: Method,
    pub fields: Vec<(String, String)>,
}

impl Form {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Replace the first field called `name`, or append it.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((s!(name), value)),
        }
    }
}

pub fn form(doc: &Html, css: &str) -> Result<Form> {
    let el = first(doc, css)?.ok_or_else(|| PortalError::missing(join!("form ", css)))?;
    form_of(el)
}

/// Collect the successful controls of a form: named inputs (checked ones
/// only for radios/checkboxes, the first submit button only), selects,
/// textareas.
pub fn form_of(form: ElementRef) -> Result<Form> {
    let method = match form.value().attr("method") {
        Some(m) if m.eq_ignore_ascii_case("post") => Method::Post,
        _ => Method::Get,
    };
    let mut fields = Vec::new();
    let mut seen_submit = false;

    let controls = selector("input, select, textarea")?;
    for el in form.select(&controls) {
        let Some(name) = el.value().attr("name") else { continue };
        let value = match el.value().name() {
            "select" => selected_option(el)?.unwrap_or_default(),
            "textarea" => el.text().collect(),
            _ => {
                let kind = el.value().attr("type").unwrap_or("text").to_ascii_lowercase();
                match kind.as_str() {
                    "radio" | "checkbox" => {
                        if el.value().attr("checked").is_none() {
                            continue;
                        }
                        attr(el, "value").unwrap_or_else(|| s!("on"))
                    }
                    "submit" | "image" | "button" => {
                        if seen_submit {
                            continue;
                        }
                        seen_submit = true;
                        attr(el, "value").unwrap_or_default()
                    }
                    "reset" | "file" => continue,
                    _ => attr(el, "value").unwrap_or_default(),
                }
            }
        };
        fields.push((s!(name), value));
    }

    Ok(Form { action: attr(form, "action"), method, fields })
}
