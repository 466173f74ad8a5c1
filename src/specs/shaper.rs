// src/specs/shaper.rs
//! Shaper form on the advanced-info page (`form#shaper-form`).
//!
//! - `queue_type`: radio, `shape` | `police`.
//! - `down_control` / `up_control`: `<select>` or radio, `none` | `default` | `override`.
//! - `down_speed` / `up_speed`: inputs carrying `min`, `max` and the current `value`.
//! - The form `action` is where changes are POSTed.

use scraper::{ElementRef, Html};

use crate::core::html;
use crate::error::{PortalError, Result};
use crate::model::{ControlMode, QueueType, ShaperLimit, ShaperSettings};

pub const FORM_SELECTOR: &str = "form#shaper-form";

pub fn parse(doc: &Html) -> Result<ShaperSettings> {
    let form = html::first(doc, FORM_SELECTOR)?
        .ok_or_else(|| PortalError::missing(join!("form ", FORM_SELECTOR)))?;

    let queue_type = choice(form, "queue_type")?
        .ok_or_else(|| PortalError::missing("checked queue_type"))?;
    let queue_type: QueueType = queue_type
        .parse()
        .map_err(|e| PortalError::missing(format!("queue_type: {e}")))?;

    let action = html::attr(form, "action")
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| PortalError::missing("shaper form action"))?;

    Ok(ShaperSettings {
        queue_type,
        down: limit(form, "down")?,
        up: limit(form, "up")?,
        action,
        fields: html::form_of(form)?.fields,
    })
}

fn limit(form: ElementRef, dir: &str) -> Result<ShaperLimit> {
    let control_name = join!(dir, "_control");
    let control = choice(form, &control_name)?.unwrap_or_default();
    let control: ControlMode = control
        .parse()
        .map_err(|e| PortalError::missing(format!("{control_name}: {e}")))?;

    let speed_name = join!(dir, "_speed");
    let input = html::first_in(form, &format!(r#"input[name="{speed_name}"]"#))?
        .ok_or_else(|| PortalError::missing(join!("input '", &speed_name, "'")))?;
    let bound = |attr: &str| {
        html::attr_u32(input, attr)
            .ok_or_else(|| PortalError::missing(format!("{speed_name} {attr}")))
    };

    Ok(ShaperLimit {
        control,
        min: bound("min")?,
        max: bound("max")?,
        current: html::attr_u32(input, "value"),
    })
}

/// Selected option of `<select name=..>`, else the checked radio of that name.
fn choice(form: ElementRef, name: &str) -> Result<Option<String>> {
    if let Some(select) = html::first_in(form, &format!(r#"select[name="{name}"]"#))? {
        return html::selected_option(select);
    }
    let checked = html::first_in(form, &format!(r#"input[name="{name}"][checked]"#))?;
    Ok(checked.map(|el| html::attr(el, "value").unwrap_or_default()))
}
