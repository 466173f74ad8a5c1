// src/specs/services.rs
//! Navigation pages between login and the modify-service page.
//!
//! - Landing page → `Services` link.
//! - Services list → `Show Advanced Info` link (`.../service_details/...`).
//! - The modify-service page is the same path with `service_details`
//!   swapped for `service`.

use scraper::Html;

use crate::config::consts::{ADVANCED_INFO_LINK_TEXT, DETAILS_SEGMENT, MODIFY_SEGMENT, SERVICES_LINK_TEXT};
use crate::core::html;
use crate::error::{PortalError, Result};

pub fn services_href(doc: &Html) -> Result<String> {
    html::link_by_text(doc, SERVICES_LINK_TEXT)?
        .ok_or_else(|| PortalError::missing(join!("link '", SERVICES_LINK_TEXT, "'")))
}

pub fn advanced_info_href(doc: &Html) -> Result<String> {
    html::link_by_text(doc, ADVANCED_INFO_LINK_TEXT)?
        .ok_or_else(|| PortalError::missing(join!("link '", ADVANCED_INFO_LINK_TEXT, "'")))
}

/// `/service_details?avcid=AVC1` → `/service?avcid=AVC1`. Only the first
/// occurrence is swapped.
pub fn modify_service_href(advanced_info: &str) -> String {
    advanced_info.replacen(DETAILS_SEGMENT, MODIFY_SEGMENT, 1)
}
