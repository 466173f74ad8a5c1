// src/plan.rs
//
// Plan-change policy and the confirmation request built from it.

use url::Url;

use crate::config::consts::CONFIRM_PATH;
use crate::error::Result;
use crate::model::{Offers, ServiceRecord};

/// A requested psid is acceptable when it is on offer and is an actual
/// change. Re-selecting the current plan only makes sense under latest
/// pricing, where it moves the service onto the new price.
pub fn check_psid(requested: &str, current: &str, offers: &Offers, latest: bool) -> bool {
    if !offers.contains(requested) {
        return false;
    }
    latest || requested != current
}

/// `/confirm_service?userid=..&psid=..&...` resolved against `base`.
/// Parameter order matches what the portal's own link produces.
pub fn confirm_url(base: &Url, record: &ServiceRecord, psid: &str) -> Result<Url> {
    let mut url = base.join(CONFIRM_PATH)?;
    url.query_pairs_mut()
        .clear()
        .append_pair("userid", &record.user_id)
        .append_pair("psid", psid)
        .append_pair("unpause", &record.unpause)
        .append_pair("service_id", &record.service_id)
        .append_pair("upgrade_options", &record.upgrade_options)
        .append_pair("discount_code", &record.discount_code)
        .append_pair("avcid", &record.avcid)
        .append_pair("locid", &record.location_id)
        .append_pair("coat", &record.coat)
        .append_pair("churn", &record.churn);
    Ok(url)
}
