// src/shaper.rs
//
// Shaper caps as a percentage of the plan's rated speed.

use crate::config::options::ShaperRequest;
use crate::core::sanitize::speed_pair;
use crate::error::{PortalError, Result};
use crate::model::{ControlMode, PlanOption, ShaperLimit, ShaperSettings};

/// Values that would be submitted, in Mbps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShaperCommit {
    pub down: u32,
    pub up: u32,
}

/// `floor(rated * pct / 100)`, saturating at `u32::MAX`.
pub fn scale(rated: u32, pct: u32) -> u32 {
    let v = u64::from(rated) * u64::from(pct) / 100;
    u32::try_from(v).unwrap_or(u32::MAX)
}

/// Rated `(down, up)` of a plan, from the `(down/up)` in its name.
pub fn rated_speeds(plan: &PlanOption) -> Result<(u32, u32)> {
    speed_pair(&plan.display_name).ok_or_else(|| PortalError::SpeedPair(plan.display_name.clone()))
}

pub fn compute(rated: (u32, u32), req: ShaperRequest) -> ShaperCommit {
    ShaperCommit { down: scale(rated.0, req.down_pct), up: scale(rated.1, req.up_pct) }
}

/// Both directions must sit inside the server's declared bounds.
/// Checked before anything is sent.
pub fn validate(commit: ShaperCommit, settings: &ShaperSettings) -> Result<()> {
    check("down", commit.down, &settings.down)?;
    check("up", commit.up, &settings.up)
}

fn check(direction: &'static str, value: u32, limit: &ShaperLimit) -> Result<()> {
    if limit.accepts(value) {
        return Ok(());
    }
    loge!("Requested {direction} speed {value} outside [{}, {}].", limit.min, limit.max);
    Err(PortalError::ShaperBounds { direction, value, min: limit.min, max: limit.max })
}

/// Scraped form fields with the new values and both directions forced to
/// `override`.
pub fn payload(settings: &ShaperSettings, commit: ShaperCommit) -> Vec<(String, String)> {
    let mut fields = settings.fields.clone();
    let mut set = |name: &str, value: String| {
        match fields.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => fields.push((s!(name), value)),
        }
    };
    set("queue_type", settings.queue_type.to_string());
    set("down_control", ControlMode::Override.to_string());
    set("up_control", ControlMode::Override.to_string());
    set("down_speed", commit.down.to_string());
    set("up_speed", commit.up.to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QueueType;

    fn settings(max_down: u32, max_up: u32) -> ShaperSettings {
        let limit = |max| ShaperLimit { control: ControlMode::Default, min: 1, max, current: Some(max) };
        ShaperSettings {
            queue_type: QueueType::Shape,
            down: limit(max_down),
            up: limit(max_up),
            action: s!("/shaper"),
            fields: vec![(s!("avcid"), s!("AVC1")), (s!("down_control"), s!("default"))],
        }
    }

    #[test]
    fn scale_truncates() {
        assert_eq!(scale(1000, 108), 1080);
        assert_eq!(scale(50, 95), 47);
        assert_eq!(scale(40, 95), 38);
        assert_eq!(scale(0, 108), 0);
        assert_eq!(scale(u32::MAX, 200), u32::MAX);
    }

    #[test]
    fn gigabit_plan_with_default_percentages() {
        let plan = PlanOption {
            psid: s!("A"),
            display_name: s!("Superfast (1000/50)"),
            daily_spend_cents: 300,
            ntd_upgrade_required: None,
        };
        let commit = compute(rated_speeds(&plan).unwrap(), ShaperRequest::default());
        assert_eq!(commit, ShaperCommit { down: 1080, up: 47 });

        let err = validate(commit, &settings(1000, 60)).unwrap_err();
        assert!(matches!(err, PortalError::ShaperBounds { direction: "down", value: 1080, max: 1000, .. }));
        assert!(validate(commit, &settings(1100, 60)).is_ok());
    }

    #[test]
    fn up_checked_too() {
        let commit = ShaperCommit { down: 10, up: 61 };
        assert!(matches!(validate(commit, &settings(100, 60)), Err(PortalError::ShaperBounds { direction: "up", .. })));
    }

    #[test]
    fn payload_forces_override() {
        let p = payload(&settings(1100, 60), ShaperCommit { down: 1080, up: 47 });
        let get = |k: &str| p.iter().find(|(n, _)| n == k).map(|(_, v)| v.as_str());
        assert_eq!(get("avcid"), Some("AVC1"));
        assert_eq!(get("down_control"), Some("override"));
        assert_eq!(get("up_control"), Some("override"));
        assert_eq!(get("down_speed"), Some("1080"));
        assert_eq!(get("up_speed"), Some("47"));
        assert_eq!(get("queue_type"), Some("shape"));
    }

    #[test]
    fn plan_name_without_pair() {
        let plan = PlanOption { psid: s!("S"), display_name: s!("Standby"), daily_spend_cents: 0, ntd_upgrade_required: None };
        assert!(matches!(rated_speeds(&plan), Err(PortalError::SpeedPair(_))));
    }
}
