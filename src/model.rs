// src/model.rs
//
// What the page models produce. Everything here is parsed once and then
// read-only for the rest of the run.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Hidden fields of the modify-service form for one access line (avcid).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceRecord {
    pub avcid: String,
    pub user_id: String,
    pub current_psid: String,
    pub unpause: String,
    pub service_id: String,
    pub upgrade_options: String,
    pub discount_code: String,
    pub location_id: String,
    pub coat: String,
    pub churn: String,
}

/// One offered speed tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanOption {
    pub psid: String,
    pub display_name: String,
    pub daily_spend_cents: u32,
    pub ntd_upgrade_required: Option<bool>,
}

impl PlanOption {
    pub fn daily_spend(&self) -> String {
        format!("${}.{:02}", self.daily_spend_cents / 100, self.daily_spend_cents % 100)
    }
}

/// Offer set keyed by psid. Order on the page carries no meaning.
#[derive(Clone, Debug, Default)]
pub struct Offers {
    by_psid: HashMap<String, PlanOption>,
}

impl Offers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later duplicates of a psid replace earlier ones.
    pub fn insert(&mut self, plan: PlanOption) {
        self.by_psid.insert(plan.psid.clone(), plan);
    }

    pub fn get(&self, psid: &str) -> Option<&PlanOption> {
        self.by_psid.get(psid)
    }

    pub fn contains(&self, psid: &str) -> bool {
        self.by_psid.contains_key(psid)
    }

    pub fn len(&self) -> usize {
        self.by_psid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_psid.is_empty()
    }

    /// Cheapest first; psid breaks ties so output is stable.
    pub fn sorted_by_spend(&self) -> Vec<&PlanOption> {
        let mut v: Vec<&PlanOption> = self.by_psid.values().collect();
        v.sort_by(|a, b| {
            a.daily_spend_cents
                .cmp(&b.daily_spend_cents)
                .then_with(|| a.psid.cmp(&b.psid))
        });
        v
    }

    pub fn any_ntd_flag(&self) -> bool {
        self.by_psid.values().any(|p| p.ntd_upgrade_required.is_some())
    }
}

impl FromIterator<PlanOption> for Offers {
    fn from_iter<I: IntoIterator<Item = PlanOption>>(iter: I) -> Self {
        let mut o = Offers::new();
        for p in iter {
            o.insert(p);
        }
        o
    }
}

/* ---------------- Shaper ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueType {
    Shape,
    Police,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMode {
    Off,
    Default,
    Override,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChoice(pub String);

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown choice `{}`", self.0)
    }
}

impl FromStr for QueueType {
    type Err = UnknownChoice;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shape" => Ok(QueueType::Shape),
            "police" => Ok(QueueType::Police),
            other => Err(UnknownChoice(s!(other))),
        }
    }
}

impl FromStr for ControlMode {
    type Err = UnknownChoice;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(ControlMode::Off),
            "default" => Ok(ControlMode::Default),
            "override" => Ok(ControlMode::Override),
            other => Err(UnknownChoice(s!(other))),
        }
    }
}

impl fmt::Display for QueueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { QueueType::Shape => "shape", QueueType::Police => "police" })
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ControlMode::Off => "none",
            ControlMode::Default => "default",
            ControlMode::Override => "override",
        })
    }
}

/// Server-declared limits for one direction, in Mbps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShaperLimit {
    pub control: ControlMode,
    pub min: u32,
    pub max: u32,
    pub current: Option<u32>,
}

impl ShaperLimit {
    pub fn accepts(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShaperSettings {
    pub queue_type: QueueType,
    pub down: ShaperLimit,
    pub up: ShaperLimit,
    /// Form action the change is POSTed to.
    pub action: String,
    /// Every successful control of the shaper form, as scraped.
    pub fields: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(psid: &str, cents: u32) -> PlanOption {
        PlanOption { psid: s!(psid), display_name: s!(psid), daily_spend_cents: cents, ntd_upgrade_required: None }
    }

    #[test]
    fn offers_sort_by_spend_not_insertion() {
        let offers: Offers = [plan("A", 1000), plan("B", 1500), plan("C", 800)].into_iter().collect();
        let order: Vec<&str> = offers.sorted_by_spend().iter().map(|p| p.psid.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn ties_fall_back_to_psid() {
        let offers: Offers = [plan("9", 500), plan("10", 500), plan("2", 100)].into_iter().collect();
        let order: Vec<&str> = offers.sorted_by_spend().iter().map(|p| p.psid.as_str()).collect();
        assert_eq!(order, vec!["2", "10", "9"]);
    }

    #[test]
    fn spend_formats_as_dollars() {
        assert_eq!(plan("x", 250).daily_spend(), "$2.50");
        assert_eq!(plan("x", 5).daily_spend(), "$0.05");
    }

    #[test]
    fn choices_parse() {
        assert_eq!("Police".parse::<QueueType>(), Ok(QueueType::Police));
        assert_eq!("none".parse::<ControlMode>(), Ok(ControlMode::Off));
        assert_eq!(ControlMode::Override.to_string(), "override");
        assert!("fast".parse::<QueueType>().is_err());
    }

    #[test]
    fn limits_are_inclusive() {
        let l = ShaperLimit { control: ControlMode::Default, min: 10, max: 1000, current: None };
        assert!(l.accepts(10) && l.accepts(1000));
        assert!(!l.accepts(9) && !l.accepts(1001));
    }
}
