// src/config/consts.rs
use std::time::Duration;

pub const ISP: &str = "Launtel";

// Net config
pub const BASE_URL: &str = "https://residential.launtel.net.au";
pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const CONFIRM_PATH: &str = "/confirm_service";
pub const USER_AGENT: &str = "Firefox";
pub const SESSION_COOKIE: &str = "session_id";
// Sign-out runs after errors and interrupts too; never let it hang the exit.
pub const SIGN_OUT_TIMEOUT: Duration = Duration::from_secs(10);

// Links followed after login
pub const SERVICES_LINK_TEXT: &str = "Services";
pub const ADVANCED_INFO_LINK_TEXT: &str = "Show Advanced Info";
pub const DETAILS_SEGMENT: &str = "service_details";
pub const MODIFY_SEGMENT: &str = "service";
pub const LATEST_QUERY: (&str, &str) = ("show_latest", "1");

// Environment
pub const ENV_USERNAME: &str = "LAUNTEL_USERNAME";
pub const ENV_PASSWORD: &str = "LAUNTEL_PASSWORD";
pub const ENV_BASE_URL: &str = "LAUNTEL_BASE_URL";

// Shaper percentages of the rated plan speed
pub const DEFAULT_SHAPER_UP_PCT: u32 = 95;
pub const DEFAULT_SHAPER_DOWN_PCT: u32 = 108;
