//! Coarse User-Agent classification for click events
//!
//! Wraps woothee to map a raw User-Agent header onto the two categories the
//! dashboard groups by: device category (pc, smartphone, crawler, ...) and
//! browser name. Anything woothee cannot identify becomes "unknown".

use woothee::parser::Parser;

pub const UNKNOWN: &str = "unknown";

/// Device and browser categories parsed from one User-Agent string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub device: String,
    pub browser: String,
}

/// Classifies a User-Agent header value, `None` meaning the header was absent
pub fn classify(user_agent: Option<&str>) -> ClientInfo {
    let Some(ua) = user_agent else {
        return ClientInfo {
            device: UNKNOWN.to_string(),
            browser: UNKNOWN.to_string(),
        };
    };

    let parsed = Parser::new().parse(ua);

    // woothee reports unrecognized fields as "UNKNOWN"
    let device = parsed
        .as_ref()
        .map(|r| r.category)
        .filter(|c| !c.is_empty() && *c != "UNKNOWN")
        .unwrap_or(UNKNOWN);
    let browser = parsed
        .as_ref()
        .map(|r| r.name)
        .filter(|n| !n.is_empty() && *n != "UNKNOWN")
        .unwrap_or(UNKNOWN);

    ClientInfo {
        device: device.to_string(),
        browser: browser.to_string(),
    }
}
