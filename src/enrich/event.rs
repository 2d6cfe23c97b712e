use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel event number for unparseable labels; sorts after every real event.
pub const EVENT_NUM_SENTINEL: u32 = 999;

static EVENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)(.*)$").unwrap());

/// Splits an event label into its leading number and trailing suffix.
///
/// The label is trimmed and lowercased before matching. Labels without a
/// leading digit run (including absent or empty input) map to
/// `(EVENT_NUM_SENTINEL, original_or_empty)`. Total over all input.
pub fn parse_event(event: Option<&str>) -> (u32, String) {
    let Some(raw) = event else {
        return (EVENT_NUM_SENTINEL, String::new());
    };
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return (EVENT_NUM_SENTINEL, String::new());
    }
    match EVENT_RE.captures(&normalized) {
        Some(caps) => {
            // Absurdly long digit runs clamp to the sentinel
            let number = caps[1].parse().unwrap_or(EVENT_NUM_SENTINEL);
            (number, caps[2].to_string())
        }
        None => (EVENT_NUM_SENTINEL, raw.to_string()),
    }
}
