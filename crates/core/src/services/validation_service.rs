use std::collections::HashSet;

use reqwest::Url;

use crate::errors::CoreError;
use crate::models::payload::StockDataPayload;
use crate::models::settings::MarketSettings;
use crate::models::stock::{StockDraft, StockFields, StockItem};
use crate::models::violation::Violations;

pub const NAME_MIN_LEN: usize = 2;
pub const DESCRIPTION_MIN_LEN: usize = 10;
pub const DESCRIPTION_MAX_LEN: usize = 200;
pub const MARKET_LOCATION_MIN_LEN: usize = 3;
pub const CLOSURE_REASON_MIN_LEN: usize = 10;

const MSG_NAME: &str = "Name must be at least 2 characters.";
const MSG_AMOUNT_NAN: &str = "Amount must be a number.";
const MSG_AMOUNT_INT: &str = "Amount must be a whole number.";
const MSG_AMOUNT_POSITIVE: &str = "Amount must be a positive number.";
const MSG_AMOUNT_RANGE: &str = "Amount is too large.";
const MSG_DESCRIPTION_SHORT: &str = "Description must be at least 10 characters.";
const MSG_DESCRIPTION_LONG: &str = "Description must not exceed 200 characters.";
const MSG_IMAGE_URL: &str = "Please enter a valid image URL.";
const MSG_LOCATION: &str = "Market location must be at least 3 characters.";
const MSG_CLOSURE: &str =
    "A closure reason of at least 10 characters is required when the market is closed.";
const MSG_DUPLICATE_ID: &str = "Duplicate stock id.";

/// Field-level validation rules for stock items and market settings.
///
/// Pure: no I/O, no state. Every check runs and every failure is reported,
/// so a form can show all messages at once.
pub struct ValidationService;

impl ValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Validate an item that is already typed (e.g. one loaded from the server).
    pub fn validate_item(&self, item: &StockItem) -> Result<(), CoreError> {
        let mut v = Violations::new();
        self.check_item(item, &mut v);
        v.into_result().map_err(CoreError::Validation)
    }

    /// Validate raw form input and coerce it into typed item fields.
    pub fn validate_draft(&self, draft: &StockDraft) -> Result<StockFields, CoreError> {
        let mut v = Violations::new();

        check_name(&draft.name, &mut v);
        let amount = parse_amount(&draft.amount, &mut v);
        check_description(&draft.description, &mut v);
        check_image_url(&draft.image_url, &mut v);

        match (v.into_result(), amount) {
            (Ok(()), Some(amount)) => Ok(StockFields {
                name: draft.name.clone(),
                amount,
                description: draft.description.clone(),
                image_url: draft.image_url.clone(),
            }),
            (Err(v), _) => Err(CoreError::Validation(v)),
            // parse_amount always records a violation when it returns None
            (Ok(()), None) => {
                let mut v = Violations::new();
                v.push("amount", MSG_AMOUNT_NAN);
                Err(CoreError::Validation(v))
            }
        }
    }

    /// Validate market settings, including the closed-market cross-field rule.
    pub fn validate_settings(&self, settings: &MarketSettings) -> Result<(), CoreError> {
        let mut v = Violations::new();
        self.check_settings(settings, &mut v);
        v.into_result().map_err(CoreError::Validation)
    }

    /// Validate a full payload before it is sent to the server.
    ///
    /// Paths are prefixed: `stocks[3].name`, `marketSettings.closureReason`.
    pub fn validate_payload(&self, payload: &StockDataPayload) -> Result<(), CoreError> {
        let mut all = Violations::new();
        let mut seen = HashSet::with_capacity(payload.stocks.len());

        for (idx, item) in payload.stocks.iter().enumerate() {
            let mut v = Violations::new();
            if !seen.insert(&item.id) {
                v.push("id", MSG_DUPLICATE_ID);
            }
            self.check_item(item, &mut v);
            all.extend_prefixed(&format!("stocks[{idx}]"), v);
        }

        let mut v = Violations::new();
        self.check_settings(&payload.market_settings, &mut v);
        all.extend_prefixed("marketSettings", v);

        all.into_result().map_err(CoreError::Validation)
    }

    fn check_item(&self, item: &StockItem, v: &mut Violations) {
        check_name(&item.name, v);
        if item.amount <= 0 {
            v.push("amount", MSG_AMOUNT_POSITIVE);
        }
        check_description(&item.description, v);
        check_image_url(&item.image_url, v);
    }

    fn check_settings(&self, settings: &MarketSettings, v: &mut Violations) {
        if char_len(&settings.market_location) < MARKET_LOCATION_MIN_LEN {
            v.push("marketLocation", MSG_LOCATION);
        }
        if !settings.market_status {
            let reason_len = settings.closure_reason.as_deref().map_or(0, char_len);
            if reason_len < CLOSURE_REASON_MIN_LEN {
                v.push("closureReason", MSG_CLOSURE);
            }
        }
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn check_name(name: &str, v: &mut Violations) {
    if char_len(name) < NAME_MIN_LEN {
        v.push("name", MSG_NAME);
    }
}

fn check_description(description: &str, v: &mut Violations) {
    let len = char_len(description);
    if len < DESCRIPTION_MIN_LEN {
        v.push("description", MSG_DESCRIPTION_SHORT);
    } else if len > DESCRIPTION_MAX_LEN {
        v.push("description", MSG_DESCRIPTION_LONG);
    }
}

fn check_image_url(url: &str, v: &mut Violations) {
    let ok = Url::parse(url).map(|u| u.has_host()).unwrap_or(false);
    if !ok {
        v.push("imageUrl", MSG_IMAGE_URL);
    }
}

/// Coerce form text to a positive integer amount.
///
/// Blank input counts as 0, like a numeric form field left empty. `Infinity`
/// is a number but not a whole one. Returns
/// `None` after recording at least one violation.
fn parse_amount(raw: &str, v: &mut Violations) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        v.push("amount", MSG_AMOUNT_POSITIVE);
        return None;
    }

    if let Ok(n) = raw.parse::<i64>() {
        if n <= 0 {
            v.push("amount", MSG_AMOUNT_POSITIVE);
            return None;
        }
        return Some(n);
    }

    let Some(n) = coerce_number(raw) else {
        v.push("amount", MSG_AMOUNT_NAN);
        return None;
    };

    let mut ok = true;
    if n.fract() != 0.0 {
        v.push("amount", MSG_AMOUNT_INT);
        ok = false;
    }
    if n <= 0.0 {
        v.push("amount", MSG_AMOUNT_POSITIVE);
        ok = false;
    }
    if !ok {
        return None;
    }
    // Integral forms such as "1e3" or "0x10" land here.
    if n >= i64::MAX as f64 {
        v.push("amount", MSG_AMOUNT_RANGE);
        return None;
    }
    Some(n as i64)
}

/// Numeric value of trimmed, non-blank form text, as a browser number field
/// coerces it: decimal or exponent notation, unsigned `0x`/`0o`/`0b`
/// literals, and a signed `Infinity`. `None` means "not a number".
fn coerce_number(raw: &str) -> Option<f64> {
    match raw {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match raw.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &raw[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    // Rust also accepts "inf" and "NaN" spellings; those are not numbers here.
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}
