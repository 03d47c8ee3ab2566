//! Heuristics over the free-text expiry label and the lot code.

use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, TimeZone};
use regex::Regex;
use std::sync::OnceLock;

const MONTHS: [&str; 12] = [
    "GEN", "FEB", "MAR", "APR", "MAG", "GIU", "LUG", "AGO", "SET", "OTT", "NOV", "DIC",
];

fn expiry_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(GEN|FEB|MAR|APR|MAG|GIU|LUG|AGO|SET|OTT|NOV|DIC)[\s/-]?(\d{2})")
            .expect("static regex")
    })
}

fn lot_day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,3})").expect("static regex"))
}

fn lot_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/(\d{2})").expect("static regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpiryClass {
    Expired,
    Red,
    Yellow,
    Green,
}

impl ExpiryClass {
    pub fn mark(&self) -> &'static str {
        match self {
            ExpiryClass::Expired => "☠️",
            ExpiryClass::Red => "🔴",
            ExpiryClass::Yellow => "🟡",
            ExpiryClass::Green => "🟢",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpiryClass::Expired => "expired",
            ExpiryClass::Red => "red",
            ExpiryClass::Yellow => "yellow",
            ExpiryClass::Green => "green",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryStatus {
    pub class: ExpiryClass,
    /// Days until expiry, negative once expired.
    pub days: i64,
}

fn last_day_of_month(year: i32, month0: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month0 == 11 { (year + 1, 1) } else { (year, month0 + 2) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

fn local_at(date: NaiveDate, h: u32, m: u32, s: u32) -> Option<DateTime<Local>> {
    match Local.from_local_datetime(&date.and_hms_opt(h, m, s)?) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => None,
    }
}

/// Expiry instant encoded in `text`: end of the named month, e.g.
/// `"MAR 26"` → 2026-03-31 23:59:59 local.
pub fn parse_expiry_text(text: &str) -> Option<DateTime<Local>> {
    let upper = text.to_uppercase();
    let caps = expiry_re().captures(&upper)?;
    let month0 = MONTHS.iter().position(|m| *m == &caps[1])? as u32;
    let year = 2000 + caps[2].parse::<i32>().ok()?;
    local_at(last_day_of_month(year, month0)?, 23, 59, 59)
}

/// Whole days from `now` to `then`, rounded up.
fn ceil_days(now: DateTime<Local>, then: DateTime<Local>) -> i64 {
    let ms = (then - now).num_milliseconds();
    let day = Duration::days(1).num_milliseconds();
    ms.div_euclid(day) + i64::from(ms.rem_euclid(day) != 0)
}

pub fn expiry_status(text: &str, now: DateTime<Local>) -> Option<ExpiryStatus> {
    let expiry = parse_expiry_text(text)?;
    let days = ceil_days(now, expiry);
    let class = match days {
        d if d < 0 => ExpiryClass::Expired,
        d if d < 180 => ExpiryClass::Red,
        d if d < 270 => ExpiryClass::Yellow,
        _ => ExpiryClass::Green,
    };
    Some(ExpiryStatus { class, days })
}

/// Production date encoded in a lot code starting with a day of the year
/// (`"123/25"` → 3 May 2025). Without `/YY` the year comes from the expiry.
pub fn production_date(lot: &str, expiry_text: &str) -> Option<NaiveDate> {
    let day: u32 = lot_day_re().captures(lot)?[1].parse().ok()?;
    if !(1..=366).contains(&day) {
        return None;
    }
    let year = match lot_year_re().captures(lot) {
        Some(c) => 2000 + c[1].parse::<i32>().ok()?,
        None => parse_expiry_text(expiry_text)?.year(),
    };
    NaiveDate::from_ymd_opt(year, 1, 1)?.checked_add_signed(Duration::days(i64::from(day) - 1))
}

fn whole_days_since(then: DateTime<Local>, now: DateTime<Local>) -> i64 {
    (now - then).num_days().max(0)
}

/// Days a product has been in stock: since production if the lot says,
/// otherwise since it was added.
pub fn dwell_days(lot: &str, expiry_text: &str, date_added: &str, now: DateTime<Local>) -> Option<i64> {
    if let Some(d) = production_date(lot, expiry_text).and_then(|d| local_at(d, 0, 0, 0)) {
        return Some(whole_days_since(d, now));
    }
    let added = crate::models::product::parse_timestamp(date_added)?;
    Some(whole_days_since(added.with_timezone(&Local), now))
}
