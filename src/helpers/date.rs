//! Date helper functions

use chrono::{DateTime, Datelike, TimeZone};

/// Abbreviated month names in Brazilian Portuguese (lowercase, per locale
/// convention)
const MONTHS_ABBR_PT_BR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Placeholder shown when a post has no publication date
pub const MISSING_DATE: &str = "sem data";

/// Format a date for display on the listing page: two-digit day,
/// abbreviated pt-BR month, four-digit year
///
/// # Examples
/// ```ignore
/// format_pt_br(&date) // -> "14 nov 2023"
/// ```
pub fn format_pt_br<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    let month = MONTHS_ABBR_PT_BR[date.month0() as usize];
    format!("{:02} {} {}", date.day(), month, date.year())
}

/// Format an optional publication date, substituting a placeholder when
/// the upstream record carried none
pub fn display_date<Tz: TimeZone>(date: Option<&DateTime<Tz>>) -> String {
    match date {
        Some(d) => format_pt_br(d),
        None => MISSING_DATE.to_string(),
    }
}
