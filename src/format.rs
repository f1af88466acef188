//! Locale formatting helpers (Indonesian).
//!
//! Pure string formatting with well-known semantics: rupiah currency with
//! dot thousands separators and no decimals, and the long `d MMMM yyyy`
//! date form.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Format an amount as Indonesian currency: `Rp 6.000`.
pub fn rupiah(value: f64) -> String {
    let negative = value < 0.0;
    let whole = value.abs().round() as u64;
    let grouped = group_thousands(whole);
    if negative {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Format a count with dot thousands separators: `1234567` → `1.234.567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Format a date in the long Indonesian form: `7 Agustus 2026`.
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}
