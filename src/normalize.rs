//! Turns a [`RawTable`] into a [`CanonicalTable`].
//!
//! Normalization never fails and never drops rows: names are trimmed and
//! title-cased, and teacher counts that are not finite non-negative numbers
//! become 0.

use tracing::debug;

use crate::parser::{RawRow, RawTable};
use crate::table::{CanonicalTable, Record};

#[tracing::instrument(skip(raw), fields(rows = raw.rows.len()))]
pub fn normalize(raw: &RawTable) -> CanonicalTable {
    let mut coerced = 0usize;

    let records = raw
        .rows
        .iter()
        .map(|row| {
            let record = normalize_row(row);
            if row.teacher_count.is_some() && parse_count(row.teacher_count.as_deref()).is_none()
            {
                coerced += 1;
            }
            record
        })
        .collect();

    if coerced > 0 {
        debug!(coerced, "Teacher counts coerced to 0");
    }

    CanonicalTable::new(raw.columns.clone(), records)
}

fn normalize_row(row: &RawRow) -> Record {
    Record {
        state: normalize_name(row.state.as_deref()),
        city: normalize_name(row.city.as_deref()),
        school_name: normalize_name(row.school_name.as_deref()),
        teacher_count: coerce_count(row.teacher_count.as_deref()),
        address: row.address.clone(),
        pincode: row.pincode.clone(),
        extras: row.extras.clone(),
    }
}

/// Trims and title-cases a name. Blank input becomes `None`.
pub fn normalize_name(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(title_case(trimmed))
    }
}

/// Upper-cases the first letter of every run of cased letters and lower-cases the rest.
///
/// Uncased characters (digits, punctuation, scripts without case) end a
/// run. A letter whose upper case expands to several characters keeps only
/// the first one upper-cased, so `ß` starts a word as `Ss`.
///
/// ```
/// use school_reg_analytics::normalize::title_case;
/// assert_eq!(title_case("UTTAR pradesh"), "Uttar Pradesh");
/// assert_eq!(title_case("d.a.v. public school"), "D.A.V. Public School");
/// ```
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;

    for c in value.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && in_word {
            out.extend(c.to_lowercase());
        } else if cased {
            let mut upper = c.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            for rest in upper {
                out.extend(rest.to_lowercase());
            }
        } else {
            out.push(c);
        }
        in_word = cased;
    }

    out
}

/// Parses a teacher count, falling back to 0 for anything unusable.
pub fn coerce_count(value: Option<&str>) -> f64 {
    parse_count(value).unwrap_or(0.0)
}

fn parse_count(value: Option<&str>) -> Option<f64> {
    let v = value?.trim().parse::<f64>().ok()?;
    if !v.is_finite() || v < 0.0 {
        return None;
    }
    // collapses -0.0
    Some(if v == 0.0 { 0.0 } else { v })
}
