//! NAIF Leapseconds Kernel (LSK) text file parser.
//!
//! Reads the `\begindata` section of an LSK file and keeps the two
//! DELTET/* variables needed for UTC → TT: the constant TT − TAI offset and
//! the table of accumulated leap seconds.
//!
//! Reference: NAIF Time Required Reading (public domain, US Government work product).

use std::collections::HashMap;

use crate::error::TimeError;
use crate::julian::{calendar_to_jd, month_from_abbrev};

/// Parsed contents of an LSK file.
#[derive(Debug, Clone, PartialEq)]
pub struct LskData {
    /// TT − TAI offset in seconds (DELTET/DELTA_T_A).
    pub delta_t_a: f64,
    /// Leap second table: (TAI − UTC seconds, effective UTC Julian Day), sorted by epoch.
    pub leap_seconds: Vec<(f64, f64)>,
}

impl LskData {
    /// TAI − UTC in effect at a UTC Julian Day, or `None` before the first table entry.
    pub fn tai_minus_utc(&self, jd_utc: f64) -> Option<f64> {
        self.leap_seconds
            .iter()
            .take_while(|(_, epoch)| *epoch <= jd_utc)
            .last()
            .map(|(delta_at, _)| *delta_at)
    }

    /// TT − UTC at a UTC Julian Day, or `None` before the first table entry.
    pub fn tt_minus_utc(&self, jd_utc: f64) -> Option<f64> {
        self.tai_minus_utc(jd_utc).map(|d| d + self.delta_t_a)
    }
}

/// Parse an LSK file from its text content.
pub fn parse_lsk(content: &str) -> Result<LskData, TimeError> {
    let data_text = extract_data_section(content)?;
    let pool = parse_kernel_pool(&data_text)?;

    let delta_t_a = get_scalar(&pool, "DELTET/DELTA_T_A")?;
    let delta_at_vals = pool
        .get("DELTET/DELTA_AT")
        .ok_or_else(|| TimeError::LskParse("missing DELTET/DELTA_AT".into()))?;

    Ok(LskData {
        delta_t_a,
        leap_seconds: build_leap_table(delta_at_vals)?,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Pool of named variables: name → list of f64 values.
type KernelPool = HashMap<String, Vec<f64>>;

/// Collect the lines between each `\begindata` and the next `\begintext`.
fn extract_data_section(content: &str) -> Result<String, TimeError> {
    let mut in_data = false;
    let mut data_lines = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("\\begindata") {
            in_data = true;
        } else if trimmed.eq_ignore_ascii_case("\\begintext") {
            in_data = false;
        } else if in_data {
            data_lines.push(line);
        }
    }

    if data_lines.is_empty() {
        return Err(TimeError::LskParse("no \\begindata section found".into()));
    }
    Ok(data_lines.join("\n"))
}

/// Parse `NAME = VALUE` and `NAME = ( V1 V2 ... )` assignments, where
/// arrays may continue over several lines.
fn parse_kernel_pool(text: &str) -> Result<KernelPool, TimeError> {
    let mut pool = KernelPool::new();
    let mut current: Option<(String, Vec<f64>)> = None;
    let mut in_array = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some((lhs, rhs)) = trimmed.split_once('=') {
            if let Some((name, values)) = current.take() {
                pool.insert(name, values);
            }
            let mut values = Vec::new();
            let mut rhs = rhs.trim();
            if let Some(stripped) = rhs.strip_prefix('(') {
                in_array = true;
                rhs = stripped;
            }
            if let Some(stripped) = rhs.strip_suffix(')') {
                in_array = false;
                rhs = stripped;
            }
            parse_values(rhs, &mut values)?;
            current = Some((lhs.trim().to_string(), values));
        } else if in_array {
            let mut data = trimmed;
            if let Some(stripped) = data.strip_suffix(')') {
                in_array = false;
                data = stripped;
            }
            if let Some((_, values)) = current.as_mut() {
                parse_values(data, values)?;
            }
        }
    }

    if let Some((name, values)) = current {
        pool.insert(name, values);
    }
    Ok(pool)
}

/// Parse separated values: plain floats, Fortran `D` exponents, and
/// `@YYYY-MON-DD` date literals (converted to a UTC Julian Day).
fn parse_values(text: &str, out: &mut Vec<f64>) -> Result<(), TimeError> {
    for token in text.split([' ', ',', '\t']).filter(|t| !t.is_empty()) {
        if let Some(date_str) = token.strip_prefix('@') {
            out.push(parse_naif_date(date_str)?);
        } else {
            let normalized = token.replace(['D', 'd'], "E");
            let val: f64 = normalized
                .parse()
                .map_err(|e| TimeError::LskParse(format!("cannot parse '{token}' as f64: {e}")))?;
            out.push(val);
        }
    }
    Ok(())
}

/// Parse a NAIF date literal like `1972-JAN-1` into a Julian Day at 00:00.
fn parse_naif_date(s: &str) -> Result<f64, TimeError> {
    let mut parts = s.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TimeError::LskParse(format!("bad date literal: @{s}")));
    };

    let year: i32 = year
        .parse()
        .map_err(|_| TimeError::LskParse(format!("bad year in @{s}")))?;
    let month =
        month_from_abbrev(month).ok_or_else(|| TimeError::LskParse(format!("bad month in @{s}")))?;
    let day: f64 = day
        .parse()
        .map_err(|_| TimeError::LskParse(format!("bad day in @{s}")))?;

    Ok(calendar_to_jd(year, month, day))
}

/// Pair up the flat DELTET/DELTA_AT array: `[dat_1, epoch_1, dat_2, epoch_2, ...]`.
fn build_leap_table(flat: &[f64]) -> Result<Vec<(f64, f64)>, TimeError> {
    if flat.len() % 2 != 0 {
        return Err(TimeError::LskParse(
            "DELTET/DELTA_AT must have even number of values".into(),
        ));
    }
    let mut table: Vec<(f64, f64)> = flat.chunks(2).map(|pair| (pair[0], pair[1])).collect();
    table.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(table)
}

fn get_scalar(pool: &KernelPool, name: &str) -> Result<f64, TimeError> {
    pool.get(name)
        .and_then(|vals| vals.first().copied())
        .ok_or_else(|| TimeError::LskParse(format!("missing {name}")))
}
