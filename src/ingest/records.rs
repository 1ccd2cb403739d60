/// Measurement record parser.
///
/// One record per line of the source text:
///
/// ```text
/// <D>/<M>/<Y> <volume>[<unit-char>] <HH>:<MM>:<SS>
/// ```
///
/// Example: `15/06/2025 12.50L 00:45:30`. Tokens are whitespace-separated;
/// the volume token may carry a single trailing non-digit unit marker, which
/// is discarded before numeric conversion.
///
/// Malformed lines are skipped silently — ingestion keeps going and the
/// caller receives an aggregate skip count rather than per-line errors.

use crate::dataset::Dataset;
use crate::model::{DURATION_LABEL_MAX, Measurement, RecordDate};

// ============================================================================
// Line parsing
// ============================================================================

/// Parses one line into a [`Measurement`], or `None` if the line is
/// malformed.
///
/// A line is rejected when:
/// - it does not contain exactly three whitespace-separated tokens,
/// - the date token does not split into three integers on `/`,
/// - the volume token does not parse as a float after unit stripping,
/// - the duration token does not split into three integers on `:`,
/// - the computed duration is not strictly positive.
pub fn parse_line(line: &str) -> Option<Measurement> {
    let mut tokens = line.split_whitespace();
    let date_token = tokens.next()?;
    let volume_token = tokens.next()?;
    let duration_token = tokens.next()?;
    if tokens.next().is_some() {
        return None; // more than three tokens
    }

    let (day, month, year) = parse_int_triple(date_token, '/')?;
    let volume_liters = parse_volume(volume_token)?;
    let (hh, mm, ss) = parse_int_triple(duration_token, ':')?;

    let total_seconds = hh as i64 * 3600 + mm as i64 * 60 + ss as i64;
    let duration_minutes = total_seconds as f64 / 60.0;
    if duration_minutes <= 0.0 {
        return None;
    }

    Some(Measurement {
        date: RecordDate { day, month, year },
        volume_liters,
        duration_minutes,
        duration_label: truncate_label(duration_token),
        residual: 0.0,
        abs_residual: 0.0,
        is_outlier: false,
    })
}

/// Splits a token on `sep` into exactly three integers.
fn parse_int_triple(token: &str, sep: char) -> Option<(i32, i32, i32)> {
    let mut parts = token.split(sep);
    let a = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    let c = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((a, b, c))
}

/// Strips at most one trailing non-digit unit character ("12.50L" → 12.50)
/// and parses the remainder as a float.
fn parse_volume(token: &str) -> Option<f64> {
    let numeric = match token.chars().last() {
        Some(last) if !last.is_ascii_digit() => &token[..token.len() - last.len_utf8()],
        _ => token,
    };
    numeric.parse().ok()
}

/// Truncates the duration text to the fixed storage limit, keeping it
/// verbatim otherwise.
fn truncate_label(token: &str) -> String {
    let mut end = token.len().min(DURATION_LABEL_MAX);
    // Labels are expected to be ASCII ("HH:MM:SS"); back off to a char
    // boundary in case they are not.
    while !token.is_char_boundary(end) {
        end -= 1;
    }
    token[..end].to_string()
}

// ============================================================================
// Bulk ingestion
// ============================================================================

/// Reads measurement lines into a [`Dataset`], in order, honoring capacity.
///
/// Returns the dataset together with the number of malformed lines skipped.
/// Valid lines beyond capacity are counted by the dataset itself (see
/// [`Dataset::dropped`]).
pub fn read_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> (Dataset, usize) {
    let mut dataset = Dataset::new();
    let mut skipped = 0;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(measurement) => {
                dataset.push(measurement);
            }
            None => skipped += 1,
        }
    }

    (dataset, skipped)
}

// ============================================================================
// Tests
// ============================================================================
