/*
 * Responsibility
 * - リクエスト入力の小さな正規化 (pagination limit / 日時文字列)
 * - エラーは SanitizeError として返し、HTTP への変換は AppError 側で行う
 */
use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;

/// ISO-8601 local date-time shapes, tried in order: seconds (fraction optional), then minutes.
const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const DATE_TIME_EXAMPLE: &str = "yyyy-MM-ddTHH:mm:ss";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("invalid {field}: expected ISO-8601 date-time ({expected})")]
    MalformedInput {
        field: &'static str,
        expected: &'static str,
    },
}

/// Missing -> `default_value`, then clamp into `[1, max_value]`.
pub fn sanitize_limit(candidate: Option<i64>, default_value: i64, max_value: i64) -> i64 {
    let value = candidate.unwrap_or(default_value);
    value.min(max_value).max(1)
}

/// Blank or missing -> `Ok(None)`.
///
/// An explicit offset (`Z`, `+02:00`) is honored and the result is the UTC wall time.
/// A zone-less value is returned as written; no timezone is assumed.
pub fn parse_date_time(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<NaiveDateTime>, SanitizeError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(with_offset.naive_utc()));
    }

    LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(Some)
        .ok_or(SanitizeError::MalformedInput {
            field,
            expected: DATE_TIME_EXAMPLE,
        })
}
