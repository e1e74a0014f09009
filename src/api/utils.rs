use chrono::{SecondsFormat, Utc};

/// Current time as an ISO-8601 string with millisecond precision,
/// e.g. `2025-01-28T17:04:05.123Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_now_format() {
        let ts = timestamp_now();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2025-01-28T17:04:05.123Z".len());
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
