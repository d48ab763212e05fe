use chrono::{Local, TimeZone, Utc};

/// Get current Unix timestamp in milliseconds (UTC)
pub fn now_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a millisecond timestamp as a human-readable local clock string (HH:MM:SS)
pub fn format_clock(timestamp_millis: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock_shape() {
        // テスト項目: 時刻文字列は HH:MM:SS 形式
        // when (操作):
        let clock = format_clock(now_timestamp_millis());

        // then (期待する結果):
        assert_eq!(clock.len(), 8);
        assert_eq!(clock.as_bytes()[2], b':');
        assert_eq!(clock.as_bytes()[5], b':');
    }
}
