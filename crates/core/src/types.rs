/// Record ids are PostgreSQL BIGSERIAL values (the memory store mimics them).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Number of rows returned by the "latest" listings when the caller gives no limit.
pub const DEFAULT_LATEST_LIMIT: i64 = 5;

/// Upper bound on a caller-supplied "latest" limit.
pub const MAX_LATEST_LIMIT: i64 = 50;

/// Resolve an optional `?limit=` into the range `1..=MAX_LATEST_LIMIT`.
pub fn clamp_latest_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_LATEST_LIMIT)
        .clamp(1, MAX_LATEST_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_limit_uses_default() {
        assert_eq!(clamp_latest_limit(None), DEFAULT_LATEST_LIMIT);
    }

    #[test]
    fn limit_is_clamped_to_bounds() {
        assert_eq!(clamp_latest_limit(Some(0)), 1);
        assert_eq!(clamp_latest_limit(Some(-7)), 1);
        assert_eq!(clamp_latest_limit(Some(12)), 12);
        assert_eq!(clamp_latest_limit(Some(10_000)), MAX_LATEST_LIMIT);
    }
}
