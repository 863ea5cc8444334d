/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 每小时毫秒数
pub const MILLIS_PER_HOUR: i64 = 3_600_000;
