//! 通用工具函数

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

/// 生成新的 UUID v7（时间有序）
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}

/// 当前时间，截断到毫秒
///
/// BSON datetime 只保存毫秒精度，写入前截断可以保证读回的值与内存中的值相等。
pub fn now_millis() -> DateTime<Utc> {
    truncate_to_millis(Utc::now())
}

/// 截断到毫秒精度
pub fn truncate_to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(3)
}
