//! 查询过滤条件

use bson::Bson;
use chrono::{DateTime, Utc};

/// 单个字段上的条件
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// 字面值相等
    Equals(Bson),
    /// 时间不早于给定时刻（毫秒精度，含边界）
    AtLeast(DateTime<Utc>),
}

/// 查询过滤器
///
/// 字段名到条件的有序映射，多个条件之间为“与”关系。
/// 同一字段重复设置时后者覆盖前者。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Condition)>,
}

impl Filter {
    /// 创建空过滤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 字段等于给定值
    pub fn equals(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.with(field.into(), Condition::Equals(value.into()))
    }

    /// 字段时间不早于给定时刻
    pub fn at_least(self, field: impl Into<String>, instant: DateTime<Utc>) -> Self {
        self.with(field.into(), Condition::AtLeast(instant))
    }

    fn with(mut self, field: String, condition: Condition) -> Self {
        match self.conditions.iter_mut().find(|(name, _)| *name == field) {
            Some(existing) => existing.1 = condition,
            None => self.conditions.push((field, condition)),
        }
        self
    }

    /// 所有条件
    pub fn conditions(&self) -> &[(String, Condition)] {
        &self.conditions
    }

    /// 获取字段上的条件
    pub fn get(&self, field: &str) -> Option<&Condition> {
        self.conditions
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, condition)| condition)
    }

    /// 是否为空过滤器
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
