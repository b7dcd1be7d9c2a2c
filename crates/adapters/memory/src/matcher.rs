//! 过滤条件求值

use bson::{Bson, Document};
use tokenstore_ports::{Condition, Filter};

/// 判断文档是否满足过滤器的全部条件
pub fn matches(filter: &Filter, document: &Document) -> bool {
    filter
        .conditions()
        .iter()
        .all(|(field, condition)| condition_holds(condition, document.get(field)))
}

fn condition_holds(condition: &Condition, value: Option<&Bson>) -> bool {
    match condition {
        Condition::Equals(expected) => match value {
            Some(actual) => actual == expected,
            // 缺失字段与 null 等价
            None => *expected == Bson::Null,
        },
        // 只有 datetime 类型参与比较
        Condition::AtLeast(bound) => match value {
            Some(Bson::DateTime(actual)) => *actual >= bson::DateTime::from_chrono(*bound),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_equals() {
        let document = doc! { "token": "abc" };

        assert!(matches(&Filter::new().equals("token", "abc"), &document));
        assert!(!matches(&Filter::new().equals("token", "xyz"), &document));
        assert!(matches(&Filter::new().equals("missing", Bson::Null), &document));
        assert!(matches(&Filter::new(), &document));
    }

    #[test]
    fn test_at_least_is_inclusive() {
        let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let document = doc! {
            "token": "abc",
            "created_at": bson::DateTime::from_chrono(created_at),
        };

        let at = |instant| Filter::new().equals("token", "abc").at_least("created_at", instant);

        assert!(matches(&at(created_at), &document));
        assert!(matches(&at(created_at - Duration::hours(1)), &document));
        assert!(!matches(&at(created_at + Duration::hours(1)), &document));
    }

    #[test]
    fn test_at_least_ignores_non_datetime() {
        let document = doc! { "created_at": "2024-06-01T12:00:00Z" };
        let filter = Filter::new().at_least("created_at", Utc::now() - Duration::days(365 * 30));

        assert!(!matches(&filter, &document));
    }
}
