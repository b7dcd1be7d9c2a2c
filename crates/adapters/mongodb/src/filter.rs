//! Filter 到 MongoDB 查询文档的转换

use bson::{Bson, Document, doc};
use tokenstore_ports::{Condition, Filter};

/// 转换为 MongoDB 查询文档
pub fn to_query(filter: &Filter) -> Document {
    let mut query = Document::new();
    for (field, condition) in filter.conditions() {
        let value = match condition {
            Condition::Equals(value) => value.clone(),
            Condition::AtLeast(instant) => {
                Bson::Document(doc! { "$gte": bson::DateTime::from_chrono(*instant) })
            }
        };
        query.insert(field.clone(), value);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_token_only() {
        let query = to_query(&Filter::new().equals("token", "TOKEN"));
        assert_eq!(query, doc! { "token": "TOKEN" });
    }

    #[test]
    fn test_token_with_max_age() {
        let instant = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();
        let query = to_query(
            &Filter::new()
                .equals("token", "TOKEN")
                .at_least("created_at", instant),
        );

        assert_eq!(
            query,
            doc! {
                "token": "TOKEN",
                "created_at": { "$gte": bson::DateTime::from_chrono(instant) },
            }
        );
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(to_query(&Filter::new()).is_empty());
    }
}
