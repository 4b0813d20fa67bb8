use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};

const LENIENT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Publication time of a feed item.
///
/// Feeds routinely carry missing or malformed dates, so an item always gets
/// a value: unparseable input becomes [`Published::Invalid`]. The derived
/// ordering places `Invalid` before every valid instant, i.e. it is the
/// oldest possible timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Published {
    Invalid,
    At(DateTime<Utc>),
}

impl Published {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Published::Invalid;
        };

        if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
            return Published::At(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Published::At(dt.with_timezone(&Utc));
        }
        for format in LENIENT_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Published::At(naive.and_utc());
            }
        }
        if let Some(naive) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Published::At(naive.and_utc());
        }

        Published::Invalid
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Published::At(_))
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Published::At(dt) => Some(*dt),
            Published::Invalid => None,
        }
    }

    /// Local-time rendering for the meta line.
    pub fn localized(&self) -> String {
        match self {
            Published::At(dt) => dt
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            Published::Invalid => "Invalid Date".to_string(),
        }
    }
}

impl Serialize for Published {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Published::At(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            Published::Invalid => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc2822() {
        let published = Published::parse(Some("Mon, 01 Jan 2024 00:00:00 GMT"));
        assert_eq!(
            published,
            Published::At(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let published = Published::parse(Some("2024-01-01T02:00:00+02:00"));
        assert_eq!(
            published,
            Published::At(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_lenient_forms() {
        assert!(Published::parse(Some("2024-03-05T10:11:12")).is_valid());
        assert!(Published::parse(Some("2024-03-05 10:11:12")).is_valid());
        assert!(Published::parse(Some("2024-03-05")).is_valid());
    }

    #[test]
    fn test_unparseable_is_invalid() {
        assert_eq!(Published::parse(Some("yesterday-ish")), Published::Invalid);
        assert_eq!(Published::parse(Some("   ")), Published::Invalid);
        assert_eq!(Published::parse(None), Published::Invalid);
        assert_eq!(Published::Invalid.localized(), "Invalid Date");
    }

    #[test]
    fn test_invalid_sorts_oldest() {
        let old = Published::At(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap());
        assert!(Published::Invalid < old);

        let mut values = vec![old, Published::Invalid, Published::parse(Some("2024-01-01"))];
        values.sort();
        assert_eq!(values[0], Published::Invalid);
        assert_eq!(values[1], old);
    }
}
