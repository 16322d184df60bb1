use time::macros::format_description;
use time::{Date, Weekday};

use super::errors::CalendarError;

pub fn parse_date(value: &str) -> Result<Date, CalendarError> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|_| CalendarError::InvalidDate(value.to_string()))
}

pub fn format_date(date: Date) -> String {
    // Only fails for years outside 0..=9999
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Accepts full or three-letter English names in any case.
pub fn parse_weekday(name: &str) -> Result<Weekday, CalendarError> {
    let weekday = match name.trim().to_lowercase().as_str() {
        "monday" | "mon" => Weekday::Monday,
        "tuesday" | "tue" => Weekday::Tuesday,
        "wednesday" | "wed" => Weekday::Wednesday,
        "thursday" | "thu" => Weekday::Thursday,
        "friday" | "fri" => Weekday::Friday,
        "saturday" | "sat" => Weekday::Saturday,
        "sunday" | "sun" => Weekday::Sunday,
        _ => return Err(CalendarError::UnknownWeekday(name.to_string())),
    };
    Ok(weekday)
}

/// `YYYY-MM-DD` strings.
pub mod iso_date {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_date(&value).map_err(D::Error::custom)
    }
}

/// Weekday names such as `"Friday"`.
pub mod weekday_name {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use time::Weekday;

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&day.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_weekday(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod formats_tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn weekday_names() {
        assert_eq!(parse_weekday("Friday").unwrap(), Weekday::Friday);
        assert_eq!(parse_weekday("sat").unwrap(), Weekday::Saturday);
        assert_eq!(parse_weekday(" SUNDAY ").unwrap(), Weekday::Sunday);
        assert!(matches!(
            parse_weekday("funday"),
            Err(CalendarError::UnknownWeekday(_))
        ));
    }

    #[test]
    fn dates() {
        assert_eq!(parse_date("2025-06-15").unwrap(), date!(2025-06-15));
        assert_eq!(format_date(date!(2025-06-05)), "2025-06-05");
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("15/06/2025").is_err());
    }
}
