//! Display formatting for bound receipt fields.
//!
//! None of these fail: missing or unusable input turns into a fixed
//! fallback string that the receipt prints as-is.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::order::DeliveryInfo;

/// Printed when a value is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Printed when a delivery time cannot be parsed.
pub const INVALID_TIME: &str = "无效时间";

/// Printed when neither school nor address is known.
pub const ADDRESS_MISSING: &str = "地址未提供";

/// Timestamp layouts without an offset; these are read as local time.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Minute-precision layouts with a numeric offset, which RFC 3339 rejects.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M:%S%:z",
];

/// The last four digits of a contact number, ignoring any formatting.
///
/// Numbers with fewer than four digits come back whole.
///
/// ```
/// use canteen_receipt::layout::format::last_four_digits;
///
/// assert_eq!(last_four_digits("138-0013-8000"), "8000");
/// assert_eq!(last_four_digits("12"), "12");
/// ```
pub fn last_four_digits(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(char::is_ascii_digit).collect();
    let start = digits.len().saturating_sub(4);
    digits[start..].iter().collect()
}

/// Format a delivery time as `YYYY-MM-DD HH:MM` in the local timezone.
pub fn format_send_time(time: Option<&str>) -> String {
    format_send_time_in(&Local, time)
}

/// [`format_send_time`] against an explicit timezone.
pub fn format_send_time_in<Tz: TimeZone>(tz: &Tz, time: Option<&str>) -> String {
    let Some(time) = time.filter(|t| !t.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    match parse_instant(tz, time) {
        Some(dt) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute()
        ),
        None => INVALID_TIME.to_string(),
    }
}

/// Parse a timestamp into `tz`.
///
/// Input with an offset or a `Z` suffix keeps its own offset, with or
/// without seconds. Date-time input without one is taken as wall-clock
/// time in `tz`. A bare date means UTC midnight.
fn parse_instant<Tz: TimeZone>(tz: &Tz, input: &str) -> Option<DateTime<Tz>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(tz));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Some(dt.with_timezone(tz));
        }
    }

    if let Some(utc) = input.strip_suffix('Z').or_else(|| input.strip_suffix('z')) {
        let naive = parse_naive(utc)?;
        return Some(Utc.from_utc_datetime(&naive).with_timezone(tz));
    }

    if let Some(naive) = parse_naive(input) {
        return tz.from_local_datetime(&naive).earliest();
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(tz))
}

fn parse_naive(input: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
}

/// `"{school} {address}"` trimmed, or [`ADDRESS_MISSING`] when both are blank.
pub fn compose_address(delivery: Option<&DeliveryInfo>) -> String {
    let school = delivery.and_then(|d| d.school.as_deref()).unwrap_or("");
    let address = delivery.and_then(|d| d.address.as_deref()).unwrap_or("");
    let combined = format!("{} {}", school, address);
    let combined = combined.trim();
    if combined.is_empty() {
        ADDRESS_MISSING.to_string()
    } else {
        combined.to_string()
    }
}

/// Contact tail for the `userNum` field; [`NOT_AVAILABLE`] without a number.
pub fn contact_tail(delivery: &DeliveryInfo) -> String {
    match delivery.number.as_deref().filter(|n| !n.is_empty()) {
        Some(number) => last_four_digits(number),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// The single remark line printed for orders without delivery.
pub fn pickup_remark_line(scene: Option<&str>, remark: Option<&str>) -> String {
    format!("【{}】 {}", scene.unwrap_or(""), remark.unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_last_four_digits() {
        assert_eq!(last_four_digits("138-0013-8000"), "8000");
        assert_eq!(last_four_digits("+86 138 0013 8123"), "8123");
        assert_eq!(last_four_digits("12"), "12");
        assert_eq!(last_four_digits("a1b2c"), "12");
        assert_eq!(last_four_digits(""), "");
        assert_eq!(last_four_digits("no digits"), "");
    }

    #[test]
    fn test_send_time_zero_padded() {
        assert_eq!(
            format_send_time_in(&Utc, Some("2024-03-05T07:08:00")),
            "2024-03-05 07:08"
        );
        assert_eq!(
            format_send_time_in(&Utc, Some("2024-03-05 07:08")),
            "2024-03-05 07:08"
        );
    }

    #[test]
    fn test_send_time_converts_offset() {
        let beijing = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(
            format_send_time_in(&beijing, Some("2024-10-26T04:30:00Z")),
            "2024-10-26 12:30"
        );
        assert_eq!(
            format_send_time_in(&beijing, Some("2024-10-26T04:30:00.000+08:00")),
            "2024-10-26 04:30"
        );
    }

    #[test]
    fn test_send_time_minute_precision_with_offset() {
        let beijing = FixedOffset::east_opt(8 * 3600).unwrap();
        for input in [
            "2024-10-26T04:30Z",
            "2024-10-26T04:30z",
            "2024-10-26T12:30+08:00",
            "2024-10-26T12:30+0800",
            "2024-10-26 12:30+08:00",
            "2024-10-26T06:30+02:00",
        ] {
            assert_eq!(
                format_send_time_in(&beijing, Some(input)),
                "2024-10-26 12:30",
                "input {}",
                input
            );
        }
        assert_eq!(
            format_send_time_in(&Utc, Some("2024-10-26T12:30+08:00")),
            "2024-10-26 04:30"
        );
    }

    #[test]
    fn test_send_time_bare_date_is_utc_midnight() {
        let beijing = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(
            format_send_time_in(&beijing, Some("2024-10-26")),
            "2024-10-26 08:00"
        );
    }

    #[test]
    fn test_send_time_fallbacks() {
        assert_eq!(format_send_time_in(&Utc, None), NOT_AVAILABLE);
        assert_eq!(format_send_time_in(&Utc, Some("")), NOT_AVAILABLE);
        assert_eq!(format_send_time_in(&Utc, Some("tomorrow noon")), INVALID_TIME);
        assert_eq!(format_send_time_in(&Utc, Some("2024-13-45T99:00:00")), INVALID_TIME);
    }

    #[test]
    fn test_compose_address() {
        let both = DeliveryInfo {
            school: Some("北京大学".to_string()),
            address: Some("36楼".to_string()),
            ..Default::default()
        };
        assert_eq!(compose_address(Some(&both)), "北京大学 36楼");

        let school_only = DeliveryInfo {
            school: Some("清华大学".to_string()),
            ..Default::default()
        };
        assert_eq!(compose_address(Some(&school_only)), "清华大学");

        let address_only = DeliveryInfo {
            school: None,
            address: Some("36楼".to_string()),
            ..Default::default()
        };
        assert_eq!(compose_address(Some(&address_only)), "36楼");

        let blank = DeliveryInfo {
            school: Some(String::new()),
            address: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(compose_address(Some(&blank)), ADDRESS_MISSING);
        assert_eq!(compose_address(None), ADDRESS_MISSING);
    }

    #[test]
    fn test_contact_tail() {
        let mut delivery = DeliveryInfo::default();
        assert_eq!(contact_tail(&delivery), NOT_AVAILABLE);
        delivery.number = Some("138-0013-8000".to_string());
        assert_eq!(contact_tail(&delivery), "8000");
    }

    #[test]
    fn test_pickup_remark_line() {
        assert_eq!(pickup_remark_line(Some("堂食"), None), "【堂食】 ");
        assert_eq!(pickup_remark_line(Some("外带"), Some("少辣")), "【外带】 少辣");
    }
}
