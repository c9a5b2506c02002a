//! Business Hours Model

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorCode};

/// Opening hours for one weekday (0 = Sunday .. 6 = Saturday)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHours {
    pub day: u8,
    /// 24h "HH:MM"
    pub open: String,
    /// 24h "HH:MM"
    pub close: String,
    #[serde(default)]
    pub is_closed: bool,
}

impl BusinessHours {
    pub fn new(day: u8, open: &str, close: &str) -> Self {
        Self {
            day,
            open: open.to_string(),
            close: close.to_string(),
            is_closed: false,
        }
    }

    pub fn closed(day: u8) -> Self {
        Self {
            is_closed: true,
            ..Self::new(day, "00:00", "00:00")
        }
    }

    /// 09:00 - 22:00 every day, the wizard's initial form state
    pub fn default_week() -> Vec<BusinessHours> {
        (0..7).map(|day| Self::new(day, "09:00", "22:00")).collect()
    }

    /// Check a full week and return it sorted by day
    pub fn validate_week(mut hours: Vec<BusinessHours>) -> Result<Vec<BusinessHours>, AppError> {
        if hours.len() != 7 {
            return Err(invalid("Business hours must cover all 7 days"));
        }

        hours.sort_by_key(|h| h.day);
        for (expected, entry) in (0u8..).zip(hours.iter()) {
            if entry.day != expected {
                return Err(invalid(format!(
                    "Business hours must contain each day from 0 to 6 exactly once (day {} is missing or repeated)",
                    expected
                )));
            }
            entry.validate()?;
        }

        Ok(hours)
    }

    fn validate(&self) -> Result<(), AppError> {
        let open = parse_hhmm(&self.open)
            .ok_or_else(|| invalid(format!("Invalid opening time: {}", self.open)))?;
        let close = parse_hhmm(&self.close)
            .ok_or_else(|| invalid(format!("Invalid closing time: {}", self.close)))?;

        if !self.is_closed && open >= close {
            return Err(invalid(format!(
                "Opening time must be before closing time (day {})",
                self.day
            )));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::BusinessHoursInvalid, msg)
}

/// Parse a 24h "HH:MM" string into minutes since midnight
pub fn parse_hhmm(value: &str) -> Option<u16> {
    let (h, m) = value.split_once(':')?;
    if h.len() != 2 || m.len() != 2 {
        return None;
    }
    let h: u16 = h.parse().ok()?;
    let m: u16 = m.parse().ok()?;
    (h < 24 && m < 60).then_some(h * 60 + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("09:30"), Some(570));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("9:30"), None);
        assert_eq!(parse_hhmm("09:60"), None);
        assert_eq!(parse_hhmm("ab:cd"), None);
    }

    #[test]
    fn test_default_week_is_valid() {
        let week = BusinessHours::validate_week(BusinessHours::default_week()).unwrap();
        assert_eq!(week.len(), 7);
    }

    #[test]
    fn test_week_is_sorted() {
        let mut week = BusinessHours::default_week();
        week.reverse();
        let week = BusinessHours::validate_week(week).unwrap();
        let days: Vec<u8> = week.iter().map(|h| h.day).collect();
        assert_eq!(days, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_missing_or_duplicate_day_rejected() {
        let mut week = BusinessHours::default_week();
        week.pop();
        assert!(BusinessHours::validate_week(week).is_err());

        let mut week = BusinessHours::default_week();
        week[6].day = 5;
        let err = BusinessHours::validate_week(week).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessHoursInvalid);
    }

    #[test]
    fn test_open_must_precede_close() {
        let mut week = BusinessHours::default_week();
        week[2] = BusinessHours::new(2, "22:00", "09:00");
        assert!(BusinessHours::validate_week(week).is_err());
    }

    #[test]
    fn test_closed_day_ignores_ordering() {
        let mut week = BusinessHours::default_week();
        week[0] = BusinessHours::closed(0);
        assert!(BusinessHours::validate_week(week).is_ok());
    }

    #[test]
    fn test_closed_day_still_needs_well_formed_times() {
        let mut week = BusinessHours::default_week();
        week[0] = BusinessHours {
            open: "late".to_string(),
            ..BusinessHours::closed(0)
        };
        assert!(BusinessHours::validate_week(week).is_err());
    }

    #[test]
    fn test_is_closed_defaults_to_false() {
        let hours: BusinessHours =
            serde_json::from_str(r#"{"day":1,"open":"10:00","close":"20:00"}"#).unwrap();
        assert!(!hours.is_closed);
    }
}
