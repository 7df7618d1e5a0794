use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;

use crate::error::SndsError;

/// Number of columns in a row of the usage data report
pub const USAGE_FIELDS: usize = 14;

const ACTIVITY_FORMAT: &str = "%m/%d/%Y %I:%M %p";
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Verdict of the SNDS spam filter for an IP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterResult {
    Green,
    Yellow,
    Red,
}

impl FilterResult {
    /// Exact, case sensitive match; anything unexpected is treated as red
    pub fn classify(s: &str) -> Self {
        match s {
            "GREEN" => Self::Green,
            "YELLOW" => Self::Yellow,
            _ => Self::Red,
        }
    }
}

impl Display for FilterResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Red => "RED",
        })
    }
}

/// One row of the usage data report
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UsageRecord {
    pub ip_address: String,
    pub activity_start: String,
    pub activity_end: String,
    pub rcpt_commands: String,
    pub data_commands: String,
    pub message_recipients: String,
    pub filter_result: String,
    pub complaint_rate: String,
    pub trap_message_start: String,
    pub trap_message_end: String,
    pub traphits: String,
    pub sample_helo: String,
    pub sample_mailfrom: String,
    pub comments: String,
}

impl TryFrom<&[String]> for UsageRecord {
    type Error = SndsError;

    /// Fields are taken by position, extra trailing fields are ignored
    fn try_from(row: &[String]) -> Result<Self, Self::Error> {
        if row.len() < USAGE_FIELDS {
            return Err(SndsError::MalformedRecord {
                expected: USAGE_FIELDS,
                found: row.len(),
            });
        }
        Ok(Self {
            ip_address: row[0].clone(),
            activity_start: row[1].clone(),
            activity_end: row[2].clone(),
            rcpt_commands: row[3].clone(),
            data_commands: row[4].clone(),
            message_recipients: row[5].clone(),
            filter_result: row[6].clone(),
            complaint_rate: row[7].clone(),
            trap_message_start: row[8].clone(),
            trap_message_end: row[9].clone(),
            traphits: row[10].clone(),
            sample_helo: row[11].clone(),
            sample_mailfrom: row[12].clone(),
            comments: row[13].clone(),
        })
    }
}

impl UsageRecord {
    pub fn filter(&self) -> FilterResult {
        FilterResult::classify(&self.filter_result)
    }

    /// Trap hits as a number, 0 when the column is not numeric
    pub fn trap_hits(&self) -> u64 {
        self.traphits.trim().parse().unwrap_or(0)
    }

    /// The calendar day of `activity_end`, rendered `MM/DD/YYYY`
    pub fn activity_end_date(&self) -> Result<String, SndsError> {
        NaiveDateTime::parse_from_str(&self.activity_end, ACTIVITY_FORMAT)
            .map(|end| end.format(DATE_FORMAT).to_string())
            .map_err(|e| {
                SndsError::Parse(format!(
                    "invalid activity end '{}' for {}: {e}",
                    self.activity_end, self.ip_address
                ))
            })
    }
}
