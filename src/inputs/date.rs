use std::fmt::{Display, Formatter};

use anyhow::{anyhow, bail};
use chrono::NaiveDate;

const REPORT_DATE_FORMAT: &str = "%m%d%y";

/// Day of a usage data report, written `MMDDYY` on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportDate(pub NaiveDate);

impl std::str::FromStr for ReportDate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 6 || !s.chars().all(|c| c.is_ascii_digit()) {
            bail!("Invalid date '{s}': expected six digits in MMDDYY format");
        }
        NaiveDate::parse_from_str(s, REPORT_DATE_FORMAT)
            .map(Self)
            .map_err(|e| anyhow!("Invalid date '{s}': {e}"))
    }
}

impl Display for ReportDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(REPORT_DATE_FORMAT))
    }
}

#[test]
fn test_report_date_round_trip() -> anyhow::Result<()> {
    let date = "092920".parse::<ReportDate>()?;
    assert_eq!(date.0, NaiveDate::from_ymd_opt(2020, 9, 29).unwrap());
    assert_eq!(date.to_string(), "092920");
    Ok(())
}
#[test]
fn test_report_date_rejects_bad_input() {
    assert!("9292020".parse::<ReportDate>().is_err());
    assert!("133120".parse::<ReportDate>().is_err());
    assert!("023020".parse::<ReportDate>().is_err());
    assert!("09-29-".parse::<ReportDate>().is_err());
}
