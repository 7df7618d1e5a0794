use crate::{
    error::SndsError,
    models::{
        csv::Row,
        usage::{FilterResult, UsageRecord},
    },
};

/// Totals over a usage data report
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Summary {
    pub green: u64,
    pub yellow: u64,
    pub red: u64,
    pub traps: u64,
    pub ips: u64,
    /// Day of the report (`MM/DD/YYYY`), taken from the first row
    pub date: String,
}

/// Count filter verdicts and trap hits over every row of a usage report
pub fn summarize(rows: &[Row]) -> Result<Summary, SndsError> {
    let mut summary = Summary {
        ips: rows.len() as u64,
        ..Default::default()
    };

    for row in rows {
        let record = UsageRecord::try_from(row.as_slice())?;
        match record.filter() {
            FilterResult::Green => summary.green += 1,
            FilterResult::Yellow => summary.yellow += 1,
            FilterResult::Red => summary.red += 1,
        }
        summary.traps += record.trap_hits();
        if summary.date.is_empty() {
            summary.date = record.activity_end_date()?;
        }
    }

    Ok(summary)
}

/// Find the usage record of a single IP
///
/// Only the matching row is adapted, a malformed row elsewhere in the report
/// does not affect the search.
pub fn search_ip_status(ip: &str, rows: &[Row]) -> Result<Option<UsageRecord>, SndsError> {
    rows.iter()
        .find(|row| row.first().is_some_and(|field| field == ip))
        .map(|row| UsageRecord::try_from(row.as_slice()))
        .transpose()
}
