use std::fmt::{Display, Formatter};

use crate::{
    commands::Reports,
    models::{summary, Summary},
    *,
};

#[derive(clap::Parser, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Opts {}

pub async fn main(_opts: &Opts, reports: &Reports) -> Result<()> {
    let rows = reports.usage_rows().await?;
    let summary = summary::summarize(&rows).context("failed to summarize usage data")?;
    let blocked = reports.blocked_ips().await?;
    print!(
        "{}",
        SummaryReport {
            summary: &summary,
            blocked: blocked.len(),
        }
    );
    Ok(())
}

struct SummaryReport<'a> {
    summary: &'a Summary,
    blocked: usize,
}

impl Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.summary;
        writeln!(f, "Date: {:>9}", s.date)?;
        writeln!(f, "IPs: {:>10}", s.ips)?;
        writeln!(f, "Green: {:>8}", s.green)?;
        writeln!(f, "Yellow: {:>7}", s.yellow)?;
        writeln!(f, "Red: {:>10}", s.red)?;
        writeln!(f, "Trap Hits: {:>4}", s.traps)?;
        writeln!(f, "Blocked: {:>6}", self.blocked)
    }
}

#[test]
fn test_summary_report_layout() {
    let summary = Summary {
        green: 1,
        yellow: 1,
        red: 1,
        traps: 107,
        ips: 3,
        date: "09/29/2020".to_owned(),
    };
    let report = SummaryReport {
        summary: &summary,
        blocked: 11,
    }
    .to_string();
    assert_eq!(
        report.lines().collect::<Vec<_>>(),
        vec![
            "Date: 09/29/2020",
            "IPs:          3",
            "Green:        1",
            "Yellow:       1",
            "Red:          1",
            "Trap Hits:  107",
            "Blocked:     11",
        ]
    );
}
