use std::fmt::{Display, Formatter};

use crate::{
    commands::Reports,
    models::{summary, FilterResult, UsageRecord},
    *,
};

#[derive(clap::Parser, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Opts {
    /// IP to show the usage data of
    #[clap(required = true)]
    ip: Ipv4Addr,
}

pub async fn main(opts: &Opts, reports: &Reports) -> Result<()> {
    let rows = reports.usage_rows().await?;
    match summary::search_ip_status(&opts.ip.to_string(), &rows)
        .with_context(|| format!("failed to read usage data of {}", opts.ip))?
    {
        Some(record) => print!(
            "{}",
            IpReport {
                record: &record,
                colorize: std::io::stdout().is_terminal(),
            }
        ),
        None => println!("No data found for the given IP."),
    }
    Ok(())
}

struct IpReport<'a> {
    record: &'a UsageRecord,
    colorize: bool,
}

impl Display for IpReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let r = self.record;
        let verdict = format!("{:>11}", r.filter_result);
        let verdict = if self.colorize {
            match r.filter() {
                FilterResult::Green => verdict.green(),
                FilterResult::Yellow => verdict.yellow(),
                FilterResult::Red => verdict.red(),
            }
            .to_string()
        } else {
            verdict
        };

        writeln!(f, "Activity: {} until {}", r.activity_start, r.activity_end)?;
        writeln!(f, "IP: {:>15}", r.ip_address)?;
        writeln!(f, "Messages: {:>9}", r.message_recipients)?;
        writeln!(f, "Filter: {verdict}")?;
        writeln!(f, "Complaint: {:>8}", r.complaint_rate)?;
        writeln!(f, "Trap Hits: {:>8}", r.traphits)
    }
}

#[test]
fn test_ip_report_layout() -> Result<()> {
    let rows = models::csv::parse(
        "1.1.1.2,12/31/2019 9:00 PM,9/29/2020 9:00 PM,14121,14121,12960,RED,< 0.1%,9/29/2020 8:07 AM,9/29/2020 11:53 AM,26,,,",
    );
    let record = UsageRecord::try_from(rows[0].as_slice())?;
    let report = IpReport {
        record: &record,
        colorize: false,
    }
    .to_string();
    assert_eq!(
        report.lines().collect::<Vec<_>>(),
        vec![
            "Activity: 12/31/2019 9:00 PM until 9/29/2020 9:00 PM",
            "IP:         1.1.1.2",
            "Messages:     12960",
            "Filter:         RED",
            "Complaint:   < 0.1%",
            "Trap Hits:       26",
        ]
    );
    Ok(())
}
#[test]
fn test_ip_report_colors_only_the_verdict() -> Result<()> {
    colored::control::set_override(true);
    let record = UsageRecord {
        filter_result: "GREEN".to_owned(),
        ..Default::default()
    };
    let report = IpReport {
        record: &record,
        colorize: true,
    }
    .to_string();
    assert!(report.contains(&format!("Filter: {}", "      GREEN".green())));
    Ok(())
}
