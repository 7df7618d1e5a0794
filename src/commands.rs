/*

    This is a mapper for all commands

*/

mod ip;
mod list;
mod rdns;
mod summary;

use crate::{
    models::{csv, csv::Row, range},
    *,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, clap::Subcommand)]
pub enum Command {
    /// General status of the most recent data (or of --date)
    #[clap(alias = "s")]
    Summary(summary::Opts),
    /// Complete status of one IP
    Ip(ip::Opts),
    /// List the blocked IPs
    #[clap(alias = "l")]
    List(list::Opts),
    /// List the blocked IPs with their reverse DNS
    #[clap(alias = "r")]
    Rdns(rdns::Opts),
}

impl Command {
    pub async fn run(&self, reports: &Reports) -> anyhow::Result<()> {
        match self {
            Command::Summary(opts) => summary::main(opts, reports).await,
            Command::Ip(opts) => ip::main(opts, reports).await,
            Command::List(opts) => list::main(opts, reports).await,
            Command::Rdns(opts) => rdns::main(opts, reports).await,
        }
    }
}

/// Where commands get their report data from
pub struct Reports {
    client: SndsClient,
    date: Option<ReportDate>,
}

impl Reports {
    pub fn new(client: SndsClient, date: Option<ReportDate>) -> Self {
        Self { client, date }
    }

    /// Rows of the usage data report
    pub async fn usage_rows(&self) -> Result<Vec<Row>> {
        let body = self
            .client
            .usage_data(self.date.as_ref())
            .await
            .context("could not connect to SNDS API")?;
        let rows = csv::parse(&body);
        debug!(target: "snds", "usage data report has {} rows", rows.len());
        Ok(rows)
    }

    /// Every blocked address, in report order
    pub async fn blocked_ips(&self) -> Result<Vec<Ipv4Addr>> {
        let body = self
            .client
            .ip_status()
            .await
            .context("could not connect to SNDS API")?;
        let ranges = range::blocked_ranges(&csv::parse(&body))
            .context("failed to read the ip status report")?;
        let ips = range::expand_all(&ranges);
        debug!(target: "snds", "{} blocked ranges, {} addresses", ranges.len(), ips.len());
        Ok(ips)
    }
}

/// Keep the addresses inside `within`, order and duplicates untouched
pub fn filter_within(ips: Vec<Ipv4Addr>, within: Option<&CidrNetwork>) -> Vec<Ipv4Addr> {
    let Some(network) = within else {
        return ips;
    };
    let total = ips.len();
    let ips = ips
        .into_iter()
        .filter(|ip| network.contains(*ip))
        .collect::<Vec<_>>();
    if ips.is_empty() && total > 0 {
        warn!(target: "cli", "none of the {total} blocked IPs are within {network}");
    }
    ips
}

#[test]
fn test_filter_within() -> Result<()> {
    let ips = ["1.1.1.255", "1.1.2.0", "1.1.1.3", "1.1.1.3"]
        .iter()
        .map(|s| s.parse::<Ipv4Addr>())
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(filter_within(ips.clone(), None), ips);

    let network = "1.1.1.0/24".parse::<CidrNetwork>()?;
    assert_eq!(
        filter_within(ips.clone(), Some(&network)),
        vec![ips[0], ips[2], ips[3]]
    );

    let network = "10.0.0.0/8".parse::<CidrNetwork>()?;
    assert!(filter_within(ips, Some(&network)).is_empty());
    Ok(())
}
