use crate::{
    commands::{filter_within, Reports},
    *,
};

#[derive(clap::Parser, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Opts {
    /// Only resolve blocked IPs inside this CIDR block
    #[clap(short, long)]
    within: Option<CidrNetwork>,
}

pub async fn main(opts: &Opts, reports: &Reports) -> Result<()> {
    let ips = filter_within(reports.blocked_ips().await?, opts.within.as_ref());
    let lookup = SystemPtrLookup::from_system_conf()?;

    info!(target: "rdns", "Resolving {} blocked IPs", ips.len());
    let results = resolve_all(&lookup, &ips).await;
    let misses = results
        .iter()
        .filter(|r| r.hostname == Hostname::NxDomain)
        .count();
    info!(target: "rdns", "{misses} of {} IPs have no reverse DNS", results.len());

    let mut out = std::io::stdout().lock();
    for result in results.iter() {
        writeln!(out, "{result}")?;
    }
    Ok(())
}
