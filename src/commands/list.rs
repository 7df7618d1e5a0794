use crate::{
    commands::{filter_within, Reports},
    *,
};

#[derive(clap::Parser, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Opts {
    /// Only list blocked IPs inside this CIDR block
    #[clap(short, long)]
    within: Option<CidrNetwork>,
}

pub async fn main(opts: &Opts, reports: &Reports) -> Result<()> {
    let ips = filter_within(reports.blocked_ips().await?, opts.within.as_ref());
    let mut out = std::io::stdout().lock();
    for ip in ips.iter() {
        writeln!(out, "{ip}")?;
    }
    Ok(())
}
