#![allow(dead_code, unused_imports)]
use ::{
    anyhow::{anyhow, bail, ensure, Context, Result},
    clap::Parser,
    colored::Colorize,
    log::{debug, info, warn},
    std::{
        io::{IsTerminal, Write},
        net::Ipv4Addr,
        str::FromStr,
        time::Duration,
    },
    url::Url,
};

mod inputs;
use inputs::prelude::*;
mod clients;
use clients::prelude::*;
mod commands;
mod error;
mod models;
mod utils;

/// Searches and formats the SNDS dashboard data
#[derive(Parser, Debug)]
#[command(name = "snds", version, about, long_about = None)]
struct Opts {
    /// SNDS access key for automated data access
    #[clap(short = 'k', long = "key", required = true)]
    key: AccessKey,
    /// Usage data of the given day (format=MMDDYY) instead of the most recent
    #[clap(short = 'd', long = "date")]
    date: Option<ReportDate>,
    /// HTTP request timeout in seconds
    #[clap(long, default_value = "30")]
    timeout: u64,
    /// Base URL of the report endpoints, must end with a slash
    #[clap(long, default_value = DEFAULT_ENDPOINT, hide = true)]
    endpoint: Url,
    /// The command to run
    #[clap(subcommand)]
    cmd: Box<commands::Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();
    debug!(target: "cli", "{opts:?}");

    let client = SndsClient::new(
        opts.endpoint.clone(),
        opts.key.clone(),
        Duration::from_secs(opts.timeout),
    )?;
    let reports = commands::Reports::new(client, opts.date);
    opts.cmd.run(&reports).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Opts::command().debug_assert();
    }

    #[test]
    fn parses_summary_with_date() -> Result<()> {
        let opts = Opts::try_parse_from(["snds", "-k", "test", "-d", "092920", "summary"])?;
        assert_eq!(opts.key.as_str(), "test");
        assert_eq!(opts.date, Some("092920".parse::<ReportDate>()?));
        assert_eq!(opts.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(opts.timeout, 30);
        Ok(())
    }

    #[test]
    fn key_is_mandatory() {
        assert!(Opts::try_parse_from(["snds", "list"]).is_err());
    }

    #[test]
    fn rejects_bad_arguments() {
        for args in [
            &["snds", "-k", "test", "-d", "2020-09-29", "summary"][..],
            &["snds", "-k", "key with spaces", "summary"],
            &["snds", "-k", "test", "ip", "1.1.1.256"],
            &["snds", "-k", "test", "list", "--within", "1.1.1.0/40"],
        ] {
            assert!(
                Opts::try_parse_from(args.iter().copied()).is_err(),
                "accepted {args:?}"
            );
        }
    }

    #[test]
    fn short_aliases() -> Result<()> {
        for alias in ["s", "l", "r"] {
            Opts::try_parse_from(["snds", "-k", "test", alias])?;
        }
        Opts::try_parse_from(["snds", "-k", "test", "ip", "1.1.1.2"])?;
        Opts::try_parse_from(["snds", "-k", "test", "r", "--within", "1.1.1.0/24"])?;
        Ok(())
    }
}
