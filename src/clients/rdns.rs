use std::{
    fmt::{Display, Formatter},
    net::{IpAddr, Ipv4Addr},
};

use anyhow::anyhow;
use log::debug;
use trust_dns_resolver::{error::ResolveErrorKind, TokioAsyncResolver};

use crate::utils;

/// Shown in place of a hostname when an address has no usable PTR record
pub const NXDOMAIN: &str = "NXDOMAIN";

/// Anything that can map an address back to a hostname
pub trait PtrLookup {
    async fn reverse(&self, ip: Ipv4Addr) -> anyhow::Result<String>;
}

/// PTR lookups through the system configured resolver
pub struct SystemPtrLookup {
    resolver: TokioAsyncResolver,
}

impl SystemPtrLookup {
    pub fn from_system_conf() -> anyhow::Result<Self> {
        Ok(Self {
            resolver: TokioAsyncResolver::tokio_from_system_conf()
                .map_err(|e| anyhow!("failed to create DNS resolver: {e}"))?,
        })
    }
}

impl PtrLookup for SystemPtrLookup {
    async fn reverse(&self, ip: Ipv4Addr) -> anyhow::Result<String> {
        self.resolver
            .reverse_lookup(IpAddr::V4(ip))
            .await
            .map_err(|e| {
                anyhow!(
                    "failed to reverse '{ip}': {}",
                    match e.kind() {
                        ResolveErrorKind::NoRecordsFound { .. } => "no records found",
                        ResolveErrorKind::Message(msg) => *msg,
                        _ => "unknown error",
                    }
                )
            })?
            .iter()
            .next()
            .map(|ptr| utils::normalize_hostname(&ptr.to_string()))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| anyhow!("no PTR record for '{ip}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Hostname {
    Name(String),
    NxDomain,
}

impl Display for Hostname {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Hostname::Name(name) => f.write_str(name),
            Hostname::NxDomain => f.write_str(NXDOMAIN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RdnsResult {
    pub ip: Ipv4Addr,
    pub hostname: Hostname,
}

impl Display for RdnsResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};{}", self.ip, self.hostname)
    }
}

/// Reverse every address, one at a time and in input order
///
/// A failed lookup never fails the batch, it yields [`Hostname::NxDomain`]
/// for that address. A single address is passed as a one element slice.
pub async fn resolve_all<L: PtrLookup>(lookup: &L, ips: &[Ipv4Addr]) -> Vec<RdnsResult> {
    let mut results = Vec::with_capacity(ips.len());
    for &ip in ips {
        let hostname = match lookup.reverse(ip).await {
            Ok(name) => Hostname::Name(name),
            Err(e) => {
                debug!(target: "rdns", "{e}");
                Hostname::NxDomain
            }
        };
        results.push(RdnsResult { ip, hostname });
    }
    results
}
