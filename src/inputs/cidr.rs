use anyhow::{anyhow, bail, Result};
use std::net::Ipv4Addr;

use crate::models::BlockedRange;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CidrNetwork {
    /// The IP address provided on creation of the CidrNetwork
    pub ip: Ipv4Addr,
    /// The prefix length of the CIDR
    pub mask: u8,
    /// Every address covered by the CIDR, network and broadcast included
    pub range: BlockedRange,
}

impl std::str::FromStr for CidrNetwork {
    type Err = anyhow::Error;

    /// Parse a CIDR string into a CidrNetwork struct
    ///
    /// # Examples
    ///
    /// `192.168.0.0/24`
    ///
    /// `10.1.2.3` (a single address, same as `/32`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ip, mask) = match s.split_once('/') {
            Some((ip, mask)) => (
                ip,
                mask.parse::<u8>()
                    .map_err(|e| anyhow!("Invalid mask in CIDR '{s}': {e}"))?,
            ),
            None => (s, 32),
        };
        let ip = ip
            .parse::<Ipv4Addr>()
            .map_err(|e| anyhow!("Invalid IPv4 address in CIDR '{s}': {e}"))?;
        if mask > 32 {
            bail!("Invalid CIDR: '{s}', mask must be between 0 and 32");
        }

        CidrNetwork::from_ipv4(ip, mask)
    }
}

impl std::fmt::Display for CidrNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.ip, self.mask)
    }
}

impl CidrNetwork {
    pub fn from_ipv4(sample_ip: Ipv4Addr, input_mask: u8) -> Result<CidrNetwork> {
        Ok(CidrNetwork {
            ip: sample_ip,
            mask: input_mask,
            range: BlockedRange::from_cidr(sample_ip, input_mask)?,
        })
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.range.contains(ip)
    }
}

#[test]
fn test_cidr_ipv4_24() -> Result<()> {
    let cidr = CidrNetwork::from_ipv4(Ipv4Addr::new(192, 168, 0, 0), 24)?;
    assert_eq!(cidr.ip, Ipv4Addr::new(192, 168, 0, 0));
    assert_eq!(cidr.mask, 24);
    assert_eq!(cidr.range.first(), Ipv4Addr::new(192, 168, 0, 0));
    assert_eq!(cidr.range.last(), Ipv4Addr::new(192, 168, 0, 255));
    assert_eq!(cidr.range.address_count(), 256);
    Ok(())
}
#[test]
fn test_cidr_ipv4_16() -> Result<()> {
    let cidr = CidrNetwork::from_ipv4(Ipv4Addr::new(192, 168, 10, 4), 16)?;
    assert_eq!(cidr.range.first(), Ipv4Addr::new(192, 168, 0, 0));
    assert_eq!(cidr.range.last(), Ipv4Addr::new(192, 168, 255, 255));
    assert_eq!(cidr.range.address_count(), 65536);
    assert!(cidr.contains(Ipv4Addr::new(192, 168, 200, 1)));
    assert!(!cidr.contains(Ipv4Addr::new(192, 169, 0, 0)));
    Ok(())
}
#[test]
fn test_cidr_ipv4_8() -> Result<()> {
    let cidr = "10.0.0.0/8".parse::<CidrNetwork>()?;
    assert_eq!(cidr.ip, Ipv4Addr::new(10, 0, 0, 0));
    assert_eq!(cidr.mask, 8);
    assert_eq!(cidr.range.last(), Ipv4Addr::new(10, 255, 255, 255));
    assert_eq!(cidr.range.address_count(), 16777216);
    Ok(())
}
#[test]
fn text_cidr_from_str() -> Result<()> {
    assert!(
        "192.168.10.0/24".parse::<CidrNetwork>().is_ok(),
        "Failed to parse IPv4 CIDR from str"
    );
    assert_eq!("1.1.1.3".parse::<CidrNetwork>()?.range.address_count(), 1);
    assert!("1.1.1.0/33".parse::<CidrNetwork>().is_err());
    assert!("1.1.1.0/".parse::<CidrNetwork>().is_err());
    assert!("2001:db8::/32".parse::<CidrNetwork>().is_err());
    Ok(())
}
