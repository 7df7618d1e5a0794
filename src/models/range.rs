use std::{
    fmt::{Display, Formatter},
    net::Ipv4Addr,
};

use crate::{error::SndsError, models::csv::Row};

/// Parse a dotted-quad IPv4 address as found in SNDS reports
pub fn parse_ipv4(s: &str) -> Result<Ipv4Addr, SndsError> {
    s.parse::<Ipv4Addr>()
        .map_err(|e| SndsError::Parse(format!("invalid IPv4 address '{s}': {e}")))
}

/// The address directly after `ip`
pub fn successor(ip: Ipv4Addr) -> Result<Ipv4Addr, SndsError> {
    u32::from(ip)
        .checked_add(1)
        .map(Ipv4Addr::from)
        .ok_or(SndsError::Overflow(ip))
}

/// An inclusive span of blocked IPv4 addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockedRange {
    first: Ipv4Addr,
    last: Ipv4Addr,
}

impl Display for BlockedRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

impl BlockedRange {
    pub fn new(first: Ipv4Addr, last: Ipv4Addr) -> Result<Self, SndsError> {
        if first > last {
            return Err(SndsError::InvalidRange { first, last });
        }
        Ok(Self { first, last })
    }

    /// The whole block of `ip/prefix`, network and broadcast addresses included
    pub fn from_cidr(ip: Ipv4Addr, prefix: u8) -> Result<Self, SndsError> {
        if prefix > 32 {
            return Err(SndsError::Parse(format!(
                "invalid prefix length /{prefix}, must be between 0 and 32"
            )));
        }
        // a /0 shifts by the full width
        let mask = u32::MAX.checked_shl(32 - prefix as u32).unwrap_or(0);
        let network = u32::from(ip) & mask;
        Ok(Self {
            first: Ipv4Addr::from(network),
            last: Ipv4Addr::from(network | !mask),
        })
    }

    /// Build a range from one row of the ip status report
    ///
    /// Rows look like `1.1.1.0,1.1.1.1,Yes,Blocked due to user complaints...`,
    /// only the first two fields are used.
    pub fn from_row(row: &[String]) -> Result<Self, SndsError> {
        match row {
            [first, last, ..] => Self::new(parse_ipv4(first)?, parse_ipv4(last)?),
            _ => Err(SndsError::Parse(format!(
                "ip status row needs a first and last address, found {} field(s)",
                row.len()
            ))),
        }
    }

    pub fn first(&self) -> Ipv4Addr {
        self.first
    }

    pub fn last(&self) -> Ipv4Addr {
        self.last
    }

    pub fn address_count(&self) -> u64 {
        u64::from(u32::from(self.last) - u32::from(self.first)) + 1
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.first <= ip && ip <= self.last
    }

    /// Every address in the range, in ascending order
    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        (u32::from(self.first)..=u32::from(self.last)).map(Ipv4Addr::from)
    }

    pub fn addresses(&self) -> Vec<Ipv4Addr> {
        self.iter().collect()
    }
}

/// Enumerate `first..=last`
pub fn expand(first: Ipv4Addr, last: Ipv4Addr) -> Result<Vec<Ipv4Addr>, SndsError> {
    BlockedRange::new(first, last).map(|range| range.addresses())
}

/// Expand ranges in report order; overlapping ranges yield duplicate addresses
pub fn expand_all(ranges: &[BlockedRange]) -> Vec<Ipv4Addr> {
    ranges.iter().flat_map(|range| range.iter()).collect()
}

/// Read every row of an ip status report
pub fn blocked_ranges(rows: &[Row]) -> Result<Vec<BlockedRange>, SndsError> {
    rows.iter().map(|row| BlockedRange::from_row(row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    fn row(fields: &[&str]) -> Row {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn expands_across_octet_boundary() -> Result<()> {
        let ips = expand(ip("1.1.1.254"), ip("1.1.2.1"))?;
        assert_eq!(
            ips,
            vec![ip("1.1.1.254"), ip("1.1.1.255"), ip("1.1.2.0"), ip("1.1.2.1")]
        );
        Ok(())
    }

    #[test]
    fn expands_with_carry_through_every_octet() -> Result<()> {
        let ips = expand(ip("1.255.255.255"), ip("2.0.0.0"))?;
        assert_eq!(ips, vec![ip("1.255.255.255"), ip("2.0.0.0")]);
        let ips = expand(ip("1.1.255.255"), ip("1.2.0.0"))?;
        assert_eq!(ips, vec![ip("1.1.255.255"), ip("1.2.0.0")]);
        Ok(())
    }

    #[test]
    fn single_address_range() -> Result<()> {
        assert_eq!(expand(ip("1.1.1.3"), ip("1.1.1.3"))?, vec![ip("1.1.1.3")]);
        Ok(())
    }

    #[test]
    fn rejects_reversed_range() {
        assert_eq!(
            expand(ip("1.1.1.5"), ip("1.1.1.3")),
            Err(SndsError::InvalidRange {
                first: ip("1.1.1.5"),
                last: ip("1.1.1.3"),
            })
        );
    }

    #[test]
    fn expansion_is_contiguous() -> Result<()> {
        let cases = [
            ("0.0.0.0", "0.0.1.10"),
            ("10.0.255.200", "10.1.0.20"),
            ("255.255.255.0", "255.255.255.255"),
        ];
        for (first, last) in cases {
            let (first, last) = (ip(first), ip(last));
            let ips = expand(first, last)?;
            assert_eq!(ips.len() as u32, u32::from(last) - u32::from(first) + 1);
            assert_eq!(ips.first(), Some(&first));
            assert_eq!(ips.last(), Some(&last));
            for pair in ips.windows(2) {
                assert_eq!(u32::from(pair[1]) - u32::from(pair[0]), 1);
            }
        }
        Ok(())
    }

    #[test]
    fn successor_carries_and_overflows() -> Result<()> {
        assert_eq!(successor(ip("1.1.1.255"))?, ip("1.1.2.0"));
        assert_eq!(successor(ip("9.255.255.255"))?, ip("10.0.0.0"));
        assert_eq!(
            successor(ip("255.255.255.255")),
            Err(SndsError::Overflow(ip("255.255.255.255")))
        );
        Ok(())
    }

    #[test]
    fn parse_rejects_bad_octets() {
        assert!(parse_ipv4("1.1.1.256").is_err());
        assert!(parse_ipv4("1.1.1").is_err());
        assert!(parse_ipv4("host.example").is_err());
        assert_eq!(parse_ipv4("1.1.1.1"), Ok(ip("1.1.1.1")));
    }

    #[test]
    fn cidr_block_bounds() -> Result<()> {
        let block = BlockedRange::from_cidr(ip("192.168.7.9"), 24)?;
        assert_eq!(block.first(), ip("192.168.7.0"));
        assert_eq!(block.last(), ip("192.168.7.255"));
        assert_eq!(block.address_count(), 256);

        let all = BlockedRange::from_cidr(ip("8.8.8.8"), 0)?;
        assert_eq!(all.first(), ip("0.0.0.0"));
        assert_eq!(all.last(), ip("255.255.255.255"));
        assert_eq!(all.address_count(), 1 << 32);

        let host = BlockedRange::from_cidr(ip("8.8.8.8"), 32)?;
        assert_eq!(host.addresses(), vec![ip("8.8.8.8")]);

        assert!(BlockedRange::from_cidr(ip("8.8.8.8"), 33).is_err());
        Ok(())
    }

    #[test]
    fn report_rows_keep_order_and_duplicates() -> Result<()> {
        let rows = vec![
            row(&["1.1.1.0", "1.1.1.1", "Yes", "spam"]),
            row(&["1.1.1.1", "1.1.1.2", "Yes", "spam"]),
        ];
        let ranges = blocked_ranges(&rows)?;
        assert_eq!(
            expand_all(&ranges),
            vec![ip("1.1.1.0"), ip("1.1.1.1"), ip("1.1.1.1"), ip("1.1.1.2")]
        );
        Ok(())
    }

    #[test]
    fn short_or_bad_rows_fail() {
        assert!(matches!(
            BlockedRange::from_row(&row(&["1.1.1.0"])),
            Err(SndsError::Parse(_))
        ));
        assert!(matches!(
            BlockedRange::from_row(&row(&["1.1.1.0", "nope"])),
            Err(SndsError::Parse(_))
        ));
        assert!(matches!(
            BlockedRange::from_row(&row(&["1.1.1.9", "1.1.1.0"])),
            Err(SndsError::InvalidRange { .. })
        ));
    }
}
