//! Address arithmetic helpers.
//!
//! Addresses are compared and stepped through their big-endian integer value.
//! `u128` holds every IPv6 address exactly, so one code path serves both
//! families.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Integer value of an address
pub fn addr_to_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u128::from(u32::from(v4)),
        IpAddr::V6(v6) => u128::from(v6),
    }
}

/// Rebuild an address of the same family as `like` from its integer value.
///
/// Returns `None` when the value does not fit the family's width.
pub fn bits_to_addr(bits: u128, like: IpAddr) -> Option<IpAddr> {
    match like {
        IpAddr::V4(_) => u32::try_from(bits).ok().map(|v| IpAddr::V4(Ipv4Addr::from(v))),
        IpAddr::V6(_) => Some(IpAddr::V6(Ipv6Addr::from(bits))),
    }
}

/// Numeric successor of an address, `None` at the top of the address space
///
/// ```
/// use rangealloc::utils::ip_utils::successor;
/// use std::net::IpAddr;
///
/// let addr: IpAddr = "10.0.0.255".parse().unwrap();
/// assert_eq!(successor(addr), Some("10.0.1.0".parse().unwrap()));
///
/// let top: IpAddr = "255.255.255.255".parse().unwrap();
/// assert_eq!(successor(top), None);
/// ```
pub fn successor(addr: IpAddr) -> Option<IpAddr> {
    let bits = addr_to_bits(addr).checked_add(1)?;
    bits_to_addr(bits, addr)
}

/// Numeric predecessor of an address, `None` at the bottom of the address space
pub fn predecessor(addr: IpAddr) -> Option<IpAddr> {
    let bits = addr_to_bits(addr).checked_sub(1)?;
    bits_to_addr(bits, addr)
}

/// Check whether two addresses belong to the same family
pub fn same_family(a: IpAddr, b: IpAddr) -> bool {
    a.is_ipv4() == b.is_ipv4()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_successor_carries_across_octets() {
        assert_eq!(successor(ip("192.168.1.5")), Some(ip("192.168.1.6")));
        assert_eq!(successor(ip("192.168.1.255")), Some(ip("192.168.2.0")));
        assert_eq!(successor(ip("10.255.255.255")), Some(ip("11.0.0.0")));
        assert_eq!(successor(ip("2001:db8::ffff")), Some(ip("2001:db8::1:0")));
        assert_eq!(
            successor(ip("2001:db8:0:0:ffff:ffff:ffff:ffff")),
            Some(ip("2001:db8:0:1::"))
        );
    }

    #[test]
    fn test_successor_at_top_of_address_space() {
        assert_eq!(successor(ip("255.255.255.255")), None);
        assert_eq!(successor(ip("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff")), None);
    }

    #[test]
    fn test_predecessor() {
        assert_eq!(predecessor(ip("192.168.2.0")), Some(ip("192.168.1.255")));
        assert_eq!(predecessor(ip("0.0.0.0")), None);
        assert_eq!(predecessor(ip("::")), None);
    }

    #[test]
    fn test_bits_round_trip() {
        for s in ["0.0.0.0", "10.1.2.3", "255.255.255.255", "::", "2001:db8::1", "fe80::1:2"] {
            let addr = ip(s);
            assert_eq!(bits_to_addr(addr_to_bits(addr), addr), Some(addr));
        }
    }

    #[test]
    fn test_bits_too_wide_for_ipv4() {
        assert_eq!(bits_to_addr(1 << 32, ip("0.0.0.0")), None);
    }

    #[test]
    fn test_same_family() {
        assert!(same_family(ip("10.0.0.1"), ip("192.168.0.1")));
        assert!(same_family(ip("::1"), ip("2001:db8::1")));
        assert!(!same_family(ip("10.0.0.1"), ip("::ffff:10.0.0.1")));
    }
}
