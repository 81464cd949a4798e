//! Address window inside a subnet.
//!
//! An [`IpRange`] covers the addresses `[start, end]` of one subnet, minus a
//! gateway address that is never allocatable. Identifiers are the canonical
//! text form of the address (`"192.168.1.5"`, `"2001:db8::5"`) and the cursor
//! payload is an [`IpAllocation`]: the address with the subnet's mask, plus
//! the gateway.
//!
//! Ordering and stepping use the address's integer value, so the same code
//! walks IPv4 windows and windows anywhere in the IPv6 space. Stepping past
//! the very last address of the space exhausts the cursor instead of wrapping.

use super::{Range, RangeId, RangeIterator};
use crate::allocator::Allocator;
use crate::utils::ip_utils::{addr_to_bits, predecessor, same_family, successor};
use ipnet::IpNet;
use log::info;
use serde::Serialize;
use std::net::IpAddr;

/// Errors raised while building an [`IpRange`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IpRangeError {
    #[error("address {addr} is not of the same IP family as subnet {subnet}")]
    FamilyMismatch { addr: IpAddr, subnet: IpNet },

    #[error("address {addr} is not within subnet {subnet}")]
    NotInSubnet { addr: IpAddr, subnet: IpNet },

    #[error("range start {start} is greater than range end {end}")]
    InvalidBounds { start: IpAddr, end: IpAddr },

    #[error("subnet {subnet} has no allocatable addresses")]
    NoHosts { subnet: IpNet },
}

/// Payload handed out for one address of an [`IpRange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IpAllocation {
    /// The allocated address, carrying the subnet's prefix length
    pub address: IpNet,
    pub gateway: IpAddr,
}

/// Address window `[start, end]` of a subnet, excluding the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpRange {
    subnet: IpNet,
    start: IpAddr,
    end: IpAddr,
    gateway: IpAddr,
}

impl IpRange {
    /// Build an address window with explicit bounds and gateway.
    ///
    /// Host bits set in `subnet` are ignored. All addresses must belong to the
    /// subnet, `start` must not exceed `end`, and the window must hold at
    /// least one address besides the gateway.
    pub fn new(subnet: IpNet, start: IpAddr, end: IpAddr, gateway: IpAddr) -> Result<Self, IpRangeError> {
        let subnet = subnet.trunc();

        for addr in [start, end, gateway] {
            if !same_family(addr, subnet.network()) {
                return Err(IpRangeError::FamilyMismatch { addr, subnet });
            }
            if !subnet.contains(&addr) {
                return Err(IpRangeError::NotInSubnet { addr, subnet });
            }
        }

        if addr_to_bits(start) > addr_to_bits(end) {
            return Err(IpRangeError::InvalidBounds { start, end });
        }
        if start == end && start == gateway {
            return Err(IpRangeError::NoHosts { subnet });
        }

        info!(
            "Created IP range {}-{} in subnet {} (gateway {})",
            start, end, subnet, gateway
        );
        Ok(IpRange { subnet, start, end, gateway })
    }

    /// Build an address window, filling in whatever is not given.
    ///
    /// Defaults follow the usual host-local conventions:
    /// - `start`: the first address after the network address
    /// - `end`: the last address before the broadcast address for IPv4
    ///   prefixes shorter than /31, otherwise the last address of the subnet
    /// - `gateway`: the first address after the network address
    ///
    /// ```
    /// use rangealloc::range::{IpRange, Range};
    ///
    /// let range = IpRange::from_subnet("10.0.0.0/24".parse().unwrap(), None, None, None)?;
    /// assert_eq!(range.gateway().to_string(), "10.0.0.1");
    /// assert!(!range.contains("10.0.0.1"));
    /// assert!(range.contains("10.0.0.2"));
    /// assert!(range.contains("10.0.0.254"));
    /// assert!(!range.contains("10.0.0.255"));
    /// # Ok::<(), rangealloc::range::IpRangeError>(())
    /// ```
    pub fn from_subnet(
        subnet: IpNet,
        start: Option<IpAddr>,
        end: Option<IpAddr>,
        gateway: Option<IpAddr>,
    ) -> Result<Self, IpRangeError> {
        let subnet = subnet.trunc();
        let first_host = successor(subnet.network())
            .filter(|addr| subnet.contains(addr))
            .ok_or(IpRangeError::NoHosts { subnet })?;
        let last_host = match subnet {
            IpNet::V4(net) if net.prefix_len() < 31 => {
                predecessor(subnet.broadcast()).ok_or(IpRangeError::NoHosts { subnet })?
            }
            _ => subnet.broadcast(),
        };

        Self::new(
            subnet,
            start.unwrap_or(first_host),
            end.unwrap_or(last_host),
            gateway.unwrap_or(first_host),
        )
    }

    /// Build an allocator over an address window in one step
    pub fn allocator(
        subnet: IpNet,
        start: IpAddr,
        end: IpAddr,
        gateway: IpAddr,
    ) -> Result<Allocator<IpRange>, IpRangeError> {
        Ok(Allocator::new(Self::new(subnet, start, end, gateway)?))
    }

    pub fn subnet(&self) -> IpNet {
        self.subnet
    }

    pub fn start(&self) -> IpAddr {
        self.start
    }

    pub fn end(&self) -> IpAddr {
        self.end
    }

    pub fn gateway(&self) -> IpAddr {
        self.gateway
    }
}

/// Parse an address identifier, accepting only its canonical text form
fn parse_range_id(id: &str) -> Option<IpAddr> {
    let addr: IpAddr = id.parse().ok()?;
    (addr.to_string() == id).then_some(addr)
}

fn generate_range_id(addr: IpAddr) -> RangeId {
    RangeId::from(addr.to_string())
}

impl Range for IpRange {
    type Value = IpAllocation;
    type Iter = IpIterator;

    fn contains(&self, id: &str) -> bool {
        let Some(addr) = parse_range_id(id) else {
            return false;
        };
        if !same_family(addr, self.subnet.network()) || !self.subnet.contains(&addr) {
            return false;
        }

        let bits = addr_to_bits(addr);
        bits >= addr_to_bits(self.start) && bits <= addr_to_bits(self.end) && addr != self.gateway
    }

    fn first(&self) -> IpIterator {
        IpIterator {
            subnet: self.subnet,
            end: self.end,
            gateway: self.gateway,
            cur: self.start,
            exhausted: false,
        }
    }
}

/// Cursor over an [`IpRange`]
#[derive(Debug, Clone)]
pub struct IpIterator {
    subnet: IpNet,
    end: IpAddr,
    gateway: IpAddr,
    cur: IpAddr,
    // set once the cursor steps past the last address of the space
    exhausted: bool,
}

impl RangeIterator for IpIterator {
    type Value = IpAllocation;

    fn get(&self) -> (RangeId, IpAllocation) {
        let address = IpNet::new(self.cur, self.subnet.prefix_len())
            .expect("cursor shares the subnet's address family");
        (
            generate_range_id(self.cur),
            IpAllocation { address, gateway: self.gateway },
        )
    }

    fn next(&mut self) {
        match successor(self.cur) {
            Some(next) => self.cur = next,
            None => self.exhausted = true,
        }
    }

    fn in_range(&mut self) -> bool {
        loop {
            if self.exhausted {
                return false;
            }
            if self.cur == self.gateway {
                self.next();
                continue;
            }
            return addr_to_bits(self.cur) <= addr_to_bits(self.end);
        }
    }
}
