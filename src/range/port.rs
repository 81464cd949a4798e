//! Inclusive band of TCP/UDP port numbers.
//!
//! Identifiers are the decimal form of the port (`"8080"`), and the payload
//! handed out by the cursor is the port itself as a `u16`.

use super::{Range, RangeId, RangeIterator};
use crate::allocator::Allocator;
use log::info;

/// Errors raised while building a [`PortRange`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortRangeError {
    #[error("lower port {lower} is greater than upper port {upper}")]
    InvalidBounds { lower: u16, upper: u16 },

    #[error("port {port} is outside the valid port domain 0-65535")]
    OutOfDomain { port: i64 },
}

/// Port band `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    lower: u16,
    upper: u16,
}

impl PortRange {
    /// Build a port band.
    ///
    /// Bounds are taken as wide integers so out-of-domain input (negative
    /// ports, ports above 65535) is reported rather than truncated.
    ///
    /// ```
    /// use rangealloc::range::{PortRange, PortRangeError};
    ///
    /// assert!(PortRange::new(100, 200).is_ok());
    /// assert_eq!(
    ///     PortRange::new(100, 99),
    ///     Err(PortRangeError::InvalidBounds { lower: 100, upper: 99 })
    /// );
    /// assert_eq!(PortRange::new(-1, 0), Err(PortRangeError::OutOfDomain { port: -1 }));
    /// ```
    pub fn new(lower: i64, upper: i64) -> Result<Self, PortRangeError> {
        let lower = to_port(lower)?;
        let upper = to_port(upper)?;
        if lower > upper {
            return Err(PortRangeError::InvalidBounds { lower, upper });
        }

        info!("Created port range {}-{}", lower, upper);
        Ok(PortRange { lower, upper })
    }

    /// Build an allocator over the port band `[lower, upper]` in one step
    pub fn allocator(lower: i64, upper: i64) -> Result<Allocator<PortRange>, PortRangeError> {
        Ok(Allocator::new(Self::new(lower, upper)?))
    }

    pub fn lower(&self) -> u16 {
        self.lower
    }

    pub fn upper(&self) -> u16 {
        self.upper
    }

    /// Number of ports in the band
    pub fn len(&self) -> usize {
        usize::from(self.upper - self.lower) + 1
    }

    /// A port band always holds at least one port
    pub fn is_empty(&self) -> bool {
        false
    }
}

fn to_port(value: i64) -> Result<u16, PortRangeError> {
    u16::try_from(value).map_err(|_| PortRangeError::OutOfDomain { port: value })
}

/// Parse a port identifier, accepting only its canonical decimal form
fn parse_range_id(id: &str) -> Option<u16> {
    let port: u16 = id.parse().ok()?;
    // rejects "+80", "080" and friends
    (port.to_string() == id).then_some(port)
}

fn generate_range_id(port: u16) -> RangeId {
    RangeId::from(port.to_string())
}

impl Range for PortRange {
    type Value = u16;
    type Iter = PortIterator;

    fn contains(&self, id: &str) -> bool {
        parse_range_id(id).is_some_and(|port| port >= self.lower && port <= self.upper)
    }

    fn first(&self) -> PortIterator {
        PortIterator {
            lower: self.lower,
            upper: self.upper,
            cur: u32::from(self.lower),
        }
    }
}

/// Cursor over a [`PortRange`]
#[derive(Debug, Clone)]
pub struct PortIterator {
    lower: u16,
    upper: u16,
    // wider than u16 so stepping past 65535 stays out of range instead of wrapping
    cur: u32,
}

impl RangeIterator for PortIterator {
    type Value = u16;

    fn get(&self) -> (RangeId, u16) {
        let port = u16::try_from(self.cur).unwrap_or(u16::MAX);
        (generate_range_id(port), port)
    }

    fn next(&mut self) {
        self.cur += 1;
    }

    fn in_range(&mut self) -> bool {
        self.cur >= u32::from(self.lower) && self.cur <= u32::from(self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_port_range() {
        let tests = vec![
            ("lower port is bigger than upper port", 100, 99, Err(PortRangeError::InvalidBounds { lower: 100, upper: 99 })),
            ("port is less than 0", -1, 0, Err(PortRangeError::OutOfDomain { port: -1 })),
            ("port is greater than 65535", 100, 100000, Err(PortRangeError::OutOfDomain { port: 100000 })),
            ("single port", 53, 53, Ok((53, 53))),
            ("full domain", 0, 65535, Ok((0, 65535))),
            ("valid input", 100, 200, Ok((100, 200))),
        ];

        for (name, lower, upper, expected) in tests {
            let result = PortRange::new(lower, upper).map(|r| (r.lower(), r.upper()));
            assert_eq!(result, expected, "case '{}' failed", name);
        }
    }

    #[test]
    fn test_contains() {
        let range = PortRange::new(100, 200).unwrap();

        assert!(range.contains("100"));
        assert!(range.contains("150"));
        assert!(range.contains("200"));

        assert!(!range.contains("99"));
        assert!(!range.contains("201"));
        assert!(!range.contains("1000"));
        assert!(!range.contains("abcd"));
        assert!(!range.contains(""));
        assert!(!range.contains("-150"));
        assert!(!range.contains("+150"));
        assert!(!range.contains("0150"));
        assert!(!range.contains(" 150"));
        assert!(!range.contains("70000"));
    }

    #[test]
    fn test_iteration_order() {
        let range = PortRange::new(10, 15).unwrap();
        let mut it = range.first();
        let mut seen = Vec::new();

        while it.in_range() {
            let (id, port) = it.get();
            // get is idempotent
            assert_eq!(it.get(), (id.clone(), port));
            assert!(range.contains(id.as_str()));
            seen.push(port);
            it.next();
        }

        assert_eq!(seen, vec![10, 11, 12, 13, 14, 15]);
        assert!(!it.in_range());
    }

    #[test]
    fn test_iteration_at_top_of_domain() {
        let range = PortRange::new(65534, 65535).unwrap();
        let ports: Vec<u16> = range.iter().map(|(_, port)| port).collect();

        assert_eq!(ports, vec![65534, 65535]);
    }

    #[test]
    fn test_first_returns_independent_cursors() {
        let range = PortRange::new(1, 3).unwrap();
        let mut a = range.first();
        a.next();
        a.next();
        let b = range.first();

        assert_eq!(a.get().1, 3);
        assert_eq!(b.get().1, 1);
    }

    #[test]
    fn test_len() {
        assert_eq!(PortRange::new(10, 15).unwrap().len(), 6);
        assert_eq!(PortRange::new(0, 65535).unwrap().len(), 65536);
    }
}
