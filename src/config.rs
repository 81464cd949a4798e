use crate::range::{IpRange, IpRangeError, PortRange, PortRangeError, Range};
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::IpAddr;

/// Pool description: which range to allocate from and what is reserved up front
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub pool: PoolConfig,
    /// Identifiers assigned before any allocation happens
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reserved: Vec<String>,
}

/// Range kinds that can back a pool
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PoolConfig {
    /// Inclusive port band
    Port { lower: i64, upper: i64 },
    /// Address window inside a subnet; omitted fields take host-local defaults
    Ip {
        subnet: IpNet,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<IpAddr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<IpAddr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gateway: Option<IpAddr>,
    },
}

/// A range built from a [`PoolConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pool {
    Port(PortRange),
    Ip(IpRange),
}

impl Pool {
    /// Membership test against whichever range backs the pool
    pub fn contains(&self, id: &str) -> bool {
        match self {
            Pool::Port(range) => range.contains(id),
            Pool::Ip(range) => range.contains(id),
        }
    }
}

impl PoolConfig {
    /// Build the concrete range described by this configuration
    pub fn build(&self) -> Result<Pool, ValidationError> {
        match self {
            PoolConfig::Port { lower, upper } => Ok(Pool::Port(PortRange::new(*lower, *upper)?)),
            PoolConfig::Ip { subnet, start, end, gateway } => {
                Ok(Pool::Ip(IpRange::from_subnet(*subnet, *start, *end, *gateway)?))
            }
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let pool = self.pool.build()?;

        let mut seen = HashSet::new();
        for id in &self.reserved {
            if !pool.contains(id) {
                return Err(ValidationError::ReservedOutOfRange(id.clone()));
            }
            if !seen.insert(id.as_str()) {
                return Err(ValidationError::DuplicateReserved(id.clone()));
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid port pool: {0}")]
    InvalidPortPool(#[from] PortRangeError),
    #[error("Invalid IP pool: {0}")]
    InvalidIpPool(#[from] IpRangeError),
    #[error("Reserved identifier '{0}' is not part of the pool")]
    ReservedOutOfRange(String),
    #[error("Reserved identifier '{0}' is listed more than once")]
    DuplicateReserved(String),
}
