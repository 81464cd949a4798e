//! Shared utilities: address arithmetic.

pub mod ip_utils;

pub use ip_utils::{addr_to_bits, bits_to_addr, predecessor, same_family, successor};
