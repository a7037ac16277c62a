//! Concrete provider adapters, one module per family.

pub mod link;
pub mod storage;
