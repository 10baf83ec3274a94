#![no_std]

pub mod address;
pub use address::{Address, PTR_WIDTH};

pub mod memory_map;
pub use memory_map::*;

pub mod bus;
pub use bus::Bus;

pub mod host;
pub use host::{IndexedMemory, PrintBuffer};

pub mod sbin;
pub use sbin::{SbinHeader, SBIN_HEADER_LEN, SBIN_MAGIC};
