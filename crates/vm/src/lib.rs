pub mod config;
pub mod error;
pub mod host_interface;
pub mod loader;
pub mod machine;
pub mod memory;

pub use config::MachineConfig;
pub use error::VmError;
pub use host_interface::{ListMemory, ScratchPrintBuffer};
pub use machine::{Machine, MachineStatus};
pub use memory::FlatMemory;
