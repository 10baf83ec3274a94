use thiserror::Error;

/// Problems found while building or booting a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    #[error("image is {len} bytes, shorter than the {needed}-byte SBIN header")]
    TruncatedHeader { len: usize, needed: usize },

    #[error("bad image magic 0x{found:08x}, expected 0x{expected:08x}")]
    BadMagic { found: u32, expected: u32 },

    #[error("program data must cover the {needed}-byte i/o segment, got {len} bytes")]
    MissingIoSegment { len: usize, needed: u32 },

    #[error("program data ({data_len} bytes) does not fit in {memory_size} bytes of memory")]
    ImageTooLarge { data_len: usize, memory_size: u32 },

    #[error("memory size {requested} exceeds the {limit}-byte limit")]
    MemoryTooLarge { requested: u32, limit: u32 },

    #[error("stack start 0x{stack_start:08x} lies outside memory of {memory_size} bytes")]
    StackOutsideMemory { stack_start: u32, memory_size: u32 },

    #[error("stack start 0x{stack_start:08x} overlaps the program ending at 0x{program_end:08x}")]
    StackOverlapsProgram { stack_start: u32, program_end: u32 },
}
