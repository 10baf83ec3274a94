use types::{IO_SEGMENT_SIZE, PTR_WIDTH};

use crate::error::VmError;

/// Memory layout of a machine.
///
/// ```text
/// 0 .. program_size                      i/o segment + program data
/// program_size .. stack_start            stack
/// stack_start .. memory_size             heap
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Total bytes of memory; becomes `*MEM_END`.
    pub memory_size: u32,
    /// Bytes occupied by the loaded image, including the i/o segment.
    pub program_size: u32,
    /// Bytes reserved for the stack above the program.
    pub stack_size: u32,
}

impl MachineConfig {
    pub const MAX_MEMORY_SIZE: u32 = 0x0100_0000;
    pub const DEFAULT_MEMORY_SIZE: u32 = 0x0001_0000;
    pub const MAX_STACK_SIZE: u32 = 1024;

    pub const fn new(memory_size: u32, program_size: u32, stack_size: u32) -> Self {
        Self {
            memory_size,
            program_size,
            stack_size,
        }
    }

    pub fn with_memory_size(mut self, memory_size: u32) -> Self {
        self.memory_size = memory_size;
        self
    }

    pub fn with_program_size(mut self, program_size: u32) -> Self {
        self.program_size = program_size;
        self
    }

    pub fn with_stack_size(mut self, stack_size: u32) -> Self {
        self.stack_size = stack_size;
        self
    }

    /// Value stored at `STACK_START`.
    pub fn stack_start(&self) -> u32 {
        self.program_size.saturating_add(self.stack_size)
    }

    /// First address the heap hands out.
    pub fn heap_start(&self) -> u32 {
        self.stack_start().saturating_add(PTR_WIDTH)
    }

    pub fn validate(&self) -> Result<(), VmError> {
        if self.memory_size > Self::MAX_MEMORY_SIZE {
            return Err(VmError::MemoryTooLarge {
                requested: self.memory_size,
                limit: Self::MAX_MEMORY_SIZE,
            });
        }
        if self.program_size < IO_SEGMENT_SIZE {
            return Err(VmError::MissingIoSegment {
                len: self.program_size as usize,
                needed: IO_SEGMENT_SIZE,
            });
        }
        if self.program_size > self.memory_size {
            return Err(VmError::ImageTooLarge {
                data_len: self.program_size as usize,
                memory_size: self.memory_size,
            });
        }
        let stack_start = self.stack_start();
        if stack_start > self.memory_size {
            return Err(VmError::StackOutsideMemory {
                stack_start,
                memory_size: self.memory_size,
            });
        }
        Ok(())
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MEMORY_SIZE,
            IO_SEGMENT_SIZE,
            Self::MAX_STACK_SIZE,
        )
    }
}
