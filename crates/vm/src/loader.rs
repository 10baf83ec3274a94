use types::{Address, SbinHeader, IO_SEGMENT_SIZE, SBIN_HEADER_LEN, SBIN_MAGIC};

use crate::config::MachineConfig;
use crate::error::VmError;
use crate::machine::Machine;

/// Builds an SBIN image from its header fields and program data.
pub fn encode_image(header: &SbinHeader, data: &[u8]) -> Vec<u8> {
    let mut image = Vec::with_capacity(SBIN_HEADER_LEN + data.len());
    image.extend_from_slice(&header.encode());
    image.extend_from_slice(data);
    image
}

impl Machine {
    /// Boots a machine from an SBIN image.
    ///
    /// The program data is copied to address 0, `MEM_END` is set to the
    /// header's allocation size and `STACK_START` to its stack pointer.
    pub fn boot(image: &[u8]) -> Result<Self, VmError> {
        let header = SbinHeader::parse(image).ok_or(VmError::TruncatedHeader {
            len: image.len(),
            needed: SBIN_HEADER_LEN,
        })?;
        if !header.has_valid_magic() {
            return Err(VmError::BadMagic {
                found: header.magic,
                expected: SBIN_MAGIC,
            });
        }

        let data = &image[SBIN_HEADER_LEN..];
        if data.len() < IO_SEGMENT_SIZE as usize {
            return Err(VmError::MissingIoSegment {
                len: data.len(),
                needed: IO_SEGMENT_SIZE,
            });
        }
        if data.len() > header.alloc_size as usize {
            return Err(VmError::ImageTooLarge {
                data_len: data.len(),
                memory_size: header.alloc_size,
            });
        }
        // Image length fits in alloc_size, itself a u32.
        let program_size = data.len() as u32;
        if header.stack_pointer < program_size {
            return Err(VmError::StackOverlapsProgram {
                stack_start: header.stack_pointer,
                program_end: program_size,
            });
        }

        let config = MachineConfig::new(
            header.alloc_size,
            program_size,
            header.stack_pointer - program_size,
        );
        let mut machine = Machine::new(config)?;

        // The image's i/o segment is zeroed; keep the registers Machine::new set.
        let io = IO_SEGMENT_SIZE as usize;
        machine.memory_mut().write_bytes(Address(IO_SEGMENT_SIZE), &data[io..]);
        machine.set_entry_point(header.program_counter);

        tracing::debug!(
            pc = header.program_counter,
            stack_start = header.stack_pointer,
            mem_end = header.alloc_size,
            program_size,
            "booted SBIN image"
        );
        Ok(machine)
    }
}
