//! Header of the scratch executable ("SBIN") image.
//!
//! ```text
//! u32 magic            "SBIN" read little-endian
//! u32 program_counter  entry point
//! u32 stack_pointer    initial stack pointer, becomes *STACK_START
//! u32 alloc_size       total memory to allocate, becomes *MEM_END
//! ```
//!
//! The program data following the header is loaded at address 0 and starts
//! with the zeroed I/O segment.

pub const SBIN_MAGIC: u32 = 0x4E49_4253;
pub const SBIN_HEADER_LEN: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct SbinHeader {
    pub magic: u32,
    pub program_counter: u32,
    pub stack_pointer: u32,
    pub alloc_size: u32,
}

impl SbinHeader {
    pub const fn new(program_counter: u32, stack_pointer: u32, alloc_size: u32) -> Self {
        Self {
            magic: SBIN_MAGIC,
            program_counter,
            stack_pointer,
            alloc_size,
        }
    }

    /// Reads the header fields from the start of `bytes`.
    ///
    /// Returns `None` when fewer than `SBIN_HEADER_LEN` bytes are available.
    /// The magic is returned as found; callers decide whether to reject it.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < SBIN_HEADER_LEN {
            return None;
        }
        let word = |i: usize| {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(&bytes[i * 4..i * 4 + 4]);
            u32::from_le_bytes(raw)
        };
        Some(Self {
            magic: word(0),
            program_counter: word(1),
            stack_pointer: word(2),
            alloc_size: word(3),
        })
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic == SBIN_MAGIC
    }

    pub fn encode(&self) -> [u8; SBIN_HEADER_LEN] {
        let mut out = [0u8; SBIN_HEADER_LEN];
        let fields = [self.magic, self.program_counter, self.stack_pointer, self.alloc_size];
        for (i, field) in fields.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(&field.to_le_bytes());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_spells_sbin() {
        assert_eq!(&SBIN_MAGIC.to_le_bytes(), b"SBIN");
    }

    #[test]
    fn parse_reads_encoded_fields() {
        let header = SbinHeader::new(0x140, 0x600, 0x2000);
        let bytes = header.encode();
        assert_eq!(&bytes[..4], b"SBIN");
        assert_eq!(SbinHeader::parse(&bytes), Some(header));
    }

    #[test]
    fn parse_rejects_short_input() {
        assert_eq!(SbinHeader::parse(&[0x53, 0x42, 0x49]), None);
    }
}
