//! Host collaborators for the list-backed print path.

use types::{IndexedMemory, PrintBuffer};

use crate::memory::FlatMemory;

/// Memory exposed as an indexable list of bytes.
///
/// Lookups follow the host's handshake: the requested index is written to the
/// request slot, the lookup is triggered, and the byte is read back from the
/// result slot. Indices past the end of the list read as zero.
#[derive(Debug, Default, Clone)]
pub struct ListMemory {
    items: Vec<u8>,
    request: u32,
    result: u8,
    lookups: usize,
}

impl ListMemory {
    pub fn new(items: Vec<u8>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Snapshot of a flat memory image.
    pub fn from_memory(memory: &FlatMemory) -> Self {
        Self::new(memory.mem().to_vec())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn write_request(&mut self, index: u32) {
        self.request = index;
    }

    pub fn trigger(&mut self) {
        self.result = self.items.get(self.request as usize).copied().unwrap_or(0);
        self.lookups += 1;
        tracing::trace!(index = self.request, result = self.result, "memget");
    }

    pub fn read_result(&self) -> u8 {
        self.result
    }

    /// Number of lookups triggered so far.
    pub fn lookups(&self) -> usize {
        self.lookups
    }
}

impl IndexedMemory for ListMemory {
    fn get_byte(&mut self, index: u32) -> u8 {
        self.write_request(index);
        self.trigger();
        self.read_result()
    }
}

/// Print buffer the host flushes to its output.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScratchPrintBuffer {
    buf: Vec<u8>,
}

impl ScratchPrintBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Hands back the buffered bytes and empties the buffer.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}

impl PrintBuffer for ScratchPrintBuffer {
    fn append(&mut self, byte: u8) {
        self.buf.push(byte);
    }
}

impl std::fmt::Display for ScratchPrintBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.buf))
    }
}
