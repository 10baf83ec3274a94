//! Host capabilities used by the list-backed print path.
//!
//! In that configuration the host exposes memory as an indexable list rather
//! than a flat byte array, and collects output in a print buffer instead of a
//! character sink.

/// Byte lookup by index into host-owned storage.
pub trait IndexedMemory {
    fn get_byte(&mut self, index: u32) -> u8;
}

/// Output buffer the host flushes on its own schedule.
pub trait PrintBuffer {
    fn append(&mut self, byte: u8);
}

impl<T: IndexedMemory + ?Sized> IndexedMemory for &mut T {
    fn get_byte(&mut self, index: u32) -> u8 {
        (**self).get_byte(index)
    }
}

impl<T: PrintBuffer + ?Sized> PrintBuffer for &mut T {
    fn append(&mut self, byte: u8) {
        (**self).append(byte)
    }
}
