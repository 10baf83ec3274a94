use types::{IndexedMemory, PrintBuffer};

/// Copies the null-terminated string starting at `index` of the host's
/// indexed memory into its print buffer.
///
/// Unlike [`crate::println`] no newline is added. Returns the number of bytes
/// appended.
pub fn print<M, P>(memory: &mut M, buffer: &mut P, index: u32) -> usize
where
    M: IndexedMemory + ?Sized,
    P: PrintBuffer + ?Sized,
{
    let mut index = index;
    let mut appended = 0;
    loop {
        let next = memory.get_byte(index);
        index = index.wrapping_add(1);
        if next == 0 {
            return appended;
        }
        buffer.append(next);
        appended += 1;
    }
}
