use types::{Address, Bus, HALT_FLAG, STDOUT_SINK};

/// The machine was told to stop.
///
/// Returned by [`halt`] and by anything that halts on the caller's behalf.
/// Nothing may run on the machine after it is produced, so callers hand it
/// straight back up with `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("machine halted")]
pub struct Halted;

/// Writes one character to the stdout sink.
pub fn write_char<B: Bus + ?Sized>(bus: &mut B, c: u8) {
    bus.store_u8(STDOUT_SINK, c);
}

/// Prints the null-terminated string at `s`, followed by a newline.
///
/// The terminator is not printed. A string with no terminator runs off the end
/// of memory.
pub fn println<B: Bus + ?Sized>(bus: &mut B, s: Address) {
    let mut addr = s;
    loop {
        let c = bus.load_u8(addr);
        if c == 0 {
            break;
        }
        write_char(bus, c);
        addr = addr.wrapping_add(1);
    }
    write_char(bus, b'\n');
}

/// Like [`println`], for a string the caller holds as a slice.
///
/// Stops at the first zero byte or at the end of the slice.
pub fn println_bytes<B: Bus + ?Sized>(bus: &mut B, s: &[u8]) {
    for &c in s.iter().take_while(|&&c| c != 0) {
        write_char(bus, c);
    }
    write_char(bus, b'\n');
}

/// Raises the halt flag.
#[must_use = "no guest code may run after a halt; propagate the `Halted`"]
pub fn halt<B: Bus + ?Sized>(bus: &mut B) -> Halted {
    bus.store_u8(HALT_FLAG, 1);
    Halted
}
