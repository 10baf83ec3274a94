use core::fmt;

/// Width in bytes of a native pointer on the scratch VM.
pub const PTR_WIDTH: u32 = 4;

/// Byte address in the flat scratch address space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Address(pub u32);

impl Address {
    /// The "not yet initialized" value used by lazily set pointers.
    pub const NULL: Address = Address(0);

    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, value: u32) -> Option<Self> {
        self.0.checked_add(value).map(Address)
    }

    /// Advances by `value` bytes, pinning at the top of the address space.
    pub fn saturating_add(self, value: u32) -> Self {
        Address(self.0.saturating_add(value))
    }

    pub fn wrapping_add(self, value: u32) -> Self {
        Address(self.0.wrapping_add(value))
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Address(value)
    }
}

impl From<Address> for u32 {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl From<Address> for usize {
    fn from(value: Address) -> Self {
        value.as_usize()
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_add_pins_at_top() {
        assert_eq!(Address(u32::MAX - 1).saturating_add(10), Address(u32::MAX));
        assert_eq!(Address(0x100).saturating_add(0x10), Address(0x110));
    }

    #[test]
    fn null_is_zero() {
        assert!(Address::NULL.is_null());
        assert!(!Address(PTR_WIDTH).is_null());
    }
}
