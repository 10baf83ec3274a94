use crate::address::Address;

/// Access to the flat scratch address space.
///
/// Guest code only ever talks to memory and device registers through this
/// trait. On the real machine it is a raw volatile pointer; on the host it is
/// the emulated `Machine`, which gives the device addresses their meaning.
pub trait Bus {
    fn load_u8(&mut self, addr: Address) -> u8;
    fn store_u8(&mut self, addr: Address, val: u8);

    /// Little-endian word load.
    fn load_u32(&mut self, addr: Address) -> u32 {
        let mut bytes = [0u8; 4];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.load_u8(addr.wrapping_add(i as u32));
        }
        u32::from_le_bytes(bytes)
    }

    /// Little-endian word store.
    fn store_u32(&mut self, addr: Address, val: u32) {
        for (i, byte) in val.to_le_bytes().into_iter().enumerate() {
            self.store_u8(addr.wrapping_add(i as u32), byte);
        }
    }

    /// Loads a pointer-sized value as an address.
    fn load_addr(&mut self, addr: Address) -> Address {
        Address(self.load_u32(addr))
    }
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn load_u8(&mut self, addr: Address) -> u8 {
        (**self).load_u8(addr)
    }

    fn store_u8(&mut self, addr: Address, val: u8) {
        (**self).store_u8(addr, val)
    }

    fn load_u32(&mut self, addr: Address) -> u32 {
        (**self).load_u32(addr)
    }

    fn store_u32(&mut self, addr: Address, val: u32) {
        (**self).store_u32(addr, val)
    }
}
