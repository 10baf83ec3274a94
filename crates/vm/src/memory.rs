use types::Address;

/// Backing store of the flat address space.
///
/// Plain RAM with no device semantics; [`crate::Machine`] layers those on top.
/// Out-of-bounds accesses are host bugs and panic.
#[derive(Clone)]
pub struct FlatMemory {
    mem: Vec<u8>,
}

impl FlatMemory {
    pub fn new(memory_size: usize) -> Self {
        Self {
            mem: vec![0u8; memory_size],
        }
    }

    pub fn mem(&self) -> &[u8] {
        &self.mem
    }

    pub fn size(&self) -> usize {
        self.mem.len()
    }

    pub fn load_u8(&self, addr: Address) -> u8 {
        let addr = addr.as_usize();
        if addr >= self.mem.len() {
            panic!("load u8 out of bounds: addr = 0x{:08x}", addr);
        }
        self.mem[addr]
    }

    pub fn store_u8(&mut self, addr: Address, val: u8) {
        let addr = addr.as_usize();
        if addr >= self.mem.len() {
            panic!("store u8 out of bounds: addr = 0x{:08x}", addr);
        }
        self.mem[addr] = val;
    }

    pub fn load_u32(&self, addr: Address) -> u32 {
        let addr = addr.as_usize();
        if addr + 4 > self.mem.len() {
            panic!("load u32 out of bounds: addr = 0x{:08x}", addr);
        }
        u32::from_le_bytes(self.mem[addr..addr + 4].try_into().unwrap())
    }

    pub fn store_u32(&mut self, addr: Address, val: u32) {
        let addr = addr.as_usize();
        if addr + 4 > self.mem.len() {
            panic!("store u32 out of bounds: addr = 0x{:08x}", addr);
        }
        self.mem[addr..addr + 4].copy_from_slice(&val.to_le_bytes());
    }

    pub fn mem_slice(&self, start: usize, end: usize) -> Option<&[u8]> {
        if end > self.mem.len() || start > end {
            return None;
        }
        Some(&self.mem[start..end])
    }

    /// Copies `data` into memory starting at `addr`.
    pub fn write_bytes(&mut self, addr: Address, data: &[u8]) {
        let start = addr.as_usize();
        let end = start + data.len();
        if end > self.mem.len() {
            panic!(
                "write out of bounds: 0x{:08x}..0x{:08x} (memory is {} bytes)",
                start,
                end,
                self.mem.len()
            );
        }
        self.mem[start..end].copy_from_slice(data);
    }

    /// Reads the null-terminated string at `addr`, without the terminator.
    ///
    /// Stops at the end of memory if no terminator is found.
    pub fn read_cstr(&self, addr: Address) -> &[u8] {
        let start = addr.as_usize().min(self.mem.len());
        let rest = &self.mem[start..];
        let len = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
        &rest[..len]
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory")
            .field("size", &self.mem.len())
            .finish()
    }
}
