use types::{Address, Bus, HALT_FLAG, MEM_END, STACK_START, STDOUT_SINK};

use crate::config::MachineConfig;
use crate::error::VmError;
use crate::memory::FlatMemory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineStatus {
    Running,
    Halted,
}

/// Host-side model of the scratch VM's memory and device registers.
///
/// Byte stores to `STDOUT_SINK` are captured on the console; a nonzero byte
/// stored to `HALT_FLAG` stops the machine. Once stopped, every further store
/// is dropped, so nothing a program does after halting is observable.
#[derive(Debug)]
pub struct Machine {
    memory: FlatMemory,
    console: Vec<u8>,
    status: MachineStatus,
    entry_point: u32,
    dropped_stores: usize,
}

impl Machine {
    pub fn new(config: MachineConfig) -> Result<Self, VmError> {
        config.validate()?;

        let mut memory = FlatMemory::new(config.memory_size as usize);
        memory.store_u32(MEM_END, config.memory_size);
        memory.store_u32(STACK_START, config.stack_start());

        tracing::debug!(
            memory_size = config.memory_size,
            stack_start = config.stack_start(),
            "machine created"
        );

        Ok(Self {
            memory,
            console: Vec::new(),
            status: MachineStatus::Running,
            entry_point: 0,
            dropped_stores: 0,
        })
    }

    pub fn memory(&self) -> &FlatMemory {
        &self.memory
    }

    pub(crate) fn memory_mut(&mut self) -> &mut FlatMemory {
        &mut self.memory
    }

    pub fn status(&self) -> MachineStatus {
        self.status
    }

    pub fn is_halted(&self) -> bool {
        self.status == MachineStatus::Halted
    }

    /// Entry point recorded by the SBIN header at boot; 0 for a blank machine.
    ///
    /// Nothing on the host executes code, so this is informational only.
    pub fn entry_point(&self) -> u32 {
        self.entry_point
    }

    pub(crate) fn set_entry_point(&mut self, pc: u32) {
        self.entry_point = pc;
    }

    /// Everything written to the stdout sink so far.
    pub fn console(&self) -> &[u8] {
        &self.console
    }

    pub fn console_string(&self) -> String {
        String::from_utf8_lossy(&self.console).into_owned()
    }

    pub fn take_console(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.console)
    }

    /// Stores attempted after the machine halted.
    pub fn dropped_stores(&self) -> usize {
        self.dropped_stores
    }

    pub fn mem_end(&self) -> Address {
        Address(self.memory.load_u32(MEM_END))
    }

    pub fn stack_start(&self) -> Address {
        Address(self.memory.load_u32(STACK_START))
    }

    /// Places raw bytes in memory, bypassing device semantics.
    pub fn write_bytes(&mut self, addr: Address, data: &[u8]) {
        self.memory.write_bytes(addr, data);
    }

    /// Places a string in memory followed by a null terminator.
    pub fn write_cstr(&mut self, addr: Address, s: &[u8]) {
        self.memory.write_bytes(addr, s);
        self.memory.store_u8(addr.wrapping_add(s.len() as u32), 0);
    }

    /// Hex dump of `start..end`, sixteen bytes per line.
    pub fn format_memory(&self, start: usize, end: usize) -> String {
        assert!(start < end, "invalid memory range");
        assert!(end <= self.memory.size(), "range out of bounds");

        let mut out = String::new();
        out.push_str("--- Memory Dump ---\n");
        out.push_str(&format!(
            "mem_end: {}  stack_start: {}\n",
            self.mem_end(),
            self.stack_start()
        ));
        for addr in (start..end).step_by(16) {
            let line = &self.memory.mem()[addr..end.min(addr + 16)];
            let ascii: String = line
                .iter()
                .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
                .collect();
            out.push_str(&format!("{:08x}  {:<32}  |{}|\n", addr, hex::encode(line), ascii));
        }
        out.push_str("-------------------\n");
        out
    }

    pub fn dump_memory(&self, start: usize, end: usize) {
        print!("{}", self.format_memory(start, end));
    }
}

impl Bus for Machine {
    fn load_u8(&mut self, addr: Address) -> u8 {
        self.memory.load_u8(addr)
    }

    fn store_u8(&mut self, addr: Address, val: u8) {
        if self.is_halted() {
            self.dropped_stores += 1;
            tracing::warn!(%addr, val, "store after halt dropped");
            return;
        }

        self.memory.store_u8(addr, val);

        if addr == STDOUT_SINK {
            self.console.push(val);
        } else if addr == HALT_FLAG && val != 0 {
            self.status = MachineStatus::Halted;
            tracing::info!(console_len = self.console.len(), "machine halted");
        }
    }
}
