use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use demos::{run, Script};
use vm::{Machine, MachineConfig};

/// Runs a guest session on the scratch VM host model and prints its output.
#[derive(Parser, Debug)]
#[command(name = "scratch_host", version)]
struct Args {
    /// Boot from an SBIN image instead of a blank machine.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Total memory in bytes (blank machine only).
    #[arg(long, value_parser = parse_u32, default_value_t = MachineConfig::DEFAULT_MEMORY_SIZE)]
    memory_size: u32,

    /// Stack size in bytes (blank machine only).
    #[arg(long, value_parser = parse_u32, default_value_t = MachineConfig::MAX_STACK_SIZE)]
    stack_size: u32,

    /// Message to copy onto the heap and print. May be repeated.
    #[arg(short, long = "message")]
    messages: Vec<String>,

    /// Heap allocation size in bytes. May be repeated.
    #[arg(short, long = "alloc", value_parser = parse_u32)]
    allocations: Vec<u32>,

    /// Hex dump the heap after the session.
    #[arg(long)]
    dump: bool,

    #[arg(long)]
    verbose: bool,
}

fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid number '{}': {}", s, e))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut machine = match &args.image {
        Some(path) => {
            let image = std::fs::read(path)
                .with_context(|| format!("failed to read image {}", path.display()))?;
            Machine::boot(&image).with_context(|| format!("failed to boot {}", path.display()))?
        }
        None => {
            let config = MachineConfig::default()
                .with_memory_size(args.memory_size)
                .with_stack_size(args.stack_size);
            Machine::new(config)?
        }
    };

    let script = Script {
        messages: args.messages,
        allocations: args.allocations,
    };
    let report = run(&mut machine, &script);

    println!("--- Console ---");
    print!("{}", machine.console_string());
    println!("--- Print Buffer ---");
    println!("{}", report.print_buffer);
    println!("--- Heap ---");
    for (i, addr) in report.allocations.iter().enumerate() {
        println!("[{}] {}", i, addr);
    }
    println!("cursor: {}  halted: {}", report.cursor, report.halted);

    if args.dump {
        let start = machine.stack_start().as_usize();
        let end = report.cursor.as_usize().min(machine.memory().size());
        if end > start {
            machine.dump_memory(start, end);
        }
    }

    Ok(())
}
