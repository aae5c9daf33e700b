//! Nibble Emulator - CLI Entry Point
//!
//! Commands:
//! - `nibble-emu run <program>` - Run a program image until it halts
//! - `nibble-emu mkrom <output>` - Write the standard ALU ROM image
//! - `nibble-emu test` - Built-in self-test

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info, warn};

#[derive(Parser)]
#[command(name = "nibble-emu")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "An emulator for a 16-register, move-only 4-bit CPU")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program until it halts
    Run {
        /// Path to the program image, loaded at address 0
        program: String,
        /// ALU ROM image (default: the standard table, built in memory)
        #[arg(short, long)]
        alu_rom: Option<String>,
        /// Stop after this many cycles if the program has not halted
        #[arg(short, long)]
        max_cycles: Option<u64>,
        /// Log every executed instruction
        #[arg(short, long)]
        trace: bool,
    },
    /// Build the standard ALU ROM and write it to a file
    Mkrom {
        /// Output path for the 4096-byte image
        output: String,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    let cli = Cli::parse();

    let trace = matches!(cli.command, Some(Commands::Run { trace: true, .. }));
    let filter = if trace { "info,nibble=trace" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();

    match cli.command {
        Some(Commands::Run { program, alu_rom, max_cycles, .. }) => {
            run_program(&program, alu_rom.as_deref(), max_cycles);
        }
        Some(Commands::Mkrom { output }) => {
            make_rom(&output);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("Nibble Emulator v0.1.0");
            println!("A 4-bit move machine with a ROM-driven ALU");
            println!();
            println!("Use --help for available commands");
        }
    }
}

fn run_program(path: &str, alu_path: Option<&str>, max_cycles: Option<u64>) {
    use nibble::{load_image, AluRom, Cpu, HexDumpSink, ALU_ROM_SIZE, MEMORY_SIZE};

    let alu = match alu_path {
        Some(alu_path) => match load_image(alu_path, ALU_ROM_SIZE) {
            Ok(bytes) => AluRom::from_image(Some(bytes.as_slice())),
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => {
            info!("No ALU ROM given, using the standard table");
            AluRom::standard()
        }
    };

    let memory = match load_image(path, MEMORY_SIZE) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Running {}", path);
    let mut cpu = Cpu::with_alu(alu, Some(memory.as_slice()));
    let mut sink = HexDumpSink::new(std::io::stdout().lock());

    let result = match max_cycles {
        Some(limit) => cpu.run_limited(limit, &mut sink),
        None => cpu.run(&mut sink),
    };

    match result {
        Ok(cycles) if cpu.is_halted() => {
            info!("Halted after {} cycles", cycles);
        }
        Ok(cycles) => {
            warn!(
                "Reached max cycles limit ({}) at pc 0x{:04X} without halting",
                cycles,
                cpu.pc()
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!("CPU error at pc 0x{:04X}: {}", cpu.pc(), e);
            std::process::exit(1);
        }
    }
}

fn make_rom(output: &str) {
    use nibble::{save_image, AluRom};

    let rom = AluRom::standard();
    if let Err(e) = save_image(output, rom.as_bytes()) {
        error!("{}", e);
        std::process::exit(1);
    }

    info!("Wrote {} bytes to {}", rom.as_bytes().len(), output);
}

fn run_self_test() {
    use nibble::{encode, AluRom, Command, Cpu, Instruction, NullSink, Reg, Registers};

    println!("━━━ Nibble Emulator Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    let mut check = |name: &str, ok: bool| {
        if ok {
            println!("{}... ✓", name);
            passed += 1;
        } else {
            println!("{}... ✗", name);
            failed += 1;
        }
    };

    let rom = AluRom::standard();

    // Test 1: ALU addition and carry
    let ok = (0..16u8).all(|a| {
        (0..16u8).all(|b| rom.lookup(a, b, 0) == (a + b) & 0xf && rom.lookup(a, b, 1) == (a + b) >> 4)
    });
    check("ALU add/carry", ok);

    // Test 2: ALU logic
    let ok = (0..16u8).all(|a| {
        (0..16u8).all(|b| {
            rom.lookup(a, b, 4) == a & b && rom.lookup(a, b, 5) == a | b && rom.lookup(a, b, 6) == a ^ b
        })
    });
    check("ALU and/or/xor", ok);

    // Test 3: Unary extension
    let ok = (0..16u8).all(|a| rom.lookup(a, 0, 15) == (a == 0) as u8 && rom.lookup(a, 1, 15) == !a & 0xf);
    check("ALU unary not/complement", ok);

    // Test 4: Address register roundtrip
    let mut regs = Registers::new();
    let ok = (0..=u16::MAX).all(|v| {
        regs.set_address(v);
        regs.address() == v
    });
    check("Address register roundtrip", ok);

    // Test 5: Halt stops execution
    let program = [encode(&Instruction::Command(Command::Halt)), 0x30];
    let mut cpu = Cpu::with_alu(rom.clone(), Some(&program[..]));
    let ok = matches!(cpu.run(&mut NullSink), Ok(1)) && cpu.regs.get(Reg::Immediate) == 0;
    check("Halt", ok);

    // Test 6: 3 + 4 through the ALU
    let program = [
        0x30, 0x04, // ALU_A := 3
        0x40, 0x05, // ALU_B := 4
        0x00, 0x06, // ALU_OP := add
        0x7C, // A := ALU_RESULT
        encode(&Instruction::Command(Command::Halt)),
    ];
    let mut cpu = Cpu::with_alu(rom, Some(&program[..]));
    let ok = cpu.run(&mut NullSink).is_ok() && cpu.regs.get(Reg::A) == 7;
    check("CPU 3 + 4", ok);

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
