//! # tinyevm-interpreter
//!
//! Deterministic interpreter for a straight-line subset of the EVM.
//!
//! This crate provides:
//! - Bytecode decoding and disassembly
//! - 256-bit word arithmetic with EVM wraparound semantics
//! - Flat per-opcode gas metering
//! - Stack, memory and run-local storage
//! - A single-run interpreter producing an [`ExecutionResult`]
//!
//! There are no jumps, calls or account state. A run is bounded by its gas
//! limit and a step ceiling.
//!
//! ```
//! use tinyevm_interpreter::{execute_hex, ExecutionContext};
//!
//! let result = execute_hex("0x60016002F3", 1000, &ExecutionContext::default()).unwrap();
//! assert_eq!(result.return_data_hex().as_deref(), Some("0x02"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alu;
mod bytecode;
mod config;
mod context;
mod error;
pub mod gas;
mod interpreter;
pub mod memory;
mod opcode;
mod result;
mod stack;
mod storage;

pub use bytecode::{Bytecode, Decoder, Instruction};
pub use config::ExecutionConfig;
pub use context::ExecutionContext;
pub use error::{BytecodeError, ConfigError, ContextError, EvmResult, HaltReason};
pub use gas::GasMeter;
pub use interpreter::{Interpreter, StepOutcome};
pub use memory::Memory;
pub use opcode::Opcode;
pub use result::{ExecutionResult, FinalState};
pub use stack::Stack;
pub use storage::Storage;
pub use tinyevm_primitives::{Address, Gas, Word};

/// Run `program` with the default configuration and the given gas limit
pub fn execute(
    program: impl Into<Bytecode>,
    gas_limit: Gas,
    context: &ExecutionContext,
) -> ExecutionResult {
    let config = ExecutionConfig::default().with_gas_limit(gas_limit);
    execute_with_config(program, &config, context)
}

/// Parse hex `program` and run it
pub fn execute_hex(
    program: &str,
    gas_limit: Gas,
    context: &ExecutionContext,
) -> Result<ExecutionResult, BytecodeError> {
    let code = Bytecode::from_hex(program)?;
    Ok(execute(code, gas_limit, context))
}

/// Run `program` under an explicit configuration
pub fn execute_with_config(
    program: impl Into<Bytecode>,
    config: &ExecutionConfig,
    context: &ExecutionContext,
) -> ExecutionResult {
    Interpreter::new(program, *config, context).run()
}
