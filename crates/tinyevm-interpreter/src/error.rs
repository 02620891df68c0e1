//! EVM error types

use serde::{Serialize, Serializer};
use thiserror::Error;
use tinyevm_primitives::PrimitiveError;

/// Terminal failure of a run.
///
/// The first failure aborts execution; the accompanying state snapshot is
/// whatever existed when the failing instruction was reached.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaltReason {
    /// Fewer operands on the stack than the opcode consumes
    #[error("stack underflow")]
    StackUnderflow,

    /// Charging the instruction would exceed the gas limit
    #[error("out of gas")]
    OutOfGas,

    /// Step ceiling reached
    #[error("step limit reached")]
    StepOverflow,

    /// Push immediate runs past the end of the program
    #[error("push immediate runs past end of bytecode")]
    BytecodeTruncated,

    /// Opcode classified as push without an immediate length
    #[error("malformed push opcode")]
    InvalidPush,

    /// Opcode classified as dup without a depth
    #[error("malformed dup opcode")]
    InvalidDup,

    /// Opcode classified as swap without a depth
    #[error("malformed swap opcode")]
    InvalidSwap,

    /// Swap could not split the stack at the requested depth
    #[error("swap failed")]
    SwapFailed,

    /// Byte outside the recognized instruction set
    #[error("unknown opcode: 0x{0:02x}")]
    UnknownOpcode(u8),

    /// Explicit REVERT
    #[error("execution reverted")]
    Revert,

    /// Explicit INVALID (0xfe)
    #[error("invalid instruction")]
    Invalid,

    /// KECCAK256 input could not be assembled from memory
    #[error("keccak256 input unavailable")]
    Sha3Failed,

    /// Memory offset beyond the configured limit
    #[error("memory limit exceeded")]
    MemoryLimitExceeded,
}

impl HaltReason {
    /// Stable machine-readable kind, as reported in serialized results
    pub fn kind(&self) -> &'static str {
        match self {
            HaltReason::StackUnderflow => "stack_underflow",
            HaltReason::OutOfGas => "out_of_gas",
            HaltReason::StepOverflow => "step_overflow",
            HaltReason::BytecodeTruncated => "bytecode_truncated",
            HaltReason::InvalidPush => "invalid_push",
            HaltReason::InvalidDup => "invalid_dup",
            HaltReason::InvalidSwap => "invalid_swap",
            HaltReason::SwapFailed => "swap_failed",
            HaltReason::UnknownOpcode(_) => "unknown_opcode",
            HaltReason::Revert => "revert",
            HaltReason::Invalid => "invalid",
            HaltReason::Sha3Failed => "sha3_failed",
            HaltReason::MemoryLimitExceeded => "memory_limit_exceeded",
        }
    }

    /// Whether the program aborted on purpose (REVERT) rather than faulted
    pub fn is_intentional(&self) -> bool {
        matches!(self, HaltReason::Revert)
    }
}

impl Serialize for HaltReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.kind())
    }
}

/// Result type for EVM operations
pub type EvmResult<T> = Result<T, HaltReason>;

/// Program input that could not be turned into bytecode
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BytecodeError {
    /// Malformed hex program text
    #[error("invalid bytecode hex: {0}")]
    Hex(#[from] PrimitiveError),
}

/// Configuration or context input that could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Gas limit must be positive
    #[error("gas limit must be positive")]
    ZeroGasLimit,

    /// Step limit must be positive
    #[error("step limit must be positive")]
    ZeroStepLimit,
}

/// Execution context input that could not be loaded
#[derive(Debug, Error)]
pub enum ContextError {
    /// JSON parsing error, including malformed hex fields
    #[error("invalid execution context: {0}")]
    Json(#[from] serde_json::Error),
}
