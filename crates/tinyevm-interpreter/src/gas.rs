//! Gas metering
//!
//! Every instruction has a flat cost from [`static_gas`]. Memory expansion and
//! per-word copy/hash costs are not modeled.

use crate::error::{EvmResult, HaltReason};
use crate::opcode::Opcode;
use tinyevm_primitives::Gas;

/// Gas cost tiers
pub mod cost {
    /// Zero gas
    pub const ZERO: u64 = 0;
    /// Jump dest gas
    pub const JUMPDEST: u64 = 1;
    /// Base gas
    pub const BASE: u64 = 2;
    /// Very low gas
    pub const VERYLOW: u64 = 3;
    /// Low gas
    pub const LOW: u64 = 5;
    /// Mid gas
    pub const MID: u64 = 8;
    /// Exp gas
    pub const EXP: u64 = 10;
    /// KECCAK256 gas
    pub const SHA3: u64 = 30;
    /// Warm storage slot access
    pub const STORAGE_WARM: u64 = 100;
    /// Log gas
    pub const LOG: u64 = 375;
    /// Log topic gas
    pub const LOG_TOPIC: u64 = 375;
}

/// Whether charging `cost` on top of `used` stays within `limit`
pub fn can_afford(used: Gas, cost: Gas, limit: Gas) -> bool {
    used.checked_add(cost).is_some_and(|total| total <= limit)
}

/// New gas total after charging `cost`; saturates instead of wrapping
pub fn charge(used: Gas, cost: Gas) -> Gas {
    used.saturating_add(cost)
}

/// Cumulative gas tally checked against a fixed limit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GasMeter {
    used: Gas,
    limit: Gas,
}

impl GasMeter {
    /// Create a meter with nothing spent
    pub fn new(limit: Gas) -> Self {
        Self { used: 0, limit }
    }

    /// Gas spent so far
    pub fn used(&self) -> Gas {
        self.used
    }

    /// Configured limit
    pub fn limit(&self) -> Gas {
        self.limit
    }

    /// Gas left before the limit
    pub fn remaining(&self) -> Gas {
        self.limit - self.used
    }

    /// Check whether `cost` can be charged
    pub fn can_afford(&self, cost: Gas) -> bool {
        can_afford(self.used, cost, self.limit)
    }

    /// Charge `cost`, leaving the tally untouched when it does not fit
    pub fn charge(&mut self, cost: Gas) -> EvmResult<()> {
        if !self.can_afford(cost) {
            return Err(HaltReason::OutOfGas);
        }
        self.used = charge(self.used, cost);
        Ok(())
    }
}

/// Get static gas cost for an opcode
pub fn static_gas(opcode: Opcode) -> Gas {
    use Opcode::*;

    match opcode {
        STOP | RETURN | REVERT | INVALID => cost::ZERO,

        JUMPDEST => cost::JUMPDEST,

        ADDRESS | ORIGIN | CALLER | CALLVALUE | CALLDATASIZE | CODESIZE | GASPRICE
        | RETURNDATASIZE | COINBASE | TIMESTAMP | NUMBER | PREVRANDAO | GASLIMIT
        | CHAINID | BASEFEE | BLOBBASEFEE | POP | PC | MSIZE | GAS | PUSH0 => cost::BASE,

        ADD | SUB | NOT | LT | GT | SLT | SGT | EQ | ISZERO | AND | OR | XOR | BYTE
        | SHL | SHR | SAR | CALLDATALOAD | CALLDATACOPY | CODECOPY | RETURNDATACOPY
        | MLOAD | MSTORE | MSTORE8 => cost::VERYLOW,

        MUL | DIV | SDIV | MOD | SMOD | SIGNEXTEND | SELFBALANCE => cost::LOW,

        ADDMOD | MULMOD => cost::MID,

        EXP => cost::EXP,
        KECCAK256 => cost::SHA3,
        SLOAD | SSTORE => cost::STORAGE_WARM,

        PUSH1 | PUSH2 | PUSH3 | PUSH4 | PUSH5 | PUSH6 | PUSH7 | PUSH8 | PUSH9 | PUSH10
        | PUSH11 | PUSH12 | PUSH13 | PUSH14 | PUSH15 | PUSH16 | PUSH17 | PUSH18 | PUSH19
        | PUSH20 | PUSH21 | PUSH22 | PUSH23 | PUSH24 | PUSH25 | PUSH26 | PUSH27 | PUSH28
        | PUSH29 | PUSH30 | PUSH31 | PUSH32 | DUP1 | DUP2 | DUP3 | DUP4 | DUP5 | DUP6
        | DUP7 | DUP8 | DUP9 | DUP10 | DUP11 | DUP12 | DUP13 | DUP14 | DUP15 | DUP16
        | SWAP1 | SWAP2 | SWAP3 | SWAP4 | SWAP5 | SWAP6 | SWAP7 | SWAP8 | SWAP9 | SWAP10
        | SWAP11 | SWAP12 | SWAP13 | SWAP14 | SWAP15 | SWAP16 => cost::VERYLOW,

        LOG0 | LOG1 | LOG2 | LOG3 | LOG4 => {
            cost::LOG + cost::LOG_TOPIC * opcode.log_topics() as u64
        }
    }
}
