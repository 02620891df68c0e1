//! Terminal outcome of a run

use crate::error::HaltReason;
use crate::storage::Storage;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use tinyevm_primitives::word::bytes_to_hex;
use tinyevm_primitives::{word_to_hex, Gas, Word};

/// Machine state captured when the run ended
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FinalState {
    /// Stack, bottom to top
    pub stack: Vec<Word>,
    /// Memory contents
    pub memory: Vec<u8>,
    /// Non-zero storage slots
    pub storage: Storage,
    /// Gas charged
    pub gas_used: Gas,
    /// Gas available to the run
    pub gas_limit: Gas,
    /// Instructions executed
    pub steps: usize,
}

/// Result of executing a program
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionResult {
    /// STOP, RETURN or running off the end of the program
    Success {
        /// RETURN's stack top; `None` for STOP, an empty RETURN, or end of code
        return_data: Option<Word>,
        /// Final state
        state: FinalState,
    },
    /// Any fault, including REVERT and INVALID
    Halt {
        /// Why the run stopped
        reason: HaltReason,
        /// State at the failing instruction
        state: FinalState,
    },
}

impl ExecutionResult {
    /// Check if execution was successful
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }

    /// Halt reason, if the run failed
    pub fn reason(&self) -> Option<HaltReason> {
        match self {
            ExecutionResult::Success { .. } => None,
            ExecutionResult::Halt { reason, .. } => Some(*reason),
        }
    }

    /// Returned word
    pub fn return_data(&self) -> Option<Word> {
        match self {
            ExecutionResult::Success { return_data, .. } => *return_data,
            ExecutionResult::Halt { .. } => None,
        }
    }

    /// Returned word rendered as minimal upper-case hex (`0x02`)
    pub fn return_data_hex(&self) -> Option<String> {
        self.return_data().map(word_to_hex)
    }

    /// Final state regardless of outcome
    pub fn state(&self) -> &FinalState {
        match self {
            ExecutionResult::Success { state, .. } | ExecutionResult::Halt { state, .. } => state,
        }
    }

    /// Gas charged
    pub fn gas_used(&self) -> Gas {
        self.state().gas_used
    }

    /// Gas available to the run
    pub fn gas_limit(&self) -> Gas {
        self.state().gas_limit
    }

    /// Stack, bottom to top
    pub fn stack(&self) -> &[Word] {
        &self.state().stack
    }

    /// Memory contents
    pub fn memory(&self) -> &[u8] {
        &self.state().memory
    }

    /// Storage contents
    pub fn storage(&self) -> &Storage {
        &self.state().storage
    }

    /// Instructions executed
    pub fn steps(&self) -> usize {
        self.state().steps
    }
}

struct StorageView<'a>(&'a Storage);

impl Serialize for StorageView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(key, value)| (word_to_hex(*key), word_to_hex(*value))),
        )
    }
}

impl Serialize for ExecutionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let state = self.state();
        let stack: Vec<String> = state.stack.iter().rev().copied().map(word_to_hex).collect();

        let mut s = serializer.serialize_struct("ExecutionResult", 7)?;
        match self {
            ExecutionResult::Success { return_data, .. } => {
                s.serialize_field("status", "ok")?;
                s.serialize_field("stack", &stack)?;
                s.serialize_field("memory", &bytes_to_hex(&state.memory))?;
                s.serialize_field("storage", &StorageView(&state.storage))?;
                s.serialize_field("returnData", &return_data.map(word_to_hex))?;
            }
            ExecutionResult::Halt { reason, .. } => {
                s.serialize_field("status", "error")?;
                s.serialize_field("reason", reason)?;
                s.serialize_field("stack", &stack)?;
                s.serialize_field("memory", &bytes_to_hex(&state.memory))?;
                s.serialize_field("storage", &StorageView(&state.storage))?;
            }
        }
        s.serialize_field("gasUsed", &state.gas_used)?;
        s.serialize_field("gasLimit", &state.gas_limit)?;
        s.end()
    }
}
