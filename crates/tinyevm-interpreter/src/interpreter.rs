//! EVM bytecode interpreter

use crate::alu;
use crate::bytecode::Bytecode;
use crate::config::ExecutionConfig;
use crate::context::ExecutionContext;
use crate::error::{EvmResult, HaltReason};
use crate::gas::{self, GasMeter};
use crate::memory::{access_size, Memory};
use crate::opcode::Opcode;
use crate::result::{ExecutionResult, FinalState};
use crate::stack::Stack;
use crate::storage::Storage;
use tinyevm_crypto::{keccak256, EMPTY_KECCAK};
use tinyevm_primitives::word::{word_to_usize, WORD_BYTES};
use tinyevm_primitives::Word;
use tracing::{debug, trace};

/// What a successful step asks the run loop to do next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Keep executing
    Continue,
    /// STOP or end of code
    Stop,
    /// RETURN with the stack top, if any
    Return(Option<Word>),
}

/// Interpreter state
#[derive(Clone, Debug)]
pub struct Interpreter<'a> {
    /// Bytecode being executed
    code: Bytecode,
    /// Environment
    context: &'a ExecutionContext,
    /// Step ceiling
    step_limit: usize,
    /// Offset of the next instruction
    cursor: usize,
    /// Instructions executed so far
    steps: usize,
    stack: Stack,
    memory: Memory,
    storage: Storage,
    gas: GasMeter,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter positioned at the first instruction
    pub fn new(
        code: impl Into<Bytecode>,
        config: ExecutionConfig,
        context: &'a ExecutionContext,
    ) -> Self {
        Self {
            code: code.into(),
            context,
            step_limit: config.step_limit,
            cursor: 0,
            steps: 0,
            stack: Stack::new(),
            memory: Memory::with_limit(config.memory_limit),
            storage: Storage::new(),
            gas: GasMeter::new(config.gas_limit),
        }
    }

    /// Execute until a terminal condition
    pub fn run(mut self) -> ExecutionResult {
        debug!(
            code_len = self.code.len(),
            gas_limit = self.gas.limit(),
            step_limit = self.step_limit,
            "starting execution"
        );

        let outcome = loop {
            match self.step() {
                Ok(StepOutcome::Continue) => {}
                Ok(StepOutcome::Stop) => break Ok(None),
                Ok(StepOutcome::Return(data)) => break Ok(data),
                Err(reason) => break Err(reason),
            }
        };

        let state = self.into_state();
        match outcome {
            Ok(return_data) => {
                debug!(
                    gas_used = state.gas_used,
                    steps = state.steps,
                    "execution finished"
                );
                ExecutionResult::Success { return_data, state }
            }
            Err(reason) => {
                debug!(
                    reason = reason.kind(),
                    gas_used = state.gas_used,
                    steps = state.steps,
                    "execution halted"
                );
                ExecutionResult::Halt { reason, state }
            }
        }
    }

    /// Execute a single instruction.
    ///
    /// Gas is charged before operands are checked. An unaffordable
    /// instruction leaves the pre-instruction state untouched; an
    /// underflowing one keeps its charge but never touches the stack.
    pub fn step(&mut self) -> EvmResult<StepOutcome> {
        if self.steps >= self.step_limit {
            return Err(HaltReason::StepOverflow);
        }

        let Some(insn) = self.code.decoder().decode_at(self.cursor)? else {
            return Ok(StepOutcome::Stop);
        };
        let opcode = insn
            .opcode
            .ok_or(HaltReason::UnknownOpcode(insn.opcode_byte))?;

        trace!(
            cursor = self.cursor,
            opcode = %opcode,
            depth = self.stack.len(),
            gas_used = self.gas.used(),
            "step"
        );

        self.gas.charge(gas::static_gas(opcode))?;
        self.stack.require(opcode.stack_inputs())?;

        let outcome = self.execute(opcode, insn.immediate)?;
        self.cursor = insn.next;
        self.steps += 1;
        Ok(outcome)
    }

    fn unary(&mut self, f: fn(Word) -> Word) -> EvmResult<()> {
        let a = self.stack.pop()?;
        self.stack.push(f(a));
        Ok(())
    }

    fn binary(&mut self, f: fn(Word, Word) -> Word) -> EvmResult<()> {
        let a = self.stack.pop()?;
        let b = self.stack.pop()?;
        self.stack.push(f(a, b));
        Ok(())
    }

    fn ternary(&mut self, f: fn(Word, Word, Word) -> Word) -> EvmResult<()> {
        let a = self.stack.pop()?;
        let b = self.stack.pop()?;
        let c = self.stack.pop()?;
        self.stack.push(f(a, b, c));
        Ok(())
    }

    /// Pop `(dest, offset, size)` and copy from `source` into memory
    fn copy_to_memory(&mut self, source: &[u8]) -> EvmResult<()> {
        let dest = self.stack.pop()?;
        let offset = self.stack.pop()?;
        let size = access_size(self.stack.pop()?);
        let data = padded_slice(source, offset, size);
        self.memory.write(dest, &data)
    }

    /// Execute an opcode
    fn execute(&mut self, opcode: Opcode, immediate: Option<Word>) -> EvmResult<StepOutcome> {
        let ctx = self.context;

        match opcode {
            Opcode::STOP => return Ok(StepOutcome::Stop),
            Opcode::RETURN => return Ok(StepOutcome::Return(self.stack.top())),
            Opcode::REVERT => return Err(HaltReason::Revert),
            Opcode::INVALID => return Err(HaltReason::Invalid),

            // Arithmetic
            Opcode::ADD => self.binary(alu::add)?,
            Opcode::MUL => self.binary(alu::mul)?,
            Opcode::SUB => self.binary(alu::sub)?,
            Opcode::DIV => self.binary(alu::div)?,
            Opcode::SDIV => self.binary(alu::sdiv)?,
            Opcode::MOD => self.binary(alu::rem)?,
            Opcode::SMOD => self.binary(alu::smod)?,
            Opcode::ADDMOD => self.ternary(alu::addmod)?,
            Opcode::MULMOD => self.ternary(alu::mulmod)?,
            Opcode::EXP => self.binary(alu::exp)?,
            Opcode::SIGNEXTEND => self.binary(alu::signextend)?,

            // Comparison & bitwise
            Opcode::LT => self.binary(alu::lt)?,
            Opcode::GT => self.binary(alu::gt)?,
            Opcode::SLT => self.binary(alu::slt)?,
            Opcode::SGT => self.binary(alu::sgt)?,
            Opcode::EQ => self.binary(alu::eq)?,
            Opcode::ISZERO => self.unary(alu::iszero)?,
            Opcode::AND => self.binary(alu::and)?,
            Opcode::OR => self.binary(alu::or)?,
            Opcode::XOR => self.binary(alu::xor)?,
            Opcode::NOT => self.unary(alu::not)?,
            Opcode::BYTE => self.binary(alu::byte)?,
            Opcode::SHL => self.binary(alu::shl)?,
            Opcode::SHR => self.binary(alu::shr)?,
            Opcode::SAR => self.binary(alu::sar)?,

            Opcode::KECCAK256 => {
                let offset = self.stack.pop()?;
                let size = access_size(self.stack.pop()?);
                let hash = if size == 0 {
                    EMPTY_KECCAK
                } else {
                    let data = self
                        .memory
                        .read(offset, size)
                        .map_err(|_| HaltReason::Sha3Failed)?;
                    keccak256(&data)
                };
                self.stack.push(hash.to_word());
            }

            // Environment
            Opcode::ADDRESS => self.stack.push(ctx.address.to_word()),
            Opcode::ORIGIN => self.stack.push(ctx.origin.to_word()),
            Opcode::CALLER => self.stack.push(ctx.caller.to_word()),
            Opcode::CALLVALUE => self.stack.push(ctx.call_value),
            Opcode::CALLDATALOAD => {
                let offset = self.stack.pop()?;
                let data = padded_slice(&ctx.calldata, offset, WORD_BYTES);
                self.stack.push(Word::from_big_endian(&data));
            }
            Opcode::CALLDATASIZE => self.stack.push(Word::from(ctx.calldata.len() as u64)),
            Opcode::CALLDATACOPY => self.copy_to_memory(&ctx.calldata)?,
            Opcode::CODESIZE => self.stack.push(Word::from(ctx.code.len() as u64)),
            Opcode::CODECOPY => self.copy_to_memory(&ctx.code)?,
            Opcode::GASPRICE => self.stack.push(ctx.gas_price),
            Opcode::RETURNDATASIZE => self.stack.push(Word::from(ctx.return_data.len() as u64)),
            Opcode::RETURNDATACOPY => {
                // operands only; no bytes are copied
                for _ in 0..3 {
                    self.stack.pop()?;
                }
            }

            // Block information
            Opcode::COINBASE => self.stack.push(ctx.coinbase.to_word()),
            Opcode::TIMESTAMP => self.stack.push(Word::from(ctx.timestamp)),
            Opcode::NUMBER => self.stack.push(Word::from(ctx.number)),
            Opcode::PREVRANDAO => self.stack.push(ctx.difficulty),
            Opcode::GASLIMIT => self.stack.push(Word::from(ctx.gas_limit)),
            Opcode::CHAINID => self.stack.push(Word::from(ctx.chain_id)),
            Opcode::SELFBALANCE => self.stack.push(ctx.self_balance),
            Opcode::BASEFEE => self.stack.push(ctx.base_fee),
            Opcode::BLOBBASEFEE => self.stack.push(ctx.blob_base_fee),

            // Stack, memory and storage
            Opcode::POP => {
                self.stack.pop()?;
            }
            Opcode::MLOAD => {
                let offset = self.stack.pop()?;
                let value = self.memory.load(offset)?;
                self.stack.push(value);
            }
            Opcode::MSTORE => {
                let offset = self.stack.pop()?;
                let value = self.stack.pop()?;
                self.memory.store(offset, value)?;
            }
            Opcode::MSTORE8 => {
                let offset = self.stack.pop()?;
                let value = self.stack.pop()?;
                self.memory.store8(offset, value)?;
            }
            Opcode::SLOAD => {
                let key = self.stack.pop()?;
                self.stack.push(self.storage.get(&key));
            }
            Opcode::SSTORE => {
                let key = self.stack.pop()?;
                let value = self.stack.pop()?;
                self.storage.set(key, value);
            }
            // No program counter or gas introspection; both read as zero
            Opcode::PC | Opcode::GAS => self.stack.push(Word::zero()),
            Opcode::MSIZE => self.stack.push(Word::from(self.memory.size() as u64)),
            Opcode::JUMPDEST => {}
            Opcode::PUSH0 => self.stack.push(Word::zero()),

            _ => match opcode.as_byte() {
                0x60..=0x7F => self.stack.push(immediate.ok_or(HaltReason::InvalidPush)?),
                0x80..=0x8F => match opcode.dup_depth() {
                    0 => return Err(HaltReason::InvalidDup),
                    depth => self.stack.dup(depth)?,
                },
                0x90..=0x9F => match opcode.swap_depth() {
                    0 => return Err(HaltReason::InvalidSwap),
                    depth => self.stack.swap(depth)?,
                },
                0xA0..=0xA4 => {
                    // LOGn: offset, size and n topics; nothing is recorded
                    for _ in 0..opcode.log_topics() + 2 {
                        self.stack.pop()?;
                    }
                }
                byte => return Err(HaltReason::UnknownOpcode(byte)),
            },
        }

        Ok(StepOutcome::Continue)
    }

    /// Offset of the next instruction
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Instructions executed so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Current stack
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Current memory
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Current storage
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Gas charged so far
    pub fn gas_used(&self) -> u64 {
        self.gas.used()
    }

    fn into_state(self) -> FinalState {
        FinalState {
            stack: self.stack.into_vec(),
            memory: self.memory.into_vec(),
            storage: self.storage,
            gas_used: self.gas.used(),
            gas_limit: self.gas.limit(),
            steps: self.steps,
        }
    }
}

/// `size` bytes of `source` starting at `offset`, zero-filled past the end
fn padded_slice(source: &[u8], offset: Word, size: usize) -> Vec<u8> {
    let mut out = vec![0u8; size];
    if let Some(start) = word_to_usize(offset).filter(|&start| start < source.len()) {
        let available = (source.len() - start).min(size);
        out[..available].copy_from_slice(&source[start..start + available]);
    }
    out
}
