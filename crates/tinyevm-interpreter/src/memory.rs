//! EVM memory implementation

use crate::error::{EvmResult, HaltReason};
use tinyevm_primitives::word::{word_to_be_bytes, word_to_usize, WORD_BYTES};
use tinyevm_primitives::Word;

/// Default ceiling on addressable memory (1 MiB)
pub const DEFAULT_MEMORY_LIMIT: usize = 1 << 20;

/// Resolve a size operand.
///
/// Only sizes 0..=32 are recognized; anything larger behaves as 0.
pub fn access_size(size: Word) -> usize {
    if size > Word::from(WORD_BYTES as u64) {
        0
    } else {
        size.low_u64() as usize
    }
}

/// Byte-addressable memory, grown in 32-byte words with zero fill
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
    limit: usize,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Create new empty memory with the default limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MEMORY_LIMIT)
    }

    /// Create new empty memory that refuses to grow past `limit` bytes
    pub fn with_limit(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            limit,
        }
    }

    /// Current memory size in bytes, as reported by MSIZE
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Get raw data slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume into the raw bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Resolve `offset` and grow to cover `offset..offset + size`.
    ///
    /// A zero size touches nothing and always succeeds.
    fn prepare(&mut self, offset: Word, size: usize) -> EvmResult<usize> {
        if size == 0 {
            return Ok(0);
        }
        let offset = word_to_usize(offset).ok_or(HaltReason::MemoryLimitExceeded)?;
        let end = offset
            .checked_add(size)
            .filter(|&end| end <= self.limit)
            .ok_or(HaltReason::MemoryLimitExceeded)?;

        if end > self.data.len() {
            let aligned = end.div_ceil(WORD_BYTES) * WORD_BYTES;
            self.data.resize(aligned, 0);
        }
        Ok(offset)
    }

    /// Load a 32-byte word (MLOAD)
    pub fn load(&mut self, offset: Word) -> EvmResult<Word> {
        let start = self.prepare(offset, WORD_BYTES)?;
        Ok(Word::from_big_endian(&self.data[start..start + WORD_BYTES]))
    }

    /// Store a 32-byte word (MSTORE)
    pub fn store(&mut self, offset: Word, value: Word) -> EvmResult<()> {
        let start = self.prepare(offset, WORD_BYTES)?;
        self.data[start..start + WORD_BYTES].copy_from_slice(&word_to_be_bytes(value));
        Ok(())
    }

    /// Store the lowest byte of `value` (MSTORE8)
    pub fn store8(&mut self, offset: Word, value: Word) -> EvmResult<()> {
        let start = self.prepare(offset, 1)?;
        self.data[start] = value.low_u64() as u8;
        Ok(())
    }

    /// Read `size` bytes (0..=32), expanding like any other access
    pub fn read(&mut self, offset: Word, size: usize) -> EvmResult<Vec<u8>> {
        if size == 0 {
            return Ok(Vec::new());
        }
        let start = self.prepare(offset, size)?;
        Ok(self.data[start..start + size].to_vec())
    }

    /// Write a byte slice
    pub fn write(&mut self, offset: Word, bytes: &[u8]) -> EvmResult<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        let start = self.prepare(offset, bytes.len())?;
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}
