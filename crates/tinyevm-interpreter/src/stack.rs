//! EVM stack implementation

use crate::error::{EvmResult, HaltReason};
use tinyevm_primitives::Word;

/// Operand stack of 256-bit words.
///
/// Unbounded: there is no 1024-item cap. The step ceiling keeps a run from
/// pushing more than a few hundred items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    data: Vec<Word>,
}

impl Stack {
    /// Create a new empty stack
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Push a value onto the stack
    pub fn push(&mut self, value: Word) {
        self.data.push(value);
    }

    /// Pop a value from the stack
    pub fn pop(&mut self) -> EvmResult<Word> {
        self.data.pop().ok_or(HaltReason::StackUnderflow)
    }

    /// Top of the stack, if any
    pub fn top(&self) -> Option<Word> {
        self.data.last().copied()
    }

    /// Peek at a specific depth (0 = top)
    pub fn peek(&self, depth: usize) -> EvmResult<Word> {
        if depth >= self.data.len() {
            return Err(HaltReason::StackUnderflow);
        }
        Ok(self.data[self.data.len() - 1 - depth])
    }

    /// Fail with underflow unless at least `n` items are present
    pub fn require(&self, n: usize) -> EvmResult<()> {
        if self.data.len() < n {
            return Err(HaltReason::StackUnderflow);
        }
        Ok(())
    }

    /// Duplicate item at depth to top (1 = dup top)
    pub fn dup(&mut self, depth: usize) -> EvmResult<()> {
        if depth == 0 {
            return Err(HaltReason::InvalidDup);
        }
        let value = self.peek(depth - 1)?;
        self.data.push(value);
        Ok(())
    }

    /// Swap top with item at depth (1 = swap with second item)
    pub fn swap(&mut self, depth: usize) -> EvmResult<()> {
        if depth == 0 {
            return Err(HaltReason::SwapFailed);
        }
        if depth >= self.data.len() {
            return Err(HaltReason::StackUnderflow);
        }
        let len = self.data.len();
        self.data.swap(len - 1, len - 1 - depth);
        Ok(())
    }

    /// Get current stack size
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Items from bottom to top
    pub fn as_slice(&self) -> &[Word] {
        &self.data
    }

    /// Items from top to bottom
    pub fn iter_top_down(&self) -> impl Iterator<Item = &Word> + '_ {
        self.data.iter().rev()
    }

    /// Consume into a bottom-to-top vector
    pub fn into_vec(self) -> Vec<Word> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(n: u64) -> Word {
        Word::from(n)
    }

    #[test]
    fn test_stack_push_pop() {
        let mut stack = Stack::new();
        stack.push(w(42));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop().unwrap(), w(42));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_stack_underflow() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), Err(HaltReason::StackUnderflow));
        assert_eq!(stack.peek(0), Err(HaltReason::StackUnderflow));
        assert_eq!(stack.require(1), Err(HaltReason::StackUnderflow));
        assert_eq!(stack.require(0), Ok(()));
    }

    #[test]
    fn test_stack_lifo_order() {
        let mut stack = Stack::new();
        for i in 1..=3 {
            stack.push(w(i));
        }
        assert_eq!(stack.peek(0).unwrap(), w(3));
        assert_eq!(stack.peek(2).unwrap(), w(1));
        assert_eq!(stack.as_slice(), &[w(1), w(2), w(3)]);
        let top_down: Vec<Word> = stack.iter_top_down().copied().collect();
        assert_eq!(top_down, vec![w(3), w(2), w(1)]);
    }

    #[test]
    fn test_stack_dup() {
        let mut stack = Stack::new();
        stack.push(w(1));
        stack.push(w(2));
        stack.dup(2).unwrap();
        assert_eq!(stack.as_slice(), &[w(1), w(2), w(1)]);
        stack.dup(1).unwrap();
        assert_eq!(stack.top(), Some(w(1)));
        assert_eq!(stack.len(), 4);
    }

    #[test]
    fn test_stack_dup_underflow_leaves_stack_unchanged() {
        let mut stack = Stack::new();
        stack.push(w(7));
        assert_eq!(stack.dup(2), Err(HaltReason::StackUnderflow));
        assert_eq!(stack.as_slice(), &[w(7)]);
        assert_eq!(stack.dup(0), Err(HaltReason::InvalidDup));
    }

    #[test]
    fn test_stack_swap() {
        let mut stack = Stack::new();
        stack.push(w(1));
        stack.push(w(2));
        stack.push(w(3));
        stack.swap(2).unwrap();
        assert_eq!(stack.as_slice(), &[w(3), w(2), w(1)]);
        stack.swap(1).unwrap();
        assert_eq!(stack.as_slice(), &[w(3), w(1), w(2)]);
    }

    #[test]
    fn test_stack_swap_underflow() {
        let mut stack = Stack::new();
        assert_eq!(stack.swap(1), Err(HaltReason::StackUnderflow));
        stack.push(w(1));
        assert_eq!(stack.swap(1), Err(HaltReason::StackUnderflow));
        stack.push(w(2));
        assert_eq!(stack.swap(2), Err(HaltReason::StackUnderflow));
        assert_eq!(stack.swap(0), Err(HaltReason::SwapFailed));
        assert_eq!(stack.as_slice(), &[w(1), w(2)]);
    }

    #[test]
    fn test_stack_has_no_depth_cap() {
        let mut stack = Stack::new();
        for i in 0..2000 {
            stack.push(w(i));
        }
        assert_eq!(stack.len(), 2000);
        assert_eq!(stack.into_vec().len(), 2000);
    }
}
