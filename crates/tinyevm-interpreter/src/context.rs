//! Execution context for EVM

use crate::error::ContextError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tinyevm_primitives::{Address, Word};

/// Read-only environment supplied once per run.
///
/// Every field is optional when deserialized; omitted fields take zero or
/// empty defaults, except `gas_limit` which defaults to `u32::MAX`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExecutionContext {
    /// Contract address being executed (ADDRESS)
    pub address: Address,
    /// Transaction origin (ORIGIN)
    pub origin: Address,
    /// Immediate caller (CALLER)
    pub caller: Address,
    /// Block coinbase (COINBASE)
    pub coinbase: Address,
    /// Call value in wei (CALLVALUE)
    pub call_value: Word,
    /// Gas price (GASPRICE)
    pub gas_price: Word,
    /// Base fee (BASEFEE)
    pub base_fee: Word,
    /// Blob base fee (BLOBBASEFEE)
    pub blob_base_fee: Word,
    /// Balance of the executing account (SELFBALANCE)
    pub self_balance: Word,
    /// Block difficulty/prevrandao (PREVRANDAO)
    pub difficulty: Word,
    /// Block timestamp (TIMESTAMP)
    pub timestamp: u64,
    /// Block number (NUMBER)
    pub number: u64,
    /// Chain ID (CHAINID)
    pub chain_id: u64,
    /// Block gas limit (GASLIMIT)
    #[serde(alias = "gaslimit")]
    pub gas_limit: u64,
    /// Call data (CALLDATALOAD, CALLDATASIZE, CALLDATACOPY)
    #[serde(with = "hex_bytes")]
    pub calldata: Bytes,
    /// Executing code (CODESIZE, CODECOPY)
    #[serde(with = "hex_bytes")]
    pub code: Bytes,
    /// Output of the previous call (RETURNDATASIZE)
    #[serde(with = "hex_bytes")]
    pub return_data: Bytes,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self {
            address: Address::ZERO,
            origin: Address::ZERO,
            caller: Address::ZERO,
            coinbase: Address::ZERO,
            call_value: Word::zero(),
            gas_price: Word::zero(),
            base_fee: Word::zero(),
            blob_base_fee: Word::zero(),
            self_balance: Word::zero(),
            difficulty: Word::zero(),
            timestamp: 0,
            number: 0,
            chain_id: 0,
            gas_limit: u32::MAX as u64,
            calldata: Bytes::new(),
            code: Bytes::new(),
            return_data: Bytes::new(),
        }
    }
}

impl ExecutionContext {
    /// Create a context with every field at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a context from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ContextError> {
        // only a JSON object is a context; arrays would fill fields positionally
        let fields: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        Ok(serde_json::from_value(serde_json::Value::Object(fields))?)
    }

    /// Set the executing address
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// Set the transaction origin
    pub fn with_origin(mut self, origin: Address) -> Self {
        self.origin = origin;
        self
    }

    /// Set the caller
    pub fn with_caller(mut self, caller: Address) -> Self {
        self.caller = caller;
        self
    }

    /// Set the coinbase
    pub fn with_coinbase(mut self, coinbase: Address) -> Self {
        self.coinbase = coinbase;
        self
    }

    /// Set the call value
    pub fn with_call_value(mut self, value: Word) -> Self {
        self.call_value = value;
        self
    }

    /// Set the gas price
    pub fn with_gas_price(mut self, gas_price: Word) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Set the self balance
    pub fn with_self_balance(mut self, balance: Word) -> Self {
        self.self_balance = balance;
        self
    }

    /// Set block number and timestamp
    pub fn with_block(mut self, number: u64, timestamp: u64) -> Self {
        self.number = number;
        self.timestamp = timestamp;
        self
    }

    /// Set the chain id
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Set the call data
    pub fn with_calldata(mut self, calldata: impl Into<Bytes>) -> Self {
        self.calldata = calldata.into();
        self
    }

    /// Set the executing code
    pub fn with_code(mut self, code: impl Into<Bytes>) -> Self {
        self.code = code.into();
        self
    }

    /// Set the previous call's return data
    pub fn with_return_data(mut self, data: impl Into<Bytes>) -> Self {
        self.return_data = data.into();
        self
    }
}

/// `0x`-prefixed hex strings for byte fields
mod hex_bytes {
    use bytes::Bytes;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use tinyevm_primitives::{decode_hex_bytes, word::bytes_to_hex};

    pub fn serialize<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&bytes_to_hex(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_hex_bytes(&s).map(Bytes::from).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults() {
        let ctx = ExecutionContext::default();
        assert_eq!(ctx.address, Address::ZERO);
        assert_eq!(ctx.call_value, Word::zero());
        assert_eq!(ctx.chain_id, 0);
        assert_eq!(ctx.gas_limit, 4_294_967_295);
        assert!(ctx.calldata.is_empty());
        assert!(ctx.code.is_empty());
    }

    #[test]
    fn test_context_builder() {
        let caller = Address::from_bytes([0x22; 20]);
        let ctx = ExecutionContext::new()
            .with_caller(caller)
            .with_call_value(Word::from(1000u64))
            .with_calldata(vec![1, 2, 3])
            .with_block(17, 1_700_000_000)
            .with_chain_id(1);

        assert_eq!(ctx.caller, caller);
        assert_eq!(ctx.call_value, Word::from(1000u64));
        assert_eq!(&ctx.calldata[..], &[1, 2, 3]);
        assert_eq!(ctx.number, 17);
        assert_eq!(ctx.timestamp, 1_700_000_000);
        assert_eq!(ctx.chain_id, 1);
    }

    #[test]
    fn test_context_from_json_partial() {
        let ctx = ExecutionContext::from_json(
            r#"{
                "caller": "0x2222222222222222222222222222222222222222",
                "callValue": "0x3e8",
                "chainId": 5,
                "calldata": "0xDEADbeef"
            }"#,
        )
        .unwrap();

        assert_eq!(ctx.caller, Address::from_bytes([0x22; 20]));
        assert_eq!(ctx.call_value, Word::from(1000u64));
        assert_eq!(ctx.chain_id, 5);
        assert_eq!(&ctx.calldata[..], &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(ctx.gas_limit, u32::MAX as u64);
        assert_eq!(ctx.origin, Address::ZERO);
    }

    #[test]
    fn test_context_from_json_gaslimit_alias() {
        let ctx = ExecutionContext::from_json(r#"{"gaslimit": 30000000}"#).unwrap();
        assert_eq!(ctx.gas_limit, 30_000_000);
    }

    #[test]
    fn test_context_from_json_rejects_bad_hex() {
        assert!(ExecutionContext::from_json(r#"{"calldata": "0xabc"}"#).is_err());
        assert!(ExecutionContext::from_json(r#"{"caller": "0x12"}"#).is_err());
    }

    #[test]
    fn test_context_from_json_requires_object() {
        assert!(matches!(ExecutionContext::from_json("[]"), Err(ContextError::Json(_))));
        assert!(ExecutionContext::from_json(r#"["0x01"]"#).is_err());
        assert!(ExecutionContext::from_json("42").is_err());
        assert_eq!(ExecutionContext::from_json("{}").unwrap(), ExecutionContext::default());
    }

    #[test]
    fn test_context_json_roundtrip() {
        let ctx = ExecutionContext::new()
            .with_code(vec![0x60, 0x01])
            .with_self_balance(Word::from(7u64));
        let json = serde_json::to_string(&ctx).unwrap();
        assert!(json.contains("\"code\":\"0x6001\""));
        let back = ExecutionContext::from_json(&json).unwrap();
        assert_eq!(back, ctx);
    }
}
