//! Method signature derivation

use super::normalize::{normalize_json_params, normalize_params};
use crate::error::{ContractError, ContractResult};

use ethers::abi::Function;
use serde_json::Value;
use std::fmt;

/// Name and canonical input/output types of a contract method
///
/// Derived on demand from an ABI entry and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl MethodDescriptor {
    /// Derive a descriptor from a parsed ABI function
    pub fn from_function(function: &Function) -> ContractResult<Self> {
        if function.name.is_empty() {
            return Err(ContractError::InvalidAbi("function has no name".to_string()));
        }

        Ok(Self {
            name: function.name.clone(),
            inputs: normalize_params(&function.inputs),
            outputs: normalize_params(&function.outputs),
        })
    }

    /// Derive a descriptor from a raw JSON ABI entry
    ///
    /// Missing `inputs` or `outputs` count as empty lists.
    pub fn from_abi_entry(entry: &Value) -> ContractResult<Self> {
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ContractError::InvalidAbi(format!("ABI entry has no name: {}", entry)))?;

        Ok(Self {
            name: name.to_string(),
            inputs: json_params(entry, "inputs")?,
            outputs: json_params(entry, "outputs")?,
        })
    }

    /// `name(in1,in2,...)(out1,...)`
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})({})",
            self.name,
            self.inputs.join(","),
            self.outputs.join(",")
        )
    }
}

/// Signature of a parsed ABI function
pub fn method_signature(function: &Function) -> ContractResult<String> {
    MethodDescriptor::from_function(function).map(|d| d.signature())
}

fn json_params(entry: &Value, key: &str) -> ContractResult<Vec<String>> {
    match entry.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(params)) => normalize_json_params(params),
        Some(other) => Err(ContractError::InvalidAbi(format!(
            "{} must be a list, got {}",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::{Abi, Param, ParamType, StateMutability};
    use serde_json::json;

    #[allow(deprecated)]
    fn function(name: &str, inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Function {
        let params = |kinds: Vec<ParamType>| {
            kinds
                .into_iter()
                .map(|kind| Param {
                    name: String::new(),
                    kind,
                    internal_type: None,
                })
                .collect()
        };

        Function {
            name: name.to_string(),
            inputs: params(inputs),
            outputs: params(outputs),
            constant: None,
            state_mutability: StateMutability::NonPayable,
        }
    }

    #[test]
    fn test_signature_with_inputs_and_outputs() {
        let f = function(
            "f",
            vec![ParamType::Address, ParamType::Uint(256)],
            vec![ParamType::Bool],
        );
        assert_eq!(method_signature(&f).unwrap(), "f(address,uint256)(bool)");
    }

    #[test]
    fn test_signature_without_params() {
        let f = function("f", vec![], vec![]);
        assert_eq!(method_signature(&f).unwrap(), "f()()");
    }

    #[test]
    fn test_descriptor_is_literal() {
        let descriptor = MethodDescriptor {
            name: "f".to_string(),
            inputs: vec!["a".to_string(), "b".to_string()],
            outputs: vec!["c".to_string()],
        };
        assert_eq!(descriptor.signature(), "f(a,b)(c)");
    }

    #[test]
    fn test_signature_is_idempotent() {
        let f = function("swap", vec![ParamType::Tuple(vec![ParamType::Uint(8)])], vec![]);
        let first = method_signature(&f).unwrap();
        let second = method_signature(&f).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "swap((uint8))()");
    }

    #[test]
    fn test_unnamed_function_is_invalid() {
        let f = function("", vec![], vec![]);
        assert!(matches!(
            method_signature(&f),
            Err(ContractError::InvalidAbi(_))
        ));
    }

    #[test]
    fn test_from_abi_entry() {
        let entry = json!({
            "type": "function",
            "name": "transfer",
            "inputs": [
                {"name": "to", "type": "address"},
                {"name": "amount", "type": "uint256"}
            ],
            "outputs": [{"name": "", "type": "bool"}],
            "stateMutability": "nonpayable"
        });

        let descriptor = MethodDescriptor::from_abi_entry(&entry).unwrap();
        assert_eq!(descriptor.name, "transfer");
        assert_eq!(descriptor.signature(), "transfer(address,uint256)(bool)");
    }

    #[test]
    fn test_from_abi_entry_defaults_to_empty_lists() {
        let entry = json!({"type": "function", "name": "pause"});
        let descriptor = MethodDescriptor::from_abi_entry(&entry).unwrap();
        assert_eq!(descriptor.signature(), "pause()()");
    }

    #[test]
    fn test_from_abi_entry_without_name() {
        let entry = json!({"type": "fallback", "stateMutability": "payable"});
        let err = MethodDescriptor::from_abi_entry(&entry).unwrap_err();
        assert!(matches!(err, ContractError::InvalidAbi(_)));
    }

    #[test]
    fn test_from_abi_entry_rejects_non_list_inputs() {
        let entry = json!({"name": "f", "inputs": "address"});
        assert!(MethodDescriptor::from_abi_entry(&entry).is_err());
    }

    #[test]
    fn test_parsed_and_json_paths_agree() {
        let entry = json!({
            "type": "function",
            "name": "fill",
            "inputs": [{
                "name": "order",
                "type": "tuple",
                "components": [
                    {"name": "maker", "type": "address"},
                    {"name": "amounts", "type": "uint256[]"}
                ]
            }],
            "outputs": [],
            "stateMutability": "nonpayable"
        });

        let abi: Abi = serde_json::from_value(json!([entry.clone()])).unwrap();
        let parsed = method_signature(abi.function("fill").unwrap()).unwrap();
        let raw = MethodDescriptor::from_abi_entry(&entry).unwrap().signature();

        assert_eq!(parsed, raw);
        assert_eq!(raw, "fill((address,uint256[]))()");
    }
}
