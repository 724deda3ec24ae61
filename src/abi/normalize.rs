//! Canonical type strings for ABI parameters

use crate::error::{ContractError, ContractResult};

use ethers::abi::param_type::Reader;
use ethers::abi::{Param, ParamType};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    // Zero or more array dimensions, e.g. "", "[]", "[3][]"
    static ref ARRAY_SUFFIX: Regex = Regex::new(r"^(\[[0-9]*\])*$").unwrap();
}

/// Canonical textual form of a parsed parameter type
///
/// Tuples render as `(a,b)` and arrays keep their suffix, e.g. `(uint256,address)[]`.
pub fn canonical_type(kind: &ParamType) -> String {
    kind.to_string()
}

/// Canonical types of already parsed `ethers` parameters
pub(crate) fn normalize_params(params: &[Param]) -> Vec<String> {
    params.iter().map(|p| canonical_type(&p.kind)).collect()
}

/// Normalize a JSON parameter list (`inputs` or `outputs` of an ABI entry)
///
/// `tuple` parameters are expanded from their `components`.
pub fn normalize_json_params(params: &[Value]) -> ContractResult<Vec<String>> {
    params.iter().map(normalize_json_param).collect()
}

fn normalize_json_param(param: &Value) -> ContractResult<String> {
    let ty = param
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ContractError::InvalidAbi(format!("parameter has no type: {}", param)))?;

    match ty.strip_prefix("tuple") {
        Some(suffix) => {
            if !ARRAY_SUFFIX.is_match(suffix) {
                return Err(ContractError::InvalidAbi(format!("invalid tuple type: {}", ty)));
            }

            let components = param
                .get("components")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    ContractError::InvalidAbi(format!("tuple parameter has no components: {}", param))
                })?;

            let inner = normalize_json_params(components)?;
            Ok(format!("({}){}", inner.join(","), suffix))
        }
        None => Reader::read(ty)
            .map(|kind| canonical_type(&kind))
            .map_err(|e| ContractError::InvalidAbi(format!("invalid type {}: {}", ty, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_elementary_types() {
        let params = vec![
            json!({"name": "to", "type": "address"}),
            json!({"name": "amount", "type": "uint256"}),
            json!({"name": "flag", "type": "bool"}),
            json!({"name": "id", "type": "bytes32"}),
            json!({"name": "memo", "type": "string"}),
        ];

        let types = normalize_json_params(&params).unwrap();
        assert_eq!(types, vec!["address", "uint256", "bool", "bytes32", "string"]);
    }

    #[test]
    fn test_array_types() {
        let params = vec![
            json!({"name": "a", "type": "address[]"}),
            json!({"name": "b", "type": "uint8[3]"}),
        ];

        let types = normalize_json_params(&params).unwrap();
        assert_eq!(types, vec!["address[]", "uint8[3]"]);
    }

    #[test]
    fn test_tuple_expansion() {
        let params = vec![json!({
            "name": "order",
            "type": "tuple",
            "components": [
                {"name": "maker", "type": "address"},
                {"name": "amount", "type": "uint256"}
            ]
        })];

        let types = normalize_json_params(&params).unwrap();
        assert_eq!(types, vec!["(address,uint256)"]);
    }

    #[test]
    fn test_nested_tuple_array() {
        let params = vec![json!({
            "name": "batches",
            "type": "tuple[]",
            "components": [
                {"name": "id", "type": "bytes32"},
                {
                    "name": "legs",
                    "type": "tuple[2]",
                    "components": [
                        {"name": "to", "type": "address"},
                        {"name": "value", "type": "uint128"}
                    ]
                }
            ]
        })];

        let types = normalize_json_params(&params).unwrap();
        assert_eq!(types, vec!["(bytes32,(address,uint128)[2])[]"]);
    }

    #[test]
    fn test_missing_type_is_invalid() {
        let params = vec![json!({"name": "to"})];
        let err = normalize_json_params(&params).unwrap_err();
        assert!(matches!(err, ContractError::InvalidAbi(_)));
    }

    #[test]
    fn test_tuple_without_components_is_invalid() {
        let params = vec![json!({"name": "order", "type": "tuple"})];
        assert!(matches!(
            normalize_json_params(&params),
            Err(ContractError::InvalidAbi(_))
        ));
    }

    #[test]
    fn test_unknown_type_is_invalid() {
        let params = vec![json!({"name": "x", "type": "uint257x"})];
        assert!(matches!(
            normalize_json_params(&params),
            Err(ContractError::InvalidAbi(_))
        ));
    }

    #[test]
    fn test_canonical_type_of_parsed_tuple() {
        let kind = ParamType::Array(Box::new(ParamType::Tuple(vec![
            ParamType::Uint(256),
            ParamType::Address,
        ])));
        assert_eq!(canonical_type(&kind), "(uint256,address)[]");
    }
}
