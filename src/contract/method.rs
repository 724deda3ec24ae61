use crate::abi::method_signature;
use crate::error::ContractResult;

use ethers::abi::{Function, Tokenize};
use ethers::types::{Address, Bytes};

/// A contract function bound to its arguments
#[derive(Debug, Clone)]
pub struct MethodCall {
    address: Address,
    function: Function,
    calldata: Bytes,
}

impl MethodCall {
    /// ABI-encode `args` for `function` on the contract at `address`
    pub fn new<T: Tokenize>(address: Address, function: Function, args: T) -> ContractResult<Self> {
        let calldata = function.encode_input(&args.into_tokens())?;

        Ok(Self {
            address,
            function,
            calldata: calldata.into(),
        })
    }

    /// Contract address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Function name
    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    /// Selector followed by the encoded arguments
    pub fn calldata(&self) -> &Bytes {
        &self.calldata
    }

    /// `name(inputs)(outputs)`
    pub fn signature(&self) -> ContractResult<String> {
        method_signature(&self.function)
    }
}
