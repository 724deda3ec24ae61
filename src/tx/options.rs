use ethers::types::U256;

/// Optional per-call transaction parameters
///
/// Anything left as `None` is omitted from the request so that the node or
/// `ethers` can apply its own default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxOptions {
    /// Value sent with the call, in wei
    pub value: Option<U256>,
    /// Gas limit
    pub gas: Option<U256>,
    /// Legacy gas price
    pub gas_price: Option<U256>,
    /// EIP-1559 fee cap
    pub max_fee_per_gas: Option<U256>,
    /// EIP-1559 tip cap
    pub max_priority_fee_per_gas: Option<U256>,
}

impl TxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value<T: Into<U256>>(mut self, wei: T) -> Self {
        self.value = Some(wei.into());
        self
    }

    pub fn gas<T: Into<U256>>(mut self, gas: T) -> Self {
        self.gas = Some(gas.into());
        self
    }

    pub fn gas_price<T: Into<U256>>(mut self, gas_price: T) -> Self {
        self.gas_price = Some(gas_price.into());
        self
    }

    pub fn max_fee_per_gas<T: Into<U256>>(mut self, max_fee: T) -> Self {
        self.max_fee_per_gas = Some(max_fee.into());
        self
    }

    pub fn max_priority_fee_per_gas<T: Into<U256>>(mut self, priority_fee: T) -> Self {
        self.max_priority_fee_per_gas = Some(priority_fee.into());
        self
    }

    /// True when either EIP-1559 cap was supplied
    pub fn is_eip1559(&self) -> bool {
        self.max_fee_per_gas.is_some() || self.max_priority_fee_per_gas.is_some()
    }
}
