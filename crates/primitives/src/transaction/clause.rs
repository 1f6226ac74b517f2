use crate::{error::CodecError, kind::Value, Address, U256};
use bytes::Bytes;

/// A single call or contract creation inside a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Clause {
    /// Recipient, or `None` to deploy `data` as a contract.
    pub to: Option<Address>,
    /// Value transferred.
    pub value: U256,
    /// Call data or init code.
    pub data: Bytes,
}

impl Clause {
    /// Creates a call to `to`.
    pub fn call(to: Address, value: U256, data: Bytes) -> Self {
        Self { to: Some(to), value, data }
    }

    /// Creates a contract deployment.
    pub fn create(value: U256, code: Bytes) -> Self {
        Self { to: None, value, data: code }
    }

    /// Whether this clause deploys a contract.
    pub const fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::List(vec![
            self.to.map_or(Value::Absent, |to| Value::Bytes(Bytes::copy_from_slice(to.as_bytes()))),
            Value::Numeric(self.value),
            Value::Bytes(self.data.clone()),
        ])
    }

    pub(crate) fn from_value(value: Value, context: &str) -> Result<Self, CodecError> {
        let [to, amount, data]: [Value; 3] = value
            .into_list(context)?
            .try_into()
            .map_err(|_| CodecError::unexpected_value(context))?;
        let to = to
            .into_optional_bytes(context)?
            .map(|to| {
                Address::try_from_slice(&to).map_err(|err| CodecError::InvalidFixedLength {
                    context: format!("{context}.to"),
                    expected: err.expected,
                    got: err.got,
                })
            })
            .transpose()?;
        Ok(Self { to, value: amount.into_numeric(context)?, data: data.into_bytes(context)? })
    }
}
