use crate::{
    error::CodecError,
    kind::{narrow, Value},
    profile::FEATURES_KIND,
    U256,
};
use thor_rlp::{DecodeError, RlpItem};

const CONTEXT: &str = "tx.reserved";

/// The trailing `reserved` list of a transaction body: a feature bit set followed by items
/// this codec does not interpret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ReservedFeatures {
    /// Feature bits.
    pub features: u32,
    /// Items after `features`, carried through unchanged.
    pub unused: Vec<RlpItem>,
}

impl ReservedFeatures {
    /// Feature bit marking a transaction whose gas is paid by a second signer.
    pub const DELEGATED: u32 = 1;

    /// Reserved field of a delegated transaction.
    pub const fn delegated() -> Self {
        Self { features: Self::DELEGATED, unused: Vec::new() }
    }

    /// Whether the delegation feature is set.
    pub const fn is_delegated(&self) -> bool {
        self.features & Self::DELEGATED == Self::DELEGATED
    }

    /// Builds `[features, ...unused]` with trailing empty strings removed, so a body without
    /// features or extra items carries an empty list.
    pub fn encode(&self) -> Result<RlpItem, CodecError> {
        let features = FEATURES_KIND
            .encode(&Value::Numeric(U256::from(self.features)), &format!("{CONTEXT}.features"))?;
        let mut items = Vec::with_capacity(1 + self.unused.len());
        items.push(RlpItem::Bytes(features));
        items.extend(self.unused.iter().cloned());
        while items.last().is_some_and(RlpItem::is_empty_bytes) {
            items.pop();
        }
        Ok(RlpItem::List(items))
    }

    /// Parses the reserved list, rejecting one that ends in an empty string.
    pub fn decode(item: &RlpItem) -> Result<Self, CodecError> {
        let items = item
            .as_list()
            .ok_or_else(|| CodecError::malformed(CONTEXT, DecodeError::UnexpectedString))?;
        let Some((first, unused)) = items.split_first() else { return Ok(Self::default()) };
        if items.last().is_some_and(RlpItem::is_empty_bytes) {
            return Err(CodecError::malformed(
                CONTEXT,
                DecodeError::Custom("reserved field must be trimmed"),
            ))
        }

        let context = format!("{CONTEXT}.features");
        let features = match first {
            RlpItem::Bytes(data) => FEATURES_KIND.decode(data, &context)?.into_numeric(&context)?,
            RlpItem::List(_) => {
                return Err(CodecError::malformed(context, DecodeError::UnexpectedList))
            }
        };
        Ok(Self { features: narrow(features, &context)?, unused: unused.to_vec() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex_literal::hex;
    use assert_matches::assert_matches;
    use bytes::Bytes;

    #[test]
    fn trims_trailing_empty_items() {
        assert_eq!(ReservedFeatures::default().encode().unwrap(), RlpItem::List(vec![]));
        assert_eq!(ReservedFeatures::delegated().encode().unwrap().encoded()[..], hex!("c101")[..]);

        let reserved = ReservedFeatures {
            features: 0,
            unused: vec![RlpItem::Bytes(Bytes::from_static(b"x")), RlpItem::EMPTY_BYTES],
        };
        assert_eq!(reserved.encode().unwrap().encoded()[..], hex!("c28078")[..]);
    }

    #[test]
    fn keeps_unused_items() {
        let item = RlpItem::decode_exact(&hex!("cd01853078303030853078303030")).unwrap();
        let reserved = ReservedFeatures::decode(&item).unwrap();
        assert!(reserved.is_delegated());
        assert_eq!(reserved.unused.len(), 2);
        assert_eq!(reserved.encode().unwrap(), item);
    }

    #[test]
    fn empty_list_has_no_features() {
        let reserved = ReservedFeatures::decode(&RlpItem::List(vec![])).unwrap();
        assert_eq!(reserved, ReservedFeatures::default());
        assert!(!reserved.is_delegated());
    }

    #[test]
    fn rejects_untrimmed_lists() {
        let untrimmed = RlpItem::List(vec![RlpItem::EMPTY_BYTES]);
        assert_matches!(
            ReservedFeatures::decode(&untrimmed),
            Err(CodecError::MalformedEncoding {
                source: DecodeError::Custom("reserved field must be trimmed"),
                ..
            })
        );
        let untrimmed = RlpItem::List(vec![RlpItem::Bytes(Bytes::from_static(&[1])), RlpItem::EMPTY_BYTES]);
        assert_matches!(ReservedFeatures::decode(&untrimmed), Err(CodecError::MalformedEncoding { .. }));
    }

    #[test]
    fn features_are_at_most_four_bytes() {
        let wide = RlpItem::List(vec![RlpItem::Bytes(Bytes::from_static(&[1; 5]))]);
        assert_matches!(
            ReservedFeatures::decode(&wide),
            Err(CodecError::NumericOverflow { max_bytes: 4, got: 5, .. })
        );
        assert_matches!(ReservedFeatures::decode(&RlpItem::EMPTY_BYTES), Err(CodecError::MalformedEncoding { .. }));
    }
}
