//! Profiles: ordered field lists describing how a structure maps onto RLP.
use crate::{
    error::CodecError,
    kind::{ScalarKind, Value},
};
use thor_rlp::RlpItem;

/// Shape of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A single byte string.
    Scalar(ScalarKind),
    /// A list whose items follow the given fields in order.
    Struct(&'static [Field]),
    /// A homogeneous list of items of the given kind.
    List(&'static Kind),
    /// Any item, passed through untouched.
    Raw,
}

/// A named field of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Field name used in error paths.
    pub name: &'static str,
    /// Shape of the field.
    pub kind: Kind,
}

impl Field {
    /// Creates a field.
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        Self { name, kind }
    }
}

/// A named, ordered list of fields encoded as one RLP list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    /// Root name used in error paths.
    pub name: &'static str,
    /// Fields in wire order.
    pub fields: &'static [Field],
}

impl Profile {
    /// Number of fields.
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the profile has no fields.
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Packs `values`, one per field, into an RLP list.
    pub fn encode(&self, values: &[Value]) -> Result<RlpItem, CodecError> {
        pack_struct(self.fields, values, self.name)
    }

    /// Unpacks an RLP list into one value per field.
    pub fn decode(&self, item: &RlpItem) -> Result<Vec<Value>, CodecError> {
        unpack_struct(self.fields, item, self.name)
    }
}

fn child_context(context: &str, name: &str) -> String {
    format!("{context}.{name}")
}

fn pack(kind: &Kind, value: &Value, context: &str) -> Result<RlpItem, CodecError> {
    match (kind, value) {
        (Kind::Scalar(scalar), value) => scalar.encode(value, context).map(RlpItem::Bytes),
        (Kind::Struct(fields), Value::List(values)) => pack_struct(fields, values, context),
        (Kind::List(item_kind), Value::List(values)) => values
            .iter()
            .enumerate()
            .map(|(i, value)| pack(item_kind, value, &child_context(context, &format!("#{i}"))))
            .collect::<Result<Vec<_>, _>>()
            .map(RlpItem::List),
        (Kind::Raw, Value::Raw(item)) => Ok(item.clone()),
        _ => Err(CodecError::unexpected_value(context)),
    }
}

fn pack_struct(fields: &[Field], values: &[Value], context: &str) -> Result<RlpItem, CodecError> {
    if fields.len() != values.len() {
        return Err(CodecError::ProfileFieldCountMismatch {
            context: context.to_string(),
            expected: fields.len(),
            got: values.len(),
        })
    }
    fields
        .iter()
        .zip(values)
        .map(|(field, value)| pack(&field.kind, value, &child_context(context, field.name)))
        .collect::<Result<Vec<_>, _>>()
        .map(RlpItem::List)
}

fn unpack(kind: &Kind, item: &RlpItem, context: &str) -> Result<Value, CodecError> {
    match (kind, item) {
        (Kind::Scalar(scalar), RlpItem::Bytes(data)) => scalar.decode(data, context),
        (Kind::Scalar(_), RlpItem::List(_)) => {
            Err(CodecError::malformed(context, thor_rlp::DecodeError::UnexpectedList))
        }
        (Kind::Struct(fields), item) => unpack_struct(fields, item, context).map(Value::List),
        (Kind::List(item_kind), RlpItem::List(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| unpack(item_kind, item, &child_context(context, &format!("#{i}"))))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        (Kind::List(_), RlpItem::Bytes(_)) => {
            Err(CodecError::malformed(context, thor_rlp::DecodeError::UnexpectedString))
        }
        (Kind::Raw, item) => Ok(Value::Raw(item.clone())),
    }
}

fn unpack_struct(fields: &[Field], item: &RlpItem, context: &str) -> Result<Vec<Value>, CodecError> {
    let items = item
        .as_list()
        .ok_or_else(|| CodecError::malformed(context, thor_rlp::DecodeError::UnexpectedString))?;
    if fields.len() != items.len() {
        return Err(CodecError::ProfileFieldCountMismatch {
            context: context.to_string(),
            expected: fields.len(),
            got: items.len(),
        })
    }
    fields
        .iter()
        .zip(items)
        .map(|(field, item)| unpack(&field.kind, item, &child_context(context, field.name)))
        .collect()
}

/// Kind of the `features` bit set, the first item of the reserved list.
pub const FEATURES_KIND: ScalarKind = ScalarKind::Numeric { max_bytes: 4 };

/// Kind of the trailing signature item.
pub const SIGNATURE_KIND: ScalarKind = ScalarKind::Buffer;

/// Fields of a clause.
pub const CLAUSE_FIELDS: &[Field] = &[
    Field::new("to", Kind::Scalar(ScalarKind::OptionalFixedHexBlob(20))),
    Field::new("value", Kind::Scalar(ScalarKind::Numeric { max_bytes: 32 })),
    Field::new("data", Kind::Scalar(ScalarKind::HexBlob)),
];

const CLAUSES_KIND: Kind = Kind::List(&Kind::Struct(CLAUSE_FIELDS));

/// Unsigned legacy transaction body.
pub const LEGACY_TX_PROFILE: Profile = Profile {
    name: "tx",
    fields: &[
        Field::new("chainTag", Kind::Scalar(ScalarKind::Numeric { max_bytes: 1 })),
        Field::new("blockRef", Kind::Scalar(ScalarKind::CompactFixedHexBlob(8))),
        Field::new("expiration", Kind::Scalar(ScalarKind::Numeric { max_bytes: 4 })),
        Field::new("clauses", CLAUSES_KIND),
        Field::new("gasPriceCoef", Kind::Scalar(ScalarKind::Numeric { max_bytes: 1 })),
        Field::new("gas", Kind::Scalar(ScalarKind::Numeric { max_bytes: 8 })),
        Field::new("dependsOn", Kind::Scalar(ScalarKind::OptionalFixedHexBlob(32))),
        Field::new("nonce", Kind::Scalar(ScalarKind::Numeric { max_bytes: 8 })),
        Field::new("reserved", Kind::Raw),
    ],
};

/// Unsigned dynamic-fee transaction body.
pub const DYNAMIC_FEE_TX_PROFILE: Profile = Profile {
    name: "tx",
    fields: &[
        Field::new("chainTag", Kind::Scalar(ScalarKind::Numeric { max_bytes: 1 })),
        Field::new("blockRef", Kind::Scalar(ScalarKind::CompactFixedHexBlob(8))),
        Field::new("expiration", Kind::Scalar(ScalarKind::Numeric { max_bytes: 4 })),
        Field::new("clauses", CLAUSES_KIND),
        Field::new("maxPriorityFeePerGas", Kind::Scalar(ScalarKind::Numeric { max_bytes: 32 })),
        Field::new("maxFeePerGas", Kind::Scalar(ScalarKind::Numeric { max_bytes: 32 })),
        Field::new("gas", Kind::Scalar(ScalarKind::Numeric { max_bytes: 8 })),
        Field::new("dependsOn", Kind::Scalar(ScalarKind::OptionalFixedHexBlob(32))),
        Field::new("nonce", Kind::Scalar(ScalarKind::Numeric { max_bytes: 8 })),
        Field::new("reserved", Kind::Raw),
    ],
};
