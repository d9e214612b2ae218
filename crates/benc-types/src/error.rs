use crate::value::ValueKind;

/// Errors raised when native data is converted into a [`Value`](crate::Value).
///
/// The value model is closed: four kinds, 64-bit integers. Anything that
/// cannot be represented is rejected here, at construction time, so the
/// encoder never sees an out-of-model shape.
///
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                               │
/// │   ├── UnsupportedType  ← null, bool, float, ...      │
/// │   └── IntegerOverflow  ← u64 / i128 / u128 too wide  │
/// └──────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// The source value has no counterpart among the four value kinds.
    #[error("unsupported type: {kind} cannot be represented")]
    UnsupportedType { kind: &'static str },

    /// The source integer does not fit in `i64`.
    #[error("integer {value} does not fit in 64 bits")]
    IntegerOverflow { value: String },

    /// A conversion expected one value kind and found another.
    #[error("expected {expected}, found {found}")]
    KindMismatch {
        expected: ValueKind,
        found: ValueKind,
    },
}
