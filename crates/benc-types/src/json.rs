//! Conversion from `serde_json::Value` at the construction boundary.
//!
//! JSON has shapes the value model cannot express. They are rejected here
//! with [`TypeError::UnsupportedType`] so nothing outside the model ever
//! reaches the encoder:
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────────┐
//! │ JSON         │ Value                                │
//! ├──────────────┼──────────────────────────────────────┤
//! │ integer      │ Integer (u64 above i64::MAX fails)   │
//! │ string       │ ByteString (UTF-8 bytes)             │
//! │ array        │ List                                 │
//! │ object       │ Dictionary                           │
//! │ null / bool  │ UnsupportedType                      │
//! │ float        │ UnsupportedType                      │
//! └──────────────┴──────────────────────────────────────┘
//! ```

use serde_json::Value as Json;

use crate::dict::Dict;
use crate::error::TypeError;
use crate::value::Value;

impl TryFrom<Json> for Value {
    type Error = TypeError;

    fn try_from(json: Json) -> Result<Self, Self::Error> {
        match json {
            Json::Null => Err(TypeError::UnsupportedType { kind: "null" }),
            Json::Bool(_) => Err(TypeError::UnsupportedType { kind: "boolean" }),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Value::try_from(u)
                } else {
                    Err(TypeError::UnsupportedType {
                        kind: "floating-point number",
                    })
                }
            }
            Json::String(s) => Ok(Value::from(s)),
            Json::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Json::Object(map) => {
                let mut dict = Dict::new();
                for (key, value) in map {
                    dict.insert(key, Value::try_from(value)?);
                }
                Ok(Value::Dictionary(dict))
            }
        }
    }
}
