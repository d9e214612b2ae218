use benc_types::{Dict, Value};

use crate::encoder::BencEncoder;

/// Chainable builder for a document dictionary.
///
/// Entries can be added in any order; the encoder emits them sorted by key.
/// Inserting a key that is already present replaces its value.
///
/// # Usage
///
/// ```rust
/// use benc_encoder::DictBuilder;
///
/// let bytes = DictBuilder::new()
///     .insert_bytes("spam", b"eggs")
///     .insert_int("count", 3)
///     .insert_list("tags", vec!["a".into(), "b".into()])
///     .encode();
///
/// assert_eq!(bytes, b"d5:counti3e4:spam4:eggs4:tagsl1:a1:bee");
/// ```
#[derive(Clone, Debug, Default)]
pub struct DictBuilder {
    dict: Dict,
}

impl DictBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert any value convertible into [`Value`].
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Value>) -> &mut Self {
        self.dict.insert(key, value);
        self
    }

    pub fn insert_int(&mut self, key: impl Into<Vec<u8>>, value: i64) -> &mut Self {
        self.insert(key, Value::Integer(value))
    }

    pub fn insert_bytes(&mut self, key: impl Into<Vec<u8>>, value: &[u8]) -> &mut Self {
        self.insert(key, Value::ByteString(value.to_vec()))
    }

    pub fn insert_list(&mut self, key: impl Into<Vec<u8>>, items: Vec<Value>) -> &mut Self {
        self.insert(key, Value::List(items))
    }

    /// Insert a nested dictionary built by another builder.
    pub fn insert_dict(&mut self, key: impl Into<Vec<u8>>, nested: &DictBuilder) -> &mut Self {
        self.insert(key, Value::Dictionary(nested.dict.clone()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dict.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    /// Snapshot the accumulated entries as a dictionary value.
    #[must_use]
    pub fn build(&self) -> Value {
        Value::Dictionary(self.dict.clone())
    }

    /// Encode the accumulated entries as a complete document.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        BencEncoder::encode(&self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_encodes_empty_dictionary() {
        assert_eq!(DictBuilder::new().encode(), b"de");
        assert!(DictBuilder::new().is_empty());
    }

    #[test]
    fn later_insert_replaces_earlier() {
        let mut builder = DictBuilder::new();
        builder.insert_int("n", 1).insert_int("n", 2);
        assert_eq!(builder.len(), 1);
        assert_eq!(builder.encode(), b"d1:ni2ee");
    }

    #[test]
    fn nested_dictionaries() {
        let mut info = DictBuilder::new();
        info.insert_int("length", 10).insert("name", "a.txt");

        let bytes = DictBuilder::new()
            .insert("announce", "udp://t")
            .insert_dict("info", &info)
            .encode();

        assert_eq!(
            bytes,
            b"d8:announce7:udp://t4:infod6:lengthi10e4:name5:a.txtee"
        );
    }

    #[test]
    fn build_returns_dictionary_value() {
        let value = DictBuilder::new().insert_int("x", -1).build();
        assert_eq!(value.get("x"), Some(&Value::Integer(-1)));
    }
}
