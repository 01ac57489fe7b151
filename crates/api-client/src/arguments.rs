// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Caller-supplied parameter values

use std::collections::BTreeMap;

use serde_json::Value;

/// Named argument values for one call
///
/// Values are untyped JSON until they are checked against the endpoint's
/// [`ParamSpec`](crate::ParamSpec)s during request construction.
///
/// ```rust
/// use api_client::Arguments;
///
/// let args = Arguments::new()
///     .with("user_address", "0x1234567890123456789012345678901234567890")
///     .with("page_size", 50)
///     .with_opt("cursor", None::<String>);
///
/// assert_eq!(args.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(BTreeMap<String, Value>);

impl Arguments {
    /// Empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, replacing any previous value under the same name
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a value only when `value` is `Some`
    #[must_use]
    pub fn with_opt(self, name: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    /// Insert a value in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Value supplied under `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Iterate over supplied names and values in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of supplied values
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no values were supplied
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn later_values_replace_earlier_ones() {
        let args = Arguments::new().with("page_size", 10).with("page_size", 20);
        assert_eq!(args.get("page_size"), Some(&json!(20)));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn collects_from_pairs() {
        let args: Arguments = [("erc", "erc721"), ("user_address", "0xabc")]
            .into_iter()
            .collect();
        let names: Vec<_> = args.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["erc", "user_address"]);
    }
}
