//! Canonical encoding of request parameters.
//!
//! The same flat, ordered `wire_name → value` list feeds both the request
//! signature and GET query strings, so its order must be reproducible. Each
//! options type lists its fields explicitly through [`CanonicalParams`], in
//! declaration order; nested option groups push their own fields into the
//! same map. Fields at their zero value are skipped.

use std::fmt;

/// Ordered, flat `wire_name → value` representation of a request payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalMap {
    entries: Vec<(&'static str, String)>,
}

impl CanonicalMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` unless `value` is at its zero value.
    pub fn push<V: ParamValue + ?Sized>(&mut self, name: &'static str, value: &V) -> &mut Self {
        if !value.is_zero() {
            self.entries.push((name, value.to_param()));
        }
        self
    }

    /// Flatten a nested option group into this map.
    pub fn extend<P: CanonicalParams + ?Sized>(&mut self, nested: &P) -> &mut Self {
        nested.encode_into(self);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries as `(name, value)` pairs, ready for `RequestBuilder::query`.
    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.entries
    }
}

/// A request-options type with a fixed, ordered list of wire fields.
pub trait CanonicalParams {
    /// Push every field, in declaration order, into `out`.
    fn encode_into(&self, out: &mut CanonicalMap);

    /// Encode into a fresh map.
    fn canonical(&self) -> CanonicalMap {
        let mut out = CanonicalMap::new();
        self.encode_into(&mut out);
        out
    }
}

/// Requests without parameters (DELETE, plain listings).
impl CanonicalParams for () {
    fn encode_into(&self, _out: &mut CanonicalMap) {}
}

impl<P: CanonicalParams + ?Sized> CanonicalParams for &P {
    fn encode_into(&self, out: &mut CanonicalMap) {
        (**self).encode_into(out)
    }
}

/// A scalar or list that can appear in a canonical map.
pub trait ParamValue {
    /// `true` for the type's zero value, which is never encoded.
    fn is_zero(&self) -> bool;

    /// String form used on the wire and in the signature.
    fn to_param(&self) -> String;
}

/// `skip_serializing_if` helper keeping JSON bodies aligned with the
/// canonical map.
pub fn is_zero<V: ParamValue + ?Sized>(value: &V) -> bool {
    value.is_zero()
}

impl ParamValue for str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_param(&self) -> String {
        self.clone()
    }
}

impl ParamValue for bool {
    fn is_zero(&self) -> bool {
        !*self
    }

    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn to_param(&self) -> String {
        self.to_string()
    }
}

macro_rules! integer_param {
    ($($ty:ty),*) => {$(
        impl ParamValue for $ty {
            fn is_zero(&self) -> bool {
                *self == 0
            }

            fn to_param(&self) -> String {
                self.to_string()
            }
        }
    )*};
}

integer_param!(u32, u64, i32, i64);

/// Lists render as `[a b c]`.
impl<T: fmt::Display> ParamValue for [T] {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_param(&self) -> String {
        let items: Vec<String> = self.iter().map(ToString::to_string).collect();
        format!("[{}]", items.join(" "))
    }
}

impl<T: fmt::Display> ParamValue for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_param(&self) -> String {
        self.as_slice().to_param()
    }
}

impl<V: ParamValue> ParamValue for Option<V> {
    fn is_zero(&self) -> bool {
        self.as_ref().is_none_or(ParamValue::is_zero)
    }

    fn to_param(&self) -> String {
        self.as_ref().map(ParamValue::to_param).unwrap_or_default()
    }
}
