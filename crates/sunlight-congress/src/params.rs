//! Query parameter encoding.
//!
//! Filter objects (legislators, committees, districts) declare a static table
//! of `(parameter name, accessor)` pairs. Encoding walks that table in
//! declaration order and emits one pair per non-empty field. Passing several
//! filter objects repeats keys; the service reads identically-named keys as OR
//! and distinct keys as AND.
//!
//! ```ignore
//! let filters = [
//!     Legislator { state: "MA".into(), title: "Sen".into(), ..Default::default() },
//!     Legislator { state: "CA".into(), ..Default::default() },
//! ];
//! let query = encode(&[&FilterSet(&filters)]);
//! assert_eq!(query.values("state"), ["MA", "CA"]);
//! ```

use std::fmt::Display;

/// Reads one string field of a filter object.
pub type FieldAccessor<T> = fn(&T) -> &str;

/// An entity type usable as a query filter.
pub trait Filter: Sized + 'static {
    /// Filterable fields in declaration order.
    const FIELDS: &'static [(&'static str, FieldAccessor<Self>)];

    /// Append every non-empty field to `query`.
    fn encode_into(&self, query: &mut QueryParams) {
        for (name, accessor) in Self::FIELDS {
            let value = accessor(self);
            if !value.is_empty() {
                query.push(*name, value);
            }
        }
    }
}

/// Anything that contributes key/value pairs to a request.
pub trait ParamSource {
    fn append_to(&self, query: &mut QueryParams);
}

/// Several filter objects of one type, encoded one after another.
#[derive(Debug, Clone, Copy)]
pub struct FilterSet<'a, T>(pub &'a [T]);

impl<T: Filter> ParamSource for FilterSet<'_, T> {
    fn append_to(&self, query: &mut QueryParams) {
        for filter in self.0 {
            filter.encode_into(query);
        }
    }
}

/// Ordered, multi-valued list of query pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// All values recorded for `key`, in emission order.
    #[must_use]
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Insertion-ordered scalar parameters that are not entity-shaped
/// (zip codes, coordinates, thresholds, flags).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(&'static str, String)>,
}

impl Params {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a parameter. Values are rendered with `Display`; empty values are kept.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Display) -> Self {
        self.entries.push((key, value.to_string()));
        self
    }
}

impl ParamSource for Params {
    fn append_to(&self, query: &mut QueryParams) {
        for (key, value) in &self.entries {
            query.push(*key, value.as_str());
        }
    }
}

/// Encode every source in order into one flat query.
#[must_use]
pub fn encode(sources: &[&dyn ParamSource]) -> QueryParams {
    let mut query = QueryParams::new();
    for source in sources {
        source.append_to(&mut query);
    }
    query
}
