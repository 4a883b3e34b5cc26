//! Lazily fetched cross-entity relations.

/// A relation cell: either not yet successfully fetched, or resolved and
/// cached for the lifetime of the owning entity.
///
/// Unresolved is distinct from "resolved to an empty list". Once resolved, a
/// relation is never refreshed or invalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation<T> {
    value: Option<T>,
}

impl<T> Relation<T> {
    #[must_use]
    pub const fn unresolved() -> Self {
        Self { value: None }
    }

    #[must_use]
    pub const fn resolved(value: T) -> Self {
        Self { value: Some(value) }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.value.is_some()
    }

    /// The cached value, without fetching.
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Return the cached value, or run `fetch` once and cache its result.
    ///
    /// A failed fetch leaves the relation unresolved, so the next call tries again.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `fetch`.
    pub fn resolve_with<E, F>(&mut self, fetch: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let value = match self.value.take() {
            Some(value) => value,
            None => fetch()?,
        };
        Ok(self.value.insert(value))
    }
}

impl<T> Default for Relation<T> {
    fn default() -> Self {
        Self::unresolved()
    }
}
