//! Loading state for asynchronously fetched data.

use std::sync::Arc;

use crate::catalog::CatalogError;

/// Progress of a catalog fetch.
///
/// `Failed` is distinct from `Loading` so a front end can show an error
/// instead of spinning forever.
#[derive(Debug, Clone)]
pub enum Loadable<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The request completed.
    Loaded(T),
    /// The request failed.
    Failed(Arc<CatalogError>),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Loadable<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&CatalogError> {
        match self {
            Self::Failed(error) => Some(error.as_ref()),
            _ => None,
        }
    }

    /// Transform the loaded value, keeping every other state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Self::Idle => Loadable::Idle,
            Self::Loading => Loadable::Loading,
            Self::Loaded(value) => Loadable::Loaded(f(value)),
            Self::Failed(error) => Loadable::Failed(error),
        }
    }
}

/// A loadable value tagged with the request that produced it.
///
/// Each `begin` starts a new request; results from older requests are
/// dropped by `settle`.
#[derive(Debug)]
pub(crate) struct Slot<T> {
    request: u64,
    pub(crate) state: Loadable<T>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            request: 0,
            state: Loadable::Idle,
        }
    }
}

impl<T> Slot<T> {
    pub(crate) fn begin(&mut self) -> u64 {
        self.request += 1;
        self.state = Loadable::Loading;
        self.request
    }

    /// Store the outcome of `request`. Returns false if it was superseded.
    pub(crate) fn settle(&mut self, request: u64, state: Loadable<T>) -> bool {
        if request != self.request {
            return false;
        }
        self.state = state;
        true
    }
}
