//! The interpreter's view of the simulated world.

use crate::fetcher::Fetcher;

/// An ordered fetcher registry. Registration order is semantically
/// significant: dispatch scans linearly and the first match wins.
pub struct FetcherRegistry<W> {
    fetchers: Vec<Fetcher<W>>,
}

impl<W> FetcherRegistry<W> {
    pub fn new(fetchers: Vec<Fetcher<W>>) -> Self {
        FetcherRegistry { fetchers }
    }

    pub fn fetchers(&self) -> &[Fetcher<W>] {
        &self.fetchers
    }
}

/// Implemented by the opaque world object threaded through all core calls.
///
/// The core never mutates the world in place; commands return a new one.
/// The only requirement beyond that convention is access to the fetcher
/// registry used for recursive core-value resolution. Build the registry
/// once when constructing the world and hold it as a field — descriptors
/// are stateless, so it never changes afterwards.
pub trait ScenarioWorld: Sized + Sync {
    fn fetcher_registry(&self) -> &FetcherRegistry<Self>;
}
