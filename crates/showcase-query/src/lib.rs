//! Query cache and the query/mutation hook layer.
//!
//! The application constructs one [`QueryCache`] and one [`Hooks`] at
//! start-up and passes them down; there is no global cache. Reads are cached
//! under hierarchical keys ([`keys`]); writes ([`Mutation`]) invalidate the
//! key prefixes they make stale.
//!
//! ```rust,ignore
//! let hooks = Hooks::new(ShowcaseClient::new(config)?, QueryCache::new());
//! let page = hooks.projects(PageRequest::first(), &ProjectFilters::with_title("Test")).await;
//! ```

pub mod cache;
pub mod hooks;
pub mod keys;
pub mod mutation;
pub mod query;

pub use cache::{CacheEvent, Cached, QueryCache, QueryKey};
pub use hooks::Hooks;
pub use mutation::Mutation;
pub use query::{QueryOptions, QueryState, fetch_query};
