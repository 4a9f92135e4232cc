//! Header and footer fragments.
//!
//! A [`FragmentSource`] yields raw markup by name; [`FragmentFetcher`]
//! applies the timeout and substitutes the embedded fallback on failure,
//! so callers always receive injectable markup.

mod fetch;
mod source;
#[cfg(test)]
pub(crate) mod testing;

pub use fetch::{FragmentFetcher, FragmentKind, FragmentLoadResult, Origin};
pub use source::{DirSource, FragmentSource, HttpSource, Source};
