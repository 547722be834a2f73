//! OpenFEMA HTTP client and exhaustive pagination driver.
//!
//! [`fetch_all`] drives a [`PageSource`] until the remote result set is
//! exhausted. The live source is [`OpenFema`]; the trait seam exists so
//! the loop's termination and failure semantics are testable against
//! scripted sources.

mod error;
mod fetch;
mod openfema;

pub use error::FetchError;
pub use fetch::{Page, PageRequest, PageSource, fetch_all};
pub use openfema::{API_BASE, OpenFema};
