//! Update checker
//!
//! Fetches the release list, compares the newest tag against the running
//! version, and hands newer releases to the UI thread.

mod error;
mod fetcher;
mod release;
mod single_flight;
mod version;
mod workflow;

#[cfg(test)]
mod test_server;

pub use fetcher::{ReleaseFetcher, ReleaseSource};
#[cfg(test)]
pub use release::ReleaseDescriptor;
pub use single_flight::SingleFlight;
pub use version::is_newer;
pub use workflow::{CheckOutcome, UpdateCheck, UpdatePrompt};
