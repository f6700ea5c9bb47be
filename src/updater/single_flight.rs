//! At most one release fetch in flight
//!
//! Callers that arrive while a fetch is running await that fetch and get a
//! clone of its result instead of being turned away.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};

use super::fetcher::ReleaseSource;
use super::release::ReleaseDescriptor;

type InFlight = Shared<BoxFuture<'static, Option<ReleaseDescriptor>>>;

pub struct SingleFlight<S> {
    source: Arc<S>,
    in_flight: Mutex<Option<InFlight>>,
}

impl<S: ReleaseSource + 'static> SingleFlight<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            in_flight: Mutex::new(None),
        }
    }

    /// Join the running fetch, or start one if none is running
    pub async fn fetch(&self) -> Option<ReleaseDescriptor> {
        let flight = {
            let mut slot = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
            match slot.as_ref() {
                Some(flight) => {
                    tracing::debug!("Joining in-flight release fetch");
                    flight.clone()
                }
                None => {
                    let source = self.source.clone();
                    let flight = async move { source.latest_release().await }
                        .boxed()
                        .shared();
                    *slot = Some(flight.clone());
                    flight
                }
            }
        };

        let result = flight.clone().await;

        let mut slot = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if slot.as_ref().is_some_and(|current| current.ptr_eq(&flight)) {
            *slot = None;
        }

        result
    }
}

#[async_trait]
impl<S: ReleaseSource + 'static> ReleaseSource for SingleFlight<S> {
    async fn latest_release(&self) -> Option<ReleaseDescriptor> {
        self.fetch().await
    }
}
