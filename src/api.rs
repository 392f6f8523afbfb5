//! Async mock API facade.
//!
//! [`MockApi`] is the in-process stand-in for one backend collection
//! endpoint: it owns a shared [`MemoryStore`], a [`QueryEngine`] and a
//! configurable [`Latency`], and answers every call with a response
//! [`Envelope`]. Absent records come back as 404 envelopes, duplicate
//! creates as 409; the calls themselves never fail.

use crate::pipeline::{self, QueryEngine};
use crate::store::{id_display, MemoryStore};
use rand::Rng;
use standin_core::{Envelope, FieldValue, Page, Query, Record};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Simulated request latency.
///
/// `wait` is the facade's only suspension point; dropping the future
/// cancels the pending delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Latency {
    /// Respond immediately
    #[default]
    None,
    /// Sleep a fixed number of milliseconds
    Fixed(u64),
    /// Sleep a uniformly random duration between the two bounds
    Jitter(u64, u64),
}

impl Latency {
    /// Sleep for the configured delay without blocking other tasks.
    pub async fn wait(&self) {
        let millis = match *self {
            Self::None => return,
            Self::Fixed(ms) => ms,
            Self::Jitter(a, b) => {
                let (min, max) = if a <= b { (a, b) } else { (b, a) };
                rand::rng().random_range(min..=max)
            }
        };
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

/// Async facade over one record collection.
///
/// The store sits behind an `RwLock` so concurrent callers can share
/// one facade; reads take a snapshot, writes take the write lock.
pub struct MockApi {
    store: Arc<RwLock<MemoryStore>>,
    engine: QueryEngine,
    latency: Latency,
}

impl MockApi {
    /// Wrap a store with the collection's query engine.
    pub fn new(store: MemoryStore, engine: QueryEngine) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            engine,
            latency: Latency::None,
        }
    }

    /// Configure the simulated latency (default: none).
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> Arc<RwLock<MemoryStore>> {
        Arc::clone(&self.store)
    }

    /// Run a list query and return the requested page.
    pub async fn list(&self, query: &Query) -> Envelope<Page<Record>> {
        self.latency.wait().await;
        let snapshot = self.store.read().await.records().to_vec();
        let page = self.engine.run(&snapshot, query);
        tracing::debug!(total = page.total, page = page.page, "list query");
        Envelope::ok(page)
    }

    /// Fetch one record by id; 404 envelope when absent.
    pub async fn get(&self, id: &FieldValue) -> Envelope<Record> {
        self.latency.wait().await;
        let store = self.store.read().await;
        match store.get(id) {
            Some(record) => Envelope::ok(record.clone()),
            None => {
                tracing::debug!(id = %id_display(id), "get missed");
                Envelope::error(404, format!("record not found: {}", id_display(id)))
            }
        }
    }

    /// Insert a record; 409 envelope on a duplicate id.
    pub async fn create(&self, record: Record) -> Envelope<Record> {
        self.latency.wait().await;
        let mut store = self.store.write().await;
        let echo = record.clone();
        match store.insert(record) {
            Ok(()) => {
                tracing::info!(id = %id_display(&echo.id), "record created");
                Envelope::ok(echo)
            }
            Err(err) => Envelope::error(409, err.to_string()),
        }
    }

    /// Merge fields into a record; 404 envelope when absent.
    pub async fn update(
        &self,
        id: &FieldValue,
        fields: HashMap<String, FieldValue>,
    ) -> Envelope<Record> {
        self.latency.wait().await;
        let mut store = self.store.write().await;
        match store.update(id, fields) {
            Some(record) => {
                tracing::info!(id = %id_display(id), "record updated");
                Envelope::ok(record.clone())
            }
            None => Envelope::error(404, format!("record not found: {}", id_display(id))),
        }
    }

    /// Remove a record; 404 envelope when absent.
    pub async fn delete(&self, id: &FieldValue) -> Envelope<()> {
        self.latency.wait().await;
        let mut store = self.store.write().await;
        match store.remove(id) {
            Some(_) => {
                tracing::info!(id = %id_display(id), "record deleted");
                Envelope::ok(())
            }
            None => Envelope::error(404, format!("record not found: {}", id_display(id))),
        }
    }

    /// Count records per distinct value of `field`.
    pub async fn stats(&self, field: &str) -> Envelope<BTreeMap<String, u64>> {
        self.latency.wait().await;
        let store = self.store.read().await;
        Envelope::ok(pipeline::tally(store.records(), field))
    }
}
