//! Admission-controlled event registration
//!
//! Order of checks for one registration:
//! 1. Category must be allow-listed; invalid names never touch the gate.
//! 2. A gate slot must be free; otherwise nothing is persisted.
//! 3. The timestamp is captured once and the event is written.
//! 4. The slot is released when the write finishes, whatever its outcome.
//!
//! The write runs on its own task which owns the permit, so an admitted
//! registration always runs to completion even if the client goes away.

use std::sync::Arc;

use event_store::{EventStore, StoreError};
use tracing::{Instrument, debug, error, info, info_span};
use types::category::AllowList;
use types::event::Event;
use uuid::Uuid;

use crate::admission::AdmissionGate;
use crate::error::AppError;

#[derive(Clone)]
pub struct IngestionService {
    allow_list: Arc<AllowList>,
    gate: AdmissionGate,
    store: Arc<dyn EventStore>,
}

impl IngestionService {
    pub fn new(allow_list: Arc<AllowList>, gate: AdmissionGate, store: Arc<dyn EventStore>) -> Self {
        Self {
            allow_list,
            gate,
            store,
        }
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// Register one event of category `name`.
    pub async fn register(&self, name: &str) -> Result<Event, AppError> {
        let category = self.allow_list.resolve(name).inspect_err(|_| {
            debug!(category = name, "Rejected undefined category");
        })?;

        let permit = self.gate.try_acquire().ok_or(AppError::CapacityExhausted)?;

        let correlation_id = Uuid::now_v7();
        let span = info_span!("register", %category, %correlation_id);
        info!(parent: &span, "Event registration begin");

        let event = Event::now(category);
        let store = Arc::clone(&self.store);
        let write = tokio::spawn(
            async move {
                let result = store.insert_event(&event).await;
                permit.release();
                result.map(|()| event)
            }
            .instrument(span.clone()),
        );

        match write.await {
            Ok(Ok(event)) => {
                info!(parent: &span, "Event successfully registered");
                Ok(event)
            }
            Ok(Err(err)) => {
                error!(parent: &span, error = %err, "Event registration failed");
                Err(err.into())
            }
            Err(join_err) => {
                error!(parent: &span, error = %join_err, "Event write task aborted");
                Err(StoreError::Task(join_err.to_string()).into())
            }
        }
    }
}
