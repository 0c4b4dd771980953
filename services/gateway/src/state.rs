use crate::admission::AdmissionGate;
use crate::aggregation::AggregationService;
use crate::ingestion::IngestionService;
use event_store::EventStore;
use std::sync::Arc;
use types::category::AllowList;

#[derive(Clone)]
pub struct AppState {
    pub ingestion: IngestionService,
    pub aggregation: AggregationService,
}

impl AppState {
    /// Wire both services around one allow-list, one gate and one store.
    pub fn new(allow_list: AllowList, capacity: usize, store: Arc<dyn EventStore>) -> Self {
        let allow_list = Arc::new(allow_list);
        Self {
            ingestion: IngestionService::new(
                Arc::clone(&allow_list),
                AdmissionGate::new(capacity),
                Arc::clone(&store),
            ),
            aggregation: AggregationService::new(allow_list, store),
        }
    }

    pub fn gate(&self) -> &AdmissionGate {
        self.ingestion.gate()
    }
}
