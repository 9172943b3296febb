use crate::auth::SessionVerifier;
use crate::clock::Clock;
use crate::service::LedgerService;
use persistence::LedgerStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<LedgerService>,
    pub sessions: Arc<SessionVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn LedgerStore>, session_secret: Option<&str>) -> Self {
        Self {
            ledger: Arc::new(LedgerService::new(store)),
            sessions: Arc::new(SessionVerifier::new(session_secret)),
        }
    }

    pub fn with_clock(
        store: Arc<dyn LedgerStore>,
        clock: Arc<dyn Clock>,
        session_secret: Option<&str>,
    ) -> Self {
        Self {
            ledger: Arc::new(LedgerService::with_clock(store, clock)),
            sessions: Arc::new(SessionVerifier::new(session_secret)),
        }
    }
}
