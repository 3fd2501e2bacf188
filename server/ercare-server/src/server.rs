use std::sync::Arc;
use std::time::Instant;

use triage_engine::TriageClassifier;

use crate::auth::JwtService;
use crate::settings::ServerSettings;
use crate::storage::TriageRepository;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct ErCareServer {
    /// Validated server settings
    pub settings: Arc<ServerSettings>,
    /// Standard protocol classifier
    pub classifier: TriageClassifier,
    /// Recorded triage assessments
    pub repository: Arc<TriageRepository>,
    /// Bearer token verification
    pub jwt: JwtService,
    started_at: Instant,
}

impl ErCareServer {
    /// Create a new ERCare server instance
    pub fn new(settings: ServerSettings) -> Self {
        let jwt = JwtService::new(&settings.jwt.secret, settings.jwt.issuer.clone());
        Self {
            settings: Arc::new(settings),
            classifier: TriageClassifier::standard(),
            repository: Arc::new(TriageRepository::new()),
            jwt,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Page size for listing, clamped to the configured maximum
    pub fn list_limit(&self, requested: Option<usize>) -> usize {
        let max = self.settings.triage.list_limit;
        requested.map_or(max, |limit| limit.clamp(1, max))
    }
}
