use metrics_exporter_prometheus::PrometheusHandle;
use seat_allocation::allocation::domain::Roster;
use seat_allocation::allocation::{RepositoryError, RosterImporter, RosterRepository};
use seat_allocation::config::AppConfig;
use seat_allocation::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local roster store backing the HTTP service.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRosterRepository {
    roster: Arc<Mutex<Roster>>,
}

impl InMemoryRosterRepository {
    pub(crate) fn new(roster: Roster) -> Self {
        Self {
            roster: Arc::new(Mutex::new(roster)),
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, Roster>, RepositoryError> {
        self.roster
            .lock()
            .map_err(|_| RepositoryError::Unavailable("roster store poisoned".to_string()))
    }
}

impl RosterRepository for InMemoryRosterRepository {
    fn load(&self) -> Result<Roster, RepositoryError> {
        Ok(self.guard()?.clone())
    }

    fn save(&self, roster: Roster) -> Result<(), RepositoryError> {
        *self.guard()? = roster;
        Ok(())
    }
}

/// Roster the server starts from: the configured JSON snapshot, or the bundled sample.
pub(crate) fn seed_roster(config: &AppConfig) -> Result<Roster, AppError> {
    let roster = match &config.roster_path {
        Some(path) => {
            let roster = RosterImporter::from_json_path(path)?;
            info!(path = %path.display(), "seeded roster from snapshot");
            roster
        }
        None => {
            info!("seeded roster from bundled sample");
            Roster::sample()
        }
    };
    Ok(roster)
}
