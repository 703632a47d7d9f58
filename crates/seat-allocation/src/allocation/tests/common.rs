use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::allocation::domain::{Applicant, Facility, Roster};
use crate::allocation::repository::{RepositoryError, RosterRepository};
use crate::allocation::{allocation_router, AllocationConfig, AllocationService};

#[derive(Default)]
pub(super) struct MemoryRepository {
    roster: Mutex<Roster>,
    saves: Mutex<usize>,
}

impl MemoryRepository {
    pub(super) fn with_roster(roster: Roster) -> Self {
        Self {
            roster: Mutex::new(roster),
            saves: Mutex::new(0),
        }
    }

    pub(super) fn current(&self) -> Roster {
        self.roster.lock().expect("roster mutex poisoned").clone()
    }

    pub(super) fn saves(&self) -> usize {
        *self.saves.lock().expect("save counter poisoned")
    }
}

impl RosterRepository for MemoryRepository {
    fn load(&self) -> Result<Roster, RepositoryError> {
        Ok(self.current())
    }

    fn save(&self, roster: Roster) -> Result<(), RepositoryError> {
        *self.roster.lock().expect("roster mutex poisoned") = roster;
        *self.saves.lock().expect("save counter poisoned") += 1;
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl RosterRepository for UnavailableRepository {
    fn load(&self) -> Result<Roster, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save(&self, _roster: Roster) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    Arc<AllocationService<MemoryRepository>>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::with_roster(Roster::sample()));
    let service = Arc::new(AllocationService::new(
        repository.clone(),
        AllocationConfig::default(),
    ));
    (service, repository)
}

pub(super) fn allocation_router_with_service(
    service: Arc<AllocationService<MemoryRepository>>,
) -> axum::Router {
    allocation_router(service)
}

pub(super) fn contested_roster() -> Roster {
    Roster::new(
        vec![
            Facility::new("north", "North Hall", "North", 1),
            Facility::new("south", "South Hall", "South", 1),
        ],
        vec![
            Applicant::new("late", "Late Riser", 7).with_preferences(["north", "south"]),
            Applicant::new("early", "Early Bird", 2).with_preferences(["north"]),
            Applicant::new("middle", "Middle Child", 4).with_preferences(["north"]),
        ],
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
