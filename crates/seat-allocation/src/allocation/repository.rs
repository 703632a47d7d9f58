use super::domain::Roster;

/// Storage abstraction for the canonical roster so the service can be exercised in isolation.
///
/// Implementations only need whole-snapshot reads and writes; the service serializes every
/// read-modify-write cycle itself.
pub trait RosterRepository: Send + Sync {
    fn load(&self) -> Result<Roster, RepositoryError>;
    fn save(&self, roster: Roster) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("roster store unavailable: {0}")]
    Unavailable(String),
}
