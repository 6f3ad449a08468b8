use serde::{Deserialize, Serialize};

/// Provenance of a record, used by reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Written locally and not yet confirmed by the remote endpoint.
    #[default]
    User,
    /// Mirrors what the remote endpoint holds.
    Cloud,
}
