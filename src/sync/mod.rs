//! Reconciliation between the local store and the remote endpoint.

mod tracker;
mod worker;

pub use tracker::{
    DeleteOutcome, ImportOutcome, MarkOutcome, PunchKind, RefreshReport, RefreshTicket,
    SaveOutcome, SyncReport, Tracker,
};
pub use worker::run_periodic_sync;
