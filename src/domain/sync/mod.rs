//! Sync module - outbound mirroring of local mutations.
//!
//! Pure domain pieces of the publisher: the event records, the status
//! normalizer, the (event kind, auth mode) endpoint table and the outcome
//! taxonomy. The HTTP side lives in `adapters::sync`.

mod events;
mod outcome;
mod route;
mod status;

pub use events::{
    AvatarUpdated, SyncEvent, SyncEventKind, TicketCreated, TicketDeleted, TicketStatusChanged,
    TicketUpdated, UserRegistered,
};
pub use outcome::{SyncFailure, SyncOutcome};
pub use route::{AuthMode, SyncMethod, SyncRoute};
pub use status::SyncStatus;
