pub mod controller;
pub mod record;
pub mod remote;
pub mod snapshot;
pub mod state;

pub use controller::{Collaborators, SessionController};
pub use record::{History, TrialRecord};
pub use remote::{NoteField, RemoteStep, RemoteViewingSession};
pub use snapshot::{FeedbackView, LabSnapshot, RemoteViewingView, TileView};
pub use state::{Screen, SessionState, TrialOutcome};
