//! Session orchestration.
//!
//! - `Session`: The orchestrator (board, gates, resolution, completion)
//! - `SessionState` / `SessionPhase`: Per-session bookkeeping
//! - `Scheduler`: Virtual-clock task queue with epoch tagging
//! - `SessionEvent`: Signals produced for the host

pub mod events;
pub mod orchestrator;
pub mod scheduler;
pub mod state;

pub use events::SessionEvent;
pub use orchestrator::{CardSnapshot, IgnoreReason, Session, SessionSnapshot, TapOutcome};
pub use scheduler::{ScheduledTask, Scheduler, Task, TaskId};
pub use state::{SessionPhase, SessionState};
