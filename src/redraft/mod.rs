//! AI-assisted contract redrafting.
//!
//! A redraft is tracked as an asynchronous task: the client submits HTML plus
//! instructions, receives a task id immediately, polls for status, and
//! finally downloads the redrafted document as PDF.
//!
//! - `models` - task record, status enum, request/response types
//! - `tasks` - the in-memory task store owning the state machine
//! - `drafter` - the external draft generator contract and HTTP client
//! - `handlers` - the HTTP surface (`/redraft`, `/redraft/status/{id}`,
//!   `/redraft/download/{id}`)

pub mod drafter;
pub mod handlers;
pub mod models;
pub mod tasks;

pub use drafter::{ChatCompletionDrafter, DraftError, DraftGenerator, DrafterConfig};
pub use models::{RedraftTask, TaskStatus};
pub use tasks::TaskStore;
