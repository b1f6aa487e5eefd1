//! Two-step setup wizard
//!
//! Step 1 exchanges credentials for a token, step 2 decodes a spreadsheet and
//! creates its data extensions in batches.

pub mod app;
pub mod backend;
pub mod msg;
pub mod runner;
pub mod state;
pub mod types;

pub use app::{WizardApp, update};
pub use backend::{DirectBackend, ProxyBackend, WizardBackend};
pub use msg::{Command, ConnectOutcome, Msg};
pub use runner::run_wizard;
pub use state::State;
pub use types::{STEPS, WizardStep};
