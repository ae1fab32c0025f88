//! Client-side observation of server-side async tasks.
//!
//! - `source`: the [`TaskStatusSource`] seam and its HTTP implementation
//! - `controller`: the [`AsyncTaskPoller`] state machine
//!
//! ```no_run
//! use std::sync::Arc;
//! use botdeck::poller::{AsyncTaskPoller, HttpTaskStatusClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = HttpTaskStatusClient::builder("http://127.0.0.1:5300").build()?;
//! let poller = AsyncTaskPoller::new(Arc::new(client));
//! poller.on_success(|| println!("done")).detach();
//! poller.start_task(42);
//! let outcome = poller.wait_for_terminal().await;
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod source;

pub use controller::{AsyncTaskPoller, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL, PollOutcome, TaskState};
pub use source::{AsyncTaskStatus, HttpTaskStatusClient, TaskRuntime, TaskStatusSource};
