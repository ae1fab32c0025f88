//! CLI command implementations.
//!
//! Each submodule owns one `Commands` variant:
//!
//! | Module    | Commands handled |
//! |-----------|------------------|
//! | `version` | `Version`        |
//! | `task`    | `Task`           |
//! | `form`    | `Form`           |
//! | `config`  | `Config`         |
//! | `locale`  | `Locale`         |

pub mod config;
pub mod form;
pub mod locale;
pub mod task;
pub mod version;

pub use config::cmd_config;
pub use form::cmd_form;
pub use locale::cmd_locale;
pub use task::cmd_task_watch;
pub use version::cmd_version;
