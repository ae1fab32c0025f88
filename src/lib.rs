pub mod config;
pub mod errors;
pub mod events;
pub mod form;
pub mod i18n;
pub mod logging;
pub mod poller;
pub mod version;
