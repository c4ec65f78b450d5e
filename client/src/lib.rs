pub mod api;
pub mod command;
pub mod format;
pub mod render;
pub mod view;

pub use api::{ApiError, MovieClient};
pub use view::{App, ViewState};
