pub mod api;
pub mod config;
pub mod models;
pub mod session;
pub mod tasklist;
pub mod utils;
pub mod cli;
pub mod tui;

pub use api::ApiClient;
pub use config::Config;
pub use models::{Credentials, Task};
pub use session::SessionManager;
pub use tasklist::TaskList;
pub use utils::Profile;
