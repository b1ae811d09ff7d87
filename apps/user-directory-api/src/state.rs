//! Application state management.

use domain_users::{InMemoryUserRepository, UserService};

use crate::config::Config;

/// Shared application state.
///
/// Cloning is cheap: the user service shares one repository behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: UserService<InMemoryUserRepository>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let repository = if config.directory.seed_demo_users {
            InMemoryUserRepository::with_demo_users()
        } else {
            InMemoryUserRepository::new()
        };
        let users =
            UserService::with_required_fields(repository, config.directory.required_fields.clone());

        Self { config, users }
    }
}
