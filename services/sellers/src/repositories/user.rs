//! Static in-memory user store

use std::sync::Arc;

use tracing::debug;

use crate::models::{Role, User};

/// User repository backed by a fixed list of users
#[derive(Clone)]
pub struct UserRepository {
    users: Arc<[User]>,
}

impl UserRepository {
    /// Create a user repository over the given users
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: users.into(),
        }
    }

    /// Find a user by exact username and password
    pub fn find(&self, username: &str, password: &str) -> Option<User> {
        debug!("Finding user by credentials: {}", username);

        self.users
            .iter()
            .find(|user| user.username == username && user.password == password)
            .cloned()
    }
}

impl Default for UserRepository {
    fn default() -> Self {
        Self::new(vec![
            User::new("alice", "alice123", Role::Manager),
            User::new("bob", "bob123", Role::Operator),
        ])
    }
}
