//! Searching users, getting user information and managing authenticated
//! user account information.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::transport::{Transport, TransportError};

type Result<T> = std::result::Result<T, TransportError>;

/// A user record as returned by the API, kept as an opaque JSON object.
pub type User = Map<String, Value>;
pub type UserList = Vec<User>;

/// A repository record, equally opaque.
pub type Repo = Map<String, Value>;
pub type RepoList = Vec<Repo>;

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Debug, Deserialize)]
struct UsersEnvelope {
    users: UserList,
}

#[derive(Debug, Deserialize)]
struct RepositoriesEnvelope {
    repositories: RepoList,
}

#[derive(Debug)]
pub struct UserClient<T> {
    transport: T,
}

impl<T: Transport> UserClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Search users by username.
    pub async fn search(&self, username: &str) -> Result<UserList> {
        let response = self
            .transport
            .get(&format!("user/search/{username}"))
            .await?;

        Ok(serde_json::from_value::<UsersEnvelope>(response)?.users)
    }

    /// Get extended information about a user by its username.
    pub async fn show(&self, username: &str) -> Result<User> {
        let response = self.transport.get(&format!("user/show/{username}")).await?;

        Ok(serde_json::from_value::<UserEnvelope>(response)?.user)
    }

    /// Update user information. Requires authentication.
    ///
    /// The remote API accepts the `name`, `email`, `blog`, `company` and
    /// `location` attributes; other keys are passed through for the server
    /// to reject.
    pub async fn update(&self, username: &str, attributes: Map<String, Value>) -> Result<User> {
        let body = json!({ "values": attributes });
        let response = self
            .transport
            .post(&format!("user/show/{username}"), Some(body))
            .await?;

        Ok(serde_json::from_value::<UserEnvelope>(response)?.user)
    }

    /// The users that `username` is following.
    pub async fn following(&self, username: &str) -> Result<UserList> {
        let response = self
            .transport
            .get(&format!("user/show/{username}/following"))
            .await?;

        Ok(serde_json::from_value::<UsersEnvelope>(response)?.users)
    }

    /// The users following `username`.
    pub async fn followers(&self, username: &str) -> Result<UserList> {
        let response = self
            .transport
            .get(&format!("user/show/{username}/followers"))
            .await?;

        Ok(serde_json::from_value::<UsersEnvelope>(response)?.users)
    }

    /// Make the authenticated user follow `username`. Requires
    /// authentication.
    pub async fn follow(&self, username: &str) -> Result<UserList> {
        let response = self
            .transport
            .post(&format!("user/follow/{username}"), None)
            .await?;

        Ok(serde_json::from_value::<UsersEnvelope>(response)?.users)
    }

    /// Make the authenticated user unfollow `username`. Requires
    /// authentication.
    pub async fn unfollow(&self, username: &str) -> Result<UserList> {
        let response = self
            .transport
            .post(&format!("user/unfollow/{username}"), None)
            .await?;

        Ok(serde_json::from_value::<UsersEnvelope>(response)?.users)
    }

    /// The repositories that `username` is watching.
    pub async fn watched_repos(&self, username: &str) -> Result<RepoList> {
        let response = self
            .transport
            .get(&format!("repos/watched/{username}"))
            .await?;

        Ok(serde_json::from_value::<RepositoriesEnvelope>(response)?.repositories)
    }
}
