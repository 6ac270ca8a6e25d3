//! Client for the user-management endpoints of the legacy GitHub API v2.

mod env;
pub mod transport;
pub mod users;

pub use transport::{DEFAULT_BASE_URL, HttpTransport, Transport, TransportError};
pub use users::{Repo, RepoList, User, UserClient, UserList};

#[cfg(feature = "mock")]
pub use transport::MockTransport;
