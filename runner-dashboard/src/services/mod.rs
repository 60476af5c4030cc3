pub mod gitlab_client;
pub mod metrics;

pub use gitlab_client::{GitLabClient, TokenRevoker};
