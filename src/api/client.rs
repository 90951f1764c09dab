//! REST client for the code-hosting API.
//!
//! # Responsibilities
//! - Build endpoint URLs from handle / project slug / sub-resource
//! - Issue GET requests with an explicit timeout
//! - Deserialize JSON bodies into wire types
//! - Surface non-2xx answers as errors carrying status and body
//!
//! # Design Decisions
//! - No retries and no backoff; callers degrade to default content instead
//! - The user-marker prefix is stripped from handles on the wire
//! - A `/` inside a branch ref is percent-encoded, matching how the site
//!   links to contributor branches

use std::time::Duration;

use crate::api::types::{
    ApiContribution, ApiDefinitions, ApiError, ApiProject, ApiRelease, ApiResult, ApiTicket,
    ApiUser,
};
use crate::routing::route::{BranchRef, USER_MARKER};

/// Typed client for the remote API. Cheap to clone; the underlying
/// connection pool is shared.
#[derive(Debug, Clone)]
pub struct ShareApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ShareApiClient {
    /// Create a client against `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET /users/{handle}`
    pub async fn get_user(&self, handle: &str) -> ApiResult<ApiUser> {
        self.get_json(self.user_url(handle)).await
    }

    /// `GET /users/{handle}/projects/{slug}`
    pub async fn get_project(&self, handle: &str, project_slug: &str) -> ApiResult<ApiProject> {
        self.get_json(self.project_url(handle, project_slug, "")).await
    }

    /// `GET /users/{handle}/projects/{slug}/tickets/{n}`
    pub async fn get_ticket(
        &self,
        handle: &str,
        project_slug: &str,
        number: u64,
    ) -> ApiResult<ApiTicket> {
        self.get_json(self.project_url(handle, project_slug, &format!("/tickets/{number}")))
            .await
    }

    /// `GET /users/{handle}/projects/{slug}/contributions/{n}`
    pub async fn get_contribution(
        &self,
        handle: &str,
        project_slug: &str,
        number: u64,
    ) -> ApiResult<ApiContribution> {
        self.get_json(self.project_url(
            handle,
            project_slug,
            &format!("/contributions/{number}"),
        ))
        .await
    }

    /// `GET /users/{handle}/projects/{slug}/releases/{version}`
    pub async fn get_release(
        &self,
        handle: &str,
        project_slug: &str,
        version: &str,
    ) -> ApiResult<ApiRelease> {
        self.get_json(self.project_url(handle, project_slug, &format!("/releases/{version}")))
            .await
    }

    /// `GET .../{branches/{ref} | releases/{version}}/definitions/by-name/{dotted.name}`
    pub async fn get_definitions(
        &self,
        handle: &str,
        project_slug: &str,
        branch_ref: &BranchRef,
        fqn: &[String],
    ) -> ApiResult<ApiDefinitions> {
        self.get_json(self.definitions_url(handle, project_slug, branch_ref, fqn))
            .await
    }

    fn user_url(&self, handle: &str) -> String {
        format!("{}/users/{}", self.base_url, api_handle(handle))
    }

    fn project_url(&self, handle: &str, project_slug: &str, path: &str) -> String {
        format!(
            "{}/users/{}/projects/{}{}",
            self.base_url,
            api_handle(handle),
            project_slug,
            path
        )
    }

    fn definitions_url(
        &self,
        handle: &str,
        project_slug: &str,
        branch_ref: &BranchRef,
        fqn: &[String],
    ) -> String {
        // A release ref is already `releases/{version}`; anything else is
        // addressed under `branches/` with its inner slash encoded.
        let branch_part = if branch_ref.is_release() {
            branch_ref.as_str().to_string()
        } else {
            format!("branches/{}", branch_ref.as_str().replace('/', "%2F"))
        };
        self.project_url(
            handle,
            project_slug,
            &format!("/{}/definitions/by-name/{}", branch_part, fqn.join(".")),
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> ApiResult<T> {
        tracing::debug!(%url, "API fetch");
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        Ok(response.json().await?)
    }
}

/// Handles travel without the user marker on the wire.
fn api_handle(handle: &str) -> &str {
    handle.trim_start_matches(USER_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ShareApiClient {
        ShareApiClient::new("https://api.share.example/", Duration::from_secs(30)).unwrap()
    }

    #[test]
    fn test_user_url_strips_marker() {
        assert_eq!(
            client().user_url("@alice"),
            "https://api.share.example/users/alice"
        );
    }

    #[test]
    fn test_project_url() {
        assert_eq!(
            client().project_url("@alice", "mylib", "/tickets/42"),
            "https://api.share.example/users/alice/projects/mylib/tickets/42"
        );
    }

    #[test]
    fn test_definitions_url_for_branch_encodes_slash() {
        let url = client().definitions_url(
            "@alice",
            "mylib",
            &BranchRef::new("@bob/feature"),
            &["base".to_string(), "List".to_string(), "map".to_string()],
        );
        assert_eq!(
            url,
            "https://api.share.example/users/alice/projects/mylib/branches/@bob%2Ffeature/definitions/by-name/base.List.map"
        );
    }

    #[test]
    fn test_definitions_url_for_release() {
        let url = client().definitions_url(
            "@alice",
            "mylib",
            &BranchRef::new("releases/1.2.3"),
            &["Foo".to_string(), "Bar".to_string()],
        );
        assert_eq!(
            url,
            "https://api.share.example/users/alice/projects/mylib/releases/1.2.3/definitions/by-name/Foo.Bar"
        );
    }
}
