//! GitHub platform service implementation

use crate::auth::GitHubAuthConfig;
use crate::config::Config;
use crate::diff::DiffText;
use crate::error::{Error, Result};
use crate::platform::{PlatformService, filter_by_title_prefix, parse_pr_url};
use crate::types::{MergeMethod, MergeResult, PullRequestRef};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Search query for open PRs assigned to the authenticated user
pub const SEARCH_QUERY: &str = "is:pr is:open assignee:@me";

const API_VERSION: &str = "2022-11-28";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";
const USER_AGENT: &str = concat!("multimerge/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    title: String,
    html_url: String,
}

#[derive(Deserialize)]
struct CurrentUser {
    login: String,
}

#[derive(Serialize)]
struct ReviewPayload<'a> {
    event: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct MergePayload {
    merge_method: MergeMethod,
}

#[derive(Deserialize)]
struct MergeResponse {
    #[serde(default)]
    merged: bool,
    sha: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl TryFrom<SearchItem> for PullRequestRef {
    type Error = Error;

    fn try_from(item: SearchItem) -> Result<Self> {
        let locator = parse_pr_url(&item.html_url)?;
        Ok(Self::from_locator(locator, &item.html_url).with_title(item.title))
    }
}

/// GitHub service using reqwest against the REST API
pub struct GitHubService {
    client: Client,
    token: String,
    api_base: String,
    review_body: String,
}

impl GitHubService {
    /// Create a new GitHub service from a resolved credential and config
    pub fn new(auth: &GitHubAuthConfig, config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::GitHubApi(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: auth.token.clone(),
            api_base: config.api_url.trim_end_matches('/').to_string(),
            review_body: config.review_body.clone(),
        })
    }

    fn request(&self, method: &Method, path: &str, accept: &str) -> RequestBuilder {
        self.client
            .request(method.clone(), format!("{}{path}", self.api_base))
            .bearer_auth(&self.token)
            .header(ACCEPT, accept)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    fn pull_path(pr: &PullRequestRef) -> String {
        format!("/repos/{}/{}/pulls/{}", pr.owner(), pr.repo(), pr.number())
    }
}

/// Turn a non-success response into an error naming the failed request.
///
/// 401 means the credential is bad; every other failure is a transport error.
async fn check_status(response: Response, method: &Method, path: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);

    debug!(%status, %method, path, "GitHub request failed");

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Auth(format!(
            "GitHub rejected the token ({method} {path}): {message}"
        )));
    }

    Err(Error::GitHubApi(format!(
        "{method} {path} failed with {status}: {message}"
    )))
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn current_user(&self) -> Result<String> {
        debug!("fetching authenticated user");
        let path = "/user";
        let response = self
            .request(&Method::GET, path, JSON_MEDIA_TYPE)
            .send()
            .await?;
        let user: CurrentUser = check_status(response, &Method::GET, path)
            .await?
            .json()
            .await?;

        debug!(login = %user.login, "authenticated");
        Ok(user.login)
    }

    async fn search_assigned_open_prs(&self, title_prefix: &str) -> Result<Vec<PullRequestRef>> {
        debug!(title_prefix, query = SEARCH_QUERY, "searching assigned PRs");
        let path = "/search/issues";
        let response = self
            .request(&Method::GET, path, JSON_MEDIA_TYPE)
            .query(&[("q", SEARCH_QUERY)])
            .send()
            .await?;
        let search: SearchResponse = check_status(response, &Method::GET, path)
            .await?
            .json()
            .await?;

        let total = search.items.len();
        let prs = search
            .items
            .into_iter()
            .map(PullRequestRef::try_from)
            .collect::<Result<Vec<_>>>()?;
        let result = filter_by_title_prefix(prs, title_prefix);

        debug!(total, kept = result.len(), "searched assigned PRs");
        Ok(result)
    }

    async fn get_diff(&self, pr: &PullRequestRef) -> Result<DiffText> {
        debug!(pr = %pr, "fetching diff");
        let path = Self::pull_path(pr);
        let response = self
            .request(&Method::GET, &path, DIFF_MEDIA_TYPE)
            .send()
            .await?;
        let bytes = check_status(response, &Method::GET, &path)
            .await?
            .bytes()
            .await?;

        debug!(pr = %pr, bytes = bytes.len(), "fetched diff");
        Ok(DiffText::new(bytes.to_vec()))
    }

    async fn approve(&self, pr: &PullRequestRef) -> Result<()> {
        debug!(pr = %pr, "approving PR");
        let path = format!("{}/reviews", Self::pull_path(pr));
        let payload = ReviewPayload {
            event: "APPROVE",
            body: &self.review_body,
        };
        let response = self
            .request(&Method::POST, &path, JSON_MEDIA_TYPE)
            .json(&payload)
            .send()
            .await?;
        check_status(response, &Method::POST, &path).await?;

        debug!(pr = %pr, "approved PR");
        Ok(())
    }

    async fn merge(&self, pr: &PullRequestRef, method: MergeMethod) -> Result<MergeResult> {
        debug!(pr = %pr, %method, "merging PR");
        let path = format!("{}/merge", Self::pull_path(pr));
        let response = self
            .request(&Method::PUT, &path, JSON_MEDIA_TYPE)
            .json(&MergePayload {
                merge_method: method,
            })
            .send()
            .await?;
        let merged: MergeResponse = check_status(response, &Method::PUT, &path)
            .await?
            .json()
            .await?;

        let merge_result = MergeResult {
            merged: merged.merged,
            sha: merged.sha,
            message: merged.message,
        };

        debug!(
            pr = %pr,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }
}
