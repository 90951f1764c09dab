//! HTML head content dispatch.
//!
//! # Responsibilities
//! - Map every route variant to the title/description/image tuple used to
//!   populate social-preview metadata
//! - Degrade to the configured default content on any failed fetch
//!
//! # Design Decisions
//! - One exhaustive `match`; no default arm, so new variants cannot be
//!   silently skipped
//! - Fetches inside a handler are sequential; there is no fan-out to hide
//! - All-or-nothing: content is either fully derived from successful
//!   fetches or the static default, never a partial mix

use crate::api::types::ApiResult;
use crate::api::ShareApiClient;
use crate::config::SocialConfig;
use crate::observability::metrics;
use crate::routing::Route;
use crate::social::text::{truncate, user_handle, MAX_TITLE_MEDIUM};

/// The display strings substituted into a page `<head>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialContent {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub url: String,
}

impl SocialContent {
    /// The fixed content every failed lookup degrades to.
    pub fn default_for(social: &SocialConfig) -> Self {
        Self {
            title: social.default_title.clone(),
            description: social.default_description.clone(),
            image_url: social.default_image_url.clone(),
            url: social.site_url.clone(),
        }
    }
}

/// Resolve the head content for a parsed route. Never fails: fetch errors
/// fall back to [`SocialContent::default_for`].
pub async fn resolve_content(
    route: &Route,
    api: &ShareApiClient,
    social: &SocialConfig,
) -> SocialContent {
    let resolved = match route {
        Route::NotFound { .. } => return SocialContent::default_for(social),

        Route::UserOverview { handle } => user_content(route, handle, api, social).await,

        Route::ProjectOverview {
            handle,
            project_slug,
        } => project_content(route, handle, project_slug, None, api, social).await,

        Route::ProjectCode {
            handle,
            project_slug,
            ..
        } => project_content(route, handle, project_slug, Some("Code"), api, social).await,

        Route::ProjectTickets {
            handle,
            project_slug,
        } => project_content(route, handle, project_slug, Some("Tickets"), api, social).await,

        Route::ProjectContributions {
            handle,
            project_slug,
        } => {
            project_content(
                route,
                handle,
                project_slug,
                Some("Contributions"),
                api,
                social,
            )
            .await
        }

        Route::ProjectReleases {
            handle,
            project_slug,
        } => project_content(route, handle, project_slug, Some("Releases"), api, social).await,

        Route::ProjectBranches {
            handle,
            project_slug,
        } => project_content(route, handle, project_slug, Some("Branches"), api, social).await,

        Route::ProjectTicket {
            handle,
            project_slug,
            number,
        } => ticket_content(route, handle, project_slug, *number, api, social).await,

        Route::ProjectContribution {
            handle,
            project_slug,
            number,
        } => contribution_content(route, handle, project_slug, *number, api, social).await,

        Route::ProjectRelease {
            handle,
            project_slug,
            version,
        } => release_content(route, handle, project_slug, version, api, social).await,

        Route::ProjectDefinition {
            handle,
            project_slug,
            branch_ref,
            kind,
            fqn,
        } => {
            definition_content(
                route,
                handle,
                project_slug,
                branch_ref,
                *kind,
                fqn,
                api,
                social,
            )
            .await
        }
    };

    match resolved {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(route = %route, error = %err, "content lookup failed, using defaults");
            metrics::api_failure("meta");
            metrics::content_fallback("meta");
            SocialContent::default_for(social)
        }
    }
}

/// Title with the site-name suffix, e.g. `@alice/mylib | Share`.
fn titled(social: &SocialConfig, base: &str) -> String {
    format!("{base} | {}", social.site_name)
}

fn content_for(
    social: &SocialConfig,
    route: &Route,
    title: String,
    description: String,
) -> SocialContent {
    let path = route.to_string();
    SocialContent {
        title,
        description: if description.is_empty() {
            social.default_description.clone()
        } else {
            description
        },
        image_url: format!(
            "{}/social-image?path={}",
            social.site_url,
            encode_query_value(&path)
        ),
        url: format!("{}{path}", social.site_url),
    }
}

async fn user_content(
    route: &Route,
    handle: &str,
    api: &ShareApiClient,
    social: &SocialConfig,
) -> ApiResult<SocialContent> {
    let user = api.get_user(handle).await?;
    let display_handle = user_handle(Some(&user.handle));
    let name_and_handle = match &user.name {
        Some(name) => format!("{name} {display_handle}"),
        None => display_handle,
    };
    Ok(content_for(
        social,
        route,
        titled(social, &name_and_handle),
        user.bio.unwrap_or_default(),
    ))
}

async fn project_content(
    route: &Route,
    handle: &str,
    project_slug: &str,
    page: Option<&str>,
    api: &ShareApiClient,
    social: &SocialConfig,
) -> ApiResult<SocialContent> {
    let project = api.get_project(handle, project_slug).await?;
    let project_ref = format!("{handle}/{project_slug}");
    let title = match page {
        Some(page) => titled(social, &format!("{page} · {project_ref}")),
        None => titled(social, &project_ref),
    };
    Ok(content_for(social, route, title, project.summary))
}

async fn ticket_content(
    route: &Route,
    handle: &str,
    project_slug: &str,
    number: u64,
    api: &ShareApiClient,
    social: &SocialConfig,
) -> ApiResult<SocialContent> {
    let project = api.get_project(handle, project_slug).await?;
    let ticket = api.get_ticket(handle, project_slug, number).await?;
    let title = titled(
        social,
        &format!(
            "{} · {handle}/{project_slug}",
            truncate(MAX_TITLE_MEDIUM, &ticket.title)
        ),
    );
    let description = if ticket.description.is_empty() {
        project.summary
    } else {
        ticket.description
    };
    Ok(content_for(social, route, title, description))
}

async fn contribution_content(
    route: &Route,
    handle: &str,
    project_slug: &str,
    number: u64,
    api: &ShareApiClient,
    social: &SocialConfig,
) -> ApiResult<SocialContent> {
    let project = api.get_project(handle, project_slug).await?;
    let contribution = api.get_contribution(handle, project_slug, number).await?;
    let title = titled(
        social,
        &format!(
            "{} · {handle}/{project_slug}",
            truncate(MAX_TITLE_MEDIUM, &contribution.title)
        ),
    );
    let description = contribution.description.unwrap_or(project.summary);
    Ok(content_for(social, route, title, description))
}

async fn release_content(
    route: &Route,
    handle: &str,
    project_slug: &str,
    version: &str,
    api: &ShareApiClient,
    social: &SocialConfig,
) -> ApiResult<SocialContent> {
    let project = api.get_project(handle, project_slug).await?;
    let _release = api.get_release(handle, project_slug, version).await?;
    let title = titled(
        social,
        &format!("Release {version} · {handle}/{project_slug}"),
    );
    Ok(content_for(social, route, title, project.summary))
}

#[allow(clippy::too_many_arguments)]
async fn definition_content(
    route: &Route,
    handle: &str,
    project_slug: &str,
    branch_ref: &crate::routing::BranchRef,
    kind: crate::routing::DefinitionKind,
    fqn: &[String],
    api: &ShareApiClient,
    social: &SocialConfig,
) -> ApiResult<SocialContent> {
    use crate::api::types::{doc_excerpt, syntax_text};
    use crate::routing::DefinitionKind;

    let project = api.get_project(handle, project_slug).await?;
    let definitions = api
        .get_definitions(handle, project_slug, branch_ref, fqn)
        .await?;

    let (name, summary) = match kind {
        DefinitionKind::Term => definitions
            .term_definitions
            .values()
            .next()
            .map(|term| {
                let docs = term
                    .term_docs
                    .first()
                    .and_then(|(_, _, doc)| doc_excerpt(doc, 24));
                (
                    term.best_term_name.clone(),
                    docs.unwrap_or_else(|| syntax_text(&term.signature)),
                )
            })
            .unwrap_or((fqn.join("."), project.summary)),
        DefinitionKind::Type => definitions
            .type_definitions
            .values()
            .next()
            .map(|ty| {
                let docs = ty.type_docs.first().and_then(|doc| doc_excerpt(doc, 24));
                (ty.best_type_name.clone(), docs.unwrap_or_default())
            })
            .unwrap_or((fqn.join("."), project.summary)),
    };

    let title = titled(
        social,
        &format!(
            "{} · {handle}/{project_slug}/{branch_ref}",
            truncate(MAX_TITLE_MEDIUM, &name)
        ),
    );
    Ok(content_for(social, route, title, summary))
}

/// Percent-encode a path for use as a query-parameter value. Only the
/// characters that would terminate or corrupt the parameter are escaped;
/// path characters stay readable, as the site's own links do.
fn encode_query_value(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '=' => out.push_str("%3D"),
            '+' => out.push_str("%2B"),
            ' ' => out.push_str("%20"),
            _ => out.push(c),
        }
    }
    out
}
