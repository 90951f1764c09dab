//! Social card dispatch.
//!
//! # Responsibilities
//! - Map every route variant to a visual card description
//! - Fetch the entities each card needs (at most two, sequentially)
//! - Degrade to the fallback card on any failed fetch
//!
//! # Design Decisions
//! - Card building is pure: fetch first, then hand plain data to a builder,
//!   so builders are unit-testable without a network
//! - The card is a description, not pixels; encoding lives in `svg.rs`
//! - Font sizes step down with text length instead of ever clipping mid-glyph

use crate::api::types::{
    doc_excerpt, syntax_text, ApiContribution, ApiDefinitions, ApiProject, ApiRelease, ApiResult,
    ApiTicket, ApiUser,
};
use crate::api::ShareApiClient;
use crate::config::SocialConfig;
use crate::observability::metrics;
use crate::routing::{BranchRef, DefinitionKind, Route};
use crate::social::status::{contribution_status_tag, ticket_status_tag, StatusTag, TagColor};
use crate::social::text::{
    format_date, short_hash, truncate, user_handle, MAX_SHEET_TITLE, MAX_TITLE_LARGE,
    MAX_TITLE_MEDIUM,
};
use crate::social::theme::to_px;

/// Icons a card can show. Names follow the product icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Bug,
    Merge,
    Rocket,
    DocumentCode,
    PencilRuler,
    Branch,
    Conversation,
    Term,
    Type,
    Hash,
}

/// Author handle and date shown at the foot of a sheet card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Byline {
    pub author: String,
    pub date: String,
}

/// One element of a sheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetItem {
    Text(String),
    IconText { icon: Icon, text: String },
    Tag(StatusTag),
}

/// Sheet height variant; large sheets leave room for body rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSize {
    Standard,
    Large,
}

/// A white sheet over the backdrop: context rows around a big title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetCard {
    pub size: SheetSize,
    pub title: String,
    pub top_left: Vec<SheetItem>,
    pub top_right: Vec<SheetItem>,
    pub bottom_left: Vec<SheetItem>,
    pub footer: Option<Byline>,
}

/// Renderable description of a social-preview image.
#[derive(Debug, Clone, PartialEq)]
pub enum SocialCard {
    /// The configured fallback image, full bleed.
    Fallback { image_url: String },

    /// A user or org: avatar, display name, profile URL.
    Profile {
        title: String,
        title_px: f64,
        subtitle: String,
        avatar_url: Option<String>,
    },

    /// A project page: icon avatar, page title, project reference.
    IconPage {
        title: String,
        title_px: f64,
        summary: String,
        summary_px: f64,
        icon: Icon,
        count: Option<u64>,
    },

    Sheet(SheetCard),
}

/// Resolve the card for a parsed route. Never fails: fetch errors fall back
/// to [`fallback_card`].
pub async fn resolve_card(
    route: &Route,
    api: &ShareApiClient,
    social: &SocialConfig,
) -> SocialCard {
    let resolved: ApiResult<SocialCard> = match route {
        Route::NotFound { .. } => return fallback_card(social),

        Route::UserOverview { handle } => {
            api.get_user(handle).await.map(|user| profile_card(&user, social))
        }

        Route::ProjectOverview {
            handle,
            project_slug,
        } => api
            .get_project(handle, project_slug)
            .await
            .map(|project| project_overview_card(&project, handle, project_slug)),

        Route::ProjectCode {
            handle,
            project_slug,
            branch_ref,
        } => api
            .get_project(handle, project_slug)
            .await
            .map(|_| code_card(handle, project_slug, branch_ref.as_ref())),

        Route::ProjectTickets {
            handle,
            project_slug,
        } => api
            .get_project(handle, project_slug)
            .await
            .map(|project| tickets_card(&project, handle, project_slug)),

        Route::ProjectContributions {
            handle,
            project_slug,
        } => api
            .get_project(handle, project_slug)
            .await
            .map(|project| contributions_card(&project, handle, project_slug)),

        Route::ProjectReleases {
            handle,
            project_slug,
        } => api
            .get_project(handle, project_slug)
            .await
            .map(|_| releases_card(handle, project_slug)),

        Route::ProjectBranches {
            handle,
            project_slug,
        } => api
            .get_project(handle, project_slug)
            .await
            .map(|_| branches_card(handle, project_slug)),

        Route::ProjectTicket {
            handle,
            project_slug,
            number,
        } => {
            async {
                let _project = api.get_project(handle, project_slug).await?;
                let ticket = api.get_ticket(handle, project_slug, *number).await?;
                Ok(ticket_card(handle, project_slug, *number, &ticket))
            }
            .await
        }

        Route::ProjectContribution {
            handle,
            project_slug,
            number,
        } => {
            async {
                let _project = api.get_project(handle, project_slug).await?;
                let contribution = api.get_contribution(handle, project_slug, *number).await?;
                Ok(contribution_card(handle, project_slug, *number, &contribution))
            }
            .await
        }

        Route::ProjectRelease {
            handle,
            project_slug,
            version,
        } => {
            async {
                let project = api.get_project(handle, project_slug).await?;
                let release = api.get_release(handle, project_slug, version).await?;
                Ok(release_card(handle, project_slug, &project, &release))
            }
            .await
        }

        Route::ProjectDefinition {
            handle,
            project_slug,
            branch_ref,
            kind,
            fqn,
        } => {
            async {
                let _project = api.get_project(handle, project_slug).await?;
                let definitions = api
                    .get_definitions(handle, project_slug, branch_ref, fqn)
                    .await?;
                match definition_card(handle, project_slug, branch_ref, *kind, &definitions) {
                    Some(card) => Ok(card),
                    None => {
                        tracing::warn!(route = %route, "definition not found, using fallback card");
                        metrics::content_fallback("image");
                        Ok(fallback_card(social))
                    }
                }
            }
            .await
        }
    };

    match resolved {
        Ok(card) => card,
        Err(err) => {
            tracing::warn!(route = %route, error = %err, "card lookup failed, using fallback");
            metrics::api_failure("image");
            metrics::content_fallback("image");
            fallback_card(social)
        }
    }
}

/// The fixed image used whenever a card cannot be derived.
pub fn fallback_card(social: &SocialConfig) -> SocialCard {
    SocialCard::Fallback {
        image_url: social.default_image_url.clone(),
    }
}

fn project_ref(handle: &str, project_slug: &str) -> String {
    format!("{handle}/{project_slug}")
}

/// The `{handle}/{slug}` line with the shared truncation ladder: drop the
/// handle when the pair runs long, then truncate the slug itself.
fn ref_summary(handle: &str, project_slug: &str) -> String {
    let full = project_ref(handle, project_slug);
    if project_slug.chars().count() > MAX_TITLE_MEDIUM {
        truncate(MAX_TITLE_MEDIUM, project_slug)
    } else if full.chars().count() > MAX_TITLE_MEDIUM {
        project_slug.to_string()
    } else {
        full
    }
}

pub fn profile_card(user: &ApiUser, social: &SocialConfig) -> SocialCard {
    let handle = user_handle(Some(&user.handle));

    let mut title = user.name.clone().unwrap_or_else(|| handle.clone());
    let mut title_px = to_px(4.0);
    if title.chars().count() > MAX_TITLE_MEDIUM {
        title = truncate(MAX_TITLE_MEDIUM, &title);
    } else if title.chars().count() > MAX_TITLE_LARGE {
        title_px = to_px(3.0);
    }

    let mut subtitle = format!("{}/{handle}", social.site_host());
    if handle.chars().count() > MAX_TITLE_MEDIUM {
        subtitle = truncate(MAX_TITLE_MEDIUM, &handle);
    } else if subtitle.chars().count() > MAX_TITLE_MEDIUM {
        subtitle = handle;
    }

    SocialCard::Profile {
        title,
        title_px,
        subtitle,
        avatar_url: user.avatar_url.clone(),
    }
}

pub fn project_overview_card(
    project: &ApiProject,
    handle: &str,
    project_slug: &str,
) -> SocialCard {
    let full = project_ref(handle, project_slug);

    let mut title = full.clone();
    let mut title_px = to_px(4.0);
    if project_slug.chars().count() > MAX_TITLE_MEDIUM {
        title = truncate(MAX_TITLE_MEDIUM, project_slug);
    } else if full.chars().count() > MAX_TITLE_MEDIUM {
        title = project_slug.to_string();
    } else if full.chars().count() > MAX_TITLE_LARGE {
        title_px = to_px(3.0);
    }

    let summary_px = if project.summary.chars().count() > MAX_TITLE_MEDIUM * 3 / 2 {
        to_px(2.5)
    } else {
        to_px(3.0)
    };

    SocialCard::IconPage {
        title,
        title_px,
        summary: project.summary.clone(),
        summary_px,
        icon: Icon::PencilRuler,
        count: None,
    }
}

pub fn code_card(handle: &str, project_slug: &str, branch_ref: Option<&BranchRef>) -> SocialCard {
    let summary = match branch_ref {
        Some(branch_ref) => {
            let branch = branch_ref.as_str();
            let full = format!("{}/{branch}", project_ref(handle, project_slug));
            if branch.chars().count() > MAX_TITLE_MEDIUM {
                truncate(MAX_TITLE_MEDIUM, branch)
            } else if full.chars().count() > MAX_TITLE_MEDIUM {
                branch.to_string()
            } else {
                full
            }
        }
        None => ref_summary(handle, project_slug),
    };

    SocialCard::IconPage {
        title: "Code".to_string(),
        title_px: to_px(4.0),
        summary,
        summary_px: to_px(3.0),
        icon: Icon::DocumentCode,
        count: None,
    }
}

pub fn tickets_card(project: &ApiProject, handle: &str, project_slug: &str) -> SocialCard {
    SocialCard::IconPage {
        title: "Tickets".to_string(),
        title_px: to_px(4.0),
        summary: ref_summary(handle, project_slug),
        summary_px: to_px(3.0),
        icon: Icon::Bug,
        count: Some(project.num_open_tickets),
    }
}

pub fn contributions_card(project: &ApiProject, handle: &str, project_slug: &str) -> SocialCard {
    SocialCard::IconPage {
        title: "Contributions".to_string(),
        title_px: to_px(4.0),
        summary: ref_summary(handle, project_slug),
        summary_px: to_px(3.0),
        icon: Icon::Merge,
        count: Some(project.num_active_contributions),
    }
}

pub fn releases_card(handle: &str, project_slug: &str) -> SocialCard {
    SocialCard::IconPage {
        title: "Releases".to_string(),
        title_px: to_px(4.0),
        summary: ref_summary(handle, project_slug),
        summary_px: to_px(3.0),
        icon: Icon::Rocket,
        count: None,
    }
}

pub fn branches_card(handle: &str, project_slug: &str) -> SocialCard {
    SocialCard::IconPage {
        title: "Branches".to_string(),
        title_px: to_px(4.0),
        summary: ref_summary(handle, project_slug),
        summary_px: to_px(3.0),
        icon: Icon::Merge,
        count: None,
    }
}

fn comments_item(num_comments: u64) -> Option<SheetItem> {
    (num_comments > 0).then(|| SheetItem::IconText {
        icon: Icon::Conversation,
        text: num_comments.to_string(),
    })
}

fn byline(author: Option<&str>, created_at: &str) -> Byline {
    Byline {
        author: user_handle(author),
        date: format_date(created_at),
    }
}

pub fn ticket_card(
    handle: &str,
    project_slug: &str,
    number: u64,
    ticket: &ApiTicket,
) -> SocialCard {
    let mut top_left = vec![
        SheetItem::Text(project_ref(handle, project_slug)),
        SheetItem::Text(format!("Ticket #{number}")),
    ];
    top_left.extend(comments_item(ticket.num_comments));

    SocialCard::Sheet(SheetCard {
        size: SheetSize::Large,
        title: truncate(MAX_SHEET_TITLE, &ticket.title),
        top_left,
        top_right: vec![SheetItem::Tag(ticket_status_tag(ticket.status))],
        bottom_left: Vec::new(),
        footer: Some(byline(ticket.author.as_deref(), &ticket.created_at)),
    })
}

pub fn contribution_card(
    handle: &str,
    project_slug: &str,
    number: u64,
    contribution: &ApiContribution,
) -> SocialCard {
    let mut top_left = vec![
        SheetItem::Text(project_ref(handle, project_slug)),
        SheetItem::Text(format!("Contribution #{number}")),
    ];
    top_left.extend(comments_item(contribution.num_comments));

    SocialCard::Sheet(SheetCard {
        size: SheetSize::Large,
        title: truncate(MAX_SHEET_TITLE, &contribution.title),
        top_left,
        top_right: vec![SheetItem::Tag(contribution_status_tag(contribution.status))],
        bottom_left: vec![SheetItem::Text(format!(
            "From {} to {}",
            contribution.source_branch_ref, contribution.target_branch_ref
        ))],
        footer: Some(byline(
            contribution.author.as_deref(),
            &contribution.created_at,
        )),
    })
}

pub fn release_card(
    handle: &str,
    project_slug: &str,
    project: &ApiProject,
    release: &ApiRelease,
) -> SocialCard {
    let top_right = if project.latest_release.as_deref() == Some(release.version.as_str()) {
        vec![SheetItem::Tag(StatusTag::new(
            "Latest Release",
            TagColor::Blue,
        ))]
    } else {
        Vec::new()
    };

    SocialCard::Sheet(SheetCard {
        size: SheetSize::Standard,
        title: format!("🚀 Release: {}", release.version),
        top_left: vec![
            SheetItem::Text(project_ref(handle, project_slug)),
            SheetItem::IconText {
                icon: Icon::Hash,
                text: short_hash(&release.causal_hash_squashed),
            },
        ],
        top_right,
        bottom_left: Vec::new(),
        footer: Some(byline(
            release.created_by.as_ref().map(|a| a.handle()),
            &release.created_at,
        )),
    })
}

/// Build the definition card, or `None` when the lookup came back empty.
pub fn definition_card(
    handle: &str,
    project_slug: &str,
    branch_ref: &BranchRef,
    kind: DefinitionKind,
    definitions: &ApiDefinitions,
) -> Option<SocialCard> {
    struct Found {
        hash: String,
        name: String,
        builtin: bool,
        syntax: String,
        doc: Option<String>,
    }

    let found = match kind {
        DefinitionKind::Term => {
            definitions
                .term_definitions
                .iter()
                .next()
                .map(|(hash, term)| Found {
                    hash: hash.clone(),
                    name: term.best_term_name.clone(),
                    builtin: term.term_definition.is_builtin(),
                    syntax: syntax_text(&term.signature),
                    doc: term
                        .term_docs
                        .first()
                        .and_then(|(_, _, doc)| doc_excerpt(doc, 24)),
                })
        }
        DefinitionKind::Type => {
            definitions
                .type_definitions
                .iter()
                .next()
                .map(|(hash, ty)| Found {
                    hash: hash.clone(),
                    name: ty.best_type_name.clone(),
                    builtin: ty.type_definition.is_builtin(),
                    syntax: match &ty.type_definition {
                        crate::api::types::DefinitionSyntax::UserObject(segments) => {
                            syntax_text(segments)
                        }
                        crate::api::types::DefinitionSyntax::BuiltinObject(_) => String::new(),
                    },
                    doc: ty.type_docs.first().and_then(|doc| doc_excerpt(doc, 24)),
                })
        }
    }?;

    let full_ref = project_ref(handle, project_slug);

    // Context rows on the right get dropped when the left side runs long,
    // rather than colliding in the middle.
    let top_right = if full_ref.chars().count() + branch_ref.as_str().chars().count() > 40 {
        Vec::new()
    } else {
        vec![
            SheetItem::IconText {
                icon: match kind {
                    DefinitionKind::Term => Icon::Term,
                    DefinitionKind::Type => Icon::Type,
                },
                text: kind.label().to_string(),
            },
            SheetItem::IconText {
                icon: Icon::Hash,
                text: short_hash(&found.hash),
            },
        ]
    };

    let mut bottom_left = Vec::new();
    if found.builtin {
        bottom_left.push(SheetItem::Tag(StatusTag::new(
            format!(
                "{} is a built-in {} provided by the runtime",
                found.name,
                kind.label().to_lowercase()
            ),
            TagColor::Gray,
        )));
        if !found.syntax.is_empty() {
            bottom_left.insert(0, SheetItem::Text(found.syntax.clone()));
        }
    } else if !found.syntax.is_empty() {
        bottom_left.push(SheetItem::Text(found.syntax.clone()));
    }
    if let Some(doc) = &found.doc {
        bottom_left.push(SheetItem::Text(doc.clone()));
    }

    Some(SocialCard::Sheet(SheetCard {
        size: if found.doc.is_some() {
            SheetSize::Large
        } else {
            SheetSize::Standard
        },
        title: found.name,
        top_left: vec![
            SheetItem::Text(full_ref),
            SheetItem::IconText {
                icon: Icon::Branch,
                text: branch_ref.as_str().to_string(),
            },
        ],
        top_right,
        bottom_left,
        footer: None,
    }))
}
