//! Page route variants.
//!
//! # Responsibilities
//! - Model every addressable page as one variant of a closed enum
//! - Carry the minimal identifiers needed to fetch content for that page
//! - Render a route back to its literal path (canonical URLs, logging)
//!
//! # Design Decisions
//! - Native sum type with exhaustive `match` at every dispatch site; adding
//!   a variant breaks the build until all dispatchers handle it
//! - `NotFound` keeps the original path verbatim
//! - Identifiers are opaque strings; the remote API is the validator

use std::fmt;

/// A user or org handle, e.g. `@alice`. Always carries the leading marker.
pub const USER_MARKER: char = '@';

/// Reference to a line of development within a project.
///
/// Either a plain branch name (`main`), a contributor-scoped branch
/// (`@alice/feature`), or a release ref (`releases/1.2.3`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef(String);

impl BranchRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when this ref addresses a release rather than a branch.
    pub fn is_release(&self) -> bool {
        self.0.starts_with("releases")
    }
}

impl fmt::Display for BranchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of a named program entity addressable by fully-qualified name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Term,
    Type,
}

impl DefinitionKind {
    /// Parse the pluralized path segment (`terms`, `types`).
    pub fn from_plural(segment: &str) -> Option<Self> {
        match segment {
            "terms" => Some(Self::Term),
            "types" => Some(Self::Type),
            _ => None,
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Self::Term => "terms",
            Self::Type => "types",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Term => "Term",
            Self::Type => "Type",
        }
    }
}

/// Parsed page route. Construction is total: every path maps to exactly one
/// variant, with `NotFound` as the catch-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    UserOverview {
        handle: String,
    },
    ProjectOverview {
        handle: String,
        project_slug: String,
    },
    ProjectCode {
        handle: String,
        project_slug: String,
        branch_ref: Option<BranchRef>,
    },
    ProjectDefinition {
        handle: String,
        project_slug: String,
        branch_ref: BranchRef,
        kind: DefinitionKind,
        fqn: Vec<String>,
    },
    ProjectTickets {
        handle: String,
        project_slug: String,
    },
    ProjectTicket {
        handle: String,
        project_slug: String,
        number: u64,
    },
    ProjectContributions {
        handle: String,
        project_slug: String,
    },
    ProjectContribution {
        handle: String,
        project_slug: String,
        number: u64,
    },
    ProjectReleases {
        handle: String,
        project_slug: String,
    },
    ProjectRelease {
        handle: String,
        project_slug: String,
        version: String,
    },
    ProjectBranches {
        handle: String,
        project_slug: String,
    },
    NotFound {
        path: String,
    },
}

impl Route {
    /// Stable variant name for logs and metric labels.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Route::UserOverview { .. } => "user_overview",
            Route::ProjectOverview { .. } => "project_overview",
            Route::ProjectCode { .. } => "project_code",
            Route::ProjectDefinition { .. } => "project_definition",
            Route::ProjectTickets { .. } => "project_tickets",
            Route::ProjectTicket { .. } => "project_ticket",
            Route::ProjectContributions { .. } => "project_contributions",
            Route::ProjectContribution { .. } => "project_contribution",
            Route::ProjectReleases { .. } => "project_releases",
            Route::ProjectRelease { .. } => "project_release",
            Route::ProjectBranches { .. } => "project_branches",
            Route::NotFound { .. } => "not_found",
        }
    }
}

impl fmt::Display for Route {
    /// The literal page path for this route. `NotFound` echoes the original
    /// path unchanged, so `Display` round-trips through the parser.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::UserOverview { handle } => write!(f, "/{handle}"),
            Route::ProjectOverview {
                handle,
                project_slug,
            } => write!(f, "/{handle}/{project_slug}"),
            Route::ProjectCode {
                handle,
                project_slug,
                branch_ref: None,
            } => write!(f, "/{handle}/{project_slug}/code"),
            Route::ProjectCode {
                handle,
                project_slug,
                branch_ref: Some(branch_ref),
            } => write!(f, "/{handle}/{project_slug}/code/{branch_ref}"),
            Route::ProjectDefinition {
                handle,
                project_slug,
                branch_ref,
                kind,
                fqn,
            } => write!(
                f,
                "/{handle}/{project_slug}/code/{branch_ref}/{}/{}",
                kind.plural(),
                fqn.join("/")
            ),
            Route::ProjectTickets {
                handle,
                project_slug,
            } => write!(f, "/{handle}/{project_slug}/tickets"),
            Route::ProjectTicket {
                handle,
                project_slug,
                number,
            } => write!(f, "/{handle}/{project_slug}/tickets/{number}"),
            Route::ProjectContributions {
                handle,
                project_slug,
            } => write!(f, "/{handle}/{project_slug}/contributions"),
            Route::ProjectContribution {
                handle,
                project_slug,
                number,
            } => write!(f, "/{handle}/{project_slug}/contributions/{number}"),
            Route::ProjectReleases {
                handle,
                project_slug,
            } => write!(f, "/{handle}/{project_slug}/releases"),
            Route::ProjectRelease {
                handle,
                project_slug,
                version,
            } => write!(f, "/{handle}/{project_slug}/releases/{version}"),
            Route::ProjectBranches {
                handle,
                project_slug,
            } => write!(f, "/{handle}/{project_slug}/branches"),
            Route::NotFound { path } => f.write_str(path),
        }
    }
}
