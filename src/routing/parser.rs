//! Path parsing.
//!
//! # Responsibilities
//! - Turn a URL path into a `Route` variant
//! - Resolve branch-reference ambiguity positionally
//! - Degrade to `NotFound` instead of failing
//!
//! # Design Decisions
//! - Empty segments are stripped up front, so trailing slashes never matter
//! - No percent-decoding here; a literal `/` inside a branch name must arrive
//!   pre-encoded by the caller
//! - The parser never allocates an error: every input produces some variant

use crate::routing::route::{BranchRef, DefinitionKind, Route, USER_MARKER};

/// Second path segment reserved for a different purpose elsewhere in the
/// routing scheme. A project slug equal to this value never matches.
const RESERVED_PROJECT_SLUG: &str = "p";

/// Parse a URL path into a route. Total: never fails, never panics.
pub fn parse_path(raw_path: &str) -> Route {
    let parts: Vec<&str> = raw_path.split('/').filter(|s| !s.is_empty()).collect();

    let not_found = || Route::NotFound {
        path: raw_path.to_string(),
    };

    let Some(&handle) = parts.first() else {
        return not_found();
    };
    if !handle.starts_with(USER_MARKER) {
        return not_found();
    }

    let Some(&project_slug) = parts.get(1) else {
        return Route::UserOverview {
            handle: handle.to_string(),
        };
    };
    if project_slug == RESERVED_PROJECT_SLUG {
        return not_found();
    }

    let handle = handle.to_string();
    let project_slug = project_slug.to_string();
    let rest = &parts[2..];

    match rest.first().copied() {
        Some("code") => parse_code(handle, project_slug, &rest[1..]),
        Some("tickets") => match rest.get(1).and_then(|s| s.parse::<u64>().ok()) {
            Some(number) => Route::ProjectTicket {
                handle,
                project_slug,
                number,
            },
            None => Route::ProjectTickets {
                handle,
                project_slug,
            },
        },
        Some("contributions") => match rest.get(1).and_then(|s| s.parse::<u64>().ok()) {
            Some(number) => Route::ProjectContribution {
                handle,
                project_slug,
                number,
            },
            None => Route::ProjectContributions {
                handle,
                project_slug,
            },
        },
        Some("releases") => match rest.get(1) {
            Some(version) => Route::ProjectRelease {
                handle,
                project_slug,
                version: (*version).to_string(),
            },
            None => Route::ProjectReleases {
                handle,
                project_slug,
            },
        },
        Some("branches") => Route::ProjectBranches {
            handle,
            project_slug,
        },
        // Unrecognized sub-pages (and no sub-page at all) land on the
        // project overview.
        _ => Route::ProjectOverview {
            handle,
            project_slug,
        },
    }
}

/// A branch-reference segment that opens a two-segment reference: either a
/// contributor-scoped branch (`@alice/feature`) or a release ref
/// (`releases/1.2.3`).
fn opens_two_segment_ref(segment: &str) -> bool {
    segment.starts_with(USER_MARKER) || segment.starts_with("releases")
}

/// Parse the segments following `/code`.
///
/// The first 1-2 segments form the branch reference. If a pluralized
/// definition kind follows the branch reference with at least one name
/// segment after it, the remainder is a fully-qualified name and the route
/// is a definition page; otherwise it is the code page for the branch.
fn parse_code(handle: String, project_slug: String, rest: &[&str]) -> Route {
    let (branch_ref, after): (BranchRef, &[&str]) = match rest {
        [] => {
            return Route::ProjectCode {
                handle,
                project_slug,
                branch_ref: None,
            }
        }
        [first, second, after @ ..] if opens_two_segment_ref(first) => {
            (BranchRef::new(format!("{first}/{second}")), after)
        }
        [first, after @ ..] => (BranchRef::new(*first), after),
    };

    if let [kind, fqn @ ..] = after {
        if !fqn.is_empty() {
            if let Some(kind) = DefinitionKind::from_plural(kind) {
                return Route::ProjectDefinition {
                    handle,
                    project_slug,
                    branch_ref,
                    kind,
                    fqn: fqn.iter().map(|s| (*s).to_string()).collect(),
                };
            }
        }
    }

    Route::ProjectCode {
        handle,
        project_slug,
        branch_ref: Some(branch_ref),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_without_user_marker_are_not_found() {
        for path in ["/", "", "/about", "/p", "/alice/mylib", "/static/app.js"] {
            assert_eq!(
                parse_path(path),
                Route::NotFound {
                    path: path.to_string()
                },
                "path {path:?} should not match"
            );
        }
    }

    #[test]
    fn test_not_found_preserves_path_verbatim() {
        let route = parse_path("/some/deep/path/");
        assert_eq!(
            route,
            Route::NotFound {
                path: "/some/deep/path/".to_string()
            }
        );
    }

    #[test]
    fn test_user_overview() {
        assert_eq!(
            parse_path("/@alice"),
            Route::UserOverview {
                handle: "@alice".to_string()
            }
        );
    }

    #[test]
    fn test_project_overview() {
        assert_eq!(
            parse_path("/@alice/mylib"),
            Route::ProjectOverview {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
            }
        );
    }

    #[test]
    fn test_reserved_project_slug_is_not_found() {
        assert_eq!(
            parse_path("/@alice/p"),
            Route::NotFound {
                path: "/@alice/p".to_string()
            }
        );
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        assert_eq!(parse_path("/@alice/mylib/"), parse_path("/@alice/mylib"));
        assert_eq!(parse_path("/@alice//mylib"), parse_path("/@alice/mylib"));
    }

    #[test]
    fn test_project_code_without_branch() {
        assert_eq!(
            parse_path("/@alice/mylib/code"),
            Route::ProjectCode {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
                branch_ref: None,
            }
        );
    }

    #[test]
    fn test_project_code_plain_branch() {
        assert_eq!(
            parse_path("/@alice/mylib/code/main"),
            Route::ProjectCode {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
                branch_ref: Some(BranchRef::new("main")),
            }
        );
    }

    #[test]
    fn test_project_code_contributor_branch() {
        assert_eq!(
            parse_path("/@alice/mylib/code/@bob/feature"),
            Route::ProjectCode {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
                branch_ref: Some(BranchRef::new("@bob/feature")),
            }
        );
    }

    #[test]
    fn test_project_code_release_ref() {
        let route = parse_path("/@alice/mylib/code/releases/1.2.3");
        assert_eq!(
            route,
            Route::ProjectCode {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
                branch_ref: Some(BranchRef::new("releases/1.2.3")),
            }
        );
        if let Route::ProjectCode {
            branch_ref: Some(branch_ref),
            ..
        } = route
        {
            assert!(branch_ref.is_release());
        }
    }

    #[test]
    fn test_definition_on_plain_branch() {
        assert_eq!(
            parse_path("/@alice/mylib/code/main/types/Foo/Bar"),
            Route::ProjectDefinition {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
                branch_ref: BranchRef::new("main"),
                kind: DefinitionKind::Type,
                fqn: vec!["Foo".to_string(), "Bar".to_string()],
            }
        );
    }

    #[test]
    fn test_definition_on_contributor_branch() {
        assert_eq!(
            parse_path("/@alice/mylib/code/@bob/feature/terms/base/List/map"),
            Route::ProjectDefinition {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
                branch_ref: BranchRef::new("@bob/feature"),
                kind: DefinitionKind::Term,
                fqn: vec!["base".to_string(), "List".to_string(), "map".to_string()],
            }
        );
    }

    #[test]
    fn test_definition_kind_needs_name_segments() {
        // A bare kind segment with nothing after it is still the code page.
        assert_eq!(
            parse_path("/@alice/mylib/code/main/types"),
            Route::ProjectCode {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
                branch_ref: Some(BranchRef::new("main")),
            }
        );
    }

    #[test]
    fn test_unknown_kind_segment_is_code_page() {
        assert_eq!(
            parse_path("/@alice/mylib/code/main/docs/Readme"),
            Route::ProjectCode {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
                branch_ref: Some(BranchRef::new("main")),
            }
        );
    }

    #[test]
    fn test_ticket_number() {
        assert_eq!(
            parse_path("/@alice/mylib/tickets/42"),
            Route::ProjectTicket {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
                number: 42,
            }
        );
    }

    #[test]
    fn test_ticket_non_number_is_overview() {
        assert_eq!(
            parse_path("/@alice/mylib/tickets/notanumber"),
            Route::ProjectTickets {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
            }
        );
        assert_eq!(
            parse_path("/@alice/mylib/tickets"),
            Route::ProjectTickets {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
            }
        );
    }

    #[test]
    fn test_contribution_routes() {
        assert_eq!(
            parse_path("/@alice/mylib/contributions/7"),
            Route::ProjectContribution {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
                number: 7,
            }
        );
        assert_eq!(
            parse_path("/@alice/mylib/contributions"),
            Route::ProjectContributions {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
            }
        );
    }

    #[test]
    fn test_release_routes() {
        assert_eq!(
            parse_path("/@alice/mylib/releases/1.2.3"),
            Route::ProjectRelease {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
                version: "1.2.3".to_string(),
            }
        );
        assert_eq!(
            parse_path("/@alice/mylib/releases"),
            Route::ProjectReleases {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
            }
        );
    }

    #[test]
    fn test_branches_has_no_sub_addressing() {
        assert_eq!(
            parse_path("/@alice/mylib/branches/anything"),
            Route::ProjectBranches {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
            }
        );
    }

    #[test]
    fn test_unrecognized_sub_page_is_project_overview() {
        assert_eq!(
            parse_path("/@alice/mylib/settings"),
            Route::ProjectOverview {
                handle: "@alice".to_string(),
                project_slug: "mylib".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_display_round_trip() {
        let paths = [
            "/@alice",
            "/@alice/mylib",
            "/@alice/mylib/code",
            "/@alice/mylib/code/main",
            "/@alice/mylib/code/@bob/feature",
            "/@alice/mylib/code/releases/1.2.3",
            "/@alice/mylib/code/main/types/Foo/Bar",
            "/@alice/mylib/code/@bob/topic/terms/base/List/map",
            "/@alice/mylib/tickets",
            "/@alice/mylib/tickets/42",
            "/@alice/mylib/contributions",
            "/@alice/mylib/contributions/7",
            "/@alice/mylib/releases",
            "/@alice/mylib/releases/2.0.0",
            "/@alice/mylib/branches",
        ];
        for path in paths {
            let route = parse_path(path);
            assert_eq!(
                parse_path(&route.to_string()),
                route,
                "round-trip failed for {path:?}"
            );
        }
    }
}
