//! Wire types and error definitions for the remote REST API.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while talking to the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The request never produced a response (connect error, timeout, DNS).
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// A user or org profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    pub handle: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

/// Project summary with activity counters.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProject {
    pub owner: ApiProjectOwner,
    pub slug: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub num_active_contributions: u64,
    #[serde(default)]
    pub num_open_tickets: u64,
    #[serde(default)]
    pub num_favs: u64,
    pub latest_release: Option<String>,
    pub default_branch: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiProjectOwner {
    pub handle: String,
}

/// Ticket lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTicket {
    pub author: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub num_comments: u64,
    pub status: TicketStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Contribution lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionStatus {
    Draft,
    InReview,
    Merged,
    Closed,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContribution {
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub num_comments: u64,
    pub source_branch_ref: String,
    pub target_branch_ref: String,
    pub status: ContributionStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Whoever cut a release; older payloads carry a bare handle string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiReleaseAuthor {
    Handle(String),
    User { handle: String },
}

impl ApiReleaseAuthor {
    pub fn handle(&self) -> &str {
        match self {
            ApiReleaseAuthor::Handle(h) => h,
            ApiReleaseAuthor::User { handle } => handle,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRelease {
    pub version: String,
    pub causal_hash_squashed: String,
    pub causal_hash_unsquashed: String,
    pub created_at: String,
    pub created_by: Option<ApiReleaseAuthor>,
    pub updated_at: String,
}

/// One colored span of rendered source code.
#[derive(Debug, Clone, Deserialize)]
pub struct SyntaxSegment {
    pub annotation: Option<SyntaxAnnotation>,
    pub segment: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyntaxAnnotation {
    pub tag: String,
}

/// Join syntax segments back into plain source text.
pub fn syntax_text(segments: &[SyntaxSegment]) -> String {
    segments.iter().map(|s| s.segment.as_str()).collect()
}

/// A definition body: user code, or a runtime builtin with no source.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "tag", content = "contents")]
pub enum DefinitionSyntax {
    UserObject(Vec<SyntaxSegment>),
    BuiltinObject(Vec<SyntaxSegment>),
}

impl DefinitionSyntax {
    pub fn is_builtin(&self) -> bool {
        matches!(self, DefinitionSyntax::BuiltinObject(_))
    }
}

/// A term definition payload.
///
/// Docs arrive as a deeply recursive document tree; we keep them as raw JSON
/// and extract a plain-text excerpt on demand (see [`doc_excerpt`]).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTerm {
    pub best_term_name: String,
    #[serde(default)]
    pub defn_term_tag: Option<String>,
    #[serde(default)]
    pub signature: Vec<SyntaxSegment>,
    pub term_definition: DefinitionSyntax,
    #[serde(default)]
    pub term_docs: Vec<(String, String, serde_json::Value)>,
}

/// A type definition payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiType {
    pub best_type_name: String,
    #[serde(default)]
    pub defn_type_tag: Option<String>,
    pub type_definition: DefinitionSyntax,
    #[serde(default)]
    pub type_docs: Vec<serde_json::Value>,
}

/// Definition lookup result, keyed by definition hash.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDefinitions {
    #[serde(default)]
    pub missing_definitions: Vec<String>,
    #[serde(default)]
    pub term_definitions: BTreeMap<String, ApiTerm>,
    #[serde(default)]
    pub type_definitions: BTreeMap<String, ApiType>,
}

/// Walk a doc tree and collect the first few words of prose.
///
/// The doc format nests paragraphs, spans, sections and special blocks; only
/// `Word` leaves contribute text. Collection stops once `max_words` words are
/// gathered.
pub fn doc_excerpt(doc: &serde_json::Value, max_words: usize) -> Option<String> {
    let mut words = Vec::new();
    collect_words(doc, max_words, &mut words);
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn collect_words(node: &serde_json::Value, max_words: usize, out: &mut Vec<String>) {
    if out.len() >= max_words {
        return;
    }
    match node {
        serde_json::Value::Object(obj) => {
            let tag = obj.get("tag").and_then(|t| t.as_str());
            let contents = obj.get("contents");
            match (tag, contents) {
                (Some("Word"), Some(serde_json::Value::String(word))) => {
                    out.push(word.clone());
                }
                // Code and source blocks do not read well in one-line excerpts.
                (Some("Code" | "CodeBlock" | "Special"), _) => {}
                (_, Some(contents)) => collect_words(contents, max_words, out),
                _ => {}
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                if out.len() >= max_words {
                    return;
                }
                collect_words(item, max_words, out);
            }
        }
        _ => {}
    }
}
