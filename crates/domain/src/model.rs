//! Domain models and value objects

use std::fmt;
use std::str::FromStr;

/// The site family a generator page belongs to
///
/// Each family submits its form differently and renders the result under
/// different element ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SiteVariant {
    /// GET the page for `_token`/`hiddenName`, then POST with a session cookie
    #[default]
    TokenizedForm,
    /// POST the display name directly, no tokens or cookies
    DirectPost,
}

impl SiteVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteVariant::TokenizedForm => "tokenized_form",
            SiteVariant::DirectPost => "direct_post",
        }
    }
}

impl fmt::Display for SiteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteVariant {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "tokenized_form" => Ok(SiteVariant::TokenizedForm),
            "direct_post" => Ok(SiteVariant::DirectPost),
            _ => Err(ParseValueError {
                kind: "site variant",
                value: s.to_string(),
            }),
        }
    }
}

/// Mastodon status visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
    Direct,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Unlisted => "unlisted",
            Visibility::Private => "private",
            Visibility::Direct => "direct",
        }
    }
}

impl FromStr for Visibility {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "unlisted" => Ok(Visibility::Unlisted),
            "private" => Ok(Visibility::Private),
            "direct" => Ok(Visibility::Direct),
            _ => Err(ParseValueError {
                kind: "visibility",
                value: s.to_string(),
            }),
        }
    }
}

/// Error for string values that don't name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind}: '{value}'")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

/// A status ready to be published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPost {
    /// Status text, possibly empty
    pub text: String,
    /// Site identifier the text was fetched from
    pub site_id: String,
    /// Visibility override; the server default applies when `None`
    pub visibility: Option<Visibility>,
}

/// What happened to a single site identifier during a pass
#[derive(Debug, Clone)]
pub enum IterationStatus {
    /// Status was created
    Published(crate::ports::PublishResult),
    /// Dry run, nothing was sent
    DryRun,
    /// Empty result was not posted
    SkippedEmpty,
    /// Publishing failed; the pass continued
    Failed(String),
}

/// Outcome for one site identifier
#[derive(Debug, Clone)]
pub struct IterationOutcome {
    pub site_id: String,
    pub text: String,
    pub status: IterationStatus,
}

impl IterationOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self.status, IterationStatus::Published(_))
    }
}

/// Split a comma-separated identifier list, trimming each entry
///
/// Order and duplicates are preserved; entries that are blank after
/// trimming are dropped.
pub fn parse_site_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

/// Prefix a bare host with `https://`; URLs that already carry a scheme pass
/// through with any trailing slash removed
pub fn normalize_base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}
