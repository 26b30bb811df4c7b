//! Post catalog behind the post-listing endpoint.
//!
//! Posts are Markdown files whose first lines are a TOML front matter block
//! fenced by `+++`:
//!
//! ```text
//! +++
//! title = "Index funds, slowly"
//! date = "2024-03-02"
//! tags = ["finance", "values"]
//! +++
//! Body text...
//! ```
//!
//! The catalog is loaded once at startup and is read-only afterwards.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::endpoints::PostFilter;
use crate::error::{Error, Result};

const FRONT_MATTER_FENCE: &str = "+++";

/// Summary of one post, as listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// File stem of the post.
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: String,
    date: NaiveDate,
    #[serde(default)]
    tags: Vec<String>,
}

/// In-memory set of post summaries, newest first.
#[derive(Debug, Clone, Default)]
pub struct PostCatalog {
    posts: Vec<PostSummary>,
}

impl PostCatalog {
    /// Load every `*.md` file in `dir`.
    ///
    /// A missing directory yields an empty catalog. Files that cannot be read
    /// as UTF-8 text, or whose front matter cannot be parsed, are skipped with
    /// a warning. Failing to list the directory is returned.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            warn!(path = %dir.display(), "posts directory not found, serving an empty catalog");
            return Ok(Self::default());
        }

        let mut posts = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }

            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable post");
                    continue;
                }
            };
            match parse_post(&path, &contents) {
                Ok(post) => {
                    debug!(slug = %post.slug, "loaded post");
                    posts.push(post);
                }
                Err(e) => warn!(error = %e, "skipping post"),
            }
        }

        info!(path = %dir.display(), count = posts.len(), "post catalog loaded");
        Ok(Self::from_posts(posts))
    }

    /// Build a catalog from already-parsed summaries.
    pub fn from_posts(mut posts: Vec<PostSummary>) -> Self {
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        Self { posts }
    }

    /// Posts matching `filter`, newest first.
    ///
    /// A post matches when it carries every requested tag.
    pub fn summaries(&self, filter: &PostFilter) -> Vec<PostSummary> {
        self.posts
            .iter()
            .filter(|post| filter.tags.iter().all(|tag| post.tags.contains(tag)))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn parse_post(path: &Path, contents: &str) -> Result<PostSummary> {
    let front_matter_error = |message: &str| Error::FrontMatter {
        path: path.to_path_buf(),
        message: message.to_string(),
    };

    let slug = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| front_matter_error("file name is not valid UTF-8"))?
        .to_string();

    let block = front_matter(contents).ok_or_else(|| front_matter_error("missing +++ block"))?;
    let meta: FrontMatter =
        toml::from_str(block).map_err(|e| front_matter_error(&e.to_string()))?;

    Ok(PostSummary {
        slug,
        title: meta.title,
        date: meta.date,
        tags: meta.tags,
    })
}

/// Text between the opening and closing `+++` fences.
fn front_matter(contents: &str) -> Option<&str> {
    let rest = contents
        .trim_start_matches('\u{feff}')
        .strip_prefix(FRONT_MATTER_FENCE)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}
