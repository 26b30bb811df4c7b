//! Post-listing schema.

use std::fmt;

use once_cell::sync::Lazy;

use super::FromQuery;
use crate::params::CanonicalParams;
use crate::schema::{AllOf, Schema};

/// Query keys recognized by the post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostSummaryKey {
    Tags,
}

impl PostSummaryKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            PostSummaryKey::Tags => "tags",
        }
    }
}

impl fmt::Display for PostSummaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags a post may carry and a client may filter on.
pub const VALID_TAGS: &[&str] = &["finance", "tech", "values", "books", "travel"];

pub static POST_SUMMARY_SCHEMA: Lazy<Schema> =
    Lazy::new(|| Schema::new().rule(PostSummaryKey::Tags.as_str(), AllOf::new(VALID_TAGS)));

/// Tag filter for the post listing. An empty list matches every post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub tags: Vec<String>,
}

impl FromQuery for PostFilter {
    const ENDPOINT: &'static str = "post-summary-data";
    const REQUIRED_KEYS: Option<&'static [&'static str]> = None;

    fn schema() -> &'static Schema {
        &POST_SUMMARY_SCHEMA
    }

    fn from_validated(params: &CanonicalParams) -> Option<Self> {
        Some(Self {
            tags: params
                .get(PostSummaryKey::Tags.as_str())
                .cloned()
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> CanonicalParams {
        let mut params = CanonicalParams::new();
        params.insert(
            "tags".to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        params
    }

    #[test]
    fn test_valid_tags() {
        let values: Vec<String> = VALID_TAGS[..3].iter().map(|t| t.to_string()).collect();
        assert!(POST_SUMMARY_SCHEMA.check("tags", &values));
    }

    #[test]
    fn test_invalid_tag() {
        let values = vec![
            VALID_TAGS[0].to_string(),
            "invalid".to_string(),
            VALID_TAGS[2].to_string(),
        ];
        assert!(!POST_SUMMARY_SCHEMA.check("tags", &values));
    }

    #[test]
    fn test_no_query_is_an_empty_filter() {
        let filter = PostFilter::from_params(&CanonicalParams::new()).unwrap();
        assert_eq!(filter, PostFilter::default());
    }

    #[test]
    fn test_filter_keeps_tag_order() {
        let filter = PostFilter::from_params(&tags(&["values", "finance"])).unwrap();
        assert_eq!(filter.tags, vec!["values", "finance"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut query = tags(&["tech"]);
        query.insert("invalid".to_string(), vec!["testing".to_string()]);

        let errors = PostFilter::from_params(&query).unwrap_err();

        assert_eq!(errors.len(), 1);
    }
}
