//! Sort keys and orderings for search
//!
//! Each family has its own closed set of keys. `BestMatch` is the API's
//! default and is never sent on the wire.

use std::fmt;
use std::str::FromStr;

use crate::error::GitHubError;
use crate::http::param::{ParamValue, ToParam};

/// Result ordering; descending unless asked otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(GitHubError::InvalidInput(format!(
                "Unknown sort order '{}'. Use 'asc' or 'desc'",
                other
            ))),
        }
    }
}

impl ToParam for SortOrder {
    fn to_param(&self) -> ParamValue {
        ParamValue::Enum(self.as_str())
    }
}

/// A family's sort key
pub trait SearchSort: Copy + Default + fmt::Debug + ToParam {
    fn as_str(&self) -> &'static str;

    /// All keys of the family, best match first
    fn all() -> &'static [Self];

    fn is_best_match(&self) -> bool {
        self.as_str() == "best-match"
    }
}

macro_rules! sort_keys {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub enum $name {
            #[default]
            BestMatch,
            $($variant,)*
        }

        impl SearchSort for $name {
            fn as_str(&self) -> &'static str {
                match self {
                    $name::BestMatch => "best-match",
                    $($name::$variant => $wire,)*
                }
            }

            fn all() -> &'static [Self] {
                &[$name::BestMatch, $($name::$variant,)*]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = GitHubError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as SearchSort>::all()
                    .iter()
                    .copied()
                    .find(|key| key.as_str() == s)
                    .ok_or_else(|| {
                        let known: Vec<&str> =
                            <$name as SearchSort>::all().iter().map(|k| k.as_str()).collect();
                        GitHubError::InvalidInput(format!(
                            "Unknown sort key '{}'. Expected one of: {}",
                            s,
                            known.join(", ")
                        ))
                    })
            }
        }

        impl ToParam for $name {
            fn to_param(&self) -> ParamValue {
                ParamValue::Enum(self.as_str())
            }
        }
    };
}

sort_keys!(RepositorySort {
    Stars => "stars",
    Forks => "forks",
    HelpWantedIssues => "help-wanted-issues",
    Updated => "updated",
});

sort_keys!(CommitSort {
    AuthorDate => "author-date",
    CommitterDate => "committer-date",
});

sort_keys!(CodeSort {
    Indexed => "indexed",
});

sort_keys!(IssueSort {
    Comments => "comments",
    Reactions => "reactions",
    ReactionsPlusOne => "reactions-+1",
    ReactionsMinusOne => "reactions--1",
    ReactionsSmile => "reactions-smile",
    ReactionsThinkingFace => "reactions-thinking_face",
    ReactionsHeart => "reactions-heart",
    ReactionsTada => "reactions-tada",
    Interactions => "interactions",
    Created => "created",
    Updated => "updated",
});

sort_keys!(UserSort {
    Followers => "followers",
    Repositories => "repositories",
    Joined => "joined",
});

sort_keys!(LabelSort {
    Created => "created",
    Updated => "updated",
});

sort_keys!(
    /// Topic search only ranks by relevance
    TopicSort {}
);

/// Whether forks take part in a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkSearch {
    /// Forks and their parents
    True,
    /// Forks only
    Only,
}

impl ForkSearch {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForkSearch::True => "true",
            ForkSearch::Only => "only",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionType {
    PlusOne,
    MinusOne,
    Smile,
    Tada,
    Heart,
}

impl ReactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionType::PlusOne => "+1",
            ReactionType::MinusOne => "-1",
            ReactionType::Smile => "smile",
            ReactionType::Tada => "tada",
            ReactionType::Heart => "heart",
        }
    }
}

/// In-query sort, written as a `sort:` qualifier rather than a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualifierSort {
    Interactions(SortOrder),
    Reactions(SortOrder),
    Reaction(ReactionType),
    AuthorDate(SortOrder),
    CommitterDate(SortOrder),
    Updated(SortOrder),
}

impl QualifierSort {
    pub fn render(&self) -> String {
        match self {
            QualifierSort::Interactions(order) => format!("interactions-{}", order),
            QualifierSort::Reactions(order) => format!("reactions-{}", order),
            QualifierSort::Reaction(kind) => format!("reactions-{}", kind.as_str()),
            QualifierSort::AuthorDate(order) => format!("author-date-{}", order),
            QualifierSort::CommitterDate(order) => format!("committer-date-{}", order),
            QualifierSort::Updated(order) => format!("updated-{}", order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_match_is_default() {
        assert!(RepositorySort::default().is_best_match());
        assert!(TopicSort::default().is_best_match());
        assert!(!IssueSort::Comments.is_best_match());
    }

    #[test]
    fn test_issue_reaction_keys() {
        assert_eq!(IssueSort::ReactionsPlusOne.as_str(), "reactions-+1");
        assert_eq!(IssueSort::ReactionsMinusOne.as_str(), "reactions--1");
        assert_eq!(IssueSort::ReactionsThinkingFace.as_str(), "reactions-thinking_face");
        assert_eq!(IssueSort::all().len(), 12);
    }

    #[test]
    fn test_parse_sort_keys() {
        assert_eq!("help-wanted-issues".parse::<RepositorySort>().unwrap(), RepositorySort::HelpWantedIssues);
        assert_eq!("joined".parse::<UserSort>().unwrap(), UserSort::Joined);

        let err = "stars".parse::<CodeSort>().unwrap_err();
        assert!(err.to_string().contains("best-match, indexed"));
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(SortOrder::default(), SortOrder::Desc);
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::Asc.to_param(), ParamValue::Enum("asc"));
    }

    #[test]
    fn test_qualifier_sort_render() {
        assert_eq!(QualifierSort::Interactions(SortOrder::Asc).render(), "interactions-asc");
        assert_eq!(QualifierSort::Reaction(ReactionType::PlusOne).render(), "reactions-+1");
        assert_eq!(QualifierSort::AuthorDate(SortOrder::Desc).render(), "author-date-desc");
    }
}
