//! Search CLI command handlers

use std::str::FromStr;

use crate::cli::commands::{SearchArgs, SearchKind};
use crate::cli::output::{print_list, Summary};
use crate::error::{GitHubError, Result};
use crate::github::search::{SearchBuilder, SearchFamily};
use crate::github::GitHub;
use crate::search::keyword::SearchKeyword;
use crate::search::qualifier::{is_quoted, QualifierSet};

/// Handle `ghrest search`
pub async fn handle_search(github: &GitHub, args: SearchArgs) -> Result<()> {
    let search = github.search();
    match args.family {
        SearchKind::Repositories => run(search.repositories(), &args).await,
        SearchKind::Commits => run(search.commits(), &args).await,
        SearchKind::Code => run(search.code(), &args).await,
        SearchKind::Issues => run(search.issues(), &args).await,
        SearchKind::Users => run(search.users(), &args).await,
        SearchKind::Topics => run(search.topics(), &args).await,
        SearchKind::Labels => {
            let repository_id = args.repository_id.ok_or_else(|| {
                GitHubError::InvalidInput(
                    "Label search needs --repository-id <ID>".to_string(),
                )
            })?;
            run(search.labels(repository_id), &args).await
        }
    }
}

async fn run<F>(builder: SearchBuilder<'_, F>, args: &SearchArgs) -> Result<()>
where
    F: SearchFamily,
    F::Item: Summary,
    F::Sort: FromStr<Err = GitHubError>,
{
    let (keywords, qualifiers) = split_terms::<F>(&args.query);
    let mut builder = builder.keywords(keywords).qualifiers(qualifiers);

    if let Some(sort) = &args.sort {
        builder = builder.sort(sort.parse()?);
    }
    if let Some(order) = args.order {
        builder = builder.order(order.into());
    }
    if let Some(page) = args.page {
        builder = builder.page(page);
    }
    if let Some(per_page) = args.per_page {
        builder = builder.per_page(per_page);
    }

    let results = builder.send().await?;
    println!(
        "{} result(s){}\n",
        results.total,
        if results.incomplete_results {
            " (incomplete)"
        } else {
            ""
        }
    );
    print_list(&results.items, "No matches.");
    Ok(())
}

/// Sort command-line terms into free-text keywords and qualifiers
///
/// A term is a qualifier when it has a `key:` prefix outside of quotes.
fn split_terms<F>(terms: &[String]) -> (SearchKeyword, QualifierSet<F>) {
    let mut keywords = SearchKeyword::new();
    let mut qualifiers = QualifierSet::new();
    for term in terms {
        if is_qualifier(term) {
            qualifiers = qualifiers.union(QualifierSet::parse(term));
        } else {
            keywords = keywords.union(SearchKeyword::parse(term));
        }
    }
    (keywords, qualifiers)
}

fn is_qualifier(term: &str) -> bool {
    let term = term.trim();
    !is_quoted(term) && !term.starts_with("NOT ") && term.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::qualifier::scope;

    fn terms(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_terms() {
        let (keywords, qualifiers) = split_terms::<scope::Repositories>(&terms(&[
            "tetris",
            "language:assembly",
            "-topic:game",
        ]));
        assert_eq!(keywords.to_query_string(), "tetris");
        assert_eq!(
            qualifiers.to_query_string(),
            "-topic:game+language:assembly"
        );
    }

    #[test]
    fn test_quoted_phrase_is_keyword() {
        assert!(!is_qualifier("\"a:b\""));
        assert!(!is_qualifier("NOT foo"));
        assert!(is_qualifier("stars:>10"));
        assert!(!is_qualifier("hello"));
    }
}
