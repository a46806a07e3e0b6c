//! Gist CLI command handlers

use futures::future::try_join_all;

use crate::cli::commands::{GistCommand, PageArgs};
use crate::cli::output::{print_list, Summary};
use crate::error::{GitHubError, Result};
use crate::github::list::ListBuilder;
use crate::github::GitHub;
use crate::models::Gist;

/// Handle `ghrest gist`
pub async fn handle_gist(github: &GitHub, command: GistCommand) -> Result<()> {
    let gists = github.gists();
    match command {
        GistCommand::Public { since, paging } => {
            let mut list = gists.public();
            if let Some(since) = since {
                list = list.since(since);
            }
            let items = paged(list, &paging).send().await?;
            print_list(&items, "No public gists.");
        }
        GistCommand::Starred { since, paging } => {
            let mut list = gists.starred();
            if let Some(since) = since {
                list = list.since(since);
            }
            let items = paged(list, &paging).send().await?;
            print_list(&items, "No starred gists.");
        }
        GistCommand::User { username, paging } => {
            let items = paged(gists.for_user(&username), &paging).send().await?;
            print_list(&items, &format!("{} has no public gists.", username));
        }
        GistCommand::Get { ids, revision } => match revision {
            Some(sha) => {
                let [id] = ids.as_slice() else {
                    return Err(GitHubError::InvalidInput(
                        "--revision takes exactly one gist ID".to_string(),
                    ));
                };
                print_gist(&gists.get_revision(id, &sha).await?);
            }
            None => {
                let fetched = try_join_all(ids.iter().map(|id| gists.get(id))).await?;
                for gist in &fetched {
                    print_gist(gist);
                }
            }
        },
        GistCommand::Commits { id, paging } => {
            let items = paged(gists.commits(&id), &paging).send().await?;
            print_list(&items, "No revisions.");
        }
        GistCommand::Forks { id, paging } => {
            let items = paged(gists.forks(&id), &paging).send().await?;
            print_list(&items, "No forks.");
        }
        GistCommand::Star { id } => {
            if gists.star(&id).await? {
                println!("✓ Starred gist {}", id);
            }
        }
        GistCommand::Unstar { id } => {
            if gists.unstar(&id).await? {
                println!("✓ Unstarred gist {}", id);
            }
        }
        GistCommand::StarredStatus { id } => {
            if gists.is_starred(&id).await? {
                println!("Gist {} is starred", id);
            } else {
                println!("Gist {} is not starred", id);
            }
        }
        GistCommand::Fork { id } => {
            let fork = gists.fork(&id).await?;
            println!("✓ Forked gist {} as {}", id, fork.id);
            println!("  URL: {}", fork.urls().webpage);
        }
        GistCommand::Delete { id } => {
            if gists.delete(&id).await? {
                println!("✓ Deleted gist {}", id);
            }
        }
    }
    Ok(())
}

fn paged<'a, T: serde::de::DeserializeOwned>(
    mut list: ListBuilder<'a, T>,
    paging: &PageArgs,
) -> ListBuilder<'a, T> {
    if let Some(page) = paging.page {
        list = list.page(page);
    }
    if let Some(per_page) = paging.per_page {
        list = list.per_page(per_page);
    }
    list
}

fn print_gist(gist: &Gist) {
    println!("{}", gist.line());
    if let Some(description) = gist.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  {}", description);
    }
    println!("  updated {}", gist.updated.format("%Y-%m-%d %H:%M"));
    println!("  {}", gist.urls().webpage);
    for file in gist.files.values() {
        println!(
            "  ─ {} ({} bytes{})",
            file.filename,
            file.size.as_bytes(),
            file.language
                .as_deref()
                .map(|l| format!(", {}", l))
                .unwrap_or_default()
        );
    }
    println!();
}
