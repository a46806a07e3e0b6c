//! User and repository lookups

use crate::error::Result;
use crate::github::repos::parse_full_name;
use crate::github::GitHub;

/// Handle `ghrest user <login>`
pub async fn handle_user(github: &GitHub, login: &str) -> Result<()> {
    let user = github.users().get(login).await?;
    let urls = user.urls();

    println!("{} (#{})", user.login, user.id);
    println!("Type: {}", if user.is_organization() { "organization" } else { "user" });
    if user.site_admin {
        println!("Site admin");
    }
    println!("Profile: {}", urls.webpage);
    Ok(())
}

/// Handle `ghrest repo <owner/name>`
pub async fn handle_repo(github: &GitHub, full_name: &str) -> Result<()> {
    let (owner, name) = parse_full_name(full_name)?;
    let repo = github.repos().get(owner, name).await?;
    let urls = repo.urls();

    println!("{}", repo.full_name);
    if let Some(description) = &repo.description {
        println!("{}", description);
    }
    println!();
    println!("★ {}  forks {}  open issues {}", repo.stars, repo.forks, repo.open_issues);
    if let Some(language) = &repo.language {
        println!("Language: {}", language);
    }
    if let Some(license) = &repo.license {
        println!("License: {}", license.name);
    }
    println!("Default branch: {}", repo.default_branch);
    println!("Size: {} KB", repo.size.as_kilobytes());
    if !repo.topics.is_empty() {
        println!("Topics: {}", repo.topics.join(", "));
    }
    if repo.archived {
        println!("Archived");
    }
    println!("URL: {}", urls.webpage);
    println!("Clone: {}", urls.others.clone);
    Ok(())
}
