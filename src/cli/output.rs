//! One-line renderings of API resources for terminal output

use crate::models::{
    Code, Commit, Gist, GistCommit, GistFork, Issue, Label, Repository, Topic, User,
};

/// A single terminal line describing a resource
pub trait Summary {
    fn line(&self) -> String;
}

impl Summary for Repository {
    fn line(&self) -> String {
        let mut line = format!("{}  ★ {}", self.full_name, self.stars);
        if let Some(language) = &self.language {
            line.push_str(&format!("  [{}]", language));
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            line.push_str(&format!("  {}", description));
        }
        line
    }
}

impl Summary for Commit {
    fn line(&self) -> String {
        format!(
            "{} {}  {}  ({})",
            short_sha(&self.sha),
            self.repository.full_name,
            self.summary(),
            self.commit.author.name
        )
    }
}

impl Summary for Code {
    fn line(&self) -> String {
        format!("{}: {}", self.repository.full_name, self.path)
    }
}

impl Summary for Issue {
    fn line(&self) -> String {
        let kind = if self.is_pull_request() { "PR" } else { "Issue" };
        format!(
            "{} #{} [{}] {}  @{}",
            kind,
            self.number,
            self.state.as_str(),
            self.title,
            self.user.login
        )
    }
}

impl Summary for User {
    fn line(&self) -> String {
        if self.is_organization() {
            format!("{} (organization)", self.login)
        } else {
            self.login.clone()
        }
    }
}

impl Summary for Topic {
    fn line(&self) -> String {
        match &self.short_description {
            Some(description) => format!("{}  {}", self.name, description),
            None => self.name.clone(),
        }
    }
}

impl Summary for Label {
    fn line(&self) -> String {
        match &self.description {
            Some(description) => format!("{} (#{})  {}", self.name, self.color, description),
            None => format!("{} (#{})", self.name, self.color),
        }
    }
}

impl Summary for Gist {
    fn line(&self) -> String {
        let owner = self
            .owner
            .as_ref()
            .map(|u| u.login.as_str())
            .unwrap_or("anonymous");
        let files = self.files.keys().cloned().collect::<Vec<_>>().join(", ");
        format!(
            "{}  @{}  {}  {}",
            self.id,
            owner,
            if self.public { "public" } else { "secret" },
            files
        )
    }
}

impl Summary for GistCommit {
    fn line(&self) -> String {
        format!(
            "{}  {}  +{} -{}",
            short_sha(&self.version),
            self.committed.format("%Y-%m-%d %H:%M"),
            self.change_status.additions,
            self.change_status.deletions
        )
    }
}

impl Summary for GistFork {
    fn line(&self) -> String {
        match self.forked_by() {
            Some(user) => format!("{}  @{}", self.id, user.login),
            None => format!("{}  (anonymous)", self.id),
        }
    }
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

/// Print one line per item, or a placeholder when there are none
pub fn print_list<T: Summary>(items: &[T], empty: &str) {
    if items.is_empty() {
        println!("{}", empty);
        return;
    }
    for item in items {
        println!("{}", item.line());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture<T: serde::de::DeserializeOwned>(name: &str) -> T {
        let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_repository_summary() {
        let repo: Repository = fixture("repository.json");
        let line = repo.line();
        assert!(line.starts_with("octocat/Hello-World"));
        assert!(line.contains('★'));
    }

    #[test]
    fn test_short_sha() {
        assert_eq!(short_sha("6dcb09b5b57875f334f61aebed695e2e4193db5e"), "6dcb09b");
        assert_eq!(short_sha("abc"), "abc");
    }

    #[test]
    fn test_fork_summary_names_the_forker() {
        let forks: Vec<GistFork> = fixture("gist_forks.json");
        assert!(forks[0].line().ends_with("@octocat"));
        assert!(forks[1].line().ends_with("@monalisa"));
    }

    #[test]
    fn test_gist_summary_lists_files() {
        let gist: Gist = fixture("gist.json");
        let line = gist.line();
        assert!(line.starts_with(&gist.id));
        for name in gist.files.keys() {
            assert!(line.contains(name.as_str()));
        }
    }
}
