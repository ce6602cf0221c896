//! Static catalogs: import sources and OAuth provider classification

/// A project import source offered on the new-project page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSource {
	/// Display name
	pub name: &'static str,
	/// Value stored in the `import_sources` attribute
	pub source: &'static str,
}

/// Every import source, in display order
pub const IMPORT_SOURCES: [ImportSource; 8] = [
	ImportSource { name: "GitHub", source: "github" },
	ImportSource { name: "Bitbucket", source: "bitbucket" },
	ImportSource { name: "GitLab.com", source: "gitlab" },
	ImportSource { name: "Google Code", source: "google_code" },
	ImportSource { name: "FogBugz", source: "fogbugz" },
	ImportSource { name: "Repo by URL", source: "git" },
	ImportSource { name: "GitLab export", source: "gitlab_project" },
	ImportSource { name: "Gitea", source: "gitea" },
];

pub fn import_sources() -> &'static [ImportSource] {
	&IMPORT_SOURCES
}

pub fn import_source_values() -> impl Iterator<Item = &'static str> {
	IMPORT_SOURCES.iter().map(|s| s.source)
}

/// Form-based providers sign in through a username/password form instead of
/// a redirect button.
pub fn is_form_based_provider(name: &str) -> bool {
	name.starts_with("ldap") || name == "crowd"
}


// vim: ts=4
