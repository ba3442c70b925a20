//! Path relevance classification for `tenantsync-classifier`.
//!
//! [`RelevanceRules::classify`] maps a repository path to a relevance verdict
//! and, when relevant, the bundle slot it belongs to. Rules are evaluated in
//! priority order against the path relative to the configured project root:
//! the exact settings file first, then the prefix table, database connections
//! handled separately because they carry two identifiers and a folder-only
//! form.

use tenantsync_core::types::ConfigTarget;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Verdict for a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The path maps to a tenant-configuration slot.
    Relevant(ConfigTarget),
    /// Not tenant configuration; dropped without error.
    Irrelevant,
}

impl Classification {
    pub fn is_relevant(&self) -> bool {
        matches!(self, Classification::Relevant(_))
    }
}

/// Verdict for a folder path during tree traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderVerdict {
    /// The folder may contain relevant files; list its children.
    Descend,
    /// The root folder of a database connection. Relevant on its own (the
    /// connection exists even with zero scripts) and descended into.
    DatabaseRoot { connection: String },
    /// Nothing relevant can live under this folder.
    Skip,
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

const SETTINGS_FILE: &str = "tenant.json";
const DATABASE_PREFIX: &str = "database-connections/";

/// Extensions accepted for rule and database-connection scripts.
const SCRIPT_EXTENSIONS: &[&str] = &["js", "json"];
/// Extensions accepted for page, guardian, and email-template assets.
const ASSET_EXTENSIONS: &[&str] = &["html", "json"];

/// Prefix → accepted extensions → target table, checked in order. Adding a
/// category is one row here plus its bundle slot; traversal and decoding
/// stay untouched.
const PREFIX_RULES: &[(&str, &[&str], fn(String) -> ConfigTarget)] = &[
    ("rules/", SCRIPT_EXTENSIONS, |name| ConfigTarget::Rule {
        name,
    }),
    ("pages/", ASSET_EXTENSIONS, |name| ConfigTarget::Page {
        name,
    }),
    ("guardian/", ASSET_EXTENSIONS, |name| ConfigTarget::Guardian {
        name,
    }),
    ("email-templates/", ASSET_EXTENSIONS, |name| {
        ConfigTarget::EmailTemplate { name }
    }),
];

// ---------------------------------------------------------------------------
// RelevanceRules
// ---------------------------------------------------------------------------

/// Stateless path matcher, built once at startup from the configured
/// project root (e.g. `$/TFVC-test/tenant`).
#[derive(Debug, Clone)]
pub struct RelevanceRules {
    root: String,
}

impl RelevanceRules {
    pub fn new(project_path: &str) -> Self {
        Self {
            root: project_path.trim_end_matches('/').to_owned(),
        }
    }

    /// Classify a file path reported by the provider.
    ///
    /// A bare folder path (a strict prefix of a file rule) gets no file-level
    /// verdict here; folders go through [`RelevanceRules::classify_folder`].
    /// The one exception is a database connection folder, which is relevant
    /// as a path in its own right.
    pub fn classify(&self, path: &str) -> Classification {
        let Some(rel) = self.relative(path) else {
            return Classification::Irrelevant;
        };

        if rel == SETTINGS_FILE {
            return Classification::Relevant(ConfigTarget::Settings);
        }

        if let Some(rest) = rel.strip_prefix(DATABASE_PREFIX) {
            return classify_database(rest);
        }

        for (prefix, extensions, target) in PREFIX_RULES {
            if let Some(rest) = rel.strip_prefix(prefix) {
                return match split_known_extension(last_segment(rest), extensions) {
                    Some(name) => Classification::Relevant(target(name.to_owned())),
                    None => Classification::Irrelevant,
                };
            }
        }

        Classification::Irrelevant
    }

    /// Decide whether traversal should descend into a folder.
    pub fn classify_folder(&self, path: &str) -> FolderVerdict {
        let Some(rel) = self.relative(path) else {
            return FolderVerdict::Skip;
        };

        // The project root itself.
        if rel.is_empty() {
            return FolderVerdict::Descend;
        }

        if let Some(rest) = rel.strip_prefix(DATABASE_PREFIX) {
            let mut segments = rest.split('/').filter(|s| !s.is_empty());
            let connection = segments.next().unwrap_or_default();
            if connection.is_empty() {
                return FolderVerdict::Skip;
            }
            return match segments.next() {
                // Nested folder inside a connection; scripts may live below.
                Some(_) => FolderVerdict::Descend,
                None => FolderVerdict::DatabaseRoot {
                    connection: connection.to_owned(),
                },
            };
        }

        // Descend iff the folder sits on the path of some rule prefix,
        // either above it (`database-connections` itself) or below it
        // (`rules/subfolder`).
        let dir = format!("{rel}/");
        let on_rule_path = PREFIX_RULES
            .iter()
            .map(|(prefix, _, _)| *prefix)
            .chain(std::iter::once(DATABASE_PREFIX))
            .any(|prefix| prefix.starts_with(&dir) || dir.starts_with(prefix));

        if on_rule_path {
            FolderVerdict::Descend
        } else {
            FolderVerdict::Skip
        }
    }

    /// Strip the configured root, respecting the `/` boundary.
    /// `None` means the path lives outside the project root.
    fn relative<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(&self.root)?;
        if rest.is_empty() {
            return Some("");
        }
        rest.strip_prefix('/')
    }
}

fn classify_database(rest: &str) -> Classification {
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => Classification::Irrelevant,
        // Directory-only entry: the connection exists, no scripts yet. A
        // dotted name at this depth is a stray file, not a connection.
        [entry] => {
            if entry.contains('.') {
                return Classification::Irrelevant;
            }
            Classification::Relevant(ConfigTarget::DatabaseFolder {
                connection: (*entry).to_owned(),
            })
        }
        [connection, .., file] => match split_known_extension(file, SCRIPT_EXTENSIONS) {
            Some(script) => Classification::Relevant(ConfigTarget::DatabaseScript {
                connection: (*connection).to_owned(),
                script: script.to_owned(),
            }),
            None => Classification::Irrelevant,
        },
    }
}

fn last_segment(rest: &str) -> &str {
    rest.rsplit('/').next().unwrap_or(rest)
}

/// `Some(stem)` when the filename carries one of the accepted extensions
/// (matched case-insensitively); `None` otherwise.
fn split_known_extension<'a>(segment: &'a str, extensions: &[&str]) -> Option<&'a str> {
    let (base, ext) = segment.rsplit_once('.')?;
    if base.is_empty() {
        return None;
    }
    let ext = ext.to_ascii_lowercase();
    extensions.iter().any(|e| *e == ext).then_some(base)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
