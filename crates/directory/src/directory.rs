use crate::error::{LoadError, MalformedLine};
use crate::host::{Host, HostSpec};
use crate::parser::{self, Line};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable overriding the default directory-file path.
pub const PATH_ENV: &str = "MUSTER_FILE";

/// Returns the directory-file path: `$MUSTER_FILE` if set, else `~/.muster`.
pub fn directory_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".muster"))
}

/// A single identifier resolved against the directory.
///
/// Macros shadow tags, and tags shadow bare host names, when one name means
/// more than one thing.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom<'a> {
    /// A macro; its expression text is returned unevaluated.
    Macro {
        /// The macro name as stored.
        name: &'a str,
        /// The raw expression text.
        expr: &'a str,
    },
    /// A tag and the hosts carrying it, in declaration order.
    Tag(Vec<&'a Host>),
    /// A bare host name, matching only itself.
    Literal(&'a Host),
    /// Not a macro, tag, or host name. Resolves to the empty set.
    Unknown,
}

/// The loaded host directory: hosts, the tag index, and the macro table.
///
/// Built once per run by [`Directory::load`] (or [`Directory::parse`]) and
/// read-only afterwards. Malformed lines are skipped with a warning; an
/// unreadable source is the only fatal load failure.
#[derive(Debug, Default)]
pub struct Directory {
    /// Hosts in declaration order; a host's `sequence` is its index here.
    pub(crate) hosts: Vec<Host>,
    /// Host name to index in `hosts`.
    by_name: HashMap<String, usize>,
    /// Tag name to indices of carrying hosts, ascending.
    pub(crate) tag_index: HashMap<String, Vec<usize>>,
    /// Macro name to raw, unevaluated expression text.
    pub(crate) macros: HashMap<String, String>,
    /// Macro names in declaration order.
    pub(crate) macro_order: Vec<String>,
    /// Tag and macro names interleaved in first-seen order.
    pub(crate) name_order: Vec<String>,
}

impl Directory {
    /// Builds a directory from the full text of a directory file.
    ///
    /// Declarations are applied top to bottom; malformed lines are logged
    /// and skipped, never fatal.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut dir = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            match parser::classify(raw) {
                Ok(Line::Blank | Line::Comment) => {}
                Ok(Line::Macro { name, expr }) => dir.add_macro(name, expr),
                Ok(Line::Host { spec, tags }) => match HostSpec::parse(spec) {
                    Ok(spec) => dir.add_host(spec, &tags),
                    Err(reason) => warn!("skipping {}", MalformedLine { line, reason }),
                },
                Err(reason) => warn!("skipping {}", MalformedLine { line, reason }),
            }
        }

        dir.rebuild_tag_index();
        dir
    }

    /// Loads the directory from the default path (`$MUSTER_FILE` or
    /// `~/.muster`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// file cannot be read.
    pub fn load() -> Result<Self, LoadError> {
        let path = directory_path().ok_or(LoadError::NoHomeDir)?;
        Self::load_from_path(&path)
    }

    /// Loads the directory from a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read. A missing file is an
    /// error here: without a directory nothing downstream can proceed.
    pub fn load_from_path(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Applies one host declaration.
    ///
    /// A redeclared name overwrites `user`, `port`, and `tags` but keeps its
    /// original `sequence`.
    pub fn add_host(&mut self, spec: HostSpec, tags: &[&str]) {
        let mut line_tags: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            // Duplicates within one line are idempotent.
            if !line_tags.iter().any(|t| t == tag) {
                line_tags.push((*tag).to_string());
            }
            self.record_name(tag);
        }

        match self.by_name.get(&spec.name) {
            Some(&index) => {
                let host = &mut self.hosts[index];
                host.user = spec.user;
                host.port = spec.port;
                host.tags = line_tags;
            }
            None => {
                let sequence = self.hosts.len();
                self.by_name.insert(spec.name.clone(), sequence);
                self.hosts.push(Host {
                    name: spec.name,
                    user: spec.user,
                    port: spec.port,
                    tags: line_tags,
                    sequence,
                });
            }
        }
    }

    /// Applies one macro declaration. Redeclaration overwrites the
    /// expression text but keeps the original declaration position.
    pub fn add_macro(&mut self, name: &str, expr: &str) {
        if self
            .macros
            .insert(name.to_string(), expr.to_string())
            .is_none()
        {
            self.macro_order.push(name.to_string());
        }
        self.record_name(name);
    }

    /// Rebuilds the tag index by scanning all hosts.
    ///
    /// Called after parsing; call again after any out-of-band `add_host`.
    pub fn rebuild_tag_index(&mut self) {
        self.tag_index.clear();
        for (index, host) in self.hosts.iter().enumerate() {
            for tag in &host.tags {
                self.tag_index.entry(tag.clone()).or_default().push(index);
            }
        }
    }

    /// Resolves a single identifier, macros first, then tags, then bare
    /// host names. Unknown names resolve to [`Atom::Unknown`], not an error.
    #[must_use]
    pub fn resolve_atom(&self, name: &str) -> Atom<'_> {
        if let Some((name, expr)) = self.macros.get_key_value(name) {
            return Atom::Macro {
                name: name.as_str(),
                expr: expr.as_str(),
            };
        }
        if let Some(indices) = self.tag_index.get(name) {
            return Atom::Tag(indices.iter().map(|&i| &self.hosts[i]).collect());
        }
        if let Some(&index) = self.by_name.get(name) {
            return Atom::Literal(&self.hosts[index]);
        }
        Atom::Unknown
    }

    /// Looks up a host by name.
    #[must_use]
    pub fn host(&self, name: &str) -> Option<&Host> {
        self.by_name.get(name).map(|&i| &self.hosts[i])
    }

    /// Returns the number of declared hosts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Returns `true` if no hosts are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    fn record_name(&mut self, name: &str) {
        if !self.name_order.iter().any(|n| n == name) {
            self.name_order.push(name.to_string());
        }
    }
}
