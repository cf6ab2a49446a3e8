//! Host entry type and host-spec parsing.

/// A host declared in the directory file.
///
/// The connecting caller reads `name`, `user`, and `port` to open its own
/// connections; this crate never opens any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Unique host name, stripped of any `user@` prefix and `:port` suffix.
    pub name: String,
    /// Login name from a `user@` prefix; `None` means the caller's default.
    pub user: Option<String>,
    /// Connection port from a `:port` suffix; `None` means the default port.
    pub port: Option<u16>,
    /// Tags in column order; duplicates within one line are collapsed.
    pub tags: Vec<String>,
    /// Declaration-order index, stable across redeclarations.
    pub(crate) sequence: usize,
}

impl Host {
    /// Returns the declaration-order index assigned at first declaration.
    #[must_use]
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    /// Returns the connection destination: `user@name` or just `name`.
    #[must_use]
    pub fn destination(&self) -> String {
        match &self.user {
            Some(user) => format!("{user}@{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Returns `true` if this host carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A parsed `[user@]name[:port]` host spec, before it becomes a [`Host`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSpec {
    /// Bare host name.
    pub name: String,
    /// Optional login name.
    pub user: Option<String>,
    /// Optional connection port.
    pub port: Option<u16>,
}

impl HostSpec {
    /// Parses a whitespace-free host spec token.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason if the user part, name part, or port
    /// part is empty or the port is not a valid number.
    pub fn parse(token: &str) -> Result<Self, String> {
        let (user, rest) = match token.split_once('@') {
            Some(("", _)) => return Err(format!("empty user in host spec {token:?}")),
            Some((user, rest)) => (Some(user.to_string()), rest),
            None => (None, token),
        };

        let (name, port) = match rest.split_once(':') {
            Some((name, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| format!("invalid port {port:?} in host spec {token:?}"))?;
                (name, Some(port))
            }
            None => (rest, None),
        };

        if name.is_empty() {
            return Err(format!("empty host name in host spec {token:?}"));
        }

        Ok(Self {
            name: name.to_string(),
            user,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name() {
        let spec = HostSpec::parse("bilbo").unwrap();
        assert_eq!(spec.name, "bilbo");
        assert_eq!(spec.user, None);
        assert_eq!(spec.port, None);
    }

    #[test]
    fn test_name_with_port() {
        let spec = HostSpec::parse("frodo:2222").unwrap();
        assert_eq!(spec.name, "frodo");
        assert_eq!(spec.user, None);
        assert_eq!(spec.port, Some(2222));
    }

    #[test]
    fn test_name_with_user() {
        let spec = HostSpec::parse("me@gandalf").unwrap();
        assert_eq!(spec.name, "gandalf");
        assert_eq!(spec.user.as_deref(), Some("me"));
        assert_eq!(spec.port, None);
    }

    #[test]
    fn test_user_and_port() {
        let spec = HostSpec::parse("root@sauron:22022").unwrap();
        assert_eq!(spec.name, "sauron");
        assert_eq!(spec.user.as_deref(), Some("root"));
        assert_eq!(spec.port, Some(22022));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(HostSpec::parse("frodo:ring").is_err());
        assert!(HostSpec::parse("frodo:99999").is_err());
        assert!(HostSpec::parse("frodo:").is_err());
    }

    #[test]
    fn test_empty_parts_rejected() {
        assert!(HostSpec::parse("@gandalf").is_err());
        assert!(HostSpec::parse("me@").is_err());
        assert!(HostSpec::parse("me@:22").is_err());
    }

    #[test]
    fn test_destination_with_user() {
        let host = Host {
            name: "gandalf".into(),
            user: Some("me".into()),
            port: None,
            tags: vec![],
            sequence: 0,
        };
        assert_eq!(host.destination(), "me@gandalf");
    }

    #[test]
    fn test_destination_without_user() {
        let host = Host {
            name: "bilbo".into(),
            user: None,
            port: Some(2222),
            tags: vec!["prod".into()],
            sequence: 3,
        };
        assert_eq!(host.destination(), "bilbo");
        assert!(host.has_tag("prod"));
        assert!(!host.has_tag("devel"));
        assert_eq!(host.sequence(), 3);
    }
}
