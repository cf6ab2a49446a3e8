//! Output rendering for resolved host lists and usage tables.

use directory::Usage;

/// Renders names space-joined on one line, or one per line.
///
/// An empty list renders as the empty string.
pub fn render_names(names: &[&str], one_per_line: bool) -> String {
    if one_per_line {
        names.join("\n")
    } else {
        names.join(" ")
    }
}

/// Prints names to stdout; nothing at all for an empty list.
pub fn print_names(names: &[&str], one_per_line: bool) {
    let rendered = render_names(names, one_per_line);
    if !rendered.is_empty() {
        println!("{rendered}");
    }
}

/// Renders usage rows as an aligned `name kind count` table.
pub fn usage_table(rows: &[Usage]) -> String {
    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    rows.iter()
        .map(|r| {
            format!(
                "{name:<name_width$}  {kind:<5}  {count}",
                name = r.name,
                kind = r.kind.to_string(),
                count = r.count,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory::NameKind;

    #[test]
    fn test_render_space_joined() {
        assert_eq!(render_names(&["bilbo", "tolkien"], false), "bilbo tolkien");
    }

    #[test]
    fn test_render_one_per_line() {
        assert_eq!(render_names(&["bilbo", "tolkien"], true), "bilbo\ntolkien");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_names(&[], false), "");
        assert_eq!(render_names(&[], true), "");
    }

    #[test]
    fn test_usage_table_alignment() {
        let rows = vec![
            Usage {
                name: "prod".into(),
                kind: NameKind::Tag,
                count: 2,
            },
            Usage {
                name: "sunprod".into(),
                kind: NameKind::Macro,
                count: 1,
            },
        ];
        assert_eq!(
            usage_table(&rows),
            "prod     tag    2\nsunprod  macro  1"
        );
    }

    #[test]
    fn test_usage_table_empty() {
        assert_eq!(usage_table(&[]), "");
    }
}
