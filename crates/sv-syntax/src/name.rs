//! Name syntax: identifiers, scoped names (`pkg::x`, `$unit::x`, `local::x`),
//! and hierarchical names (`a.b.c`, `$root.x`).

use std::fmt;

/// The root of a scoped (`::`-chained) name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopedRoot {
    /// `$unit::...`
    Unit,
    /// `local::...`
    Local,
    /// A plain leading identifier, e.g. `pkg` in `pkg::x`.
    Name(String),
}

impl fmt::Display for ScopedRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopedRoot::Unit => write!(f, "$unit"),
            ScopedRoot::Local => write!(f, "local"),
            ScopedRoot::Name(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopedName {
    pub root: ScopedRoot,
    /// Remaining `::`-separated segments, in source order.
    pub segments: Vec<String>,
}

impl fmt::Display for ScopedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for segment in &self.segments {
            write!(f, "::{segment}")?;
        }
        Ok(())
    }
}

/// The root of a hierarchical (`.`-chained) name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HierarchicalRoot {
    /// `$root.x`
    Root,
    /// A plain leading identifier, e.g. `a` in `a.b.c`.
    Name(String),
}

impl fmt::Display for HierarchicalRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HierarchicalRoot::Root => write!(f, "$root"),
            HierarchicalRoot::Name(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchicalName {
    pub root: HierarchicalRoot,
    /// Remaining `.`-separated segments, in source order.
    pub segments: Vec<String>,
}

impl fmt::Display for HierarchicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for segment in &self.segments {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

/// The result of [`parse_name`]: an unqualified identifier, a scoped
/// (package-rooted) name, or a hierarchical (instance-rooted) name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameSyntax {
    Identifier(String),
    Scoped(ScopedName),
    Hierarchical(HierarchicalName),
}

impl fmt::Display for NameSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameSyntax::Identifier(name) => write!(f, "{name}"),
            NameSyntax::Scoped(scoped) => write!(f, "{scoped}"),
            NameSyntax::Hierarchical(hier) => write!(f, "{hier}"),
        }
    }
}

/// Parses a name string into [`NameSyntax`].
///
/// This is the one parsing operation the Compilation manager's public
/// contract names directly (`Compilation::parseName` in the governing
/// front end) — programmatic lookups go through it rather than through
/// the full expression grammar. `to_string()` on the result round-trips to
/// the original text for every well-formed name.
#[must_use]
pub fn parse_name(text: &str) -> NameSyntax {
    if text.contains("::") {
        let mut parts = text.split("::");
        // `split` on a string containing "::" always yields at least two parts.
        let first = parts.next().unwrap_or_default();
        let root = match first {
            "$unit" => ScopedRoot::Unit,
            "local" => ScopedRoot::Local,
            other => ScopedRoot::Name(other.to_string()),
        };
        let segments = parts.map(str::to_string).collect();
        NameSyntax::Scoped(ScopedName { root, segments })
    } else if text.contains('.') {
        let mut parts = text.split('.');
        let first = parts.next().unwrap_or_default();
        let root = if first == "$root" {
            HierarchicalRoot::Root
        } else {
            HierarchicalRoot::Name(first.to_string())
        };
        let segments = parts.map(str::to_string).collect();
        NameSyntax::Hierarchical(HierarchicalName { root, segments })
    } else {
        NameSyntax::Identifier(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_plain_identifier() {
        let parsed = parse_name("foo");
        assert_eq!(parsed, NameSyntax::Identifier("foo".to_string()));
        assert_eq!(parsed.to_string(), "foo");
    }

    #[test]
    fn round_trips_scoped_name_with_three_segments() {
        let text = "$unit::foo::bar";
        let parsed = parse_name(text);
        match &parsed {
            NameSyntax::Scoped(scoped) => {
                assert_eq!(scoped.root, ScopedRoot::Unit);
                assert_eq!(scoped.segments, vec!["foo".to_string(), "bar".to_string()]);
            }
            other => panic!("expected a scoped name, got {other:?}"),
        }
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn round_trips_package_scoped_name() {
        let text = "my_pkg::my_type";
        let parsed = parse_name(text);
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn round_trips_hierarchical_name() {
        let text = "top.sub.leaf";
        let parsed = parse_name(text);
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn round_trips_root_hierarchical_name() {
        let text = "$root.dut";
        let parsed = parse_name(text);
        match &parsed {
            NameSyntax::Hierarchical(hier) => assert_eq!(hier.root, HierarchicalRoot::Root),
            other => panic!("expected a hierarchical name, got {other:?}"),
        }
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn round_trips_local_scoped_name() {
        let text = "local::x";
        let parsed = parse_name(text);
        assert_eq!(parsed.to_string(), text);
    }
}
