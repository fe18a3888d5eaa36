//! Import table: qualifier → package path resolution.

use sift_core::{FxHashMap, FxHashSet, ImportDecl};

/// Resolves the qualifier a call is written with to the package paths it
/// may refer to. A plain import is addressed by its default name (last
/// path segment), an aliased import only by its alias, and a wildcard
/// import qualifies unqualified calls.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    by_qualifier: FxHashMap<String, Vec<String>>,
    wildcard: Vec<String>,
    all: FxHashSet<String>,
}

impl ImportTable {
    pub fn new(imports: &[ImportDecl]) -> Self {
        let mut table = Self::default();
        for import in imports {
            table.all.insert(import.path.clone());
            if import.wildcard {
                table.wildcard.push(import.path.clone());
                continue;
            }
            let qualifier = import
                .alias
                .as_deref()
                .unwrap_or_else(|| import.default_name());
            table
                .by_qualifier
                .entry(qualifier.to_string())
                .or_default()
                .push(import.path.clone());
        }
        table
    }

    /// Package paths a qualifier may refer to. Distinct packages sharing a
    /// default name all come back; the caller intersects with its own set.
    pub fn resolve(&self, qualifier: &str) -> &[String] {
        self.by_qualifier
            .get(qualifier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `package` is wildcard-imported, making its names available
    /// unqualified.
    pub fn has_wildcard_for(&self, package: &str) -> bool {
        self.wildcard.iter().any(|p| p == package)
    }

    /// Whether the file imports `package` in any form.
    pub fn imports_package(&self, package: &str) -> bool {
        self.all.contains(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_import_resolves_by_default_name() {
        let table = ImportTable::new(&[ImportDecl::plain("math/rand")]);
        assert_eq!(table.resolve("rand"), ["math/rand"]);
        assert!(table.resolve("math/rand").is_empty());
        assert!(table.imports_package("math/rand"));
    }

    #[test]
    fn alias_shadows_default_name() {
        let table = ImportTable::new(&[ImportDecl::aliased("math/rand", "mrand")]);
        assert_eq!(table.resolve("mrand"), ["math/rand"]);
        assert!(table.resolve("rand").is_empty());
    }

    #[test]
    fn wildcard_does_not_qualify() {
        let table = ImportTable::new(&[ImportDecl::wildcard("math/rand")]);
        assert!(table.resolve("rand").is_empty());
        assert!(table.has_wildcard_for("math/rand"));
        assert!(table.imports_package("math/rand"));
    }
}
