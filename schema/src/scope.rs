use crate::tree::{DeclId, SchemaFile};

/// Outcome of looking a bare type name up from some declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(DeclId),
    /// Several distinct declarations matched within the nearest tier that matched at all.
    Ambiguous(Vec<DeclId>),
    Missing,
}

impl SchemaFile {
    /// Every declaration nested below `id`, depth-first, parents first.
    pub fn descendants(&self, id: DeclId) -> Vec<DeclId> {
        let mut result = Vec::new();
        for &child in self.decl(id).children() {
            result.push(child);
            result.extend(self.descendants(child));
        }
        result
    }

    /// The children of `id`'s parent, `id` included. For a top-level declaration that
    /// is every top-level declaration.
    pub fn siblings(&self, id: DeclId) -> Vec<DeclId> {
        match self.decl(id).parent {
            Some(parent) => self.decl(parent).children().to_vec(),
            None => self.roots.clone(),
        }
    }

    /// Enclosing declarations, nearest first. The file root is not a declaration and
    /// never appears.
    pub fn ancestors(&self, id: DeclId) -> Vec<DeclId> {
        let mut result = Vec::new();
        let mut current = self.decl(id).parent;
        while let Some(parent) = current {
            result.push(parent);
            current = self.decl(parent).parent;
        }
        result
    }

    /// Declared names from the outermost ancestor down to `id` itself.
    pub fn chain(&self, id: DeclId) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .ancestors(id)
            .into_iter()
            .map(|ancestor| self.decl(ancestor).name.as_str())
            .collect();
        names.reverse();
        names.push(self.decl(id).name.as_str());
        names
    }

    /// Candidate declarations for a type reference made inside `from`, grouped into
    /// tiers in search order: descendants, then siblings, then one tier per ancestor
    /// holding the ancestor and its siblings.
    pub fn scope_tiers(&self, from: DeclId) -> Vec<Vec<DeclId>> {
        let mut tiers = vec![self.descendants(from), self.siblings(from)];
        for ancestor in self.ancestors(from) {
            let mut tier = vec![ancestor];
            for sibling in self.siblings(ancestor) {
                if sibling != ancestor {
                    tier.push(sibling);
                }
            }
            tiers.push(tier);
        }
        tiers
    }

    /// Resolves `name` as seen from inside `from`. The first tier holding a match
    /// decides; two matches in that tier are reported rather than picked between.
    pub fn lookup(&self, from: DeclId, name: &str) -> Lookup {
        for tier in self.scope_tiers(from) {
            let matches: Vec<DeclId> = tier
                .into_iter()
                .filter(|&candidate| self.decl(candidate).name == name)
                .collect();
            match matches.len() {
                0 => continue,
                1 => return Lookup::Found(matches[0]),
                _ => return Lookup::Ambiguous(matches),
            }
        }
        Lookup::Missing
    }
}
