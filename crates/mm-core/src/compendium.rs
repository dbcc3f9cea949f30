use serde::{Deserialize, Serialize};

/// The document type a compendium pack holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackKind {
    /// Item templates.
    Item,
    /// Actor templates.
    Actor,
}

/// One index entry of a compendium pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompendiumEntry {
    /// Entry name.
    pub name: String,
    /// The host's document subtype, e.g. `skill` or `weapon`.
    pub entry_type: String,
}

impl CompendiumEntry {
    /// Create an index entry.
    pub fn new(name: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: entry_type.into(),
        }
    }
}

/// A read-only catalog of templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompendiumPack {
    /// Pack label.
    pub name: String,
    /// Document type held by the pack.
    pub kind: PackKind,
    /// Index entries.
    #[serde(default)]
    pub entries: Vec<CompendiumEntry>,
}

impl CompendiumPack {
    /// Names of skill entries, in index order. Non-item packs have none.
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| self.kind == PackKind::Item && e.entry_type == "skill")
            .map(|e| e.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_item_packs_list_skills() {
        let items = CompendiumPack {
            name: "Core Skills".into(),
            kind: PackKind::Item,
            entries: vec![
                CompendiumEntry::new("Fighting", "skill"),
                CompendiumEntry::new("Long Sword", "weapon"),
            ],
        };
        assert_eq!(items.skill_names().collect::<Vec<_>>(), vec!["Fighting"]);

        let actors = CompendiumPack {
            name: "Bestiary".into(),
            kind: PackKind::Actor,
            entries: vec![CompendiumEntry::new("Shooting", "skill")],
        };
        assert_eq!(actors.skill_names().count(), 0);
    }
}
