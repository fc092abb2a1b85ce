//! In-memory archetype registry.

use std::collections::BTreeMap;

use delve_core::{ArchetypeOracle, ArchetypeTemplate};

/// Archetype templates keyed by template id.
///
/// Built once per session and shared read-only with the core.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchetypeCatalog {
    templates: BTreeMap<String, ArchetypeTemplate>,
}

impl ArchetypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries with a repeated id replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, ArchetypeTemplate)>) -> Self {
        Self {
            templates: entries.into_iter().collect(),
        }
    }

    pub fn insert(
        &mut self,
        id: impl Into<String>,
        template: ArchetypeTemplate,
    ) -> Option<ArchetypeTemplate> {
        self.templates.insert(id.into(), template)
    }

    pub fn with(mut self, id: impl Into<String>, template: ArchetypeTemplate) -> Self {
        self.insert(id, template);
        self
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl ArchetypeOracle for ArchetypeCatalog {
    fn template(&self, id: &str) -> Option<&ArchetypeTemplate> {
        self.templates.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{Archetype, AttackProfile, CombatStats, DamageType, DiceExpr};

    fn brute(name: &str) -> ArchetypeTemplate {
        ArchetypeTemplate::new(
            name,
            Archetype::Brute,
            CombatStats::new(12, 1, 0),
            AttackProfile::natural("club", DiceExpr::new(1, 6, 0), DamageType::Bludgeoning),
        )
    }

    #[test]
    fn lookups_go_through_the_oracle() {
        let catalog = ArchetypeCatalog::new().with("orc", brute("orc"));
        let oracle: &dyn ArchetypeOracle = &catalog;
        assert!(oracle.contains("orc"));
        assert_eq!(oracle.template("orc").map(|t| t.name.as_str()), Some("orc"));
        assert!(oracle.template("troll").is_none());
    }

    #[test]
    fn repeated_ids_keep_the_last_entry() {
        let catalog = ArchetypeCatalog::from_entries([
            ("orc".to_string(), brute("old orc")),
            ("orc".to_string(), brute("new orc")),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.template("orc").map(|t| t.name.clone()),
            Some("new orc".to_string())
        );
    }
}
