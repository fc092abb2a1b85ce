//! Archetype stat block loader.

use std::path::Path;

use anyhow::{Context, ensure};
use delve_core::ArchetypeTemplate;

use crate::catalog::ArchetypeCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for archetype templates from RON.
///
/// RON format: `Vec<(String, ArchetypeTemplate)>`, the string being the
/// template id scenarios refer to.
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    pub fn load(path: &Path) -> LoadResult<ArchetypeCatalog> {
        let content = read_file(path)?;
        Self::from_str(&content).with_context(|| format!("in {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> LoadResult<ArchetypeCatalog> {
        let entries: Vec<(String, ArchetypeTemplate)> =
            ron::from_str(content).context("failed to parse archetype RON")?;

        for (id, template) in &entries {
            ensure!(!id.is_empty(), "archetype id must not be empty");
            ensure!(
                template.stats.max_hp > 0,
                "archetype '{id}' must have positive max_hp"
            );
            if let Some(spell) = template.abilities.hazard {
                ensure!(
                    spell.duration > 0,
                    "archetype '{id}' casts a hazard with zero duration"
                );
            }
        }

        let count = entries.len();
        let catalog = ArchetypeCatalog::from_entries(entries);
        ensure!(
            catalog.len() == count,
            "archetype ids must be unique ({} duplicates)",
            count - catalog.len()
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{Archetype, ArchetypeOracle, DamageType, HazardKind};
    use std::io::Write;

    const SAMPLE: &str = r#"[
        ("orc", (
            name: "orc",
            archetype: Brute,
            stats: (max_hp: 14, power: 1, defense: 1),
            attack: (name: "cleaver", damage: "1d8", damage_type: Slashing),
        )),
        ("pyro", (
            name: "pyromancer",
            archetype: Pyromancer,
            stats: (max_hp: 9, resistances: ({Fire: 100})),
            attack: (name: "staff", damage: "1d4", damage_type: Bludgeoning),
            abilities: (
                cooldown: 4,
                range: 5,
                danger_radius: 2,
                hazard: Some((kind: Fire, base_damage: 6, duration: 3, radius: 1)),
            ),
            max_raises: 2,
        )),
    ]"#;

    #[test]
    fn parses_templates_with_defaults() {
        let catalog = ArchetypeLoader::from_str(SAMPLE).expect("parse");
        assert_eq!(catalog.len(), 2);

        let orc = catalog.template("orc").expect("orc");
        assert_eq!(orc.archetype, Archetype::Brute);
        assert_eq!(orc.stats.max_hp, 14);
        assert_eq!(orc.stats.crit_threshold, 20);
        assert_eq!(orc.attack.reach, 1);
        assert_eq!(orc.max_raises, 1);

        let pyro = catalog.template("pyro").expect("pyro");
        assert_eq!(pyro.stats.resistances.get(DamageType::Fire), 100);
        assert_eq!(pyro.abilities.hazard.map(|h| h.kind), Some(HazardKind::Fire));
        assert_eq!(pyro.max_raises, 2);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let doubled = r#"[
            ("orc", (name: "a", archetype: Brute, stats: (max_hp: 5),
                attack: (name: "x", damage: "1d2", damage_type: Piercing))),
            ("orc", (name: "b", archetype: Brute, stats: (max_hp: 5),
                attack: (name: "x", damage: "1d2", damage_type: Piercing))),
        ]"#;
        assert!(ArchetypeLoader::from_str(doubled).is_err());
    }

    #[test]
    fn bad_dice_fail_to_load() {
        let broken = r#"[("orc", (name: "a", archetype: Brute, stats: (max_hp: 5),
            attack: (name: "x", damage: "d", damage_type: Piercing)))]"#;
        assert!(ArchetypeLoader::from_str(broken).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write");
        let catalog = ArchetypeLoader::load(file.path()).expect("load");
        assert!(catalog.contains("pyro"));
    }
}
