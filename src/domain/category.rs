//! Tank classification and stage applicability
//!
//! Pattern rules classify an entity once, when its level is loaded. The
//! resulting `CategoryTable` is what the tracker and aggregator consult.

use std::collections::{HashMap, HashSet};

use crate::schemas::{
    ClassificationRules, Level, Site, Stage, SubTank, Tank, TankCategory, TankProfile,
};

use super::catalog::applicable_stages;

/// The identifying strings of a tank or sub-tank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TankDescriptor<'a> {
    pub id: &'a str,
    /// Set when the descriptor represents a sub-tank
    pub parent_id: Option<&'a str>,
    /// Free-text type; a sub-tank inherits its parent's
    pub kind: &'a str,
}

impl<'a> TankDescriptor<'a> {
    pub fn for_tank(tank: &'a Tank) -> Self {
        TankDescriptor {
            id: &tank.id,
            parent_id: None,
            kind: &tank.kind,
        }
    }

    pub fn for_sub_tank(parent: &'a Tank, sub_tank: &'a SubTank) -> Self {
        TankDescriptor {
            id: &sub_tank.id,
            parent_id: Some(&parent.id),
            kind: &parent.kind,
        }
    }

    fn any_id_contains(&self, marker: &str) -> bool {
        self.id.contains(marker) || self.parent_id.is_some_and(|p| p.contains(marker))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

/// Classifies descriptors using configured pattern rules
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: ClassificationRules,
    pump_pits: HashSet<String>,
}

impl Classifier {
    pub fn new(rules: ClassificationRules) -> Self {
        let pump_pits = rules.pump_pit_ids.iter().cloned().collect();
        Classifier { rules, pump_pits }
    }

    /// Category and pump-pit flag of a descriptor. Never fails: anything
    /// unrecognised is `Standard`.
    pub fn classify(&self, desc: &TankDescriptor<'_>) -> TankProfile {
        if let Some(entry) = self.rules.overrides.get(desc.id) {
            let pump_pit = entry.pump_pit.unwrap_or_else(|| self.is_pump_pit(desc));
            return TankProfile::new(entry.category, pump_pit);
        }
        TankProfile::new(self.category(desc), self.is_pump_pit(desc))
    }

    /// Stage-set category, first matching rule wins
    pub fn category(&self, desc: &TankDescriptor<'_>) -> TankCategory {
        let rules = &self.rules;

        if desc.any_id_contains(&rules.dwall_marker) {
            // Only a sub-tank can be the primary member of the family
            let primary =
                desc.parent_id.is_some() && desc.id.ends_with(&rules.primary_sub_tank_suffix);
            return if primary {
                TankCategory::DwallAnchoredPrimary
            } else {
                TankCategory::DwallAnchored
            };
        }

        let in_limited_family = rules.limited_families.iter().any(|family| {
            !family.all_of.is_empty() && family.all_of.iter().all(|m| desc.any_id_contains(m))
        });
        if in_limited_family {
            return TankCategory::LimitedNoAnchors;
        }

        if contains_ignore_case(desc.kind, &rules.rain_water_marker)
            && contains_ignore_case(desc.kind, &rules.valve_marker)
        {
            return TankCategory::LimitedNoAnchors;
        }

        TankCategory::Standard
    }

    /// Membership in the pump-pit table, or a chiller room by type
    pub fn is_pump_pit(&self, desc: &TankDescriptor<'_>) -> bool {
        self.pump_pits.contains(desc.id)
            || desc.parent_id.is_some_and(|p| self.pump_pits.contains(p))
            || contains_ignore_case(desc.kind, &self.rules.chiller_room_marker)
    }
}

/// Resolve the ordered applicable-stage list of a descriptor
pub fn resolve(classifier: &Classifier, desc: &TankDescriptor<'_>) -> Vec<Stage> {
    applicable_stages(&classifier.classify(desc))
}

/// Lookup key of an entity: ids are only unique within a level, and a
/// sub-tank id only within its parent.
type ProfileKey = (Level, Option<String>, String);

fn profile_key(level: Level, desc: &TankDescriptor<'_>) -> ProfileKey {
    (level, desc.parent_id.map(str::to_string), desc.id.to_string())
}

/// Profiles of every tank and sub-tank, assigned once at load time.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    classifier: Classifier,
    profiles: HashMap<ProfileKey, TankProfile>,
}

impl CategoryTable {
    /// An empty table; every lookup falls back to the classifier
    pub fn new(classifier: Classifier) -> Self {
        CategoryTable {
            classifier,
            profiles: HashMap::new(),
        }
    }

    /// Classify every tank and sub-tank of the site
    pub fn build(classifier: Classifier, site: &Site) -> Self {
        let mut table = CategoryTable::new(classifier);
        for (level, tank) in site.tanks() {
            table.register(level, tank);
        }
        table
    }

    /// Classify a tank and its sub-tanks, keeping any existing assignment
    pub fn register(&mut self, level: Level, tank: &Tank) {
        let descriptors = std::iter::once(TankDescriptor::for_tank(tank)).chain(
            tank.sub_tanks
                .iter()
                .map(|sub_tank| TankDescriptor::for_sub_tank(tank, sub_tank)),
        );
        for desc in descriptors {
            let classifier = &self.classifier;
            self.profiles
                .entry(profile_key(level, &desc))
                .or_insert_with(|| classifier.classify(&desc));
        }
    }

    pub fn profile(&self, level: Level, desc: &TankDescriptor<'_>) -> TankProfile {
        self.profiles
            .get(&profile_key(level, desc))
            .copied()
            .unwrap_or_else(|| self.classifier.classify(desc))
    }

    pub fn tank_profile(&self, level: Level, tank: &Tank) -> TankProfile {
        self.profile(level, &TankDescriptor::for_tank(tank))
    }

    pub fn sub_tank_profile(&self, level: Level, parent: &Tank, sub_tank: &SubTank) -> TankProfile {
        self.profile(level, &TankDescriptor::for_sub_tank(parent, sub_tank))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
