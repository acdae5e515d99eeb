use std::collections::HashMap;

use super::body::BodyID;

/// Descriptive facts shown when a body is selected. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRecord {
    pub name: &'static str,
    pub diameter: &'static str,
    pub description: &'static str,
    pub distance_from_sun: &'static str,
    pub orbital_period: &'static str,
    pub rotation_period: &'static str,
    pub temperature: &'static str,
    pub distance_from_earth: Option<&'static str>,
}

impl InfoRecord {
    /// Label/value rows of the fact table, in display order. The distance to
    /// the earth only appears when the record has one.
    pub fn facts(&self) -> Vec<(&'static str, &'static str)> {
        let mut facts = vec![
            ("Diámetro", self.diameter),
            ("Distancia al Sol", self.distance_from_sun),
        ];
        if let Some(distance) = self.distance_from_earth {
            facts.push(("Distancia a la Tierra", distance));
        }
        facts.push(("Periodo orbital", self.orbital_period));
        facts.push(("Periodo de rotación", self.rotation_period));
        facts.push(("Temperatura", self.temperature));
        facts
    }
}

/// Lookup from body to its record.
#[derive(Debug, Clone, Default)]
pub struct InfoTable {
    records: HashMap<BodyID, &'static InfoRecord>,
}

impl InfoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: BodyID, record: &'static InfoRecord) {
        self.records.insert(id, record);
    }

    pub fn get(&self, id: BodyID) -> Option<&'static InfoRecord> {
        self.records.get(&id).copied()
    }

    pub fn contains(&self, id: BodyID) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
