//! Reference lookup tables keyed by room or fixture type.
//!
//! Each calculation owns its table. The tables overlap in keys but encode
//! different methodologies (lighting-only density, total connected load,
//! compliance illuminance, efficiency reference), so they are kept apart.

/// A keyed table of reference values with a fallback for unknown keys.
#[derive(Debug, Clone, Copy)]
pub struct RateTable {
    /// Human-readable table name, used in logs.
    pub name: &'static str,
    entries: &'static [(&'static str, f64)],
    default: f64,
}

impl RateTable {
    /// Creates a table from `(key, value)` pairs and a fallback value.
    pub const fn new(
        name: &'static str,
        entries: &'static [(&'static str, f64)],
        default: f64,
    ) -> Self {
        Self {
            name,
            entries,
            default,
        }
    }

    /// Returns the value stored for `key`, if any.
    ///
    /// Keys are matched after [`normalize_key`], so `"Conference Room"`,
    /// `"conference_room"` and `"conference-room"` are the same entry.
    pub fn get(&self, key: &str) -> Option<f64> {
        let key = normalize_key(key);
        self.entries
            .iter()
            .find_map(|&(k, v)| (k == key).then_some(v))
    }

    /// Returns the value for `key`, or the table default when the key is
    /// missing or unknown.
    pub fn lookup(&self, key: Option<&str>) -> f64 {
        match key {
            Some(k) => self.get(k).unwrap_or_else(|| {
                tracing::debug!(table = self.name, key = k, "unknown key, using default");
                self.default
            }),
            None => self.default,
        }
    }

    /// The fallback value for unknown keys.
    pub fn default_value(&self) -> f64 {
        self.default
    }

    /// Iterates over the stored `(key, value)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of explicit entries (the default is not counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical form of a room or fixture type key: trimmed, lowercase,
/// with spaces and underscores folded to `-`.
pub fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Lighting power density by room type (W/m²), used by the simple-rate
/// consumption estimate.
pub const CONSUMPTION_WATTS_PER_SQM: RateTable = RateTable::new(
    "consumption_watts_per_sqm",
    &[
        ("office", 10.0),
        ("conference-room", 12.0),
        ("classroom", 12.0),
        ("corridor", 5.0),
        ("lobby", 8.0),
        ("restroom", 8.0),
        ("kitchen", 12.0),
        ("storage", 4.0),
        ("warehouse", 6.0),
        ("laboratory", 15.0),
        ("library", 11.0),
        ("retail", 14.0),
        ("hospital-ward", 13.0),
        ("residential", 8.0),
        ("parking", 3.0),
    ],
    10.0,
);

/// Total connected load density by room type (W/m²), lighting plus
/// convenience outlets and equipment.
pub const POWER_LOAD_DENSITY: RateTable = RateTable::new(
    "power_load_density",
    &[
        ("office", 20.0),
        ("conference-room", 15.0),
        ("classroom", 18.0),
        ("corridor", 5.0),
        ("lobby", 10.0),
        ("restroom", 8.0),
        ("kitchen", 30.0),
        ("storage", 5.0),
        ("laboratory", 35.0),
        ("server-room", 50.0),
        ("warehouse", 10.0),
    ],
    15.0,
);

/// Maintained illuminance required for compliance scoring (lux).
pub const REQUIRED_LUX: RateTable = RateTable::new(
    "required_lux",
    &[
        ("office", 500.0),
        ("conference-room", 500.0),
        ("classroom", 500.0),
        ("corridor", 100.0),
        ("lobby", 200.0),
        ("restroom", 150.0),
        ("kitchen", 500.0),
        ("storage", 150.0),
        ("warehouse", 200.0),
        ("laboratory", 750.0),
        ("library", 500.0),
        ("retail", 750.0),
        ("hospital-ward", 300.0),
        ("parking", 75.0),
    ],
    300.0,
);

/// Nominal output per fixture by fixture technology (lm).
pub const FIXTURE_LUMENS: RateTable = RateTable::new(
    "fixture_lumens",
    &[
        ("led", 1600.0),
        ("fluorescent", 2500.0),
        ("compact", 900.0),
        ("metal-halide", 12000.0),
        ("incandescent", 800.0),
    ],
    1600.0,
);

/// Reference lighting power density for efficiency scoring (W/m²).
pub const EFFICIENCY_REFERENCE_WATTS_PER_SQM: RateTable = RateTable::new(
    "efficiency_reference_watts_per_sqm",
    &[
        ("office", 10.0),
        ("conference-room", 12.0),
        ("classroom", 12.0),
        ("corridor", 5.0),
        ("lobby", 8.0),
        ("restroom", 6.0),
        ("kitchen", 12.0),
        ("storage", 4.0),
        ("warehouse", 6.0),
        ("laboratory", 15.0),
        ("library", 11.0),
    ],
    10.0,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_and_separators() {
        assert_eq!(normalize_key("  Conference Room "), "conference-room");
        assert_eq!(normalize_key("metal_halide"), "metal-halide");
        assert_eq!(normalize_key("LED"), "led");
    }

    #[test]
    fn lookup_falls_back_to_default() {
        assert_eq!(REQUIRED_LUX.lookup(Some("observatory")), 300.0);
        assert_eq!(REQUIRED_LUX.lookup(None), 300.0);
        assert_eq!(EFFICIENCY_REFERENCE_WATTS_PER_SQM.lookup(None), 10.0);
    }

    #[test]
    fn known_keys_resolve() {
        assert_eq!(POWER_LOAD_DENSITY.lookup(Some("kitchen")), 30.0);
        assert_eq!(REQUIRED_LUX.lookup(Some("Office")), 500.0);
        assert_eq!(FIXTURE_LUMENS.lookup(Some("LED")), 1600.0);
    }

    #[test]
    fn table_sizes() {
        assert_eq!(CONSUMPTION_WATTS_PER_SQM.len(), 15);
        assert_eq!(POWER_LOAD_DENSITY.len(), 11);
        assert_eq!(REQUIRED_LUX.len(), 14);
        assert_eq!(FIXTURE_LUMENS.len(), 5);
        assert_eq!(EFFICIENCY_REFERENCE_WATTS_PER_SQM.len(), 11);
    }

    #[test]
    fn lighting_and_compliance_tables_stay_distinct() {
        // restroom differs between the efficiency reference and the consumption density
        assert_ne!(
            EFFICIENCY_REFERENCE_WATTS_PER_SQM.get("restroom"),
            CONSUMPTION_WATTS_PER_SQM.get("restroom")
        );
    }
}
