//! Named immutable lookup tables shared across schema entries.
//!
//! Two shapes: ordered label lists (index = decoded value) for dense
//! enumerations, and [`LookupTable`] sparse key→label maps for vocabularies
//! with holes. Dozens of opcodes reference the same table by name; none of
//! these are ever mutated after load.

/// A named sparse key→label map. Entries are sorted by key.
#[derive(PartialEq, Eq)]
pub struct LookupTable {
    pub name: &'static str,
    entries: &'static [(u64, &'static str)],
}

impl LookupTable {
    pub const fn new(name: &'static str, entries: &'static [(u64, &'static str)]) -> Self {
        Self { name, entries }
    }

    /// Look up a key. Missing keys are not an error; callers display the
    /// raw value instead.
    pub fn get(&self, key: u64) -> Option<&'static str> {
        self.entries
            .binary_search_by_key(&key, |&(k, _)| k)
            .ok()
            .map(|i| self.entries[i].1)
    }

    pub fn entries(&self) -> &'static [(u64, &'static str)] {
        self.entries
    }
}

impl std::fmt::Debug for LookupTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LookupTable({}, {} entries)", self.name, self.entries.len())
    }
}

/// Timing modes for the envelope timing field. Sparse: the high key is the
/// absolute-time mode used by PST resources.
pub static TIMING_MODES: LookupTable = LookupTable::new(
    "timing modes",
    &[
        (0, "Instant/Limited"),
        (1, "Instant/Permanent until death"),
        (2, "Instant/While equipped"),
        (3, "Delay/Limited"),
        (4, "Delay/Permanent"),
        (5, "Delay/While equipped"),
        (6, "Limited after duration"),
        (7, "Permanent after duration"),
        (8, "Equipped after duration"),
        (9, "Instant/Permanent"),
        (10, "Instant/Limited (ticks)"),
        (4096, "Absolute duration"),
    ],
);

/// Dispel/resistance flag bits next to the timing field.
pub static DISPEL_FLAGS: &[&str] = &["Dispellable", "Bypass resistance"];

/// Save-type flag vocabulary for the classic save model.
pub static SAVE_FLAGS_CLASSIC: &[&str] = &[
    "Spells",
    "Breath weapon",
    "Paralyze/Poison/Death",
    "Wands",
    "Petrification/Polymorph",
];

/// Save-type flag vocabulary for the d20 save model.
pub static SAVE_FLAGS_IWD2: &[&str] = &["Fortitude", "Reflex", "Will"];

/// Target types for the envelope target field.
pub static TARGET_TYPES: &[&str] = &[
    "None",
    "Self",
    "Preset target",
    "Party",
    "Everyone",
    "Everyone except party",
    "Caster group",
    "Target group",
    "Everyone except self",
    "Original caster",
];

/// AC bonus type bits. A zero value means a generic bonus.
pub static AC_TYPES: &[&str] = &[
    "Crushing",
    "Missile",
    "Piercing",
    "Slashing",
    "Set base AC",
];

/// Death animation type bits for the kill-target and death-magic opcodes.
pub static DEATH_TYPES: &[&str] = &[
    "Acid",
    "Burning",
    "Crushed",
    "Normal",
    "Exploding",
    "Stoned",
    "Freezing",
    "Exploding stoned",
    "Exploding freezing",
    "Electrified",
    "Disintegration",
];

/// Modifier types shared by the stat-adjustment opcodes.
pub static INC_MOD: &[&str] = &["Increment", "Set", "Set % of"];

/// Damage modifier types, classic engines.
pub static DAMAGE_MODES_CLASSIC: &[&str] = &["Normal", "Set to value", "Set to %"];

/// Damage modifier types, d20 engines (adds the save-for-half mode).
pub static DAMAGE_MODES_IWD2: &[&str] =
    &["Normal", "Set to value", "Set to %", "Save for half"];

/// Damage type bits carried in the high word of the damage opcode's second
/// parameter.
pub static DAMAGE_TYPES: LookupTable = LookupTable::new(
    "damage types",
    &[
        (0, "All"),
        (1, "Acid"),
        (2, "Cold"),
        (4, "Electricity"),
        (8, "Fire"),
        (16, "Piercing"),
        (32, "Poison"),
        (64, "Magic"),
        (128, "Missile"),
        (256, "Slashing"),
        (512, "Magic fire"),
        (1024, "Magic cold"),
        (2048, "Stunning"),
        (4096, "Crushing"),
    ],
);

/// Color locations for the palette-tint opcodes.
pub static COLOR_LOCATIONS: LookupTable = LookupTable::new(
    "color locations",
    &[
        (0x00, "Belt/Amulet"),
        (0x01, "Minor color"),
        (0x02, "Major color"),
        (0x03, "Skin color"),
        (0x04, "Strap/Leather"),
        (0x05, "Armor/Trimming"),
        (0x06, "Hair"),
        (0x10, "Weapon: grey"),
        (0x14, "Weapon: silver"),
        (0x15, "Weapon: gold"),
        (0x20, "Shield: grey"),
        (0x30, "Helmet: grey"),
        (0xFF, "Whole body"),
    ],
);

/// Built-in projectile names. Enhanced builds resolve the projectile field
/// through `PROJECTL.IDS` instead when that table ships.
pub static PROJECTILES: LookupTable = LookupTable::new(
    "projectiles",
    &[
        (0, "None"),
        (1, "Arrow"),
        (2, "Arrow (exploding)"),
        (3, "Arrow (flaming)"),
        (4, "Arrow (heavy)"),
        (5, "Arrow (non-magical)"),
        (6, "Axe"),
        (7, "Axe (exploding)"),
        (8, "Axe (flaming)"),
        (9, "Axe (heavy)"),
        (10, "Axe (non-magical)"),
        (11, "Bolt"),
        (14, "Bolt (non-magical)"),
        (15, "Bullet"),
        (19, "Bullet (non-magical)"),
        (26, "Dagger"),
        (31, "Dart"),
        (64, "Fireball"),
        (95, "Lightning bolt"),
        (98, "Magic missile"),
    ],
);

/// Primary spell schools.
pub static SCHOOLS: &[&str] = &[
    "None",
    "Abjuration",
    "Conjuration",
    "Divination",
    "Enchantment",
    "Illusion",
    "Evocation",
    "Necromancy",
    "Alteration",
    "Generalist",
];

/// Secondary spell types (dispel categories).
pub static SECONDARY_TYPES: &[&str] = &[
    "None",
    "Spell protections",
    "Specific protections",
    "Illusionary protections",
    "Magic attack",
    "Divination attack",
    "Conjuration",
    "Combat protections",
    "Contingency",
    "Battleground",
    "Offensive damage",
    "Disabling",
    "Combination",
    "Non-combat",
];

/// Built-in spell-state names, used for the set-state opcode when the
/// external state table is unavailable.
pub static SPELL_STATES: &[&str] = &[
    "Chaos shield",
    "Armor of faith",
    "Bless",
    "Barkskin",
    "Holy power",
    "Lucky streak",
    "Fortune's favorite",
    "Free action",
    "Otiluke's resilient sphere",
    "Hardiness",
];

/// Which IDS table the item-usability opcode's first parameter indexes,
/// keyed by the discriminating second parameter.
pub static USABILITY_IDS: LookupTable = LookupTable::new(
    "usability IDS hints",
    &[
        (2, "EA.IDS"),
        (3, "GENERAL.IDS"),
        (4, "RACE.IDS"),
        (5, "CLASS.IDS"),
        (6, "SPECIFIC.IDS"),
        (7, "GENDER.IDS"),
        (8, "ALIGN.IDS"),
        (9, "KIT.IDS"),
    ],
);

/// IDS-table name hints: which symbol table a creature-matching parameter
/// indexes, keyed by the discriminating value. Shared by the
/// protection-from-creature-type, external-effect and item-usability
/// opcodes; the two high keys are not tables but inline matchers.
pub static IDS_TARGETS: LookupTable = LookupTable::new(
    "IDS targets",
    &[
        (0, "Anyone"),
        (2, "EA.IDS"),
        (3, "GENERAL.IDS"),
        (4, "RACE.IDS"),
        (5, "CLASS.IDS"),
        (6, "SPECIFIC.IDS"),
        (7, "GENDER.IDS"),
        (8, "ALIGN.IDS"),
        (9, "KIT.IDS"),
        (10, "Actor name"),
        (11, "Actor script name"),
    ],
);

/// Shared regeneration/poison pacing modes (the two opcodes mirror each
/// other's vocabularies).
pub static REGEN_MODES: &[&str] = &[
    "1 point per second",
    "1 point per second (delayed)",
    "Amount per second",
    "1 point per amount seconds",
    "Amount per round",
];

/// Spell level bits for the bonus-spell-slot opcodes.
pub static SPELL_LEVEL_FLAGS: &[&str] = &[
    "Level 1",
    "Level 2",
    "Level 3",
    "Level 4",
    "Level 5",
    "Level 6",
    "Level 7",
    "Level 8",
    "Level 9",
];

/// Conditions for the cast-spell-on-condition opcode's second parameter.
pub static CAST_CONDITIONS: &[&str] = &[
    "Target hit points below 50%",
    "Target hit points below 25%",
    "Target hit points below 10%",
    "Target helpless",
    "Target poisoned",
    "Target attacked",
    "Target near enemy",
    "Caster near enemy",
    "Caster hit",
    "Caster killed",
    "Time of day",
    "Target in range",
    "Target's state",
    "Target dead",
];

/// Parent resource types in the V2 extension block.
pub static PARENT_TYPES: &[&str] = &["None", "Spell", "Item"];

/// Parent resource flags in the V2 extension block.
pub static PARENT_FLAGS: &[&str] = &["Self-targeted", "From item ability", "Hostile"];

/// Charm subtypes for the charm-creature opcode.
pub static CHARM_TYPES: LookupTable = LookupTable::new(
    "charm types",
    &[
        (0, "Charmed (neutral)"),
        (1, "Charmed (hostile)"),
        (2, "Dire charmed (neutral)"),
        (3, "Dire charmed (hostile)"),
        (4, "Controlled"),
        (5, "Hostile"),
        (1000, "Charmed (neutral, no text)"),
        (1001, "Charmed (hostile, no text)"),
        (1002, "Dire charmed (neutral, no text)"),
        (1003, "Dire charmed (hostile, no text)"),
        (1004, "Controlled (no text)"),
        (1005, "Hostile (no text)"),
    ],
);

/// Summon control types for the creature-summoning opcodes.
pub static SUMMON_CONTROL: &[&str] = &[
    "Match target",
    "Match target (no panic)",
    "From CRE file",
    "Hostile",
    "No control",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_lookup_hits_and_misses() {
        assert_eq!(TIMING_MODES.get(1), Some("Instant/Permanent until death"));
        assert_eq!(TIMING_MODES.get(4096), Some("Absolute duration"));
        assert_eq!(TIMING_MODES.get(11), None);
    }

    #[test]
    fn lookup_entries_are_sorted() {
        // binary_search requires it; catch table edits that break the order
        for table in [
            &TIMING_MODES,
            &DAMAGE_TYPES,
            &COLOR_LOCATIONS,
            &PROJECTILES,
            &USABILITY_IDS,
            &CHARM_TYPES,
        ] {
            let keys: Vec<u64> = table.entries().iter().map(|&(k, _)| k).collect();
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            assert_eq!(keys, sorted, "{} table out of order", table.name);
        }
    }
}
