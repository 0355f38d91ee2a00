//! BG2/Enhanced family table.
//!
//! Covers the shadows-of-amn opcode range and, on Enhanced builds, the
//! EE-only range above it. Three of these opcodes (232, 319, 328) encode
//! discriminated unions positionally; their base plans here are refined by
//! the post-decode re-typing pass once the discriminant values are known.

use crate::env::ExternalEnv;
use crate::field::FieldKind;
use crate::profile::GameProfile;
use crate::tables;

use super::{bitmap, hash, int, strref, uint, unused, SchemaEntry};

static NAMES: &[(u32, &str)] = &[
    (187, "Play BAM file"),
    (192, "Hit point transfer"),
    (193, "Shake screen"),
    (194, "Flash screen"),
    (195, "Tint screen"),
    (198, "Reflect spell level"),
    (201, "Reflect spell school"),
    (202, "Reflect spell type"),
    (206, "Protection from spell"),
    (208, "Minimum HP"),
    (209, "Power word, kill"),
    (210, "Power word, stun"),
    (211, "Imprisonment"),
    (212, "Freedom"),
    (213, "Maze"),
    (214, "Select spell"),
    (215, "Play visual effect"),
    (216, "Level drain"),
    (217, "Power word, sleep"),
    (218, "Stoneskin effect"),
    (220, "Remove spell school protections"),
    (221, "Remove spell type protections"),
    (222, "Teleport field"),
    (223, "Spell school deflection"),
    (224, "Restoration"),
    (225, "Detect magic"),
    (226, "Spell type deflection"),
    (227, "Spell school turning"),
    (228, "Spell type turning"),
    (229, "Remove protection by school"),
    (230, "Remove protection by type"),
    (231, "Time stop"),
    (232, "Cast spell on condition"),
    (233, "Modify proficiencies"),
    (234, "Create contingency"),
    (235, "Wing buffet"),
    (236, "Project image"),
    (237, "Set image type"),
    (238, "Disintegrate"),
    (239, "Farsight"),
    (240, "Remove portrait icon"),
    (241, "Control creature"),
    (242, "Cure confusion"),
    (243, "Drain item charges"),
    (244, "Drain wizard spells"),
    (245, "Check for berserk"),
    (246, "Berserk effect"),
    (247, "Attack nearest creature"),
    (248, "Melee hit effect"),
    (249, "Ranged hit effect"),
    (250, "Maximum damage each hit"),
    (251, "Change bard song"),
    (252, "Set trap"),
    (253, "Set automap note"),
    (254, "Remove automap note"),
    (255, "Create item (days)"),
    (256, "Spell sequencer"),
    (257, "Create spell sequencer"),
    (258, "Activate spell sequencer"),
    (259, "Spell trap"),
    (260, "Activate spell sequencer at point"),
    (261, "Restore lost spells"),
    (262, "Visual range bonus"),
    (263, "Backstab bonus"),
    (264, "Drop item"),
    (265, "Modify global variable"),
    (266, "Remove protection from spell"),
    (267, "Disable display string"),
    (268, "Clear fog of war"),
    (270, "Unpause target"),
    (271, "Disable creature"),
    (272, "Use EFF file on condition"),
    (273, "Zone of sweet air"),
    (275, "Hide in shadows bonus"),
    (276, "Detect illusion bonus"),
    (277, "Set traps bonus"),
    (279, "Enable button"),
    (280, "Wild magic"),
    (281, "Wild surge bonus"),
    (282, "Modify script state"),
    (283, "Use EFF file as curse"),
    (284, "Melee THAC0 bonus"),
    (285, "Melee weapon damage bonus"),
    (286, "Missile weapon damage bonus"),
    (287, "Remove feet circle"),
    (288, "Fist THAC0 bonus"),
    (289, "Fist damage bonus"),
    (290, "Change title"),
    (291, "Disable visual effects"),
    (292, "Immunity to backstab"),
    (293, "Set persistent AI"),
    (294, "Set existence delay"),
    (295, "Disable permanent death"),
    (296, "Immunity to specific animation"),
    (297, "Immunity to turn undead"),
    (298, "Pocket plane"),
    (299, "Chaos shield effect"),
    (300, "Modify collision behavior"),
    (301, "Critical hit bonus"),
    (302, "Can use any item"),
    (303, "Backstab every hit"),
    (304, "Mass raise dead"),
    (305, "Off-hand THAC0 bonus"),
    (306, "Main hand THAC0 bonus"),
    (307, "Tracking"),
    (308, "Immunity to tracking"),
    (309, "Modify local variable"),
    (310, "Immunity to time stop"),
    (311, "Wish"),
    (312, "Immunity to sequester"),
    (313, "High-level ability"),
    (314, "Stoneskin protection"),
    (315, "Remove animation"),
    (316, "Rest"),
    (317, "Haste 2"),
    // Enhanced-only range; excluded from classic catalogs by the profile's
    // opcode limit.
    (318, "Protection from resource"),
    (319, "Item usability"),
    (320, "Change weather"),
    (321, "Remove effects by resource"),
    (323, "Turn undead level"),
    (324, "Immunity to resource and message"),
    (325, "All saving throws bonus"),
    (326, "Apply effects list"),
    (327, "Show visual effect"),
    (328, "Set spell state"),
    (329, "Slow poison"),
    (330, "Float text"),
    (331, "Summon creatures 2"),
    (332, "Attack damage type bonus"),
    (333, "Static charge"),
    (334, "Turn slayer"),
    (335, "Seven eyes"),
    (336, "Seven eyes overlay"),
    (337, "Remove effects by opcode"),
    (338, "Disable rest"),
    (339, "Alter visual animation effect"),
    (340, "Backstab hit effect"),
    (341, "Critical hit effect"),
    (342, "Override creature data"),
    (343, "HP swap"),
    (344, "Enchantment vs. creature type"),
    (345, "Enchantment bonus"),
    (346, "Save vs. school bonus"),
    (356, "Ignore reputation breaking point"),
    (361, "Cast spell on critical miss"),
    (362, "Critical miss bonus"),
    (363, "Movement check"),
    (365, "Make unselectable"),
    (366, "Apply spell on movement"),
    (367, "Minimum base stats"),
];

pub(super) fn name(opcode: u32) -> Option<&'static str> {
    NAMES
        .binary_search_by_key(&opcode, |&(op, _)| op)
        .ok()
        .map(|i| NAMES[i].1)
}

static TRANSFER_DIRECTIONS: &[&str] = &["Target to caster", "Caster to target"];

static PLAY_LOCATIONS: &[&str] = &[
    "Over target (attached)",
    "Over target (unattached)",
    "At target point",
];

static CONDITION_TARGETS: &[&str] = &["Myself", "LastHitter", "NearestEnemyOf", "Nearest"];

static FLOAT_TYPES: &[&str] = &["Float", "Cutscene text"];

static STATE_TABLE_MODE: &[&str] = &["Use external state table"];

/// Label for the SPLPROT-driven creature matcher, which only exists when
/// the auxiliary table ships with the install.
fn creature_matcher(env: &dyn ExternalEnv) -> super::ParamPlan {
    if env.resource_exists("SPLPROT.2DA") {
        uint("Creature type (SPLPROT.2DA row)")
    } else {
        uint("Creature type")
    }
}

pub(super) fn entry(
    opcode: u32,
    profile: GameProfile,
    env: &dyn ExternalEnv,
) -> Option<SchemaEntry> {
    // The Enhanced-only range resolves on Enhanced builds exclusively;
    // on classic builds these opcodes fall out of range beforehand.
    if opcode >= 318 && !profile.is_enhanced() {
        return None;
    }
    let entry = match opcode {
        187 => SchemaEntry::new("Play BAM file", unused(), unused())
            .res("Animation file", &["BAM"]),
        192 => SchemaEntry::new(
            "Hit point transfer",
            int("Amount"),
            bitmap("Direction", TRANSFER_DIRECTIONS),
        ),
        206 => SchemaEntry::new("Protection from spell", strref("String"), unused())
            .res("Spell file", &["SPL"]),
        208 => SchemaEntry::new("Minimum HP", int("HP amount"), unused()),
        214 => SchemaEntry::new("Select spell", unused(), unused())
            .res("Spell table", &["2DA"]),
        215 => SchemaEntry::new(
            "Play visual effect",
            unused(),
            bitmap("Play where?", PLAY_LOCATIONS),
        )
        .res("Effect file", &["VEF", "VVC", "BAM"]),
        216 => SchemaEntry::new("Level drain", int("Number of levels"), unused()),
        218 => SchemaEntry::new("Stoneskin effect", int("Number of skins"), unused()),
        232 => SchemaEntry::new(
            "Cast spell on condition",
            bitmap("Target", CONDITION_TARGETS),
            bitmap("Condition", tables::CAST_CONDITIONS),
        )
        .res("Spell file", &["SPL"]),
        233 => SchemaEntry::new(
            "Modify proficiencies",
            int("Number of stars"),
            super::ids("Proficiency", "STATS.IDS"),
        ),
        248 => SchemaEntry::new("Melee hit effect", unused(), unused())
            .res("Effect file", &["EFF"]),
        249 => SchemaEntry::new("Ranged hit effect", unused(), unused())
            .res("Effect file", &["EFF"]),
        253 => SchemaEntry::new("Set automap note", strref("Note text"), unused()),
        254 => SchemaEntry::new("Remove automap note", strref("Note text"), unused()),
        263 => SchemaEntry::new(
            "Backstab bonus",
            int("Value"),
            bitmap("Modifier type", tables::INC_MOD),
        ),
        265 => SchemaEntry::new(
            "Modify global variable",
            int("Value"),
            bitmap("Modifier type", tables::INC_MOD),
        )
        .res_text("Variable name"),
        309 => SchemaEntry::new(
            "Modify local variable",
            int("Value"),
            bitmap("Modifier type", tables::INC_MOD),
        )
        .res_text("Variable name"),
        318 => SchemaEntry::new("Protection from resource", strref("String"), creature_matcher(env))
            .res("Resource", &["SPL", "ITM"]),
        319 => SchemaEntry::new(
            "Item usability",
            int("Value"),
            hash("IDS reference", &tables::IDS_TARGETS),
        ),
        324 => SchemaEntry::new(
            "Immunity to resource and message",
            strref("String"),
            creature_matcher(env),
        )
        .res("Resource", &["SPL", "ITM"]),
        325 => SchemaEntry::new(
            "All saving throws bonus",
            int("Value"),
            bitmap("Modifier type", tables::INC_MOD),
        ),
        328 => SchemaEntry::new(
            "Set spell state",
            unused(),
            bitmap("State", tables::SPELL_STATES),
        )
        .special("Mode", FieldKind::Flags(STATE_TABLE_MODE)),
        330 => SchemaEntry::new(
            "Float text",
            strref("String"),
            bitmap("Display type", FLOAT_TYPES),
        ),
        333 => SchemaEntry::new("Static charge", int("Number of hits"), unused())
            .res("Spell file", &["SPL"]),
        337 => SchemaEntry::new("Remove effects by opcode", int("Match value"), uint("Effect")),
        345 => SchemaEntry::new(
            "Enchantment bonus",
            int("Value"),
            bitmap("Modifier type", tables::INC_MOD),
        ),
        346 => SchemaEntry::new(
            "Save vs. school bonus",
            int("Value"),
            bitmap("School", tables::SCHOOLS),
        ),
        361 => SchemaEntry::new("Cast spell on critical miss", int("Cast level"), unused())
            .res("Spell file", &["SPL"]),
        _ => return name(opcode).map(|n| SchemaEntry::new(n, unused(), unused())),
    };
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_sorted_for_binary_search() {
        let ops: Vec<u32> = NAMES.iter().map(|&(op, _)| op).collect();
        let mut sorted = ops.clone();
        sorted.sort_unstable();
        assert_eq!(ops, sorted);
    }

    #[test]
    fn enhanced_range_is_gated() {
        use crate::env::NullEnv;
        assert!(entry(319, GameProfile::Bg2, &NullEnv).is_none());
        assert!(entry(319, GameProfile::Bg2ee, &NullEnv).is_some());
    }
}
