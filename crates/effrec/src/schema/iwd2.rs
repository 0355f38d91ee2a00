//! IWD2 family table.
//!
//! The d20 engine renames the saving-throw opcodes to its three defenses,
//! resolves skills through its own IDS tables, and owns the 400+ opcode
//! range no other variant defines. The save-for-half damage mode and the
//! Fortitude/Reflex/Will save vocabulary are profile sub-flags consulted by
//! the generic table and the record builder respectively.

use crate::env::ExternalEnv;
use crate::profile::GameProfile;
use crate::tables;

use super::{bitmap, flags, ids, int, unused, SchemaEntry};

static NAMES: &[(u32, &str)] = &[
    // d20 renames of the shared saving-throw opcodes.
    (33, "Fortitude save bonus"),
    (34, "Reflex save bonus"),
    (35, "Will save bonus"),
    (206, "Protection from spell"),
    (208, "Minimum HP"),
    (218, "Stoneskin effect"),
    (236, "Panic undead"),
    (239, "Slow poison"),
    (280, "Wild magic"),
    (330, "Float text"),
    (396, "Heroic inspiration"),
    (397, "Prevent AI slowdown"),
    (398, "Barbarian rage"),
    (400, "Restore full HP"),
    (401, "Skill bonus"),
    (402, "Set feat"),
    (403, "Knocked unconscious"),
    (404, "Death magic"),
    (405, "Entropy shield"),
    (406, "Storm shell"),
    (407, "Protection from arrows"),
    (409, "Energy drain"),
    (410, "Tortoise shell"),
    (411, "Blink"),
    (412, "Persistent use EFF file"),
    (413, "Day blindness"),
    (414, "Damage reduction"),
    (415, "Disguise"),
    (416, "Heroic inspiration 2"),
    (418, "Stunning fist"),
    (420, "Cleave"),
    (421, "Protection from specific damage"),
    (422, "Slippery mind"),
    (424, "Righteous wrath of the faithful"),
    (425, "Recitation"),
    (426, "Blood rage"),
    (428, "Aegis"),
    (429, "Executioner's eyes"),
    (432, "Tenser's transformation"),
    (433, "Smite evil"),
    (435, "Destruction"),
    (438, "Mass dominate"),
    (440, "Improved haste"),
    (441, "Iron body"),
    (442, "Static charge"),
    (443, "Cloak of fear"),
    (446, "Mordenkainen's force missiles"),
    (447, "Force missile burst"),
    (450, "Crushing despair"),
    (451, "Unconsciousness"),
];

pub(super) fn name(opcode: u32) -> Option<&'static str> {
    NAMES
        .binary_search_by_key(&opcode, |&(op, _)| op)
        .ok()
        .map(|i| NAMES[i].1)
}

static RAGE_TYPES: &[&str] = &["Normal", "Greater"];

pub(super) fn entry(
    opcode: u32,
    _profile: GameProfile,
    _env: &dyn ExternalEnv,
) -> Option<SchemaEntry> {
    let entry = match opcode {
        206 => SchemaEntry::new("Protection from spell", unused(), unused())
            .res("Spell file", &["SPL"]),
        208 => SchemaEntry::new("Minimum HP", int("HP amount"), unused()),
        218 => SchemaEntry::new("Stoneskin effect", int("Number of skins"), unused()),
        398 => SchemaEntry::new("Barbarian rage", unused(), bitmap("Rage type", RAGE_TYPES)),
        401 => SchemaEntry::new("Skill bonus", int("Value"), ids("Skill", "SKILLS.IDS")),
        402 => SchemaEntry::new("Set feat", unused(), ids("Feat", "FEATS.IDS")),
        404 => SchemaEntry::new(
            "Death magic",
            unused(),
            flags("Death type", tables::DEATH_TYPES),
        ),
        409 => SchemaEntry::new("Energy drain", int("Number of levels"), unused()),
        412 => SchemaEntry::new("Persistent use EFF file", int("Interval (seconds)"), unused())
            .res("Effect file", &["EFF"]),
        414 => SchemaEntry::new(
            "Damage reduction",
            int("Amount"),
            int("Enchantment to overcome"),
        ),
        421 => SchemaEntry::new(
            "Protection from specific damage",
            int("Amount"),
            super::multi("Damage", super::generic::damage_parts(true)),
        ),
        442 => SchemaEntry::new("Static charge", int("Number of hits"), unused())
            .res("Spell file", &["SPL"]),
        _ => return name(opcode).map(|n| SchemaEntry::new(n, unused(), unused())),
    };
    Some(entry)
}
