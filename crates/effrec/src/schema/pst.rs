//! PST family table.
//!
//! Torment's engine keeps the shared range but grafts its own opcodes above
//! it, stores script variables in the resource cell of the global-variable
//! opcode, and (on the classic build) widens the V1 timing field — the
//! latter is a layout quirk handled by the envelope resolver, not here.

use crate::env::ExternalEnv;
use crate::field::{ColorOrder, FieldKind};
use crate::profile::GameProfile;
use crate::tables;

use super::{bitmap, int, plan, unused, SchemaEntry};

static NAMES: &[(u32, &str)] = &[
    (187, "Play BAM file (blended)"),
    (188, "Curse"),
    (189, "Prayer"),
    (190, "Embalm"),
    (191, "Set global variable"),
    (193, "Bless"),
    (195, "Tint screen"),
    (196, "Flash screen"),
    (197, "Special spell hit"),
    (198, "Play BAM with effects"),
    (199, "Detect evil"),
    (200, "Induce hiccups"),
];

pub(super) fn name(opcode: u32) -> Option<&'static str> {
    NAMES
        .binary_search_by_key(&opcode, |&(op, _)| op)
        .ok()
        .map(|i| NAMES[i].1)
}

static EMBALM_TYPES: &[&str] = &["Normal", "Greater"];

static SPECIAL_HIT_TYPES: &[&str] = &[
    "Adder's kiss",
    "Ball lightning",
    "Fizzle",
];

pub(super) fn entry(
    opcode: u32,
    _profile: GameProfile,
    _env: &dyn ExternalEnv,
) -> Option<SchemaEntry> {
    let entry = match opcode {
        187 => SchemaEntry::new("Play BAM file (blended)", unused(), unused())
            .res("Animation file", &["BAM"]),
        190 => SchemaEntry::new("Embalm", unused(), bitmap("Embalm type", EMBALM_TYPES)),
        191 => SchemaEntry::new(
            "Set global variable",
            int("Value"),
            bitmap("Modifier type", tables::INC_MOD),
        )
        .res_text("Variable name"),
        195 => SchemaEntry::new(
            "Tint screen",
            plan("Color", FieldKind::Color(ColorOrder::Rgbx)),
            unused(),
        ),
        197 => SchemaEntry::new(
            "Special spell hit",
            unused(),
            bitmap("Effect", SPECIAL_HIT_TYPES),
        ),
        198 => SchemaEntry::new("Play BAM with effects", unused(), unused())
            .res("Animation file", &["BAM"]),
        _ => return name(opcode).map(|n| SchemaEntry::new(n, unused(), unused())),
    };
    Some(entry)
}
