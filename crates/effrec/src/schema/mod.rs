//! The opcode schema registry: (opcode, profile) → field-decode plan.
//!
//! Resolution is a three-layer table, not branching: the cross-profile
//! generic table first, then the profile family's table, then the raw
//! two-integer fallback. Entries may branch internally on profile sub-flags
//! (Enhanced build, d20 saves) to pick between layouts for the same opcode,
//! and a few consult the external environment for optional auxiliary
//! tables. Every opcode resolves to *something*; an unmapped opcode is not
//! an error.

mod bg1;
mod bg2;
mod generic;
mod iwd;
mod iwd2;
mod pst;

use tracing::{debug, trace};

use crate::env::ExternalEnv;
use crate::field::{FieldKind, Sign};
use crate::profile::{Family, GameProfile};

/// Decode plan for one 4-byte parameter cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamPlan {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Decode plan for the 8-byte resource cell. Absent means the cell is
/// raw/unused bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResourcePlan {
    /// Typed resource reference with an allowed-extension list.
    Ref {
        name: &'static str,
        types: &'static [&'static str],
    },
    /// Fixed 8-byte text blob (the "String" hint).
    Text { name: &'static str },
}

/// Decode plan for the trailing special cell. Absent means a plain integer
/// labelled "Special".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialPlan {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Schema for one (opcode, profile) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemaEntry {
    /// Effect name shown in the opcode catalog.
    pub name: &'static str,
    pub param1: ParamPlan,
    pub param2: ParamPlan,
    pub resource: Option<ResourcePlan>,
    pub special: Option<SpecialPlan>,
}

impl SchemaEntry {
    pub(crate) fn new(name: &'static str, param1: ParamPlan, param2: ParamPlan) -> Self {
        Self {
            name,
            param1,
            param2,
            resource: None,
            special: None,
        }
    }

    pub(crate) fn res(mut self, name: &'static str, types: &'static [&'static str]) -> Self {
        self.resource = Some(ResourcePlan::Ref { name, types });
        self
    }

    pub(crate) fn res_text(mut self, name: &'static str) -> Self {
        self.resource = Some(ResourcePlan::Text { name });
        self
    }

    pub(crate) fn special(mut self, name: &'static str, kind: FieldKind) -> Self {
        self.special = Some(SpecialPlan { name, kind });
        self
    }
}

// Plan constructors shared by the family tables.

pub(crate) fn plan(name: &'static str, kind: FieldKind) -> ParamPlan {
    ParamPlan { name, kind }
}

pub(crate) fn int(name: &'static str) -> ParamPlan {
    plan(name, FieldKind::Int(Sign::Signed))
}

pub(crate) fn uint(name: &'static str) -> ParamPlan {
    plan(name, FieldKind::Int(Sign::Unsigned))
}

pub(crate) fn unused() -> ParamPlan {
    plan("Unused", FieldKind::Int(Sign::Unsigned))
}

pub(crate) fn bitmap(name: &'static str, labels: &'static [&'static str]) -> ParamPlan {
    plan(name, FieldKind::Bitmap(labels))
}

pub(crate) fn hash(name: &'static str, table: &'static crate::tables::LookupTable) -> ParamPlan {
    plan(name, FieldKind::HashBitmap(table))
}

pub(crate) fn ids(name: &'static str, table: &'static str) -> ParamPlan {
    plan(name, FieldKind::IdsBitmap(table))
}

pub(crate) fn flags(name: &'static str, labels: &'static [&'static str]) -> ParamPlan {
    plan(name, FieldKind::Flags(labels))
}

pub(crate) fn strref(name: &'static str) -> ParamPlan {
    plan(name, FieldKind::StrRef)
}

pub(crate) fn multi(name: &'static str, parts: &'static [crate::field::NumberPart]) -> ParamPlan {
    plan(name, FieldKind::Multi(parts))
}

/// The default fallback: two raw integer parameters, no resource hint.
fn fallback() -> SchemaEntry {
    SchemaEntry::new("", int("Parameter 1"), int("Parameter 2"))
}

/// Process-lifetime schema registry for one game profile.
///
/// Construction builds the profile's opcode name catalog; a profile change
/// is a new registry value, which is the init barrier the decode path
/// relies on. The registry itself is immutable and shareable.
pub struct SchemaRegistry {
    profile: GameProfile,
    /// Name catalog indexed by opcode; `None` renders as `Unknown effect`.
    names: Vec<Option<&'static str>>,
}

impl SchemaRegistry {
    pub fn new(profile: GameProfile) -> Self {
        let limit = profile.opcode_limit();
        let names: Vec<Option<&'static str>> = (0..limit)
            .map(|op| family_name(op, profile).or_else(|| generic::name(op)))
            .collect();
        debug!(
            profile = %profile,
            opcodes = names.len(),
            named = names.iter().filter(|n| n.is_some()).count(),
            "built opcode schema registry"
        );
        Self { profile, names }
    }

    pub fn profile(&self) -> GameProfile {
        self.profile
    }

    /// Number of opcodes in the profile's defined range.
    pub fn catalog_len(&self) -> u32 {
        self.names.len() as u32
    }

    /// Effect name for an opcode, falling back to `Unknown effect (n)`.
    pub fn opcode_name(&self, opcode: u32) -> String {
        self.names
            .get(opcode as usize)
            .copied()
            .flatten()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unknown effect ({opcode})"))
    }

    /// Resolve the schema for an opcode. Total: every opcode yields an
    /// entry, out-of-range ones via the generic fallback.
    pub fn entry(&self, opcode: u32, env: &dyn ExternalEnv) -> SchemaEntry {
        if opcode >= self.catalog_len() {
            trace!(opcode, profile = %self.profile, "opcode outside profile range, using fallback");
            return fallback();
        }
        generic::entry(opcode, self.profile, env)
            .or_else(|| family_entry(opcode, self.profile, env))
            .unwrap_or_else(|| {
                trace!(opcode, profile = %self.profile, "no schema entry, using fallback");
                fallback()
            })
    }
}

fn family_entry(opcode: u32, profile: GameProfile, env: &dyn ExternalEnv) -> Option<SchemaEntry> {
    match profile.family() {
        Family::Bg1Style => bg1::entry(opcode, profile, env),
        Family::Bg2Enhanced => bg2::entry(opcode, profile, env),
        Family::Pst => pst::entry(opcode, profile, env),
        Family::Iwd => iwd::entry(opcode, profile, env),
        Family::Iwd2 => iwd2::entry(opcode, profile, env),
    }
}

fn family_name(opcode: u32, profile: GameProfile) -> Option<&'static str> {
    match profile.family() {
        Family::Bg1Style => bg1::name(opcode),
        Family::Bg2Enhanced => bg2::name(opcode),
        Family::Pst => pst::name(opcode),
        Family::Iwd => iwd::name(opcode),
        Family::Iwd2 => iwd2::name(opcode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::NullEnv;
    use crate::field::{FieldKind, PartLabels};

    #[test]
    fn every_opcode_in_range_resolves() {
        for profile in GameProfile::ALL {
            let registry = SchemaRegistry::new(profile);
            for opcode in 0..registry.catalog_len() {
                // Must never panic; fallback covers the holes.
                let entry = registry.entry(opcode, &NullEnv);
                assert!(!entry.param1.name.is_empty());
            }
        }
    }

    #[test]
    fn out_of_range_opcode_falls_back() {
        let registry = SchemaRegistry::new(GameProfile::Pst);
        let entry = registry.entry(9999, &NullEnv);
        assert_eq!(entry.param1.name, "Parameter 1");
        assert_eq!(entry.param2.name, "Parameter 2");
        assert!(entry.resource.is_none());
        assert!(entry.special.is_none());
    }

    #[test]
    fn damage_modes_differ_by_save_model() {
        let iwd2 = SchemaRegistry::new(GameProfile::Iwd2).entry(12, &NullEnv);
        let bg1 = SchemaRegistry::new(GameProfile::Bg1).entry(12, &NullEnv);
        let mode_labels = |entry: &SchemaEntry| match entry.param2.kind {
            FieldKind::Multi(parts) => match parts[0].labels {
                PartLabels::Ordered(labels) => labels,
                _ => panic!("damage mode part should have ordered labels"),
            },
            _ => panic!("damage param2 should be a packed word"),
        };
        let iwd2_labels = mode_labels(&iwd2);
        let bg1_labels = mode_labels(&bg1);
        assert_eq!(iwd2_labels.len(), 4);
        assert!(iwd2_labels.contains(&"Save for half"));
        assert_eq!(bg1_labels.len(), 3);
        assert!(!bg1_labels.contains(&"Save for half"));
    }

    #[test]
    fn enhanced_catalog_is_larger_than_classic() {
        let classic = SchemaRegistry::new(GameProfile::Bg2);
        let enhanced = SchemaRegistry::new(GameProfile::Bg2ee);
        assert!(enhanced.catalog_len() > classic.catalog_len());
        assert_eq!(classic.opcode_name(12), "Damage");
        assert_eq!(classic.opcode_name(9999), "Unknown effect (9999)");
    }
}
