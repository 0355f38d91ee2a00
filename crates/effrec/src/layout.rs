//! Fixed field envelopes for the two effect structure versions.
//!
//! V1 is the 0x30-byte block embedded in item/spell/creature resources;
//! V2 is the 0x100-byte body of standalone effect files. All offsets are
//! deltas from the opcode field; the envelope is pure layout — field kinds
//! that depend on the game profile are assigned by the record builder.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::field::{FieldKind, Sign};
use crate::profile::GameProfile;
use crate::tables;

/// Structure version tag, derived from the opcode field width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StructVersion {
    V1,
    V2,
}

impl StructVersion {
    /// Declared total size of a record of this version.
    pub const fn total_size(self) -> usize {
        match self {
            Self::V1 => 0x30,
            Self::V2 => 0x100,
        }
    }

    /// Width of the opcode field.
    pub const fn opcode_width(self) -> usize {
        match self {
            Self::V1 => 2,
            Self::V2 => 4,
        }
    }

    /// Version from an opcode field width: 2 bytes ⇒ V1, 4 bytes ⇒ V2.
    pub fn from_opcode_width(width: usize) -> Result<Self> {
        match width {
            2 => Ok(Self::V1),
            4 => Ok(Self::V2),
            _ => Err(Error::UnsupportedOpcodeWidth { width }),
        }
    }

    /// The structure version a block of `size` bytes can hold, for
    /// container readers that only know the block size.
    pub fn probe(size: usize) -> Option<Self> {
        if size >= Self::V2.total_size() {
            Some(Self::V2)
        } else if size >= Self::V1.total_size() {
            Some(Self::V1)
        } else {
            None
        }
    }
}

impl std::fmt::Display for StructVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => write!(f, "V1"),
            Self::V2 => write!(f, "V2"),
        }
    }
}

/// Byte range of one envelope field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub offset: usize,
    pub width: usize,
}

impl Slot {
    const fn new(offset: usize, width: usize) -> Self {
        Self { offset, width }
    }
}

/// One fixed field of the V2 extension block.
#[derive(Debug)]
pub struct ExtField {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
    pub kind: FieldKind,
}

const fn ext(name: &'static str, offset: usize, width: usize, kind: FieldKind) -> ExtField {
    ExtField {
        name,
        offset,
        width,
        kind,
    }
}

/// Deltas of the two V2 extension slots that are live parameters on the
/// IWD-style families and unused elsewhere.
pub const V2_PARAM4_DELTA: usize = 0x4C;
pub const V2_PARAM5_DELTA: usize = 0x50;

/// V2 extension block: 24 fields following the special field, covering
/// school/level gating, caster/target coordinates, parent-resource linkage
/// and projectile/variable slots. Bytes past the last field (0xC8–0xFF)
/// are padding and pass through encode untouched.
pub static V2_EXTENSION: &[ExtField] = &[
    ext("Primary type (school)", 0x3C, 4, FieldKind::Bitmap(tables::SCHOOLS)),
    ext("Lowest affected level", 0x40, 4, FieldKind::Int(Sign::Unsigned)),
    ext("Highest affected level", 0x44, 4, FieldKind::Int(Sign::Unsigned)),
    ext("Parameter 3", 0x48, 4, FieldKind::Int(Sign::Signed)),
    ext("Parameter 4", V2_PARAM4_DELTA, 4, FieldKind::Int(Sign::Signed)),
    ext("Parameter 5", V2_PARAM5_DELTA, 4, FieldKind::Int(Sign::Signed)),
    ext("Time applied (ticks)", 0x54, 4, FieldKind::Int(Sign::Unsigned)),
    ext("Resource 2", 0x58, 8, FieldKind::ResRef(&["VVC", "BAM"])),
    ext("Resource 3", 0x60, 8, FieldKind::ResRef(&["VVC", "BAM"])),
    ext("Caster location: X", 0x68, 4, FieldKind::Int(Sign::Signed)),
    ext("Caster location: Y", 0x6C, 4, FieldKind::Int(Sign::Signed)),
    ext("Target location: X", 0x70, 4, FieldKind::Int(Sign::Signed)),
    ext("Target location: Y", 0x74, 4, FieldKind::Int(Sign::Signed)),
    ext("Resource type", 0x78, 4, FieldKind::Bitmap(tables::PARENT_TYPES)),
    ext("Parent resource", 0x7C, 8, FieldKind::ResRef(&["SPL", "ITM"])),
    ext("Resource flags", 0x84, 4, FieldKind::Flags(tables::PARENT_FLAGS)),
    ext(
        "Impact projectile",
        0x88,
        4,
        FieldKind::HashBitmap(&tables::PROJECTILES),
    ),
    ext("Source item slot", 0x8C, 4, FieldKind::Int(Sign::Signed)),
    ext("Variable name", 0x90, 32, FieldKind::Text),
    ext("Caster level", 0xB0, 4, FieldKind::Int(Sign::Unsigned)),
    ext("First apply", 0xB4, 4, FieldKind::Int(Sign::Unsigned)),
    ext(
        "Secondary type",
        0xB8,
        4,
        FieldKind::Bitmap(tables::SECONDARY_TYPES),
    ),
    ext("Unused", 0xBC, 8, FieldKind::Unused),
    ext("Unused", 0xC4, 4, FieldKind::Unused),
];

/// Resolved envelope: the byte layout of every fixed field of a record.
#[derive(Debug)]
pub struct Envelope {
    pub version: StructVersion,
    pub opcode: Slot,
    pub target: Slot,
    pub power: Slot,
    pub param1: Slot,
    pub param2: Slot,
    pub timing: Slot,
    /// Absent when the profile folds the dispel/resistance byte into a
    /// 2-byte timing field (wide-timing quirk).
    pub resistance: Option<Slot>,
    pub duration: Slot,
    pub probability1: Slot,
    pub probability2: Slot,
    pub resource: Slot,
    pub dice_thrown: Slot,
    pub dice_sides: Slot,
    pub save_type: Slot,
    pub save_bonus: Slot,
    pub special: Slot,
    /// V2 extension fields; empty for V1.
    pub extension: &'static [ExtField],
}

impl Envelope {
    /// Resolve the envelope for a record.
    ///
    /// `total_size` is the declared record size; `opcode_width` confirms the
    /// opcode field and selects the version. Fails when the record cannot
    /// hold the version's envelope or no known opcode field width matches.
    pub fn resolve(
        total_size: usize,
        opcode_width: usize,
        profile: GameProfile,
    ) -> Result<Envelope> {
        let version = StructVersion::from_opcode_width(opcode_width)?;
        if total_size < version.total_size() {
            return Err(Error::Undersized {
                version,
                need: version.total_size(),
                have: total_size,
            });
        }
        Ok(match version {
            StructVersion::V1 => {
                let (timing, resistance) = if profile.has_wide_timing() {
                    (Slot::new(0x0C, 2), None)
                } else {
                    (Slot::new(0x0C, 1), Some(Slot::new(0x0D, 1)))
                };
                Envelope {
                    version,
                    opcode: Slot::new(0x00, 2),
                    target: Slot::new(0x02, 1),
                    power: Slot::new(0x03, 1),
                    param1: Slot::new(0x04, 4),
                    param2: Slot::new(0x08, 4),
                    timing,
                    resistance,
                    duration: Slot::new(0x0E, 4),
                    probability1: Slot::new(0x12, 1),
                    probability2: Slot::new(0x13, 1),
                    resource: Slot::new(0x14, 8),
                    dice_thrown: Slot::new(0x1C, 4),
                    dice_sides: Slot::new(0x20, 4),
                    save_type: Slot::new(0x24, 4),
                    save_bonus: Slot::new(0x28, 4),
                    special: Slot::new(0x2C, 4),
                    extension: &[],
                }
            }
            StructVersion::V2 => Envelope {
                version,
                opcode: Slot::new(0x00, 4),
                target: Slot::new(0x04, 4),
                power: Slot::new(0x08, 4),
                param1: Slot::new(0x0C, 4),
                param2: Slot::new(0x10, 4),
                timing: Slot::new(0x14, 2),
                resistance: Some(Slot::new(0x16, 2)),
                duration: Slot::new(0x18, 4),
                probability1: Slot::new(0x1C, 2),
                probability2: Slot::new(0x1E, 2),
                resource: Slot::new(0x20, 8),
                dice_thrown: Slot::new(0x28, 4),
                dice_sides: Slot::new(0x2C, 4),
                save_type: Slot::new(0x30, 4),
                save_bonus: Slot::new(0x34, 4),
                special: Slot::new(0x38, 4),
                extension: V2_EXTENSION,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_envelope_spans_the_whole_block() {
        let env = Envelope::resolve(0x30, 2, GameProfile::Bg2).unwrap();
        assert_eq!(env.version, StructVersion::V1);
        assert_eq!(env.special.offset, 0x2C);
        assert_eq!(env.special.offset + env.special.width, 0x30);
        assert!(env.resistance.is_some());
    }

    #[test]
    fn wide_timing_replaces_the_resistance_byte() {
        let env = Envelope::resolve(0x30, 2, GameProfile::Pst).unwrap();
        assert_eq!(env.timing.width, 2);
        assert!(env.resistance.is_none());
        assert_eq!(env.duration.offset, 0x0E);
    }

    #[test]
    fn v2_extension_is_contiguous_after_special() {
        let env = Envelope::resolve(0x100, 4, GameProfile::Bg2ee).unwrap();
        assert_eq!(env.extension.len(), 24);
        let mut expected = env.special.offset + env.special.width;
        for field in env.extension {
            assert_eq!(field.offset, expected, "gap before {}", field.name);
            expected += field.width;
        }
        assert_eq!(expected, 0xC8);
        assert_eq!(env.extension.last().unwrap().offset, 0xC4);
    }

    #[test]
    fn undersized_records_are_rejected() {
        let err = Envelope::resolve(0x2F, 2, GameProfile::Bg1).unwrap_err();
        assert!(matches!(err, Error::Undersized { have: 0x2F, .. }));
        let err = Envelope::resolve(0xFF, 4, GameProfile::Bg1).unwrap_err();
        assert!(matches!(err, Error::Undersized { have: 0xFF, .. }));
    }

    #[test]
    fn unknown_opcode_width_is_rejected() {
        assert!(matches!(
            Envelope::resolve(0x100, 3, GameProfile::Bg1).unwrap_err(),
            Error::UnsupportedOpcodeWidth { width: 3 }
        ));
    }

    #[test]
    fn probe_picks_the_largest_fitting_version() {
        assert_eq!(StructVersion::probe(0x30), Some(StructVersion::V1));
        assert_eq!(StructVersion::probe(0xFF), Some(StructVersion::V1));
        assert_eq!(StructVersion::probe(0x100), Some(StructVersion::V2));
        assert_eq!(StructVersion::probe(0x2F), None);
    }
}
