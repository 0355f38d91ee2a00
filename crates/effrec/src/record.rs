//! Whole-record decode and encode.
//!
//! Decoding is a strictly ordered pipeline over a monotonically advancing
//! cursor: envelope head → parameters → timing/duration/probabilities →
//! resource → dice/saves → special (→ V2 extension). Each stage appends
//! field descriptors; nothing branches back. Encoding overlays the decoded
//! values onto the record's retained raw bytes, so padding and bytes past
//! the declared size pass through byte-identical.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::cursor::Writer;
use crate::env::ExternalEnv;
use crate::error::{Error, Result};
use crate::field::{FieldDescriptor, FieldKind, FieldValue, Sign};
use crate::layout::{Envelope, Slot, StructVersion, V2_PARAM4_DELTA, V2_PARAM5_DELTA};
use crate::profile::{Family, GameProfile};
use crate::schema::{ResourcePlan, SchemaRegistry};
use crate::tables;

/// One decoded effect record.
#[derive(Debug)]
pub struct EffectRecord {
    version: StructVersion,
    profile: GameProfile,
    opcode: u32,
    /// Full raw bytes as read from the containing resource. May exceed the
    /// declared record size; the excess passes through encode untouched.
    raw: Vec<u8>,
    fields: Vec<FieldDescriptor>,
    size_mismatch: bool,
}

impl EffectRecord {
    /// Decode a record of the given structure version.
    ///
    /// `data` is the record's byte range within its containing resource;
    /// its length is the declared record size. Fails only on structural
    /// problems (undersized record, unknown opcode width); unmapped
    /// opcodes, unknown enum values and oversized blocks all decode.
    pub fn decode(
        data: &[u8],
        version: StructVersion,
        registry: &SchemaRegistry,
        env: &dyn ExternalEnv,
    ) -> Result<Self> {
        let profile = registry.profile();
        let envelope = Envelope::resolve(data.len(), version.opcode_width(), profile)?;

        let mut b = StageCursor::new(data);
        // Envelope head: opcode, target, power.
        b.push("Type", envelope.opcode, FieldKind::Int(Sign::Unsigned))?;
        let opcode = b.fields[0]
            .value
            .as_u64()
            .unwrap_or_default() as u32;
        b.push("Target", envelope.target, FieldKind::Bitmap(tables::TARGET_TYPES))?;
        b.push("Power", envelope.power, FieldKind::Int(Sign::Unsigned))?;

        // Parameters, typed by the schema entry.
        let entry = registry.entry(opcode, env);
        b.push(entry.param1.name, envelope.param1, entry.param1.kind)?;
        b.push(entry.param2.name, envelope.param2, entry.param2.kind)?;

        // Timing, duration, probabilities.
        b.push(
            "Timing mode",
            envelope.timing,
            FieldKind::HashBitmap(&tables::TIMING_MODES),
        )?;
        if let Some(resistance) = envelope.resistance {
            b.push(
                "Dispel/Resistance",
                resistance,
                FieldKind::Flags(tables::DISPEL_FLAGS),
            )?;
        }
        b.push("Duration", envelope.duration, FieldKind::Int(Sign::Unsigned))?;
        b.push(
            "Probability 1",
            envelope.probability1,
            FieldKind::Int(Sign::Unsigned),
        )?;
        b.push(
            "Probability 2",
            envelope.probability2,
            FieldKind::Int(Sign::Unsigned),
        )?;

        // Resource cell, typed by the schema hint.
        match entry.resource {
            Some(ResourcePlan::Ref { name, types }) => {
                b.push(name, envelope.resource, FieldKind::ResRef(types))?;
            }
            Some(ResourcePlan::Text { name }) => {
                b.push(name, envelope.resource, FieldKind::Text)?;
            }
            None => b.push("Unused", envelope.resource, FieldKind::Unused)?,
        }

        // Dice and saves. The save vocabulary follows the profile.
        b.push(
            "# dice thrown",
            envelope.dice_thrown,
            FieldKind::Int(Sign::Unsigned),
        )?;
        b.push("Dice size", envelope.dice_sides, FieldKind::Int(Sign::Unsigned))?;
        b.push(
            "Save type",
            envelope.save_type,
            FieldKind::Flags(profile.save_flag_labels()),
        )?;
        b.push("Save bonus", envelope.save_bonus, FieldKind::Int(Sign::Signed))?;

        // Special cell.
        match entry.special {
            Some(plan) => b.push(plan.name, envelope.special, plan.kind)?,
            None => b.push("Special", envelope.special, FieldKind::Int(Sign::Unsigned))?,
        }

        // V2 extension block. The two trailing parameter slots are live on
        // the IWD-style families and unused elsewhere.
        let iwd_params = matches!(profile.family(), Family::Iwd | Family::Iwd2);
        for ext in envelope.extension {
            let slot = Slot {
                offset: ext.offset,
                width: ext.width,
            };
            if (ext.offset == V2_PARAM4_DELTA || ext.offset == V2_PARAM5_DELTA) && !iwd_params {
                b.push("Unused", slot, FieldKind::Int(Sign::Unsigned))?;
            } else {
                b.push(ext.name, slot, ext.kind)?;
            }
        }
        if version == StructVersion::V2 {
            // Reserved tail of the fixed-size body.
            let tail = Slot {
                offset: b.consumed,
                width: version.total_size() - b.consumed,
            };
            b.push("Unused", tail, FieldKind::Unused)?;
        }

        let size_mismatch = b.consumed != data.len();
        if size_mismatch {
            warn!(
                consumed = b.consumed,
                declared = data.len(),
                opcode,
                "record size does not match bytes consumed"
            );
        }

        Ok(Self {
            version,
            profile,
            opcode,
            raw: data.to_vec(),
            fields: b.fields,
            size_mismatch,
        })
    }

    /// Re-serialize the record. Byte-identical to the input for bytes not
    /// owned by any field descriptor.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut w = Writer::from_bytes(self.raw.clone());
        for field in &self.fields {
            field
                .kind
                .patch(&mut w, field.offset, field.width, &field.value)?;
        }
        Ok(w.into_bytes())
    }

    pub fn version(&self) -> StructVersion {
        self.version
    }

    pub fn profile(&self) -> GameProfile {
        self.profile
    }

    pub fn opcode(&self) -> u32 {
        self.opcode
    }

    /// The ordered field list. Field byte ranges are non-overlapping and
    /// lie within the declared record size.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Whether the declared size differed from the bytes the decode
    /// pipeline consumed. Tolerated: real-world files get this wrong.
    pub fn size_mismatch(&self) -> bool {
        self.size_mismatch
    }

    /// Raw bytes as read from the containing resource.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The field whose byte range starts at `offset`.
    pub fn field_at(&self, offset: usize) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.offset == offset)
    }

    /// Update a field's value, writing it through to the raw bytes so a
    /// subsequent encode or re-typing pass sees the change.
    pub fn set_value(&mut self, offset: usize, value: FieldValue) -> Result<()> {
        let index = self
            .fields
            .iter()
            .position(|f| f.offset == offset)
            .ok_or(Error::UnknownField { offset })?;
        let field = &self.fields[index];
        let mut w = Writer::from_bytes(std::mem::take(&mut self.raw));
        match field.kind.patch(&mut w, field.offset, field.width, &value) {
            Ok(()) => {
                self.raw = w.into_bytes();
                self.fields[index].value = value;
                Ok(())
            }
            Err(e) => {
                self.raw = w.into_bytes();
                Err(e)
            }
        }
    }

    /// Replace the field list wholesale. Used by the re-typing pass; the
    /// replacement must preserve the non-overlap invariant.
    pub(crate) fn replace_fields(&mut self, fields: Vec<FieldDescriptor>) {
        self.fields = fields;
    }
}

impl Serialize for EffectRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("EffectRecord", 5)?;
        s.serialize_field("version", &self.version)?;
        s.serialize_field("profile", &self.profile)?;
        s.serialize_field("opcode", &self.opcode)?;
        s.serialize_field("fields", &self.fields)?;
        s.serialize_field("size_mismatch", &self.size_mismatch)?;
        s.end()
    }
}

/// Append-only descriptor list over a monotonically advancing cursor.
struct StageCursor<'a> {
    data: &'a [u8],
    fields: Vec<FieldDescriptor>,
    consumed: usize,
}

impl<'a> StageCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            fields: Vec::with_capacity(24),
            consumed: 0,
        }
    }

    fn push(&mut self, name: &'static str, slot: Slot, kind: FieldKind) -> Result<()> {
        debug_assert_eq!(
            slot.offset, self.consumed,
            "stage order violated at field {name}"
        );
        self.fields.push(FieldDescriptor::decode(
            name,
            self.data,
            slot.offset,
            slot.width,
            kind,
        )?);
        self.consumed = slot.offset + slot.width;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::NullEnv;

    fn registry(profile: GameProfile) -> SchemaRegistry {
        SchemaRegistry::new(profile)
    }

    fn v1_bytes(opcode: u16) -> Vec<u8> {
        let mut data = vec![0u8; 0x30];
        data[0..2].copy_from_slice(&opcode.to_le_bytes());
        data
    }

    #[test]
    fn v1_boundary_sizes() {
        let reg = registry(GameProfile::Bg2);
        let data = v1_bytes(0);
        assert!(EffectRecord::decode(&data, StructVersion::V1, &reg, &NullEnv).is_ok());
        assert!(matches!(
            EffectRecord::decode(&data[..0x2F], StructVersion::V1, &reg, &NullEnv),
            Err(Error::Undersized { .. })
        ));
    }

    #[test]
    fn v2_boundary_sizes() {
        let reg = registry(GameProfile::Iwd);
        let mut data = vec![0u8; 0x100];
        data[0..4].copy_from_slice(&12u32.to_le_bytes());
        assert!(EffectRecord::decode(&data, StructVersion::V2, &reg, &NullEnv).is_ok());
        assert!(matches!(
            EffectRecord::decode(&data[..0xFF], StructVersion::V2, &reg, &NullEnv),
            Err(Error::Undersized { .. })
        ));
    }

    #[test]
    fn fields_are_ordered_and_non_overlapping() {
        let reg = registry(GameProfile::Bg2ee);
        let mut data = vec![0u8; 0x100];
        data[0..4].copy_from_slice(&12u32.to_le_bytes());
        let record = EffectRecord::decode(&data, StructVersion::V2, &reg, &NullEnv).unwrap();
        let mut end = 0;
        for field in record.fields() {
            assert!(field.offset >= end, "{} overlaps its predecessor", field.name);
            end = field.end();
        }
        assert_eq!(end, 0x100);
        assert!(!record.size_mismatch());
    }

    #[test]
    fn oversized_block_sets_the_validation_flag() {
        let reg = registry(GameProfile::Bg1);
        let mut data = v1_bytes(12);
        data.extend_from_slice(&[0xCD; 4]);
        let record = EffectRecord::decode(&data, StructVersion::V1, &reg, &NullEnv).unwrap();
        assert!(record.size_mismatch());
        // Trailing bytes still pass through encode.
        assert_eq!(record.encode().unwrap(), data);
    }

    #[test]
    fn set_value_writes_through_to_raw_bytes() {
        let reg = registry(GameProfile::Bg2);
        let data = v1_bytes(12);
        let mut record = EffectRecord::decode(&data, StructVersion::V1, &reg, &NullEnv).unwrap();
        record.set_value(0x04, FieldValue::Int(42)).unwrap();
        assert_eq!(&record.raw()[0x04..0x08], &42i32.to_le_bytes());
        assert_eq!(
            record.field_at(0x04).unwrap().value,
            FieldValue::Int(42)
        );
    }

    #[test]
    fn unmapped_opcode_decodes_with_fallback_names() {
        let reg = registry(GameProfile::Bg1);
        let data = v1_bytes(9999);
        let record = EffectRecord::decode(&data, StructVersion::V1, &reg, &NullEnv).unwrap();
        assert_eq!(record.field_at(0x04).unwrap().name, "Parameter 1");
        assert_eq!(record.field_at(0x08).unwrap().name, "Parameter 2");
        assert_eq!(record.field_at(0x14).unwrap().kind, FieldKind::Unused);
    }
}
