//! Post-decode re-typing for positionally discriminated opcodes.
//!
//! A few opcodes encode a discriminated union without a tag: the meaning of
//! one cell is fixed by the *value* of a sibling cell. The builder types
//! those cells by their base plan; this pass re-examines the discriminant
//! and replaces the affected descriptors, re-decoding their values from the
//! record's raw bytes. Phase 1 computes the replacement list without
//! touching the record; phase 2 swaps it in only when it differs, so the
//! pass is idempotent and its return value doubles as a redraw signal.

use tracing::debug;

use crate::env::ExternalEnv;
use crate::field::{FieldDescriptor, FieldKind, Sign};
use crate::layout::Envelope;
use crate::profile::Family;
use crate::record::EffectRecord;
use crate::tables;

/// Re-type the overloaded cells of `record` from its current discriminant
/// values. Returns whether anything changed. Inapplicable profile/opcode
/// combinations are a no-op, never an error.
pub fn refresh_overloads(record: &mut EffectRecord, env: &dyn ExternalEnv) -> bool {
    let Some(fields) = retyped_fields(record, env) else {
        return false;
    };
    if record.fields() == fields.as_slice() {
        return false;
    }
    debug!(
        opcode = record.opcode(),
        profile = %record.profile(),
        "re-typed overloaded fields"
    );
    record.replace_fields(fields);
    true
}

/// Phase 1: the replacement field list, or `None` when this
/// (profile, opcode) pair has no overloads.
fn retyped_fields(record: &EffectRecord, env: &dyn ExternalEnv) -> Option<Vec<FieldDescriptor>> {
    if record.profile().family() != Family::Bg2Enhanced {
        return None;
    }
    match record.opcode() {
        232 => retype_cast_condition(record),
        319 if record.profile().is_enhanced() => retype_item_usability(record),
        328 if record.profile().is_enhanced() => retype_spell_state(record, env),
        _ => None,
    }
}

/// Cast spell on condition: the special cell's meaning follows the
/// condition in the second parameter — a time-of-day range, a state
/// match, or a plain number.
fn retype_cast_condition(record: &EffectRecord) -> Option<Vec<FieldDescriptor>> {
    let envelope = envelope_of(record)?;
    let condition = record.field_at(envelope.param2.offset)?.value.as_u64()?;
    let (name, kind) = match condition {
        10 => ("Time of day", FieldKind::IdsBitmap("TIMEODAY.IDS")),
        12 => ("State", FieldKind::IdsBitmap("STATE.IDS")),
        _ => ("Special", FieldKind::Int(Sign::Unsigned)),
    };
    let mut fields = record.fields().to_vec();
    replace(&mut fields, record.raw(), envelope.special.offset, name, kind)?;
    Some(fields)
}

/// Item usability: the second parameter picks what the first parameter and
/// the resource cell hold — an actor name string reference plus a script
/// name, an IDS table entry, or nothing.
fn retype_item_usability(record: &EffectRecord) -> Option<Vec<FieldDescriptor>> {
    let envelope = envelope_of(record)?;
    let selector = record.field_at(envelope.param2.offset)?.value.as_u64()?;

    let (param1_name, param1_kind) = match selector {
        10 => ("Actor name", FieldKind::StrRef),
        2..=9 => {
            let table = tables::USABILITY_IDS.get(selector)?;
            ("IDS entry", FieldKind::IdsBitmap(table))
        }
        _ => ("Unused", FieldKind::Int(Sign::Unsigned)),
    };
    let (resource_name, resource_kind) = match selector {
        10 | 11 => ("Script name", FieldKind::Text),
        _ => ("Unused", FieldKind::Unused),
    };

    let mut fields = record.fields().to_vec();
    replace(
        &mut fields,
        record.raw(),
        envelope.param1.offset,
        param1_name,
        param1_kind,
    )?;
    replace(
        &mut fields,
        record.raw(),
        envelope.resource.offset,
        resource_name,
        resource_kind,
    )?;
    Some(fields)
}

/// Set spell state: the state cell resolves through the external state
/// table when the install ships one and the record opts in via its mode
/// flag; otherwise the built-in enumeration applies.
fn retype_spell_state(
    record: &EffectRecord,
    env: &dyn ExternalEnv,
) -> Option<Vec<FieldDescriptor>> {
    let envelope = envelope_of(record)?;
    let mode = record.field_at(envelope.special.offset)?.value.as_u64()?;
    let use_table = mode & 1 != 0 && env.has_ids_table("SPLSTATE.IDS");
    let kind = if use_table {
        FieldKind::IdsBitmap("SPLSTATE.IDS")
    } else {
        FieldKind::Bitmap(tables::SPELL_STATES)
    };
    let mut fields = record.fields().to_vec();
    replace(&mut fields, record.raw(), envelope.param2.offset, "State", kind)?;
    Some(fields)
}

fn envelope_of(record: &EffectRecord) -> Option<Envelope> {
    Envelope::resolve(
        record.raw().len(),
        record.version().opcode_width(),
        record.profile(),
    )
    .ok()
}

/// Replace the descriptor starting at `offset` with a re-decode of the
/// same byte range under a new kind.
fn replace(
    fields: &mut [FieldDescriptor],
    raw: &[u8],
    offset: usize,
    name: &'static str,
    kind: FieldKind,
) -> Option<()> {
    let index = fields.iter().position(|f| f.offset == offset)?;
    let width = fields[index].width;
    fields[index] = FieldDescriptor::decode(name, raw, offset, width, kind).ok()?;
    Some(())
}
