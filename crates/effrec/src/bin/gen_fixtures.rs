//! Fixture generator for effrec integration tests.
//!
//! Generates small synthetic effect-record binaries into `tests/fixtures/`.
//! These are committed to the repo and serve as regression inputs for
//! external tooling that consumes the same format; the integration tests
//! build equivalent records in memory so they stay hermetic.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p effrec --bin gen_fixtures
//! ```

use effrec::cursor::Writer;
use effrec::{EffectRecord, NullEnv, SchemaRegistry, StructVersion};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn main() -> std::io::Result<()> {
    std::fs::create_dir_all(FIXTURES_DIR)?;

    write("v1_damage.bin", build_v1_damage())?;
    write("v1_item_usability.bin", build_v1_item_usability())?;
    write("v1_cast_spell.bin", build_v1_cast_spell())?;
    write("v2_standalone.bin", build_v2_standalone())?;

    Ok(())
}

fn write(name: &str, data: Vec<u8>) -> std::io::Result<()> {
    let path = format!("{FIXTURES_DIR}/{name}");
    std::fs::write(&path, &data)?;
    println!("wrote {name} ({} bytes)", data.len());
    Ok(())
}

/// Verify a fixture round-trips before writing it out.
fn verified(data: Vec<u8>, version: StructVersion) -> Vec<u8> {
    let registry = SchemaRegistry::new(effrec::GameProfile::Bg2ee);
    let record = EffectRecord::decode(&data, version, &registry, &NullEnv)
        .expect("fixture failed to decode");
    let encoded = record.encode().expect("fixture failed to encode");
    assert_eq!(encoded, data, "fixture round-trip mismatch");
    data
}

// ── Fixture 1: v1_damage ─────────────────────────────────────────────────────

/// Damage effect (opcode 12): 2d6+1 fire damage, save vs. spell for none.
///
/// Validates: packed mode/type word, dice cells, classic save flags.
pub fn build_v1_damage() -> Vec<u8> {
    let mut w = Writer::with_capacity(0x30);
    w.write_u16(12); // opcode: Damage
    w.write_u8(1); // target: Self
    w.write_u8(0); // power
    w.write_i32(1); // param1: amount bonus
    w.write_u16(0); // param2 low: method = Normal
    w.write_u16(8); // param2 high: fire
    w.write_u8(0); // timing: instant/limited
    w.write_u8(0); // dispel/resistance
    w.write_u32(0); // duration
    w.write_u8(100); // probability 1
    w.write_u8(0); // probability 2
    w.write_resref("", 8); // resource: unused
    w.write_u32(2); // dice thrown
    w.write_u32(6); // dice size
    w.write_u32(1); // save type: spells
    w.write_i32(0); // save bonus
    w.write_u32(0); // special
    verified(w.into_bytes(), StructVersion::V1)
}

// ── Fixture 2: v1_item_usability ─────────────────────────────────────────────

/// Item usability (opcode 319) with the actor-name selector, so the
/// re-typing pass turns param1 into a string reference and the resource
/// cell into a script name.
pub fn build_v1_item_usability() -> Vec<u8> {
    let mut w = Writer::with_capacity(0x30);
    w.write_u16(319); // opcode: Item usability
    w.write_u8(1); // target
    w.write_u8(0); // power
    w.write_u32(54321); // param1: strref once re-typed
    w.write_u32(10); // param2: actor name selector
    w.write_u8(2); // timing: while equipped
    w.write_u8(0); // dispel/resistance
    w.write_u32(0); // duration
    w.write_u8(100); // probability 1
    w.write_u8(0); // probability 2
    w.write_resref("OGRE_01", 8); // resource: script name
    w.write_u32(0); // dice thrown
    w.write_u32(0); // dice size
    w.write_u32(0); // save type
    w.write_i32(0); // save bonus
    w.write_u32(0); // special
    verified(w.into_bytes(), StructVersion::V1)
}

// ── Fixture 3: v1_cast_spell ─────────────────────────────────────────────────

/// Cast spell (opcode 146) with a typed spell resource.
pub fn build_v1_cast_spell() -> Vec<u8> {
    let mut w = Writer::with_capacity(0x30);
    w.write_u16(146); // opcode: Cast spell
    w.write_u8(2); // target: preset target
    w.write_u8(5); // power
    w.write_i32(10); // param1: cast level
    w.write_u32(1); // param2: cast instantly
    w.write_u8(0); // timing
    w.write_u8(0); // dispel/resistance
    w.write_u32(0); // duration
    w.write_u8(100); // probability 1
    w.write_u8(0); // probability 2
    w.write_resref("SPWI304", 8); // resource: the spell
    w.write_u32(0); // dice thrown
    w.write_u32(0); // dice size
    w.write_u32(0); // save type
    w.write_i32(0); // save bonus
    w.write_u32(0); // special
    verified(w.into_bytes(), StructVersion::V1)
}

// ── Fixture 4: v2_standalone ─────────────────────────────────────────────────

/// Standalone V2 record: a timed regeneration with projectile, parent
/// linkage and a script variable in the extension block.
pub fn build_v2_standalone() -> Vec<u8> {
    let mut w = Writer::with_capacity(0x100);
    w.write_u32(98); // opcode: Regeneration
    w.write_u32(1); // target: Self
    w.write_u32(0); // power
    w.write_i32(2); // param1: amount
    w.write_u32(3); // param2: amount per round
    w.write_u16(0); // timing
    w.write_u16(0); // dispel/resistance
    w.write_u32(300); // duration
    w.write_u16(100); // probability 1
    w.write_u16(0); // probability 2
    w.write_resref("", 8); // resource
    w.write_u32(0); // dice thrown
    w.write_u32(0); // dice size
    w.write_u32(0); // save type
    w.write_i32(0); // save bonus
    w.write_u32(0); // special
    w.write_u32(7); // school: necromancy
    w.write_u32(0); // lowest affected level
    w.write_u32(0); // highest affected level
    w.write_i32(0); // parameter 3
    w.write_i32(0); // parameter 4 slot
    w.write_i32(0); // parameter 5 slot
    w.write_u32(0); // time applied
    w.write_resref("", 8); // resource 2
    w.write_resref("", 8); // resource 3
    w.write_i32(-1); // caster x
    w.write_i32(-1); // caster y
    w.write_i32(-1); // target x
    w.write_i32(-1); // target y
    w.write_u32(1); // resource type: spell
    w.write_resref("SPWI417", 8); // parent resource
    w.write_u32(0); // resource flags
    w.write_u32(98); // impact projectile: magic missile
    w.write_i32(-1); // source item slot
    w.write_resref("REGEN_TIMER", 32); // variable name
    w.write_u32(9); // caster level
    w.write_u32(1); // first apply
    w.write_u32(0); // secondary type
    w.write_bytes(&[0u8; 12]); // reserved
    w.write_bytes(&[0u8; 0x38]); // tail padding
    verified(w.into_bytes(), StructVersion::V2)
}
