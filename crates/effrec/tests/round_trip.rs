use effrec::{EffectRecord, FieldValue, GameProfile, NullEnv, SchemaRegistry, StructVersion};

/// Deterministic V1 record content with valid text cells.
fn v1_record(opcode: u16) -> Vec<u8> {
    let mut data: Vec<u8> = (0..0x30u8).map(|i| i.wrapping_mul(13).wrapping_add(1)).collect();
    data[0..2].copy_from_slice(&opcode.to_le_bytes());
    data[0x14..0x1C].copy_from_slice(b"SPWI112\0");
    data
}

/// Deterministic V2 record content with valid text cells.
fn v2_record(opcode: u32) -> Vec<u8> {
    let mut data: Vec<u8> = (0..0x100usize)
        .map(|i| (i as u8).wrapping_mul(29).wrapping_add(7))
        .collect();
    data[0..4].copy_from_slice(&opcode.to_le_bytes());
    data[0x20..0x28].copy_from_slice(b"SPWI112\0");
    data[0x58..0x60].copy_from_slice(b"GLOW01\0\0");
    data[0x60..0x68].copy_from_slice(b"HIT02\0\0\0");
    data[0x7C..0x84].copy_from_slice(b"SPIN978\0");
    for b in &mut data[0x90..0xB0] {
        *b = 0;
    }
    data[0x90..0x96].copy_from_slice(b"TIMER1");
    data
}

#[test]
fn v1_round_trips_for_every_opcode_and_profile() {
    for profile in GameProfile::ALL {
        let registry = SchemaRegistry::new(profile);
        // The whole defined range plus one past it.
        for opcode in (0..registry.catalog_len()).chain([9999]) {
            let data = v1_record(opcode as u16);
            let record = EffectRecord::decode(&data, StructVersion::V1, &registry, &NullEnv)
                .unwrap_or_else(|e| panic!("{profile} opcode {opcode}: {e}"));
            assert_eq!(
                record.encode().unwrap(),
                data,
                "{profile} opcode {opcode} did not round-trip"
            );
        }
    }
}

#[test]
fn v2_round_trips_for_every_opcode_and_profile() {
    for profile in GameProfile::ALL {
        let registry = SchemaRegistry::new(profile);
        for opcode in (0..registry.catalog_len()).step_by(3).chain([9999]) {
            let data = v2_record(opcode);
            let record = EffectRecord::decode(&data, StructVersion::V2, &registry, &NullEnv)
                .unwrap_or_else(|e| panic!("{profile} opcode {opcode}: {e}"));
            assert_eq!(
                record.encode().unwrap(),
                data,
                "{profile} opcode {opcode} did not round-trip"
            );
        }
    }
}

#[test]
fn re_typing_preserves_the_bytes() {
    let registry = SchemaRegistry::new(GameProfile::Bg2ee);
    for param2 in [0u32, 5, 10, 11] {
        let mut data = v1_record(319);
        data[0x08..0x0C].copy_from_slice(&param2.to_le_bytes());
        let mut record =
            EffectRecord::decode(&data, StructVersion::V1, &registry, &NullEnv).unwrap();
        effrec::retype::refresh_overloads(&mut record, &NullEnv);
        assert_eq!(
            record.encode().unwrap(),
            data,
            "selector {param2} did not round-trip after re-typing"
        );
    }
}

#[test]
fn oversized_blocks_pass_their_tail_through() {
    let registry = SchemaRegistry::new(GameProfile::Iwd);
    let mut data = v1_record(98);
    data.extend_from_slice(&[0x5A; 12]);
    let record = EffectRecord::decode(&data, StructVersion::V1, &registry, &NullEnv).unwrap();
    assert!(record.size_mismatch());
    assert_eq!(record.encode().unwrap(), data);
}

#[test]
fn edits_survive_the_encode_decode_cycle() {
    let registry = SchemaRegistry::new(GameProfile::Bg2);
    let data = v1_record(12);
    let mut record = EffectRecord::decode(&data, StructVersion::V1, &registry, &NullEnv).unwrap();
    record.set_value(0x04, FieldValue::Int(-25)).unwrap();
    record
        .set_value(0x08, FieldValue::Parts(vec![1, 256]))
        .unwrap();

    let encoded = record.encode().unwrap();
    let reread = EffectRecord::decode(&encoded, StructVersion::V1, &registry, &NullEnv).unwrap();
    assert_eq!(reread.field_at(0x04).unwrap().value, FieldValue::Int(-25));
    assert_eq!(
        reread.field_at(0x08).unwrap().value,
        FieldValue::Parts(vec![1, 256])
    );
}
