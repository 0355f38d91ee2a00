use effrec::{
    EffectRecord, FieldKind, FieldValue, GameProfile, NullEnv, SchemaRegistry, StructVersion,
};

/// Build a V1 record with deterministic non-zero content. The resource
/// cell gets a valid NUL-padded name, as real files have.
fn v1_record(opcode: u16) -> Vec<u8> {
    let mut data: Vec<u8> = (0..0x30u8).map(|i| i.wrapping_mul(7).wrapping_add(3)).collect();
    data[0..2].copy_from_slice(&opcode.to_le_bytes());
    data[0x14..0x1C].copy_from_slice(b"RESREF1\0");
    data
}

/// Build a V2 record with deterministic non-zero content and valid text
/// cells (resource slots and the variable name).
fn v2_record(opcode: u32) -> Vec<u8> {
    let mut data: Vec<u8> = (0..0x100usize)
        .map(|i| (i as u8).wrapping_mul(11).wrapping_add(5))
        .collect();
    data[0..4].copy_from_slice(&opcode.to_le_bytes());
    data[0x20..0x28].copy_from_slice(b"SPWI112\0");
    data[0x58..0x60].copy_from_slice(b"GLOW01\0\0");
    data[0x60..0x68].copy_from_slice(b"HIT02\0\0\0");
    data[0x7C..0x84].copy_from_slice(b"SPWI112\0");
    for b in &mut data[0x90..0xB0] {
        *b = 0;
    }
    data[0x90..0x98].copy_from_slice(b"MY_TIMER");
    data
}

#[test]
fn every_opcode_decodes_under_every_profile() {
    for profile in GameProfile::ALL {
        let registry = SchemaRegistry::new(profile);
        for opcode in 0..registry.catalog_len() {
            let data = v1_record(opcode as u16);
            let record = EffectRecord::decode(&data, StructVersion::V1, &registry, &NullEnv)
                .unwrap_or_else(|e| panic!("{profile} opcode {opcode}: {e}"));
            assert_eq!(record.opcode(), opcode);
        }
    }
}

#[test]
fn out_of_range_opcode_uses_the_generic_fallback() {
    for profile in GameProfile::ALL {
        let registry = SchemaRegistry::new(profile);
        let data = v1_record(9999);
        let record = EffectRecord::decode(&data, StructVersion::V1, &registry, &NullEnv).unwrap();
        let param1 = record.field_at(0x04).unwrap();
        let param2 = record.field_at(0x08).unwrap();
        assert_eq!(param1.name, "Parameter 1");
        assert_eq!(param2.name, "Parameter 2");
        assert_eq!(param1.width, 4);
        assert_eq!(record.field_at(0x14).unwrap().kind, FieldKind::Unused);
    }
}

#[test]
fn damage_enumeration_depends_on_the_save_model() {
    // mode = 3 in the low word, fire (8) in the high word
    let mut data = v1_record(12);
    data[0x08..0x0C].copy_from_slice(&[3, 0, 8, 0]);

    let iwd2 = SchemaRegistry::new(GameProfile::Iwd2);
    let record = EffectRecord::decode(&data, StructVersion::V1, &iwd2, &NullEnv).unwrap();
    let param2 = record.field_at(0x08).unwrap();
    assert_eq!(param2.value, FieldValue::Parts(vec![3, 8]));
    assert_eq!(
        param2.display_value(&NullEnv),
        "Method=Save for half, Damage type=Fire"
    );

    let bg1 = SchemaRegistry::new(GameProfile::Bg1);
    let record = EffectRecord::decode(&data, StructVersion::V1, &bg1, &NullEnv).unwrap();
    let param2 = record.field_at(0x08).unwrap();
    // The 3-entry vocabulary has no label for mode 3.
    assert_eq!(
        param2.display_value(&NullEnv),
        "Method=Unknown (3), Damage type=Fire"
    );
}

#[test]
fn save_vocabulary_follows_the_profile() {
    let mut data = v1_record(12);
    data[0x24..0x28].copy_from_slice(&0b101u32.to_le_bytes());

    let iwd2 = SchemaRegistry::new(GameProfile::Iwd2);
    let record = EffectRecord::decode(&data, StructVersion::V1, &iwd2, &NullEnv).unwrap();
    assert_eq!(
        record.field_at(0x24).unwrap().display_value(&NullEnv),
        "Fortitude; Will"
    );

    let bg2 = SchemaRegistry::new(GameProfile::Bg2);
    let record = EffectRecord::decode(&data, StructVersion::V1, &bg2, &NullEnv).unwrap();
    assert_eq!(
        record.field_at(0x24).unwrap().display_value(&NullEnv),
        "Spells; Paralyze/Poison/Death"
    );
}

#[test]
fn wide_timing_profiles_fold_the_resistance_byte() {
    let data = v1_record(0);
    let pst = SchemaRegistry::new(GameProfile::Pst);
    let record = EffectRecord::decode(&data, StructVersion::V1, &pst, &NullEnv).unwrap();
    let timing = record.field_at(0x0C).unwrap();
    assert_eq!(timing.width, 2);
    assert!(record.field_at(0x0D).is_none());

    let bg1 = SchemaRegistry::new(GameProfile::Bg1);
    let record = EffectRecord::decode(&data, StructVersion::V1, &bg1, &NullEnv).unwrap();
    assert_eq!(record.field_at(0x0C).unwrap().width, 1);
    assert_eq!(record.field_at(0x0D).unwrap().name, "Dispel/Resistance");
}

#[test]
fn v2_extension_parameters_are_live_only_for_iwd_families() {
    let data = v2_record(12);

    let iwd2 = SchemaRegistry::new(GameProfile::Iwd2);
    let record = EffectRecord::decode(&data, StructVersion::V2, &iwd2, &NullEnv).unwrap();
    assert_eq!(record.field_at(0x4C).unwrap().name, "Parameter 4");
    assert_eq!(record.field_at(0x50).unwrap().name, "Parameter 5");

    let bg2ee = SchemaRegistry::new(GameProfile::Bg2ee);
    let record = EffectRecord::decode(&data, StructVersion::V2, &bg2ee, &NullEnv).unwrap();
    assert_eq!(record.field_at(0x4C).unwrap().name, "Unused");
    assert_eq!(record.field_at(0x50).unwrap().name, "Unused");
    // The variable-name slot decodes as fixed text either way.
    assert_eq!(
        record.field_at(0x90).unwrap().value,
        FieldValue::Text("MY_TIMER".to_string())
    );
}

#[test]
fn resource_hints_type_the_resource_cell() {
    let registry = SchemaRegistry::new(GameProfile::Bg2);
    let mut data = v1_record(146); // Cast spell
    data[0x14..0x1C].copy_from_slice(b"SPWI304\0");
    let record = EffectRecord::decode(&data, StructVersion::V1, &registry, &NullEnv).unwrap();
    let resource = record.field_at(0x14).unwrap();
    assert_eq!(resource.name, "Spell file");
    assert_eq!(resource.kind, FieldKind::ResRef(&["SPL"]));
    assert_eq!(resource.display_value(&NullEnv), "SPWI304 (SPL)");

    // Compound hint on the visual-effect opcode.
    let mut data = v1_record(215);
    data[0x14..0x1C].copy_from_slice(b"SPFLAME\0");
    let record = EffectRecord::decode(&data, StructVersion::V1, &registry, &NullEnv).unwrap();
    assert_eq!(
        record.field_at(0x14).unwrap().kind,
        FieldKind::ResRef(&["VEF", "VVC", "BAM"])
    );
}

#[test]
fn string_hint_decodes_the_resource_cell_as_text() {
    let registry = SchemaRegistry::new(GameProfile::Bg2);
    let mut data = v1_record(309); // Modify local variable
    data[0x14..0x1C].copy_from_slice(b"VARNAME\0");
    let record = EffectRecord::decode(&data, StructVersion::V1, &registry, &NullEnv).unwrap();
    let resource = record.field_at(0x14).unwrap();
    assert_eq!(resource.name, "Variable name");
    assert_eq!(resource.kind, FieldKind::Text);
    assert_eq!(resource.value, FieldValue::Text("VARNAME".to_string()));
}

#[test]
fn opcode_name_catalogs_diverge_per_profile() {
    let bg2 = SchemaRegistry::new(GameProfile::Bg2);
    assert_eq!(bg2.opcode_name(12), "Damage");
    assert_eq!(bg2.opcode_name(232), "Cast spell on condition");

    let iwd2 = SchemaRegistry::new(GameProfile::Iwd2);
    assert_eq!(iwd2.opcode_name(33), "Fortitude save bonus");
    assert_eq!(iwd2.opcode_name(401), "Skill bonus");

    let bg1 = SchemaRegistry::new(GameProfile::Bg1);
    assert_eq!(bg1.opcode_name(33), "Save vs. death bonus");
    assert_eq!(bg1.opcode_name(232), "Unknown effect (232)");
    assert!(bg1.catalog_len() < iwd2.catalog_len());
}

#[test]
fn decoded_records_serialize_for_export() {
    let registry = SchemaRegistry::new(GameProfile::Bg2);
    let data = v1_record(12);
    let record = EffectRecord::decode(&data, StructVersion::V1, &registry, &NullEnv).unwrap();
    let json: serde_json::Value = serde_json::to_value(&record).unwrap();
    assert_eq!(json["opcode"], 12);
    assert_eq!(json["version"], "V1");
    assert_eq!(json["fields"][0]["name"], "Type");
    assert_eq!(json["fields"][3]["name"], "Amount");
    assert_eq!(json["fields"][3]["kind"], "integer");
}
