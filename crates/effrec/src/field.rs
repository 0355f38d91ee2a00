use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::cursor::{Cursor, Writer};
use crate::env::ExternalEnv;
use crate::error::{Error, Result};
use crate::tables::LookupTable;

/// Signedness of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sign {
    Signed,
    Unsigned,
}

/// Component order of a packed color field.
///
/// Three-byte orders occupy the low three bytes of the field; the `x` byte
/// of four-byte orders is padding that passes through encode untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorOrder {
    Rgb,
    Bgr,
    Rgbx,
    Xbgr,
}

impl ColorOrder {
    /// Byte index of (red, green, blue) within the field.
    fn positions(self) -> [usize; 3] {
        match self {
            Self::Rgb | Self::Rgbx => [0, 1, 2],
            Self::Bgr => [2, 1, 0],
            Self::Xbgr => [3, 2, 1],
        }
    }
}

/// One bit-width-partitioned sub-field of a [`FieldKind::Multi`] word.
/// Parts are packed least-significant first and must cover the whole word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberPart {
    pub name: &'static str,
    pub bits: u32,
    pub labels: PartLabels,
}

/// Label source for one sub-field of a packed word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartLabels {
    None,
    Ordered(&'static [&'static str]),
    Table(&'static LookupTable),
}

/// Decode/encode contract for one field. The kind plus the descriptor's
/// width fully determine the byte-level representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Plain integer, signed or unsigned per declaration.
    Int(Sign),
    /// Index into an ordered label list. Out-of-range stays a value and
    /// displays as `Unknown (n)`.
    Bitmap(&'static [&'static str]),
    /// Sparse 64-bit key into a named lookup table.
    HashBitmap(&'static LookupTable),
    /// Value resolved through the external IDS resolver, by table name.
    IdsBitmap(&'static str),
    /// One label per bit position; unused bits are ignored.
    Flags(&'static [&'static str]),
    /// Index into the external localized string table.
    StrRef,
    /// Fixed-width ASCII resource name with an allowed-extension hint.
    ResRef(&'static [&'static str]),
    /// Packed color components.
    Color(ColorOrder),
    /// Bit-width-partitioned sub-fields packed in one word.
    Multi(&'static [NumberPart]),
    /// Fixed-width ASCII blob.
    Text,
    /// Opaque bytes carried through decode/encode unchanged.
    Unused,
}

impl FieldKind {
    /// Short tag for serialization and error messages.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Bitmap(_) => "bitmap",
            Self::HashBitmap(_) => "hash-bitmap",
            Self::IdsBitmap(_) => "ids-bitmap",
            Self::Flags(_) => "flags",
            Self::StrRef => "strref",
            Self::ResRef(_) => "resref",
            Self::Color(_) => "color",
            Self::Multi(_) => "multi-number",
            Self::Text => "text",
            Self::Unused => "unused",
        }
    }

    /// Decode the field's value from the record bytes. Pure in
    /// `(bytes, offset, width, kind)`; never consults a resolver.
    pub fn decode(&self, bytes: &[u8], offset: usize, width: usize) -> Result<FieldValue> {
        let mut c = Cursor::new(bytes).at_offset(offset);
        match self {
            Self::Int(Sign::Signed) => {
                let raw = c.read_uint(width)?;
                Ok(FieldValue::Int(sign_extend(raw, width)))
            }
            Self::Int(Sign::Unsigned)
            | Self::Bitmap(_)
            | Self::HashBitmap(_)
            | Self::IdsBitmap(_)
            | Self::Flags(_)
            | Self::StrRef => Ok(FieldValue::Uint(c.read_uint(width)?)),
            Self::ResRef(_) | Self::Text => Ok(FieldValue::Text(c.read_resref(width)?)),
            Self::Color(order) => {
                let raw = c.read_bytes(width)?;
                let [r, g, b] = order.positions().map(|i| raw[i]);
                Ok(FieldValue::Color { r, g, b })
            }
            Self::Multi(parts) => {
                debug_assert_eq!(
                    parts.iter().map(|p| p.bits).sum::<u32>() as usize,
                    width * 8,
                    "multi-number parts must cover the word"
                );
                let word = c.read_uint(width)?;
                let mut shift = 0;
                let mut values = Vec::with_capacity(parts.len());
                for part in *parts {
                    let mask = if part.bits == 64 {
                        u64::MAX
                    } else {
                        (1u64 << part.bits) - 1
                    };
                    values.push((word >> shift) & mask);
                    shift += part.bits;
                }
                Ok(FieldValue::Parts(values))
            }
            Self::Unused => Ok(FieldValue::Bytes(c.read_bytes(width)?.to_vec())),
        }
    }

    /// Write the value back at `offset`. Exact inverse of [`decode`]: only
    /// bytes the kind owns are touched (a color's padding byte, for
    /// instance, is left as-is).
    ///
    /// [`decode`]: FieldKind::decode
    pub fn patch(
        &self,
        w: &mut Writer,
        offset: usize,
        width: usize,
        value: &FieldValue,
    ) -> Result<()> {
        match (self, value) {
            (Self::Int(Sign::Signed), FieldValue::Int(v)) => {
                w.patch_uint(offset, *v as u64, width);
            }
            (
                Self::Int(Sign::Unsigned)
                | Self::Bitmap(_)
                | Self::HashBitmap(_)
                | Self::IdsBitmap(_)
                | Self::Flags(_)
                | Self::StrRef,
                FieldValue::Uint(v),
            ) => {
                w.patch_uint(offset, *v, width);
            }
            (Self::ResRef(_) | Self::Text, FieldValue::Text(s)) => {
                w.patch_resref(offset, s, width);
            }
            (Self::Color(order), FieldValue::Color { r, g, b }) => {
                let [rp, gp, bp] = order.positions();
                w.patch_u8(offset + rp, *r);
                w.patch_u8(offset + gp, *g);
                w.patch_u8(offset + bp, *b);
            }
            (Self::Multi(parts), FieldValue::Parts(values)) => {
                let mut word = 0u64;
                let mut shift = 0;
                for (part, v) in parts.iter().zip(values) {
                    let mask = if part.bits == 64 {
                        u64::MAX
                    } else {
                        (1u64 << part.bits) - 1
                    };
                    word |= (v & mask) << shift;
                    shift += part.bits;
                }
                w.patch_uint(offset, word, width);
            }
            (Self::Unused, FieldValue::Bytes(raw)) => {
                if raw.len() != width {
                    return Err(Error::FieldValue {
                        offset,
                        kind: self.tag(),
                        message: format!("expected {width} bytes, got {}", raw.len()),
                    });
                }
                w.patch_bytes(offset, raw);
            }
            (kind, value) => {
                return Err(Error::FieldValue {
                    offset,
                    kind: kind.tag(),
                    message: format!("value {value:?} does not match field kind"),
                })
            }
        }
        Ok(())
    }

    /// Encode into a standalone buffer of `width` bytes. Convenience for
    /// fixture building; record serialization goes through [`patch`] so
    /// padding bytes pass through.
    ///
    /// [`patch`]: FieldKind::patch
    pub fn encode(&self, value: &FieldValue, width: usize) -> Result<Vec<u8>> {
        let mut w = Writer::from_bytes(vec![0u8; width]);
        self.patch(&mut w, 0, width, value)?;
        Ok(w.into_bytes())
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// A decoded field value. Paired with a [`FieldKind`], this is sufficient
/// to re-encode the field byte-exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldValue {
    Int(i64),
    Uint(u64),
    Text(String),
    Color { r: u8, g: u8, b: u8 },
    Parts(Vec<u64>),
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// The value as an unsigned integer, where that makes sense.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint(v) => Some(*v),
            Self::Int(v) => Some(*v as u64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// One decoded field of an effect record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
    pub kind: FieldKind,
    pub value: FieldValue,
}

impl FieldDescriptor {
    /// Decode a descriptor from the record bytes.
    pub fn decode(
        name: &'static str,
        bytes: &[u8],
        offset: usize,
        width: usize,
        kind: FieldKind,
    ) -> Result<Self> {
        let value = kind.decode(bytes, offset, width)?;
        Ok(Self {
            name,
            offset,
            width,
            kind,
            value,
        })
    }

    /// Exclusive end offset of the field's byte range.
    pub fn end(&self) -> usize {
        self.offset + self.width
    }

    /// Allowed resource extensions, for resource-reference fields.
    pub fn resource_types(&self) -> Option<&'static [&'static str]> {
        match self.kind {
            FieldKind::ResRef(types) => Some(types),
            _ => None,
        }
    }

    /// Human-readable rendering of the value, resolving labels through the
    /// external environment. Missing labels and tables degrade to the raw
    /// value, never to an error.
    pub fn display_value(&self, env: &dyn ExternalEnv) -> String {
        match (&self.kind, &self.value) {
            (FieldKind::Int(_), FieldValue::Int(v)) => v.to_string(),
            (FieldKind::Int(_), FieldValue::Uint(v)) => v.to_string(),
            (FieldKind::Bitmap(labels), FieldValue::Uint(v)) => labels
                .get(*v as usize)
                .map(|s| (*s).to_string())
                .unwrap_or_else(|| format!("Unknown ({v})")),
            (FieldKind::HashBitmap(table), FieldValue::Uint(v)) => table
                .get(*v)
                .map(|s| s.to_string())
                .unwrap_or_else(|| v.to_string()),
            (FieldKind::IdsBitmap(table), FieldValue::Uint(v)) => env
                .resolve_ids(table, *v as i64)
                .unwrap_or_else(|| v.to_string()),
            (FieldKind::Flags(labels), FieldValue::Uint(v)) => {
                let set: Vec<&str> = labels
                    .iter()
                    .enumerate()
                    .filter(|&(bit, _)| v & (1 << bit) != 0)
                    .map(|(_, label)| *label)
                    .collect();
                if set.is_empty() {
                    "(none)".to_string()
                } else {
                    set.join("; ")
                }
            }
            (FieldKind::StrRef, FieldValue::Uint(v)) => env
                .resolve_strref(*v as u32)
                .unwrap_or_else(|| format!("StrRef({v})")),
            (FieldKind::ResRef(types), FieldValue::Text(s)) => {
                if s.is_empty() {
                    "None".to_string()
                } else if types.is_empty() {
                    s.clone()
                } else {
                    format!("{s} ({})", types.join(":"))
                }
            }
            (FieldKind::Color(_), FieldValue::Color { r, g, b }) => {
                format!("#{r:02X}{g:02X}{b:02X}")
            }
            (FieldKind::Multi(parts), FieldValue::Parts(values)) => parts
                .iter()
                .zip(values)
                .map(|(part, v)| {
                    let label = match part.labels {
                        PartLabels::None => v.to_string(),
                        PartLabels::Ordered(labels) => labels
                            .get(*v as usize)
                            .map(|s| (*s).to_string())
                            .unwrap_or_else(|| format!("Unknown ({v})")),
                        PartLabels::Table(table) => table
                            .get(*v)
                            .map(|s| s.to_string())
                            .unwrap_or_else(|| v.to_string()),
                    };
                    format!("{}={label}", part.name)
                })
                .collect::<Vec<_>>()
                .join(", "),
            (FieldKind::Text, FieldValue::Text(s)) => s.clone(),
            (FieldKind::Unused, FieldValue::Bytes(_)) => "(unused)".to_string(),
            // Kind/value mismatches can only be constructed by hand; show
            // the raw debug form rather than panicking in a display path.
            (_, value) => format!("{value:?}"),
        }
    }
}

impl Serialize for FieldDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FieldDescriptor", 5)?;
        s.serialize_field("name", self.name)?;
        s.serialize_field("offset", &self.offset)?;
        s.serialize_field("width", &self.width)?;
        s.serialize_field("kind", &self.kind)?;
        s.serialize_field("value", &self.value)?;
        s.end()
    }
}

fn sign_extend(raw: u64, width: usize) -> i64 {
    let bits = width * 8;
    if bits >= 64 {
        return raw as i64;
    }
    let sign_bit = 1u64 << (bits - 1);
    if raw & sign_bit != 0 {
        (raw | !((1u64 << bits) - 1)) as i64
    } else {
        raw as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::NullEnv;
    use crate::tables;

    fn roundtrip(kind: FieldKind, bytes: &[u8]) {
        let value = kind.decode(bytes, 0, bytes.len()).unwrap();
        let encoded = {
            let mut w = Writer::from_bytes(bytes.to_vec());
            kind.patch(&mut w, 0, bytes.len(), &value).unwrap();
            w.into_bytes()
        };
        assert_eq!(encoded, bytes, "{} round-trip", kind.tag());
    }

    #[test]
    fn integer_sign_extension() {
        let kind = FieldKind::Int(Sign::Signed);
        assert_eq!(
            kind.decode(&[0xFF, 0xFF, 0xFF, 0xFF], 0, 4).unwrap(),
            FieldValue::Int(-1)
        );
        assert_eq!(kind.decode(&[0xFE], 0, 1).unwrap(), FieldValue::Int(-2));
        roundtrip(kind, &[0xFE, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn bitmap_keeps_out_of_range_values() {
        let kind = FieldKind::Bitmap(tables::INC_MOD);
        let value = kind.decode(&[9, 0, 0, 0], 0, 4).unwrap();
        assert_eq!(value, FieldValue::Uint(9));
        let desc = FieldDescriptor {
            name: "Modifier type",
            offset: 0,
            width: 4,
            kind,
            value,
        };
        assert_eq!(desc.display_value(&NullEnv), "Unknown (9)");
    }

    #[test]
    fn flags_ignore_unlabelled_bits() {
        let desc = FieldDescriptor::decode(
            "Save type",
            &[0b101, 0, 0, 0x80],
            0,
            4,
            FieldKind::Flags(tables::SAVE_FLAGS_CLASSIC),
        )
        .unwrap();
        assert_eq!(
            desc.display_value(&NullEnv),
            "Spells; Paralyze/Poison/Death"
        );
        roundtrip(FieldKind::Flags(tables::SAVE_FLAGS_CLASSIC), &[0b101, 0, 0, 0x80]);
    }

    #[test]
    fn color_padding_byte_passes_through() {
        let kind = FieldKind::Color(ColorOrder::Rgbx);
        let bytes = [0x11, 0x22, 0x33, 0xAB]; // 0xAB is padding
        let value = kind.decode(&bytes, 0, 4).unwrap();
        assert_eq!(
            value,
            FieldValue::Color {
                r: 0x11,
                g: 0x22,
                b: 0x33
            }
        );
        roundtrip(kind, &bytes);
    }

    #[test]
    fn multi_number_splits_and_reassembles() {
        static PARTS: [NumberPart; 2] = [
            NumberPart {
                name: "Method",
                bits: 16,
                labels: PartLabels::Ordered(tables::DAMAGE_MODES_CLASSIC),
            },
            NumberPart {
                name: "Damage type",
                bits: 16,
                labels: PartLabels::Table(&tables::DAMAGE_TYPES),
            },
        ];
        let kind = FieldKind::Multi(&PARTS);
        // mode = 1 (Set to value), type = 8 (Fire)
        let bytes = [0x01, 0x00, 0x08, 0x00];
        let value = kind.decode(&bytes, 0, 4).unwrap();
        assert_eq!(value, FieldValue::Parts(vec![1, 8]));
        let desc = FieldDescriptor {
            name: "Damage",
            offset: 0,
            width: 4,
            kind,
            value,
        };
        assert_eq!(
            desc.display_value(&NullEnv),
            "Method=Set to value, Damage type=Fire"
        );
        roundtrip(kind, &bytes);
    }

    #[test]
    fn resref_and_text_roundtrip() {
        roundtrip(FieldKind::ResRef(&["SPL"]), b"SPWI112\0");
        roundtrip(FieldKind::Text, b"OGRE01\0\0");
    }

    #[test]
    fn unused_bytes_survive_verbatim() {
        roundtrip(FieldKind::Unused, &[0xDE, 0xAD, 0xBE, 0xEF, 1, 2, 3, 4]);
    }
}
