//! Reader/writer for the binary "effect" records shared by Infinity-style
//! game resources (items, spells, creatures, standalone effect files).
//!
//! Three-layer architecture:
//! - **Layer 1** (`cursor`/`layout`): raw byte access and the fixed field
//!   envelope for each structure version
//! - **Layer 2** (`field`/`tables`/`schema`): typed field primitives and the
//!   per-profile opcode schema registry
//! - **Layer 3** (`record`/`retype`): whole-record decode/encode and the
//!   post-decode re-typing pass for positionally discriminated opcodes
//!
//! The two parameter fields and the trailing special field of a record are
//! overloaded: their interpretation depends on the opcode, the structure
//! version (V1 embedded blocks vs V2 standalone files), and the game profile
//! that produced the file. [`SchemaRegistry`] resolves that triple to a
//! decode plan; [`record::EffectRecord::decode`] applies it.

pub mod cursor;
pub mod env;
pub mod error;
pub mod field;
pub mod layout;
pub mod profile;
pub mod record;
pub mod retype;
pub mod schema;
pub mod tables;

pub use env::{ExternalEnv, NullEnv};
pub use error::{Error, Result};
pub use field::{FieldDescriptor, FieldKind, FieldValue};
pub use layout::StructVersion;
pub use profile::{Family, GameProfile};
pub use record::EffectRecord;
pub use schema::SchemaRegistry;
