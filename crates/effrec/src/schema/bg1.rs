//! BG1-style family table.
//!
//! The original engine is the baseline the generic table describes, so this
//! family adds nothing of its own; it exists so the registry's layered
//! lookup is uniform across families. Opcodes past the shared range fall
//! out of the profile's defined range and resolve via the fallback.

use crate::env::ExternalEnv;
use crate::profile::GameProfile;

use super::SchemaEntry;

pub(super) fn name(_opcode: u32) -> Option<&'static str> {
    None
}

pub(super) fn entry(
    _opcode: u32,
    _profile: GameProfile,
    _env: &dyn ExternalEnv,
) -> Option<SchemaEntry> {
    None
}
