//! Capabilities supplied by the surrounding application.
//!
//! The decode core never does I/O of its own: symbolic IDS tables, the
//! localized string table, and the resource catalog all live outside this
//! crate. Decoding works fully without them ([`NullEnv`]); they only improve
//! display strings and steer a handful of schema branches.

/// External lookups the core consumes. All methods are optional in spirit:
/// a missing table or string degrades display to the raw value, never to an
/// error.
pub trait ExternalEnv {
    /// Resolve `key` in the named IDS symbol table (e.g. `"EA.IDS"`).
    fn resolve_ids(&self, table: &str, key: i64) -> Option<String>;

    /// Whether the named IDS table ships with the active game install.
    /// Schema selection for some opcodes depends on this.
    fn has_ids_table(&self, table: &str) -> bool;

    /// Resolve an index into the localized string table.
    fn resolve_strref(&self, index: u32) -> Option<String>;

    /// Whether a resource with the given name exists in the game's
    /// resource tree.
    fn resource_exists(&self, name: &str) -> bool;
}

/// Environment with no tables, no strings and no resources.
///
/// Every lookup misses; decode and encode behave identically to a fully
/// populated environment, only display strings fall back to raw values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEnv;

impl ExternalEnv for NullEnv {
    fn resolve_ids(&self, _table: &str, _key: i64) -> Option<String> {
        None
    }

    fn has_ids_table(&self, _table: &str) -> bool {
        false
    }

    fn resolve_strref(&self, _index: u32) -> Option<String> {
        None
    }

    fn resource_exists(&self, _name: &str) -> bool {
        false
    }
}
