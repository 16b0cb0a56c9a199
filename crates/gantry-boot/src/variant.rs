//! Module variant selection.
//!
//! The VM module ships as several binaries, each built for a memory budget,
//! plus a dynamically-growing build. A configuration hint selects one; the
//! mapping is a flat table and resolution is total, so anything unrecognized
//! lands on the default build.

/// Binary loaded when no recognized hint is present, and the fallback when a
/// selected variant is unavailable.
pub const DEFAULT_BINARY: &str = "vmcore.wasm";

/// Memory tier of a module build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantTag {
    Tier150,
    Tier300,
    Tier600,
    Tier900,
    /// Dynamically-growing memory build.
    Dynamic,
}

/// Hint value → (tag, binary) table. Order is cosmetic; lookup is by tag.
const VARIANTS: [(&str, VariantTag, &str); 5] = [
    ("150", VariantTag::Tier150, "vmcore-150.wasm"),
    ("300", VariantTag::Tier300, "vmcore-300.wasm"),
    ("600", VariantTag::Tier600, "vmcore-600.wasm"),
    ("900", VariantTag::Tier900, "vmcore-900.wasm"),
    ("dyna", VariantTag::Dynamic, "vmcore-dyna.wasm"),
];

/// The binary build selected for this bootstrap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleVariant {
    /// `None` for the default build.
    pub tag: Option<VariantTag>,
    pub binary_name: &'static str,
}

impl ModuleVariant {
    pub const DEFAULT: ModuleVariant = ModuleVariant {
        tag: None,
        binary_name: DEFAULT_BINARY,
    };

    pub fn is_default(&self) -> bool {
        self.tag.is_none()
    }
}

/// Map a configuration hint to the variant to load.
///
/// Total over its domain: absent and unrecognized hints resolve to the
/// default variant, never an error.
pub fn resolve(hint: Option<&str>) -> ModuleVariant {
    let Some(hint) = hint else {
        return ModuleVariant::DEFAULT;
    };
    VARIANTS
        .iter()
        .find(|(value, _, _)| *value == hint)
        .map(|&(_, tag, binary_name)| ModuleVariant {
            tag: Some(tag),
            binary_name,
        })
        .unwrap_or(ModuleVariant::DEFAULT)
}
