//! Newtype identifiers.
//!
//! The valuation engine itself is identity-free: inputs and outputs are value
//! objects. Identifiers only appear on the records the surrounding service
//! keeps around them (history snapshots, portfolio rows), and are wrapped so a
//! [`ProductId`] can never be mixed up with some other integer key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (store-assigned integers).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Store-assigned integers
// ---------------------------------------------------------------------------

u64_id! {
    /// Identifies a catalogued product or service.
    ProductId
}

// ---------------------------------------------------------------------------
// UUID-backed, generated here
// ---------------------------------------------------------------------------

/// Identifies one valuation history snapshot.
///
/// Generated fresh every time a snapshot is captured, so two captures of an
/// identical valuation are still distinct history entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(Uuid);

impl SnapshotId {
    /// Generates a new random snapshot identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a [`SnapshotId`] from an existing UUID (e.g. read back from storage).
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_serialises_as_bare_integer() {
        let json = serde_json::to_string(&ProductId::new(42)).unwrap();
        assert_eq!(json, "42");
        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_u64(), 42);
    }

    #[test]
    fn random_snapshot_ids_differ() {
        assert_ne!(SnapshotId::new_random(), SnapshotId::new_random());
    }

    #[test]
    fn stored_snapshot_id_reads_back_as_the_same_uuid() {
        let uuid = Uuid::parse_str("6f1c2d4e-8a3b-4c5d-9e7f-0a1b2c3d4e5f").unwrap();
        let id = SnapshotId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"6f1c2d4e-8a3b-4c5d-9e7f-0a1b2c3d4e5f\"");
        let back: SnapshotId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_uuid(), uuid);
    }
}
