//! Agent records and the registry that owns them.

pub mod registry;

pub use registry::AgentRegistry;

use serde::{Deserialize, Serialize};

/// A named pairing of a URL slug and an external voice-assistant identifier.
///
/// `name` is lowercase (`^[a-z0-9-]+$`), unique and immutable once created;
/// it doubles as the public URL path segment and the storage key suffix.
/// `assistant_id` is opaque to this system. The wire shape keeps the
/// camelCase field names the admin UI and widget expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub name: String,
    pub assistant_id: String,
    /// ISO-8601 creation timestamp. Regenerated on every upsert: the write
    /// path is a pure replace with no read-before-write.
    pub created_at: String,
}
