//! Identity-keyed records
//!
//! Every entity type the clinic stores is a `Record`: a value with an
//! integer identity assigned by its store, built from a creation payload
//! and modified through a partial patch.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Process-assigned primary key, unique per entity type
pub type Identity = i64;

/// A storable entity with an identity and patch semantics
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Payload accepted by `create`, already validated
    type New: Send + Sync + 'static;
    /// Partial update accepted by `update`
    type Patch: Send + Sync + 'static;

    /// Collection name, used for snapshot file names and log lines
    const COLLECTION: &'static str;

    /// Build the record under a freshly issued identity
    fn from_new(id: Identity, new: Self::New) -> Self;

    fn id(&self) -> Identity;

    /// Produce the patched record. The identity never changes.
    fn patched(&self, patch: Self::Patch) -> Self;
}

/// Values that count as "not provided" when they appear in a payload.
///
/// Empty strings and zero are treated the same as a missing field, both
/// for required-field checks and for patches.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for i64 {
    fn is_blank(&self) -> bool {
        *self == 0
    }
}

/// Return the value if it is present and not blank
pub fn provided<T: Blank>(value: Option<T>) -> Option<T> {
    value.filter(|v| !v.is_blank())
}

/// Patch one field: a provided value wins, anything else keeps `prior`
pub fn merge<T: Blank + Clone>(patch: Option<T>, prior: &T) -> T {
    provided(patch).unwrap_or_else(|| prior.clone())
}

/// Coerce a textual identity the way the HTTP layer receives it.
///
/// Leading whitespace is skipped, an optional sign is accepted and the
/// leading run of digits is used; trailing garbage is ignored. Input with
/// no leading digits yields `None`.
pub fn coerce_id(raw: &str) -> Option<Identity> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value: Identity = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}
