use serde::{Deserialize, Deserializer};

/// Deserializes a field that tells an explicit `null` apart from a missing
/// one. Use with `#[serde(default)]`: missing gives `None`, `null` gives
/// `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
