// Router API response types
//
// Fields use `#[serde(default)]` liberally: the firmware omits fields it
// has no value for, or sends them as `null`. Only `passwordSalt` and
// `name`/`ipAddress` matter to the handshake and IP lookup.

use serde::{Deserialize, Deserializer, Serialize};

/// Read a field that may be `null`, falling back to its default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Snapshot returned by the unauthenticated `GET /api` endpoint.
///
/// The router answers this even with a 401, and the body still carries
/// the salt needed for login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiMetadata {
    pub do_setup_wizard: bool,
    pub require_password: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub password_salt: String,
    pub is_wireless: bool,
    pub error: i32,
    pub max_users: i32,
    pub deny_state: i32,
    pub mesh_network_enabled_status: bool,
    pub mesh_user_enabled_config: bool,
}

/// One entry of `GET /api/network`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Network {
    #[serde(deserialize_with = "null_as_default")]
    pub connection_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub connection_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Empty when the interface is present but unaddressed (link down).
    #[serde(deserialize_with = "null_as_default")]
    pub ip_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ipv6_address: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub network_type: i32,
}
