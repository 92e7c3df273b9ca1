//! Manifest vocabulary: the typed record, plugin types and permissions

use crate::errors::ValidationError;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Manifest file name, looked up in the plugin directory
pub const MANIFEST_FILE_NAME: &str = "plugin.json";

/// Platform every plugin must support and provide an entry point for
pub const DESIGNATED_PLATFORM: &str = "ios";

/// How [`DESIGNATED_PLATFORM`] is named in messages
pub const DESIGNATED_PLATFORM_LABEL: &str = "iOS";

/// Fields every manifest must carry, in the order they are checked
pub const REQUIRED_FIELDS: [&str; 11] = [
    "id",
    "name",
    "version",
    "description",
    "author",
    "license",
    "omnitak_version",
    "type",
    "platforms",
    "permissions",
    "entry_points",
];

/// A manifest that passed checks 1-7.
///
/// Only the fields a check reads are typed. The descriptive fields are
/// checked for presence and kept as they appear in `plugin.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginManifest {
    pub id: String,
    pub version: String,
    pub plugin_type: PluginType,
    pub platforms: Vec<String>,
    pub permissions: Vec<Permission>,
    /// Platform name to entry point, values unchecked
    pub entry_points: Map<String, Value>,
    pub name: Value,
    pub description: Value,
    pub author: Value,
    pub license: Value,
    pub omnitak_version: Value,
}

impl PluginManifest {
    /// Permissions as written in the manifest, comma separated
    pub fn permission_list(&self) -> String {
        self.permissions
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginType {
    Ui,
    Data,
    Protocol,
    Map,
    Hybrid,
}

impl PluginType {
    pub const ALL: [PluginType; 5] = [
        PluginType::Ui,
        PluginType::Data,
        PluginType::Protocol,
        PluginType::Map,
        PluginType::Hybrid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PluginType::Ui => "ui",
            PluginType::Data => "data",
            PluginType::Protocol => "protocol",
            PluginType::Map => "map",
            PluginType::Hybrid => "hybrid",
        }
    }
}

impl FromStr for PluginType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidPluginType(s.to_string()))
    }
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities a plugin may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    NetworkAccess,
    LocationRead,
    LocationWrite,
    CotRead,
    CotWrite,
    MapRead,
    MapWrite,
    StorageRead,
    StorageWrite,
    UiCreate,
    NotificationsSend,
    BluetoothAccess,
    FilesystemRead,
    FilesystemWrite,
}

impl Permission {
    /// The permission allow-list
    pub const ALL: [Permission; 14] = [
        Permission::NetworkAccess,
        Permission::LocationRead,
        Permission::LocationWrite,
        Permission::CotRead,
        Permission::CotWrite,
        Permission::MapRead,
        Permission::MapWrite,
        Permission::StorageRead,
        Permission::StorageWrite,
        Permission::UiCreate,
        Permission::NotificationsSend,
        Permission::BluetoothAccess,
        Permission::FilesystemRead,
        Permission::FilesystemWrite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::NetworkAccess => "network.access",
            Permission::LocationRead => "location.read",
            Permission::LocationWrite => "location.write",
            Permission::CotRead => "cot.read",
            Permission::CotWrite => "cot.write",
            Permission::MapRead => "map.read",
            Permission::MapWrite => "map.write",
            Permission::StorageRead => "storage.read",
            Permission::StorageWrite => "storage.write",
            Permission::UiCreate => "ui.create",
            Permission::NotificationsSend => "notifications.send",
            Permission::BluetoothAccess => "bluetooth.access",
            Permission::FilesystemRead => "filesystem.read",
            Permission::FilesystemWrite => "filesystem.write",
        }
    }
}

impl FromStr for Permission {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidPermission(s.to_string()))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
