use serde::{
    Deserialize,
    Serialize,
};

/// The parts of `GET /_node/` the node-info collector reports on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfo {
    pub host: String,
    pub version: String,
    pub http_address: String,
    pub id: String,
    pub name: String,
    pub os: OsInfo,
    pub jvm: JvmInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsInfo {
    pub name: String,
    pub arch: String,
    pub version: String,
    pub available_processors: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JvmInfo {
    pub pid: u32,
    pub version: String,
    pub vm_name: String,
    pub vm_version: String,
    pub vm_vendor: String,
}
