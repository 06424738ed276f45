//! Employee Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 已知职级 (用于列表筛选，不做强制校验)
pub const KNOWN_LEVELS: [&str; 3] = ["Intern", "Junior", "Senior"];

/// Columns owned by the store; never accepted from uploaded rows.
pub const RESERVED_FIELDS: [&str; 4] = ["id", "_id", "created_at", "updated_at"];

/// Employee record entity
///
/// Columns beyond name/position/level that arrived with an uploaded
/// spreadsheet are kept in `extra` and flattened back onto the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub position: String,
    pub level: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Create employee payload (one decoded row after schema checks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub position: String,
    pub level: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl EmployeeUpdate {
    /// 是否没有任何字段需要更新
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.position.is_none() && self.level.is_none()
    }
}
