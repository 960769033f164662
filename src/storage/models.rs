use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一次成功解析的访问记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// 毫秒级 Unix 时间戳
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: String,
    pub destination: String,
    /// 只追加，插入顺序即时间顺序
    #[serde(default)]
    pub visits: Vec<Visit>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkRecord {
    pub fn new(id: impl Into<String>, destination: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
            visits: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn total_clicks(&self) -> usize {
        self.visits.len()
    }
}

/// 一次解析的结果：目标地址与刚追加的访问记录
///
/// 不携带完整访问历史，重定向路径的开销与历史长度无关。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub id: String,
    pub destination: String,
    pub visit: Visit,
}
