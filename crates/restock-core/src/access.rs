//! 應用區域的角色與權限檢查

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::{RestockError, Result};

/// 應用區域
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppArea {
    Portal,
    Inventory,
    Crm,
    Users,
}

impl AppArea {
    pub const ALL: [AppArea; 4] = [
        AppArea::Portal,
        AppArea::Inventory,
        AppArea::Crm,
        AppArea::Users,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppArea::Portal => "portal",
            AppArea::Inventory => "inventory",
            AppArea::Crm => "crm",
            AppArea::Users => "users",
        }
    }

    /// 解析區域名稱（不分大小寫）
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|area| area.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for AppArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 角色等級（依權限遞增排序）
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 無權限
    #[default]
    #[serde(rename = "none")]
    NoAccess,
    /// 一般使用者
    Standard,
    /// 管理員
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::NoAccess => "none",
            Role::Standard => "standard",
            Role::Admin => "admin",
        }
    }

    /// 解析角色字串（不分大小寫），未知值視為無權限
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Role::Standard,
            "admin" => Role::Admin,
            _ => Role::NoAccess,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 使用者在各區域的角色
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMap {
    roles: BTreeMap<AppArea, Role>,
}

impl RoleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由字串鍵值對建立，忽略未知區域
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = Self::new();
        for (area, role) in pairs {
            if let Some(area) = AppArea::parse(area.as_ref()) {
                map.set(area, Role::parse(role.as_ref()));
            }
        }
        map
    }

    /// 建構器模式：設置區域角色
    pub fn with_role(mut self, area: AppArea, role: Role) -> Self {
        self.set(area, role);
        self
    }

    pub fn set(&mut self, area: AppArea, role: Role) {
        self.roles.insert(area, role);
    }

    /// 區域角色，未設置時為無權限
    pub fn role(&self, area: AppArea) -> Role {
        self.roles.get(&area).copied().unwrap_or_default()
    }

    /// 檢查是否至少具備指定角色
    pub fn has_access(&self, area: AppArea, required: Role) -> bool {
        self.role(area) >= required
    }

    /// 權限不足時返回 `AccessDenied`
    pub fn require(&self, area: AppArea, required: Role) -> Result<()> {
        if self.has_access(area, required) {
            Ok(())
        } else {
            Err(RestockError::AccessDenied { area, required })
        }
    }
}
