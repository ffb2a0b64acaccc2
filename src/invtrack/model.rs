use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// Placeholder the entry form shows in choice fields until the user picks a value.
pub const SENTINEL: &str = "Other...";

/// One row of the inventory table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub unit: String,
    pub location: String,
    pub condition: String,
    pub date_acquired: String,
}

impl InventoryRecord {
    /// Field values in column order, as they appear in the table.
    pub fn fields(&self) -> [String; 8] {
        [
            self.id.clone(),
            self.name.clone(),
            self.category.clone(),
            self.quantity.to_string(),
            self.unit.clone(),
            self.location.clone(),
            self.condition.clone(),
            self.date_acquired.clone(),
        ]
    }
}

/// What a user did. Serialized as the SCREAMING_SNAKE name in the audit file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuditAction {
    LoginAttempt,
    LoginSuccess,
    LoginFailed,
    Logout,
    PasswordChange,
    AccountLocked,
    AddItem,
    UpdateItem,
    DeleteItem,
    LoadInventory,
    SearchInventory,
    ViewAuditLog,
    RefreshAuditLog,
    /// `<ACTION>_FAILED`: rejected before any mutation (validation, duplicate id).
    Failed(Box<AuditAction>),
    /// `<ACTION>_ERROR`: the action ran but could not be persisted.
    Error(Box<AuditAction>),
    /// `<ACTION>_CANCELLED`: the user backed out.
    Cancelled(Box<AuditAction>),
    /// Text read back from disk that is not one of the known actions.
    Other(String),
}

impl AuditAction {
    pub fn failed(self) -> Self {
        AuditAction::Failed(Box::new(self))
    }

    pub fn error(self) -> Self {
        AuditAction::Error(Box::new(self))
    }

    pub fn cancelled(self) -> Self {
        AuditAction::Cancelled(Box::new(self))
    }

    fn base_name(&self) -> Option<&'static str> {
        let name = match self {
            AuditAction::LoginAttempt => "LOGIN_ATTEMPT",
            AuditAction::LoginSuccess => "LOGIN_SUCCESS",
            AuditAction::LoginFailed => "LOGIN_FAILED",
            AuditAction::Logout => "LOGOUT",
            AuditAction::PasswordChange => "PASSWORD_CHANGE",
            AuditAction::AccountLocked => "ACCOUNT_LOCKED",
            AuditAction::AddItem => "ADD_ITEM",
            AuditAction::UpdateItem => "UPDATE_ITEM",
            AuditAction::DeleteItem => "DELETE_ITEM",
            AuditAction::LoadInventory => "LOAD_INVENTORY",
            AuditAction::SearchInventory => "SEARCH_INVENTORY",
            AuditAction::ViewAuditLog => "VIEW_AUDIT_LOG",
            AuditAction::RefreshAuditLog => "REFRESH_AUDIT_LOG",
            _ => return None,
        };
        Some(name)
    }

    fn from_base_name(s: &str) -> Option<Self> {
        let action = match s {
            "LOGIN_ATTEMPT" => AuditAction::LoginAttempt,
            "LOGIN_SUCCESS" => AuditAction::LoginSuccess,
            "LOGIN_FAILED" => AuditAction::LoginFailed,
            "LOGOUT" => AuditAction::Logout,
            "PASSWORD_CHANGE" => AuditAction::PasswordChange,
            "ACCOUNT_LOCKED" => AuditAction::AccountLocked,
            "ADD_ITEM" => AuditAction::AddItem,
            "UPDATE_ITEM" => AuditAction::UpdateItem,
            "DELETE_ITEM" => AuditAction::DeleteItem,
            "LOAD_INVENTORY" => AuditAction::LoadInventory,
            "SEARCH_INVENTORY" => AuditAction::SearchInventory,
            "VIEW_AUDIT_LOG" => AuditAction::ViewAuditLog,
            "REFRESH_AUDIT_LOG" => AuditAction::RefreshAuditLog,
            _ => return None,
        };
        Some(action)
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditAction::Failed(inner) => write!(f, "{}_FAILED", inner),
            AuditAction::Error(inner) => write!(f, "{}_ERROR", inner),
            AuditAction::Cancelled(inner) => write!(f, "{}_CANCELLED", inner),
            AuditAction::Other(raw) => write!(f, "{}", raw),
            known => write!(f, "{}", known.base_name().unwrap_or_default()),
        }
    }
}

impl FromStr for AuditAction {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // LOGIN_FAILED is a base action in its own right, so exact names win.
        if let Some(action) = Self::from_base_name(s) {
            return Ok(action);
        }
        let wrapped: [(&str, fn(AuditAction) -> AuditAction); 3] = [
            ("_FAILED", AuditAction::failed),
            ("_ERROR", AuditAction::error),
            ("_CANCELLED", AuditAction::cancelled),
        ];
        for (suffix, wrap) in wrapped {
            if let Some(base) = s.strip_suffix(suffix).and_then(Self::from_base_name) {
                return Ok(wrap(base));
            }
        }
        Ok(AuditAction::Other(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuditStatus {
    Success,
    Failed,
    Warning,
    Info,
    Unknown(String),
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditStatus::Success => write!(f, "SUCCESS"),
            AuditStatus::Failed => write!(f, "FAILED"),
            AuditStatus::Warning => write!(f, "WARNING"),
            AuditStatus::Info => write!(f, "INFO"),
            AuditStatus::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

impl FromStr for AuditStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "SUCCESS" => AuditStatus::Success,
            "FAILED" => AuditStatus::Failed,
            "WARNING" => AuditStatus::Warning,
            "INFO" => AuditStatus::Info,
            other => AuditStatus::Unknown(other.to_string()),
        })
    }
}

/// One line of the audit trail.
///
/// `timestamp` is `None` only for entries read back from a line whose first
/// column could not be parsed; `raw_timestamp` keeps the text for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub timestamp: Option<NaiveDateTime>,
    pub raw_timestamp: String,
    pub username: String,
    pub action: AuditAction,
    pub ip_address: String,
    pub status: AuditStatus,
    pub details: String,
}
