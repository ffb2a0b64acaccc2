//! Session events. Credential checks happen outside this crate; these only
//! record their outcome.

use crate::audit::AuditTrail;
use crate::commands::{CmdMessage, CmdResult};
use crate::model::{AuditAction, AuditStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failed(String),
}

pub fn login(trail: &AuditTrail, user: &str, outcome: &LoginOutcome) -> CmdResult {
    let mut result = CmdResult::default();
    match outcome {
        LoginOutcome::Success => {
            trail.login_success(user);
            result.add_message(CmdMessage::success(format!("Logged in as {}", user)));
        }
        LoginOutcome::Failed(reason) => {
            trail.login_failed(user, reason);
            result.add_message(CmdMessage::error(format!("Login failed: {}", reason)));
        }
    }
    result
}

pub fn logout(trail: &AuditTrail, user: &str) -> CmdResult {
    trail.logout(user);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("{} logged out", user)));
    result
}

/// Records that the user backed out of `action` before confirming it.
pub fn cancel(trail: &AuditTrail, user: &str, action: AuditAction, details: &str) -> CmdResult {
    let cancelled = action.cancelled();
    trail.record(user, cancelled.clone(), AuditStatus::Info, details);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("Cancelled ({})", cancelled)));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::TestEnv;

    #[test]
    fn records_login_outcomes() {
        let env = TestEnv::new();
        login(&env.trail, "ana", &LoginOutcome::Success);
        login(&env.trail, "bob", &LoginOutcome::Failed("bad password".into()));
        logout(&env.trail, "ana");

        let audit = env.audit();
        assert_eq!(audit[0].action, AuditAction::LoginSuccess);
        assert_eq!(audit[1].action, AuditAction::LoginFailed);
        assert_eq!(audit[1].details, "Login failed: bad password");
        assert_eq!(audit[1].status, AuditStatus::Failed);
        assert_eq!(audit[2].action, AuditAction::Logout);
    }

    #[test]
    fn cancel_writes_cancelled_variant() {
        let env = TestEnv::new();
        let result = cancel(&env.trail, "ana", AuditAction::DeleteItem, "Deletion cancelled");
        assert_eq!(result.messages[0].content, "Cancelled (DELETE_ITEM_CANCELLED)");

        let audit = env.audit();
        assert_eq!(audit[0].action, AuditAction::DeleteItem.cancelled());
        assert_eq!(audit[0].status, AuditStatus::Info);
    }
}
