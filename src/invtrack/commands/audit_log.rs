use crate::audit::AuditTrail;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

/// Opens (or refreshes) the audit log view.
///
/// The access itself is logged first and the file is read only after that
/// append has returned, so the view always includes its own entry when the
/// write succeeded.
pub fn run(trail: &AuditTrail, user: &str, refresh: bool) -> Result<CmdResult> {
    let outcome = if refresh {
        trail.refresh_audit_log(user)
    } else {
        trail.view_audit_log(user)
    };

    let entries = trail.read_all()?;
    let mut result = CmdResult::default();
    if !outcome.is_written() {
        result.add_message(CmdMessage::warning(format!(
            "Could not write to {}; this access was not recorded",
            trail.path().display()
        )));
    }
    if entries.is_empty() {
        result.add_message(CmdMessage::info("Audit log is empty"));
    }
    Ok(result.with_audit_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::TestEnv;
    use crate::model::AuditAction;

    #[test]
    fn view_includes_its_own_entry() {
        let env = TestEnv::new();
        env.trail.login_success("ana");

        let result = run(&env.trail, "ana", false).unwrap();
        assert_eq!(result.audit_entries.len(), 2);
        assert_eq!(
            result.audit_entries[1].action,
            AuditAction::ViewAuditLog
        );
        assert!(result.messages.is_empty());
    }

    #[test]
    fn refresh_is_logged_as_refresh() {
        let env = TestEnv::new();
        let result = run(&env.trail, "ana", true).unwrap();
        assert_eq!(
            result.audit_entries.last().unwrap().action,
            AuditAction::RefreshAuditLog
        );
    }
}
