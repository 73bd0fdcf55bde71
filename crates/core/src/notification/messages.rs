//! Notification message templates.
//!
//! The application's audience reads Thai; templates are fixed strings with
//! the PR number and the acting user's name interpolated.

/// Fallback when no requester name is available.
const UNSPECIFIED: &str = "ไม่ระบุ";

fn decision_verb(is_approval: bool) -> &'static str {
    if is_approval { "อนุมัติ" } else { "ไม่อนุมัติ" }
}

fn decision_title(is_approval: bool) -> String {
    if is_approval {
        "ใบขอซื้อได้รับการอนุมัติ".to_string()
    } else {
        "ใบขอซื้อไม่ได้รับการอนุมัติ".to_string()
    }
}

/// Title and message for a newly submitted purchase request.
#[must_use]
pub fn new_pr(pr_number: &str, requester_name: Option<&str>) -> (String, String) {
    let name = requester_name.unwrap_or(UNSPECIFIED);
    (
        "ใบขอซื้อใหม่".to_string(),
        format!("ใบขอซื้อเลขที่ {pr_number} โดย {name} รอการตรวจสอบ"),
    )
}

/// Title and message for a department-head decision.
#[must_use]
pub fn head_decision(pr_number: &str, approver_name: &str, is_approval: bool) -> (String, String) {
    (
        decision_title(is_approval),
        format!(
            "หัวหน้าแผนก {approver_name} {}ใบขอซื้อเลขที่ {pr_number}",
            decision_verb(is_approval)
        ),
    )
}

/// Title and message for a manager decision.
#[must_use]
pub fn manager_decision(
    pr_number: &str,
    approver_name: &str,
    is_approval: bool,
) -> (String, String) {
    (
        decision_title(is_approval),
        format!(
            "ผู้จัดการ {approver_name} {}ใบขอซื้อเลขที่ {pr_number}",
            decision_verb(is_approval)
        ),
    )
}
