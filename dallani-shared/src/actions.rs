//! # Mutating Actions
//!
//! Every state-changing call goes through the [`ActionDesk`]: the view
//! *requests* an action, the operator *confirms* or *cancels* it, and only a
//! confirmed action reaches the network. While an action is in flight the
//! same action cannot be requested again.

use crate::errors::ApiError;
use crate::messages;
use crate::models::Resolution;
use serde_json::{Value, json};
use std::collections::HashSet;

/// A state-changing admin operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    ApproveDriver { driver_id: String },
    BlockDriver { driver_id: String },
    UnblockDriver { driver_id: String },
    BlockCustomer { customer_id: String },
    UnblockCustomer { customer_id: String },
    ResolveDispute {
        dispute_id: String,
        resolution: Resolution,
        notes: String,
    },
    PaySettlement { driver_id: String, driver_name: String },
}

impl AdminAction {
    /// Endpoint path relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Self::ApproveDriver { driver_id } => format!("admin/drivers/{driver_id}/approve"),
            Self::BlockDriver { driver_id } => format!("admin/drivers/{driver_id}/block"),
            Self::UnblockDriver { driver_id } => format!("admin/drivers/{driver_id}/unblock"),
            Self::BlockCustomer { customer_id } => format!("admin/users/{customer_id}/block"),
            Self::UnblockCustomer { customer_id } => format!("admin/users/{customer_id}/unblock"),
            Self::ResolveDispute { dispute_id, .. } => format!("admin/disputes/{dispute_id}/resolve"),
            Self::PaySettlement { driver_id, .. } => format!("admin/settlements/{driver_id}/pay"),
        }
    }

    /// JSON body of the POST.
    pub fn body(&self) -> Value {
        match self {
            Self::BlockDriver { .. } | Self::BlockCustomer { .. } => {
                json!({ "reason": messages::MANUAL_BLOCK_REASON })
            }
            Self::ResolveDispute {
                resolution, notes, ..
            } => json!({ "resolution": resolution, "notes": notes }),
            _ => json!({}),
        }
    }

    /// Question shown before the action is sent.
    pub fn confirmation_prompt(&self) -> String {
        match self {
            Self::ApproveDriver { .. } => "هل تريد الموافقة على هذا السائق؟".to_string(),
            Self::BlockDriver { .. } => "هل تريد حظر هذا السائق؟".to_string(),
            Self::UnblockDriver { .. } => "هل تريد رفع الحظر عن هذا السائق؟".to_string(),
            Self::BlockCustomer { .. } => "هل أنت متأكد من حظر هذا الزبون؟".to_string(),
            Self::UnblockCustomer { .. } => "هل تريد رفع الحظر عن هذا الزبون؟".to_string(),
            Self::ResolveDispute { .. } => "هل تريد حل هذا النزاع؟".to_string(),
            Self::PaySettlement { driver_name, .. } => format!("هل تريد تأكيد تسوية {driver_name}؟"),
        }
    }

    /// Notification shown after `{success: true}`.
    pub const fn success_message(&self) -> &'static str {
        match self {
            Self::ApproveDriver { .. } => "تمت الموافقة بنجاح",
            Self::BlockDriver { .. } => "تم الحظر بنجاح",
            Self::UnblockDriver { .. } | Self::UnblockCustomer { .. } => "تم رفع الحظر بنجاح",
            Self::BlockCustomer { .. } => "تم حظر الزبون بنجاح",
            Self::ResolveDispute { .. } => "تم حل النزاع بنجاح",
            Self::PaySettlement { .. } => "تم التسوية بنجاح",
        }
    }

    /// Identity used by the in-flight guard. Two actions on the same target
    /// and endpoint share a key.
    pub fn key(&self) -> String {
        self.path()
    }
}

/// Result of a confirmed action, ready to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed(String),
    Failed(String),
    /// The session was dropped; navigation to login already happened.
    SessionExpired,
}

impl ActionOutcome {
    pub fn from_result(result: Result<String, ApiError>) -> Self {
        match result {
            Ok(message) => Self::Completed(message),
            Err(err) if err.is_session_expired() => Self::SessionExpired,
            Err(err) => Self::Failed(err.user_message()),
        }
    }

    /// Whether the page should refetch its list.
    pub const fn should_refresh(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Completed(message) | Self::Failed(message) => Some(message),
            Self::SessionExpired => None,
        }
    }
}

/// Confirmation step and re-entrancy guard for [`AdminAction`]s.
#[derive(Debug, Default)]
pub struct ActionDesk {
    pending: Option<AdminAction>,
    in_flight: HashSet<String>,
}

impl ActionDesk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks for confirmation of `action`. Refused while the same action is
    /// in flight; replaces any other unconfirmed request.
    pub fn request(&mut self, action: AdminAction) -> bool {
        if self.in_flight.contains(&action.key()) {
            return false;
        }
        self.pending = Some(action);
        true
    }

    /// The action awaiting confirmation.
    pub const fn pending(&self) -> Option<&AdminAction> {
        self.pending.as_ref()
    }

    pub fn cancel(&mut self) -> Option<AdminAction> {
        self.pending.take()
    }

    /// Confirms the pending action and marks it in flight. The caller must
    /// send it and then call [`ActionDesk::finish`].
    pub fn confirm(&mut self) -> Option<AdminAction> {
        let action = self.pending.take()?;
        if self.in_flight.insert(action.key()) {
            Some(action)
        } else {
            None
        }
    }

    pub fn finish(&mut self, action: &AdminAction) {
        self.in_flight.remove(&action.key());
    }

    pub fn is_in_flight(&self, action: &AdminAction) -> bool {
        self.in_flight.contains(&action.key())
    }

    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str) -> AdminAction {
        AdminAction::BlockDriver {
            driver_id: id.to_string(),
        }
    }

    #[test]
    fn test_paths_and_bodies() {
        assert_eq!(block("7").path(), "admin/drivers/7/block");
        assert_eq!(block("7").body(), json!({"reason": "حظر يدوي من الإدارة"}));

        let approve = AdminAction::ApproveDriver {
            driver_id: "7".into(),
        };
        assert_eq!(approve.path(), "admin/drivers/7/approve");
        assert_eq!(approve.body(), json!({}));

        let resolve = AdminAction::ResolveDispute {
            dispute_id: "d1".into(),
            resolution: Resolution::Refund,
            notes: "تم الاسترداد".into(),
        };
        assert_eq!(resolve.path(), "admin/disputes/d1/resolve");
        assert_eq!(resolve.body(), json!({"resolution": "refund", "notes": "تم الاسترداد"}));

        let pay = AdminAction::PaySettlement {
            driver_id: "d9".into(),
            driver_name: "أحمد".into(),
        };
        assert_eq!(pay.path(), "admin/settlements/d9/pay");
        assert_eq!(pay.confirmation_prompt(), "هل تريد تأكيد تسوية أحمد؟");

        let customer = AdminAction::BlockCustomer {
            customer_id: "c1".into(),
        };
        assert_eq!(customer.path(), "admin/users/c1/block");
        assert_eq!(customer.body()["reason"], "حظر يدوي من الإدارة");
    }

    #[test]
    fn test_confirmation_is_required() {
        let mut desk = ActionDesk::new();
        assert_eq!(desk.confirm(), None);

        assert!(desk.request(block("1")));
        assert_eq!(desk.pending(), Some(&block("1")));
        assert_eq!(desk.cancel(), Some(block("1")));
        assert_eq!(desk.confirm(), None);
    }

    #[test]
    fn test_in_flight_guard() {
        let mut desk = ActionDesk::new();
        assert!(desk.request(block("1")));
        let action = desk.confirm().unwrap();
        assert!(desk.is_in_flight(&action));

        assert!(!desk.request(block("1")));
        assert!(desk.request(block("2")));

        desk.finish(&action);
        assert!(!desk.is_in_flight(&action));
        assert!(desk.request(block("1")));
    }

    #[test]
    fn test_outcomes() {
        let done = ActionOutcome::from_result(Ok("تم الحظر بنجاح".into()));
        assert!(done.should_refresh());
        assert_eq!(done.message(), Some("تم الحظر بنجاح"));

        let failed = ActionOutcome::from_result(Err(ApiError::Rejected {
            status: 400,
            message: "السائق محظور مسبقاً".into(),
        }));
        assert!(!failed.should_refresh());
        assert_eq!(failed.message(), Some("السائق محظور مسبقاً"));

        let expired = ActionOutcome::from_result(Err(ApiError::SessionExpired));
        assert_eq!(expired, ActionOutcome::SessionExpired);
        assert_eq!(expired.message(), None);
    }
}
