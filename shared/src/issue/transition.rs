//! Issue transition rules
//!
//! `transition` is the single place deciding whether an action by an actor
//! is legal for an issue in its current state, and what the resulting state
//! looks like. Callers persist the returned [`Outcome`]; an [`Refusal`] maps
//! onto an [`ErrorCode`] for the API boundary.

use super::status::{IssueStatus, Priority};
use crate::error::ErrorCode;
use crate::models::issue::{Issue, StaffRef, TimelineEntry};
use std::fmt;

/// Role of the acting principal, as resolved from the user record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRole {
    Citizen,
    Staff,
    Admin,
}

/// The acting principal
#[derive(Debug, Clone, Copy)]
pub struct Actor<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub role: ActorRole,
}

/// Action applied to an issue
#[derive(Debug, Clone)]
pub enum IssueAction<'a> {
    /// Admin assigns staff; from Pending this moves to In-Progress,
    /// from In-Progress/Working it only fills a missing assignment
    Assign { staff: &'a StaffRef },
    /// Admin rejects a pending issue; reason is mandatory
    Reject { reason: &'a str },
    /// Assigned staff (or admin) sets the status
    SetStatus { target: IssueStatus },
    /// Owner edits title/description/category/location while Pending
    Edit,
    /// Owner deletes a Pending issue, owner or admin deletes a Rejected one
    Delete,
    /// Owner raises priority to High after a verified payment
    Boost,
    /// A citizen other than the owner upvotes
    Upvote,
}

/// Why a transition was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refusal {
    NotAdmin,
    NotAssignedStaff,
    NotOwner,
    AlreadyAssigned,
    NotAssignable(IssueStatus),
    Terminal(IssueStatus),
    StatusUnchanged(IssueStatus),
    InvalidTarget { from: IssueStatus, to: IssueStatus },
    NotPending(IssueStatus),
    NotDeletable(IssueStatus),
    ReasonRequired,
    AlreadyHigh,
    OwnIssueUpvote,
}

impl Refusal {
    /// Map this refusal onto the wire error code
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Refusal::NotAdmin => ErrorCode::AdminRequired,
            Refusal::NotAssignedStaff => ErrorCode::NotAssignedStaff,
            Refusal::NotOwner => ErrorCode::NotIssueOwner,
            Refusal::AlreadyAssigned => ErrorCode::IssueAlreadyAssigned,
            Refusal::NotAssignable(_) => ErrorCode::IssueNotAssignable,
            Refusal::Terminal(_) => ErrorCode::IssueTerminal,
            Refusal::StatusUnchanged(_) => ErrorCode::StatusUnchanged,
            Refusal::InvalidTarget { .. } => ErrorCode::InvalidStatusTarget,
            Refusal::NotPending(_) => ErrorCode::IssueNotPending,
            Refusal::NotDeletable(_) => ErrorCode::IssueNotDeletable,
            Refusal::ReasonRequired => ErrorCode::RejectReasonRequired,
            Refusal::AlreadyHigh => ErrorCode::AlreadyHighPriority,
            Refusal::OwnIssueUpvote => ErrorCode::OwnIssueUpvote,
        }
    }
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refusal::NotAdmin => write!(f, "only an admin can perform this action"),
            Refusal::NotAssignedStaff => {
                write!(f, "only the assigned staff can update this issue")
            }
            Refusal::NotOwner => write!(f, "only the reporter can perform this action"),
            Refusal::AlreadyAssigned => write!(f, "issue already has assigned staff"),
            Refusal::NotAssignable(s) => write!(f, "cannot assign staff while issue is {}", s),
            Refusal::Terminal(s) => write!(f, "issue is {} and accepts no further transitions", s),
            Refusal::StatusUnchanged(s) => write!(f, "issue is already {}", s),
            Refusal::InvalidTarget { from, to } => {
                write!(f, "cannot move issue from {} to {}", from, to)
            }
            Refusal::NotPending(s) => write!(f, "issue is {} and no longer pending", s),
            Refusal::NotDeletable(s) => write!(f, "cannot delete issue while it is {}", s),
            Refusal::ReasonRequired => write!(f, "rejection requires a reason"),
            Refusal::AlreadyHigh => write!(f, "issue priority is already High"),
            Refusal::OwnIssueUpvote => write!(f, "reporters cannot upvote their own issue"),
        }
    }
}

/// The state a legal transition produces
///
/// Fields other than `status`/`priority` describe side effects the caller
/// must persist: a staff assignment, a timeline append, an upvote to add,
/// or record removal.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: IssueStatus,
    pub priority: Priority,
    /// Newly assigned staff, when the action set one
    pub assigned: Option<StaffRef>,
    /// Timeline entry to append, when the action is part of the status audit log
    pub entry: Option<TimelineEntry>,
    /// The record is removed
    pub delete: bool,
    /// Email to add to the upvote set (None on a duplicate upvote no-op)
    pub upvoter: Option<String>,
}

impl Outcome {
    fn unchanged(issue: &Issue) -> Self {
        Self {
            status: issue.status,
            priority: issue.priority,
            assigned: None,
            entry: None,
            delete: false,
            upvoter: None,
        }
    }

    /// Apply this outcome to the issue record.
    ///
    /// Does not handle `delete` — removal is the caller's concern.
    pub fn apply_to(self, issue: &mut Issue) {
        issue.status = self.status;
        issue.priority = self.priority;
        if let Some(staff) = self.assigned {
            issue.staff_assigned = Some(staff);
        }
        if let Some(entry) = self.entry {
            issue.timeline.push(entry);
        }
        if let Some(email) = self.upvoter {
            issue.upvotes.push(email);
        }
    }
}

fn entry(status: IssueStatus, message: String, actor: &Actor<'_>, now_ms: i64) -> TimelineEntry {
    TimelineEntry {
        status,
        message,
        updated_by: actor.name.to_string(),
        updater_email: actor.email.to_string(),
        updated_at: now_ms,
    }
}

/// Decide the outcome of `action` by `actor` on `issue`.
///
/// Pure: no storage, no clock (the caller passes `now_ms` for timeline
/// stamping). Any (state, action, actor) triple not covered by the rules is
/// refused and leaves the issue unchanged.
pub fn transition(
    issue: &Issue,
    action: &IssueAction<'_>,
    actor: &Actor<'_>,
    now_ms: i64,
) -> Result<Outcome, Refusal> {
    match action {
        IssueAction::Assign { staff } => {
            if actor.role != ActorRole::Admin {
                return Err(Refusal::NotAdmin);
            }
            match issue.status {
                IssueStatus::Pending => {
                    let message = format!("Assigned to {} ({})", staff.name, staff.department);
                    Ok(Outcome {
                        status: IssueStatus::InProgress,
                        assigned: Some((*staff).clone()),
                        entry: Some(entry(IssueStatus::InProgress, message, actor, now_ms)),
                        ..Outcome::unchanged(issue)
                    })
                }
                IssueStatus::InProgress | IssueStatus::Working => {
                    if issue.staff_assigned.is_some() {
                        return Err(Refusal::AlreadyAssigned);
                    }
                    let message = format!("Assigned to {} ({})", staff.name, staff.department);
                    Ok(Outcome {
                        assigned: Some((*staff).clone()),
                        entry: Some(entry(issue.status, message, actor, now_ms)),
                        ..Outcome::unchanged(issue)
                    })
                }
                other => Err(Refusal::NotAssignable(other)),
            }
        }

        IssueAction::Reject { reason } => {
            if actor.role != ActorRole::Admin {
                return Err(Refusal::NotAdmin);
            }
            if reason.trim().is_empty() {
                return Err(Refusal::ReasonRequired);
            }
            if issue.status != IssueStatus::Pending {
                return Err(Refusal::NotPending(issue.status));
            }
            let message = format!("Rejected: {}", reason.trim());
            Ok(Outcome {
                status: IssueStatus::Rejected,
                entry: Some(entry(IssueStatus::Rejected, message, actor, now_ms)),
                ..Outcome::unchanged(issue)
            })
        }

        IssueAction::SetStatus { target } => {
            let is_assigned_staff = actor.role == ActorRole::Staff
                && issue
                    .staff_assigned
                    .as_ref()
                    .is_some_and(|s| s.email == actor.email);
            if actor.role != ActorRole::Admin && !is_assigned_staff {
                return Err(Refusal::NotAssignedStaff);
            }
            if issue.status.is_terminal() {
                return Err(Refusal::Terminal(issue.status));
            }
            if *target == issue.status {
                return Err(Refusal::StatusUnchanged(issue.status));
            }
            // Rejected is only reachable through the reject action
            if *target == IssueStatus::Rejected {
                return Err(Refusal::InvalidTarget {
                    from: issue.status,
                    to: *target,
                });
            }
            // A resolved issue can only be closed
            if issue.status == IssueStatus::Resolved && *target != IssueStatus::Closed {
                return Err(Refusal::InvalidTarget {
                    from: issue.status,
                    to: *target,
                });
            }
            let message = format!("Status changed to {}", target);
            Ok(Outcome {
                status: *target,
                entry: Some(entry(*target, message, actor, now_ms)),
                ..Outcome::unchanged(issue)
            })
        }

        IssueAction::Edit => {
            if actor.email != issue.reporter_email {
                return Err(Refusal::NotOwner);
            }
            if issue.status != IssueStatus::Pending {
                return Err(Refusal::NotPending(issue.status));
            }
            Ok(Outcome::unchanged(issue))
        }

        IssueAction::Delete => {
            let is_owner = actor.email == issue.reporter_email;
            match issue.status {
                IssueStatus::Rejected if is_owner || actor.role == ActorRole::Admin => {
                    Ok(Outcome {
                        delete: true,
                        ..Outcome::unchanged(issue)
                    })
                }
                IssueStatus::Pending if is_owner => Ok(Outcome {
                    delete: true,
                    ..Outcome::unchanged(issue)
                }),
                IssueStatus::Rejected | IssueStatus::Pending => Err(Refusal::NotOwner),
                other => Err(Refusal::NotDeletable(other)),
            }
        }

        IssueAction::Boost => {
            if actor.email != issue.reporter_email {
                return Err(Refusal::NotOwner);
            }
            if issue.priority == Priority::High {
                return Err(Refusal::AlreadyHigh);
            }
            Ok(Outcome {
                priority: Priority::High,
                ..Outcome::unchanged(issue)
            })
        }

        IssueAction::Upvote => {
            if actor.email == issue.reporter_email {
                return Err(Refusal::OwnIssueUpvote);
            }
            let upvoter = if issue.upvotes.iter().any(|e| e == actor.email) {
                // Duplicate upvote: set semantics, idempotent no-op
                None
            } else {
                Some(actor.email.to_string())
            };
            Ok(Outcome {
                upvoter,
                ..Outcome::unchanged(issue)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::issue::{Category, IssueCreate};

    const NOW: i64 = 1_700_000_000_000;

    fn citizen(email: &'static str) -> Actor<'static> {
        Actor {
            email,
            name: "Citizen",
            role: ActorRole::Citizen,
        }
    }

    fn staff(email: &'static str) -> Actor<'static> {
        Actor {
            email,
            name: "Bob",
            role: ActorRole::Staff,
        }
    }

    fn admin() -> Actor<'static> {
        Actor {
            email: "admin@x.com",
            name: "Admin",
            role: ActorRole::Admin,
        }
    }

    fn bob_ref() -> StaffRef {
        StaffRef {
            email: "bob@x.com".to_string(),
            name: "Bob".to_string(),
            department: "Roads".to_string(),
        }
    }

    fn pending_issue() -> Issue {
        Issue::new(
            1,
            "alice@x.com",
            "Alice",
            IssueCreate {
                title: "Pothole on Main St".to_string(),
                description: "Deep pothole near the crossing".to_string(),
                category: Category::Road,
                location: "Main St / 5th Ave".to_string(),
                image_url: None,
            },
        )
    }

    fn apply(issue: &mut Issue, outcome: Outcome) {
        outcome.apply_to(issue);
    }

    // ========== Assignment ==========

    #[test]
    fn test_assign_pending_moves_to_in_progress() {
        let issue = pending_issue();
        let staff_ref = bob_ref();
        let outcome = transition(
            &issue,
            &IssueAction::Assign { staff: &staff_ref },
            &admin(),
            NOW,
        )
        .unwrap();

        assert_eq!(outcome.status, IssueStatus::InProgress);
        assert_eq!(outcome.assigned.as_ref().unwrap().email, "bob@x.com");
        let entry = outcome.entry.unwrap();
        assert_eq!(entry.status, IssueStatus::InProgress);
        assert!(entry.message.contains("Bob"));
    }

    #[test]
    fn test_assign_requires_admin() {
        let issue = pending_issue();
        let staff_ref = bob_ref();
        for actor in [citizen("alice@x.com"), staff("bob@x.com")] {
            let result = transition(&issue, &IssueAction::Assign { staff: &staff_ref }, &actor, NOW);
            assert_eq!(result.unwrap_err(), Refusal::NotAdmin);
        }
    }

    #[test]
    fn test_assign_in_progress_fills_missing_assignment_only() {
        let mut issue = pending_issue();
        issue.status = IssueStatus::InProgress;
        let staff_ref = bob_ref();

        // Unassigned: allowed, status unchanged
        let outcome = transition(
            &issue,
            &IssueAction::Assign { staff: &staff_ref },
            &admin(),
            NOW,
        )
        .unwrap();
        assert_eq!(outcome.status, IssueStatus::InProgress);
        assert!(outcome.assigned.is_some());

        // Already assigned: refused
        issue.staff_assigned = Some(staff_ref.clone());
        let result = transition(&issue, &IssueAction::Assign { staff: &staff_ref }, &admin(), NOW);
        assert_eq!(result.unwrap_err(), Refusal::AlreadyAssigned);
    }

    #[test]
    fn test_assign_illegal_in_other_statuses() {
        let staff_ref = bob_ref();
        for status in [IssueStatus::Resolved, IssueStatus::Closed, IssueStatus::Rejected] {
            let mut issue = pending_issue();
            issue.status = status;
            let result = transition(&issue, &IssueAction::Assign { staff: &staff_ref }, &admin(), NOW);
            assert_eq!(result.unwrap_err(), Refusal::NotAssignable(status));
        }
    }

    // ========== Rejection ==========

    #[test]
    fn test_reject_pending_with_reason() {
        let issue = pending_issue();
        let outcome = transition(
            &issue,
            &IssueAction::Reject { reason: "duplicate" },
            &admin(),
            NOW,
        )
        .unwrap();
        assert_eq!(outcome.status, IssueStatus::Rejected);
        assert!(outcome.entry.unwrap().message.contains("duplicate"));
    }

    #[test]
    fn test_reject_requires_reason() {
        let issue = pending_issue();
        let result = transition(&issue, &IssueAction::Reject { reason: "  " }, &admin(), NOW);
        assert_eq!(result.unwrap_err(), Refusal::ReasonRequired);
    }

    #[test]
    fn test_reject_only_from_pending() {
        let mut issue = pending_issue();
        issue.status = IssueStatus::InProgress;
        let result = transition(&issue, &IssueAction::Reject { reason: "nope" }, &admin(), NOW);
        assert_eq!(result.unwrap_err(), Refusal::NotPending(IssueStatus::InProgress));
    }

    // ========== Status updates ==========

    #[test]
    fn test_set_status_by_assigned_staff() {
        let mut issue = pending_issue();
        issue.status = IssueStatus::InProgress;
        issue.staff_assigned = Some(bob_ref());

        let outcome = transition(
            &issue,
            &IssueAction::SetStatus {
                target: IssueStatus::Working,
            },
            &staff("bob@x.com"),
            NOW,
        )
        .unwrap();
        assert_eq!(outcome.status, IssueStatus::Working);
        assert_eq!(outcome.entry.unwrap().status, IssueStatus::Working);
    }

    #[test]
    fn test_set_status_refused_for_unassigned_staff() {
        let mut issue = pending_issue();
        issue.status = IssueStatus::InProgress;
        issue.staff_assigned = Some(bob_ref());

        let result = transition(
            &issue,
            &IssueAction::SetStatus {
                target: IssueStatus::Resolved,
            },
            &staff("carol@x.com"),
            NOW,
        );
        assert_eq!(result.unwrap_err(), Refusal::NotAssignedStaff);
    }

    #[test]
    fn test_set_status_refused_for_citizen() {
        let mut issue = pending_issue();
        issue.status = IssueStatus::InProgress;
        issue.staff_assigned = Some(bob_ref());

        let result = transition(
            &issue,
            &IssueAction::SetStatus {
                target: IssueStatus::Resolved,
            },
            &citizen("alice@x.com"),
            NOW,
        );
        assert_eq!(result.unwrap_err(), Refusal::NotAssignedStaff);
    }

    #[test]
    fn test_set_status_same_status_is_refused_noop() {
        let mut issue = pending_issue();
        issue.status = IssueStatus::Working;
        issue.staff_assigned = Some(bob_ref());

        let result = transition(
            &issue,
            &IssueAction::SetStatus {
                target: IssueStatus::Working,
            },
            &staff("bob@x.com"),
            NOW,
        );
        assert_eq!(result.unwrap_err(), Refusal::StatusUnchanged(IssueStatus::Working));
    }

    #[test]
    fn test_set_status_terminal_refused() {
        for status in [IssueStatus::Closed, IssueStatus::Rejected] {
            let mut issue = pending_issue();
            issue.status = status;
            let result = transition(
                &issue,
                &IssueAction::SetStatus {
                    target: IssueStatus::Pending,
                },
                &admin(),
                NOW,
            );
            assert_eq!(result.unwrap_err(), Refusal::Terminal(status));
        }
    }

    #[test]
    fn test_resolved_only_moves_to_closed() {
        let mut issue = pending_issue();
        issue.status = IssueStatus::Resolved;
        issue.staff_assigned = Some(bob_ref());

        for target in [IssueStatus::Pending, IssueStatus::InProgress, IssueStatus::Working] {
            let result = transition(
                &issue,
                &IssueAction::SetStatus { target },
                &admin(),
                NOW,
            );
            assert_eq!(
                result.unwrap_err(),
                Refusal::InvalidTarget {
                    from: IssueStatus::Resolved,
                    to: target
                }
            );
        }

        let outcome = transition(
            &issue,
            &IssueAction::SetStatus {
                target: IssueStatus::Closed,
            },
            &admin(),
            NOW,
        )
        .unwrap();
        assert_eq!(outcome.status, IssueStatus::Closed);
    }

    #[test]
    fn test_rejected_unreachable_via_set_status() {
        let mut issue = pending_issue();
        issue.status = IssueStatus::InProgress;
        issue.staff_assigned = Some(bob_ref());

        let result = transition(
            &issue,
            &IssueAction::SetStatus {
                target: IssueStatus::Rejected,
            },
            &admin(),
            NOW,
        );
        assert!(matches!(result, Err(Refusal::InvalidTarget { .. })));
    }

    // ========== Edit / delete ==========

    #[test]
    fn test_edit_owner_pending_only() {
        let issue = pending_issue();
        assert!(transition(&issue, &IssueAction::Edit, &citizen("alice@x.com"), NOW).is_ok());

        let result = transition(&issue, &IssueAction::Edit, &citizen("carol@x.com"), NOW);
        assert_eq!(result.unwrap_err(), Refusal::NotOwner);

        let mut assigned = pending_issue();
        assigned.status = IssueStatus::InProgress;
        let result = transition(&assigned, &IssueAction::Edit, &citizen("alice@x.com"), NOW);
        assert_eq!(result.unwrap_err(), Refusal::NotPending(IssueStatus::InProgress));
    }

    #[test]
    fn test_delete_rules() {
        // Pending: owner only
        let issue = pending_issue();
        assert!(
            transition(&issue, &IssueAction::Delete, &citizen("alice@x.com"), NOW)
                .unwrap()
                .delete
        );
        let result = transition(&issue, &IssueAction::Delete, &citizen("carol@x.com"), NOW);
        assert_eq!(result.unwrap_err(), Refusal::NotOwner);

        // Rejected: owner or admin
        let mut rejected = pending_issue();
        rejected.status = IssueStatus::Rejected;
        assert!(
            transition(&rejected, &IssueAction::Delete, &citizen("alice@x.com"), NOW)
                .unwrap()
                .delete
        );
        assert!(
            transition(&rejected, &IssueAction::Delete, &admin(), NOW)
                .unwrap()
                .delete
        );
        let result = transition(&rejected, &IssueAction::Delete, &citizen("carol@x.com"), NOW);
        assert_eq!(result.unwrap_err(), Refusal::NotOwner);

        // Anything else: not deletable
        for status in [IssueStatus::InProgress, IssueStatus::Working, IssueStatus::Resolved, IssueStatus::Closed] {
            let mut other = pending_issue();
            other.status = status;
            let result = transition(&other, &IssueAction::Delete, &citizen("alice@x.com"), NOW);
            assert_eq!(result.unwrap_err(), Refusal::NotDeletable(status));
        }
    }

    // ========== Boost / upvote ==========

    #[test]
    fn test_boost_sets_high_once() {
        let issue = pending_issue();
        let outcome = transition(&issue, &IssueAction::Boost, &citizen("alice@x.com"), NOW).unwrap();
        assert_eq!(outcome.priority, Priority::High);
        assert_eq!(outcome.status, IssueStatus::Pending);
        assert!(outcome.entry.is_none());

        let mut boosted = pending_issue();
        boosted.priority = Priority::High;
        let result = transition(&boosted, &IssueAction::Boost, &citizen("alice@x.com"), NOW);
        assert_eq!(result.unwrap_err(), Refusal::AlreadyHigh);
    }

    #[test]
    fn test_boost_owner_only() {
        let issue = pending_issue();
        let result = transition(&issue, &IssueAction::Boost, &citizen("carol@x.com"), NOW);
        assert_eq!(result.unwrap_err(), Refusal::NotOwner);
    }

    #[test]
    fn test_upvote_idempotent_set_semantics() {
        let mut issue = pending_issue();

        let outcome = transition(&issue, &IssueAction::Upvote, &citizen("carol@x.com"), NOW).unwrap();
        assert_eq!(outcome.upvoter.as_deref(), Some("carol@x.com"));
        apply(&mut issue, outcome);
        assert_eq!(issue.upvote_count(), 1);

        // Second upvote by the same citizen: no-op, set size unchanged
        let outcome = transition(&issue, &IssueAction::Upvote, &citizen("carol@x.com"), NOW).unwrap();
        assert!(outcome.upvoter.is_none());
        apply(&mut issue, outcome);
        assert_eq!(issue.upvote_count(), 1);
    }

    #[test]
    fn test_upvote_own_issue_refused() {
        let issue = pending_issue();
        let result = transition(&issue, &IssueAction::Upvote, &citizen("alice@x.com"), NOW);
        assert_eq!(result.unwrap_err(), Refusal::OwnIssueUpvote);
    }

    // ========== End-to-end scenarios ==========

    #[test]
    fn test_happy_path_report_assign_resolve_close() {
        let mut issue = pending_issue();
        assert_eq!(issue.timeline.len(), 1);

        // Admin assigns bob
        let staff_ref = bob_ref();
        let outcome = transition(&issue, &IssueAction::Assign { staff: &staff_ref }, &admin(), NOW).unwrap();
        apply(&mut issue, outcome);
        assert_eq!(issue.status, IssueStatus::InProgress);
        assert_eq!(issue.staff_assigned.as_ref().unwrap().email, "bob@x.com");
        assert_eq!(issue.timeline.len(), 2);

        // Assigned staff resolves
        let outcome = transition(
            &issue,
            &IssueAction::SetStatus {
                target: IssueStatus::Resolved,
            },
            &staff("bob@x.com"),
            NOW,
        )
        .unwrap();
        apply(&mut issue, outcome);
        assert_eq!(issue.status, IssueStatus::Resolved);
        assert_eq!(issue.timeline.len(), 3);

        // Admin closes
        let outcome = transition(
            &issue,
            &IssueAction::SetStatus {
                target: IssueStatus::Closed,
            },
            &admin(),
            NOW,
        )
        .unwrap();
        apply(&mut issue, outcome);
        assert_eq!(issue.status, IssueStatus::Closed);
        assert_eq!(issue.timeline.len(), 4);
        assert!(issue.status.is_terminal());
    }

    #[test]
    fn test_timeline_entries_are_never_rewritten() {
        let mut issue = pending_issue();
        let first = issue.timeline[0].clone();

        let staff_ref = bob_ref();
        let outcome = transition(&issue, &IssueAction::Assign { staff: &staff_ref }, &admin(), NOW).unwrap();
        apply(&mut issue, outcome);

        assert_eq!(issue.timeline[0], first);
    }
}
