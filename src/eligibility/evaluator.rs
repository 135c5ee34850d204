//! Broadcast eligibility evaluator
//!
//! Decides whether a broadcast may start from state that has already been
//! fetched. The evaluation is pure and cheap, so callers re-run it whenever
//! the account, contacts, template selection or user changes instead of
//! caching the result.
//!
//! Checks run in a fixed order and the first failure wins:
//! account and matching contacts, account activity, template selection, quota.

use std::fmt;

use crate::models::{Contact, MessengerAccount, User};
use super::plans::PlanTable;
use super::quota::{check_quota, QuotaStatus};
use super::selection::{TemplateMode, TemplateSelection};

/// Everything the broadcast screen has selected or fetched.
///
/// Only the contacts outlive the evaluation; the other inputs may be
/// short-lived borrows.
#[derive(Debug, Clone, Copy)]
pub struct BroadcastRequest<'c, 's> {
    pub account: Option<&'s MessengerAccount>,
    pub contacts: &'c [Contact],
    pub templates: &'s TemplateSelection,
    pub user: &'s User,
    pub plans: &'s PlanTable,
}

/// Why a broadcast cannot start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    NoAccountOrContacts,
    AccountInactive { account_name: String },
    TemplateNotSelected,
    NoTemplatesSelected,
    QuotaExhausted { limit: u64 },
    QuotaExceeded { remaining: u64, requested: u64 },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::NoAccountOrContacts => {
                write!(f, "Select an account and make sure there are contacts matching it")
            }
            BlockReason::AccountInactive { account_name } => {
                write!(f, "Account \"{}\" is inactive", account_name)
            }
            BlockReason::TemplateNotSelected => write!(f, "Select a template"),
            BlockReason::NoTemplatesSelected => write!(f, "Select at least one template"),
            BlockReason::QuotaExhausted { limit } => {
                write!(f, "Monthly message limit of {} has been reached", limit)
            }
            BlockReason::QuotaExceeded { remaining, requested } => write!(
                f,
                "Not enough messages left this month: {} remaining, {} needed",
                remaining, requested
            ),
        }
    }
}

/// Outcome of one evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<'a> {
    /// Recipients reachable through the selected account, in input order
    pub eligible_contacts: Vec<&'a Contact>,
    /// Present only when the evaluation reached the quota check
    pub quota: Option<QuotaStatus>,
    blocked: Option<BlockReason>,
}

impl<'a> Evaluation<'a> {
    pub fn can_start(&self) -> bool {
        self.blocked.is_none()
    }

    pub fn blocked_by(&self) -> Option<&BlockReason> {
        self.blocked.as_ref()
    }

    pub fn reason(&self) -> String {
        match &self.blocked {
            Some(reason) => reason.to_string(),
            None => format!("Ready to send to {} contacts", self.eligible_contacts.len()),
        }
    }
}

/// Contacts that carry the identifier the account's messenger needs
pub fn eligible_contacts<'a>(
    account: Option<&MessengerAccount>,
    contacts: &'a [Contact],
) -> Vec<&'a Contact> {
    match account {
        Some(account) => contacts
            .iter()
            .filter(|c| c.is_reachable_via(account.messenger_type))
            .collect(),
        None => Vec::new(),
    }
}

pub fn evaluate<'c>(request: &BroadcastRequest<'c, '_>) -> Evaluation<'c> {
    let eligible = eligible_contacts(request.account, request.contacts);

    let blocked = |eligible_contacts: Vec<&'c Contact>, reason: BlockReason| Evaluation {
        eligible_contacts,
        quota: None,
        blocked: Some(reason),
    };

    let account = match request.account {
        Some(account) if !eligible.is_empty() => account,
        _ => return blocked(eligible, BlockReason::NoAccountOrContacts),
    };

    if !account.is_active {
        let reason = BlockReason::AccountInactive { account_name: account.account_name.clone() };
        return blocked(eligible, reason);
    }

    if !request.templates.is_satisfied() {
        let reason = match request.templates.mode() {
            TemplateMode::Single => BlockReason::TemplateNotSelected,
            TemplateMode::Random | TemplateMode::Alternate => BlockReason::NoTemplatesSelected,
        };
        return blocked(eligible, reason);
    }

    let quota = check_quota(request.user, request.plans, eligible.len() as u64);
    let blocked = match quota {
        QuotaStatus::Unlimited | QuotaStatus::Within { .. } => None,
        QuotaStatus::Exhausted { limit, .. } => Some(BlockReason::QuotaExhausted { limit }),
        QuotaStatus::Exceeded { remaining, requested, .. } => {
            Some(BlockReason::QuotaExceeded { remaining, requested })
        }
    };

    Evaluation {
        eligible_contacts: eligible,
        quota: Some(quota),
        blocked,
    }
}
