//! Broadcast service
//!
//! Fetches the state a broadcast decision needs, holds the broadcast screen's
//! selections and turns a passing evaluation into a per-recipient plan.
//! Dispatching the plan is the backend's job.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::eligibility::{evaluate, BroadcastRequest, Evaluation, PlanTable, TemplateMode, TemplateSelection};
use crate::models::{BroadcastLog, Contact, MessengerAccount, Template, User};
use crate::session::Session;
use crate::utils::errors::{SenderError, Result};
use crate::utils::logging::log_eligibility;

/// Freshly fetched inputs of a broadcast decision
#[derive(Debug, Clone)]
pub struct BroadcastSnapshot {
    pub accounts: Vec<MessengerAccount>,
    pub contacts: Vec<Contact>,
    pub templates: Vec<Template>,
    pub user: User,
    pub plans: PlanTable,
}

impl BroadcastSnapshot {
    pub fn account(&self, account_id: Uuid) -> Option<&MessengerAccount> {
        self.accounts.iter().find(|a| a.id == account_id)
    }

    pub fn template(&self, template_id: Uuid) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == template_id)
    }
}

/// Selections made on the broadcast screen
#[derive(Debug, Clone, Default)]
pub struct BroadcastDraft {
    pub account_id: Option<Uuid>,
    pub templates: TemplateSelection,
}

/// One message the backend is asked to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMessage {
    pub contact_id: Uuid,
    pub contact_name: String,
    /// Phone number or Telegram username, depending on the account
    pub recipient: String,
    pub template_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct BroadcastPlan {
    pub account_id: Uuid,
    pub account_name: String,
    pub mode: TemplateMode,
    pub messages: Vec<PlannedMessage>,
}

impl BroadcastPlan {
    /// Messages per template
    pub fn template_counts(&self) -> BTreeMap<Uuid, usize> {
        let mut counts = BTreeMap::new();
        for message in &self.messages {
            *counts.entry(message.template_id).or_insert(0) += 1;
        }
        counts
    }
}

impl BroadcastDraft {
    pub fn new(account_id: Option<Uuid>, templates: TemplateSelection) -> Self {
        Self { account_id, templates }
    }

    /// Evaluate the draft against fetched state. Account and template ids
    /// that are not in the snapshot count as no selection.
    pub fn evaluate<'a>(&self, snapshot: &'a BroadcastSnapshot) -> Evaluation<'a> {
        let account = self.account_id.and_then(|id| snapshot.account(id));
        let templates = self.resolved_templates(snapshot);
        let evaluation = evaluate(&BroadcastRequest {
            account,
            contacts: &snapshot.contacts,
            templates: &templates,
            user: &snapshot.user,
            plans: &snapshot.plans,
        });
        log_eligibility(evaluation.can_start(), evaluation.eligible_contacts.len(), &evaluation.reason());
        evaluation
    }

    /// Template selection with ids missing from the snapshot dropped
    fn resolved_templates(&self, snapshot: &BroadcastSnapshot) -> TemplateSelection {
        let existing: BTreeSet<Uuid> = snapshot.templates.iter().map(|t| t.id).collect();
        let mut templates = self.templates.clone();
        templates.retain_existing(&existing);
        templates
    }

    /// Assign a template to every eligible recipient.
    ///
    /// Fails with the evaluation's reason when the broadcast cannot start.
    pub fn plan<R: Rng + ?Sized>(&self, snapshot: &BroadcastSnapshot, rng: &mut R) -> Result<BroadcastPlan> {
        let evaluation = self.evaluate(snapshot);
        if !evaluation.can_start() {
            return Err(SenderError::validation(evaluation.reason()));
        }

        // evaluate() only passes with a selected account
        let account = self
            .account_id
            .and_then(|id| snapshot.account(id))
            .ok_or_else(|| SenderError::validation("Select an account"))?;

        let mut templates = self
            .resolved_templates(snapshot)
            .active_ids()
            .into_iter()
            .map(|id| {
                snapshot
                    .template(id)
                    .ok_or_else(|| SenderError::validation("A selected template no longer exists"))
            })
            .collect::<Result<Vec<_>>>()?;
        templates.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let mode = self.templates.mode();
        let messages = evaluation
            .eligible_contacts
            .iter()
            .enumerate()
            .filter_map(|(index, contact)| {
                let template = match mode {
                    TemplateMode::Single => templates[0],
                    TemplateMode::Alternate => templates[index % templates.len()],
                    TemplateMode::Random => templates[rng.gen_range(0..templates.len())],
                };
                let recipient = contact.identifier_for(account.messenger_type)?;
                Some(PlannedMessage {
                    contact_id: contact.id,
                    contact_name: contact.name.clone(),
                    recipient: recipient.to_string(),
                    template_id: template.id,
                })
            })
            .collect::<Vec<_>>();

        info!(account_id = %account.id, mode = %mode, messages = messages.len(), "Broadcast planned");
        Ok(BroadcastPlan {
            account_id: account.id,
            account_name: account.account_name.clone(),
            mode,
            messages,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BroadcastService {
    api: ApiClient,
}

impl BroadcastService {
    pub fn new(session: &Session) -> Result<Self> {
        Ok(Self { api: session.api()? })
    }

    /// Fetch everything an evaluation needs, including a fresh copy of the
    /// user so that the quota reflects the backend.
    pub async fn snapshot(&self) -> Result<BroadcastSnapshot> {
        let (accounts, contacts, templates, user, plans) = tokio::try_join!(
            self.api.list_accounts(),
            self.api.list_contacts(),
            self.api.list_templates(),
            self.api.me(),
            self.api.subscription_plans(),
        )?;

        let plans = if plans.is_empty() {
            PlanTable::builtin()
        } else {
            PlanTable::from_plans(&plans)
        };

        debug!(
            accounts = accounts.len(),
            contacts = contacts.len(),
            templates = templates.len(),
            "Broadcast snapshot fetched"
        );
        Ok(BroadcastSnapshot { accounts, contacts, templates, user, plans })
    }

    /// Broadcast history, newest first
    pub async fn logs(&self) -> Result<Vec<BroadcastLog>> {
        let mut logs = self.api.list_broadcast_logs().await?;
        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(logs)
    }
}
