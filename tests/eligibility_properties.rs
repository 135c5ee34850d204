//! Broadcast eligibility properties
//!
//! Generated contact lists and quotas checked against the evaluator's rules,
//! plus the fixed scenarios the broadcast screen depends on.

mod helpers;

use helpers::*;
use proptest::prelude::*;
use uuid::Uuid;

use sender_client::eligibility::{eligible_contacts, BlockReason, QuotaStatus};
use sender_client::models::{Contact, MessengerType};
use sender_client::{evaluate, BroadcastRequest, PlanTable, TemplateSelection};

fn identifier() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("   ".to_string())),
        "[a-z0-9_+]{1,12}".prop_map(Some),
    ]
}

fn contacts() -> impl Strategy<Value = Vec<Contact>> {
    prop::collection::vec((identifier(), identifier()), 0..30).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (phone, username))| {
                contact(&format!("Contact {}", i), phone.as_deref(), username.as_deref())
            })
            .collect()
    })
}

fn has_value(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

proptest! {
    #[test]
    fn telegram_recipients_are_exactly_those_with_a_username(contacts in contacts()) {
        let account = account(MessengerType::Telegram);
        let eligible = eligible_contacts(Some(&account), &contacts);

        let expected: Vec<Uuid> = contacts
            .iter()
            .filter(|c| has_value(&c.telegram_username))
            .map(|c| c.id)
            .collect();
        let actual: Vec<Uuid> = eligible.iter().map(|c| c.id).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn whatsapp_recipients_are_exactly_those_with_a_phone(contacts in contacts()) {
        let account = account(MessengerType::Whatsapp);
        let eligible = eligible_contacts(Some(&account), &contacts);

        let expected: Vec<Uuid> = contacts.iter().filter(|c| has_value(&c.phone)).map(|c| c.id).collect();
        let actual: Vec<Uuid> = eligible.iter().map(|c| c.id).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn no_account_means_no_recipients(contacts in contacts()) {
        prop_assert!(eligible_contacts(None, &contacts).is_empty());
    }

    #[test]
    fn unlimited_users_are_never_blocked_by_quota(
        count in 1usize..200,
        sent in 0u64..100_000,
        plan in prop::sample::select(vec!["free", "basic", "professional", "corporate", "unknown"]),
    ) {
        let contacts = reachable_contacts(count);
        let account = account(MessengerType::Telegram);
        let template = Uuid::new_v4();
        let selection = TemplateSelection::single(Some(template));
        let user = user(plan, sent, true);
        let plans = PlanTable::builtin();

        let evaluation = evaluate(&BroadcastRequest {
            account: Some(&account),
            contacts: &contacts,
            templates: &selection,
            user: &user,
            plans: &plans,
        });
        prop_assert!(evaluation.can_start());
        prop_assert_eq!(evaluation.quota, Some(QuotaStatus::Unlimited));
    }

    #[test]
    fn quota_blocks_exactly_when_request_exceeds_remaining(
        count in 1usize..40,
        sent in 0u64..20,
    ) {
        let contacts = reachable_contacts(count);
        let account = account(MessengerType::Whatsapp);
        let selection = TemplateSelection::single(Some(Uuid::new_v4()));
        let user = user("free", sent, false);
        let plans = PlanTable::builtin();

        let evaluation = evaluate(&BroadcastRequest {
            account: Some(&account),
            contacts: &contacts,
            templates: &selection,
            user: &user,
            plans: &plans,
        });
        let fits = sent + count as u64 <= 10;
        prop_assert_eq!(evaluation.can_start(), fits);
    }

    #[test]
    fn single_mode_without_template_never_starts(
        contacts in contacts(),
        messenger in prop::sample::select(vec![MessengerType::Telegram, MessengerType::Whatsapp]),
        plan in prop::sample::select(vec!["free", "basic", "professional", "corporate", "unlimited", "unknown"]),
        sent in 0u64..100_000,
        is_unlimited in any::<bool>(),
        set in prop::collection::vec(any::<u128>().prop_map(Uuid::from_u128), 0..4),
    ) {
        let account = account(messenger);
        let user = user(plan, sent, is_unlimited);
        let plans = PlanTable::builtin();
        // ids chosen for the multi modes do not count in single mode
        let mut selection = TemplateSelection::single(None);
        for id in set {
            selection.toggle(id);
        }

        let evaluation = evaluate(&BroadcastRequest {
            account: Some(&account),
            contacts: &contacts,
            templates: &selection,
            user: &user,
            plans: &plans,
        });
        prop_assert!(!evaluation.can_start());
        prop_assert!(matches!(
            evaluation.blocked_by(),
            Some(BlockReason::TemplateNotSelected) | Some(BlockReason::NoAccountOrContacts)
        ));
    }
}

#[test]
fn test_free_plan_with_eight_sent_cannot_send_three() {
    let contacts = reachable_contacts(3);
    let account = account(MessengerType::Telegram);
    let selection = TemplateSelection::single(Some(Uuid::new_v4()));
    let user = user("free", 8, false);
    let plans = PlanTable::builtin();

    let evaluation = evaluate(&BroadcastRequest {
        account: Some(&account),
        contacts: &contacts,
        templates: &selection,
        user: &user,
        plans: &plans,
    });
    assert_eq!(
        evaluation.blocked_by(),
        Some(&BlockReason::QuotaExceeded { remaining: 2, requested: 3 })
    );
    assert!(evaluation.reason().contains('2'));
}

#[test]
fn test_basic_plan_allows_five_hundred() {
    let contacts = reachable_contacts(500);
    let account = account(MessengerType::Whatsapp);
    let selection = TemplateSelection::single(Some(Uuid::new_v4()));
    let user = user("basic", 0, false);
    let plans = PlanTable::builtin();

    let evaluation = evaluate(&BroadcastRequest {
        account: Some(&account),
        contacts: &contacts,
        templates: &selection,
        user: &user,
        plans: &plans,
    });
    assert!(evaluation.can_start());
    assert_eq!(evaluation.eligible_contacts.len(), 500);
    assert_eq!(evaluation.reason(), "Ready to send to 500 contacts");
}

#[test]
fn test_single_mode_without_template_is_blocked() {
    let contacts = reachable_contacts(2);
    let account = account(MessengerType::Telegram);
    let selection = TemplateSelection::single(None);
    let user = user("free", 0, false);
    let plans = PlanTable::builtin();

    let evaluation = evaluate(&BroadcastRequest {
        account: Some(&account),
        contacts: &contacts,
        templates: &selection,
        user: &user,
        plans: &plans,
    });
    assert_eq!(evaluation.blocked_by(), Some(&BlockReason::TemplateNotSelected));
    assert_eq!(evaluation.quota, None);
}

#[test]
fn test_missing_recipients_reported_before_templates() {
    let contacts = vec![contact("Phone only", Some("+79990000000"), None)];
    let account = account(MessengerType::Telegram);
    let selection = TemplateSelection::alternate([Uuid::new_v4(), Uuid::new_v4()]);
    let user = user("free", 0, false);
    let plans = PlanTable::builtin();

    let evaluation = evaluate(&BroadcastRequest {
        account: Some(&account),
        contacts: &contacts,
        templates: &selection,
        user: &user,
        plans: &plans,
    });
    assert_eq!(evaluation.blocked_by(), Some(&BlockReason::NoAccountOrContacts));
    assert!(evaluation.eligible_contacts.is_empty());
}

#[test]
fn test_random_mode_with_empty_set_is_blocked() {
    let contacts = reachable_contacts(1);
    let account = account(MessengerType::Whatsapp);
    let selection = TemplateSelection::random(Vec::new());
    let user = user("free", 0, false);
    let plans = PlanTable::builtin();

    let evaluation = evaluate(&BroadcastRequest {
        account: Some(&account),
        contacts: &contacts,
        templates: &selection,
        user: &user,
        plans: &plans,
    });
    assert_eq!(evaluation.blocked_by(), Some(&BlockReason::NoTemplatesSelected));
}
