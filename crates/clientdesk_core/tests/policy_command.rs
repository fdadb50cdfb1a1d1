mod common;

use clientdesk_core::command::{CommandError, PolicyCommand};
use clientdesk_core::{parse_command, ClientStatus, Index, Policy, Session};
use common::{alice, benson, run, session_with, with_policies};

fn try_run(session: &mut Session, line: &str) -> Result<(), CommandError> {
    parse_command(line, session.now())
        .unwrap()
        .execute(session)
        .map(|_| ())
}

fn first(session: &Session) -> std::sync::Arc<clientdesk_core::Person> {
    session.person_at(Index::from_zero_based(0)).unwrap()
}

#[test]
fn add_replace_and_remove_policy_on_client() {
    let mut session = session_with(vec![alice()]);

    let outcome = run(&mut session, "policy 1 pol/Life plan exp/2030-01-01 pre/1200.50");
    assert!(outcome.feedback.starts_with("Added policy to Person: Alice Pauline"));
    let holder = first(&session);
    let policy = &holder.policies()[0];
    assert_eq!(policy.description(), "Life plan");
    assert_eq!(policy.premium().map(|premium| premium.cents()), Some(120_050));

    run(&mut session, "policy 1 1 pol/Car");
    assert_eq!(first(&session).policies()[0].description(), "Car");
    assert_eq!(first(&session).policies()[0].expiry(), None);

    let outcome = run(&mut session, "policy 1 1 pol/");
    assert!(outcome.feedback.starts_with("Removed policy from Person"));
    assert!(first(&session).policies().is_empty());
}

#[test]
fn sixth_policy_is_rejected_without_mutation() {
    let full = with_policies(alice(), &["Life", "Car", "Home", "Travel", "Health"]);
    let mut session = session_with(vec![full]);
    assert_eq!(first(&session).client_status(), ClientStatus::FullyCovered);
    let before = session.store().clone();

    let err = try_run(&mut session, "policy 1 pol/Pet").unwrap_err();
    assert_eq!(err, CommandError::TooManyPolicies);
    assert_eq!(err.to_string(), "Cannot have more than 5 policies.");
    assert_eq!(session.store(), &before);
}

#[test]
fn non_client_is_rejected_before_policy_index_checks() {
    let mut session = session_with(vec![benson()]);
    for line in ["policy 1 pol/Life", "policy 1 9 pol/Life", "policy 1 9 pol/"] {
        assert_eq!(
            try_run(&mut session, line).unwrap_err(),
            CommandError::NotAClient,
            "`{line}`"
        );
    }
    assert_eq!(
        CommandError::NotAClient.to_string(),
        "Policies can only be assigned to clients."
    );
}

#[test]
fn out_of_range_indices_are_reported() {
    let mut session = session_with(vec![alice()]);
    assert_eq!(
        try_run(&mut session, "policy 2 pol/Life").unwrap_err(),
        CommandError::InvalidPersonIndex
    );
    assert_eq!(
        try_run(&mut session, "policy 1 1 pol/Life").unwrap_err(),
        CommandError::InvalidPolicyIndex
    );
    assert_eq!(
        CommandError::InvalidPolicyIndex.to_string(),
        "The policy index provided is invalid"
    );
}

#[test]
fn index_refers_to_filtered_view() {
    let mut session = session_with(vec![alice(), benson()]);
    run(&mut session, "find benson");

    let command = PolicyCommand::add(Index::from_zero_based(0), Policy::named("Life").unwrap());
    let err = command.execute(&mut session).unwrap_err();
    assert_eq!(err, CommandError::NotAClient);
}

#[test]
fn client_status_tracks_policy_count() {
    let mut session = session_with(vec![alice()]);
    assert_eq!(first(&session).client_status(), ClientStatus::NoPolicies);
    run(&mut session, "policy 1 pol/Life");
    assert_eq!(first(&session).client_status(), ClientStatus::Active);
    assert_eq!(first(&session).client_status().level(), 2);
}

#[test]
fn client_status_levels_span_no_cover_to_full_cover() {
    assert_eq!(ClientStatus::NoPolicies.level(), 1);
    assert_eq!(ClientStatus::Active.level(), 2);
    assert_eq!(ClientStatus::FullyCovered.level(), 3);
}
