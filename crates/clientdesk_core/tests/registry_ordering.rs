mod common;

use clientdesk_core::{PersonRegistry, RegistryError};
use common::{alice, at, benson, carl, daniel, person, with_meeting, with_policies};

fn earliest_starts(registry: &PersonRegistry) -> Vec<Option<chrono::NaiveDateTime>> {
    registry
        .as_list()
        .iter()
        .map(|person| person.earliest_meeting_start())
        .collect()
}

#[test]
fn list_is_sorted_by_earliest_meeting_with_unscheduled_last() {
    let registry = PersonRegistry::from_persons(vec![
        alice(),
        with_meeting(benson(), at(2024, 6, 3, 9, 0)),
        carl(),
        with_meeting(
            with_meeting(daniel(), at(2024, 7, 1, 9, 0)),
            at(2024, 5, 20, 10, 0),
        ),
    ])
    .unwrap();

    let names: Vec<&str> = registry
        .as_list()
        .iter()
        .map(|person| person.name().as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Daniel Meier", "Benson Meier", "Alice Pauline", "Carl Kurz"]
    );
    let starts = earliest_starts(&registry);
    assert!(starts[..2].windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(starts[2..].iter().all(Option::is_none));
}

#[test]
fn past_meetings_still_count_toward_ordering() {
    // fixed_now in the shared fixtures is 2024-05-15 12:00.
    let registry = PersonRegistry::from_persons(vec![
        with_meeting(alice(), at(2024, 5, 16, 9, 0)),
        with_meeting(benson(), at(2023, 1, 10, 9, 0)),
    ])
    .unwrap();

    let names: Vec<&str> = registry
        .as_list()
        .iter()
        .map(|person| person.name().as_str())
        .collect();
    assert_eq!(names, vec!["Benson Meier", "Alice Pauline"]);
}

#[test]
fn duplicate_identity_is_rejected_and_registry_unchanged() {
    let mut registry = PersonRegistry::from_persons(vec![alice(), benson()]).unwrap();
    let before = registry.clone();

    let twin = person("alice   PAULINE", "94351253", "lead", &["other"]);
    assert_eq!(registry.add(twin), Err(RegistryError::DuplicatePerson));
    assert_eq!(registry, before);
}

#[test]
fn same_name_with_different_phone_is_a_different_person() {
    let mut registry = PersonRegistry::from_persons(vec![alice()]).unwrap();
    registry
        .add(person("Alice Pauline", "90000000", "client", &[]))
        .unwrap();
    assert_eq!(registry.len(), 2);
}

#[test]
fn editing_non_meeting_fields_keeps_position() {
    let mut registry = PersonRegistry::from_persons(vec![alice(), benson(), carl()]).unwrap();
    let order_before: Vec<String> = registry
        .as_list()
        .iter()
        .map(|person| person.name().to_string())
        .collect();

    let target = registry.as_list()[1].clone();
    let moved = target.with_address(
        clientdesk_core::model::fields::Address::parse("1 New Street").unwrap(),
    );
    registry.set_person(&target, moved).unwrap();

    let order_after: Vec<String> = registry
        .as_list()
        .iter()
        .map(|person| person.name().to_string())
        .collect();
    assert_eq!(order_before, order_after);
    assert_eq!(registry.as_list()[1].address().as_str(), "1 New Street");
}

#[test]
fn editing_meetings_resorts() {
    let mut registry = PersonRegistry::from_persons(vec![
        with_meeting(alice(), at(2024, 6, 1, 9, 0)),
        with_meeting(benson(), at(2024, 6, 2, 9, 0)),
    ])
    .unwrap();

    let target = registry.as_list()[1].clone();
    let earlier = with_meeting(target.as_ref().clone(), at(2024, 5, 16, 9, 0));
    registry.set_person(&target, earlier).unwrap();

    assert_eq!(registry.as_list()[0].name().as_str(), "Benson Meier");
}

#[test]
fn rename_onto_existing_identity_is_rejected() {
    let mut registry = PersonRegistry::from_persons(vec![alice(), benson()]).unwrap();
    let target = registry.as_list()[1].clone();
    let clash = person("Alice Pauline", "94351253", "lead", &[]);
    assert_eq!(
        registry.set_person(&target, clash),
        Err(RegistryError::DuplicatePerson)
    );
}

#[test]
fn set_person_on_missing_target_fails() {
    let mut registry = PersonRegistry::from_persons(vec![alice()]).unwrap();
    assert_eq!(
        registry.set_person(&benson(), carl()),
        Err(RegistryError::PersonNotFound)
    );
    assert_eq!(registry.remove(&benson()), Err(RegistryError::PersonNotFound));
}

#[test]
fn replace_all_with_duplicates_leaves_registry_untouched() {
    let mut registry = PersonRegistry::from_persons(vec![carl()]).unwrap();
    let before = registry.clone();
    assert_eq!(
        registry.replace_all(vec![alice(), alice()]),
        Err(RegistryError::DuplicatePerson)
    );
    assert_eq!(registry, before);
}

#[test]
fn status_summary_counts_each_level() {
    let registry = PersonRegistry::from_persons(vec![
        alice(),
        with_policies(carl(), &["Life", "Car", "Home", "Travel", "Health"]),
        with_policies(
            common::person("Elle Meyer", "94822240", "client", &[]),
            &["Life"],
        ),
        benson(),
        daniel(),
    ])
    .unwrap();

    let summary = registry.client_status_summary();
    assert_eq!(summary.no_policies, 1);
    assert_eq!(summary.fully_covered, 1);
    assert_eq!(summary.active, 1);
    assert_eq!(summary.not_client, 2);
}
