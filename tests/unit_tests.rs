// Unit tests for Haven Match

use haven_match::core::{
    connections::{
        apply_decision, normalize_message, validate_new_request, ConnectionError, Decision,
        MAX_MESSAGE_LEN,
    },
    filters::{matches_query, matches_service, ServiceFilter},
    scoring::{match_score, match_variant, MatchVariant, ScoreError},
    status::{availability, occupancy_level, Availability, OccupancyLevel},
};
use haven_match::models::{ConnectionStatus, FeatureTag, Preferences, ServiceTag, Shelter};

fn shelter(capacity: u32, current: u32) -> Shelter {
    Shelter {
        id: 1,
        name: "Harbor House".to_string(),
        address: "450 Dock St".to_string(),
        latitude: None,
        longitude: None,
        capacity,
        current,
        services: vec![ServiceTag::Meals, ServiceTag::Beds],
        tags: vec![FeatureTag::Accessible],
        rating: 4.2,
        hours: "24/7".to_string(),
        phone: "555-0100".to_string(),
    }
}

#[test]
fn test_score_always_in_range() {
    let prefs_all = Preferences {
        needs_meals: true,
        needs_shelter: true,
        needs_medical: true,
        needs_counseling: true,
        needs_childcare: true,
        needs_employment: true,
        requires_wheelchair: true,
        requires_pet_friendly: true,
        requires_family: true,
        requires_veteran: true,
        ..Default::default()
    };

    for current in [0, 10, 40, 50, 90, 91, 100] {
        for prefs in [&Preferences::default(), &prefs_all] {
            let (score, _) = match_score(&shelter(100, current), prefs).unwrap();
            assert!(score <= 100, "score {} out of range", score);
        }
    }
}

#[test]
fn test_score_worked_example() {
    // base 50 + 15 meals + 15 beds + 5 wheelchair + 10 low occupancy
    let prefs = Preferences {
        needs_meals: true,
        needs_shelter: true,
        requires_wheelchair: true,
        ..Default::default()
    };
    let (score, matched) = match_score(&shelter(100, 40), &prefs).unwrap();
    assert_eq!(score, 95);
    assert_eq!(matched, vec![ServiceTag::Meals, ServiceTag::Beds]);
}

#[test]
fn test_score_crowded_shelter_penalty() {
    // base 50 - 10 for ratio 0.95
    let (score, _) = match_score(&shelter(100, 95), &Preferences::default()).unwrap();
    assert_eq!(score, 40);
}

#[test]
fn test_occupancy_adjustment_boundaries() {
    let prefs = Preferences::default();
    assert_eq!(match_score(&shelter(100, 50), &prefs).unwrap().0, 50);
    assert_eq!(match_score(&shelter(100, 90), &prefs).unwrap().0, 50);
    assert_eq!(match_score(&shelter(2, 1), &prefs).unwrap().0, 50);
    assert_eq!(match_score(&shelter(10, 4), &prefs).unwrap().0, 60);
}

#[test]
fn test_score_monotonic_in_satisfied_needs() {
    let s = shelter(100, 70);
    let mut prefs = Preferences::default();
    let mut last = match_score(&s, &prefs).unwrap().0;

    prefs.needs_meals = true;
    let with_meals = match_score(&s, &prefs).unwrap().0;
    assert!(with_meals >= last);
    last = with_meals;

    prefs.needs_shelter = true;
    let with_beds = match_score(&s, &prefs).unwrap().0;
    assert!(with_beds >= last);
}

#[test]
fn test_zero_capacity_rejected() {
    assert_eq!(
        match_score(&shelter(0, 0), &Preferences::default()),
        Err(ScoreError::InvalidCapacity)
    );
}

#[test]
fn test_match_variant_bands() {
    assert_eq!(match_variant(75), MatchVariant::High);
    assert_eq!(match_variant(74), MatchVariant::Medium);
    assert_eq!(match_variant(50), MatchVariant::Medium);
    assert_eq!(match_variant(49), MatchVariant::Low);
}

#[test]
fn test_query_case_insensitive_on_name_and_address() {
    let s = shelter(100, 10);
    assert!(matches_query(&s, "harbor"));
    assert!(matches_query(&s, "HARBOR"));
    assert!(matches_query(&s, "dock"));
    assert!(matches_query(&s, ""));
    assert!(!matches_query(&s, "mission"));
}

#[test]
fn test_service_filter() {
    let s = shelter(100, 10);
    assert!(matches_service(&s, &ServiceFilter::All));
    assert!(matches_service(&s, &ServiceFilter::Only(ServiceTag::Beds)));
    assert!(!matches_service(
        &s,
        &ServiceFilter::Only(ServiceTag::Childcare)
    ));
    assert_eq!(ServiceFilter::parse("counseling"), Some(ServiceFilter::Only(ServiceTag::Counseling)));
    assert_eq!(ServiceFilter::parse("bogus"), None);
}

#[test]
fn test_availability_labels() {
    assert_eq!(availability(100, 100).unwrap(), Availability::Full);
    assert_eq!(
        availability(85, 100).unwrap().to_string(),
        "Almost full (15 left)"
    );
    assert_eq!(
        availability(60, 100).unwrap().to_string(),
        "Limited (40 spots)"
    );
    assert_eq!(
        availability(0, 100).unwrap().to_string(),
        "Available (100 spots)"
    );
}

#[test]
fn test_occupancy_level_bands() {
    assert_eq!(occupancy_level(59, 100).unwrap(), OccupancyLevel::Ok);
    assert_eq!(occupancy_level(84, 100).unwrap(), OccupancyLevel::Warning);
    assert_eq!(occupancy_level(85, 100).unwrap(), OccupancyLevel::Critical);
}

#[test]
fn test_connection_self_request_blocked() {
    assert_eq!(
        validate_new_request("alice", "alice", None),
        Err(ConnectionError::SelfRequest)
    );
}

#[test]
fn test_connection_duplicate_blocked_until_rejected() {
    assert_eq!(
        validate_new_request("alice", "bob", Some(ConnectionStatus::Pending)),
        Err(ConnectionError::AlreadyPending)
    );
    assert_eq!(
        validate_new_request("alice", "bob", Some(ConnectionStatus::Accepted)),
        Err(ConnectionError::AlreadyConnected)
    );
    // After a rejection the sender may try again
    assert!(validate_new_request("alice", "bob", Some(ConnectionStatus::Rejected)).is_ok());
}

#[test]
fn test_respond_transitions_once() {
    let accepted = apply_decision(ConnectionStatus::Pending, Decision::Accepted).unwrap();
    assert_eq!(accepted, ConnectionStatus::Accepted);

    // A second respond on the resolved record always fails
    assert_eq!(
        apply_decision(accepted, Decision::Rejected),
        Err(ConnectionError::AlreadyHandled)
    );
    assert_eq!(
        apply_decision(ConnectionStatus::Rejected, Decision::Accepted),
        Err(ConnectionError::AlreadyHandled)
    );
}

#[test]
fn test_invalid_decision_rejected_before_lookup() {
    assert_eq!(
        Decision::parse("maybe"),
        Err(ConnectionError::InvalidDecision)
    );
}

#[test]
fn test_message_truncated_not_rejected() {
    let long = "a".repeat(MAX_MESSAGE_LEN + 200);
    let normalized = normalize_message(&long);
    assert_eq!(normalized.chars().count(), MAX_MESSAGE_LEN);

    let exact = "b".repeat(MAX_MESSAGE_LEN);
    assert_eq!(normalize_message(&exact), exact);

    assert_eq!(normalize_message("  hi  "), "hi");
}
