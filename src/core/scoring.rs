use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::status::occupancy_ratio;
use crate::models::{FeatureTag, Preferences, ServiceTag, Shelter};

/// Baseline every shelter starts from before need/requirement bonuses.
pub const BASE_SCORE: i32 = 50;

/// Errors from the match scorer. A zero-capacity shelter is invalid
/// data, never a NaN score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("invalid shelter data: capacity must be positive")]
    InvalidCapacity,
}

/// Match-badge variant derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchVariant {
    High,
    Medium,
    Low,
}

/// Calculate a match score (0-100) for a shelter based on user preferences
///
/// Scoring formula:
/// - start at 50
/// - +15 for each of meals/beds matching a set need flag
/// - +10 for each of medical/counseling/childcare/job-placement matching
/// - +5 for wheelchair/pet-friendly/family requirements met, +10 for veteran
/// - +10 when occupancy ratio < 0.5, -10 when ratio > 0.9 (strict)
/// - clamp to [0, 100]
///
/// Also returns the service tags that satisfied a need flag, for display.
/// Deterministic and recomputed on every call; both preferences and
/// occupancy change over a shelter's lifetime, so results are never cached.
pub fn match_score(
    shelter: &Shelter,
    prefs: &Preferences,
) -> Result<(u8, Vec<ServiceTag>), ScoreError> {
    // Ratio first: a zero-capacity shelter fails before any bonus math.
    let ratio = occupancy_ratio(shelter.current, shelter.capacity)?;

    let mut score = BASE_SCORE;
    let mut matched = Vec::new();

    let needs: [(bool, ServiceTag, i32); 6] = [
        (prefs.needs_meals, ServiceTag::Meals, 15),
        (prefs.needs_shelter, ServiceTag::Beds, 15),
        (prefs.needs_medical, ServiceTag::Medical, 10),
        (prefs.needs_counseling, ServiceTag::Counseling, 10),
        (prefs.needs_childcare, ServiceTag::Childcare, 10),
        (prefs.needs_employment, ServiceTag::JobPlacement, 10),
    ];

    for (wanted, tag, bonus) in needs {
        if wanted && shelter.has_service(tag) {
            score += bonus;
            matched.push(tag);
        }
    }

    let requirements: [(bool, FeatureTag, i32); 4] = [
        (prefs.requires_wheelchair, FeatureTag::Accessible, 5),
        (prefs.requires_pet_friendly, FeatureTag::PetFriendly, 5),
        (prefs.requires_family, FeatureTag::FamilyFriendly, 5),
        (prefs.requires_veteran, FeatureTag::VeteransOnly, 10),
    ];

    for (required, tag, bonus) in requirements {
        if required && shelter.has_tag(tag) {
            score += bonus;
        }
    }

    // Strict inequalities: exactly 0.5 or 0.9 gets no adjustment.
    if ratio < 0.5 {
        score += 10;
    } else if ratio > 0.9 {
        score -= 10;
    }

    Ok((score.clamp(0, 100) as u8, matched))
}

/// Map a score onto its badge variant
#[inline]
pub fn match_variant(score: u8) -> MatchVariant {
    if score >= 75 {
        MatchVariant::High
    } else if score >= 50 {
        MatchVariant::Medium
    } else {
        MatchVariant::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_shelter(capacity: u32, current: u32) -> Shelter {
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
    fn test_worked_example_95() {
        // base 50 + 15 (meals) + 15 (beds) + 5 (wheelchair) + 10 (ratio 0.4)
        let shelter = test_shelter(100, 40);
        let prefs = Preferences {
            needs_meals: true,
            needs_shelter: true,
            requires_wheelchair: true,
            ..Default::default()
        };

        let (score, matched) = match_score(&shelter, &prefs).unwrap();
        assert_eq!(score, 95);
        assert_eq!(matched, vec![ServiceTag::Meals, ServiceTag::Beds]);
    }

    #[test]
    fn test_worked_example_40() {
        // base 50 - 10 (ratio 0.95 > 0.9), no flags set
        let shelter = test_shelter(100, 95);
        let prefs = Preferences::default();

        let (score, matched) = match_score(&shelter, &prefs).unwrap();
        assert_eq!(score, 40);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_occupancy_boundaries_are_strict() {
        let prefs = Preferences::default();

        // Exactly half full: no bonus
        let (score, _) = match_score(&test_shelter(100, 50), &prefs).unwrap();
        assert_eq!(score, 50);

        // Exactly 0.9: no penalty
        let (score, _) = match_score(&test_shelter(100, 90), &prefs).unwrap();
        assert_eq!(score, 50);

        // Just under half
        let (score, _) = match_score(&test_shelter(100, 49), &prefs).unwrap();
        assert_eq!(score, 60);

        // Just over 0.9
        let (score, _) = match_score(&test_shelter(100, 91), &prefs).unwrap();
        assert_eq!(score, 40);
    }

    #[test]
    fn test_zero_capacity_is_an_error() {
        let shelter = test_shelter(0, 0);
        let prefs = Preferences::default();

        assert_eq!(
            match_score(&shelter, &prefs),
            Err(ScoreError::InvalidCapacity)
        );
    }

    #[test]
    fn test_score_stays_in_range() {
        // Every flag set against a shelter offering everything
        let mut shelter = test_shelter(100, 10);
        shelter.services = vec![
            ServiceTag::Meals,
            ServiceTag::Beds,
            ServiceTag::Showers,
            ServiceTag::Medical,
            ServiceTag::Counseling,
            ServiceTag::Childcare,
            ServiceTag::JobPlacement,
        ];
        shelter.tags = vec![
            FeatureTag::Accessible,
            FeatureTag::PetFriendly,
            FeatureTag::FamilyFriendly,
            FeatureTag::VeteransOnly,
        ];
        let prefs = Preferences {
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

        let (score, matched) = match_score(&shelter, &prefs).unwrap();
        assert_eq!(score, 100);
        assert_eq!(matched.len(), 6);
    }

    #[test]
    fn test_monotonic_in_matched_needs() {
        let shelter = test_shelter(100, 70); // fixed occupancy, no adjustment
        let mut prefs = Preferences::default();

        let (none, _) = match_score(&shelter, &prefs).unwrap();
        prefs.needs_meals = true;
        let (one, _) = match_score(&shelter, &prefs).unwrap();
        prefs.needs_shelter = true;
        let (two, _) = match_score(&shelter, &prefs).unwrap();

        assert!(none <= one && one <= two);
        assert_eq!(two, none + 30);
    }

    #[test]
    fn test_unmet_need_adds_nothing() {
        let shelter = test_shelter(100, 70); // offers meals + beds only
        let prefs = Preferences {
            needs_medical: true,
            ..Default::default()
        };

        let (score, matched) = match_score(&shelter, &prefs).unwrap();
        assert_eq!(score, 50);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_match_variant_thresholds() {
        assert_eq!(match_variant(100), MatchVariant::High);
        assert_eq!(match_variant(75), MatchVariant::High);
        assert_eq!(match_variant(74), MatchVariant::Medium);
        assert_eq!(match_variant(50), MatchVariant::Medium);
        assert_eq!(match_variant(49), MatchVariant::Low);
        assert_eq!(match_variant(0), MatchVariant::Low);
    }
}
