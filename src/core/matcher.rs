use crate::core::{
    distance::haversine_miles,
    filters::{matches_query, matches_service, ServiceFilter},
    scoring::{match_score, match_variant, ScoreError},
    status::{availability, occupancy_level},
};
use crate::models::{Preferences, ScoredShelter, Shelter};

/// Result of the ranking process
#[derive(Debug)]
pub struct RankResult {
    pub shelters: Vec<ScoredShelter>,
    pub total_candidates: usize,
}

/// Ranking orchestrator - runs the filter/score/sort pipeline
///
/// # Pipeline Stages
/// 1. Free-text filter over name/address
/// 2. Service-tag filter
/// 3. Match scoring against preferences
/// 4. Stable sort by descending score
///
/// The whole pipeline recomputes synchronously on every call; with tens
/// to low hundreds of shelters there is nothing to gain from
/// incremental updates, and scores must track live occupancy anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Rank shelters for a user.
    ///
    /// # Arguments
    /// * `shelters` - the full shelter collection
    /// * `query` - free-text search (empty matches everything)
    /// * `filter` - service filter
    /// * `prefs` - the user's preferences
    /// * `origin` - optional caller location for distance display
    /// * `limit` - optional cap on returned results
    ///
    /// # Errors
    /// Propagates `ScoreError` when a shelter carries invalid capacity
    /// data; ingestion validation should make that unreachable.
    pub fn rank(
        &self,
        shelters: Vec<Shelter>,
        query: &str,
        filter: &ServiceFilter,
        prefs: &Preferences,
        origin: Option<(f64, f64)>,
        limit: Option<usize>,
    ) -> Result<RankResult, ScoreError> {
        let total_candidates = shelters.len();

        let mut scored: Vec<ScoredShelter> = Vec::new();
        for shelter in shelters {
            if !matches_query(&shelter, query) || !matches_service(&shelter, filter) {
                continue;
            }

            let (score, matched_services) = match_score(&shelter, prefs).map_err(|e| {
                tracing::error!("Rejecting shelter {} from ranking: {}", shelter.id, e);
                e
            })?;

            let distance_mi = match (origin, shelter.latitude, shelter.longitude) {
                (Some((lat, lon)), Some(s_lat), Some(s_lon)) => {
                    Some(haversine_miles(lat, lon, s_lat, s_lon))
                }
                _ => None,
            };

            // Capacity already validated by the scorer above.
            let label = availability(shelter.current, shelter.capacity)?.to_string();
            let level = occupancy_level(shelter.current, shelter.capacity)?;

            scored.push(ScoredShelter {
                id: shelter.id,
                name: shelter.name,
                address: shelter.address,
                latitude: shelter.latitude,
                longitude: shelter.longitude,
                capacity: shelter.capacity,
                current: shelter.current,
                services: shelter.services,
                tags: shelter.tags,
                rating: shelter.rating,
                hours: shelter.hours,
                phone: shelter.phone,
                match_score: score,
                matched_services,
                match_variant: match_variant(score),
                availability: label,
                occupancy_level: level,
                distance_mi,
            });
        }

        // Stable sort: equal scores keep collection order.
        scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        if let Some(limit) = limit {
            scored.truncate(limit);
        }

        Ok(RankResult {
            shelters: scored,
            total_candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureTag, ServiceTag};

    fn shelter(id: i64, name: &str, address: &str, services: Vec<ServiceTag>) -> Shelter {
        Shelter {
            id,
            name: name.to_string(),
            address: address.to_string(),
            latitude: None,
            longitude: None,
            capacity: 100,
            current: 70,
            services,
            tags: vec![FeatureTag::Accessible],
            rating: 4.0,
            hours: "24/7".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    #[test]
    fn test_empty_query_all_filter_returns_everything_sorted() {
        let matcher = Matcher::new();
        let shelters = vec![
            shelter(1, "Harbor House", "450 Dock St", vec![ServiceTag::Showers]),
            shelter(2, "Mission Center", "12 Hill Ave", vec![ServiceTag::Meals]),
        ];
        let prefs = Preferences {
            needs_meals: true,
            ..Default::default()
        };

        let result = matcher
            .rank(shelters, "", &ServiceFilter::All, &prefs, None, None)
            .unwrap();

        assert_eq!(result.total_candidates, 2);
        assert_eq!(result.shelters.len(), 2);
        // Mission Center matches the meals need, so it ranks first
        assert_eq!(result.shelters[0].id, 2);
        assert!(result.shelters[0].match_score >= result.shelters[1].match_score);
    }

    #[test]
    fn test_query_filters_by_name_and_address() {
        let matcher = Matcher::new();
        let shelters = vec![
            shelter(1, "Harbor House", "450 Dock St", vec![]),
            shelter(2, "Mission Center", "12 Hill Ave", vec![]),
        ];
        let prefs = Preferences::default();

        let result = matcher
            .rank(
                shelters.clone(),
                "harbor",
                &ServiceFilter::All,
                &prefs,
                None,
                None,
            )
            .unwrap();
        assert_eq!(result.shelters.len(), 1);
        assert_eq!(result.shelters[0].id, 1);

        let result = matcher
            .rank(shelters, "hill", &ServiceFilter::All, &prefs, None, None)
            .unwrap();
        assert_eq!(result.shelters.len(), 1);
        assert_eq!(result.shelters[0].id, 2);
    }

    #[test]
    fn test_service_filter_narrows_results() {
        let matcher = Matcher::new();
        let shelters = vec![
            shelter(1, "Harbor House", "450 Dock St", vec![ServiceTag::Meals]),
            shelter(2, "Mission Center", "12 Hill Ave", vec![ServiceTag::Medical]),
        ];
        let prefs = Preferences::default();

        let result = matcher
            .rank(
                shelters,
                "",
                &ServiceFilter::Only(ServiceTag::Medical),
                &prefs,
                None,
                None,
            )
            .unwrap();

        assert_eq!(result.shelters.len(), 1);
        assert_eq!(result.shelters[0].id, 2);
        // total_candidates reflects the pre-filter collection
        assert_eq!(result.total_candidates, 2);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let matcher = Matcher::new();
        // Identical shelters score identically
        let shelters = vec![
            shelter(10, "Alpha", "1 A St", vec![]),
            shelter(20, "Beta", "2 B St", vec![]),
            shelter(30, "Gamma", "3 C St", vec![]),
        ];
        let prefs = Preferences::default();

        let result = matcher
            .rank(shelters, "", &ServiceFilter::All, &prefs, None, None)
            .unwrap();

        let ids: Vec<i64> = result.shelters.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn test_limit_truncates() {
        let matcher = Matcher::new();
        let shelters: Vec<Shelter> = (0..20)
            .map(|i| shelter(i, &format!("Shelter {}", i), "Main St", vec![]))
            .collect();
        let prefs = Preferences::default();

        let result = matcher
            .rank(shelters, "", &ServiceFilter::All, &prefs, None, Some(5))
            .unwrap();

        assert_eq!(result.shelters.len(), 5);
        assert_eq!(result.total_candidates, 20);
    }

    #[test]
    fn test_distance_only_with_both_locations() {
        let matcher = Matcher::new();
        let mut near = shelter(1, "Harbor House", "450 Dock St", vec![]);
        near.latitude = Some(40.72);
        near.longitude = Some(-74.01);
        let no_coords = shelter(2, "Mission Center", "12 Hill Ave", vec![]);

        let prefs = Preferences::default();
        let result = matcher
            .rank(
                vec![near, no_coords],
                "",
                &ServiceFilter::All,
                &prefs,
                Some((40.7128, -74.0060)),
                None,
            )
            .unwrap();

        let with_coords = result.shelters.iter().find(|s| s.id == 1).unwrap();
        let without = result.shelters.iter().find(|s| s.id == 2).unwrap();
        assert!(with_coords.distance_mi.is_some());
        assert!(with_coords.distance_mi.unwrap() < 2.0);
        assert!(without.distance_mi.is_none());
    }

    #[test]
    fn test_invalid_capacity_propagates() {
        let matcher = Matcher::new();
        let mut bad = shelter(1, "Broken", "0 Null St", vec![]);
        bad.capacity = 0;

        let result = matcher.rank(
            vec![bad],
            "",
            &ServiceFilter::All,
            &Preferences::default(),
            None,
            None,
        );
        assert_eq!(result.unwrap_err(), ScoreError::InvalidCapacity);
    }
}
