use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::model::Area;

/// Filter the registered-areas list by a fuzzy name query, best match
/// first. An empty query keeps the storage order.
pub(super) fn filter_areas<'a>(areas: &'a [Area], query: &str) -> Vec<&'a Area> {
    let q = query.trim();
    if q.is_empty() {
        return areas.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    let mut out: Vec<(&Area, i64)> = areas
        .iter()
        .filter_map(|a| matcher.fuzzy_match(&a.name, q).map(|score| (a, score)))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(&b.0.name)));
    out.into_iter().map(|(a, _)| a).collect()
}
