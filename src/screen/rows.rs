use log::warn;

use crate::icons::{IconRegistry, RowIcon};
use crate::types::{
    Category, DescriptionLine, DisplayRow, DistanceFormatter, LatLon, ResultItem, RowList,
    distance_between,
};

/// Builds the bounded, annotated row list for one search completion.
///
/// Result order is the engine's responsibility and is preserved here; the
/// builder only truncates, annotates and binds rows.
pub struct RowListBuilder<'a> {
    category: &'a Category,
    icons: &'a IconRegistry,
    formatter: &'a dyn DistanceFormatter,
    reference: Option<LatLon>,
    capacity: usize,
}

impl<'a> RowListBuilder<'a> {
    #[must_use]
    pub fn new(
        category: &'a Category,
        icons: &'a IconRegistry,
        formatter: &'a dyn DistanceFormatter,
        reference: Option<LatLon>,
        capacity: usize,
    ) -> Self {
        Self {
            category,
            icons,
            formatter,
            reference,
            capacity,
        }
    }

    /// Build rows for the leading results.
    ///
    /// One slot of the host capacity is reserved for the list widget's own
    /// "more results" affordance, so at most `capacity - 1` rows are built.
    #[must_use]
    pub fn build(&self, results: &[ResultItem]) -> RowList {
        let usable = self.capacity.saturating_sub(1);
        let truncated = results.len() > usable;

        if self.reference.is_none() && !results.is_empty() {
            warn!(
                "no reference location; '{}' rows will carry no distance badge",
                self.category.id
            );
        }

        let icon = self.icons.resolve(&self.category.icon);
        let rows = results
            .iter()
            .take(usable)
            .map(|item| self.build_row(item, icon.clone()))
            .collect();
        RowList::new(rows, truncated)
    }

    fn build_row(&self, item: &ResultItem, icon: RowIcon) -> DisplayRow {
        let distance = match (self.reference, item.location()) {
            (Some(reference), Some(location)) => Some(
                self.formatter
                    .format(distance_between(reference, location)),
            ),
            _ => None,
        };
        let description = DescriptionLine::new(item.description.as_deref(), distance);
        DisplayRow::new(item.name.clone(), icon, description, item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EMPTY_MARKER, MetricFormatter, PoiHandle};

    fn category() -> Category {
        Category::new("restaurants", "Restaurants", "restaurants")
    }

    fn poi(name: &str, description: Option<&str>, lat: f64, lon: f64, id: u64) -> ResultItem {
        ResultItem::poi(
            name,
            description.map(str::to_string),
            LatLon::new(lat, lon),
            PoiHandle::new(id),
        )
    }

    fn results(count: usize) -> Vec<ResultItem> {
        (0..count)
            .map(|i| poi(&format!("poi-{i}"), None, 52.0, 13.0 + i as f64 * 0.01, i as u64))
            .collect()
    }

    fn builder<'a>(
        category: &'a Category,
        icons: &'a IconRegistry,
        reference: Option<LatLon>,
        capacity: usize,
    ) -> RowListBuilder<'a> {
        RowListBuilder::new(category, icons, &MetricFormatter, reference, capacity)
    }

    #[test]
    fn row_count_is_results_capped_at_capacity_minus_one() {
        let category = category();
        let icons = IconRegistry::default();
        for (result_count, capacity, expected) in
            [(0, 6, 0), (2, 6, 2), (5, 6, 5), (8, 6, 5), (3, 1, 0), (1, 2, 1)]
        {
            let list = builder(&category, &icons, Some(LatLon::new(52.0, 13.0)), capacity)
                .build(&results(result_count));
            assert_eq!(
                list.len(),
                expected,
                "{result_count} results at capacity {capacity}"
            );
            assert_eq!(list.truncated(), result_count > capacity - 1);
        }
    }

    #[test]
    fn row_order_is_a_prefix_of_the_input_order() {
        let category = category();
        let icons = IconRegistry::default();
        let input = vec![
            poi("zebra", None, 52.0, 13.2, 1),
            poi("apple", None, 52.0, 13.1, 2),
            poi("mango", None, 52.0, 13.3, 3),
        ];
        let list = builder(&category, &icons, Some(LatLon::new(52.0, 13.0)), 3).build(&input);

        let titles: Vec<_> = list.rows().iter().map(|row| row.title.as_str()).collect();
        assert_eq!(titles, ["zebra", "apple"]);
    }

    #[test]
    fn descriptions_get_bullet_text_and_distance_badges() {
        let category = category();
        let icons = IconRegistry::default();
        let input = vec![
            poi("Trattoria", Some("Pasta & wine"), 52.0, 13.0176, 1),
            poi("Imbiss", None, 52.0, 12.99, 2),
        ];
        let list = builder(&category, &icons, Some(LatLon::new(52.0, 13.0)), 6).build(&input);

        let first = &list.rows()[0];
        assert_eq!(first.description.text, "• Pasta & wine");
        assert_eq!(first.description.distance.as_deref(), Some("1.2 km"));

        let second = &list.rows()[1];
        assert_eq!(second.description.text, EMPTY_MARKER);
        assert!(second.description.distance.is_some());
    }

    #[test]
    fn unknown_category_icons_fall_back_to_the_generic_icon() {
        let category = Category::new("marinas", "Marinas", "marinas");
        let icons = IconRegistry::default();
        let list = builder(&category, &icons, Some(LatLon::new(52.0, 13.0)), 6)
            .build(&results(1));
        assert_eq!(list.rows()[0].icon, RowIcon::fallback_icon());
    }

    #[test]
    fn missing_reference_builds_rows_without_badges() {
        let category = category();
        let icons = IconRegistry::default();
        let list = builder(&category, &icons, None, 6).build(&results(2));
        assert_eq!(list.len(), 2);
        assert!(list.rows().iter().all(|row| row.description.distance.is_none()));
    }
}
