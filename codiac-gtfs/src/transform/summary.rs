use std::fmt::Display;

/// counters for one batch run, printed at the end of the transform.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransformSummary {
    pub routes: usize,
    pub governed_routes: usize,
    pub trips_split: usize,
    pub trips_passed_through: usize,
    pub trips_excluded: usize,
    pub stops: usize,
}

impl Display for TransformSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "routes: {} ({} governed), trips split: {}, passed through: {}, excluded: {}, stops: {}",
            self.routes,
            self.governed_routes,
            self.trips_split,
            self.trips_passed_through,
            self.trips_excluded,
            self.stops
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_reports_all_counters() {
        let summary = TransformSummary {
            routes: 30,
            governed_routes: 28,
            trips_split: 120,
            trips_passed_through: 4,
            trips_excluded: 2,
            stops: 600,
        };
        assert_eq!(
            summary.to_string(),
            "routes: 30 (28 governed), trips split: 120, passed through: 4, excluded: 2, stops: 600"
        );
    }
}
