//! Best and worst month selection.

use crate::aggregate::{MonthlyBucket, MonthlyData};

/// A month key paired with its bucket.
pub type RankedMonth = (String, MonthlyBucket);

/// Months ordered from highest to lowest net.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthRanking {
    /// Sorted by net descending; equal nets by ascending month key.
    pub ranked: Vec<RankedMonth>,
}

impl MonthRanking {
    /// Month with the highest net.
    pub fn best(&self) -> Option<&RankedMonth> {
        self.ranked.first()
    }

    /// Month with the lowest net.
    pub fn worst(&self) -> Option<&RankedMonth> {
        self.ranked.last()
    }
}

/// Ranks every month by net, descending.
pub fn rank_months(monthly: &MonthlyData) -> MonthRanking {
    let mut ranked: Vec<RankedMonth> = monthly
        .iter()
        .map(|(key, bucket)| (key.clone(), *bucket))
        .collect();

    ranked.sort_by(|(a_key, a), (b_key, b)| b.net.cmp(&a.net).then_with(|| a_key.cmp(b_key)));

    MonthRanking { ranked }
}
