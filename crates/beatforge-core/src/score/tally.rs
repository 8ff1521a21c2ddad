use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::hit_object::HitResultType;
use crate::score::Grade;

/// Per-judgement counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitCounts {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub bad: u32,
    pub miss: u32,
}

impl HitCounts {
    pub fn get(&self, result_type: HitResultType) -> u32 {
        match result_type {
            HitResultType::Perfect => self.perfect,
            HitResultType::Great => self.great,
            HitResultType::Good => self.good,
            HitResultType::Bad => self.bad,
            HitResultType::Miss => self.miss,
        }
    }

    fn slot_mut(&mut self, result_type: HitResultType) -> &mut u32 {
        match result_type {
            HitResultType::Perfect => &mut self.perfect,
            HitResultType::Great => &mut self.great,
            HitResultType::Good => &mut self.good,
            HitResultType::Bad => &mut self.bad,
            HitResultType::Miss => &mut self.miss,
        }
    }

    pub fn increment(&mut self, result_type: HitResultType) {
        *self.slot_mut(result_type) += 1;
    }

    pub fn total(&self) -> u32 {
        self.iter().map(|(_, count)| count).sum()
    }

    /// Sum of accuracy weights over every judgement
    pub fn weighted_sum(&self) -> f64 {
        self.iter()
            .map(|(kind, count)| kind.accuracy() * count as f64)
            .sum()
    }

    /// Counters from worst to best judgement
    pub fn iter(&self) -> impl Iterator<Item = (HitResultType, u32)> + '_ {
        HitResultType::iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Running score of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub points: u32,
    pub current_combo: u32,
    pub max_combo: u32,
    pub hit_counts: HitCounts,
    pub total_hits: u32,
    pub total_possible_hits: u32,
}

impl Score {
    pub fn new(total_possible_hits: u32) -> Self {
        Self {
            points: 0,
            current_combo: 0,
            max_combo: 0,
            hit_counts: HitCounts::default(),
            total_hits: 0,
            total_possible_hits,
        }
    }

    /// Fold one judgement into the score. A miss breaks the combo;
    /// anything else extends it.
    pub fn add_result(&mut self, result_type: HitResultType, points: u32) {
        self.points += points;
        self.hit_counts.increment(result_type);

        if result_type == HitResultType::Miss {
            self.current_combo = 0;
        } else {
            self.current_combo += 1;
            self.max_combo = self.max_combo.max(self.current_combo);
        }

        self.total_hits += 1;
    }

    /// Weighted judgement average in [0, 1]; 0 before the first judgement
    pub fn accuracy(&self) -> f64 {
        if self.total_hits == 0 {
            return 0.0;
        }
        self.hit_counts.weighted_sum() / self.total_hits as f64
    }

    /// Share of judgements that were PERFECT
    pub fn perfect_ratio(&self) -> f64 {
        if self.total_hits == 0 {
            return 0.0;
        }
        self.hit_counts.perfect as f64 / self.total_hits as f64
    }

    pub fn calculate_grade(&self) -> Grade {
        Grade::from_accuracy(self.accuracy(), self.perfect_ratio(), self.hit_counts.miss)
    }

    /// Share of the beatmap's objects judged so far
    pub fn completion_rate(&self) -> f64 {
        if self.total_possible_hits == 0 {
            return 0.0;
        }
        self.total_hits as f64 / self.total_possible_hits as f64
    }

    /// No misses across a fully judged beatmap
    pub fn is_full_combo(&self) -> bool {
        self.total_hits == self.total_possible_hits && self.hit_counts.miss == 0
    }
}
