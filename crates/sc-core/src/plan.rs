use serde::Serialize;

use crate::increments::IncrementSet;

/// Greedy largest-first decomposition of one lead time.
///
/// Returns the cumulative checkpoints starting at 0. A residual smaller
/// than every remaining increment is dropped, so the last checkpoint can
/// fall short of `lead_time`.
pub fn decompose(increments: &IncrementSet, lead_time: u32) -> Vec<u32> {
    let mut checkpoints = vec![0];
    let mut remaining = lead_time;
    let mut reached = 0;

    for step in increments.largest_first() {
        while remaining > 0 && remaining >= step {
            remaining -= step;
            reached += step;
            checkpoints.push(reached);
        }
    }

    checkpoints
}

/// Checkpoints planned for a single lead time
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TargetPlan {
    pub lead_time: u32,
    pub checkpoints: Vec<u32>,
}

impl TargetPlan {
    /// Number of advances, the leading 0 excluded.
    pub fn num_steps(&self) -> usize {
        self.checkpoints.len() - 1
    }

    /// Last checkpoint reached by the decomposition.
    pub fn reached(&self) -> u32 {
        self.checkpoints.last().copied().unwrap_or(0)
    }

    /// Part of the lead time the increments could not cover.
    pub fn residual(&self) -> u32 {
        self.lead_time - self.reached()
    }

    pub fn is_exact(&self) -> bool {
        self.residual() == 0
    }

    /// Size of each advance, in order.
    pub fn increments(&self) -> impl Iterator<Item = u32> + '_ {
        self.checkpoints.windows(2).map(|w| w[1] - w[0])
    }
}

/// One advance in driving order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Global position, the `i` handed to `report`.
    pub index: usize,
    pub lead_time: u32,
    /// Checkpoint before this advance.
    pub from: u32,
    /// Checkpoint reached by this advance.
    pub checkpoint: u32,
}

impl ScheduleEntry {
    pub fn increment(&self) -> u32 {
        self.checkpoint - self.from
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Plan {
    targets: Vec<TargetPlan>,
    total_steps: usize,
}

impl Plan {
    /// Plans every lead time independently, keeping the given order.
    /// Duplicate lead times get their own entries.
    pub fn new(increments: &IncrementSet, lead_times: &[u32]) -> Self {
        let targets: Vec<TargetPlan> = lead_times
            .iter()
            .map(|&lead_time| TargetPlan {
                lead_time,
                checkpoints: decompose(increments, lead_time),
            })
            .collect();

        let total_steps = targets.iter().map(TargetPlan::num_steps).sum();

        Self { targets, total_steps }
    }

    /// Builds a plan from already computed checkpoint sequences.
    pub(crate) fn from_targets(targets: Vec<TargetPlan>) -> Self {
        let total_steps = targets.iter().map(TargetPlan::num_steps).sum();
        Self { targets, total_steps }
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn targets(&self) -> &[TargetPlan] {
        &self.targets
    }

    /// Checkpoints for `lead_time`, first entry wins on duplicates.
    pub fn get(&self, lead_time: u32) -> Option<&[u32]> {
        self.targets
            .iter()
            .find(|t| t.lead_time == lead_time)
            .map(|t| t.checkpoints.as_slice())
    }

    pub fn lead_times(&self) -> impl Iterator<Item = u32> + '_ {
        self.targets.iter().map(|t| t.lead_time)
    }

    /// Every advance across all targets, numbered globally.
    pub fn schedule(&self) -> impl Iterator<Item = ScheduleEntry> + '_ {
        self.targets
            .iter()
            .flat_map(|t| {
                t.checkpoints.windows(2).map(move |w| (t.lead_time, w[0], w[1]))
            })
            .enumerate()
            .map(|(index, (lead_time, from, checkpoint))| ScheduleEntry {
                index,
                lead_time,
                from,
                checkpoint,
            })
    }
}
