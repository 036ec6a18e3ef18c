use std::time::Duration;

use log::info;

use crate::clock::Clock;
use crate::humanize::seconds;

/// One `report` call, with the values derived from it
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Checkpoints done so far, `i + 1`.
    pub done: usize,
    pub total: usize,
    /// Checkpoint value handed in by the caller, not used in arithmetic.
    pub step: u32,
    pub since_last: Duration,
    pub elapsed: Duration,
    /// Steps per second.
    pub throughput: f64,
    /// Remaining seconds. Negative when the caller reports past the plan.
    pub eta_secs: f64,
}

/// Emitted once when a stepper scope closes
#[derive(Clone, Debug, PartialEq)]
pub struct StepSummary {
    pub total: usize,
    pub completed: usize,
    pub elapsed: Duration,
    /// `elapsed / total`, per planned step.
    pub average: Duration,
}

/// Receives progress from a stepper
pub trait ProgressSink {
    /// Called once after the plan is known
    fn started(&mut self, total_steps: usize, description: &str);

    /// Called for every completed checkpoint
    fn update(&mut self, report: &StepReport);

    /// Called once when the scope ends
    fn finished(&mut self, summary: &StepSummary);
}

/// Writes progress through the `log` facade
#[derive(Clone, Debug, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn started(&mut self, total_steps: usize, description: &str) {
        if description.is_empty() {
            info!("Starting inference for {} steps.", total_steps);
        } else {
            info!("Starting inference for {} steps ({}).", total_steps, description);
        }
    }

    fn update(&mut self, report: &StepReport) {
        info!(
            "Done {} out of {} in {} ({}h), ETA: {}.",
            report.done,
            report.total,
            seconds(report.since_last.as_secs_f64()),
            report.step,
            seconds(report.eta_secs),
        );
    }

    fn finished(&mut self, summary: &StepSummary) {
        info!("Elapsed: {}.", seconds(summary.elapsed.as_secs_f64()));
        info!("Average: {} per step.", seconds(summary.average.as_secs_f64()));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProgressEvent {
    Started { total_steps: usize, description: String },
    Update(StepReport),
    Finished(StepSummary),
}

/// Keeps every event in memory
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<ProgressEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> impl Iterator<Item = &StepReport> {
        self.events.iter().filter_map(|e| match e {
            ProgressEvent::Update(report) => Some(report),
            _ => None,
        })
    }

    pub fn summaries(&self) -> impl Iterator<Item = &StepSummary> {
        self.events.iter().filter_map(|e| match e {
            ProgressEvent::Finished(summary) => Some(summary),
            _ => None,
        })
    }
}

impl ProgressSink for RecordingSink {
    fn started(&mut self, total_steps: usize, description: &str) {
        self.events.push(ProgressEvent::Started {
            total_steps,
            description: description.to_string(),
        });
    }

    fn update(&mut self, report: &StepReport) {
        self.events.push(ProgressEvent::Update(report.clone()));
    }

    fn finished(&mut self, summary: &StepSummary) {
        self.events.push(ProgressEvent::Finished(summary.clone()));
    }
}

/// Counters and timestamps shared by both steppers
pub struct ProgressTracker<C: Clock, S: ProgressSink> {
    pub total_steps: usize,
    pub completed: usize,
    start: Duration,
    last: Duration,
    clock: C,
    sink: S,
}

impl<C: Clock, S: ProgressSink> ProgressTracker<C, S> {
    /// Starts the clock and announces the plan size.
    pub fn new(total_steps: usize, description: &str, clock: C, mut sink: S) -> Self {
        let start = clock.now();
        sink.started(total_steps, description);
        Self {
            total_steps,
            completed: 0,
            start,
            last: start,
            clock,
            sink,
        }
    }

    /// Fraction of planned steps done, in [0, 1] under correct use.
    pub fn progress(&self) -> f32 {
        self.completed as f32 / self.total_steps as f32
    }

    pub fn report(&mut self, i: usize, step: u32) -> StepReport {
        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.start);
        let throughput = (i + 1) as f64 / elapsed.as_secs_f64();
        let eta_secs = (self.total_steps as f64 - i as f64) / throughput;

        let report = StepReport {
            done: i + 1,
            total: self.total_steps,
            step,
            since_last: now.saturating_sub(self.last),
            elapsed,
            throughput,
            eta_secs,
        };

        self.sink.update(&report);
        self.last = now;
        self.completed += 1;
        report
    }

    pub fn finish(&mut self) -> StepSummary {
        let elapsed = self.clock.now().saturating_sub(self.start);
        // total_steps > 0 is checked when the stepper is built
        let summary = StepSummary {
            total: self.total_steps,
            completed: self.completed,
            elapsed,
            average: elapsed.div_f64(self.total_steps as f64),
        };
        self.sink.finished(&summary);
        summary
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn test_report_formulas() {
        let clock = ManualClock::new();
        let mut tracker = ProgressTracker::new(4, "", clock.clone(), RecordingSink::new());

        clock.advance_secs(2.0);
        let report = tracker.report(0, 6);
        assert_eq!(report.done, 1);
        assert_eq!(report.throughput, 0.5);
        assert_eq!(report.eta_secs, 8.0);
        assert_eq!(report.since_last, Duration::from_secs(2));

        clock.advance_secs(2.0);
        let report = tracker.report(1, 12);
        assert_eq!(report.throughput, 0.5);
        assert_eq!(report.eta_secs, 6.0);
        assert_eq!(report.since_last, Duration::from_secs(2));
        assert_eq!(tracker.progress(), 0.5);
    }

    #[test]
    fn test_finish_average() {
        let clock = ManualClock::new();
        let mut tracker = ProgressTracker::new(4, "", clock.clone(), RecordingSink::new());

        clock.advance_secs(10.0);
        let summary = tracker.finish();
        assert_eq!(summary.elapsed, Duration::from_secs(10));
        assert_eq!(summary.average, Duration::from_millis(2500));
        assert_eq!(summary.completed, 0);
    }

    #[test]
    fn test_sink_sees_started_first() {
        let tracker = ProgressTracker::new(3, "72h", ManualClock::new(), RecordingSink::new());
        assert_eq!(
            tracker.sink().events,
            vec![ProgressEvent::Started { total_steps: 3, description: "72h".into() }]
        );
    }

    #[test]
    fn test_report_past_plan_gives_negative_eta() {
        let clock = ManualClock::new();
        let mut tracker = ProgressTracker::new(2, "", clock.clone(), RecordingSink::new());

        clock.advance_secs(1.0);
        let report = tracker.report(5, 30);
        assert!(report.eta_secs < 0.0);
    }
}
