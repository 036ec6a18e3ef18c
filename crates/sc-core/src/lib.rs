//! Lead-time planning and progress accounting for stepped forecast models.
//!
//! A forecast model can only advance by a fixed set of increments. The
//! steppers here turn the requested lead times into checkpoint sequences,
//! then track how far the driving loop has got and how long the rest
//! should take.

pub mod clock;
pub mod config;
pub mod error;
pub mod humanize;
pub mod increments;
pub mod multi;
pub mod plan;
pub mod progress;
pub mod single;
pub mod stepper;


pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AnyStepper, StepperConfig};
pub use error::{Error, Result};
pub use increments::IncrementSet;
pub use multi::MultiStepper;
pub use plan::{Plan, ScheduleEntry, TargetPlan, decompose};
pub use progress::{LogSink, ProgressEvent, ProgressSink, RecordingSink, StepReport, StepSummary};
pub use single::SingleStepper;
pub use stepper::{Stepper, StepperScope, scoped};
