//! Core types and the meeting statistics pipeline: identities, filters, costs,
//! aggregations, rankings, formatting

pub mod colleagues;
pub mod daily;
pub mod enrich;
pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod identity;
pub mod pipeline;
pub mod ranking;
pub mod switches;
pub mod tracing;
pub mod weekday;
pub mod window;

pub use colleagues::{ColleagueMeeting, ColleagueStats, CumulativePoint};
pub use daily::{DayBucket, HeatmapPoint};
pub use error::{ConfigError, ConfigResult};
pub use event::{CalendarEvent, EventRecord, ResponseStatus};
pub use filter::{EventFilter, Rejection};
pub use format::{
    ReportFormatter, ReportOptions, ellipsis, format_cost, format_hours, format_name,
    format_percentage,
};
pub use identity::{Identity, normalize_email};
pub use pipeline::{PipelineConfig, ProcessedStats, process_events};
pub use ranking::{Bestie, ColleagueSummary, DistributionEntry};
pub use switches::ContextSwitch;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use weekday::WeekdayPattern;
pub use window::DateWindow;
