//! Domain model for the task board.
//!
//! The board domain covers the column registry, blocks and their weekly
//! schedules, tasks and recurring templates, the movement engine, the
//! recurrence expander, and read-side ordering. Nothing here performs I/O.

mod block;
mod board;
mod column;
mod config;
mod error;
mod ids;
pub mod movement;
pub mod ordering;
mod priority;
pub mod recurrence;
mod recurring;
mod snapshot;
mod task;
mod weekday;

pub use block::{Block, ScheduleEntry, WeeklySchedule};
pub use board::Board;
pub use column::{Column, ColumnRegistry};
pub use config::BoardConfig;
pub use error::{BoardDomainError, ParseDayOfWeekError, ParsePriorityError, ParseTaskKindError};
pub use ids::{BlockId, ColumnId, RecurringTaskId, TaskId};
pub use ordering::TaskQuery;
pub use priority::{DropPosition, Priority};
pub use recurrence::{expand_for_date, expand_for_month, expand_for_range, next_matching_day};
pub use recurring::{NewRecurringTask, RecurringTask, RecurringTaskPatch};
pub use snapshot::{BoardSnapshot, SNAPSHOT_VERSION};
pub use task::{NewTask, Task, TaskKind, TaskPatch};
pub use weekday::{DayOfWeek, RecurringDays};
