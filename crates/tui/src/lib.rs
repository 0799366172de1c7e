//! TUI module for Gantry
//!
//! Provides a terminal planner for viewing and editing task assignments
//! across an academic-year timeline using ratatui and crossterm.

pub mod app;
pub mod data;
pub mod drag;
pub mod error;
pub mod event;
pub mod palette;
pub mod planner;
pub mod ui;

pub use app::App;
pub use data::{PlannerData, join_tasks, load_planner_data};
pub use drag::{DropTarget, GrabPayload, PlannerMutation, resolve_drop, start_handle_active};
pub use error::{TuiError, TuiResult};
pub use planner::{CourseWindow, PlannerTask, ProgrammerLane, SourceTask, layout_planner};
