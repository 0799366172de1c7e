//! Main application state and event loop.
//!
//! The app holds the loaded planner data, the course window, a grid
//! cursor, and the in-flight grab gesture. Key events either mutate local
//! view state directly or produce a pending IO action; IO actions are
//! awaited to completion and followed by a full reload before the next key
//! is processed, so a second gesture can never race an unfinished write.

use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;

use chrono::{Datelike, Local};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::prelude::*;

use gantry_db::{
    AssignmentRecord, AssignmentRepository, Database, DbResult, DesiredAssignment, Month,
    Programmer, ProgrammerRef, TaskRepository, TaskUpdate,
};

use crate::data::load_planner_data;
use crate::drag::{DropTarget, GrabPayload, PlannerMutation, resolve_drop};
use crate::error::TuiResult;
use crate::event::{
    is_assign, is_down, is_enter, is_escape, is_grab_end, is_grab_move, is_grab_start, is_left,
    is_next_year, is_prev_year, is_quit, is_refresh, is_right, is_up, poll_key,
};
use crate::planner::{
    CourseWindow, PlacedTask, ProgrammerLane, SourceTask, WINDOW_MONTHS, layout_planner,
};
use crate::ui;

/// One selectable entry in the assignment picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerChoice {
    pub task_id: String,
    pub requirement: String,
}

/// State of the assignment picker overlay: choose a task to assign to a
/// (programmer, month) cell.
#[derive(Debug, Clone)]
pub struct AssignPicker {
    pub programmer_id: String,
    pub programmer_name: String,
    pub month: Month,
    pub choices: Vec<PickerChoice>,
    pub selected: usize,
}

/// A side effect produced by a key event, applied after the event returns.
enum PendingIo {
    /// Reload all planner data from the database.
    Reload,
    /// Persist an accepted gesture.
    ApplyMutation(PlannerMutation),
    /// Assign a task to a programmer ending at a month (picker accept).
    Assign {
        task_id: String,
        programmer_id: String,
        month: Month,
    },
}

/// Main application state.
pub struct App {
    /// Database connection.
    db: Database,
    /// All programmers, in lane order.
    programmers: Vec<Programmer>,
    /// Joined tasks for layout and gesture resolution.
    tasks: Vec<SourceTask>,
    /// Raw assignment records for reconciliation.
    assignments: Vec<AssignmentRecord>,
    /// The displayed academic-year window.
    window: CourseWindow,
    /// Current calendar month, for header tinting.
    current_month: Month,
    /// Cached layout, recomputed after reloads and window changes.
    lanes: Vec<ProgrammerLane>,
    /// Grid cursor: lane row index.
    cursor_lane: usize,
    /// Grid cursor: month column index (0..12).
    cursor_month: usize,
    /// In-flight grab gesture, if any.
    grab: Option<GrabPayload>,
    /// Assignment picker overlay, if open.
    picker: Option<AssignPicker>,
    /// Transient status message shown in the footer.
    status_message: Option<String>,
    /// Whether the application is still running.
    running: bool,
}

impl App {
    /// Create a new App instance connected to the database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Optional path to the database. If `None`, uses the
    ///   default path.
    ///
    /// # Errors
    ///
    /// Returns `TuiError::Database` if the database connection fails.
    pub async fn new(db_path: Option<&Path>) -> TuiResult<Self> {
        let path = match db_path {
            Some(p) => p.to_path_buf(),
            None => Database::default_path()?,
        };

        let db = Database::connect(&path).await?;
        db.init().await?;

        let now = Local::now();
        let mut app = Self {
            db,
            programmers: Vec::new(),
            tasks: Vec::new(),
            assignments: Vec::new(),
            window: CourseWindow::current(),
            current_month: Month::from_parts(now.year(), now.month()),
            lanes: Vec::new(),
            cursor_lane: 0,
            cursor_month: 0,
            grab: None,
            picker: None,
            status_message: None,
            running: true,
        };
        app.reload().await?;
        Ok(app)
    }

    /// Reload all planner data from the database and recompute the layout.
    pub async fn reload(&mut self) -> TuiResult<()> {
        let data = load_planner_data(&self.db).await?;
        self.programmers = data.programmers;
        self.tasks = data.tasks;
        self.assignments = data.assignments;
        self.refresh_lanes();
        Ok(())
    }

    /// Recompute the cached lane layout from current data.
    fn refresh_lanes(&mut self) {
        self.lanes = layout_planner(&self.tasks, &self.programmers, &self.window);
        if !self.lanes.is_empty() && self.cursor_lane >= self.lanes.len() {
            self.cursor_lane = self.lanes.len() - 1;
        }
    }

    /// The displayed course window.
    pub fn window(&self) -> CourseWindow {
        self.window
    }

    /// The current calendar month.
    pub fn current_month(&self) -> Month {
        self.current_month
    }

    /// The laid-out programmer lanes.
    pub fn lanes(&self) -> &[ProgrammerLane] {
        &self.lanes
    }

    /// The grid cursor as (lane row, month column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_lane, self.cursor_month)
    }

    /// The task grabbed by the in-flight gesture, if any.
    pub fn grabbed_task_id(&self) -> Option<&str> {
        self.grab.as_ref().map(|g| g.task_id())
    }

    /// Whether a grab gesture is in flight.
    pub fn grab_active(&self) -> bool {
        self.grab.is_some()
    }

    /// The open assignment picker, if any.
    pub fn picker(&self) -> Option<&AssignPicker> {
        self.picker.as_ref()
    }

    /// The transient footer message, if any.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Check if the application is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// The raw assignment records of one task, from the last load.
    ///
    /// Mutations diff against these; the reload after every accepted
    /// gesture keeps them in step with the store.
    fn existing_for(&self, task_id: &str) -> Vec<AssignmentRecord> {
        self.assignments
            .iter()
            .filter(|record| record.task_id == task_id)
            .cloned()
            .collect()
    }

    /// The pill under the grid cursor, topmost track first.
    fn pill_under_cursor(&self) -> Option<&PlacedTask> {
        self.lanes
            .get(self.cursor_lane)?
            .tracks
            .iter()
            .flatten()
            .find(|placed| placed.covers(self.cursor_month))
    }

    fn move_cursor_down(&mut self) {
        if !self.lanes.is_empty() && self.cursor_lane < self.lanes.len() - 1 {
            self.cursor_lane += 1;
        }
    }

    fn move_cursor_up(&mut self) {
        if self.cursor_lane > 0 {
            self.cursor_lane -= 1;
        }
    }

    fn move_cursor_left(&mut self) {
        if self.cursor_month > 0 {
            self.cursor_month -= 1;
        }
    }

    fn move_cursor_right(&mut self) {
        if self.cursor_month < WINDOW_MONTHS - 1 {
            self.cursor_month += 1;
        }
    }

    /// Page the course window and relayout.
    fn change_course(&mut self, forward: bool) {
        self.window = if forward {
            self.window.next()
        } else {
            self.window.prev()
        };
        self.grab = None;
        self.refresh_lanes();
    }

    /// Begin a grab gesture on the pill under the cursor.
    ///
    /// Start-handle grabs are refused when the task's real start is
    /// off-screen; everything else grabs silently.
    fn begin_grab(&mut self, kind: fn(String, &ProgrammerLane) -> Option<GrabPayload>) {
        let Some(lane) = self.lanes.get(self.cursor_lane) else {
            return;
        };
        let Some(placed) = self.pill_under_cursor() else {
            return;
        };
        if let Some(payload) = kind(placed.task.id.clone(), lane) {
            self.grab = Some(payload);
            self.status_message = None;
        }
    }

    /// Open the assignment picker for the cursor cell.
    fn open_picker(&mut self) {
        let Some(lane) = self.lanes.get(self.cursor_lane) else {
            return;
        };
        let programmer_id = lane.programmer_id.clone();
        let choices: Vec<PickerChoice> = self
            .tasks
            .iter()
            .filter(|task| {
                !task
                    .assignees
                    .iter()
                    .any(|a| a.programmer_id == programmer_id)
            })
            .map(|task| PickerChoice {
                task_id: task.id.clone(),
                requirement: task.requirement.clone(),
            })
            .collect();

        if choices.is_empty() {
            self.status_message = Some(format!("No tasks left to assign to {}", lane.name));
            return;
        }

        self.picker = Some(AssignPicker {
            programmer_id,
            programmer_name: lane.name.clone(),
            month: self.window.month_at(self.cursor_month),
            choices,
            selected: 0,
        });
    }

    /// Handle a keyboard event, returning any IO to run afterwards.
    fn handle_key(&mut self, key: &crossterm::event::KeyEvent) -> Option<PendingIo> {
        if is_quit(key) {
            self.quit();
            return None;
        }

        if self.picker.is_some() {
            return self.handle_picker_key(key);
        }

        if self.grab.is_some() {
            return self.handle_grab_key(key);
        }

        if is_down(key) {
            self.move_cursor_down();
        } else if is_up(key) {
            self.move_cursor_up();
        } else if is_left(key) {
            self.move_cursor_left();
        } else if is_right(key) {
            self.move_cursor_right();
        } else if is_prev_year(key) {
            self.change_course(false);
        } else if is_next_year(key) {
            self.change_course(true);
        } else if is_refresh(key) {
            return Some(PendingIo::Reload);
        } else if is_grab_move(key) {
            self.begin_grab(|task_id, lane| {
                Some(GrabPayload::Move {
                    task_id,
                    source_programmer: lane.name.clone(),
                })
            });
        } else if is_grab_start(key) {
            // The start handle is only interactive when the true start is
            // inside the window.
            if self.pill_under_cursor().is_some_and(|p| p.start_resizable) {
                self.begin_grab(|task_id, _| Some(GrabPayload::ResizeStart { task_id }));
            }
        } else if is_grab_end(key) {
            self.begin_grab(|task_id, _| Some(GrabPayload::ResizeEnd { task_id }));
        } else if is_assign(key) {
            self.open_picker();
        }

        None
    }

    /// Handle a key while a grab gesture is in flight.
    fn handle_grab_key(&mut self, key: &crossterm::event::KeyEvent) -> Option<PendingIo> {
        if is_escape(key) {
            self.grab = None;
            return None;
        }
        if is_down(key) {
            self.move_cursor_down();
        } else if is_up(key) {
            self.move_cursor_up();
        } else if is_left(key) {
            self.move_cursor_left();
        } else if is_right(key) {
            self.move_cursor_right();
        } else if is_enter(key) {
            let payload = self.grab.take()?;
            let lane = self.lanes.get(self.cursor_lane)?;
            let target = DropTarget {
                programmer_name: lane.name.clone(),
                month: self.window.month_at(self.cursor_month),
            };
            // Rejected or stale drops resolve to None and change nothing.
            let mutation = resolve_drop(&payload, &target, &self.tasks, &self.programmers)?;
            return Some(PendingIo::ApplyMutation(mutation));
        }
        None
    }

    /// Handle a key while the assignment picker is open.
    fn handle_picker_key(&mut self, key: &crossterm::event::KeyEvent) -> Option<PendingIo> {
        if is_escape(key) {
            self.picker = None;
            return None;
        }
        let picker = self.picker.as_mut()?;
        if is_down(key) {
            if picker.selected + 1 < picker.choices.len() {
                picker.selected += 1;
            }
        } else if is_up(key) {
            picker.selected = picker.selected.saturating_sub(1);
        } else if is_enter(key) {
            let choice = picker.choices.get(picker.selected)?.clone();
            let io = PendingIo::Assign {
                task_id: choice.task_id,
                programmer_id: picker.programmer_id.clone(),
                month: picker.month,
            };
            self.picker = None;
            return Some(io);
        }
        None
    }

    /// Run a pending IO action, then reload and report the outcome.
    ///
    /// Persistence failures are caught here: they surface as a footer
    /// message and the local state is left for the next reload to fix,
    /// never rolled back piecemeal.
    async fn run_io(&mut self, io: PendingIo) {
        let outcome = match io {
            PendingIo::Reload => Ok("Data refreshed"),
            PendingIo::ApplyMutation(mutation) => self.apply_mutation(&mutation).await,
            PendingIo::Assign {
                task_id,
                programmer_id,
                month,
            } => self.apply_assign(&task_id, &programmer_id, month).await,
        };

        match outcome {
            Ok(message) => match self.reload().await {
                Ok(()) => self.status_message = Some(message.to_string()),
                Err(err) => self.status_message = Some(format!("Refresh failed: {err}")),
            },
            Err(err) => {
                self.status_message = Some(format!("Update failed: {}", err.full_message()));
            }
        }
    }

    /// Persist an accepted gesture mutation.
    async fn apply_mutation(&self, mutation: &PlannerMutation) -> DbResult<&'static str> {
        let assignments = AssignmentRepository::new(self.db.client());
        let tasks = TaskRepository::new(self.db.client());

        match mutation {
            PlannerMutation::Move {
                task_id,
                old_programmer,
                new_programmer_id,
                month,
                set_start,
            } => {
                let existing = self.existing_for(task_id);
                let lane_changed = old_programmer.key() != Some(new_programmer_id.as_str());
                let mut desired: Vec<DesiredAssignment> = existing
                    .iter()
                    .filter(|record| {
                        let is_old = match old_programmer {
                            ProgrammerRef::Id(key) => record.programmer_id == *key,
                            ProgrammerRef::Unassigned => false,
                        };
                        !(lane_changed && is_old) && record.programmer_id != *new_programmer_id
                    })
                    .map(|record| {
                        DesiredAssignment::to_programmer(
                            record.programmer_id.clone(),
                            record.end_month.clone(),
                        )
                    })
                    .collect();
                desired.push(DesiredAssignment::to_programmer(
                    new_programmer_id.clone(),
                    month.key(),
                ));
                assignments.reconcile(task_id, &desired, &existing).await?;

                if let Some(start) = set_start {
                    tasks
                        .update(task_id, &TaskUpdate::new().with_start_month(start.key()))
                        .await?;
                }
                Ok("Task moved")
            }
            PlannerMutation::ResizeStart { task_id, month } => {
                tasks
                    .update(task_id, &TaskUpdate::new().with_start_month(month.key()))
                    .await?;
                Ok("Start month updated")
            }
            PlannerMutation::ResizeEnd { task_id, month } => {
                // The new end applies uniformly to every assignee.
                let existing = self.existing_for(task_id);
                let desired: Vec<DesiredAssignment> = existing
                    .iter()
                    .map(|record| {
                        DesiredAssignment::to_programmer(record.programmer_id.clone(), month.key())
                    })
                    .collect();
                assignments.reconcile(task_id, &desired, &existing).await?;
                Ok("End month updated")
            }
        }
    }

    /// Persist an assignment-picker accept.
    async fn apply_assign(
        &self,
        task_id: &str,
        programmer_id: &str,
        month: Month,
    ) -> DbResult<&'static str> {
        let assignments = AssignmentRepository::new(self.db.client());

        let existing = self.existing_for(task_id);
        let mut desired: Vec<DesiredAssignment> = existing
            .iter()
            .filter(|record| record.programmer_id != programmer_id)
            .map(|record| {
                DesiredAssignment::to_programmer(
                    record.programmer_id.clone(),
                    record.end_month.clone(),
                )
            })
            .collect();
        desired.push(DesiredAssignment::to_programmer(
            programmer_id.to_string(),
            month.key(),
        ));
        assignments.reconcile(task_id, &desired, &existing).await?;

        // Give the task a start when it never had one.
        let task = self.tasks.iter().find(|t| t.id == task_id);
        if task.is_some_and(|t| t.start_month.is_none()) {
            TaskRepository::new(self.db.client())
                .update(task_id, &TaskUpdate::new().with_start_month(month.key()))
                .await?;
        }
        Ok("Task assigned")
    }

    /// Run the main application loop.
    ///
    /// This initializes the terminal, runs the event loop, and ensures
    /// the terminal is restored on exit (even on panic).
    pub async fn run(&mut self) -> TuiResult<()> {
        let mut terminal = init_terminal()?;

        let _guard = scopeguard::guard((), |()| {
            let _ = restore_terminal();
        });

        let result = self.event_loop(&mut terminal).await;

        drop(_guard);

        result
    }

    /// The main event loop.
    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> TuiResult<()> {
        while self.running {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if let Some(key) = poll_key(Duration::from_millis(100))?
                && let Some(io) = self.handle_key(&key)
            {
                self.run_io(io).await;
            }
        }
        Ok(())
    }
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> TuiResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
