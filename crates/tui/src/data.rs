//! Data loading for the TUI.
//!
//! Fetches tasks, assignments, and programmers from the database and joins
//! them into the view models the planner layout consumes.

use std::collections::HashMap;

use gantry_db::{
    AssignmentRecord, AssignmentRepository, Database, Programmer, ProgrammerRepository, Task,
    TaskRepository,
};

use crate::error::TuiResult;
use crate::planner::{Assignee, SourceTask};

/// Everything the planner view needs, loaded in one pass.
///
/// `tasks` is the joined projection for layout and gesture resolution;
/// `assignments` keeps the raw records so reconciliation can diff against
/// persisted state.
#[derive(Debug, Clone, Default)]
pub struct PlannerData {
    pub programmers: Vec<Programmer>,
    pub tasks: Vec<SourceTask>,
    pub assignments: Vec<AssignmentRecord>,
}

/// Load and join all planner data from the database.
pub async fn load_planner_data(db: &Database) -> TuiResult<PlannerData> {
    let programmers = ProgrammerRepository::new(db.client()).list().await?;
    let task_rows = TaskRepository::new(db.client()).list().await?;
    let assignments = AssignmentRepository::new(db.client()).list().await?;

    let tasks = join_tasks(&task_rows, &assignments, &programmers);

    Ok(PlannerData {
        programmers,
        tasks,
        assignments,
    })
}

/// Join raw task and assignment rows into planner view models.
///
/// Assignments pointing at unknown programmers are dropped from the join;
/// tasks that were never persisted (no record id) are skipped.
pub fn join_tasks(
    tasks: &[Task],
    assignments: &[AssignmentRecord],
    programmers: &[Programmer],
) -> Vec<SourceTask> {
    let names_by_key: HashMap<String, &str> = programmers
        .iter()
        .filter_map(|p| Some((p.record_key()?, p.name.as_str())))
        .collect();

    let mut assignees_by_task: HashMap<&str, Vec<Assignee>> = HashMap::new();
    for record in assignments {
        let Some(name) = names_by_key.get(record.programmer_id.as_str()) else {
            continue;
        };
        assignees_by_task
            .entry(record.task_id.as_str())
            .or_default()
            .push(Assignee {
                programmer_id: record.programmer_id.clone(),
                programmer_name: name.to_string(),
                end_month: record.end_month.clone(),
            });
    }

    tasks
        .iter()
        .filter_map(|task| {
            let id = task.record_key()?;
            let assignees = assignees_by_task.remove(id.as_str()).unwrap_or_default();
            Some(SourceTask {
                id,
                requirement: task.requirement.clone(),
                module: task.module.clone(),
                status: task.status.clone(),
                start_month: task.start_month.clone(),
                assignees,
            })
        })
        .collect()
}
