use std::collections::HashMap;

use eclipse_model::{BuildTree, EclipseTask, ProjectId};

/// Snapshot of the tasks each project exposes to the IDE.
///
/// Collected before the model is populated so tasks registered while building the model do not
/// show up in it.
#[derive(Debug, Default)]
pub struct TasksFactory {
    include_tasks: bool,
    tasks: HashMap<ProjectId, Vec<EclipseTask>>,
}

impl TasksFactory {
    pub fn new(include_tasks: bool) -> Self {
        Self {
            include_tasks,
            tasks: HashMap::new(),
        }
    }

    /// Record the tasks of `root` and all projects below it.
    pub fn collect_tasks(&mut self, tree: &BuildTree, root: ProjectId) {
        if !self.include_tasks {
            return;
        }
        for id in tree.all_projects_under(root) {
            let tasks = tree
                .project(id)
                .tasks
                .iter()
                .map(|task| EclipseTask {
                    path: task.path.clone(),
                    name: task.name.clone(),
                    description: task.description.clone(),
                })
                .collect();
            self.tasks.insert(id, tasks);
        }
    }

    pub fn tasks(&self, project: ProjectId) -> Vec<EclipseTask> {
        self.tasks.get(&project).cloned().unwrap_or_default()
    }
}
