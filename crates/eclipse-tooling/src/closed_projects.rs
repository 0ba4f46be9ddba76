use std::collections::BTreeSet;
use std::sync::Arc;

use eclipse_classpath::{gather_classpath, ClasspathResolver, ResolveRequest};
use eclipse_config::ClosedProjectsConfig;
use eclipse_model::{BuildDependencies, BuildTree, EclipseRuntime, ProjectId, WorkspaceProjects};
use indexmap::IndexSet;

use crate::names::deduplicate_project_names;
use crate::{
    Result, ToolingModel, ToolingModelBuilder, RUN_CLOSED_PROJECT_BUILD_DEPENDENCIES_MODEL,
};

/// Gets the artifacts of closed workspace projects built as part of the current invocation.
///
/// Projects depending on a closed project consume its published artifact instead of its sources,
/// so the tasks producing those artifacts are attached to one placeholder task on the root
/// project, and that task is appended to the requested task names.
pub struct RunBuildDependenciesTaskBuilder {
    config: ClosedProjectsConfig,
    resolver: Arc<dyn ClasspathResolver>,
}

impl RunBuildDependenciesTaskBuilder {
    pub fn new(config: ClosedProjectsConfig, resolver: Arc<dyn ClasspathResolver>) -> Self {
        Self { config, resolver }
    }

    /// Identity paths of build projects whose IDE name is a closed workspace project.
    ///
    /// Names are compared after deduplication for the build of `project`, as the IDE knows them.
    fn closed_project_paths(
        &self,
        tree: &mut BuildTree,
        project: ProjectId,
        parameter: Option<&EclipseRuntime>,
        workspace: &WorkspaceProjects,
    ) -> BTreeSet<String> {
        let all: Vec<ProjectId> = tree.all_projects().collect();
        for id in &all {
            tree.apply_eclipse(*id);
        }
        let build = tree.project(tree.root_project_of(project)).build();
        deduplicate_project_names(tree, build, parameter);

        let closed_names = workspace.closed_names();
        all.into_iter()
            .filter(|id| {
                tree.eclipse_name(*id).is_some_and(|name| closed_names.contains(name))
            })
            .map(|id| tree.project(id).identity_path.clone())
            .collect()
    }

    /// Build dependencies of every artifact of a closed project consumed anywhere in the tree.
    fn closed_project_build_dependencies(
        &self,
        tree: &BuildTree,
        closed_paths: &BTreeSet<String>,
        workspace: &WorkspaceProjects,
    ) -> Result<IndexSet<BuildDependencies>> {
        let request = ResolveRequest {
            project_dependencies_only: true,
            only_projects: Some(closed_paths),
        };

        let mut closure = IndexSet::new();
        for id in tree.all_projects() {
            let entries = self.resolver.resolve(tree, id, &request)?;
            let gathered = gather_classpath(&entries, workspace);
            closure.extend(
                gathered
                    .build_dependencies
                    .into_iter()
                    .filter(|dependencies| !dependencies.is_empty()),
            );
        }
        Ok(closure)
    }
}

impl ToolingModelBuilder for RunBuildDependenciesTaskBuilder {
    fn can_build(&self, model_name: &str) -> bool {
        model_name == RUN_CLOSED_PROJECT_BUILD_DEPENDENCIES_MODEL
    }

    fn build_all(
        &self,
        _model_name: &str,
        parameter: Option<&EclipseRuntime>,
        tree: &mut BuildTree,
        project: ProjectId,
    ) -> Result<ToolingModel> {
        let Some(runtime) = parameter else {
            return Ok(ToolingModel::ClosedProjectBuildDependencies { task_name: None });
        };

        let workspace = WorkspaceProjects::new(Some(runtime));
        let closed_paths = self.closed_project_paths(tree, project, parameter, &workspace);
        if closed_paths.is_empty() {
            return Ok(ToolingModel::ClosedProjectBuildDependencies { task_name: None });
        }

        let closure = self.closed_project_build_dependencies(tree, &closed_paths, &workspace)?;
        if closure.is_empty() {
            tracing::debug!(
                target = "eclipse.tooling",
                closed = closed_paths.len(),
                "closed projects need no build work"
            );
            return Ok(ToolingModel::ClosedProjectBuildDependencies { task_name: None });
        }

        let root = tree.root_project_of(project);
        let task_name = placeholder_task_name(tree, root, &self.config.task_name);
        let task_path = tree
            .register_task(root, task_name.clone(), closure.into_iter().collect())
            .path
            .clone();
        tree.start_parameter.task_names.push(task_name.clone());

        tracing::info!(
            target = "eclipse.tooling",
            task = %task_path,
            closed = closed_paths.len(),
            "scheduled build of closed project artifacts"
        );
        Ok(ToolingModel::ClosedProjectBuildDependencies {
            task_name: Some(task_name),
        })
    }
}

/// `base`, with `_` appended until `project` has no task of that name.
fn placeholder_task_name(tree: &BuildTree, project: ProjectId, base: &str) -> String {
    let mut name = base.to_string();
    while tree.project(project).find_task(&name).is_some() {
        name.push('_');
    }
    name
}
