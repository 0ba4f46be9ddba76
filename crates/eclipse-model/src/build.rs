//! Request-scoped view of the build tree.
//!
//! The dependency engine and plugin machinery live elsewhere; by the time a model request is
//! served, everything they produced has been captured here. Projects and builds are stored in
//! arenas and refer to each other by index, so parent links never own their target.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{EclipseModel, JdkInstallation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildTreeError {
    #[error("no project with path `{0}`")]
    UnknownProject(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectId(usize);

impl ProjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildId(usize);

impl BuildId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identifies a project across the root build and included builds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectComponentId {
    /// Path unique across the whole tree, e.g. `:included:lib`.
    pub identity_path: String,
    /// Path within the owning build, e.g. `:lib`.
    pub project_path: String,
    pub project_name: String,
}

/// Opaque handle on the tasks producing an artifact.
///
/// Task paths are kept in the order the dependency engine reported them. That order carries no
/// guarantee when several tasks produce the same artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BuildDependencies {
    tasks: Vec<String>,
}

impl BuildDependencies {
    pub fn new<I, S>(tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tasks: tasks.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub path: String,
    pub description: Option<String>,
    pub depends_on: Vec<BuildDependencies>,
}

/// Tasks requested for the current build invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartParameter {
    pub task_names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Build {
    parent: Option<BuildId>,
    root_project: ProjectId,
    included_builds: Vec<BuildId>,
}

impl Build {
    pub fn parent(&self) -> Option<BuildId> {
        self.parent
    }

    pub fn root_project(&self) -> ProjectId {
        self.root_project
    }

    pub fn included_builds(&self) -> &[BuildId] {
        &self.included_builds
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    /// Path within the owning build.
    pub path: String,
    pub identity_path: String,
    pub project_dir: PathBuf,
    build: BuildId,
    parent: Option<ProjectId>,
    children: Vec<ProjectId>,
    pub tasks: Vec<Task>,
    /// IDE configuration; `None` until the IDE integration has been applied to the project.
    pub eclipse: Option<EclipseModel>,
}

impl Project {
    pub fn build(&self) -> BuildId {
        self.build
    }

    pub fn parent(&self) -> Option<ProjectId> {
        self.parent
    }

    pub fn children(&self) -> &[ProjectId] {
        &self.children
    }

    pub fn component_id(&self) -> ProjectComponentId {
        ProjectComponentId {
            identity_path: self.identity_path.clone(),
            project_path: self.path.clone(),
            project_name: self.name.clone(),
        }
    }

    pub fn find_task(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.name == name)
    }

    fn task_path(&self, name: &str) -> String {
        child_path(&self.path, name)
    }
}

#[derive(Debug, Clone)]
pub struct BuildTree {
    builds: Vec<Build>,
    projects: Vec<Project>,
    pub start_parameter: StartParameter,
    pub jdk: Option<JdkInstallation>,
}

impl BuildTree {
    pub fn builder(root_name: impl Into<String>, root_dir: impl Into<PathBuf>) -> BuildTreeBuilder {
        BuildTreeBuilder::new(root_name, root_dir)
    }

    pub fn root_build(&self) -> BuildId {
        BuildId(0)
    }

    pub fn build(&self, id: BuildId) -> &Build {
        &self.builds[id.0]
    }

    pub fn project(&self, id: ProjectId) -> &Project {
        &self.projects[id.0]
    }

    pub fn project_mut(&mut self, id: ProjectId) -> &mut Project {
        &mut self.projects[id.0]
    }

    /// Every project of every build, in registration order.
    pub fn all_projects(&self) -> impl Iterator<Item = ProjectId> + '_ {
        (0..self.projects.len()).map(ProjectId)
    }

    pub fn find_by_path(&self, build: BuildId, path: &str) -> Option<ProjectId> {
        self.all_projects().find(|id| {
            let project = self.project(*id);
            project.build == build && project.path == path
        })
    }

    pub fn find_by_identity_path(&self, identity_path: &str) -> Option<ProjectId> {
        self.all_projects()
            .find(|id| self.project(*id).identity_path == identity_path)
    }

    pub fn project_by_path(&self, build: BuildId, path: &str) -> Result<ProjectId, BuildTreeError> {
        self.find_by_path(build, path)
            .ok_or_else(|| BuildTreeError::UnknownProject(path.to_string()))
    }

    /// `project` followed by all of its descendants, depth first.
    pub fn all_projects_under(&self, project: ProjectId) -> Vec<ProjectId> {
        let mut out = Vec::new();
        let mut stack = vec![project];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.project(id).children.iter().rev().copied());
        }
        out
    }

    /// Projects of `build` and, recursively, of the builds it includes.
    pub fn collect_all_projects(&self, build: BuildId) -> Vec<ProjectId> {
        let mut out = self.all_projects_under(self.build(build).root_project);
        for included in &self.build(build).included_builds {
            out.extend(self.collect_all_projects(*included));
        }
        out
    }

    /// The build whose workspace a model request for `build` belongs to.
    pub fn root_build_of(&self, build: BuildId) -> BuildId {
        self.build(build).parent.unwrap_or(build)
    }

    pub fn root_project_of(&self, project: ProjectId) -> ProjectId {
        self.build(self.project(project).build).root_project
    }

    pub fn eclipse_name(&self, project: ProjectId) -> Option<&str> {
        self.project(project)
            .eclipse
            .as_ref()
            .map(|model| model.project.name.as_str())
    }

    /// Attach default IDE configuration to `project` unless it already has one.
    pub fn apply_eclipse(&mut self, project: ProjectId) {
        let project = self.project_mut(project);
        if project.eclipse.is_none() {
            project.eclipse = Some(EclipseModel::named(project.name.clone()));
        }
    }

    pub fn register_task(
        &mut self,
        project: ProjectId,
        name: impl Into<String>,
        depends_on: Vec<BuildDependencies>,
    ) -> &Task {
        let project = self.project_mut(project);
        let name = name.into();
        let path = project.task_path(&name);
        project.tasks.push(Task {
            name,
            path,
            description: None,
            depends_on,
        });
        let index = project.tasks.len() - 1;
        &project.tasks[index]
    }
}

/// Incremental construction of a [`BuildTree`].
#[derive(Debug)]
pub struct BuildTreeBuilder {
    tree: BuildTree,
}

impl BuildTreeBuilder {
    pub fn new(root_name: impl Into<String>, root_dir: impl Into<PathBuf>) -> Self {
        let mut tree = BuildTree {
            builds: Vec::new(),
            projects: Vec::new(),
            start_parameter: StartParameter::default(),
            jdk: None,
        };
        let root_name = root_name.into();
        push_build(&mut tree, root_name, None, root_dir.into(), ":".to_string());
        Self { tree }
    }

    pub fn root_project(&self) -> ProjectId {
        self.tree.build(self.tree.root_build()).root_project
    }

    pub fn root_build(&self) -> BuildId {
        self.tree.root_build()
    }

    /// Add `name` as a child of `parent` in the same build.
    pub fn project(
        &mut self,
        parent: ProjectId,
        name: impl Into<String>,
        dir: impl Into<PathBuf>,
    ) -> ProjectId {
        let name = name.into();
        let parent_project = self.tree.project(parent);
        let path = child_path(&parent_project.path, &name);
        let identity_path = child_path(&parent_project.identity_path, &name);
        let build = parent_project.build;

        let id = ProjectId(self.tree.projects.len());
        self.tree.projects.push(Project {
            name,
            path,
            identity_path,
            project_dir: dir.into(),
            build,
            parent: Some(parent),
            children: Vec::new(),
            tasks: Vec::new(),
            eclipse: None,
        });
        self.tree.projects[parent.0].children.push(id);
        id
    }

    /// Include a build named `name` into `parent`. Returns the included build's root project.
    pub fn include_build(
        &mut self,
        parent: BuildId,
        name: impl Into<String>,
        root_dir: impl Into<PathBuf>,
    ) -> ProjectId {
        let name = name.into();
        let parent_root = self.tree.build(parent).root_project;
        let identity_path = child_path(&self.tree.project(parent_root).identity_path, &name);
        let build = push_build(
            &mut self.tree,
            name,
            Some(parent),
            root_dir.into(),
            identity_path,
        );
        self.tree.builds[parent.0].included_builds.push(build);
        self.tree.build(build).root_project
    }

    pub fn eclipse(&mut self, project: ProjectId, model: EclipseModel) -> &mut Self {
        self.tree.project_mut(project).eclipse = Some(model);
        self
    }

    pub fn task(
        &mut self,
        project: ProjectId,
        name: impl Into<String>,
        description: Option<&str>,
    ) -> &mut Self {
        self.tree.register_task(project, name, Vec::new());
        if let Some(task) = self.tree.project_mut(project).tasks.last_mut() {
            task.description = description.map(str::to_string);
        }
        self
    }

    pub fn requested_tasks<I, S>(&mut self, tasks: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tree.start_parameter.task_names = tasks.into_iter().map(Into::into).collect();
        self
    }

    pub fn jdk(&mut self, jdk: JdkInstallation) -> &mut Self {
        self.tree.jdk = Some(jdk);
        self
    }

    pub fn build(self) -> BuildTree {
        self.tree
    }
}

fn push_build(
    tree: &mut BuildTree,
    name: String,
    parent: Option<BuildId>,
    root_dir: PathBuf,
    identity_path: String,
) -> BuildId {
    let build = BuildId(tree.builds.len());
    let root_project = ProjectId(tree.projects.len());
    tree.projects.push(Project {
        name,
        path: ":".to_string(),
        identity_path,
        project_dir: root_dir,
        build,
        parent: None,
        children: Vec::new(),
        tasks: Vec::new(),
        eclipse: None,
    });
    tree.builds.push(Build {
        parent,
        root_project,
        included_builds: Vec::new(),
    });
    build
}

fn child_path(parent: &str, name: &str) -> String {
    if parent == ":" {
        format!(":{name}")
    } else {
        format!("{parent}:{name}")
    }
}

impl BuildTree {
    /// Whether `location` is the directory of a project in the tree `build` belongs to: the
    /// build's parent (or the build itself) and everything that includes, recursively.
    pub fn owns_location(&self, build: BuildId, location: &Path) -> bool {
        let location = absolute(location);
        self.collect_all_projects(self.root_build_of(build))
            .into_iter()
            .any(|id| absolute(&self.project(id).project_dir) == location)
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
