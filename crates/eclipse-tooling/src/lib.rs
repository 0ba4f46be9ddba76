//! Tooling model builders for the Eclipse IDE integration.
//!
//! IDE clients request models by name. Each name is served by a [`ToolingModelBuilder`]; the
//! [`ToolingModelBuilderRegistry`] picks the builder for a request:
//!
//! - [`ECLIPSE_PROJECT_MODEL`]: the full project hierarchy, classpath, and tasks
//! - [`HIERARCHICAL_ECLIPSE_PROJECT_MODEL`]: the same without tasks or external libraries
//! - [`RUN_CLOSED_PROJECT_BUILD_DEPENDENCIES_MODEL`]: schedules the tasks producing artifacts of
//!   projects the IDE has closed, so a following project model request can reference them

mod closed_projects;
mod model_builder;
mod names;
mod tasks;

use std::sync::Arc;

use eclipse_classpath::{ArtifactClasspathResolver, ClasspathResolver, ResolveError};
use eclipse_config::EclipseToolingConfig;
use eclipse_model::{BuildTree, BuildTreeError, EclipseProjectModel, EclipseRuntime, ProjectId};
use thiserror::Error;

pub use closed_projects::RunBuildDependenciesTaskBuilder;
pub use model_builder::EclipseModelBuilder;
pub use names::{
    calculate_reserved_project_names, deduplicate_project_names, unique_project_names,
};
pub use tasks::TasksFactory;

pub const ECLIPSE_PROJECT_MODEL: &str = "org.gradle.tooling.model.eclipse.EclipseProject";
pub const HIERARCHICAL_ECLIPSE_PROJECT_MODEL: &str =
    "org.gradle.tooling.model.eclipse.HierarchicalEclipseProject";
pub const RUN_CLOSED_PROJECT_BUILD_DEPENDENCIES_MODEL: &str =
    "org.gradle.tooling.model.eclipse.RunClosedProjectBuildDependencies";

#[derive(Debug, Error)]
pub enum ToolingError {
    #[error("no builder can build model `{0}`")]
    UnknownModel(String),

    #[error("project `{0}` is not part of the build tree")]
    ProjectNotFound(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    BuildTree(#[from] BuildTreeError),
}

pub type Result<T> = std::result::Result<T, ToolingError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolingModel {
    EclipseProject(EclipseProjectModel),
    /// Outcome of the closed-project request: the task appended to the invocation, if any.
    ClosedProjectBuildDependencies { task_name: Option<String> },
}

pub trait ToolingModelBuilder {
    fn can_build(&self, model_name: &str) -> bool;

    /// Build `model_name` for `project`. `parameter` is the IDE's workspace description, when
    /// the client sent one.
    fn build_all(
        &self,
        model_name: &str,
        parameter: Option<&EclipseRuntime>,
        tree: &mut BuildTree,
        project: ProjectId,
    ) -> Result<ToolingModel>;
}

pub struct ToolingModelBuilderRegistry {
    builders: Vec<Box<dyn ToolingModelBuilder>>,
}

impl ToolingModelBuilderRegistry {
    pub fn new() -> Self {
        Self {
            builders: Vec::new(),
        }
    }

    /// Registry with the Eclipse builders, resolving classpaths from already-resolved artifacts.
    pub fn with_defaults(config: &EclipseToolingConfig) -> Self {
        Self::with_resolver(config, Arc::new(ArtifactClasspathResolver))
    }

    pub fn with_resolver(
        config: &EclipseToolingConfig,
        resolver: Arc<dyn ClasspathResolver>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(EclipseModelBuilder::new(config.clone(), resolver.clone()));
        registry.register(RunBuildDependenciesTaskBuilder::new(
            config.closed_projects.clone(),
            resolver,
        ));
        registry
    }

    pub fn register(&mut self, builder: impl ToolingModelBuilder + 'static) {
        self.builders.push(Box::new(builder));
    }

    pub fn get_builder(&self, model_name: &str) -> Result<&dyn ToolingModelBuilder> {
        self.builders
            .iter()
            .find(|builder| builder.can_build(model_name))
            .map(|builder| builder.as_ref())
            .ok_or_else(|| ToolingError::UnknownModel(model_name.to_string()))
    }

    pub fn build(
        &self,
        model_name: &str,
        parameter: Option<&EclipseRuntime>,
        tree: &mut BuildTree,
        project: ProjectId,
    ) -> Result<ToolingModel> {
        tracing::debug!(
            target = "eclipse.tooling",
            model = model_name,
            project = %tree.project(project).identity_path,
            "building tooling model"
        );
        self.get_builder(model_name)?
            .build_all(model_name, parameter, tree, project)
    }

    /// Like [`ToolingModelBuilderRegistry::build`], for the root build project at `path`.
    pub fn build_for_path(
        &self,
        model_name: &str,
        parameter: Option<&EclipseRuntime>,
        tree: &mut BuildTree,
        path: &str,
    ) -> Result<ToolingModel> {
        let project = tree.project_by_path(tree.root_build(), path)?;
        self.build(model_name, parameter, tree, project)
    }
}

impl Default for ToolingModelBuilderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
