use std::collections::HashMap;
use std::sync::Arc;

use eclipse_classpath::{gather_project_classpath, ClasspathResolver};
use eclipse_config::EclipseToolingConfig;
use eclipse_model::{
    BuildTree, EclipseBuildCommand, EclipseJavaSourceSettings, EclipseLinkedResource,
    EclipseProject, EclipseProjectId, EclipseProjectModel, EclipseProjectNature, EclipseRuntime,
    InstalledJdk, ProjectId, WorkspaceProjects,
};

use crate::names::deduplicate_project_names;
use crate::tasks::TasksFactory;
use crate::{
    Result, ToolingError, ToolingModel, ToolingModelBuilder, ECLIPSE_PROJECT_MODEL,
    HIERARCHICAL_ECLIPSE_PROJECT_MODEL,
};

/// Builds the project model for the full and the hierarchical model names.
pub struct EclipseModelBuilder {
    config: EclipseToolingConfig,
    resolver: Arc<dyn ClasspathResolver>,
}

impl EclipseModelBuilder {
    pub fn new(config: EclipseToolingConfig, resolver: Arc<dyn ClasspathResolver>) -> Self {
        Self { config, resolver }
    }
}

impl ToolingModelBuilder for EclipseModelBuilder {
    fn can_build(&self, model_name: &str) -> bool {
        model_name == ECLIPSE_PROJECT_MODEL || model_name == HIERARCHICAL_ECLIPSE_PROJECT_MODEL
    }

    fn build_all(
        &self,
        model_name: &str,
        parameter: Option<&EclipseRuntime>,
        tree: &mut BuildTree,
        project: ProjectId,
    ) -> Result<ToolingModel> {
        let request = ModelRequest {
            include_tasks: model_name == ECLIPSE_PROJECT_MODEL,
            project_dependencies_only: model_name == HIERARCHICAL_ECLIPSE_PROJECT_MODEL,
            workspace: WorkspaceProjects::new(parameter),
        };

        let root = tree.root_project_of(project);
        let build = tree.project(root).build();

        let mut tasks = TasksFactory::new(request.include_tasks);
        tasks.collect_tasks(tree, root);

        for id in tree.collect_all_projects(build) {
            tree.apply_eclipse(id);
        }
        deduplicate_project_names(tree, build, parameter);

        let mut assembly = Assembly {
            builder: self,
            request: &request,
            tasks: &tasks,
            projects: Vec::new(),
            ids: HashMap::new(),
        };
        let root_id = assembly.build_hierarchy(tree, root);
        assembly.populate(tree, root)?;

        let target = *assembly.ids.get(&project).ok_or_else(|| {
            ToolingError::ProjectNotFound(tree.project(project).identity_path.clone())
        })?;

        tracing::debug!(
            target = "eclipse.tooling",
            model = model_name,
            projects = assembly.projects.len(),
            "built project model"
        );
        Ok(ToolingModel::EclipseProject(EclipseProjectModel {
            projects: assembly.projects,
            root: root_id,
            target,
        }))
    }
}

struct ModelRequest {
    include_tasks: bool,
    project_dependencies_only: bool,
    workspace: WorkspaceProjects,
}

/// State of one model request while the hierarchy is assembled.
struct Assembly<'a> {
    builder: &'a EclipseModelBuilder,
    request: &'a ModelRequest,
    tasks: &'a TasksFactory,
    projects: Vec<EclipseProject>,
    ids: HashMap<ProjectId, EclipseProjectId>,
}

impl Assembly<'_> {
    /// Children are added before their parent.
    fn build_hierarchy(&mut self, tree: &BuildTree, project: ProjectId) -> EclipseProjectId {
        let mut children = Vec::new();
        for child in tree.project(project).children() {
            children.push(self.build_hierarchy(tree, *child));
        }

        let owner = tree.project(project);
        let name = tree.eclipse_name(project).unwrap_or(&owner.name);
        let description = owner
            .eclipse
            .as_ref()
            .and_then(|model| model.project.comment.clone());
        let mut node = EclipseProject::new(name, &owner.path, description, &owner.project_dir);
        node.children = children.clone();

        let id = EclipseProjectId(self.projects.len());
        self.projects.push(node);
        for child in children {
            self.projects[child.0].parent = Some(id);
        }
        self.ids.insert(project, id);
        id
    }

    fn populate(&mut self, tree: &BuildTree, project: ProjectId) -> Result<()> {
        let classpath = gather_project_classpath(
            self.builder.resolver.as_ref(),
            tree,
            project,
            self.request.project_dependencies_only,
            &self.request.workspace,
        )?;

        let owner = tree.project(project);
        let id = self
            .ids
            .get(&project)
            .copied()
            .ok_or_else(|| ToolingError::ProjectNotFound(owner.identity_path.clone()))?;
        let node = &mut self.projects[id.0];

        node.output_location =
            classpath.output_location_or(&self.builder.config.classpath.default_output);
        node.classpath = classpath.external_dependencies;
        node.project_dependencies = classpath.project_dependencies;
        node.source_directories = classpath.source_directories;
        node.classpath_containers = classpath.classpath_containers;

        node.tasks = self.tasks.tasks(project);

        if let Some(model) = &owner.eclipse {
            node.auto_build_tasks = !model.auto_build_tasks.is_empty();

            let descriptor = model.project.descriptor();
            node.linked_resources = descriptor
                .linked_resources
                .into_iter()
                .map(|link| EclipseLinkedResource {
                    name: link.name,
                    type_: link.type_,
                    location: link.location,
                    location_uri: link.location_uri,
                })
                .collect();
            node.project_natures = descriptor
                .natures
                .into_iter()
                .map(|id| EclipseProjectNature { id })
                .collect();
            node.build_commands = descriptor
                .build_commands
                .into_iter()
                .map(|command| EclipseBuildCommand {
                    name: command.name,
                    arguments: command.arguments,
                })
                .collect();

            node.java_source_settings = model.jdt.as_ref().map(|jdt| EclipseJavaSourceSettings {
                source_language_level: jdt.source_compatibility,
                target_bytecode_version: jdt.target_compatibility,
                jdk: tree.jdk.as_ref().map(|jdk| InstalledJdk {
                    java_home: jdk.java_home.clone(),
                    java_version: jdk.version,
                }),
            });
        }

        for child in owner.children() {
            self.populate(tree, *child)?;
        }
        Ok(())
    }
}
