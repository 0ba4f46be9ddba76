use std::path::Path;

use eclipse_model::{ArtifactMetadata, BuildTree, ProjectComponentId, ProjectDependency};

/// Lookup of the IDE project a build project is exposed as.
pub trait IdeArtifactRegistry {
    /// Current IDE name of the project, when it has IDE configuration.
    fn ide_project_name(&self, id: &ProjectComponentId) -> Option<String>;
}

impl IdeArtifactRegistry for BuildTree {
    fn ide_project_name(&self, id: &ProjectComponentId) -> Option<String> {
        let project = self.find_by_identity_path(&id.identity_path)?;
        self.eclipse_name(project).map(str::to_string)
    }
}

/// Creates [`ProjectDependency`] entries pointing at other projects of the build tree.
pub struct ProjectDependencyBuilder<'a, R: ?Sized> {
    registry: &'a R,
}

impl<'a, R: IdeArtifactRegistry + ?Sized> ProjectDependencyBuilder<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    pub fn build(&self, id: &ProjectComponentId) -> ProjectDependency {
        let mut dependency = ProjectDependency::for_project(&self.target_project_name(id));
        dependency.exported = false;
        dependency
    }

    /// Like [`ProjectDependencyBuilder::build`], also recording the artifact `file` the target
    /// publishes and, when `metadata` is known, the task producing it.
    pub fn build_with_artifact(
        &self,
        id: &ProjectComponentId,
        file: &Path,
        metadata: Option<&ArtifactMetadata>,
    ) -> ProjectDependency {
        let mut dependency = self.build(id);
        if let Some(metadata) = metadata {
            // Several tasks may produce the artifact; the first one reported is taken as is.
            dependency.build_task_name = metadata.build_dependencies.tasks().first().cloned();
            dependency.build_dependencies = metadata.build_dependencies.clone();
        }
        dependency.publication = Some(file.to_path_buf());
        dependency
    }

    /// The registry's (possibly deduplicated) name, else the project's own name.
    pub fn target_project_name(&self, id: &ProjectComponentId) -> String {
        self.registry
            .ide_project_name(id)
            .unwrap_or_else(|| id.project_name.clone())
    }
}
