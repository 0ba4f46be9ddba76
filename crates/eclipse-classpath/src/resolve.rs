use std::collections::BTreeSet;

use eclipse_model::{
    BuildTree, ClasspathEntry, ClasspathEntryError, Container, Library, Output, ProjectId,
    ResolvedArtifact,
};
use thiserror::Error;

use crate::ProjectDependencyBuilder;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to resolve classpath of `{project}`: {reason}")]
    Unresolved { project: String, reason: String },

    #[error(transparent)]
    Entry(#[from] ClasspathEntryError),
}

/// What a single resolution should produce.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveRequest<'a> {
    /// Skip external libraries; only project-to-project links are wanted.
    pub project_dependencies_only: bool,
    /// When set, resolve nothing but project dependencies whose identity path is in the set.
    pub only_projects: Option<&'a BTreeSet<String>>,
}

/// Produces the ordered classpath entries of a project.
pub trait ClasspathResolver {
    fn resolve(
        &self,
        tree: &BuildTree,
        project: ProjectId,
        request: &ResolveRequest<'_>,
    ) -> Result<Vec<ClasspathEntry>, ResolveError>;
}

/// Builds classpath entries from the artifacts the dependency engine already resolved for each
/// of the project's classpath configurations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactClasspathResolver;

impl ClasspathResolver for ArtifactClasspathResolver {
    fn resolve(
        &self,
        tree: &BuildTree,
        project: ProjectId,
        request: &ResolveRequest<'_>,
    ) -> Result<Vec<ClasspathEntry>, ResolveError> {
        let owner = tree.project(project);
        let Some(model) = owner.eclipse.as_ref() else {
            return Err(ResolveError::Unresolved {
                project: owner.identity_path.clone(),
                reason: "project has no IDE configuration".to_string(),
            });
        };
        let classpath = &model.classpath;

        if request.only_projects.is_none() {
            if let Some(entries) = &classpath.customized_entries {
                return Ok(entries.clone());
            }
        }

        let dependencies = ProjectDependencyBuilder::new(tree);
        let mut entries = Vec::new();

        if request.only_projects.is_none() {
            if let Some(output) = &classpath.default_output_dir {
                entries.push(Output::new(output.clone()).into());
            }
            entries.extend(classpath.source_folders.iter().cloned().map(ClasspathEntry::from));
            entries.extend(
                classpath
                    .containers
                    .iter()
                    .map(|path| ClasspathEntry::from(Container::new(path.clone()))),
            );
        }

        for configuration in &classpath.plus_configurations {
            for artifact in &configuration.artifacts {
                match artifact {
                    ResolvedArtifact::Module(module) => {
                        if request.project_dependencies_only || request.only_projects.is_some() {
                            continue;
                        }
                        let mut library = Library::new(module.file.clone());
                        library.source_file = module.source_file.clone();
                        library.javadoc_file = module.javadoc_file.clone();
                        library.module_version = module.module_version.clone();
                        entries.push(library.into());
                    }
                    ResolvedArtifact::Project(artifact) => {
                        if let Some(only) = request.only_projects {
                            if !only.contains(&artifact.component.identity_path) {
                                continue;
                            }
                        }
                        let dependency = dependencies.build_with_artifact(
                            &artifact.component,
                            &artifact.file,
                            artifact.metadata.as_ref(),
                        );
                        entries.push(dependency.into());
                    }
                }
            }
        }

        tracing::trace!(
            target = "eclipse.classpath",
            project = %owner.identity_path,
            entries = entries.len(),
            "resolved classpath entries"
        );
        Ok(entries)
    }
}
