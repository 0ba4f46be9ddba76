use std::collections::HashSet;

use eclipse_model::{
    AccessRule, BuildDependencies, BuildTree, ClasspathAttribute, ClasspathEntry,
    EclipseAccessRule, EclipseClasspathContainer, EclipseExternalDependency,
    EclipseOutputLocation, EclipseProjectDependency, EclipseSourceDirectory, EntryAttributes,
    ProjectDependency, ProjectId, WorkspaceProjects,
};

use crate::{ClasspathResolver, ResolveError, ResolveRequest};

/// Output location used when the classpath carries no `Output` entry.
pub const DEFAULT_OUTPUT_LOCATION: &str = "bin";

/// Classpath of one project, split into the buckets IDE clients consume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatheredClasspath {
    pub external_dependencies: Vec<EclipseExternalDependency>,
    pub project_dependencies: Vec<EclipseProjectDependency>,
    pub source_directories: Vec<EclipseSourceDirectory>,
    pub classpath_containers: Vec<EclipseClasspathContainer>,
    /// Last `Output` entry seen, if any.
    pub output_location: Option<EclipseOutputLocation>,
    /// Build dependencies of every project dependency that was replaced by its artifact.
    pub build_dependencies: Vec<BuildDependencies>,
}

impl GatheredClasspath {
    pub fn output_location_or(&self, default: &str) -> EclipseOutputLocation {
        self.output_location
            .clone()
            .unwrap_or_else(|| EclipseOutputLocation::new(default))
    }
}

/// Resolve `project`'s classpath with `resolver` and gather it against the workspace state.
pub fn gather_project_classpath(
    resolver: &dyn ClasspathResolver,
    tree: &BuildTree,
    project: ProjectId,
    project_dependencies_only: bool,
    workspace: &WorkspaceProjects,
) -> Result<GatheredClasspath, ResolveError> {
    let request = ResolveRequest {
        project_dependencies_only,
        only_projects: None,
    };
    let entries = resolver.resolve(tree, project, &request)?;
    Ok(gather_classpath(&entries, workspace))
}

/// Split resolved entries into IDE buckets in a single pass, keeping input order per bucket.
///
/// Project dependencies on projects the workspace reports as closed become external
/// dependencies on the artifact the project publishes, and their build dependencies are
/// collected so the caller can get that artifact built. Remaining project dependencies are
/// emitted once per target name. Variable entries are not surfaced.
pub fn gather_classpath(
    entries: &[ClasspathEntry],
    workspace: &WorkspaceProjects,
) -> GatheredClasspath {
    let mut out = GatheredClasspath::default();
    let mut visited_projects: HashSet<&str> = HashSet::new();

    for entry in entries {
        match entry {
            ClasspathEntry::Library(library) => {
                out.external_dependencies.push(EclipseExternalDependency {
                    file: Some(library.file.clone()),
                    javadoc: library.javadoc_file.clone(),
                    source: library.source_file.clone(),
                    module_version: library.module_version.clone(),
                    exported: library.exported,
                    classpath_attributes: create_attributes(&library.attributes),
                    access_rules: create_access_rules(&library.access_rules),
                });
            }
            ClasspathEntry::ProjectDependency(dependency) => {
                let name = dependency.project_name();
                if workspace.is_closed(name) {
                    tracing::debug!(
                        target = "eclipse.classpath",
                        project = name,
                        publication = ?dependency.publication,
                        "replacing dependency on closed project with its artifact"
                    );
                    out.external_dependencies
                        .push(substituted_dependency(dependency));
                    out.build_dependencies
                        .push(dependency.build_dependencies.clone());
                } else if visited_projects.insert(name) {
                    out.project_dependencies.push(EclipseProjectDependency {
                        path: name.to_string(),
                        exported: dependency.exported,
                        classpath_attributes: create_attributes(&dependency.attributes),
                        access_rules: create_access_rules(&dependency.access_rules),
                    });
                } else {
                    tracing::trace!(
                        target = "eclipse.classpath",
                        project = name,
                        "dropping repeated project dependency"
                    );
                }
            }
            ClasspathEntry::SourceFolder(folder) => {
                out.source_directories.push(EclipseSourceDirectory {
                    path: folder.path.clone(),
                    directory: folder.dir.clone(),
                    excludes: folder.excludes.clone(),
                    includes: folder.includes.clone(),
                    output: folder.output.clone(),
                    classpath_attributes: create_attributes(&folder.attributes),
                    access_rules: create_access_rules(&folder.access_rules),
                });
            }
            ClasspathEntry::Container(container) => {
                out.classpath_containers.push(EclipseClasspathContainer {
                    path: container.path.clone(),
                    exported: container.exported,
                    classpath_attributes: create_attributes(&container.attributes),
                    access_rules: create_access_rules(&container.access_rules),
                });
            }
            ClasspathEntry::Output(output) => {
                out.output_location = Some(EclipseOutputLocation::new(output.path.clone()));
            }
            // Exposing variables would require clients to resolve variable mappings.
            ClasspathEntry::Variable(_) => {}
        }
    }

    out
}

fn substituted_dependency(dependency: &ProjectDependency) -> EclipseExternalDependency {
    EclipseExternalDependency {
        file: dependency.publication.clone(),
        javadoc: None,
        source: None,
        module_version: None,
        exported: dependency.exported,
        classpath_attributes: create_attributes(&dependency.attributes),
        access_rules: create_access_rules(&dependency.access_rules),
    }
}

fn create_attributes(attributes: &EntryAttributes) -> Vec<ClasspathAttribute> {
    attributes
        .iter()
        .map(|(name, value)| ClasspathAttribute {
            name: name.clone(),
            value: value.clone().unwrap_or_default(),
        })
        .collect()
}

fn create_access_rules(rules: &[AccessRule]) -> Vec<EclipseAccessRule> {
    rules
        .iter()
        .map(|rule| EclipseAccessRule {
            kind: access_rule_kind(&rule.kind),
            pattern: rule.pattern.clone(),
        })
        .collect()
}

/// Numeric access rule kind: 0 accessible, 1 nonaccessible, 2 discouraged.
///
/// Unrecognised kinds map to 0.
pub fn access_rule_kind(kind: &str) -> u8 {
    match kind {
        "accessible" | "0" => 0,
        "nonaccessible" | "1" => 1,
        "discouraged" | "2" => 2,
        _ => 0,
    }
}
