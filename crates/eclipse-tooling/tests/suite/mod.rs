mod config;
mod project_model;
mod registry;
mod wire_format;

use std::path::PathBuf;

use eclipse_model::{
    ArtifactMetadata, BuildDependencies, BuildTree, Configuration, EclipseModel, EclipseRuntime,
    EclipseWorkspaceProject, ProjectArtifact, ProjectId, ResolvedArtifact,
};

/// Root build with subprojects `A` and `B`; `A` consumes `B.jar`, produced by `:B:jar`.
pub(crate) struct TwoProjects {
    pub tree: BuildTree,
    pub root: ProjectId,
    pub a: ProjectId,
    pub b: ProjectId,
}

pub(crate) fn two_projects() -> TwoProjects {
    let mut builder = BuildTree::builder("root", "/ws/root");
    let root = builder.root_project();
    let a = builder.project(root, "A", "/ws/root/A");
    let b = builder.project(root, "B", "/ws/root/B");
    builder
        .task(a, "compileJava", Some("Compiles main Java source."))
        .task(b, "jar", Some("Assembles a jar archive."))
        .requested_tasks(["help"]);
    let mut tree = builder.build();

    let mut model = EclipseModel::named("A");
    model.classpath.plus_configurations.push(Configuration::new(
        "runtimeClasspath",
        vec![ResolvedArtifact::Project(ProjectArtifact {
            component: tree.project(b).component_id(),
            file: PathBuf::from("/ws/root/B/build/libs/B.jar"),
            metadata: Some(ArtifactMetadata {
                build_dependencies: BuildDependencies::new([":B:jar"]),
            }),
        })],
    ));
    tree.project_mut(a).eclipse = Some(model);

    TwoProjects { tree, root, a, b }
}

pub(crate) fn workspace_with_b(open: bool) -> EclipseRuntime {
    EclipseRuntime::with_projects(vec![EclipseWorkspaceProject::new("B", "/ws/root/B", open)])
}
