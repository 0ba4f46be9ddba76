use std::path::PathBuf;
use std::sync::Arc;

use eclipse_config::EclipseToolingConfig;
use eclipse_model::{
    BuildTree, ClasspathEntry, Container, EclipseModel, EclipseProjectModel, EclipseRuntime,
    EclipseWorkspaceProject, ModuleArtifact, Output, ProjectDependency, ProjectDescriptor,
    ProjectFileMerger, ProjectId, ResolvedArtifact, SourceFolder, Variable,
};
use eclipse_tooling::{
    ToolingModel, ToolingModelBuilderRegistry, ECLIPSE_PROJECT_MODEL,
    HIERARCHICAL_ECLIPSE_PROJECT_MODEL,
};

use super::two_projects;

fn build(
    model_name: &str,
    runtime: Option<&EclipseRuntime>,
    tree: &mut BuildTree,
    project: ProjectId,
) -> EclipseProjectModel {
    let registry = ToolingModelBuilderRegistry::with_defaults(&EclipseToolingConfig::default());
    match registry.build(model_name, runtime, tree, project).unwrap() {
        ToolingModel::EclipseProject(model) => model,
        other => panic!("expected a project model, got {other:?}"),
    }
}

#[test]
fn model_is_rooted_at_the_build_root_and_targets_the_requested_project() {
    let mut fixture = two_projects();
    let model = build(ECLIPSE_PROJECT_MODEL, None, &mut fixture.tree, fixture.b);

    assert_eq!(model.projects.len(), 3);
    assert_eq!(model.root().path, ":");
    assert_eq!(model.target().path, ":B");
    assert_eq!(model.target().project_directory, PathBuf::from("/ws/root/B"));
    assert_eq!(model.target().tasks[0].name, "jar");
    assert_eq!(
        model.target().tasks[0].description.as_deref(),
        Some("Assembles a jar archive.")
    );
    let parent = model.parent(model.target).unwrap();
    assert_eq!(parent.path, ":");
    assert!(model.root().parent.is_none());
}

#[test]
fn workspace_without_collisions_renames_nothing() {
    let mut fixture = two_projects();
    let runtime = EclipseRuntime::with_projects(vec![
        EclipseWorkspaceProject::new("A", "/ws/root/A", true),
        EclipseWorkspaceProject::new("B", "/ws/root/B", true),
        EclipseWorkspaceProject::new("tools", "/elsewhere/tools", true),
    ]);
    let model = build(ECLIPSE_PROJECT_MODEL, Some(&runtime), &mut fixture.tree, fixture.a);

    let names: Vec<_> = model.projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "root"]);
}

#[test]
fn external_workspace_project_reserves_its_name() {
    let mut fixture = two_projects();
    let runtime = EclipseRuntime::with_projects(vec![EclipseWorkspaceProject::new(
        "B",
        "/elsewhere/B",
        true,
    )]);
    let model = build(ECLIPSE_PROJECT_MODEL, Some(&runtime), &mut fixture.tree, fixture.a);

    assert_eq!(model.find_by_path(":B").unwrap().name, "root-B");
    // Project dependencies follow the renamed project.
    assert_eq!(model.target().project_dependencies[0].path, "root-B");
}

#[test]
fn names_are_unique_across_included_builds() {
    let mut builder = BuildTree::builder("app", "/ws/app");
    let root = builder.root_project();
    builder.project(root, "common", "/ws/app/common");
    let platform = builder.include_build(builder.root_build(), "platform", "/ws/platform");
    let included_common = builder.project(platform, "common", "/ws/platform/common");
    let mut tree = builder.build();

    let model = build(HIERARCHICAL_ECLIPSE_PROJECT_MODEL, None, &mut tree, root);
    assert_eq!(model.find_by_path(":common").unwrap().name, "app-common");
    assert_eq!(tree.eclipse_name(included_common), Some("platform-common"));
}

#[test]
fn hierarchical_model_has_neither_tasks_nor_libraries() {
    let mut fixture = two_projects();
    if let Some(model) = fixture.tree.project_mut(fixture.a).eclipse.as_mut() {
        model.classpath.plus_configurations[0]
            .artifacts
            .push(ResolvedArtifact::Module(ModuleArtifact {
                file: PathBuf::from("/repo/junit.jar"),
                source_file: None,
                javadoc_file: None,
                module_version: None,
            }));
    }

    let model = build(
        HIERARCHICAL_ECLIPSE_PROJECT_MODEL,
        None,
        &mut fixture.tree,
        fixture.a,
    );
    let a = model.target();
    assert!(a.tasks.is_empty());
    assert!(a.classpath.is_empty());
    assert_eq!(a.project_dependencies.len(), 1);

    let full = build(ECLIPSE_PROJECT_MODEL, None, &mut fixture.tree, fixture.a);
    assert_eq!(full.target().classpath.len(), 1);
    assert!(!full.target().tasks.is_empty());
}

#[derive(Debug)]
struct KeepOnlyJavaNature;

impl ProjectFileMerger for KeepOnlyJavaNature {
    fn merge(&self, mut generated: ProjectDescriptor) -> ProjectDescriptor {
        generated
            .natures
            .retain(|nature| nature == "org.eclipse.jdt.core.javanature");
        generated
    }
}

#[test]
fn customised_files_drive_descriptor_and_classpath() {
    let mut fixture = two_projects();
    let mut model = EclipseModel::named("A");
    model.project.natures = vec![
        "org.eclipse.jdt.core.javanature".to_string(),
        "org.eclipse.buildship.core.gradleprojectnature".to_string(),
    ];
    model.project.file = Some(Arc::new(KeepOnlyJavaNature));

    let mut dependency = ProjectDependency::new("/B").unwrap();
    dependency.exported = true;
    model.classpath.customized_entries = Some(vec![
        ClasspathEntry::from(SourceFolder::new("src/main/java", None)),
        ClasspathEntry::from(dependency.clone()),
        ClasspathEntry::from(dependency),
        ClasspathEntry::from(Container::new("org.eclipse.jdt.launching.JRE_CONTAINER")),
        ClasspathEntry::from(Variable {
            path: "M2_REPO/junit.jar".to_string(),
            exported: false,
            attributes: Default::default(),
            access_rules: Vec::new(),
        }),
        ClasspathEntry::from(Output::new("out/first")),
        ClasspathEntry::from(Output::new("out/second")),
    ]);
    fixture.tree.project_mut(fixture.a).eclipse = Some(model);

    let model = build(ECLIPSE_PROJECT_MODEL, None, &mut fixture.tree, fixture.a);
    let a = model.target();
    let natures: Vec<_> = a.project_natures.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(natures, vec!["org.eclipse.jdt.core.javanature"]);
    assert_eq!(a.source_directories[0].path, "src/main/java");
    assert_eq!(a.project_dependencies.len(), 1);
    assert!(a.project_dependencies[0].exported);
    assert_eq!(a.classpath_containers.len(), 1);
    assert!(a.classpath.is_empty());
    assert_eq!(a.output_location.path, "out/second");
}

#[test]
fn configured_default_output_applies_without_output_entry() {
    let mut fixture = two_projects();
    let mut config = EclipseToolingConfig::default();
    config.classpath.default_output = "build/eclipse".to_string();
    let registry = ToolingModelBuilderRegistry::with_defaults(&config);

    let ToolingModel::EclipseProject(model) = registry
        .build(ECLIPSE_PROJECT_MODEL, None, &mut fixture.tree, fixture.a)
        .unwrap()
    else {
        panic!("expected a project model");
    };
    assert_eq!(model.target().output_location.path, "build/eclipse");
}
