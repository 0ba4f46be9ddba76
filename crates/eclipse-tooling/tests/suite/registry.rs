use std::sync::Arc;

use eclipse_classpath::{ClasspathResolver, ResolveError, ResolveRequest};
use eclipse_config::EclipseToolingConfig;
use eclipse_model::{BuildTree, ClasspathEntry, Library, ProjectId};
use eclipse_tooling::{
    ToolingError, ToolingModel, ToolingModelBuilderRegistry, ECLIPSE_PROJECT_MODEL,
    HIERARCHICAL_ECLIPSE_PROJECT_MODEL, RUN_CLOSED_PROJECT_BUILD_DEPENDENCIES_MODEL,
};

use super::two_projects;

#[test]
fn default_registry_serves_every_eclipse_model() {
    let registry = ToolingModelBuilderRegistry::with_defaults(&EclipseToolingConfig::default());
    for model_name in [
        ECLIPSE_PROJECT_MODEL,
        HIERARCHICAL_ECLIPSE_PROJECT_MODEL,
        RUN_CLOSED_PROJECT_BUILD_DEPENDENCIES_MODEL,
    ] {
        let builder = registry.get_builder(model_name).unwrap();
        assert!(builder.can_build(model_name));
    }
}

#[test]
fn unknown_model_is_rejected() {
    let mut fixture = two_projects();
    let registry = ToolingModelBuilderRegistry::with_defaults(&EclipseToolingConfig::default());

    let err = registry
        .build(
            "org.gradle.tooling.model.idea.IdeaProject",
            None,
            &mut fixture.tree,
            fixture.a,
        )
        .unwrap_err();
    assert!(
        matches!(&err, ToolingError::UnknownModel(name) if name == "org.gradle.tooling.model.idea.IdeaProject"),
        "{err}"
    );
    assert!(ToolingModelBuilderRegistry::new()
        .get_builder(ECLIPSE_PROJECT_MODEL)
        .is_err());
}

/// Resolver standing in for a dependency engine that resolves on demand.
struct FixedLibraries;

impl ClasspathResolver for FixedLibraries {
    fn resolve(
        &self,
        tree: &BuildTree,
        project: ProjectId,
        request: &ResolveRequest<'_>,
    ) -> Result<Vec<ClasspathEntry>, ResolveError> {
        if request.project_dependencies_only {
            return Ok(Vec::new());
        }
        let name = &tree.project(project).name;
        Ok(vec![Library::new(format!("/cache/{name}.jar")).into()])
    }
}

#[test]
fn custom_resolver_feeds_the_model() {
    let mut fixture = two_projects();
    let registry = ToolingModelBuilderRegistry::with_resolver(
        &EclipseToolingConfig::default(),
        Arc::new(FixedLibraries),
    );

    let ToolingModel::EclipseProject(model) = registry
        .build(ECLIPSE_PROJECT_MODEL, None, &mut fixture.tree, fixture.b)
        .unwrap()
    else {
        panic!("expected a project model");
    };
    assert_eq!(
        model.target().classpath[0].file.as_deref(),
        Some(std::path::Path::new("/cache/B.jar"))
    );
}

struct Failing;

impl ClasspathResolver for Failing {
    fn resolve(
        &self,
        tree: &BuildTree,
        project: ProjectId,
        _request: &ResolveRequest<'_>,
    ) -> Result<Vec<ClasspathEntry>, ResolveError> {
        Err(ResolveError::Unresolved {
            project: tree.project(project).identity_path.clone(),
            reason: "could not resolve junit:junit:4.13.2".to_string(),
        })
    }
}

#[test]
fn resolution_failures_propagate() {
    let mut fixture = two_projects();
    let registry = ToolingModelBuilderRegistry::with_resolver(
        &EclipseToolingConfig::default(),
        Arc::new(Failing),
    );

    let err = registry
        .build(ECLIPSE_PROJECT_MODEL, None, &mut fixture.tree, fixture.a)
        .unwrap_err();
    assert!(matches!(err, ToolingError::Resolve(_)), "{err}");
    assert!(err.to_string().contains("junit:junit:4.13.2"), "{err}");
}

#[test]
fn models_can_be_requested_by_project_path() {
    let mut fixture = two_projects();
    let registry = ToolingModelBuilderRegistry::with_defaults(&EclipseToolingConfig::default());

    let ToolingModel::EclipseProject(model) = registry
        .build_for_path(HIERARCHICAL_ECLIPSE_PROJECT_MODEL, None, &mut fixture.tree, ":B")
        .unwrap()
    else {
        panic!("expected a project model");
    };
    assert_eq!(model.target().name, "B");

    let err = registry
        .build_for_path(ECLIPSE_PROJECT_MODEL, None, &mut fixture.tree, ":missing")
        .unwrap_err();
    assert!(matches!(err, ToolingError::BuildTree(_)), "{err}");
}
