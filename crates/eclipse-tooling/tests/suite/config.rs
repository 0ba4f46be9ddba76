use eclipse_config::EclipseToolingConfig;
use eclipse_tooling::{
    ToolingModel, ToolingModelBuilderRegistry, RUN_CLOSED_PROJECT_BUILD_DEPENDENCIES_MODEL,
};

use super::{two_projects, workspace_with_b};

#[test]
fn config_file_renames_the_umbrella_task() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("eclipse.toml");
    std::fs::write(
        &path,
        r#"
[closed_projects]
task_name = "prepareClosedProjects"

[logging]
level = "eclipse.tooling=debug"
stderr = false
"#,
    )?;
    let config = EclipseToolingConfig::load_from_path(&path)?;
    eclipse_config::init_tracing(&config.logging);

    let mut fixture = two_projects();
    let model = ToolingModelBuilderRegistry::with_defaults(&config).build(
        RUN_CLOSED_PROJECT_BUILD_DEPENDENCIES_MODEL,
        Some(&workspace_with_b(false)),
        &mut fixture.tree,
        fixture.a,
    )?;

    assert_eq!(
        model,
        ToolingModel::ClosedProjectBuildDependencies {
            task_name: Some("prepareClosedProjects".to_string())
        }
    );
    assert!(fixture
        .tree
        .project(fixture.root)
        .find_task("prepareClosedProjects")
        .is_some());
    Ok(())
}
