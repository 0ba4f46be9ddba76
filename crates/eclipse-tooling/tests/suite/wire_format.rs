use eclipse_config::EclipseToolingConfig;
use eclipse_model::EclipseRuntime;
use eclipse_tooling::{ToolingModel, ToolingModelBuilderRegistry, ECLIPSE_PROJECT_MODEL};
use serde_json::json;

use super::two_projects;

#[test]
fn runtime_parameter_is_read_from_ide_json() {
    let runtime: EclipseRuntime = serde_json::from_value(json!({
        "workspace": {
            "location": "/ws",
            "projects": [
                { "name": "B", "location": "/ws/root/B", "isOpen": false },
                { "name": "docs" },
                { "location": "/ws/unnamed" }
            ]
        }
    }))
    .unwrap();

    let mut fixture = two_projects();
    let ToolingModel::EclipseProject(model) =
        ToolingModelBuilderRegistry::with_defaults(&EclipseToolingConfig::default())
            .build(ECLIPSE_PROJECT_MODEL, Some(&runtime), &mut fixture.tree, fixture.a)
            .unwrap()
    else {
        panic!("expected a project model");
    };
    assert!(model.target().project_dependencies.is_empty());
    assert_eq!(model.target().classpath.len(), 1);
}

#[test]
fn project_model_serializes_with_camel_case_fields() {
    let mut fixture = two_projects();
    let ToolingModel::EclipseProject(model) =
        ToolingModelBuilderRegistry::with_defaults(&EclipseToolingConfig::default())
            .build(ECLIPSE_PROJECT_MODEL, None, &mut fixture.tree, fixture.a)
            .unwrap()
    else {
        panic!("expected a project model");
    };

    let value = serde_json::to_value(&model).unwrap();
    let target = value["target"].as_u64().unwrap() as usize;
    let a = &value["projects"][target];
    assert_eq!(a["name"], "A");
    assert_eq!(a["projectDirectory"], "/ws/root/A");
    assert_eq!(a["outputLocation"]["path"], "bin");
    assert_eq!(a["projectDependencies"][0]["path"], "B");
    assert_eq!(a["autoBuildTasks"], false);
    assert_eq!(a["tasks"][0]["path"], ":A:compileJava");

    let round_trip: eclipse_model::EclipseProjectModel = serde_json::from_value(value).unwrap();
    assert_eq!(round_trip, model);
}
