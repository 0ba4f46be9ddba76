//! Stable model handed to IDE tooling clients.
//!
//! Field names are camelCase on the wire. Projects live in a flat arena; parent and child links
//! are indices into it.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{JavaVersion, ModuleVersion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EclipseProjectId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EclipseProjectModel {
    pub projects: Vec<EclipseProject>,
    pub root: EclipseProjectId,
    /// The project the model was requested for.
    pub target: EclipseProjectId,
}

impl EclipseProjectModel {
    pub fn get(&self, id: EclipseProjectId) -> &EclipseProject {
        &self.projects[id.0]
    }

    pub fn root(&self) -> &EclipseProject {
        self.get(self.root)
    }

    pub fn target(&self) -> &EclipseProject {
        self.get(self.target)
    }

    pub fn parent(&self, id: EclipseProjectId) -> Option<&EclipseProject> {
        self.get(id).parent.map(|parent| self.get(parent))
    }

    pub fn children(&self, id: EclipseProjectId) -> impl Iterator<Item = &EclipseProject> + '_ {
        self.get(id).children.iter().map(|child| self.get(*child))
    }

    pub fn find_by_path(&self, path: &str) -> Option<&EclipseProject> {
        self.projects.iter().find(|project| project.path == path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EclipseProject {
    pub name: String,
    /// Build path of the project, e.g. `:app`.
    pub path: String,
    pub description: Option<String>,
    pub project_directory: PathBuf,
    pub parent: Option<EclipseProjectId>,
    pub children: Vec<EclipseProjectId>,
    pub classpath: Vec<EclipseExternalDependency>,
    pub project_dependencies: Vec<EclipseProjectDependency>,
    pub source_directories: Vec<EclipseSourceDirectory>,
    pub classpath_containers: Vec<EclipseClasspathContainer>,
    pub output_location: EclipseOutputLocation,
    pub auto_build_tasks: bool,
    pub tasks: Vec<EclipseTask>,
    pub linked_resources: Vec<EclipseLinkedResource>,
    pub project_natures: Vec<EclipseProjectNature>,
    pub build_commands: Vec<EclipseBuildCommand>,
    pub java_source_settings: Option<EclipseJavaSourceSettings>,
}

impl EclipseProject {
    /// Unpopulated project node; classpath and metadata are filled in afterwards.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        description: Option<String>,
        project_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            description,
            project_directory: project_directory.into(),
            parent: None,
            children: Vec::new(),
            classpath: Vec::new(),
            project_dependencies: Vec::new(),
            source_directories: Vec::new(),
            classpath_containers: Vec::new(),
            output_location: EclipseOutputLocation::new("bin"),
            auto_build_tasks: false,
            tasks: Vec::new(),
            linked_resources: Vec::new(),
            project_natures: Vec::new(),
            build_commands: Vec::new(),
            java_source_settings: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClasspathAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EclipseAccessRule {
    /// 0 = accessible, 1 = nonaccessible, 2 = discouraged.
    pub kind: u8,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EclipseExternalDependency {
    pub file: Option<PathBuf>,
    pub javadoc: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub module_version: Option<ModuleVersion>,
    pub exported: bool,
    pub classpath_attributes: Vec<ClasspathAttribute>,
    pub access_rules: Vec<EclipseAccessRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EclipseProjectDependency {
    /// Target IDE project name (no leading `/`).
    pub path: String,
    pub exported: bool,
    pub classpath_attributes: Vec<ClasspathAttribute>,
    pub access_rules: Vec<EclipseAccessRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EclipseSourceDirectory {
    pub path: String,
    pub directory: Option<PathBuf>,
    pub excludes: Vec<String>,
    pub includes: Vec<String>,
    pub output: Option<String>,
    pub classpath_attributes: Vec<ClasspathAttribute>,
    pub access_rules: Vec<EclipseAccessRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EclipseClasspathContainer {
    pub path: String,
    pub exported: bool,
    pub classpath_attributes: Vec<ClasspathAttribute>,
    pub access_rules: Vec<EclipseAccessRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EclipseOutputLocation {
    pub path: String,
}

impl EclipseOutputLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EclipseTask {
    pub path: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EclipseLinkedResource {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub location: Option<String>,
    pub location_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EclipseProjectNature {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EclipseBuildCommand {
    pub name: String,
    pub arguments: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EclipseJavaSourceSettings {
    pub source_language_level: JavaVersion,
    pub target_bytecode_version: JavaVersion,
    pub jdk: Option<InstalledJdk>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledJdk {
    pub java_home: PathBuf,
    pub java_version: JavaVersion,
}
