use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Parameter supplied by the IDE with a model request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EclipseRuntime {
    #[serde(default)]
    pub workspace: Option<EclipseWorkspace>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EclipseWorkspace {
    #[serde(default)]
    pub location: Option<PathBuf>,
    #[serde(default)]
    pub projects: Option<Vec<EclipseWorkspaceProject>>,
}

/// A project the IDE already knows about.
///
/// Every field is optional on the wire; incomplete entries are skipped rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EclipseWorkspaceProject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<PathBuf>,
    #[serde(default = "default_is_open")]
    pub is_open: bool,
}

fn default_is_open() -> bool {
    true
}

impl EclipseWorkspaceProject {
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>, is_open: bool) -> Self {
        Self {
            name: Some(name.into()),
            location: Some(location.into()),
            is_open,
        }
    }
}

impl EclipseRuntime {
    pub fn with_projects(projects: Vec<EclipseWorkspaceProject>) -> Self {
        Self {
            workspace: Some(EclipseWorkspace {
                location: None,
                projects: Some(projects),
            }),
        }
    }

    /// The workspace project list, if the IDE sent one.
    pub fn projects(&self) -> Option<&[EclipseWorkspaceProject]> {
        self.workspace.as_ref()?.projects.as_deref()
    }
}

/// Read-only name index over the workspace description, built fresh per request.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceProjects {
    by_name: HashMap<String, EclipseWorkspaceProject>,
}

impl WorkspaceProjects {
    pub fn new(runtime: Option<&EclipseRuntime>) -> Self {
        let mut by_name = HashMap::new();
        for project in runtime.and_then(EclipseRuntime::projects).unwrap_or_default() {
            if let Some(name) = &project.name {
                // Later duplicates replace earlier ones.
                by_name.insert(name.clone(), project.clone());
            }
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&EclipseWorkspaceProject> {
        self.by_name.get(name)
    }

    /// `true` only for projects the workspace explicitly reports as closed. Unknown names are
    /// treated as open.
    pub fn is_closed(&self, name: &str) -> bool {
        self.get(name).is_some_and(|project| !project.is_open)
    }

    pub fn closed_names(&self) -> BTreeSet<String> {
        self.by_name
            .iter()
            .filter(|(_, project)| !project.is_open)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
