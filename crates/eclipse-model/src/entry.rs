use std::path::PathBuf;

use indexmap::IndexMap;
use thiserror::Error;

use crate::BuildDependencies;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClasspathEntryError {
    #[error("project dependency path `{path}` must start with `/`")]
    InvalidProjectPath { path: String },
}

/// Free-form classpath attributes, in declaration order.
///
/// A `None` value is an attribute declared without a value; it surfaces as an empty string.
pub type EntryAttributes = IndexMap<String, Option<String>>;

/// Pattern-based visibility restriction attached to a classpath entry.
///
/// `kind` is kept textual (`accessible`, `nonaccessible`, `discouraged` or the numeric codes);
/// normalisation happens when the entry is converted for the IDE.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessRule {
    pub kind: String,
    pub pattern: String,
}

impl AccessRule {
    pub fn new(kind: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            pattern: pattern.into(),
        }
    }
}

/// Module coordinates of an external library.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ModuleVersion {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl ModuleVersion {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

/// One contribution to a project's classpath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClasspathEntry {
    Library(Library),
    ProjectDependency(ProjectDependency),
    SourceFolder(SourceFolder),
    Container(Container),
    Output(Output),
    /// User-defined path variable. Carried through merged `.classpath` content but not
    /// surfaced to IDE clients.
    Variable(Variable),
}

impl From<Library> for ClasspathEntry {
    fn from(value: Library) -> Self {
        ClasspathEntry::Library(value)
    }
}

impl From<ProjectDependency> for ClasspathEntry {
    fn from(value: ProjectDependency) -> Self {
        ClasspathEntry::ProjectDependency(value)
    }
}

impl From<SourceFolder> for ClasspathEntry {
    fn from(value: SourceFolder) -> Self {
        ClasspathEntry::SourceFolder(value)
    }
}

impl From<Container> for ClasspathEntry {
    fn from(value: Container) -> Self {
        ClasspathEntry::Container(value)
    }
}

impl From<Output> for ClasspathEntry {
    fn from(value: Output) -> Self {
        ClasspathEntry::Output(value)
    }
}

impl From<Variable> for ClasspathEntry {
    fn from(value: Variable) -> Self {
        ClasspathEntry::Variable(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub file: PathBuf,
    pub source_file: Option<PathBuf>,
    pub javadoc_file: Option<PathBuf>,
    pub module_version: Option<ModuleVersion>,
    pub exported: bool,
    pub attributes: EntryAttributes,
    pub access_rules: Vec<AccessRule>,
}

impl Library {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            source_file: None,
            javadoc_file: None,
            module_version: None,
            exported: false,
            attributes: EntryAttributes::new(),
            access_rules: Vec::new(),
        }
    }
}

/// A classpath link to another IDE project.
///
/// The path is the target project's IDE name preceded by `/`; the constructor rejects anything
/// else, so a value of this type always carries a valid path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDependency {
    path: String,
    /// Path of the task producing [`ProjectDependency::publication`], when known.
    pub build_task_name: Option<String>,
    /// Artifact substituted for this dependency when the target project is closed.
    pub publication: Option<PathBuf>,
    /// Tasks that must run before `publication` can be consumed.
    pub build_dependencies: BuildDependencies,
    pub exported: bool,
    pub attributes: EntryAttributes,
    pub access_rules: Vec<AccessRule>,
}

impl ProjectDependency {
    pub fn new(path: impl Into<String>) -> Result<Self, ClasspathEntryError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(ClasspathEntryError::InvalidProjectPath { path });
        }
        Ok(Self::with_valid_path(path))
    }

    /// Dependency on the IDE project named `name`.
    pub fn for_project(name: &str) -> Self {
        Self::with_valid_path(format!("/{name}"))
    }

    fn with_valid_path(path: String) -> Self {
        Self {
            path,
            build_task_name: None,
            publication: None,
            build_dependencies: BuildDependencies::default(),
            exported: false,
            attributes: EntryAttributes::new(),
            access_rules: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The target project name, i.e. the path without its leading `/`.
    pub fn project_name(&self) -> &str {
        self.path.strip_prefix('/').unwrap_or(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFolder {
    /// Project-relative path as written to `.classpath`.
    pub path: String,
    /// Absolute directory backing the folder, if known.
    pub dir: Option<PathBuf>,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub output: Option<String>,
    pub attributes: EntryAttributes,
    pub access_rules: Vec<AccessRule>,
}

impl SourceFolder {
    pub fn new(path: impl Into<String>, dir: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dir,
            includes: Vec::new(),
            excludes: Vec::new(),
            output: None,
            attributes: EntryAttributes::new(),
            access_rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub path: String,
    pub exported: bool,
    pub attributes: EntryAttributes,
    pub access_rules: Vec<AccessRule>,
}

impl Container {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            exported: false,
            attributes: EntryAttributes::new(),
            access_rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub path: String,
}

impl Output {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub path: String,
    pub exported: bool,
    pub attributes: EntryAttributes,
    pub access_rules: Vec<AccessRule>,
}
