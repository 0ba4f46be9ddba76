use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{BuildDependencies, ClasspathEntry, ModuleVersion, ProjectComponentId, SourceFolder};

/// Per-project IDE configuration, as set up by the build scripts.
#[derive(Debug, Clone, Default)]
pub struct EclipseModel {
    pub project: EclipseProjectConfig,
    pub classpath: EclipseClasspath,
    pub jdt: Option<EclipseJdt>,
    /// Tasks the IDE should run as part of its own auto-build.
    pub auto_build_tasks: BuildDependencies,
}

impl EclipseModel {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            project: EclipseProjectConfig {
                name: name.into(),
                ..EclipseProjectConfig::default()
            },
            ..Self::default()
        }
    }
}

/// Content of the IDE's `.project` descriptor as configured by the build.
#[derive(Debug, Clone, Default)]
pub struct EclipseProjectConfig {
    /// IDE project name. Deduplication across the build tree may rewrite it.
    pub name: String,
    pub comment: Option<String>,
    pub natures: Vec<String>,
    pub build_commands: Vec<BuildCommand>,
    pub linked_resources: Vec<Link>,
    /// Hand-authored customisation of the persisted descriptor, if any.
    pub file: Option<Arc<dyn ProjectFileMerger>>,
}

impl EclipseProjectConfig {
    /// Descriptor content the IDE sees: the merged file when customised, else the configuration.
    pub fn descriptor(&self) -> ProjectDescriptor {
        let configured = ProjectDescriptor::configure(self);
        match &self.file {
            Some(merger) => merger.merge(configured),
            None => configured,
        }
    }
}

/// Merges hand-authored `.project` customisations into a generated descriptor.
///
/// Reading and writing the XML itself belongs to the persistence layer; this is the seam
/// where its result is handed over.
pub trait ProjectFileMerger: fmt::Debug + Send + Sync {
    fn merge(&self, generated: ProjectDescriptor) -> ProjectDescriptor;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub natures: Vec<String>,
    pub build_commands: Vec<BuildCommand>,
    pub linked_resources: Vec<Link>,
}

impl ProjectDescriptor {
    pub fn configure(project: &EclipseProjectConfig) -> Self {
        Self {
            natures: project.natures.clone(),
            build_commands: project.build_commands.clone(),
            linked_resources: project.linked_resources.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub name: String,
    pub arguments: IndexMap<String, String>,
}

impl BuildCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: IndexMap::new(),
        }
    }
}

/// A linked resource in the `.project` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub name: String,
    pub type_: String,
    pub location: Option<String>,
    pub location_uri: Option<String>,
}

/// Classpath configuration for one project.
#[derive(Debug, Clone, Default)]
pub struct EclipseClasspath {
    /// Configurations whose resolved artifacts make up the classpath, in order.
    pub plus_configurations: Vec<Configuration>,
    pub source_folders: Vec<SourceFolder>,
    pub containers: Vec<String>,
    pub default_output_dir: Option<String>,
    /// Entries merged from a hand-authored `.classpath`. When present they replace resolution.
    pub customized_entries: Option<Vec<ClasspathEntry>>,
}

/// A dependency configuration as already resolved by the build's dependency engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub name: String,
    pub artifacts: Vec<ResolvedArtifact>,
}

impl Configuration {
    pub fn new(name: impl Into<String>, artifacts: Vec<ResolvedArtifact>) -> Self {
        Self {
            name: name.into(),
            artifacts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedArtifact {
    Module(ModuleArtifact),
    Project(ProjectArtifact),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleArtifact {
    pub file: PathBuf,
    pub source_file: Option<PathBuf>,
    pub javadoc_file: Option<PathBuf>,
    pub module_version: Option<ModuleVersion>,
}

/// An artifact produced by another project of the build tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectArtifact {
    pub component: ProjectComponentId,
    pub file: PathBuf,
    /// Present when the resolver knows how the artifact is produced.
    pub metadata: Option<ArtifactMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactMetadata {
    pub build_dependencies: BuildDependencies,
}

/// Java compiler settings of the IDE project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EclipseJdt {
    pub source_compatibility: JavaVersion,
    pub target_compatibility: JavaVersion,
}

/// Java feature release number, e.g. `17`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JavaVersion(pub u16);

/// The JDK running the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdkInstallation {
    pub java_home: PathBuf,
    pub version: JavaVersion,
}
