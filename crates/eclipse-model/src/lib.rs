//! Shared data model for the Eclipse IDE project integration.
//!
//! This crate is intentionally data-only:
//! - classpath entries as resolved (or merged from a persisted `.classpath`)
//! - the request-scoped build tree the model builders walk
//! - the workspace description supplied by the IDE
//! - the DTOs handed back to IDE tooling clients

mod build;
pub mod dto;
mod entry;
mod ide;
mod workspace;

pub use build::{
    Build, BuildDependencies, BuildId, BuildTree, BuildTreeBuilder, BuildTreeError, Project,
    ProjectComponentId, ProjectId, StartParameter, Task,
};
pub use dto::*;
pub use entry::{
    AccessRule, ClasspathEntry, ClasspathEntryError, Container, EntryAttributes, Library,
    ModuleVersion, Output, ProjectDependency, SourceFolder, Variable,
};
pub use ide::{
    ArtifactMetadata, BuildCommand, Configuration, EclipseClasspath, EclipseJdt, EclipseModel,
    EclipseProjectConfig, JavaVersion, JdkInstallation, Link, ModuleArtifact, ProjectArtifact,
    ProjectDescriptor, ProjectFileMerger, ResolvedArtifact,
};
pub use workspace::{EclipseRuntime, EclipseWorkspace, EclipseWorkspaceProject, WorkspaceProjects};
