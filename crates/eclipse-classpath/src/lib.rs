//! Classpath resolution for the Eclipse IDE model.
//!
//! A project's classpath is resolved by a [`ClasspathResolver`] (the build's dependency engine,
//! or the persisted `.classpath` merge result) and then gathered into the typed buckets exposed
//! to IDE clients. Gathering is where workspace state matters: a project dependency on a project
//! the IDE has closed is replaced by the artifact that project publishes.

mod dependency_builder;
mod gather;
mod resolve;

pub use dependency_builder::{IdeArtifactRegistry, ProjectDependencyBuilder};
pub use gather::{
    access_rule_kind, gather_classpath, gather_project_classpath, GatheredClasspath,
    DEFAULT_OUTPUT_LOCATION,
};
pub use resolve::{ArtifactClasspathResolver, ClasspathResolver, ResolveError, ResolveRequest};
