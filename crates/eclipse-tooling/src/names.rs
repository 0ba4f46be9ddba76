use std::collections::{BTreeMap, HashMap, HashSet};

use eclipse_model::{BuildId, BuildTree, EclipseRuntime, ProjectId};

/// Names of workspace projects that do not belong to the build tree of `build`.
///
/// The build's own projects must not take these names. Workspace entries without a name or a
/// location are skipped; a missing runtime, workspace, or project list reserves nothing.
pub fn calculate_reserved_project_names(
    tree: &BuildTree,
    build: BuildId,
    parameter: Option<&EclipseRuntime>,
) -> Vec<String> {
    let Some(projects) = parameter.and_then(EclipseRuntime::projects) else {
        return Vec::new();
    };

    let mut reserved = Vec::new();
    for project in projects {
        let (Some(name), Some(location)) = (&project.name, &project.location) else {
            tracing::warn!(
                target = "eclipse.tooling",
                name = ?project.name,
                location = ?project.location,
                "ignoring workspace project without name or location"
            );
            continue;
        };
        // Workspace projects from the root build and included builds are not external.
        if !tree.owns_location(build, location) {
            reserved.push(name.clone());
        }
    }
    reserved
}

/// Unique IDE names for every project that has IDE configuration.
///
/// Projects sharing a name, or using a reserved one, get their ancestors' names prefixed
/// (`parent-child`, then `grandparent-parent-child`, ...) until the clash is gone or no
/// ancestors are left. An ancestor whose name already leads the current name is skipped.
pub fn unique_project_names(tree: &BuildTree, reserved: &[String]) -> HashMap<ProjectId, String> {
    let reserved: HashSet<&str> = reserved.iter().map(String::as_str).collect();

    struct Candidate {
        id: ProjectId,
        name: String,
        ancestors: Vec<String>,
        next_ancestor: usize,
    }

    let mut candidates: Vec<Candidate> = tree
        .all_projects()
        .filter_map(|id| {
            let name = tree.eclipse_name(id)?.to_string();
            let mut ancestors = Vec::new();
            let mut parent = tree.project(id).parent();
            while let Some(ancestor) = parent {
                let ancestor_name = tree
                    .eclipse_name(ancestor)
                    .unwrap_or(&tree.project(ancestor).name);
                ancestors.push(ancestor_name.to_string());
                parent = tree.project(ancestor).parent();
            }
            Some(Candidate {
                id,
                name,
                ancestors,
                next_ancestor: 0,
            })
        })
        .collect();

    loop {
        let mut by_name: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (index, candidate) in candidates.iter().enumerate() {
            by_name.entry(&candidate.name).or_default().push(index);
        }

        let clashing: Vec<usize> = by_name
            .into_iter()
            .filter(|(name, members)| members.len() > 1 || reserved.contains(name))
            .flat_map(|(_, members)| members)
            .collect();

        let mut progressed = false;
        for index in clashing {
            let candidate = &mut candidates[index];
            let Some(ancestor) = candidate.ancestors.get(candidate.next_ancestor) else {
                continue;
            };
            if candidate.name != *ancestor && !candidate.name.starts_with(&format!("{ancestor}-"))
            {
                candidate.name = format!("{ancestor}-{}", candidate.name);
            }
            candidate.next_ancestor += 1;
            progressed = true;
        }

        if !progressed {
            break;
        }
    }

    candidates
        .into_iter()
        .map(|candidate| (candidate.id, candidate.name))
        .collect()
}

/// Writes [`unique_project_names`] back to the IDE configuration of every project.
///
/// Names reserved for `build` are the workspace projects it does not own. Project dependencies
/// resolved afterwards carry the final names.
pub fn deduplicate_project_names(
    tree: &mut BuildTree,
    build: BuildId,
    parameter: Option<&EclipseRuntime>,
) {
    let reserved = calculate_reserved_project_names(tree, build, parameter);
    let names = unique_project_names(tree, &reserved);
    for (id, name) in names {
        if let Some(model) = tree.project_mut(id).eclipse.as_mut() {
            if model.project.name != name {
                tracing::debug!(
                    target = "eclipse.tooling",
                    from = %model.project.name,
                    to = %name,
                    "renamed IDE project"
                );
            }
            model.project.name = name;
        }
    }
}
