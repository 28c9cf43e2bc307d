//! Merging a fresh scan with a previous layout
//!
//! Existing scenes are visited first, in file order:
//!
//! | scene component            | outcome                                 |
//! |----------------------------|-----------------------------------------|
//! | found in scan, preserve on | kept with its position, size and label  |
//! | found in scan, preserve off| dropped, regenerated below              |
//! | gone from scan, prune on   | removed                                 |
//! | gone from scan, prune off  | kept verbatim                           |
//! | not identifiable           | kept verbatim, never pruned             |
//!
//! A scene's component is the first body tag found by the scan. A body with
//! several tags and none of them scanned is not identifiable; a wrapped body
//! whose component is kept stays verbatim.
//!
//! Components still without a scene then get new ones, in scan order.

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

use super::placement::Placer;
use super::types::{scene_id_for, LayoutDocument, Rect, SceneComponent, SceneEntry};
use crate::config::{SyncConfig, SyncOptions};
use crate::scanner::{components_cluster, ComponentRecord, Size};

/// Counts of what merge did with each scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Existing scenes carried forward with their geometry
    pub kept: usize,
    /// New scenes placed by the layout strategies
    pub created: usize,
    /// Existing scenes removed because their component is gone
    pub pruned: usize,
    /// Existing scenes dropped so they could be regenerated
    pub regenerated: usize,
    /// Existing scenes emitted unchanged
    pub verbatim: usize,
    /// Components left without a scene
    pub skipped: usize,
}

/// Merge `scan` with `existing` into the document to render.
pub fn merge(
    scan: &[ComponentRecord],
    existing: Option<&LayoutDocument>,
    config: &SyncConfig,
    options: &SyncOptions,
) -> LayoutDocument {
    merge_with_report(scan, existing, config, options).0
}

/// Same as [`merge`], also returning what happened to each scene.
pub fn merge_with_report(
    scan: &[ComponentRecord],
    existing: Option<&LayoutDocument>,
    config: &SyncConfig,
    options: &SyncOptions,
) -> (LayoutDocument, MergeReport) {
    let by_name: HashMap<&str, &ComponentRecord> =
        scan.iter().map(|r| (r.name.as_str(), r)).collect();

    let mut report = MergeReport::default();
    let mut scenes: Vec<SceneEntry> = Vec::new();
    let mut used_ids: HashSet<String> = HashSet::new();
    let mut covered: HashSet<&str> = HashSet::new();

    for scene in existing.map(|doc| doc.scenes.as_slice()).unwrap_or_default() {
        if used_ids.contains(&scene.scene_id) {
            continue;
        }

        let name = scene.component.identify(|n| by_name.contains_key(n));
        let kept = match name.map(|n| (n, by_name.get(n))) {
            None => {
                report.verbatim += 1;
                Some(scene.clone())
            }
            Some((name, Some(record))) => {
                if options.preserve {
                    report.kept += 1;
                    covered.insert(record.name.as_str());
                    // re-rendering a wrapped body would drop its wrappers
                    let component = if scene.component.is_wrapped() {
                        scene.component.clone()
                    } else {
                        SceneComponent::Resolved((*record).clone())
                    };
                    Some(SceneEntry {
                        component,
                        ..scene.clone()
                    })
                } else {
                    debug!(scene_id = %scene.scene_id, component = %name, "Regenerating scene");
                    report.regenerated += 1;
                    None
                }
            }
            Some((name, None)) => {
                if options.prune {
                    info!(scene_id = %scene.scene_id, component = %name, "Pruning scene of removed component");
                    report.pruned += 1;
                    None
                } else {
                    report.verbatim += 1;
                    Some(scene.clone())
                }
            }
        };

        if let Some(kept) = kept {
            used_ids.insert(kept.scene_id.clone());
            scenes.push(kept);
        }
    }

    let create_missing = existing.is_none() || options.force_regenerate;
    let missing: Vec<&ComponentRecord> = scan
        .iter()
        .filter(|r| !covered.contains(r.name.as_str()))
        .collect();

    if create_missing {
        let occupied: Vec<Rect> = scenes.iter().map(SceneEntry::rect).collect();
        let new_scenes = place_new_scenes(&missing, occupied, &mut used_ids, config);
        report.created = new_scenes.len();
        scenes.extend(new_scenes);
    } else {
        report.skipped = missing.len();
        if !missing.is_empty() {
            info!(count = missing.len(), "Components without a scene left out");
        }
    }

    let carried_imports = existing
        .map(|doc| doc.carried_imports.clone())
        .unwrap_or_default();

    let document = LayoutDocument {
        scenes,
        carried_imports,
    };
    (document, report)
}

/// Build scenes for components lacking one, in scan order.
fn place_new_scenes(
    missing: &[&ComponentRecord],
    occupied: Vec<Rect>,
    used_ids: &mut HashSet<String>,
    config: &SyncConfig,
) -> Vec<SceneEntry> {
    let default_size = Size::new(config.layout.default_width, config.layout.default_height);
    let sizes: Vec<Size> = missing.iter().map(|r| r.scene_size(default_size)).collect();

    let mut row: Vec<usize> = Vec::new();
    let mut clusters: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, record) in missing.iter().enumerate() {
        match components_cluster(&record.source_path, &config.components_dir) {
            Some(cluster) => clusters.entry(cluster).or_default().push(i),
            None => row.push(i),
        }
    }

    let mut placer = Placer::new(&config.layout, occupied);
    let mut positions = vec![None; missing.len()];

    let row_sizes: Vec<Size> = row.iter().map(|&i| sizes[i]).collect();
    for (&i, position) in row.iter().zip(placer.place_row(&row_sizes)) {
        positions[i] = Some(position);
    }

    let cluster_sizes: Vec<Vec<Size>> = clusters
        .values()
        .map(|members| members.iter().map(|&i| sizes[i]).collect())
        .collect();
    let placed = placer.place_clusters(&cluster_sizes);
    for (members, cluster_positions) in clusters.values().zip(placed) {
        for (&i, position) in members.iter().zip(cluster_positions) {
            positions[i] = Some(position);
        }
    }

    missing
        .iter()
        .zip(sizes)
        .zip(positions)
        .filter_map(|((record, size), position)| {
            let position = position?;
            let scene_id = unique_scene_id(&record.name, used_ids);
            debug!(
                scene_id = %scene_id,
                left = position.left,
                top = position.top,
                width = size.width,
                height = size.height,
                "Placed new scene"
            );
            Some(SceneEntry {
                scene_id,
                position,
                size,
                label: record.name.clone(),
                component: SceneComponent::Resolved((*record).clone()),
            })
        })
        .collect()
}

/// `name-scene`, or `name-scene-2`, `-3`, ... when taken
fn unique_scene_id(name: &str, used_ids: &mut HashSet<String>) -> String {
    let base = scene_id_for(name);
    let mut candidate = base.clone();
    let mut n = 2;
    while used_ids.contains(&candidate) {
        candidate = format!("{}-{}", base, n);
        n += 1;
    }
    used_ids.insert(candidate.clone());
    candidate
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
