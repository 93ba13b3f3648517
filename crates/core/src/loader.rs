//! Project loading
//!
//! Reads the root config file, discovers fragment files through the project's
//! `includes` patterns and builds the [`TargetRegistry`] from all of them.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::configs::project::{parse_project_config, ProjectConfig};
use crate::configs::targets::{parse_targets_config, TargetConfig, TargetsFileConfig};
use crate::registry::{Target, TargetRegistry};
use crate::types::{PhonyError, PhonyResult};

/// File names looked up in the project root, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["phony.yml", "phony.yaml"];

const DEFAULT_INCLUDE_GLOBS: &[&str] = &[".phony/targets/*.yml", ".phony/targets/*.yaml"];
const DEFAULT_EXCLUDE_GLOBS: &[&str] = &[
    "**/.git",
    "**/target",
    "**/node_modules",
    "**/.venv",
    "**/.tox",
];

/// Everything read from disk for one project
#[derive(Debug)]
pub struct LoadedProject {
    pub config_file: PathBuf,
    pub config: ProjectConfig,
    pub fragment_files: Vec<PathBuf>,
    pub registry: TargetRegistry,
}

/// Load the project rooted at `root`, from `config_file` when given
pub fn load_project(root: &Path, config_file: Option<&Path>) -> PhonyResult<LoadedProject> {
    let config_file = match config_file {
        Some(path) if path.is_relative() => root.join(path),
        Some(path) => path.to_path_buf(),
        None => find_config_file(root)?,
    };
    log::debug!("Loading project config {}", config_file.display());
    let config = load_project_config(&config_file)?;

    let includes = match &config.includes {
        Some(patterns) => patterns.clone(),
        None => DEFAULT_INCLUDE_GLOBS.iter().map(|s| s.to_string()).collect(),
    };
    let fragment_files = discover_target_files(root, &includes)?
        .into_iter()
        .filter(|path| !same_file(path, &config_file))
        .collect::<Vec<_>>();

    let mut fragments = Vec::with_capacity(fragment_files.len());
    for path in &fragment_files {
        log::debug!("Loading target file {}", path.display());
        fragments.push(load_targets_file(path)?);
    }

    let registry = build_registry(&config, fragments)?;
    log::info!(
        "Loaded {} target(s) from {} file(s)",
        registry.len(),
        fragment_files.len() + 1
    );

    Ok(LoadedProject {
        config_file,
        config,
        fragment_files,
        registry,
    })
}

/// First of [`CONFIG_FILE_NAMES`] present in `root`
pub fn find_config_file(root: &Path) -> PhonyResult<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            PhonyError::Config(format!(
                "No {} found in {}",
                CONFIG_FILE_NAMES.join(" or "),
                root.display()
            ))
        })
}

pub fn load_project_config(path: &Path) -> PhonyResult<ProjectConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        PhonyError::Config(format!("Failed to read config {}: {}", path.display(), e))
    })?;

    parse_project_config(&content).map_err(|e| {
        PhonyError::Config(format!("Failed to parse config {}: {}", path.display(), e))
    })
}

pub fn load_targets_file(path: &Path) -> PhonyResult<TargetsFileConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        PhonyError::Config(format!(
            "Failed to read target file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_targets_config(&content).map_err(|e| {
        PhonyError::Config(format!(
            "Failed to parse target file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Files under `root` matching any of `includes`, sorted by path
///
/// Only directories that can still lead to a match are walked, and symlinked
/// directories are never entered.
pub fn discover_target_files(root: &Path, includes: &[String]) -> PhonyResult<Vec<PathBuf>> {
    if includes.is_empty() {
        return Ok(Vec::new());
    }

    let include_set = build_glob_set(includes.iter().map(String::as_str))?;
    let exclude_set = build_glob_set(DEFAULT_EXCLUDE_GLOBS.iter().copied())?;
    let prefixes: Vec<PathBuf> = includes.iter().map(|p| literal_prefix(p)).collect();

    let mut found = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(root.to_path_buf());

    while let Some(current_dir) = queue.pop_front() {
        let entries = match std::fs::read_dir(&current_dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Skipping {}: {}", current_dir.display(), e);
                continue;
            }
        };

        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let path = entry.path();
            let relative_path = path.strip_prefix(root).unwrap_or(&path);

            if file_type.is_dir() {
                if !exclude_set.is_match(relative_path)
                    && prefixes.iter().any(|prefix| may_contain_match(relative_path, prefix))
                {
                    queue.push_back(path);
                }
            } else if (file_type.is_file() || (file_type.is_symlink() && path.is_file()))
                && include_set.is_match(relative_path)
            {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}

/// Leading components of `pattern` that contain no glob syntax
fn literal_prefix(pattern: &str) -> PathBuf {
    let components: Vec<&str> = pattern.split('/').collect();
    // The last component names files, never a directory to descend into
    let dirs = &components[..components.len().saturating_sub(1)];
    dirs.iter()
        .take_while(|part| !part.contains(['*', '?', '[', '{']))
        .collect()
}

/// Whether `dir` is on the way to `prefix` or already below it
fn may_contain_match(dir: &Path, prefix: &Path) -> bool {
    prefix.starts_with(dir) || dir.starts_with(prefix)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn build_glob_set<'a>(patterns: impl IntoIterator<Item = &'a str>) -> PhonyResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            PhonyError::Config(format!("Invalid include pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| PhonyError::Config(format!("Invalid include patterns: {}", e)))
}

/// Register the root file's targets, then each fragment's, in order
pub fn build_registry(
    project: &ProjectConfig,
    fragments: Vec<TargetsFileConfig>,
) -> PhonyResult<TargetRegistry> {
    let project_env = project.env.clone().unwrap_or_default();
    let mut registry = TargetRegistry::new();

    let root_targets = project.targets.clone().unwrap_or_default();
    let fragment_targets = fragments.into_iter().flat_map(|fragment| fragment.targets);

    for config in root_targets.into_iter().chain(fragment_targets) {
        registry.register(target_from_config(config, &project_env))?;
    }

    if let Some(default) = &project.default {
        if !registry.contains(default) {
            return Err(PhonyError::Config(format!(
                "Default target '{}' is not defined",
                default
            )));
        }
    }

    Ok(registry)
}

/// Convert a parsed target, layering its env over the project-wide env
pub fn target_from_config(config: TargetConfig, project_env: &BTreeMap<String, String>) -> Target {
    let mut env = project_env.clone();
    env.extend(config.env.unwrap_or_default());

    Target {
        name: config.name,
        description: config.description,
        prerequisites: config.dependencies.unwrap_or_default(),
        commands: config.command.map(|c| c.into_lines()).unwrap_or_default(),
        env,
        working_directory: config.working_directory.map(PathBuf::from),
        always_run: config.always_run.unwrap_or(true),
        outputs: config
            .outputs
            .unwrap_or_default()
            .into_iter()
            .map(PathBuf::from)
            .collect(),
    }
}
