//! End-to-end test for the resolution engine
//!
//! Exercises the complete flow: persisted records -> catalogs ->
//! configuration resolution -> plugin pipeline over a node stream.

use onyx_config::{CliIntent, ConfigResolver, PluginFlag, PluginsFileConfig};
use onyx_plugins::{
    DescriptorCandidate, Diagnostic, Error as PluginError, LineGen, Node, OptionValue, Plugin,
    PluginContext, PluginOptions, PluginPipeline, PluginRecord, PluginRegistry,
};
use onyx_profiles::{
    Origin, ProfileRecord, ProfileStore, SettingKey, builtin_profiles,
};
use pretty_assertions::assert_eq;

/// Sorts the lines of an import block.
struct ImportSorter {
    reverse: bool,
}

impl ImportSorter {
    fn new() -> Self {
        Self { reverse: false }
    }
}

impl Plugin for ImportSorter {
    fn name(&self) -> &str {
        "import_sorter"
    }

    fn default_options(&self) -> PluginOptions {
        PluginOptions::from([("reverse".to_string(), OptionValue::Bool(false))])
    }

    fn configure(&mut self, options: &PluginOptions) -> onyx_plugins::Result<()> {
        if let Some(OptionValue::Bool(reverse)) = options.get("reverse") {
            self.reverse = *reverse;
        }
        Ok(())
    }

    fn apply(
        &self,
        node: &Node,
        _context: &PluginContext,
        _line_gen: LineGen<'_>,
    ) -> onyx_plugins::Result<Option<Vec<String>>> {
        if node.kind != "import_block" {
            return Ok(None);
        }
        let mut lines: Vec<String> = node.source.lines().map(String::from).collect();
        lines.sort();
        if self.reverse {
            lines.reverse();
        }
        Ok(Some(lines))
    }
}

/// Fails on every invocation; used to prove failure isolation.
struct Faulty;

impl Plugin for Faulty {
    fn name(&self) -> &str {
        "faulty"
    }

    fn apply(
        &self,
        _node: &Node,
        _context: &PluginContext,
        _line_gen: LineGen<'_>,
    ) -> onyx_plugins::Result<Option<Vec<String>>> {
        Err(PluginError::Failure("broken plugin logic".to_string()))
    }
}

fn candidate_from_record(toml: &str, origin: Origin, path: &str) -> DescriptorCandidate {
    PluginRecord::parse(toml)
        .unwrap()
        .into_candidate(origin, path)
}

fn sorter_candidate() -> DescriptorCandidate {
    candidate_from_record(
        r#"
[plugin]
name = "import_sorter"
description = "Sorts import blocks"
version = "0.1.0"
entry_point = "import_sorter:apply"

[plugin.default_options]
reverse = false
"#,
        Origin::User,
        "/user/plugins/import_sorter.toml",
    )
}

fn faulty_candidate() -> DescriptorCandidate {
    candidate_from_record(
        r#"
[plugin]
name = "faulty"
description = "Always fails"
version = "0.1.0"
entry_point = "faulty:apply"
"#,
        Origin::User,
        "/user/plugins/faulty.toml",
    )
}

fn fallback_line_gen(node: &Node) -> Vec<String> {
    vec![format!("formatted::{}", node.source)]
}

#[test]
fn records_to_pipeline_full_flow() {
    // Project tier replaces the built-in vscode profile wholesale.
    let project_profile = ProfileRecord::parse(
        r#"
[profile]
name = "vscode"
description = "project copy"
parent = "default"

[profile.settings]
line_length = 90
"#,
    )
    .unwrap()
    .into_profile(Origin::Project)
    .unwrap();

    let store = ProfileStore::load([
        (Origin::BuiltIn, builtin_profiles()),
        (Origin::Project, vec![project_profile]),
    ])
    .unwrap();

    let (registry, diagnostics) = PluginRegistry::discover([sorter_candidate()]);
    assert!(diagnostics.is_empty());

    let intent = CliIntent {
        profile: Some("vscode".to_string()),
        settings: vec![("preview".to_string(), "true".to_string())],
        plugins: vec![PluginFlag::parse("import_sorter:reverse=true").unwrap()],
        ..CliIntent::default()
    };
    let file_config = PluginsFileConfig::default();

    let config = ConfigResolver::new(&store, &registry, &file_config, &intent)
        .resolve()
        .unwrap();

    // Settings: project profile replaced built-in, CLI added preview.
    assert_eq!(
        config.settings.get(SettingKey::LineLength).unwrap().as_int(),
        Some(90)
    );
    assert_eq!(
        config.settings.get(SettingKey::Preview).unwrap().as_bool(),
        Some(true)
    );

    // Pipeline: the sorter got its CLI-merged options.
    let mut pipeline = PluginPipeline::build(
        config.pipeline_entries(),
        vec![Box::new(ImportSorter::new())],
        config.settings.clone(),
    );

    let imports = Node::new("import_block", "module", "import sys\nimport os");
    let mut line_gen = fallback_line_gen;
    let lines = pipeline.apply(&imports, &mut line_gen).unwrap();
    assert_eq!(lines, vec!["import sys".to_string(), "import os".to_string()]);

    // A node no plugin claims falls back to the caller.
    let other = Node::new("pass_statement", "module.f", "pass");
    assert_eq!(pipeline.apply(&other, &mut line_gen), None);
}

#[test]
fn disable_all_with_explicit_reenable_runs_one_plugin() {
    let store = ProfileStore::load([(Origin::BuiltIn, builtin_profiles())]).unwrap();
    let (registry, _) = PluginRegistry::discover([sorter_candidate(), faulty_candidate()]);

    let intent = CliIntent {
        disable_all: true,
        plugins: vec![PluginFlag::parse("import_sorter").unwrap()],
        ..CliIntent::default()
    };
    let file_config = PluginsFileConfig::default();

    let config = ConfigResolver::new(&store, &registry, &file_config, &intent)
        .resolve()
        .unwrap();
    assert!(config.plugin("import_sorter").unwrap().enabled);
    assert!(!config.plugin("faulty").unwrap().enabled);

    let pipeline = PluginPipeline::build(
        config.pipeline_entries(),
        vec![Box::new(ImportSorter::new()), Box::new(Faulty)],
        config.settings.clone(),
    );
    assert_eq!(pipeline.plugin_names(), vec!["import_sorter"]);
}

#[test]
fn faulty_plugin_defers_and_run_completes() {
    let store = ProfileStore::load([(Origin::BuiltIn, builtin_profiles())]).unwrap();
    // faulty registers first, so it is invoked ahead of the sorter
    let (registry, _) = PluginRegistry::discover([faulty_candidate(), sorter_candidate()]);

    let intent = CliIntent::default();
    let file_config = PluginsFileConfig::default();
    let config = ConfigResolver::new(&store, &registry, &file_config, &intent)
        .resolve()
        .unwrap();

    let mut pipeline = PluginPipeline::build(
        config.pipeline_entries(),
        vec![Box::new(Faulty), Box::new(ImportSorter::new())],
        config.settings.clone(),
    );

    let imports = Node::new("import_block", "module", "import b\nimport a");
    let mut line_gen = fallback_line_gen;
    let lines = pipeline.apply(&imports, &mut line_gen).unwrap();

    // The sorter still produced its replacement.
    assert_eq!(lines, vec!["import a".to_string(), "import b".to_string()]);
    // And the failure was recorded against the faulty plugin.
    assert!(pipeline.diagnostics().iter().any(|d| matches!(
        d,
        Diagnostic::PluginExecution { plugin, .. } if plugin == "faulty"
    )));
}

#[test]
fn exported_profile_survives_reload_through_the_resolver() {
    let store = ProfileStore::load([(Origin::BuiltIn, builtin_profiles())]).unwrap();
    let registry = PluginRegistry::new();
    let file_config = PluginsFileConfig::default();
    let intent = CliIntent {
        profile: Some("compact".to_string()),
        ..CliIntent::default()
    };

    let before = ConfigResolver::new(&store, &registry, &file_config, &intent)
        .resolve()
        .unwrap();

    // Export the profile, reload it at project tier, resolve again.
    let exported = store.get("compact").unwrap().to_record().to_toml_string().unwrap();
    let reloaded = ProfileRecord::parse(&exported)
        .unwrap()
        .into_profile(Origin::Project)
        .unwrap();
    let store = ProfileStore::load([
        (Origin::BuiltIn, builtin_profiles()),
        (Origin::Project, vec![reloaded]),
    ])
    .unwrap();

    let after = ConfigResolver::new(&store, &registry, &file_config, &intent)
        .resolve()
        .unwrap();

    assert_eq!(before.settings, after.settings);
}
