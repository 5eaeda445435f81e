//! `tempo profiles`, a listing of the project's cached delay profiles.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tempo_board::{Stackup, StackupLayer};
use tempo_common::{LayerId, IU_PER_MM};
use tempo_config::ResolvedProject;
use tempo_profile::DelayProfileCache;

use crate::project::load_project;
use crate::{GlobalArgs, ProfilesArgs, ReportFormat};

/// One profile as the cache resolved it.
#[derive(Debug, Serialize)]
pub struct ProfileReport {
    /// The profile name.
    pub name: String,
    /// Default via delay per millimetre.
    pub via_delay: f64,
    /// Track delay per millimetre, by layer name.
    pub layers: BTreeMap<String, f64>,
    /// Distinct via overrides, with the delay that wins.
    pub via_overrides: Vec<OverrideReport>,
}

/// One via override.
#[derive(Debug, Serialize)]
pub struct OverrideReport {
    /// Signal entry and exit layer names.
    pub signal: [String; 2],
    /// Padstack layer names.
    pub via: [String; 2],
    /// The override delay in femtoseconds.
    pub delay: i64,
}

/// Runs the `tempo profiles` command.
pub fn run(args: &ProfilesArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let Some(project) = load_project(global, args.format)? else {
        return Ok(1);
    };

    if global.verbose {
        eprint!("{}", render_stackup(&project.stackup));
    }

    let reports = report(&project);
    match args.format {
        ReportFormat::Text => {
            for profile in &reports {
                print!("{}", render_text(profile));
            }
            if reports.is_empty() && !global.quiet {
                eprintln!("warning: project defines no delay profiles");
            }
        }
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }
    Ok(0)
}

/// Builds the cache from the project's store and reports every entry by
/// name.
pub fn report(project: &ResolvedProject) -> Vec<ProfileReport> {
    let cache = DelayProfileCache::from_store(&project.store);
    let stackup = &project.stackup;

    cache
        .profile_names()
        .into_iter()
        .filter_map(|name| cache.get(name))
        .map(|cached| {
            let profile = cached.profile();
            let layers = profile
                .layer_delays
                .iter()
                .map(|(layer, delay)| (layer_name(stackup, *layer), *delay))
                .collect();

            let mut seen = BTreeSet::new();
            let via_overrides = profile
                .via_overrides
                .iter()
                .map(|entry| entry.key())
                .filter(|key| seen.insert(*key))
                .filter_map(|key| {
                    cached.via_override(&key).map(|delay| OverrideReport {
                        signal: [
                            layer_name(stackup, key.signal_start),
                            layer_name(stackup, key.signal_end),
                        ],
                        via: [
                            layer_name(stackup, key.via_start),
                            layer_name(stackup, key.via_end),
                        ],
                        delay,
                    })
                })
                .collect();

            ProfileReport {
                name: cached.name().to_string(),
                via_delay: cached.via_delay(),
                layers,
                via_overrides,
            }
        })
        .collect()
}

fn layer_name(stackup: &Stackup, id: LayerId) -> String {
    stackup
        .layer_name(id)
        .map_or_else(|| id.to_string(), str::to_string)
}

/// Lists the stack the via heights are measured against, top to bottom.
fn render_stackup(stackup: &Stackup) -> String {
    let mut out = format!(
        "    Stackup {:.4} mm\n",
        stackup.board_thickness() as f64 / IU_PER_MM
    );
    for layer in stackup.layers() {
        let (name, kind) = match layer {
            StackupLayer::Copper { name, .. } => (name, "copper"),
            StackupLayer::Dielectric { name, .. } => (name, "dielectric"),
        };
        out.push_str(&format!(
            "      {name:<16} {kind:<10} {:.4} mm\n",
            layer.thickness() as f64 / IU_PER_MM
        ));
    }
    out
}

fn render_text(profile: &ProfileReport) -> String {
    let mut out = format!("{}\n", profile.name);
    out.push_str(&format!("  {:<16} {} fs/mm\n", "via", profile.via_delay));
    for (layer, delay) in &profile.layers {
        out.push_str(&format!("  {layer:<16} {delay} fs/mm\n"));
    }
    for entry in &profile.via_overrides {
        out.push_str(&format!(
            "  override {}->{} via {}->{}: {} fs\n",
            entry.signal[0], entry.signal[1], entry.via[0], entry.via[1], entry.delay
        ));
    }
    out
}
