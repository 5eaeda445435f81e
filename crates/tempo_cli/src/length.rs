//! `tempo length`, the track length that produces a given delay.

use std::sync::Arc;

use tempo_board::GeometryContext;
use tempo_common::{parse_time, IU_PER_MM};
use tempo_config::{ConfigError, ResolvedProject};
use tempo_delay::{TimeDomainParameters, UserDefinedTimeDomain};

use crate::project::load_project;
use crate::{GlobalArgs, LengthArgs, ReportFormat};

/// Runs the `tempo length` command.
pub fn run(args: &LengthArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let delay = parse_time(&args.delay)?.round() as i64;

    let Some(project) = load_project(global, ReportFormat::Text)? else {
        return Ok(1);
    };

    let length = track_length(&project, delay, &args.net_class, &args.layer)?;
    if length == 0 && delay != 0 && !global.quiet {
        eprintln!(
            "warning: {}",
            zero_length_reason(&project, &args.net_class, &args.layer)
        );
    }
    if global.verbose {
        eprintln!("    {delay} fs on {} ({})", args.layer, args.net_class);
    }
    println!("{:.4} mm", length as f64 / IU_PER_MM);
    Ok(0)
}

/// Returns the length of track on `layer` whose delay is `delay`, under the
/// profile of `net_class`.
pub fn track_length(
    project: &ResolvedProject,
    delay: i64,
    net_class: &str,
    layer: &str,
) -> Result<i64, ConfigError> {
    let class = project
        .net_classes
        .get(net_class)
        .ok_or_else(|| ConfigError::UnknownNetClass(net_class.to_string()))?;
    let layer_id = project
        .stackup
        .layer_by_name(layer)
        .ok_or_else(|| ConfigError::UnknownLayer(layer.to_string()))?;

    let params = UserDefinedTimeDomain::with_store(project.stackup.clone(), &project.store);
    let context = GeometryContext::new(Arc::clone(class), layer_id);
    Ok(params.track_length_for_delay(delay, &context))
}

/// Explains why a non-zero delay converted to zero length: the class is
/// untimed, its profile is undefined, or the profile has no usable rate
/// for the layer.
fn zero_length_reason(project: &ResolvedProject, net_class: &str, layer: &str) -> String {
    let Some(class) = project.net_classes.get(net_class) else {
        return format!("unknown net class '{net_class}'");
    };
    let profile_name = class.delay_profile();
    if profile_name.is_empty() {
        return format!("net class '{net_class}' has no delay profile");
    }
    match project.store.find(profile_name) {
        None => format!("net class '{net_class}' uses undefined delay profile '{profile_name}'"),
        Some(_) => format!("delay profile '{profile_name}' has no track delay for layer '{layer}'"),
    }
}
