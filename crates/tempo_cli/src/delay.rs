//! `tempo delay`, per-item propagation delays grouped by net class.
//!
//! Items are batched per net class so that every batch shares one delay
//! profile. Each class gets an item table and a [`DelayBreakdown`].

use serde::Serialize;
use tempo_board::{GeometryContext, ItemKind, MergeStatus, RoutedItem, Stackup};
use tempo_common::{LayerId, TIME_IU_PER_PS};
use tempo_config::{ConfigError, ResolvedProject};
use tempo_delay::{DelayBreakdown, TimeDomainParameters, UserDefinedTimeDomain};

use crate::project::load_project;
use crate::{DelayArgs, GlobalArgs, ReportFormat};

/// The delays of one net class.
#[derive(Debug, Serialize)]
pub struct ClassReport {
    /// The net class name.
    pub net_class: String,
    /// The delay profile the class selects, empty when untimed.
    pub delay_profile: String,
    /// Whether the profile exists.
    pub timed: bool,
    /// One row per item, in declaration order.
    pub items: Vec<ItemReport>,
    /// Totals over the class.
    pub breakdown: DelayBreakdown,
}

/// The delay of one routed item.
#[derive(Debug, Serialize)]
pub struct ItemReport {
    /// Position of the item in the project file.
    pub index: usize,
    /// "line", "via", "pad" or "other".
    pub kind: &'static str,
    /// Layer or layer span, by name.
    pub layers: String,
    /// Merge status of the item.
    pub merge: MergeStatus,
    /// Propagation delay in femtoseconds.
    pub delay: i64,
}

/// Runs the `tempo delay` command.
pub fn run(args: &DelayArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let Some(project) = load_project(global, args.format)? else {
        return Ok(1);
    };

    let reports = report(&project, args.net_class.as_deref())?;

    match args.format {
        ReportFormat::Text => {
            for class in &reports {
                print!("{}", render_text(class));
            }
            if reports.is_empty() && !global.quiet {
                eprintln!("warning: no routed items to time");
            }
        }
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }
    Ok(0)
}

/// Times every item of the project, one batch per net class.
///
/// With `only` set, just that class is reported; naming a class that does
/// not exist is an error.
pub fn report(
    project: &ResolvedProject,
    only: Option<&str>,
) -> Result<Vec<ClassReport>, ConfigError> {
    if let Some(name) = only {
        if !project.net_classes.contains_key(name) {
            return Err(ConfigError::UnknownNetClass(name.to_string()));
        }
    }

    let params = UserDefinedTimeDomain::with_store(project.stackup.clone(), &project.store);
    let default_layer = project
        .stackup
        .copper_layers()
        .first()
        .copied()
        .unwrap_or_else(|| LayerId::from_raw(0));

    let mut reports = Vec::new();
    for (name, class) in &project.net_classes {
        if only.is_some_and(|only| only != name.as_str()) {
            continue;
        }

        let (indices, items): (Vec<usize>, Vec<RoutedItem>) = project
            .items_in_class(name)
            .map(|(index, item)| (index, item.clone()))
            .unzip();
        let Some(first) = items.first() else {
            continue;
        };

        let context = GeometryContext::for_item(first, default_layer);
        let delays = params.propagation_delays(&items, &context);
        let breakdown = DelayBreakdown::compute(&params, &items, &context);

        let rows = indices
            .into_iter()
            .zip(&items)
            .zip(delays)
            .map(|((index, item), delay)| ItemReport {
                index,
                kind: kind_name(&item.kind),
                layers: layer_span(&project.stackup, &item.kind),
                merge: item.merge_status,
                delay,
            })
            .collect();

        reports.push(ClassReport {
            net_class: name.clone(),
            delay_profile: class.delay_profile.clone(),
            timed: params.cache().get(class.delay_profile()).is_some(),
            items: rows,
            breakdown,
        });
    }
    Ok(reports)
}

fn kind_name(kind: &ItemKind) -> &'static str {
    match kind {
        ItemKind::Line { .. } => "line",
        ItemKind::Via { .. } => "via",
        ItemKind::Pad { .. } => "pad",
        ItemKind::Other => "other",
    }
}

fn layer_span(stackup: &Stackup, kind: &ItemKind) -> String {
    let name = |id: LayerId| {
        stackup
            .layer_name(id)
            .map_or_else(|| id.to_string(), str::to_string)
    };
    match kind {
        ItemKind::Line { layer, .. } => name(*layer),
        ItemKind::Via {
            signal_start,
            signal_end,
            ..
        } => format!("{}->{}", name(*signal_start), name(*signal_end)),
        ItemKind::Pad { .. } | ItemKind::Other => String::new(),
    }
}

/// Formats a delay in femtoseconds, switching to picoseconds from 1 ps up.
pub fn format_delay(fs: i64) -> String {
    if fs.abs() < TIME_IU_PER_PS as i64 {
        format!("{fs} fs")
    } else {
        format!("{:.3} ps", fs as f64 / TIME_IU_PER_PS)
    }
}

fn render_text(class: &ClassReport) -> String {
    let mut out = String::new();
    let profile = match (class.delay_profile.as_str(), class.timed) {
        ("", _) => "untimed".to_string(),
        (name, true) => format!("profile {name}"),
        (name, false) => format!("profile {name}, undefined"),
    };
    out.push_str(&format!("{} ({profile})\n", class.net_class));

    for item in &class.items {
        let retired = if item.merge == MergeStatus::MergedRetired {
            "  (retired)"
        } else {
            ""
        };
        out.push_str(&format!(
            "  #{:<4} {:<5} {:<16} {:>12}{retired}\n",
            item.index,
            item.kind,
            item.layers,
            format_delay(item.delay)
        ));
    }

    let b = &class.breakdown;
    out.push_str(&format!(
        "  total {}  (track {}, via {}, pad {})\n",
        format_delay(b.total()),
        format_delay(b.track_delay),
        format_delay(b.via_delay),
        format_delay(b.pad_to_die_delay)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::tests::{board, BOARD};
    use tempo_common::IU_PER_MM;
    use tempo_diagnostics::DiagnosticSink;

    #[test]
    fn report_groups_by_net_class() {
        let reports = report(&board(), None).unwrap();
        let names: Vec<&str> = reports.iter().map(|r| r.net_class.as_str()).collect();
        assert_eq!(names, vec!["DDR", "GPIO"]);
    }

    #[test]
    fn ddr_item_delays() {
        let reports = report(&board(), Some("DDR")).unwrap();
        assert_eq!(reports.len(), 1);
        let ddr = &reports[0];
        assert!(ddr.timed);
        let delays: Vec<i64> = ddr.items.iter().map(|i| i.delay).collect();
        // pad, 10mm on F.Cu, via through the 1.6mm core, 5mm on B.Cu, retired copy.
        assert_eq!(delays, vec![25, 50, 16, 30, 0]);
        assert_eq!(ddr.items[2].layers, "F.Cu->B.Cu");
        assert_eq!(ddr.items[4].index, 4);
        assert_eq!(ddr.breakdown.total(), 121);
        assert_eq!(ddr.breakdown.retired_count, 1);
    }

    #[test]
    fn untimed_class_is_zero() {
        let reports = report(&board(), Some("GPIO")).unwrap();
        let gpio = &reports[0];
        assert!(!gpio.timed);
        assert_eq!(gpio.items[0].index, 5);
        assert_eq!(gpio.items[0].delay, 0);
        assert_eq!(gpio.breakdown.total(), 0);
    }

    #[test]
    fn far_apart_points_time_without_panicking() {
        let toml = format!(
            "{BOARD}\n[[items]]\nkind = \"line\"\nnet_class = \"DDR\"\nlayer = \"F.Cu\"\n\
             points = [[-5e12, 0.0], [5e12, 0.0]]\n"
        );
        let project = tempo_config::load_config_from_str(&toml)
            .unwrap()
            .resolve(&DiagnosticSink::new())
            .unwrap();
        let reports = report(&project, Some("DDR")).unwrap();
        let last = reports[0].items.last().unwrap();
        assert_eq!(last.index, 6);
        assert_eq!(last.delay, (5.0 * (i64::MAX as f64 / IU_PER_MM)) as i64);
    }

    #[test]
    fn unknown_filter_errors() {
        let err = report(&board(), Some("USB")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNetClass(_)));
    }

    #[test]
    fn format_delay_units() {
        assert_eq!(format_delay(50), "50 fs");
        assert_eq!(format_delay(1_500), "1.500 ps");
        assert_eq!(format_delay(-999), "-999 fs");
    }

    #[test]
    fn text_rendering() {
        let reports = report(&board(), Some("DDR")).unwrap();
        let text = render_text(&reports[0]);
        assert!(text.starts_with("DDR (profile Fast)\n"));
        assert!(text.contains("(retired)"));
        assert!(text.contains("total 121 fs  (track 80 fs, via 16 fs, pad 25 fs)"));
    }

    #[test]
    fn json_shape() {
        let reports = report(&board(), Some("DDR")).unwrap();
        let json = serde_json::to_value(&reports).unwrap();
        assert_eq!(json[0]["items"][1]["kind"], "line");
        assert_eq!(json[0]["items"][4]["merge"], "merged_retired");
        assert_eq!(json[0]["breakdown"]["via_delay"], 16);
    }
}
