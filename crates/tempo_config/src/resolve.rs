//! Resolution of a parsed configuration into board and profile types.
//!
//! Copper layers receive sequential [`LayerId`]s in stackup order, starting
//! at zero. Every layer name used elsewhere in the file must name one of them.
//! Quantities are parsed with [`tempo_common::units`]. Problems that leave a
//! usable project behind are reported to the [`DiagnosticSink`] as warnings;
//! anything else is a [`ConfigError`].

use crate::error::ConfigError;
use crate::types::{
    ItemConfig, NetClassConfig, ProfileConfig, ProjectConfig, Quantity, StackupEntry,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tempo_board::{LineChain, NetClass, RoutedItem, Stackup, StackupLayer};
use tempo_common::{parse_length, parse_time, LayerId, IU_PER_MM};
use tempo_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use tempo_profile::{DelayProfile, DelayProfileStore, ViaOverrideEntry, ViaOverrideKey};

/// Two profiles share a name.
pub const DUPLICATE_PROFILE: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 1,
};

/// A profile lists the same via-override key twice.
pub const DUPLICATE_VIA_OVERRIDE: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 2,
};

/// A net class names a profile that does not exist.
pub const UNKNOWN_PROFILE: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 3,
};

/// A profile has no track delay for some copper layer.
pub const MISSING_LAYER_DELAY: DiagnosticCode = DiagnosticCode {
    category: Category::Profile,
    number: 1,
};

/// A fully resolved project, ready for the delay engine.
#[derive(Debug)]
pub struct ResolvedProject {
    /// The project name.
    pub name: String,
    /// The physical layer stack.
    pub stackup: Stackup,
    /// All delay profiles, in declaration order.
    pub store: DelayProfileStore,
    /// Net classes by name.
    pub net_classes: BTreeMap<String, Arc<NetClass>>,
    /// Routed items, in declaration order.
    pub items: Vec<RoutedItem>,
}

impl ResolvedProject {
    /// Returns the items belonging to the named net class with their
    /// positions in the project file, in declaration order.
    pub fn items_in_class<'a>(
        &'a self,
        net_class: &'a str,
    ) -> impl Iterator<Item = (usize, &'a RoutedItem)> + 'a {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, item)| item.net_class.name == net_class)
    }
}

impl ProjectConfig {
    /// Resolves layer names, units and net class references.
    ///
    /// Warnings are emitted to `sink`; the first hard error aborts resolution.
    pub fn resolve(&self, sink: &DiagnosticSink) -> Result<ResolvedProject, ConfigError> {
        let stackup = resolve_stackup(&self.stackup)?;
        let store = resolve_profiles(&self.profiles, &stackup, sink)?;
        let net_classes = resolve_net_classes(&self.net_classes, &store, sink)?;
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| resolve_item(index, item, &stackup, &net_classes))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResolvedProject {
            name: self.project.name.clone(),
            stackup,
            store,
            net_classes,
            items,
        })
    }
}

fn resolve_stackup(entries: &[StackupEntry]) -> Result<Stackup, ConfigError> {
    let mut layers = Vec::with_capacity(entries.len());
    let mut names = BTreeSet::new();
    let mut next_id = 0u32;

    for (index, entry) in entries.iter().enumerate() {
        let thickness = length(&entry.thickness, &format!("stackup[{index}].thickness"))?;
        match (&entry.copper, &entry.dielectric) {
            (Some(name), None) => {
                if !names.insert(name.as_str()) {
                    return Err(ConfigError::ValidationError(format!(
                        "duplicate copper layer '{name}'"
                    )));
                }
                layers.push(StackupLayer::Copper {
                    id: LayerId::from_raw(next_id),
                    name: name.clone(),
                    thickness,
                });
                next_id += 1;
            }
            (None, Some(name)) => layers.push(StackupLayer::Dielectric {
                name: name.clone(),
                thickness,
            }),
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "stackup[{index}] must set exactly one of 'copper' or 'dielectric'"
                )))
            }
        }
    }

    if next_id == 0 {
        return Err(ConfigError::ValidationError(
            "stackup has no copper layer".to_string(),
        ));
    }
    Stackup::new(layers).map_err(|e| ConfigError::ValidationError(e.message))
}

fn resolve_profiles(
    profiles: &[ProfileConfig],
    stackup: &Stackup,
    sink: &DiagnosticSink,
) -> Result<DelayProfileStore, ConfigError> {
    let copper = stackup.copper_layers();
    let mut store = DelayProfileStore::new();
    let mut names = BTreeSet::new();

    for config in profiles {
        let name = &config.name;
        if !names.insert(name.as_str()) {
            sink.emit(
                Diagnostic::warning(
                    DUPLICATE_PROFILE,
                    format!("delay profile '{name}' is defined more than once"),
                )
                .with_subject(format!("profiles.{name}"))
                .with_note("the later definition replaces the earlier one"),
            );
        }

        let via_delay = rate(&config.via_delay, &format!("profiles.{name}.via_delay"))?;
        let mut profile = DelayProfile::new(name).with_via_delay(via_delay);

        for (layer_name, value) in &config.layers {
            let layer = layer_id(stackup, layer_name)?;
            let delay = rate(value, &format!("profiles.{name}.layers.{layer_name}"))?;
            profile = profile.with_layer_delay(layer, delay);
        }

        let mut keys = BTreeSet::new();
        for (index, entry) in config.via_overrides.iter().enumerate() {
            let key = ViaOverrideKey::new(
                (
                    layer_id(stackup, &entry.signal[0])?,
                    layer_id(stackup, &entry.signal[1])?,
                ),
                (
                    layer_id(stackup, &entry.via[0])?,
                    layer_id(stackup, &entry.via[1])?,
                ),
            );
            if !keys.insert(key) {
                sink.emit(
                    Diagnostic::warning(
                        DUPLICATE_VIA_OVERRIDE,
                        format!("delay profile '{name}' overrides the same via twice"),
                    )
                    .with_subject(format!("profiles.{name}.via_overrides[{index}]"))
                    .with_note(key.to_string())
                    .with_note("the later entry replaces the earlier one"),
                );
            }
            let delay = time(
                &entry.delay,
                &format!("profiles.{name}.via_overrides[{index}].delay"),
            )?;
            profile = profile.with_via_override(ViaOverrideEntry::new(key, delay));
        }

        let missing: Vec<&str> = copper
            .iter()
            .filter(|layer| profile.layer_delay(**layer).is_none())
            .filter_map(|layer| stackup.layer_name(*layer))
            .collect();
        if !missing.is_empty() {
            sink.emit(
                Diagnostic::warning(
                    MISSING_LAYER_DELAY,
                    format!(
                        "delay profile '{name}' has no track delay for {}",
                        missing.join(", ")
                    ),
                )
                .with_subject(format!("profiles.{name}.layers"))
                .with_help("tracks on these layers are timed as zero"),
            );
        }

        store.push(profile);
    }
    Ok(store)
}

fn resolve_net_classes(
    classes: &[NetClassConfig],
    store: &DelayProfileStore,
    sink: &DiagnosticSink,
) -> Result<BTreeMap<String, Arc<NetClass>>, ConfigError> {
    let mut resolved = BTreeMap::new();
    for config in classes {
        if resolved.contains_key(&config.name) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate net class '{}'",
                config.name
            )));
        }
        let profile = &config.delay_profile;
        if !profile.is_empty() && store.find(profile).is_none() {
            sink.emit(
                Diagnostic::warning(
                    UNKNOWN_PROFILE,
                    format!(
                        "net class '{}' uses undefined delay profile '{profile}'",
                        config.name
                    ),
                )
                .with_subject(format!("net_classes.{}", config.name))
                .with_note("items in this class are timed as zero"),
            );
        }
        resolved.insert(
            config.name.clone(),
            Arc::new(NetClass::new(&config.name, profile)),
        );
    }
    Ok(resolved)
}

fn resolve_item(
    index: usize,
    item: &ItemConfig,
    stackup: &Stackup,
    net_classes: &BTreeMap<String, Arc<NetClass>>,
) -> Result<RoutedItem, ConfigError> {
    let net_class = net_classes
        .get(item.net_class())
        .cloned()
        .ok_or_else(|| ConfigError::UnknownNetClass(item.net_class().to_string()))?;

    let resolved = match item {
        ItemConfig::Line {
            layer,
            points,
            merge,
            ..
        } => {
            if points.len() < 2 {
                return Err(ConfigError::ValidationError(format!(
                    "items[{index}]: a line needs at least two points"
                )));
            }
            let shape: LineChain = points.iter().map(|[x, y]| (mm(*x), mm(*y))).collect();
            RoutedItem::line(net_class, layer_id(stackup, layer)?, shape).with_merge_status(*merge)
        }
        ItemConfig::Via {
            signal, via, merge, ..
        } => {
            let signal_layers = (layer_id(stackup, &signal[0])?, layer_id(stackup, &signal[1])?);
            let via_layers = match via {
                Some([start, end]) => (layer_id(stackup, start)?, layer_id(stackup, end)?),
                None => signal_layers,
            };
            RoutedItem::via_with_stack(net_class, signal_layers, via_layers)
                .with_merge_status(*merge)
        }
        ItemConfig::Pad {
            pad_to_die, merge, ..
        } => {
            let delay = time(pad_to_die, &format!("items[{index}].pad_to_die"))?;
            RoutedItem::pad(net_class, delay).with_merge_status(*merge)
        }
    };
    Ok(resolved)
}

fn layer_id(stackup: &Stackup, name: &str) -> Result<LayerId, ConfigError> {
    stackup
        .layer_by_name(name)
        .ok_or_else(|| ConfigError::UnknownLayer(name.to_string()))
}

fn mm(value: f64) -> i64 {
    (value * IU_PER_MM).round() as i64
}

fn length(value: &Quantity, field: &str) -> Result<i64, ConfigError> {
    parse_length(value.as_str())
        .map(|iu| iu.round() as i64)
        .map_err(|e| ConfigError::ValidationError(format!("{field}: {e}")))
}

fn rate(value: &Quantity, field: &str) -> Result<f64, ConfigError> {
    parse_time(value.as_str()).map_err(|e| ConfigError::ValidationError(format!("{field}: {e}")))
}

fn time(value: &Quantity, field: &str) -> Result<i64, ConfigError> {
    rate(value, field).map(|iu| iu.round() as i64)
}
