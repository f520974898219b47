//! Plan command implementation for the freight CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use freight_core::{
    Geocoder, PlanMode, RouteDistanceProvider, RoutePlan, RoutePlanner, Stop, validate_stops,
};
use freight_data::geocoding::HttpGeocoderConfig;
use freight_data::http_planner;
use freight_data::routing::HttpRoutingConfig;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_PLAN_GEOCODER_URL, ARG_PLAN_MODE, ARG_PLAN_OSRM_PROFILE, ARG_PLAN_OSRM_URL,
    ARG_PLAN_STOPS, ARG_PLAN_TIMEOUT_SECS, ARG_PLAN_USER_AGENT, CliError, ENV_PLAN_STOPS,
};

/// Why the stop list is being planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ModeArg {
    /// A new order.
    Create,
    /// The stop list of an existing order was replaced.
    Replace,
}

impl From<ModeArg> for PlanMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Create => Self::Create,
            ModeArg::Replace => Self::Replace,
        }
    }
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Geocode the stops of an order that lack coordinates, then \
                 print the route geometry and total miles as JSON. Routed \
                 distance comes from an OSRM instance; when it cannot be \
                 reached the great-circle distance is reported instead.",
    about = "Plan an order's route geometry and mileage"
)]
#[ortho_config(prefix = "FREIGHT")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing the order's stops.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) stops_path: Option<Utf8PathBuf>,
    /// Whether this is a new order or a replaced stop list.
    #[arg(long = ARG_PLAN_MODE, value_enum)]
    #[serde(default)]
    pub(crate) mode: Option<ModeArg>,
    /// Base URL of the Nominatim-compatible geocoding service.
    #[arg(long = ARG_PLAN_GEOCODER_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) geocoder_url: Option<String>,
    /// Base URL of the OSRM routing service.
    #[arg(long = ARG_PLAN_OSRM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_url: Option<String>,
    /// OSRM routing profile (e.g. "driving").
    #[arg(long = ARG_PLAN_OSRM_PROFILE, value_name = "name")]
    #[serde(default)]
    pub(crate) osrm_profile: Option<String>,
    /// Per-request timeout for both services, in seconds.
    #[arg(long = ARG_PLAN_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// User agent sent to both services.
    #[arg(long = ARG_PLAN_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON stop list.
    pub(crate) stops_path: Utf8PathBuf,
    /// Planning mode.
    pub(crate) mode: PlanMode,
    /// Geocoding service settings.
    pub(crate) geocoding: HttpGeocoderConfig,
    /// Routing service settings.
    pub(crate) routing: HttpRoutingConfig,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.stops_path;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_PLAN_STOPS,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_PLAN_STOPS,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_PLAN_STOPS,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let stops_path = args.stops_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_STOPS,
            env: ENV_PLAN_STOPS,
        })?;

        let mut geocoding = HttpGeocoderConfig::default();
        let mut routing = HttpRoutingConfig::default();
        if let Some(url) = args.geocoder_url {
            geocoding.base_url = url;
        }
        if let Some(url) = args.osrm_url {
            routing.base_url = url;
        }
        if let Some(profile) = args.osrm_profile {
            if profile.trim().is_empty() {
                return Err(CliError::InvalidOption {
                    field: ARG_PLAN_OSRM_PROFILE,
                    reason: "must not be blank",
                });
            }
            routing.profile = profile;
        }
        if let Some(secs) = args.timeout_secs {
            if secs == 0 {
                return Err(CliError::InvalidOption {
                    field: ARG_PLAN_TIMEOUT_SECS,
                    reason: "must be at least one second",
                });
            }
            geocoding.timeout = Duration::from_secs(secs);
            routing.timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = args.user_agent {
            geocoding.user_agent.clone_from(&agent);
            routing.user_agent = agent;
        }

        Ok(Self {
            stops_path,
            mode: args.mode.map(PlanMode::from).unwrap_or_default(),
            geocoding,
            routing,
        })
    }
}

/// Planner over boxed lookups, so tests can substitute stubs.
pub(crate) type BoxedPlanner = RoutePlanner<Box<dyn Geocoder>, Box<dyn RouteDistanceProvider>>;

/// Builds the planner for the current plan invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, config: &PlanConfig) -> BoxedPlanner;
}

pub(crate) struct HttpPlannerBuilder;

impl PlannerBuilder for HttpPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> BoxedPlanner {
        http_planner(config.geocoding.clone(), config.routing.clone())
    }
}

/// JSON document printed by the `plan` command.
#[derive(Debug, Serialize)]
struct PlanOutput<'a> {
    mode: PlanMode,
    #[serde(flatten)]
    plan: &'a RoutePlan,
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &HttpPlannerBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let stops = load_stops(&config.stops_path)?;
    validate_stops(&stops).map_err(|source| CliError::InvalidStops {
        path: config.stops_path.clone(),
        source,
    })?;

    let planner = builder.build(&config);
    let plan = planner.plan(&stops, config.mode);
    if !plan.unresolved.is_empty() {
        log::warn!("stops without coordinates after geocoding: {:?}", plan.unresolved);
    }
    write_plan(
        writer,
        &PlanOutput {
            mode: config.mode,
            plan: &plan,
        },
    )
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON array of stop records from disk.
pub(crate) fn load_stops(path: &Utf8Path) -> Result<Vec<Stop>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenStops {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseStops {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan(writer: &mut dyn Write, output: &PlanOutput<'_>) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(output).map_err(CliError::SerialisePlan)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer.write_all(b"\n").map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
