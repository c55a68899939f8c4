use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub radius_multiplier: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            radius_multiplier: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub max_iterations: usize,
    pub damping: f64,
    pub center_strength: f64,
    pub repulsion_strength: f64,
    pub repulsion_radius: f64,
    pub edge_threshold: f64,
    pub edge_strength: f64,
    pub edge_softening: f64,
    pub intersection_edge_threshold: f64,
    pub intersection_edge_strength: f64,
    pub intersection_edge_softening: f64,
    pub pushback_strength: f64,
    pub convergence_threshold: f64,
    pub jitter: f64,
    pub circle_boundary_scale: f64,
    pub intersection_boundary_scale: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            damping: 0.8,
            center_strength: 0.05,
            repulsion_strength: 800.0,
            repulsion_radius: 120.0,
            edge_threshold: 40.0,
            edge_strength: 200.0,
            edge_softening: 5.0,
            intersection_edge_threshold: 30.0,
            intersection_edge_strength: 150.0,
            intersection_edge_softening: 3.0,
            pushback_strength: 0.5,
            convergence_threshold: 0.1,
            jitter: 20.0,
            circle_boundary_scale: 0.8,
            intersection_boundary_scale: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadialConfig {
    pub base_radius: f64,
    pub radius_per_weight: f64,
    pub start_distance: f64,
    pub angle_step_degrees: f64,
    pub max_distance_factor: f64,
    pub viewport_margin: f64,
    pub obstacle_padding: f64,
    pub ball_gap: f64,
    pub obstacle_max_width: f64,
    pub obstacle_width_factor: f64,
    pub obstacle_height: f64,
    pub fallback_distance_step: f64,
    pub fallback_angle_step_degrees: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            base_radius: 25.0,
            radius_per_weight: 10.0,
            start_distance: 100.0,
            angle_step_degrees: 5.0,
            max_distance_factor: 0.4,
            viewport_margin: 50.0,
            obstacle_padding: 20.0,
            ball_gap: 10.0,
            obstacle_max_width: 400.0,
            obstacle_width_factor: 0.6,
            obstacle_height: 80.0,
            fallback_distance_step: 30.0,
            fallback_angle_step_degrees: 45.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    pub base_range: f64,
    pub range_spread: f64,
    pub base_duration: f64,
    pub duration_spread: f64,
    pub max_delay: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            base_range: 8.0,
            range_spread: 4.0,
            base_duration: 6.0,
            duration_spread: 4.0,
            max_delay: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub regions: RegionConfig,
    pub simulation: SimulationConfig,
    pub radial: RadialConfig,
    pub motion: MotionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub chip_width: f64,
    pub chip_height: f64,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            chip_width: 50.0,
            chip_height: 20.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::soft();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    radius_multiplier: Option<f64>,
    simulation: Option<SimulationOverrides>,
    radial: Option<RadialOverrides>,
    motion: Option<MotionOverrides>,
    render: Option<RenderOverrides>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f64>,
    text_color: Option<String>,
    background: Option<String>,
    family: Option<String>,
    friends: Option<String>,
    work: Option<String>,
    unplaced: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimulationOverrides {
    max_iterations: Option<usize>,
    damping: Option<f64>,
    center_strength: Option<f64>,
    repulsion_strength: Option<f64>,
    repulsion_radius: Option<f64>,
    pushback_strength: Option<f64>,
    convergence_threshold: Option<f64>,
    jitter: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RadialOverrides {
    base_radius: Option<f64>,
    radius_per_weight: Option<f64>,
    start_distance: Option<f64>,
    angle_step_degrees: Option<f64>,
    viewport_margin: Option<f64>,
    obstacle_padding: Option<f64>,
    ball_gap: Option<f64>,
    obstacle_height: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MotionOverrides {
    base_range: Option<f64>,
    range_spread: Option<f64>,
    base_duration: Option<f64>,
    duration_spread: Option<f64>,
    max_delay: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderOverrides {
    width: Option<f64>,
    height: Option<f64>,
    chip_width: Option<f64>,
    chip_height: Option<f64>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = match theme_name {
            "vivid" => Theme::vivid(),
            _ => Theme::soft(),
        };
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.background {
            config.render.background = v.clone();
            config.theme.background = v;
        }
        if let Some(v) = vars.family {
            config.theme.set_region_color("rose", v);
        }
        if let Some(v) = vars.friends {
            config.theme.set_region_color("emerald", v);
        }
        if let Some(v) = vars.work {
            config.theme.set_region_color("sky", v);
        }
        if let Some(v) = vars.unplaced {
            config.theme.unplaced_color = v;
        }
    }

    if let Some(v) = parsed.radius_multiplier {
        config.layout.regions.radius_multiplier = v;
    }

    if let Some(sim) = parsed.simulation {
        let cfg = &mut config.layout.simulation;
        if let Some(v) = sim.max_iterations {
            cfg.max_iterations = v;
        }
        if let Some(v) = sim.damping {
            cfg.damping = v;
        }
        if let Some(v) = sim.center_strength {
            cfg.center_strength = v;
        }
        if let Some(v) = sim.repulsion_strength {
            cfg.repulsion_strength = v;
        }
        if let Some(v) = sim.repulsion_radius {
            cfg.repulsion_radius = v;
        }
        if let Some(v) = sim.pushback_strength {
            cfg.pushback_strength = v;
        }
        if let Some(v) = sim.convergence_threshold {
            cfg.convergence_threshold = v;
        }
        if let Some(v) = sim.jitter {
            cfg.jitter = v;
        }
    }

    if let Some(radial) = parsed.radial {
        let cfg = &mut config.layout.radial;
        if let Some(v) = radial.base_radius {
            cfg.base_radius = v;
        }
        if let Some(v) = radial.radius_per_weight {
            cfg.radius_per_weight = v;
        }
        if let Some(v) = radial.start_distance {
            cfg.start_distance = v;
        }
        if let Some(v) = radial.angle_step_degrees {
            if v <= 0.0 || !v.is_finite() {
                return Err(anyhow::anyhow!(
                    "radial.angleStepDegrees must be positive, got {v}"
                ));
            }
            cfg.angle_step_degrees = v;
        }
        if let Some(v) = radial.viewport_margin {
            cfg.viewport_margin = v;
        }
        if let Some(v) = radial.obstacle_padding {
            cfg.obstacle_padding = v;
        }
        if let Some(v) = radial.ball_gap {
            cfg.ball_gap = v;
        }
        if let Some(v) = radial.obstacle_height {
            cfg.obstacle_height = v;
        }
    }

    if let Some(motion) = parsed.motion {
        let cfg = &mut config.layout.motion;
        if let Some(v) = motion.base_range {
            cfg.base_range = v;
        }
        if let Some(v) = motion.range_spread {
            cfg.range_spread = v;
        }
        if let Some(v) = motion.base_duration {
            cfg.base_duration = v;
        }
        if let Some(v) = motion.duration_spread {
            cfg.duration_spread = v;
        }
        if let Some(v) = motion.max_delay {
            cfg.max_delay = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.chip_width {
            config.render.chip_width = v;
        }
        if let Some(v) = render.chip_height {
            config.render.chip_height = v;
        }
    }

    Ok(config)
}
