use crate::config::Config;
use crate::layout::{BoardLayout, Layout, LayoutKind, SimulationReport, chip_origin};
use crate::model::Entity;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub kind: LayoutKind,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<RegionDump>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<EntityDump>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub balls: Vec<BallDump>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SimulationReport>,
}

#[derive(Debug, Serialize)]
pub struct RegionDump {
    pub name: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

#[derive(Debug, Serialize)]
pub struct EntityDump {
    pub id: String,
    pub label: String,
    pub membership: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub chip: Option<[f64; 2]>,
}

#[derive(Debug, Serialize)]
pub struct BallDump {
    pub id: String,
    pub label: String,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    pub fallback: bool,
    pub path_x: Vec<f64>,
    pub path_y: Vec<f64>,
    pub duration: f64,
    pub delay: f64,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, config: &Config) -> Self {
        let (width, height) = layout.size();
        let mut dump = LayoutDump {
            kind: layout.kind(),
            width,
            height,
            regions: Vec::new(),
            entities: Vec::new(),
            balls: Vec::new(),
            report: None,
        };

        match layout {
            Layout::Board(board) => {
                dump.regions = board
                    .regions
                    .regions
                    .values()
                    .map(|region| RegionDump {
                        name: region.name.clone(),
                        color: region.color.clone(),
                        x: region.center.x,
                        y: region.center.y,
                        radius: region.radius,
                    })
                    .collect();
                dump.entities = board
                    .entities
                    .iter()
                    .map(|entity| EntityDump {
                        id: entity.id.clone(),
                        label: entity.label.clone(),
                        membership: entity.membership.key(),
                        x: entity.position.map(|p| p.x),
                        y: entity.position.map(|p| p.y),
                        chip: chip_for(entity, board, config),
                    })
                    .collect();
                dump.report = Some(board.report);
            }
            Layout::Dashboard(dashboard) => {
                dump.balls = dashboard
                    .balls
                    .iter()
                    .map(|floating| BallDump {
                        id: floating.ball.id.clone(),
                        label: floating.ball.label.clone(),
                        radius: floating.ball.radius,
                        x: floating.ball.x,
                        y: floating.ball.y,
                        fallback: floating.ball.fallback,
                        path_x: floating.motion.xs().to_vec(),
                        path_y: floating.motion.ys().to_vec(),
                        duration: floating.motion.duration,
                        delay: floating.motion.delay,
                    })
                    .collect();
            }
        }
        dump
    }
}

fn chip_for(
    entity: &Entity,
    board: &BoardLayout,
    config: &Config,
) -> Option<[f64; 2]> {
    chip_origin(
        entity,
        &board.regions,
        &config.layout,
        config.render.chip_width,
        config.render.chip_height,
    )
    .map(|p| [p.x, p.y])
}

pub fn layout_dump_json(layout: &Layout, config: &Config) -> anyhow::Result<String> {
    let dump = LayoutDump::from_layout(layout, config);
    Ok(serde_json::to_string_pretty(&dump)?)
}

pub fn write_layout_dump(path: &Path, layout: &Layout, config: &Config) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
