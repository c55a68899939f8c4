use serde::Serialize;

use crate::model::{BallNode, Entity, Obstacle, Vec2};

use super::motion::Motion;
use super::regions::RegionLayout;
use super::simulation::SimulationReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Board,
    Dashboard,
}

/// Region circles with every categorized entity settled inside its area.
#[derive(Debug, Clone, Serialize)]
pub struct BoardLayout {
    pub width: f64,
    pub height: f64,
    pub regions: RegionLayout,
    /// Full input list; unplaced entities keep `position: None`.
    pub entities: Vec<Entity>,
    pub report: SimulationReport,
}

impl BoardLayout {
    pub fn placed(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|entity| entity.is_placed())
    }

    pub fn unplaced(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|entity| !entity.is_placed())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FloatingBall {
    pub ball: BallNode,
    pub motion: Motion,
}

/// Balls swept around a central obstacle, each with its drift loop.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardLayout {
    pub width: f64,
    pub height: f64,
    pub obstacle: Obstacle,
    pub obstacle_center: Vec2,
    pub balls: Vec<FloatingBall>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Layout {
    Board(BoardLayout),
    Dashboard(DashboardLayout),
}

impl Layout {
    pub fn kind(&self) -> LayoutKind {
        match self {
            Layout::Board(_) => LayoutKind::Board,
            Layout::Dashboard(_) => LayoutKind::Dashboard,
        }
    }

    pub fn size(&self) -> (f64, f64) {
        match self {
            Layout::Board(board) => (board.width, board.height),
            Layout::Dashboard(dashboard) => (dashboard.width, dashboard.height),
        }
    }
}
