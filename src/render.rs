use crate::config::{LayoutConfig, RenderConfig};
use crate::layout::{
    BoardLayout, DashboardLayout, FloatingBall, Layout, TITLE_BAND, WAYPOINT_COUNT, chip_origin,
};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const EASE_IN_OUT: &str = "0.42 0 0.58 1";

pub fn render_svg(
    layout: &Layout,
    theme: &Theme,
    config: &LayoutConfig,
    render_cfg: &RenderConfig,
) -> String {
    match layout {
        Layout::Board(board) => render_board_svg(board, theme, config, render_cfg),
        Layout::Dashboard(dashboard) => render_dashboard_svg(dashboard, theme),
    }
}

fn open_svg(svg: &mut String, width: f64, height: f64, theme: &Theme) {
    let width = width.max(200.0);
    let height = height.max(200.0);
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
}

pub fn render_board_svg(
    board: &BoardLayout,
    theme: &Theme,
    config: &LayoutConfig,
    render_cfg: &RenderConfig,
) -> String {
    let mut svg = String::new();
    open_svg(&mut svg, board.width, board.height, theme);

    for region in board.regions.regions.values() {
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>",
            region.center.x,
            region.center.y,
            region.radius,
            theme.region_color(&region.color),
            theme.region_fill_opacity,
            theme.region_color(&region.color),
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"600\" fill=\"{}\">{}</text>",
            region.center.x,
            region.top + theme.font_size * 1.6,
            theme.font_family,
            theme.font_size,
            theme.text_color,
            escape_xml(&region.name)
        ));
    }

    for entity in board.placed() {
        let Some(origin) = chip_origin(
            entity,
            &board.regions,
            config,
            render_cfg.chip_width,
            render_cfg.chip_height,
        ) else {
            continue;
        };
        svg.push_str(&chip_svg(
            origin.x,
            origin.y,
            &entity.label,
            theme.membership_color(&entity.membership),
            theme,
            render_cfg,
        ));
    }

    let unplaced: Vec<_> = board.unplaced().collect();
    if !unplaced.is_empty() {
        let row_y = (board.height - render_cfg.chip_height - 12.0).max(TITLE_BAND);
        let step = render_cfg.chip_width + 8.0;
        for (idx, entity) in unplaced.iter().enumerate() {
            svg.push_str(&chip_svg(
                12.0 + idx as f64 * step,
                row_y,
                &entity.label,
                &theme.unplaced_color,
                theme,
                render_cfg,
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

fn chip_svg(
    x: f64,
    y: f64,
    label: &str,
    fill: &str,
    theme: &Theme,
    render_cfg: &RenderConfig,
) -> String {
    format!(
        "<g><rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" fill=\"{fill}\"/><text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text></g>",
        render_cfg.chip_width,
        render_cfg.chip_height,
        render_cfg.chip_height / 2.0,
        x + render_cfg.chip_width / 2.0,
        y + render_cfg.chip_height / 2.0,
        theme.font_family,
        theme.font_size * 0.85,
        theme.text_color,
        escape_xml(label)
    )
}

pub fn render_dashboard_svg(dashboard: &DashboardLayout, theme: &Theme) -> String {
    let mut svg = String::new();
    open_svg(&mut svg, dashboard.width, dashboard.height, theme);

    let obstacle = &dashboard.obstacle;
    let center = dashboard.obstacle_center;
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"12\" fill=\"{}\"/>",
        center.x - obstacle.width / 2.0,
        center.y - obstacle.height / 2.0,
        obstacle.width,
        obstacle.height,
        theme.obstacle_color
    ));

    for floating in &dashboard.balls {
        svg.push_str(&ball_svg(floating, theme));
    }

    svg.push_str("</svg>");
    svg
}

fn ball_svg(floating: &FloatingBall, theme: &Theme) -> String {
    let ball = &floating.ball;
    let motion = &floating.motion;
    let mut out = String::new();
    out.push_str(&format!(
        "<g><circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\">",
        ball.x,
        ball.y,
        ball.radius,
        theme.priority_color(ball.priority()),
        theme.text_color
    ));
    out.push_str(&animate_svg("cx", &motion.xs(), motion.duration, motion.delay));
    out.push_str(&animate_svg("cy", &motion.ys(), motion.duration, motion.delay));
    out.push_str("</circle>");
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text></g>",
        ball.x,
        ball.y,
        theme.font_family,
        theme.font_size,
        theme.text_color,
        escape_xml(&ball.label)
    ));
    out
}

/// Endless eased loop through the waypoints.
fn animate_svg(attribute: &str, values: &[f64; WAYPOINT_COUNT], duration: f64, delay: f64) -> String {
    let values = values
        .iter()
        .map(|v| format!("{v:.2}"))
        .collect::<Vec<_>>()
        .join(";");
    let splines = vec![EASE_IN_OUT; WAYPOINT_COUNT - 1].join(";");
    format!(
        "<animate attributeName=\"{attribute}\" values=\"{values}\" dur=\"{duration:.3}s\" begin=\"{delay:.3}s\" repeatCount=\"indefinite\" calcMode=\"spline\" keySplines=\"{splines}\"/>"
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width as f32, render_cfg.height as f32)
        .or_else(|| usvg::Size::from_wh(800.0, 600.0))
        .ok_or_else(|| anyhow::anyhow!("Invalid default render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
