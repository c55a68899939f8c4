use crate::model::{Membership, Priority};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f64,
    pub text_color: String,
    pub background: String,
    pub region_fill_opacity: f64,
    /// Color token (`rose`, `emerald`, `sky`) to fill color.
    pub region_colors: BTreeMap<String, String>,
    /// Membership key (`family+work`) to chip color.
    pub membership_colors: BTreeMap<String, String>,
    pub unplaced_color: String,
    pub high_priority_color: String,
    pub medium_priority_color: String,
    pub low_priority_color: String,
    pub obstacle_color: String,
}

fn color_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

impl Theme {
    pub fn soft() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            text_color: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
            region_fill_opacity: 0.4,
            region_colors: color_map(&[
                ("rose", "#FFE4E6"),
                ("emerald", "#D1FAE5"),
                ("sky", "#E0F2FE"),
            ]),
            membership_colors: color_map(&[
                ("family+friends+work", "#C084FC"),
                ("family+friends", "#FB923C"),
                ("family+work", "#FACC15"),
                ("friends+work", "#2DD4BF"),
                ("family", "#FB7185"),
                ("friends", "#34D399"),
                ("work", "#38BDF8"),
            ]),
            unplaced_color: "#9CA3AF".to_string(),
            high_priority_color: "#F3E8FF".to_string(),
            medium_priority_color: "#FEF3C7".to_string(),
            low_priority_color: "#DCFCE7".to_string(),
            obstacle_color: "#F8FAFF".to_string(),
        }
    }

    pub fn vivid() -> Self {
        Self {
            region_fill_opacity: 0.6,
            region_colors: color_map(&[
                ("rose", "#FECDD3"),
                ("emerald", "#A7F3D0"),
                ("sky", "#BAE6FD"),
            ]),
            high_priority_color: "#9333EA".to_string(),
            medium_priority_color: "#F59E0B".to_string(),
            low_priority_color: "#22C55E".to_string(),
            ..Self::soft()
        }
    }

    pub fn region_color(&self, token: &str) -> &str {
        self.region_colors
            .get(token)
            .map(String::as_str)
            .unwrap_or(self.unplaced_color.as_str())
    }

    pub fn set_region_color(&mut self, token: &str, color: String) {
        self.region_colors.insert(token.to_string(), color);
    }

    pub fn membership_color(&self, membership: &Membership) -> &str {
        self.membership_colors
            .get(&membership.key())
            .map(String::as_str)
            .unwrap_or(self.unplaced_color.as_str())
    }

    pub fn priority_color(&self, priority: Priority) -> &str {
        match priority {
            Priority::High => &self.high_priority_color,
            Priority::Medium => &self.medium_priority_color,
            Priority::Low => &self.low_priority_color,
        }
    }
}
