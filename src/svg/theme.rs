//! Color palettes for rendered charts.
//!
//! The light palette is the chart's classic look: pale blue terminals, amber
//! decisions and lilac process boxes on white.

use crate::types::NodeKind;
use serde::{Deserialize, Serialize};

/// Built-in palette names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Fill and stroke of one node shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeColors {
    pub fill: String,
    pub stroke: String,
}

impl ShapeColors {
    fn new(fill: &str, stroke: &str) -> Self {
        Self {
            fill: fill.to_string(),
            stroke: stroke.to_string(),
        }
    }
}

/// Chart color configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Canvas background
    pub background: String,
    /// Edge lines and arrow heads
    pub line: String,
    /// All label text
    pub text: String,
    /// Start and end terminals
    pub terminal: ShapeColors,
    pub decision: ShapeColors,
    pub process: ShapeColors,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_theme(Theme::Light)
    }
}

impl Palette {
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: "white".to_string(),
                line: "#666".to_string(),
                text: "#333".to_string(),
                terminal: ShapeColors::new("#e1f5fe", "#01579b"),
                decision: ShapeColors::new("#fff3e0", "#e65100"),
                process: ShapeColors::new("#f3e5f5", "#4a148c"),
            },
            Theme::Dark => Self {
                background: "#1e1e1e".to_string(),
                line: "#aaa".to_string(),
                text: "#eee".to_string(),
                terminal: ShapeColors::new("#0d3c55", "#4fc3f7"),
                decision: ShapeColors::new("#4a2a00", "#ffb74d"),
                process: ShapeColors::new("#3a1f47", "#ce93d8"),
            },
        }
    }

    pub fn shape(&self, kind: NodeKind) -> &ShapeColors {
        match kind {
            NodeKind::Start | NodeKind::End => &self.terminal,
            NodeKind::Decision => &self.decision,
            NodeKind::Process => &self.process,
        }
    }
}
