//! Visual style definitions shared by the painter and the exporters.
//!
//! # Overview
//!
//! - [`Shape`]: node outline shape
//! - [`CornerStyle`]: rounded vs. square node corners
//! - [`Direction`]: layout orientation hint for the external layout engine
//! - [`StyleDefaults`]: diagram-wide defaults, passed through unchanged
//! - [`NodeStyle`]: the fully resolved style of a single node
//!
//! Every enum parses from the same spelling it is written back as, so
//! configuration files can use the Graphviz vocabulary directly.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Node outline shape.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Rectangle (default)
    #[default]
    Rect,
    /// Rectangle, Graphviz `box` alias
    Box,
    Ellipse,
    Circle,
    Diamond,
    Hexagon,
    /// No outline, text only
    Plaintext,
}

impl Shape {
    /// Returns the Graphviz `shape` attribute value
    pub fn to_dot_value(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Box => "box",
            Self::Ellipse => "ellipse",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Hexagon => "hexagon",
            Self::Plaintext => "plaintext",
        }
    }
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rect" | "rectangle" => Ok(Self::Rect),
            "box" => Ok(Self::Box),
            "ellipse" | "oval" => Ok(Self::Ellipse),
            "circle" => Ok(Self::Circle),
            "diamond" => Ok(Self::Diamond),
            "hexagon" => Ok(Self::Hexagon),
            "plaintext" => Ok(Self::Plaintext),
            _ => Err(format!(
                "invalid shape `{s}`, valid values: rect, box, ellipse, circle, diamond, hexagon, plaintext"
            )),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_dot_value())
    }
}

/// Whether node corners are drawn rounded or square.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerStyle {
    #[default]
    Rounded,
    Square,
}

impl CornerStyle {
    /// Returns the Graphviz `style` attribute value for a filled node
    pub fn to_dot_value(self) -> &'static str {
        match self {
            Self::Rounded => "rounded,filled",
            Self::Square => "filled",
        }
    }
}

impl FromStr for CornerStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rounded" => Ok(Self::Rounded),
            "square" => Ok(Self::Square),
            _ => Err(format!(
                "invalid corner style `{s}`, valid values: rounded, square"
            )),
        }
    }
}

/// Layout orientation hint.
///
/// Serialized with the Graphviz `rankdir` spellings (`LR`, `RL`, `TB`, `BT`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Direction {
    /// Root on the left, branches grow rightward (default)
    #[default]
    #[serde(rename = "LR", alias = "lr")]
    LeftRight,
    #[serde(rename = "RL", alias = "rl")]
    RightLeft,
    #[serde(rename = "TB", alias = "tb")]
    TopBottom,
    #[serde(rename = "BT", alias = "bt")]
    BottomTop,
}

impl Direction {
    /// Returns the Graphviz `rankdir` attribute value
    pub fn to_dot_value(self) -> &'static str {
        match self {
            Self::LeftRight => "LR",
            Self::RightLeft => "RL",
            Self::TopBottom => "TB",
            Self::BottomTop => "BT",
        }
    }

    /// Compass ports `(tail, head)` so edges leave a parent on the side
    /// facing its children and enter the child on the side facing the parent.
    pub fn edge_ports(self) -> (&'static str, &'static str) {
        match self {
            Self::LeftRight => ("e", "w"),
            Self::RightLeft => ("w", "e"),
            Self::TopBottom => ("s", "n"),
            Self::BottomTop => ("n", "s"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LR" | "lr" => Ok(Self::LeftRight),
            "RL" | "rl" => Ok(Self::RightLeft),
            "TB" | "tb" => Ok(Self::TopBottom),
            "BT" | "bt" => Ok(Self::BottomTop),
            _ => Err(format!(
                "invalid direction `{s}`, valid values: LR, RL, TB, BT"
            )),
        }
    }
}

/// Diagram-wide style defaults.
///
/// These are handed to every emitted record unchanged; only the computed
/// colors of a [`NodeStyle`] differ from node to node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDefaults {
    shape: Shape,
    corner_style: CornerStyle,
    font_name: String,
    font_size: u32,
    direction: Direction,
    edge_width: f32,
}

impl StyleDefaults {
    /// Creates a new set of defaults.
    pub fn new(
        shape: Shape,
        corner_style: CornerStyle,
        font_name: impl Into<String>,
        font_size: u32,
        direction: Direction,
        edge_width: f32,
    ) -> Self {
        Self {
            shape,
            corner_style,
            font_name: font_name.into(),
            font_size,
            direction,
            edge_width,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn corner_style(&self) -> CornerStyle {
        self.corner_style
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Pen width of the edges, in points.
    pub fn edge_width(&self) -> f32 {
        self.edge_width
    }
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self::new(
            Shape::default(),
            CornerStyle::default(),
            "Arial",
            12,
            Direction::default(),
            2.0,
        )
    }
}

/// The resolved style of one node.
///
/// Produced once by the painter; there is no way to change it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStyle {
    fill_color: Color,
    border_color: Color,
    font_color: Color,
    shape: Shape,
    corner_style: CornerStyle,
    font_name: String,
    font_size: u32,
}

impl NodeStyle {
    /// Builds a node style from the diagram defaults and the computed colors.
    ///
    /// The border always takes the fill color.
    pub fn new(defaults: &StyleDefaults, fill_color: Color, font_color: Color) -> Self {
        Self {
            fill_color,
            border_color: fill_color,
            font_color,
            shape: defaults.shape(),
            corner_style: defaults.corner_style(),
            font_name: defaults.font_name().to_string(),
            font_size: defaults.font_size(),
        }
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn border_color(&self) -> Color {
        self.border_color
    }

    pub fn font_color(&self) -> Color {
        self.font_color
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn corner_style(&self) -> CornerStyle {
        self.corner_style
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }
}
