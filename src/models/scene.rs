use serde::Serialize;

use crate::engine::arc::ArcSpec;

/// Straight-alpha sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb`; alpha is carried separately by the backends.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Three-stop vertical gradient at 0%, 50% and 100% of the canvas height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VerticalGradient {
    pub top: Color,
    pub mid: Color,
    pub bottom: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub round_cap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(Stroke {
                color,
                width,
                round_cap: false,
            }),
        }
    }

    pub fn with_stroke(self, color: Color, width: f64) -> Self {
        Self {
            stroke: Some(Stroke {
                color,
                width,
                round_cap: false,
            }),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Estimated extent of a text run, used for layout without shaping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextMetrics {
    pub advance: f64,
    pub ascent: f64,
    pub descent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectNode {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub paint: Paint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleNode {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub paint: Paint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcNode {
    pub arc: ArcSpec,
    pub stroke: Stroke,
    /// Soft halo drawn under the arc in the same hue.
    pub glow: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextNode {
    /// Anchor point; `y` is the alphabetic baseline.
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub size: f64,
    pub weight: u16,
    pub color: Color,
    pub anchor: TextAnchor,
    pub letter_spacing: f64,
    pub metrics: TextMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupNode {
    pub id: Option<String>,
    pub opacity: f64,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Rect(RectNode),
    Circle(CircleNode),
    Arc(ArcNode),
    Text(TextNode),
    Group(GroupNode),
}

impl Node {
    pub fn group(id: &str, children: Vec<Node>) -> Node {
        Node::Group(GroupNode {
            id: Some(id.to_string()),
            opacity: 1.0,
            children,
        })
    }
}

/// Backend-neutral picture: a background gradient plus an ordered node tree
/// in absolute canvas pixels. Later nodes paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDescription {
    pub width: u32,
    pub height: u32,
    pub background: VerticalGradient,
    pub nodes: Vec<Node>,
}

impl SceneDescription {
    /// Depth-first, pre-order walk over every node.
    pub fn flatten(&self) -> Vec<&Node> {
        fn visit<'a>(nodes: &'a [Node], out: &mut Vec<&'a Node>) {
            for node in nodes {
                out.push(node);
                if let Node::Group(g) = node {
                    visit(&g.children, out);
                }
            }
        }
        let mut out = Vec::new();
        visit(&self.nodes, &mut out);
        out
    }

    pub fn group(&self, id: &str) -> Option<&GroupNode> {
        self.flatten().into_iter().find_map(|n| match n {
            Node::Group(g) if g.id.as_deref() == Some(id) => Some(g),
            _ => None,
        })
    }

    pub fn texts(&self) -> Vec<&str> {
        self.flatten()
            .into_iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.content.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_uppercase_and_ignores_alpha() {
        assert_eq!(Color::rgba(168, 196, 255, 0.3).hex(), "#A8C4FF");
        assert!(!Color::rgb(0, 0, 0).with_alpha(0.5).is_opaque());
    }

    #[test]
    fn flatten_visits_nested_groups_in_paint_order() {
        let dot = |cx| {
            Node::Circle(CircleNode {
                cx,
                cy: 0.0,
                r: 1.0,
                paint: Paint::fill(Color::rgb(255, 255, 255)),
            })
        };
        let scene = SceneDescription {
            width: 10,
            height: 10,
            background: VerticalGradient {
                top: Color::rgb(0, 0, 0),
                mid: Color::rgb(0, 0, 0),
                bottom: Color::rgb(0, 0, 0),
            },
            nodes: vec![dot(1.0), Node::group("inner", vec![dot(2.0), dot(3.0)])],
        };

        let flat = scene.flatten();
        assert_eq!(flat.len(), 4);
        assert!(matches!(flat[2], Node::Circle(c) if c.cx == 2.0));
        assert_eq!(scene.group("inner").map(|g| g.children.len()), Some(2));
        assert!(scene.group("missing").is_none());
    }
}
