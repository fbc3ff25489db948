use std::fmt::Write;

use crate::error::RenderError;
use crate::models::scene::{
    ArcNode, CircleNode, GroupNode, Paint, RectNode, TextAnchor, TextNode,
};
use crate::models::{Color, Node, SceneDescription};
use crate::render::{OutputFormat, SceneRenderer};

pub const FONT_FAMILY: &str = "Inter, 'Helvetica Neue', Arial, sans-serif";

/// Emits standalone SVG 1.1 markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl SvgRenderer {
    pub fn render_markup(&self, scene: &SceneDescription) -> String {
        let mut out = String::with_capacity(16 * 1024);
        let (w, h) = (scene.width, scene.height);
        let bg = &scene.background;

        // Writing into a String cannot fail.
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        out.push_str(r#"<defs><linearGradient id="sky" x1="0" y1="0" x2="0" y2="1">"#);
        for (offset, color) in [("0", bg.top), ("0.5", bg.mid), ("1", bg.bottom)] {
            let _ = write!(
                out,
                r#"<stop offset="{offset}" stop-color="{}"/>"#,
                color.hex()
            );
        }
        out.push_str("</linearGradient></defs>");
        let _ = write!(out, r#"<rect width="{w}" height="{h}" fill="url(#sky)"/>"#);

        for node in &scene.nodes {
            write_node(&mut out, node);
        }
        out.push_str("</svg>");
        out
    }
}

impl SceneRenderer for SvgRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Svg
    }

    fn render(&self, scene: &SceneDescription) -> Result<Vec<u8>, RenderError> {
        let markup = self.render_markup(scene);
        log::debug!("svg: {} bytes", markup.len());
        Ok(markup.into_bytes())
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Rect(r) => write_rect(out, r),
        Node::Circle(c) => write_circle(out, c),
        Node::Arc(a) => write_arc(out, a),
        Node::Text(t) => write_text(out, t),
        Node::Group(g) => write_group(out, g),
    }
}

fn write_rect(out: &mut String, r: &RectNode) {
    let _ = write!(
        out,
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}""#,
        r.x, r.y, r.width, r.height
    );
    if r.corner_radius > 0.0 {
        let _ = write!(out, r#" rx="{:.2}""#, r.corner_radius);
    }
    write_paint(out, &r.paint);
    out.push_str("/>");
}

fn write_circle(out: &mut String, c: &CircleNode) {
    let _ = write!(
        out,
        r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}""#,
        c.cx, c.cy, c.r
    );
    write_paint(out, &c.paint);
    out.push_str("/>");
}

fn write_arc(out: &mut String, a: &ArcNode) {
    let d = a.arc.to_path_data();
    let cap = if a.stroke.round_cap { "round" } else { "butt" };
    if let Some(glow) = a.glow {
        let _ = write!(
            out,
            r#"<path d="{d}" fill="none" stroke="{}" stroke-opacity="0.18" stroke-width="{:.2}" stroke-linecap="{cap}"/>"#,
            glow.hex(),
            a.stroke.width * 3.0
        );
    }
    let _ = write!(out, r#"<path d="{d}" fill="none""#);
    write_stroke(out, a.stroke.color, a.stroke.width);
    let _ = write!(out, r#" stroke-linecap="{cap}"/>"#);
}

fn write_text(out: &mut String, t: &TextNode) {
    let anchor = match t.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let _ = write!(
        out,
        r#"<text x="{:.2}" y="{:.2}" font-family="{FONT_FAMILY}" font-size="{:.2}" font-weight="{}" text-anchor="{anchor}""#,
        t.x, t.y, t.size, t.weight
    );
    if t.letter_spacing != 0.0 {
        let _ = write!(out, r#" letter-spacing="{:.2}""#, t.letter_spacing);
    }
    write_fill(out, t.color);
    let _ = write!(out, ">{}</text>", escape(&t.content));
}

fn write_group(out: &mut String, g: &GroupNode) {
    out.push_str("<g");
    if let Some(id) = &g.id {
        let _ = write!(out, r#" id="{}""#, escape(id));
    }
    if g.opacity < 1.0 {
        let _ = write!(out, r#" opacity="{:.3}""#, g.opacity);
    }
    out.push('>');
    for child in &g.children {
        write_node(out, child);
    }
    out.push_str("</g>");
}

fn write_paint(out: &mut String, paint: &Paint) {
    match paint.fill {
        Some(color) => write_fill(out, color),
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = paint.stroke {
        write_stroke(out, stroke.color, stroke.width);
        if stroke.round_cap {
            out.push_str(r#" stroke-linecap="round""#);
        }
    }
}

fn write_fill(out: &mut String, color: Color) {
    let _ = write!(out, r#" fill="{}""#, color.hex());
    if !color.is_opaque() {
        let _ = write!(out, r#" fill-opacity="{:.3}""#, color.a);
    }
}

fn write_stroke(out: &mut String, color: Color, width: f64) {
    let _ = write!(out, r#" stroke="{}" stroke-width="{:.2}""#, color.hex(), width);
    if !color.is_opaque() {
        let _ = write!(out, r#" stroke-opacity="{:.3}""#, color.a);
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
