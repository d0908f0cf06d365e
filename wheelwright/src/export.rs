//! Serializer: render a finished wheel as a PlantUML mindmap and as JSON,
//! and write both artifacts under an output directory.
//!
//! Colors are purely a function of depth and stop at depth 4; deeper nodes
//! carry no color tag (documented policy for trees beyond the scheme).

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::WheelError;
use crate::node::WheelNode;

/// Depth-keyed PlantUML color tag; `None` from depth 5 on.
fn depth_color(depth: usize) -> Option<&'static str> {
    match depth {
        1 => Some("[#00bcd4]"), // cyan
        2 => Some("[#2ecc71]"), // green
        3 => Some("[#f1c40f]"), // yellow
        4 => Some("[#e74c3c]"), // red
        _ => None,
    }
}

/// Renders the wheel as a PlantUML mindmap document.
///
/// One line per node: a two-space indent per depth level, a `*` marker, an
/// optional depth color tag, then the topic. Root is uncolored.
pub fn render_mindmap(root: &WheelNode) -> String {
    let mut out = String::new();
    out.push_str("@startmindmap\n");
    out.push_str("skinparam defaultTextAlignment center\n");
    out.push_str("skinparam wrapWidth 200\n");
    out.push_str("skinparam backgroundColor white\n\n");
    out.push_str(&format!("* {}\n", root.topic));
    write_impacts(&mut out, &root.impacts, 1);
    out.push_str("@endmindmap\n");
    out
}

/// Recursively writes impact lines at increasing indentation depth.
fn write_impacts(out: &mut String, impacts: &[WheelNode], depth: usize) {
    for node in impacts {
        let color = depth_color(depth).unwrap_or("");
        out.push_str(&format!("{}*{} {}\n", "  ".repeat(depth), color, node.topic));
        write_impacts(out, &node.impacts, depth + 1);
    }
}

/// Renders the wheel as pretty JSON (2-space indent), preserving the nested
/// `{topic, impacts}` shape and child order.
pub fn render_json(root: &WheelNode) -> Result<String, WheelError> {
    Ok(serde_json::to_string_pretty(root)?)
}

/// Writes `<stem>.puml` and `<stem>.json` under `dir`, creating the directory
/// if absent. Returns the two paths (diagram first).
pub fn save_wheel(
    root: &WheelNode,
    dir: &Path,
    stem: &str,
) -> Result<(PathBuf, PathBuf), WheelError> {
    std::fs::create_dir_all(dir)?;

    let puml_path = dir.join(format!("{}.puml", stem));
    std::fs::write(&puml_path, render_mindmap(root))?;

    let json_path = dir.join(format!("{}.json", stem));
    std::fs::write(&json_path, render_json(root)?)?;

    info!(
        puml = %puml_path.display(),
        json = %json_path.display(),
        "saved futures wheel"
    );
    Ok((puml_path, json_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_wheel() -> WheelNode {
        let mut root = WheelNode::new("X");
        let mut a = WheelNode::new("A");
        a.impacts.push(WheelNode::new("A1"));
        let mut b = WheelNode::new("B");
        b.impacts.push(WheelNode::new("B1"));
        root.impacts.push(a);
        root.impacts.push(b);
        root
    }

    /// Chain of single children n levels deep below the root.
    fn deep_chain(levels: usize) -> WheelNode {
        let mut node = WheelNode::new(format!("L{}", levels));
        for depth in (1..levels).rev() {
            let mut parent = WheelNode::new(format!("L{}", depth));
            parent.impacts.push(node);
            node = parent;
        }
        let mut root = WheelNode::new("L0");
        root.impacts.push(node);
        root
    }

    /// **Scenario**: the mindmap has fixed start/end markers, the skinparam
    /// preamble, an uncolored root line, and depth-colored impact lines with
    /// two-space indentation per level.
    #[test]
    fn render_mindmap_layout_and_colors() {
        let doc = render_mindmap(&sample_wheel());
        assert!(doc.starts_with("@startmindmap\n"));
        assert!(doc.ends_with("@endmindmap\n"));
        assert!(doc.contains("skinparam wrapWidth 200\n"));
        assert!(doc.contains("\n* X\n"));
        assert!(doc.contains("\n  *[#00bcd4] A\n"));
        assert!(doc.contains("\n    *[#2ecc71] A1\n"));
        assert!(doc.contains("\n  *[#00bcd4] B\n"));
        assert!(doc.contains("\n    *[#2ecc71] B1\n"));
    }

    /// **Scenario**: depths 3 and 4 get yellow and red; depth 5 and beyond have
    /// no color tag.
    #[test]
    fn render_mindmap_color_scheme_stops_at_depth_four() {
        let doc = render_mindmap(&deep_chain(5));
        assert!(doc.contains("      *[#f1c40f] L3\n"));
        assert!(doc.contains("        *[#e74c3c] L4\n"));
        assert!(doc.contains("          * L5\n"), "depth 5 must carry no color tag");
    }

    /// **Scenario**: JSON round-trip — rendering and reparsing yields a tree
    /// equal to the in-memory wheel, with child order preserved.
    #[test]
    fn render_json_roundtrip() {
        let wheel = sample_wheel();
        let json = render_json(&wheel).expect("render");
        assert!(json.contains("  \"topic\""), "2-space indentation expected");
        let back: WheelNode = serde_json::from_str(&json).expect("reparse");
        assert_eq!(back, wheel);
    }

    /// **Scenario**: save_wheel creates the output directory and writes both
    /// artifacts with the shared stem.
    #[test]
    fn save_wheel_creates_dir_and_both_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out_dir = dir.path().join("files");
        let wheel = sample_wheel();

        let (puml, json) = save_wheel(&wheel, &out_dir, "futures_wheel").expect("save");

        assert_eq!(puml, out_dir.join("futures_wheel.puml"));
        assert_eq!(json, out_dir.join("futures_wheel.json"));
        let puml_body = std::fs::read_to_string(&puml).expect("read puml");
        assert!(puml_body.starts_with("@startmindmap"));
        let json_body = std::fs::read_to_string(&json).expect("read json");
        let back: WheelNode = serde_json::from_str(&json_body).expect("reparse");
        assert_eq!(back, wheel);
    }
}
