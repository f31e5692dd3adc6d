//! Trace reports.
//!
//! Renders traces for a terminal (sideways indented trees) or as JSON for
//! an external player.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use rbstep_tree::{NestedNode, NodeRef, Snapshot, StepKind, Trace, TreeView};

/// Output format for traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Sideways tree layout: right subtree above, left subtree below, one
/// node per line as `value (R|B) #id`.
#[derive(Debug, Clone, Copy)]
pub struct TreeDisplay<'a, K>(pub TreeView<'a, K>);

impl<K: Display> Display for TreeDisplay<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.root() {
            None => f.write_str("(empty)\n"),
            Some(root) => write_subtree(f, root, 0),
        }
    }
}

fn write_subtree<K: Display>(
    f: &mut fmt::Formatter<'_>,
    node: NodeRef<'_, K>,
    depth: usize,
) -> fmt::Result {
    if let Some(right) = node.right() {
        write_subtree(f, right, depth + 1)?;
    }
    let color = if node.is_red() { 'R' } else { 'B' };
    writeln!(
        f,
        "{:indent$}{} ({}) {}",
        "",
        node.value(),
        color,
        node.id(),
        indent = depth * 4
    )?;
    if let Some(left) = node.left() {
        write_subtree(f, left, depth + 1)?;
    }
    Ok(())
}

/// Every step of a trace with its position, message and tree.
#[derive(Debug, Clone, Copy)]
pub struct TraceDisplay<'a, K>(pub &'a Trace<K>);

impl<K: Display> Display for TraceDisplay<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.len();
        for (index, step) in self.0.iter().enumerate() {
            writeln!(f, "[{}/{}] {}", index + 1, total, step.message())?;
            writeln!(f, "{}", TreeDisplay(step.tree()))?;
        }
        if self.0.dropped() > 0 {
            writeln!(f, "({} intermediate steps not recorded)", self.0.dropped())?;
        }
        Ok(())
    }
}

pub fn render_tree<K: Display>(view: TreeView<'_, K>) -> String {
    TreeDisplay(view).to_string()
}

pub fn render_trace_text<K: Display>(trace: &Trace<K>) -> String {
    TraceDisplay(trace).to_string()
}

/// One step in a serialized trace.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport<K> {
    pub index: usize,
    pub message: String,
    pub step: StepKind<K>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<NestedNode<K>>,
}

impl<K: Clone> StepReport<K> {
    fn new(index: usize, snapshot: &Snapshot<K>) -> Self {
        Self {
            index,
            message: snapshot.message().to_string(),
            step: snapshot.kind().clone(),
            root: snapshot.tree().to_nested(),
        }
    }
}

/// The serialized trace of one insert.
#[derive(Debug, Clone, Serialize)]
pub struct TraceReport<K> {
    pub inserted: K,
    pub steps: Vec<StepReport<K>>,
    pub dropped: usize,
}

impl<K: Clone> TraceReport<K> {
    pub fn new(inserted: K, trace: &Trace<K>) -> Self {
        Self {
            inserted,
            steps: trace
                .iter()
                .enumerate()
                .map(|(index, snapshot)| StepReport::new(index, snapshot))
                .collect(),
            dropped: trace.dropped(),
        }
    }
}

impl<K: Serialize> TraceReport<K> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbstep_tree::RbTree;

    #[test]
    fn test_render_empty_tree() {
        let tree: RbTree<i32> = RbTree::new();
        assert_eq!(render_tree(tree.view()), "(empty)\n");
    }

    #[test]
    fn test_render_tree_sideways() {
        let tree: RbTree<i32> = [10, 20, 30].into_iter().collect();
        let rendered = render_tree(tree.view());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("    30 (R)"));
        assert!(lines[1].starts_with("20 (B)"));
        assert!(lines[2].starts_with("    10 (R)"));
    }

    #[test]
    fn test_render_trace_text_numbers_steps() {
        let mut tree = RbTree::new();
        tree.insert(10);
        tree.insert(20);
        let trace = tree.insert(30);

        let text = render_trace_text(&trace);
        assert!(text.starts_with("[1/4] Placed 30 as child of 20\n"));
        assert!(text.contains("[2/4] Line case: rotate left on 10 and recolor"));
        assert!(text.contains("[4/4] Insertion complete"));
        assert!(!text.contains("not recorded"));
    }

    #[test]
    fn test_render_trace_text_mentions_dropped_steps() {
        let mut tree = RbTree::with_recorder(rbstep_tree::RecorderConfig::capped(1));
        tree.insert(10);
        tree.insert(20);
        let trace = tree.insert(30);

        let text = render_trace_text(&trace);
        assert!(text.starts_with("[1/1] Insertion complete"));
        assert!(text.contains("(3 intermediate steps not recorded)"));
    }

    #[test]
    fn test_display_writes_into_any_formatter() {
        let tree: RbTree<i32> = [10, 20, 30].into_iter().collect();
        let mut out = String::new();
        std::fmt::Write::write_fmt(&mut out, format_args!("> {}", TreeDisplay(tree.view()))).unwrap();

        assert!(out.starts_with(">     30 (R)"));
        assert_eq!(out.lines().count(), 3);
        assert_eq!(render_tree(tree.view()), TreeDisplay(tree.view()).to_string());
    }

    #[test]
    fn test_trace_report_json() {
        let mut tree = RbTree::new();
        tree.insert(10);
        let trace = tree.insert(5);

        let report = TraceReport::new(5, &trace);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["inserted"], 5);
        assert_eq!(json["dropped"], 0);
        assert_eq!(json["steps"][0]["index"], 0);
        assert_eq!(json["steps"][0]["message"], "Placed 5 as child of 10");
        assert_eq!(json["steps"][0]["step"]["kind"], "placed");
        assert_eq!(json["steps"][0]["root"]["value"], 10);
        assert_eq!(json["steps"][0]["root"]["left"]["color"], "RED");
        assert_eq!(json["steps"][1]["step"]["kind"], "complete");
    }

    #[test]
    fn test_output_format_parses_lowercase() {
        let format: OutputFormat = serde_yaml::from_str("json").unwrap();
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(OutputFormat::default().to_string(), "text");
    }
}
