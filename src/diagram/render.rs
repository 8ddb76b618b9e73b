//! Diagram renderers.

use super::{Diagram, Node};
use crate::config::Theme;
use colored::Colorize;

/// Turns a [`Diagram`] into text.
pub trait DiagramRenderer {
    fn render(&self, diagram: &Diagram) -> String;
}

/// A tree for the terminal, root on top and one branch per subnet.
///
/// Coloured per theme, or without any escape codes when created with
/// [`TreeRenderer::plain`] for writing to a file.
#[derive(Debug, Clone, Copy)]
pub struct TreeRenderer {
    pub theme: Option<Theme>,
}

impl TreeRenderer {
    /// Tree coloured with `theme`, for the terminal.
    pub fn new(theme: Theme) -> TreeRenderer {
        TreeRenderer { theme: Some(theme) }
    }

    /// A renderer that never emits colour codes.
    pub fn plain() -> TreeRenderer {
        TreeRenderer { theme: None }
    }

    fn title(&self, text: &str) -> String {
        match self.theme {
            Some(Theme::Dark) => text.bold().bright_white().to_string(),
            Some(Theme::Light) => text.bold().black().to_string(),
            None => text.to_string(),
        }
    }

    fn detail(&self, text: &str) -> String {
        match self.theme {
            Some(Theme::Dark) => text.bright_cyan().to_string(),
            Some(Theme::Light) => text.blue().to_string(),
            None => text.to_string(),
        }
    }
}

impl DiagramRenderer for TreeRenderer {
    fn render(&self, diagram: &Diagram) -> String {
        let mut out = format!(
            "{} {}\n",
            self.title(&diagram.root.title),
            self.detail(&diagram.root.detail)
        );
        let last = diagram.children.len().saturating_sub(1);
        for (i, child) in diagram.children.iter().enumerate() {
            let branch = if i == last { "└──" } else { "├──" };
            out.push_str(&format!(
                "{branch} {} ({})\n",
                self.title(&child.title),
                self.detail(&child.detail)
            ));
        }
        out
    }
}

/// Graphviz DOT source. Render with `dot -Tpng` or `dot -Tpdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer;

fn dot_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn dot_node(node: &Node) -> String {
    // DOT's y axis points up, the layout's points down.
    format!(
        "  \"{id}\" [label=\"{title}\\n{detail}\", pos=\"{x},{y}!\"];\n",
        id = dot_escape(&node.id),
        title = dot_escape(&node.title),
        detail = dot_escape(&node.detail),
        x = node.position.x,
        y = -node.position.y,
    )
}

impl DiagramRenderer for DotRenderer {
    fn render(&self, diagram: &Diagram) -> String {
        let mut out = String::from("digraph network {\n");
        out.push_str("  node [shape=box, style=rounded];\n");
        out.push_str(&dot_node(&diagram.root));
        for child in &diagram.children {
            out.push_str(&dot_node(child));
        }
        for edge in &diagram.edges {
            out.push_str(&format!(
                "  \"{}\" -> \"{}\" [id=\"{}\", arrowhead=normal];\n",
                dot_escape(&edge.source),
                dot_escape(&edge.target),
                dot_escape(&edge.id)
            ));
        }
        out.push_str("}\n");
        out
    }
}
