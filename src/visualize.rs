//! Message assembly: composes the full tree and the usage summary panel.

use crate::models::{Message, Usage};
use crate::render::Registry;
use crate::theme::{self, ColorScheme};
use crate::tree::{self, Node};

/// Render `message` into the final panel string with the default registry.
#[must_use]
pub fn render_message(message: &Message, scheme: &ColorScheme) -> String {
    render_with_registry(message, scheme, &Registry::default())
}

/// Render with an explicit registry, the extension point for custom block
/// kinds.
#[must_use]
pub fn render_with_registry(
    message: &Message,
    scheme: &ColorScheme,
    registry: &Registry,
) -> String {
    let mut root = Node::new(format!(
        "{} ({})",
        scheme.title.paint("Message"),
        scheme.role.paint(&message.role)
    ));

    if let Some(model) = &message.model {
        root.push(Node::new(format!(
            "{} {model}",
            scheme.metadata_key.paint("Model:")
        )));
    }
    if let Some(stop_reason) = &message.stop_reason {
        root.push(Node::new(format!(
            "{} {stop_reason}",
            scheme.metadata_key.paint("Stop Reason:")
        )));
    }

    if !message.content.is_empty() {
        let mut content = Node::new(format!(
            "{} ({} blocks)",
            scheme.content_label.paint("Content"),
            message.content.len()
        ));
        for (index, block) in message.content.iter().enumerate() {
            // Indices are 1-based and positional, independent of block kind.
            let mut wrapper = Node::new(scheme.block_label.paint(&format!("Block {}", index + 1)));
            if let Some(rendered) = registry.render_block(block, scheme) {
                wrapper.push(rendered);
            }
            content.push(wrapper);
        }
        root.push(content);
    }

    let tree_text = root.render(&scheme.tree_guide);
    let mut out = tree::panel(
        &tree_text,
        &scheme.content_label.paint("API Response"),
        &scheme.panel_border,
    );

    if let Some(usage) = &message.usage {
        out.push_str("\n\n");
        out.push_str(&tree::panel(
            &usage_table(usage, scheme),
            &scheme.usage_header.paint("Token Usage"),
            &scheme.usage_border,
        ));
    }

    out
}

/// Render `message` with the process-wide theme and print it to stdout.
pub fn visualize_message(message: &Message) {
    let scheme = theme::current_scheme();
    println!("{}", render_message(message, &scheme));
}

/// Two-column usage table: metric name, right-aligned count.
fn usage_table(usage: &Usage, scheme: &ColorScheme) -> String {
    let rows = [
        ("Input Tokens", usage.input_tokens),
        ("Output Tokens", usage.output_tokens),
        ("Total Tokens", usage.total()),
    ];
    let metric_width = rows
        .iter()
        .map(|(metric, _)| metric.len())
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.to_string().len())
        .max()
        .unwrap_or(0)
        .max("Value".len());

    let mut lines = vec![format!(
        "{}  {}",
        scheme
            .usage_header
            .paint(&format!("{:<metric_width$}", "Metric")),
        scheme
            .usage_header
            .paint(&format!("{:>value_width$}", "Value")),
    )];
    for (metric, value) in rows {
        lines.push(format!(
            "{}  {}",
            scheme
                .usage_metric
                .paint(&format!("{metric:<metric_width$}")),
            scheme.usage_value.paint(&format!("{value:>value_width$}")),
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_response;
    use crate::theme::DARK_SCHEME;
    use serde_json::json;

    fn render_plain(message: &serde_json::Value) -> String {
        colored::control::set_override(false);
        let message = parse_response(message).unwrap();
        render_message(&message, &DARK_SCHEME)
    }

    #[test]
    fn full_message_shows_role_model_block_and_usage() {
        let out = render_plain(&json!({
            "role": "assistant",
            "content": [{"type": "text", "text": "hi"}],
            "model": "m1",
            "usage": {"input_tokens": 5, "output_tokens": 3},
        }));
        assert!(out.contains("Message (assistant)"));
        assert!(out.contains("Model: m1"));
        assert!(out.contains("Content (1 blocks)"));
        assert!(out.contains("Block 1"));
        assert!(out.contains("hi"));
        assert!(out.contains("Token Usage"));
        assert!(out.contains("Input Tokens"));
        assert!(out.contains('5'));
        assert!(out.contains('3'));
        assert!(out.contains('8'));
    }

    #[test]
    fn usage_panel_absent_without_usage() {
        let out = render_plain(&json!({
            "role": "assistant",
            "content": [{"type": "text", "text": "hi"}],
        }));
        assert!(!out.contains("Token Usage"));
    }

    #[test]
    fn stop_reason_line_only_when_present() {
        let with = render_plain(&json!({"role": "assistant", "stop_reason": "end_turn"}));
        assert!(with.contains("Stop Reason: end_turn"));

        let without = render_plain(&json!({"role": "assistant"}));
        assert!(!without.contains("Stop Reason:"));
    }

    #[test]
    fn empty_content_omits_the_content_section() {
        let out = render_plain(&json!({"role": "user", "content": []}));
        assert!(!out.contains("Content ("));
    }

    #[test]
    fn blocks_are_numbered_by_position() {
        let out = render_plain(&json!({
            "role": "assistant",
            "content": [
                {"type": "text", "text": "a"},
                {"type": "custom_v2", "foo": "bar"},
                {"type": "text", "text": "b"},
            ],
        }));
        assert!(out.contains("Content (3 blocks)"));
        assert!(out.contains("Block 1"));
        assert!(out.contains("Block 2"));
        assert!(out.contains("Block 3"));
        assert!(out.contains("Unknown Type: custom_v2"));
    }

    #[test]
    fn usage_total_is_computed_not_stored() {
        let out = render_plain(&json!({
            "role": "assistant",
            "usage": {"input_tokens": 11, "output_tokens": 31},
        }));
        assert!(out.contains("42"));
    }
}
