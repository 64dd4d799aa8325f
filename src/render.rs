//! Per-kind content block renderers and the open dispatch registry.
//!
//! Each known block kind gets one renderer; unrecognized kinds fall back to
//! a generic renderer that dumps the raw payload under an `Unknown Type:`
//! label. Renderers are total: a missing field omits its sub-element and an
//! unexpected shape degrades to the generic form, never an error.

use std::collections::HashMap;

use serde_json::Value;

use crate::models::ContentBlock;
use crate::theme::ColorScheme;
use crate::tree::Node;
use crate::truncate::{JSON_LIMIT, OUTPUT_LIMIT, TEXT_LIMIT, truncate};

// === Dispatch ===

/// Renders one kind of content block into a subtree.
pub trait BlockRenderer: Send + Sync {
    /// Render `block`, or return `None` when there is nothing to show.
    fn render(&self, block: &ContentBlock, scheme: &ColorScheme) -> Option<Node>;
}

/// Open dispatch table from block kind to renderer.
///
/// New kinds are added with [`Registry::register`] without touching the
/// existing renderers; anything unregistered routes to the fallback.
pub struct Registry {
    renderers: HashMap<String, Box<dyn BlockRenderer>>,
    fallback: Box<dyn BlockRenderer>,
}

impl Registry {
    /// Registry with the built-in renderers installed.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            renderers: HashMap::new(),
            fallback: Box::new(UnknownRenderer),
        };
        registry.register("text", Box::new(TextRenderer));
        registry.register("tool_use", Box::new(ToolUseRenderer));
        registry.register("tool_result", Box::new(ToolResultRenderer));
        registry.register("server_tool_use", Box::new(ServerToolUseRenderer));
        registry.register(
            "code_execution_tool_result",
            Box::new(CodeExecutionResultRenderer),
        );
        registry
    }

    /// Register (or replace) the renderer for a block kind.
    pub fn register(&mut self, kind: impl Into<String>, renderer: Box<dyn BlockRenderer>) {
        self.renderers.insert(kind.into(), renderer);
    }

    /// Look up the renderer for `kind`, falling back to the unknown renderer.
    #[must_use]
    pub fn renderer_for(&self, kind: &str) -> &dyn BlockRenderer {
        self.renderers
            .get(kind)
            .map_or(self.fallback.as_ref(), |renderer| renderer.as_ref())
    }

    /// Dispatch one block through the registry.
    pub fn render_block(&self, block: &ContentBlock, scheme: &ColorScheme) -> Option<Node> {
        self.renderer_for(&block.kind).render(block, scheme)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

// === Shared helpers ===

/// Pretty-print a JSON value, falling back to its compact form on error.
#[must_use]
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Styled, truncated pretty-JSON body node for a payload value.
fn json_node(value: &Value, scheme: &ColorScheme) -> Node {
    Node::new(scheme.json_body.paint(&truncate(&pretty_json(value), JSON_LIMIT)))
}

/// JSON-ish truthiness: empty containers, empty strings, `false`, and `null`
/// all count as absent.
fn non_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(_) => true,
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Human-readable labels for known tool caller type tags. Unrecognized tags
/// render verbatim.
fn caller_label(tag: &str) -> &str {
    match tag {
        "code_execution_20250825" => "code execution environment",
        "direct" => "model (direct)",
        other => other,
    }
}

fn caller_line(block: &ContentBlock, scheme: &ColorScheme, map_known_tags: bool) -> Option<Node> {
    let caller = block.data.get("caller").filter(|value| non_empty(value))?;
    let tag = caller
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let label = if map_known_tags { caller_label(tag) } else { tag };
    Some(Node::new(format!(
        "{} {label}",
        scheme.metadata_key.paint("Caller:")
    )))
}

fn id_line(block: &ContentBlock, key: &str, label: &str, scheme: &ColorScheme) -> Option<Node> {
    let id = block.str_field(key).filter(|id| !id.is_empty())?;
    Some(Node::new(format!("{} {id}", scheme.tool_id.paint(label))))
}

/// Number code lines the way a snippet view would.
fn numbered_code(code: &str, scheme: &ColorScheme) -> String {
    let rendered: Vec<String> = code
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            format!(
                "{} {}",
                scheme.tool_id.paint(&format!("{:>3} │", index + 1)),
                scheme.text_body.paint(line)
            )
        })
        .collect();
    rendered.join("\n")
}

// === Renderers ===

/// Plain text block: a single labeled leaf, or nothing when empty.
pub struct TextRenderer;

impl BlockRenderer for TextRenderer {
    fn render(&self, block: &ContentBlock, scheme: &ColorScheme) -> Option<Node> {
        let text = block.str_field("text").filter(|text| !text.is_empty())?;
        let mut node = Node::new(scheme.text_label.paint("Text"));
        node.push(Node::new(
            scheme.text_body.paint(&truncate(text, TEXT_LIMIT)),
        ));
        Some(node)
    }
}

/// Tool invocation issued by the model.
pub struct ToolUseRenderer;

impl BlockRenderer for ToolUseRenderer {
    fn render(&self, block: &ContentBlock, scheme: &ColorScheme) -> Option<Node> {
        let name = block.str_field("name").unwrap_or("unknown");
        let mut node = Node::new(format!(
            "{} {}",
            scheme.tool_use_label.paint("Tool Use:"),
            scheme.tool_name.paint(name)
        ));

        if let Some(id) = id_line(block, "id", "ID:", scheme) {
            node.push(id);
        }
        if let Some(caller) = caller_line(block, scheme, true) {
            node.push(caller);
        }
        if let Some(input) = block.data.get("input").filter(|value| non_empty(value)) {
            let mut input_node = Node::new(scheme.input_label.paint("Input:"));
            input_node.push(json_node(input, scheme));
            node.push(input_node);
        }

        Some(node)
    }
}

/// Tool invocation issued by a server-side agent. The `input.code` field, if
/// present, is shown as a numbered code listing instead of generic JSON.
pub struct ServerToolUseRenderer;

impl BlockRenderer for ServerToolUseRenderer {
    fn render(&self, block: &ContentBlock, scheme: &ColorScheme) -> Option<Node> {
        let mut node = Node::new(scheme.tool_use_label.paint("Server Tool Use"));

        if let Some(id) = id_line(block, "id", "ID:", scheme) {
            node.push(id);
        }
        if let Some(caller) = caller_line(block, scheme, false) {
            node.push(caller);
        }
        if let Some(input) = block.data.get("input").filter(|value| non_empty(value)) {
            let code = input
                .get("code")
                .and_then(Value::as_str)
                .filter(|code| !code.is_empty());
            match code {
                Some(code) => {
                    let mut code_node = Node::new(scheme.input_label.paint("Code:"));
                    code_node.push(Node::new(numbered_code(&truncate(code, TEXT_LIMIT), scheme)));
                    node.push(code_node);
                }
                None => {
                    let mut input_node = Node::new(scheme.input_label.paint("Input:"));
                    input_node.push(json_node(input, scheme));
                    node.push(input_node);
                }
            }
        }

        Some(node)
    }
}

/// Result returned for a prior tool invocation.
pub struct ToolResultRenderer;

impl BlockRenderer for ToolResultRenderer {
    fn render(&self, block: &ContentBlock, scheme: &ColorScheme) -> Option<Node> {
        let status = if block.bool_field("is_error") {
            scheme.error.paint("Error")
        } else {
            scheme.success.paint("Success")
        };
        let mut node = Node::new(format!(
            "{} {status}",
            scheme.tool_result_label.paint("Tool Result:")
        ));

        if let Some(id) = id_line(block, "tool_use_id", "Tool Use ID:", scheme) {
            node.push(id);
        }

        match block.data.get("content") {
            Some(Value::Array(items)) => {
                for item in items {
                    if let Some(output) = result_item_node(item, scheme) {
                        node.push(output);
                    }
                }
            }
            Some(other) if non_empty(other) => {
                let text = match other {
                    Value::String(text) => text.clone(),
                    value => value.to_string(),
                };
                let mut output = Node::new(scheme.output_label.paint("Output:"));
                output.push(Node::new(
                    scheme.text_body.paint(&truncate(&text, TEXT_LIMIT)),
                ));
                node.push(output);
            }
            _ => {}
        }

        Some(node)
    }
}

/// One item of a mixed result-content sequence. Text-bearing items with no
/// text render nothing at all.
fn result_item_node(item: &Value, scheme: &ColorScheme) -> Option<Node> {
    let is_text_item = item
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind == "text");
    let body = if is_text_item {
        let text = item
            .get("text")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())?;
        truncate(text, TEXT_LIMIT)
    } else {
        match item {
            Value::String(text) => text.clone(),
            value => value.to_string(),
        }
    };
    let mut output = Node::new(scheme.output_label.paint("Output:"));
    output.push(Node::new(scheme.text_body.paint(&body)));
    Some(output)
}

/// Result of a server-side code execution, with exit code and captured
/// stdout/stderr.
pub struct CodeExecutionResultRenderer;

impl BlockRenderer for CodeExecutionResultRenderer {
    fn render(&self, block: &ContentBlock, scheme: &ColorScheme) -> Option<Node> {
        let content = match block.data.get("content") {
            Some(Value::Object(map)) => Some(map.clone()),
            None => Some(serde_json::Map::new()),
            Some(_) => None,
        };
        let Some(content) = content else {
            // Unexpected nested shape: dump the whole payload instead.
            let mut node = Node::new(scheme.tool_result_label.paint("Code Execution Result"));
            node.push(json_node(&Value::Object(block.data.clone()), scheme));
            return Some(node);
        };

        let return_code = content
            .get("return_code")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        let stdout = content.get("stdout").and_then(Value::as_str).unwrap_or("");
        let stderr = content.get("stderr").and_then(Value::as_str).unwrap_or("");

        let status = if return_code == 0 {
            scheme.success.paint(&format!("Success (exit {return_code})"))
        } else {
            scheme.error.paint(&format!("Error (exit {return_code})"))
        };
        let mut node = Node::new(format!(
            "{} {status}",
            scheme.tool_result_label.paint("Code Execution Result:")
        ));

        if !stdout.is_empty() {
            let mut stdout_node = Node::new(scheme.success.paint("stdout:"));
            stdout_node.push(Node::new(
                scheme.text_body.paint(&truncate(stdout, OUTPUT_LIMIT)),
            ));
            node.push(stdout_node);
        }
        if !stderr.is_empty() {
            let mut stderr_node = Node::new(scheme.error.paint("stderr:"));
            stderr_node.push(Node::new(
                scheme.text_body.paint(&truncate(stderr, OUTPUT_LIMIT)),
            ));
            node.push(stderr_node);
        }
        if stdout.is_empty() && stderr.is_empty() {
            node.push(Node::new(scheme.metadata_key.paint("(no output)")));
        }

        Some(node)
    }
}

/// Fallback for unrecognized kinds: the literal kind string plus the raw
/// payload as JSON.
pub struct UnknownRenderer;

impl BlockRenderer for UnknownRenderer {
    fn render(&self, block: &ContentBlock, scheme: &ColorScheme) -> Option<Node> {
        let mut node = Node::new(format!(
            "{} {}",
            scheme.unknown_type.paint("Unknown Type:"),
            block.kind
        ));
        node.push(json_node(&Value::Object(block.data.clone()), scheme));
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_content_block;
    use crate::theme::DARK_SCHEME;
    use serde_json::json;

    fn render_plain(block: &Value) -> Option<String> {
        colored::control::set_override(false);
        let block = parse_content_block(block);
        Registry::default()
            .render_block(&block, &DARK_SCHEME)
            .map(|node| node.render(&DARK_SCHEME.tree_guide))
    }

    #[test]
    fn empty_text_renders_nothing() {
        assert_eq!(render_plain(&json!({"type": "text"})), None);
        assert_eq!(render_plain(&json!({"type": "text", "text": ""})), None);
    }

    #[test]
    fn long_text_is_truncated_at_the_text_limit() {
        let text = "a".repeat(TEXT_LIMIT + 50);
        let out = render_plain(&json!({"type": "text", "text": text})).unwrap();
        assert!(out.contains("... (truncated)"));
        assert!(!out.contains(&"a".repeat(TEXT_LIMIT + 1)));
    }

    #[test]
    fn text_at_the_limit_is_not_truncated() {
        let text = "a".repeat(TEXT_LIMIT);
        let out = render_plain(&json!({"type": "text", "text": text})).unwrap();
        assert!(!out.contains("(truncated)"));
        assert!(out.contains(&text));
    }

    #[test]
    fn tool_use_shows_name_id_and_input() {
        let out = render_plain(&json!({
            "type": "tool_use",
            "name": "get_weather",
            "id": "t1",
            "input": {"location": "SF"},
        }))
        .unwrap();
        assert!(out.contains("Tool Use: get_weather"));
        assert!(out.contains("ID: t1"));
        assert!(out.contains("Input:"));
        assert!(out.contains("\"location\": \"SF\""));
    }

    #[test]
    fn tool_use_without_name_falls_back_to_unknown() {
        let out = render_plain(&json!({"type": "tool_use"})).unwrap();
        assert!(out.contains("Tool Use: unknown"));
        assert!(!out.contains("ID:"));
        assert!(!out.contains("Input:"));
    }

    #[test]
    fn known_caller_tags_map_to_readable_labels() {
        let out = render_plain(&json!({
            "type": "tool_use",
            "name": "run",
            "caller": {"type": "code_execution_20250825"},
        }))
        .unwrap();
        assert!(out.contains("Caller: code execution environment"));

        let out = render_plain(&json!({
            "type": "tool_use",
            "name": "run",
            "caller": {"type": "direct"},
        }))
        .unwrap();
        assert!(out.contains("Caller: model (direct)"));

        let out = render_plain(&json!({
            "type": "tool_use",
            "name": "run",
            "caller": {"type": "something_else"},
        }))
        .unwrap();
        assert!(out.contains("Caller: something_else"));
    }

    #[test]
    fn server_tool_use_prefers_code_over_generic_input() {
        let out = render_plain(&json!({
            "type": "server_tool_use",
            "id": "srvtoolu_1",
            "input": {"code": "print('hi')\nprint('bye')"},
        }))
        .unwrap();
        assert!(out.contains("Server Tool Use"));
        assert!(out.contains("Code:"));
        assert!(out.contains("print('hi')"));
        assert!(out.contains("1 │"));
        assert!(!out.contains("Input:"));
    }

    #[test]
    fn server_tool_use_without_code_renders_generic_input() {
        let out = render_plain(&json!({
            "type": "server_tool_use",
            "input": {"query": "weather"},
        }))
        .unwrap();
        assert!(out.contains("Input:"));
        assert!(out.contains("\"query\": \"weather\""));
        assert!(!out.contains("Code:"));
    }

    #[test]
    fn server_tool_use_caller_tag_is_verbatim() {
        let out = render_plain(&json!({
            "type": "server_tool_use",
            "caller": {"type": "code_execution_20250825"},
        }))
        .unwrap();
        assert!(out.contains("Caller: code_execution_20250825"));
    }

    #[test]
    fn tool_result_status_follows_is_error_only() {
        let ok = render_plain(&json!({"type": "tool_result", "content": "fine"})).unwrap();
        assert!(ok.contains("Tool Result: Success"));

        let err = render_plain(&json!({
            "type": "tool_result",
            "is_error": true,
            "content": "fine",
        }))
        .unwrap();
        assert!(err.contains("Tool Result: Error"));
    }

    #[test]
    fn tool_result_array_content_renders_text_items() {
        let out = render_plain(&json!({
            "type": "tool_result",
            "tool_use_id": "t9",
            "content": [
                {"type": "text", "text": "first"},
                {"type": "image", "source": "..."},
            ],
        }))
        .unwrap();
        assert!(out.contains("Tool Use ID: t9"));
        assert!(out.contains("first"));
        assert!(out.contains("\"image\""));
    }

    #[test]
    fn tool_result_without_content_has_no_output_node() {
        let out = render_plain(&json!({"type": "tool_result"})).unwrap();
        assert!(!out.contains("Output:"));
    }

    #[test]
    fn code_execution_failure_shows_exit_code_and_stderr() {
        let out = render_plain(&json!({
            "type": "code_execution_tool_result",
            "content": {"return_code": 1, "stderr": "boom"},
        }))
        .unwrap();
        assert!(out.contains("Error (exit 1)"));
        assert!(out.contains("stderr:"));
        assert!(out.contains("boom"));
        assert!(!out.contains("stdout:"));
    }

    #[test]
    fn code_execution_success_without_output_shows_placeholder() {
        let out = render_plain(&json!({
            "type": "code_execution_tool_result",
            "content": {"return_code": 0, "stdout": "", "stderr": ""},
        }))
        .unwrap();
        assert!(out.contains("Success (exit 0)"));
        assert!(out.contains("(no output)"));
    }

    #[test]
    fn code_execution_with_malformed_content_dumps_payload() {
        let out = render_plain(&json!({
            "type": "code_execution_tool_result",
            "content": "not an object",
        }))
        .unwrap();
        assert!(out.contains("Code Execution Result"));
        assert!(out.contains("not an object"));
    }

    #[test]
    fn unknown_kinds_render_the_literal_kind_and_payload() {
        let out = render_plain(&json!({"type": "custom_v2", "foo": "bar"})).unwrap();
        assert!(out.contains("Unknown Type: custom_v2"));
        assert!(out.contains("\"foo\": \"bar\""));
    }

    #[test]
    fn registry_accepts_new_kinds_without_touching_builtins() {
        struct Stub;
        impl BlockRenderer for Stub {
            fn render(&self, _: &ContentBlock, _: &ColorScheme) -> Option<Node> {
                Some(Node::new("stubbed"))
            }
        }

        colored::control::set_override(false);
        let mut registry = Registry::default();
        registry.register("custom_v2", Box::new(Stub));
        let block = parse_content_block(&json!({"type": "custom_v2"}));
        let out = registry
            .render_block(&block, &DARK_SCHEME)
            .map(|node| node.render(&DARK_SCHEME.tree_guide))
            .unwrap();
        assert_eq!(out, "stubbed");

        let text = parse_content_block(&json!({"type": "text", "text": "still here"}));
        assert!(registry.render_block(&text, &DARK_SCHEME).is_some());
    }
}
