//! Terminal rendering of results and session state

use toolcall_core::{
    ConversationLog, DispatchResult, MessageRole, Model, ModelSelection, ToolInvocation, ToolRegistry,
};

/// Render a dispatch result for stdout
pub fn result(result: &DispatchResult) -> String {
    match result {
        DispatchResult::Text(text) => format!("assistant> {}", text),
        DispatchResult::ToolCall { call, additional } => std::iter::once(call)
            .chain(additional)
            .map(tool_call)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn tool_call(call: &ToolInvocation) -> String {
    let arguments = serde_json::to_string_pretty(&call.arguments).unwrap_or_else(|_| call.arguments.to_string());
    format!("Tool Call: {}\n{}", call.name, arguments)
}

/// One line per tool: state, unit, selected and available fields
pub fn tools(registry: &ToolRegistry) -> String {
    registry
        .definitions()
        .iter()
        .map(|tool| {
            let mut line = format!(
                "[{}] {:<22} fields: {}",
                if tool.enabled { "x" } else { " " },
                tool.name().as_str(),
                tool.selected_fields.join(","),
            );
            if let Some(unit) = tool.options.unit() {
                line.push_str(&format!("  unit: {}", unit));
            }
            line.push_str(&format!("  (available: {})", tool.available_fields().join(",")));
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn models(selection: &ModelSelection) -> String {
    Model::ALL
        .iter()
        .map(|model| {
            let marker = if *model == selection.model() { "*" } else { " " };
            format!("{} {}", marker, model.id())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn history(log: &ConversationLog) -> String {
    if log.is_empty() {
        return "(no messages yet)".to_string();
    }
    log.iter()
        .map(|turn| match turn.role {
            MessageRole::User => format!("you> {}", turn.content),
            MessageRole::Assistant => format!("assistant> {}", turn.content),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolcall_core::{NoOpLogger, ToolName, ToolPatch};

    #[test]
    fn test_render_tool_call() {
        let rendered = result(&DispatchResult::ToolCall {
            call: ToolInvocation::new("get_current_weather", json!({"location": "Tokyo"})),
            additional: vec![],
        });
        assert!(rendered.starts_with("Tool Call: get_current_weather\n{"));
        assert!(rendered.contains("\"location\": \"Tokyo\""));
    }

    #[test]
    fn test_render_text() {
        assert_eq!(result(&DispatchResult::Text("Hi".into())), "assistant> Hi");
    }

    #[test]
    fn test_render_tools() {
        let mut registry = ToolRegistry::new(NoOpLogger::shared());
        registry
            .update(ToolName::DraftEmail, ToolPatch::new().enabled(false))
            .unwrap();

        let rendered = tools(&registry);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("[x] get_current_weather"));
        assert!(lines[0].contains("unit: fahrenheit"));
        assert!(lines[3].starts_with("[ ] draft_email"));
    }

    #[test]
    fn test_render_models() {
        let rendered = models(&ModelSelection::default());
        assert_eq!(rendered.lines().count(), 7);
        assert_eq!(rendered.lines().next(), Some("* gpt-4o"));
    }
}
