//! Conversation dispatcher
//!
//! Owns the conversation log and turns one user message into one completion
//! request:
//!
//! ```text
//! user text ─► log.push(user)
//!            ─► CompletionRequest { model, messages, tools?, stream: false }
//!            ─► Provider::complete
//!            ─► classify: tool calls │ text │ nothing
//!            ─► log.push(assistant)  (success only)
//! ```

mod error;

pub use error::{DispatchError, DispatchOutcome};

use std::sync::Arc;

use crate::logging::Logger;
use crate::providers::{AssistantMessage, CompletionRequest, Provider};
use crate::tools::ToolRegistry;
use crate::types::{ConversationLog, ConversationTurn, ModelSelection, ToolCall, ToolInvocation};
use crate::{log_debug, log_info, log_warn};

/// Classified reply of one submission
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    /// Plain assistant text
    Text(String),
    /// The model asked for a tool; `call` is the first one it listed and
    /// `additional` holds the later calls whose arguments decoded
    ToolCall {
        call: ToolInvocation,
        additional: Vec<ToolInvocation>,
    },
}

impl DispatchResult {
    /// Every invocation in the order the endpoint listed them
    pub fn invocations(&self) -> Vec<&ToolInvocation> {
        match self {
            DispatchResult::Text(_) => Vec::new(),
            DispatchResult::ToolCall { call, additional } => {
                std::iter::once(call).chain(additional.iter()).collect()
            }
        }
    }

    /// Content of the assistant turn recorded for this result
    pub fn transcript(&self) -> String {
        match self {
            DispatchResult::Text(content) => content.clone(),
            DispatchResult::ToolCall { call, .. } => format!("Called on function {}", call.name),
        }
    }
}

/// Sends the conversation to the endpoint and records the exchange
pub struct Dispatcher {
    provider: Arc<dyn Provider>,
    log: ConversationLog,
    logger: Arc<dyn Logger>,
}

impl Dispatcher {
    /// Create a dispatcher with an empty log
    pub fn new(provider: Arc<dyn Provider>, logger: Arc<dyn Logger>) -> Self {
        Self {
            provider,
            log: ConversationLog::new(),
            logger,
        }
    }

    /// The conversation so far
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Submit one user message
    ///
    /// The user turn is appended before the call and kept on failure. The
    /// assistant turn is appended only when a result is returned. `&mut self`
    /// keeps submissions strictly one at a time.
    pub async fn submit(
        &mut self,
        registry: &ToolRegistry,
        model: &ModelSelection,
        text: &str,
    ) -> DispatchOutcome<DispatchResult> {
        self.log.push(ConversationTurn::user(text));

        let tools = registry.list_active();
        let request = CompletionRequest::new(model.id(), self.log.to_messages()).with_tools(tools);

        log_info!(
            self.logger,
            "[Dispatcher] submit: provider={}, model={}, messages={}, tools={}",
            self.provider.name(),
            request.model,
            request.messages.len(),
            request.tools.as_ref().map_or(0, Vec::len)
        );

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                match e.status() {
                    Some(status) => log_warn!(self.logger, "[Dispatcher] endpoint answered {}: {}", status, e),
                    None => log_warn!(self.logger, "[Dispatcher] endpoint call failed: {}", e),
                }
                return Err(DispatchError::EndpointUnavailable(e));
            }
        };

        let result = self.classify(response.message)?;
        self.log.push(ConversationTurn::assistant(result.transcript()));
        Ok(result)
    }

    fn classify(&self, message: AssistantMessage) -> DispatchOutcome<DispatchResult> {
        let mut calls = message.tool_calls.iter();
        if let Some(first) = calls.next() {
            // Only the first call decides success; later ones are best effort
            let call = self.decode(first)?;
            let additional = calls.filter_map(|c| self.decode(c).ok()).collect();
            log_debug!(self.logger, "[Dispatcher] tool call: {}", call.name);
            return Ok(DispatchResult::ToolCall { call, additional });
        }

        match message.content {
            Some(content) if !content.is_empty() => Ok(DispatchResult::Text(content)),
            _ => {
                log_warn!(self.logger, "[Dispatcher] empty reply");
                Err(DispatchError::EmptyResponse)
            }
        }
    }

    fn decode(&self, call: &ToolCall) -> DispatchOutcome<ToolInvocation> {
        call.parse_arguments()
            .map(|arguments| ToolInvocation::new(&call.name, arguments))
            .map_err(|source| {
                log_warn!(
                    self.logger,
                    "[Dispatcher] malformed arguments for {}: {}",
                    call.name,
                    source
                );
                DispatchError::MalformedToolArguments {
                    name: call.name.clone(),
                    source,
                }
            })
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("provider", &self.provider.name())
            .field("turns", &self.log.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::providers::{MockMode, MockProvider};
    use crate::tools::{TemperatureUnit, ToolName, ToolPatch};
    use crate::types::{MessageRole, Model};
    use serde_json::json;

    fn setup(provider: MockProvider) -> (Arc<MockProvider>, Dispatcher, ToolRegistry) {
        let provider = Arc::new(provider);
        let dispatcher = Dispatcher::new(provider.clone(), NoOpLogger::shared());
        let registry = ToolRegistry::new(NoOpLogger::shared());
        (provider, dispatcher, registry)
    }

    #[tokio::test]
    async fn test_weather_tool_call() {
        let (provider, mut dispatcher, registry) = setup(MockProvider::tool_call(
            "get_current_weather",
            r#"{"location":"Tokyo","unit":"fahrenheit"}"#,
            NoOpLogger::shared(),
        ));

        let result = dispatcher
            .submit(&registry, &ModelSelection::default(), "What's the weather in Tokyo?")
            .await
            .unwrap();

        assert_eq!(
            result,
            DispatchResult::ToolCall {
                call: ToolInvocation::new(
                    "get_current_weather",
                    json!({"location": "Tokyo", "unit": "fahrenheit"})
                ),
                additional: vec![],
            }
        );

        let turns = dispatcher.log().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0], ConversationTurn::user("What's the weather in Tokyo?"));
        assert_eq!(turns[1], ConversationTurn::assistant("Called on function get_current_weather"));

        let request = provider.last_request().unwrap();
        assert_eq!(request.model, "gpt-4o");
        assert!(!request.stream);
        assert_eq!(request.tools.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_text_reply_is_recorded_verbatim() {
        let reply = "  Hello!\nHow can I help?  ";
        let (_, mut dispatcher, registry) = setup(MockProvider::fixed(reply, NoOpLogger::shared()));

        let result = dispatcher
            .submit(&registry, &ModelSelection::default(), "hi")
            .await
            .unwrap();

        assert_eq!(result, DispatchResult::Text(reply.to_string()));
        assert_eq!(dispatcher.log().last().unwrap().content, reply);
        assert_eq!(dispatcher.log().last().unwrap().role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_malformed_arguments_keep_user_turn_last() {
        let (_, mut dispatcher, registry) = setup(MockProvider::tool_call(
            "draft_email",
            "{not json",
            NoOpLogger::shared(),
        ));

        let err = dispatcher
            .submit(&registry, &ModelSelection::default(), "Email Bob")
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::MalformedToolArguments { ref name, .. } if name == "draft_email"));
        assert_eq!(dispatcher.log().len(), 1);
        assert_eq!(dispatcher.log().last().unwrap(), &ConversationTurn::user("Email Bob"));
    }

    #[tokio::test]
    async fn test_endpoint_failure() {
        let (_, mut dispatcher, registry) = setup(MockProvider::error("connection refused", NoOpLogger::shared()));

        let err = dispatcher
            .submit(&registry, &ModelSelection::default(), "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::EndpointUnavailable(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(dispatcher.log().len(), 1);
        assert!(dispatcher.log().last().unwrap().is_user());
    }

    #[tokio::test]
    async fn test_empty_reply() {
        let (_, mut dispatcher, registry) = setup(MockProvider::with_mode(MockMode::Empty, NoOpLogger::shared()));

        let err = dispatcher
            .submit(&registry, &ModelSelection::default(), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::EmptyResponse));

        // Empty string content counts as no content
        let (_, mut dispatcher, registry) = setup(MockProvider::fixed("", NoOpLogger::shared()));
        let err = dispatcher
            .submit(&registry, &ModelSelection::default(), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::EmptyResponse));
        assert_eq!(dispatcher.log().len(), 1);
    }

    #[tokio::test]
    async fn test_tools_absent_when_all_disabled() {
        let (provider, mut dispatcher, mut registry) = setup(MockProvider::echo(NoOpLogger::shared()));
        for tool in ToolName::ALL {
            registry.update(tool, ToolPatch::new().enabled(false)).unwrap();
        }

        dispatcher
            .submit(&registry, &ModelSelection::default(), "no tools please")
            .await
            .unwrap();

        let request = provider.last_request().unwrap();
        assert!(request.tools.is_none());
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("tools").is_none());
    }

    #[tokio::test]
    async fn test_full_history_and_current_config_each_turn() {
        let (provider, mut dispatcher, mut registry) = setup(
            MockProvider::echo(NoOpLogger::shared()).then(MockMode::ToolCalls(vec![ToolCall::new(
                "search_jira_cards",
                r#"{"query":"login bug"}"#,
            )])),
        );
        let mut model = ModelSelection::new(Model::Gpt4oMini);

        dispatcher.submit(&registry, &model, "find login bugs").await.unwrap();

        registry
            .update(ToolName::GetCurrentWeather, ToolPatch::new().unit(TemperatureUnit::Celsius))
            .unwrap();
        model.select(Model::Llama31_8b);
        let result = dispatcher.submit(&registry, &model, "and the weather?").await.unwrap();
        assert_eq!(result, DispatchResult::Text("Echo: and the weather?".to_string()));

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].model, "gpt-4o-mini");
        assert_eq!(requests[0].messages.len(), 1);

        assert_eq!(requests[1].model, "openpipe:llama3-1-8b");
        assert_eq!(
            requests[1].messages,
            vec![
                ConversationTurn::user("find login bugs"),
                ConversationTurn::assistant("Called on function search_jira_cards"),
                ConversationTurn::user("and the weather?"),
            ]
        );

        let unit_enum = |i: usize| {
            requests[i].tools.as_ref().unwrap()[0].function.parameters["properties"]["unit"]["enum"].clone()
        };
        assert_eq!(unit_enum(0), json!(["fahrenheit"]));
        assert_eq!(unit_enum(1), json!(["celsius"]));
    }

    #[tokio::test]
    async fn test_multiple_tool_calls() {
        let (_, mut dispatcher, registry) = setup(MockProvider::with_mode(
            MockMode::ToolCalls(vec![
                ToolCall::new("browse_company_items", r#"{"keyword":"shoes"}"#),
                ToolCall::new("contact_support", r#"{"message":"where is my order"}"#),
            ]),
            NoOpLogger::shared(),
        ));

        let result = dispatcher
            .submit(&registry, &ModelSelection::default(), "shoes, and my order?")
            .await
            .unwrap();

        let names: Vec<&str> = result.invocations().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["browse_company_items", "contact_support"]);
        assert_eq!(
            dispatcher.log().last().unwrap().content,
            "Called on function browse_company_items"
        );
    }

    #[tokio::test]
    async fn test_bad_later_call_is_dropped() {
        let (_, mut dispatcher, registry) = setup(MockProvider::with_mode(
            MockMode::ToolCalls(vec![
                ToolCall::new("get_current_weather", r#"{"location":"Tokyo"}"#),
                ToolCall::new("contact_support", "not json"),
            ]),
            NoOpLogger::shared(),
        ));

        let result = dispatcher
            .submit(&registry, &ModelSelection::default(), "weather, then support")
            .await
            .unwrap();

        assert_eq!(
            result,
            DispatchResult::ToolCall {
                call: ToolInvocation::new("get_current_weather", json!({"location": "Tokyo"})),
                additional: vec![],
            }
        );
        assert_eq!(dispatcher.log().len(), 2);
        assert_eq!(
            dispatcher.log().last().unwrap().content,
            "Called on function get_current_weather"
        );
    }

    #[tokio::test]
    async fn test_bad_first_call_rejects_the_reply() {
        let (_, mut dispatcher, registry) = setup(MockProvider::with_mode(
            MockMode::ToolCalls(vec![
                ToolCall::new("contact_support", "oops"),
                ToolCall::new("browse_company_items", r#"{"keyword":"shoes"}"#),
            ]),
            NoOpLogger::shared(),
        ));

        let err = dispatcher
            .submit(&registry, &ModelSelection::default(), "two things")
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::MalformedToolArguments { ref name, .. } if name == "contact_support"));
        assert_eq!(dispatcher.log().len(), 1);
    }

    #[test]
    fn test_transcript() {
        assert_eq!(DispatchResult::Text("hi".into()).transcript(), "hi");
        assert!(DispatchResult::Text("hi".into()).invocations().is_empty());

        let result = DispatchResult::ToolCall {
            call: ToolInvocation::new("contact_support", json!({"message": "help"})),
            additional: vec![],
        };
        assert_eq!(result.transcript(), "Called on function contact_support");
    }
}
