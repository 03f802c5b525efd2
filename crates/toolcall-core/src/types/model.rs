//! Model catalog and selection

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Provider behind a model, derived from the model identifier's prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    /// Unprefixed identifiers (`gpt-4o`)
    OpenAi,
    /// `anthropic:` prefix
    Anthropic,
    /// `openpipe:` prefix (fine-tuned models hosted by OpenPipe)
    OpenPipe,
}

impl ModelProvider {
    /// Derive the provider from a model identifier
    pub fn from_model_id(id: &str) -> Self {
        match id.split_once(':') {
            Some(("anthropic", _)) => ModelProvider::Anthropic,
            Some(("openpipe", _)) => ModelProvider::OpenPipe,
            _ => ModelProvider::OpenAi,
        }
    }

    /// Whether requests for this provider go through the OpenPipe gateway
    pub fn routes_through_gateway(&self) -> bool {
        !matches!(self, ModelProvider::OpenAi)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "openai",
            ModelProvider::Anthropic => "anthropic",
            ModelProvider::OpenPipe => "openpipe",
        }
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed set of selectable backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Model {
    #[default]
    Gpt4o,
    Gpt4oMini,
    Gpt4,
    Gpt35Turbo,
    Claude35Sonnet,
    Claude3Opus,
    Llama31_8b,
}

impl Model {
    /// Every selectable model, in display order
    pub const ALL: [Model; 7] = [
        Model::Gpt4o,
        Model::Gpt4oMini,
        Model::Gpt4,
        Model::Gpt35Turbo,
        Model::Claude35Sonnet,
        Model::Claude3Opus,
        Model::Llama31_8b,
    ];

    /// Identifier as sent to the endpoint
    pub fn id(&self) -> &'static str {
        match self {
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt4 => "gpt-4",
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Claude35Sonnet => "anthropic:claude-3-5-sonnet-20240620",
            Model::Claude3Opus => "anthropic:claude-3-opus-20240229",
            Model::Llama31_8b => "openpipe:llama3-1-8b",
        }
    }

    pub fn provider(&self) -> ModelProvider {
        ModelProvider::from_model_id(self.id())
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Error for identifiers outside the model catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown model: {0}")]
pub struct UnknownModel(pub String);

impl FromStr for Model {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .into_iter()
            .find(|m| m.id() == s)
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}

impl TryFrom<String> for Model {
    type Error = UnknownModel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        model.id().to_string()
    }
}

/// The session's active model
///
/// Changed only through the configuration surface; the dispatcher reads it
/// once per submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModelSelection {
    model: Model,
}

impl ModelSelection {
    pub fn new(model: Model) -> Self {
        Self { model }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    /// Identifier of the active model
    pub fn id(&self) -> &'static str {
        self.model.id()
    }

    /// Switch to another catalog model
    pub fn select(&mut self, model: Model) {
        self.model = model;
    }

    /// Switch by identifier, as typed by a user
    pub fn select_id(&mut self, id: &str) -> Result<Model, UnknownModel> {
        let model: Model = id.parse()?;
        self.model = model;
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_prefix_convention() {
        assert_eq!(ModelProvider::from_model_id("gpt-4o"), ModelProvider::OpenAi);
        assert_eq!(
            ModelProvider::from_model_id("anthropic:claude-3-opus-20240229"),
            ModelProvider::Anthropic
        );
        assert_eq!(
            ModelProvider::from_model_id("openpipe:llama3-1-8b"),
            ModelProvider::OpenPipe
        );
        assert!(!ModelProvider::OpenAi.routes_through_gateway());
        assert!(ModelProvider::Anthropic.routes_through_gateway());
    }

    #[test]
    fn test_model_round_trip_through_id() {
        for model in Model::ALL {
            assert_eq!(model.id().parse::<Model>().unwrap(), model);
        }
        assert_eq!("gpt-5".parse::<Model>(), Err(UnknownModel("gpt-5".to_string())));
    }

    #[test]
    fn test_model_serde_uses_id() {
        let json = serde_json::to_string(&Model::Claude35Sonnet).unwrap();
        assert_eq!(json, "\"anthropic:claude-3-5-sonnet-20240620\"");
        let model: Model = serde_json::from_str("\"gpt-4o-mini\"").unwrap();
        assert_eq!(model, Model::Gpt4oMini);
        assert!(serde_json::from_str::<Model>("\"nope\"").is_err());
    }

    #[test]
    fn test_selection_defaults_to_gpt4o() {
        let mut selection = ModelSelection::default();
        assert_eq!(selection.id(), "gpt-4o");

        selection.select_id("gpt-4").unwrap();
        assert_eq!(selection.model(), Model::Gpt4);

        assert!(selection.select_id("unknown").is_err());
        assert_eq!(selection.model(), Model::Gpt4);
    }
}
