//! OpenAI-compatible vision backend.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use configs::LabelingConfig;
use tracing::{debug, instrument};

use super::types::{
    ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ImageUrl,
};
use super::{ImageLabeler, LabelingError};

const USER_AGENT: &str = concat!("astroannotate/", env!("CARGO_PKG_VERSION"));
const FALLBACK_MIME: &str = "image/jpeg";

/// Sends images to `{base_url}/chat/completions` and returns the first choice.
pub struct OpenAiImageLabeler {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    prompt: String,
    max_completion_tokens: u32,
    image_root: PathBuf,
}

impl OpenAiImageLabeler {
    /// The API key is passed in explicitly; nothing is read from the environment here.
    pub fn new(cfg: &LabelingConfig, api_key: impl Into<String>) -> Result<Self, LabelingError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| LabelingError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: cfg.model.clone(),
            prompt: cfg.prompt.clone(),
            max_completion_tokens: cfg.max_completion_tokens,
            image_root: PathBuf::from(&cfg.image_root),
        })
    }

    /// Relative paths are joined onto `image_root`. The path is not confined to
    /// the root: an absolute path replaces it and `..` components are kept.
    fn resolve(&self, image_path: &str) -> PathBuf {
        self.image_root.join(image_path)
    }

    fn build_request(&self, image_data: &[u8]) -> ChatCompletionRequest {
        let mime = sniff_mime(image_data);
        let encoded = base64::engine::general_purpose::STANDARD.encode(image_data);
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text { text: self.prompt.clone() },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: format!("data:{mime};base64,{encoded}") },
                    },
                ],
            }],
            max_completion_tokens: self.max_completion_tokens,
        }
    }

    /// Describe raw image bytes.
    pub async fn describe_image(&self, image_data: &[u8]) -> Result<String, LabelingError> {
        let request = self.build_request(image_data);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LabelingError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LabelingError::Api(status.as_u16(), message));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LabelingError::Parse(e.to_string()))?;

        result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(LabelingError::EmptyResponse)
    }
}

fn sniff_mime(image_data: &[u8]) -> &'static str {
    infer::get(image_data)
        .filter(|t| t.matcher_type() == infer::MatcherType::Image)
        .map(|t| t.mime_type())
        .unwrap_or(FALLBACK_MIME)
}

#[async_trait]
impl ImageLabeler for OpenAiImageLabeler {
    #[instrument(skip(self), fields(model = %self.model))]
    async fn label_image(&self, image_path: &str) -> Result<String, LabelingError> {
        if image_path.trim().is_empty() {
            return Err(LabelingError::MissingImagePath);
        }
        let path = self.resolve(image_path);
        let image_data = tokio::fs::read(&path).await.map_err(|e| LabelingError::ImageRead {
            path: display(&path),
            reason: e.to_string(),
        })?;
        debug!(bytes = image_data.len(), path = %path.display(), "sending image to vision model");
        self.describe_image(&image_data).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
