use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{ClassifierError, ClassifierResult};

const UPLOAD_FIELD: &str = "file";
const UPLOAD_FILE_NAME: &str = "drawing.png";
const UPLOAD_MIME: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResponse {
    pub status: String,
    pub message: String,
    pub total_samples: u64,
}

impl TrainingResponse {
    /// Status line shown after a successful training upload
    pub fn summary(&self) -> String {
        format!("{} (Total: {})", self.message, self.total_samples)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub knn_prediction: String,
    pub knn_confidence: f64,
    pub svm_prediction: String,
    pub svm_confidence: f64,
}

impl PredictionResponse {
    /// One line per model, confidence as a whole percentage
    pub fn summary(&self) -> String {
        format!(
            "KNN: {} ({}%)\nSVM: {} ({}%)",
            self.knn_prediction,
            percent(self.knn_confidence),
            self.svm_prediction,
            percent(self.svm_confidence),
        )
    }
}

// Truncates, so 0.999 shows as 99%
fn percent(confidence: f64) -> i64 {
    (confidence * 100.0) as i64
}

/// Something that can learn from and classify PNG drawings
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn train(&self, png: Vec<u8>, label: &str) -> ClassifierResult<TrainingResponse>;

    async fn predict(&self, png: Vec<u8>) -> ClassifierResult<PredictionResponse>;
}

/// HTTP client for the remote classifier server
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    client: Client,
    base_url: String,
}

impl ClassifierClient {
    pub fn new(config: &AppConfig) -> ClassifierResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.request_timeout())
            .timeout(config.resource_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn upload_form(png: Vec<u8>) -> ClassifierResult<Form> {
        let part = Part::bytes(png)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME)?;
        Ok(Form::new().part(UPLOAD_FIELD, part))
    }

    async fn post_image<T>(&self, path: &str, query: &[(&str, &str)], png: Vec<u8>) -> ClassifierResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {} ({} bytes)", url, png.len());

        let response = self
            .client
            .post(&url)
            .query(query)
            .multipart(Self::upload_form(png)?)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            log::warn!("POST {} failed with status {}", url, status);
            return Err(ClassifierError::ServerError {
                status_code: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Classifier for ClassifierClient {
    async fn train(&self, png: Vec<u8>, label: &str) -> ClassifierResult<TrainingResponse> {
        self.post_image("/train", &[("label", label)], png).await
    }

    async fn predict(&self, png: Vec<u8>) -> ClassifierResult<PredictionResponse> {
        self.post_image("/predict", &[], png).await
    }
}
