use crate::models::StatusDocument;
use std::path::PathBuf;
use tokio::fs;
use tracing::error;

pub const LOAD_ERROR_MESSAGE: &str = "Ошибка загрузки данных. Пожалуйста, попробуйте позже.";

#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("failed to read status document: {0}")]
    Io(#[from] std::io::Error),
    #[error("status request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("status response was not ok: {0}")]
    Status(reqwest::StatusCode),
    #[error("status document is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the status document lives: a local file or an http(s) resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSource {
    File(PathBuf),
    Http(String),
}

impl StatusSource {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            StatusSource::Http(raw.to_string())
        } else {
            StatusSource::File(PathBuf::from(raw))
        }
    }

    pub async fn fetch(&self) -> Result<StatusDocument, StatusError> {
        let bytes = match self {
            StatusSource::File(path) => fs::read(path).await?,
            StatusSource::Http(url) => {
                let response = reqwest::get(url).await?;
                if !response.status().is_success() {
                    return Err(StatusError::Status(response.status()));
                }
                response.bytes().await?.to_vec()
            }
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterItem {
    pub text: String,
    pub class: String,
}

pub trait StatusView {
    fn set_general_text(&mut self, text: &str);
    fn set_percentage(&mut self, width: &str, label: &str);
    fn set_parameters(&mut self, items: Vec<ParameterItem>);
    fn set_questions(&mut self, questions: Vec<String>);
    fn show_error(&mut self, message: &str);
}

pub fn arrow(state: &str) -> &'static str {
    match state.to_lowercase().as_str() {
        "up" => "↑",
        "down" => "↓",
        "stable" => "→",
        _ => "",
    }
}

pub fn parameter_items(document: &StatusDocument) -> Vec<ParameterItem> {
    document
        .parameters
        .iter()
        .map(|(key, state)| ParameterItem {
            text: format!("{key}: {}", arrow(state)),
            class: state.to_lowercase(),
        })
        .collect()
}

pub fn render_status(view: &mut impl StatusView, result: &Result<StatusDocument, StatusError>) {
    match result {
        Ok(document) => {
            view.set_general_text(&document.general_text);
            let percentage = format!("{}%", document.recovery_percentage);
            view.set_percentage(&percentage, &percentage);
            view.set_parameters(parameter_items(document));
            view.set_questions(document.questions.clone());
        }
        Err(err) => {
            error!("there was a problem loading the status document: {err}");
            view.show_error(LOAD_ERROR_MESSAGE);
        }
    }
}
