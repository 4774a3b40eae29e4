//! Built-in submit handlers: stdout and file

use super::traits::SubmitHandler;
use crate::schema::FormValues;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// How submitted values are written
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Json,
    JsonPretty,
}

/// Serialize values in the given format, with a trailing newline
pub fn render(values: &FormValues, format: OutputFormat) -> Result<String> {
    let mut out = match format {
        OutputFormat::Json => serde_json::to_string(values)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(values)?,
    };
    out.push('\n');
    Ok(out)
}

/// Writes submissions to standard output
#[derive(Debug, Clone, Default)]
pub struct StdoutHandler {
    format: OutputFormat,
}

impl StdoutHandler {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

#[async_trait]
impl SubmitHandler for StdoutHandler {
    async fn submit(&mut self, values: &FormValues) -> Result<()> {
        let out = render(values, self.format)?;
        let mut stdout = tokio::io::stdout();
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
        tracing::info!("Wrote submission to stdout");
        Ok(())
    }
}

/// Keeps the last submission in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryHandler {
    submitted: Option<FormValues>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> Option<&FormValues> {
        self.submitted.as_ref()
    }

    pub fn into_submitted(self) -> Option<FormValues> {
        self.submitted
    }
}

#[async_trait]
impl SubmitHandler for MemoryHandler {
    async fn submit(&mut self, values: &FormValues) -> Result<()> {
        self.submitted = Some(values.clone());
        Ok(())
    }
}

/// Writes each submission to a file, replacing its contents
#[derive(Debug, Clone)]
pub struct FileHandler {
    path: PathBuf,
    format: OutputFormat,
}

impl FileHandler {
    pub fn new(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

#[async_trait]
impl SubmitHandler for FileHandler {
    async fn submit(&mut self, values: &FormValues) -> Result<()> {
        let out = render(values, self.format)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&self.path, out)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::info!("Wrote submission to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldValue;
    use pretty_assertions::assert_eq;

    fn values() -> FormValues {
        [
            ("name".to_string(), FieldValue::text("neo")),
            ("age".to_string(), FieldValue::Number(30.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_render_compact() {
        let out = render(&values(), OutputFormat::Json).unwrap();
        assert_eq!(out, "{\"age\":30.0,\"name\":\"neo\"}\n");
    }

    #[test]
    fn test_render_pretty() {
        let out = render(&values(), OutputFormat::JsonPretty).unwrap();
        assert!(out.starts_with("{\n  \"age\": 30.0"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_output_format_serde() {
        assert_eq!(
            serde_json::to_string(&OutputFormat::JsonPretty).unwrap(),
            "\"json-pretty\""
        );
    }

    #[tokio::test]
    async fn test_file_handler_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        let mut handler = FileHandler::new(&path, OutputFormat::Json);

        handler.submit(&values()).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: FormValues = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, values());
    }

    #[test]
    fn test_stdout_handler_succeeds() {
        let mut handler = StdoutHandler::default();
        tokio_test::block_on(handler.submit(&values())).unwrap();
    }

    #[tokio::test]
    async fn test_memory_handler_keeps_last_submission() {
        let mut handler = MemoryHandler::new();
        assert!(handler.submitted().is_none());

        handler.submit(&FormValues::new()).await.unwrap();
        handler.submit(&values()).await.unwrap();

        assert_eq!(handler.into_submitted(), Some(values()));
    }

    #[tokio::test]
    async fn test_mock_handler_receives_values() {
        let mut mock = crate::submit::MockSubmitHandler::new();
        mock.expect_submit()
            .withf(|v: &FormValues| v.contains_key("name"))
            .times(1)
            .returning(|_| Ok(()));
        mock.submit(&values()).await.unwrap();
    }
}
