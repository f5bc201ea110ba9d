use anyhow::{bail, Context, Result};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
enum UrlSource {
    Stdin,
    Text(String),
    File(PathBuf),
}

/// Decide where to read from. `None` means there is nothing to read.
fn classify_input(arg: Option<&str>, stdin_is_terminal: bool) -> Option<UrlSource> {
    match arg {
        None if stdin_is_terminal => None,
        None => Some(UrlSource::Stdin),
        Some(text) if text.starts_with("http") || text.contains(' ') => {
            Some(UrlSource::Text(text.to_string()))
        }
        Some(path) => Some(UrlSource::File(PathBuf::from(path))),
    }
}

/// Unreadable files count as empty input.
async fn read_file_or_empty(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            warn!("Error reading file {}: {}", path.display(), e);
            String::new()
        }
    }
}

async fn read_source(source: UrlSource) -> Result<String> {
    match source {
        UrlSource::Stdin => {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .context("Failed to read stdin")?;
            Ok(content)
        }
        UrlSource::Text(text) => Ok(text),
        UrlSource::File(path) => Ok(read_file_or_empty(&path).await),
    }
}

pub async fn run(input: Option<&str>) -> Result<()> {
    let urls = collect(input, std::io::stdin().is_terminal()).await?;
    println!("{}", serde_json::to_string_pretty(&urls)?);
    Ok(())
}

async fn collect(input: Option<&str>, stdin_is_terminal: bool) -> Result<Vec<String>> {
    let Some(source) = classify_input(input, stdin_is_terminal) else {
        bail!(
            "no input: pass text or a file path (URLs are extracted from the file), or pipe text on stdin"
        );
    };
    debug!("Reading URLs from {:?}", source);

    let content = read_source(source).await?;
    let urls = vidgrab_core::scan(&content);
    debug!("Found {} video URL(s)", urls.len());

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_classify_input() {
        assert_eq!(classify_input(None, true), None);
        assert_eq!(classify_input(None, false), Some(UrlSource::Stdin));
        assert_eq!(
            classify_input(Some("https://youtu.be/x"), true),
            Some(UrlSource::Text("https://youtu.be/x".to_string()))
        );
        assert_eq!(
            classify_input(Some("watch this https://youtu.be/x"), false),
            Some(UrlSource::Text("watch this https://youtu.be/x".to_string()))
        );
        assert_eq!(
            classify_input(Some("notes.txt"), true),
            Some(UrlSource::File(PathBuf::from("notes.txt")))
        );
    }

    #[tokio::test]
    async fn test_no_input_on_terminal_is_an_error() {
        let err = collect(None, true).await.unwrap_err();
        assert!(err.to_string().contains("no input"));
    }

    #[tokio::test]
    async fn test_collects_from_literal_text() {
        let urls = collect(Some("watch https://youtu.be/a now"), true).await.unwrap();
        assert_eq!(urls, vec!["https://youtu.be/a"]);
    }

    #[tokio::test]
    async fn test_reads_urls_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first https://vimeo.com/123").unwrap();
        writeln!(file, "then https://example.com/page and https://youtu.be/abc").unwrap();

        let content = read_source(UrlSource::File(file.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(
            vidgrab_core::scan(&content),
            vec!["https://vimeo.com/123", "https://youtu.be/abc"]
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let content = read_source(UrlSource::File(dir.path().join("missing.txt")))
            .await
            .unwrap();
        assert!(content.is_empty());
        assert!(vidgrab_core::scan(&content).is_empty());
    }

    #[test]
    fn test_json_output_shape() {
        let urls = vidgrab_core::scan("https://youtu.be/a https://youtu.be/b");
        assert_eq!(
            serde_json::to_string_pretty(&urls).unwrap(),
            "[\n  \"https://youtu.be/a\",\n  \"https://youtu.be/b\"\n]"
        );
        let empty: Vec<String> = Vec::new();
        assert_eq!(serde_json::to_string_pretty(&empty).unwrap(), "[]");
    }
}
