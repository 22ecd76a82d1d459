//! Message sources for replaying captured messages.
//!
//! A source is either standard input (one message) or a set of files, each
//! holding one raw message. Directories are listed non-recursively in lexical
//! file-name order so a replay is deterministic.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

/// Where one raw message comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageInput {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for MessageInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageInput::Stdin => f.write_str("<stdin>"),
            MessageInput::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Expands the configured input path into the messages to process.
///
/// # Errors
///
/// Fails if the path does not exist or a directory cannot be listed.
pub async fn list_inputs(path: &Path) -> Result<Vec<MessageInput>> {
    if path.as_os_str() == "-" {
        return Ok(vec![MessageInput::Stdin]);
    }

    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to read input path {}", path.display()))?;
    if !metadata.is_dir() {
        return Ok(vec![MessageInput::File(path.to_path_buf())]);
    }

    let mut entries = tokio::fs::read_dir(path)
        .await
        .with_context(|| format!("Failed to list input directory {}", path.display()))?;
    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to list input directory {}", path.display()))?
    {
        if entry.file_type().await?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files.into_iter().map(MessageInput::File).collect())
}

/// Reads the raw bytes of one message.
///
/// # Errors
///
/// Fails if the file or stdin cannot be read.
pub async fn read_message(input: &MessageInput) -> Result<Vec<u8>> {
    match input {
        MessageInput::Stdin => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("Failed to read message from stdin")?;
            Ok(buf)
        }
        MessageInput::File(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read message file {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_dash_means_stdin() {
        let inputs = list_inputs(Path::new("-")).await.unwrap();
        assert_eq!(inputs, vec![MessageInput::Stdin]);
    }

    #[tokio::test]
    async fn test_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("one.bin");
        std::fs::write(&path, b"N;").unwrap();

        let inputs = list_inputs(&path).await.unwrap();
        assert_eq!(inputs, vec![MessageInput::File(path.clone())]);
        assert_eq!(read_message(&inputs[0]).await.unwrap(), b"N;");
    }

    #[tokio::test]
    async fn test_directory_is_sorted_and_flat() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.msg"), b"2").unwrap();
        std::fs::write(dir.path().join("a.msg"), b"1").unwrap();
        std::fs::write(dir.path().join("c.msg"), b"3").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("0.msg"), b"0").unwrap();

        let inputs = list_inputs(dir.path()).await.unwrap();
        let names: Vec<String> = inputs
            .iter()
            .map(|input| match input {
                MessageInput::File(path) => {
                    path.file_name().unwrap().to_string_lossy().into_owned()
                }
                MessageInput::Stdin => panic!("unexpected stdin"),
            })
            .collect();
        assert_eq!(names, vec!["a.msg", "b.msg", "c.msg"]);
    }

    #[tokio::test]
    async fn test_missing_path_fails() {
        let dir = TempDir::new().unwrap();
        let err = list_inputs(&dir.path().join("absent")).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read input path"));
    }

    #[test]
    fn test_display() {
        assert_eq!(MessageInput::Stdin.to_string(), "<stdin>");
        assert_eq!(
            MessageInput::File(PathBuf::from("spool/1.msg")).to_string(),
            "spool/1.msg"
        );
    }
}
