//! # Interactive Prompt
//!
//! Yes/no question asked on the terminal at startup when `--proxy ask`
//! is in effect.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Question shown before the first gateway call.
pub const PROXY_QUESTION: &str = "Do you want to use a proxy? (y/n): ";

/// Writes `question` and reads one line of answer.
///
/// Only `y` or `Y` (surrounding whitespace ignored) counts as yes; any
/// other answer, including end of input, is no.
///
/// # Errors
/// I/O errors on either stream.
pub async fn ask_yes_no<R, W>(question: &str, reader: &mut R, writer: &mut W) -> std::io::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer.write_all(question.as_bytes()).await?;
    writer.flush().await?;

    let mut answer = String::new();
    reader.read_line(&mut answer).await?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Asks [`PROXY_QUESTION`] on stdin/stdout.
///
/// # Errors
/// Terminal I/O errors.
pub async fn ask_use_proxy() -> std::io::Result<bool> {
    let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    ask_yes_no(PROXY_QUESTION, &mut stdin, &mut stdout).await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn answer(input: &str) -> (bool, String) {
        let mut reader = input.as_bytes();
        let mut written = Vec::new();
        let yes = ask_yes_no(PROXY_QUESTION, &mut reader, &mut written).await.unwrap();
        (yes, String::from_utf8(written).unwrap())
    }

    #[tokio::test]
    async fn test_prompt_is_written() {
        let (_, written) = answer("y\n").await;
        assert_eq!(written, PROXY_QUESTION);
    }

    #[tokio::test]
    async fn test_only_y_means_yes() {
        assert!(answer("y\n").await.0);
        assert!(answer(" Y \r\n").await.0);
        assert!(!answer("yes\n").await.0);
        assert!(!answer("n\n").await.0);
        assert!(!answer("").await.0);
    }
}
