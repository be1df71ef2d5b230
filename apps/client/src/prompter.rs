use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

/// Blocking user notifications: the terminal stand-in for `alert` and `confirm`.
#[async_trait]
pub trait Prompter: Send {
    async fn alert(&mut self, message: &str);

    /// Asks a yes/no question. Anything but an explicit yes is a no.
    async fn confirm(&mut self, message: &str) -> bool;
}

/// Reads commands and answers from stdin, writes to stdout.
pub struct TerminalPrompter {
    lines: Lines<BufReader<Stdin>>,
    out: Stdout,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            out: tokio::io::stdout(),
        }
    }

    /// Next input line, or `None` at end of input.
    pub async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        self.lines.next_line().await
    }

    pub async fn write(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn alert(&mut self, message: &str) {
        // stdout going away is not worth failing an action over
        let _ = self.write(&format!("\n!! {message}\n")).await;
    }

    async fn confirm(&mut self, message: &str) -> bool {
        if self.write(&format!("{message} [y/N] ")).await.is_err() {
            return false;
        }
        match self.read_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            _ => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
