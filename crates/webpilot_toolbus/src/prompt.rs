//! Human input for the `ask_user` effector.
//!
//! Asking suspends the whole session until the prompter answers. There is no
//! timeout unless [`crate::EffectorOptions::ask_timeout`] sets one.

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};
use tokio::sync::{Mutex, OnceCell};

const SEPARATOR_WIDTH: usize = 50;

#[async_trait]
pub trait Prompter: Send + Sync {
    async fn ask(&self, question: &str) -> anyhow::Result<String>;
}

/// Where [`TerminalPrompter`] reads answers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptInput {
    /// Process stdin, question on stdout.
    Stdin,
    /// The controlling terminal. Used when stdin/stdout carry protocol frames.
    Tty,
}

/// Asks over one reader/writer pair that lives as long as the prompter, so
/// lines buffered past the current answer are kept for the next question.
pub struct LinePrompter<R, W> {
    io: Mutex<(R, W)>,
}

impl<R, W> LinePrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }

    /// The answer without its line ending. An empty string at end of input.
    pub async fn ask_line(&self, question: &str) -> std::io::Result<String> {
        let mut guard = self.io.lock().await;
        let (reader, writer) = &mut *guard;

        write_prompt(writer, &render_question(question)).await?;
        let mut answer = String::new();
        reader.read_line(&mut answer).await?;
        write_prompt(writer, &format!("{}\n\n", "-".repeat(SEPARATOR_WIDTH))).await?;

        Ok(answer.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[async_trait]
impl<R, W> Prompter for LinePrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn ask(&self, question: &str) -> anyhow::Result<String> {
        Ok(self.ask_line(question).await?)
    }
}

type StdinPrompter = LinePrompter<BufReader<Stdin>, Stdout>;
type TtyPrompter = LinePrompter<BufReader<File>, File>;

/// Terminal prompter. The stream is opened on the first question and reused
/// for every later one.
pub struct TerminalPrompter {
    input: PromptInput,
    stdin: OnceCell<StdinPrompter>,
    tty: OnceCell<TtyPrompter>,
}

impl TerminalPrompter {
    pub fn new(input: PromptInput) -> Self {
        Self {
            input,
            stdin: OnceCell::new(),
            tty: OnceCell::new(),
        }
    }

    pub fn stdin() -> Self {
        Self::new(PromptInput::Stdin)
    }

    pub fn tty() -> Self {
        Self::new(PromptInput::Tty)
    }

    pub fn input(&self) -> PromptInput {
        self.input
    }

    async fn open_tty() -> std::io::Result<TtyPrompter> {
        let tty = tokio::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .await?;
        let writer = tty.try_clone().await?;
        Ok(LinePrompter::new(BufReader::new(tty), writer))
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::stdin()
    }
}

fn render_question(question: &str) -> String {
    let rule = "-".repeat(SEPARATOR_WIDTH);
    format!("\n{rule}\nQUESTION: {question}\n{rule}\nYour answer: ")
}

async fn write_prompt<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> std::io::Result<()> {
    writer.write_all(text.as_bytes()).await?;
    writer.flush().await
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn ask(&self, question: &str) -> anyhow::Result<String> {
        let answer = match self.input {
            PromptInput::Stdin => {
                let prompter = self
                    .stdin
                    .get_or_init(|| async {
                        LinePrompter::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                    })
                    .await;
                prompter.ask_line(question).await?
            }
            PromptInput::Tty => {
                let prompter = self.tty.get_or_try_init(Self::open_tty).await?;
                prompter.ask_line(question).await?
            }
        };
        Ok(answer)
    }
}
