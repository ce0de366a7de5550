use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use super::Command;
use crate::cli::output::{format_entry, FrameOutput, OutputFormat};
use crate::demo::{ChatSession, SubmitOutcome};
use crate::error::DemoError;
use crate::playback::Transcript;

pub struct ChatCommand {
    pub query: Option<String>,
    pub speed: f64,
    pub output: FrameOutput,
}

impl ChatCommand {
    pub fn new(speed: f64) -> Self {
        Self {
            query: None,
            speed,
            output: FrameOutput::new(OutputFormat::Text),
        }
    }

    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output = FrameOutput::new(format);
        self
    }

    /// Print entries appended since the last call
    fn print_new(&self, transcript: &Transcript, printed: &mut usize) -> Result<()> {
        // a restart shrinks the log; start over from the top
        if transcript.len() < *printed {
            *printed = 0;
        }
        for entry in &transcript.entries()[*printed..] {
            self.output.emit(entry, || format!("{}\n", format_entry(entry)))?;
        }
        *printed = transcript.len();
        Ok(())
    }

    async fn send(
        &self,
        session: &ChatSession,
        updates: &mut watch::Receiver<Transcript>,
        printed: &mut usize,
        input: &str,
    ) -> Result<SubmitOutcome> {
        let submit = session.submit(input);
        tokio::pin!(submit);

        let outcome = loop {
            tokio::select! {
                outcome = &mut submit => break outcome,
                Ok(()) = updates.changed() => {
                    let transcript = updates.borrow_and_update().clone();
                    self.print_new(&transcript, printed)?;
                }
            }
        };

        let transcript = updates.borrow_and_update().clone();
        self.print_new(&transcript, printed)?;
        Ok(outcome)
    }
}

impl Command for ChatCommand {
    async fn execute(&self) -> Result<()> {
        let session = ChatSession::builtin(self.speed);
        let mut updates = session.subscribe();
        let mut printed = 0;

        let greeting = updates.borrow_and_update().clone();
        self.print_new(&greeting, &mut printed)?;

        if let Some(query) = &self.query {
            self.send(&session, &mut updates, &mut printed, query).await?;
            return Ok(());
        }

        self.output.note("   Try one of:");
        for query in session.resolver().canned_queries() {
            self.output.note(&format!("   → {query}"));
        }
        self.output.note("   (/restart clears the conversation, /quit exits)\n");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.map_err(DemoError::from)? {
            match line.as_str() {
                "/quit" => break,
                "/restart" => {
                    if session.restart() {
                        let transcript = updates.borrow_and_update().clone();
                        self.print_new(&transcript, &mut printed)?;
                    }
                }
                _ => {
                    self.send(&session, &mut updates, &mut printed, &line).await?;
                }
            }
        }

        Ok(())
    }
}
