//! Line-oriented front end over a [`Session`]

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use toolloop_core::{Session, is_exit_command};

const PROMPT: &str = "You: ";

/// What happened over one run of the front end
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub answered: usize,
    pub failed: usize,
}

/// Read requests line by line until `exit` or end of input
///
/// A failed turn prints its diagnostic and the prompt comes back.
pub async fn run<R, W>(session: &mut Session, input: R, mut out: W) -> anyhow::Result<Summary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut summary = Summary::default();

    loop {
        out.write_all(PROMPT.as_bytes()).await?;
        out.flush().await?;

        let Some(line) = lines.next_line().await? else {
            out.write_all(b"\n").await?;
            break;
        };

        if is_exit_command(&line) {
            break;
        }
        let request = line.trim();
        if request.is_empty() {
            continue;
        }

        answer(session, request, &mut out, &mut summary).await?;
    }

    out.flush().await?;
    tracing::info!(answered = summary.answered, failed = summary.failed, "Session ended");
    Ok(summary)
}

/// Run each request as its own turn
pub async fn run_prompts<W>(
    session: &mut Session,
    prompts: &[String],
    mut out: W,
) -> anyhow::Result<Summary>
where
    W: AsyncWrite + Unpin,
{
    let mut summary = Summary::default();
    for prompt in prompts {
        out.write_all(format!("{PROMPT}{prompt}\n").as_bytes()).await?;
        answer(session, prompt, &mut out, &mut summary).await?;
    }
    out.flush().await?;
    Ok(summary)
}

async fn answer<W>(
    session: &mut Session,
    request: &str,
    out: &mut W,
    summary: &mut Summary,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    match session.run_turn(request).await {
        Ok(text) => {
            summary.answered += 1;
            out.write_all(format!("Agent: {text}\n\n").as_bytes()).await?;
        }
        Err(e) => {
            summary.failed += 1;
            tracing::warn!(error = %e, retryable = e.is_retryable(), "Turn failed");
            out.write_all(format!("Error: {}\n\n", e.user_message()).as_bytes())
                .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use toolloop_core::{
        AgentBuilder, AgentError, GenerationOptions, LlmProvider, Message, ModelTurn, Result,
        ToolSchema,
    };

    /// Shouts the request back; "fail" makes the model unavailable
    struct ShoutProvider;

    #[async_trait]
    impl LlmProvider for ShoutProvider {
        fn name(&self) -> &str {
            "shout"
        }

        async fn complete(
            &self,
            history: &[Message],
            _tools: &[ToolSchema],
            _options: &GenerationOptions,
        ) -> Result<ModelTurn> {
            let request = history.last().map(Message::content).unwrap_or_default();
            if request == "fail" {
                return Err(AgentError::ModelUnavailable("connection refused".into()));
            }
            Ok(ModelTurn::FinalAnswer(request.to_uppercase()))
        }
    }

    fn session() -> Session {
        let agent = AgentBuilder::new()
            .provider(Arc::new(ShoutProvider))
            .build()
            .unwrap();
        Session::new(Arc::new(agent))
    }

    async fn drive(input: &str) -> (Summary, String) {
        let mut session = session();
        let mut out = Vec::new();
        let summary = run(&mut session, input.as_bytes(), &mut out).await.unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_exit_stops_reading() {
        let (summary, out) = drive("hello\n  EXIT \nnever\n").await;
        assert_eq!(summary.answered, 1);
        assert!(out.contains("Agent: HELLO"));
        assert!(!out.contains("NEVER"));
    }

    #[tokio::test]
    async fn test_eof_ends_session() {
        let (summary, out) = drive("one\ntwo").await;
        assert_eq!(summary.answered, 2);
        assert!(out.contains("Agent: TWO"));
    }

    #[tokio::test]
    async fn test_blank_lines_skipped() {
        let (summary, out) = drive("\n   \nhi\n").await;
        assert_eq!(summary, Summary { answered: 1, failed: 0 });
        assert_eq!(out.matches(PROMPT).count(), 4);
    }

    #[tokio::test]
    async fn test_failure_keeps_session_alive() {
        let (summary, out) = drive("fail\nstill here\nexit\n").await;
        assert_eq!(summary, Summary { answered: 1, failed: 1 });
        assert!(out.contains("Error: "));
        assert!(out.contains("Agent: STILL HERE"));
    }

    #[tokio::test]
    async fn test_run_prompts() {
        let mut session = session();
        let mut out = Vec::new();
        let prompts = vec!["a".to_string(), "fail".to_string(), "b".to_string()];
        let summary = run_prompts(&mut session, &prompts, &mut out).await.unwrap();
        assert_eq!(summary, Summary { answered: 2, failed: 1 });
        assert_eq!(session.turns(), 3);
    }

    /// Log sink shared with the fmt subscriber
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_turn_warns_once() {
        let logs = Captured::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (summary, _) = drive("fail\n").await;
        assert_eq!(summary.failed, 1);

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text.matches("WARN").count(), 1);
        assert!(text.contains("Turn failed"));
    }
}
