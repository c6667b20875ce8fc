//! One-shot question: `advisor ask <prompt>`.

use anyhow::bail;
use serde::Serialize;

use advisor_core::chat::{ChatSession, CompletionTransport, RejectReason, SendOutcome};
use advisor_types::chat::MessageRole;

use crate::cli::chat::renderer::ReplyRenderer;
use crate::cli::stream_view::{StreamView, run_turn};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct AskResult {
    advisor: String,
    reply: String,
    ok: bool,
}

pub async fn ask(
    state: &AppState,
    advisor_slug: &str,
    prompt: &str,
    no_stream: bool,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let session = state.session(advisor_slug)?;
    let label = session.advisor().name.clone();

    session.set_input(prompt);
    let live = !(json || no_stream);
    let view = StreamView {
        label: &label,
        live,
        spinner: live && !quiet,
        notices: !json,
    };
    let report = run_turn(&session, &view).await;
    let reply = last_reply(&session);

    match report.outcome {
        SendOutcome::Rejected(RejectReason::EmptyInput) => bail!("Nothing to ask: the prompt is empty"),
        SendOutcome::Rejected(RejectReason::Busy) => bail!("A request is already in flight"),
        SendOutcome::Completed | SendOutcome::Failed(_) => {}
    }
    let ok = matches!(report.outcome, SendOutcome::Completed);

    if json {
        let result = AskResult {
            advisor: session.advisor().slug.clone(),
            reply,
            ok,
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if live {
        println!();
    } else if ok {
        println!("{}", ReplyRenderer::new().render(&reply).trim_end());
    }

    if let SendOutcome::Failed(err) = report.outcome {
        bail!(err);
    }
    Ok(())
}

/// Text of the assistant message that answered the last question.
fn last_reply<T: CompletionTransport>(session: &ChatSession<T>) -> String {
    session
        .messages()
        .into_iter()
        .last()
        .filter(|m| m.role == MessageRole::Assistant)
        .map(|m| m.content)
        .unwrap_or_default()
}
