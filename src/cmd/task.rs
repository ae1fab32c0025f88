//! Task polling command (`botdeck task watch`).

use std::sync::Arc;

use anyhow::{Result, bail};

use botdeck::config::BotdeckConfig;
use botdeck::errors::UNKNOWN_ERROR;
use botdeck::i18n::{I18n, Message};
use botdeck::poller::{AsyncTaskPoller, HttpTaskStatusClient, TaskState};

pub async fn cmd_task_watch(config: &BotdeckConfig, i18n: &I18n, task_id: i64) -> Result<()> {
    let client = HttpTaskStatusClient::from_config(config)?;
    let url = client.status_url(task_id);
    let poller = AsyncTaskPoller::with_interval(Arc::new(client), config.poll_interval());

    let succeeded = i18n.text(Message::TaskSucceeded);
    let _on_success = poller.on_success(move || {
        println!("{} {}", console::style("✓").green().bold(), succeeded);
    });
    let failed = i18n.text(Message::TaskFailed);
    let _on_error = poller.on_error(move |msg| {
        eprintln!("{} {}: {}", console::style("✗").red().bold(), failed, msg);
    });

    println!(
        "Watching task {} at {} (every {} ms)",
        task_id,
        url,
        poller.interval().as_millis()
    );
    poller.start_task(task_id);

    let state = tokio::select! {
        state = poller.wait_for_terminal() => state,
        _ = tokio::signal::ctrl_c() => {
            poller.reset();
            bail!("Interrupted while watching task {}", task_id);
        }
    };

    match state {
        TaskState::Success => Ok(()),
        TaskState::Error => {
            let message = poller.error().unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            bail!("Task {} failed: {}", task_id, message)
        }
        other => bail!("Polling of task {} stopped in state {}", task_id, other),
    }
}
