use crate::browser::{ControlEvent, Evaluation, RecipeBrowser};
use log::{debug, warn};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

/// Feeds events into the browser until the channel closes, then lets any
/// pending evaluation fire. `observe` sees every evaluation in order.
pub async fn run<F>(
    browser: &mut RecipeBrowser,
    mut events: mpsc::Receiver<ControlEvent>,
    mut observe: F,
) where
    F: FnMut(&Evaluation),
{
    loop {
        let deadline = browser.next_deadline().map(Instant::from_std);
        let wake = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    debug!("Control event {event:?}");
                    if let Some(evaluation) = browser.handle(event, Instant::now().into_std()) {
                        observe(&evaluation);
                    }
                }
                None => break,
            },
            _ = sleep_until(wake), if deadline.is_some() => {
                if let Some(evaluation) = browser.poll(Instant::now().into_std()) {
                    observe(&evaluation);
                }
            }
        }
    }

    if let Some(deadline) = browser.next_deadline() {
        sleep_until(Instant::from_std(deadline)).await;
        if let Some(evaluation) = browser.poll(Instant::now().into_std()) {
            observe(&evaluation);
        }
    }
}

/// Parses one control event per line and sends it. Blank lines are skipped
/// and invalid ones logged. Returns once input ends or the receiver is gone.
pub async fn forward_lines<R>(reader: R, events: mpsc::Sender<ControlEvent>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<ControlEvent>() {
            Ok(event) => {
                if events.send(event).await.is_err() {
                    break;
                }
            }
            Err(e) => warn!("{e}"),
        }
    }
    Ok(())
}
