use crate::tui::TerminalEvent;
use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use tokio::{select, sync::mpsc, task::JoinHandle, time};
use tokio_util::sync::CancellationToken;

pub fn start_event_handler(
    event_sender: mpsc::Sender<TerminalEvent>,
    cancellation_token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let poll_interval = time::Duration::from_millis(10); // 100Hz polling
        loop {
            select! {
                _ = cancellation_token.cancelled() => {
                    log::info!("Terminal event handler shutting down.");
                    break;
                }

                _ = time::sleep(poll_interval) => {
                    if let Ok(true) = event::poll(std::time::Duration::from_millis(0)) {
                        let terminal_event = match event::read() {
                            Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                                TerminalEvent::Key(key)
                            }
                            Ok(CrosstermEvent::Resize(w, h)) => TerminalEvent::Resize(w, h),
                            Ok(_) => continue,
                            Err(e) => {
                                log::error!("Failed to read crossterm event: {e}");
                                break;
                            }
                        };
                        if event_sender
                            .send(terminal_event)
                            .await
                            .is_err()
                        {
                            log::warn!("App receiver dropped; stopping terminal event handler.");
                            break;
                        }
                    }
                }
            }
        }
    })
}
