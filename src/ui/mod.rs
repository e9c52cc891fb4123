//! Terminal UI: the conversation view above a multi-line composer.

mod app;
mod composer;
mod render;

use std::error::Error;
use std::io::{ self, Stdout };
use std::sync::Arc;

use crossterm::{
    event::{ DisableBracketedPaste, EnableBracketedPaste, Event as CrosstermEvent, EventStream },
    execute,
    terminal::{ disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen },
};
use futures::StreamExt;
use log::{ info, warn };
use ratatui::{ backend::CrosstermBackend, Terminal };
use tokio::select;
use tokio::sync::broadcast;
use tokio::sync::mpsc::{ self, UnboundedReceiver, UnboundedSender };

use crate::api::ChatApi;
use crate::cli::Args;

pub use app::{ AppAction, AppState, HistoryEvent };
pub use composer::Composer;
use render::render;

/// Redraw handle shared with state mutations and background tasks. Sends
/// coalesce on the draw channel, so a burst of updates still draws once.
#[derive(Clone, Debug)]
pub struct FrameRequester {
    draw_tx: broadcast::Sender<()>,
}

impl FrameRequester {
    pub fn new(draw_tx: broadcast::Sender<()>) -> Self {
        Self { draw_tx }
    }

    pub fn schedule_frame(&self) {
        let _ = self.draw_tx.send(());
    }
}

/// Launch the interactive chat UI and block until the user quits.
pub async fn run_chat_ui(
    args: &Args,
    client: Arc<dyn ChatApi>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut terminal = init_terminal()?;
    let result = run_event_loop(&mut terminal, args, client).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    args: &Args,
    client: Arc<dyn ChatApi>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let (draw_tx, mut draw_rx) = broadcast::channel(16);
    let frame_requester = FrameRequester::new(draw_tx);
    let mut app = AppState::new(args.seed_history, frame_requester.clone());

    let (history_tx, history_rx) = mpsc::unbounded_channel();
    spawn_history_fetch(client, history_tx);
    let mut history_rx: Option<UnboundedReceiver<HistoryEvent>> = Some(history_rx);

    let mut reader = EventStream::new();
    frame_requester.schedule_frame();

    loop {
        select! {
            maybe_event = reader.next() => {
                match maybe_event {
                    Some(event) => {
                        if let EventOutcome::Quit = process_event(event?, &mut app) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            res = draw_rx.recv() => {
                match res {
                    Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        terminal.draw(|f| render(f, &app))?;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            maybe_history = async {
                match history_rx.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => None,
                }
            }, if history_rx.is_some() => {
                match maybe_history {
                    Some(event) => app.handle_history(event),
                    None => history_rx = None,
                }
            }
        }
    }

    Ok(())
}

// One-shot list call on startup. Runs off the UI task so the view never
// blocks; the process collects it on exit if it is still in flight.
fn spawn_history_fetch(client: Arc<dyn ChatApi>, tx: UnboundedSender<HistoryEvent>) {
    tokio::spawn(async move {
        let event = match client.list_chats().await {
            Ok(list) => {
                info!("initial chat list: {} chats", list.chats.len());
                HistoryEvent::Loaded(list)
            }
            Err(err) => {
                warn!("initial chat list failed: {}", err);
                HistoryEvent::Failed(err.to_string())
            }
        };
        let _ = tx.send(event);
    });
}

enum EventOutcome {
    Continue,
    Quit,
}

fn process_event(event: CrosstermEvent, app: &mut AppState) -> EventOutcome {
    match event {
        CrosstermEvent::Key(key) => match app.handle_key(key) {
            AppAction::None => EventOutcome::Continue,
            AppAction::Quit => EventOutcome::Quit,
        },
        CrosstermEvent::Paste(data) => {
            app.paste(&data);
            EventOutcome::Continue
        }
        CrosstermEvent::Resize(_, _) => {
            app.request_redraw();
            EventOutcome::Continue
        }
        _ => EventOutcome::Continue,
    }
}

fn init_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
