pub mod app;
pub mod event;
pub mod layout;
pub mod sink;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::Result;
use crate::config::Config;
use crate::scheduler::SchedulerHandle;

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};
use self::sink::ViewEvent;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(
    handle: SchedulerHandle,
    views: UnboundedReceiver<ViewEvent>,
    config: &Config,
) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, handle, views, config);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(
    terminal: &mut Tui,
    handle: SchedulerHandle,
    mut views: UnboundedReceiver<ViewEvent>,
    config: &Config,
) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));

    loop {
        while let Ok(view) = views.try_recv() {
            tui_app.apply(view);
        }

        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = config.keybindings.get_action(&key);
                if action != Action::None {
                    tui_app.clear_status();
                }
                handle_action(&mut tui_app, &handle, action);
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(tui_app: &mut TuiApp, handle: &SchedulerHandle, action: Action) {
    match action {
        Action::Quit => tui_app.should_quit = true,
        Action::MoveUp => tui_app.move_up(),
        Action::MoveDown => tui_app.move_down(),
        Action::NextPage => tui_app.next_page(),
        Action::PrevPage => tui_app.prev_page(),
        Action::NextPane | Action::PrevPane => {
            tui_app.active_pane = tui_app.active_pane.toggle();
        }
        Action::OpenInBrowser => {
            let link = tui_app
                .selected_item()
                .filter(|item| item.has_link())
                .map(|item| item.link.clone());
            if let Some(link) = link {
                if let Err(e) = open::that(&link) {
                    tui_app.set_status(format!("Failed to open browser: {}", e));
                }
            }
        }
        Action::Refresh => {
            if let Err(e) = handle.trigger_refresh() {
                tui_app.set_status(e.to_string());
            }
        }
        Action::ResetSeen => match handle.reset_seen() {
            Ok(()) => tui_app.set_status("Seen items forgotten".to_string()),
            Err(e) => tui_app.set_status(e.to_string()),
        },
        Action::None => {}
    }
}
