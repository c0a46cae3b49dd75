mod app;
mod ui;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use devwrap_fetch::StatsFetcher;
use devwrap_session::PresentationController;

use crate::cmd_show::Prefill;
use app::App;
pub use app::Sinks;

pub fn run(
    controller: PresentationController,
    fetcher: Arc<dyn StatsFetcher>,
    prefill: Prefill,
    sinks: Sinks,
) -> anyhow::Result<()> {
    let mut app = App::new(controller, fetcher, sinks);
    if let Some((github, stackoverflow)) = prefill {
        app.form.github = github;
        app.form.stackoverflow = stackoverflow;
        app.submit();
    }

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();

    app.quit();
    result
}

fn event_loop(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                _ => {}
            }
        }

        app.on_tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
