//! ctm — Code Time Machine terminal client.
//!
//! Entry point for the `ctm` binary. Wires together the terminal lifecycle
//! (`tui`), unified event bus (`event`), UI (`ui`), theme system (`theme`),
//! and the backend API client (`ctm-client`).
//!
//! # Startup sequence (order matters)
//!
//! 1. Load config and theme from XDG config — read-only, safe before
//!    terminal init.
//! 2. Build the `ApiClient` — a construction error must print to a normal
//!    terminal, not a raw-mode one.
//! 3. `install_panic_hook()` — installed before terminal init so it is the
//!    innermost hook and restores the terminal before the panic message
//!    prints.
//! 4. `register_sigterm()` — returns `Arc<AtomicBool>` polled in the event
//!    loop.
//! 5. `init_tui()` — enters alternate screen and enables raw mode.
//! 6. Create event channel, `spawn_event_task()`, and fire the one-shot
//!    backend reachability probe.
//!
//! # Safety
//!
//! `restore_tui()` is called after the event loop exits (normal quit, 'q'
//! key, SIGTERM, or `None` channel close). The event loop exits only via
//! `break`, never via `?`, so `restore_tui()` is always reached; draw errors
//! propagate out of the loop through the `?` inside the Render arm and still
//! pass the restore call on the way out of `main`. The panic hook covers
//! unexpected panics.

mod app;
mod config;
mod event;
mod net;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;

use ui::keybindings::{self, KeyAction};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Step 0: config + theme — read-only, safe before terminal init.
    let cfg = config::load();
    let theme = theme::Theme::from_name(cfg.theme_name());

    // Step 1: backend client, before raw mode so errors print cleanly.
    let api = ctm_client::ApiClient::new(cfg.backend_url())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let mut state = app::AppState::default();

    // Step 2: panic hook installed first — innermost hook restores terminal.
    tui::install_panic_hook();

    // Step 3: SIGTERM flag — polled in the 50ms heartbeat arm below.
    let term_flag = tui::register_sigterm();

    // Step 4: enter alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 5: create event channel and spawn the background event task.
    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    state.api = Some(api.clone());
    state.event_tx = Some(handler.tx.clone());

    // One-shot reachability probe — drives the offline marker only; the UI
    // is fully usable before (and regardless of how) it lands.
    net::tasks::spawn_probe(api, handler.tx.clone());

    // Event loop — exits only via `break`, never via `?`.
    // This guarantees `restore_tui()` is always reached after the loop.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: guarantees SIGTERM is checked at least every 50ms,
            // even when no crossterm/tick/render events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        // Exactly one draw() call per Render event — never elsewhere.
                        terminal.draw(|frame| ui::render(frame, &mut state, &theme))?;
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if keybindings::handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        keybindings::handle_mouse(mouse, &mut state);
                    }
                    Some(event::AppEvent::Tick) => {
                        state.tick();
                    }
                    Some(event::AppEvent::Api(envelope)) => {
                        state.apply_api(*envelope);
                    }
                    Some(event::AppEvent::Resize(_, _)) => {
                        // Handled automatically by ratatui on the next Render:
                        // frame.area() returns the new terminal size.
                    }
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                // Check SIGTERM after every event too, not just on the heartbeat,
                // so quit latency is at most one event cycle rather than 50ms.
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    // Restore the terminal at the single exit point of the loop.
    // Covers normal quit, 'q' key, SIGTERM, and channel close. The panic
    // hook handles the panic path separately.
    tui::restore_tui()?;
    Ok(())
}
