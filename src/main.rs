mod config;
mod games;
mod input;
mod logger;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use config::GameConfig;
use games::scrapper::ScrapperGame;
use games::Game;
use input::{ClickState, InputEvent};
use time::now_seconds;

/// Pick the save backend for this platform and start (or resume) the game.
fn build_game(config: &GameConfig, now: f64) -> Box<dyn Game> {
    #[cfg(target_arch = "wasm32")]
    {
        use games::scrapper::save::{LocalStorageStore, MemoryStore};
        match LocalStorageStore::open(&config.storage_key) {
            Some(store) => Box::new(ScrapperGame::new(store, config, now)),
            None => {
                log::warn!("localStorage unavailable, progress will not be kept");
                Box::new(ScrapperGame::new(MemoryStore::new(), config, now))
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use games::scrapper::save::FileStore;
        let store = FileStore::new(config.save_path.clone());
        Box::new(ScrapperGame::new(store, config, now))
    }
}

/// Map a pointer position to the action under it, using the grid
/// container's on-screen rect.
fn dom_click_to_action(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<u16> {
    let document = web_sys::window()?.document()?;
    // DomBackend renders into a <div> directly under <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let action = cs.hit_test_pixels(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
    );
    log::debug!("click at ({mouse_x}, {mouse_y}) -> {action:?}");
    action
}

/// Save when the page is hidden or closed.
fn save_on_pagehide(game: Rc<RefCell<Box<dyn Game>>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::<dyn FnMut()>::new(move || {
        game.borrow_mut().shutdown(now_seconds());
    });
    if let Err(e) =
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())
    {
        log::warn!("could not register pagehide save: {e:?}");
    }
    // The listener lives as long as the page.
    closure.forget();
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logger::init(if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    let config = GameConfig::load();
    let game = Rc::new(RefCell::new(build_game(&config, now_seconds())));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    save_on_pagehide(game.clone());

    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_click_to_action(mouse_event.x, mouse_event.y, &cs)
            };

            if let Some(id) = action {
                game.borrow_mut()
                    .handle_input(&InputEvent::Click(id), now_seconds());
            }
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut()
                    .handle_input(&InputEvent::Key(c), now_seconds());
            }
        }
    });

    terminal.draw_web(move |f| {
        let mut game = game.borrow_mut();
        game.update(now_seconds());

        let area = f.area();
        click_state.borrow_mut().begin_frame(area);
        game.render(f, area, &click_state);
    });

    Ok(())
}
