/// Game trait: the seam between the browser host loop and a game.

pub mod scrapper;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

/// Everything the host loop needs from a game. `now` is wall-clock seconds.
pub trait Game {
    /// Handle an input event. Returns true if the event was consumed.
    fn handle_input(&mut self, event: &InputEvent, now: f64) -> bool;

    /// Called once per frame. The game decides when a simulation tick is due.
    fn update(&mut self, now: f64);

    /// Render the game into the given area.
    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>);

    /// The page is going away: persist whatever must survive.
    fn shutdown(&mut self, now: f64);
}
