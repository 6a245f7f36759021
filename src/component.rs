//! Component trait - Interface for UI components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// The pattern follows:
/// 1. `handle_key_event` / `handle_mouse_event` - Convert events to Actions
/// 2. `update` - Process Actions and update state
/// 3. `draw` - Render the component
///
/// Components whose rendering needs the dataset (the grids) keep `draw` empty
/// and are drawn by a screen function that receives the data.
pub trait Component {
    /// Called once before the event loop starts
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Handle a key event, returning an optional Action
    ///
    /// Key events become Actions here; state changes belong in `update`.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Handle a mouse event, returning an optional Action
    ///
    /// Similar to handle_key_event but for mouse interactions.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let _ = mouse;
        Ok(None)
    }

    /// Update component state based on an Action
    ///
    /// The returned Action, if any, is fed back into `update` (a grid's
    /// `DeleteSelected` comes back as `RequestDelete` for the selected record).
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Draw the component to the frame
    ///
    /// Use the provided `area` to determine where to draw.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
