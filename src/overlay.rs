//! HUD overlay collaborator
//!
//! Pure display setters. The overlay never feeds state back into the game;
//! button clicks arrive as input through the platform layer instead.

/// Addressable overlay elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayElement {
    Banner,
    Button,
    Instructions,
    Lives,
    Score,
    Mute,
    Pause,
}

impl OverlayElement {
    /// DOM id of the element on web
    pub fn id(&self) -> &'static str {
        match self {
            OverlayElement::Banner => "banner",
            OverlayElement::Button => "button",
            OverlayElement::Instructions => "instructions",
            OverlayElement::Lives => "lives",
            OverlayElement::Score => "score",
            OverlayElement::Mute => "mute",
            OverlayElement::Pause => "pause",
        }
    }
}

pub trait Overlay {
    fn set_banner(&mut self, text: &str);
    fn set_button(&mut self, text: &str);
    fn set_instructions(&mut self, text: &str);
    fn set_lives(&mut self, lives: i32);
    fn set_score(&mut self, score: u64);
    fn set_mute(&mut self, muted: bool);
    fn set_pause(&mut self, paused: bool);
    fn show(&mut self, element: OverlayElement);
    fn hide(&mut self, element: OverlayElement);
}

/// Overlay that displays nothing
#[derive(Debug, Default)]
pub struct NullOverlay;

impl Overlay for NullOverlay {
    fn set_banner(&mut self, _text: &str) {}
    fn set_button(&mut self, _text: &str) {}
    fn set_instructions(&mut self, _text: &str) {}
    fn set_lives(&mut self, _lives: i32) {}
    fn set_score(&mut self, _score: u64) {}
    fn set_mute(&mut self, _muted: bool) {}
    fn set_pause(&mut self, _paused: bool) {}
    fn show(&mut self, _element: OverlayElement) {}
    fn hide(&mut self, _element: OverlayElement) {}
}
