//! Browser glue: requestAnimationFrame scheduling, DOM overlay, input

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

use super::scheduler::{FrameHandle, FrameScheduler, GameLoop};
use crate::overlay::{Overlay, OverlayElement};
use crate::sim::Phase;

pub type WebLoop = GameLoop<RafScheduler>;

/// Schedules frames with `window.requestAnimationFrame`
#[derive(Default)]
pub struct RafScheduler {
    target: Weak<RefCell<WebLoop>>,
}

impl RafScheduler {
    /// Point the scheduler at the loop it drives
    pub fn attach(game_loop: &Rc<RefCell<WebLoop>>) {
        game_loop.borrow_mut().scheduler.target = Rc::downgrade(game_loop);
    }
}

impl FrameScheduler for RafScheduler {
    fn request(&mut self) -> FrameHandle {
        let Some(window) = web_sys::window() else {
            return 0;
        };
        let target = self.target.clone();
        let closure = Closure::once(move |time: f64| {
            if let Some(game_loop) = target.upgrade() {
                game_loop.borrow_mut().run_frame(time);
            }
        });
        let handle = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .unwrap_or(0);
        closure.forget();
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle);
        }
    }
}

/// Overlay backed by DOM elements addressed by `OverlayElement::id`
pub struct DomOverlay {
    document: Document,
}

impl DomOverlay {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn set_text(&self, element: OverlayElement, text: &str) {
        if let Some(el) = self.document.get_element_by_id(element.id()) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(&self, element: OverlayElement, class: &str) {
        if let Some(el) = self.document.get_element_by_id(element.id()) {
            let _ = el.set_attribute("class", class);
        }
    }
}

impl Overlay for DomOverlay {
    fn set_banner(&mut self, text: &str) {
        self.set_text(OverlayElement::Banner, text);
    }

    fn set_button(&mut self, text: &str) {
        self.set_text(OverlayElement::Button, text);
    }

    fn set_instructions(&mut self, text: &str) {
        self.set_text(OverlayElement::Instructions, text);
    }

    fn set_lives(&mut self, lives: i32) {
        self.set_text(OverlayElement::Lives, &"♥".repeat(lives.max(0) as usize));
    }

    fn set_score(&mut self, score: u64) {
        self.set_text(OverlayElement::Score, &score.to_string());
    }

    fn set_mute(&mut self, muted: bool) {
        self.set_text(OverlayElement::Mute, if muted { "Unmute" } else { "Mute" });
    }

    fn set_pause(&mut self, paused: bool) {
        self.set_text(OverlayElement::Pause, if paused { "Resume" } else { "Pause" });
    }

    fn show(&mut self, element: OverlayElement) {
        self.set_class(element, "");
    }

    fn hide(&mut self, element: OverlayElement) {
        self.set_class(element, "hidden");
    }
}

/// Translate raw keyboard/touch/mouse events into loop input and commands
pub fn setup_input_handlers(canvas: &HtmlCanvasElement, game_loop: Rc<RefCell<WebLoop>>) {
    let Some(window) = web_sys::window() else { return };
    let Some(document) = window.document() else { return };

    // Keyboard
    {
        let game_loop = game_loop.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut lp = game_loop.borrow_mut();
            match event.key().as_str() {
                "ArrowLeft" | "a" | "A" => lp.set_left(true),
                "ArrowRight" | "d" | "D" => lp.set_right(true),
                " " | "Enter" => lp.tap(),
                "Escape" | "p" | "P" => lp.toggle_pause(),
                "m" | "M" => lp.toggle_mute(),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let game_loop = game_loop.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut lp = game_loop.borrow_mut();
            match event.key().as_str() {
                "ArrowLeft" | "a" | "A" => lp.set_left(false),
                "ArrowRight" | "d" | "D" => lp.set_right(false),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Touch: holding the left/right half of the canvas steers
    {
        let game_loop = game_loop.clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            let Some(touch) = event.touches().get(0) else { return };
            let rect = canvas_clone.get_bounding_client_rect();
            let left_half = (touch.client_x() as f64 - rect.left()) < rect.width() / 2.0;
            let mut lp = game_loop.borrow_mut();
            lp.tap();
            lp.set_left(left_half);
            lp.set_right(!left_half);
        });
        let _ = canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let game_loop = game_loop.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
            let mut lp = game_loop.borrow_mut();
            lp.set_left(false);
            lp.set_right(false);
        });
        let _ = canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Mouse click on the canvas acts as a tap
    {
        let game_loop = game_loop.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game_loop.borrow_mut().tap();
        });
        let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Overlay buttons
    let buttons: [(OverlayElement, fn(&mut WebLoop)); 3] = [
        (OverlayElement::Button, |lp| lp.tap()),
        (OverlayElement::Mute, |lp| lp.toggle_mute()),
        (OverlayElement::Pause, |lp| lp.toggle_pause()),
    ];
    for (element, action) in buttons {
        let Some(btn) = document.get_element_by_id(element.id()) else {
            continue;
        };
        let game_loop = game_loop.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            event.stop_propagation();
            action(&mut game_loop.borrow_mut());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    setup_auto_pause(&document, game_loop);
}

/// Pause when the tab is hidden
fn setup_auto_pause(document: &Document, game_loop: Rc<RefCell<WebLoop>>) {
    let document_clone = document.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        if document_clone.visibility_state() != web_sys::VisibilityState::Hidden {
            return;
        }
        let mut lp = game_loop.borrow_mut();
        if lp.game.state().current == Phase::Play && !lp.game.state().paused {
            lp.toggle_pause();
            log::info!("Auto-paused (tab hidden)");
        }
    });
    let _ = document.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}
