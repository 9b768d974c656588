//! Dodgefall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use dodgefall::assets::{AssetManifest, ManifestLoader};
    use dodgefall::audio::WebAudio;
    use dodgefall::platform::GameLoop;
    use dodgefall::platform::web::{DomOverlay, RafScheduler, WebLoop, setup_input_handlers};
    use dodgefall::renderer::RenderState;
    use dodgefall::settings::{GameConfig, MutePreference};
    use dodgefall::sim::Game;

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Optional JSON config embedded in the page
    fn load_config(document: &Document) -> GameConfig {
        let Some(json) = document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
        else {
            return GameConfig::default();
        };
        GameConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring page config: {e}");
            GameConfig::default()
        })
    }

    /// Hand the final score to `window.reportScore` if the page defines it
    fn report_score(score: u64) {
        log::info!("Final score: {score}");
        let Some(window) = web_sys::window() else { return };
        if let Ok(f) = js_sys::Reflect::get(&window, &JsValue::from_str("reportScore")) {
            if let Some(f) = f.dyn_ref::<js_sys::Function>() {
                let _ = f.call1(&JsValue::NULL, &JsValue::from_f64(score as f64));
            }
        }
    }

    /// Logical (CSS) and physical canvas sizes
    fn canvas_sizes(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (Vec2, u32, u32) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (Vec2::new(client_w as f32, client_h as f32), width, height)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Dodgefall starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "not a canvas")?;
        let (screen, width, height) = canvas_sizes(&window, &canvas);

        // Initialize WebGPU (WebGL fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render = RenderState::new(surface, &adapter, width, height, [screen.x, screen.y])
            .await
            .map_err(js_err)?;
        let render = Rc::new(RefCell::new(render));

        // Startup aborts here if any asset fails to resolve
        let seed = js_sys::Date::now() as u64;
        let game = Game::create(
            load_config(&document),
            &AssetManifest::builtin(),
            &mut ManifestLoader,
            screen,
            seed,
            Box::new(WebAudio::new()),
            Box::new(DomOverlay::new(document.clone())),
        )
        .map_err(js_err)?
        .with_muted(MutePreference::load().muted)
        .on_score(report_score);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let presenter = {
            let render = render.clone();
            move |game: &Game| {
                let mut rs = render.borrow_mut();
                match rs.render(game.last_frame().vertices(), game.background()) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (w, h) = rs.size;
                        let screen = rs.screen;
                        rs.resize(w, h, screen);
                    }
                    Err(e) => log::warn!("Render error: {e:?}"),
                }
            }
        };
        let game_loop: Rc<RefCell<WebLoop>> = Rc::new(RefCell::new(
            GameLoop::new(game, RafScheduler::default()).with_presenter(presenter),
        ));
        RafScheduler::attach(&game_loop);

        setup_input_handlers(&canvas, game_loop.clone());
        setup_resize(&canvas, game_loop.clone(), render);

        game_loop.borrow_mut().start();
        log::info!("Dodgefall running with seed {seed}");
        Ok(())
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game_loop: Rc<RefCell<WebLoop>>, render: Rc<RefCell<RenderState>>) {
        let Some(window) = web_sys::window() else { return };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else { return };
            let (screen, width, height) = canvas_sizes(&window, &canvas);
            render.borrow_mut().resize(width, height, [screen.x, screen.y]);
            game_loop.borrow_mut().game.resize(screen);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {e:?}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: an autopilot plays one game on a manual scheduler
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec2;

    use dodgefall::GameError;
    use dodgefall::assets::{AssetManifest, ManifestLoader};
    use dodgefall::audio::SilentAudio;
    use dodgefall::consts::*;
    use dodgefall::overlay::NullOverlay;
    use dodgefall::platform::{GameLoop, ManualScheduler};
    use dodgefall::settings::{GameConfig, MutePreference};
    use dodgefall::sim::Game;

    /// Two minutes of frames at 60 Hz
    const MAX_FRAMES: u64 = 60 * 120;

    fn load_config() -> GameConfig {
        let Some(path) = std::env::args().nth(1) else {
            return GameConfig::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => GameConfig::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring {path}: {e}");
                GameConfig::default()
            }),
            Err(e) => {
                log::warn!("Cannot read {path}: {e}");
                GameConfig::default()
            }
        }
    }

    /// Hold the key that moves away from the nearest obstacle in our column
    fn steer(game_loop: &mut GameLoop<ManualScheduler>) {
        let player = game_loop.game.player().body.center();
        let threat = game_loop
            .game
            .obstacles()
            .iter()
            .map(|o| o.body.center())
            .filter(|c| c.y < player.y && (c.x - player.x).abs() < PLAYER_WIDTH)
            .max_by(|a, b| a.y.total_cmp(&b.y));
        let (left, right) = match threat {
            Some(c) if c.x >= player.x => (true, false),
            Some(_) => (false, true),
            None => (false, false),
        };
        game_loop.set_left(left);
        game_loop.set_right(right);
    }

    pub fn run() -> Result<(), GameError> {
        let final_score = Rc::new(Cell::new(None));
        let sink = final_score.clone();

        let game = Game::create(
            load_config(),
            &AssetManifest::builtin(),
            &mut ManifestLoader,
            Vec2::new(480.0, BASE_SCREEN_HEIGHT),
            7,
            Box::new(SilentAudio),
            Box::new(NullOverlay),
        )?
        .with_muted(MutePreference::load().muted)
        .on_score(move |score| sink.set(Some(score)));

        let mut game_loop = GameLoop::new(game, ManualScheduler::new());
        game_loop.start();
        game_loop.tap();

        let mut frames = 0u64;
        while game_loop.scheduler.pop().is_some() {
            steer(&mut game_loop);
            game_loop.run_frame(frames as f64 * BASE_FRAME_MS);
            frames += 1;
            if final_score.get().is_some() || frames >= MAX_FRAMES {
                game_loop.stop();
            }
        }

        match final_score.get() {
            Some(score) => log::info!("Game over after {frames} frames, score {score}"),
            None => log::info!(
                "Stopped after {frames} frames, score {}, {} lives left",
                game_loop.game.state().score,
                game_loop.game.state().lives
            ),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dodgefall (native) starting headless demo...");
    log::info!("Run with `trunk serve` for the web version");

    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
