mod common;

use common::*;
use dodgefall::audio::Sound;
use dodgefall::overlay::OverlayElement;
use dodgefall::settings::GameConfig;
use dodgefall::sim::{Phase, TickInput};

#[test]
fn three_spaced_hits_end_the_game() {
    let mut h = harness(GameConfig::default());
    h.game.frame(0.0, TickInput::default());
    h.game.frame(16.0, TickInput { tap: true, ..Default::default() });
    assert_eq!(h.game.state().current, Phase::Play);
    assert_eq!(h.game.state().lives, 3);

    // Continuous overlap from t=1000 to t=3400, one frame every 100ms
    let mut t = 1000.0;
    let mut over_at = None;
    while t <= 3400.0 {
        place_hit(&mut h.game);
        h.game.frame(t, TickInput::default());

        let lives = h.game.state().lives;
        let expected = 3 - ((t - 1000.0) / 1200.0).floor() as i32 - 1;
        assert_eq!(lives, expected, "lives at t={t}");

        if h.game.state().current == Phase::Over {
            over_at = Some(t);
            break;
        }
        assert_eq!(h.game.state().current, Phase::Play);
        t += 100.0;
    }

    // Transition happens on the very frame lives first reads < 1
    assert_eq!(over_at, Some(3400.0));
    assert_eq!(h.game.state().lives, 0);

    // One hit sound per blast wave: blasts are throttled to 600ms
    let hits = count(&h.audio, &AudioEvent::Play(Sound::Hit, false));
    assert_eq!(hits, 5);
    assert_eq!(count(&h.audio, &AudioEvent::Stop(Sound::PowerUp)), 1);
    assert_eq!(count(&h.audio, &AudioEvent::Play(Sound::GameOver, false)), 1);

    let lives: Vec<i32> = h
        .overlay
        .borrow()
        .iter()
        .filter_map(|c| match c {
            OverlayCall::Lives(n) => Some(*n),
            _ => None,
        })
        .collect();
    assert_eq!(lives, vec![3, 2, 1, 0]);
}

#[test]
fn overlap_within_window_costs_one_life() {
    let mut h = harness(GameConfig::default());
    h.game.frame(0.0, TickInput { tap: true, ..Default::default() });

    for t in [1000.0, 1100.0] {
        place_hit(&mut h.game);
        h.game.frame(t, TickInput::default());
    }
    assert_eq!(h.game.state().lives, 2);

    place_hit(&mut h.game);
    h.game.frame(2300.0, TickInput::default());
    assert_eq!(h.game.state().lives, 1);
}

#[test]
fn score_reported_once_after_effects_drain() {
    let reports = Log::default();
    let sink = reports.clone();
    let config = GameConfig {
        lives: 1,
        ..GameConfig::default()
    };
    let h = harness(config);
    let mut game = h.game.on_score(move |s| sink.borrow_mut().push(s));

    game.frame(0.0, TickInput { tap: true, ..Default::default() });
    place_hit(&mut game);
    game.frame(16.0, TickInput::default());
    assert_eq!(game.state().current, Phase::Over);

    let mut t = 16.0;
    for _ in 0..2000 {
        t += 16.0;
        game.frame(t, TickInput::default());
    }
    assert!(game.effects().is_empty());
    assert_eq!(*reports.borrow(), vec![0]);

    // Restart: over -> ready -> play, overlay shows the ready screen again
    game.frame(t + 16.0, TickInput { tap: true, ..Default::default() });
    assert_eq!(game.state().current, Phase::Ready);
    assert!(h.overlay.borrow().contains(&OverlayCall::Banner("Game Over".to_string())));
    game.frame(t + 32.0, TickInput { tap: true, ..Default::default() });
    assert_eq!(game.state().current, Phase::Play);
    assert_eq!(game.state().lives, 1);
    assert_eq!(*reports.borrow(), vec![0]);
    assert!(h.overlay.borrow().iter().filter(|c| **c == OverlayCall::Show(OverlayElement::Banner)).count() >= 2);
}
