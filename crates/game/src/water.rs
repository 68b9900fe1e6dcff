//! Water volumes: submersion toggling and the tint fade.

use engine_core::{Clock, FrameTime, Tag, Tween};

/// Anything that can be put in or out of water.
pub trait Swimmer {
    fn set_in_water(&mut self, in_water: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Reveal,
    Hide,
}

/// A water trigger volume. Owns the alpha its tiles are drawn with.
#[derive(Debug, Clone)]
pub struct WaterZone {
    alpha: f32,
    reveal_alpha: f32,
    change_time: f32,
    fade: Option<(Transition, Tween)>,
}

impl WaterZone {
    pub fn new(reveal_alpha: f32, change_time: f32) -> Self {
        Self {
            alpha: 1.0,
            reveal_alpha,
            change_time,
            fade: None,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// The fade currently running, if any.
    #[cfg(test)]
    pub fn transition(&self) -> Option<Transition> {
        self.fade.as_ref().map(|(t, _)| *t)
    }

    pub fn on_enter(&mut self, other: Tag, swimmer: &mut impl Swimmer) {
        if other.is_player() {
            swimmer.set_in_water(true);
            self.start(Transition::Reveal);
        }
    }

    pub fn on_exit(&mut self, other: Tag, swimmer: &mut impl Swimmer) {
        if other.is_player() {
            swimmer.set_in_water(false);
            self.start(Transition::Hide);
        }
    }

    /// Begin a fade from the current alpha. Replaces any fade in progress.
    pub fn start(&mut self, transition: Transition) {
        let target = match transition {
            Transition::Reveal => self.reveal_alpha,
            Transition::Hide => 1.0,
        };
        self.fade = Some((
            transition,
            Tween::new(Clock::Scaled, self.alpha, target, self.change_time),
        ));
    }

    pub fn tick(&mut self, frame: FrameTime) {
        if let Some((_, tween)) = self.fade.as_mut() {
            self.alpha = tween.tick(frame);
            if tween.is_finished() {
                self.fade = None;
            }
        }
    }
}
