//! Scripted key timeline for the headless session.

use input::{ElementState, InputState, KeyCode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedKey {
    /// Wall-clock seconds since the session started.
    pub at: f32,
    pub key: KeyCode,
    pub state: ElementState,
}

/// Replays key presses and releases in time order.
#[derive(Debug, Clone)]
pub struct DemoScript {
    events: Vec<ScriptedKey>,
    next: usize,
}

impl DemoScript {
    pub fn new(mut events: Vec<ScriptedKey>) -> Self {
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { events, next: 0 }
    }

    /// A tour of the demo level: collect both fuel cans, jump up through the
    /// bridge, grab the oxygen bubble, drop back down, then swim until the
    /// air runs out.
    pub fn standard() -> Self {
        use ElementState::{Pressed, Released};
        let key = |at, key, state| ScriptedKey { at, key, state };
        Self::new(vec![
            key(1.0, KeyCode::KeyD, Pressed),
            key(2.1, KeyCode::KeyD, Released),
            key(2.3, KeyCode::Space, Pressed),
            key(2.4, KeyCode::Space, Released),
            key(3.5, KeyCode::KeyD, Pressed),
            key(3.8, KeyCode::KeyD, Released),
            // Down + jump on the bridge.
            key(4.5, KeyCode::KeyS, Pressed),
            key(4.6, KeyCode::Space, Pressed),
            key(4.7, KeyCode::Space, Released),
            key(4.8, KeyCode::KeyS, Released),
            key(5.5, KeyCode::KeyD, Pressed),
            key(7.6, KeyCode::KeyD, Released),
            // Swim up for a moment.
            key(8.0, KeyCode::KeyW, Pressed),
            key(8.3, KeyCode::KeyW, Released),
        ])
    }

    /// Feed every event due by `elapsed` into `input`.
    pub fn apply(&mut self, elapsed: f32, input: &mut InputState) -> usize {
        let start = self.next;
        while let Some(event) = self.events.get(self.next) {
            if event.at > elapsed {
                break;
            }
            input.process_keyboard(event.key, event.state);
            self.next += 1;
        }
        self.next - start
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_fire_once_in_time_order() {
        let mut script = DemoScript::new(vec![
            ScriptedKey { at: 0.5, key: KeyCode::KeyD, state: ElementState::Released },
            ScriptedKey { at: 0.1, key: KeyCode::KeyD, state: ElementState::Pressed },
        ]);
        let mut input = InputState::new();

        assert_eq!(script.apply(0.0, &mut input), 0);
        assert_eq!(script.apply(0.2, &mut input), 1);
        assert!(input.is_key_held(KeyCode::KeyD));
        assert_eq!(script.apply(0.2, &mut input), 0);
        assert_eq!(script.apply(1.0, &mut input), 1);
        assert!(!input.is_key_held(KeyCode::KeyD));
        assert!(script.is_finished());
    }

    #[test]
    fn standard_script_releases_every_key_it_presses() {
        let mut script = DemoScript::standard();
        let mut input = InputState::new();
        script.apply(f32::MAX, &mut input);
        assert!(script.is_finished());
        for key in [KeyCode::KeyD, KeyCode::KeyS, KeyCode::KeyW, KeyCode::Space] {
            assert!(!input.is_key_held(key));
        }
    }
}
