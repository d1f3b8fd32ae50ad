use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use log::{debug, warn};
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// left-hand side of a qwerty keyboard laid over the COSMAC hex keypad
///
///   1 2 3 4        1 2 3 C
///   q w e r   =>   4 5 6 D
///   a s d f        7 8 9 E
///   z x c v        A 0 B F
pub const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00), // x
    ('1', 0x01), // 1
    ('2', 0x02), // 2
    ('3', 0x03), // 3
    ('q', 0x04), // q
    ('w', 0x05), // w
    ('e', 0x06), // e
    ('a', 0x07), // a
    ('s', 0x08), // s
    ('d', 0x09), // d
    ('z', 0x0a), // z
    ('c', 0x0b), // c
    ('4', 0x0c), // 4
    ('r', 0x0d), // r
    ('f', 0x0e), // f
    ('v', 0x0f), // v
];

/// terminals don't report key releases, so a key is let go once it has gone
/// this long without a repeat. longer than the usual auto-repeat delay
pub const DEFAULT_KEY_HOLD: Duration = Duration::from_millis(600);

/// whole polls covering `hold` at one poll per `frame_time`, at least one
pub fn hold_frames(hold: Duration, frame_time: Duration) -> u32 {
    let frames = hold.as_nanos() / frame_time.as_nanos().max(1);
    frames.clamp(1, u32::MAX as u128) as u32
}

/// a transition on the hex keypad, or a request to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(u8),
    Release(u8),
    Quit,
}

/// map a host key to its keypad value, case-insensitively
pub fn keymap_lookup(key: char) -> Option<u8> {
    let key = key.to_ascii_lowercase();
    CHIP8_CONVENTIONAL_KEYMAP
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// reads keypresses
pub trait Input {
    /// drain whatever happened since the last poll, without blocking
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, io::Error>;
}

/// implementation of Input for a terminal in raw mode
pub struct TerminalInput {
    keymap: HashMap<char, u8>,
    // polls left before each held key is released
    held: [u32; 16],
    hold_frames: u32,
}

impl TerminalInput {
    /// `hold_frames` polls without a repeat release a key
    pub fn new(hold_frames: u32) -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(TerminalInput::unattached(hold_frames))
    }

    fn unattached(hold_frames: u32) -> Self {
        TerminalInput {
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            held: [0; 16],
            hold_frames: hold_frames.max(1),
        }
    }

    fn press(&mut self, key: u8, events: &mut Vec<InputEvent>) {
        if self.held[key as usize] == 0 {
            events.push(InputEvent::Press(key));
        }
        self.held[key as usize] = self.hold_frames;
    }

    fn age_held_keys(&mut self, events: &mut Vec<InputEvent>) {
        for (key, remaining) in self.held.iter_mut().enumerate() {
            if *remaining > 0 {
                *remaining -= 1;
                if *remaining == 0 {
                    events.push(InputEvent::Release(key as u8));
                }
            }
        }
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("couldn't leave raw mode: {}", e);
        }
    }
}

impl Input for TerminalInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, io::Error> {
        let mut events = Vec::new();
        self.age_held_keys(&mut events);
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Char('c') if evt.modifiers.contains(KeyModifiers::CONTROL) => {
                        events.push(InputEvent::Quit)
                    }
                    KeyCode::Char(key) => match self.keymap.get(&key.to_ascii_lowercase()) {
                        Some(&mapped_key) => self.press(mapped_key, &mut events),
                        None => {
                            debug!("can't map {:?} to a COSMAC key", key);
                        }
                    },
                    KeyCode::Esc => events.push(InputEvent::Quit),
                    _ => {
                        debug!("unmapped key event received");
                    }
                },
                _ => {
                    debug!("non-key event received");
                }
            }
        }
        Ok(events)
    }
}

/// dummy Input implementation for testing; hands out one batch per poll
pub struct DummyInput {
    batches: Vec<Vec<InputEvent>>,
}

impl DummyInput {
    pub fn new(batches: Vec<Vec<InputEvent>>) -> Self {
        let mut batches = batches;
        batches.reverse();
        DummyInput { batches }
    }
}

impl Input for DummyInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, io::Error> {
        Ok(self.batches.pop().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_layout() {
        let rows = ["1234", "qwer", "asdf", "zxcv"];
        let expected = [
            [0x1, 0x2, 0x3, 0xc],
            [0x4, 0x5, 0x6, 0xd],
            [0x7, 0x8, 0x9, 0xe],
            [0xa, 0x0, 0xb, 0xf],
        ];
        for (row, values) in rows.iter().zip(expected.iter()) {
            for (key, value) in row.chars().zip(values.iter()) {
                assert_eq!(keymap_lookup(key), Some(*value), "key {}", key);
            }
        }
    }

    #[test]
    fn test_keymap_case_and_unmapped() {
        assert_eq!(keymap_lookup('Q'), Some(0x4));
        assert_eq!(keymap_lookup('p'), None);
        assert_eq!(keymap_lookup('5'), None);
    }

    #[test]
    fn test_dummy_input_batches() -> Result<(), io::Error> {
        let mut input = DummyInput::new(vec![
            vec![InputEvent::Press(1)],
            vec![],
            vec![InputEvent::Release(1), InputEvent::Quit],
        ]);
        assert_eq!(input.poll_events()?, vec![InputEvent::Press(1)]);
        assert!(input.poll_events()?.is_empty());
        assert_eq!(
            input.poll_events()?,
            vec![InputEvent::Release(1), InputEvent::Quit]
        );
        assert!(input.poll_events()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_hold_frames() {
        let sixty_hz = Duration::from_secs(1) / 60;
        assert_eq!(hold_frames(DEFAULT_KEY_HOLD, sixty_hz), 36);
        assert_eq!(hold_frames(Duration::from_millis(500), sixty_hz), 30);
        assert_eq!(hold_frames(Duration::ZERO, sixty_hz), 1);
        assert_eq!(hold_frames(Duration::from_secs(10), Duration::ZERO), u32::MAX);
        // outlasts a 500ms auto-repeat delay
        let held = sixty_hz * hold_frames(DEFAULT_KEY_HOLD, sixty_hz);
        assert!(held > Duration::from_millis(500));
    }

    #[test]
    fn test_held_keys_release_after_timeout() {
        const HOLD: u32 = 36;
        // build without touching the terminal
        let mut input = TerminalInput::unattached(HOLD);
        let mut events = Vec::new();
        input.press(0xa, &mut events);
        assert_eq!(events, vec![InputEvent::Press(0xa)]);

        // a repeat while held doesn't press again
        events.clear();
        input.press(0xa, &mut events);
        assert!(events.is_empty());

        for _ in 0..HOLD - 1 {
            input.age_held_keys(&mut events);
        }
        assert!(events.is_empty());
        input.age_held_keys(&mut events);
        assert_eq!(events, vec![InputEvent::Release(0xa)]);
    }

    #[test]
    fn test_repeat_refreshes_hold() {
        let mut input = TerminalInput::unattached(3);
        let mut events = Vec::new();
        input.press(1, &mut events);
        input.age_held_keys(&mut events);
        input.age_held_keys(&mut events);
        // auto-repeat arrives just in time
        input.press(1, &mut events);
        input.age_held_keys(&mut events);
        input.age_held_keys(&mut events);
        assert_eq!(events, vec![InputEvent::Press(1)]);
        input.age_held_keys(&mut events);
        assert_eq!(events, vec![InputEvent::Press(1), InputEvent::Release(1)]);
    }
}
