use crate::error::LoadError;
use crate::input::{hold_frames, DEFAULT_KEY_HOLD};
use crate::interpreter::Chip8Interpreter;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

/// one cycle per frame
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// terminal cells per pixel, horizontally
pub const DEFAULT_SCALE: usize = 2;

/// everything the host needs to get going
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rom_path: PathBuf,
    pub frame_rate: u32,
    pub scale: usize,
    /// fixed RNG seed; wall clock when None
    pub seed: Option<u64>,
    pub mute: bool,
    /// how long a terminal key stays down after its last press or repeat
    pub key_hold: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rom_path: PathBuf::new(),
            frame_rate: DEFAULT_FRAME_RATE,
            scale: DEFAULT_SCALE,
            seed: None,
            mute: false,
            key_hold: DEFAULT_KEY_HOLD,
        }
    }
}

impl Config {
    pub fn new(rom_path: impl Into<PathBuf>) -> Self {
        Config {
            rom_path: rom_path.into(),
            ..Default::default()
        }
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// `key_hold` in frames at the configured rate
    pub fn key_hold_frames(&self) -> u32 {
        hold_frames(self.key_hold, self.frame_time())
    }

    /// a machine seeded as configured
    pub fn interpreter(&self) -> Chip8Interpreter {
        match self.seed {
            Some(seed) => Chip8Interpreter::new(seed),
            None => Chip8Interpreter::with_time_seed(),
        }
    }

    /// read the ROM into the machine's program area
    pub fn load_rom(&self, interpreter: &mut Chip8Interpreter) -> Result<usize, LoadError> {
        let mut f = File::open(&self.rom_path)?;
        interpreter.load_program(&mut f)
    }
}
