use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chip8vm::config::{Config, DEFAULT_FRAME_RATE, DEFAULT_SCALE};
use chip8vm::display::MonoTermDisplay;
use chip8vm::host::Host;
use chip8vm::input::{TerminalInput, DEFAULT_KEY_HOLD};
use chip8vm::interpreter::{SCREEN_HEIGHT, SCREEN_WIDTH};
use chip8vm::sound::{Mute, SimpleBeep, Sound};
use clap::Parser;
use log::info;

/// Run a CHIP-8 program in the terminal. Keys: 1234/QWER/ASDF/ZXCV, Esc quits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// ROM image to run
    rom: PathBuf,

    /// frames (and cycles) per second
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE, value_parser = clap::value_parser!(u32).range(1..))]
    hz: u32,

    /// terminal cells per pixel, horizontally
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: usize,

    /// fixed seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// don't beep
    #[arg(long)]
    mute: bool,

    /// milliseconds a key stays down after its last press or repeat
    #[arg(long, default_value_t = DEFAULT_KEY_HOLD.as_millis() as u64)]
    key_hold_ms: u64,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = Config {
        rom_path: args.rom,
        frame_rate: args.hz,
        scale: args.scale,
        seed: args.seed,
        mute: args.mute,
        key_hold: Duration::from_millis(args.key_hold_ms),
    };

    // load before touching the terminal so errors stay readable
    let mut interpreter = config.interpreter();
    match config.load_rom(&mut interpreter) {
        Ok(len) => info!("loaded {} ({} bytes)", config.rom_path.display(), len),
        Err(e) => {
            eprintln!("couldn't load {}: {}", config.rom_path.display(), e);
            return Ok(ExitCode::FAILURE);
        }
    }

    let mut display = MonoTermDisplay::new(SCREEN_WIDTH, SCREEN_HEIGHT, config.scale)?;
    let mut input = TerminalInput::new(config.key_hold_frames())?;
    let mut sound: Box<dyn Sound> = if config.mute {
        Box::new(Mute::new())
    } else {
        Box::new(SimpleBeep::new())
    };

    let mut host = Host::new(
        &mut display,
        &mut input,
        sound.as_mut(),
        config.frame_time(),
    );
    host.run(&mut interpreter, None)?;

    // leave raw mode before printing anything
    drop(input);
    drop(display);

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..(SCREEN_HEIGHT / 8) {
        println!();
    }
    Ok(ExitCode::SUCCESS)
}
