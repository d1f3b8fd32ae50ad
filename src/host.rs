use crate::display::Display;
use crate::error::HostError;
use crate::input::{Input, InputEvent};
use crate::interpreter::{Chip8Interpreter, Cycle};
use crate::sound::Sound;
use log::info;
use std::error::Error;
use std::time::{Duration, Instant};

/// the real-time loop around the interpreter: input in, one cycle, sound and
/// picture out, then sleep out the rest of the frame
pub struct Host<'a> {
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    sound: &'a mut dyn Sound,
    frame_time: Duration,
}

impl<'a> Host<'a> {
    pub fn new(
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        sound: &'a mut dyn Sound,
        frame_time: Duration,
    ) -> Host<'a> {
        Host {
            display,
            input,
            sound,
            frame_time,
        }
    }

    /// run a single frame; false once the user has asked to quit
    pub fn frame(&mut self, interpreter: &mut Chip8Interpreter) -> Result<bool, Box<dyn Error>> {
        for event in self.input.poll_events()? {
            if event == InputEvent::Quit {
                return Ok(false);
            }
            interpreter.apply_input(event);
        }

        match interpreter.execute_cycle() {
            Cycle::Executed { beep: true } => self.sound.beep()?,
            _ => self.sound.stop()?,
        }

        self.display.draw(interpreter.framebuffer())?;
        Ok(true)
    }

    /// loop until quit, or for `max_frames` if given. returns frames run
    pub fn run(
        &mut self,
        interpreter: &mut Chip8Interpreter,
        max_frames: Option<u64>,
    ) -> Result<u64, Box<dyn Error>> {
        let display = self.display.get_display_size_bytes();
        let framebuffer = interpreter.framebuffer().len();
        if display != framebuffer {
            return Err(HostError::DisplaySize {
                display,
                framebuffer,
            }
            .into());
        }

        let mut frames = 0;
        let mut next_frame = Instant::now();

        while max_frames.map_or(true, |max| frames < max) {
            if !self.frame(interpreter)? {
                info!("quit after {} frames", frames);
                break;
            }
            frames += 1;

            next_frame += self.frame_time;
            let now = Instant::now();
            if next_frame > now {
                spin_sleep::sleep(next_frame - now);
            } else {
                // running behind; don't try to catch up
                next_frame = now;
            }
        }

        self.sound.stop()?;
        Ok(frames)
    }
}
