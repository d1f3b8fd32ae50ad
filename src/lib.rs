//! # chip8vm
//!
//! a CHIP-8 virtual machine for the terminal.
//!
//! ## Design
//!
//! * the interpreter core is pure: memory, registers, stack, timers, keys and
//!   framebuffer live in one `Chip8Interpreter`, and nothing in it blocks or
//!   touches the outside world
//! * one `execute_cycle` is one instruction plus one timer tick; the host runs
//!   one cycle per frame at 60Hz
//! * out-of-range arithmetic wraps rather than failing, so every ROM keeps
//!   running (see `interpreter`)
//! * display, input and audio sit behind traits so the terminal versions can
//!   be swapped for dummies in tests
//!
//! Model
//!
//! main
//!  |-- config(cli args)
//!  |-- interpreter(config)
//!  |    |-- memory: font at 0x000, program at 0x200
//!  |    `-- instruction set
//!  |-- display, input, sound
//!  `-- host(display, input, sound)
//!       `-- every frame:
//!            |-- input events -> interpreter keys
//!            |-- interpreter.execute_cycle()
//!            |-- beep/stop -> sound
//!            `-- framebuffer -> display
pub mod config;
pub mod display;
pub mod error;
pub mod host;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod memory;
pub mod sound;
