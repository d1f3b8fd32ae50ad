//! # interpreter
//!
//! owns the whole machine state and runs one fetch/decode/execute/timer step
//! per call to `execute_cycle`. the host is expected to:
//!
//!  1. load a program before the first cycle
//!  2. feed key transitions in with `apply_input` between cycles
//!  3. call `execute_cycle` once per frame
//!  4. read back `framebuffer` and act on the returned `Cycle`
//!
//! out-of-range arithmetic always wraps: RAM addresses modulo 4096, I and PC
//! as u16, the stack pointer modulo 16 and key indices modulo 16. nothing in
//! here can panic on a bad ROM.
use crate::error::LoadError;
use crate::input::InputEvent;
use crate::instruction::Instruction;
use crate::memory::{self, Chip8Memory, MemoryMap};
use log::{trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const FRAMEBUFFER_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

const STACK_DEPTH: u8 = 16;
const FLAG: u8 = 0xF;

/// what happened during a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// instruction ran and timers ticked; `beep` is set whenever the sound
    /// timer was counted down
    Executed { beep: bool },
    /// FX0A found no key down; nothing moved, same instruction next cycle
    AwaitingKey,
    /// opcode isn't in the instruction set; nothing moved
    UnknownOpcode(u16),
}

// how the program counter moves after an instruction
enum Flow {
    Next,
    Skip,
    Jumped,
    Blocked,
}

impl Flow {
    fn skip_if(condition: bool) -> Flow {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

pub struct Chip8Interpreter {
    memory: Chip8Memory,
    registers: [u8; 16],
    index: u16,
    program_counter: u16,
    stack: [u16; STACK_DEPTH as usize],
    stack_pointer: u8,
    delay_timer: u8,
    sound_timer: u8,
    keys: [bool; 16],
    framebuffer: [u8; FRAMEBUFFER_SIZE],
    rng: StdRng,
}

impl Chip8Interpreter {
    /// fresh machine with the font in low memory and a deterministic RNG
    pub fn new(seed: u64) -> Self {
        Chip8Interpreter {
            memory: Chip8Memory::new(),
            registers: [0; 16],
            index: 0x0000,
            program_counter: memory::PROGRAM_ADDR,
            stack: [0; STACK_DEPTH as usize],
            stack_pointer: 0,
            delay_timer: 0x00,
            sound_timer: 0x00,
            keys: [false; 16],
            framebuffer: [0; FRAMEBUFFER_SIZE],
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// seed the RNG from the wall clock
    pub fn with_time_seed() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(seed)
    }

    /// load a chip8 program
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize, LoadError> {
        self.memory.load_program(reader)
    }

    /// key transition from the host; Quit is the host's business
    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(key) => self.set_key(key, true),
            InputEvent::Release(key) => self.set_key(key, false),
            InputEvent::Quit => {}
        }
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keys[(key & 0xF) as usize] = pressed;
    }

    pub fn keys(&self) -> &[bool; 16] {
        &self.keys
    }

    /// 64x32, row-major, one byte (0 or 1) per pixel
    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.registers
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn register(&self, register_index: u8) -> u8 {
        self.registers[(register_index & 0xF) as usize]
    }

    fn register_mut(&mut self, register_index: u8) -> &mut u8 {
        &mut self.registers[(register_index & 0xF) as usize]
    }

    fn set_flag(&mut self, flag: bool) {
        *self.register_mut(FLAG) = flag as u8;
    }

    /// fetch, decode, execute, then tick the timers
    pub fn execute_cycle(&mut self) -> Cycle {
        let pc = self.program_counter;
        let opcode = self.memory.get_word(pc);

        let instruction = match Instruction::decode(opcode) {
            Some(instruction) => instruction,
            None => {
                warn!("unknown opcode {:04x} at {:#05x}", opcode, pc);
                return Cycle::UnknownOpcode(opcode);
            }
        };
        trace!("{:#05x}: {:04x} {}", pc, opcode, instruction);

        match self.execute(instruction) {
            // RET has already put the caller's CALL address in the PC
            Flow::Next => self.program_counter = self.program_counter.wrapping_add(2),
            Flow::Skip => self.program_counter = self.program_counter.wrapping_add(4),
            Flow::Jumped => {}
            Flow::Blocked => return Cycle::AwaitingKey,
        }

        let beep = self.tick_timers();
        Cycle::Executed { beep }
    }

    fn tick_timers(&mut self) -> bool {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
            true
        } else {
            false
        }
    }

    fn execute(&mut self, instruction: Instruction) -> Flow {
        use Instruction::*;
        match instruction {
            ClearScreen => self.framebuffer = [0; FRAMEBUFFER_SIZE],
            Return => {
                if self.stack_pointer > 0 {
                    self.stack_pointer -= 1;
                    self.program_counter = self.stack[self.stack_pointer as usize];
                }
            }
            Jump(address) => {
                self.program_counter = address;
                return Flow::Jumped;
            }
            Call(address) => {
                self.stack[self.stack_pointer as usize] = self.program_counter;
                self.stack_pointer = (self.stack_pointer + 1) % STACK_DEPTH;
                self.program_counter = address;
                return Flow::Jumped;
            }
            SkipIfEqualByte(vx, value) => return Flow::skip_if(self.register(vx) == value),
            SkipIfNotEqualByte(vx, value) => return Flow::skip_if(self.register(vx) != value),
            SkipIfEqual(vx, vy) => return Flow::skip_if(self.register(vx) == self.register(vy)),
            Load(vx, value) => *self.register_mut(vx) = value,
            AddByte(vx, value) => {
                *self.register_mut(vx) = self.register(vx).wrapping_add(value);
            }
            Copy(vx, vy) => *self.register_mut(vx) = self.register(vy),
            Or(vx, vy) => *self.register_mut(vx) |= self.register(vy),
            And(vx, vy) => *self.register_mut(vx) &= self.register(vy),
            Xor(vx, vy) => *self.register_mut(vx) ^= self.register(vy),
            // flag first, then result; with X = F the result wins
            Add(vx, vy) => {
                let (result, overflow) = self.register(vx).overflowing_add(self.register(vy));
                self.set_flag(overflow);
                *self.register_mut(vx) = result;
            }
            Sub(vx, vy) => {
                let (a, b) = (self.register(vx), self.register(vy));
                self.set_flag(a > b);
                *self.register_mut(vx) = a.wrapping_sub(b);
            }
            ShiftRight(vx) => {
                let value = self.register(vx);
                self.set_flag(value & 0x01 == 1);
                *self.register_mut(vx) = value >> 1;
            }
            SubReversed(vx, vy) => {
                let (a, b) = (self.register(vx), self.register(vy));
                self.set_flag(b > a);
                *self.register_mut(vx) = b.wrapping_sub(a);
            }
            ShiftLeft(vx) => {
                let value = self.register(vx);
                self.set_flag(value & 0x80 != 0);
                *self.register_mut(vx) = value << 1;
            }
            SkipIfNotEqual(vx, vy) => return Flow::skip_if(self.register(vx) != self.register(vy)),
            LoadIndex(address) => self.index = address,
            JumpOffset(address) => {
                self.program_counter = address.wrapping_add(self.register(0) as u16);
                return Flow::Jumped;
            }
            Random(vx, mask) => *self.register_mut(vx) = mask & self.rng.gen::<u8>(),
            Draw(vx, vy, rows) => self.draw_sprite(self.register(vx), self.register(vy), rows),
            SkipIfKey(vx) => return Flow::skip_if(self.key_down(self.register(vx))),
            SkipIfNotKey(vx) => return Flow::skip_if(!self.key_down(self.register(vx))),
            GetDelay(vx) => *self.register_mut(vx) = self.delay_timer,
            WaitKey(vx) => match self.keys.iter().position(|&down| down) {
                Some(key) => *self.register_mut(vx) = key as u8,
                None => return Flow::Blocked,
            },
            SetDelay(vx) => self.delay_timer = self.register(vx),
            SetSound(vx) => self.sound_timer = self.register(vx),
            AddIndex(vx) => self.index = self.index.wrapping_add(self.register(vx) as u16),
            Glyph(vx) => {
                let digit = self.register(vx) as u16;
                if digit < 16 {
                    self.index = memory::FONT_ADDR + digit * memory::FONT_GLYPH_BYTES;
                }
            }
            Bcd(vx) => {
                let value = self.register(vx);
                self.memory.write(self.index, value / 100);
                self.memory.write(self.index.wrapping_add(1), value / 10 % 10);
                self.memory.write(self.index.wrapping_add(2), value % 10);
            }
            Store(vx) => {
                for i in 0..=vx {
                    let value = self.register(i);
                    self.memory.write(self.index.wrapping_add(i as u16), value);
                }
            }
            Restore(vx) => {
                for i in 0..=vx {
                    *self.register_mut(i) = self.memory.read(self.index.wrapping_add(i as u16));
                }
            }
        }
        Flow::Next
    }

    fn key_down(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    // sprite rows come from I onwards, 8 pixels wide, msb on the left. pixels
    // past the end of the framebuffer are dropped rather than wrapped
    fn draw_sprite(&mut self, x: u8, y: u8, rows: u8) {
        self.set_flag(false);
        for row in 0..rows as usize {
            let line = self.memory.read(self.index.wrapping_add(row as u16));
            for col in 0..8 {
                if line & (0x80 >> col) == 0 {
                    continue;
                }
                let target = (x as usize + col) + (y as usize + row) * SCREEN_WIDTH;
                if target < FRAMEBUFFER_SIZE {
                    if self.framebuffer[target] == 1 {
                        self.set_flag(true);
                    }
                    self.framebuffer[target] ^= 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 0x5eed;

    fn machine(program: &[u16]) -> Chip8Interpreter {
        let bytes: Vec<u8> = program.iter().flat_map(|op| op.to_be_bytes()).collect();
        let mut i = Chip8Interpreter::new(SEED);
        let mut src: &[u8] = &bytes;
        i.load_program(&mut src).unwrap();
        i
    }

    fn run(i: &mut Chip8Interpreter, cycles: usize) {
        for _ in 0..cycles {
            i.execute_cycle();
        }
    }

    #[test]
    fn test_initial_state() {
        let i = Chip8Interpreter::new(SEED);
        assert_eq!(i.program_counter(), 0x200);
        assert_eq!(i.index(), 0);
        assert_eq!(i.registers(), &[0; 16]);
        assert!(i.framebuffer().iter().all(|&px| px == 0));
        assert_eq!(i.memory.read(0), memory::FONT[0]);
        assert_eq!(i.memory.read(79), memory::FONT[79]);
    }

    #[test]
    fn test_add_program_end_to_end() {
        let mut src: &[u8] = &[0x60, 0x05, 0x61, 0x03, 0x80, 0x14, 0x00, 0x00];
        let mut i = Chip8Interpreter::new(SEED);
        i.load_program(&mut src).unwrap();
        run(&mut i, 3);
        assert_eq!(i.register(0), 8);
        assert_eq!(i.register(0xF), 0);
        assert_eq!(i.program_counter(), 0x206);
    }

    #[test]
    fn test_clear_screen_end_to_end() {
        let mut i = machine(&[0x00E0]);
        i.framebuffer[0] = 1;
        i.framebuffer[2047] = 1;
        assert_eq!(i.execute_cycle(), Cycle::Executed { beep: false });
        assert!(i.framebuffer().iter().all(|&px| px == 0));
        assert_eq!(i.program_counter(), 0x202);
    }

    #[test]
    fn test_load_immediate_every_register() {
        for x in 0..16u16 {
            let nn = (0x10 * x) as u8 + 3;
            let mut i = machine(&[0x6000 | x << 8 | nn as u16]);
            i.execute_cycle();
            assert_eq!(i.register(x as u8), nn);
        }
    }

    #[test]
    fn test_add_byte_wraps_without_flag() {
        let mut i = machine(&[0x6AFF, 0x6F07, 0x7A02]);
        run(&mut i, 3);
        assert_eq!(i.register(0xA), 0x01);
        assert_eq!(i.register(0xF), 0x07);
    }

    #[test]
    fn test_add_registers_carry() {
        for (a, b) in [(0u8, 0u8), (200, 55), (200, 56), (255, 255), (1, 254)] {
            let mut i = machine(&[0x6000 | a as u16, 0x6100 | b as u16, 0x8014]);
            run(&mut i, 3);
            let sum = a as u16 + b as u16;
            assert_eq!(i.register(0), (sum % 256) as u8, "{} + {}", a, b);
            assert_eq!(i.register(0xF), (sum > 255) as u8, "{} + {}", a, b);
        }
    }

    #[test]
    fn test_sub_flags() {
        // VX - VY
        let mut i = machine(&[0x600A, 0x6103, 0x8015]);
        run(&mut i, 3);
        assert_eq!((i.register(0), i.register(0xF)), (7, 1));

        let mut i = machine(&[0x6003, 0x610A, 0x8015]);
        run(&mut i, 3);
        assert_eq!((i.register(0), i.register(0xF)), (0xF9, 0));

        // equal operands don't count as "greater"
        let mut i = machine(&[0x6005, 0x6105, 0x8015]);
        run(&mut i, 3);
        assert_eq!((i.register(0), i.register(0xF)), (0, 0));

        // VY - VX
        let mut i = machine(&[0x6003, 0x610A, 0x8017]);
        run(&mut i, 3);
        assert_eq!((i.register(0), i.register(0xF)), (7, 1));

        let mut i = machine(&[0x600A, 0x6103, 0x8017]);
        run(&mut i, 3);
        assert_eq!((i.register(0), i.register(0xF)), (0xF9, 0));
    }

    #[test]
    fn test_shifts() {
        let mut i = machine(&[0x6505, 0x8506]);
        run(&mut i, 2);
        assert_eq!((i.register(5), i.register(0xF)), (2, 1));

        let mut i = machine(&[0x6581, 0x850E]);
        run(&mut i, 2);
        assert_eq!((i.register(5), i.register(0xF)), (0x02, 1));

        let mut i = machine(&[0x6541, 0x850E]);
        run(&mut i, 2);
        assert_eq!((i.register(5), i.register(0xF)), (0x82, 0));
    }

    #[test]
    fn test_logic_ops() {
        let mut i = machine(&[0x60F0, 0x613C, 0x8011, 0x62F0, 0x8212, 0x63F0, 0x8313, 0x8410]);
        run(&mut i, 8);
        assert_eq!(i.register(0), 0xFC);
        assert_eq!(i.register(2), 0x30);
        assert_eq!(i.register(3), 0xCC);
        assert_eq!(i.register(4), 0x3C);
    }

    #[test]
    fn test_flag_register_as_destination() {
        // result is written after the flag
        let mut i = machine(&[0x6F10, 0x6120, 0x8F14]);
        run(&mut i, 3);
        assert_eq!(i.register(0xF), 0x30);
    }

    #[test]
    fn test_skips() {
        // (program, expected pc after the second instruction)
        let cases: [([u16; 2], u16); 8] = [
            ([0x6342, 0x3342], 0x206),
            ([0x6342, 0x3341], 0x204),
            ([0x6342, 0x4341], 0x206),
            ([0x6342, 0x4342], 0x204),
            ([0x6000, 0x5010], 0x206),
            ([0x6001, 0x5010], 0x204),
            ([0x6001, 0x9010], 0x206),
            ([0x6000, 0x9010], 0x204),
        ];
        for (program, pc) in cases {
            let mut i = machine(&program);
            run(&mut i, 2);
            assert_eq!(i.program_counter(), pc, "{:04x?}", program);
        }
    }

    #[test]
    fn test_jumps() {
        let mut i = machine(&[0x1ABC]);
        i.execute_cycle();
        assert_eq!(i.program_counter(), 0xABC);

        let mut i = machine(&[0x6010, 0xB300]);
        run(&mut i, 2);
        assert_eq!(i.program_counter(), 0x310);
    }

    #[test]
    fn test_call_and_return() {
        // 0x200: call 0x206; 0x202: V1 = 1; 0x204: jump 0x204; 0x206: V0 = 9; 0x208: ret
        let mut i = machine(&[0x2206, 0x6101, 0x1204, 0x6009, 0x00EE]);
        i.execute_cycle();
        assert_eq!(i.program_counter(), 0x206);
        run(&mut i, 2);
        assert_eq!(i.program_counter(), 0x202);
        i.execute_cycle();
        assert_eq!((i.register(0), i.register(1)), (9, 1));
    }

    #[test]
    fn test_nested_calls_return_in_order() {
        let mut i = machine(&[
            0x2208, // 0x200: call A
            0x6201, // 0x202: V2 = 1
            0x1204, // 0x204: spin
            0x0000, // 0x206
            0x6001, // 0x208: A: V0 = 1
            0x2210, // 0x20A: call B
            0x00EE, // 0x20C: ret
            0x0000, // 0x20E
            0x6102, // 0x210: B: V1 = 2
            0x00EE, // 0x212: ret
        ]);
        run(&mut i, 4);
        assert_eq!(i.program_counter(), 0x212);
        assert_eq!(i.stack_pointer, 2);
        i.execute_cycle();
        assert_eq!(i.program_counter(), 0x20C);
        i.execute_cycle();
        assert_eq!(i.program_counter(), 0x202);
        assert_eq!(i.stack_pointer, 0);
        i.execute_cycle();
        assert_eq!(i.registers()[..3], [1, 2, 1]);
    }

    #[test]
    fn test_seventeenth_call_overwrites_oldest_return() {
        // 0x200..=0x220: each one calls the next; 0x222: ret
        let mut program: Vec<u16> = (0..17).map(|k| 0x2202 + 2 * k).collect();
        program.push(0x00EE);
        let mut i = machine(&program);
        run(&mut i, 17);
        assert_eq!(i.program_counter(), 0x222);
        assert_eq!(i.stack_pointer, 1);
        assert_eq!(i.stack[0], 0x220);
        assert_eq!(i.stack[1], 0x202);

        // returns to the 17th call, then the stack reads as empty
        i.execute_cycle();
        assert_eq!(i.program_counter(), 0x222);
        assert_eq!(i.stack_pointer, 0);
        i.execute_cycle();
        assert_eq!(i.program_counter(), 0x224);
    }

    #[test]
    fn test_return_on_empty_stack_falls_through() {
        let mut i = machine(&[0x00EE]);
        i.execute_cycle();
        assert_eq!(i.program_counter(), 0x202);
    }

    #[test]
    fn test_deep_recursion_wraps_stack() {
        // calls itself forever
        let mut i = machine(&[0x2200]);
        run(&mut i, 40);
        assert_eq!(i.program_counter(), 0x200);
        assert!(i.stack_pointer < STACK_DEPTH);
    }

    #[test]
    fn test_index_ops() {
        let mut i = machine(&[0xA123, 0x6510, 0xF51E]);
        run(&mut i, 3);
        assert_eq!(i.index(), 0x133);

        let mut i = machine(&[0xAFFF, 0x65FF, 0xF51E]);
        run(&mut i, 3);
        assert_eq!(i.index(), 0x10FE);
        assert_eq!(i.register(0xF), 0);
    }

    #[test]
    fn test_random_is_masked_and_seeded() {
        let program = [0xC00F, 0xC1F0, 0xC200];
        let mut a = machine(&program);
        let mut b = machine(&program);
        run(&mut a, 3);
        run(&mut b, 3);
        assert_eq!(a.register(0) & 0xF0, 0);
        assert_eq!(a.register(1) & 0x0F, 0);
        assert_eq!(a.register(2), 0);
        assert_eq!(a.registers(), b.registers());
    }

    #[test]
    fn test_draw_collision_and_xor() {
        // draw glyph "0" at (2, 3) twice
        let mut i = machine(&[0x6202, 0x6303, 0xA000, 0xD235, 0xD235]);
        run(&mut i, 4);
        assert_eq!(i.register(0xF), 0);
        // top row of "0" is 0xF0
        let row = 3 * SCREEN_WIDTH;
        assert_eq!(i.framebuffer()[row + 2..row + 8], [1, 1, 1, 1, 0, 0]);
        assert_eq!(i.framebuffer().iter().filter(|&&px| px == 1).count(), 14);

        i.execute_cycle();
        assert_eq!(i.register(0xF), 1);
        assert!(i.framebuffer().iter().all(|&px| px == 0));
    }

    #[test]
    fn test_draw_clears_stale_flag() {
        let mut i = machine(&[0x6F01, 0xA000, 0xD005]);
        run(&mut i, 3);
        assert_eq!(i.register(0xF), 0);
    }

    #[test]
    fn test_draw_drops_offscreen_pixels() {
        // two rows of 0xFF at y=31: only the first row lands
        let mut i = machine(&[0x6000, 0x611F, 0xA300, 0xD012]);
        i.memory.write_slice(&[0xFF, 0xFF], 0x300);
        run(&mut i, 4);
        assert_eq!(i.framebuffer()[31 * 64..31 * 64 + 8], [1; 8]);
        assert_eq!(i.framebuffer().iter().filter(|&&px| px == 1).count(), 8);
        assert_eq!(i.register(0xF), 0);
    }

    #[test]
    fn test_draw_past_right_edge_runs_into_next_row() {
        let mut i = machine(&[0x603E, 0x6100, 0xA300, 0xD011]);
        i.memory.write(0x300, 0xF0);
        run(&mut i, 4);
        assert_eq!(i.framebuffer()[62..66], [1, 1, 1, 1]);
    }

    #[test]
    fn test_key_skips() {
        let mut i = machine(&[0x6A0B, 0xEA9E]);
        i.apply_input(InputEvent::Press(0xB));
        run(&mut i, 2);
        assert_eq!(i.program_counter(), 0x206);

        let mut i = machine(&[0x6A0B, 0xEAA1]);
        i.apply_input(InputEvent::Press(0xB));
        i.apply_input(InputEvent::Release(0xB));
        run(&mut i, 2);
        assert_eq!(i.program_counter(), 0x206);

        let mut i = machine(&[0x6A0B, 0xEAA1]);
        i.set_key(0xB, true);
        run(&mut i, 2);
        assert_eq!(i.program_counter(), 0x204);
    }

    #[test]
    fn test_wait_key_blocks() {
        let mut i = machine(&[0x6020, 0xF015, 0xF30A]);
        run(&mut i, 2);
        let delay = i.delay_timer();
        assert_eq!(delay, 0x1F);
        for _ in 0..5 {
            assert_eq!(i.execute_cycle(), Cycle::AwaitingKey);
            assert_eq!(i.program_counter(), 0x204);
            assert_eq!(i.delay_timer(), delay);
        }
        i.apply_input(InputEvent::Press(0x7));
        i.apply_input(InputEvent::Press(0xC));
        assert_eq!(i.execute_cycle(), Cycle::Executed { beep: false });
        assert_eq!(i.register(3), 0x7);
        assert_eq!(i.program_counter(), 0x206);
        assert_eq!(i.delay_timer(), delay - 1);
    }

    #[test]
    fn test_timers() {
        let mut i = machine(&[0x600A, 0xF015, 0xF107]);
        run(&mut i, 2);
        assert_eq!(i.delay_timer(), 9);
        i.execute_cycle();
        assert_eq!(i.register(1), 9);
        assert_eq!(i.delay_timer(), 8);
    }

    #[test]
    fn test_sound_timer_beeps_while_counting() {
        let mut i = machine(&[0x6003, 0xF018, 0x6100, 0x6100, 0x6100]);
        assert_eq!(i.execute_cycle(), Cycle::Executed { beep: false });
        assert_eq!(i.execute_cycle(), Cycle::Executed { beep: true });
        assert_eq!(i.sound_timer(), 2);
        assert_eq!(i.execute_cycle(), Cycle::Executed { beep: true });
        assert_eq!(i.execute_cycle(), Cycle::Executed { beep: true });
        assert_eq!(i.sound_timer(), 0);
        assert_eq!(i.execute_cycle(), Cycle::Executed { beep: false });
    }

    #[test]
    fn test_glyph_address() {
        let mut i = machine(&[0x640A, 0xF429]);
        run(&mut i, 2);
        assert_eq!(i.index(), 50);

        // out of range digits leave I alone
        let mut i = machine(&[0xA123, 0x6410, 0xF429]);
        run(&mut i, 3);
        assert_eq!(i.index(), 0x123);
    }

    #[test]
    fn test_bcd() {
        let mut i = machine(&[0x60FE, 0xA300, 0xF033]);
        run(&mut i, 3);
        assert_eq!(
            [i.memory.read(0x300), i.memory.read(0x301), i.memory.read(0x302)],
            [2, 5, 4]
        );
    }

    #[test]
    fn test_store_and_restore_round_trip() {
        let mut i = machine(&[
            0x6011, 0x6122, 0x6233, 0x6344, 0xA400, 0xF355, 0x6000, 0x6100, 0x6200, 0x6300,
            0xF365,
        ]);
        run(&mut i, 6);
        assert_eq!(i.memory.read(0x403), 0x44);
        assert_eq!(i.memory.read(0x404), 0x00);
        run(&mut i, 5);
        assert_eq!(i.registers()[..5], [0x11, 0x22, 0x33, 0x44, 0x00]);
        assert_eq!(i.index(), 0x400);
    }

    #[test]
    fn test_unknown_opcode_is_a_noop() {
        let mut i = machine(&[0x6005, 0xF015, 0x0123]);
        run(&mut i, 2);
        for _ in 0..3 {
            assert_eq!(i.execute_cycle(), Cycle::UnknownOpcode(0x0123));
            assert_eq!(i.program_counter(), 0x204);
            assert_eq!(i.delay_timer(), 4);
        }
    }

    #[test]
    fn test_fetch_wraps_at_top_of_ram() {
        let mut i = Chip8Interpreter::new(SEED);
        i.memory.write(0x0fff, 0x00);
        i.memory.write(0x0000, 0xE0);
        i.program_counter = 0x0fff;
        assert_eq!(i.execute_cycle(), Cycle::Executed { beep: false });
        assert_eq!(i.program_counter(), 0x1001);
    }
}
