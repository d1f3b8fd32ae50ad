use crate::error::LoadError;
use log::debug;
use std::io;

// NB. addresses are u16 as per the chip-8 and always wrap at the top of RAM;
//     lengths are usize to stop endless casting

/// how much RAM we have
pub const MEMORY_SIZE: usize = 4096;

/// where the program is loaded
pub const PROGRAM_ADDR: u16 = 0x0200;

/// where the hex digit glyphs live; FX29 relies on this being zero
pub const FONT_ADDR: u16 = 0x0000;

/// bytes per font glyph
pub const FONT_GLYPH_BYTES: u16 = 5;

/// Represents memory map, ROM, RAM etc.
pub trait MemoryMap {
    /// read a single byte
    fn read(&self, addr: u16) -> u8;

    /// write a single byte
    fn write(&mut self, addr: u16, value: u8);

    /// get a big-endian two-byte word (opcodes)
    fn get_word(&self, addr: u16) -> u16 {
        ((self.read(addr) as u16) << 8) | self.read(addr.wrapping_add(1)) as u16
    }

    /// write a chunk of bytes into "RAM", wrapping at the top
    fn write_slice(&mut self, data: &[u8], addr: u16) {
        for (offset, byte) in data.iter().enumerate() {
            self.write(addr.wrapping_add(offset as u16), *byte);
        }
    }

    /// write unknown len of data into memory at a particular address. fails
    /// if the data would run past the top of RAM
    fn write_any(&mut self, reader: &mut impl io::Read, addr: u16) -> Result<usize, LoadError> {
        let mut buf = Vec::new();
        let len = reader.read_to_end(&mut buf)?;
        let max = MEMORY_SIZE.saturating_sub(wrap(addr));
        if len > max {
            return Err(LoadError::TooLarge { size: len, max });
        }
        self.write_slice(buf.as_slice(), addr);
        Ok(len)
    }
}

fn wrap(addr: u16) -> usize {
    addr as usize % MEMORY_SIZE
}

/// Defines the CHIP-8 memory map:
///   0x0000-0x004f  font glyphs
///   0x0050-0x01ff  reserved for the interpreter
///   0x0200-0x0fff  program
///
/// stack and display are kept outside of addressable RAM
pub struct Chip8Memory {
    bytes: Box<[u8]>,
}

impl MemoryMap for Chip8Memory {
    fn read(&self, addr: u16) -> u8 {
        self.bytes[wrap(addr)]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.bytes[wrap(addr)] = value;
    }
}

impl Default for Chip8Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Chip8Memory {
    /// zeroed RAM with the font baked in
    pub fn new() -> Self {
        let mut mm = Chip8Memory {
            bytes: vec![0u8; MEMORY_SIZE].into_boxed_slice(),
        };
        mm.write_slice(&FONT, FONT_ADDR);
        mm
    }

    /// load a CHIP-8 program at 0x200
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize, LoadError> {
        let len = self.write_any(reader, PROGRAM_ADDR)?;
        debug!("loaded {} byte program at {:#05x}", len, PROGRAM_ADDR);
        Ok(len)
    }

    /// largest program that fits above 0x200
    pub fn max_program_size() -> usize {
        MEMORY_SIZE - PROGRAM_ADDR as usize
    }
}

/// 4x5 hex digit glyphs, 0 to F
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
