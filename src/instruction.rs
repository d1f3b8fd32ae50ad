//! # instruction
//!
//! decoded form of the 35 classic CHIP-8 instructions. operands are kept as
//! raw nibbles/bytes; X and Y are register indices, NNN an address, NN an
//! immediate byte, N an immediate nibble.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XNN
    SkipIfEqualByte(u8, u8),
    /// 4XNN
    SkipIfNotEqualByte(u8, u8),
    /// 5XY0
    SkipIfEqual(u8, u8),
    /// 6XNN
    Load(u8, u8),
    /// 7XNN
    AddByte(u8, u8),
    /// 8XY0
    Copy(u8, u8),
    /// 8XY1
    Or(u8, u8),
    /// 8XY2
    And(u8, u8),
    /// 8XY3
    Xor(u8, u8),
    /// 8XY4
    Add(u8, u8),
    /// 8XY5
    Sub(u8, u8),
    /// 8XY6
    ShiftRight(u8),
    /// 8XY7
    SubReversed(u8, u8),
    /// 8XYE
    ShiftLeft(u8),
    /// 9XY0
    SkipIfNotEqual(u8, u8),
    /// ANNN
    LoadIndex(u16),
    /// BNNN
    JumpOffset(u16),
    /// CXNN
    Random(u8, u8),
    /// DXYN
    Draw(u8, u8, u8),
    /// EX9E
    SkipIfKey(u8),
    /// EXA1
    SkipIfNotKey(u8),
    /// FX07
    GetDelay(u8),
    /// FX0A
    WaitKey(u8),
    /// FX15
    SetDelay(u8),
    /// FX18
    SetSound(u8),
    /// FX1E
    AddIndex(u8),
    /// FX29
    Glyph(u8),
    /// FX33
    Bcd(u8),
    /// FX55
    Store(u8),
    /// FX65
    Restore(u8),
}

impl Instruction {
    /// returns None for anything outside the classic instruction set
    /// (incl. 0NNN machine code calls)
    pub fn decode(opcode: u16) -> Option<Self> {
        let nibbles = (
            ((opcode >> 12) & 0xF) as u8,
            ((opcode >> 8) & 0xF) as u8,
            ((opcode >> 4) & 0xF) as u8,
            (opcode & 0xF) as u8,
        );
        let nnn = opcode & 0x0FFF;
        let nn = (opcode & 0x00FF) as u8;

        use Instruction::*;
        let instruction = match nibbles {
            (0x0, 0x0, 0xE, 0x0) => ClearScreen,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, _, _, _) => Jump(nnn),
            (0x2, _, _, _) => Call(nnn),
            (0x3, x, _, _) => SkipIfEqualByte(x, nn),
            (0x4, x, _, _) => SkipIfNotEqualByte(x, nn),
            (0x5, x, y, 0x0) => SkipIfEqual(x, y),
            (0x6, x, _, _) => Load(x, nn),
            (0x7, x, _, _) => AddByte(x, nn),
            (0x8, x, y, 0x0) => Copy(x, y),
            (0x8, x, y, 0x1) => Or(x, y),
            (0x8, x, y, 0x2) => And(x, y),
            (0x8, x, y, 0x3) => Xor(x, y),
            (0x8, x, y, 0x4) => Add(x, y),
            (0x8, x, y, 0x5) => Sub(x, y),
            (0x8, x, _, 0x6) => ShiftRight(x),
            (0x8, x, y, 0x7) => SubReversed(x, y),
            (0x8, x, _, 0xE) => ShiftLeft(x),
            (0x9, x, y, 0x0) => SkipIfNotEqual(x, y),
            (0xA, _, _, _) => LoadIndex(nnn),
            (0xB, _, _, _) => JumpOffset(nnn),
            (0xC, x, _, _) => Random(x, nn),
            (0xD, x, y, n) => Draw(x, y, n),
            (0xE, x, 0x9, 0xE) => SkipIfKey(x),
            (0xE, x, 0xA, 0x1) => SkipIfNotKey(x),
            (0xF, x, 0x0, 0x7) => GetDelay(x),
            (0xF, x, 0x0, 0xA) => WaitKey(x),
            (0xF, x, 0x1, 0x5) => SetDelay(x),
            (0xF, x, 0x1, 0x8) => SetSound(x),
            (0xF, x, 0x1, 0xE) => AddIndex(x),
            (0xF, x, 0x2, 0x9) => Glyph(x),
            (0xF, x, 0x3, 0x3) => Bcd(x),
            (0xF, x, 0x5, 0x5) => Store(x),
            (0xF, x, 0x6, 0x5) => Restore(x),
            _ => return None,
        };
        Some(instruction)
    }
}

/// assembler-ish rendering for log lines
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(a) => write!(f, "JP {:#05x}", a),
            Call(a) => write!(f, "CALL {:#05x}", a),
            SkipIfEqualByte(x, b) => write!(f, "SE V{:X}, {:#04x}", x, b),
            SkipIfNotEqualByte(x, b) => write!(f, "SNE V{:X}, {:#04x}", x, b),
            SkipIfEqual(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            Load(x, b) => write!(f, "LD V{:X}, {:#04x}", x, b),
            AddByte(x, b) => write!(f, "ADD V{:X}, {:#04x}", x, b),
            Copy(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            Add(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(x) => write!(f, "SHR V{:X}", x),
            SubReversed(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(x) => write!(f, "SHL V{:X}", x),
            SkipIfNotEqual(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(a) => write!(f, "LD I, {:#05x}", a),
            JumpOffset(a) => write!(f, "JP V0, {:#05x}", a),
            Random(x, b) => write!(f, "RND V{:X}, {:#04x}", x, b),
            Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfKey(x) => write!(f, "SKP V{:X}", x),
            SkipIfNotKey(x) => write!(f, "SKNP V{:X}", x),
            GetDelay(x) => write!(f, "LD V{:X}, DT", x),
            WaitKey(x) => write!(f, "LD V{:X}, K", x),
            SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            SetSound(x) => write!(f, "LD ST, V{:X}", x),
            AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            Glyph(x) => write!(f, "LD F, V{:X}", x),
            Bcd(x) => write!(f, "LD B, V{:X}", x),
            Store(x) => write!(f, "LD [I], V{:X}", x),
            Restore(x) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
