//! The static Huffman code table of RFC 7541 Appendix B.
//!
//! 256 byte symbols plus the end-of-string (EOS) symbol. Codes are stored
//! right-justified: the low `bits` bits of `code` hold the pattern, most
//! significant bit first on the wire.
//!
//! The table is complete (its Kraft sum is exactly one) and EOS is the
//! 30-bit all-ones code, so a run of fewer than 30 one-bits is only ever a
//! prefix of EOS. The decoder relies on this to tell padding from data.

/// Number of symbols in the alphabet: 256 bytes plus EOS.
pub const SYMBOL_COUNT: usize = 257;

/// Table index of the end-of-string symbol.
pub const EOS: usize = 256;

/// Shortest code length in the table.
pub const MIN_CODE_BITS: u8 = 5;

/// Longest code length in the table (EOS and a handful of control bytes).
pub const MAX_CODE_BITS: u8 = 30;

/// A symbol of the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Byte(u8),
    Eos,
}

impl Symbol {
    /// Index into [`CODES`].
    pub const fn index(self) -> usize {
        match self {
            Symbol::Byte(b) => b as usize,
            Symbol::Eos => EOS,
        }
    }

    /// Inverse of [`Symbol::index`]. Returns `None` past EOS.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < EOS {
            Some(Symbol::Byte(index as u8))
        } else if index == EOS {
            Some(Symbol::Eos)
        } else {
            None
        }
    }
}

/// One entry of the code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanCode {
    /// Code pattern, aligned to the least significant bit.
    pub code: u32,
    /// Number of significant bits in `code`.
    pub bits: u8,
}

impl HuffmanCode {
    const fn new(code: u32, bits: u8) -> Self {
        Self { code, bits }
    }

    /// The leading `n` bits of this code, right-justified.
    ///
    /// Used with the EOS code to fill the tail of the last output byte.
    pub const fn prefix(self, n: u8) -> u32 {
        if n == 0 {
            0
        } else {
            self.code >> (self.bits - n)
        }
    }
}

/// Look up the code for a byte.
#[inline]
pub fn code_for(byte: u8) -> HuffmanCode {
    CODES[byte as usize]
}

/// Look up the code for any symbol, EOS included.
#[inline]
pub fn lookup(symbol: Symbol) -> HuffmanCode {
    CODES[symbol.index()]
}

/// The EOS code.
#[inline]
pub fn eos() -> HuffmanCode {
    CODES[EOS]
}

/// Code table indexed by symbol.
pub static CODES: [HuffmanCode; SYMBOL_COUNT] = [
    HuffmanCode::new(0x1ff8, 13), // 0
    HuffmanCode::new(0x7fffd8, 23), // 1
    HuffmanCode::new(0xfffffe2, 28), // 2
    HuffmanCode::new(0xfffffe3, 28), // 3
    HuffmanCode::new(0xfffffe4, 28), // 4
    HuffmanCode::new(0xfffffe5, 28), // 5
    HuffmanCode::new(0xfffffe6, 28), // 6
    HuffmanCode::new(0xfffffe7, 28), // 7
    HuffmanCode::new(0xfffffe8, 28), // 8
    HuffmanCode::new(0xffffea, 24), // 9
    HuffmanCode::new(0x3ffffffc, 30), // 10
    HuffmanCode::new(0xfffffe9, 28), // 11
    HuffmanCode::new(0xfffffea, 28), // 12
    HuffmanCode::new(0x3ffffffd, 30), // 13
    HuffmanCode::new(0xfffffeb, 28), // 14
    HuffmanCode::new(0xfffffec, 28), // 15
    HuffmanCode::new(0xfffffed, 28), // 16
    HuffmanCode::new(0xfffffee, 28), // 17
    HuffmanCode::new(0xfffffef, 28), // 18
    HuffmanCode::new(0xffffff0, 28), // 19
    HuffmanCode::new(0xffffff1, 28), // 20
    HuffmanCode::new(0xffffff2, 28), // 21
    HuffmanCode::new(0x3ffffffe, 30), // 22
    HuffmanCode::new(0xffffff3, 28), // 23
    HuffmanCode::new(0xffffff4, 28), // 24
    HuffmanCode::new(0xffffff5, 28), // 25
    HuffmanCode::new(0xffffff6, 28), // 26
    HuffmanCode::new(0xffffff7, 28), // 27
    HuffmanCode::new(0xffffff8, 28), // 28
    HuffmanCode::new(0xffffff9, 28), // 29
    HuffmanCode::new(0xffffffa, 28), // 30
    HuffmanCode::new(0xffffffb, 28), // 31
    HuffmanCode::new(0x14, 6), // ' ' (32)
    HuffmanCode::new(0x3f8, 10), // '!' (33)
    HuffmanCode::new(0x3f9, 10), // '"' (34)
    HuffmanCode::new(0xffa, 12), // '#' (35)
    HuffmanCode::new(0x1ff9, 13), // '$' (36)
    HuffmanCode::new(0x15, 6), // '%' (37)
    HuffmanCode::new(0xf8, 8), // '&' (38)
    HuffmanCode::new(0x7fa, 11), // '\'' (39)
    HuffmanCode::new(0x3fa, 10), // '(' (40)
    HuffmanCode::new(0x3fb, 10), // ')' (41)
    HuffmanCode::new(0xf9, 8), // '*' (42)
    HuffmanCode::new(0x7fb, 11), // '+' (43)
    HuffmanCode::new(0xfa, 8), // ',' (44)
    HuffmanCode::new(0x16, 6), // '-' (45)
    HuffmanCode::new(0x17, 6), // '.' (46)
    HuffmanCode::new(0x18, 6), // '/' (47)
    HuffmanCode::new(0x0, 5), // '0' (48)
    HuffmanCode::new(0x1, 5), // '1' (49)
    HuffmanCode::new(0x2, 5), // '2' (50)
    HuffmanCode::new(0x19, 6), // '3' (51)
    HuffmanCode::new(0x1a, 6), // '4' (52)
    HuffmanCode::new(0x1b, 6), // '5' (53)
    HuffmanCode::new(0x1c, 6), // '6' (54)
    HuffmanCode::new(0x1d, 6), // '7' (55)
    HuffmanCode::new(0x1e, 6), // '8' (56)
    HuffmanCode::new(0x1f, 6), // '9' (57)
    HuffmanCode::new(0x5c, 7), // ':' (58)
    HuffmanCode::new(0xfb, 8), // ';' (59)
    HuffmanCode::new(0x7ffc, 15), // '<' (60)
    HuffmanCode::new(0x20, 6), // '=' (61)
    HuffmanCode::new(0xffb, 12), // '>' (62)
    HuffmanCode::new(0x3fc, 10), // '?' (63)
    HuffmanCode::new(0x1ffa, 13), // '@' (64)
    HuffmanCode::new(0x21, 6), // 'A' (65)
    HuffmanCode::new(0x5d, 7), // 'B' (66)
    HuffmanCode::new(0x5e, 7), // 'C' (67)
    HuffmanCode::new(0x5f, 7), // 'D' (68)
    HuffmanCode::new(0x60, 7), // 'E' (69)
    HuffmanCode::new(0x61, 7), // 'F' (70)
    HuffmanCode::new(0x62, 7), // 'G' (71)
    HuffmanCode::new(0x63, 7), // 'H' (72)
    HuffmanCode::new(0x64, 7), // 'I' (73)
    HuffmanCode::new(0x65, 7), // 'J' (74)
    HuffmanCode::new(0x66, 7), // 'K' (75)
    HuffmanCode::new(0x67, 7), // 'L' (76)
    HuffmanCode::new(0x68, 7), // 'M' (77)
    HuffmanCode::new(0x69, 7), // 'N' (78)
    HuffmanCode::new(0x6a, 7), // 'O' (79)
    HuffmanCode::new(0x6b, 7), // 'P' (80)
    HuffmanCode::new(0x6c, 7), // 'Q' (81)
    HuffmanCode::new(0x6d, 7), // 'R' (82)
    HuffmanCode::new(0x6e, 7), // 'S' (83)
    HuffmanCode::new(0x6f, 7), // 'T' (84)
    HuffmanCode::new(0x70, 7), // 'U' (85)
    HuffmanCode::new(0x71, 7), // 'V' (86)
    HuffmanCode::new(0x72, 7), // 'W' (87)
    HuffmanCode::new(0xfc, 8), // 'X' (88)
    HuffmanCode::new(0x73, 7), // 'Y' (89)
    HuffmanCode::new(0xfd, 8), // 'Z' (90)
    HuffmanCode::new(0x1ffb, 13), // '[' (91)
    HuffmanCode::new(0x7fff0, 19), // '\\' (92)
    HuffmanCode::new(0x1ffc, 13), // ']' (93)
    HuffmanCode::new(0x3ffc, 14), // '^' (94)
    HuffmanCode::new(0x22, 6), // '_' (95)
    HuffmanCode::new(0x7ffd, 15), // '`' (96)
    HuffmanCode::new(0x3, 5), // 'a' (97)
    HuffmanCode::new(0x23, 6), // 'b' (98)
    HuffmanCode::new(0x4, 5), // 'c' (99)
    HuffmanCode::new(0x24, 6), // 'd' (100)
    HuffmanCode::new(0x5, 5), // 'e' (101)
    HuffmanCode::new(0x25, 6), // 'f' (102)
    HuffmanCode::new(0x26, 6), // 'g' (103)
    HuffmanCode::new(0x27, 6), // 'h' (104)
    HuffmanCode::new(0x6, 5), // 'i' (105)
    HuffmanCode::new(0x74, 7), // 'j' (106)
    HuffmanCode::new(0x75, 7), // 'k' (107)
    HuffmanCode::new(0x28, 6), // 'l' (108)
    HuffmanCode::new(0x29, 6), // 'm' (109)
    HuffmanCode::new(0x2a, 6), // 'n' (110)
    HuffmanCode::new(0x7, 5), // 'o' (111)
    HuffmanCode::new(0x2b, 6), // 'p' (112)
    HuffmanCode::new(0x76, 7), // 'q' (113)
    HuffmanCode::new(0x2c, 6), // 'r' (114)
    HuffmanCode::new(0x8, 5), // 's' (115)
    HuffmanCode::new(0x9, 5), // 't' (116)
    HuffmanCode::new(0x2d, 6), // 'u' (117)
    HuffmanCode::new(0x77, 7), // 'v' (118)
    HuffmanCode::new(0x78, 7), // 'w' (119)
    HuffmanCode::new(0x79, 7), // 'x' (120)
    HuffmanCode::new(0x7a, 7), // 'y' (121)
    HuffmanCode::new(0x7b, 7), // 'z' (122)
    HuffmanCode::new(0x7ffe, 15), // '{' (123)
    HuffmanCode::new(0x7fc, 11), // '|' (124)
    HuffmanCode::new(0x3ffd, 14), // '}' (125)
    HuffmanCode::new(0x1ffd, 13), // '~' (126)
    HuffmanCode::new(0xffffffc, 28), // 127
    HuffmanCode::new(0xfffe6, 20), // 128
    HuffmanCode::new(0x3fffd2, 22), // 129
    HuffmanCode::new(0xfffe7, 20), // 130
    HuffmanCode::new(0xfffe8, 20), // 131
    HuffmanCode::new(0x3fffd3, 22), // 132
    HuffmanCode::new(0x3fffd4, 22), // 133
    HuffmanCode::new(0x3fffd5, 22), // 134
    HuffmanCode::new(0x7fffd9, 23), // 135
    HuffmanCode::new(0x3fffd6, 22), // 136
    HuffmanCode::new(0x7fffda, 23), // 137
    HuffmanCode::new(0x7fffdb, 23), // 138
    HuffmanCode::new(0x7fffdc, 23), // 139
    HuffmanCode::new(0x7fffdd, 23), // 140
    HuffmanCode::new(0x7fffde, 23), // 141
    HuffmanCode::new(0xffffeb, 24), // 142
    HuffmanCode::new(0x7fffdf, 23), // 143
    HuffmanCode::new(0xffffec, 24), // 144
    HuffmanCode::new(0xffffed, 24), // 145
    HuffmanCode::new(0x3fffd7, 22), // 146
    HuffmanCode::new(0x7fffe0, 23), // 147
    HuffmanCode::new(0xffffee, 24), // 148
    HuffmanCode::new(0x7fffe1, 23), // 149
    HuffmanCode::new(0x7fffe2, 23), // 150
    HuffmanCode::new(0x7fffe3, 23), // 151
    HuffmanCode::new(0x7fffe4, 23), // 152
    HuffmanCode::new(0x1fffdc, 21), // 153
    HuffmanCode::new(0x3fffd8, 22), // 154
    HuffmanCode::new(0x7fffe5, 23), // 155
    HuffmanCode::new(0x3fffd9, 22), // 156
    HuffmanCode::new(0x7fffe6, 23), // 157
    HuffmanCode::new(0x7fffe7, 23), // 158
    HuffmanCode::new(0xffffef, 24), // 159
    HuffmanCode::new(0x3fffda, 22), // 160
    HuffmanCode::new(0x1fffdd, 21), // 161
    HuffmanCode::new(0xfffe9, 20), // 162
    HuffmanCode::new(0x3fffdb, 22), // 163
    HuffmanCode::new(0x3fffdc, 22), // 164
    HuffmanCode::new(0x7fffe8, 23), // 165
    HuffmanCode::new(0x7fffe9, 23), // 166
    HuffmanCode::new(0x1fffde, 21), // 167
    HuffmanCode::new(0x7fffea, 23), // 168
    HuffmanCode::new(0x3fffdd, 22), // 169
    HuffmanCode::new(0x3fffde, 22), // 170
    HuffmanCode::new(0xfffff0, 24), // 171
    HuffmanCode::new(0x1fffdf, 21), // 172
    HuffmanCode::new(0x3fffdf, 22), // 173
    HuffmanCode::new(0x7fffeb, 23), // 174
    HuffmanCode::new(0x7fffec, 23), // 175
    HuffmanCode::new(0x1fffe0, 21), // 176
    HuffmanCode::new(0x1fffe1, 21), // 177
    HuffmanCode::new(0x3fffe0, 22), // 178
    HuffmanCode::new(0x1fffe2, 21), // 179
    HuffmanCode::new(0x7fffed, 23), // 180
    HuffmanCode::new(0x3fffe1, 22), // 181
    HuffmanCode::new(0x7fffee, 23), // 182
    HuffmanCode::new(0x7fffef, 23), // 183
    HuffmanCode::new(0xfffea, 20), // 184
    HuffmanCode::new(0x3fffe2, 22), // 185
    HuffmanCode::new(0x3fffe3, 22), // 186
    HuffmanCode::new(0x3fffe4, 22), // 187
    HuffmanCode::new(0x7ffff0, 23), // 188
    HuffmanCode::new(0x3fffe5, 22), // 189
    HuffmanCode::new(0x3fffe6, 22), // 190
    HuffmanCode::new(0x7ffff1, 23), // 191
    HuffmanCode::new(0x3ffffe0, 26), // 192
    HuffmanCode::new(0x3ffffe1, 26), // 193
    HuffmanCode::new(0xfffeb, 20), // 194
    HuffmanCode::new(0x7fff1, 19), // 195
    HuffmanCode::new(0x3fffe7, 22), // 196
    HuffmanCode::new(0x7ffff2, 23), // 197
    HuffmanCode::new(0x3fffe8, 22), // 198
    HuffmanCode::new(0x1ffffec, 25), // 199
    HuffmanCode::new(0x3ffffe2, 26), // 200
    HuffmanCode::new(0x3ffffe3, 26), // 201
    HuffmanCode::new(0x3ffffe4, 26), // 202
    HuffmanCode::new(0x7ffffde, 27), // 203
    HuffmanCode::new(0x7ffffdf, 27), // 204
    HuffmanCode::new(0x3ffffe5, 26), // 205
    HuffmanCode::new(0xfffff1, 24), // 206
    HuffmanCode::new(0x1ffffed, 25), // 207
    HuffmanCode::new(0x7fff2, 19), // 208
    HuffmanCode::new(0x1fffe3, 21), // 209
    HuffmanCode::new(0x3ffffe6, 26), // 210
    HuffmanCode::new(0x7ffffe0, 27), // 211
    HuffmanCode::new(0x7ffffe1, 27), // 212
    HuffmanCode::new(0x3ffffe7, 26), // 213
    HuffmanCode::new(0x7ffffe2, 27), // 214
    HuffmanCode::new(0xfffff2, 24), // 215
    HuffmanCode::new(0x1fffe4, 21), // 216
    HuffmanCode::new(0x1fffe5, 21), // 217
    HuffmanCode::new(0x3ffffe8, 26), // 218
    HuffmanCode::new(0x3ffffe9, 26), // 219
    HuffmanCode::new(0xffffffd, 28), // 220
    HuffmanCode::new(0x7ffffe3, 27), // 221
    HuffmanCode::new(0x7ffffe4, 27), // 222
    HuffmanCode::new(0x7ffffe5, 27), // 223
    HuffmanCode::new(0xfffec, 20), // 224
    HuffmanCode::new(0xfffff3, 24), // 225
    HuffmanCode::new(0xfffed, 20), // 226
    HuffmanCode::new(0x1fffe6, 21), // 227
    HuffmanCode::new(0x3fffe9, 22), // 228
    HuffmanCode::new(0x1fffe7, 21), // 229
    HuffmanCode::new(0x1fffe8, 21), // 230
    HuffmanCode::new(0x7ffff3, 23), // 231
    HuffmanCode::new(0x3fffea, 22), // 232
    HuffmanCode::new(0x3fffeb, 22), // 233
    HuffmanCode::new(0x1ffffee, 25), // 234
    HuffmanCode::new(0x1ffffef, 25), // 235
    HuffmanCode::new(0xfffff4, 24), // 236
    HuffmanCode::new(0xfffff5, 24), // 237
    HuffmanCode::new(0x3ffffea, 26), // 238
    HuffmanCode::new(0x7ffff4, 23), // 239
    HuffmanCode::new(0x3ffffeb, 26), // 240
    HuffmanCode::new(0x7ffffe6, 27), // 241
    HuffmanCode::new(0x3ffffec, 26), // 242
    HuffmanCode::new(0x3ffffed, 26), // 243
    HuffmanCode::new(0x7ffffe7, 27), // 244
    HuffmanCode::new(0x7ffffe8, 27), // 245
    HuffmanCode::new(0x7ffffe9, 27), // 246
    HuffmanCode::new(0x7ffffea, 27), // 247
    HuffmanCode::new(0x7ffffeb, 27), // 248
    HuffmanCode::new(0xffffffe, 28), // 249
    HuffmanCode::new(0x7ffffec, 27), // 250
    HuffmanCode::new(0x7ffffed, 27), // 251
    HuffmanCode::new(0x7ffffee, 27), // 252
    HuffmanCode::new(0x7ffffef, 27), // 253
    HuffmanCode::new(0x7fffff0, 27), // 254
    HuffmanCode::new(0x3ffffee, 26), // 255
    HuffmanCode::new(0x3fffffff, 30), // EOS
];
