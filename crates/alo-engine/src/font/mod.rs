//! Built-in 8×8 font.
//!
//! The sheet is 16 glyphs wide and 6 rows tall, covering ASCII 32..=127. It is stored
//! column-major as 6-bit symbols offset from `'0'`, four symbols per 24 pixels.

use crate::coords::Vec2i;
use crate::paint::Pixel;
use crate::sprite::Sprite;

pub const SHEET_WIDTH: i32 = 128;
pub const SHEET_HEIGHT: i32 = 48;
pub const GLYPH_SIZE: i32 = 8;

const SHEET_DATA: [&str; 16] = [
    "?Q`0001oOch0o01o@F40o0<AGD4090LAGD<090@A7ch0?00O7Q`0600>00000000",
    "O000000nOT0063Qo4d8>?7a14Gno94AA4gno94AaOT0>o3`oO400o7QN00000400",
    "Of80001oOg<7O7moBGT7O7lABET024@aBEd714AiOdl717a_=TH013Q>00000000",
    "720D000V?V5oB3Q_HdUoE7a9@DdDE4A9@DmoE4A;Hg]oM4Aj8S4D84@`00000000",
    "OaPT1000Oa`^13P1@AI[?g`1@A=[OdAoHgljA4Ao?WlBA7l1710007l100000000",
    "ObM6000oOfMV?3QoBDD`O7a0BDDH@5A0BDD<@5A0BGeVO5ao@CQR?5Po00000000",
    "Oc``000?Ogij70PO2D]??0Ph2DUM@7i`2DTg@7lh2GUj?0TO0C1870T?00000000",
    "70<4001o?P<7?1QoHg43O;`h@GT0@:@LB@d0>:@hN@L0@?aoN@<0O7ao0000?000",
    "OcH0001SOglLA7mg24TnK7ln24US>0PL24U140PnOgl0>7QgOcH0K71S0000A000",
    "00H00000@Dm1S007@DUSg00?OdTnH7YhOfTL<7Yh@Cl0700?@Ah0300700000000",
    "<008001QL00ZA41a@6HnI<1i@FHLM81M@@0LG81?O`0nC?Y7?`0ZA7Y300080000",
    "O`082000Oh0827mo6>Hn?Wmo?6HnMb11MP08@C11H`08@FP0@@0004@000000000",
    "00P00001Oab00003OcKP0006@6=PMgl<@440MglH@000000`@000001P00000000",
    "Ob@8@@00Ob@8@Ga13R@8Mga172@8?PAo3R@827QoOb@820@0O`0007`0000007P0",
    "O`000P08Od400g`<3V=P0G`673IP0`@3>1`00P@6O`P00g`<O`000GP800000000",
    "?P9PL020O`<`N3R0@E4HC7b0@ET<ATB0@@l6C4B0O`H3N7b0?P01L3R000000020",
];

/// Proportional metrics per glyph: high nibble is the left offset, low nibble the width.
const SPACING: [u8; 96] = [
    0x03, 0x25, 0x16, 0x08, 0x07, 0x08, 0x08, 0x04, 0x15, 0x15, 0x08, 0x07, 0x15, 0x07, 0x24, 0x08,
    0x08, 0x17, 0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x24, 0x15, 0x06, 0x07, 0x16, 0x17,
    0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x17, 0x08, 0x08, 0x17, 0x08, 0x08, 0x08,
    0x08, 0x08, 0x08, 0x08, 0x17, 0x08, 0x08, 0x08, 0x08, 0x17, 0x08, 0x15, 0x08, 0x15, 0x08, 0x08,
    0x24, 0x18, 0x17, 0x17, 0x17, 0x17, 0x17, 0x17, 0x17, 0x33, 0x17, 0x17, 0x33, 0x18, 0x17, 0x17,
    0x17, 0x17, 0x17, 0x17, 0x07, 0x17, 0x17, 0x18, 0x18, 0x17, 0x17, 0x07, 0x33, 0x07, 0x08, 0x00,
];

/// Decodes the font sheet. Set pixels are opaque white, the rest fully transparent.
pub fn font_sheet() -> Sprite {
    let mut sheet = Sprite::new(SHEET_WIDTH, SHEET_HEIGHT);
    let (mut px, mut py) = (0, 0);

    for quad in SHEET_DATA.iter().flat_map(|row| row.as_bytes().chunks_exact(4)) {
        let r = quad
            .iter()
            .fold(0u32, |acc, &c| (acc << 6) | (c.wrapping_sub(b'0') as u32 & 0x3f));

        for i in 0..24 {
            let k = if r & (1 << i) != 0 { 255 } else { 0 };
            sheet.set_pixel(px, py, Pixel::rgba(k, k, k, k));
            py += 1;
            if py == SHEET_HEIGHT {
                px += 1;
                py = 0;
            }
        }
    }
    sheet
}

/// Glyph slot for `c`; characters outside the printable range render as `'?'`.
#[inline]
pub fn glyph_index(c: char) -> usize {
    match c as u32 {
        n @ 32..=127 => (n - 32) as usize,
        _ => ('?' as usize) - 32,
    }
}

/// Top-left of `c`'s cell in the sheet, in pixels.
#[inline]
pub fn glyph_origin(c: char) -> Vec2i {
    let i = glyph_index(c) as i32;
    Vec2i::new((i % 16) * GLYPH_SIZE, (i / 16) * GLYPH_SIZE)
}

/// `(x offset, width)` of `c` for proportional text.
#[inline]
pub fn glyph_spacing(c: char) -> Vec2i {
    let s = SPACING[glyph_index(c)];
    Vec2i::new((s >> 4) as i32, (s & 15) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph_has_ink(sheet: &Sprite, c: char) -> bool {
        let o = glyph_origin(c);
        (0..8).any(|y| (0..8).any(|x| sheet.get_pixel(o.x + x, o.y + y).a > 0))
    }

    #[test]
    fn sheet_has_expected_size() {
        let s = font_sheet();
        assert_eq!(s.size(), Vec2i::new(128, 48));
    }

    #[test]
    fn space_is_blank_and_letters_are_not() {
        let s = font_sheet();
        assert!(!glyph_has_ink(&s, ' '));
        assert!(glyph_has_ink(&s, 'A'));
        assert!(glyph_has_ink(&s, '0'));
    }

    #[test]
    fn pixels_are_white_or_clear() {
        let s = font_sheet();
        assert!(s
            .data()
            .iter()
            .all(|p| *p == Pixel::rgba(0, 0, 0, 0) || *p == Pixel::rgba(255, 255, 255, 255)));
    }

    #[test]
    fn glyph_layout() {
        assert_eq!(glyph_origin(' '), Vec2i::new(0, 0));
        assert_eq!(glyph_origin('A'), Vec2i::new(8, 16));
        assert_eq!(glyph_origin('\u{e9}'), glyph_origin('?'));
        assert_eq!(glyph_spacing('i'), Vec2i::new(3, 3));
        assert_eq!(glyph_spacing('A'), Vec2i::new(0, 8));
    }
}
