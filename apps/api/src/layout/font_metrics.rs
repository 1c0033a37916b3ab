//! Static glyph-width table for the PDF standard font Times-Roman.
//!
//! Widths come from the Adobe Times-Roman AFM, in thousandths of an em, and
//! are indexed by WinAnsiEncoding byte (0x20..=0xFF). Codes WinAnsi leaves
//! undefined hold 0; `win_ansi_byte` never yields them.

const FIRST_CODE: usize = 0x20;

/// Character-width table for one font, indexed by WinAnsi byte.
pub struct FontMetricTable {
    widths: [u16; 224],
}

/// Times-Roman, the PDF path's body font.
pub static TIMES_ROMAN: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // 0x20: sp ! " # $ % & ' ( ) * + , - . /
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        // 0x30: 0-9 : ; < = > ?
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
        // 0x40: @ A-O
        921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
        // 0x50: P-Z [ \ ] ^ _
        556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
        // 0x60: ` a-o
        333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
        // 0x70: p-z { | } ~ (0x7F undefined)
        500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,   0,
        // 0x80: Euro . quotesinglbase florin quotedblbase ellipsis dagger daggerdbl
        //       circumflex perthousand Scaron guilsinglleft OE . Zcaron .
        500,   0, 333, 500, 444, 1000, 500, 500, 333, 1000, 556, 333, 889,   0, 611,   0,
        // 0x90: . quoteleft quoteright quotedblleft quotedblright bullet endash emdash
        //       tilde trademark scaron guilsinglright oe . zcaron Ydieresis
          0, 333, 333, 444, 444, 350, 500, 1000, 333, 980, 389, 333, 722,   0, 444, 722,
        // 0xA0: nbsp exclamdown cent sterling currency yen brokenbar section
        //       dieresis copyright ordfeminine guillemotleft logicalnot shy registered macron
        250, 333, 500, 500, 500, 500, 200, 500, 333, 760, 276, 500, 564, 333, 760, 333,
        // 0xB0: degree plusminus twosuperior threesuperior acute mu paragraph periodcentered
        //       cedilla onesuperior ordmasculine guillemotright onequarter onehalf threequarters questiondown
        400, 564, 300, 300, 333, 500, 453, 250, 333, 300, 310, 500, 750, 750, 750, 444,
        // 0xC0: Agrave-Aring AE Ccedilla Egrave-Edieresis Igrave-Idieresis
        722, 722, 722, 722, 722, 722, 889, 667, 611, 611, 611, 611, 333, 333, 333, 333,
        // 0xD0: Eth Ntilde Ograve-Odieresis multiply Oslash Ugrave-Udieresis Yacute Thorn germandbls
        722, 722, 722, 722, 722, 722, 722, 564, 722, 722, 722, 722, 722, 722, 556, 500,
        // 0xE0: agrave-aring ae ccedilla egrave-edieresis igrave-idieresis
        444, 444, 444, 444, 444, 444, 667, 444, 444, 444, 444, 444, 278, 278, 278, 278,
        // 0xF0: eth ntilde ograve-odieresis divide oslash ugrave-udieresis yacute thorn ydieresis
        500, 500, 500, 500, 500, 500, 500, 564, 500, 500, 500, 500, 500, 500, 500, 500,
    ],
};

/// WinAnsiEncoding byte for `c`, if the encoding has a glyph for it.
/// Tabs are drawn as spaces.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        '\t' => b' ',
        ' '..='~' | '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Byte actually drawn for `c`: unmappable characters become `?`.
pub fn drawn_byte(c: char) -> u8 {
    win_ansi_byte(c).unwrap_or(b'?')
}

impl FontMetricTable {
    /// Width of one character in thousandths of an em, as drawn.
    pub fn char_width(&self, c: char) -> u16 {
        self.widths[usize::from(drawn_byte(c)) - FIRST_CODE]
    }

    /// Rendered width of `s` in points at `font_size` points.
    pub fn measure(&self, s: &str, font_size: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * font_size / 1000.0
    }
}

/// Greedy word wrap of one paragraph to `max_width` points.
///
/// Single line breaks inside the paragraph always start a new line, and a
/// blank source line yields an empty output line. A word wider than the
/// line is kept whole on a line of its own.
pub fn wrap_lines(
    metrics: &FontMetricTable,
    paragraph: &str,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    let space_width = metrics.measure(" ", font_size);
    let mut lines = Vec::new();

    for source_line in paragraph.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in source_line.split_whitespace() {
            let word_width = metrics.measure(word, font_size);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space_width + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space_width + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }

        lines.push(current);
    }

    lines
}
