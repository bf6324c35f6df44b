//! Static width tables for the two standard PDF fonts the writer uses.
//!
//! Widths are Adobe AFM values in 1/1000 em for ASCII 0x20..=0x7E.
//! Index = (char as usize) - 32. Other characters use the bullet width when they are
//! `•` and `average_width` otherwise.

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

pub struct FontMetricTable {
    /// Resource name of the base font, e.g. `Helvetica`.
    pub base_font: &'static str,
    widths: [u16; 95],
    bullet_width: u16,
    average_width: u16,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if c == '•' {
            self.bullet_width
        } else {
            self.average_width
        }
    }

    /// Rendered width of `s` in points at `size_pt`.
    pub fn measure_str(&self, s: &str, size_pt: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size_pt / 1000.0
    }

    /// Greedy word wrap at `max_width_pt`. A single word wider than the line gets a line
    /// of its own rather than being split.
    pub fn wrap(&self, text: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let space = self.measure_str(" ", size_pt);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_width = self.measure_str(word, size_pt);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width > max_width_pt {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

pub static HELVETICA: FontMetricTable = FontMetricTable {
    base_font: "Helvetica",
    #[rustfmt::skip]
    widths: [
        // sp    !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0     1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :     ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A     B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N     O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [     \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a     b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n     o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {     |    }    ~
        334, 260, 334, 584,
    ],
    bullet_width: 350,
    average_width: 556,
};

pub static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    base_font: "Helvetica-Bold",
    #[rustfmt::skip]
    widths: [
        // sp    !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0     1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :     ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A     B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N     O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [     \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a     b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n     o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {     |    }    ~
        389, 280, 389, 584,
    ],
    bullet_width: 350,
    average_width: 611,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_scales_with_size() {
        // "A" is 667 units in Helvetica.
        assert!((HELVETICA.measure_str("A", 12.0) - 8.004).abs() < 1e-3);
        assert!((HELVETICA.measure_str("A", 24.0) - 16.008).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_never_narrower_for_letters() {
        for c in ('a'..='z').chain('A'..='Z') {
            let s = c.to_string();
            assert!(HELVETICA_BOLD.measure_str(&s, 12.0) >= HELVETICA.measure_str(&s, 12.0));
        }
    }

    #[test]
    fn test_bullet_has_its_own_width() {
        assert!((HELVETICA.measure_str("•", 10.0) - 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_keeps_every_word_in_order() {
        let text = "Designed and shipped a distributed job scheduler used by every product team";
        let lines = HELVETICA.wrap(text, 12.0, 150.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), text);
        for line in &lines {
            assert!(HELVETICA.measure_str(line, 12.0) <= 150.0 || !line.contains(' '));
        }
    }

    #[test]
    fn test_wrap_overlong_word_gets_own_line() {
        let lines = HELVETICA.wrap("a supercalifragilisticexpialidocious b", 12.0, 40.0);
        assert_eq!(lines, vec!["a", "supercalifragilisticexpialidocious", "b"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(HELVETICA.wrap("   ", 12.0, 100.0).is_empty());
    }
}
