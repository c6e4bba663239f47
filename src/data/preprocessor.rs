// ============================================================
// Layer 4: Line Preprocessor
// ============================================================
// Cleans one line of an epubtxt book before tokenisation.
//
// Text converted from EPUB carries a lot of invisible noise:
//   - Non-breaking spaces (U+00A0) from typesetting
//   - Zero-width spaces (U+200B) and byte order marks
//   - Soft hyphens (U+00AD) left behind by hyphenation
//   - Tabs and stray control characters
//
// Left alone, the tokenizer either maps these to [UNK] or
// splits words on them, both of which waste sequence budget.
//
// Cleaning steps (applied in order):
//   1. Drop soft hyphens, map other odd whitespace to a space
//   2. Map control characters to a space
//   3. Collapse runs of spaces into one
//   4. Trim both ends
//
// Reference: Rust Book §8 (Strings in Rust)

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a single line. Returns an empty string for lines that
    /// hold nothing but whitespace or noise.
    pub fn clean_line(&self, line: &str) -> String {
        let mut out        = String::with_capacity(line.len());
        let mut last_space = true; // swallows leading spaces

        for c in line.chars() {
            let c = match c {
                '\u{00AD}' => continue,
                '\t' | '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                c if c.is_control() => ' ',
                c if c.is_whitespace() => ' ',
                c => c,
            };

            if c == ' ' {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        // At most one trailing space can be left over
        if out.ends_with(' ') {
            out.pop();
        }
        out
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
