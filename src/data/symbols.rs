//! Command name to Unicode mappings
//!
//! Keys are command names without the leading backslash, exactly as they
//! are stored on parsed command nodes.

use lazy_static::lazy_static;
use phf::{phf_map, phf_set};
use std::collections::HashMap;

// ============================================================================
// Greek Letters
// ============================================================================

/// Greek letters (both text mode and math mode)
pub static GREEK_LETTERS: phf::Map<&'static str, &'static str> = phf_map! {
    // Lowercase
    "alpha" => "α",
    "beta" => "β",
    "gamma" => "γ",
    "delta" => "δ",
    "epsilon" => "ϵ",
    "varepsilon" => "ε",
    "zeta" => "ζ",
    "eta" => "η",
    "theta" => "θ",
    "vartheta" => "ϑ",
    "iota" => "ι",
    "kappa" => "κ",
    "varkappa" => "ϰ",
    "lambda" => "λ",
    "mu" => "μ",
    "nu" => "ν",
    "xi" => "ξ",
    "omicron" => "ο",
    "pi" => "π",
    "varpi" => "ϖ",
    "rho" => "ρ",
    "varrho" => "ϱ",
    "sigma" => "σ",
    "varsigma" => "ς",
    "tau" => "τ",
    "upsilon" => "υ",
    "phi" => "ϕ",
    "varphi" => "φ",
    "chi" => "χ",
    "psi" => "ψ",
    "omega" => "ω",
    "digamma" => "ϝ",
    // Uppercase
    "Alpha" => "Α",
    "Beta" => "Β",
    "Gamma" => "Γ",
    "Delta" => "Δ",
    "Epsilon" => "Ε",
    "Zeta" => "Ζ",
    "Eta" => "Η",
    "Theta" => "Θ",
    "Iota" => "Ι",
    "Kappa" => "Κ",
    "Lambda" => "Λ",
    "Mu" => "Μ",
    "Nu" => "Ν",
    "Xi" => "Ξ",
    "Omicron" => "Ο",
    "Pi" => "Π",
    "Rho" => "Ρ",
    "Sigma" => "Σ",
    "Tau" => "Τ",
    "Upsilon" => "Υ",
    "Phi" => "Φ",
    "Chi" => "Χ",
    "Psi" => "Ψ",
    "Omega" => "Ω",
    "varGamma" => "Γ",
    "varDelta" => "Δ",
    "varTheta" => "Θ",
    "varLambda" => "Λ",
    "varXi" => "Ξ",
    "varPi" => "Π",
    "varSigma" => "Σ",
    "varUpsilon" => "Υ",
    "varPhi" => "Φ",
    "varPsi" => "Ψ",
    "varOmega" => "Ω",
};

// ============================================================================
// Math Symbols
// ============================================================================

/// Binary operators, relations, arrows, set and logic symbols
pub static MATH_SYMBOLS: phf::Map<&'static str, &'static str> = phf_map! {
    // Binary operators
    "pm" => "±",
    "mp" => "∓",
    "times" => "×",
    "div" => "÷",
    "cdot" => "·",
    "ast" => "∗",
    "star" => "⋆",
    "circ" => "∘",
    "bullet" => "•",
    "oplus" => "⊕",
    "ominus" => "⊖",
    "otimes" => "⊗",
    "oslash" => "⊘",
    "odot" => "⊙",
    "wedge" => "∧",
    "land" => "∧",
    "vee" => "∨",
    "lor" => "∨",
    "cap" => "∩",
    "cup" => "∪",
    "sqcap" => "⊓",
    "sqcup" => "⊔",
    "uplus" => "⊎",
    "setminus" => "∖",
    "smallsetminus" => "∖",
    "wr" => "≀",
    "dagger" => "†",
    "ddagger" => "‡",
    "amalg" => "⨿",
    "diamond" => "⋄",
    "triangleleft" => "◃",
    "triangleright" => "▹",
    // Relations
    "leq" => "≤",
    "le" => "≤",
    "geq" => "≥",
    "ge" => "≥",
    "leqslant" => "⩽",
    "geqslant" => "⩾",
    "neq" => "≠",
    "ne" => "≠",
    "ll" => "≪",
    "gg" => "≫",
    "lll" => "⋘",
    "ggg" => "⋙",
    "approx" => "≈",
    "approxeq" => "≊",
    "sim" => "∼",
    "simeq" => "≃",
    "cong" => "≅",
    "equiv" => "≡",
    "propto" => "∝",
    "prec" => "≺",
    "succ" => "≻",
    "preceq" => "⪯",
    "succeq" => "⪰",
    "perp" => "⊥",
    "parallel" => "∥",
    "nparallel" => "∦",
    "mid" => "∣",
    "nmid" => "∤",
    "models" => "⊨",
    "vdash" => "⊢",
    "dashv" => "⊣",
    "asymp" => "≍",
    "doteq" => "≐",
    "coloneqq" => "≔",
    "triangleq" => "≜",
    "lesssim" => "≲",
    "gtrsim" => "≳",
    // Sets
    "in" => "∈",
    "notin" => "∉",
    "ni" => "∋",
    "subset" => "⊂",
    "supset" => "⊃",
    "subseteq" => "⊆",
    "supseteq" => "⊇",
    "subsetneq" => "⊊",
    "supsetneq" => "⊋",
    "nsubseteq" => "⊈",
    "sqsubset" => "⊏",
    "sqsupset" => "⊐",
    "sqsubseteq" => "⊑",
    "sqsupseteq" => "⊒",
    "emptyset" => "∅",
    "varnothing" => "∅",
    // Logic
    "forall" => "∀",
    "exists" => "∃",
    "nexists" => "∄",
    "neg" => "¬",
    "lnot" => "¬",
    "top" => "⊤",
    "bot" => "⊥",
    "therefore" => "∴",
    "because" => "∵",
    // Arrows
    "to" => "→",
    "gets" => "←",
    "rightarrow" => "→",
    "leftarrow" => "←",
    "leftrightarrow" => "↔",
    "Rightarrow" => "⇒",
    "Leftarrow" => "⇐",
    "Leftrightarrow" => "⇔",
    "longrightarrow" => "⟶",
    "longleftarrow" => "⟵",
    "longleftrightarrow" => "⟷",
    "Longrightarrow" => "⟹",
    "Longleftarrow" => "⟸",
    "Longleftrightarrow" => "⟺",
    "implies" => "⟹",
    "impliedby" => "⟸",
    "iff" => "⟺",
    "mapsto" => "↦",
    "longmapsto" => "⟼",
    "uparrow" => "↑",
    "downarrow" => "↓",
    "updownarrow" => "↕",
    "Uparrow" => "⇑",
    "Downarrow" => "⇓",
    "nearrow" => "↗",
    "searrow" => "↘",
    "swarrow" => "↙",
    "nwarrow" => "↖",
    "hookrightarrow" => "↪",
    "hookleftarrow" => "↩",
    "rightharpoonup" => "⇀",
    "leftharpoonup" => "↼",
    "rightleftharpoons" => "⇌",
    "twoheadrightarrow" => "↠",
    "rightsquigarrow" => "⇝",
    // Big operators
    "sum" => "∑",
    "prod" => "∏",
    "coprod" => "∐",
    "int" => "∫",
    "iint" => "∬",
    "iiint" => "∭",
    "oint" => "∮",
    "bigcup" => "⋃",
    "bigcap" => "⋂",
    "bigvee" => "⋁",
    "bigwedge" => "⋀",
    "bigoplus" => "⨁",
    "bigotimes" => "⨂",
    "bigodot" => "⨀",
    "bigsqcup" => "⨆",
    // Miscellaneous
    "infty" => "∞",
    "partial" => "∂",
    "nabla" => "∇",
    "hbar" => "ℏ",
    "hslash" => "ℏ",
    "ell" => "ℓ",
    "wp" => "℘",
    "Re" => "ℜ",
    "Im" => "ℑ",
    "aleph" => "ℵ",
    "beth" => "ℶ",
    "prime" => "′",
    "angle" => "∠",
    "measuredangle" => "∡",
    "triangle" => "△",
    "square" => "□",
    "Box" => "□",
    "blacksquare" => "■",
    "lozenge" => "◊",
    "surd" => "√",
    "degree" => "°",
    "clubsuit" => "♣",
    "diamondsuit" => "♢",
    "heartsuit" => "♡",
    "spadesuit" => "♠",
    "flat" => "♭",
    "natural" => "♮",
    "sharp" => "♯",
    // Dots
    "ldots" => "…",
    "dots" => "…",
    "dotsc" => "…",
    "dotsb" => "⋯",
    "cdots" => "⋯",
    "vdots" => "⋮",
    "ddots" => "⋱",
    // Delimiters
    "langle" => "⟨",
    "rangle" => "⟩",
    "lfloor" => "⌊",
    "rfloor" => "⌋",
    "lceil" => "⌈",
    "rceil" => "⌉",
    "lbrace" => "{",
    "rbrace" => "}",
    "lbrack" => "[",
    "rbrack" => "]",
    "vert" => "|",
    "lvert" => "|",
    "rvert" => "|",
    "Vert" => "‖",
    "lVert" => "‖",
    "rVert" => "‖",
    "backslash" => "\\",
};

lazy_static! {
    /// Special character commands for running text
    pub static ref TEXT_SYMBOLS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        // Currency and common symbols
        m.insert("pounds", "£");
        m.insert("euro", "€");
        m.insert("yen", "¥");
        m.insert("copyright", "©");
        m.insert("textcopyright", "©");
        m.insert("textregistered", "®");
        m.insert("texttrademark", "™");
        m.insert("textdegree", "°");
        m.insert("textbullet", "•");
        m.insert("textdagger", "†");
        m.insert("textdaggerdbl", "‡");
        m.insert("textsection", "§");
        m.insert("textparagraph", "¶");
        m.insert("textellipsis", "…");
        m.insert("textendash", "–");
        m.insert("textemdash", "—");
        m.insert("textasciitilde", "~");
        m.insert("textasciicircum", "^");
        m.insert("textbackslash", "\\");
        m.insert("textbar", "|");
        m.insert("textless", "<");
        m.insert("textgreater", ">");
        m.insert("textunderscore", "_");
        m.insert("textquoteleft", "\u{2018}");
        m.insert("textquoteright", "\u{2019}");
        m.insert("textquotedblleft", "\u{201C}");
        m.insert("textquotedblright", "\u{201D}");
        m.insert("checkmark", "✓");
        m.insert("qed", "∎");
        m.insert("S", "§");
        m.insert("P", "¶");

        // Special letters
        m.insert("aa", "å");
        m.insert("AA", "Å");
        m.insert("ae", "æ");
        m.insert("AE", "Æ");
        m.insert("oe", "œ");
        m.insert("OE", "Œ");
        m.insert("o", "ø");
        m.insert("O", "Ø");
        m.insert("ss", "ß");
        m.insert("i", "ı");
        m.insert("j", "ȷ");

        // Logos
        m.insert("TeX", "TeX");
        m.insert("LaTeX", "LaTeX");
        m.insert("today", "");
        m
    };

    /// Single non-letter commands: spacing, escapes and the row break
    pub static ref CHAR_COMMANDS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("\\", "\n");
        m.insert(",", " ");
        m.insert(";", " ");
        m.insert(":", " ");
        m.insert(">", " ");
        m.insert("!", "");
        m.insert(" ", " ");
        m.insert("{", "{");
        m.insert("}", "}");
        m.insert("$", "$");
        m.insert("%", "%");
        m.insert("&", "&");
        m.insert("#", "#");
        m.insert("_", "_");
        m.insert("|", "‖");
        m
    };

    /// Spacing commands with letter names
    pub static ref SPACING_COMMANDS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("quad", " ");
        m.insert("qquad", "  ");
        m.insert("enspace", " ");
        m.insert("thinspace", " ");
        m.insert("medspace", " ");
        m.insert("thickspace", " ");
        m.insert("negthinspace", "");
        m.insert("hfill", " ");
        m.insert("noindent", "");
        m.insert("newline", "\n");
        m.insert("par", "\n\n");
        m.insert("nobreak", "");
        m.insert("centering", "");
        m
    };
}

// ============================================================================
// Named Functions
// ============================================================================

/// Operator names rendered as their own name (`\sin` -> `sin`)
pub static NAMED_FUNCTIONS: phf::Set<&'static str> = phf_set! {
    "sin", "cos", "tan", "cot", "sec", "csc",
    "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh", "coth",
    "log", "ln", "lg", "exp",
    "lim", "liminf", "limsup", "sup", "inf", "max", "min",
    "arg", "argmin", "argmax",
    "det", "dim", "ker", "deg", "gcd", "hom", "Pr",
    "mod", "tr", "Tr", "rank", "sgn", "diag", "span",
};

// ============================================================================
// Argument Wrappers
// ============================================================================

/// Font and text-style commands whose output is their formatted argument
pub static TEXT_WRAPPERS: phf::Set<&'static str> = phf_set! {
    "text", "textrm", "textnormal", "textbf", "textit", "textsl", "textsf",
    "texttt", "textsc", "textup", "emph", "underline", "uline",
    "mbox", "hbox", "fbox", "boxed",
    "mathrm", "mathbf", "mathit", "mathsf", "mathtt", "mathcal", "mathscr",
    "mathfrak", "mathnormal", "boldsymbol", "bm", "pmb",
    "operatorname", "mathop",
    "underbrace", "overbrace", "phantom", "hphantom", "vphantom",
};

/// Wrappers whose arguments keep their spaces and are parsed as running
/// text even inside a math region
pub static TEXT_MODE_COMMANDS: phf::Set<&'static str> = phf_set! {
    "text", "textrm", "textnormal", "textbf", "textit", "textsl", "textsf",
    "texttt", "textsc", "textup", "emph", "mbox", "hbox", "fbox",
    "operatorname",
};

/// Sizing and style commands that carry no argument semantics of their own
pub static SIZING_COMMANDS: phf::Set<&'static str> = phf_set! {
    "left", "right", "middle",
    "big", "Big", "bigg", "Bigg",
    "bigl", "bigr", "Bigl", "Bigr",
    "biggl", "biggr", "Biggl", "Biggr",
    "bigm", "Bigm", "biggm", "Biggm",
    "displaystyle", "textstyle", "scriptstyle", "scriptscriptstyle",
    "limits", "nolimits",
};

// ============================================================================
// Accents
// ============================================================================

/// Math accents rendered with a combining character
pub static ACCENT_COMMANDS: phf::Map<&'static str, char> = phf_map! {
    "hat" => '\u{0302}',
    "widehat" => '\u{0302}',
    "check" => '\u{030C}',
    "tilde" => '\u{0303}',
    "widetilde" => '\u{0303}',
    "acute" => '\u{0301}',
    "grave" => '\u{0300}',
    "dot" => '\u{0307}',
    "ddot" => '\u{0308}',
    "breve" => '\u{0306}',
    "bar" => '\u{0304}',
    "overline" => '\u{0305}',
    "vec" => '\u{20D7}',
    "overrightarrow" => '\u{20D7}',
    "overleftarrow" => '\u{20D6}',
    "mathring" => '\u{030A}',
};

// ============================================================================
// Double-Struck Letters
// ============================================================================

/// `\mathbb` letters with a dedicated Unicode code point
pub static DOUBLE_STRUCK: phf::Map<char, char> = phf_map! {
    'A' => '𝔸', 'B' => '𝔹', 'C' => 'ℂ', 'D' => '𝔻', 'E' => '𝔼',
    'F' => '𝔽', 'G' => '𝔾', 'H' => 'ℍ', 'I' => '𝕀', 'J' => '𝕁',
    'K' => '𝕂', 'L' => '𝕃', 'M' => '𝕄', 'N' => 'ℕ', 'O' => '𝕆',
    'P' => 'ℙ', 'Q' => 'ℚ', 'R' => 'ℝ', 'S' => '𝕊', 'T' => '𝕋',
    'U' => '𝕌', 'V' => '𝕍', 'W' => '𝕎', 'X' => '𝕏', 'Y' => '𝕐',
    'Z' => 'ℤ',
    '0' => '𝟘', '1' => '𝟙', '2' => '𝟚', '3' => '𝟛', '4' => '𝟜',
    '5' => '𝟝', '6' => '𝟞', '7' => '𝟟', '8' => '𝟠', '9' => '𝟡',
};

// ============================================================================
// Negated Relations
// ============================================================================

/// Precomposed forms for `\not` followed by a relation; anything else gets U+0338
pub static NEGATIONS: phf::Map<char, char> = phf_map! {
    '=' => '≠', '<' => '≮', '>' => '≯',
    '≤' => '≰', '≥' => '≱', '≡' => '≢',
    '∼' => '≁', '≈' => '≉', '≃' => '≄', '≅' => '≇',
    '∈' => '∉', '∋' => '∌', '∃' => '∄',
    '⊂' => '⊄', '⊃' => '⊅', '⊆' => '⊈', '⊇' => '⊉',
    '∣' => '∤', '|' => '∤',
};

/// Check if a command is a sizing/style command without argument semantics
pub fn is_sizing_command(name: &str) -> bool {
    SIZING_COMMANDS.contains(name)
}

/// Check if a command's arguments are running text
pub fn is_text_mode_command(name: &str) -> bool {
    TEXT_MODE_COMMANDS.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negations_map_relations() {
        assert_eq!(NEGATIONS.get(&'='), Some(&'≠'));
        assert_eq!(NEGATIONS.get(&'∈'), Some(&'∉'));
        assert_eq!(NEGATIONS.get(&'x'), None);
    }

    #[test]
    fn test_sizing_commands() {
        assert!(is_sizing_command("left"));
        assert!(is_sizing_command("Bigr"));
        assert!(!is_sizing_command("leftarrow"));
    }

    #[test]
    fn test_double_struck() {
        assert_eq!(DOUBLE_STRUCK.get(&'R'), Some(&'ℝ'));
        assert_eq!(DOUBLE_STRUCK.get(&'N'), Some(&'ℕ'));
        assert_eq!(DOUBLE_STRUCK.get(&'r'), None);
    }

    #[test]
    fn test_text_mode_commands_are_wrappers() {
        for name in TEXT_MODE_COMMANDS.iter() {
            assert!(TEXT_WRAPPERS.contains(*name), "{} is not a wrapper", name);
        }
    }
}
