//! Unicode superscript and subscript characters
//!
//! Used when the formatter renders scripts in Unicode style, and for the
//! handful of single-symbol superscripts that always have a dedicated glyph.

use phf::phf_map;

/// Characters with a Unicode superscript form
pub static SUPERSCRIPTS: phf::Map<char, char> = phf_map! {
    '0' => '⁰', '1' => '¹', '2' => '²', '3' => '³', '4' => '⁴',
    '5' => '⁵', '6' => '⁶', '7' => '⁷', '8' => '⁸', '9' => '⁹',
    '+' => '⁺', '-' => '⁻', '−' => '⁻', '=' => '⁼', '(' => '⁽', ')' => '⁾',
    'a' => 'ᵃ', 'b' => 'ᵇ', 'c' => 'ᶜ', 'd' => 'ᵈ', 'e' => 'ᵉ',
    'f' => 'ᶠ', 'g' => 'ᵍ', 'h' => 'ʰ', 'i' => 'ⁱ', 'j' => 'ʲ',
    'k' => 'ᵏ', 'l' => 'ˡ', 'm' => 'ᵐ', 'n' => 'ⁿ', 'o' => 'ᵒ',
    'p' => 'ᵖ', 'r' => 'ʳ', 's' => 'ˢ', 't' => 'ᵗ', 'u' => 'ᵘ',
    'v' => 'ᵛ', 'w' => 'ʷ', 'x' => 'ˣ', 'y' => 'ʸ', 'z' => 'ᶻ',
    'A' => 'ᴬ', 'B' => 'ᴮ', 'D' => 'ᴰ', 'E' => 'ᴱ', 'G' => 'ᴳ',
    'H' => 'ᴴ', 'I' => 'ᴵ', 'J' => 'ᴶ', 'K' => 'ᴷ', 'L' => 'ᴸ',
    'M' => 'ᴹ', 'N' => 'ᴺ', 'O' => 'ᴼ', 'P' => 'ᴾ', 'R' => 'ᴿ',
    'T' => 'ᵀ', 'U' => 'ᵁ', 'V' => 'ⱽ', 'W' => 'ᵂ',
    'α' => 'ᵅ', 'β' => 'ᵝ', 'γ' => 'ᵞ', 'δ' => 'ᵟ', 'θ' => 'ᶿ',
    'φ' => 'ᵠ', 'χ' => 'ᵡ',
};

/// Characters with a Unicode subscript form
pub static SUBSCRIPTS: phf::Map<char, char> = phf_map! {
    '0' => '₀', '1' => '₁', '2' => '₂', '3' => '₃', '4' => '₄',
    '5' => '₅', '6' => '₆', '7' => '₇', '8' => '₈', '9' => '₉',
    '+' => '₊', '-' => '₋', '−' => '₋', '=' => '₌', '(' => '₍', ')' => '₎',
    'a' => 'ₐ', 'e' => 'ₑ', 'h' => 'ₕ', 'i' => 'ᵢ', 'j' => 'ⱼ',
    'k' => 'ₖ', 'l' => 'ₗ', 'm' => 'ₘ', 'n' => 'ₙ', 'o' => 'ₒ',
    'p' => 'ₚ', 'r' => 'ᵣ', 's' => 'ₛ', 't' => 'ₜ', 'u' => 'ᵤ',
    'v' => 'ᵥ', 'x' => 'ₓ',
    'β' => 'ᵦ', 'γ' => 'ᵧ', 'ρ' => 'ᵨ', 'φ' => 'ᵩ', 'χ' => 'ᵪ',
};

/// Rendered superscripts that replace the whole `^{...}` suffix
pub static SPECIAL_SUPERSCRIPTS: phf::Map<&'static str, &'static str> = phf_map! {
    "∘" => "°",
    "°" => "°",
    "′" => "′",
    "'" => "′",
    "″" => "″",
    "''" => "″",
    "′′" => "″",
    "†" => "†",
    "‡" => "‡",
    "*" => "*",
    "∗" => "*",
};

/// Convert every character of `text` to its superscript form, if all have one
pub fn to_superscript(text: &str) -> Option<String> {
    convert_all(text, &SUPERSCRIPTS)
}

/// Convert every character of `text` to its subscript form, if all have one
pub fn to_subscript(text: &str) -> Option<String> {
    convert_all(text, &SUBSCRIPTS)
}

fn convert_all(text: &str, table: &phf::Map<char, char>) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    text.chars().map(|c| table.get(&c).copied()).collect()
}
