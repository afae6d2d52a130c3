//! Emoji detection over Unicode code point ranges

/// Code points that render as emoji by default (Emoji_Presentation).
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F300, 0x1F5FF), // symbols & pictographs (includes skin tone modifiers)
    (0x1F600, 0x1F64F), // emoticons
    (0x1F680, 0x1F6FF), // transport & map
    (0x1F900, 0x1F9FF), // supplemental symbols & pictographs
    (0x1FA70, 0x1FAFF), // symbols & pictographs extended-A
    (0x1F1E6, 0x1F1FF), // regional indicators (flags)
    (0x1F004, 0x1F004),
    (0x1F0CF, 0x1F0CF),
    (0x1F18E, 0x1F18E),
    (0x1F191, 0x1F19A),
    (0x231A, 0x231B),
    (0x23E9, 0x23EC),
    (0x23F0, 0x23F0),
    (0x23F3, 0x23F3),
    (0x25FD, 0x25FE),
    (0x2614, 0x2615),
    (0x2648, 0x2653),
    (0x267F, 0x267F),
    (0x2693, 0x2693),
    (0x26A1, 0x26A1),
    (0x26AA, 0x26AB),
    (0x26BD, 0x26BE),
    (0x26C4, 0x26C5),
    (0x26CE, 0x26CE),
    (0x26D4, 0x26D4),
    (0x26EA, 0x26EA),
    (0x26F2, 0x26F3),
    (0x26F5, 0x26F5),
    (0x26FA, 0x26FA),
    (0x26FD, 0x26FD),
    (0x2705, 0x2705),
    (0x270A, 0x270B),
    (0x2728, 0x2728),
    (0x274C, 0x274C),
    (0x274E, 0x274E),
    (0x2753, 0x2755),
    (0x2757, 0x2757),
    (0x2795, 0x2797),
    (0x27B0, 0x27B0),
    (0x27BF, 0x27BF),
    (0x2B1B, 0x2B1C),
    (0x2B50, 0x2B50),
    (0x2B55, 0x2B55),
];

/// Emoji that render as text unless followed by U+FE0F, e.g. ❤ and ☀.
const TEXT_DEFAULT_EMOJI: &[(u32, u32)] = &[
    (0x23ED, 0x23EF),
    (0x23F1, 0x23F2),
    (0x23F8, 0x23FA),
    (0x2600, 0x2604),
    (0x260E, 0x260E),
    (0x2611, 0x2611),
    (0x2618, 0x2618),
    (0x261D, 0x261D),
    (0x2620, 0x2620),
    (0x2622, 0x2623),
    (0x2626, 0x2626),
    (0x262A, 0x262A),
    (0x262E, 0x262F),
    (0x2638, 0x263A),
    (0x2640, 0x2640),
    (0x2642, 0x2642),
    (0x265F, 0x2660),
    (0x2663, 0x2663),
    (0x2665, 0x2666),
    (0x2668, 0x2668),
    (0x267B, 0x267B),
    (0x267E, 0x267E),
    (0x2692, 0x2692),
    (0x2694, 0x2697),
    (0x2699, 0x2699),
    (0x269B, 0x269C),
    (0x26A0, 0x26A0),
    (0x26A7, 0x26A7),
    (0x26B0, 0x26B1),
    (0x26C8, 0x26C8),
    (0x26CF, 0x26CF),
    (0x26D1, 0x26D1),
    (0x26D3, 0x26D3),
    (0x26E9, 0x26E9),
    (0x26F0, 0x26F1),
    (0x26F4, 0x26F4),
    (0x26F7, 0x26F9),
    (0x2702, 0x2702),
    (0x2708, 0x2709),
    (0x270C, 0x270D),
    (0x270F, 0x270F),
    (0x2712, 0x2712),
    (0x2714, 0x2714),
    (0x2716, 0x2716),
    (0x271D, 0x271D),
    (0x2721, 0x2721),
    (0x2733, 0x2734),
    (0x2744, 0x2744),
    (0x2747, 0x2747),
    (0x2763, 0x2764),
    (0x27A1, 0x27A1),
    (0x2B05, 0x2B07),
    (0x3030, 0x3030),
    (0x303D, 0x303D),
    (0x3297, 0x3297),
    (0x3299, 0x3299),
];

const ZWJ: char = '\u{200D}';
const EMOJI_VS: char = '\u{FE0F}';

/// Zero-width joiner, text/emoji variation selectors and the keycap mark.
const EMOJI_COMPONENTS: &[char] = &[ZWJ, '\u{FE0E}', EMOJI_VS, '\u{20E3}'];

fn in_ranges(ranges: &[(u32, u32)], c: char) -> bool {
    let cp = c as u32;
    ranges.iter().any(|&(start, end)| cp >= start && cp <= end)
}

/// Check whether a single character renders as an emoji on its own
pub fn is_emoji(c: char) -> bool {
    in_ranges(EMOJI_RANGES, c)
}

/// Check whether a character can be an emoji, with or without U+FE0F
pub fn is_emoji_capable(c: char) -> bool {
    is_emoji(c) || in_ranges(TEXT_DEFAULT_EMOJI, c)
}

/// Check whether a character only modifies or joins neighbouring emoji
pub fn is_emoji_component(c: char) -> bool {
    EMOJI_COMPONENTS.contains(&c)
}

/// Emoji glyphs in order of appearance.
///
/// A text-default symbol counts when U+FE0F follows it or a ZWJ joins it
/// to the previous glyph, so "❤️" and "🤷‍♀" yield ❤ and ♀ but a bare ✓ or ★
/// yields nothing.
pub fn extract_emojis(text: &str) -> Vec<char> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            is_emoji(c)
                || (in_ranges(TEXT_DEFAULT_EMOJI, c)
                    && (chars.get(i + 1) == Some(&EMOJI_VS)
                        || (i > 0 && chars[i - 1] == ZWJ)))
        })
        .map(|(_, &c)| c)
        .collect()
}

/// Check whether the text contains any emoji glyph
pub fn contains_emoji(text: &str) -> bool {
    !extract_emojis(text).is_empty()
}

/// True when at least one emoji is present and every non-whitespace character is
/// an emoji glyph or an emoji component.
pub fn is_emoji_only(text: &str) -> bool {
    let emojis = extract_emojis(text);
    let others = text
        .chars()
        .filter(|c| !c.is_whitespace() && !is_emoji_component(*c))
        .count();
    !emojis.is_empty() && others == emojis.len()
}
