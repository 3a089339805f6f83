//! Vietnamese script detection

/// Lower-case letters that only appear in Vietnamese orthography among the
/// languages we aggregate from.
const VIETNAMESE_CHARS: &[char] = &[
    'ă', 'â', 'đ', 'ê', 'ô', 'ơ', 'ư', 'à', 'á', 'ạ', 'ả', 'ã', 'è', 'é', 'ẹ', 'ẻ', 'ẽ', 'ì', 'í',
    'ị', 'ỉ', 'ĩ', 'ò', 'ó', 'ọ', 'ỏ', 'õ', 'ù', 'ú', 'ụ', 'ủ', 'ũ', 'ỳ', 'ý', 'ỵ', 'ỷ', 'ỹ',
];

/// Heuristic check for text that already contains Vietnamese diacritics.
///
/// This is a short-circuit for the translator, not a classifier: French or
/// Spanish text with `é`/`á` is reported as Vietnamese and left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageDetector;

impl LanguageDetector {
    /// Create a detector
    pub fn new() -> Self {
        Self
    }

    /// `true` on the first Vietnamese-only character, `false` for empty text
    pub fn is_target_language(&self, text: &str) -> bool {
        text.chars()
            .flat_map(char::to_lowercase)
            .any(|c| VIETNAMESE_CHARS.contains(&c))
    }
}
