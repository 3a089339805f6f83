//! Fallback phrase dictionary used when every network provider fails

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::core::errors::Result;

/// Whole-word phrases and their Vietnamese equivalents, applied in order.
/// Multi-word phrases come before the words they contain.
pub const FALLBACK_TABLE: &[(&str, &str)] = &[
    // News keywords
    ("breaking news", "tin nóng"),
    ("latest news", "tin mới nhất"),
    ("news update", "cập nhật tin tức"),
    ("top story", "tin hàng đầu"),
    ("headline", "tiêu đề"),
    ("report", "báo cáo"),
    // Compound phrases
    ("prime minister", "thủ tướng"),
    ("national assembly", "quốc hội"),
    ("foreign minister", "bộ trưởng ngoại giao"),
    ("central bank", "ngân hàng trung ương"),
    ("stock market", "thị trường chứng khoán"),
    ("real estate", "bất động sản"),
    ("interest rate", "lãi suất"),
    ("exchange rate", "tỷ giá"),
    ("world cup", "World Cup"),
    ("national team", "đội tuyển quốc gia"),
    ("climate change", "biến đổi khí hậu"),
    ("electric vehicle", "xe điện"),
    ("South China Sea", "Biển Đông"),
    ("United States", "Hoa Kỳ"),
    ("United Nations", "Liên Hợp Quốc"),
    ("Southeast Asia", "Đông Nam Á"),
    // Places
    ("Vietnam", "Việt Nam"),
    ("Vietnamese", "Việt Nam"),
    ("Hanoi", "Hà Nội"),
    ("Ho Chi Minh City", "Thành phố Hồ Chí Minh"),
    ("Saigon", "Sài Gòn"),
    ("Da Nang", "Đà Nẵng"),
    ("Hue", "Huế"),
    ("Can Tho", "Cần Thơ"),
    ("Hai Phong", "Hải Phòng"),
    ("Nha Trang", "Nha Trang"),
    ("Ha Long", "Hạ Long"),
    ("Mekong", "Mê Kông"),
    ("ASEAN", "ASEAN"),
    // Economy
    ("economy", "kinh tế"),
    ("economic", "kinh tế"),
    ("GDP", "GDP"),
    ("growth", "tăng trưởng"),
    ("investment", "đầu tư"),
    ("investor", "nhà đầu tư"),
    ("trade", "thương mại"),
    ("export", "xuất khẩu"),
    ("exports", "xuất khẩu"),
    ("import", "nhập khẩu"),
    ("imports", "nhập khẩu"),
    ("market", "thị trường"),
    ("stock", "cổ phiếu"),
    ("business", "kinh doanh"),
    ("company", "công ty"),
    ("corporation", "tập đoàn"),
    ("industry", "công nghiệp"),
    ("manufacturing", "sản xuất"),
    ("technology", "công nghệ"),
    ("innovation", "sáng tạo"),
    ("startup", "khởi nghiệp"),
    ("inflation", "lạm phát"),
    ("bank", "ngân hàng"),
    ("tax", "thuế"),
    ("tariff", "thuế quan"),
    ("price", "giá"),
    ("prices", "giá"),
    ("energy", "năng lượng"),
    ("oil", "dầu mỏ"),
    ("agriculture", "nông nghiệp"),
    ("rice", "gạo"),
    ("coffee", "cà phê"),
    ("tourism", "du lịch"),
    ("tourist", "du khách"),
    ("tourists", "du khách"),
    // Politics
    ("politics", "chính trị"),
    ("political", "chính trị"),
    ("government", "chính phủ"),
    ("president", "chủ tịch"),
    ("minister", "bộ trưởng"),
    ("ministry", "bộ"),
    ("parliament", "quốc hội"),
    ("policy", "chính sách"),
    ("law", "luật"),
    ("legal", "pháp lý"),
    ("election", "bầu cử"),
    ("diplomacy", "ngoại giao"),
    ("diplomatic", "ngoại giao"),
    ("summit", "hội nghị thượng đỉnh"),
    ("agreement", "thỏa thuận"),
    ("cooperation", "hợp tác"),
    ("security", "an ninh"),
    ("military", "quân sự"),
    ("war", "chiến tranh"),
    ("peace", "hòa bình"),
    ("corruption", "tham nhũng"),
    ("court", "tòa án"),
    ("police", "cảnh sát"),
    // Society
    ("society", "xã hội"),
    ("social", "xã hội"),
    ("people", "người dân"),
    ("citizen", "công dân"),
    ("education", "giáo dục"),
    ("health", "sức khỏe"),
    ("healthcare", "chăm sóc sức khỏe"),
    ("hospital", "bệnh viện"),
    ("school", "trường"),
    ("university", "đại học"),
    ("student", "sinh viên"),
    ("students", "sinh viên"),
    ("teacher", "giáo viên"),
    ("doctor", "bác sĩ"),
    ("vaccine", "vắc xin"),
    ("disease", "bệnh"),
    ("population", "dân số"),
    ("culture", "văn hóa"),
    ("family", "gia đình"),
    ("children", "trẻ em"),
    ("women", "phụ nữ"),
    // Sports
    ("sports", "thể thao"),
    ("football", "bóng đá"),
    ("soccer", "bóng đá"),
    ("basketball", "bóng rổ"),
    ("volleyball", "bóng chuyền"),
    ("tennis", "quần vợt"),
    ("swimming", "bơi lội"),
    ("athletics", "điền kinh"),
    ("championship", "giải vô địch"),
    ("tournament", "giải đấu"),
    ("Olympic", "Olympic"),
    ("medal", "huy chương"),
    ("victory", "chiến thắng"),
    ("coach", "huấn luyện viên"),
    ("player", "cầu thủ"),
    ("players", "cầu thủ"),
    ("match", "trận đấu"),
    ("goal", "bàn thắng"),
    ("win", "thắng"),
    ("wins", "thắng"),
    ("defeat", "thất bại"),
    // Entertainment
    ("entertainment", "giải trí"),
    ("movie", "phim"),
    ("film", "phim"),
    ("cinema", "rạp chiếu phim"),
    ("music", "nhạc"),
    ("singer", "ca sĩ"),
    ("actor", "diễn viên"),
    ("actress", "nữ diễn viên"),
    ("celebrity", "ngôi sao"),
    ("festival", "lễ hội"),
    ("concert", "hòa nhạc"),
    ("fashion", "thời trang"),
    ("beauty", "sắc đẹp"),
    ("award", "giải thưởng"),
    ("show", "chương trình"),
    // Weather and environment
    ("weather", "thời tiết"),
    ("climate", "khí hậu"),
    ("environment", "môi trường"),
    ("pollution", "ô nhiễm"),
    ("typhoon", "bão"),
    ("storm", "bão"),
    ("flood", "lũ lụt"),
    ("floods", "lũ lụt"),
    ("drought", "hạn hán"),
    ("landslide", "sạt lở đất"),
    ("earthquake", "động đất"),
    ("rain", "mưa"),
    ("heat", "nắng nóng"),
    // Transport
    ("traffic", "giao thông"),
    ("transport", "vận tải"),
    ("airport", "sân bay"),
    ("highway", "đường cao tốc"),
    ("bridge", "cầu"),
    ("railway", "đường sắt"),
    ("metro", "tàu điện ngầm"),
    ("airline", "hãng hàng không"),
    ("flight", "chuyến bay"),
    ("accident", "tai nạn"),
    // Technology
    ("internet", "internet"),
    ("digital", "kỹ thuật số"),
    ("smartphone", "điện thoại thông minh"),
    ("artificial intelligence", "trí tuệ nhân tạo"),
    ("AI", "AI"),
    ("robot", "robot"),
    ("semiconductor", "bán dẫn"),
    ("chip", "chip"),
    ("software", "phần mềm"),
    ("data", "dữ liệu"),
    ("cyber", "không gian mạng"),
    // General vocabulary
    ("new", "mới"),
    ("old", "cũ"),
    ("big", "lớn"),
    ("small", "nhỏ"),
    ("good", "tốt"),
    ("bad", "xấu"),
    ("important", "quan trọng"),
    ("significant", "đáng kể"),
    ("major", "chính"),
    ("minor", "phụ"),
    ("increase", "tăng"),
    ("decrease", "giảm"),
    ("improve", "cải thiện"),
    ("develop", "phát triển"),
    ("development", "phát triển"),
    ("successful", "thành công"),
    ("failure", "thất bại"),
    ("progress", "tiến bộ"),
    ("achievement", "thành tựu"),
    ("record", "kỷ lục"),
    ("first", "đầu tiên"),
    ("million", "triệu"),
    ("billion", "tỷ"),
    // Time
    ("today", "hôm nay"),
    ("yesterday", "hôm qua"),
    ("tomorrow", "ngày mai"),
    ("morning", "sáng"),
    ("afternoon", "chiều"),
    ("evening", "tối"),
    ("night", "đêm"),
    ("week", "tuần"),
    ("month", "tháng"),
    ("year", "năm"),
    ("century", "thế kỷ"),
    ("Monday", "thứ Hai"),
    ("Tuesday", "thứ Ba"),
    ("Wednesday", "thứ Tư"),
    ("Thursday", "thứ Năm"),
    ("Friday", "thứ Sáu"),
    ("Saturday", "thứ Bảy"),
    ("Sunday", "Chủ nhật"),
    // Other countries
    ("China", "Trung Quốc"),
    ("Chinese", "Trung Quốc"),
    ("Japan", "Nhật Bản"),
    ("Japanese", "Nhật Bản"),
    ("Korea", "Hàn Quốc"),
    ("Korean", "Hàn Quốc"),
    ("Thailand", "Thái Lan"),
    ("Singapore", "Singapore"),
    ("Cambodia", "Campuchia"),
    ("Laos", "Lào"),
    ("Indonesia", "Indonesia"),
    ("Philippines", "Philippines"),
    ("Malaysia", "Malaysia"),
    ("India", "Ấn Độ"),
    ("Australia", "Úc"),
    ("Russia", "Nga"),
    ("Ukraine", "Ukraine"),
    ("France", "Pháp"),
    ("Germany", "Đức"),
    ("Britain", "Anh"),
    ("America", "Mỹ"),
    ("American", "Mỹ"),
    ("USA", "Mỹ"),
    ("Europe", "Châu Âu"),
    ("European", "Châu Âu"),
    ("Asia", "Châu Á"),
    ("Africa", "Châu Phi"),
];

/// Compiled fallback table.
///
/// Each entry is matched on word boundaries, case-insensitively, in table
/// order. Text produced by an earlier entry is never matched again by a
/// later one.
#[derive(Debug, Clone)]
pub struct FallbackDictionary {
    entries: Vec<(Regex, String)>,
}

impl FallbackDictionary {
    /// Compile the built-in table
    pub fn load() -> Result<Self> {
        Self::from_pairs(FALLBACK_TABLE.iter().copied())
    }

    /// Compile a custom table
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let entries = pairs
            .into_iter()
            .filter(|(phrase, _)| !phrase.trim().is_empty())
            .map(|(phrase, replacement)| -> Result<(Regex, String)> {
                let pattern = format!(r"\b{}\b", regex::escape(phrase));
                let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
                Ok((regex, replacement.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Compiled {} fallback dictionary entries", entries.len());
        Ok(Self { entries })
    }

    /// Number of compiled entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` for an empty table
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every known phrase in `text`
    pub fn substitute(&self, text: &str) -> String {
        // (piece, already substituted)
        let mut pieces: Vec<(String, bool)> = vec![(text.to_string(), false)];

        for (regex, replacement) in &self.entries {
            if !pieces.iter().any(|(piece, done)| !done && regex.is_match(piece)) {
                continue;
            }

            let mut next = Vec::with_capacity(pieces.len() + 2);
            for (piece, done) in pieces {
                if done {
                    next.push((piece, true));
                    continue;
                }

                let mut last = 0;
                for m in regex.find_iter(&piece) {
                    if m.start() > last {
                        next.push((piece[last..m.start()].to_string(), false));
                    }
                    next.push((replacement.clone(), true));
                    last = m.end();
                }
                if last < piece.len() {
                    next.push((piece[last..].to_string(), false));
                }
            }
            pieces = next;
        }

        pieces.into_iter().map(|(piece, _)| piece).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> FallbackDictionary {
        FallbackDictionary::load().unwrap()
    }

    #[test]
    fn test_recognized_phrases_replaced() {
        let result = dictionary().substitute("Vietnam economy grows");
        assert_eq!(result, "Việt Nam kinh tế grows");
    }

    #[test]
    fn test_case_insensitive_whole_words() {
        let dict = dictionary();
        assert_eq!(dict.substitute("HANOI traffic"), "Hà Nội giao thông");
        // "Vietnamese" is its own entry, "Vietnam" must not match inside it
        assert_eq!(dict.substitute("Vietnamese football"), "Việt Nam bóng đá");
        // No partial-word match
        assert_eq!(dict.substitute("renewal"), "renewal");
    }

    #[test]
    fn test_multi_word_phrase_wins_over_words() {
        let dict = dictionary();
        assert_eq!(dict.substitute("Prime Minister visits"), "thủ tướng visits");
        assert_eq!(dict.substitute("stock market"), "thị trường chứng khoán");
    }

    #[test]
    fn test_substituted_text_not_rescanned() {
        let dict = FallbackDictionary::from_pairs([("alpha", "beta gamma"), ("gamma", "delta")]).unwrap();
        assert_eq!(dict.substitute("alpha and gamma"), "beta gamma and delta");
    }

    #[test]
    fn test_unknown_text_unchanged() {
        let dict = dictionary();
        assert_eq!(dict.substitute("Xyzzy plugh"), "Xyzzy plugh");
        assert_eq!(dict.substitute(""), "");
    }

    #[test]
    fn test_regex_metacharacters_escaped() {
        let dict = FallbackDictionary::from_pairs([("a.b", "x")]).unwrap();
        assert_eq!(dict.substitute("a.b acb"), "x acb");
    }

    #[test]
    fn test_table_size() {
        assert!(dictionary().len() > 200);
    }
}
