//! The annotation engine: ties hint harvesting, stripping, run segmentation,
//! compound grouping and okurigana alignment together into `annotate`.

use crate::{
    align::{align_okurigana, Alignment},
    hints::extract_hints,
    kana::katakana_to_hiragana,
    script::{has_kanji, JapaneseRuns},
    strip::strip_existing,
};
use rubi_core::tokenizer::{Morpheme, ReadingConverter, Tokenizer};
use std::{collections::HashMap, sync::Arc};

/// The annotation engine.
///
/// Holds the shared tokenizer and the optional fallback reading converter.
/// Built once at process start; every request uses it read-only, so a single
/// instance can serve concurrent requests.
#[derive(Clone, Default)]
pub struct Annotator {
    tokenizer: Option<Arc<dyn Tokenizer>>,
    converter: Option<Arc<dyn ReadingConverter>>,
}

impl Annotator {
    pub fn new(
        tokenizer: Option<Arc<dyn Tokenizer>>,
        converter: Option<Arc<dyn ReadingConverter>>,
    ) -> Self {
        Self {
            tokenizer,
            converter,
        }
    }

    /// Annotates every Japanese run in `text` with furigana markup,
    /// reproducing everything else verbatim.
    ///
    /// Never fails: anything that cannot be annotated is passed through
    /// unchanged.
    pub fn annotate(&self, text: &str, skip_kana: bool) -> String {
        if text.is_empty() {
            return String::new();
        }
        let hints = extract_hints(text);
        let cleaned = strip_existing(text);
        tracing::debug!(
            "Annotating {} bytes with {} user hints",
            cleaned.len(),
            hints.len()
        );

        let mut out = String::with_capacity(cleaned.len());
        let mut pos = 0;
        for (range, run) in JapaneseRuns::new(&cleaned) {
            out.push_str(&cleaned[pos..range.start]);
            if skip_kana && !has_kanji(run) {
                out.push_str(run);
            } else {
                self.run_to_ruby(run, skip_kana, &hints, &mut out);
            }
            pos = range.end;
        }
        out.push_str(&cleaned[pos..]);
        out
    }

    /// Annotates a single Japanese run, grouping consecutive kanji nouns into
    /// compounds and falling back to per-morpheme annotation when a group
    /// cannot be aligned as a whole.
    fn run_to_ruby(
        &self,
        run: &str,
        skip_kana: bool,
        hints: &HashMap<String, String>,
        out: &mut String,
    ) {
        let Some(tokenizer) = self.tokenizer.as_deref() else {
            self.run_without_tokenizer(run, skip_kana, out);
            return;
        };
        let morphemes = match tokenizer.tokenize(run) {
            Ok(morphemes) => morphemes,
            Err(error) => {
                tracing::warn!("Tokenization failed for '{run}': {error}");
                self.run_without_tokenizer(run, skip_kana, out);
                return;
            }
        };

        let mut group = CompoundGroup::default();
        for morpheme in &morphemes {
            if !has_kanji(&morpheme.surface) {
                self.flush_group(&mut group, skip_kana, hints, out);
                token_to_ruby(out, &morpheme.surface, &morpheme.reading, skip_kana);
                continue;
            }
            if let Some(hint) = hints.get(morpheme.surface.as_str()) {
                self.flush_group(&mut group, skip_kana, hints, out);
                let aligned = align_okurigana(&morpheme.surface, hint);
                if aligned.is_annotatable() {
                    push_fragment(out, &aligned);
                    continue;
                }
            }
            if is_compound_candidate(morpheme) {
                group.push(morpheme.surface.clone(), self.resolved_reading(morpheme));
            } else {
                self.flush_group(&mut group, skip_kana, hints, out);
                let reading = self.resolved_reading(morpheme);
                token_to_ruby(out, &morpheme.surface, &reading, skip_kana);
            }
        }
        self.flush_group(&mut group, skip_kana, hints, out);
    }

    /// Emits a pending compound group: first as one aligned fragment (a user
    /// hint for the whole compound takes precedence over the concatenated
    /// tokenizer readings), and morpheme by morpheme if that fails.
    fn flush_group(
        &self,
        group: &mut CompoundGroup,
        skip_kana: bool,
        hints: &HashMap<String, String>,
        out: &mut String,
    ) {
        if group.is_empty() {
            return;
        }
        let (surfaces, readings) = group.take();
        let surface = surfaces.concat();

        if let Some(hint) = hints.get(surface.as_str()) {
            let aligned = align_okurigana(&surface, hint);
            if aligned.is_annotatable() {
                push_fragment(out, &aligned);
                return;
            }
        }

        let reading = katakana_to_hiragana(&readings.concat());
        let aligned = align_okurigana(&surface, &reading);
        if aligned.is_annotatable() {
            push_fragment(out, &aligned);
        } else {
            for (surface, reading) in surfaces.iter().zip(&readings) {
                token_to_ruby(out, surface, reading, skip_kana);
            }
        }
    }

    /// Degraded path for when no tokenizer is available: one whole-run
    /// reading from the fallback converter, or plain pass-through.
    fn run_without_tokenizer(&self, run: &str, skip_kana: bool, out: &mut String) {
        if !has_kanji(run) {
            out.push_str(run);
            return;
        }
        let reading = self
            .converter
            .as_deref()
            .and_then(|converter| converter.reading(run))
            .unwrap_or_default();
        token_to_ruby(out, run, &reading, skip_kana);
    }

    /// The morpheme's own reading, or the fallback converter's when the
    /// tokenizer came up empty for a kanji surface.
    fn resolved_reading(&self, morpheme: &Morpheme) -> String {
        if !morpheme.reading.is_empty() {
            return morpheme.reading.clone();
        }
        if has_kanji(&morpheme.surface) {
            if let Some(converter) = self.converter.as_deref() {
                if let Some(reading) = converter.reading(&morpheme.surface) {
                    return reading;
                }
            }
        }
        String::new()
    }
}

/// Accumulates consecutive morphemes that look like parts of one compound.
#[derive(Debug, Default)]
struct CompoundGroup {
    surfaces: Vec<String>,
    readings: Vec<String>,
}

impl CompoundGroup {
    fn push(&mut self, surface: String, reading: String) {
        self.surfaces.push(surface);
        self.readings.push(reading);
    }

    fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    fn take(&mut self) -> (Vec<String>, Vec<String>) {
        (
            std::mem::take(&mut self.surfaces),
            std::mem::take(&mut self.readings),
        )
    }
}

/// Kanji nouns and proper nouns get grouped into compounds. Analyzers
/// without at least two part-of-speech tags fall back to the kanji test.
fn is_compound_candidate(morpheme: &Morpheme) -> bool {
    if !has_kanji(&morpheme.surface) {
        return false;
    }
    match morpheme.part_of_speech.as_slice() {
        [broad, sub, ..] => broad == "名詞" || sub == "固有名詞" || sub == "一般",
        _ => true,
    }
}

/// Annotates a single morpheme. An empty reading or a failed alignment
/// passes the surface through untouched; kana-only surfaces are annotated
/// with their own reading only when `skip_kana` is off.
fn token_to_ruby(out: &mut String, surface: &str, reading: &str, skip_kana: bool) {
    if reading.is_empty() {
        out.push_str(surface);
        return;
    }
    let hira = katakana_to_hiragana(reading);
    if !has_kanji(surface) {
        if skip_kana {
            out.push_str(surface);
        } else {
            push_ruby(out, surface, &hira);
        }
        return;
    }
    let aligned = align_okurigana(surface, &hira);
    if aligned.is_annotatable() {
        push_fragment(out, &aligned);
    } else {
        out.push_str(surface);
    }
}

fn push_fragment(out: &mut String, aligned: &Alignment<'_>) {
    out.push_str(aligned.prefix);
    push_ruby(out, aligned.core, &aligned.reading);
    out.push_str(aligned.suffix);
}

fn push_ruby(out: &mut String, base: &str, reading: &str) {
    out.push_str("<ruby><rb>");
    out.push_str(base);
    out.push_str("</rb><rt>");
    out.push_str(reading);
    out.push_str("</rt></ruby>");
}

#[cfg(test)]
mod test {
    use super::*;
    use rubi_core::tokenizer::BoxError;

    struct FakeTokenizer(HashMap<&'static str, Vec<Morpheme>>);

    impl FakeTokenizer {
        fn new(entries: &[(&'static str, Vec<Morpheme>)]) -> Self {
            Self(entries.iter().cloned().collect())
        }
    }

    impl Tokenizer for FakeTokenizer {
        fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>, BoxError> {
            self.0
                .get(text)
                .cloned()
                .ok_or_else(|| format!("no tokenization for '{text}'").into())
        }
    }

    /// Stand-in for runs where the tokenizer must not be consulted at all.
    struct PanicTokenizer;

    impl Tokenizer for PanicTokenizer {
        fn tokenize(&self, text: &str) -> Result<Vec<Morpheme>, BoxError> {
            panic!("tokenizer invoked for '{text}'");
        }
    }

    struct FixedConverter(&'static str);

    impl ReadingConverter for FixedConverter {
        fn reading(&self, _text: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn morpheme(surface: &str, reading: &str, pos: &[&str]) -> Morpheme {
        Morpheme::new(
            surface,
            reading,
            pos.iter().map(|p| p.to_string()).collect(),
        )
    }

    fn annotator(entries: &[(&'static str, Vec<Morpheme>)]) -> Annotator {
        Annotator::new(Some(Arc::new(FakeTokenizer::new(entries))), None)
    }

    #[test]
    fn annotates_okurigana() {
        let annotator = annotator(&[(
            "食べる",
            vec![morpheme("食べる", "タベル", &["動詞", "自立"])],
        )]);
        assert_eq!(
            annotator.annotate("食べる", true),
            "<ruby><rb>食</rb><rt>た</rt></ruby>べる"
        );
    }

    #[test]
    fn skips_kana_only_run_without_tokenizing() {
        let annotator = Annotator::new(Some(Arc::new(PanicTokenizer)), None);
        assert_eq!(annotator.annotate("ありがとう", true), "ありがとう");
    }

    #[test]
    fn annotates_kana_run_when_not_skipped() {
        let annotator = annotator(&[("ねこ", vec![morpheme("ねこ", "ネコ", &["名詞", "一般"])])]);
        assert_eq!(
            annotator.annotate("ねこ", false),
            "<ruby><rb>ねこ</rb><rt>ねこ</rt></ruby>"
        );
    }

    #[test]
    fn empty_input_short_circuits() {
        let annotator = Annotator::new(Some(Arc::new(PanicTokenizer)), None);
        assert_eq!(annotator.annotate("", true), "");
    }

    #[test]
    fn preserves_non_japanese_text() {
        let annotator = annotator(&[("世界", vec![morpheme("世界", "セカイ", &["名詞", "一般"])])]);
        assert_eq!(
            annotator.annotate("Hello 世界!", true),
            "Hello <ruby><rb>世界</rb><rt>せかい</rt></ruby>!"
        );
    }

    #[test]
    fn merges_compounds_into_one_fragment() {
        let annotator = annotator(&[(
            "東京都",
            vec![
                morpheme("東京", "トウキョウ", &["名詞", "固有名詞"]),
                morpheme("都", "ト", &["名詞", "接尾"]),
            ],
        )]);
        assert_eq!(
            annotator.annotate("東京都", true),
            "<ruby><rb>東京都</rb><rt>とうきょうと</rt></ruby>"
        );
    }

    #[test]
    fn non_candidate_breaks_the_group() {
        let annotator = annotator(&[(
            "本を読む",
            vec![
                morpheme("本", "ホン", &["名詞", "一般"]),
                morpheme("を", "ヲ", &["助詞", "格助詞"]),
                morpheme("読む", "ヨム", &["動詞", "自立"]),
            ],
        )]);
        assert_eq!(
            annotator.annotate("本を読む", true),
            "<ruby><rb>本</rb><rt>ほん</rt></ruby>を<ruby><rb>読</rb><rt>よ</rt></ruby>む"
        );
    }

    #[test]
    fn unresolved_readings_pass_through() {
        let annotator = annotator(&[(
            "謎々",
            vec![
                morpheme("謎", "", &["名詞", "一般"]),
                morpheme("々", "", &["名詞", "一般"]),
            ],
        )]);
        assert_eq!(annotator.annotate("謎々", true), "謎々");
    }

    #[test]
    fn user_hint_overrides_tokenizer_reading() {
        let tokens = vec![
            morpheme("学校", "マナビヤ", &["名詞", "一般"]),
            morpheme("と", "ト", &["助詞", "並立助詞"]),
            morpheme("学校", "マナビヤ", &["名詞", "一般"]),
        ];
        let annotator = annotator(&[("学校と学校", tokens)]);
        assert_eq!(
            annotator.annotate("学校(がっこう)と学校", true),
            "<ruby><rb>学校</rb><rt>がっこう</rt></ruby>と<ruby><rb>学校</rb><rt>がっこう</rt></ruby>"
        );
    }

    #[test]
    fn hint_applies_to_whole_compound() {
        // the tokenizer reads 花火 as はなか; the user hint corrects the group
        let tokens = vec![
            morpheme("花", "ハナ", &["名詞", "一般"]),
            morpheme("火", "カ", &["名詞", "一般"]),
            morpheme("を", "ヲ", &["助詞", "格助詞"]),
            morpheme("見", "ミ", &["動詞", "自立"]),
            morpheme("た", "タ", &["助動詞"]),
            morpheme("花", "ハナ", &["名詞", "一般"]),
            morpheme("火", "カ", &["名詞", "一般"]),
        ];
        let annotator = annotator(&[("花火を見た花火", tokens)]);
        assert_eq!(
            annotator.annotate("花火(はなび)を見た花火", true),
            "<ruby><rb>花火</rb><rt>はなび</rt></ruby>を<ruby><rb>見</rb><rt>み</rt></ruby>た\
             <ruby><rb>花火</rb><rt>はなび</rt></ruby>"
        );
    }

    #[test]
    fn tokenizer_failure_degrades_to_pass_through() {
        let annotator = annotator(&[]);
        assert_eq!(annotator.annotate("謎の文", true), "謎の文");
    }

    #[test]
    fn converter_covers_missing_tokenizer() {
        let annotator = Annotator::new(None, Some(Arc::new(FixedConverter("ねこ"))));
        assert_eq!(
            annotator.annotate("猫", true),
            "<ruby><rb>猫</rb><rt>ねこ</rt></ruby>"
        );
    }

    #[test]
    fn converter_fills_unresolved_morpheme_readings() {
        let tokens = vec![morpheme("猫", "", &["名詞", "一般"])];
        let annotator = Annotator::new(
            Some(Arc::new(FakeTokenizer::new(&[("猫", tokens)]))),
            Some(Arc::new(FixedConverter("ねこ"))),
        );
        assert_eq!(
            annotator.annotate("猫", true),
            "<ruby><rb>猫</rb><rt>ねこ</rt></ruby>"
        );
    }

    #[test]
    fn no_tokenizer_no_converter_passes_through() {
        let annotator = Annotator::default();
        assert_eq!(annotator.annotate("漢字とかな", true), "漢字とかな");
    }

    #[test]
    fn reannotating_own_output_is_stable() {
        let annotator = annotator(&[(
            "食べる",
            vec![morpheme("食べる", "タベル", &["動詞", "自立"])],
        )]);
        let once = annotator.annotate("食べる", true);
        let twice = annotator.annotate(&once, true);
        assert_eq!(once, twice);
    }

    #[test]
    fn stripping_output_recovers_the_cleaned_input() {
        let annotator = annotator(&[
            (
                "食べる",
                vec![morpheme("食べる", "タベル", &["動詞", "自立"])],
            ),
            ("世界", vec![morpheme("世界", "セカイ", &["名詞", "一般"])]),
        ]);
        for input in ["食べる", "Hello 世界!", "学校(がっこう)と犬", ""] {
            let annotated = annotator.annotate(input, true);
            assert_eq!(strip_existing(&annotated), strip_existing(input));
        }
    }
}
