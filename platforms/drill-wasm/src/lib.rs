use std::fmt::Display;

use drill_decoder::{CompoundMode, VerseBuilder};
use drill_morph::{masked_width, FieldStatus, ScoreReport, ScoreSummary, SurfaceMatcher};
use drill_protocol::{catalog, FieldKey, Language, Verse, VersePack, WordId, PACK_VERSION};
use drill_session::DrillSession;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(js_error)
}

/// `[surface, lemma, code]`, as the data source delivers it.
pub type Row = (String, Option<String>, String);

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WordView {
    pub id: u32,
    pub surface: String,
    pub lemma: Option<String>,
    pub after_space: bool,
    pub has_gold: bool,
    pub masked_width: usize,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerseView {
    pub reference: String,
    pub line: String,
    pub words: Vec<WordView>,
}

impl From<&Verse> for VerseView {
    fn from(verse: &Verse) -> Self {
        Self {
            reference: verse.reference.clone(),
            line: verse.surface_line(),
            words: verse
                .words
                .iter()
                .map(|w| WordView {
                    id: w.id.0,
                    surface: w.surface.clone(),
                    lemma: w.lemma.clone(),
                    after_space: w.after_space,
                    has_gold: w.parse.is_some(),
                    masked_width: masked_width(&w.surface),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpecView {
    pub key: &'static str,
    pub label: &'static str,
    pub multi: bool,
    pub choices: Vec<&'static str>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldDetailView {
    pub field: &'static str,
    pub ok: bool,
    pub gold: String,
    pub guess: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub correct: usize,
    pub total: usize,
    pub percent: Option<u32>,
    pub details: Vec<FieldDetailView>,
}

impl From<ScoreReport> for ReportView {
    fn from(report: ScoreReport) -> Self {
        Self {
            correct: report.correct,
            total: report.total,
            percent: report.percent(),
            details: report
                .details
                .into_iter()
                .map(|d| FieldDetailView {
                    field: d.field.as_str(),
                    ok: d.ok,
                    gold: d.gold.to_string(),
                    guess: d.guess.map(|g| g.to_string()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub correct: usize,
    pub total: usize,
    pub words: usize,
    pub percent: Option<u32>,
}

impl From<ScoreSummary> for SummaryView {
    fn from(summary: ScoreSummary) -> Self {
        Self {
            correct: summary.correct,
            total: summary.total,
            words: summary.words,
            percent: summary.percent(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatcherOptions {
    #[serde(default)]
    ignore_accents: bool,
    #[serde(default)]
    ignore_breathing: bool,
    #[serde(default)]
    ignore_case: bool,
}

fn status_name(status: FieldStatus) -> &'static str {
    match status {
        FieldStatus::Correct => "correct",
        FieldStatus::Incorrect => "incorrect",
        FieldStatus::Neutral => "neutral",
    }
}

/// The drill running in the browser: one language, one loaded verse, and
/// optionally a compiled verse pack to load verses from.
#[wasm_bindgen]
pub struct DrillEngine {
    session: DrillSession,
    pack: Option<VersePack>,
    mode: CompoundMode,
    verse: Option<Verse>,
}

impl DrillEngine {
    fn create(language: Language) -> Self {
        Self {
            session: DrillSession::new(language),
            pack: None,
            mode: CompoundMode::Split,
            verse: None,
        }
    }

    fn install(&mut self, verse: Verse) -> Result<VerseView, String> {
        let view = VerseView::from(&verse);
        self.session.load_verse(verse.clone()).map_err(|e| e.to_string())?;
        self.verse = Some(verse);
        Ok(view)
    }

    fn load_rows(&mut self, reference: &str, rows: &[Row]) -> Result<VerseView, String> {
        let mut builder = VerseBuilder::new(reference, self.session.language()).mode(self.mode);
        for (surface, lemma, code) in rows {
            builder.push(surface, lemma.as_deref(), code);
        }
        self.install(builder.build())
    }

    fn load_from_pack(&mut self, reference: &str) -> Result<VerseView, String> {
        let pack = self.pack.as_ref().ok_or("no verse pack loaded")?;
        let verse = pack
            .position(reference)
            .and_then(|id| pack.verse(id))
            .ok_or_else(|| format!("verse {:?} is not in the pack", reference))?
            .clone();
        self.install(verse)
    }

    fn install_pack(&mut self, data: &[u8]) -> Result<usize, String> {
        // Archives must be aligned; buffers handed over from JS are not.
        let mut aligned = rkyv::AlignedVec::with_capacity(data.len());
        aligned.extend_from_slice(data);
        let pack: VersePack =
            rkyv::from_bytes(&aligned).map_err(|e| format!("invalid verse pack: {:?}", e))?;

        if pack.version != PACK_VERSION {
            return Err(format!("verse pack version {} (expected {})", pack.version, PACK_VERSION));
        }
        if pack.language != self.session.language() {
            return Err(format!("verse pack is {}, engine is {}", pack.language, self.session.language()));
        }
        let count = pack.verses.len();
        self.pack = Some(pack);
        Ok(count)
    }

    fn report_view(&self, word: u32) -> Result<ReportView, String> {
        self.session
            .report(WordId(word))
            .map(ReportView::from)
            .map_err(|e| e.to_string())
    }

    fn relevance(&self, word: u32, pos: Option<&str>, key: &str) -> Result<bool, String> {
        let Ok(key) = key.parse::<FieldKey>() else {
            log::debug!("unknown field key {:?}; treating it as relevant", key);
            return Ok(true);
        };
        self.session
            .is_relevant(WordId(word), pos, key)
            .map_err(|e| e.to_string())
    }

    fn surface_matches(&self, word: u32, input: &str, matcher: SurfaceMatcher) -> Result<bool, String> {
        let word = self.session.word(WordId(word)).map_err(|e| e.to_string())?;
        Ok(matcher.matches(input, &word.surface))
    }
}

fn field_key(key: &str) -> Result<FieldKey, JsValue> {
    key.parse::<FieldKey>().map_err(js_error)
}

#[wasm_bindgen]
impl DrillEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(language: &str) -> Result<DrillEngine, JsValue> {
        let language = language.parse::<Language>().map_err(js_error)?;
        Ok(Self::create(language))
    }

    pub fn language(&self) -> String {
        self.session.language().to_string()
    }

    /// `true` folds attached prefixes/suffixes into their host word.
    pub fn set_fold_compounds(&mut self, fold: bool) {
        self.mode = if fold { CompoundMode::Fold } else { CompoundMode::Split };
    }

    /// Loads an rkyv verse pack produced by the verse compiler; returns its verse count.
    pub fn load_pack(&mut self, data: Vec<u8>) -> Result<usize, JsValue> {
        self.install_pack(&data).map_err(js_error)
    }

    pub fn references(&self) -> Result<JsValue, JsValue> {
        let refs: Vec<&str> = self
            .pack
            .iter()
            .flat_map(|p| p.verses.iter().map(|v| v.reference.as_str()))
            .collect();
        to_js(&refs)
    }

    /// Loads a verse from `[surface, lemma, code]` rows, or from the loaded
    /// pack when `rows` is null/undefined.
    pub fn load_verse(&mut self, reference: &str, rows: JsValue) -> Result<JsValue, JsValue> {
        let view = if rows.is_null() || rows.is_undefined() {
            self.load_from_pack(reference)
        } else {
            let rows: Vec<Row> = serde_wasm_bindgen::from_value(rows).map_err(js_error)?;
            self.load_rows(reference, &rows)
        }
        .map_err(js_error)?;
        to_js(&view)
    }

    pub fn set_answer(&mut self, word: u32, key: &str, value: &str) -> Result<(), JsValue> {
        let key = field_key(key)?;
        self.session.set_answer(WordId(word), key, value).map_err(js_error)
    }

    pub fn set_prefixes(&mut self, word: u32, values: JsValue) -> Result<(), JsValue> {
        let values: Vec<String> = serde_wasm_bindgen::from_value(values).map_err(js_error)?;
        self.session.set_prefixes(WordId(word), values).map_err(js_error)
    }

    pub fn clear_answer(&mut self, word: u32) -> Result<(), JsValue> {
        self.session.clear_answer(WordId(word)).map_err(js_error)
    }

    pub fn toggle_selected(&mut self, word: u32) -> Result<bool, JsValue> {
        self.session.toggle_selected(WordId(word)).map_err(js_error)
    }

    pub fn has_answers(&self) -> bool {
        self.session.has_answers()
    }

    /// Unknown keys count as relevant rather than failing.
    pub fn is_relevant(&self, word: u32, pos: Option<String>, key: &str) -> Result<bool, JsValue> {
        self.relevance(word, pos.as_deref(), key).map_err(js_error)
    }

    /// `"correct"`, `"incorrect"` or `"neutral"`.
    pub fn field_status(&self, word: u32, key: &str) -> Result<String, JsValue> {
        let key = field_key(key)?;
        let status = self.session.field_status(WordId(word), key).map_err(js_error)?;
        Ok(status_name(status).to_string())
    }

    pub fn visible_suffix_fields(&self, word: u32) -> Result<JsValue, JsValue> {
        let keys: Vec<&str> = self
            .session
            .visible_suffix_fields(WordId(word))
            .map_err(js_error)?
            .into_iter()
            .map(FieldKey::as_str)
            .collect();
        to_js(&keys)
    }

    pub fn report(&self, word: u32) -> Result<JsValue, JsValue> {
        to_js(&self.report_view(word).map_err(js_error)?)
    }

    pub fn summary(&self) -> Result<JsValue, JsValue> {
        to_js(&SummaryView::from(self.session.summary()))
    }

    /// Field definitions for the engine's language, in display order.
    pub fn catalog(&self) -> Result<JsValue, JsValue> {
        let specs: Vec<FieldSpecView> = catalog(self.session.language())
            .iter()
            .map(|spec| FieldSpecView {
                key: spec.key.as_str(),
                label: spec.label,
                multi: spec.key.is_multi(),
                choices: spec.choices().collect(),
            })
            .collect();
        to_js(&specs)
    }

    /// Reverse drill: does the typed form match the word's surface?
    pub fn check_surface(&self, word: u32, input: &str, options: JsValue) -> Result<bool, JsValue> {
        let matcher = if options.is_null() || options.is_undefined() {
            SurfaceMatcher::default()
        } else {
            let options: MatcherOptions = serde_wasm_bindgen::from_value(options).map_err(js_error)?;
            SurfaceMatcher {
                ignore_accents: options.ignore_accents,
                ignore_breathing: options.ignore_breathing,
                ignore_case: options.ignore_case,
            }
        };
        self.surface_matches(word, input, matcher).map_err(js_error)
    }

    /// The loaded verse's display line, compound segments joined.
    pub fn verse_line(&self) -> Option<String> {
        self.verse.as_ref().map(Verse::surface_line)
    }
}
