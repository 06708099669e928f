//! Keyword-based aspect sentiment labels
//!
//! Each aspect has a positive and a negative keyword list. A review gets
//! whichever side has more keyword hits for that aspect, and `neutral` on a
//! tie (including no hits at all).

use crate::error::{Result, TextError};
use crate::lexicon;
use mapharvest_store::Table;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt;
use std::io::{BufRead, Write};
use tracing::{debug, info};

pub const SENTENCE_COLUMN: &str = "sentence";

/// Manual review saves after every row whose 1-based position is a multiple of this.
pub const AUTOSAVE_EVERY: usize = 10;

const SHOWN_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    FoodQuality,
    Price,
    Service,
    Ambiance,
    Portion,
}

impl Aspect {
    pub const ALL: [Aspect; 5] = [
        Aspect::FoodQuality,
        Aspect::Price,
        Aspect::Service,
        Aspect::Ambiance,
        Aspect::Portion,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Aspect::FoodQuality => "food_quality",
            Aspect::Price => "price",
            Aspect::Service => "service",
            Aspect::Ambiance => "ambiance",
            Aspect::Portion => "portion",
        }
    }

    pub fn positive(&self) -> &'static [&'static str] {
        match self {
            Aspect::FoodQuality => lexicon::FOOD_QUALITY_POSITIVE,
            Aspect::Price => lexicon::PRICE_POSITIVE,
            Aspect::Service => lexicon::SERVICE_POSITIVE,
            Aspect::Ambiance => lexicon::AMBIANCE_POSITIVE,
            Aspect::Portion => lexicon::PORTION_POSITIVE,
        }
    }

    pub fn negative(&self) -> &'static [&'static str] {
        match self {
            Aspect::FoodQuality => lexicon::FOOD_QUALITY_NEGATIVE,
            Aspect::Price => lexicon::PRICE_NEGATIVE,
            Aspect::Service => lexicon::SERVICE_NEGATIVE,
            Aspect::Ambiance => lexicon::AMBIANCE_NEGATIVE,
            Aspect::Portion => lexicon::PORTION_NEGATIVE,
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Reviewer shorthand: `p`, `n` or `neu`.
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer {
            "p" => Some(Sentiment::Positive),
            "n" => Some(Sentiment::Negative),
            "neu" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

/// Label one aspect of an already lowercased text.
pub fn label_aspect(aspect: Aspect, text: &str) -> Sentiment {
    let positive = hits(text, aspect.positive());
    let negative = hits(text, aspect.negative());
    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Labels for every aspect, in [`Aspect::ALL`] order.
pub fn label(text: &str) -> [(Aspect, Sentiment); 5] {
    let text = text.to_lowercase();
    Aspect::ALL.map(|aspect| (aspect, label_aspect(aspect, &text)))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AspectStats {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub total: usize,
}

impl AspectStats {
    fn add(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
        self.total += 1;
    }

    /// Share of `sentiment` in percent, 0 when nothing was labeled.
    pub fn percent(&self, sentiment: Sentiment) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        };
        count as f64 * 100.0 / self.total as f64
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LabelStats {
    pub rows: usize,
    pub aspects: Vec<(Aspect, AspectStats)>,
}

impl LabelStats {
    pub fn aspect(&self, aspect: Aspect) -> Option<&AspectStats> {
        self.aspects
            .iter()
            .find(|(a, _)| *a == aspect)
            .map(|(_, stats)| stats)
    }
}

/// Label every row: append one column per aspect and rename `column` to `sentence`.
pub fn label_table(table: &mut Table, column: &str) -> Result<LabelStats> {
    let index = table
        .column(column)
        .ok_or_else(|| TextError::MissingColumn(column.to_string()))?;

    let mut stats = LabelStats {
        rows: table.len(),
        aspects: Aspect::ALL
            .iter()
            .map(|a| (*a, AspectStats::default()))
            .collect(),
    };
    for row in table.rows.iter_mut() {
        for (slot, (_, sentiment)) in label(&row[index]).into_iter().enumerate() {
            stats.aspects[slot].1.add(sentiment);
            row.push(sentiment.as_str().to_string());
        }
    }
    table.headers[index] = SENTENCE_COLUMN.to_string();
    table
        .headers
        .extend(Aspect::ALL.iter().map(|a| a.column().to_string()));

    for (aspect, s) in &stats.aspects {
        info!(
            %aspect,
            positive = s.positive,
            negative = s.negative,
            neutral = s.neutral,
            "aspect distribution"
        );
    }
    Ok(stats)
}

/// Keep `n` rows chosen with a seeded generator; no-op when `n >= len`.
pub fn sample_rows(table: &mut Table, n: usize, seed: u64) {
    if n >= table.len() {
        return;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let picked = rand::seq::index::sample(&mut rng, table.len(), n);
    let mut rows = std::mem::take(&mut table.rows);
    table.rows = picked
        .iter()
        .map(|i| std::mem::take(&mut rows[i]))
        .collect();
    info!(rows = n, seed, "sampled rows");
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelabelReport {
    /// Rows whose aspects were all answered
    pub reviewed: usize,
    /// Labels set to a different value
    pub changed: usize,
    /// Row the reviewer stopped at; resume from here
    pub quit_at: Option<usize>,
}

/// Walk rows from `start`, asking for every aspect label in turn.
///
/// Answers are `p`, `n`, `neu`, an empty line to keep the label, or `q` to
/// stop. End of input stops too. `save` runs after every
/// [`AUTOSAVE_EVERY`]th row and once more before returning.
pub fn relabel<R, W, S>(
    table: &mut Table,
    start: usize,
    mut input: R,
    mut output: W,
    mut save: S,
) -> Result<RelabelReport>
where
    R: BufRead,
    W: Write,
    S: FnMut(&Table) -> mapharvest_store::Result<()>,
{
    let sentence = table
        .column(SENTENCE_COLUMN)
        .ok_or_else(|| TextError::MissingColumn(SENTENCE_COLUMN.to_string()))?;
    let mut columns = Vec::with_capacity(Aspect::ALL.len());
    for aspect in Aspect::ALL {
        let index = table
            .column(aspect.column())
            .ok_or_else(|| TextError::MissingColumn(aspect.column().to_string()))?;
        columns.push((aspect, index));
    }

    let mut report = RelabelReport::default();
    let total = table.len();
    let mut answer = String::new();
    'rows: for idx in start..total {
        let shown: String = table.rows[idx][sentence].chars().take(SHOWN_CHARS).collect();
        writeln!(output, "\n[{}/{}] Review:\n'{}...'\n", idx + 1, total, shown)?;

        for (aspect, column) in &columns {
            write!(output, "{}: [{}] ", aspect, table.rows[idx][*column])?;
            output.flush()?;
            answer.clear();
            let read = input.read_line(&mut answer)?;
            let answer = answer.trim().to_lowercase();
            if read == 0 || answer == "q" {
                report.quit_at = Some(idx);
                break 'rows;
            }
            match Sentiment::from_answer(&answer) {
                Some(sentiment) => {
                    let cell = &mut table.rows[idx][*column];
                    if cell.as_str() != sentiment.as_str() {
                        *cell = sentiment.as_str().to_string();
                        report.changed += 1;
                    }
                }
                None if answer.is_empty() => {}
                None => debug!(%answer, "unrecognized answer, keeping label"),
            }
        }
        report.reviewed += 1;

        if (idx + 1) % AUTOSAVE_EVERY == 0 {
            save(table)?;
            writeln!(output, "\n[auto-saved at review {}]", idx + 1)?;
        }
    }

    save(table)?;
    info!(
        reviewed = report.reviewed,
        changed = report.changed,
        quit_at = ?report.quit_at,
        "manual review saved"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentiment(text: &str, aspect: Aspect) -> Sentiment {
        label(text)
            .into_iter()
            .find(|(a, _)| *a == aspect)
            .map(|(_, s)| s)
            .unwrap()
    }

    #[test]
    fn more_positive_hits_win() {
        assert_eq!(sentiment("Baksonya ENAK dan gurih", Aspect::FoodQuality), Sentiment::Positive);
    }

    #[test]
    fn no_hits_is_neutral() {
        let labels = label("xyz qwv");
        assert!(labels.iter().all(|(_, s)| *s == Sentiment::Neutral));
    }

    #[test]
    fn labeling_table_renames_column_and_appends_aspects() {
        let mut table = Table::new(vec!["nama_tempat".into(), "review".into()]);
        table.rows.push(vec!["Bakso".into(), "enak dan gurih".into()]);
        table.rows.push(vec!["Kopi".into(), "xyz".into()]);

        let stats = label_table(&mut table, "review").unwrap();

        assert_eq!(
            table.headers,
            vec!["nama_tempat", "sentence", "food_quality", "price", "service", "ambiance", "portion"]
        );
        assert_eq!(table.rows[0][2], "positive");
        assert_eq!(table.rows[1][1..], ["neutral"; 5]);
        let food = stats.aspect(Aspect::FoodQuality).unwrap();
        assert_eq!((food.positive, food.neutral, food.total), (1, 1, 2));
        assert_eq!(food.percent(Sentiment::Positive), 50.0);
        assert_eq!(stats.rows, 2);
    }

    #[test]
    fn missing_column_is_an_error() {
        let mut table = Table::new(vec!["text".into()]);
        assert!(matches!(
            label_table(&mut table, "review"),
            Err(TextError::MissingColumn(c)) if c == "review"
        ));
    }

    #[test]
    fn sampling_is_seeded() {
        let build = || {
            let mut table = Table::new(vec!["review".into()]);
            for i in 0..20 {
                table.rows.push(vec![format!("r{}", i)]);
            }
            table
        };
        let mut a = build();
        let mut b = build();
        sample_rows(&mut a, 5, 42);
        sample_rows(&mut b, 5, 42);
        assert_eq!(a.len(), 5);
        assert_eq!(a.rows, b.rows);

        let mut all = build();
        sample_rows(&mut all, 50, 42);
        assert_eq!(all.rows, build().rows);
    }

    #[test]
    fn empty_stats_have_zero_percent() {
        assert_eq!(AspectStats::default().percent(Sentiment::Neutral), 0.0);
    }

    fn labeled(rows: usize) -> Table {
        let mut table = Table::new(vec!["review".into()]);
        for i in 0..rows {
            table.rows.push(vec![format!("ulasan {}", i)]);
        }
        label_table(&mut table, "review").unwrap();
        table
    }

    #[test]
    fn relabel_applies_answers_and_stops_on_quit() {
        let mut table = labeled(3);
        let mut saves = 0;
        let mut shown = Vec::new();
        let report = relabel(
            &mut table,
            0,
            "p\nn\n\nneu\n\nq\n".as_bytes(),
            &mut shown,
            |_| {
                saves += 1;
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(
            report,
            RelabelReport {
                reviewed: 1,
                changed: 2,
                quit_at: Some(1),
            }
        );
        assert_eq!(saves, 1);
        assert_eq!(table.rows[0][1..], ["positive", "negative", "neutral", "neutral", "neutral"]);
        assert_eq!(table.rows[1][1..], ["neutral"; 5]);
        let shown = String::from_utf8(shown).unwrap();
        assert!(shown.contains("[1/3] Review:"));
        assert!(shown.contains("food_quality: [neutral] "));
    }

    #[test]
    fn relabel_autosaves_every_ten_rows() {
        let mut table = labeled(12);
        let mut saves = 0;
        let report = relabel(&mut table, 0, "\n".repeat(60).as_bytes(), std::io::sink(), |_| {
            saves += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(report.reviewed, 12);
        assert_eq!(report.changed, 0);
        assert_eq!(report.quit_at, None);
        assert_eq!(saves, 2);
    }

    #[test]
    fn relabel_resumes_from_start_and_saves_on_end_of_input() {
        let mut table = labeled(12);
        let mut saved = Vec::new();
        let report = relabel(&mut table, 11, "n\n".as_bytes(), std::io::sink(), |t: &Table| {
            saved.push(t.rows[11][1].clone());
            Ok(())
        })
        .unwrap();
        assert_eq!(report.reviewed, 0);
        assert_eq!(report.changed, 1);
        assert_eq!(report.quit_at, Some(11));
        assert_eq!(saved, vec!["negative"]);
    }

    #[test]
    fn relabel_needs_aspect_columns() {
        let mut table = Table::new(vec!["sentence".into()]);
        table.rows.push(vec!["enak".into()]);
        let err = relabel(&mut table, 0, "".as_bytes(), std::io::sink(), |_| Ok(())).unwrap_err();
        assert!(matches!(err, TextError::MissingColumn(c) if c == "food_quality"));
    }
}
