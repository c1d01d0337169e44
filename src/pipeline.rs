use crate::csv_out::{self, OutputVariant};
use crate::errors::AppError;
use crate::locale::{DecimalSeparator, DEFAULT_FALLBACK_LOCALE};
use crate::model::{ConversionSummary, InputChannelRecord, Tk11Row, Tk11Table};
use crate::normalize::normalize;
use crate::renumber::{LocationIndex, MAX_EXPECTED_SPAN};
use log::{debug, info, warn};

/// Options for one conversion run.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub variants: Vec<OutputVariant>,
    pub fallback_locale: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            variants: OutputVariant::ALL.to_vec(),
            fallback_locale: DEFAULT_FALLBACK_LOCALE.into(),
        }
    }
}

impl ConvertOptions {
    /// Requested variants in order, each at most once.
    pub fn unique_variants(&self) -> Vec<OutputVariant> {
        let mut seen = Vec::with_capacity(self.variants.len());
        for v in &self.variants {
            if !seen.contains(v) {
                seen.push(*v);
            }
        }
        seen
    }
}

/// Renumber the CHIRP rows into contiguous slots and map each slot to TK11.
pub fn convert<I>(records: I) -> Tk11Table
where
    I: IntoIterator<Item = InputChannelRecord>,
{
    let mut input_rows = 0usize;
    let idx = LocationIndex::build(records.into_iter().inspect(|_| input_rows += 1));
    if idx.span_len() > MAX_EXPECTED_SPAN {
        if let Some((min, max)) = idx.span() {
            warn!(
                "Locations {}..={} span {} slots; every gap becomes a blank row",
                min,
                max,
                idx.span_len()
            );
        }
    }

    let rows: Vec<Tk11Row> = idx
        .slots()
        .map(|(slot, rec)| match rec {
            Some(rec) => normalize(rec, slot),
            None => Tk11Row::Blank(slot),
        })
        .collect();

    let blank_slots = rows.iter().filter(|r| r.is_blank()).count();
    let summary = ConversionSummary {
        input_rows,
        skipped_rows: idx.skipped(),
        data_slots: rows.len() - blank_slots,
        blank_slots,
    };
    if let Some((min, max)) = idx.span() {
        debug!("Locations {}..={} -> slots 1..={}", min, max, rows.len());
    }
    info!(
        "converted {} rows: {} channels, {} blank slots, {} skipped",
        summary.input_rows, summary.data_slots, summary.blank_slots, summary.skipped_rows
    );
    Tk11Table { rows, summary }
}

/// Render every requested variant of `table`.
pub fn render_all(
    table: &Tk11Table,
    options: &ConvertOptions,
    separator: &dyn DecimalSeparator,
) -> Result<Vec<(OutputVariant, String)>, AppError> {
    options
        .unique_variants()
        .into_iter()
        .map(|v| csv_out::render(table, v, separator).map(|text| (v, text)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::FixedSeparator;

    fn rec(loc: &str, name: &str, freq: &str) -> InputChannelRecord {
        InputChannelRecord::new()
            .with("Location", loc)
            .with("Name", name)
            .with("Frequency", freq)
    }

    #[test]
    fn sparse_locations_fill_with_blanks() {
        let table = convert(vec![
            rec("3", "A", "145.500"),
            rec("6", "B", "433.500"),
            rec("4", "", ""),
            rec("zz", "bad", "1"),
        ]);
        let kinds: Vec<(usize, bool)> =
            table.rows.iter().map(|r| (r.no(), r.is_blank())).collect();
        assert_eq!(kinds, vec![(1, false), (2, true), (3, true), (4, false)]);
        assert_eq!(
            table.summary,
            ConversionSummary { input_rows: 4, skipped_rows: 1, data_slots: 2, blank_slots: 2 }
        );
    }

    #[test]
    fn no_valid_locations_gives_empty_table() {
        let table = convert(vec![rec("", "x", "1")]);
        assert!(table.rows.is_empty());
        assert_eq!(table.summary.skipped_rows, 1);
    }

    #[test]
    fn duplicate_variants_render_once() {
        let table = convert(vec![rec("1", "A", "145.5")]);
        let opts = ConvertOptions {
            variants: vec![OutputVariant::Quoted, OutputVariant::Plain, OutputVariant::Quoted],
            ..Default::default()
        };
        let out = render_all(&table, &opts, &FixedSeparator('.')).unwrap();
        let order: Vec<OutputVariant> = out.iter().map(|(v, _)| *v).collect();
        assert_eq!(order, vec![OutputVariant::Quoted, OutputVariant::Plain]);
    }
}
