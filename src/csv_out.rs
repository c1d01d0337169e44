use crate::errors::AppError;
use crate::locale::DecimalSeparator;
use crate::model::{Tk11Row, Tk11Table, TK11_HEADER};
use csv::{Terminator, WriterBuilder};
use std::fmt;
use std::str::FromStr;

/// Columns quoted in every quoted variant, whatever their content.
const ALWAYS_QUOTE: [&str; 6] = [
    "RX Freq[MHZ]", "TX Freq[MHZ]", "QT Encode1", "QT Decode", "MSW", "Band",
];

/// Columns whose `.` becomes `,` in the comma-decimal variant.
const COMMA_DECIMAL: [&str; 6] = [
    "RX Freq[MHZ]", "TX Freq[MHZ]", "QT Encode1", "QT Decode", "MSW", "Band",
];

/// Columns whose `.` follows the locale in the locale-decimal variant.
const LOCALE_DECIMAL: [&str; 4] = ["RX Freq[MHZ]", "TX Freq[MHZ]", "QT Encode1", "QT Decode"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputVariant {
    Plain,
    Quoted,
    CommaDecimal,
    LocaleDecimal,
}

impl OutputVariant {
    pub const ALL: [OutputVariant; 4] = [
        OutputVariant::Plain,
        OutputVariant::Quoted,
        OutputVariant::CommaDecimal,
        OutputVariant::LocaleDecimal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputVariant::Plain => "plain",
            OutputVariant::Quoted => "quoted",
            OutputVariant::CommaDecimal => "comma",
            OutputVariant::LocaleDecimal => "locale",
        }
    }

    /// Appended to the output file stem; empty for plain.
    pub fn file_suffix(self) -> &'static str {
        match self {
            OutputVariant::Plain => "",
            OutputVariant::Quoted => "_quoted",
            OutputVariant::CommaDecimal => "_comma",
            OutputVariant::LocaleDecimal => "_locale",
        }
    }
}

impl fmt::Display for OutputVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputVariant {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputVariant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::Parse(format!("unknown output variant '{}'", s)))
    }
}

/// Header and data rows end in CRLF; blank rows are raw lines ending in LF.
const ROW_END: &str = "\r\n";
const BLANK_END: char = '\n';

/// Minimal-quoting CSV line, as the csv crate writes it.
fn plain_line<I, T>(fields: I) -> Result<String, AppError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    wtr.write_record(fields)
        .map_err(|e| AppError::IO(format!("csv write row: {}", e)))?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::IO(format!("csv flush: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Parse(format!("csv row not utf-8: {}", e)))
}

fn decimal_target(value: &str) -> bool {
    !value.is_empty() && value != "Null"
}

/// Apply the variant's decimal rewrite and quoting to one cell.
fn encode_field(column: &str, value: &str, variant: OutputVariant, sep: char) -> String {
    let value = match variant {
        OutputVariant::CommaDecimal
            if COMMA_DECIMAL.contains(&column) && decimal_target(value) =>
        {
            value.replace('.', ",")
        }
        OutputVariant::LocaleDecimal
            if LOCALE_DECIMAL.contains(&column) && decimal_target(value) =>
        {
            value.replace('.', sep.encode_utf8(&mut [0u8; 4]))
        }
        _ => value.to_string(),
    };
    let special = value.contains([',', '"', '\r', '\n']);
    if special || ALWAYS_QUOTE.contains(&column) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value
    }
}

fn quoted_line(values: &[String], variant: OutputVariant, sep: char) -> String {
    let mut line = TK11_HEADER
        .iter()
        .zip(values)
        .map(|(column, value)| encode_field(column, value, variant, sep))
        .collect::<Vec<_>>()
        .join(",");
    line.push_str(ROW_END);
    line
}

/// Render the whole table (header included) in one variant.
///
/// The decimal separator is only consulted for `LocaleDecimal`.
pub fn render(
    table: &Tk11Table,
    variant: OutputVariant,
    separator: &dyn DecimalSeparator,
) -> Result<String, AppError> {
    let sep = match variant {
        OutputVariant::LocaleDecimal => separator.decimal_separator(),
        _ => '.',
    };

    let mut out = plain_line(TK11_HEADER)?;
    for row in &table.rows {
        match row {
            Tk11Row::Blank(no) => {
                out.push_str(&Tk11Row::raw_blank_line(*no));
                out.push(BLANK_END);
            }
            Tk11Row::Data(ch) => {
                let values = ch.values();
                match variant {
                    OutputVariant::Plain => out.push_str(&plain_line(&values)?),
                    _ => out.push_str(&quoted_line(&values, variant, sep)),
                }
            }
        }
    }
    Ok(out)
}
