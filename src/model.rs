use std::collections::BTreeMap;

/// TK11 column names, in the order the radio's import expects them.
pub const TK11_HEADER: [&str; 20] = [
    "No.", "Name", "RX Freq[MHZ]", "TX Freq[MHZ]", "QT Encode Type", "QT Encode1",
    "QT Decode Type", "QT Decode", "MSW", "Band", "Powrer", "Busy Lock",
    "ScanList", "Demode", "Freq Reverse", "SQ", "Encrypt", "Signaling Decode",
    "PTTID", "Signal",
];

/// CHIRP columns the converter reads. Anything else in the export is ignored.
pub const CHIRP_FIELDS: [&str; 13] = [
    "Location", "Name", "Frequency", "Duplex", "Offset", "Tone", "rToneFreq",
    "cToneFreq", "DtcsCode", "RxDtcsCode", "DtcsPolarity", "CrossMode", "Mode",
];

/// One CHIRP row: column name -> cell text.
/// A column missing from the export has no key at all, which is not the same
/// as an empty cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputChannelRecord {
    fields: BTreeMap<String, String>,
}

impl InputChannelRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Cell value, or `default` when the column is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn location(&self) -> Option<&str> {
        self.get("Location")
    }

    /// True when every recognized column other than Location is blank.
    pub fn is_empty_row(&self) -> bool {
        CHIRP_FIELDS
            .iter()
            .filter(|f| **f != "Location")
            .all(|f| self.get(f).is_none_or(|v| v.trim().is_empty()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InputChannelRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A populated TK11 channel, one field per `TK11_HEADER` column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tk11Channel {
    pub no: usize,
    pub name: String,
    pub rx_freq: String,
    pub tx_freq: String,
    pub qt_encode_type: String,
    pub qt_encode: String,
    pub qt_decode_type: String,
    pub qt_decode: String,
    pub msw: String,
    pub band: String,
    pub power: String,
    pub busy_lock: String,
    pub scan_list: String,
    pub demode: String,
    pub freq_reverse: String,
    pub sq: String,
    pub encrypt: String,
    pub signaling_decode: String,
    pub pttid: String,
    pub signal: String,
}

impl Tk11Channel {
    /// Field values in `TK11_HEADER` order.
    pub fn values(&self) -> [String; 20] {
        [
            self.no.to_string(),
            self.name.clone(),
            self.rx_freq.clone(),
            self.tx_freq.clone(),
            self.qt_encode_type.clone(),
            self.qt_encode.clone(),
            self.qt_decode_type.clone(),
            self.qt_decode.clone(),
            self.msw.clone(),
            self.band.clone(),
            self.power.clone(),
            self.busy_lock.clone(),
            self.scan_list.clone(),
            self.demode.clone(),
            self.freq_reverse.clone(),
            self.sq.clone(),
            self.encrypt.clone(),
            self.signaling_decode.clone(),
            self.pttid.clone(),
            self.signal.clone(),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tk11Row {
    Data(Tk11Channel),
    /// Slot with no channel programmed; only `No.` is set.
    Blank(usize),
}

impl Tk11Row {
    pub fn no(&self) -> usize {
        match self {
            Tk11Row::Data(ch) => ch.no,
            Tk11Row::Blank(no) => *no,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Tk11Row::Blank(_))
    }

    /// Line used for blank slots in every variant: the slot number and 19 empty cells.
    pub fn raw_blank_line(no: usize) -> String {
        format!("{}{}", no, ",".repeat(TK11_HEADER.len() - 1))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub input_rows: usize,
    pub skipped_rows: usize,
    pub data_slots: usize,
    pub blank_slots: usize,
}

/// The normalized output of one conversion run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tk11Table {
    pub rows: Vec<Tk11Row>,
    pub summary: ConversionSummary,
}
