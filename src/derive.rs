//! Field derivation: pure mappings from CHIRP cell values to TK11 cell values.
//!
//! Every function here is total. Bad numbers fall back to the raw input text
//! and unknown tags fall back to `"Null"`, so nothing in this module can stop
//! a run.

use log::trace;

pub const NULL: &str = "Null";

/// TX frequency TK11 expects when CHIRP marks transmit as disabled.
pub const TX_OFF_FREQ: &str = "0.15300";

const VALID_DEMODES: [&str; 5] = ["FM", "AM", "LSB", "USB", "CW"];

#[inline]
fn parse_mhz(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

#[inline]
fn fmt_mhz(v: f64) -> String {
    format!("{:.5}", v)
}

pub fn band(mode: &str) -> &'static str {
    if mode == "NFM" { "12.5K" } else { "25K" }
}

pub fn demode(mode: &str) -> &str {
    if VALID_DEMODES.contains(&mode) { mode } else { "FM" }
}

/// CHIRP polarity character -> TK11 digital squelch type.
pub fn dtcs_type(polarity: char) -> &'static str {
    match polarity {
        'N' => "NDCS",
        'R' => "IDCS",
        _ => NULL,
    }
}

/// RX frequency with five decimals; `"0.0"` for an empty cell.
pub fn rx_freq(frequency: &str) -> String {
    if frequency.is_empty() {
        return "0.0".to_string();
    }
    match parse_mhz(frequency) {
        Some(v) => fmt_mhz(v),
        None => frequency.to_string(),
    }
}

pub fn tx_freq(frequency: &str, duplex: &str, offset: &str) -> String {
    if duplex == "off" {
        return TX_OFF_FREQ.to_string();
    }
    let Some(rx) = parse_mhz(frequency) else {
        trace!("tx freq: unparseable rx {:?}, passing through", frequency);
        return frequency.to_string();
    };
    let shifted = match duplex {
        "-" | "+" | "split" => match parse_mhz(offset) {
            Some(off) => match duplex {
                "-" => rx - off,
                "+" => rx + off,
                _ => off,
            },
            None => {
                trace!("tx freq: unparseable offset {:?}, passing through", offset);
                return frequency.to_string();
            }
        },
        _ => rx,
    };
    fmt_mhz(shifted)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneMode {
    Tone,
    Tsql,
    Dtcs,
    DtcsR,
    Cross,
    None,
}

impl ToneMode {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Tone" => ToneMode::Tone,
            "TSQL" => ToneMode::Tsql,
            "DTCS" => ToneMode::Dtcs,
            "DTCS-R" => ToneMode::DtcsR,
            "Cross" => ToneMode::Cross,
            _ => ToneMode::None,
        }
    }
}

/// Raw tone-related cells of one CHIRP row.
#[derive(Clone, Copy, Debug)]
pub struct ToneInput<'a> {
    pub tone: &'a str,
    pub r_tone_freq: &'a str,
    pub c_tone_freq: &'a str,
    pub dtcs_code: &'a str,
    pub rx_dtcs_code: &'a str,
    pub dtcs_polarity: &'a str,
    pub cross_mode: &'a str,
}

impl ToneInput<'_> {
    fn tx_polarity(&self) -> char {
        self.dtcs_polarity.chars().next().unwrap_or('N')
    }

    fn rx_polarity(&self) -> char {
        self.dtcs_polarity.chars().nth(1).unwrap_or('N')
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToneSettings {
    pub encode_type: String,
    pub encode_value: String,
    pub decode_type: String,
    pub decode_value: String,
}

impl Default for ToneSettings {
    fn default() -> Self {
        Self {
            encode_type: NULL.into(),
            encode_value: NULL.into(),
            decode_type: NULL.into(),
            decode_value: NULL.into(),
        }
    }
}

impl ToneSettings {
    fn encode(&mut self, kind: &str, value: &str) {
        self.encode_type = kind.to_string();
        self.encode_value = or_null(value);
    }

    fn decode(&mut self, kind: &str, value: &str) {
        self.decode_type = kind.to_string();
        self.decode_value = or_null(value);
    }
}

#[inline]
fn or_null(value: &str) -> String {
    if value.is_empty() { NULL.to_string() } else { value.to_string() }
}

pub fn tone_settings(input: &ToneInput<'_>) -> ToneSettings {
    let mut t = ToneSettings::default();
    match ToneMode::from_tag(input.tone) {
        ToneMode::Tone => t.encode("Ctcss", input.r_tone_freq),
        ToneMode::Tsql => {
            t.encode("Ctcss", input.c_tone_freq);
            t.decode("Ctcss", input.c_tone_freq);
        }
        ToneMode::Dtcs => {
            t.encode(dtcs_type(input.tx_polarity()), input.dtcs_code);
            t.decode(dtcs_type(input.rx_polarity()), input.dtcs_code);
        }
        ToneMode::DtcsR => {
            t.encode(dtcs_type(input.tx_polarity()), input.dtcs_code);
            t.decode("IDCS", input.rx_dtcs_code);
        }
        ToneMode::Cross if !input.cross_mode.is_empty() => {
            let (tx, rx) = input.cross_mode.split_once("->").unwrap_or(("None", "None"));
            match tx {
                "Tone" => t.encode("Ctcss", input.r_tone_freq),
                "DTCS" => t.encode(dtcs_type(input.tx_polarity()), input.dtcs_code),
                _ => {}
            }
            match rx {
                "Tone" => t.decode("Ctcss", input.c_tone_freq),
                // RX side reads the second polarity character, same as plain DTCS
                "DTCS" => t.decode(dtcs_type(input.rx_polarity()), input.rx_dtcs_code),
                _ => {}
            }
        }
        ToneMode::Cross | ToneMode::None => {}
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone<'a>(tag: &'a str) -> ToneInput<'a> {
        ToneInput {
            tone: tag,
            r_tone_freq: "",
            c_tone_freq: "",
            dtcs_code: "",
            rx_dtcs_code: "",
            dtcs_polarity: "NN",
            cross_mode: "",
        }
    }

    fn settings(t: &ToneSettings) -> (&str, &str, &str, &str) {
        (&t.encode_type, &t.encode_value, &t.decode_type, &t.decode_value)
    }

    #[test]
    fn band_follows_mode() {
        assert_eq!(band("NFM"), "12.5K");
        assert_eq!(band("FM"), "25K");
        assert_eq!(band(""), "25K");
    }

    #[test]
    fn demode_defaults_to_fm() {
        assert_eq!(demode("USB"), "USB");
        assert_eq!(demode("NFM"), "FM");
        assert_eq!(demode("DV"), "FM");
    }

    #[test]
    fn polarity_mapping() {
        assert_eq!(dtcs_type('N'), "NDCS");
        assert_eq!(dtcs_type('R'), "IDCS");
        assert_eq!(dtcs_type('x'), "Null");
    }

    #[test]
    fn tx_frequency_by_duplex() {
        assert_eq!(tx_freq("145.600", "-", "0.6"), "145.00000");
        assert_eq!(tx_freq("430.050", "+", "7.6"), "437.65000");
        assert_eq!(tx_freq("145.600", "split", "433.5"), "433.50000");
        assert_eq!(tx_freq("145.600", "", "0.6"), "145.60000");
    }

    #[test]
    fn tx_off_ignores_frequency_and_offset() {
        assert_eq!(tx_freq("145.600", "off", "0.6"), "0.15300");
        assert_eq!(tx_freq("garbage", "off", "also garbage"), "0.15300");
    }

    #[test]
    fn tx_unparseable_input_passes_through() {
        assert_eq!(tx_freq("abc", "-", "0.6"), "abc");
        assert_eq!(tx_freq("145.600", "+", ""), "145.600");
    }

    #[test]
    fn rx_frequency_formatting() {
        assert_eq!(rx_freq("446.00625"), "446.00625");
        assert_eq!(rx_freq("145.5"), "145.50000");
        assert_eq!(rx_freq(""), "0.0");
        assert_eq!(rx_freq("n/a"), "n/a");
    }

    #[test]
    fn tone_encodes_r_tone_only() {
        let input = ToneInput { r_tone_freq: "88.5", ..tone("Tone") };
        assert_eq!(settings(&tone_settings(&input)), ("Ctcss", "88.5", "Null", "Null"));

        let empty = tone("Tone");
        assert_eq!(settings(&tone_settings(&empty)), ("Ctcss", "Null", "Null", "Null"));
    }

    #[test]
    fn tsql_uses_c_tone_both_ways() {
        let input = ToneInput { c_tone_freq: "88.5", r_tone_freq: "100.0", ..tone("TSQL") };
        assert_eq!(settings(&tone_settings(&input)), ("Ctcss", "88.5", "Ctcss", "88.5"));
    }

    #[test]
    fn dtcs_uses_each_polarity_char() {
        let input = ToneInput { dtcs_code: "023", dtcs_polarity: "NR", ..tone("DTCS") };
        assert_eq!(settings(&tone_settings(&input)), ("NDCS", "023", "IDCS", "023"));

        let short = ToneInput { dtcs_code: "023", dtcs_polarity: "R", ..tone("DTCS") };
        assert_eq!(settings(&tone_settings(&short)), ("IDCS", "023", "NDCS", "023"));

        let empty = ToneInput { dtcs_code: "023", dtcs_polarity: "", ..tone("DTCS") };
        assert_eq!(settings(&tone_settings(&empty)), ("NDCS", "023", "NDCS", "023"));
    }

    #[test]
    fn dtcs_r_forces_inverted_decode() {
        let input = ToneInput {
            dtcs_code: "023",
            rx_dtcs_code: "754",
            dtcs_polarity: "NN",
            ..tone("DTCS-R")
        };
        assert_eq!(settings(&tone_settings(&input)), ("NDCS", "023", "IDCS", "754"));
    }

    #[test]
    fn cross_tone_to_dtcs() {
        let input = ToneInput {
            r_tone_freq: "100.0",
            dtcs_polarity: "RN",
            rx_dtcs_code: "023",
            cross_mode: "Tone->DTCS",
            ..tone("Cross")
        };
        assert_eq!(settings(&tone_settings(&input)), ("Ctcss", "100.0", "NDCS", "023"));
    }

    #[test]
    fn cross_dtcs_to_tone() {
        let input = ToneInput {
            c_tone_freq: "67.0",
            dtcs_code: "411",
            dtcs_polarity: "RN",
            cross_mode: "DTCS->Tone",
            ..tone("Cross")
        };
        assert_eq!(settings(&tone_settings(&input)), ("IDCS", "411", "Ctcss", "67.0"));
    }

    #[test]
    fn cross_one_sided() {
        let input = ToneInput { r_tone_freq: "77.0", cross_mode: "Tone->", ..tone("Cross") };
        assert_eq!(settings(&tone_settings(&input)), ("Ctcss", "77.0", "Null", "Null"));
    }

    #[test]
    fn cross_without_separator_or_mode_sets_nothing() {
        let bad = ToneInput { r_tone_freq: "77.0", cross_mode: "Tone", ..tone("Cross") };
        assert_eq!(tone_settings(&bad), ToneSettings::default());
        let missing = ToneInput { r_tone_freq: "77.0", ..tone("Cross") };
        assert_eq!(tone_settings(&missing), ToneSettings::default());
    }

    #[test]
    fn unknown_tag_is_all_null() {
        let input = ToneInput { r_tone_freq: "88.5", dtcs_code: "023", ..tone("") };
        assert_eq!(tone_settings(&input), ToneSettings::default());
        assert_eq!(tone_settings(&tone("tone")), ToneSettings::default());
    }
}
