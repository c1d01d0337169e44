use crate::derive::{self, ToneInput};
use crate::model::{InputChannelRecord, Tk11Channel, Tk11Row};
use log::trace;

/// Map one CHIRP row onto the TK11 row for `slot`.
/// Rows with nothing but a Location become blank slots.
pub fn normalize(rec: &InputChannelRecord, slot: usize) -> Tk11Row {
    if rec.is_empty_row() {
        trace!("slot {}: empty source row", slot);
        return Tk11Row::Blank(slot);
    }

    let frequency = rec.get_or("Frequency", "0.0");
    let mode = rec.get_or("Mode", "FM");

    let tones = derive::tone_settings(&ToneInput {
        tone: rec.get_or("Tone", ""),
        r_tone_freq: rec.get_or("rToneFreq", ""),
        c_tone_freq: rec.get_or("cToneFreq", ""),
        dtcs_code: rec.get_or("DtcsCode", ""),
        rx_dtcs_code: rec.get_or("RxDtcsCode", ""),
        dtcs_polarity: rec.get_or("DtcsPolarity", "NN"),
        cross_mode: rec.get_or("CrossMode", ""),
    });

    let ch = Tk11Channel {
        no: slot,
        name: rec.get_or("Name", "").to_string(),
        rx_freq: derive::rx_freq(frequency),
        tx_freq: derive::tx_freq(
            frequency,
            rec.get_or("Duplex", ""),
            rec.get_or("Offset", "0.0"),
        ),
        qt_encode_type: tones.encode_type,
        qt_encode: tones.encode_value,
        qt_decode_type: tones.decode_type,
        qt_decode: tones.decode_value,
        msw: "2K".into(),
        band: derive::band(mode).into(),
        power: "Middle".into(),
        busy_lock: "OFF".into(),
        scan_list: "1".into(),
        demode: derive::demode(mode).into(),
        freq_reverse: "OFF".into(),
        sq: "3".into(),
        encrypt: "OFF".into(),
        signaling_decode: "OFF".into(),
        pttid: "OFF".into(),
        signal: "DTMF".into(),
    };
    trace!("slot {}: {:?}", slot, ch);
    Tk11Row::Data(ch)
}
