//! CHIRP CSV export -> TK11 CSV import conversion.

pub mod cli;
pub mod csv_out;
pub mod derive;
pub mod errors;
pub mod locale;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod reader;
pub mod renumber;

pub use csv_out::{render, OutputVariant};
pub use errors::AppError;
pub use locale::{DecimalSeparator, EnvLocale, FixedSeparator};
pub use model::{InputChannelRecord, Tk11Channel, Tk11Row, Tk11Table, TK11_HEADER};
pub use pipeline::{convert, render_all, ConvertOptions};
pub use reader::{read_chirp, read_chirp_file};
