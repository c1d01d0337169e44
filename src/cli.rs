use crate::csv_out::OutputVariant;
use crate::errors::AppError;
use crate::locale::DEFAULT_FALLBACK_LOCALE;
use crate::pipeline::ConvertOptions;
use argparse::{ArgumentParser, Collect, Store};
use std::path::{Path, PathBuf};

pub struct CliArgs {
    pub input: PathBuf,
    pub out: PathBuf,
    pub variants: Vec<String>,
    pub fallback_locale: String,
    pub log_level: String,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("inCHIRP.csv"),
            out: PathBuf::from("outTK11.csv"),
            variants: vec![],
            fallback_locale: DEFAULT_FALLBACK_LOCALE.into(),
            log_level: "essential".into(),
        }
    }
}

impl CliArgs {
    /// Validate the variant names; no `--variant` (or `all`) means every variant.
    pub fn convert_options(&self) -> Result<ConvertOptions, AppError> {
        let mut variants = Vec::new();
        for name in &self.variants {
            if name.trim().eq_ignore_ascii_case("all") {
                variants.extend(OutputVariant::ALL);
            } else {
                variants.push(name.parse::<OutputVariant>()?);
            }
        }
        if variants.is_empty() {
            variants = OutputVariant::ALL.to_vec();
        }
        Ok(ConvertOptions { variants, fallback_locale: self.fallback_locale.clone() })
    }
}

/// `outTK11.csv` + quoted -> `outTK11_quoted.csv`, next to the base path.
pub fn output_path(base: &Path, variant: OutputVariant) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "outTK11".into());
    let ext = base
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".into());
    base.with_file_name(format!("{}{}.{}", stem, variant.file_suffix(), ext))
}

pub fn parse_cli() -> CliArgs {
    let mut args = CliArgs::default();
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("CHIRP CSV -> TK11 CSV converter");
        ap.refer(&mut args.input)
            .add_argument("input", Store, "CHIRP export (default inCHIRP.csv)");
        ap.refer(&mut args.out)
            .add_option(&["-o", "--out"], Store, "Output CSV path (default outTK11.csv)");
        ap.refer(&mut args.variants).add_option(
            &["--variant"],
            Collect,
            "Output variant: plain|quoted|comma|locale|all (repeatable)",
        );
        ap.refer(&mut args.fallback_locale).add_option(
            &["--fallback-locale"],
            Store,
            "Locale used when the process locale is unknown",
        );
        ap.refer(&mut args.log_level)
            .add_option(&["--log"], Store, "Log level (essential|debug|trace|warn|error)");
        ap.parse_args_or_exit();
    }
    args
}
