use anyhow::Context;
use chirp_tk11::{cli, convert, read_chirp_file, render_all, AppError, EnvLocale};
use env_logger::Env;
use log::{error, info};

fn setup_logging(level: &str) {
    let env = Env::default().filter_or("RUST_LOG", match level {
        "essential" => "info",
        "debug" => "debug",
        "trace" => "trace",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    });
    env_logger::Builder::from_env(env).init();
}

fn run(args: &cli::CliArgs) -> anyhow::Result<()> {
    let options = args.convert_options().context("invalid --variant")?;

    info!("Reading {}", args.input.display());
    let records = match read_chirp_file(&args.input) {
        Ok(records) => records,
        Err(e @ AppError::MissingInput(_)) => {
            error!("Error: {}", e);
            return Err(e.into());
        }
        Err(e) => return Err(e).with_context(|| format!("reading {}", args.input.display())),
    };

    let table = convert(records);
    let locale = EnvLocale::new(&options.fallback_locale);

    for (variant, text) in render_all(&table, &options, &locale)? {
        let path = cli::output_path(&args.out, variant);
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        info!("Conversion complete. Output written to {} ({}).", path.display(), variant);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = cli::parse_cli();
    setup_logging(&args.log_level);
    run(&args)
}
